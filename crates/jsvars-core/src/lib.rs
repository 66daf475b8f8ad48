//! Core library for jsvars.
//!
//! Collects server-side variables during a single render in a [`store::Store`] and
//! emits them as `window.<storage>.<key> = <value>;` statements that client-side code
//! reads back through a small accessor function.
//!
//! Shared infrastructure lives alongside the store: configuration loading, value
//! conversion, script-tag wrapping, the accessor runtime template and its cache,
//! a server-side mirror of the accessor contract, and file scaffolding.

pub mod accessor;
pub mod cache;
pub mod config;
pub mod convert;
pub mod error;
pub mod runtime;
pub mod scaffold;
pub mod script;
pub mod store;
pub mod templates;
