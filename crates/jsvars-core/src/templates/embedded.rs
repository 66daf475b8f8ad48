//! Compile-time embedded templates.
//!
//! Paths are relative to this source file (`crates/jsvars-core/src/templates/embedded.rs`).
//! Do NOT move `templates/accessor.js.tmpl` without updating the path here.

/// Accessor runtime: defines `window.{{function}}` over `window.{{storage}}`.
pub const ACCESSOR_JS: &str = include_str!("../../../../templates/accessor.js.tmpl");
