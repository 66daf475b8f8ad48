//! Template system for the accessor runtime.
//!
//! The runtime template is embedded into the binary at compile-time via [`include_str!`]
//! in the [`embedded`] module, then rendered with [Handlebars](https://handlebarsjs.com/)
//! via the [`renderer::TemplateRenderer`].
//!
//! ## Template variables
//!
//! - `{{function}}`: name of the global accessor function (e.g., `p`)
//! - `{{storage}}`: name of the global object holding the variables
//!
//! **Warning**: `templates/accessor.js.tmpl` and the constant in [`embedded`] must stay
//! in sync. The `include_str!` path is relative to `embedded.rs` and checked at compile-time.

pub mod embedded;
pub mod renderer;
