//! Source renderers.
//!
//! The built-in template produces Java; any other target can be produced by
//! loading a custom Handlebars template with the same context.

mod escape;
mod handlebars_renderer;

pub use escape::{escape_comment, escape_java_string};
pub use handlebars_renderer::{BUILTIN_JAVA_TEMPLATE, HandlebarsRenderer};
