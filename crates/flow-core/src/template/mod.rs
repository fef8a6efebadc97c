//! Construcción de templates de pipeline.
//!
//! - `TemplateBuilder`: estado "en construcción"; registra steps en orden.
//! - `After`: declaración con restricción de orden explícita.
//! - `Step`: un step declarado (operación + input + prerequisitos de orden).
//! - `Template`: resultado inmutable, listo para enviarse al servicio externo.

pub mod builder;
pub mod step;
#[allow(clippy::module_inception)]
pub mod template;

pub use builder::{After, Declared, TemplateBuilder};
pub use step::Step;
pub use template::Template;
