//! Constantes del builder de templates.
//!
//! `TEMPLATE_FORMAT_VERSION` forma parte del input del fingerprint y de la
//! forma wire del template: cambiarla invalida los fingerprints previos aunque
//! los pasos declarados sean idénticos.

/// Versión del formato wire del template.
pub const TEMPLATE_FORMAT_VERSION: u32 = 1;

/// Clave con la que se serializa una referencia diferida dentro de un input.
pub const DEFERRED_REF_KEY: &str = "$ref";

/// Prefijo de los identificadores de step en la forma wire (`s0`, `s1`, ...).
pub const STEP_KEY_PREFIX: &str = "s";
