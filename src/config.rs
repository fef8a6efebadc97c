//! Configuración central de la aplicación.
//! Carga variables de entorno (.env) y expone una estructura inmutable (`CONFIG`).
//! También inicializa el logger con el filtro configurado.

use std::env;

use flow_domain::{GenerationConfig, ProcessingConfig};
use log::warn;
use once_cell::sync::Lazy;

use crate::errors::AppError;

pub const LOG_FILTER_VAR: &str = "APPARELFLOW_LOG";
const DEFAULT_LOG_FILTER: &str = "info";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Preparación de prendas (tamaños, márgenes).
    pub processing: ProcessingConfig,
    /// Recetas de generación.
    pub generation: GenerationConfig,
    /// Filtro de `env_logger` (`info`, `flow_service=debug`, ...).
    pub log_filter: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self { processing: ProcessingConfig::default(),
               generation: GenerationConfig::default(),
               log_filter: DEFAULT_LOG_FILTER.to_string() }
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self, AppError> {
        let _ = dotenvy::dotenv(); // ignora error si no existe .env
        Ok(Self { processing: ProcessingConfig::from_env()?,
                  generation: GenerationConfig::from_env()?,
                  log_filter: env::var(LOG_FILTER_VAR).unwrap_or_else(|_| DEFAULT_LOG_FILTER.to_string()) })
    }
}

/// Instancia global perezosa. Una configuración inválida se reporta y se
/// sustituye por los valores por defecto.
pub static CONFIG: Lazy<AppConfig> = Lazy::new(|| {
    AppConfig::from_env().unwrap_or_else(|e| {
                             warn!("config: {e}; using defaults");
                             AppConfig::default()
                         })
});

/// Inicializa `env_logger` con el filtro de la configuración. Llamadas
/// repetidas no tienen efecto.
pub fn init_logging(config: &AppConfig) {
    let _ = env_logger::Builder::new().parse_filters(&config.log_filter).try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_product_values() {
        let c = AppConfig::default();
        assert_eq!(c.processing.max_image_side, 1500);
        assert_eq!(c.processing.canvas.width, 832);
        assert_eq!(c.generation.linda_variations, 2);
        assert_eq!(c.log_filter, "info");
    }

    #[test]
    fn invalid_env_value_is_a_config_error() {
        env::set_var("APPARELFLOW_CANVAS_MARGIN", "wide");
        let res = AppConfig::from_env();
        env::remove_var("APPARELFLOW_CANVAS_MARGIN");
        assert!(matches!(res, Err(AppError::Domain(_))));
    }
}
