//! Parámetros de preparación y generación.
//!
//! Los valores por defecto son los que usa el producto; cada uno puede
//! sobreescribirse con variables de entorno (`.env` incluido) con prefijo
//! `APPARELFLOW_`.

use std::env;
use std::str::FromStr;

use dotenvy::dotenv;
use log::debug;
use once_cell::sync::Lazy;

use crate::error::DomainError;
use crate::image::Placement;

// Carga perezosa del archivo .env una sola vez.
static DOTENV_LOADED: Lazy<()> = Lazy::new(|| {
    let _ = dotenv(); // ignora error si no existe .env
});

/// Forzar carga temprana de .env desde aplicaciones externas si se desea.
pub fn init_dotenv() {
    Lazy::force(&DOTENV_LOADED);
}

/// LoRA aplicada a modelos juveniles.
pub const DEFAULT_YOUTH_LORA_ID: &str = "37efeb34-6aa8-4f1c-a587-bc7b0fc324bd";

/// Lienzo final sobre el que se centra la prenda recortada.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CanvasConfig {
    pub width: u32,
    pub height: u32,
    pub margin: u32,
}

impl CanvasConfig {
    /// Zona útil del lienzo descontando el margen.
    pub fn placement(&self) -> Placement {
        Placement { left: self.margin,
                    top: self.margin,
                    width: self.width.saturating_sub(self.margin.saturating_mul(2)),
                    height: self.height.saturating_sub(self.margin.saturating_mul(2)) }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessingConfig {
    /// Lado máximo admitido antes de redimensionar.
    pub max_image_side: u32,
    /// Ambos lados deben ser múltiplos de este valor.
    pub dimension_multiple: u32,
    /// Margen blanco añadido antes de detectar una prenda sin persona.
    pub cut_padding: u32,
    pub canvas: CanvasConfig,
}

impl Default for ProcessingConfig {
    fn default() -> Self {
        Self { max_image_side: 1500,
               dimension_multiple: 8,
               cut_padding: 30,
               canvas: CanvasConfig { width: 832,
                                      height: 1200,
                                      margin: 30 } }
    }
}

impl ProcessingConfig {
    pub fn from_env() -> Result<Self, DomainError> {
        init_dotenv();
        let d = Self::default();
        let cfg = Self { max_image_side: env_or("APPARELFLOW_MAX_IMAGE_SIDE", d.max_image_side)?,
                         dimension_multiple: env_or("APPARELFLOW_DIMENSION_MULTIPLE", d.dimension_multiple)?,
                         cut_padding: env_or("APPARELFLOW_CUT_PADDING", d.cut_padding)?,
                         canvas: CanvasConfig { width: env_or("APPARELFLOW_CANVAS_WIDTH", d.canvas.width)?,
                                                height: env_or("APPARELFLOW_CANVAS_HEIGHT", d.canvas.height)?,
                                                margin: env_or("APPARELFLOW_CANVAS_MARGIN", d.canvas.margin)? } };
        let cfg = cfg.validated()?;
        debug!("processing config loaded: {cfg:?}");
        Ok(cfg)
    }

    /// Rechaza valores que se leen bien pero no son utilizables.
    pub fn validated(self) -> Result<Self, DomainError> {
        if self.dimension_multiple == 0 {
            return Err(DomainError::Config("APPARELFLOW_DIMENSION_MULTIPLE must be positive".into()));
        }
        match self.canvas.margin.checked_mul(2) {
            Some(both) if both < self.canvas.width.min(self.canvas.height) => {}
            _ => return Err(DomainError::Config("APPARELFLOW_CANVAS_MARGIN leaves no room on the canvas".into())),
        }
        if self.cut_padding.checked_mul(2).and_then(|p| p.checked_add(self.max_image_side)).is_none() {
            return Err(DomainError::Config("APPARELFLOW_CUT_PADDING is too large".into()));
        }
        Ok(self)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationConfig {
    /// Imágenes de Linda que se refinan y guardan.
    pub linda_variations: usize,
    /// LoRAs para modelos `toddler` / `pre-teen`.
    pub youth_lora_ids: Vec<String>,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self { linda_variations: 2,
               youth_lora_ids: vec![DEFAULT_YOUTH_LORA_ID.to_string()] }
    }
}

impl GenerationConfig {
    pub fn from_env() -> Result<Self, DomainError> {
        init_dotenv();
        let d = Self::default();
        let youth_lora_ids = match env::var("APPARELFLOW_YOUTH_LORA_IDS") {
            Ok(raw) => raw.split(',').map(str::trim).filter(|s| !s.is_empty()).map(String::from).collect(),
            Err(_) => d.youth_lora_ids,
        };
        Ok(Self { linda_variations: env_or("APPARELFLOW_LINDA_VARIATIONS", d.linda_variations)?,
                  youth_lora_ids })
    }
}

fn env_or<T: FromStr>(key: &str, default: T) -> Result<T, DomainError> {
    match env::var(key) {
        Ok(raw) => raw.trim()
                      .parse()
                      .map_err(|_| DomainError::Config(format!("{key}: cannot parse '{raw}'"))),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canvas_placement_keeps_margin() {
        let p = ProcessingConfig::default().canvas.placement();
        assert_eq!(p, Placement { left: 30, top: 30, width: 772, height: 1140 });
    }

    #[test]
    fn env_or_reports_unparseable_values() {
        std::env::set_var("APPARELFLOW_TEST_ENV_OR", "abc");
        let err = env_or::<u32>("APPARELFLOW_TEST_ENV_OR", 1).unwrap_err();
        assert!(matches!(err, DomainError::Config(_)));
        assert_eq!(env_or::<u32>("APPARELFLOW_TEST_ENV_OR_MISSING", 7).unwrap(), 7);
    }

    #[test]
    fn huge_margin_or_padding_is_a_config_error() {
        let mut cfg = ProcessingConfig::default();
        cfg.canvas.margin = 2_147_483_648;
        assert!(matches!(cfg.clone().validated(), Err(DomainError::Config(_))));
        assert_eq!(cfg.canvas.placement().width, 0);

        let mut cfg = ProcessingConfig::default();
        cfg.cut_padding = u32::MAX / 2;
        assert!(matches!(cfg.validated(), Err(DomainError::Config(_))));
        assert!(ProcessingConfig::default().validated().is_ok());
    }
}
