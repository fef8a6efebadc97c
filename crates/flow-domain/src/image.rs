//! Tamaños de imagen, relaciones de aspecto y el cálculo de redimensionado
//! previo a la generación.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::DomainError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ImageSize {
    pub width: u32,
    pub height: u32,
}

impl ImageSize {
    pub fn new(width: u32, height: u32) -> Result<Self, DomainError> {
        if width == 0 || height == 0 {
            return Err(DomainError::Validation(format!("image size must be positive, got {width}x{height}")));
        }
        Ok(Self { width, height })
    }

    /// Tamaño con `padding` píxeles añadidos en cada borde.
    pub fn padded(&self, padding: u32) -> Result<Self, DomainError> {
        let grow = |side: u32| padding.checked_mul(2).and_then(|p| side.checked_add(p));
        match (grow(self.width), grow(self.height)) {
            (Some(width), Some(height)) => Ok(Self { width, height }),
            _ => Err(DomainError::Validation(format!("padding {padding} overflows image size {self}"))),
        }
    }
}

impl fmt::Display for ImageSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Rectángulo de colocación de un elemento dentro de un lienzo.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    pub left: u32,
    pub top: u32,
    pub width: u32,
    pub height: u32,
}

/// Relación de aspecto (`3:4`, `9:16`, ...). Se serializa como string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AspectRatio {
    pub width: u32,
    pub height: u32,
}

impl AspectRatio {
    /// `[ancho, alto]`, forma usada en la metadata de stacks.
    pub fn parts(&self) -> [u32; 2] {
        [self.width, self.height]
    }
}

impl fmt::Display for AspectRatio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.width, self.height)
    }
}

impl FromStr for AspectRatio {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || DomainError::Validation(format!("invalid aspect ratio '{s}', expected W:H"));
        let (w, h) = s.split_once(':').ok_or_else(invalid)?;
        let width: u32 = w.trim().parse().map_err(|_| invalid())?;
        let height: u32 = h.trim().parse().map_err(|_| invalid())?;
        if width == 0 || height == 0 {
            return Err(invalid());
        }
        Ok(Self { width, height })
    }
}

impl Serialize for AspectRatio {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for AspectRatio {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Calcula el tamaño al que hay que llevar una imagen antes de describirla y
/// generar con ella.
///
/// Devuelve `None` si la imagen ya cumple: ningún lado mayor que `max_side` y
/// ambos múltiplos de `multiple`. Si no, escala proporcionalmente para que el
/// lado mayor no exceda `max_side` y redondea cada lado hacia arriba al
/// siguiente múltiplo de `multiple`. El redondeo puede dejar un lado
/// ligeramente por encima de `max_side` (1500 -> 1504).
pub fn fit_for_generation(size: ImageSize, max_side: u32, multiple: u32) -> Option<ImageSize> {
    let multiple = multiple.max(1);
    let needs_resize = size.width > max_side
                       || size.height > max_side
                       || size.width % multiple != 0
                       || size.height % multiple != 0;
    if !needs_resize {
        return None;
    }

    let max = max_side as f64;
    let mut w = size.width as f64;
    let mut h = size.height as f64;
    if w > max {
        h = h * max / w;
        w = max;
    }
    if h > max {
        w = w * max / h;
        h = max;
    }

    let m = multiple as f64;
    let round_up = |v: f64| if v % m != 0.0 { (v / m).ceil() * m } else { v };
    Some(ImageSize { width: round_up(w) as u32,
                     height: round_up(h) as u32 })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn aspect_ratio_parses_and_displays() {
        let r: AspectRatio = "3:4".parse().unwrap();
        assert_eq!(r.parts(), [3, 4]);
        assert_eq!(r.to_string(), "3:4");
        assert!("3x4".parse::<AspectRatio>().is_err());
        assert!("0:4".parse::<AspectRatio>().is_err());
    }

    #[test]
    fn aspect_ratio_serializes_as_string() {
        let r: AspectRatio = "9:16".parse().unwrap();
        assert_eq!(serde_json::to_value(r).unwrap(), serde_json::json!("9:16"));
    }

    #[test]
    fn padding_grows_both_sides_and_rejects_overflow() {
        let size = ImageSize::new(800, 600).unwrap();
        assert_eq!(size.padded(30).unwrap(), ImageSize { width: 860, height: 660 });
        assert!(matches!(size.padded(u32::MAX / 2), Err(DomainError::Validation(_))));
    }
}
