use derive_more::{AsRef, Deref, Display, From, Into};
use palette::{Srgb, Srgba};
use serde::{Deserialize, Serialize};
use serde_with::{DeserializeFromStr, SerializeDisplay};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(
    Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Display, Deref, From, Into, AsRef,
)]
#[serde(transparent)]
pub struct SwatchId(String);

crate::impl_string_newtype!(SwatchId);

#[derive(Debug, Error, PartialEq)]
pub enum ColorParseError {
    #[error("empty color")]
    Empty,
    #[error("invalid hex color '{0}'")]
    Hex(String),
    #[error("unknown color name '{0}'")]
    UnknownName(String),
}

/// A display color, written in config as `#rrggbb`, `#rrggbbaa` or a CSS color name.
#[derive(Debug, Clone, Copy, PartialEq, SerializeDisplay, DeserializeFromStr)]
pub struct SwatchColor(Srgba<f64>);

impl SwatchColor {
    pub fn new(red: f64, green: f64, blue: f64, alpha: f64) -> Self {
        Self(Srgba::new(red, green, blue, alpha))
    }

    pub fn rgba(&self) -> Srgba<f64> {
        self.0
    }

    fn from_rgb8(rgb: Srgb<u8>, alpha: u8) -> Self {
        let (r, g, b) = rgb.into_format::<f64>().into_components();
        Self::new(r, g, b, alpha as f64 / 255.0)
    }

    fn parse_hex(hex: &str) -> Result<Self, ColorParseError> {
        let err = || ColorParseError::Hex(hex.to_string());
        match hex.len() {
            3 | 6 => Srgb::<u8>::from_str(hex)
                .map(|rgb| Self::from_rgb8(rgb, u8::MAX))
                .map_err(|_| err()),
            8 => {
                let (rgb, alpha) = hex.split_at(6);
                let rgb = Srgb::<u8>::from_str(rgb).map_err(|_| err())?;
                let alpha = u8::from_str_radix(alpha, 16).map_err(|_| err())?;
                Ok(Self::from_rgb8(rgb, alpha))
            }
            _ => Err(err()),
        }
    }
}

impl From<Srgba<f64>> for SwatchColor {
    fn from(color: Srgba<f64>) -> Self {
        Self(color)
    }
}

impl FromStr for SwatchColor {
    type Err = ColorParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(ColorParseError::Empty);
        }
        if let Some(hex) = s.strip_prefix('#') {
            return Self::parse_hex(hex);
        }
        palette::named::from_str(&s.to_ascii_lowercase())
            .map(|rgb| Self::from_rgb8(rgb, u8::MAX))
            .ok_or_else(|| ColorParseError::UnknownName(s.to_string()))
    }
}

impl fmt::Display for SwatchColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let to_byte = |c: f64| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
        let (r, g, b, a) = self.0.into_components();
        write!(f, "#{:02x}{:02x}{:02x}", to_byte(r), to_byte(g), to_byte(b))?;
        if a < 1.0 {
            write!(f, "{:02x}", to_byte(a))?;
        }
        Ok(())
    }
}

/// One selectable entry in the ring. Its position in the swatch list decides its angle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Swatch {
    pub id: SwatchId,
    pub color: SwatchColor,
}

impl Swatch {
    pub fn new(id: impl Into<String>, color: SwatchColor) -> Self {
        Self {
            id: SwatchId::new(id),
            color,
        }
    }

    /// The twelve colors of the stock demo palette, in ring order.
    pub fn defaults() -> Vec<Swatch> {
        [
            ("red", "#ff0000"),
            ("green", "#00ff00"),
            ("blue", "#0000ff"),
            ("purple", "#800080"),
            ("yellow", "#ffff00"),
            ("orange", "#ff8000"),
            ("cyan", "#00ffff"),
            ("magenta", "#ff00ff"),
            ("gray", "#808080"),
            ("brown", "#996633"),
            ("black", "#000000"),
            ("lightgray", "#aaaaaa"),
        ]
        .into_iter()
        .filter_map(|(id, hex)| hex.parse().ok().map(|color| Swatch::new(id, color)))
        .collect()
    }
}

impl fmt::Display for Swatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.id, self.color)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_parsing() {
        let red: SwatchColor = "#ff0000".parse().unwrap();
        assert_eq!(red, SwatchColor::new(1.0, 0.0, 0.0, 1.0));

        let short: SwatchColor = "#0f0".parse().unwrap();
        assert_eq!(short, SwatchColor::new(0.0, 1.0, 0.0, 1.0));

        let named: SwatchColor = "Blue".parse().unwrap();
        assert_eq!(named, SwatchColor::new(0.0, 0.0, 1.0, 1.0));

        let translucent: SwatchColor = "#00000080".parse().unwrap();
        assert!((translucent.rgba().alpha - 128.0 / 255.0).abs() < 1e-9);
    }

    #[test]
    fn test_color_parse_errors() {
        assert_eq!("".parse::<SwatchColor>(), Err(ColorParseError::Empty));
        assert!(matches!(
            "#12345".parse::<SwatchColor>(),
            Err(ColorParseError::Hex(_))
        ));
        assert!(matches!(
            "notacolor".parse::<SwatchColor>(),
            Err(ColorParseError::UnknownName(_))
        ));
    }

    #[test]
    fn test_color_display() {
        let color: SwatchColor = "#996633".parse().unwrap();
        assert_eq!(color.to_string(), "#996633");
        let translucent: SwatchColor = "#ffffff80".parse().unwrap();
        assert_eq!(translucent.to_string(), "#ffffff80");
    }

    #[test]
    fn test_swatch_deserialization() {
        let swatch: Swatch =
            serde_json::from_str(r##"{"id": "teal", "color": "#008080"}"##).unwrap();
        assert_eq!(swatch.id, SwatchId::new("teal"));
        assert_eq!(swatch.id, SwatchId::from("teal"));
        assert_eq!(swatch.color.to_string(), "#008080");
    }

    #[test]
    fn test_default_palette() {
        let defaults = Swatch::defaults();
        assert_eq!(defaults.len(), 12);
        assert_eq!(defaults[0].id.as_str(), "red");
    }
}
