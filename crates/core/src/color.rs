//! RGBA color type used by every surface command.
//!
//! Channels are 8-bit like CSS `rgb()`, alpha is an `f64` in [0, 1] like the
//! fourth argument of CSS `rgba()`. Serializes as `"#rrggbb"` (opaque) or
//! `"#rrggbbaa"`.

use crate::error::FxError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// 8-bit RGB color with a floating point alpha.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f64,
}

impl Rgba {
    /// Opaque color from channels.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    /// Color from channels and alpha. Alpha is clamped to [0, 1].
    pub fn new(r: u8, g: u8, b: u8, a: f64) -> Self {
        Self {
            r,
            g,
            b,
            a: a.clamp(0.0, 1.0),
        }
    }

    /// Same channels with a replaced alpha (clamped to [0, 1]).
    pub fn with_alpha(self, a: f64) -> Self {
        Self::new(self.r, self.g, self.b, a)
    }

    /// Parses `"#rrggbb"`, `"rrggbb"`, `"#rrggbbaa"` or the 3-digit `"#rgb"`
    /// shorthand (case insensitive).
    ///
    /// Returns `FxError::InvalidColor` for anything else.
    pub fn from_hex(hex: &str) -> Result<Rgba, FxError> {
        let digits = hex.strip_prefix('#').unwrap_or(hex);
        if !digits.is_ascii() {
            return Err(FxError::InvalidColor(format!("non-ascii color '{hex}'")));
        }
        let byte = |s: &str, channel: &str| {
            u8::from_str_radix(s, 16)
                .map_err(|e| FxError::InvalidColor(format!("invalid {channel} component: {e}")))
        };
        match digits.len() {
            3 => {
                let expand = |i: usize, channel: &str| {
                    let d = &digits[i..i + 1];
                    byte(&format!("{d}{d}"), channel)
                };
                Ok(Rgba::rgb(
                    expand(0, "red")?,
                    expand(1, "green")?,
                    expand(2, "blue")?,
                ))
            }
            6 | 8 => {
                let r = byte(&digits[0..2], "red")?;
                let g = byte(&digits[2..4], "green")?;
                let b = byte(&digits[4..6], "blue")?;
                let a = if digits.len() == 8 {
                    byte(&digits[6..8], "alpha")? as f64 / 255.0
                } else {
                    1.0
                };
                Ok(Rgba::new(r, g, b, a))
            }
            n => Err(FxError::InvalidColor(format!(
                "expected 3, 6 or 8 hex digits, got {n}"
            ))),
        }
    }

    /// Hex form; the alpha byte is only emitted for translucent colors.
    pub fn to_hex(self) -> String {
        if self.a >= 1.0 {
            format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            let a = (self.a * 255.0).round() as u8;
            format!("#{:02x}{:02x}{:02x}{a:02x}", self.r, self.g, self.b)
        }
    }

    /// CSS `rgba(r,g,b,a)` string for canvas `fillStyle`/`strokeStyle`.
    pub fn to_css(self) -> String {
        format!("rgba({},{},{},{})", self.r, self.g, self.b, self.a)
    }
}

impl Serialize for Rgba {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Rgba {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Rgba::from_hex(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_hex_parses_six_digits() {
        let c = Rgba::from_hex("#eb5757").unwrap();
        assert_eq!((c.r, c.g, c.b), (235, 87, 87));
        assert_eq!(c.a, 1.0);
    }

    #[test]
    fn from_hex_accepts_missing_hash_and_uppercase() {
        let c = Rgba::from_hex("2F80EC").unwrap();
        assert_eq!((c.r, c.g, c.b), (47, 128, 236));
    }

    #[test]
    fn from_hex_expands_shorthand() {
        let c = Rgba::from_hex("#333").unwrap();
        assert_eq!((c.r, c.g, c.b), (0x33, 0x33, 0x33));
    }

    #[test]
    fn from_hex_reads_alpha_byte() {
        let c = Rgba::from_hex("#f2c94d99").unwrap();
        assert!((c.a - 0.6).abs() < 1e-9);
    }

    #[test]
    fn from_hex_rejects_bad_length() {
        assert!(matches!(
            Rgba::from_hex("#12345"),
            Err(FxError::InvalidColor(_))
        ));
    }

    #[test]
    fn from_hex_rejects_non_hex_digits() {
        assert!(Rgba::from_hex("#gg0000").is_err());
    }

    #[test]
    fn from_hex_rejects_multibyte_input() {
        assert!(Rgba::from_hex("#é12345").is_err());
    }

    #[test]
    fn new_clamps_alpha() {
        assert_eq!(Rgba::new(0, 0, 0, 1.5).a, 1.0);
        assert_eq!(Rgba::new(0, 0, 0, -0.5).a, 0.0);
    }

    #[test]
    fn to_css_matches_canvas_syntax() {
        let c = Rgba::new(242, 201, 77, 0.6);
        assert_eq!(c.to_css(), "rgba(242,201,77,0.6)");
    }

    #[test]
    fn to_hex_omits_alpha_when_opaque() {
        assert_eq!(Rgba::rgb(0x4a, 0x2c, 0x0a).to_hex(), "#4a2c0a");
        assert_eq!(Rgba::new(255, 0, 0, 0.0).to_hex(), "#ff000000");
    }

    #[test]
    fn serde_uses_hex_strings() {
        let c = Rgba::rgb(46, 204, 113);
        let json = serde_json::to_string(&c).unwrap();
        assert_eq!(json, "\"#2ecc71\"");
        let back: Rgba = serde_json::from_str(&json).unwrap();
        assert_eq!(back, c);
    }

    #[test]
    fn deserialize_rejects_invalid_string() {
        assert!(serde_json::from_str::<Rgba>("\"red\"").is_err());
    }
}
