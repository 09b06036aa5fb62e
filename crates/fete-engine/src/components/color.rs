use serde::{Deserialize, Serialize};

/// Linear RGBA color shared by meshes, particles and vector shapes.
///
/// Serializes as a `#rrggbb` / `#rrggbbaa` string so themes can be authored in JSON.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    /// Create an opaque color from a packed `0xRRGGBB` value.
    pub fn hex(rgb: u32) -> Self {
        Self::rgb8(
            ((rgb >> 16) & 0xff) as u8,
            ((rgb >> 8) & 0xff) as u8,
            (rgb & 0xff) as u8,
        )
    }

    pub fn rgb8(r: u8, g: u8, b: u8) -> Self {
        Self::rgb(r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0)
    }

    pub const fn with_alpha(self, a: f32) -> Self {
        Self { a, ..self }
    }

    /// Parse `#rgb`-style CSS hex notation (6 or 8 digits, leading `#` optional).
    pub fn parse_hex(text: &str) -> Option<Self> {
        let digits = text.strip_prefix('#').unwrap_or(text);
        if !(digits.len() == 6 || digits.len() == 8) || !digits.is_ascii() {
            return None;
        }
        let byte = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).ok();
        let base = Self::rgb8(byte(0)?, byte(2)?, byte(4)?);
        if digits.len() == 8 {
            Some(base.with_alpha(byte(6)? as f32 / 255.0))
        } else {
            Some(base)
        }
    }

    fn to_hex(self) -> String {
        let q = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
        if self.a >= 1.0 {
            format!("#{:02x}{:02x}{:02x}", q(self.r), q(self.g), q(self.b))
        } else {
            format!("#{:02x}{:02x}{:02x}{:02x}", q(self.r), q(self.g), q(self.b), q(self.a))
        }
    }

    pub const WHITE: Self = Self::rgb(1.0, 1.0, 1.0);
}

impl Default for Color {
    fn default() -> Self {
        Self::WHITE
    }
}

impl TryFrom<String> for Color {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse_hex(&value).ok_or_else(|| format!("invalid hex color {:?}", value))
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_hex()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_unpacks_channels() {
        let c = Color::hex(0xff69b4);
        assert_eq!(c.r, 1.0);
        assert!((c.g - 105.0 / 255.0).abs() < 1e-6);
        assert!((c.b - 180.0 / 255.0).abs() < 1e-6);
        assert_eq!(c.a, 1.0);
    }

    #[test]
    fn parse_hex_matches_packed() {
        assert_eq!(Color::parse_hex("#ffd700"), Some(Color::hex(0xffd700)));
        assert_eq!(Color::parse_hex("ffd700"), Some(Color::hex(0xffd700)));
        let translucent = Color::parse_hex("#ffffff80").unwrap();
        assert!((translucent.a - 128.0 / 255.0).abs() < 1e-6);
    }

    #[test]
    fn parse_hex_rejects_garbage() {
        assert_eq!(Color::parse_hex("#fff"), None);
        assert_eq!(Color::parse_hex("#gg0000"), None);
        assert_eq!(Color::parse_hex("#ff00é0"), None);
    }

    #[test]
    fn serde_uses_hex_strings() {
        let c: Color = serde_json::from_str("\"#e91e63\"").unwrap();
        assert_eq!(c, Color::hex(0xe91e63));
        assert_eq!(serde_json::to_string(&c).unwrap(), "\"#e91e63\"");
        assert!(serde_json::from_str::<Color>("\"pink\"").is_err());
    }
}
