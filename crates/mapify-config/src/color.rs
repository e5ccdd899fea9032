/// Color type serialized as `"#RRGGBB"` / `"#RRGGBBAA"` strings.
///
/// Also knows the KML wire form, which is `aabbggrr` (alpha first,
/// channels reversed, no `#`, lowercase).
use serde::{Deserialize, Deserializer, Serialize, Serializer};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HexColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

fn channel(s: &str, i: usize) -> Option<u8> {
    u8::from_str_radix(s.get(i..i + 2)?, 16).ok()
}

impl HexColor {
    pub fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub fn from_hex(s: &str) -> Option<Self> {
        let s = s.strip_prefix('#')?;
        let (r, g, b) = (channel(s, 0)?, channel(s, 2)?, channel(s, 4)?);
        match s.len() {
            6 => Some(Self { r, g, b, a: 255 }),
            8 => Some(Self {
                r,
                g,
                b,
                a: channel(s, 6)?,
            }),
            _ => None,
        }
    }

    pub fn to_hex(self) -> String {
        if self.a == 255 {
            format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
        } else {
            format!("#{:02X}{:02X}{:02X}{:02X}", self.r, self.g, self.b, self.a)
        }
    }

    /// Renders the color in KML's `aabbggrr` form.
    ///
    /// `opacity` (0.0–1.0) replaces the stored alpha: KML styles carry
    /// opacity in the color itself, while we keep it as a separate
    /// style field.
    pub fn to_kml(self, opacity: f32) -> String {
        let a = (opacity.clamp(0.0, 1.0) * 255.0).round() as u8;
        format!("{:02x}{:02x}{:02x}{:02x}", a, self.b, self.g, self.r)
    }
}

impl Serialize for HexColor {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for HexColor {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::from_hex(&s)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid hex color: {s}")))
    }
}
