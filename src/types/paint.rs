//! Stroke and fill paint values.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Result, SullivanError};

/// An RGBA colour value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Colour {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Colour {
    /// Create a new colour from RGBA components.
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Create a new opaque colour from RGB components.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const BLACK: Self = Self::rgb(0, 0, 0);

    pub const WHITE: Self = Self::rgb(255, 255, 255);

    /// Default ink for line-art output.
    pub const INK: Self = Self::rgb(0x33, 0x33, 0x33);

    /// Parse a hex colour string.
    ///
    /// Supports formats:
    /// - `#RGB` (3 digits, expanded to 6)
    /// - `#RGBA` (4 digits, expanded to 8)
    /// - `#RRGGBB` (6 digits)
    /// - `#RRGGBBAA` (8 digits)
    pub fn from_hex(s: &str) -> Result<Self> {
        let s = s.trim();
        let hex = s.strip_prefix('#').unwrap_or(s);

        if !hex.is_ascii() {
            return Err(invalid_hex(s));
        }

        let digit = |i: usize| -> Result<u8> {
            let d = parse_hex_byte(&hex[i..i + 1])?;
            Ok(d << 4 | d)
        };

        match hex.len() {
            3 => Ok(Self::rgb(digit(0)?, digit(1)?, digit(2)?)),
            4 => Ok(Self::new(digit(0)?, digit(1)?, digit(2)?, digit(3)?)),
            6 => Ok(Self::rgb(
                parse_hex_byte(&hex[0..2])?,
                parse_hex_byte(&hex[2..4])?,
                parse_hex_byte(&hex[4..6])?,
            )),
            8 => Ok(Self::new(
                parse_hex_byte(&hex[0..2])?,
                parse_hex_byte(&hex[2..4])?,
                parse_hex_byte(&hex[4..6])?,
                parse_hex_byte(&hex[6..8])?,
            )),
            _ => Err(invalid_hex(s)),
        }
    }

    pub fn is_opaque(self) -> bool {
        self.a == 255
    }

    /// Shortest hex form: `#RGB`/`#RGBA` when every channel repeats its
    /// nibble, otherwise the full form.
    pub fn to_short_hex(self) -> String {
        let short = |c: u8| c >> 4 == c & 0x0F;
        let channels = [self.r, self.g, self.b, self.a];

        if !channels.iter().all(|&c| short(c)) {
            return self.to_string();
        }

        let nibbles: String = channels[..if self.is_opaque() { 3 } else { 4 }]
            .iter()
            .map(|c| format!("{:X}", c & 0x0F))
            .collect();
        format!("#{}", nibbles)
    }
}

impl fmt::Display for Colour {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_opaque() {
            write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
        } else {
            write!(f, "#{:02X}{:02X}{:02X}{:02X}", self.r, self.g, self.b, self.a)
        }
    }
}

fn invalid_hex(s: &str) -> SullivanError {
    SullivanError::Parse {
        message: format!("Invalid hex colour: {}", s),
        help: Some("Use #RGB, #RGBA, #RRGGBB, or #RRGGBBAA format".to_string()),
    }
}

/// Parse a one- or two-character hex byte.
fn parse_hex_byte(s: &str) -> Result<u8> {
    let invalid = || SullivanError::Parse {
        message: format!("Invalid hex byte: {}", s),
        help: None,
    };

    if !s.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(invalid());
    }
    u8::from_str_radix(s, 16).map_err(|_| invalid())
}

/// An SVG paint as written in a preset.
///
/// Colours keep their source text so output carries exactly what the preset
/// said: `#ffd7a1` stays lowercase and named or functional CSS colours pass
/// through untouched.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Paint {
    None,
    CurrentColor,
    /// A hex colour and the text it was parsed from.
    Hex { colour: Colour, text: String },
    /// Any other CSS colour value, such as `black` or `rgb(1, 2, 3)`.
    Css(String),
}

impl Paint {
    pub fn is_none(&self) -> bool {
        matches!(self, Paint::None)
    }

    /// The parsed colour, for hex paints.
    pub fn colour(&self) -> Option<Colour> {
        match self {
            Paint::Hex { colour, .. } => Some(*colour),
            _ => None,
        }
    }
}

impl FromStr for Paint {
    type Err = SullivanError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim() {
            "none" => Ok(Paint::None),
            "currentColor" => Ok(Paint::CurrentColor),
            hex if hex.starts_with('#') => Ok(Paint::Hex {
                colour: Colour::from_hex(hex)?,
                text: hex.to_string(),
            }),
            css if is_css_value(css) => Ok(Paint::Css(css.to_string())),
            other => Err(SullivanError::Parse {
                message: format!("Invalid paint: {:?}", other),
                help: Some(
                    "Use none, currentColor, a #hex colour, or a CSS colour such as black"
                        .to_string(),
                ),
            }),
        }
    }
}

/// Non-empty and safe inside a double-quoted attribute.
fn is_css_value(s: &str) -> bool {
    !s.is_empty()
        && s.chars()
            .all(|c| !c.is_control() && !matches!(c, '"' | '\'' | '<' | '>' | '&'))
}

impl TryFrom<String> for Paint {
    type Error = SullivanError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<Paint> for String {
    fn from(paint: Paint) -> Self {
        paint.to_string()
    }
}

impl From<Colour> for Paint {
    fn from(colour: Colour) -> Self {
        Paint::Hex {
            colour,
            text: colour.to_short_hex(),
        }
    }
}

impl fmt::Display for Paint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Paint::None => f.write_str("none"),
            Paint::CurrentColor => f.write_str("currentColor"),
            Paint::Hex { text, .. } | Paint::Css(text) => f.write_str(text),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_hex_6digit() {
        let c = Colour::from_hex("#FF0000").unwrap();
        assert_eq!(c, Colour::rgb(255, 0, 0));

        let c = Colour::from_hex("#0b3d2e").unwrap();
        assert_eq!(c, Colour::rgb(0x0b, 0x3d, 0x2e));
    }

    #[test]
    fn test_from_hex_3digit() {
        let c = Colour::from_hex("#333").unwrap();
        assert_eq!(c, Colour::INK);
    }

    #[test]
    fn test_from_hex_alpha() {
        assert_eq!(Colour::from_hex("#FF000080").unwrap(), Colour::new(255, 0, 0, 128));
        assert_eq!(Colour::from_hex("#F008").unwrap(), Colour::new(255, 0, 0, 136));
    }

    #[test]
    fn test_from_hex_invalid() {
        assert!(Colour::from_hex("#GGG").is_err());
        assert!(Colour::from_hex("#12345").is_err());
        assert!(Colour::from_hex("").is_err());
        assert!(Colour::from_hex("#ééé").is_err());
    }

    #[test]
    fn test_from_hex_rejects_signs() {
        assert!(Colour::from_hex("#+f+f+f").is_err());
        assert!(Colour::from_hex("#+fff").is_err());
        assert!(Colour::from_hex("#-1-1-1").is_err());
    }

    #[test]
    fn test_paint_parse() {
        assert_eq!("none".parse::<Paint>().unwrap(), Paint::None);
        assert_eq!("currentColor".parse::<Paint>().unwrap(), Paint::CurrentColor);

        let peach = "#ffd7a1".parse::<Paint>().unwrap();
        assert_eq!(peach.colour(), Some(Colour::rgb(0xff, 0xd7, 0xa1)));

        assert_eq!("black".parse::<Paint>().unwrap(), Paint::Css("black".to_string()));
        assert_eq!(
            " rgb(1, 2, 3) ".parse::<Paint>().unwrap(),
            Paint::Css("rgb(1, 2, 3)".to_string())
        );

        assert!("#GGG".parse::<Paint>().is_err());
        assert!("".parse::<Paint>().is_err());
        assert!("red\" onload=\"x".parse::<Paint>().is_err());
    }

    #[test]
    fn test_paint_display_keeps_source_text() {
        for text in ["none", "currentColor", "#ffd7a1", "#FFD7A1", "#333", "black", "rgb(1,2,3)"] {
            assert_eq!(text.parse::<Paint>().unwrap().to_string(), text);
        }
    }

    #[test]
    fn test_paint_from_colour() {
        assert_eq!(Paint::from(Colour::INK).to_string(), "#333");
        assert_eq!(Paint::from(Colour::rgb(0xff, 0xd7, 0xa1)).to_string(), "#FFD7A1");
        assert_eq!(Paint::from(Colour::new(0, 0, 0, 128)).to_string(), "#00000080");
        assert_eq!(Colour::INK.to_string(), "#333333");
    }

    #[test]
    fn test_paint_serde_round_trip() {
        let json = serde_json::to_string(&Paint::from(Colour::WHITE)).unwrap();
        assert_eq!(json, "\"#FFF\"");

        let paint: Paint = serde_json::from_str("\"none\"").unwrap();
        assert!(paint.is_none());

        let named: Paint = serde_json::from_str("\"chartreuse\"").unwrap();
        assert_eq!(serde_json::to_string(&named).unwrap(), "\"chartreuse\"");

        assert!(serde_json::from_str::<Paint>("\"#12\"").is_err());
    }
}
