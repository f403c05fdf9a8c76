use serde::{Deserialize, Serialize};

/// RGBA color in normalized 0..=1 channel values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub red: f64,
    pub green: f64,
    pub blue: f64,
    pub alpha: f64,
}

impl Color {
    pub const BLACK: Self = Self::rgb8(0, 0, 0);
    pub const WHITE: Self = Self::rgb8(255, 255, 255);
    pub const RED: Self = Self::rgb8(200, 0, 50);
    pub const DARK_GRAY: Self = Self::rgb8(111, 111, 111);

    #[must_use]
    pub const fn rgba(red: f64, green: f64, blue: f64, alpha: f64) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    #[must_use]
    pub const fn rgb(red: f64, green: f64, blue: f64) -> Self {
        Self::rgba(red, green, blue, 1.0)
    }

    #[must_use]
    pub const fn rgb8(red: u8, green: u8, blue: u8) -> Self {
        Self::rgb(
            red as f64 / 255.0,
            green as f64 / 255.0,
            blue as f64 / 255.0,
        )
    }

    /// Looks up a named color, then falls back to `#rgb` / `#rrggbb` hex.
    #[must_use]
    pub fn parse(input: &str) -> Option<Self> {
        let input = input.trim();
        named_color(input).or_else(|| parse_hex(input))
    }
}

const NAMED_COLORS: &[(&str, Color)] = &[
    ("black", Color::BLACK),
    ("white", Color::WHITE),
    ("blue", Color::rgb8(100, 100, 255)),
    ("green", Color::rgb8(0, 200, 0)),
    ("red", Color::RED),
    ("yellow", Color::rgb8(255, 255, 0)),
    ("orange", Color::rgb8(255, 165, 0)),
    ("purple", Color::rgb8(200, 100, 255)),
    ("brown", Color::rgb8(150, 100, 50)),
    ("cyan", Color::rgb8(0, 255, 255)),
    ("aqua", Color::rgb8(0, 150, 150)),
    ("gray", Color::rgb8(175, 175, 175)),
    ("grey", Color::rgb8(175, 175, 175)),
    ("magenta", Color::rgb8(255, 0, 255)),
    ("pink", Color::rgb8(255, 100, 100)),
    ("gold", Color::rgb8(200, 200, 0)),
    ("rose", Color::rgb8(200, 150, 200)),
    ("darkblue", Color::rgb8(0, 0, 255)),
    ("darkgreen", Color::rgb8(0, 255, 0)),
    ("darkred", Color::rgb8(255, 0, 0)),
    ("darkgray", Color::DARK_GRAY),
    ("darkgrey", Color::DARK_GRAY),
];

fn named_color(name: &str) -> Option<Color> {
    NAMED_COLORS
        .iter()
        .find(|(candidate, _)| candidate.eq_ignore_ascii_case(name))
        .map(|(_, color)| *color)
}

fn parse_hex(input: &str) -> Option<Color> {
    let hex = input.strip_prefix('#').unwrap_or(input);
    if !hex.chars().all(|ch| ch.is_ascii_hexdigit()) {
        return None;
    }
    let expanded: String = match hex.len() {
        3 => hex.chars().flat_map(|ch| [ch, ch]).collect(),
        6 => hex.to_owned(),
        _ => return None,
    };
    let rgb = u32::from_str_radix(&expanded, 16).ok()?;
    Some(Color::rgb8(
        ((rgb >> 16) & 0xFF) as u8,
        ((rgb >> 8) & 0xFF) as u8,
        (rgb & 0xFF) as u8,
    ))
}

/// Font selection passed to measurement and drawing calls.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FontSpec {
    pub family: String,
    pub size: f64,
    #[serde(default)]
    pub bold: bool,
    #[serde(default)]
    pub italic: bool,
}

impl FontSpec {
    #[must_use]
    pub fn new(family: impl Into<String>, size: f64) -> Self {
        Self {
            family: family.into(),
            size,
            bold: false,
            italic: false,
        }
    }

    /// Same face at a different size.
    #[must_use]
    pub fn with_size(&self, size: f64) -> Self {
        Self {
            size,
            ..self.clone()
        }
    }
}

/// Ink extents of one measured string.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct TextExtents {
    pub width: f64,
    pub height: f64,
}

/// Vertical metrics of a font face at a given size.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct FontExtents {
    pub ascent: f64,
    pub descent: f64,
    pub height: f64,
}

/// Axis-aligned rectangle in canvas pixels, origin at top-left.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RectPrimitive {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl RectPrimitive {
    #[must_use]
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_named_colors_case_insensitively() {
        assert_eq!(Color::parse("Blue"), Some(Color::rgb8(100, 100, 255)));
        assert_eq!(Color::parse("grey"), Color::parse("gray"));
    }

    #[test]
    fn parses_short_and_long_hex() {
        assert_eq!(Color::parse("#fff"), Some(Color::WHITE));
        assert_eq!(Color::parse("ff0000"), Some(Color::rgb8(255, 0, 0)));
        assert_eq!(Color::parse("#12345"), None);
        assert_eq!(Color::parse("#zzzzzz"), None);
    }
}
