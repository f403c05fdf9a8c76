use serde::{Deserialize, Serialize};

use crate::core::{AxisSide, Series, SeriesStyle};
use crate::render::Color;

/// Round-robin palette used when the configuration does not supply one.
///
/// Order: blue, green, red, purple, brown, yellow, aqua, grey, magenta,
/// pink, gold, rose.
pub static DEFAULT_PALETTE: [Color; 12] = [
    Color::rgb8(100, 100, 255),
    Color::rgb8(0, 200, 0),
    Color::RED,
    Color::rgb8(200, 100, 255),
    Color::rgb8(150, 100, 50),
    Color::rgb8(255, 255, 0),
    Color::rgb8(0, 150, 150),
    Color::rgb8(175, 175, 175),
    Color::rgb8(255, 0, 255),
    Color::rgb8(255, 100, 100),
    Color::rgb8(200, 200, 0),
    Color::rgb8(200, 150, 200),
];

/// Line style applied to every series of one Y axis in dual-axis graphs.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AxisStyle {
    #[serde(default)]
    pub color: Option<Color>,
    pub line_width: f64,
    #[serde(default)]
    pub dashed: bool,
}

impl Default for AxisStyle {
    fn default() -> Self {
        Self {
            color: None,
            line_width: 1.2,
            dashed: false,
        }
    }
}

/// Deterministic series color assignment.
///
/// Series without an explicit color take the next palette entry; the palette
/// cursor does not advance for series that already have one.
#[derive(Debug, Clone, Copy)]
pub struct ColorAssigner<'a> {
    palette: &'a [Color],
    line_width: f64,
    dashed: bool,
    side_styles: Option<(AxisStyle, AxisStyle)>,
}

impl<'a> ColorAssigner<'a> {
    /// An empty `palette` falls back to [`DEFAULT_PALETTE`].
    #[must_use]
    pub fn new(palette: &'a [Color]) -> Self {
        let palette = if palette.is_empty() {
            &DEFAULT_PALETTE[..]
        } else {
            palette
        };
        Self {
            palette,
            line_width: 1.2,
            dashed: false,
            side_styles: None,
        }
    }

    #[must_use]
    pub fn with_line(mut self, line_width: f64, dashed: bool) -> Self {
        self.line_width = line_width;
        self.dashed = dashed;
        self
    }

    /// Enables per-side overrides; only meaningful for dual-axis graphs.
    #[must_use]
    pub fn with_side_styles(mut self, left: AxisStyle, right: AxisStyle) -> Self {
        self.side_styles = Some((left, right));
        self
    }

    pub fn assign(&self, series: &mut [Series]) {
        let mut cursor = 0;
        for item in series.iter_mut() {
            let (side_color, line_width, dashed) = match self.side_styles {
                Some((left, right)) => {
                    let side = match item.axis {
                        AxisSide::Primary => left,
                        AxisSide::Secondary => right,
                    };
                    (side.color, side.line_width, side.dashed)
                }
                None => (None, self.line_width, self.dashed),
            };

            let color = match item.color.or(side_color) {
                Some(explicit) => explicit,
                None => {
                    let color = self.palette[cursor];
                    cursor = (cursor + 1) % self.palette.len();
                    color
                }
            };

            item.style = Some(SeriesStyle {
                color,
                line_width,
                dashed,
            });
        }
    }
}
