use serde::{Deserialize, Serialize};

use crate::render::{FontExtents, FontSpec, TextExtents};

/// Horizontal alignment relative to the anchor point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HAlign {
    Left,
    Center,
    Right,
}

/// Vertical alignment relative to the anchor point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VAlign {
    Top,
    Center,
    Bottom,
    Baseline,
}

/// Pen movements needed to draw aligned, possibly rotated text.
///
/// Drawing sequence: move to `(pen_x, pen_y)`, rotate by `rotation`, then
/// draw at `(-h_offset, 0)` in the rotated frame. `fill_x`/`fill_y` is the
/// resulting glyph origin in unrotated canvas coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TextPlacement {
    pub h_offset: f64,
    pub v_offset: f64,
    pub pen_x: f64,
    pub pen_y: f64,
    pub rotation: f64,
    pub fill_x: f64,
    pub fill_y: f64,
}

#[must_use]
pub fn horizontal_offset(extents: TextExtents, align: HAlign) -> f64 {
    match align {
        HAlign::Left => 0.0,
        HAlign::Center => extents.width / 2.0,
        HAlign::Right => extents.width,
    }
}

#[must_use]
pub fn vertical_offset(font: FontExtents, valign: VAlign) -> f64 {
    match valign {
        VAlign::Top => font.ascent,
        VAlign::Center => font.height / 2.0 - font.descent / 2.0,
        VAlign::Bottom => -font.descent,
        VAlign::Baseline => 0.0,
    }
}

/// Computes where text anchored at `(x, y)` must be drawn.
#[must_use]
pub fn place_text(
    x: f64,
    y: f64,
    extents: TextExtents,
    font: FontExtents,
    align: HAlign,
    valign: VAlign,
    rotation_degrees: f64,
) -> TextPlacement {
    let h_offset = horizontal_offset(extents, align);
    let v_offset = vertical_offset(font, valign);
    let rotation = rotation_degrees.to_radians();
    let (sin, cos) = rotation.sin_cos();

    let pen_x = x + sin * -v_offset;
    let pen_y = y + cos * v_offset;

    TextPlacement {
        h_offset,
        v_offset,
        pen_x,
        pen_y,
        rotation,
        fill_x: pen_x - h_offset * cos,
        fill_y: pen_y - h_offset * sin,
    }
}

/// A text line positioned by layout, drawn later by the painter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlacedText {
    pub text: String,
    pub font: FontSpec,
    pub x: f64,
    pub y: f64,
    pub align: HAlign,
    pub valign: VAlign,
    pub rotation_degrees: f64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const FONT: FontExtents = FontExtents {
        ascent: 8.0,
        descent: 2.0,
        height: 12.0,
    };
    const TEXT: TextExtents = TextExtents {
        width: 40.0,
        height: 10.0,
    };

    #[test]
    fn unrotated_top_left_moves_down_by_ascent() {
        let placement = place_text(10.0, 20.0, TEXT, FONT, HAlign::Left, VAlign::Top, 0.0);
        assert_relative_eq!(placement.fill_x, 10.0);
        assert_relative_eq!(placement.fill_y, 28.0);
    }

    #[test]
    fn alignment_offsets_match_extents() {
        assert_eq!(horizontal_offset(TEXT, HAlign::Center), 20.0);
        assert_eq!(horizontal_offset(TEXT, HAlign::Right), 40.0);
        assert_eq!(vertical_offset(FONT, VAlign::Center), 5.0);
        assert_eq!(vertical_offset(FONT, VAlign::Bottom), -2.0);
        assert_eq!(vertical_offset(FONT, VAlign::Baseline), 0.0);
    }

    #[test]
    fn centered_text_rotated_270_runs_upwards_through_anchor() {
        let placement = place_text(
            50.0,
            100.0,
            TEXT,
            FONT,
            HAlign::Center,
            VAlign::Baseline,
            270.0,
        );
        assert_relative_eq!(placement.pen_x, 50.0, epsilon = 1e-9);
        assert_relative_eq!(placement.pen_y, 100.0, epsilon = 1e-9);
        // Text grows along -y after a 270 degree turn, so it starts below the anchor.
        assert_relative_eq!(placement.fill_x, 50.0, epsilon = 1e-9);
        assert_relative_eq!(placement.fill_y, 120.0, epsilon = 1e-9);
    }

    #[test]
    fn rotated_top_alignment_shifts_across_the_baseline() {
        let placement = place_text(0.0, 0.0, TEXT, FONT, HAlign::Left, VAlign::Top, 90.0);
        assert_relative_eq!(placement.pen_x, -8.0, epsilon = 1e-9);
        assert_relative_eq!(placement.pen_y, 0.0, epsilon = 1e-9);
    }
}
