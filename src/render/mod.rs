mod measure;
mod painter;
mod primitives;
mod recording;

pub use measure::HeuristicTextMeasurer;
pub use painter::{draw_placed_text, paint_layout};
pub use primitives::{Color, FontExtents, FontSpec, RectPrimitive, TextExtents};
pub use recording::{DrawCommand, RecordingCanvas};

/// Text measurement capability required by the layout pass.
///
/// Layout never draws; it only asks for extents. Implementations must return
/// the same extents for the same input within one render request.
pub trait TextMeasurer {
    fn measure_text(&self, text: &str, font: &FontSpec) -> TextExtents;
    fn font_metrics(&self, font: &FontSpec) -> FontExtents;
}

/// Translation followed by a rotation (radians), applied to later drawing calls.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub translate_x: f64,
    pub translate_y: f64,
    pub rotation: f64,
}

/// Drawing backend contract.
///
/// Backends (cairo, skia, SVG writers) receive fully computed geometry from
/// [`crate::api::LayoutOutcome`] so rasterization stays out of layout code.
/// Each transform pushed must be popped by the same caller.
pub trait Canvas: TextMeasurer {
    fn set_color(&mut self, color: Color);
    fn fill_rect(&mut self, rect: RectPrimitive);
    fn stroke_rect(&mut self, rect: RectPrimitive, line_width: f64);
    fn push_transform(&mut self, transform: Transform);
    fn pop_transform(&mut self);
    /// Draws `text` with its baseline origin at `(x, y)` in the current frame.
    fn draw_text_at_anchor(&mut self, text: &str, font: &FontSpec, x: f64, y: f64);
}
