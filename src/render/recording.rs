use super::{
    Canvas, Color, FontExtents, FontSpec, HeuristicTextMeasurer, RectPrimitive, TextExtents,
    TextMeasurer, Transform,
};

/// One drawing call captured by [`RecordingCanvas`].
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    FillRect {
        rect: RectPrimitive,
        color: Color,
    },
    StrokeRect {
        rect: RectPrimitive,
        line_width: f64,
        color: Color,
    },
    Text {
        text: String,
        font_size: f64,
        /// Glyph origin in canvas coordinates, after the active transforms.
        x: f64,
        y: f64,
        rotation: f64,
        color: Color,
    },
}

/// Canvas that records commands instead of rasterizing them.
///
/// Used by tests and headless callers; text is measured with
/// [`HeuristicTextMeasurer`] so results are reproducible.
#[derive(Debug)]
pub struct RecordingCanvas {
    pub commands: Vec<DrawCommand>,
    color: Color,
    transforms: Vec<Transform>,
    measurer: HeuristicTextMeasurer,
}

impl Default for RecordingCanvas {
    fn default() -> Self {
        Self {
            commands: Vec::new(),
            color: Color::BLACK,
            transforms: Vec::new(),
            measurer: HeuristicTextMeasurer,
        }
    }
}

impl RecordingCanvas {
    #[must_use]
    pub fn transform_depth(&self) -> usize {
        self.transforms.len()
    }

    /// Texts drawn so far, in call order.
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.commands.iter().filter_map(|command| match command {
            DrawCommand::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }

    fn to_canvas(&self, x: f64, y: f64) -> (f64, f64, f64) {
        // Innermost transform applies first.
        self.transforms
            .iter()
            .rev()
            .fold((x, y, 0.0), |(x, y, rotation), transform| {
                let (sin, cos) = transform.rotation.sin_cos();
                (
                    transform.translate_x + x * cos - y * sin,
                    transform.translate_y + x * sin + y * cos,
                    rotation + transform.rotation,
                )
            })
    }
}

impl TextMeasurer for RecordingCanvas {
    fn measure_text(&self, text: &str, font: &FontSpec) -> TextExtents {
        self.measurer.measure_text(text, font)
    }

    fn font_metrics(&self, font: &FontSpec) -> FontExtents {
        self.measurer.font_metrics(font)
    }
}

impl Canvas for RecordingCanvas {
    fn set_color(&mut self, color: Color) {
        self.color = color;
    }

    fn fill_rect(&mut self, rect: RectPrimitive) {
        self.commands.push(DrawCommand::FillRect {
            rect,
            color: self.color,
        });
    }

    fn stroke_rect(&mut self, rect: RectPrimitive, line_width: f64) {
        self.commands.push(DrawCommand::StrokeRect {
            rect,
            line_width,
            color: self.color,
        });
    }

    fn push_transform(&mut self, transform: Transform) {
        self.transforms.push(transform);
    }

    fn pop_transform(&mut self) {
        self.transforms.pop();
    }

    fn draw_text_at_anchor(&mut self, text: &str, font: &FontSpec, x: f64, y: f64) {
        let (x, y, rotation) = self.to_canvas(x, y);
        self.commands.push(DrawCommand::Text {
            text: text.to_owned(),
            font_size: font.size,
            x,
            y,
            rotation,
            color: self.color,
        });
    }
}
