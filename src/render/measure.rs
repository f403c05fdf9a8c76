use super::{FontExtents, FontSpec, TextExtents, TextMeasurer};

/// Deterministic, backend-independent text measurer.
///
/// Widths come from per-character advance estimates in em units; vertical
/// metrics use fixed em ratios. Good enough for headless layout and tests.
#[derive(Debug, Clone, Copy, Default)]
pub struct HeuristicTextMeasurer;

const ASCENT_EM: f64 = 0.8;
const DESCENT_EM: f64 = 0.2;
const LINE_HEIGHT_EM: f64 = 1.2;

impl TextMeasurer for HeuristicTextMeasurer {
    fn measure_text(&self, text: &str, font: &FontSpec) -> TextExtents {
        let units = text.chars().fold(0.0, |acc, ch| {
            acc + match ch {
                '0'..='9' => 0.62,
                '.' | ',' | ':' => 0.34,
                '-' | '+' | '%' => 0.42,
                ' ' => 0.33,
                'i' | 'l' | 'j' | 't' | 'f' => 0.30,
                'm' | 'w' | 'M' | 'W' => 0.86,
                _ => 0.58,
            }
        });
        let bold_scale = if font.bold { 1.08 } else { 1.0 };
        TextExtents {
            width: units * font.size * bold_scale,
            height: (ASCENT_EM + DESCENT_EM) * font.size,
        }
    }

    fn font_metrics(&self, font: &FontSpec) -> FontExtents {
        FontExtents {
            ascent: ASCENT_EM * font.size,
            descent: DESCENT_EM * font.size,
            height: LINE_HEIGHT_EM * font.size,
        }
    }
}
