use crate::api::{LayoutOutcome, NoDataPlaceholder, PlotLayout};
use crate::core::{HAlign, PlacedText, VAlign, YAxisSide, place_text};

use super::{Canvas, Color, RectPrimitive, Transform};

const SWATCH_OUTLINE_WIDTH: f64 = 1.0;
/// Gap between Y labels and the plot edge, as a share of the label width.
const Y_LABEL_GAP: f64 = 0.02;

/// Draws a converged layout through `canvas`.
///
/// Only backgrounds, text and legend swatches are painted here; series
/// geometry belongs to the caller's backend.
pub fn paint_layout(canvas: &mut dyn Canvas, outcome: &LayoutOutcome) {
    match outcome {
        LayoutOutcome::Plotted(plot) => paint_plot(canvas, plot),
        LayoutOutcome::NoData(placeholder) => paint_no_data(canvas, placeholder),
    }
}

fn paint_background(canvas: &mut dyn Canvas, width: f64, height: f64, color: Color) {
    canvas.set_color(color);
    canvas.fill_rect(RectPrimitive::new(0.0, 0.0, width, height));
}

fn paint_no_data(canvas: &mut dyn Canvas, placeholder: &NoDataPlaceholder) {
    paint_background(
        canvas,
        placeholder.width,
        placeholder.height,
        placeholder.background,
    );
    canvas.set_color(placeholder.color);
    draw_placed_text(canvas, &placeholder.text);
}

fn paint_plot(canvas: &mut dyn Canvas, plot: &PlotLayout) {
    paint_background(canvas, plot.width, plot.height, plot.background);

    canvas.set_color(plot.foreground);
    for title in &plot.titles {
        draw_placed_text(canvas, title);
    }

    if let Some(legend) = &plot.legend {
        for item in &legend.items {
            let Some(entry) = legend.entries.get(item.entry) else {
                continue;
            };
            canvas.set_color(entry.color);
            canvas.fill_rect(item.swatch);
            canvas.set_color(Color::DARK_GRAY);
            canvas.stroke_rect(item.swatch, SWATCH_OUTLINE_WIDTH);
            canvas.set_color(plot.foreground);
            draw_placed_text(canvas, &item.label);
        }
    }

    canvas.set_color(plot.foreground);
    let font = &plot.label_font;
    for axis in &plot.y_axes {
        let (x, align) = match axis.side {
            YAxisSide::Left => (plot.area.xmin - axis.label_width * Y_LABEL_GAP, HAlign::Right),
            YAxisSide::Right => (plot.area.xmax + axis.label_width * Y_LABEL_GAP, HAlign::Left),
        };
        for label in &axis.labels {
            draw_placed_text(
                canvas,
                &PlacedText {
                    text: label.text.clone(),
                    font: font.clone(),
                    x,
                    y: label.y,
                    align,
                    valign: VAlign::Center,
                    rotation_degrees: 0.0,
                },
            );
        }
    }

    for label in &plot.x_axis.labels {
        draw_placed_text(
            canvas,
            &PlacedText {
                text: label.text.clone(),
                font: font.clone(),
                x: label.x,
                y: plot.area.ymax,
                align: HAlign::Center,
                valign: VAlign::Top,
                rotation_degrees: 0.0,
            },
        );
    }
}

/// Measures, aligns and draws one text line; the rotation is undone afterwards.
pub fn draw_placed_text(canvas: &mut dyn Canvas, placed: &PlacedText) {
    let extents = canvas.measure_text(&placed.text, &placed.font);
    let font = canvas.font_metrics(&placed.font);
    let placement = place_text(
        placed.x,
        placed.y,
        extents,
        font,
        placed.align,
        placed.valign,
        placed.rotation_degrees,
    );
    canvas.push_transform(Transform {
        translate_x: placement.pen_x,
        translate_y: placement.pen_y,
        rotation: placement.rotation,
    });
    canvas.draw_text_at_anchor(&placed.text, &placed.font, -placement.h_offset, 0.0);
    canvas.pop_transform();
}
