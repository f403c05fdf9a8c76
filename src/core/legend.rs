use indexmap::IndexSet;
use ordered_float::OrderedFloat;
use serde::Serialize;

use crate::core::text_placer::{HAlign, PlacedText, VAlign};
use crate::core::{Area, AxisSide, Series};
use crate::error::ChartResult;
use crate::render::{Color, FontSpec, RectPrimitive, TextMeasurer};

/// Gap between swatch, label and neighbouring cells.
pub const LEGEND_PADDING: f64 = 5.0;
/// Width that must stay free for dual-column legends to be used.
pub const DUAL_COLUMN_SLACK: f64 = 50.0;

/// One label + swatch in the legend.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LegendEntry {
    pub name: String,
    pub color: Color,
    pub axis: AxisSide,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum LegendMode {
    /// Every entry flows left-to-right, wrapping after `columns` entries.
    SingleFlow,
    /// Primary-axis entries flow from the left edge, secondary from the right.
    DualColumn,
}

/// Screen placement of one legend entry.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LegendItem {
    pub entry: usize,
    pub swatch: RectPrimitive,
    pub label: PlacedText,
}

#[derive(Debug, Clone, Copy)]
pub struct LegendOptions<'a> {
    pub canvas_width: f64,
    pub font: &'a FontSpec,
    pub unique: bool,
    pub dual_axis: bool,
}

/// Result of laying out the legend below the plot.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LegendLayout {
    pub entries: Vec<LegendEntry>,
    pub mode: LegendMode,
    pub columns: usize,
    pub rows: usize,
    pub label_width: f64,
    pub reserved_height: f64,
    pub items: Vec<LegendItem>,
    /// Plot area left after the legend band was taken from its bottom.
    pub area: Area,
}

/// Builds the entry list; with `unique` only the first series of each name is kept.
#[must_use]
pub fn legend_entries(series: &[Series], unique: bool) -> Vec<LegendEntry> {
    let mut seen: IndexSet<&str> = IndexSet::new();
    series
        .iter()
        .filter(|item| !unique || seen.insert(item.name.as_str()))
        .map(|item| LegendEntry {
            name: item.name.clone(),
            color: item
                .style
                .map(|style| style.color)
                .or(item.color)
                .unwrap_or(Color::BLACK),
            axis: item.axis,
        })
        .collect()
}

struct Metrics {
    box_size: f64,
    line_height: f64,
    label_width: f64,
}

/// Lays out legend entries and reserves their band at the bottom of `area`.
pub fn layout_legend(
    series: &[Series],
    options: LegendOptions<'_>,
    area: Area,
    measurer: &dyn TextMeasurer,
) -> ChartResult<LegendLayout> {
    let entries = legend_entries(series, options.unique);
    let font_extents = measurer.font_metrics(options.font);

    let widest = entries
        .iter()
        .enumerate()
        .map(|(index, entry)| {
            let width = measurer.measure_text(&entry.name, options.font).width;
            (OrderedFloat(width), index)
        })
        .max_by_key(|(width, _)| *width);
    let Some((OrderedFloat(widest_width), widest_index)) = widest else {
        return Ok(LegendLayout {
            entries,
            mode: LegendMode::SingleFlow,
            columns: 0,
            rows: 0,
            label_width: 0.0,
            reserved_height: 0.0,
            items: Vec::new(),
            area,
        });
    };

    let box_size = font_extents.height - 1.0;
    let metrics = Metrics {
        box_size,
        line_height: font_extents.height + 1.0,
        label_width: widest_width + 2.0 * (box_size + LEGEND_PADDING),
    };

    let dual_column = options.dual_axis && {
        let widest_name = &entries[widest_index].name;
        let doubled = format!("{widest_name} {widest_name}");
        let test_width = measurer.measure_text(&doubled, options.font).width
            + 2.0 * (font_extents.height + LEGEND_PADDING);
        test_width + DUAL_COLUMN_SLACK < options.canvas_width
    };

    let (mode, columns, rows) = if dual_column {
        let per_side = ((options.canvas_width - area.xmin) / metrics.label_width).floor();
        let columns = ((per_side / 2.0).floor() as usize).max(1);
        let left = entries
            .iter()
            .filter(|entry| entry.axis == AxisSide::Primary)
            .count();
        let right = entries.len() - left;
        let rows = left.max(right).div_ceil(columns).max(1);
        (LegendMode::DualColumn, columns, rows)
    } else {
        let columns = ((options.canvas_width / metrics.label_width).floor() as usize).max(1);
        (
            LegendMode::SingleFlow,
            columns,
            entries.len().div_ceil(columns),
        )
    };

    let reserved_height = rows as f64 * (metrics.line_height + LEGEND_PADDING);
    let mut area = area;
    area.ymax -= reserved_height;
    let area = area.ensure_valid("legend")?;

    let items = match mode {
        LegendMode::SingleFlow => single_flow_items(&entries, columns, area, &metrics, options.font),
        LegendMode::DualColumn => dual_column_items(&entries, columns, area, &metrics, options.font),
    };

    Ok(LegendLayout {
        entries,
        mode,
        columns,
        rows,
        label_width: metrics.label_width,
        reserved_height,
        items,
        area,
    })
}

fn legend_top(area: Area) -> f64 {
    area.ymax + 2.0 * LEGEND_PADDING
}

fn single_flow_items(
    entries: &[LegendEntry],
    columns: usize,
    area: Area,
    metrics: &Metrics,
    font: &FontSpec,
) -> Vec<LegendItem> {
    entries
        .iter()
        .enumerate()
        .map(|(index, entry)| {
            let x = area.xmin + (index % columns) as f64 * metrics.label_width;
            let y = legend_top(area) + (index / columns) as f64 * metrics.line_height;
            match entry.axis {
                AxisSide::Primary => left_item(index, entry, x, y, metrics, font),
                AxisSide::Secondary => {
                    right_item(index, entry, x + metrics.label_width, y, metrics, font)
                }
            }
        })
        .collect()
}

fn dual_column_items(
    entries: &[LegendEntry],
    columns: usize,
    area: Area,
    metrics: &Metrics,
    font: &FontSpec,
) -> Vec<LegendItem> {
    let mut left_count = 0;
    let mut right_count = 0;
    entries
        .iter()
        .enumerate()
        .map(|(index, entry)| match entry.axis {
            AxisSide::Primary => {
                let slot = left_count;
                left_count += 1;
                let x = area.xmin + (slot % columns) as f64 * metrics.label_width;
                let y = legend_top(area) + (slot / columns) as f64 * metrics.line_height;
                left_item(index, entry, x, y, metrics, font)
            }
            AxisSide::Secondary => {
                let slot = right_count;
                right_count += 1;
                let x = area.xmax - (slot % columns) as f64 * metrics.label_width;
                let y = legend_top(area) + (slot / columns) as f64 * metrics.line_height;
                right_item(index, entry, x, y, metrics, font)
            }
        })
        .collect()
}

/// Swatch at `x`, label to its right.
fn left_item(
    index: usize,
    entry: &LegendEntry,
    x: f64,
    y: f64,
    metrics: &Metrics,
    font: &FontSpec,
) -> LegendItem {
    LegendItem {
        entry: index,
        swatch: RectPrimitive::new(x, y, metrics.box_size, metrics.box_size),
        label: PlacedText {
            text: entry.name.clone(),
            font: font.clone(),
            x: x + metrics.box_size + LEGEND_PADDING,
            y,
            align: HAlign::Left,
            valign: VAlign::Top,
            rotation_degrees: 0.0,
        },
    }
}

/// Swatch ending at `x_right`, label right-aligned before it.
fn right_item(
    index: usize,
    entry: &LegendEntry,
    x_right: f64,
    y: f64,
    metrics: &Metrics,
    font: &FontSpec,
) -> LegendItem {
    LegendItem {
        entry: index,
        swatch: RectPrimitive::new(
            x_right - metrics.box_size,
            y,
            metrics.box_size,
            metrics.box_size,
        ),
        label: PlacedText {
            text: entry.name.clone(),
            font: font.clone(),
            x: x_right - metrics.box_size - LEGEND_PADDING,
            y,
            align: HAlign::Right,
            valign: VAlign::Top,
            rotation_degrees: 0.0,
        },
    }
}
