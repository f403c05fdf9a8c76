use chrono::{DateTime, Utc};
use serde::Serialize;
use smallvec::SmallVec;
use tracing::{debug, trace, warn};

use crate::core::{
    Area, AxisOverrides, AxisSide, ColorAssigner, GraphType, HAlign, LegendLayout,
    LegendOptions, LineMode, PlacedText, Series, VAlign, YAxisOptions, YAxisSide,
    aligned_times, compute_y_axis, format_time_label, format_y_label, layout_legend,
    select_x_axis_ticks,
};
use crate::error::{ChartError, ChartResult};
use crate::render::{Color, TextMeasurer};

use super::layout_outcome::{
    LayoutOutcome, NoDataPlaceholder, PlotLayout, SeriesVisual, XAxisLabel, XAxisLayout,
    YAxisLabel, YAxisLayout,
};
use super::render_config::{DisplayFlags, RenderConfig};

/// Y label widths are padded by this factor when insetting the plot.
const LABEL_INSET_FACTOR: f64 = 1.02;
/// Upper bound on X labels; explicit steps beyond it fall back to the table
/// step, and table steps beyond it are widened.
pub const MAX_X_LABELS: usize = 500;
const NO_DATA_TEXT: &str = "No Data";

/// Where the converger is in its reservation sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum LayoutStage {
    Init,
    TitleReserved,
    VTitleReserved,
    LegendReserved,
    AxisConverged,
    Done,
    NoData,
}

/// Runs the reservation sequence for one render request.
///
/// Every stage receives the plot area left by the previous stage and returns
/// a smaller one; a stage that leaves an empty rectangle aborts layout with
/// [`ChartError::AreaCollapsed`].
pub struct GeometryConverger<'a> {
    config: &'a RenderConfig,
    measurer: &'a dyn TextMeasurer,
    x_overrides: AxisOverrides,
    stage: LayoutStage,
}

impl<'a> GeometryConverger<'a> {
    #[must_use]
    pub fn new(config: &'a RenderConfig, measurer: &'a dyn TextMeasurer) -> Self {
        Self {
            config,
            measurer,
            x_overrides: config.x.sanitized("x"),
            stage: LayoutStage::Init,
        }
    }

    #[must_use]
    pub fn stage(&self) -> LayoutStage {
        self.stage
    }

    fn advance(&mut self, stage: LayoutStage, area: Area) {
        debug!(from = ?self.stage, to = ?stage, area = %area, "layout stage");
        self.stage = stage;
    }

    /// Lays out `series` on the configured canvas.
    ///
    /// Colors and line styles are written back into `series`. Series whose
    /// merged time range is empty produce [`LayoutOutcome::NoData`].
    pub fn converge(&mut self, series: &mut [Series]) -> ChartResult<LayoutOutcome> {
        self.check_supported()?;
        for item in series.iter() {
            item.validate_shape()?;
        }

        let Some((merged_start, merged_stop)) = merged_time_range(series) else {
            return Ok(self.no_data());
        };
        if merged_stop <= merged_start {
            return Ok(self.no_data());
        }
        for item in series.iter() {
            item.validate_time_range()?;
        }

        let config = self.config;
        let area = Area::inset_canvas(config.width, config.height, config.margin)
            .ensure_valid("canvas margins")?;
        let flags = config.display_flags(series.len());
        let dual_axis = series.iter().any(|item| item.axis == AxisSide::Secondary);
        let line_mode = resolve_line_mode(series, config.line_mode);
        self.assign_styles(series, dual_axis);

        let mut titles = Vec::new();
        let area = self.reserve_title(area, &mut titles)?;
        self.advance(LayoutStage::TitleReserved, area);

        let area = self.reserve_vertical_titles(area, &mut titles, dual_axis)?;
        self.advance(LayoutStage::VTitleReserved, area);

        let (area, legend) = if flags.legend {
            let legend = self.reserve_legend(series, area, dual_axis)?;
            (legend.area, Some(legend))
        } else {
            (area, None)
        };
        self.advance(LayoutStage::LegendReserved, area);

        let area = self.reserve_x_label_band(area, flags)?;
        let (start_time, end_time) =
            self.drawable_time_range(series, line_mode, merged_start, merged_stop)?;
        let (area, mut y_axes, iterations) = self.converge_y_axes(series, area, flags, dual_axis)?;
        for axis in &mut y_axes {
            let positions: Vec<f64> = axis
                .labels
                .iter()
                .map(|label| axis.value_to_pixel(label.value, area))
                .collect();
            for (label, y) in axis.labels.iter_mut().zip(positions) {
                label.y = y;
            }
        }
        let x_axis = self.build_x_axis(start_time, end_time, area, flags);
        self.advance(LayoutStage::AxisConverged, area);

        let visuals = series
            .iter()
            .filter_map(|item| {
                item.style.map(|style| SeriesVisual {
                    name: item.name.clone(),
                    axis: item.axis,
                    style,
                })
            })
            .collect();

        self.advance(LayoutStage::Done, area);
        Ok(LayoutOutcome::Plotted(Box::new(PlotLayout {
            width: config.width,
            height: config.height,
            background: config.background,
            foreground: config.foreground,
            label_font: config.font.clone(),
            area,
            titles,
            legend,
            y_axes,
            x_axis,
            series: visuals,
            line_mode,
            show_grid: flags.grid,
            iterations,
        })))
    }

    fn check_supported(&self) -> ChartResult<()> {
        if self.config.graph_type == GraphType::Pie {
            return Err(ChartError::UnimplementedMode("pie graphs"));
        }
        match self.config.log_base {
            Some(base) if base.is_finite() && base > 0.0 && base != 1.0 => {
                Err(ChartError::UnimplementedMode("logarithmic y axis"))
            }
            Some(base) => {
                warn!(base, "ignoring invalid logarithm base; using linear y axis");
                Ok(())
            }
            None => Ok(()),
        }
    }

    fn no_data(&mut self) -> LayoutOutcome {
        let config = self.config;
        let font = config.font.with_size((config.width * config.height).ln());
        let placeholder = NoDataPlaceholder {
            width: config.width,
            height: config.height,
            background: config.background,
            color: Color::RED,
            text: PlacedText {
                text: NO_DATA_TEXT.to_owned(),
                font,
                x: config.width / 2.0,
                y: config.height / 2.0,
                align: HAlign::Center,
                valign: VAlign::Top,
                rotation_degrees: 0.0,
            },
        };
        self.advance(
            LayoutStage::NoData,
            Area::inset_canvas(config.width, config.height, config.margin),
        );
        LayoutOutcome::NoData(placeholder)
    }

    fn assign_styles(&self, series: &mut [Series], dual_axis: bool) {
        let config = self.config;
        let assigner =
            ColorAssigner::new(&config.palette).with_line(config.line_width, config.dashed);
        let assigner = if dual_axis {
            assigner.with_side_styles(config.left_style, config.right_style)
        } else {
            assigner
        };
        assigner.assign(series);
    }

    fn reserve_title(&self, area: Area, titles: &mut Vec<PlacedText>) -> ChartResult<Area> {
        let config = self.config;
        if config.title.is_empty() {
            return Ok(area);
        }
        let font = config.title_font();
        let line_height = self.measurer.font_metrics(&font).height;
        let x = config.width / 2.0;
        let mut y = area.ymin;
        for line in config.title.split('\n') {
            titles.push(PlacedText {
                text: line.to_owned(),
                font: font.clone(),
                x,
                y,
                align: HAlign::Center,
                valign: VAlign::Top,
                rotation_degrees: 0.0,
            });
            y += line_height;
        }
        Area { ymin: y + config.margin, ..area }.ensure_valid("title")
    }

    fn reserve_vertical_titles(
        &self,
        area: Area,
        titles: &mut Vec<PlacedText>,
        dual_axis: bool,
    ) -> ChartResult<Area> {
        let config = self.config;
        let font = config.title_font();
        let line_height = self.measurer.font_metrics(&font).height;
        let y = config.height / 2.0;
        let mut area = area;

        if !config.vtitle.is_empty() {
            let mut x = area.xmin + line_height;
            for line in config.vtitle.split('\n') {
                titles.push(PlacedText {
                    text: line.to_owned(),
                    font: font.clone(),
                    x,
                    y,
                    align: HAlign::Center,
                    valign: VAlign::Baseline,
                    rotation_degrees: 270.0,
                });
                x += line_height;
            }
            area = Area { xmin: x + config.margin, ..area }.ensure_valid("vertical title")?;
        }

        if dual_axis && !config.vtitle_right.is_empty() {
            let mut x = area.xmax - line_height;
            for line in config.vtitle_right.split('\n') {
                titles.push(PlacedText {
                    text: line.to_owned(),
                    font: font.clone(),
                    x,
                    y,
                    align: HAlign::Center,
                    valign: VAlign::Baseline,
                    rotation_degrees: 90.0,
                });
                x -= line_height;
            }
            area = Area { xmax: x - config.margin, ..area }.ensure_valid("right vertical title")?;
        }

        Ok(area)
    }

    fn reserve_legend(
        &self,
        series: &[Series],
        area: Area,
        dual_axis: bool,
    ) -> ChartResult<LegendLayout> {
        let options = LegendOptions {
            canvas_width: self.config.width,
            font: &self.config.font,
            unique: self.config.unique_legend,
            dual_axis,
        };
        layout_legend(series, options, area, self.measurer)
    }

    fn reserve_x_label_band(&self, area: Area, flags: DisplayFlags) -> ChartResult<Area> {
        if !flags.axes {
            return Ok(area);
        }
        let ascent = self.measurer.font_metrics(&self.config.font).ascent;
        Area { ymax: area.ymax - 2.0 * ascent, ..area }.ensure_valid("x axis labels")
    }

    /// Time span the X axis covers.
    ///
    /// Slope-style lines end at the last sample rather than the exclusive
    /// stop time, except when every series is a two-point pair.
    fn drawable_time_range(
        &self,
        series: &[Series],
        line_mode: LineMode,
        merged_start: i64,
        merged_stop: i64,
    ) -> ChartResult<(i64, i64)> {
        let all_pairs = series.iter().all(|item| item.point_count() == 2);
        let mut end = merged_stop;
        if line_mode != LineMode::Staircase && !all_pairs {
            if let Some((name, last_sample)) = series
                .iter()
                .map(|item| (item.name.as_str(), item.stop_time - item.step_time))
                .max_by_key(|(_, last)| *last)
            {
                if last_sample < merged_start {
                    return Err(ChartError::inconsistent(
                        name,
                        format!(
                            "last sample {last_sample} precedes the earliest start {merged_start}"
                        ),
                    ));
                }
                end = if last_sample > merged_start {
                    last_sample
                } else {
                    merged_stop
                };
            }
        }

        let start = time_override(self.x_overrides.min, "min").unwrap_or(merged_start);
        let overridden_end = time_override(self.x_overrides.max, "max").unwrap_or(end);
        if overridden_end <= start {
            warn!(
                start,
                end = overridden_end,
                "ignoring x range override that leaves an empty time range"
            );
            return Ok((merged_start, end));
        }
        Ok((start, overridden_end))
    }

    fn converge_y_axes(
        &self,
        series: &[Series],
        area: Area,
        flags: DisplayFlags,
        dual_axis: bool,
    ) -> ChartResult<(Area, SmallVec<[YAxisLayout; 2]>, usize)> {
        let max_iterations = self.config.max_layout_iterations.max(1);
        let mut area = area;
        for iteration in 1..=max_iterations {
            let axes = self.setup_y_axes(series, flags, dual_axis);
            let next = self.apply_label_insets(area, &axes)?;
            trace!(
                iteration,
                xmin = next.xmin,
                xmax = next.xmax,
                "y axis layout pass"
            );
            if next == area {
                return Ok((area, axes, iteration));
            }
            area = next;
        }
        Err(ChartError::LayoutNonConvergence {
            iterations: max_iterations,
        })
    }

    fn setup_y_axes(
        &self,
        series: &[Series],
        flags: DisplayFlags,
        dual_axis: bool,
    ) -> SmallVec<[YAxisLayout; 2]> {
        let config = self.config;
        let mut plan: SmallVec<[(AxisSide, YAxisSide, AxisOverrides); 2]> = SmallVec::new();
        if dual_axis {
            plan.push((AxisSide::Primary, YAxisSide::Left, config.y));
            plan.push((AxisSide::Secondary, YAxisSide::Right, config.y_right));
        } else {
            plan.push((AxisSide::Primary, config.y_axis_side, config.y));
        }
        let show_labels = flags.axes && flags.y_axis;

        plan.into_iter()
            .map(|(axis, side, overrides)| {
                let members: Vec<&Series> = series
                    .iter()
                    .filter(|item| !dual_axis || item.axis == axis)
                    .collect();
                let scale = compute_y_axis(
                    &members,
                    YAxisOptions {
                        overrides,
                        area_mode: config.area_mode,
                        draw_null_as_zero: config.draw_null_as_zero,
                    },
                );
                let labels: Vec<YAxisLabel> = if show_labels {
                    scale
                        .ticks()
                        .into_iter()
                        .map(|value| YAxisLabel {
                            value,
                            text: format_y_label(value, scale.y_step, config.unit_system),
                            y: 0.0,
                        })
                        .collect()
                } else {
                    Vec::new()
                };
                let label_width = labels
                    .iter()
                    .map(|label| self.measurer.measure_text(&label.text, &config.font).width)
                    .fold(0.0, f64::max);
                YAxisLayout {
                    axis,
                    side,
                    scale,
                    labels,
                    label_width,
                }
            })
            .collect()
    }

    fn apply_label_insets(&self, area: Area, axes: &[YAxisLayout]) -> ChartResult<Area> {
        let config = self.config;
        let mut area = area;
        for axis in axes.iter().filter(|axis| axis.label_width > 0.0) {
            let inset = config.margin + axis.label_width * LABEL_INSET_FACTOR;
            match axis.side {
                YAxisSide::Left => area.xmin = area.xmin.max(inset),
                YAxisSide::Right => area.xmax = area.xmax.min(config.width - inset),
            }
        }
        area.ensure_valid("y axis labels")
    }

    fn build_x_axis(
        &self,
        start_time: i64,
        end_time: i64,
        area: Area,
        flags: DisplayFlags,
    ) -> XAxisLayout {
        let range = end_time.saturating_sub(start_time) as f64;
        let spec = *select_x_axis_ticks(range, area.width());
        let table_interval = spec.label_interval_seconds();
        let mut label_interval = match self.x_overrides.step {
            Some(step) if range / step > MAX_X_LABELS as f64 => {
                warn!(step, range, "x step override yields too many labels; using table step");
                table_interval
            }
            Some(step) => step,
            None => table_interval,
        };
        if range / label_interval > MAX_X_LABELS as f64 {
            let multiple = (range / (table_interval * MAX_X_LABELS as f64)).ceil();
            let widened = table_interval * multiple;
            warn!(
                range,
                table_interval,
                widened,
                "time range outgrows the tick table; widening label interval"
            );
            label_interval = widened;
        }

        let offset = self.config.fixed_offset();
        let mut layout = XAxisLayout {
            start_time,
            end_time,
            spec,
            label_interval,
            labels: Vec::new(),
        };
        if flags.axes {
            layout.labels = aligned_times(start_time, end_time, label_interval)
                .into_iter()
                .map(|timestamp| XAxisLabel {
                    timestamp,
                    text: format_time_label(timestamp, spec.format, offset),
                    x: layout.time_to_pixel(timestamp, area),
                })
                .collect();
        }
        layout
    }
}

/// Runs a full layout pass with a fresh converger.
pub fn layout_graph(
    config: &RenderConfig,
    series: &mut [Series],
    measurer: &dyn TextMeasurer,
) -> ChartResult<LayoutOutcome> {
    GeometryConverger::new(config, measurer).converge(series)
}

/// Converts an X bound override to a unix timestamp, dropping values chrono
/// cannot represent.
fn time_override(value: Option<f64>, field: &'static str) -> Option<i64> {
    let value = value?;
    let seconds = value.round();
    if DateTime::<Utc>::from_timestamp(seconds as i64, 0).is_none() {
        warn!(field, value, "ignoring x override outside the representable time range");
        return None;
    }
    Some(seconds as i64)
}

fn merged_time_range(series: &[Series]) -> Option<(i64, i64)> {
    let start = series.iter().map(|item| item.start_time).min()?;
    let stop = series.iter().map(|item| item.stop_time).max()?;
    Some((start, stop))
}

/// A lone sample cannot be drawn as a slope.
fn resolve_line_mode(series: &[Series], configured: LineMode) -> LineMode {
    if !series.is_empty() && series.iter().all(|item| item.point_count() == 1) {
        LineMode::Staircase
    } else {
        configured
    }
}
