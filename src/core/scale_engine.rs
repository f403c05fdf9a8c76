use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::core::tick_table::{TickSpec, select_tick_spec};
use crate::core::{AreaMode, Series};

/// Grid lines the automatic step aims for.
pub const MIN_GRID_LINES: usize = 4;
pub const MAX_GRID_LINES: usize = 8;
/// Upper bound on Y ticks produced by an explicit step.
pub const MAX_Y_TICKS: usize = 200;

const NICE_MANTISSAS: [f64; 3] = [1.0, 2.0, 5.0];
const SNAP_EPSILON: f64 = 1e-9;

/// Explicit axis bounds; `None` means "compute automatically".
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct AxisOverrides {
    #[serde(default)]
    pub min: Option<f64>,
    #[serde(default)]
    pub max: Option<f64>,
    #[serde(default)]
    pub step: Option<f64>,
}

impl AxisOverrides {
    /// Drops overrides that cannot describe an axis, logging each one.
    ///
    /// Non-finite bounds, non-positive steps and inverted explicit pairs fall
    /// back to automatic values.
    #[must_use]
    pub fn sanitized(self, axis: &'static str) -> Self {
        let mut min = finite_or_warn(self.min, axis, "min");
        let mut max = finite_or_warn(self.max, axis, "max");
        let step = finite_or_warn(self.step, axis, "step").filter(|step| {
            let valid = *step > 0.0;
            if !valid {
                warn!(axis, step, "ignoring non-positive axis step override");
            }
            valid
        });
        if let (Some(lo), Some(hi)) = (min, max) {
            if lo >= hi {
                warn!(axis, min = lo, max = hi, "ignoring inverted axis bounds override");
                min = None;
                max = None;
            }
        }
        Self { min, max, step }
    }
}

fn finite_or_warn(value: Option<f64>, axis: &'static str, field: &'static str) -> Option<f64> {
    value.filter(|v| {
        let finite = v.is_finite();
        if !finite {
            warn!(axis, field, value = %v, "ignoring non-finite axis override");
        }
        finite
    })
}

/// Inputs for one Y axis computation.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct YAxisOptions {
    pub overrides: AxisOverrides,
    pub area_mode: AreaMode,
    pub draw_null_as_zero: bool,
}

/// Computed Y axis domain.
///
/// `y_min`/`y_max` are the observed extrema (or the explicit overrides) and
/// stay equal on flat data; the grid runs from `y_bottom` to `y_top` in
/// `y_step` increments and always has a positive span.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct YAxisScale {
    pub y_min: f64,
    pub y_max: f64,
    pub y_step: f64,
    pub y_bottom: f64,
    pub y_top: f64,
}

impl YAxisScale {
    #[must_use]
    pub fn span(self) -> f64 {
        self.y_top - self.y_bottom
    }

    /// Grid values from bottom to top, inclusive.
    #[must_use]
    pub fn ticks(self) -> Vec<f64> {
        let count = tick_interval_count(self.y_bottom, self.y_top, self.y_step);
        let mut ticks: Vec<f64> = (0..=count)
            .map(|index| self.y_bottom + index as f64 * self.y_step)
            .take_while(|value| *value <= self.y_top + self.y_step * SNAP_EPSILON)
            .collect();
        if ticks
            .last()
            .is_some_and(|last| (self.y_top - last) > self.y_step * SNAP_EPSILON)
        {
            ticks.push(self.y_top);
        }
        ticks
    }
}

fn tick_interval_count(bottom: f64, top: f64, step: f64) -> usize {
    let raw = ((top - bottom) / step + SNAP_EPSILON).floor();
    if raw.is_finite() && raw > 0.0 {
        raw as usize
    } else {
        0
    }
}

/// Computes the Y domain and step for the given series (all on one axis).
#[must_use]
pub fn compute_y_axis(series: &[&Series], options: YAxisOptions) -> YAxisScale {
    let overrides = options.overrides.sanitized("y");

    let (mut y_min, mut y_max) = observed_extents(series).unwrap_or((0.0, 0.0));
    if options.area_mode == AreaMode::Stacked && series.len() > 1 {
        y_min = 0.0;
        y_max = stacked_maximum(series).unwrap_or(0.0);
    }

    if options.draw_null_as_zero
        && overrides.max.is_none()
        && y_max < 0.0
        && series.iter().any(|item| item.has_absent_values())
    {
        y_max = 0.0;
    }

    if let Some(min) = overrides.min {
        y_min = min;
    }
    if let Some(max) = overrides.max {
        y_max = max;
    }

    let (grid_min, grid_max) = grid_extents(y_min, y_max, overrides.max.is_some());

    let y_step = overrides
        .step
        .filter(|step| {
            let fits = tick_interval_count(grid_min, grid_max, *step) < MAX_Y_TICKS;
            if !fits {
                warn!(step, y_min, y_max, "y step override yields too many ticks; using auto step");
            }
            fits
        })
        .unwrap_or_else(|| nice_step(grid_min, grid_max));

    let y_bottom = match overrides.min {
        Some(min) if min < grid_max => min,
        _ => snap_down(grid_min, y_step),
    };
    let y_top = match overrides.max {
        Some(max) if max > y_bottom => max,
        _ => snap_up(grid_max, y_step),
    };

    YAxisScale {
        y_min,
        y_max,
        y_step,
        y_bottom,
        y_top,
    }
}

fn observed_extents(series: &[&Series]) -> Option<(f64, f64)> {
    series
        .iter()
        .flat_map(|item| item.present_values())
        .fold(None, |acc, value| match acc {
            None => Some((value, value)),
            Some((lo, hi)) => Some((lo.min(value), hi.max(value))),
        })
}

/// Largest per-index sum across series; gaps contribute zero.
#[must_use]
pub fn stacked_maximum(series: &[&Series]) -> Option<f64> {
    let length = series.iter().map(|item| item.point_count()).max()?;
    (0..length)
        .map(|index| {
            series
                .iter()
                .map(|item| item.value_at(index).unwrap_or(0.0))
                .sum::<f64>()
        })
        .reduce(f64::max)
}

/// Grid extents around the domain; a flat or inverted domain is widened by 1
/// (or 10% of its magnitude), downwards when the maximum was set explicitly.
fn grid_extents(y_min: f64, y_max: f64, max_is_explicit: bool) -> (f64, f64) {
    if y_max > y_min {
        return (y_min, y_max);
    }
    let pad = degenerate_padding(y_min.max(y_max));
    if max_is_explicit {
        (y_max - pad, y_max)
    } else {
        (y_min, y_min + pad)
    }
}

fn degenerate_padding(value: f64) -> f64 {
    if value == 0.0 { 1.0 } else { value.abs() * 0.1 }
}

fn snap_down(value: f64, step: f64) -> f64 {
    (value / step + SNAP_EPSILON).floor() * step
}

fn snap_up(value: f64, step: f64) -> f64 {
    (value / step - SNAP_EPSILON).ceil() * step
}

fn grid_lines(min: f64, max: f64, step: f64) -> usize {
    let lines = ((snap_up(max, step) - snap_down(min, step)) / step).round();
    if lines.is_finite() && lines > 0.0 {
        lines as usize
    } else {
        0
    }
}

/// Smallest `{1, 2, 5} x 10^k` step whose snapped grid fits the target.
///
/// Candidates are walked in ascending order starting at a step that is
/// guaranteed to produce at least [`MAX_GRID_LINES`] lines. The first one in
/// `[MIN_GRID_LINES, MAX_GRID_LINES]` wins; when the jump between two
/// candidates skips the whole window, the first step with at most
/// `MAX_GRID_LINES` lines is used.
#[must_use]
pub fn nice_step(min: f64, max: f64) -> f64 {
    let span = max - min;
    if !span.is_finite() || span <= 0.0 {
        return 1.0;
    }

    let mut exponent = (span / MAX_GRID_LINES as f64).log10().floor() as i32;
    loop {
        let magnitude = 10f64.powi(exponent);
        for mantissa in NICE_MANTISSAS {
            let step = mantissa * magnitude;
            if grid_lines(min, max, step) <= MAX_GRID_LINES {
                return step;
            }
        }
        exponent += 1;
    }
}

/// Chooses the X granularity row for the given range and plot width.
#[must_use]
pub fn select_x_axis_ticks(time_range_seconds: f64, pixel_width: f64) -> &'static TickSpec {
    select_tick_spec(time_range_seconds, pixel_width)
}
