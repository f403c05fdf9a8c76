use serde::{Deserialize, Serialize};

use crate::core::AxisSide;
use crate::error::{ChartError, ChartResult};
use crate::render::Color;

/// Visual attributes resolved for one series during layout.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SeriesStyle {
    pub color: Color,
    pub line_width: f64,
    pub dashed: bool,
}

/// One named, fixed-step time series with optional gaps.
///
/// `values[i]` is meaningful only when `is_absent[i]` is false. Timestamps are
/// unix seconds; `stop_time` is exclusive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Series {
    pub name: String,
    pub start_time: i64,
    pub stop_time: i64,
    pub step_time: i64,
    pub values: Vec<f64>,
    pub is_absent: Vec<bool>,
    #[serde(default)]
    pub axis: AxisSide,
    /// Explicit color requested for this series.
    #[serde(default)]
    pub color: Option<Color>,
    /// Filled in by layout; `None` until colors are assigned.
    #[serde(default)]
    pub style: Option<SeriesStyle>,
}

impl Series {
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        start_time: i64,
        stop_time: i64,
        step_time: i64,
        values: Vec<f64>,
        is_absent: Vec<bool>,
    ) -> Self {
        Self {
            name: name.into(),
            start_time,
            stop_time,
            step_time,
            values,
            is_absent,
            axis: AxisSide::Primary,
            color: None,
            style: None,
        }
    }

    /// Builds a series from optional samples; `None` marks a gap.
    #[must_use]
    pub fn from_samples(
        name: impl Into<String>,
        start_time: i64,
        step_time: i64,
        samples: &[Option<f64>],
    ) -> Self {
        let stop_time = start_time + step_time * samples.len() as i64;
        let values = samples.iter().map(|sample| sample.unwrap_or(0.0)).collect();
        let is_absent = samples.iter().map(Option::is_none).collect();
        Self::new(name, start_time, stop_time, step_time, values, is_absent)
    }

    #[must_use]
    pub fn on_axis(mut self, axis: AxisSide) -> Self {
        self.axis = axis;
        self
    }

    #[must_use]
    pub fn with_color(mut self, color: Color) -> Self {
        self.color = Some(color);
        self
    }

    #[must_use]
    pub fn point_count(&self) -> usize {
        self.values.len()
    }

    #[must_use]
    pub fn has_absent_values(&self) -> bool {
        self.is_absent.iter().any(|absent| *absent)
    }

    /// Value at `index`, or `None` for gaps and out-of-range indices.
    #[must_use]
    pub fn value_at(&self, index: usize) -> Option<f64> {
        match self.is_absent.get(index) {
            Some(false) => self.values.get(index).copied().filter(|v| v.is_finite()),
            _ => None,
        }
    }

    /// Present, finite values in time order.
    pub fn present_values(&self) -> impl Iterator<Item = f64> + '_ {
        (0..self.values.len()).filter_map(|index| self.value_at(index))
    }

    /// Checks the per-series shape invariants.
    pub fn validate_shape(&self) -> ChartResult<()> {
        if self.values.len() != self.is_absent.len() {
            return Err(ChartError::inconsistent(
                &self.name,
                format!(
                    "{} values but {} absence flags",
                    self.values.len(),
                    self.is_absent.len()
                ),
            ));
        }
        if self.values.len() > 1 && self.step_time <= 0 {
            return Err(ChartError::inconsistent(
                &self.name,
                format!("step must be > 0, got {}", self.step_time),
            ));
        }
        Ok(())
    }

    pub fn validate_time_range(&self) -> ChartResult<()> {
        if self.stop_time < self.start_time {
            return Err(ChartError::inconsistent(
                &self.name,
                format!(
                    "stop time {} precedes start time {}",
                    self.stop_time, self.start_time
                ),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_samples_marks_gaps_and_derives_stop_time() {
        let series = Series::from_samples("cpu", 100, 10, &[Some(1.0), None, Some(3.0)]);
        assert_eq!(series.stop_time, 130);
        assert_eq!(series.is_absent, vec![false, true, false]);
        assert_eq!(series.present_values().collect::<Vec<_>>(), vec![1.0, 3.0]);
        assert!(series.has_absent_values());
    }

    #[test]
    fn mismatched_flags_are_rejected() {
        let series = Series::new("mem", 0, 10, 1, vec![1.0, 2.0], vec![false]);
        let err = series.validate_shape().expect_err("length mismatch");
        assert!(matches!(err, ChartError::InconsistentSeries { .. }));
    }

    #[test]
    fn reversed_time_range_is_rejected() {
        let series = Series::new("disk", 50, 10, 1, vec![], vec![]);
        assert!(series.validate_time_range().is_err());
    }
}
