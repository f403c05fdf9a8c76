use serde::Serialize;
use smallvec::SmallVec;

use crate::core::{
    Area, AxisSide, LegendLayout, LineMode, PlacedText, SeriesStyle, TickSpec, YAxisScale,
    YAxisSide,
};
use crate::error::{ChartError, ChartResult};
use crate::render::{Color, FontSpec};

/// One formatted Y grid value and its vertical pixel position.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct YAxisLabel {
    pub value: f64,
    pub text: String,
    pub y: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct YAxisLayout {
    pub axis: AxisSide,
    /// Canvas edge the labels are drawn against.
    pub side: YAxisSide,
    pub scale: YAxisScale,
    pub labels: Vec<YAxisLabel>,
    /// Widest label; zero when labels are hidden.
    pub label_width: f64,
}

impl YAxisLayout {
    /// Maps a value on this axis to a canvas Y coordinate inside `area`.
    #[must_use]
    pub fn value_to_pixel(&self, value: f64, area: Area) -> f64 {
        let span = self.scale.span();
        if span <= 0.0 {
            return area.ymax;
        }
        area.ymax - (value - self.scale.y_bottom) / span * area.height()
    }
}

/// One X label, aligned to the label interval.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct XAxisLabel {
    pub timestamp: i64,
    pub text: String,
    pub x: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct XAxisLayout {
    pub start_time: i64,
    pub end_time: i64,
    pub spec: TickSpec,
    /// Label spacing in seconds after any explicit step override.
    pub label_interval: f64,
    pub labels: Vec<XAxisLabel>,
}

impl XAxisLayout {
    #[must_use]
    pub fn time_to_pixel(&self, timestamp: i64, area: Area) -> f64 {
        let range = self.end_time.saturating_sub(self.start_time) as f64;
        if range <= 0.0 {
            return area.xmin;
        }
        area.xmin + timestamp.saturating_sub(self.start_time) as f64 / range * area.width()
    }
}

/// Style assigned to one input series, in input order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeriesVisual {
    pub name: String,
    pub axis: AxisSide,
    pub style: SeriesStyle,
}

/// Converged geometry for a plotted graph.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlotLayout {
    pub width: f64,
    pub height: f64,
    pub background: Color,
    pub foreground: Color,
    /// Font for axis labels.
    pub label_font: FontSpec,
    /// Final plot rectangle; every reservation has been taken out of it.
    pub area: Area,
    pub titles: Vec<PlacedText>,
    pub legend: Option<LegendLayout>,
    pub y_axes: SmallVec<[YAxisLayout; 2]>,
    pub x_axis: XAxisLayout,
    pub series: Vec<SeriesVisual>,
    pub line_mode: LineMode,
    pub show_grid: bool,
    /// Axis passes needed before the plot width stopped changing.
    pub iterations: usize,
}

impl PlotLayout {
    #[must_use]
    pub fn y_axis(&self, axis: AxisSide) -> Option<&YAxisLayout> {
        self.y_axes.iter().find(|layout| layout.axis == axis)
    }
}

/// Centered placeholder drawn instead of a graph.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NoDataPlaceholder {
    pub width: f64,
    pub height: f64,
    pub background: Color,
    pub color: Color,
    pub text: PlacedText,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum LayoutOutcome {
    Plotted(Box<PlotLayout>),
    NoData(NoDataPlaceholder),
}

impl LayoutOutcome {
    #[must_use]
    pub fn is_no_data(&self) -> bool {
        matches!(self, Self::NoData(_))
    }

    #[must_use]
    pub fn plot(&self) -> Option<&PlotLayout> {
        match self {
            Self::Plotted(plot) => Some(plot),
            Self::NoData(_) => None,
        }
    }

    /// Serializes the outcome to pretty JSON for regression snapshots.
    pub fn to_json_pretty(&self) -> ChartResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| ChartError::InvalidData(format!("failed to serialize layout: {e}")))
    }
}
