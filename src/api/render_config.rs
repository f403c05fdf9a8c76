use chrono::{FixedOffset, Offset, Utc};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::core::{
    AreaMode, AxisOverrides, AxisStyle, DEFAULT_PALETTE, GraphType, LineMode, PieMode,
    UnitSystem, YAxisSide,
};
use crate::error::{ChartError, ChartResult};
use crate::render::{Color, FontSpec};

/// Bound on axis relayout passes before layout gives up.
pub const DEFAULT_MAX_LAYOUT_ITERATIONS: usize = 10;
/// Legends are hidden by default above this many series.
pub const AUTO_HIDE_LEGEND_SERIES: usize = 10;

/// Fully resolved rendering configuration.
///
/// Request decoding happens upstream; this type only carries typed values.
/// It is serializable so hosts can keep graph templates as JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    pub width: f64,
    pub height: f64,
    pub margin: f64,
    pub font: FontSpec,
    pub foreground: Color,
    pub background: Color,

    pub graph_type: GraphType,
    pub graph_only: bool,
    /// `None` hides the legend only when more than ten series are drawn.
    pub hide_legend: Option<bool>,
    pub hide_grid: bool,
    pub hide_axes: bool,
    pub hide_y_axis: bool,
    pub y_axis_side: YAxisSide,

    pub title: String,
    pub vtitle: String,
    pub vtitle_right: String,

    pub line_mode: LineMode,
    pub area_mode: AreaMode,
    pub pie_mode: PieMode,
    pub palette: Vec<Color>,
    pub line_width: f64,
    pub dashed: bool,
    pub left_style: AxisStyle,
    pub right_style: AxisStyle,

    pub unique_legend: bool,
    pub draw_null_as_zero: bool,

    /// Overrides for the primary Y axis.
    pub y: AxisOverrides,
    /// Overrides for the secondary Y axis in dual-axis graphs.
    pub y_right: AxisOverrides,
    /// Time range (unix seconds) and label step (seconds) overrides.
    pub x: AxisOverrides,
    pub log_base: Option<f64>,
    pub unit_system: UnitSystem,
    pub utc_offset_seconds: i32,
    pub max_layout_iterations: usize,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: 600.0,
            height: 300.0,
            margin: 10.0,
            font: FontSpec::new("Sans", 10.0),
            foreground: Color::BLACK,
            background: Color::WHITE,
            graph_type: GraphType::Line,
            graph_only: false,
            hide_legend: None,
            hide_grid: false,
            hide_axes: false,
            hide_y_axis: false,
            y_axis_side: YAxisSide::Left,
            title: String::new(),
            vtitle: String::new(),
            vtitle_right: String::new(),
            line_mode: LineMode::Slope,
            area_mode: AreaMode::None,
            pie_mode: PieMode::Average,
            palette: DEFAULT_PALETTE.to_vec(),
            line_width: 1.2,
            dashed: false,
            left_style: AxisStyle::default(),
            right_style: AxisStyle::default(),
            unique_legend: false,
            draw_null_as_zero: false,
            y: AxisOverrides::default(),
            y_right: AxisOverrides::default(),
            x: AxisOverrides::default(),
            log_base: None,
            unit_system: UnitSystem::Si,
            utc_offset_seconds: 0,
            max_layout_iterations: DEFAULT_MAX_LAYOUT_ITERATIONS,
        }
    }
}

/// Visibility switches after `graph_only` and legend auto-hiding are applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayFlags {
    pub legend: bool,
    pub grid: bool,
    pub axes: bool,
    pub y_axis: bool,
}

impl RenderConfig {
    /// Default config for a canvas of the given size.
    #[must_use]
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_margin(mut self, margin: f64) -> Self {
        self.margin = margin;
        self
    }

    #[must_use]
    pub fn with_font(mut self, font: FontSpec) -> Self {
        self.font = font;
        self
    }

    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    #[must_use]
    pub fn with_vtitle(mut self, vtitle: impl Into<String>) -> Self {
        self.vtitle = vtitle.into();
        self
    }

    #[must_use]
    pub fn with_vtitle_right(mut self, vtitle: impl Into<String>) -> Self {
        self.vtitle_right = vtitle.into();
        self
    }

    #[must_use]
    pub fn with_line_mode(mut self, mode: LineMode) -> Self {
        self.line_mode = mode;
        self
    }

    #[must_use]
    pub fn with_area_mode(mut self, mode: AreaMode) -> Self {
        self.area_mode = mode;
        self
    }

    #[must_use]
    pub fn with_graph_type(mut self, graph_type: GraphType) -> Self {
        self.graph_type = graph_type;
        self
    }

    #[must_use]
    pub fn with_palette(mut self, palette: Vec<Color>) -> Self {
        self.palette = palette;
        self
    }

    #[must_use]
    pub fn with_hide_legend(mut self, hide: bool) -> Self {
        self.hide_legend = Some(hide);
        self
    }

    #[must_use]
    pub fn with_hide_axes(mut self, hide: bool) -> Self {
        self.hide_axes = hide;
        self
    }

    #[must_use]
    pub fn with_graph_only(mut self, graph_only: bool) -> Self {
        self.graph_only = graph_only;
        self
    }

    #[must_use]
    pub fn with_y_axis_side(mut self, side: YAxisSide) -> Self {
        self.y_axis_side = side;
        self
    }

    #[must_use]
    pub fn with_unique_legend(mut self, unique: bool) -> Self {
        self.unique_legend = unique;
        self
    }

    #[must_use]
    pub fn with_draw_null_as_zero(mut self, enabled: bool) -> Self {
        self.draw_null_as_zero = enabled;
        self
    }

    #[must_use]
    pub fn with_y_overrides(mut self, overrides: AxisOverrides) -> Self {
        self.y = overrides;
        self
    }

    #[must_use]
    pub fn with_y_right_overrides(mut self, overrides: AxisOverrides) -> Self {
        self.y_right = overrides;
        self
    }

    #[must_use]
    pub fn with_x_overrides(mut self, overrides: AxisOverrides) -> Self {
        self.x = overrides;
        self
    }

    #[must_use]
    pub fn with_side_styles(mut self, left: AxisStyle, right: AxisStyle) -> Self {
        self.left_style = left;
        self.right_style = right;
        self
    }

    #[must_use]
    pub fn with_unit_system(mut self, system: UnitSystem) -> Self {
        self.unit_system = system;
        self
    }

    #[must_use]
    pub fn with_utc_offset_seconds(mut self, offset: i32) -> Self {
        self.utc_offset_seconds = offset;
        self
    }

    #[must_use]
    pub fn with_max_layout_iterations(mut self, iterations: usize) -> Self {
        self.max_layout_iterations = iterations;
        self
    }

    /// Font used for titles: base size plus `floor(ln(size))`.
    #[must_use]
    pub fn title_font(&self) -> FontSpec {
        let size = self.font.size;
        self.font.with_size(size + size.ln().floor())
    }

    #[must_use]
    pub fn display_flags(&self, series_count: usize) -> DisplayFlags {
        if self.graph_only {
            return DisplayFlags {
                legend: false,
                grid: false,
                axes: false,
                y_axis: false,
            };
        }
        let hide_legend = self
            .hide_legend
            .unwrap_or(series_count > AUTO_HIDE_LEGEND_SERIES);
        DisplayFlags {
            legend: !hide_legend,
            grid: !self.hide_grid,
            axes: !self.hide_axes,
            y_axis: !self.hide_y_axis,
        }
    }

    /// Timezone for X labels; out-of-range offsets fall back to UTC.
    #[must_use]
    pub fn fixed_offset(&self) -> FixedOffset {
        FixedOffset::east_opt(self.utc_offset_seconds).unwrap_or_else(|| {
            warn!(
                offset = self.utc_offset_seconds,
                "ignoring out-of-range utc offset"
            );
            Utc.fix()
        })
    }

    /// Serializes config to pretty JSON for templates and debugging.
    pub fn to_json_pretty(&self) -> ChartResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| ChartError::InvalidData(format!("failed to serialize config: {e}")))
    }

    /// Deserializes config from JSON; missing fields take their defaults.
    pub fn from_json_str(input: &str) -> ChartResult<Self> {
        serde_json::from_str(input)
            .map_err(|e| ChartError::InvalidData(format!("failed to parse config: {e}")))
    }
}
