use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};

/// Remaining plot region in canvas pixels.
///
/// Every reservation step hands back a smaller copy; `ensure_valid` is called
/// after each one so a collapsed rectangle is reported instead of drawn.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Area {
    pub xmin: f64,
    pub xmax: f64,
    pub ymin: f64,
    pub ymax: f64,
}

impl Area {
    #[must_use]
    pub const fn new(xmin: f64, xmax: f64, ymin: f64, ymax: f64) -> Self {
        Self {
            xmin,
            xmax,
            ymin,
            ymax,
        }
    }

    /// Canvas rectangle inset by `margin` on every side.
    #[must_use]
    pub fn inset_canvas(width: f64, height: f64, margin: f64) -> Self {
        Self::new(margin, width - margin, margin, height - margin)
    }

    #[must_use]
    pub fn width(self) -> f64 {
        self.xmax - self.xmin
    }

    #[must_use]
    pub fn height(self) -> f64 {
        self.ymax - self.ymin
    }

    #[must_use]
    pub fn is_valid(self) -> bool {
        self.xmax > self.xmin && self.ymax > self.ymin
    }

    /// Returns `self` when the rectangle still has positive extent.
    pub fn ensure_valid(self, stage: &'static str) -> ChartResult<Self> {
        if self.is_valid() {
            Ok(self)
        } else {
            Err(ChartError::AreaCollapsed { stage, area: self })
        }
    }
}

impl fmt::Display for Area {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "x=[{:.1}, {:.1}] y=[{:.1}, {:.1}]",
            self.xmin, self.xmax, self.ymin, self.ymax
        )
    }
}

/// Y axis a series is scaled against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum AxisSide {
    #[default]
    Primary,
    Secondary,
}

/// Canvas edge carrying the primary Y axis labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum YAxisSide {
    #[default]
    Left,
    Right,
}

/// How consecutive samples are joined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum LineMode {
    #[default]
    Slope,
    Staircase,
    Connected,
}

/// Which series get their area under the line filled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum AreaMode {
    #[default]
    None,
    First,
    All,
    /// Filled areas are stacked on top of each other per axis.
    Stacked,
}

/// Aggregation used to reduce a series to one slice in pie graphs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum PieMode {
    Maximum,
    Minimum,
    #[default]
    Average,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum GraphType {
    #[default]
    Line,
    Pie,
}

/// Prefix table used when formatting Y axis labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum UnitSystem {
    #[default]
    Si,
    Binary,
    None,
}
