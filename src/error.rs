use thiserror::Error;

use crate::core::Area;

pub type ChartResult<T> = Result<T, ChartError>;

#[derive(Debug, Error)]
pub enum ChartError {
    #[error("inconsistent series `{name}`: {reason}")]
    InconsistentSeries { name: String, reason: String },

    #[error("plot area collapsed after {stage}: {area}")]
    AreaCollapsed { stage: &'static str, area: Area },

    #[error("axis layout did not converge after {iterations} iterations")]
    LayoutNonConvergence { iterations: usize },

    #[error("unsupported mode: {0}")]
    UnimplementedMode(&'static str),

    #[error("invalid data: {0}")]
    InvalidData(String),
}

impl ChartError {
    pub(crate) fn inconsistent(name: &str, reason: impl Into<String>) -> Self {
        Self::InconsistentSeries {
            name: name.to_owned(),
            reason: reason.into(),
        }
    }
}
