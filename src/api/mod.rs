mod geometry_converger;
mod layout_outcome;
mod render_config;

pub use geometry_converger::{GeometryConverger, LayoutStage, MAX_X_LABELS, layout_graph};
pub use layout_outcome::{
    LayoutOutcome, NoDataPlaceholder, PlotLayout, SeriesVisual, XAxisLabel, XAxisLayout,
    YAxisLabel, YAxisLayout,
};
pub use render_config::{
    AUTO_HIDE_LEGEND_SERIES, DEFAULT_MAX_LAYOUT_ITERATIONS, DisplayFlags, RenderConfig,
};
