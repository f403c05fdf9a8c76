pub mod axis_labels;
pub mod color_assigner;
pub mod legend;
pub mod scale_engine;
pub mod series;
pub mod text_placer;
pub mod tick_table;
pub mod types;

pub use axis_labels::{format_y_label, unit_prefix};
pub use color_assigner::{AxisStyle, ColorAssigner, DEFAULT_PALETTE};
pub use legend::{
    LegendEntry, LegendItem, LegendLayout, LegendMode, LegendOptions, layout_legend,
    legend_entries,
};
pub use scale_engine::{
    AxisOverrides, YAxisOptions, YAxisScale, compute_y_axis, nice_step, select_x_axis_ticks,
    stacked_maximum,
};
pub use series::{Series, SeriesStyle};
pub use text_placer::{HAlign, PlacedText, TextPlacement, VAlign, place_text};
pub use tick_table::{
    TICK_TABLE, TickSpec, TimeUnit, aligned_times, format_time_label, select_tick_spec,
    time_density,
};
pub use types::{Area, AreaMode, AxisSide, GraphType, LineMode, PieMode, UnitSystem, YAxisSide};
