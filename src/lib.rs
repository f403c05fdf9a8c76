//! chart-layout: scale and layout engine for server-side time-series graphs.
//!
//! Given typed series and a resolved [`RenderConfig`], the engine computes
//! Y axis domains and steps, X tick granularity, series colors, title and
//! legend placement, and the final plot rectangle. Rasterization is left to a
//! [`render::Canvas`] backend; [`render::paint_layout`] is a thin adapter.

pub mod api;
pub mod core;
pub mod error;
pub mod render;
pub mod telemetry;

pub use api::{GeometryConverger, LayoutOutcome, PlotLayout, RenderConfig, layout_graph};
pub use error::{ChartError, ChartResult};
