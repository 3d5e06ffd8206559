//! tabviz: tabular data to chart geometry.
//!
//! Rows of loosely-typed cells go through a fixed pipeline: column
//! classification, aggregation into a series, scale computation and finally
//! per-kind geometry (bars, paths, pie wedges, axis furniture). Every stage is
//! a pure function of its inputs; rendering backends consume the resulting
//! [`render::ChartFrame`].

pub mod api;
pub mod core;
pub mod error;
pub mod render;
pub mod telemetry;

pub use api::{ChartEngine, ChartPipeline, Dataset, PipelineConfig};
pub use error::{ChartError, ChartResult};
