use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::api::{Dataset, PipelineConfig};
use crate::core::classify::{AxisKinds, classify_axes};
use crate::core::geometry::{GeometryPrimitives, build_geometry};
use crate::core::scale::ChartScales;
use crate::core::series::build_series;
use crate::core::table::{TableView, build_table};
use crate::core::types::{ChartKind, Selection, Series};
use crate::error::ChartResult;

/// Result of one pass through classify, aggregate, scale and geometry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineOutput {
    pub kind: ChartKind,
    pub selection: Selection,
    pub axis_kinds: AxisKinds,
    pub series: Series,
    pub scales: ChartScales,
    pub geometry: GeometryPrimitives,
    /// Present only for the table kind.
    pub table: Option<TableView>,
}

/// Stateless pipeline facade over a validated configuration.
///
/// `run` is a pure function of its inputs: identical dataset, selection and
/// kind always produce an identical output.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChartPipeline {
    config: PipelineConfig,
}

impl ChartPipeline {
    pub fn new(config: PipelineConfig) -> ChartResult<Self> {
        Ok(Self {
            config: config.validate()?,
        })
    }

    #[must_use]
    pub fn config(&self) -> PipelineConfig {
        self.config
    }

    #[must_use]
    pub fn run(&self, dataset: &Dataset, selection: &Selection, kind: ChartKind) -> PipelineOutput {
        let axis_kinds = classify_axes(&dataset.rows, selection, self.config.classifier);
        let series = build_series(&dataset.rows, selection, axis_kinds.x, axis_kinds.y_numeric);
        let scales = ChartScales::from_series(&series, self.config.plot_area);
        let geometry = build_geometry(&series, kind, &scales, selection, self.config.geometry);
        let table = (kind == ChartKind::Table)
            .then(|| build_table(&dataset.columns, &dataset.rows, self.config.table_row_cap));

        debug!(
            %kind,
            rows = dataset.row_count(),
            points = series.len(),
            primitives = geometry.chart.primitive_count(),
            "pipeline pass"
        );

        PipelineOutput {
            kind,
            selection: selection.clone(),
            axis_kinds,
            series,
            scales,
            geometry,
            table,
        }
    }
}

impl Default for ChartPipeline {
    fn default() -> Self {
        Self {
            config: PipelineConfig::default(),
        }
    }
}
