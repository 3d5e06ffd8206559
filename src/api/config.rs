use serde::{Deserialize, Serialize};

use crate::core::classify::ClassifierTuning;
use crate::core::geometry::GeometryTuning;
use crate::core::types::PlotArea;
use crate::error::{ChartError, ChartResult};

/// Pipeline bootstrap configuration.
///
/// Every field has a serde default, so hosts can persist only the values they
/// override.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PipelineConfig {
    #[serde(default)]
    pub plot_area: PlotArea,
    #[serde(default)]
    pub classifier: ClassifierTuning,
    #[serde(default)]
    pub geometry: GeometryTuning,
    #[serde(default = "default_table_row_cap")]
    pub table_row_cap: usize,
}

fn default_table_row_cap() -> usize {
    1000
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            plot_area: PlotArea::default(),
            classifier: ClassifierTuning::default(),
            geometry: GeometryTuning::default(),
            table_row_cap: default_table_row_cap(),
        }
    }
}

impl PipelineConfig {
    #[must_use]
    pub fn with_plot_area(mut self, plot_area: PlotArea) -> Self {
        self.plot_area = plot_area;
        self
    }

    #[must_use]
    pub fn with_classifier(mut self, classifier: ClassifierTuning) -> Self {
        self.classifier = classifier;
        self
    }

    #[must_use]
    pub fn with_geometry(mut self, geometry: GeometryTuning) -> Self {
        self.geometry = geometry;
        self
    }

    pub fn validate(self) -> ChartResult<Self> {
        self.plot_area.validate()?;
        self.classifier.validate()?;
        self.geometry.validate()?;
        if self.table_row_cap == 0 {
            return Err(ChartError::InvalidConfig(
                "table row cap must be > 0".to_owned(),
            ));
        }
        Ok(self)
    }

    pub fn from_json_str(input: &str) -> ChartResult<Self> {
        let config: Self = serde_json::from_str(input)?;
        config.validate()
    }

    pub fn to_json_pretty(&self) -> ChartResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
