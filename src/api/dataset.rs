use std::fs;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::core::value::{Row, Scalar};
use crate::error::{ChartError, ChartResult};

/// Rectangular dataset: ordered column names plus rows keyed by column.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Dataset {
    pub columns: Vec<String>,
    #[serde(rename = "data")]
    pub rows: Vec<Row>,
}

#[derive(Deserialize)]
struct RawPayload {
    #[serde(default)]
    columns: Option<Vec<String>>,
    #[serde(default)]
    data: Vec<serde_json::Map<String, serde_json::Value>>,
}

impl Dataset {
    #[must_use]
    pub fn new(columns: Vec<String>, rows: Vec<Row>) -> Self {
        Self { columns, rows }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    #[must_use]
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn has_column(&self, name: &str) -> bool {
        self.columns.iter().any(|column| column == name)
    }

    /// Parses a `{columns, data}` payload.
    ///
    /// Cells of any JSON type are accepted; nested arrays and objects become
    /// text. When `columns` is absent the first row's keys are used.
    pub fn from_json_payload(input: &str) -> ChartResult<Self> {
        let payload: RawPayload = serde_json::from_str(input)?;
        let rows: Vec<Row> = payload
            .data
            .into_iter()
            .map(|object| {
                object
                    .into_iter()
                    .map(|(key, value)| (key, Scalar::from(value)))
                    .collect()
            })
            .collect();

        let columns = match payload.columns {
            Some(columns) => columns,
            None => rows
                .first()
                .map(|row| row.keys().cloned().collect())
                .unwrap_or_default(),
        };

        debug!(columns = columns.len(), rows = rows.len(), "parsed dataset payload");
        Ok(Self { columns, rows })
    }

    /// Like [`Dataset::from_json_payload`] but degrades to an empty dataset.
    #[must_use]
    pub fn from_json_or_empty(input: &str) -> Self {
        match Self::from_json_payload(input) {
            Ok(dataset) => dataset,
            Err(err) => {
                warn!(error = %err, "dataset payload rejected, using empty dataset");
                Self::default()
            }
        }
    }
}

/// Port through which a host supplies datasets.
pub trait DatasetSource {
    fn load(&self) -> ChartResult<Dataset>;

    /// Loads the dataset, falling back to an empty one on any failure.
    fn load_or_empty(&self) -> Dataset {
        match self.load() {
            Ok(dataset) => dataset,
            Err(err) => {
                warn!(error = %err, "dataset source failed, using empty dataset");
                Dataset::default()
            }
        }
    }
}

/// Reads a JSON payload file from disk.
#[derive(Debug, Clone)]
pub struct JsonFileSource {
    path: PathBuf,
}

impl JsonFileSource {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl DatasetSource for JsonFileSource {
    fn load(&self) -> ChartResult<Dataset> {
        let input = fs::read_to_string(&self.path)?;
        Dataset::from_json_payload(&input)
    }
}

/// Serves an in-memory payload string.
#[derive(Debug, Clone)]
pub struct StaticPayloadSource {
    payload: String,
}

impl StaticPayloadSource {
    #[must_use]
    pub fn new(payload: impl Into<String>) -> Self {
        Self {
            payload: payload.into(),
        }
    }
}

impl DatasetSource for StaticPayloadSource {
    fn load(&self) -> ChartResult<Dataset> {
        if self.payload.trim().is_empty() {
            return Err(ChartError::InvalidData("empty dataset payload".to_owned()));
        }
        Dataset::from_json_payload(&self.payload)
    }
}
