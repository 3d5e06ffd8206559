use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use uuid::Uuid;

use crate::core::types::{ChartKind, Selection};
use crate::error::{ChartError, ChartResult};

/// Storage key under which the library array lives.
pub const LIBRARY_STORAGE_KEY: &str = "visdata_library";
/// Newest entries kept; older ones drop off on save.
pub const LIBRARY_CAPACITY: usize = 100;

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VisualizationFilter {
    pub filter_col: String,
    pub filter_val: String,
}

/// Persisted description of a chart, enough to re-run the pipeline later.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedVisualization {
    pub id: Uuid,
    pub file_id: String,
    pub file_name: String,
    pub title: String,
    pub chart_type: ChartKind,
    pub selected_columns: Selection,
    pub aggregation: String,
    pub time_unit: String,
    pub filter: VisualizationFilter,
    pub created_at: DateTime<Utc>,
}

/// Caller-provided part of a new library entry.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct VisualizationDraft {
    pub file_id: String,
    pub file_name: String,
    pub title: String,
    pub chart_type: ChartKind,
    pub selected_columns: Selection,
}

impl SavedVisualization {
    /// Stamps a draft with a fresh id and creation time. An empty title
    /// becomes `"<file name> Visualization"`.
    #[must_use]
    pub fn from_draft(draft: VisualizationDraft) -> Self {
        let title = if draft.title.trim().is_empty() {
            format!("{} Visualization", draft.file_name)
        } else {
            draft.title
        };
        Self {
            id: Uuid::new_v4(),
            file_id: draft.file_id,
            file_name: draft.file_name,
            title,
            chart_type: draft.chart_type,
            selected_columns: draft.selected_columns,
            aggregation: "sum".to_owned(),
            time_unit: "year".to_owned(),
            filter: VisualizationFilter::default(),
            created_at: Utc::now(),
        }
    }
}

/// String key-value persistence port.
pub trait VisualizationStore {
    fn get(&self, key: &str) -> ChartResult<Option<String>>;
    fn set(&mut self, key: &str, value: String) -> ChartResult<()>;
    fn remove(&mut self, key: &str) -> ChartResult<()>;
    fn list(&self) -> ChartResult<Vec<String>>;
}

#[derive(Debug, Clone, Default)]
pub struct InMemoryVisualizationStore {
    entries: IndexMap<String, String>,
}

impl VisualizationStore for InMemoryVisualizationStore {
    fn get(&self, key: &str) -> ChartResult<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: String) -> ChartResult<()> {
        self.entries.insert(key.to_owned(), value);
        Ok(())
    }

    fn remove(&mut self, key: &str) -> ChartResult<()> {
        self.entries.shift_remove(key);
        Ok(())
    }

    fn list(&self) -> ChartResult<Vec<String>> {
        Ok(self.entries.keys().cloned().collect())
    }
}

/// Stores each key as `<dir>/<key>.json`.
#[derive(Debug, Clone)]
pub struct JsonFileVisualizationStore {
    dir: PathBuf,
}

impl JsonFileVisualizationStore {
    pub fn open(dir: impl Into<PathBuf>) -> ChartResult<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    fn path_for(&self, key: &str) -> ChartResult<PathBuf> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|ch| ch.is_ascii_alphanumeric() || ch == '_' || ch == '-');
        if !valid {
            return Err(ChartError::InvalidData(format!(
                "storage key `{key}` must be non-empty ascii alphanumerics, `_` or `-`"
            )));
        }
        Ok(self.dir.join(format!("{key}.json")))
    }
}

impl VisualizationStore for JsonFileVisualizationStore {
    fn get(&self, key: &str) -> ChartResult<Option<String>> {
        match fs::read_to_string(self.path_for(key)?) {
            Ok(contents) => Ok(Some(contents)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    fn set(&mut self, key: &str, value: String) -> ChartResult<()> {
        fs::write(self.path_for(key)?, value)?;
        Ok(())
    }

    fn remove(&mut self, key: &str) -> ChartResult<()> {
        match fs::remove_file(self.path_for(key)?) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }

    fn list(&self) -> ChartResult<Vec<String>> {
        let mut keys = Vec::new();
        for entry in fs::read_dir(&self.dir)? {
            let path = entry?.path();
            if path.extension().is_some_and(|ext| ext == "json") {
                if let Some(stem) = path.file_stem().and_then(|stem| stem.to_str()) {
                    keys.push(stem.to_owned());
                }
            }
        }
        keys.sort();
        Ok(keys)
    }
}

/// Newest-first list of saved visualizations kept under one storage key.
#[derive(Debug)]
pub struct VisualizationLibrary<S: VisualizationStore> {
    store: S,
}

impl<S: VisualizationStore> VisualizationLibrary<S> {
    #[must_use]
    pub fn new(store: S) -> Self {
        Self { store }
    }

    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }

    #[must_use]
    pub fn into_store(self) -> S {
        self.store
    }

    /// All entries, newest first. A missing key reads as an empty library.
    pub fn list(&self) -> ChartResult<Vec<SavedVisualization>> {
        match self.store.get(LIBRARY_STORAGE_KEY)? {
            Some(contents) => Ok(serde_json::from_str(&contents)?),
            None => Ok(Vec::new()),
        }
    }

    fn write_all(&mut self, items: &[SavedVisualization]) -> ChartResult<()> {
        let contents = serde_json::to_string(items)?;
        self.store.set(LIBRARY_STORAGE_KEY, contents)
    }

    /// Prepends a new entry and truncates to [`LIBRARY_CAPACITY`].
    pub fn save(&mut self, draft: VisualizationDraft) -> ChartResult<SavedVisualization> {
        let saved = SavedVisualization::from_draft(draft);
        let mut items = self.list()?;
        items.insert(0, saved.clone());
        if items.len() > LIBRARY_CAPACITY {
            warn!(
                dropped = items.len() - LIBRARY_CAPACITY,
                "library full, dropping oldest entries"
            );
            items.truncate(LIBRARY_CAPACITY);
        }
        self.write_all(&items)?;
        debug!(id = %saved.id, total = items.len(), "saved visualization");
        Ok(saved)
    }

    pub fn get(&self, id: Uuid) -> ChartResult<SavedVisualization> {
        self.list()?
            .into_iter()
            .find(|item| item.id == id)
            .ok_or_else(|| ChartError::VisualizationNotFound(id.to_string()))
    }

    /// Removes the entry with `id`; returns whether anything was removed.
    pub fn remove(&mut self, id: Uuid) -> ChartResult<bool> {
        let mut items = self.list()?;
        let before = items.len();
        items.retain(|item| item.id != id);
        let removed = items.len() != before;
        if removed {
            self.write_all(&items)?;
            debug!(%id, total = items.len(), "removed visualization");
        }
        Ok(removed)
    }
}
