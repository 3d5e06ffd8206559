mod config;
mod dataset;
mod engine;
mod json_contract;
mod library;
mod pipeline;
mod recommendation;

pub use config::PipelineConfig;
pub use dataset::{Dataset, DatasetSource, JsonFileSource, StaticPayloadSource};
pub use engine::ChartEngine;
pub use json_contract::{
    ENGINE_SNAPSHOT_JSON_SCHEMA_V1, EngineSnapshot, EngineSnapshotJsonContractV1,
};
pub use library::{
    InMemoryVisualizationStore, JsonFileVisualizationStore, LIBRARY_CAPACITY,
    LIBRARY_STORAGE_KEY, SavedVisualization, VisualizationDraft, VisualizationFilter,
    VisualizationLibrary, VisualizationStore,
};
pub use pipeline::{ChartPipeline, PipelineOutput};
pub use recommendation::{
    AppliedRecommendation, ChartRecommender, ColumnProfile, NoticeLevel, RECOMMENDER_SAMPLE_ROWS,
    Recommendation, RecommendationNotice, apply_recommendation, fallback_selection,
    profile_columns, recommend_for,
};
