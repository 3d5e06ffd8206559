use tracing::debug;

use crate::api::{
    AppliedRecommendation, ChartPipeline, ChartRecommender, Dataset, EngineSnapshot,
    PipelineConfig, PipelineOutput, Recommendation, apply_recommendation, recommend_for,
};
use crate::core::types::{ChartKind, Selection};
use crate::error::ChartResult;
use crate::render::{ChartFrame, RenderStyle, Renderer};

/// Holds the current dataset, selection and chart kind, and keeps the
/// pipeline output in sync with them.
///
/// Every setter re-runs the pipeline, so [`ChartEngine::output`] always
/// describes the latest inputs. Rendering is explicit through
/// [`ChartEngine::render`].
pub struct ChartEngine<R: Renderer> {
    renderer: R,
    pipeline: ChartPipeline,
    style: RenderStyle,
    dataset: Dataset,
    selection: Selection,
    kind: ChartKind,
    output: PipelineOutput,
}

impl<R: Renderer> ChartEngine<R> {
    pub fn new(renderer: R, config: PipelineConfig) -> ChartResult<Self> {
        let pipeline = ChartPipeline::new(config)?;
        let dataset = Dataset::default();
        let selection = Selection::default();
        let kind = ChartKind::default();
        let output = pipeline.run(&dataset, &selection, kind);
        Ok(Self {
            renderer,
            pipeline,
            style: RenderStyle::default(),
            dataset,
            selection,
            kind,
            output,
        })
    }

    fn recompute(&mut self) {
        self.output = self.pipeline.run(&self.dataset, &self.selection, self.kind);
    }

    #[must_use]
    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    #[must_use]
    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    #[must_use]
    pub fn chart_kind(&self) -> ChartKind {
        self.kind
    }

    #[must_use]
    pub fn config(&self) -> PipelineConfig {
        self.pipeline.config()
    }

    #[must_use]
    pub fn style(&self) -> &RenderStyle {
        &self.style
    }

    #[must_use]
    pub fn output(&self) -> &PipelineOutput {
        &self.output
    }

    /// Replaces the dataset. The selection is kept; columns it names that
    /// no longer exist simply produce an empty series.
    pub fn set_dataset(&mut self, dataset: Dataset) {
        debug!(
            columns = dataset.columns.len(),
            rows = dataset.row_count(),
            "set dataset"
        );
        self.dataset = dataset;
        self.recompute();
    }

    pub fn set_selection(&mut self, selection: Selection) {
        self.selection = selection;
        self.recompute();
    }

    pub fn set_x_column(&mut self, column: impl Into<String>) {
        self.selection.x = column.into();
        self.recompute();
    }

    pub fn set_y_column(&mut self, column: impl Into<String>) {
        self.selection.y = column.into();
        self.recompute();
    }

    pub fn set_chart_kind(&mut self, kind: ChartKind) {
        self.kind = kind;
        self.recompute();
    }

    pub fn set_config(&mut self, config: PipelineConfig) -> ChartResult<()> {
        self.pipeline = ChartPipeline::new(config)?;
        self.recompute();
        Ok(())
    }

    pub fn set_style(&mut self, style: RenderStyle) {
        self.style = style;
    }

    /// Applies a recommender outcome to the current dataset's columns.
    pub fn apply_recommendation(
        &mut self,
        outcome: ChartResult<Recommendation>,
    ) -> AppliedRecommendation {
        let applied = apply_recommendation(outcome, &self.dataset.columns);
        self.adopt(&applied);
        applied
    }

    /// Loads `dataset` and lets `recommender` choose the initial chart.
    pub fn load_dataset_with(
        &mut self,
        dataset: Dataset,
        recommender: &dyn ChartRecommender,
    ) -> AppliedRecommendation {
        let applied = recommend_for(recommender, &dataset);
        self.dataset = dataset;
        self.adopt(&applied);
        applied
    }

    fn adopt(&mut self, applied: &AppliedRecommendation) {
        self.kind = applied.kind;
        self.selection = applied.selection.clone();
        self.recompute();
    }

    /// Draw commands for the current output.
    #[must_use]
    pub fn frame(&self) -> ChartFrame {
        ChartFrame::from_geometry(
            self.pipeline.config().plot_area,
            &self.output.geometry,
            &self.style,
        )
    }

    pub fn render(&mut self) -> ChartResult<()> {
        let frame = self.frame();
        self.renderer.render(&frame)
    }

    #[must_use]
    pub fn snapshot(&self) -> EngineSnapshot {
        EngineSnapshot {
            config: self.pipeline.config(),
            columns: self.dataset.columns.clone(),
            row_count: self.dataset.row_count(),
            output: self.output.clone(),
        }
    }

    #[must_use]
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    #[must_use]
    pub fn into_renderer(self) -> R {
        self.renderer
    }
}
