use criterion::{Criterion, criterion_group, criterion_main};
use serde_json::json;
use std::hint::black_box;
use tabviz::api::{ChartEngine, ChartPipeline, Dataset, PipelineConfig};
use tabviz::core::{
    ChartKind, ChartScales, ClassifierTuning, ColumnKind, GeometryTuning, PlotArea, Selection,
    build_geometry, build_series, classify_axes,
};
use tabviz::render::{NullRenderer, SvgRenderer};

fn dated_rows(count: usize) -> Dataset {
    let data: Vec<serde_json::Value> = (0..count)
        .map(|i| {
            json!({
                "date": format!("{}-{:02}-{:02}", 1990 + i % 30, 1 + i % 12, 1 + i % 28),
                "region": format!("r{}", i % 40),
                "amount": (i % 997) as f64 * 1.5,
            })
        })
        .collect();
    Dataset::from_json_payload(
        &json!({"columns": ["date", "region", "amount"], "data": data}).to_string(),
    )
    .expect("valid generated payload")
}

fn bench_classify_and_aggregate_10k(c: &mut Criterion) {
    let dataset = dated_rows(10_000);
    let selection = Selection::new("date", "amount");

    c.bench_function("classify_and_aggregate_10k", |b| {
        b.iter(|| {
            let kinds = classify_axes(
                black_box(&dataset.rows),
                &selection,
                ClassifierTuning::default(),
            );
            let _ = build_series(black_box(&dataset.rows), &selection, kinds.x, kinds.y_numeric);
        })
    });
}

fn bench_geometry_all_kinds(c: &mut Criterion) {
    let dataset = dated_rows(10_000);
    let selection = Selection::new("region", "amount");
    let series = build_series(&dataset.rows, &selection, ColumnKind::Categorical, true);
    let scales = ChartScales::from_series(&series, PlotArea::default());

    c.bench_function("geometry_all_kinds_40_buckets", |b| {
        b.iter(|| {
            for kind in ChartKind::ALL {
                let _ = build_geometry(
                    black_box(&series),
                    kind,
                    &scales,
                    &selection,
                    GeometryTuning::default(),
                );
            }
        })
    });
}

fn bench_pipeline_to_svg_10k(c: &mut Criterion) {
    let dataset = dated_rows(10_000);
    let mut engine =
        ChartEngine::new(SvgRenderer::new(), PipelineConfig::default()).expect("engine init");
    engine.set_dataset(dataset);
    engine.set_selection(Selection::new("date", "amount"));
    engine.set_chart_kind(ChartKind::Area);

    c.bench_function("area_frame_to_svg_10k", |b| {
        b.iter(|| {
            engine.render().expect("render should succeed");
            black_box(engine.renderer().document().len());
        })
    });
}

fn bench_engine_snapshot_json(c: &mut Criterion) {
    let mut engine =
        ChartEngine::new(NullRenderer::default(), PipelineConfig::default()).expect("engine init");
    engine.set_dataset(dated_rows(2_000));
    engine.set_selection(Selection::new("region", "amount"));
    engine.set_chart_kind(ChartKind::Pie);

    let pipeline = ChartPipeline::default();
    let dataset = engine.dataset().clone();

    c.bench_function("pie_pipeline_run_2k", |b| {
        b.iter(|| {
            let _ = pipeline.run(
                black_box(&dataset),
                &Selection::new("region", "amount"),
                ChartKind::Pie,
            );
        })
    });

    c.bench_function("engine_snapshot_json_2k", |b| {
        b.iter(|| {
            let _ = engine
                .snapshot()
                .to_json_contract_v1_pretty()
                .expect("snapshot json");
        })
    });
}

criterion_group!(
    benches,
    bench_classify_and_aggregate_10k,
    bench_geometry_all_kinds,
    bench_pipeline_to_svg_10k,
    bench_engine_snapshot_json
);
criterion_main!(benches);
