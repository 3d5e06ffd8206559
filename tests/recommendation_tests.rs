use serde_json::json;
use tabviz::ChartError;
use tabviz::api::{
    AppliedRecommendation, ChartRecommender, ColumnProfile, Dataset, NoticeLevel,
    RECOMMENDER_SAMPLE_ROWS, Recommendation, apply_recommendation, profile_columns, recommend_for,
};
use tabviz::core::{ChartKind, Row, Selection};

fn columns(names: &[&str]) -> Vec<String> {
    names.iter().map(|name| (*name).to_owned()).collect()
}

#[test]
fn payload_parses_camel_case_fields() {
    let recommendation = Recommendation::from_json_str(
        r#"{"chartType": "scatter", "xColumn": "a", "yColumn": "b", "reason": "spread"}"#,
    )
    .expect("parse");
    assert_eq!(recommendation.chart_type, "scatter");
    assert_eq!(recommendation.x_column, "a");
    assert!(!recommendation.error);
    assert_eq!(recommendation.error_code, None);

    let failed = Recommendation::from_json_str(r#"{"error": true, "errorCode": 429}"#)
        .expect("parse error payload");
    assert!(failed.error);
    assert_eq!(failed.error_code, Some(429));
}

#[test]
fn normalize_coerces_unknown_values() {
    let cols = columns(&["date", "sales", "city"]);
    let recommendation = Recommendation {
        chart_type: "radar".to_owned(),
        x_column: "city".to_owned(),
        y_column: "revenue".to_owned(),
        ..Recommendation::default()
    };
    let (kind, selection) = recommendation.normalize(&cols);
    assert_eq!(kind, ChartKind::Bar);
    assert_eq!(selection, Selection::new("city", "sales"));

    let unknown_x = Recommendation {
        chart_type: " Pie ".to_owned(),
        x_column: "nope".to_owned(),
        y_column: "city".to_owned(),
        ..Recommendation::default()
    };
    let (kind, selection) = unknown_x.normalize(&cols);
    assert_eq!(kind, ChartKind::Pie);
    assert_eq!(selection, Selection::new("date", "city"));
}

#[test]
fn single_column_recommendation_reuses_it_for_y() {
    let (_, selection) = Recommendation::default().normalize(&columns(&["only"]));
    assert_eq!(selection, Selection::new("only", "only"));
}

#[test]
fn error_flag_produces_fallback_with_code_notice() {
    let applied = apply_recommendation(
        Ok(Recommendation {
            chart_type: "line".to_owned(),
            error: true,
            error_code: Some(429),
            ..Recommendation::default()
        }),
        &columns(&["a", "b", "c"]),
    );
    assert_eq!(applied.kind, ChartKind::Bar);
    assert_eq!(applied.selection, Selection::new("a", "b"));
    assert_eq!(applied.notice.level, NoticeLevel::Warning);
    assert!(applied.notice.message.contains("quota"));
}

#[test]
fn fallback_leaves_y_unset_for_single_column() {
    let applied = AppliedRecommendation::fallback(&columns(&["only"]), None);
    assert_eq!(applied.selection, Selection::new("only", ""));
    assert!(!applied.selection.is_complete());

    let none = AppliedRecommendation::fallback(&[], Some(500));
    assert_eq!(none.selection, Selection::default());
    assert!(none.notice.message.contains("unavailable"));
}

#[test]
fn transport_error_produces_fallback() {
    let applied = apply_recommendation(
        Err(ChartError::InvalidData("connection reset".to_owned())),
        &columns(&["x", "y"]),
    );
    assert_eq!(applied.kind, ChartKind::Bar);
    assert_eq!(applied.selection, Selection::new("x", "y"));
    assert_eq!(applied.notice.level, NoticeLevel::Warning);
}

#[test]
fn profile_groups_columns_by_content_and_name() {
    let payload = json!({
        "columns": ["Order Date", "city", "sales", "empty", "Year"],
        "data": [
            {"Order Date": "2021-01-02", "city": "Oslo", "sales": 3, "empty": null, "Year": "FY21"},
            {"Order Date": "2021-02-03", "city": "Rome", "sales": "4.5", "Year": "FY22"}
        ]
    });
    let dataset = Dataset::from_json_payload(&payload.to_string()).expect("payload");
    let profile = profile_columns(&dataset);

    assert_eq!(profile.columns.len(), 5);
    assert_eq!(profile.numeric, vec!["sales"]);
    assert_eq!(profile.date, vec!["Order Date", "Year"]);
    assert_eq!(profile.categorical, vec!["city"]);
}

struct EchoFirstColumns;

impl ChartRecommender for EchoFirstColumns {
    fn recommend(
        &self,
        profile: &ColumnProfile,
        sample: &[Row],
    ) -> tabviz::ChartResult<Recommendation> {
        assert!(sample.len() <= RECOMMENDER_SAMPLE_ROWS);
        Ok(Recommendation {
            chart_type: "area".to_owned(),
            x_column: profile.columns[0].clone(),
            y_column: profile.numeric[0].clone(),
            reason: format!("sampled {} rows", sample.len()),
            ..Recommendation::default()
        })
    }
}

#[test]
fn recommender_sees_bounded_sample() {
    let rows: Vec<serde_json::Value> = (0..25).map(|i| json!({"n": i, "v": i})).collect();
    let dataset = Dataset::from_json_payload(&json!({"columns": ["n", "v"], "data": rows}).to_string())
        .expect("payload");

    let applied = recommend_for(&EchoFirstColumns, &dataset);
    assert_eq!(applied.kind, ChartKind::Area);
    assert_eq!(applied.selection, Selection::new("n", "n"));
    assert_eq!(applied.notice.level, NoticeLevel::Info);
    assert_eq!(applied.notice.message, "sampled 10 rows");
}
