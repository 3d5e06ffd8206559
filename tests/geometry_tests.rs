use approx::assert_abs_diff_eq;
use tabviz::core::axis_ticks::DATE_TITLE_SUFFIX;
use tabviz::core::pie_series::OTHERS_LABEL;
use tabviz::core::{
    ChartGeometry, ChartKind, ChartScales, ColumnKind, GeometryTuning, PlotArea, PlotPoint,
    Selection, Series, build_geometry,
};

fn series(x_kind: ColumnKind, points: Vec<PlotPoint>) -> Series {
    Series {
        x_kind,
        y_numeric: true,
        points,
    }
}

fn build(series: &Series, kind: ChartKind) -> tabviz::core::GeometryPrimitives {
    let scales = ChartScales::from_series(series, PlotArea::default());
    build_geometry(
        series,
        kind,
        &scales,
        &Selection::new("x", "y"),
        GeometryTuning::default(),
    )
}

fn year_series() -> Series {
    series(
        ColumnKind::Date,
        vec![PlotPoint::new("2020", 8.0), PlotPoint::new("2021", 2.0)],
    )
}

fn numeric_series() -> Series {
    series(
        ColumnKind::Numeric,
        vec![
            PlotPoint::new(1.0, 10.0),
            PlotPoint::new(2.0, 20.0),
            PlotPoint::new(3.0, 5.0),
        ],
    )
}

#[test]
fn bars_center_on_bands_and_grow_from_baseline() {
    let geometry = build(&year_series(), ChartKind::Bar);
    let ChartGeometry::Bar { bars } = &geometry.chart else {
        panic!("expected bars");
    };

    assert_eq!(bars.len(), 2);
    assert_abs_diff_eq!(bars[0].x, 94.0, epsilon = 1e-9);
    assert_abs_diff_eq!(bars[0].width, 252.0, epsilon = 1e-9);
    assert_abs_diff_eq!(bars[0].y, 40.0, epsilon = 1e-9);
    assert_abs_diff_eq!(bars[0].height, 320.0, epsilon = 1e-9);
    assert_abs_diff_eq!(bars[1].x, 454.0, epsilon = 1e-9);
    assert_abs_diff_eq!(bars[1].y, 280.0, epsilon = 1e-9);
    assert_abs_diff_eq!(bars[1].height, 80.0, epsilon = 1e-9);
    assert_eq!(bars[1].label, "2021");
}

#[test]
fn numeric_x_has_no_bars() {
    let geometry = build(&numeric_series(), ChartKind::Bar);
    assert_eq!(geometry.chart.primitive_count(), 0);
    assert!(geometry.axes.is_some());
}

#[test]
fn line_connects_points_in_series_order() {
    let geometry = build(&numeric_series(), ChartKind::Line);
    let ChartGeometry::Line(line) = &geometry.chart else {
        panic!("expected line");
    };
    assert_eq!(line.path.to_svg_path(), "M 40 200 L 400 40 L 760 280");
    assert_eq!(line.markers.len(), 3);
    assert!(line.markers.iter().all(|m| m.radius == 2.5));
}

#[test]
fn area_closes_against_zero_baseline() {
    let geometry = build(&numeric_series(), ChartKind::Area);
    let ChartGeometry::Area(area) = &geometry.chart else {
        panic!("expected area");
    };

    assert_abs_diff_eq!(area.baseline_y, 360.0, epsilon = 1e-9);
    assert_eq!(area.fill_polygon.len(), area.line.vertices.len() + 3);
    let first = area.fill_polygon[0];
    let last = area.fill_polygon[area.fill_polygon.len() - 1];
    assert_eq!(first, last);
    assert_abs_diff_eq!(first.x, 40.0, epsilon = 1e-9);
    assert_abs_diff_eq!(first.y, 360.0, epsilon = 1e-9);
    assert_abs_diff_eq!(area.fill_polygon[4].x, 760.0, epsilon = 1e-9);
    assert_abs_diff_eq!(area.fill_polygon[4].y, 360.0, epsilon = 1e-9);
    assert!(area.fill_svg_path().ends_with(" Z"));
}

#[test]
fn area_baseline_sits_mid_plot_for_negative_values() {
    let geometry = build(
        &series(
            ColumnKind::Categorical,
            vec![PlotPoint::new("a", -4.0), PlotPoint::new("b", 4.0)],
        ),
        ChartKind::Area,
    );
    let ChartGeometry::Area(area) = &geometry.chart else {
        panic!("expected area");
    };
    assert_abs_diff_eq!(area.baseline_y, 200.0, epsilon = 1e-9);
}

#[test]
fn scatter_markers_are_larger_than_line_markers() {
    let geometry = build(&numeric_series(), ChartKind::Scatter);
    let ChartGeometry::Scatter(scatter) = &geometry.chart else {
        panic!("expected scatter");
    };
    assert_eq!(scatter.markers.len(), 3);
    assert!(scatter.markers.iter().all(|m| m.radius == 4.0));
}

#[test]
fn axes_carry_grid_ticks_and_titles() {
    let geometry = build(&year_series(), ChartKind::Bar);
    let axes = geometry.axes.expect("cartesian axes");

    assert_eq!(axes.grid_lines.len(), 5);
    assert_abs_diff_eq!(axes.grid_lines[0].from.y, 40.0, epsilon = 1e-9);
    assert_abs_diff_eq!(axes.grid_lines[4].from.y, 360.0, epsilon = 1e-9);

    let y_labels: Vec<&str> = axes.y_ticks.iter().map(|t| t.label.as_str()).collect();
    assert_eq!(y_labels, vec!["8", "6", "4", "2", "0"]);

    assert_eq!(axes.x_ticks.len(), 2);
    assert_abs_diff_eq!(axes.x_ticks[0].anchor.x, 220.0, epsilon = 1e-9);
    assert_abs_diff_eq!(axes.x_ticks[0].anchor.y, 378.0, epsilon = 1e-9);
    assert_eq!(axes.x_ticks[0].rotation_deg, -30.0);

    assert_eq!(axes.x_title.text, format!("x{DATE_TITLE_SUFFIX}"));
    assert_eq!(axes.y_title.text, "y");
}

#[test]
fn long_categorical_axes_decimate_labels() {
    let points = (0..30)
        .map(|i| PlotPoint::new(format!("c{i:02}").as_str(), 1.0))
        .collect();
    let geometry = build(&series(ColumnKind::Categorical, points), ChartKind::Line);
    let axes = geometry.axes.expect("axes");

    assert_eq!(axes.x_ticks.len(), 10);
    let labels: Vec<&str> = axes.x_ticks.iter().map(|t| t.label.as_str()).collect();
    assert_eq!(labels[0], "c00");
    assert_eq!(labels[1], "c03");
    assert_eq!(axes.x_title.text, "x");
}

#[test]
fn numeric_x_emits_no_x_tick_labels() {
    let geometry = build(&numeric_series(), ChartKind::Scatter);
    let axes = geometry.axes.expect("axes");
    assert!(axes.x_ticks.is_empty());
    assert_eq!(axes.y_ticks.len(), 5);
}

#[test]
fn pie_folds_tail_into_others() {
    let points = (1..=25)
        .map(|i| PlotPoint::new(format!("k{i}").as_str(), f64::from(i)))
        .collect();
    let geometry = build(&series(ColumnKind::Categorical, points), ChartKind::Pie);
    let ChartGeometry::Pie(pie) = &geometry.chart else {
        panic!("expected pie");
    };

    assert_eq!(pie.slices.len(), 21);
    assert_eq!(pie.slices[0].label, "k25");
    assert_eq!(pie.slices[19].label, "k6");
    let others = &pie.slices[20];
    assert_eq!(others.label, OTHERS_LABEL);
    assert_abs_diff_eq!(others.value, 15.0, epsilon = 1e-9);

    let total: f64 = pie.slices.iter().map(|s| s.span()).sum();
    assert_abs_diff_eq!(total, 360.0, epsilon = 1e-9);
    assert_eq!(pie.slices[1].hue, 47);
    assert_eq!(pie.slices[8].hue, 16);
}

#[test]
fn pie_geometry_uses_surface_center() {
    let geometry = build(
        &series(
            ColumnKind::Categorical,
            vec![PlotPoint::new("A", 70.0), PlotPoint::new("B", 30.0)],
        ),
        ChartKind::Pie,
    );
    let ChartGeometry::Pie(pie) = &geometry.chart else {
        panic!("expected pie");
    };

    assert_abs_diff_eq!(pie.center.x, 400.0, epsilon = 1e-9);
    assert_abs_diff_eq!(pie.center.y, 200.0, epsilon = 1e-9);
    assert_abs_diff_eq!(pie.radius, 160.0, epsilon = 1e-9);

    let mid = 36.0_f64.to_radians();
    let anchor = pie.slices[0].label_anchor;
    assert_abs_diff_eq!(anchor.x, 400.0 + 96.0 * mid.cos(), epsilon = 1e-6);
    assert_abs_diff_eq!(anchor.y, 200.0 + 96.0 * mid.sin(), epsilon = 1e-6);
    assert!(pie.slices[0].path.starts_with("M 400 200 L "));
}

#[test]
fn zero_total_pie_collapses_without_nan() {
    let geometry = build(
        &series(
            ColumnKind::Categorical,
            vec![PlotPoint::new("a", 0.0), PlotPoint::new("b", -3.0)],
        ),
        ChartKind::Pie,
    );
    let ChartGeometry::Pie(pie) = &geometry.chart else {
        panic!("expected pie");
    };

    assert_eq!(pie.total, 0.0);
    for slice in &pie.slices {
        assert!(slice.start_angle.is_finite() && slice.end_angle.is_finite());
        assert_eq!(slice.span(), 0.0);
        assert_eq!(slice.percent_label, "0%");
    }
}

#[test]
fn tuning_rejects_out_of_range_values() {
    let tuning = GeometryTuning {
        bar_width_ratio: 0.0,
        ..GeometryTuning::default()
    };
    assert!(tuning.validate().is_err());

    let tuning = GeometryTuning {
        y_tick_count: 1,
        ..GeometryTuning::default()
    };
    assert!(tuning.validate().is_err());
    assert!(GeometryTuning::default().validate().is_ok());
}
