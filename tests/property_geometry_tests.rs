use proptest::prelude::*;
use tabviz::core::{
    ChartGeometry, ChartKind, ChartScales, ColumnKind, GeometryTuning, PlotArea, PlotPoint,
    Selection, Series, build_geometry, decimation_step,
};

const EPS: f64 = 1e-7;

fn categorical(values: &[f64]) -> Series {
    Series {
        x_kind: ColumnKind::Categorical,
        y_numeric: true,
        points: values
            .iter()
            .enumerate()
            .map(|(index, value)| PlotPoint::new(format!("c{index:03}").as_str(), *value))
            .collect(),
    }
}

fn numeric(points: &[(f64, f64)]) -> Series {
    Series {
        x_kind: ColumnKind::Numeric,
        y_numeric: true,
        points: points.iter().map(|(x, y)| PlotPoint::new(*x, *y)).collect(),
    }
}

fn geometry(series: &Series, kind: ChartKind) -> ChartGeometry {
    let area = PlotArea::default();
    let scales = ChartScales::from_series(series, area);
    build_geometry(
        series,
        kind,
        &scales,
        &Selection::new("x", "y"),
        GeometryTuning::default(),
    )
    .chart
}

fn inside_plot(x: f64, y: f64) -> bool {
    let area = PlotArea::default();
    x >= area.left() - EPS && x <= area.right() + EPS && y >= area.top() - EPS && y <= area.bottom() + EPS
}

proptest! {
    #[test]
    fn bars_stay_inside_plot_rectangle(
        values in prop::collection::vec(-10_000.0f64..10_000.0, 1..40)
    ) {
        let ChartGeometry::Bar { bars } = geometry(&categorical(&values), ChartKind::Bar) else {
            panic!("expected bars");
        };
        prop_assert_eq!(bars.len(), values.len());
        for bar in &bars {
            prop_assert!(bar.width >= 0.0 && bar.height >= 0.0);
            prop_assert!(inside_plot(bar.x, bar.y));
            prop_assert!(inside_plot(bar.x + bar.width, bar.y + bar.height));
        }
    }

    #[test]
    fn line_and_scatter_markers_stay_inside_plot(
        points in prop::collection::vec((-1_000.0f64..1_000.0, -1_000.0f64..1_000.0), 1..40)
    ) {
        let series = numeric(&points);
        let ChartGeometry::Line(line) = geometry(&series, ChartKind::Line) else {
            panic!("expected line");
        };
        prop_assert_eq!(line.path.vertices.len(), points.len());
        prop_assert!(line.path.vertices.iter().all(|v| inside_plot(v.x, v.y)));

        let ChartGeometry::Scatter(scatter) = geometry(&series, ChartKind::Scatter) else {
            panic!("expected scatter");
        };
        prop_assert!(scatter.markers.iter().all(|m| inside_plot(m.cx, m.cy)));
    }

    #[test]
    fn positive_pie_slices_cover_full_turn(
        values in prop::collection::vec(0.001f64..1_000.0, 1..60)
    ) {
        let ChartGeometry::Pie(pie) = geometry(&categorical(&values), ChartKind::Pie) else {
            panic!("expected pie");
        };
        prop_assert!(pie.slices.len() <= 21);
        prop_assert!((pie.slices[0].start_angle + 90.0).abs() <= EPS);

        let total_span: f64 = pie.slices.iter().map(|slice| slice.span()).sum();
        prop_assert!((total_span - 360.0).abs() <= 1e-6);
        for pair in pie.slices.windows(2) {
            prop_assert!((pair[0].end_angle - pair[1].start_angle).abs() <= EPS);
        }
    }

    #[test]
    fn decimation_never_exceeds_label_budget(count in 0usize..5_000, budget in 1usize..40) {
        let step = decimation_step(count, budget);
        prop_assert!(step >= 1);
        prop_assert!(count.div_ceil(step) <= budget.max(1));
    }
}
