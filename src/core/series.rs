use std::cmp::Ordering;

use indexmap::IndexMap;
use ordered_float::OrderedFloat;
use tracing::{debug, warn};

use crate::core::types::{ColumnKind, PlotPoint, PlotX, Selection, Series};
use crate::core::value::{Row, Scalar, year_bucket};

/// Grouping key for aggregated X values.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
enum BucketKey {
    Number(OrderedFloat<f64>),
    Text(String),
}

#[derive(Debug, Clone, Copy, Default)]
struct Bucket {
    sum: f64,
    count: usize,
}

/// Converts rows into an ordered series of plot points.
///
/// Numeric X maps one row to one point in input order. Date X is bucketed by
/// calendar year and categorical X by raw value; buckets emit the Y sum when
/// Y is numeric and the row count otherwise.
#[must_use]
pub fn build_series(
    rows: &[Row],
    selection: &Selection,
    x_kind: ColumnKind,
    y_numeric: bool,
) -> Series {
    if !selection.is_complete() {
        return Series::empty(x_kind, y_numeric);
    }

    let points = match x_kind {
        ColumnKind::Numeric => map_numeric_rows(rows, selection, y_numeric),
        ColumnKind::Date | ColumnKind::Categorical => {
            aggregate_rows(rows, selection, x_kind, y_numeric)
        }
    };

    debug!(
        rows = rows.len(),
        points = points.len(),
        ?x_kind,
        y_numeric,
        "built series"
    );

    Series {
        x_kind,
        y_numeric,
        points,
    }
}

fn cell<'a>(row: &'a Row, column: &str) -> &'a Scalar {
    row.get(column).unwrap_or(&Scalar::Null)
}

fn y_weight(row: &Row, column: &str, y_numeric: bool) -> Option<f64> {
    if y_numeric {
        cell(row, column).as_number().filter(|value| value.is_finite())
    } else {
        Some(1.0)
    }
}

fn map_numeric_rows(rows: &[Row], selection: &Selection, y_numeric: bool) -> Vec<PlotPoint> {
    rows.iter()
        .filter_map(|row| {
            let x = cell(row, &selection.x)
                .as_number()
                .filter(|value| value.is_finite())?;
            let y = y_weight(row, &selection.y, y_numeric)?;
            Some(PlotPoint::new(x, y))
        })
        .collect()
}

fn bucket_key(cell: &Scalar, x_kind: ColumnKind) -> Option<BucketKey> {
    if x_kind == ColumnKind::Date {
        return year_bucket(cell).map(BucketKey::Text);
    }

    match cell {
        Scalar::Null => None,
        Scalar::Number(value) => Some(BucketKey::Number(OrderedFloat(*value))),
        Scalar::Bool(_) | Scalar::Text(_) => Some(BucketKey::Text(cell.display())),
    }
}

fn aggregate_rows(
    rows: &[Row],
    selection: &Selection,
    x_kind: ColumnKind,
    y_numeric: bool,
) -> Vec<PlotPoint> {
    let mut buckets: IndexMap<BucketKey, Bucket> = IndexMap::new();
    for row in rows {
        let Some(key) = bucket_key(cell(row, &selection.x), x_kind) else {
            continue;
        };
        let Some(weight) = y_weight(row, &selection.y, y_numeric) else {
            continue;
        };
        let bucket = buckets.entry(key).or_default();
        bucket.sum += weight;
        bucket.count += 1;
    }

    let mut entries: Vec<(BucketKey, Bucket)> = buckets.into_iter().collect();
    sort_buckets(&mut entries, x_kind);

    entries
        .into_iter()
        .filter_map(|(key, bucket)| {
            let y = if y_numeric {
                bucket.sum
            } else {
                bucket.count as f64
            };
            if !y.is_finite() {
                warn!(key = ?key, "dropping bucket whose sum overflows f64");
                return None;
            }
            let x = match key {
                BucketKey::Number(value) => PlotX::Number(value.into_inner()),
                BucketKey::Text(label) => PlotX::Label(label),
            };
            Some(PlotPoint { x, y })
        })
        .collect()
}

/// Year labels and pure text keys sort lexicographically, pure numeric keys
/// ascending; mixed keys keep first-seen order.
fn sort_buckets(entries: &mut [(BucketKey, Bucket)], x_kind: ColumnKind) {
    let all_numeric = entries
        .iter()
        .all(|(key, _)| matches!(key, BucketKey::Number(_)));
    let all_text = entries
        .iter()
        .all(|(key, _)| matches!(key, BucketKey::Text(_)));

    if x_kind == ColumnKind::Date || all_text {
        entries.sort_by(|(a, _), (b, _)| compare_text(a, b));
    } else if all_numeric {
        entries.sort_by(|(a, _), (b, _)| compare_numeric(a, b));
    }
}

fn compare_text(a: &BucketKey, b: &BucketKey) -> Ordering {
    match (a, b) {
        (BucketKey::Text(a), BucketKey::Text(b)) => a.cmp(b),
        _ => Ordering::Equal,
    }
}

fn compare_numeric(a: &BucketKey, b: &BucketKey) -> Ordering {
    match (a, b) {
        (BucketKey::Number(a), BucketKey::Number(b)) => a.cmp(b),
        _ => Ordering::Equal,
    }
}
