pub mod axis_ticks;
pub mod bar_series;
pub mod classify;
pub mod geometry;
pub mod line_series;
pub mod pie_series;
pub mod scale;
pub mod series;
pub mod table;
pub mod types;
pub mod value;

pub use axis_ticks::{AxisGeometry, AxisTick, decimation_step, format_compact};
pub use bar_series::BarRect;
pub use classify::{AxisKinds, ClassifierTuning, DatePriority, classify, classify_axes};
pub use geometry::{
    ChartGeometry, GeometryPrimitives, GeometryTuning, Marker, Vertex, build_geometry,
};
pub use line_series::{AreaGeometry, LineGeometry, LinePath, ScatterGeometry};
pub use pie_series::{PieGeometry, PieSlice};
pub use scale::{BandScale, ChartScales, LinearScale, SeriesDomains, XScale, compute_domains};
pub use series::build_series;
pub use table::{TableView, build_table};
pub use types::{ChartKind, ColumnKind, Domain, PlotArea, PlotPoint, PlotX, Selection, Series};
pub use value::{Row, Scalar};
