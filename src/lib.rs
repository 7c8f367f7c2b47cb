//charts of epidemiological time series read from tab-separated files

pub mod chart;
pub mod config;
pub mod data;
pub mod metrics;
pub mod report;

//prelude module for convenient imports
pub mod prelude {
    pub use crate::chart::{
        AreaChart, AreaSpec, AxisStyle, BarSeries, Chart, DualAxisChart, Figure, GroupedBarChart,
        LegendPosition, LineChart, LineSpec, StackedBarChart, TickFormat,
    };
    pub use crate::config::{
        CasesColumns, FigureSize, OutputFormat, ReportConfiguration, ReportKind, VaccinesColumns,
    };
    pub use crate::data::{load_tsv, read_tsv, Dataset, DatasetError};
    pub use crate::metrics::{
        daily_delta, decompose, ratio_percent, round_to_magnitude, series_max, DatasetSummary,
        Decomposition, SeriesError,
    };
    pub use crate::report::{
        run_report, DailyDoses, ReportError, SituationCharts, VaccinationCharts,
    };
}
