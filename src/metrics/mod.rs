pub mod summary;
pub mod timeseries;

pub use summary::{ColumnSummary, DatasetSummary};
pub use timeseries::{
    cumulative_reconstruction, daily_delta, decompose, ratio_percent, round_to_decimals,
    round_to_magnitude, series_max, subtract, sum_series, Decomposition, SeriesError,
};
