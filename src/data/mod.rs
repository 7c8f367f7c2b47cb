pub mod dataset;
pub mod loader;

pub use dataset::{Dataset, DatasetError};
pub use loader::{load_tsv, read_tsv};
