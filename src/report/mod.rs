//reports wire a loaded dataset to the charts drawn from it

pub mod situation;
pub mod vaccination;

pub use situation::SituationCharts;
pub use vaccination::{DailyDoses, VaccinationCharts};

use crate::chart::Figure;
use crate::config::{ReportConfiguration, ReportKind};
use crate::data::{load_tsv, DatasetError};
use crate::metrics::SeriesError;
use anyhow::{Context, Result};
use std::path::PathBuf;
use thiserror::Error;
use tracing::info;

#[derive(Error, Debug)]
pub enum ReportError {
    #[error(transparent)]
    Dataset(#[from] DatasetError),
    #[error(transparent)]
    Series(#[from] SeriesError),
    #[error("{chart}: expected {expected} labels, got {found}")]
    LabelCountMismatch {
        chart: &'static str,
        expected: usize,
        found: usize,
    },
}

//picks the override labels when given, checking they cover every series
pub(crate) fn resolve_labels(
    chart: &'static str,
    overrides: Option<&[String]>,
    defaults: Vec<String>,
) -> Result<Vec<String>, ReportError> {
    match overrides {
        Some(labels) if labels.len() != defaults.len() => Err(ReportError::LabelCountMismatch {
            chart,
            expected: defaults.len(),
            found: labels.len(),
        }),
        Some(labels) => Ok(labels.to_vec()),
        None => Ok(defaults),
    }
}

//loads the configured data file and renders every chart of its report
pub fn run_report(config: &ReportConfiguration) -> Result<Vec<PathBuf>> {
    let dataset = load_tsv(&config.data_path)
        .with_context(|| format!("Failed to load data from {:?}", config.data_path))?;

    let figure = Figure::new(&config.output_dir, config.size, config.format);

    let paths = match config.kind {
        ReportKind::Situation => SituationCharts::build(&dataset, config)
            .context("Failed to prepare situation charts")?
            .save_all(&figure)?,
        ReportKind::Vaccination => VaccinationCharts::build(&dataset, config)
            .context("Failed to prepare vaccination charts")?
            .save_all(&figure)?,
    };

    info!(kind = ?config.kind, figures = paths.len(), "report complete");
    Ok(paths)
}
