use crate::chart::style::{weekly_tick_labels, TAB_GREEN, TAB_ORANGE, TAB_RED};
use crate::chart::{AxisStyle, DualAxisChart, Figure, LegendPosition, LineChart, LineSpec, TickFormat};
use crate::config::{CasesColumns, ReportConfiguration};
use crate::data::Dataset;
use crate::metrics::{ratio_percent, series_max};
use crate::report::{resolve_labels, ReportError};
use anyhow::Result;
use plotters::style::BLACK;
use std::path::PathBuf;
use tracing::debug;

pub const DAILY_CASES: &str = "cov-Casos_activos";
pub const ACCUMULATED_CASES: &str = "cov-Casos_acumulados";
pub const DAILY_DEATHS: &str = "cov-Fallecidos_diarios";
pub const SEVERITY: &str = "cov-Porcientos_respecto_casos";
pub const SAMPLES: &str = "cov-Muestras_realizadas";
pub const POSITIVITY: &str = "cov-Positividad_muestras";

//the six figures drawn from a cases file
#[derive(Debug, Clone)]
pub struct SituationCharts {
    pub daily_cases: LineChart,
    pub accumulated_cases: LineChart,
    pub daily_deaths: DualAxisChart,
    pub severity: LineChart,
    pub samples: LineChart,
    pub positivity: LineChart,
}

impl SituationCharts {
    pub fn build(dataset: &Dataset, config: &ReportConfiguration) -> Result<Self, ReportError> {
        let columns = &config.cases_columns;
        let ticks = weekly_tick_labels(dataset.dates(), 0);
        debug!(rows = dataset.row_count(), "preparing situation charts");

        Ok(SituationCharts {
            daily_cases: daily_cases(dataset, columns, config.daily_labels.as_deref(), &ticks)?,
            accumulated_cases: accumulated_cases(dataset, columns, &ticks)?,
            daily_deaths: daily_deaths(dataset, columns, config.deaths_labels.as_deref(), &ticks)?,
            severity: severity(dataset, columns, &ticks)?,
            samples: samples(dataset, columns, &ticks)?,
            positivity: positivity(dataset, columns, &ticks)?,
        })
    }

    pub fn save_all(&self, figure: &Figure) -> Result<Vec<PathBuf>> {
        Ok(vec![
            figure.save(&self.daily_cases)?,
            figure.save(&self.accumulated_cases)?,
            figure.save(&self.daily_deaths)?,
            figure.save(&self.severity)?,
            figure.save(&self.samples)?,
            figure.save(&self.positivity)?,
        ])
    }
}

fn header_labels(dataset: &Dataset, columns: &[usize]) -> Result<Vec<String>, ReportError> {
    columns
        .iter()
        .map(|&c| dataset.label(c).map(str::to_string).map_err(ReportError::from))
        .collect()
}

//daily cases with markers over the active cases line
pub fn daily_cases(
    dataset: &Dataset,
    columns: &CasesColumns,
    overrides: Option<&[String]>,
    ticks: &[String],
) -> Result<LineChart, ReportError> {
    let daily = dataset.column(columns.daily)?;
    let active = dataset.column(columns.active)?;
    let labels = resolve_labels(
        DAILY_CASES,
        overrides,
        header_labels(dataset, &[columns.daily, columns.active])?,
    )?;

    //active cases always dominate the daily count
    let y_max = series_max(&active)? as f64;

    Ok(LineChart::new(
        DAILY_CASES,
        "Casos diarios y activos",
        ticks.to_vec(),
        vec![
            LineSpec::from_counts(&labels[0], &daily, TAB_ORANGE).with_markers(),
            LineSpec::from_counts(&labels[1], &active, TAB_RED),
        ],
        AxisStyle::new(y_max, TickFormat::Thousands),
    ))
}

pub fn accumulated_cases(
    dataset: &Dataset,
    columns: &CasesColumns,
    ticks: &[String],
) -> Result<LineChart, ReportError> {
    let accumulated = dataset.column(columns.accumulated)?;
    let y_max = series_max(&accumulated)? as f64;

    Ok(LineChart::new(
        ACCUMULATED_CASES,
        "Casos acumulados",
        ticks.to_vec(),
        vec![LineSpec::from_counts(
            dataset.label(columns.accumulated)?,
            &accumulated,
            TAB_RED,
        )],
        AxisStyle::new(y_max, TickFormat::Thousands)
            .minor_divisions(2)
            .legend(None),
    ))
}

//overrides are given as [daily, accumulated]
pub fn daily_deaths(
    dataset: &Dataset,
    columns: &CasesColumns,
    overrides: Option<&[String]>,
    ticks: &[String],
) -> Result<DualAxisChart, ReportError> {
    let daily = dataset.column(columns.daily_deaths)?;
    let accumulated = dataset.column(columns.accumulated_deaths)?;
    let labels = resolve_labels(
        DAILY_DEATHS,
        overrides,
        header_labels(dataset, &[columns.daily_deaths, columns.accumulated_deaths])?,
    )?;
    let y_max = series_max(&accumulated)? as f64;

    let chart = DualAxisChart::new(
        DAILY_DEATHS,
        "Fallecidos diarios y acumulado",
        ticks.to_vec(),
        LineSpec::from_counts(&labels[1], &accumulated, TAB_RED),
        LineSpec::from_counts(&labels[0], &daily, TAB_ORANGE).with_markers(),
        AxisStyle::new(y_max, TickFormat::Thousands)
            .minor_divisions(1)
            .without_grid(),
    )?;
    Ok(chart)
}

//deaths, serious and critical cases as a share of the day's new cases
pub fn severity(
    dataset: &Dataset,
    columns: &CasesColumns,
    ticks: &[String],
) -> Result<LineChart, ReportError> {
    let daily = dataset.column(columns.daily)?;
    let plotted = [
        (columns.daily_deaths, BLACK),
        (columns.serious, TAB_ORANGE),
        (columns.critical, TAB_RED),
    ];

    let mut lines = Vec::with_capacity(plotted.len());
    let mut y_max = 0.0f64;
    for (column, color) in plotted {
        let percent = ratio_percent(&dataset.column(column)?, &daily)?;
        y_max = y_max.max(series_max(&percent)?);
        lines.push(LineSpec::new(dataset.label(column)?, percent, color));
    }

    Ok(LineChart::new(
        SEVERITY,
        "Porciento de seriedad en casos diarios",
        ticks.to_vec(),
        lines,
        AxisStyle::new(y_max, TickFormat::Percent)
            .minor_divisions(2)
            .legend(Some(LegendPosition::UpperRight)),
    ))
}

//tests performed against positive results
pub fn samples(
    dataset: &Dataset,
    columns: &CasesColumns,
    ticks: &[String],
) -> Result<LineChart, ReportError> {
    let samples = dataset.column(columns.samples)?;
    let positives = dataset.column(columns.daily)?;
    let y_max = series_max(&samples)? as f64;

    Ok(LineChart::new(
        SAMPLES,
        "Muestras realizadas y casos positivos",
        ticks.to_vec(),
        vec![
            LineSpec::from_counts(dataset.label(columns.samples)?, &samples, TAB_GREEN),
            LineSpec::from_counts(dataset.label(columns.daily)?, &positives, TAB_RED),
        ],
        AxisStyle::new(y_max, TickFormat::Thousands).minor_divisions(2),
    ))
}

pub fn positivity(
    dataset: &Dataset,
    columns: &CasesColumns,
    ticks: &[String],
) -> Result<LineChart, ReportError> {
    let percent = ratio_percent(
        &dataset.column(columns.daily)?,
        &dataset.column(columns.samples)?,
    )?;
    let y_max = series_max(&percent)?;

    Ok(LineChart::new(
        POSITIVITY,
        "Positividad de muestras",
        ticks.to_vec(),
        vec![LineSpec::new(dataset.label(columns.daily)?, percent, TAB_RED)],
        AxisStyle::new(y_max, TickFormat::Percent)
            .minor_divisions(2)
            .legend(None),
    ))
}
