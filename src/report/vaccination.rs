use crate::chart::style::{weekly_tick_labels, DARK_ORANGE, TAB_BLUE, TAB_GREEN, TAB_ORANGE};
use crate::chart::{
    AreaChart, AreaSpec, AxisStyle, BarSeries, Figure, GroupedBarChart, StackedBarChart,
    TickFormat,
};
use crate::config::{ReportConfiguration, VaccinesColumns};
use crate::data::Dataset;
use crate::metrics::{daily_delta, decompose, series_max, subtract, sum_series, Decomposition};
use crate::report::{resolve_labels, ReportError};
use anyhow::Result;
use std::path::PathBuf;
use tracing::{debug, warn};

pub const ACCUMULATED_DOSES: &str = "vac-Acumulados_dosis";
pub const DAILY_DOSES: &str = "vac-Dosis_diarias";
pub const DAILY_DOSES_STACK: &str = "vac-Dosis_diarias_stack";

//doses given each day, split so that every person is counted once per day
//
//people on a single-dose scheme show up in the first-dose column and in the
//complete-scheme column, but never as a second dose. Their share is taken out
//of the first doses so the four categories add up to the doses administered.
#[derive(Debug, Clone, PartialEq)]
pub struct DailyDoses {
    pub first_only: Vec<i64>,
    pub second: Vec<i64>,
    pub third: Vec<i64>,
    pub single: Vec<i64>,
    decomposition: Decomposition,
}

impl DailyDoses {
    pub fn from_dataset(dataset: &Dataset, columns: &VaccinesColumns) -> Result<Self, ReportError> {
        let first = dataset.column(columns.first)?;
        let second = dataset.column(columns.second)?;
        let third = dataset.column(columns.third)?;
        let complete = dataset.column(columns.complete)?;

        //complete scheme minus boosters leaves the cumulative single doses
        let single_cumulative = subtract(&complete, &third)?;
        let administered = sum_series(&[first, second.clone(), third.clone()])?;
        let decomposition = decompose(
            &administered,
            &[second.as_slice(), third.as_slice(), single_cumulative.as_slice()],
        )?;

        let reported = daily_delta(&dataset.column(columns.total)?);
        if reported != decomposition.total {
            warn!(
                column = dataset.label(columns.total)?,
                "reported total differs from the sum of first, second and third doses"
            );
        }

        let doses = DailyDoses {
            first_only: decomposition.residual().to_vec(),
            second: decomposition.parts[0].clone(),
            third: decomposition.parts[1].clone(),
            single: decomposition.parts[2].clone(),
            decomposition,
        };
        debug!(days = doses.days(), "split daily doses");
        Ok(doses)
    }

    pub fn days(&self) -> usize {
        self.decomposition.days()
    }

    //sum of first, second and third dose deltas for each day
    pub fn administered(&self) -> &[i64] {
        &self.decomposition.total
    }

    pub fn ties_out(&self) -> bool {
        self.decomposition.ties_out()
    }

    //categories bottom to top, as they are stacked
    pub fn layers(&self, labels: &[String]) -> Vec<BarSeries> {
        let categories = [
            (&self.first_only, TAB_BLUE),
            (&self.second, TAB_GREEN),
            (&self.third, TAB_ORANGE),
            (&self.single, DARK_ORANGE),
        ];
        categories
            .into_iter()
            .zip(labels)
            .map(|((values, color), label)| BarSeries::new(label, values.clone(), color))
            .collect()
    }
}

//the three figures drawn from a vaccination file
#[derive(Debug, Clone)]
pub struct VaccinationCharts {
    pub accumulated: AreaChart,
    pub daily: GroupedBarChart,
    pub daily_stack: StackedBarChart,
}

impl VaccinationCharts {
    pub fn build(dataset: &Dataset, config: &ReportConfiguration) -> Result<Self, ReportError> {
        let columns = &config.vaccines_columns;
        let window = dataset.tail(config.daily_window);
        debug!(
            rows = dataset.row_count(),
            window = window.row_count(),
            "preparing vaccination charts"
        );

        Ok(VaccinationCharts {
            accumulated: accumulated_doses(dataset, columns, config.accum_labels.as_deref())?,
            daily: daily_doses(&window, columns, config.daily_labels.as_deref())?,
            daily_stack: daily_doses_stack(dataset, columns, config.daily_labels.as_deref())?,
        })
    }

    pub fn save_all(&self, figure: &Figure) -> Result<Vec<PathBuf>> {
        Ok(vec![
            figure.save(&self.accumulated)?,
            figure.save(&self.daily)?,
            figure.save(&self.daily_stack)?,
        ])
    }
}

fn dose_labels(
    chart: &'static str,
    dataset: &Dataset,
    columns: &VaccinesColumns,
    overrides: Option<&[String]>,
) -> Result<Vec<String>, ReportError> {
    let defaults = [columns.first, columns.second, columns.third, columns.complete]
        .iter()
        .map(|&c| dataset.label(c).map(str::to_string))
        .collect::<Result<Vec<_>, _>>()?;
    resolve_labels(chart, overrides, defaults)
}

//overlapping cumulative areas, widest (first doses) at the back
pub fn accumulated_doses(
    dataset: &Dataset,
    columns: &VaccinesColumns,
    overrides: Option<&[String]>,
) -> Result<AreaChart, ReportError> {
    let labels = dose_labels(ACCUMULATED_DOSES, dataset, columns, overrides)?;
    let first = dataset.column(columns.first)?;
    let y_max = series_max(&first)? as f64;

    let areas = vec![
        //first doses sit at the back, drawn with a heavier edge
        AreaSpec::from_counts(&labels[0], &first, TAB_BLUE, 10).with_edge_width(2),
        AreaSpec::from_counts(&labels[1], &dataset.column(columns.second)?, TAB_GREEN, 11),
        AreaSpec::from_counts(&labels[2], &dataset.column(columns.third)?, TAB_ORANGE, 12),
        AreaSpec::from_counts(&labels[3], &dataset.column(columns.complete)?, DARK_ORANGE, 11),
    ];

    Ok(AreaChart::new(
        ACCUMULATED_DOSES,
        "Acumulados por dosis",
        weekly_tick_labels(dataset.dates(), 0),
        areas,
        AxisStyle::new(y_max, TickFormat::Millions).y_desc("Millones"),
    ))
}

fn daily_style() -> AxisStyle {
    AxisStyle::new(0.0, TickFormat::Kilo).y_desc("Miles")
}

//side-by-side daily bars over the rows of `window`
pub fn daily_doses(
    window: &Dataset,
    columns: &VaccinesColumns,
    overrides: Option<&[String]>,
) -> Result<GroupedBarChart, ReportError> {
    let labels = dose_labels(DAILY_DOSES, window, columns, overrides)?;
    let doses = DailyDoses::from_dataset(window, columns)?;
    let title = format!(
        "Dosis diarias (Últimos {} días)",
        window.row_count().saturating_sub(1)
    );

    let chart = GroupedBarChart::new(
        DAILY_DOSES,
        &title,
        weekly_tick_labels(window.dates(), 1),
        doses.layers(&labels),
        daily_style(),
    )?;
    Ok(chart)
}

//stacked daily bars over the whole file
pub fn daily_doses_stack(
    dataset: &Dataset,
    columns: &VaccinesColumns,
    overrides: Option<&[String]>,
) -> Result<StackedBarChart, ReportError> {
    let labels = dose_labels(DAILY_DOSES_STACK, dataset, columns, overrides)?;
    let doses = DailyDoses::from_dataset(dataset, columns)?;

    let chart = StackedBarChart::new(
        DAILY_DOSES_STACK,
        "Dosis diarias",
        weekly_tick_labels(dataset.dates(), 1),
        doses.layers(&labels),
        daily_style(),
    )?;
    Ok(chart)
}
