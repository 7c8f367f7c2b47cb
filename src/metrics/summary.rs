use crate::data::{Dataset, DatasetError};
use crate::metrics::timeseries::daily_delta;
use chrono::NaiveDate;
use prettytable::{Cell, Row, Table};
use serde::{Deserialize, Serialize};
use statrs::statistics::Statistics;

//headline numbers for one metric column
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ColumnSummary {
    pub label: String,
    pub last_value: Option<i64>,
    pub total_change: i64,
    pub peak_daily: Option<i64>,
    pub peak_date: Option<NaiveDate>,
    pub mean_daily: f64,
    pub std_dev_daily: f64,
}

//summary of a whole dataset, one entry per metric column
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatasetSummary {
    pub first_date: Option<NaiveDate>,
    pub last_date: Option<NaiveDate>,
    pub days: usize,
    pub columns: Vec<ColumnSummary>,
}

impl DatasetSummary {
    //computes per-column statistics over the daily deltas
    pub fn from_dataset(dataset: &Dataset) -> Result<Self, DatasetError> {
        let columns = (0..dataset.column_count())
            .map(|c| {
                let values = dataset.column(c)?;
                Ok(summarize_column(
                    dataset.label(c)?,
                    &values,
                    dataset.dates(),
                ))
            })
            .collect::<Result<Vec<_>, DatasetError>>()?;

        Ok(DatasetSummary {
            first_date: dataset.dates().first().copied(),
            last_date: dataset.dates().last().copied(),
            days: dataset.row_count(),
            columns,
        })
    }

    //prints the summary as a table
    pub fn pretty_print_table(&self) {
        let mut table = Table::new();

        table.add_row(Row::new(vec![
            Cell::new("Column"),
            Cell::new("Last"),
            Cell::new("Change"),
            Cell::new("Peak daily"),
            Cell::new("Peak date"),
            Cell::new("Mean daily"),
            Cell::new("Std dev"),
        ]));

        for column in &self.columns {
            table.add_row(Row::new(vec![
                Cell::new(&column.label),
                Cell::new(&optional(column.last_value)),
                Cell::new(&format!("{}", column.total_change)),
                Cell::new(&optional(column.peak_daily)),
                Cell::new(&optional(column.peak_date)),
                Cell::new(&format!("{:.1}", column.mean_daily)),
                Cell::new(&format!("{:.1}", column.std_dev_daily)),
            ]));
        }

        table.printstd();
    }
}

fn summarize_column(label: &str, values: &[i64], dates: &[NaiveDate]) -> ColumnSummary {
    let deltas = daily_delta(values);

    //first peak wins on ties; delta i belongs to day i + 1
    let peak = deltas
        .iter()
        .enumerate()
        .fold(None, |best: Option<(usize, i64)>, (i, &d)| match best {
            Some((_, max)) if max >= d => best,
            _ => Some((i, d)),
        });

    let as_f64: Vec<f64> = deltas.iter().map(|&d| d as f64).collect();
    let (mean_daily, std_dev_daily) = match as_f64.len() {
        0 => (0.0, 0.0),
        1 => (as_f64[0], 0.0),
        _ => ((&as_f64).mean(), (&as_f64).std_dev()),
    };

    ColumnSummary {
        label: label.to_string(),
        last_value: values.last().copied(),
        total_change: match (values.first(), values.last()) {
            (Some(first), Some(last)) => last - first,
            _ => 0,
        },
        peak_daily: peak.map(|(_, d)| d),
        peak_date: peak.and_then(|(i, _)| dates.get(i + 1).copied()),
        mean_daily,
        std_dev_daily,
    }
}

fn optional<T: std::fmt::Display>(value: Option<T>) -> String {
    value.map(|v| v.to_string()).unwrap_or_else(|| "-".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::read_tsv;
    use std::path::Path;

    #[test]
    fn summarizes_daily_changes() {
        let ds = read_tsv(
            "Fecha\tCasos\n2022-01-01\t10\n2022-01-02\t14\n2022-01-03\t22\n2022-01-04\t24\n"
                .as_bytes(),
            Path::new("inline.txt"),
        )
        .unwrap();

        let summary = DatasetSummary::from_dataset(&ds).unwrap();
        assert_eq!(summary.days, 4);

        let col = &summary.columns[0];
        assert_eq!(col.last_value, Some(24));
        assert_eq!(col.total_change, 14);
        assert_eq!(col.peak_daily, Some(8));
        assert_eq!(col.peak_date, NaiveDate::from_ymd_opt(2022, 1, 3));
        assert!((col.mean_daily - 14.0 / 3.0).abs() < 1e-9);
        assert!((col.std_dev_daily - 3.055_050_463).abs() < 1e-6);
    }

    #[test]
    fn empty_dataset_summary_has_no_peaks() {
        let ds = read_tsv("Fecha\tA\tB\n".as_bytes(), Path::new("inline.txt")).unwrap();
        let summary = DatasetSummary::from_dataset(&ds).unwrap();

        assert_eq!(summary.days, 0);
        assert_eq!(summary.first_date, None);
        assert_eq!(summary.columns.len(), 2);
        assert_eq!(summary.columns[0].peak_daily, None);
        assert_eq!(summary.columns[0].last_value, None);
    }
}
