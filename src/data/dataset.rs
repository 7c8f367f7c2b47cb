use chrono::NaiveDate;
use indexmap::IndexMap;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DatasetError {
    #[error("Data file not found: {0:?}")]
    NotFound(PathBuf),
    #[error("Failed to read {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Malformed TSV in {path:?}: {source}")]
    Tsv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
    #[error("Missing header line in {0:?}")]
    EmptyHeader(PathBuf),
    #[error("Invalid date '{token}' at line {line}")]
    InvalidDate { line: usize, token: String },
    #[error("Invalid integer '{token}' in column {column} at line {line}")]
    InvalidInteger {
        line: usize,
        column: usize,
        token: String,
    },
    #[error("Line {line} has {found} fields, header declares {expected}")]
    ColumnCountMismatch {
        line: usize,
        expected: usize,
        found: usize,
    },
    #[error("{dates} dates given for {rows} rows of values")]
    RowCountMismatch { dates: usize, rows: usize },
    #[error("Column {index} out of range (dataset has {columns} columns)")]
    ColumnOutOfRange { index: usize, columns: usize },
    #[error("Unknown column label: {0}")]
    UnknownLabel(String),
}

//parsed contents of one tab-separated data file
//rows are days, columns are tracked metrics
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    date_label: String,
    labels: Vec<String>,
    dates: Vec<NaiveDate>,
    values: Vec<Vec<i64>>,
    index: IndexMap<String, usize>,
}

impl Dataset {
    //creates a dataset, checking that every row matches the label count
    pub fn new(
        date_label: String,
        labels: Vec<String>,
        dates: Vec<NaiveDate>,
        values: Vec<Vec<i64>>,
    ) -> Result<Self, DatasetError> {
        if let Some((row, found)) = values
            .iter()
            .enumerate()
            .find(|(_, row)| row.len() != labels.len())
            .map(|(i, row)| (i, row.len()))
        {
            //header is line 1, rows start at line 2
            return Err(DatasetError::ColumnCountMismatch {
                line: row + 2,
                expected: labels.len() + 1,
                found: found + 1,
            });
        }

        if dates.len() != values.len() {
            return Err(DatasetError::RowCountMismatch {
                dates: dates.len(),
                rows: values.len(),
            });
        }

        Ok(Self::new_unchecked(date_label, labels, dates, values))
    }

    //creates a dataset without validation
    pub fn new_unchecked(
        date_label: String,
        labels: Vec<String>,
        dates: Vec<NaiveDate>,
        values: Vec<Vec<i64>>,
    ) -> Self {
        let mut index = IndexMap::with_capacity(labels.len());
        for (i, label) in labels.iter().enumerate() {
            //first occurrence wins on duplicate headers
            index.entry(label.clone()).or_insert(i);
        }

        Dataset {
            date_label,
            labels,
            dates,
            values,
            index,
        }
    }

    pub fn date_label(&self) -> &str {
        &self.date_label
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn dates(&self) -> &[NaiveDate] {
        &self.dates
    }

    pub fn rows(&self) -> &[Vec<i64>] {
        &self.values
    }

    pub fn row_count(&self) -> usize {
        self.values.len()
    }

    pub fn column_count(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    //returns the label of a metric column
    pub fn label(&self, column: usize) -> Result<&str, DatasetError> {
        self.labels
            .get(column)
            .map(String::as_str)
            .ok_or(DatasetError::ColumnOutOfRange {
                index: column,
                columns: self.labels.len(),
            })
    }

    //extracts one metric column as a series
    pub fn column(&self, column: usize) -> Result<Vec<i64>, DatasetError> {
        if column >= self.labels.len() {
            return Err(DatasetError::ColumnOutOfRange {
                index: column,
                columns: self.labels.len(),
            });
        }
        Ok(self.values.iter().map(|row| row[column]).collect())
    }

    //extracts a metric column by its header label
    pub fn column_by_label(&self, label: &str) -> Result<Vec<i64>, DatasetError> {
        let column = self
            .index
            .get(label)
            .copied()
            .ok_or_else(|| DatasetError::UnknownLabel(label.to_string()))?;
        self.column(column)
    }

    //returns a dataset restricted to the given columns, in the given order
    pub fn select(&self, columns: &[usize]) -> Result<Dataset, DatasetError> {
        let labels = columns
            .iter()
            .map(|&c| self.label(c).map(str::to_string))
            .collect::<Result<Vec<_>, _>>()?;

        let values = self
            .values
            .iter()
            .map(|row| columns.iter().map(|&c| row[c]).collect())
            .collect();

        Ok(Dataset::new_unchecked(
            self.date_label.clone(),
            labels,
            self.dates.clone(),
            values,
        ))
    }

    //returns the last `n` rows (or all of them when there are fewer)
    pub fn tail(&self, n: usize) -> Dataset {
        let start = self.values.len().saturating_sub(n);
        Dataset::new_unchecked(
            self.date_label.clone(),
            self.labels.clone(),
            self.dates[start..].to_vec(),
            self.values[start..].to_vec(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn sample() -> Dataset {
        Dataset::new(
            "Fecha".to_string(),
            vec!["Total".to_string(), "Primera".to_string()],
            vec![date("2022-01-01"), date("2022-01-02"), date("2022-01-03")],
            vec![vec![100, 50], vec![150, 80], vec![190, 95]],
        )
        .unwrap()
    }

    #[test]
    fn columns_by_index_and_label() {
        let ds = sample();
        assert_eq!(ds.column(0).unwrap(), vec![100, 150, 190]);
        assert_eq!(ds.column_by_label("Primera").unwrap(), vec![50, 80, 95]);
        assert!(matches!(
            ds.column(2),
            Err(DatasetError::ColumnOutOfRange { index: 2, columns: 2 })
        ));
        assert!(matches!(
            ds.column_by_label("Segunda"),
            Err(DatasetError::UnknownLabel(_))
        ));
    }

    #[test]
    fn rejects_ragged_rows() {
        let err = Dataset::new(
            "Fecha".to_string(),
            vec!["a".to_string(), "b".to_string()],
            vec![date("2022-01-01"), date("2022-01-02")],
            vec![vec![1, 2], vec![3]],
        )
        .unwrap_err();

        assert!(matches!(
            err,
            DatasetError::ColumnCountMismatch {
                line: 3,
                expected: 3,
                found: 2
            }
        ));
    }

    #[test]
    fn rejects_dates_without_rows() {
        let err = Dataset::new(
            "Fecha".to_string(),
            vec!["a".to_string()],
            vec![date("2022-01-01"), date("2022-01-02")],
            vec![vec![1]],
        )
        .unwrap_err();

        assert!(matches!(
            err,
            DatasetError::RowCountMismatch { dates: 2, rows: 1 }
        ));
    }

    #[test]
    fn tail_keeps_last_rows() {
        let ds = sample();
        let last = ds.tail(2);
        assert_eq!(last.row_count(), 2);
        assert_eq!(last.dates()[0], date("2022-01-02"));
        assert_eq!(ds.tail(10).row_count(), 3);
        assert_eq!(ds.tail(0).row_count(), 0);
    }

    #[test]
    fn select_reorders_columns() {
        let ds = sample().select(&[1, 0]).unwrap();
        assert_eq!(ds.labels(), &["Primera".to_string(), "Total".to_string()]);
        assert_eq!(ds.rows()[1], vec![80, 150]);
        assert!(sample().select(&[3]).is_err());
    }
}
