use crate::data::dataset::{Dataset, DatasetError};
use chrono::NaiveDate;
use csv::{ReaderBuilder, StringRecord, Trim};
use std::fs::File;
use std::io::{ErrorKind, Read};
use std::path::Path;
use tracing::{debug, info};

//loads a dataset from a tab-separated file
//line 1 holds the labels, every other non-blank line is `date\tint\tint...`
pub fn load_tsv<P: AsRef<Path>>(path: P) -> Result<Dataset, DatasetError> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| match source.kind() {
        ErrorKind::NotFound => DatasetError::NotFound(path.to_path_buf()),
        _ => DatasetError::Io {
            path: path.to_path_buf(),
            source,
        },
    })?;

    let dataset = read_tsv(file, path)?;
    info!(
        path = %path.display(),
        rows = dataset.row_count(),
        columns = dataset.column_count(),
        "loaded dataset"
    );
    Ok(dataset)
}

//parses tab-separated data from any reader, `origin` is only used in errors
pub fn read_tsv<R: Read>(source: R, origin: &Path) -> Result<Dataset, DatasetError> {
    let tsv_error = |source: csv::Error| DatasetError::Tsv {
        path: origin.to_path_buf(),
        source,
    };

    let mut reader = ReaderBuilder::new()
        .delimiter(b'\t')
        .has_headers(true)
        .flexible(true)
        .quoting(false)
        .trim(Trim::All)
        .from_reader(source);

    let header = reader.headers().map_err(tsv_error)?.clone();
    let header = fields(&header);
    if header.is_empty() {
        return Err(DatasetError::EmptyHeader(origin.to_path_buf()));
    }

    let mut labels_iter = header.iter().map(|f| f.to_string());
    let date_label = labels_iter.next().unwrap_or_default();
    let labels: Vec<String> = labels_iter.collect();

    let mut dates = Vec::new();
    let mut values = Vec::new();

    for (index, result) in reader.records().enumerate() {
        let record = result.map_err(tsv_error)?;
        let line = record
            .position()
            .map(|p| p.line() as usize)
            .unwrap_or(index + 2);

        //whitespace-only lines collapse to no fields at all
        let record = fields(&record);
        if record.is_empty() {
            debug!(line, "skipping blank line");
            continue;
        }

        let (date, row) = parse_record(&record, line, header.len())?;
        dates.push(date);
        values.push(row);
    }

    Dataset::new(date_label, labels, dates, values)
}

//fields of a record with trailing empty ones dropped, so a line ending in a tab
//reads the same as one without it
fn fields(record: &StringRecord) -> Vec<&str> {
    let mut fields: Vec<&str> = record.iter().collect();
    while fields.last().is_some_and(|f| f.is_empty()) {
        fields.pop();
    }
    fields
}

fn parse_record(
    record: &[&str],
    line: usize,
    expected: usize,
) -> Result<(NaiveDate, Vec<i64>), DatasetError> {
    if record.len() != expected {
        return Err(DatasetError::ColumnCountMismatch {
            line,
            expected,
            found: record.len(),
        });
    }

    let token = record.first().copied().unwrap_or_default();
    let date = token
        .parse::<NaiveDate>()
        .map_err(|_| DatasetError::InvalidDate {
            line,
            token: token.to_string(),
        })?;

    let row = record
        .iter()
        .enumerate()
        .skip(1)
        .map(|(column, token)| {
            token
                .parse::<i64>()
                .map_err(|_| DatasetError::InvalidInteger {
                    line,
                    column,
                    token: token.to_string(),
                })
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok((date, row))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(text: &str) -> Result<Dataset, DatasetError> {
        read_tsv(text.as_bytes(), Path::new("inline.txt"))
    }

    #[test]
    fn parses_header_dates_and_values() {
        let ds = parse("Fecha\tTotal\tPrimera\n2022-01-01\t100\t50\n2022-01-02\t150\t80\n")
            .unwrap();

        assert_eq!(ds.date_label(), "Fecha");
        assert_eq!(ds.labels(), &["Total".to_string(), "Primera".to_string()]);
        assert_eq!(ds.dates().len(), ds.row_count());
        assert_eq!(ds.rows(), &[vec![100, 50], vec![150, 80]]);
    }

    #[test]
    fn skips_blank_and_whitespace_lines() {
        let ds = parse("Fecha\tA\n\n2022-01-01\t1\n   \n2022-01-02\t2\n\n").unwrap();
        assert_eq!(ds.row_count(), 2);
        assert_eq!(ds.column(0).unwrap(), vec![1, 2]);
    }

    #[test]
    fn header_only_file_is_empty_dataset() {
        let ds = parse("Fecha\tA\tB\n").unwrap();
        assert!(ds.is_empty());
        assert_eq!(ds.column_count(), 2);
        assert_eq!(ds.column(1).unwrap(), Vec::<i64>::new());
    }

    #[test]
    fn rejects_out_of_range_month() {
        let err = parse("Fecha\tA\n2022-13-01\t5\n").unwrap_err();
        match err {
            DatasetError::InvalidDate { line, token } => {
                assert_eq!(line, 2);
                assert_eq!(token, "2022-13-01");
            }
            other => panic!("expected InvalidDate, got {other:?}"),
        }
    }

    #[test]
    fn rejects_non_integer_field() {
        let err = parse("Fecha\tA\tB\n2022-01-01\t5\t7.5\n").unwrap_err();
        assert!(matches!(
            err,
            DatasetError::InvalidInteger { line: 2, column: 2, .. }
        ));
    }

    #[test]
    fn rejects_short_rows() {
        let err = parse("Fecha\tA\tB\n2022-01-01\t5\t6\n2022-01-02\t7\n").unwrap_err();
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
    fn trailing_tab_on_rows_is_ignored() {
        let ds = parse("Fecha\tA\tB\n2022-01-01\t1\t2\t\n2022-01-02\t3\t4\n").unwrap();
        assert_eq!(ds.rows(), &[vec![1, 2], vec![3, 4]]);
    }

    #[test]
    fn trailing_tab_on_header_and_rows_is_ignored() {
        let ds = parse("Fecha\tA\tB\t\n2022-01-01\t1\t2\t\n").unwrap();
        assert_eq!(ds.labels(), &["A".to_string(), "B".to_string()]);
        assert_eq!(ds.rows(), &[vec![1, 2]]);
    }

    #[test]
    fn empty_input_has_no_header() {
        assert!(matches!(parse(""), Err(DatasetError::EmptyHeader(_))));
    }

    #[test]
    fn missing_file_is_not_found() {
        let err = load_tsv("/definitely/not/here.txt").unwrap_err();
        assert!(matches!(err, DatasetError::NotFound(_)));
    }
}
