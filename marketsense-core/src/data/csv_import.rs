//! CSV import: `Date,Open,High,Low,Close,Volume` with a header row.
//!
//! Header names are matched in either capitalized or lowercase form. Extra
//! columns are ignored.

use chrono::NaiveDate;
use serde::Deserialize;
use std::io::Read;
use std::path::Path;

use super::{canonicalize, DataError};
use crate::domain::PricePoint;

#[derive(Debug, Deserialize)]
struct CsvRow {
    #[serde(rename = "Date", alias = "date")]
    date: NaiveDate,
    #[serde(rename = "Open", alias = "open")]
    open: f64,
    #[serde(rename = "High", alias = "high")]
    high: f64,
    #[serde(rename = "Low", alias = "low")]
    low: f64,
    #[serde(rename = "Close", alias = "close")]
    close: f64,
    #[serde(rename = "Volume", alias = "volume")]
    volume: u64,
}

impl From<CsvRow> for PricePoint {
    fn from(row: CsvRow) -> Self {
        PricePoint {
            date: row.date,
            open: row.open,
            high: row.high,
            low: row.low,
            close: row.close,
            volume: row.volume,
        }
    }
}

/// Read a CSV series from any reader and canonicalize it.
pub fn read_csv<R: Read>(reader: R) -> Result<Vec<PricePoint>, DataError> {
    let mut rdr = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
    let points = rdr
        .deserialize::<CsvRow>()
        .map(|row| row.map(PricePoint::from))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(canonicalize(points).points)
}

/// Load a CSV series from disk.
pub fn load_csv(path: &Path) -> Result<Vec<PricePoint>, DataError> {
    let file = std::fs::File::open(path).map_err(|source| DataError::Io {
        path: path.display().to_string(),
        source,
    })?;
    read_csv(file)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_capitalized_headers() {
        let data = "\
Date,Open,High,Low,Close,Volume
2024-01-03,101,103,100,102.5,1200
2024-01-02,100,102,99,101,1000
";
        let points = read_csv(data.as_bytes()).unwrap();
        assert_eq!(points.len(), 2);
        assert_eq!(points[0].date, NaiveDate::from_ymd_opt(2024, 1, 2).unwrap());
        assert_eq!(points[1].close, 102.5);
        assert_eq!(points[1].volume, 1200);
    }

    #[test]
    fn reads_lowercase_headers_and_ignores_extra_columns() {
        let data = "\
date,open,high,low,close,adj_close,volume
2024-01-02, 100, 102, 99, 101, 100.5, 1000
";
        let points = read_csv(data.as_bytes()).unwrap();
        assert_eq!(points.len(), 1);
        assert_eq!(points[0].close, 101.0);
    }

    #[test]
    fn bad_row_is_csv_error() {
        let data = "Date,Open,High,Low,Close,Volume\n2024-01-02,x,1,1,1,1\n";
        assert!(matches!(read_csv(data.as_bytes()), Err(DataError::Csv(_))));
    }

    #[test]
    fn header_only_is_empty() {
        let data = "Date,Open,High,Low,Close,Volume\n";
        assert!(read_csv(data.as_bytes()).unwrap().is_empty());
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = load_csv(Path::new("/nonexistent/prices.csv")).unwrap_err();
        assert!(matches!(err, DataError::Io { .. }));
    }
}
