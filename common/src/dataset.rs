use std::{fs::File, io::Read, path::Path};

use csv::{ReaderBuilder, Trim};
use eyre::{Context, Result};
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

pub const THREAD_COUNT: &str = "Thread Count";
pub const WRITE_PERCENT: &str = "Write Percent";
pub const THROUGHPUT: &str = "Throughput";

const REQUIRED_COLUMNS: &[&str] = &[THREAD_COUNT, WRITE_PERCENT, THROUGHPUT];

#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("Missing column {0:?} in header")]
    MissingColumn(&'static str),
}

/// One line of the benchmark log
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Record {
    #[serde(rename = "Thread Count")]
    pub thread_count: u32,
    #[serde(rename = "Write Percent")]
    pub write_percent: f64,
    #[serde(rename = "Throughput")]
    pub throughput: f64,
}

/// The benchmark log, rows kept in file order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    rows: Vec<Record>,
}

impl Dataset {
    pub fn new(rows: Vec<Record>) -> Self {
        Self { rows }
    }

    /// Reads a CSV log from `path`. The header must contain [`THREAD_COUNT`], [`WRITE_PERCENT`]
    /// and [`THROUGHPUT`], other columns are ignored.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).with_context(|| format!("Open dataset {}", path.display()))?;
        let dataset =
            Self::from_reader(file).with_context(|| format!("Parse dataset {}", path.display()))?;
        debug!("Loaded {} rows from {}", dataset.len(), path.display());
        Ok(dataset)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let mut reader = ReaderBuilder::new().trim(Trim::All).from_reader(reader);
        let headers = reader.headers().context("Read header row")?;
        for column in REQUIRED_COLUMNS {
            if !headers.iter().any(|header| header == *column) {
                return Err(DatasetError::MissingColumn(*column).into());
            }
        }

        let rows = reader
            .deserialize::<Record>()
            .enumerate()
            .map(|(idx, row)| row.with_context(|| format!("Parse row {}", idx + 1)))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { rows })
    }

    pub fn rows(&self) -> &[Record] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Rows whose write percent equals `write_percent` exactly, in file order
    pub fn with_write_percent(&self, write_percent: f64) -> Vec<&Record> {
        self.rows
            .iter()
            .filter(|row| row.write_percent == write_percent)
            .collect()
    }

    /// Rows whose thread count equals `thread_count`, in file order
    pub fn with_thread_count(&self, thread_count: u32) -> Vec<&Record> {
        self.rows
            .iter()
            .filter(|row| row.thread_count == thread_count)
            .collect()
    }

    /// Distinct write percents, ascending
    pub fn write_percents(&self) -> Vec<f64> {
        self.rows
            .iter()
            .map(|row| row.write_percent)
            .sorted_by(f64::total_cmp)
            .dedup()
            .collect()
    }

    /// Distinct thread counts, ascending
    pub fn thread_counts(&self) -> Vec<u32> {
        self.rows
            .iter()
            .map(|row| row.thread_count)
            .sorted_unstable()
            .dedup()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    const LOG: &str = "\
Thread Count,Write Percent,Throughput
4,0.1,120
8,0.1,95
4,0.2,80
4,0.1,130
";

    #[test]
    fn parses_rows_in_order() {
        let dataset = Dataset::from_reader(LOG.as_bytes()).unwrap();
        assert_eq!(dataset.len(), 4);
        assert_eq!(
            dataset.rows()[1],
            Record {
                thread_count: 8,
                write_percent: 0.1,
                throughput: 95.0,
            }
        );
    }

    #[test]
    fn ignores_extra_columns_and_order() {
        let log = "Throughput, Run ,Write Percent,Thread Count\n 42.5 ,a,0.05,16\n";
        let dataset = Dataset::from_reader(log.as_bytes()).unwrap();
        assert_eq!(
            dataset.rows(),
            &[Record {
                thread_count: 16,
                write_percent: 0.05,
                throughput: 42.5,
            }]
        );
    }

    #[test]
    fn missing_column_is_reported() {
        let log = "Thread Count,Throughput\n4,120\n";
        let err = Dataset::from_reader(log.as_bytes()).unwrap_err();
        match err.downcast_ref::<DatasetError>() {
            Some(DatasetError::MissingColumn(column)) => assert_eq!(*column, WRITE_PERCENT),
            None => panic!("unexpected error {err:?}"),
        }
    }

    #[test]
    fn malformed_row_fails() {
        let log = "Thread Count,Write Percent,Throughput\n4,0.1,120\nfour,0.1,95\n";
        let err = Dataset::from_reader(log.as_bytes()).unwrap_err();
        assert!(format!("{err:#}").contains("Parse row 2"));
    }

    #[test]
    fn missing_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        assert!(Dataset::load(dir.path().join("logfile.csv")).is_err());
    }

    #[test]
    fn load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(LOG.as_bytes()).unwrap();
        let dataset = Dataset::load(file.path()).unwrap();
        assert_eq!(dataset.len(), 4);
    }

    #[test]
    fn filters_keep_duplicates_in_order() {
        let dataset = Dataset::from_reader(LOG.as_bytes()).unwrap();
        let rows = dataset.with_write_percent(0.1);
        let points = rows
            .iter()
            .map(|row| (row.thread_count, row.throughput))
            .collect::<Vec<_>>();
        assert_eq!(points, vec![(4, 120.0), (8, 95.0), (4, 130.0)]);

        assert_eq!(dataset.with_thread_count(4).len(), 3);
        assert!(dataset.with_thread_count(2).is_empty());
        assert!(dataset.with_write_percent(0.99).is_empty());
    }

    #[test]
    fn distinct_values_sorted() {
        let dataset = Dataset::from_reader(LOG.as_bytes()).unwrap();
        assert_eq!(dataset.write_percents(), vec![0.1, 0.2]);
        assert_eq!(dataset.thread_counts(), vec![4, 8]);
    }
}
