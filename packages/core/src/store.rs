//! Persisted fee table.
//!
//! Fees are written to a CSV file with the header `height,reward_fees`, one
//! row per block, the fee expressed in BTC with 8 decimal places. The writer
//! flushes after every row so a run killed halfway through still leaves a
//! loadable table behind.
//!
//! The readers skip the header row and fail on the first malformed data
//! row, reporting its 1-based line number.

use std::fs::File;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::height::BlockHeight;

/// Column names of the fee table, in order.
pub const HEADER: [&str; 2] = ["height", "reward_fees"];

/// Satoshis per BTC.
pub const SATS_PER_BTC: f64 = 100_000_000.0;

/// Fee paid in one block. Created once per successful fetch, never changed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeeRecord {
    pub height: BlockHeight,
    pub fee_sats: f64,
}

impl FeeRecord {
    pub fn new(height: BlockHeight, fee_sats: f64) -> Self {
        Self { height, fee_sats }
    }

    pub fn fee_btc(&self) -> f64 {
        self.fee_sats / SATS_PER_BTC
    }
}

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("cannot create {}: {source}", path.display())]
    FileCreation {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot open {}: {source}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("failed to write row: {0}")]
    Write(#[from] csv::Error),

    #[error("failed to flush fee table: {0}")]
    Flush(#[from] std::io::Error),

    #[error("unexpected header {found:?}, expected \"height,reward_fees\"")]
    UnexpectedHeader { found: String },

    #[error("malformed row at line {line}: {message}")]
    MalformedRow { line: usize, message: String },
}

/// Append-only writer for the fee table.
///
/// Creating the writer truncates any existing file. Buffered data is also
/// flushed when the writer is dropped, so early returns do not lose rows.
pub struct FeeTableWriter {
    writer: csv::Writer<File>,
    rows: usize,
}

impl FeeTableWriter {
    /// Create (or truncate) `path` and write the header row.
    pub fn create(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref().to_path_buf();
        let file = File::create(&path).map_err(|source| StoreError::FileCreation {
            path: path.clone(),
            source,
        })?;

        let mut writer = csv::Writer::from_writer(file);
        writer.write_record(HEADER)?;
        writer.flush()?;

        Ok(Self { writer, rows: 0 })
    }

    /// Append one record and flush it to disk.
    pub fn append(&mut self, record: &FeeRecord) -> Result<(), StoreError> {
        let height = record.height.to_string();
        let fee = format!("{:.8}", record.fee_btc());
        self.writer.write_record([height.as_str(), fee.as_str()])?;
        self.writer.flush()?;
        self.rows += 1;
        Ok(())
    }

    /// Data rows written so far, header excluded.
    pub fn rows_written(&self) -> usize {
        self.rows
    }

    /// Flush and close the file, returning the number of data rows written.
    pub fn finish(mut self) -> Result<usize, StoreError> {
        self.writer.flush()?;
        Ok(self.rows)
    }
}

#[derive(Debug, Deserialize)]
struct FeeRow {
    height: u64,
    reward_fees: f64,
}

fn read_rows(path: &Path) -> Result<Vec<FeeRow>, StoreError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_path(path)
        .map_err(|source| StoreError::Open {
            path: path.to_path_buf(),
            source,
        })?;

    let headers = reader
        .headers()
        .map_err(|err| StoreError::MalformedRow {
            line: 1,
            message: err.to_string(),
        })?
        .clone();

    if headers.iter().ne(HEADER.iter().copied()) {
        return Err(StoreError::UnexpectedHeader {
            found: headers.iter().collect::<Vec<_>>().join(","),
        });
    }

    let mut rows = Vec::new();
    for (idx, result) in reader.deserialize::<FeeRow>().enumerate() {
        // records start on line 2, after the header
        let row = result.map_err(|err| StoreError::MalformedRow {
            line: idx + 2,
            message: err.to_string(),
        })?;
        rows.push(row);
    }

    Ok(rows)
}

/// Read every record back, in file order.
pub fn read_records(path: impl AsRef<Path>) -> Result<Vec<FeeRecord>, StoreError> {
    Ok(read_rows(path.as_ref())?
        .into_iter()
        .map(|row| FeeRecord {
            height: BlockHeight(row.height),
            fee_sats: (row.reward_fees * SATS_PER_BTC).round(),
        })
        .collect())
}

/// Read the `reward_fees` column (BTC) as a sample series, in file order.
pub fn read_samples(path: impl AsRef<Path>) -> Result<Vec<f64>, StoreError> {
    Ok(read_rows(path.as_ref())?
        .into_iter()
        .map(|row| row.reward_fees)
        .collect())
}
