//! CSV output formatter for duplicate pairs.
//!
//! One row is written per duplicate pair.
//!
//! # Columns
//!
//! - `duplicate`: Path of the redundant copy
//! - `canonical`: Path of the copy that is kept
//! - `hash`: BLAKE3 content hash (hexadecimal)
//! - `size`: File size in bytes

use std::io;

use serde::Serialize;
use thiserror::Error;

use crate::duplicates::DuplicatePair;

/// Errors that can occur during CSV output generation.
#[derive(Debug, Error)]
pub enum CsvOutputError {
    /// I/O error during writing.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Error during CSV serialization.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

#[derive(Debug, Serialize)]
struct CsvRow {
    duplicate: String,
    canonical: String,
    hash: String,
    size: u64,
}

/// CSV output formatter.
pub struct CsvOutput<'a> {
    pairs: &'a [DuplicatePair],
}

impl<'a> CsvOutput<'a> {
    /// Create a new CSV output formatter.
    #[must_use]
    pub fn new(pairs: &'a [DuplicatePair]) -> Self {
        Self { pairs }
    }

    /// Write the CSV output to the given writer.
    ///
    /// The header row is written even when there are no pairs.
    ///
    /// # Errors
    ///
    /// Returns `CsvOutputError` if writing or serialization fails.
    pub fn write_to<W: io::Write>(&self, writer: W) -> Result<(), CsvOutputError> {
        let mut csv_writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(writer);
        csv_writer.write_record(["duplicate", "canonical", "hash", "size"])?;

        for pair in self.pairs {
            csv_writer.serialize(CsvRow {
                duplicate: pair.duplicate.path.to_string_lossy().into_owned(),
                canonical: pair.canonical.path.to_string_lossy().into_owned(),
                hash: pair.hash_hex(),
                size: pair.size(),
            })?;
        }

        csv_writer.flush()?;
        Ok(())
    }

    /// Generate CSV output as a string.
    ///
    /// # Errors
    ///
    /// Returns `CsvOutputError` if serialization fails.
    pub fn to_string(&self) -> Result<String, CsvOutputError> {
        let mut buffer = Vec::new();
        self.write_to(&mut buffer)?;
        Ok(String::from_utf8_lossy(&buffer).into_owned())
    }
}
