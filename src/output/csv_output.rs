//! CSV record sink
//!
//! Writes the fixed header row `name,image_url,rating,genre,detail_url`
//! followed by one row per record in discovery order. Empty fields are
//! written as empty strings; the file is UTF-8 throughout, so non-ASCII
//! content round-trips unchanged.

use crate::output::traits::RecordSink;
use crate::record::MovieRecord;
use crate::Result;
use std::fs::File;
use std::path::Path;

/// CSV-backed implementation of [`RecordSink`]
pub struct CsvSink {
    writer: csv::Writer<File>,
}

impl CsvSink {
    /// Creates the output file, truncating any existing content
    ///
    /// The header row is written on the first append, derived from the
    /// record's field names.
    pub fn create(path: &Path) -> Result<Self> {
        let writer = csv::Writer::from_path(path)?;
        Ok(Self { writer })
    }
}

impl RecordSink for CsvSink {
    fn append(&mut self, record: &MovieRecord) -> Result<()> {
        self.writer.serialize(record)?;
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}

/// Reads records back from a CSV file written by [`CsvSink`]
///
/// Used by the round-trip tests and by anything post-processing a finished
/// run's output.
pub fn read_records(path: &Path) -> Result<Vec<MovieRecord>> {
    let mut reader = csv::Reader::from_path(path)?;
    let mut records = Vec::new();
    for row in reader.deserialize() {
        records.push(row?);
    }
    Ok(records)
}
