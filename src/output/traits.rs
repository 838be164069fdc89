//! Output sink trait
//!
//! The sink is an external collaborator from the crawler's point of view:
//! it appends records to a tabular output in discovery order.

use crate::record::MovieRecord;
use crate::Result;

/// Append-only tabular record sink
pub trait RecordSink {
    /// Appends one record
    fn append(&mut self, record: &MovieRecord) -> Result<()>;

    /// Flushes buffered output; must be called once after the last append
    fn finish(&mut self) -> Result<()>;
}
