//! Output module
//!
//! The CSV record sink and the run summary.

mod csv_output;
mod stats;
mod traits;

pub use csv_output::{read_records, CsvSink};
pub use stats::{print_summary, CrawlStats};
pub use traits::RecordSink;
