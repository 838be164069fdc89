//! Earthquake-report subsystem
//!
//! An independent consumer of a fixed-schema JSON feed with the
//! intensity-area ranking used by the report display.

mod feed;
mod ranking;

pub use feed::{load_live, load_sample, simplify, FeedDocument, QuakeReport};
pub use ranking::{dedup_areas, intensity_level, rank_areas, ranked_areas, IntensityArea};
