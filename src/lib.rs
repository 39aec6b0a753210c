//! Summaries of tracked time for a range of days. Entries are grouped by project and by day,
//! descriptions are merged and hours are rounded, then the result is shown both day by day and
//! project by project.
//!

pub mod cli;
pub mod report;
pub mod source;
pub mod utils;
