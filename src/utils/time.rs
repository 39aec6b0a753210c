use std::collections::HashMap;

use chrono::{DateTime, NaiveDate, TimeZone, Utc};

/// This is the standard way of converting a date to a string in hourbook.
pub fn date_to_string(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Returns the calendar date of a moment as seen in `timezone`.
pub fn date_of<Tz: TimeZone>(moment: DateTime<Utc>, timezone: &Tz) -> NaiveDate {
    moment.with_timezone(timezone).date_naive()
}

/// Returns dates between start (inclusive) and end (inclusive).
pub fn date_range(start: NaiveDate, end: NaiveDate) -> impl Iterator<Item = NaiveDate> {
    start.iter_days().take_while(move |v| *v <= end)
}

/// Ordered list of every date in a report together with the name of each day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Calendar {
    dates: Vec<NaiveDate>,
    day_names: HashMap<NaiveDate, String>,
}

impl Calendar {
    /// Creates a calendar for every date from start to end, both inclusive. Empty if end comes
    /// before start.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        let dates = date_range(start, end).collect::<Vec<_>>();
        let day_names = dates
            .iter()
            .map(|v| (*v, v.format("%A").to_string()))
            .collect();
        Self { dates, day_names }
    }

    /// Creates a calendar out of dates and names resolved elsewhere.
    pub fn from_parts(dates: Vec<NaiveDate>, day_names: HashMap<NaiveDate, String>) -> Self {
        Self { dates, day_names }
    }

    pub fn dates(&self) -> &[NaiveDate] {
        &self.dates
    }

    pub fn start(&self) -> Option<NaiveDate> {
        self.dates.first().copied()
    }

    pub fn end(&self) -> Option<NaiveDate> {
        self.dates.last().copied()
    }

    /// Name of the day, falling back to the english weekday for dates the calendar doesn't
    /// know about.
    pub fn day_name(&self, date: NaiveDate) -> String {
        self.day_names
            .get(&date)
            .cloned()
            .unwrap_or_else(|| date.format("%A").to_string())
    }
}
