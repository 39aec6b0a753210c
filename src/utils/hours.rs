use std::{
    fmt::Display,
    iter::Sum,
    ops::{Add, AddAssign},
};

use chrono::Duration;
use serde::{Serialize, Serializer};

const SECONDS_PER_HUNDREDTH: i64 = 36;

/// Amount of hours with a fixed precision of 2 decimal places.
///
/// The value is kept as a whole number of hundredths of an hour, so the only rounding happens
/// when a [Duration] is converted. Adding [Hours] together is exact.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Hours(i64);

impl Hours {
    pub const ZERO: Hours = Hours(0);

    /// Converts a total amount of time into hours. Halves are rounded away from zero, meaning
    /// 3618 seconds (exactly 1.005h) become 1.01.
    pub fn from_duration(duration: Duration) -> Self {
        Self::from_seconds(duration.num_seconds())
    }

    pub fn from_seconds(seconds: i64) -> Self {
        let half = SECONDS_PER_HUNDREDTH / 2;
        let hundredths = if seconds >= 0 {
            (seconds + half) / SECONDS_PER_HUNDREDTH
        } else {
            (seconds - half) / SECONDS_PER_HUNDREDTH
        };
        Hours(hundredths)
    }

    pub fn from_hundredths(hundredths: i64) -> Self {
        Hours(hundredths)
    }

    pub fn hundredths(&self) -> i64 {
        self.0
    }

    pub fn as_f64(&self) -> f64 {
        self.0 as f64 / 100.
    }
}

impl Display for Hours {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.abs();
        write!(f, "{sign}{}.{:02}", abs / 100, abs % 100)
    }
}

impl Add for Hours {
    type Output = Hours;

    fn add(self, rhs: Self) -> Self::Output {
        Hours(self.0 + rhs.0)
    }
}

impl AddAssign for Hours {
    fn add_assign(&mut self, rhs: Self) {
        self.0 += rhs.0;
    }
}

impl Sum for Hours {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Hours::ZERO, Add::add)
    }
}

impl<'a> Sum<&'a Hours> for Hours {
    fn sum<I: Iterator<Item = &'a Hours>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

impl Serialize for Hours {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_f64(self.as_f64())
    }
}
