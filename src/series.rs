//! Cumulative star count over time.

use crate::github::StarEvent;
use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
use thiserror::Error;

/// Source of "now" for the trailing point of a series.
pub trait Clock {
    fn now(&self) -> DateTime<Utc>;
}

#[derive(PartialEq, Copy, Clone, Default, Debug)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Always answers the same instant.
#[derive(PartialEq, Copy, Clone, Debug)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

#[derive(PartialEq, Eq, Copy, Clone, Debug)]
pub struct StarPoint {
    pub at: DateTime<Utc>,
    pub count: u32,
}

/// Points in event order, with a trailing point at "now" carrying the final count.
#[derive(PartialEq, Clone, Debug)]
pub struct StarSeries(Vec<StarPoint>);

impl StarSeries {
    pub fn points(&self) -> &[StarPoint] {
        &self.0
    }

    pub fn timestamps(&self) -> impl Iterator<Item = DateTime<Utc>> + '_ {
        self.0.iter().map(|x| x.at)
    }

    /// Number of stars, i.e. the count of the trailing point.
    pub fn total(&self) -> u32 {
        self.0.last().map(|x| x.count).unwrap_or_default()
    }

    /// Time of the trailing point.
    pub fn rendered_at(&self) -> Option<DateTime<Utc>> {
        self.0.last().map(|x| x.at)
    }

    /// Time of the last real star event.
    pub fn last_starred_at(&self) -> Option<DateTime<Utc>> {
        let n = self.0.len();
        if n < 2 {
            return None;
        }
        Some(self.0[n - 2].at)
    }

    /// Earliest and latest timestamps.
    pub fn span(&self) -> Option<(DateTime<Utc>, DateTime<Utc>)> {
        let start = self.timestamps().min()?;
        let end = self.timestamps().max()?;
        Some((start, end))
    }
}

#[derive(Error, PartialEq, Clone, Debug)]
#[error("Failed to parse timestamp `{value}` of star #{position}.")]
pub struct TimestampParseError {
    /// 1-based position of the event.
    pub position: usize,
    pub value: String,
}

const NAIVE_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

/// Parses RFC 3339, falling back to offset-less date times read as UTC.
pub fn parse_timestamp(s: &str) -> Option<DateTime<Utc>> {
    if let Ok(x) = DateTime::parse_from_rfc3339(s) {
        return Some(x.with_timezone(&Utc));
    }
    NAIVE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
        .map(|x| Utc.from_utc_datetime(&x))
}

/// Builds the cumulative series.
///
/// Events are taken in the order given, the `i`-th one counting `i` stars.
/// A malformed timestamp fails the whole build.
pub fn build_series(
    events: &[StarEvent],
    now: DateTime<Utc>,
) -> Result<StarSeries, TimestampParseError> {
    let mut points = Vec::with_capacity(events.len() + 1);
    for (idx, event) in events.iter().enumerate() {
        let at = parse_timestamp(&event.starred_at).ok_or_else(|| TimestampParseError {
            position: idx + 1,
            value: event.starred_at.clone(),
        })?;
        points.push(StarPoint {
            at,
            count: (idx + 1) as u32,
        });
    }
    let count = points.last().map(|x| x.count).unwrap_or_default();
    points.push(StarPoint { at: now, count });
    Ok(StarSeries(points))
}
