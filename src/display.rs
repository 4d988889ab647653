use crate::{series::StarSeries, RepositoryId};
use chrono::{DateTime, TimeZone};
use std::fmt;

/// Relative time from another instant.
pub trait RelativeFrom {
    fn relative_from<Tz: TimeZone>(&self, now: &DateTime<Tz>) -> Since;
}

impl<T> RelativeFrom for DateTime<T>
where
    T: TimeZone,
{
    fn relative_from<Tz: TimeZone>(&self, now: &DateTime<Tz>) -> Since {
        Since(now.clone().signed_duration_since(self.clone()))
    }
}

const MINUTE: i64 = 60;
const HOUR: i64 = 60 * MINUTE;
const DAY: i64 = 24 * HOUR;

/// Largest unit first.
const UNITS: [(i64, &str); 6] = [
    (365 * DAY, "year"),
    (30 * DAY, "month"),
    (7 * DAY, "week"),
    (DAY, "day"),
    (HOUR, "hour"),
    (MINUTE, "minute"),
];

/// Elapsed time rendered in its largest whole unit, e.g. `3 weeks ago`.
#[derive(PartialEq, Copy, Clone, Debug)]
pub struct Since(chrono::Duration);

impl fmt::Display for Since {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let seconds = self.0.num_seconds();
        let unit = UNITS
            .iter()
            .map(|(size, name)| (seconds / size, name))
            .find(|(n, _)| *n > 0);
        match unit {
            Some((1, name)) => write!(f, "1 {name} ago"),
            Some((n, name)) => write!(f, "{n} {name}s ago"),
            // also covers instants after `now`
            None => f.write_str("just now"),
        }
    }
}

/// One line run summary, e.g. `kafji/shub: 3 stars, last starred this week`.
#[derive(Debug)]
pub struct Summary<'a> {
    repo: &'a RepositoryId,
    series: &'a StarSeries,
}

impl<'a> Summary<'a> {
    pub fn new(repo: &'a RepositoryId, series: &'a StarSeries) -> Self {
        Self { repo, series }
    }
}

impl fmt::Display for Summary<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let last = self.series.last_starred_at();
        let now = self.series.rendered_at();
        match (last, now) {
            (Some(last), Some(now)) => {
                let total = self.series.total();
                let noun = if total == 1 { "star" } else { "stars" };
                write!(
                    f,
                    "{}: {total} {noun}, last starred {}",
                    self.repo,
                    last.relative_from(&now)
                )
            }
            _ => write!(f, "{}: no stars yet", self.repo),
        }
    }
}
