//! Date label format of the time axis.

use chrono::{DateTime, Datelike, Utc};
use core::fmt;

#[derive(PartialEq, Eq, Copy, Clone, Debug)]
pub enum AxisFormat {
    /// Month and day, e.g. `Jun 01`.
    Short,
    /// Day, month and year, e.g. `01 Jun 2024`.
    Long,
}

impl AxisFormat {
    /// `strftime` pattern.
    pub const fn pattern(self) -> &'static str {
        match self {
            AxisFormat::Short => "%b %d",
            AxisFormat::Long => "%d %b %Y",
        }
    }

    pub fn format(self, at: &DateTime<Utc>) -> String {
        at.format(self.pattern()).to_string()
    }
}

impl fmt::Display for AxisFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.pattern())
    }
}

/// Omits the year when every timestamp falls in the same month as the first.
///
/// Only the month of year is compared, so June 2023 and June 2024 count as
/// the same month.
pub fn select_format<I>(timestamps: I) -> AxisFormat
where
    I: IntoIterator,
    I::Item: Datelike,
{
    let mut months = timestamps.into_iter().map(|x| x.month());
    let first = match months.next() {
        Some(x) => x,
        None => return AxisFormat::Short,
    };
    if months.all(|x| x == first) {
        AxisFormat::Short
    } else {
        AxisFormat::Long
    }
}

/// Signed number of calendar months from `d2` to `d1`.
pub fn diff_month(d1: &impl Datelike, d2: &impl Datelike) -> i32 {
    (d1.year() - d2.year()) * 12 + d1.month() as i32 - d2.month() as i32
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, TimeZone};

    fn dates(xs: &[(i32, u32, u32)]) -> Vec<NaiveDate> {
        xs.iter()
            .map(|(y, m, d)| NaiveDate::from_ymd_opt(*y, *m, *d).unwrap())
            .collect()
    }

    #[test]
    fn test_same_month_selects_short() {
        let xs = dates(&[(2024, 6, 1), (2024, 6, 15), (2024, 6, 30)]);
        assert_eq!(select_format(xs), AxisFormat::Short);
    }

    #[test]
    fn test_different_months_selects_long() {
        let xs = dates(&[(2023, 1, 1), (2024, 6, 15)]);
        assert_eq!(select_format(xs), AxisFormat::Long);
    }

    #[test]
    fn test_same_month_of_different_years_selects_short() {
        let xs = dates(&[(2023, 6, 1), (2024, 6, 15)]);
        assert_eq!(select_format(xs), AxisFormat::Short);
    }

    #[test]
    fn test_single_and_empty_select_short() {
        assert_eq!(select_format(dates(&[(2024, 6, 1)])), AxisFormat::Short);
        assert_eq!(select_format(Vec::<NaiveDate>::new()), AxisFormat::Short);
    }

    #[test]
    fn test_format_pattern() {
        let at = Utc.with_ymd_and_hms(2024, 6, 1, 8, 30, 0).unwrap();
        assert_eq!(AxisFormat::Short.format(&at), "Jun 01");
        assert_eq!(AxisFormat::Long.format(&at), "01 Jun 2024");
        assert_eq!(AxisFormat::Long.to_string(), "%d %b %Y");
    }

    #[test]
    fn test_diff_month() {
        let a = NaiveDate::from_ymd_opt(2024, 6, 15).unwrap();
        let b = NaiveDate::from_ymd_opt(2023, 1, 1).unwrap();
        assert_eq!(diff_month(&a, &b), 17);
        assert_eq!(diff_month(&b, &a), -17);
        assert_eq!(diff_month(&a, &a), 0);
    }
}
