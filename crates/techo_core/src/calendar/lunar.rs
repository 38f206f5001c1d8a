//! Approximate lunar (old-calendar) dates.
//!
//! # Responsibility
//! - Map a Gregorian date to a lunar `month/day` from a sparse anchor table.
//!
//! # Invariants
//! - The anchor table is immutable and chronologically ordered.
//! - Lookup uses the nearest anchor by absolute day distance; the
//!   first-listed anchor wins ties.
//! - Months are assumed to be 30 days long and only one month boundary is
//!   crossed, so dates far from every anchor give defined but inaccurate
//!   values (the day may fall outside `1..=30`).

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use std::fmt::{Display, Formatter};

/// Day count used when an extrapolated day leaves the anchor's month.
pub const LUNAR_MONTH_DAYS: i64 = 30;

/// Raw anchor data: `(gregorian, lunar month, lunar day)` for 2024.
const ANCHOR_TABLE: &[(&str, u32, u32)] = &[
    ("2024-01-01", 11, 19),
    ("2024-01-10", 11, 28),
    ("2024-01-11", 11, 29),
    ("2024-02-09", 12, 30),
    ("2024-02-10", 1, 1),
    ("2024-03-10", 2, 1),
    ("2024-04-08", 3, 1),
    ("2024-05-07", 4, 1),
    ("2024-06-05", 5, 1),
    ("2024-07-04", 6, 1),
    ("2024-08-02", 7, 1),
    ("2024-09-01", 8, 1),
    ("2024-09-30", 9, 1),
    ("2024-10-30", 9, 28),
    ("2024-10-31", 9, 29),
    ("2024-11-29", 10, 28),
    ("2024-12-28", 11, 27),
];

static ANCHORS: Lazy<Vec<LunarAnchor>> = Lazy::new(|| {
    ANCHOR_TABLE
        .iter()
        .map(|&(date, month, day)| LunarAnchor {
            date: NaiveDate::parse_from_str(date, "%Y-%m-%d").expect("valid anchor date"),
            month,
            day,
        })
        .collect()
});

/// A Gregorian date whose lunar month and day are known exactly.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct LunarAnchor {
    pub date: NaiveDate,
    /// `1..=12`
    pub month: u32,
    /// `1..=30`
    pub day: u32,
}

/// Approximate lunar month and day. Renders as `"{month}/{day}"`.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct LunarDate {
    pub month: u32,
    pub day: i64,
}

impl Display for LunarDate {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.month, self.day)
    }
}

/// All anchors in table order.
pub fn anchors() -> &'static [LunarAnchor] {
    &ANCHORS
}

/// Returns the anchor closest to `date`; the first-listed one on ties.
pub fn nearest_anchor(date: NaiveDate) -> &'static LunarAnchor {
    ANCHORS
        .iter()
        .min_by_key(|anchor| (date - anchor.date).num_days().abs())
        .expect("anchor table is not empty")
}

/// Approximates the lunar date of `date` from its nearest anchor.
///
/// # Example
///
/// ```
/// use chrono::NaiveDate;
/// use techo_core::lunar_date_of;
///
/// let date = NaiveDate::from_ymd_opt(2024, 2, 12).unwrap();
/// assert_eq!("1/3", lunar_date_of(date).to_string());
/// ```
pub fn lunar_date_of(date: NaiveDate) -> LunarDate {
    extrapolate(nearest_anchor(date), date)
}

/// String form of [`lunar_date_of`].
pub fn lunar_label(date: NaiveDate) -> String {
    lunar_date_of(date).to_string()
}

fn extrapolate(anchor: &LunarAnchor, date: NaiveDate) -> LunarDate {
    let days_diff = (date - anchor.date).num_days();
    let adjusted = i64::from(anchor.day) + days_diff;

    if adjusted > LUNAR_MONTH_DAYS {
        LunarDate {
            month: anchor.month % 12 + 1,
            day: adjusted - LUNAR_MONTH_DAYS,
        }
    } else if adjusted < 1 {
        LunarDate {
            month: anchor.month,
            day: LUNAR_MONTH_DAYS + adjusted,
        }
    } else {
        LunarDate {
            month: anchor.month,
            day: adjusted,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn anchors_are_ordered() {
        assert!(anchors().windows(2).all(|pair| pair[0].date < pair[1].date));
    }

    #[test]
    fn anchor_dates_reproduce_table() {
        for &(date, month, day) in ANCHOR_TABLE {
            let date = NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap();
            assert_eq!(format!("{month}/{day}"), lunar_label(date), "{date}");
        }
    }

    #[test]
    fn overflow_wraps_december_into_january() {
        let anchor = LunarAnchor {
            date: ymd(2024, 2, 9),
            month: 12,
            day: 30,
        };
        assert_eq!(
            LunarDate { month: 1, day: 1 },
            extrapolate(&anchor, ymd(2024, 2, 10))
        );
    }

    #[test]
    fn extrapolates_forward_and_backward() {
        let dataset = [
            // nearest 2024-02-10 (1/1)
            ((2024, 2, 12), "1/3"),
            // nearest 2024-01-11 (11/29), crosses into month 12
            ((2024, 1, 20), "12/8"),
            // nearest 2024-03-10 (2/1), underflow keeps the anchor month
            ((2024, 3, 8), "2/29"),
            // nearest 2024-12-28 (11/27)
            ((2024, 12, 31), "11/30"),
            ((2025, 1, 1), "12/1"),
        ];
        for ((y, m, d), std) in dataset {
            assert_eq!(std, lunar_label(ymd(y, m, d)), "{y:04}-{m:02}-{d:02}");
        }
    }

    #[test]
    fn ties_pick_first_listed_anchor() {
        // 2024-08-02 and 2024-09-01 are both 15 days away.
        let date = ymd(2024, 8, 17);
        assert_eq!(ymd(2024, 8, 2), nearest_anchor(date).date);
        assert_eq!("7/16", lunar_label(date));
    }

    #[test]
    fn far_dates_degrade_without_failing() {
        let date = ymd(2023, 1, 1);
        assert_eq!(ymd(2024, 1, 1), nearest_anchor(date).date);
        assert_eq!(LunarDate { month: 11, day: -316 }, lunar_date_of(date));
    }
}
