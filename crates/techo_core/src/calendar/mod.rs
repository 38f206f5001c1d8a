//! Calendar annotations shown next to a Gregorian date.
//!
//! # Responsibility
//! - Derive era, lunar date, rokuyo and moon phase for one date.
//!
//! # Invariants
//! - Every function here is pure: same date, same result, no I/O.
//! - No function here fails; out-of-range dates degrade to approximations.

use chrono::NaiveDate;

pub mod era;
pub mod lunar;
pub mod moon;
pub mod rokuyo;

/// Display labels for one date.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayAnnotation {
    pub date: NaiveDate,
    /// e.g. `令和6年`
    pub era_label: String,
    /// e.g. `1/1`
    pub lunar_label: String,
    /// e.g. `大安`
    pub cycle_label: String,
    /// one of `🌑🌒🌓🌔🌕🌖🌗🌘`
    pub moon_emoji: String,
}

/// Computes all annotations for `date`.
///
/// # Example
///
/// ```
/// use chrono::NaiveDate;
/// use techo_core::annotate;
///
/// let day = annotate(NaiveDate::from_ymd_opt(2024, 2, 10).unwrap());
/// assert_eq!("令和6年", day.era_label);
/// assert_eq!("1/1", day.lunar_label);
/// assert_eq!("大安", day.cycle_label);
/// assert_eq!("🌗", day.moon_emoji);
/// ```
pub fn annotate(date: NaiveDate) -> DayAnnotation {
    DayAnnotation {
        date,
        era_label: era::format_era(date),
        lunar_label: lunar::lunar_label(date),
        cycle_label: rokuyo::rokuyo_of(date).label().to_string(),
        moon_emoji: moon::phase_emoji(moon::phase_of(date)).to_string(),
    }
}
