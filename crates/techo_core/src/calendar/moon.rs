//! Moon phase approximation and its eight display buckets.
//!
//! The phase comes from a closed-form day count that is not a true Julian day
//! number; it is a display approximation only.

use chrono::{Datelike, NaiveDate};

/// Mean synodic month in days.
pub const SYNODIC_MONTH: f64 = 29.530588853;
/// Day count of the reference new moon used by the approximation.
const REFERENCE_NEW_MOON: f64 = 2451550.1;
const DAY_COUNT_OFFSET: i64 = 2415020;

/// Eight equal slices of the lunation, starting at new moon.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum MoonPhase {
    New,
    WaxingCrescent,
    FirstQuarter,
    WaxingGibbous,
    Full,
    WaningGibbous,
    LastQuarter,
    WaningCrescent,
}

impl MoonPhase {
    pub const ALL: [MoonPhase; 8] = [
        MoonPhase::New,
        MoonPhase::WaxingCrescent,
        MoonPhase::FirstQuarter,
        MoonPhase::WaxingGibbous,
        MoonPhase::Full,
        MoonPhase::WaningGibbous,
        MoonPhase::LastQuarter,
        MoonPhase::WaningCrescent,
    ];

    /// Buckets a phase fraction; values outside `[0, 1)` are wrapped first.
    pub fn from_phase(phase: f64) -> Self {
        let index = (normalize(phase) * 8.0).floor() as usize % 8;
        Self::ALL[index]
    }

    pub fn emoji(&self) -> &'static str {
        match self {
            MoonPhase::New => "🌑",
            MoonPhase::WaxingCrescent => "🌒",
            MoonPhase::FirstQuarter => "🌓",
            MoonPhase::WaxingGibbous => "🌔",
            MoonPhase::Full => "🌕",
            MoonPhase::WaningGibbous => "🌖",
            MoonPhase::LastQuarter => "🌗",
            MoonPhase::WaningCrescent => "🌘",
        }
    }
}

/// Returns the phase of `date` as a fraction of a lunation in `[0, 1)`.
///
/// # Example
///
/// ```
/// use chrono::NaiveDate;
/// use techo_core::{phase_of, MoonPhase};
///
/// let phase = phase_of(NaiveDate::from_ymd_opt(2024, 2, 10).unwrap());
/// assert!((0.0..1.0).contains(&phase));
/// assert_eq!(MoonPhase::LastQuarter, MoonPhase::from_phase(phase));
/// ```
pub fn phase_of(date: NaiveDate) -> f64 {
    let year = i64::from(date.year());
    let n = i64::from(date.month()) + 12 * year;
    let k = i64::from(date.day()) + DAY_COUNT_OFFSET + (n - 1).div_euclid(12);
    normalize((k as f64 - REFERENCE_NEW_MOON) / SYNODIC_MONTH)
}

/// Emoji of the bucket `phase` falls into.
pub fn phase_emoji(phase: f64) -> &'static str {
    MoonPhase::from_phase(phase).emoji()
}

fn normalize(value: f64) -> f64 {
    if !value.is_finite() {
        return 0.0;
    }
    let wrapped = value.rem_euclid(1.0);
    // rem_euclid can round up to exactly 1.0 for tiny negative inputs
    if wrapped >= 1.0 {
        0.0
    } else {
        wrapped
    }
}
