//! Japanese era names (gengō) for Gregorian years since 1926.

use chrono::{Datelike, NaiveDate};

/// A named era with the Gregorian year its first year falls in.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Era {
    Showa,
    Heisei,
    Reiwa,
}

/// Supported eras, latest first. The first era whose start year is not after
/// the date's year wins.
const ERAS: &[Era] = &[Era::Reiwa, Era::Heisei, Era::Showa];

impl Era {
    /// Gregorian year of the era's first year.
    pub fn first_year(&self) -> i32 {
        match self {
            Era::Showa => 1926,
            Era::Heisei => 1989,
            Era::Reiwa => 2019,
        }
    }

    /// Romanized name, e.g. `"Reiwa"`.
    pub fn name(&self) -> &'static str {
        match self {
            Era::Showa => "Showa",
            Era::Heisei => "Heisei",
            Era::Reiwa => "Reiwa",
        }
    }

    /// Kanji name as printed in calendars, e.g. `"令和"`.
    pub fn label(&self) -> &'static str {
        match self {
            Era::Showa => "昭和",
            Era::Heisei => "平成",
            Era::Reiwa => "令和",
        }
    }
}

/// Era and year within it. `era` is `None` (and `year_in_era` is 0) before
/// 1926.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct EraYear {
    pub era: Option<Era>,
    pub year_in_era: u32,
}

impl EraYear {
    /// Romanized era name, or `""` when no era applies.
    pub fn name(&self) -> &'static str {
        self.era.map_or("", |era| era.name())
    }
}

/// Maps `date` to its era and year within that era.
///
/// # Example
///
/// ```
/// use chrono::NaiveDate;
/// use techo_core::{era_of, Era};
///
/// let era = era_of(NaiveDate::from_ymd_opt(2024, 2, 10).unwrap());
/// assert_eq!(Some(Era::Reiwa), era.era);
/// assert_eq!(6, era.year_in_era);
/// ```
pub fn era_of(date: NaiveDate) -> EraYear {
    let year = date.year();
    ERAS.iter()
        .find(|era| year >= era.first_year())
        .map_or(
            EraYear {
                era: None,
                year_in_era: 0,
            },
            |era| EraYear {
                era: Some(*era),
                year_in_era: (year - era.first_year() + 1) as u32,
            },
        )
}

/// Formats the era year as `{label}{year}年`, e.g. `令和6年`.
///
/// Dates before 1926 render as `0年`.
pub fn format_era(date: NaiveDate) -> String {
    let era_year = era_of(date);
    let label = era_year.era.map_or("", |era| era.label());
    format!("{label}{}年", era_year.year_in_era)
}
