//! Rokuyo, the six-day fortune cycle printed on Japanese calendars.
//!
//! The index is `(month + day) % 6`, a simplified rule that does not follow
//! published almanacs.

use chrono::{Datelike, NaiveDate};

/// One of the six rokuyo days, in cycle order.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Rokuyo {
    Taian,
    Shakkou,
    Sensho,
    Tomobiki,
    Senbu,
    Butsumetsu,
}

impl Rokuyo {
    /// Cycle order; position is the value of `(month + day) % 6`.
    pub const CYCLE: [Rokuyo; 6] = [
        Rokuyo::Taian,
        Rokuyo::Shakkou,
        Rokuyo::Sensho,
        Rokuyo::Tomobiki,
        Rokuyo::Senbu,
        Rokuyo::Butsumetsu,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Rokuyo::Taian => "Taian",
            Rokuyo::Shakkou => "Shakkou",
            Rokuyo::Sensho => "Sensho",
            Rokuyo::Tomobiki => "Tomobiki",
            Rokuyo::Senbu => "Senbu",
            Rokuyo::Butsumetsu => "Butsumetsu",
        }
    }

    /// Kanji name, e.g. `"大安"`.
    pub fn label(&self) -> &'static str {
        match self {
            Rokuyo::Taian => "大安",
            Rokuyo::Shakkou => "赤口",
            Rokuyo::Sensho => "先勝",
            Rokuyo::Tomobiki => "友引",
            Rokuyo::Senbu => "先負",
            Rokuyo::Butsumetsu => "仏滅",
        }
    }
}

/// Returns the rokuyo of `date`.
///
/// # Example
///
/// ```
/// use chrono::NaiveDate;
/// use techo_core::{rokuyo_of, Rokuyo};
///
/// let date = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
/// assert_eq!(Rokuyo::Taian, rokuyo_of(date));
/// ```
pub fn rokuyo_of(date: NaiveDate) -> Rokuyo {
    Rokuyo::CYCLE[((date.month() + date.day()) % 6) as usize]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn known_days() {
        for ((m, d), std) in [
            ((5, 1), Rokuyo::Taian),
            ((5, 2), Rokuyo::Shakkou),
            ((1, 1), Rokuyo::Sensho),
            ((2, 10), Rokuyo::Taian),
            ((12, 31), Rokuyo::Shakkou),
        ] {
            assert_eq!(std, rokuyo_of(ymd(2024, m, d)), "{m}/{d}");
        }
    }

    #[test]
    fn repeats_every_six_days_within_a_month() {
        for month in 1..=12 {
            for day in 1..=22 {
                let date = ymd(2024, month, day);
                assert_eq!(
                    rokuyo_of(date),
                    rokuyo_of(date + chrono::Days::new(6)),
                    "{date}"
                );
            }
        }
    }

    #[test]
    fn labels_follow_cycle_order() {
        let labels: Vec<_> = Rokuyo::CYCLE.iter().map(|r| r.label()).collect();
        assert_eq!(vec!["大安", "赤口", "先勝", "友引", "先負", "仏滅"], labels);
    }
}
