//! Installment periodicity and due-date arithmetic.

use chrono::{Days, Months, NaiveDate};
use serde::{Deserialize, Serialize};

/// Interval between two consecutive equal installments.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Periodicity {
    /// One calendar month.
    #[default]
    Monthly,
    /// Seven days.
    Weekly,
    /// Fourteen days.
    Biweekly,
}

impl Periodicity {
    /// Returns the date `periods` intervals after `start`.
    ///
    /// Months are always counted from `start` itself, never chained, and land
    /// on the last valid day when the target month is shorter (chrono's
    /// `checked_add_months` clamping): Jan 31 + 1 month is Feb 28/29, and
    /// Jan 31 + 2 months is Mar 31 again.
    ///
    /// Returns `None` if the result is outside chrono's representable range.
    #[must_use]
    pub fn advance(self, start: NaiveDate, periods: u32) -> Option<NaiveDate> {
        match self {
            Self::Monthly => start.checked_add_months(Months::new(periods)),
            Self::Weekly => start.checked_add_days(Days::new(7 * u64::from(periods))),
            Self::Biweekly => start.checked_add_days(Days::new(14 * u64::from(periods))),
        }
    }

    /// Lowercase name, as used in summaries.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Monthly => "monthly",
            Self::Weekly => "weekly",
            Self::Biweekly => "biweekly",
        }
    }
}

impl std::fmt::Display for Periodicity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[rstest]
    #[case(date(2024, 1, 31), 1, date(2024, 2, 29))]
    #[case(date(2023, 1, 31), 1, date(2023, 2, 28))]
    #[case(date(2024, 1, 31), 2, date(2024, 3, 31))]
    #[case(date(2024, 3, 31), 1, date(2024, 4, 30))]
    #[case(date(2024, 11, 15), 3, date(2025, 2, 15))]
    #[case(date(2024, 5, 10), 0, date(2024, 5, 10))]
    fn test_monthly_clamps_to_month_end(
        #[case] start: NaiveDate,
        #[case] periods: u32,
        #[case] expected: NaiveDate,
    ) {
        assert_eq!(Periodicity::Monthly.advance(start, periods), Some(expected));
    }

    #[test]
    fn test_weekly_and_biweekly() {
        let start = date(2024, 12, 25);
        assert_eq!(Periodicity::Weekly.advance(start, 1), Some(date(2025, 1, 1)));
        assert_eq!(Periodicity::Weekly.advance(start, 3), Some(date(2025, 1, 15)));
        assert_eq!(Periodicity::Biweekly.advance(start, 1), Some(date(2025, 1, 8)));
        assert_eq!(Periodicity::Biweekly.advance(start, 2), Some(date(2025, 1, 22)));
    }

    #[test]
    fn test_advance_out_of_range() {
        assert_eq!(Periodicity::Monthly.advance(NaiveDate::MAX, 1), None);
        assert_eq!(Periodicity::Weekly.advance(NaiveDate::MAX, 1), None);
    }

    #[test]
    fn test_serde_lowercase_and_default() {
        assert_eq!(Periodicity::default(), Periodicity::Monthly);
        let parsed: Periodicity = serde_json::from_str("\"biweekly\"").unwrap();
        assert_eq!(parsed, Periodicity::Biweekly);
        assert_eq!(serde_json::to_string(&Periodicity::Weekly).unwrap(), "\"weekly\"");
    }
}
