use std::{fmt::Display, str::FromStr};

use chrono::{Datelike, Days, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize, Serializer, de};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid date `{0}`, use MM-YYYY")]
pub struct MonthYearParseError(pub String);

/// A calendar month. Always stored as the first day of that month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MonthYear(NaiveDate);

impl MonthYear {
    pub fn new(year: i32, month: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, 1).map(Self)
    }

    /// Drops the day component of `date`.
    pub fn from_date(date: NaiveDate) -> Self {
        Self(date - Days::new(u64::from(date.day0())))
    }

    pub fn year(&self) -> i32 {
        self.0.year()
    }

    pub fn month(&self) -> u32 {
        self.0.month()
    }

    pub fn as_date(&self) -> NaiveDate {
        self.0
    }

    /// Inclusive count of months from `self` to `to`.
    ///
    /// `01-2023 → 03-2023` is 3; equal months give 1. No clamping is applied, so a `to`
    /// earlier than `self` yields zero or a negative count.
    pub fn months_through(&self, to: MonthYear) -> i64 {
        let years = i64::from(to.year()) - i64::from(self.year());
        let months = i64::from(to.month()) - i64::from(self.month());
        years * 12 + months + 1
    }
}

impl FromStr for MonthYear {
    type Err = MonthYearParseError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let invalid = || MonthYearParseError(raw.to_string());

        let (month, year) = raw.split_once('-').ok_or_else(invalid)?;
        if month.len() != 2 || year.len() != 4 {
            return Err(invalid());
        }
        if !month.bytes().chain(year.bytes()).all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }

        let month: u32 = month.parse().map_err(|_| invalid())?;
        let year: i32 = year.parse().map_err(|_| invalid())?;

        MonthYear::new(year, month).ok_or_else(invalid)
    }
}

impl Display for MonthYear {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:02}-{:04}", self.month(), self.year())
    }
}

impl Serialize for MonthYear {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for MonthYear {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn my(raw: &str) -> MonthYear {
        raw.parse().unwrap()
    }

    #[test]
    fn parses_two_digit_month_and_four_digit_year() {
        let parsed = my("07-2025");
        assert_eq!(parsed.month(), 7);
        assert_eq!(parsed.year(), 2025);
        assert_eq!(parsed.as_date(), NaiveDate::from_ymd_opt(2025, 7, 1).unwrap());
        assert_eq!(parsed.to_string(), "07-2025");
    }

    #[test]
    fn rejects_malformed_input() {
        for raw in [
            "", "7-2025", "13-2025", "00-2025", "2025-07", "07/2025", "07-25", "ab-2025",
            "07-2025-01", " 07-2025", "+7-2025",
        ] {
            let err = raw.parse::<MonthYear>().unwrap_err();
            assert_eq!(err, MonthYearParseError(raw.to_string()), "input {raw:?}");
        }
    }

    #[test]
    fn from_date_truncates_to_first_of_month() {
        let date = NaiveDate::from_ymd_opt(2024, 2, 29).unwrap();
        assert_eq!(MonthYear::from_date(date), my("02-2024"));
    }

    #[test]
    fn months_through_is_inclusive() {
        assert_eq!(my("01-2023").months_through(my("01-2023")), 1);
        assert_eq!(my("01-2023").months_through(my("03-2023")), 3);
        assert_eq!(my("11-2022").months_through(my("02-2023")), 4);
    }

    #[test]
    fn months_through_goes_negative_when_inverted() {
        assert_eq!(my("01-2023").months_through(my("12-2022")), 0);
        assert_eq!(my("03-2023").months_through(my("01-2023")), -1);
    }

    #[test]
    fn serde_uses_month_year_text() {
        let json = serde_json::to_string(&my("12-2022")).unwrap();
        assert_eq!(json, "\"12-2022\"");

        let err = serde_json::from_str::<MonthYear>("\"2022-12-01\"").unwrap_err();
        assert!(err.to_string().contains("use MM-YYYY"));
    }
}
