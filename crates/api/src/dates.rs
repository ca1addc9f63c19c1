//! Calendar helpers for the `YYYY-MM-DD` dates stored in the measurement table.

use std::fmt;

use time::{format_description::BorrowedFormatItem, macros::format_description, Date, Month};

/// Stored measurement dates use this layout, so string order matches date order.
pub const DATE_FORMAT: &[BorrowedFormatItem<'static>] = format_description!("[year]-[month]-[day]");

/// Upper bound used when a temperature range has no end date.
pub const OPEN_END_DATE: &str = "9999-12-31";

pub fn parse_date(value: &str) -> Result<Date, time::error::Parse> {
    Date::parse(value, DATE_FORMAT)
}

pub fn format_date(date: Date) -> String {
    format!(
        "{:04}-{:02}-{:02}",
        date.year(),
        u8::from(date.month()),
        date.day()
    )
}

/// Same month and day one calendar year earlier.
///
/// Feb 29 has no counterpart in the prior year and maps to Feb 28.
pub fn one_year_before(date: Date) -> Result<Date, time::error::ComponentRange> {
    let year = date.year() - 1;
    date.replace_year(year)
        .or_else(|_| date.replace_day(28).and_then(|d| d.replace_year(year)))
}

/// A calendar day with the year stripped, formatted `MM-DD`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct MonthDay {
    month: Month,
    day: u8,
}

impl MonthDay {
    /// Parses `MM-DD`. Feb 29 is accepted since leap years have it.
    pub fn parse(value: &str) -> Option<Self> {
        let (month, day) = value.split_once('-')?;
        if month.len() != 2 || day.len() != 2 {
            return None;
        }
        let month = Month::try_from(month.parse::<u8>().ok()?).ok()?;
        let day = day.parse::<u8>().ok()?;
        // 2000 is a leap year, so this accepts every day that can appear in the record
        Date::from_calendar_date(2000, month, day).ok()?;
        Some(Self { month, day })
    }

    pub fn month(&self) -> Month {
        self.month
    }

    pub fn day(&self) -> u8 {
        self.day
    }
}

impl From<Date> for MonthDay {
    fn from(date: Date) -> Self {
        Self {
            month: date.month(),
            day: date.day(),
        }
    }
}

impl fmt::Display for MonthDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}-{:02}", u8::from(self.month), self.day)
    }
}
