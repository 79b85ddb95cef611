//! Hebrew calendar dates, holidays, weekly Torah readings and sun times.
//!
//! ```no_run
//! use hdate::{CalendarDate, HebrewCalendar};
//!
//! let today = CalendarDate::today();
//! println!("{}", today.format_date(0));
//! ```

mod calendar;
mod date;
mod hebrew;
mod holiday;
mod locale;
mod parasha;
pub mod config;
pub mod query;
pub mod report;
pub mod sun;

pub use calendar::{CalendarDate, HebrewCalendar};
pub use date::{days_in_month, is_leap_year, Date, DateExt, Weekday};
pub use hebrew::{HebrewDate, HebrewMonth, HebrewYear, MAX_YEAR, MIN_YEAR};
pub use holiday::{Holiday, HolidayKind, Location};
pub use locale::{format_date, hebrew_numeral, FormatStyle, Locale};
pub use parasha::{Parasha, Schedule};
pub use query::{Occurrence, Query};

/// The current day.
#[inline]
pub fn today() -> CalendarDate {
    CalendarDate::today()
}

/// Holidays observed at `location` on `date`.
pub fn get(date: impl Into<Date>, location: Location) -> query::Iter {
    Query::date(date).location(location).run()
}

#[inline]
pub fn is_holiday(date: impl Into<Date>, location: Location) -> bool {
    get(date, location).next().is_some()
}

/// Holidays of a Hebrew year, in date order.
pub fn holidays_in_year(year: i32, location: Location) -> query::Iter {
    Query::hebrew_year(year).location(location).run()
}

#[inline]
pub fn query(query: Query) -> query::Iter {
    query.run()
}

/// Error states the calendar might encounter.
#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum Error {
    /// Day or month does not exist on the Gregorian calendar.
    #[error("{year:04}-{month:02}-{day:02} is not a valid Gregorian date")]
    InvalidGregorianDate { year: i32, month: u32, day: u32 },
    /// Day or month does not exist in the given Hebrew year.
    #[error("{day}-{month}-{year} is not a valid Hebrew date")]
    InvalidHebrewDate { day: u32, month: u32, year: i32 },
    /// Hebrew year outside of the supported range.
    #[error("Hebrew year {0} is not supported")]
    YearOutOfRange(i32),
    /// Conversion to another date format is not supported.
    #[error("Date is too large for conversion")]
    DateTooLarge,
    /// Name of a month, holiday or reading was not recognized.
    #[error("Unknown name: {0}")]
    UnknownName(String),
    /// Latitude or longitude out of range.
    #[error("Coordinates are out of range")]
    InvalidCoordinates,
}
