use std::time::Duration;

/// Julian day number of 1st of January, 1970.
pub(crate) const UNIX_EPOCH_JD: i64 = 2440588;

const SECONDS_IN_DAY: i64 = 86400;

/// A day of the Gregorian (civil) calendar.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(transparent)]
pub struct Date(
    /// Days since 1st of January, 1970. (UNIX epoch)
    pub(crate) i64,
);

/// Day of the week, numbered the way the Hebrew calendar counts them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum Weekday {
    Sunday = 1,
    Monday = 2,
    Tuesday = 3,
    Wednesday = 4,
    Thursday = 5,
    Friday = 6,
    Saturday = 7,
}

impl Weekday {
    const ALL: [Weekday; 7] = [
        Weekday::Sunday,
        Weekday::Monday,
        Weekday::Tuesday,
        Weekday::Wednesday,
        Weekday::Thursday,
        Weekday::Friday,
        Weekday::Saturday,
    ];

    #[inline]
    pub const fn from_julian_day(jd: i64) -> Self {
        Self::ALL[((jd.rem_euclid(7) + 1) % 7) as usize]
    }

    /// Day number 1..=7, Sunday being 1.
    #[inline]
    pub const fn number(&self) -> u8 {
        *self as u8
    }

    /// Weekday `days` after (or before, when negative) this one.
    pub const fn add(&self, days: i64) -> Self {
        Self::ALL[(self.number() as i64 - 1 + days.rem_euclid(7)).rem_euclid(7) as usize]
    }
}

pub const fn is_leap_year(year: i32) -> bool {
    year % 4 == 0 && (year % 100 != 0 || year % 400 == 0)
}

pub const fn days_in_month(year: i32, month: u32) -> u32 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 if is_leap_year(year) => 29,
        2 => 28,
        _ => 0,
    }
}

impl Date {
    /// Builds a date without checking that the day exists.
    pub const fn from_ymd(year: i32, month: u32, day: u32) -> Self {
        // Source: https://howardhinnant.github.io/date_algorithms.html

        let m = month as i64;
        let d = day as i64;

        let adjusted_year = year as i64 - if m <= 2 { 1 } else { 0 };

        let era = if adjusted_year >= 0 {
            adjusted_year / 400
        } else {
            (adjusted_year - 399) / 400
        };

        let year_of_era = adjusted_year - era * 400;
        let month_part = if m > 2 { m - 3 } else { m + 9 };
        let day_of_year = (153 * month_part + 2) / 5 + d - 1;
        let day_of_era = year_of_era * 365 + year_of_era / 4 - year_of_era / 100 + day_of_year;

        Self(era * 146097 + day_of_era - 719468)
    }

    pub fn try_from_ymd(year: i32, month: u32, day: u32) -> Result<Self, crate::Error> {
        if !(1..=12).contains(&month) || day < 1 || day > days_in_month(year, month) {
            return Err(crate::Error::InvalidGregorianDate { year, month, day });
        }
        Ok(Self::from_ymd(year, month, day))
    }

    #[inline]
    pub const fn from_year(year: i32) -> Self {
        Self::from_ymd(year, 1, 1)
    }

    /// Saturates at the ends of the `i64` range.
    #[inline]
    pub const fn from_julian_day(jd: i64) -> Self {
        Self(jd.saturating_sub(UNIX_EPOCH_JD))
    }

    pub const fn ymd(&self) -> (i32, u32, u32) {
        // Source: https://howardhinnant.github.io/date_algorithms.html

        let shifted = self.0.saturating_add(719468);
        let era = if shifted >= 0 {
            shifted / 146097
        } else {
            (shifted - 146096) / 146097
        };

        let day_of_era = shifted - era * 146097;
        let year_of_era =
            (day_of_era - day_of_era / 1460 + day_of_era / 36524 - day_of_era / 146096) / 365;
        let day_of_year = day_of_era - (365 * year_of_era + year_of_era / 4 - year_of_era / 100);
        let month_part = (5 * day_of_year + 2) / 153;

        let day = day_of_year - (153 * month_part + 2) / 5 + 1;
        let month = if month_part < 10 {
            month_part + 3
        } else {
            month_part - 9
        };
        let year = year_of_era + era * 400 + if month <= 2 { 1 } else { 0 };

        let year = if year > i32::MAX as i64 {
            i32::MAX
        } else if year < i32::MIN as i64 {
            i32::MIN
        } else {
            year as i32
        };

        (year, month as u32, day as u32)
    }

    /// Day of the month
    #[inline]
    pub const fn day(&self) -> u32 {
        self.ymd().2
    }

    /// Month of the year
    #[inline]
    pub const fn month(&self) -> u32 {
        self.ymd().1
    }

    /// Year
    #[inline]
    pub const fn year(&self) -> i32 {
        self.ymd().0
    }

    /// Day of the year, 1st of January being 1.
    #[inline]
    pub const fn ordinal(&self) -> u32 {
        self.0.saturating_sub(Self::from_year(self.year()).0).saturating_add(1) as u32
    }

    #[inline]
    pub const fn julian_day(&self) -> i64 {
        self.0.saturating_add(UNIX_EPOCH_JD)
    }

    #[inline]
    pub const fn weekday(&self) -> Weekday {
        Weekday::from_julian_day(self.julian_day())
    }

    /// Saturates at the ends of the `i64` range, see [`Date::checked_add_days`].
    #[inline]
    pub const fn add_days(&self, days: i64) -> Self {
        Self(self.0.saturating_add(days))
    }

    #[inline]
    pub const fn checked_add_days(&self, days: i64) -> Option<Self> {
        match self.0.checked_add(days) {
            Some(it) => Some(Self(it)),
            None => None,
        }
    }

    /// Current day on the local calendar.
    #[cfg(feature = "chrono")]
    pub fn today() -> Self {
        Date::from(chrono::Local::now().date_naive())
    }

    /// Current day on the UTC calendar.
    #[cfg(not(feature = "chrono"))]
    pub fn today() -> Self {
        Date::from(std::time::SystemTime::now())
    }

    pub const fn days_since(&self, other: &Self) -> Result<u64, u64> {
        if self.0 > other.0 {
            Ok(self.0.abs_diff(other.0))
        } else {
            Err(self.0.abs_diff(other.0))
        }
    }

    pub const fn duration_since(&self, other: &Self) -> Result<Duration, Duration> {
        match self.days_since(other) {
            Ok(days) => Ok(Duration::from_secs((SECONDS_IN_DAY as u64).saturating_mul(days))),
            Err(days) => Err(Duration::from_secs((SECONDS_IN_DAY as u64).saturating_mul(days))),
        }
    }
}

impl TryFrom<Date> for std::time::SystemTime {
    type Error = crate::Error;

    fn try_from(value: Date) -> Result<Self, Self::Error> {
        if value.0 < 0 || value.0 > u64::MAX as i64 / SECONDS_IN_DAY {
            return Err(crate::Error::DateTooLarge);
        }
        Ok(std::time::SystemTime::UNIX_EPOCH
            + Duration::from_secs(value.0 as u64 * SECONDS_IN_DAY as u64))
    }
}

impl From<std::time::SystemTime> for Date {
    fn from(value: std::time::SystemTime) -> Self {
        let days = match value.duration_since(std::time::SystemTime::UNIX_EPOCH) {
            Ok(duration) => i64::try_from(duration.as_secs()).unwrap_or(i64::MAX) / SECONDS_IN_DAY,
            Err(err) => {
                let secs = i64::try_from(err.duration().as_secs()).unwrap_or(i64::MAX);
                -(secs.saturating_add(SECONDS_IN_DAY - 1) / SECONDS_IN_DAY)
            }
        };

        Date(days)
    }
}

// 0001-01-01 is day 1 of the common era for chrono.
#[cfg(feature = "chrono")]
const CE_TO_UNIX_DAYS: i64 = 719163;

#[cfg(feature = "chrono")]
impl TryFrom<Date> for chrono::NaiveDate {
    type Error = crate::Error;

    fn try_from(value: Date) -> Result<Self, Self::Error> {
        let days = value
            .0
            .checked_add(CE_TO_UNIX_DAYS)
            .and_then(|it| i32::try_from(it).ok())
            .ok_or(crate::Error::DateTooLarge)?;
        chrono::NaiveDate::from_num_days_from_ce_opt(days).ok_or(crate::Error::DateTooLarge)
    }
}
#[cfg(feature = "chrono")]
impl TryFrom<Date> for chrono::DateTime<chrono::Utc> {
    type Error = crate::Error;

    fn try_from(value: Date) -> Result<Self, Self::Error> {
        let naive = chrono::NaiveDate::try_from(value)?
            .and_hms_opt(0, 0, 0)
            .ok_or(crate::Error::DateTooLarge)?;

        Ok(chrono::TimeZone::from_utc_datetime(&chrono::Utc, &naive))
    }
}

#[cfg(feature = "chrono")]
impl From<chrono::NaiveDate> for Date {
    fn from(value: chrono::NaiveDate) -> Self {
        use chrono::Datelike;
        Date(value.num_days_from_ce() as i64 - CE_TO_UNIX_DAYS)
    }
}
#[cfg(feature = "chrono")]
impl From<chrono::DateTime<chrono::Utc>> for Date {
    #[inline]
    fn from(value: chrono::DateTime<chrono::Utc>) -> Self {
        Date::from(value.date_naive())
    }
}
#[cfg(feature = "chrono")]
impl From<chrono::DateTime<chrono::Local>> for Date {
    #[inline]
    fn from(value: chrono::DateTime<chrono::Local>) -> Self {
        Date::from(value.date_naive())
    }
}

#[cfg(feature = "time")]
impl TryFrom<Date> for time::Date {
    type Error = crate::Error;

    fn try_from(value: Date) -> Result<Self, Self::Error> {
        let jd = i32::try_from(value.julian_day()).map_err(|_| crate::Error::DateTooLarge)?;
        time::Date::from_julian_day(jd).map_err(|_| crate::Error::DateTooLarge)
    }
}
#[cfg(feature = "time")]
impl From<time::Date> for Date {
    #[inline]
    fn from(value: time::Date) -> Self {
        Date::from_julian_day(value.to_julian_day() as i64)
    }
}

impl std::fmt::Debug for Date {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let (y, m, d) = self.ymd();
        write!(f, "Date({y:04}-{m:02}-{d:02})")
    }
}

impl std::fmt::Display for Date {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let (y, m, d) = self.ymd();
        write!(f, "{y:04}-{m:02}-{d:02}")
    }
}

impl std::str::FromStr for Date {
    type Err = crate::Error;

    /// Parses an ISO `YYYY-MM-DD` date.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || crate::Error::UnknownName(s.to_string());
        let mut parts = s.trim().splitn(3, '-');
        let year = parts.next().ok_or_else(invalid)?.parse().map_err(|_| invalid())?;
        let month = parts.next().ok_or_else(invalid)?.parse().map_err(|_| invalid())?;
        let day = parts.next().ok_or_else(invalid)?.parse().map_err(|_| invalid())?;
        Date::try_from_ymd(year, month, day)
    }
}

pub trait DateExt: Into<Date> + Clone {
    fn is_holiday(&self, location: crate::Location) -> bool {
        crate::is_holiday(self.clone(), location)
    }

    fn hebrew_date(&self) -> Result<crate::CalendarDate, crate::Error> {
        crate::CalendarDate::try_from(self.clone().into())
    }
}

impl DateExt for Date {}
impl DateExt for std::time::SystemTime {}

#[cfg(feature = "chrono")]
impl DateExt for chrono::NaiveDate {}
#[cfg(feature = "chrono")]
impl DateExt for chrono::DateTime<chrono::Utc> {}
#[cfg(feature = "chrono")]
impl DateExt for chrono::DateTime<chrono::Local> {}

#[cfg(feature = "time")]
impl DateExt for time::Date {}
