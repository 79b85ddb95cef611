use crate::date::{Date, Weekday};
use crate::hebrew::{self, HebrewDate, HebrewMonth, HebrewYear};
use crate::holiday::{Holiday, Location};
use crate::locale::{self, FormatStyle, Locale};
use crate::parasha::{Parasha, Schedule};
use crate::sun::{self, Coordinates, ShabbatTime};
use crate::Error;

/// A day known on both the Gregorian and the Hebrew calendar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CalendarDate {
    date: Date,
    hebrew: HebrewDate,
    year: HebrewYear,
}

impl CalendarDate {
    /// The current local day.
    pub fn today() -> Self {
        let date = Date::today();
        let year = HebrewYear::containing(date.julian_day());
        Self::build(date, year)
    }

    pub fn from_gregorian(year: i32, month: u32, day: u32) -> Result<Self, Error> {
        Self::try_from(Date::try_from_ymd(year, month, day)?)
    }

    pub fn from_hebrew(day: u32, month: HebrewMonth, year: i32) -> Result<Self, Error> {
        let hebrew = HebrewDate::new(day, month, year)?;
        let year = HebrewYear::new(year)?;
        Ok(Self {
            date: Date::from_julian_day(hebrew.to_julian_day()),
            hebrew,
            year,
        })
    }

    pub fn from_julian_day(jd: i64) -> Result<Self, Error> {
        hebrew::check_julian_day(jd)?;
        Self::try_from(Date::from_julian_day(jd))
    }

    fn build(date: Date, year: HebrewYear) -> Self {
        let hebrew = HebrewDate::from_julian_day_in(date.julian_day(), &year);
        log::trace!("{date} is {hebrew:?}");
        Self { date, hebrew, year }
    }

    #[inline]
    pub const fn date(&self) -> Date {
        self.date
    }

    #[inline]
    pub const fn hebrew_date(&self) -> HebrewDate {
        self.hebrew
    }

    #[inline]
    pub const fn year_info(&self) -> HebrewYear {
        self.year
    }

    #[inline]
    pub const fn gregorian_day(&self) -> u32 {
        self.date.day()
    }

    #[inline]
    pub const fn gregorian_month(&self) -> u32 {
        self.date.month()
    }

    #[inline]
    pub const fn gregorian_year(&self) -> i32 {
        self.date.year()
    }

    #[inline]
    pub const fn hebrew_day(&self) -> u32 {
        self.hebrew.day()
    }

    #[inline]
    pub const fn hebrew_month(&self) -> HebrewMonth {
        self.hebrew.month()
    }

    #[inline]
    pub const fn hebrew_year(&self) -> i32 {
        self.hebrew.year()
    }

    #[inline]
    pub const fn weekday(&self) -> Weekday {
        self.date.weekday()
    }

    #[inline]
    pub const fn julian_day(&self) -> i64 {
        self.date.julian_day()
    }

    /// Day of the Hebrew year, 1 Tishrei being 1.
    #[inline]
    pub const fn day_of_year(&self) -> u32 {
        (self.julian_day() - self.year.new_year_jd()) as u32 + 1
    }

    /// Week of the Hebrew year, weeks starting on Sunday.
    pub const fn week_of_year(&self) -> u32 {
        let offset = self.year.new_year_weekday().number() as u32 - 1;
        (self.day_of_year() - 1 + offset) / 7 + 1
    }

    #[inline]
    pub const fn year_length(&self) -> u16 {
        self.year.length()
    }

    #[inline]
    pub const fn new_year_weekday(&self) -> Weekday {
        self.year.new_year_weekday()
    }

    #[inline]
    pub const fn year_type(&self) -> u8 {
        self.year.year_type()
    }

    #[inline]
    pub const fn is_leap_year(&self) -> bool {
        self.year.is_leap()
    }

    pub fn holiday(&self, location: Location) -> Option<Holiday> {
        Holiday::on(self, location)
    }

    pub fn parasha(&self, location: Location) -> Option<Parasha> {
        Parasha::on(self, location)
    }

    /// Readings of every Shabbat in this date's Hebrew year.
    pub fn readings(&self, location: Location) -> Schedule {
        Schedule::new(&self.year, location)
    }

    /// Day of the Omer count, from 16 Nisan (1) to 5 Sivan (49).
    pub fn omer_day(&self) -> Option<u32> {
        let nisan = self.year.month_start(HebrewMonth::Nisan)?;
        let day = self.julian_day() - (nisan + 14);
        (1..=49).contains(&day).then_some(day as u32)
    }

    /// UTC candle lighting on Friday or end of Shabbat on Saturday.
    pub fn shabbat_time(&self, coordinates: &Coordinates) -> Option<ShabbatTime> {
        sun::utc_shabbat_time(self.date, coordinates)
    }

    pub fn format(&self, locale: Locale, location: Location, style: FormatStyle) -> String {
        locale::format_date(self, locale, location, style)
    }

    /// Next day.
    pub fn succ(&self) -> Result<Self, Error> {
        self.add_days(1)
    }

    /// Previous day.
    pub fn pred(&self) -> Result<Self, Error> {
        self.add_days(-1)
    }

    pub fn add_days(&self, days: i64) -> Result<Self, Error> {
        let date = self.date.checked_add_days(days).ok_or(Error::DateTooLarge)?;
        Self::try_from(date)
    }
}

impl TryFrom<Date> for CalendarDate {
    type Error = Error;

    fn try_from(date: Date) -> Result<Self, Self::Error> {
        let jd = date.julian_day();
        hebrew::check_julian_day(jd)?;
        Ok(Self::build(date, HebrewYear::containing(jd)))
    }
}

impl From<CalendarDate> for Date {
    fn from(value: CalendarDate) -> Self {
        value.date
    }
}

impl PartialOrd for CalendarDate {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for CalendarDate {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.date.cmp(&other.date)
    }
}

impl std::fmt::Display for CalendarDate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.format(Locale::English, Location::Israel, FormatStyle::Short))?;
        write!(f, " {}", self.hebrew_year())
    }
}

/// Read-only access to a date and its Hebrew rendering.
///
/// Selectors are plain integers: a zero `style` asks for the long format and
/// a zero `diaspora` for the holidays observed in Israel. Any other value
/// picks the short format and the diaspora holidays respectively.
pub trait HebrewCalendar: Sized {
    fn today() -> Self;

    fn gregorian_day(&self) -> u32;
    fn gregorian_month(&self) -> u32;
    fn gregorian_year(&self) -> i32;

    /// Formats the Hebrew date with Israel holidays.
    fn format_date(&self, style: i32) -> String {
        self.format_date_with(0, style)
    }

    fn format_date_with(&self, diaspora: i32, style: i32) -> String;
}

impl HebrewCalendar for CalendarDate {
    fn today() -> Self {
        CalendarDate::today()
    }

    fn gregorian_day(&self) -> u32 {
        self.date.day()
    }

    fn gregorian_month(&self) -> u32 {
        self.date.month()
    }

    fn gregorian_year(&self) -> i32 {
        self.date.year()
    }

    fn format_date_with(&self, diaspora: i32, style: i32) -> String {
        self.format(
            Locale::default(),
            Location::from_selector(diaspora),
            FormatStyle::from_selector(style),
        )
    }
}
