//! Hebrew calendar arithmetic.
//!
//! Years start at the molad (mean new moon) of Tishrei, counted in parts of an
//! hour from the molad of year 3744, then postponed according to the dehiyyot.
//! Months are numbered the classic way: 1 Tishrei .. 12 Elul, 13 Adar I and
//! 14 Adar II.

use crate::date::Weekday;
use crate::Error;

const HOUR: i64 = 1080;
const DAY: i64 = 24 * HOUR;
const WEEK: i64 = 7 * DAY;

const fn parts(hours: i64, parts: i64) -> i64 {
    hours * HOUR + parts
}

/// Mean lunation beyond whole weeks: 29d 12h 793p minus 28 days.
const MONTH: i64 = DAY + parts(12, 793);

/// Julian day of the day before 1 Tishrei 3744.
const JD_3744: i64 = 1715119;

pub const MIN_YEAR: i32 = 3761;
pub const MAX_YEAR: i32 = 9999;

/// Days from the 3744 epoch to 1 Tishrei of `hebrew_year`.
///
/// Only meaningful for years from 3744 on.
pub(crate) const fn days_from_3744(hebrew_year: i32) -> i64 {
    let years_from_3744 = (hebrew_year - 3744) as i64;
    // molad 3744 shifted by six hours so that days start at midnight
    let molad_3744 = parts(1 + 6, 779);

    let leap_months = (years_from_3744 * 7 + 1) / 19;
    let leap_left = (years_from_3744 * 7 + 1) % 19;
    let months = years_from_3744 * 12 + leap_months;

    let molad = months * MONTH + molad_3744;
    let mut days = months * 28 + molad / DAY - 2;

    let parts_left_in_week = molad % WEEK;
    let parts_left_in_day = molad % DAY;
    let mut week_day = parts_left_in_week / DAY;

    // molad zaken: GaTaRaD and BeTUTaKPaT
    if (leap_left < 12 && week_day == 3 && parts_left_in_day >= parts(9 + 6, 204))
        || (leap_left < 7 && week_day == 2 && parts_left_in_day >= parts(15 + 6, 589))
    {
        days += 1;
        week_day += 1;
    }

    // lo ADU rosh
    if week_day == 1 || week_day == 4 || week_day == 6 {
        days += 1;
    }

    days
}

#[inline]
const fn new_year_jd(hebrew_year: i32) -> i64 {
    days_from_3744(hebrew_year) + JD_3744
}

/// Julian day of 1 Tishrei of the first supported year.
pub(crate) const FIRST_JD: i64 = new_year_jd(MIN_YEAR);
/// Julian day following the last supported day.
pub(crate) const END_JD: i64 = new_year_jd(MAX_YEAR + 1);

/// Fails with the (approximate) Hebrew year when `jd` is outside of the
/// supported years.
pub(crate) fn check_julian_day(jd: i64) -> Result<(), Error> {
    if (FIRST_JD..END_JD).contains(&jd) {
        return Ok(());
    }
    let year = crate::Date::from_julian_day(jd).year().saturating_add(3760);
    Err(Error::YearOutOfRange(if jd < FIRST_JD {
        year.min(MIN_YEAR - 1)
    } else {
        year.max(MAX_YEAR + 1)
    }))
}

/// Month of the Hebrew year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum HebrewMonth {
    Tishrei = 1,
    Cheshvan = 2,
    Kislev = 3,
    Tevet = 4,
    Shvat = 5,
    Adar = 6,
    Nisan = 7,
    Iyar = 8,
    Sivan = 9,
    Tammuz = 10,
    Av = 11,
    Elul = 12,
    AdarI = 13,
    AdarII = 14,
}

static MONTH_ALIASES: phf::Map<&'static str, HebrewMonth> = phf::phf_map! {
    "tishrei" => HebrewMonth::Tishrei,
    "tishri" => HebrewMonth::Tishrei,
    "cheshvan" => HebrewMonth::Cheshvan,
    "heshvan" => HebrewMonth::Cheshvan,
    "marcheshvan" => HebrewMonth::Cheshvan,
    "kislev" => HebrewMonth::Kislev,
    "tevet" => HebrewMonth::Tevet,
    "shvat" => HebrewMonth::Shvat,
    "sh'vat" => HebrewMonth::Shvat,
    "shevat" => HebrewMonth::Shvat,
    "adar" => HebrewMonth::Adar,
    "nisan" => HebrewMonth::Nisan,
    "iyar" => HebrewMonth::Iyar,
    "iyyar" => HebrewMonth::Iyar,
    "sivan" => HebrewMonth::Sivan,
    "tammuz" => HebrewMonth::Tammuz,
    "tamuz" => HebrewMonth::Tammuz,
    "av" => HebrewMonth::Av,
    "elul" => HebrewMonth::Elul,
    "adar i" => HebrewMonth::AdarI,
    "adar 1" => HebrewMonth::AdarI,
    "adar ii" => HebrewMonth::AdarII,
    "adar 2" => HebrewMonth::AdarII,
};

impl HebrewMonth {
    const ALL: [HebrewMonth; 14] = [
        HebrewMonth::Tishrei,
        HebrewMonth::Cheshvan,
        HebrewMonth::Kislev,
        HebrewMonth::Tevet,
        HebrewMonth::Shvat,
        HebrewMonth::Adar,
        HebrewMonth::Nisan,
        HebrewMonth::Iyar,
        HebrewMonth::Sivan,
        HebrewMonth::Tammuz,
        HebrewMonth::Av,
        HebrewMonth::Elul,
        HebrewMonth::AdarI,
        HebrewMonth::AdarII,
    ];

    pub const fn from_number(number: u32) -> Option<Self> {
        if number >= 1 && number <= 14 {
            Some(Self::ALL[number as usize - 1])
        } else {
            None
        }
    }

    #[inline]
    pub const fn number(&self) -> u32 {
        *self as u32
    }
}

impl std::str::FromStr for HebrewMonth {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_lowercase();
        if let Some(month) = MONTH_ALIASES.get(key.as_str()) {
            return Ok(*month);
        }
        key.parse()
            .ok()
            .and_then(HebrewMonth::from_number)
            .ok_or_else(|| Error::UnknownName(s.to_string()))
    }
}

/// A Hebrew year, from 1 Tishrei to the last day of Elul.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct HebrewYear {
    year: i32,
    new_year: i64,
    length: u16,
}

impl HebrewYear {
    pub fn new(year: i32) -> Result<Self, Error> {
        if !(MIN_YEAR..=MAX_YEAR).contains(&year) {
            return Err(Error::YearOutOfRange(year));
        }
        Ok(Self::new_unchecked(year))
    }

    pub(crate) const fn new_unchecked(year: i32) -> Self {
        let new_year = new_year_jd(year);
        let length = (new_year_jd(year + 1) - new_year) as u16;
        Self {
            year,
            new_year,
            length,
        }
    }

    /// Year containing the given Julian day, which has to pass
    /// [`check_julian_day`].
    pub(crate) fn containing(jd: i64) -> Self {
        // Gregorian year + 3760 is never late, at most one year early.
        let gregorian_year = crate::Date::from_julian_day(jd).year();
        let mut year = Self::new_unchecked(gregorian_year + 3760);
        if year.next_new_year() <= jd {
            year = Self::new_unchecked(year.year + 1);
        }
        while year.new_year > jd {
            year = Self::new_unchecked(year.year - 1);
        }
        year
    }

    #[inline]
    pub const fn number(&self) -> i32 {
        self.year
    }

    /// Length of the year in days: 353, 354, 355, 383, 384 or 385.
    #[inline]
    pub const fn length(&self) -> u16 {
        self.length
    }

    #[inline]
    pub const fn is_leap(&self) -> bool {
        self.length > 355
    }

    /// Julian day of 1 Tishrei.
    #[inline]
    pub const fn new_year_jd(&self) -> i64 {
        self.new_year
    }

    #[inline]
    pub(crate) const fn next_new_year(&self) -> i64 {
        self.new_year + self.length as i64
    }

    #[inline]
    pub const fn new_year_weekday(&self) -> Weekday {
        Weekday::from_julian_day(self.new_year)
    }

    /// One of the fourteen possible combinations of length and weekday of
    /// Rosh Hashana, numbered 1..=14.
    pub const fn year_type(&self) -> u8 {
        use Weekday::*;
        match (self.length, self.new_year_weekday()) {
            (353, Monday) => 1,
            (353, Saturday) => 2,
            (354, Tuesday) => 3,
            (354, Thursday) => 4,
            (355, Monday) => 5,
            (355, Thursday) => 6,
            (355, Saturday) => 7,
            (383, Monday) => 8,
            (383, Thursday) => 9,
            (383, Saturday) => 10,
            (384, Tuesday) => 11,
            (385, Monday) => 12,
            (385, Thursday) => 13,
            (385, Saturday) => 14,
            _ => 0,
        }
    }

    /// Cheshvan has 30 days in a complete year.
    #[inline]
    pub const fn cheshvan_length(&self) -> u8 {
        if self.length % 10 == 5 {
            30
        } else {
            29
        }
    }

    /// Kislev has 29 days in a deficient year.
    #[inline]
    pub const fn kislev_length(&self) -> u8 {
        if self.length % 10 == 3 {
            29
        } else {
            30
        }
    }

    /// Number of days in `month`, or `None` when the month is not part of
    /// this year.
    pub const fn month_length(&self, month: HebrewMonth) -> Option<u8> {
        use HebrewMonth::*;
        let leap = self.is_leap();
        Some(match month {
            Cheshvan => self.cheshvan_length(),
            Kislev => self.kislev_length(),
            Adar if leap => return None,
            AdarI | AdarII if !leap => return None,
            Tishrei | Shvat | Nisan | Sivan | Av | AdarI => 30,
            Tevet | Adar | Iyar | Tammuz | Elul | AdarII => 29,
        })
    }

    /// Months of this year in civil order, starting from Tishrei.
    pub fn months(&self) -> impl Iterator<Item = (HebrewMonth, u8)> + '_ {
        const ORDER: [HebrewMonth; 14] = {
            use HebrewMonth::*;
            [
                Tishrei, Cheshvan, Kislev, Tevet, Shvat, Adar, AdarI, AdarII, Nisan, Iyar, Sivan,
                Tammuz, Av, Elul,
            ]
        };
        ORDER
            .into_iter()
            .filter_map(move |month| self.month_length(month).map(|length| (month, length)))
    }

    /// Julian day of the first day of `month`.
    pub fn month_start(&self, month: HebrewMonth) -> Option<i64> {
        let mut jd = self.new_year;
        for (m, length) in self.months() {
            if m == month {
                return Some(jd);
            }
            jd += length as i64;
        }
        None
    }

    /// Moves a month number into this year's months: plain Adar becomes
    /// Adar II in a leap year, Adar I and II become Adar otherwise.
    pub const fn normalize_month(&self, month: HebrewMonth) -> HebrewMonth {
        match month {
            HebrewMonth::Adar if self.is_leap() => HebrewMonth::AdarII,
            HebrewMonth::AdarI | HebrewMonth::AdarII if !self.is_leap() => HebrewMonth::Adar,
            other => other,
        }
    }
}

/// Day, month and year on the Hebrew calendar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HebrewDate {
    day: u8,
    month: HebrewMonth,
    year: i32,
}

impl HebrewDate {
    /// Validates a Hebrew date. Adar is read as Adar II in a leap year.
    pub fn new(day: u32, month: HebrewMonth, year: i32) -> Result<Self, Error> {
        let invalid = || Error::InvalidHebrewDate {
            day,
            month: month.number(),
            year,
        };
        let hebrew_year = HebrewYear::new(year)?;
        let month = hebrew_year.normalize_month(month);
        let length = hebrew_year.month_length(month).ok_or_else(invalid)?;
        if day < 1 || day > length as u32 {
            return Err(invalid());
        }
        Ok(Self {
            day: day as u8,
            month,
            year,
        })
    }

    pub(crate) fn from_julian_day_in(jd: i64, year: &HebrewYear) -> Self {
        let mut days = jd - year.new_year_jd();
        for (month, length) in year.months() {
            if days < length as i64 {
                return Self {
                    day: days as u8 + 1,
                    month,
                    year: year.number(),
                };
            }
            days -= length as i64;
        }
        // The last month always absorbs the remainder of a valid year.
        Self {
            day: (days + 29) as u8,
            month: HebrewMonth::Elul,
            year: year.number(),
        }
    }

    pub fn from_julian_day(jd: i64) -> Result<Self, Error> {
        check_julian_day(jd)?;
        Ok(Self::from_julian_day_in(jd, &HebrewYear::containing(jd)))
    }

    pub fn to_julian_day(&self) -> i64 {
        let year = HebrewYear::new_unchecked(self.year);
        // month membership was checked on construction
        year.month_start(self.month).unwrap_or(year.new_year_jd()) + self.day as i64 - 1
    }

    #[inline]
    pub const fn day(&self) -> u32 {
        self.day as u32
    }

    #[inline]
    pub const fn month(&self) -> HebrewMonth {
        self.month
    }

    #[inline]
    pub const fn year(&self) -> i32 {
        self.year
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Date;

    fn hebrew(y: i32, m: u32, d: u32) -> HebrewDate {
        HebrewDate::from_julian_day(Date::from_ymd(y, m, d).julian_day()).unwrap()
    }

    #[test]
    fn rosh_hashana_anchors() {
        assert_eq!(
            HebrewYear::new(5785).unwrap().new_year_jd(),
            Date::from_ymd(2024, 10, 3).julian_day()
        );
        assert_eq!(
            HebrewYear::new(5786).unwrap().new_year_jd(),
            Date::from_ymd(2025, 9, 23).julian_day()
        );
        assert_eq!(
            HebrewYear::new(5787).unwrap().new_year_jd(),
            Date::from_ymd(2026, 9, 12).julian_day()
        );
    }

    #[test]
    fn year_lengths_and_weekdays_are_valid() {
        for year in MIN_YEAR..MAX_YEAR {
            let y = HebrewYear::new(year).unwrap();
            assert!(
                matches!(y.length(), 353 | 354 | 355 | 383 | 384 | 385),
                "{year}: {}",
                y.length()
            );
            assert!(matches!(
                y.new_year_weekday(),
                Weekday::Monday | Weekday::Tuesday | Weekday::Thursday | Weekday::Saturday
            ));
            assert_ne!(y.year_type(), 0, "{year}");
            assert_eq!(y.is_leap(), (7 * year + 1) % 19 < 7);
        }
    }

    #[test]
    fn extreme_julian_days_are_out_of_range() {
        assert!(matches!(
            HebrewDate::from_julian_day(i64::MIN),
            Err(Error::YearOutOfRange(year)) if year < MIN_YEAR
        ));
        assert!(matches!(
            HebrewDate::from_julian_day(i64::MAX),
            Err(Error::YearOutOfRange(year)) if year > MAX_YEAR
        ));
        assert_eq!(
            HebrewDate::from_julian_day(FIRST_JD - 1),
            Err(Error::YearOutOfRange(MIN_YEAR - 1))
        );
        assert_eq!(
            HebrewDate::from_julian_day(END_JD),
            Err(Error::YearOutOfRange(MAX_YEAR + 1))
        );
        assert!(HebrewDate::from_julian_day(END_JD - 1).is_ok());
    }

    #[test]
    fn julian_day_round_trip() {
        let start = HebrewYear::new(MIN_YEAR).unwrap().new_year_jd();
        let end = HebrewYear::new(6200).unwrap().new_year_jd();
        for jd in (start..end).step_by(3) {
            let date = HebrewDate::from_julian_day(jd).unwrap();
            assert_eq!(date.to_julian_day(), jd, "{date:?}");
        }
    }

    #[test]
    fn long_cheshvan_has_a_thirtieth() {
        // 5785 is a complete year
        let year = HebrewYear::new(5785).unwrap();
        assert_eq!(year.length(), 355);
        let date = HebrewDate::new(30, HebrewMonth::Cheshvan, 5785).unwrap();
        assert_eq!(
            HebrewDate::from_julian_day(date.to_julian_day()).unwrap(),
            date
        );
    }

    #[test]
    fn known_dates() {
        let d = hebrew(2024, 10, 12);
        assert_eq!((d.day(), d.month(), d.year()), (10, HebrewMonth::Tishrei, 5785));
        let d = hebrew(2024, 3, 24);
        assert_eq!((d.day(), d.month(), d.year()), (14, HebrewMonth::AdarII, 5784));
        let d = hebrew(2024, 4, 23);
        assert_eq!((d.day(), d.month(), d.year()), (15, HebrewMonth::Nisan, 5784));
        let d = hebrew(2026, 10, 19);
        assert_eq!((d.day(), d.month(), d.year()), (8, HebrewMonth::Cheshvan, 5787));
    }

    #[test]
    fn adar_follows_the_year() {
        let leap = HebrewDate::new(14, HebrewMonth::Adar, 5784).unwrap();
        assert_eq!(leap.month(), HebrewMonth::AdarII);
        let common = HebrewDate::new(14, HebrewMonth::AdarII, 5785).unwrap();
        assert_eq!(common.month(), HebrewMonth::Adar);
    }

    #[test]
    fn rejects_invalid_days() {
        assert!(HebrewDate::new(30, HebrewMonth::Tevet, 5785).is_err());
        assert!(HebrewDate::new(0, HebrewMonth::Nisan, 5785).is_err());
        assert_eq!(
            HebrewDate::new(1, HebrewMonth::Nisan, 12000),
            Err(Error::YearOutOfRange(12000))
        );
    }

    #[test]
    fn month_names_parse() {
        assert_eq!("Heshvan".parse::<HebrewMonth>(), Ok(HebrewMonth::Cheshvan));
        assert_eq!("adar ii".parse::<HebrewMonth>(), Ok(HebrewMonth::AdarII));
        assert_eq!("7".parse::<HebrewMonth>(), Ok(HebrewMonth::Nisan));
        assert!("Thermidor".parse::<HebrewMonth>().is_err());
    }
}
