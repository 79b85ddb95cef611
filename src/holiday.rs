use crate::calendar::CalendarDate;
use crate::date::Weekday;
use crate::hebrew::HebrewMonth;
use crate::locale::Locale;
use crate::Error;

/// Broad category of a holiday.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HolidayKind {
    Regular,
    /// Sukkot, Pesach, Shavuot and Shmini Atzeret.
    Pilgrimage,
    Fast,
    Memorial,
}

/// Which set of holiday rules applies.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Location {
    #[default]
    Israel,
    Diaspora,
}

impl Location {
    /// Zero selects Israel, anything else the diaspora.
    #[inline]
    pub const fn from_selector(selector: i32) -> Self {
        if selector == 0 {
            Location::Israel
        } else {
            Location::Diaspora
        }
    }

    #[inline]
    pub const fn is_diaspora(&self) -> bool {
        matches!(self, Location::Diaspora)
    }
}

macro_rules! declare_holidays {
    ($($ident: ident: $code: literal $kind: ident $english: literal $hebrew: literal),* $(,)?) => {
        /// Holidays, fasts and memorial days of the Hebrew calendar.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        #[repr(u8)]
        pub enum Holiday {$(
            #[doc = $english]
            $ident = $code
        ),*}

        impl Holiday {
            pub const ALL: &'static [Holiday] = &[$(
                Holiday::$ident
            ),*];

            pub const fn kind(&self) -> HolidayKind {
                match self {$(
                    Holiday::$ident => HolidayKind::$kind
                ),*}
            }

            pub fn name(&self, locale: Locale) -> &'static str {
                match locale {
                    Locale::English => match self {$(
                        Holiday::$ident => $english
                    ),*},
                    Locale::Hebrew => match self {$(
                        Holiday::$ident => $hebrew
                    ),*},
                }
            }

            pub const fn from_code(code: u8) -> Option<Self> {
                match code {
                    $($code => Some(Holiday::$ident),)*
                    _ => None,
                }
            }
        }
    };
}

include!(concat!(env!("OUT_DIR"), "/decl_holidays.rs"));

impl Holiday {
    /// Stable 1-based number of the holiday.
    #[inline]
    pub const fn code(&self) -> u8 {
        *self as u8
    }

    /// Holiday falling on `date`, if any.
    pub fn on(date: &CalendarDate, location: Location) -> Option<Holiday> {
        use HebrewMonth::*;
        use Holiday::*;
        use Weekday::*;

        let day = date.hebrew_day();
        let weekday = date.weekday();
        let year = date.hebrew_year();
        let diaspora = location.is_diaspora();

        let holiday = match (date.hebrew_month(), day) {
            (Tishrei, 1) => RoshHashanaI,
            (Tishrei, 2) => RoshHashanaII,
            (Tishrei, 3) if weekday != Saturday => TzomGedaliah,
            (Tishrei, 4) if weekday == Sunday => TzomGedaliah,
            (Tishrei, 10) => YomKippur,
            (Tishrei, 15) => Sukkot,
            (Tishrei, 16) if diaspora => Sukkot,
            (Tishrei, 16..=20) => HolHamoedSukkot,
            (Tishrei, 21) => HoshanaRaba,
            (Tishrei, 22) if diaspora => ShminiAtzeret,
            (Tishrei, 22) => SimchatTorah,
            (Tishrei, 23) if diaspora => SimchatTorah,

            (Kislev, 25..=30) | (Tevet, 1..=2) => Chanukah,
            (Tevet, 3) if date.year_info().kislev_length() == 29 => Chanukah,
            (Tevet, 10) => AsaraBTevet,
            (Shvat, 15) => TuBShvat,

            (Adar | AdarII, 11) if weekday == Thursday => TaanitEsther,
            (Adar | AdarII, 13) if weekday != Saturday => TaanitEsther,
            (Adar | AdarII, 14) => Purim,
            (Adar | AdarII, 15) => ShushanPurim,

            (Nisan, 15 | 21) => Pesach,
            (Nisan, 16 | 22) if diaspora => Pesach,
            (Nisan, 16..=20) => HolHamoedPesach,
            (Nisan, 26..=28) if year >= 5711 => {
                let nominal = weekday.add(27 - day as i64);
                let observed = match nominal {
                    Friday => 26,
                    Sunday => 28,
                    _ => 27,
                };
                if day != observed {
                    return None;
                }
                YomHaShoah
            }

            (Iyar, 2..=6) if year >= 5708 => {
                let nominal = weekday.add(5 - day as i64);
                let independence = match nominal {
                    Friday => 4,
                    Saturday => 3,
                    Monday if year >= 5764 => 6,
                    _ => 5,
                };
                if day == independence {
                    YomHaAtzmaut
                } else if day + 1 == independence {
                    YomHaZikaron
                } else {
                    return None;
                }
            }
            (Iyar, 18) => LagBOmer,
            (Iyar, 28) if year >= 5728 => YomYerushalayim,

            (Sivan, 5) => ErevShavuot,
            (Sivan, 6) => Shavuot,
            (Sivan, 7) if diaspora => Shavuot,

            (Tammuz, 17) if weekday != Saturday => TzomTammuz,
            (Tammuz, 18) if weekday == Sunday => TzomTammuz,
            (Av, 9) if weekday != Saturday => TishaBAv,
            (Av, 10) if weekday == Sunday => TishaBAv,
            (Av, 15) => TuBAv,

            _ => return None,
        };

        Some(holiday)
    }
}

impl std::fmt::Display for Holiday {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name(Locale::English))
    }
}

impl std::str::FromStr for Holiday {
    type Err = Error;

    /// Looks a holiday up by its English name, ignoring case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NAME_TO_HOLIDAY
            .get(s.trim().to_lowercase().as_str())
            .copied()
            .ok_or_else(|| Error::UnknownName(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn on(y: i32, m: u32, d: u32, location: Location) -> Option<Holiday> {
        CalendarDate::from_gregorian(y, m, d).unwrap().holiday(location)
    }

    #[test]
    fn codes_are_stable() {
        assert_eq!(Holiday::ALL.len(), 27);
        for (i, holiday) in Holiday::ALL.iter().enumerate() {
            assert_eq!(holiday.code() as usize, i + 1);
            assert_eq!(Holiday::from_code(holiday.code()), Some(*holiday));
        }
        assert_eq!(Holiday::from_code(0), None);
    }

    #[test]
    fn high_holidays() {
        assert_eq!(on(2024, 10, 3, Location::Israel), Some(Holiday::RoshHashanaI));
        assert_eq!(on(2024, 10, 4, Location::Israel), Some(Holiday::RoshHashanaII));
        // 3 Tishrei 5785 is a Saturday
        assert_eq!(on(2024, 10, 5, Location::Israel), None);
        assert_eq!(on(2024, 10, 6, Location::Israel), Some(Holiday::TzomGedaliah));
        assert_eq!(on(2024, 10, 12, Location::Israel), Some(Holiday::YomKippur));
    }

    #[test]
    fn sukkot_depends_on_location() {
        assert_eq!(on(2024, 10, 17, Location::Israel), Some(Holiday::Sukkot));
        assert_eq!(on(2024, 10, 18, Location::Israel), Some(Holiday::HolHamoedSukkot));
        assert_eq!(on(2024, 10, 18, Location::Diaspora), Some(Holiday::Sukkot));
        assert_eq!(on(2024, 10, 23, Location::Israel), Some(Holiday::HoshanaRaba));
        assert_eq!(on(2024, 10, 24, Location::Israel), Some(Holiday::SimchatTorah));
        assert_eq!(on(2024, 10, 24, Location::Diaspora), Some(Holiday::ShminiAtzeret));
        assert_eq!(on(2024, 10, 25, Location::Diaspora), Some(Holiday::SimchatTorah));
        assert_eq!(on(2024, 10, 25, Location::Israel), None);
    }

    #[test]
    fn chanukah_length_follows_kislev() {
        // Kislev 5785 has 30 days: 25 Kislev is 2024-12-26, 2 Tevet 2025-01-02
        assert_eq!(on(2024, 12, 25, Location::Israel), None);
        assert_eq!(on(2024, 12, 26, Location::Israel), Some(Holiday::Chanukah));
        assert_eq!(on(2025, 1, 2, Location::Israel), Some(Holiday::Chanukah));
        assert_eq!(on(2025, 1, 3, Location::Israel), None);
        assert_eq!(on(2025, 1, 10, Location::Israel), Some(Holiday::AsaraBTevet));
    }

    #[test]
    fn purim() {
        assert_eq!(on(2025, 3, 13, Location::Israel), Some(Holiday::TaanitEsther));
        assert_eq!(on(2025, 3, 14, Location::Israel), Some(Holiday::Purim));
        assert_eq!(on(2025, 3, 15, Location::Israel), Some(Holiday::ShushanPurim));
        // leap year: Purim is in Adar II
        assert_eq!(on(2024, 3, 24, Location::Israel), Some(Holiday::Purim));
        assert_eq!(on(2024, 2, 23, Location::Israel), None);
    }

    #[test]
    fn modern_days_move_off_shabbat() {
        // 27 Nisan 5785 is a Friday
        assert_eq!(on(2025, 4, 24, Location::Israel), Some(Holiday::YomHaShoah));
        assert_eq!(on(2025, 4, 25, Location::Israel), None);
        // 5 Iyar 5785 is a Saturday
        assert_eq!(on(2025, 4, 30, Location::Israel), Some(Holiday::YomHaZikaron));
        assert_eq!(on(2025, 5, 1, Location::Israel), Some(Holiday::YomHaAtzmaut));
        assert_eq!(on(2025, 5, 3, Location::Israel), None);
        // 5 Iyar 5784 is a Monday
        assert_eq!(on(2024, 5, 13, Location::Israel), Some(Holiday::YomHaZikaron));
        assert_eq!(on(2024, 5, 14, Location::Israel), Some(Holiday::YomHaAtzmaut));
    }

    #[test]
    fn pesach_and_shavuot() {
        assert_eq!(on(2025, 4, 13, Location::Israel), Some(Holiday::Pesach));
        assert_eq!(on(2025, 4, 14, Location::Israel), Some(Holiday::HolHamoedPesach));
        assert_eq!(on(2025, 4, 14, Location::Diaspora), Some(Holiday::Pesach));
        assert_eq!(on(2025, 4, 20, Location::Diaspora), Some(Holiday::Pesach));
        assert_eq!(on(2025, 4, 20, Location::Israel), None);
        assert_eq!(on(2025, 6, 2, Location::Israel), Some(Holiday::Shavuot));
        assert_eq!(on(2025, 6, 3, Location::Israel), None);
        assert_eq!(on(2025, 6, 3, Location::Diaspora), Some(Holiday::Shavuot));
    }

    #[test]
    fn summer_fasts() {
        // 17 Tammuz and 9 Av 5785 are both on Sunday
        assert_eq!(on(2025, 7, 13, Location::Israel), Some(Holiday::TzomTammuz));
        assert_eq!(on(2025, 8, 3, Location::Israel), Some(Holiday::TishaBAv));
        // 9 Av 5779 fell on Shabbat
        assert_eq!(on(2019, 8, 10, Location::Israel), None);
        assert_eq!(on(2019, 8, 11, Location::Israel), Some(Holiday::TishaBAv));
    }

    #[test]
    fn names_and_kinds() {
        assert_eq!(Holiday::YomKippur.kind(), HolidayKind::Fast);
        assert_eq!(Holiday::Shavuot.kind(), HolidayKind::Pilgrimage);
        assert_eq!(Holiday::YomHaShoah.kind(), HolidayKind::Memorial);
        assert_eq!(Holiday::Sukkot.name(Locale::Hebrew), "סוכות");
        assert_eq!("tu b'shvat".parse::<Holiday>(), Ok(Holiday::TuBShvat));
        assert_eq!("Yom Kippur".parse::<Holiday>(), Ok(Holiday::YomKippur));
        assert!("Christmas".parse::<Holiday>().is_err());
    }
}
