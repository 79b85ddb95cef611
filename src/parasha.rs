//! Weekly Torah readings.
//!
//! The year's Shabbatot are laid out once per Hebrew year and location. Festival
//! days displace the reading, and pairs of portions are read together when a
//! year has fewer free Shabbatot than portions.

use log::{debug, warn};

use crate::calendar::CalendarDate;
use crate::date::{Date, Weekday};
use crate::hebrew::{HebrewMonth, HebrewYear};
use crate::holiday::Location;
use crate::locale::Locale;
use crate::Error;

macro_rules! declare_parashot {
    ($($ident: ident: $code: literal $english: literal $hebrew: literal),* $(,)?) => {
        /// Weekly Torah portion, or a pair of portions read together.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        #[repr(u8)]
        pub enum Parasha {$(
            #[doc = $english]
            $ident = $code
        ),*}

        impl Parasha {
            pub const ALL: &'static [Parasha] = &[$(
                Parasha::$ident
            ),*];

            pub fn name(&self, locale: Locale) -> &'static str {
                match locale {
                    Locale::English => match self {$(
                        Parasha::$ident => $english
                    ),*},
                    Locale::Hebrew => match self {$(
                        Parasha::$ident => $hebrew
                    ),*},
                }
            }

            pub const fn from_code(code: u8) -> Option<Self> {
                match code {
                    $($code => Some(Parasha::$ident),)*
                    _ => None,
                }
            }
        }
    };
}

include!(concat!(env!("OUT_DIR"), "/decl_parashot.rs"));

/// Last portion read on its own during the regular cycle. Vayeilech and
/// Ha'Azinu are read before Simchat Torah unless Vayeilech is joined.
const LAST_REGULAR: u8 = 51;

impl Parasha {
    #[inline]
    pub const fn code(&self) -> u8 {
        *self as u8
    }

    #[inline]
    pub const fn is_joined(&self) -> bool {
        self.code() > 54
    }

    /// Pair read together, keyed by the first portion.
    pub const fn joined(first: Parasha) -> Option<Parasha> {
        use Parasha::*;
        Some(match first {
            Vayakhel => VayakhelPekudei,
            Tazria => TazriaMetzora,
            AchreiMot => AchreiMotKedoshim,
            Behar => BeharBechukotai,
            Chukat => ChukatBalak,
            Matot => MatotMasei,
            Nitzavim => NitzavimVayeilech,
            _ => return None,
        })
    }

    /// The two portions of a joined pair.
    pub fn parts(&self) -> Option<(Parasha, Parasha)> {
        Parasha::ALL[..LAST_REGULAR as usize]
            .iter()
            .find(|first| Parasha::joined(**first) == Some(*self))
            .and_then(|first| Some((*first, Parasha::from_code(first.code() + 1)?)))
    }

    /// Reading on `date`, `None` on weekdays and on Shabbatot taken by a
    /// festival.
    ///
    /// Lays out the whole year on each call. Walking many days, build a
    /// [`Schedule`] once per year instead.
    pub fn on(date: &CalendarDate, location: Location) -> Option<Parasha> {
        if date.weekday() != Weekday::Saturday {
            return None;
        }
        Schedule::new(&date.year_info(), location).reading(date.date())
    }
}

impl std::fmt::Display for Parasha {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name(Locale::English))
    }
}

impl std::str::FromStr for Parasha {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NAME_TO_PARASHA
            .get(s.trim().to_lowercase().as_str())
            .copied()
            .ok_or_else(|| Error::UnknownName(s.to_string()))
    }
}

/// Readings of every Shabbat in one Hebrew year.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schedule {
    readings: Vec<(Date, Option<Parasha>)>,
}

fn day_in(year: &HebrewYear, month: HebrewMonth, day: i64) -> i64 {
    year.month_start(month).unwrap_or(year.new_year_jd()) + day - 1
}

/// Bit set of the first portions of joined pairs.
#[derive(Debug, Clone, Copy, Default)]
struct Joins(u64);

impl Joins {
    fn insert(&mut self, first: Parasha) {
        self.0 |= 1 << first.code();
    }

    fn contains(&self, code: u8) -> bool {
        self.0 & (1 << code) != 0
    }

    fn sequence(&self) -> Vec<Parasha> {
        let mut out = Vec::with_capacity(LAST_REGULAR as usize);
        let mut code = 1;
        while code <= LAST_REGULAR {
            let single = Parasha::from_code(code);
            if self.contains(code) {
                out.extend(single.and_then(Parasha::joined));
                code += 2;
            } else {
                out.extend(single);
                code += 1;
            }
        }
        out
    }
}

impl Schedule {
    pub fn new(year: &HebrewYear, location: Location) -> Self {
        use Weekday::*;

        let diaspora = location.is_diaspora();
        let tishrei = year.new_year_jd();
        let nisan = day_in(year, HebrewMonth::Nisan, 1);
        let sivan = day_in(year, HebrewMonth::Sivan, 1);
        let end = tishrei + year.length() as i64;

        let extra = diaspora as i64;
        let simchat_torah = tishrei + 21 + extra;
        let is_festival = |jd: i64| {
            let t = jd - tishrei;
            let n = jd - nisan;
            let s = jd - sivan;
            matches!(t, 0 | 1 | 9)
                || (14..=21 + extra).contains(&t)
                || (14..=20 + extra).contains(&n)
                || (5..=5 + extra).contains(&s)
        };

        let mut before_bereshit = match year.new_year_weekday() {
            Monday | Tuesday => vec![Parasha::Vayeilech, Parasha::HaAzinu],
            _ => vec![Parasha::HaAzinu],
        }
        .into_iter();

        let first_shabbat = tishrei + (7 - year.new_year_weekday().number() as i64) % 7;
        let mut readings = Vec::with_capacity(56);
        let mut free = Vec::with_capacity(52);
        for jd in (first_shabbat..end).step_by(7) {
            let date = Date::from_julian_day(jd);
            if is_festival(jd) {
                let reading = (jd == simchat_torah).then_some(Parasha::VezotHabracha);
                readings.push((date, reading));
            } else if jd < simchat_torah {
                readings.push((date, before_bereshit.next()));
            } else {
                free.push(readings.len());
                readings.push((date, None));
            }
        }

        let mut joins = Joins::default();
        if !year.is_leap() {
            joins.insert(Parasha::Tazria);
            joins.insert(Parasha::AchreiMot);
            if !(year.length() == 355 && year.new_year_weekday() == Thursday) {
                joins.insert(Parasha::Vayakhel);
            }
            if diaspora || Weekday::from_julian_day(nisan + 14) != Saturday {
                joins.insert(Parasha::Behar);
            }
        }
        if diaspora && Weekday::from_julian_day(sivan + 6) == Saturday {
            joins.insert(Parasha::Chukat);
        }
        if matches!(Weekday::from_julian_day(end), Thursday | Saturday) {
            joins.insert(Parasha::Nitzavim);
        }

        let mut sequence = joins.sequence();
        if sequence.len() == free.len() + 1 {
            joins.insert(Parasha::Matot);
            sequence = joins.sequence();
        }
        if sequence.len() != free.len() {
            warn!(
                "year {} has {} free shabbatot for {} readings",
                year.number(),
                free.len(),
                sequence.len()
            );
        }
        debug!(
            "readings of {} ({:?}): {} free shabbatot, joins {:#x}",
            year.number(),
            location,
            free.len(),
            joins.0
        );

        for (slot, parasha) in free.into_iter().zip(sequence) {
            readings[slot].1 = Some(parasha);
        }

        Schedule { readings }
    }

    /// Reading on `date`, if it is a Shabbat of this year with one.
    pub fn reading(&self, date: Date) -> Option<Parasha> {
        self.readings
            .binary_search_by_key(&date, |(it, _)| *it)
            .ok()
            .and_then(|index| self.readings[index].1)
    }

    /// Every Shabbat of the year with its reading.
    pub fn iter(&self) -> impl Iterator<Item = (Date, Option<Parasha>)> + '_ {
        self.readings.iter().copied()
    }
}
