use std::ops::{Bound, RangeBounds};

use crate::calendar::CalendarDate;
use crate::date::Date;
use crate::hebrew::{HebrewYear, END_JD, FIRST_JD};
use crate::holiday::{Holiday, HolidayKind, Location};

/// A holiday falling on a specific day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Occurrence {
    pub date: CalendarDate,
    pub holiday: Holiday,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct KindSet(u8);

impl KindSet {
    #[inline]
    fn insert(&mut self, kind: HolidayKind) {
        self.0 |= 1 << kind as u8;
    }

    #[inline]
    fn contains(&self, kind: HolidayKind) -> bool {
        (self.0 >> kind as u8) & 1 == 1
    }
}

/// Search for holidays over a span of days.
///
/// Queries combine with [`Query::and`] or `&`: date filters intersect, kind
/// filters intersect, and the right hand location wins.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Query {
    location: Option<Location>,
    kinds: Option<KindSet>,
    date_filter: Option<DateQuery>,
}

impl Query {
    fn with_dates(date_filter: Option<DateQuery>) -> Self {
        Query {
            location: None,
            kinds: None,
            date_filter,
        }
    }

    /// Days from 1 Tishrei to the end of Elul of a Hebrew year.
    pub fn hebrew_year(year: i32) -> Self {
        let filter = match HebrewYear::new(year) {
            Ok(year) => DateQuery::DateRange(
                Date::from_julian_day(year.new_year_jd()),
                Date::from_julian_day(year.new_year_jd() + year.length() as i64),
            ),
            Err(_) => DateQuery::EMPTY,
        };
        Self::with_dates(Some(filter))
    }

    pub fn gregorian_year(year: i32) -> Self {
        Self::with_dates(Some(DateQuery::year(year)))
    }

    /// Gregorian years.
    pub fn year_range<R: RangeBounds<i32>>(value: R) -> Self {
        Self::with_dates(DateQuery::year_range(value))
    }

    pub fn date(value: impl Into<Date>) -> Self {
        Self::with_dates(Some(DateQuery::date(value)))
    }

    pub fn date_range<D, R>(value: R) -> Self
    where
        D: Into<Date> + Clone,
        R: RangeBounds<D>,
    {
        Self::with_dates(DateQuery::date_range(value))
    }

    /// Israel when not set.
    pub fn location(mut self, location: Location) -> Self {
        self.location = Some(location);
        self
    }

    pub fn kinds<I>(mut self, kinds: I) -> Self
    where
        I: IntoIterator<Item = HolidayKind>,
    {
        let mut set = KindSet::default();
        for kind in kinds {
            set.insert(kind);
        }
        self.kinds = Some(set);
        self
    }

    pub fn and(self, other: Self) -> Self {
        self & other
    }

    pub fn run(&self) -> Iter {
        let days = match self.date_filter {
            Some(empty) if empty.is_empty() => return Iter::Empty,
            Some(date_query) => date_query.as_julian_range(),
            None => FIRST_JD..END_JD,
        };
        let days = days.start.max(FIRST_JD)..days.end.min(END_JD);
        if days.is_empty() {
            return Iter::Empty;
        }
        log::debug!("searching holidays in julian days {days:?}");

        Iter::Days(IterDays {
            days,
            location: self.location.unwrap_or_default(),
            kinds: self.kinds,
        })
    }
}

impl std::ops::BitAnd for Query {
    type Output = Self;

    fn bitand(mut self, rhs: Self) -> Self::Output {
        self &= rhs;
        self
    }
}
impl std::ops::BitAndAssign for Query {
    fn bitand_assign(&mut self, rhs: Self) {
        self.location = rhs.location.or(self.location);
        self.kinds = match (self.kinds, rhs.kinds) {
            (Some(a), Some(b)) => Some(KindSet(a.0 & b.0)),
            (a, b) => a.or(b),
        };
        self.date_filter = match (self.date_filter, rhs.date_filter) {
            (None, Some(it)) => Some(it),
            (Some(it), None) => Some(it),
            (Some(a), Some(b)) => Some(a & b),
            (None, None) => None,
        };
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DateQuery {
    FromDate(Date),
    ToDate(Date),
    Exact(Date),
    DateRange(Date, Date),
}

fn start_of<D: Into<Date> + Clone>(bound: Bound<&D>) -> Option<Date> {
    match bound {
        Bound::Included(it) => Some(it.clone().into()),
        Bound::Excluded(it) => Some(it.clone().into().add_days(1)),
        Bound::Unbounded => None,
    }
}

fn end_of<D: Into<Date> + Clone>(bound: Bound<&D>) -> Option<Date> {
    match bound {
        Bound::Included(it) => Some(it.clone().into().add_days(1)),
        Bound::Excluded(it) => Some(it.clone().into()),
        Bound::Unbounded => None,
    }
}

impl DateQuery {
    const EMPTY: DateQuery = DateQuery::DateRange(Date(0), Date(0));

    #[inline(always)]
    fn year(value: i32) -> Self {
        DateQuery::DateRange(Date::from_year(value), Date::from_year(value.saturating_add(1)))
    }

    fn from_bounds(start: Option<Date>, end: Option<Date>) -> Option<Self> {
        match (start, end) {
            (Some(start), Some(end)) => Some(DateQuery::DateRange(start, end)),
            (Some(start), None) => Some(DateQuery::FromDate(start)),
            (None, Some(end)) => Some(DateQuery::ToDate(end)),
            (None, None) => None,
        }
    }

    fn year_range<R>(value: R) -> Option<Self>
    where
        R: RangeBounds<i32>,
    {
        let start = match value.start_bound() {
            Bound::Included(it) => Some(Date::from_year(*it)),
            Bound::Excluded(it) => Some(Date::from_year(it.saturating_add(1))),
            Bound::Unbounded => None,
        };
        let end = match value.end_bound() {
            Bound::Included(it) => Some(Date::from_year(it.saturating_add(1))),
            Bound::Excluded(it) => Some(Date::from_year(*it)),
            Bound::Unbounded => None,
        };
        Self::from_bounds(start, end)
    }

    #[inline(always)]
    fn date(value: impl Into<Date>) -> Self {
        DateQuery::Exact(value.into())
    }

    fn date_range<D, R>(value: R) -> Option<Self>
    where
        D: Into<Date> + Clone,
        R: RangeBounds<D>,
    {
        Self::from_bounds(start_of(value.start_bound()), end_of(value.end_bound()))
    }

    fn is_empty(&self) -> bool {
        match self {
            DateQuery::DateRange(a, b) => a >= b,
            _ => false,
        }
    }

    fn as_julian_range(&self) -> std::ops::Range<i64> {
        match self {
            DateQuery::DateRange(from, to) => from.julian_day()..to.julian_day(),
            DateQuery::FromDate(from) => from.julian_day()..END_JD,
            DateQuery::ToDate(to) => FIRST_JD..to.julian_day(),
            DateQuery::Exact(date) => date.julian_day()..date.julian_day().saturating_add(1),
        }
    }
}

impl std::ops::BitAnd for DateQuery {
    type Output = Self;

    fn bitand(self, rhs: Self) -> Self::Output {
        let range = |from: Date, to: Date| {
            if from >= to {
                DateQuery::EMPTY
            } else {
                DateQuery::DateRange(from, to)
            }
        };
        let exact_within = |date: Date, from: Date, to: Date| {
            if date < from || date >= to {
                DateQuery::EMPTY
            } else {
                DateQuery::Exact(date)
            }
        };

        match (self, rhs) {
            (DateQuery::FromDate(a), DateQuery::FromDate(b)) => DateQuery::FromDate(a.max(b)),
            (DateQuery::ToDate(a), DateQuery::ToDate(b)) => DateQuery::ToDate(a.min(b)),
            (DateQuery::Exact(a), DateQuery::Exact(b)) => {
                if a != b {
                    DateQuery::EMPTY
                } else {
                    DateQuery::Exact(a)
                }
            }

            (DateQuery::FromDate(a), DateQuery::Exact(b))
            | (DateQuery::Exact(b), DateQuery::FromDate(a)) => {
                if a > b {
                    DateQuery::EMPTY
                } else {
                    DateQuery::Exact(b)
                }
            }
            (DateQuery::ToDate(a), DateQuery::Exact(b))
            | (DateQuery::Exact(b), DateQuery::ToDate(a)) => {
                if b >= a {
                    DateQuery::EMPTY
                } else {
                    DateQuery::Exact(b)
                }
            }
            (DateQuery::Exact(a), DateQuery::DateRange(b_from, b_to))
            | (DateQuery::DateRange(b_from, b_to), DateQuery::Exact(a)) => {
                exact_within(a, b_from, b_to)
            }
            (DateQuery::FromDate(a), DateQuery::ToDate(b))
            | (DateQuery::ToDate(b), DateQuery::FromDate(a)) => range(a, b),
            (DateQuery::FromDate(a), DateQuery::DateRange(b_from, b_to))
            | (DateQuery::DateRange(b_from, b_to), DateQuery::FromDate(a)) => {
                range(a.max(b_from), b_to)
            }
            (DateQuery::ToDate(a), DateQuery::DateRange(b_from, b_to))
            | (DateQuery::DateRange(b_from, b_to), DateQuery::ToDate(a)) => {
                range(b_from, a.min(b_to))
            }
            (DateQuery::DateRange(a_from, a_to), DateQuery::DateRange(b_from, b_to)) => {
                range(a_from.max(b_from), a_to.min(b_to))
            }
        }
    }
}

mod detail {
    use super::*;

    pub struct IterDays {
        pub(super) days: std::ops::Range<i64>,
        pub(super) location: Location,
        pub(super) kinds: Option<KindSet>,
    }
}
use detail::*;

/// Iterator over holiday query results.
pub enum Iter {
    Empty,
    Days(IterDays),
}

impl Iterator for Iter {
    type Item = Occurrence;

    fn next(&mut self) -> Option<Self::Item> {
        match self {
            Iter::Empty => None,
            Iter::Days(IterDays {
                days,
                location,
                kinds,
            }) => loop {
                let Ok(date) = CalendarDate::from_julian_day(days.next()?) else {
                    continue;
                };
                let Some(holiday) = date.holiday(*location) else {
                    continue;
                };
                if kinds.is_some_and(|kinds| !kinds.contains(holiday.kind())) {
                    continue;
                }
                return Some(Occurrence { date, holiday });
            },
        }
    }
}

impl std::iter::FusedIterator for Iter {}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(occurrence: &Occurrence) -> (i32, u32, u32) {
        occurrence.date.date().ymd()
    }

    #[test]
    fn whole_hebrew_year() {
        let israel: Vec<_> = Query::hebrew_year(5785).run().collect();
        assert_eq!(israel.len(), 42);
        assert_eq!(israel[0].holiday, Holiday::RoshHashanaI);
        assert_eq!(ymd(&israel[0]), (2024, 10, 3));
        assert_eq!(israel.last().map(|it| it.holiday), Some(Holiday::TuBAv));
        assert!(israel.windows(2).all(|w| w[0].date < w[1].date));

        let diaspora = Query::hebrew_year(5785).location(Location::Diaspora).run();
        assert_eq!(diaspora.count(), 45);
    }

    #[test]
    fn filter_by_kind() {
        let fasts: Vec<_> = Query::hebrew_year(5785)
            .kinds([HolidayKind::Fast])
            .run()
            .map(|it| (ymd(&it), it.holiday))
            .collect();
        assert_eq!(
            fasts,
            vec![
                ((2024, 10, 6), Holiday::TzomGedaliah),
                ((2024, 10, 12), Holiday::YomKippur),
                ((2025, 1, 10), Holiday::AsaraBTevet),
                ((2025, 3, 13), Holiday::TaanitEsther),
                ((2025, 7, 13), Holiday::TzomTammuz),
                ((2025, 8, 3), Holiday::TishaBAv),
            ]
        );
    }

    #[test]
    fn intersected_ranges() {
        let april = Query::gregorian_year(2025).and(Query::date_range(
            Date::from_ymd(2025, 4, 1)..Date::from_ymd(2025, 5, 1),
        ));
        assert_eq!(april.run().count(), 9);

        let inclusive = Query::date_range(Date::from_ymd(2025, 4, 13)..=Date::from_ymd(2025, 4, 14));
        assert_eq!(inclusive.run().count(), 2);

        let from = Query::date_range(Date::from_ymd(2025, 8, 9)..);
        let before = Query::date_range(..Date::from_ymd(2025, 8, 10));
        let both: Vec<_> = (from & before).run().map(|it| it.holiday).collect();
        assert_eq!(both, vec![Holiday::TuBAv]);
    }

    #[test]
    fn empty_intersections() {
        let a = Query::date(Date::from_ymd(2024, 10, 3));
        let b = Query::date(Date::from_ymd(2024, 10, 4));
        assert_eq!((a & b).run().count(), 0);

        let years = Query::gregorian_year(2024) & Query::gregorian_year(2025);
        assert_eq!(years.run().count(), 0);

        assert_eq!(Query::hebrew_year(12000).run().count(), 0);
    }

    #[test]
    fn single_day() {
        let found: Vec<_> = Query::date(Date::from_ymd(2024, 10, 18))
            .location(Location::Diaspora)
            .run()
            .map(|it| it.holiday)
            .collect();
        assert_eq!(found, vec![Holiday::Sukkot]);
        assert_eq!(Query::date(Date::from_ymd(2024, 10, 1)).run().next(), None);
    }

    #[test]
    fn gregorian_year_ranges() {
        let two_years = Query::year_range(2024..=2025).kinds([HolidayKind::Memorial]);
        // Yom HaShoah and Yom HaZikaron in each year
        assert_eq!(two_years.run().count(), 4);
    }

    #[test]
    fn extreme_bounds_find_nothing() {
        assert_eq!(Query::gregorian_year(i32::MAX).run().count(), 0);
        assert_eq!(Query::gregorian_year(i32::MIN).run().count(), 0);
        assert_eq!(Query::year_range(i32::MAX..).run().count(), 0);
        assert_eq!(Query::year_range(..=i32::MIN).run().count(), 0);
        let last = Date::from_julian_day(i64::MAX);
        assert_eq!(Query::date(last).run().count(), 0);
        assert_eq!(Query::date_range(last..=last).run().count(), 0);
    }
}
