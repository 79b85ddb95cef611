use hdate::{
    holidays_in_year, report, CalendarDate, Date, DateExt, Error, HebrewCalendar, HebrewMonth,
    Holiday, Location, Parasha, Weekday,
};
use pretty_assertions::assert_eq;

fn on(year: i32, month: u32, day: u32) -> CalendarDate {
    CalendarDate::from_gregorian(year, month, day).unwrap()
}

fn report_lines(date: &CalendarDate, diaspora: i32, style: i32) -> Vec<String> {
    let mut out = Vec::new();
    report::write_today_with(&mut out, date, diaspora, style).unwrap();
    String::from_utf8(out)
        .unwrap()
        .lines()
        .map(String::from)
        .collect()
}

#[test]
fn known_dates() {
    let rosh_hashana = on(2024, 10, 3);
    assert_eq!(
        (
            rosh_hashana.hebrew_day(),
            rosh_hashana.hebrew_month(),
            rosh_hashana.hebrew_year()
        ),
        (1, HebrewMonth::Tishrei, 5785)
    );
    assert_eq!(rosh_hashana.weekday(), Weekday::Thursday);

    let yom_kippur = on(2024, 10, 12);
    assert_eq!(yom_kippur.weekday(), Weekday::Saturday);
    assert_eq!(yom_kippur.holiday(Location::Israel), Some(Holiday::YomKippur));

    let purim = on(2024, 3, 24);
    assert_eq!(purim.hebrew_month(), HebrewMonth::AdarII);
    assert_eq!(purim.hebrew_day(), 14);
    assert_eq!(purim.holiday(Location::Israel), Some(Holiday::Purim));
}

#[test]
fn hebrew_and_gregorian_agree_both_ways() {
    let start = on(2023, 1, 1);
    for offset in 0..800 {
        let date = start.add_days(offset).unwrap();
        let back =
            CalendarDate::from_hebrew(date.hebrew_day(), date.hebrew_month(), date.hebrew_year())
                .unwrap();
        assert_eq!(back, date);
    }
}

#[test]
fn today_report() {
    assert_eq!(
        report_lines(&on(2024, 10, 17), 0, 0),
        ["Today is:", "17,10,2024", "Thursday, 15 Tishrei 5785, Sukkot"]
    );
    assert_eq!(
        report_lines(&on(2024, 10, 17), 0, 1),
        ["Today is:", "17,10,2024", "15 Tishrei"]
    );
    assert_eq!(
        report_lines(&on(2024, 3, 24), 0, 0)[2],
        "Sunday, 14 Adar II 5784, Purim"
    );
}

#[test]
fn diaspora_selector_changes_holidays() {
    let date = on(2024, 10, 25);
    assert_eq!(report_lines(&date, 0, 0)[2], "Friday, 23 Tishrei 5785");
    assert_eq!(
        report_lines(&date, 1, 0)[2],
        "Friday, 23 Tishrei 5785, Simchat Torah"
    );
    assert_eq!(date.format_date(0), report_lines(&date, 0, 0)[2]);
}

#[test]
fn holidays_of_a_year() {
    let israel: Vec<_> = holidays_in_year(5785, Location::Israel).collect();
    let diaspora: Vec<_> = holidays_in_year(5785, Location::Diaspora).collect();
    assert_eq!(israel.len(), 42);
    assert_eq!(diaspora.len(), 45);
    assert_eq!(israel[0].holiday, Holiday::RoshHashanaI);
    assert_eq!(israel[0].date, on(2024, 10, 3));
    assert!(israel.windows(2).all(|pair| pair[0].date < pair[1].date));
}

#[test]
fn date_extension() {
    let date = Date::from_ymd(2024, 10, 12);
    assert!(date.is_holiday(Location::Israel));
    assert!(!Date::from_ymd(2024, 10, 14).is_holiday(Location::Israel));
    assert_eq!(date.hebrew_date().unwrap().hebrew_day(), 10);
}

#[test]
fn first_reading_of_the_cycle() {
    assert_eq!(
        on(2024, 10, 26).parasha(Location::Israel),
        Some(Parasha::Bereshit)
    );
}

#[test]
fn rejects_invalid_input() {
    assert!(matches!(
        CalendarDate::from_gregorian(2023, 2, 29),
        Err(Error::InvalidGregorianDate { .. })
    ));
    assert!(matches!(
        CalendarDate::from_hebrew(30, HebrewMonth::Tevet, 5785),
        Err(Error::InvalidHebrewDate { .. })
    ));
    assert!(matches!(
        CalendarDate::from_hebrew(30, HebrewMonth::AdarII, 5784),
        Err(Error::InvalidHebrewDate { .. })
    ));
}

#[test]
fn every_selector_formats_the_same_way_twice() {
    let date = on(2026, 10, 19);
    for style in [-1, 0, 1, 2, i32::MAX] {
        for diaspora in [0, 1, -5] {
            let first = date.format_date_with(diaspora, style);
            assert!(!first.is_empty());
            assert_eq!(first, date.format_date_with(diaspora, style));
        }
    }
    assert_eq!(date.format_date(0), "Monday, 8 Cheshvan 5787");
    assert_eq!(date.format_date(3), "8 Cheshvan");
}
