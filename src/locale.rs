use crate::calendar::CalendarDate;
use crate::date::Weekday;
use crate::hebrew::HebrewMonth;
use crate::holiday::Location;

/// Language used for names and numbers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Locale {
    #[default]
    English,
    Hebrew,
}

/// Verbosity of a formatted Hebrew date.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum FormatStyle {
    /// e.g. "Thursday, 15 Tishrei 5785, Sukkot"
    #[default]
    Long,
    /// e.g. "15 Tishrei"
    Short,
}

impl FormatStyle {
    /// Zero selects the long format, anything else the short one.
    #[inline]
    pub const fn from_selector(selector: i32) -> Self {
        if selector == 0 {
            FormatStyle::Long
        } else {
            FormatStyle::Short
        }
    }

    #[inline]
    pub const fn is_short(&self) -> bool {
        matches!(self, FormatStyle::Short)
    }
}

const LOCALE_VARS: [&str; 4] = ["LC_ALL", "LC_MESSAGES", "LANGUAGE", "LANG"];

impl Locale {
    /// Picks the locale from the usual environment variables, the first one
    /// that is set and non-empty wins.
    pub fn from_env() -> Self {
        LOCALE_VARS
            .iter()
            .filter_map(|var| std::env::var(var).ok())
            .find(|value| !value.is_empty())
            .map(|value| Self::from_tag(&value))
            .unwrap_or_default()
    }

    /// Hebrew for any `he*` tag such as `he_IL.UTF-8`.
    pub fn from_tag(tag: &str) -> Self {
        if tag.starts_with("he") {
            Locale::Hebrew
        } else {
            Locale::English
        }
    }

    /// Decimal digits in English, Hebrew numerals in Hebrew.
    pub fn number(&self, n: u32) -> String {
        match self {
            Locale::English => n.to_string(),
            Locale::Hebrew => hebrew_numeral(n).unwrap_or_else(|| n.to_string()),
        }
    }

    pub fn weekday(&self, day: Weekday, style: FormatStyle) -> &'static str {
        let i = day.number() as usize - 1;
        match (self, style) {
            (Locale::English, FormatStyle::Short) => DAYS_EN_SHORT[i],
            (Locale::English, FormatStyle::Long) => DAYS_EN[i],
            (Locale::Hebrew, FormatStyle::Short) => DAYS_HE_SHORT[i],
            (Locale::Hebrew, FormatStyle::Long) => DAYS_HE[i],
        }
    }

    /// Name of a Gregorian month, 1 being January.
    pub fn gregorian_month(&self, month: u32, style: FormatStyle) -> Option<&'static str> {
        let i = (month as usize).checked_sub(1).filter(|i| *i < 12)?;
        Some(match (self, style) {
            (Locale::English, FormatStyle::Short) => MONTHS_EN_SHORT[i],
            (Locale::English, FormatStyle::Long) => MONTHS_EN[i],
            (Locale::Hebrew, _) => MONTHS_HE[i],
        })
    }

    pub fn hebrew_month(&self, month: HebrewMonth) -> &'static str {
        let i = month.number() as usize - 1;
        match self {
            Locale::English => HEBREW_MONTHS_EN[i],
            Locale::Hebrew => HEBREW_MONTHS_HE[i],
        }
    }
}

/// Writes `n` with Hebrew letters, e.g. 5787 as התשפ"ז.
///
/// Returns `None` outside `1..=9999`.
pub fn hebrew_numeral(n: u32) -> Option<String> {
    const ONES: [char; 10] = [' ', 'א', 'ב', 'ג', 'ד', 'ה', 'ו', 'ז', 'ח', 'ט'];
    const TENS: [char; 10] = [' ', 'י', 'כ', 'ל', 'מ', 'נ', 'ס', 'ע', 'פ', 'צ'];
    const HUNDREDS: [char; 5] = [' ', 'ק', 'ר', 'ש', 'ת'];

    if !(1..=9999).contains(&n) {
        return None;
    }

    let mut letters = Vec::new();
    let mut n = n;
    if n >= 1000 {
        letters.push(ONES[(n / 1000) as usize]);
        n %= 1000;
    }
    while n >= 400 {
        letters.push(HUNDREDS[4]);
        n -= 400;
    }
    if n >= 100 {
        letters.push(HUNDREDS[(n / 100) as usize]);
        n %= 100;
    }
    // 15 and 16 avoid spelling the divine name
    if n == 15 || n == 16 {
        letters.push('ט');
        letters.push(ONES[(n - 9) as usize]);
        n = 0;
    }
    if n >= 10 {
        letters.push(TENS[(n / 10) as usize]);
        n %= 10;
    }
    if n > 0 {
        letters.push(ONES[n as usize]);
    }

    let mut out = String::with_capacity(letters.len() * 2 + 1);
    match letters.split_last() {
        Some((last, [])) => {
            out.push(*last);
            out.push('\'');
        }
        Some((last, init)) => {
            out.extend(init);
            out.push('"');
            out.push(*last);
        }
        None => return None,
    }
    Some(out)
}

/// Renders the Hebrew side of `date`.
///
/// The short form is `<day> <month>`. The long form adds the weekday, the year
/// and the holiday observed at `location`, if any.
pub fn format_date(
    date: &CalendarDate,
    locale: Locale,
    location: Location,
    style: FormatStyle,
) -> String {
    let day = locale.number(date.hebrew_day());
    let month = locale.hebrew_month(date.hebrew_month());
    if style.is_short() {
        return format!("{day} {month}");
    }

    let mut out = format!(
        "{}, {day} {month} {}",
        locale.weekday(date.weekday(), FormatStyle::Long),
        locale.number(date.hebrew_year() as u32)
    );
    if let Some(holiday) = date.holiday(location) {
        out.push_str(", ");
        out.push_str(holiday.name(locale));
    }
    out
}

const DAYS_EN_SHORT: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];
const DAYS_EN: [&str; 7] = [
    "Sunday",
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
];
const DAYS_HE_SHORT: [&str; 7] = ["א'", "ב'", "ג'", "ד'", "ה'", "ו'", "ש'"];
const DAYS_HE: [&str; 7] = [
    "יום ראשון",
    "יום שני",
    "יום שלישי",
    "יום רביעי",
    "יום חמישי",
    "יום שישי",
    "שבת",
];

const MONTHS_EN_SHORT: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];
const MONTHS_EN: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];
const MONTHS_HE: [&str; 12] = [
    "ינואר",
    "פברואר",
    "מרץ",
    "אפריל",
    "מאי",
    "יוני",
    "יולי",
    "אוגוסט",
    "ספטמבר",
    "אוקטובר",
    "נובמבר",
    "דצמבר",
];

const HEBREW_MONTHS_EN: [&str; 14] = [
    "Tishrei", "Cheshvan", "Kislev", "Tevet", "Sh'vat", "Adar", "Nisan", "Iyyar", "Sivan",
    "Tamuz", "Av", "Elul", "Adar I", "Adar II",
];
const HEBREW_MONTHS_HE: [&str; 14] = [
    "תשרי",
    "חשון",
    "כסלו",
    "טבת",
    "שבט",
    "אדר",
    "ניסן",
    "אייר",
    "סיון",
    "תמוז",
    "אב",
    "אלול",
    "אדר א'",
    "אדר ב'",
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numerals() {
        assert_eq!(hebrew_numeral(1).as_deref(), Some("א'"));
        assert_eq!(hebrew_numeral(10).as_deref(), Some("י'"));
        assert_eq!(hebrew_numeral(15).as_deref(), Some("ט\"ו"));
        assert_eq!(hebrew_numeral(16).as_deref(), Some("ט\"ז"));
        assert_eq!(hebrew_numeral(30).as_deref(), Some("ל'"));
        assert_eq!(hebrew_numeral(115).as_deref(), Some("קט\"ו"));
        assert_eq!(hebrew_numeral(5785).as_deref(), Some("התשפ\"ה"));
        assert_eq!(hebrew_numeral(5787).as_deref(), Some("התשפ\"ז"));
        assert_eq!(hebrew_numeral(0), None);
        assert_eq!(hebrew_numeral(10000), None);
    }

    #[test]
    fn selector_meaning() {
        assert_eq!(FormatStyle::from_selector(0), FormatStyle::Long);
        assert_eq!(FormatStyle::from_selector(1), FormatStyle::Short);
        assert_eq!(FormatStyle::from_selector(-7), FormatStyle::Short);
    }

    #[test]
    fn locale_tags() {
        assert_eq!(Locale::from_tag("he_IL.UTF-8"), Locale::Hebrew);
        assert_eq!(Locale::from_tag("en_US.UTF-8"), Locale::English);
        assert_eq!(Locale::from_tag("C"), Locale::English);
    }

    #[test]
    fn names() {
        assert_eq!(Locale::English.weekday(Weekday::Saturday, FormatStyle::Long), "Saturday");
        assert_eq!(Locale::Hebrew.weekday(Weekday::Saturday, FormatStyle::Long), "שבת");
        assert_eq!(Locale::English.hebrew_month(HebrewMonth::AdarII), "Adar II");
        assert_eq!(Locale::English.gregorian_month(12, FormatStyle::Short), Some("Dec"));
        assert_eq!(Locale::English.gregorian_month(13, FormatStyle::Short), None);
        assert_eq!(Locale::English.number(5785), "5785");
        assert_eq!(Locale::Hebrew.number(8), "ח'");
    }

    #[test]
    fn formats_both_styles() {
        let date = CalendarDate::from_gregorian(2026, 10, 19).unwrap();
        let format = |locale, style| format_date(&date, locale, Location::Israel, style);
        assert_eq!(format(Locale::English, FormatStyle::Short), "8 Cheshvan");
        assert_eq!(
            format(Locale::English, FormatStyle::Long),
            "Monday, 8 Cheshvan 5787"
        );
        assert_eq!(format(Locale::Hebrew, FormatStyle::Short), "ח' חשון");
        assert_eq!(
            format(Locale::Hebrew, FormatStyle::Long),
            "יום שני, ח' חשון התשפ\"ז"
        );
    }

    #[test]
    fn long_format_names_the_holiday() {
        let date = CalendarDate::from_gregorian(2024, 10, 17).unwrap();
        assert_eq!(
            format_date(&date, Locale::English, Location::Israel, FormatStyle::Long),
            "Thursday, 15 Tishrei 5785, Sukkot"
        );
        assert_eq!(
            format_date(&date, Locale::Hebrew, Location::Israel, FormatStyle::Long),
            "יום חמישי, ט\"ו תשרי התשפ\"ה, סוכות"
        );
    }
}
