//! The "today" report: a header, the Gregorian date and the Hebrew date, one
//! per line.

use std::io::{self, Write};

use crate::calendar::HebrewCalendar;

pub const HEADER: &str = "Today is:";

/// Writes the report with an already formatted Hebrew line.
pub fn write_lines<W, C>(out: &mut W, date: &C, hebrew: &str) -> io::Result<()>
where
    W: Write,
    C: HebrewCalendar,
{
    writeln!(out, "{HEADER}")?;
    writeln!(
        out,
        "{},{},{}",
        date.gregorian_day(),
        date.gregorian_month(),
        date.gregorian_year()
    )?;
    writeln!(out, "{hebrew}")
}

/// Writes the report using the format selector only.
pub fn write_today<W, C>(out: &mut W, date: &C, style: i32) -> io::Result<()>
where
    W: Write,
    C: HebrewCalendar,
{
    write_lines(out, date, &date.format_date(style))
}

/// Writes the report using the diaspora and format selectors.
pub fn write_today_with<W, C>(out: &mut W, date: &C, diaspora: i32, style: i32) -> io::Result<()>
where
    W: Write,
    C: HebrewCalendar,
{
    write_lines(out, date, &date.format_date_with(diaspora, style))
}
