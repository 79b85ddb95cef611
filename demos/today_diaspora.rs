use hdate::{report, CalendarDate};

fn main() -> std::io::Result<()> {
    let today = CalendarDate::today();

    // diaspora holidays, long format
    report::write_today_with(&mut std::io::stdout().lock(), &today, 1, 0)
}
