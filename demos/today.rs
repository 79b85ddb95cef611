use hdate::{report, CalendarDate};

fn main() -> std::io::Result<()> {
    let today = CalendarDate::today();
    report::write_today(&mut std::io::stdout().lock(), &today, 0)
}
