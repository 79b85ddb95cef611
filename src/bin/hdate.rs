//! # hdate
//!
//! Prints today's date on the Gregorian and Hebrew calendars. Flags add the
//! weekly reading, the Omer count, sun and Shabbat times and the year's
//! holidays.

use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use anyhow::{anyhow, bail, Context, Result};
use clap::Parser;
use flexi_logger::{FileSpec, Logger};
use hdate::config::Config;
use hdate::sun::{self, Coordinates, ShabbatTime, SunTimes};
use hdate::{
    report, CalendarDate, Date, FormatStyle, HebrewMonth, Locale, Location, Query,
};

#[derive(Debug, Parser)]
#[command(name = "hdate")]
#[command(about = "Hebrew calendar dates, holidays and readings", long_about = None)]
#[command(version)]
struct Args {
    /// Gregorian date to show instead of today
    #[arg(long, value_name = "YYYY-MM-DD", conflicts_with = "hebrew_date")]
    date: Option<Date>,

    /// Hebrew date to show, month by number or name (e.g. 14-adar-ii-5784)
    #[arg(long, value_name = "D-M-Y")]
    hebrew_date: Option<String>,

    /// Short Hebrew date, without weekday, year and holiday
    #[arg(short, long)]
    short: bool,

    /// Use diaspora holidays and readings
    #[arg(short, long)]
    diaspora: bool,

    /// Print names and numbers in Hebrew
    #[arg(long)]
    hebrew: bool,

    /// Print the weekly Torah reading on Shabbat
    #[arg(short = 'r', long)]
    parasha: bool,

    /// Print the day of the Omer count
    #[arg(short, long)]
    omer: bool,

    /// Print the Julian day number
    #[arg(short, long)]
    julian: bool,

    /// List the holidays of the Hebrew year
    #[arg(short, long)]
    list_holidays: bool,

    /// Print sunrise, sunset and related times
    #[arg(long, visible_alias = "times")]
    sun: bool,

    /// Print candle lighting on Friday and the end of Shabbat on Saturday
    #[arg(short = 'c', long)]
    candles: bool,

    /// Print candle lighting on Friday
    #[arg(long)]
    candle_lighting: bool,

    /// Print the end of Shabbat on Saturday
    #[arg(long)]
    havdalah: bool,

    /// Latitude in degrees, north positive
    #[arg(long, allow_hyphen_values = true)]
    latitude: Option<f64>,

    /// Longitude in degrees, east positive
    #[arg(long, allow_hyphen_values = true)]
    longitude: Option<f64>,

    /// Local time offset from UTC in minutes
    #[arg(long, allow_hyphen_values = true)]
    utc_offset: Option<i32>,

    /// Path to config file
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Path to log file
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,
}

/// Everything needed to render output, flags taking precedence over the
/// config file.
struct Settings {
    locale: Locale,
    location: Location,
    style: FormatStyle,
}

impl Settings {
    fn resolve(args: &Args, config: &Config) -> Self {
        let locale = if args.hebrew {
            Locale::Hebrew
        } else {
            config.locale().unwrap_or_else(Locale::from_env)
        };
        let location = if args.diaspora {
            Location::Diaspora
        } else {
            config.location()
        };
        let style = if args.short {
            FormatStyle::Short
        } else {
            config.style()
        };
        Settings {
            locale,
            location,
            style,
        }
    }
}

fn parse_hebrew_date(value: &str) -> Result<CalendarDate> {
    let parts: Vec<&str> = value.split('-').collect();
    let [day, month @ .., year] = parts.as_slice() else {
        bail!("expected a Hebrew date as D-M-Y, got {value:?}");
    };
    if month.is_empty() {
        bail!("expected a Hebrew date as D-M-Y, got {value:?}");
    }
    let day = day.parse().with_context(|| format!("invalid day {day:?}"))?;
    let month: HebrewMonth = month.join(" ").parse()?;
    let year = year.parse().with_context(|| format!("invalid year {year:?}"))?;
    Ok(CalendarDate::from_hebrew(day, month, year)?)
}

fn selected_date(args: &Args) -> Result<CalendarDate> {
    if let Some(date) = args.date {
        return CalendarDate::try_from(date).with_context(|| format!("unable to convert {date}"));
    }
    if let Some(value) = &args.hebrew_date {
        return parse_hebrew_date(value);
    }
    Ok(CalendarDate::today())
}

fn coordinates(args: &Args, config: &Config) -> Result<Coordinates> {
    let latitude = args.latitude.or(config.latitude);
    let longitude = args.longitude.or(config.longitude);
    match (latitude, longitude) {
        (Some(latitude), Some(longitude)) => Ok(Coordinates::new(latitude, longitude)?),
        _ => Err(anyhow!("sun and Shabbat times need --latitude and --longitude")),
    }
}

fn write_sun_times<W: Write>(out: &mut W, times: &SunTimes) -> io::Result<()> {
    let show = |it: Option<i32>| it.map(sun::clock).unwrap_or_else(|| "--:--".into());
    writeln!(out, "first light: {}", show(times.first_light))?;
    writeln!(out, "talit: {}", show(times.talit))?;
    writeln!(out, "sunrise: {}", show(times.sunrise))?;
    writeln!(out, "midday: {}", sun::clock(times.midday))?;
    writeln!(out, "sunset: {}", show(times.sunset))?;
    writeln!(out, "first stars: {}", show(times.first_stars))?;
    writeln!(out, "three stars: {}", show(times.three_stars))?;
    match times.sun_hour {
        Some(minutes) => writeln!(out, "sun hour: {minutes} minutes"),
        None => writeln!(out, "sun hour: --"),
    }
}

fn write_shabbat_time<W: Write>(out: &mut W, time: ShabbatTime, args: &Args) -> io::Result<()> {
    match time {
        ShabbatTime::CandleLighting(minutes) if args.candles || args.candle_lighting => {
            writeln!(out, "candle lighting: {}", sun::clock(minutes))
        }
        ShabbatTime::End(minutes) if args.candles || args.havdalah => {
            writeln!(out, "shabbat ends: {}", sun::clock(minutes))
        }
        _ => Ok(()),
    }
}

fn write_holidays<W: Write>(out: &mut W, date: &CalendarDate, settings: &Settings) -> Result<()> {
    let query = Query::hebrew_year(date.hebrew_year()).location(settings.location);
    for occurrence in query.run() {
        writeln!(
            out,
            "{} {}, {}",
            occurrence.date.date(),
            occurrence
                .date
                .format(settings.locale, settings.location, FormatStyle::Short),
            occurrence.holiday.name(settings.locale)
        )?;
    }
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();

    const DEFAULT_LOG_LEVEL: &str = if cfg!(debug_assertions) {
        "debug"
    } else {
        "warn"
    };

    let mut logger = Logger::try_with_env_or_str(DEFAULT_LOG_LEVEL)?;

    if let Some(log_file) = &args.log_file {
        logger = logger
            .log_to_file(FileSpec::try_from(log_file)?)
            .print_message();
    }

    let _logger = logger.start()?;

    let config = Config::load(args.config.as_deref()).context("unable to load config")?;
    let settings = Settings::resolve(&args, &config);
    let date = selected_date(&args)?;
    log::debug!("showing {date} for {:?}", settings.location);

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());

    let hebrew = date.format(settings.locale, settings.location, settings.style);
    report::write_lines(&mut out, &date, &hebrew)?;

    if args.julian {
        writeln!(out, "julian day: {}", date.julian_day())?;
    }
    if args.omer {
        if let Some(day) = date.omer_day() {
            writeln!(out, "omer: {}", settings.locale.number(day))?;
        }
    }
    if args.parasha {
        if let Some(parasha) = date.parasha(settings.location) {
            writeln!(out, "parasha: {}", parasha.name(settings.locale))?;
        }
    }
    let offset = args.utc_offset.or(config.utc_offset_minutes).unwrap_or(0);
    if args.sun {
        let coordinates = coordinates(&args, &config)?;
        let times = sun::utc_sun_time_full(date, &coordinates).offset(offset);
        write_sun_times(&mut out, &times)?;
    }
    if args.candles || args.candle_lighting || args.havdalah {
        let coordinates = coordinates(&args, &config)?;
        if let Some(time) = date.shabbat_time(&coordinates) {
            write_shabbat_time(&mut out, time.offset(offset), &args)?;
        }
    }
    if args.list_holidays {
        write_holidays(&mut out, &date, &settings)?;
    }

    out.flush()?;
    Ok(())
}
