//! Sunrise, sunset and related times.
//!
//! Uses the low accuracy solar position equations published by NOAA (after
//! Meeus, Astronomical Algorithms). Times are minutes after UTC midnight and
//! are good to a minute or two away from the poles.

use std::f64::consts::PI;

use crate::date::{Date, Weekday};
use crate::Error;

/// Zenith angle of the sun's upper limb at sunrise and sunset, refraction
/// included.
pub const SUNRISE_ZENITH: f64 = 90.833;
/// Sun 16.01° below the horizon.
pub const FIRST_LIGHT_ZENITH: f64 = 106.01;
/// Sun 11° below the horizon.
pub const TALIT_ZENITH: f64 = 101.0;
/// Sun 6° below the horizon.
pub const FIRST_STARS_ZENITH: f64 = 96.0;
/// Sun 8.5° below the horizon.
pub const THREE_STARS_ZENITH: f64 = 98.5;

/// Shabbat candles are lit this many minutes before sunset.
pub const CANDLE_LIGHTING_MINUTES: i32 = 20;

/// A point on earth, latitude positive north and longitude positive east.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinates {
    latitude: f64,
    longitude: f64,
}

impl Coordinates {
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, Error> {
        if !(-90.0..=90.0).contains(&latitude) || !(-180.0..=180.0).contains(&longitude) {
            return Err(Error::InvalidCoordinates);
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }

    #[inline]
    pub const fn latitude(&self) -> f64 {
        self.latitude
    }

    #[inline]
    pub const fn longitude(&self) -> f64 {
        self.longitude
    }
}

/// Times of one day, in minutes after midnight.
///
/// A time is `None` when the sun never reaches the matching angle that day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SunTimes {
    pub first_light: Option<i32>,
    pub talit: Option<i32>,
    pub sunrise: Option<i32>,
    pub midday: i32,
    pub sunset: Option<i32>,
    pub first_stars: Option<i32>,
    pub three_stars: Option<i32>,
    /// A twelfth of the daylight, in minutes.
    pub sun_hour: Option<i32>,
}

impl SunTimes {
    /// Shifts every time by `minutes`, e.g. to move from UTC to local time.
    pub fn offset(self, minutes: i32) -> Self {
        let shift = |it: Option<i32>| it.map(|t| t + minutes);
        Self {
            first_light: shift(self.first_light),
            talit: shift(self.talit),
            sunrise: shift(self.sunrise),
            midday: self.midday + minutes,
            sunset: shift(self.sunset),
            first_stars: shift(self.first_stars),
            three_stars: shift(self.three_stars),
            sun_hour: self.sun_hour,
        }
    }

    #[inline]
    pub fn candle_lighting(&self) -> Option<i32> {
        self.sunset.map(|it| it - CANDLE_LIGHTING_MINUTES)
    }

    /// Shabbat ends when three stars are out.
    #[inline]
    pub fn shabbat_end(&self) -> Option<i32> {
        self.three_stars
    }
}

/// Start or end of Shabbat, in minutes after midnight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShabbatTime {
    /// Friday evening.
    CandleLighting(i32),
    /// Saturday night.
    End(i32),
}

impl ShabbatTime {
    #[inline]
    pub const fn minutes(&self) -> i32 {
        match self {
            ShabbatTime::CandleLighting(it) | ShabbatTime::End(it) => *it,
        }
    }

    pub const fn offset(self, minutes: i32) -> Self {
        match self {
            ShabbatTime::CandleLighting(it) => ShabbatTime::CandleLighting(it + minutes),
            ShabbatTime::End(it) => ShabbatTime::End(it + minutes),
        }
    }
}

/// UTC candle lighting on a Friday or end of Shabbat on a Saturday. Other
/// days, and days without a sunset, have neither.
pub fn utc_shabbat_time(date: impl Into<Date>, coordinates: &Coordinates) -> Option<ShabbatTime> {
    let date = date.into();
    match date.weekday() {
        Weekday::Friday => utc_sun_time_full(date, coordinates)
            .candle_lighting()
            .map(ShabbatTime::CandleLighting),
        Weekday::Saturday => utc_sun_time_full(date, coordinates)
            .shabbat_end()
            .map(ShabbatTime::End),
        _ => None,
    }
}

/// Formats minutes after midnight as `HH:MM`, wrapping around the day.
pub fn clock(minutes: i32) -> String {
    let minutes = minutes.rem_euclid(24 * 60);
    format!("{:02}:{:02}", minutes / 60, minutes % 60)
}

struct SolarPosition {
    /// Equation of time in minutes.
    eqtime: f64,
    /// Declination in radians.
    declination: f64,
}

impl SolarPosition {
    fn on(date: Date) -> Self {
        let gamma = 2.0 * PI * (date.ordinal() as f64 - 1.0) / 365.0;

        let eqtime = 229.18
            * (0.000075 + 0.001868 * gamma.cos()
                - 0.032077 * gamma.sin()
                - 0.014615 * (2.0 * gamma).cos()
                - 0.040849 * (2.0 * gamma).sin());

        let declination = 0.006918 - 0.399912 * gamma.cos() + 0.070257 * gamma.sin()
            - 0.006758 * (2.0 * gamma).cos()
            + 0.000907 * (2.0 * gamma).sin()
            - 0.002697 * (3.0 * gamma).cos()
            + 0.00148 * (3.0 * gamma).sin();

        Self {
            eqtime,
            declination,
        }
    }

    fn noon(&self, coordinates: &Coordinates) -> f64 {
        720.0 - 4.0 * coordinates.longitude - self.eqtime
    }

    /// Half the time, in minutes, the sun spends above `zenith`.
    fn hour_angle(&self, coordinates: &Coordinates, zenith: f64) -> Option<f64> {
        let latitude = coordinates.latitude.to_radians();
        let cos_ha = (zenith.to_radians().cos() - latitude.sin() * self.declination.sin())
            / (latitude.cos() * self.declination.cos());
        if !(-1.0..=1.0).contains(&cos_ha) {
            return None;
        }
        Some(720.0 * cos_ha.acos() / PI)
    }
}

/// UTC minutes at which the sun's zenith angle is `zenith` in the morning and
/// in the evening.
pub fn utc_sun_time_deg(
    date: impl Into<Date>,
    coordinates: &Coordinates,
    zenith: f64,
) -> Option<(i32, i32)> {
    let sun = SolarPosition::on(date.into());
    let ha = sun.hour_angle(coordinates, zenith)?;
    let noon = sun.noon(coordinates);
    Some(((noon - ha) as i32, (noon + ha) as i32))
}

/// UTC sunrise and sunset.
pub fn utc_sun_time(date: impl Into<Date>, coordinates: &Coordinates) -> Option<(i32, i32)> {
    utc_sun_time_deg(date, coordinates, SUNRISE_ZENITH)
}

pub fn utc_sun_time_full(date: impl Into<Date>, coordinates: &Coordinates) -> SunTimes {
    let date = date.into();
    let at = |zenith| utc_sun_time_deg(date, coordinates, zenith);

    let first_light = at(FIRST_LIGHT_ZENITH);
    let talit = at(TALIT_ZENITH);
    let sun = at(SUNRISE_ZENITH);
    let first_stars = at(FIRST_STARS_ZENITH);
    let three_stars = at(THREE_STARS_ZENITH);

    SunTimes {
        first_light: first_light.map(|it| it.0),
        talit: talit.map(|it| it.0),
        sunrise: sun.map(|it| it.0),
        midday: SolarPosition::on(date).noon(coordinates) as i32,
        sunset: sun.map(|it| it.1),
        first_stars: first_stars.map(|it| it.1),
        three_stars: three_stars.map(|it| it.1),
        sun_hour: sun.map(|(rise, set)| (set - rise) / 12),
    }
}
