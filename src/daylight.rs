use chrono::{DateTime, Datelike, Duration, NaiveDate, NaiveTime, TimeZone, Timelike, Utc};
use chrono_tz::Tz;
use solar_positioning::{spa, time::DeltaT, Horizon, SunriseResult};
use tracing::{debug, info, info_span};

use crate::error::{DaylightError, Result};
use crate::geocoder;
use crate::types::{DayRecord, DaylightInfo, DaylightTable, Location, Observer};

pub const SECONDS_PER_DAY: u32 = 86_400;

pub trait SunEvents {
    fn daylight(
        &self,
        observer: &Observer,
        date: NaiveDate,
    ) -> Result<(DateTime<Utc>, DateTime<Utc>)>;
}

// Far from Greenwich the sunset of a UTC day can precede its sunrise; the
// sunset of the following UTC day is used instead.
#[derive(Debug, Clone, Copy, Default)]
pub struct SpaSunEvents;

impl SpaSunEvents {
    fn events(
        &self,
        observer: &Observer,
        date: NaiveDate,
    ) -> Result<(DateTime<Utc>, DateTime<Utc>)> {
        let day_start = date.and_time(NaiveTime::MIN).and_utc();
        let delta_t = DeltaT::estimate_from_date_like(date)?;
        let result = spa::sunrise_sunset_for_horizon(
            day_start,
            observer.latitude,
            observer.longitude,
            delta_t,
            Horizon::SunriseSunset,
        )?;

        let condition = match result {
            SunriseResult::RegularDay {
                sunrise, sunset, ..
            } => return Ok((sunrise, sunset)),
            SunriseResult::AllDay { .. } => "above the horizon",
            SunriseResult::AllNight { .. } => "below the horizon",
        };
        Err(DaylightError::NoSunrise {
            date,
            latitude: observer.latitude,
            longitude: observer.longitude,
            condition,
        })
    }
}

impl SunEvents for SpaSunEvents {
    fn daylight(
        &self,
        observer: &Observer,
        date: NaiveDate,
    ) -> Result<(DateTime<Utc>, DateTime<Utc>)> {
        let (sunrise, sunset) = self.events(observer, date)?;
        if sunset >= sunrise {
            return Ok((sunrise, sunset));
        }
        let next = date.succ_opt().ok_or(DaylightError::InvalidYear(date.year()))?;
        let (_, next_sunset) = self.events(observer, next)?;
        debug!("Sunset before sunrise on {}, using sunset of {}", date, next);
        Ok((sunrise, next_sunset))
    }
}

/// First instant of the local calendar day. When midnight falls in a DST gap
/// the day starts at the first local time that exists.
pub fn local_day_start<Z: TimeZone>(instant: &DateTime<Utc>, tz: &Z) -> Option<DateTime<Utc>> {
    let midnight = instant.with_timezone(tz).date_naive().and_time(NaiveTime::MIN);
    (0..=180)
        .map(|m| midnight + Duration::minutes(m))
        .find_map(|local| tz.from_local_datetime(&local).earliest())
        .map(|start| start.with_timezone(&Utc))
}

fn seconds_since_local_midnight<Z: TimeZone>(instant: &DateTime<Utc>, tz: &Z) -> u32 {
    match local_day_start(instant, tz) {
        Some(start) => (*instant - start).num_seconds().max(0) as u32,
        None => instant.with_timezone(tz).time().num_seconds_from_midnight(),
    }
}

// Duration comes from the UTC instants, never from the local offsets.
pub fn calc_daylight_info<Z: TimeZone>(
    sunrise_utc: DateTime<Utc>,
    sunset_utc: DateTime<Utc>,
    tz: &Z,
) -> DaylightInfo {
    DaylightInfo {
        sunrise_seconds: seconds_since_local_midnight(&sunrise_utc, tz),
        sunset_seconds: seconds_since_local_midnight(&sunset_utc, tz),
        daylight_duration_seconds: (sunset_utc - sunrise_utc).num_seconds().abs(),
    }
}

pub fn day_range(year: i32) -> Result<impl Iterator<Item = NaiveDate>> {
    let start = NaiveDate::from_ymd_opt(year, 1, 1).ok_or(DaylightError::InvalidYear(year))?;
    let end = year
        .checked_add(1)
        .and_then(|next| NaiveDate::from_ymd_opt(next, 1, 1))
        .ok_or(DaylightError::InvalidYear(year))?;
    Ok(start.iter_days().take_while(move |d| *d < end))
}

pub fn day_record<S: SunEvents>(
    sun: &S,
    observer: &Observer,
    tz: &Tz,
    date: NaiveDate,
) -> Result<DayRecord> {
    let (sunrise, sunset) = sun.daylight(observer, date)?;
    Ok(DayRecord::new(date, calc_daylight_info(sunrise, sunset, tz)))
}

pub fn build_table<S: SunEvents>(
    sun: &S,
    location: &Location,
    year: i32,
) -> Result<DaylightTable> {
    let _span = info_span!("build_table", city = %location.name, year).entered();

    let tz = location.timezone()?;
    let observer = location.observer();
    let records = day_range(year)?
        .map(|date| day_record(sun, &observer, &tz, date))
        .collect::<Result<Vec<_>>>()?;

    info!("Computed {} day records for {}", records.len(), location.name);
    if let (Some(first), Some(last)) = (records.first(), records.last()) {
        debug!("Range {} .. {}", first.date, last.date);
    }

    Ok(DaylightTable {
        location: location.clone(),
        year,
        records,
    })
}

pub fn build_year(city: &str, year: i32) -> Result<DaylightTable> {
    let db = geocoder::Database::bundled()?;
    let location = geocoder::lookup(city, &db)?;
    build_table(&SpaSunEvents, &location, year)
}
