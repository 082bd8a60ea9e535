use std::sync::LazyLock;

use chrono::{DateTime, Datelike, Duration, NaiveDate, TimeZone, Timelike, Utc};
use chrono_tz::America::Santiago;
use chrono_tz::Europe::Berlin;

use daylight_chart::*;

macro_rules! assert_approx {
    ($left:expr, $right:expr, $tol:expr) => {
        let (l, r) = ($left as f64, $right as f64);
        assert!(
            (l - r).abs() <= $tol,
            "assert_approx failed: left={}, right={}, diff={}, tol={}",
            l, r, (l - r).abs(), $tol
        );
    };
}

const HOUR: i64 = 3600;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn utc(y: i32, m: u32, d: u32, h: u32, min: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, h, min, 0).unwrap()
}

fn record_for(table: &DaylightTable, day: NaiveDate) -> DayRecord {
    *table.records.iter().find(|r| r.date == day).unwrap()
}

static MOSCOW_2024: LazyLock<DaylightTable> =
    LazyLock::new(|| build_year("Moscow", 2024).unwrap());

/// Fixed events at 06:00 and 18:00 UTC every day.
struct FixedSun;

impl SunEvents for FixedSun {
    fn daylight(
        &self,
        _: &Observer,
        date: NaiveDate,
    ) -> Result<(DateTime<Utc>, DateTime<Utc>)> {
        let midnight = date.and_hms_opt(0, 0, 0).unwrap().and_utc();
        Ok((midnight + Duration::hours(6), midnight + Duration::hours(18)))
    }
}

/// Fails on one date, like a polar day in the middle of the year.
struct FailingSun(NaiveDate);

impl SunEvents for FailingSun {
    fn daylight(
        &self,
        observer: &Observer,
        date: NaiveDate,
    ) -> Result<(DateTime<Utc>, DateTime<Utc>)> {
        if date == self.0 {
            return Err(DaylightError::NoSunrise {
                date,
                latitude: observer.latitude,
                longitude: observer.longitude,
                condition: "above the horizon",
            });
        }
        FixedSun.daylight(observer, date)
    }
}

fn moscow() -> Location {
    lookup("Moscow", &Database::bundled().unwrap()).unwrap()
}

// ── calc_daylight_info ──

#[test]
fn test_local_seconds_use_timezone_offset() {
    // CEST is UTC+2
    let info = calc_daylight_info(utc(2024, 6, 21, 3, 0), utc(2024, 6, 21, 19, 30), &Berlin);
    assert_eq!(info.sunrise_seconds, 5 * 3600);
    assert_eq!(info.sunset_seconds, 21 * 3600 + 30 * 60);
    assert_eq!(info.daylight_duration_seconds, 16 * HOUR + 30 * 60);
}

#[test]
fn test_duration_across_local_midnight() {
    let sunrise = utc(2024, 6, 1, 8, 0);
    let sunset = utc(2024, 6, 1, 22, 30);
    let info = calc_daylight_info(sunrise, sunset, &Berlin);
    // sunset lands at 00:30 on the next local day
    assert_eq!(info.sunrise_seconds, 10 * 3600);
    assert_eq!(info.sunset_seconds, 30 * 60);
    assert_eq!(info.daylight_duration_seconds, 14 * HOUR + 30 * 60);
    assert_ne!(
        info.daylight_duration_seconds,
        i64::from(info.sunset_seconds) - i64::from(info.sunrise_seconds)
    );
}

#[test]
fn test_duration_across_dst_transition() {
    // Berlin springs forward at 01:00 UTC on 2024-03-31
    let sunrise = utc(2024, 3, 31, 0, 30);
    let sunset = utc(2024, 3, 31, 2, 30);
    let info = calc_daylight_info(sunrise, sunset, &Berlin);
    // 01:30 CET, then 04:30 CEST which is only 3.5h after local midnight
    assert_eq!(info.sunrise_seconds, 3600 + 30 * 60);
    assert_eq!(info.sunset_seconds, 3 * 3600 + 30 * 60);
    assert_eq!(info.daylight_duration_seconds, 2 * HOUR);
}

#[test]
fn test_local_day_start_skips_missing_midnight() {
    // Santiago springs forward from 00:00 to 01:00 on 2024-09-08
    let start = local_day_start(&utc(2024, 9, 8, 12, 0), &Santiago).unwrap();
    assert_eq!(start, utc(2024, 9, 8, 4, 0));
    let info = calc_daylight_info(utc(2024, 9, 8, 12, 0), utc(2024, 9, 8, 22, 0), &Santiago);
    assert_eq!(info.sunrise_seconds, 8 * 3600);
    assert_eq!(info.sunset_seconds, 18 * 3600);
}

#[test]
fn test_berlin_dst_days_count_elapsed_seconds() {
    let berlin = lookup("Berlin", &Database::bundled().unwrap()).unwrap();
    let observer = berlin.observer();
    let tz = berlin.timezone().unwrap();

    // 23h day: midnight is 23:00 UTC the evening before
    let (sunrise, sunset) = SpaSunEvents.daylight(&observer, date(2024, 3, 31)).unwrap();
    let record = day_record(&SpaSunEvents, &observer, &tz, date(2024, 3, 31)).unwrap();
    let midnight = utc(2024, 3, 30, 23, 0);
    assert_eq!(i64::from(record.sunrise_seconds), (sunrise - midnight).num_seconds());
    assert_eq!(i64::from(record.sunset_seconds), (sunset - midnight).num_seconds());
    // sunrise about 06:42 CEST
    assert_approx!(record.sunrise_seconds, 5 * 3600 + 42 * 60 + 12, 120.0);
    let wall_clock = sunrise.with_timezone(&tz).time().num_seconds_from_midnight();
    assert_eq!(wall_clock - record.sunrise_seconds, 3600);

    // 25h day: midnight is 22:00 UTC the evening before
    let (_, sunset) = SpaSunEvents.daylight(&observer, date(2024, 10, 27)).unwrap();
    let record = day_record(&SpaSunEvents, &observer, &tz, date(2024, 10, 27)).unwrap();
    assert_eq!(
        i64::from(record.sunset_seconds),
        (sunset - utc(2024, 10, 26, 22, 0)).num_seconds()
    );
    let wall_clock = sunset.with_timezone(&tz).time().num_seconds_from_midnight();
    assert_eq!(record.sunset_seconds - wall_clock, 3600);
}

#[test]
fn test_duration_is_absolute() {
    let a = utc(2024, 6, 21, 3, 0);
    let b = utc(2024, 6, 21, 19, 0);
    let forward = calc_daylight_info(a, b, &Utc);
    let backward = calc_daylight_info(b, a, &Utc);
    assert_eq!(forward.daylight_duration_seconds, 16 * HOUR);
    assert_eq!(backward.daylight_duration_seconds, 16 * HOUR);
}

// ── day_range ──

#[test]
fn test_day_range_lengths() {
    assert_eq!(day_range(2023).unwrap().count(), 365);
    assert_eq!(day_range(2024).unwrap().count(), 366);
    assert_eq!(day_range(1900).unwrap().count(), 365);
    assert_eq!(day_range(2000).unwrap().count(), 366);
}

#[test]
fn test_day_range_bounds() {
    let days: Vec<NaiveDate> = day_range(2025).unwrap().collect();
    assert_eq!(days.first(), Some(&date(2025, 1, 1)));
    assert_eq!(days.last(), Some(&date(2025, 12, 31)));
}

#[test]
fn test_day_range_invalid_year() {
    assert!(matches!(
        day_range(300_000).err(),
        Some(DaylightError::InvalidYear(300_000))
    ));
}

// ── build_table with injected events ──

#[test]
fn test_build_table_with_fixed_events() {
    let table = build_table(&FixedSun, &moscow(), 2023).unwrap();
    assert_eq!(table.len(), 365);
    assert_eq!(table.year, 2023);
    for r in &table.records {
        // MSK is UTC+3 all year
        assert_eq!(r.sunrise_seconds, 9 * 3600);
        assert_eq!(r.sunset_seconds, 21 * 3600);
        assert_eq!(r.daylight_duration_seconds, 12 * HOUR);
    }
}

#[test]
fn test_build_table_aborts_on_first_failure() {
    let sun = FailingSun(date(2024, 6, 21));
    let err = build_table(&sun, &moscow(), 2024).unwrap_err();
    match err {
        DaylightError::NoSunrise { date: d, .. } => assert_eq!(d, date(2024, 6, 21)),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_build_table_unknown_timezone() {
    let mut location = moscow();
    location.timezone = "Mars/Olympus_Mons".to_string();
    assert!(matches!(
        build_table(&FixedSun, &location, 2024),
        Err(DaylightError::UnknownTimezone(_))
    ));
}

// ── Full year with SPA ──

#[test]
fn test_leap_year_has_366_records() {
    assert_eq!(MOSCOW_2024.len(), 366);
    assert_eq!(MOSCOW_2024.location.name, "Moscow");
}

#[test]
fn test_common_year_has_365_records() {
    let table = build_year("Moscow", 2023).unwrap();
    assert_eq!(table.len(), 365);
}

#[test]
fn test_records_ascending_without_gaps() {
    assert_eq!(MOSCOW_2024.records[0].date, date(2024, 1, 1));
    for pair in MOSCOW_2024.records.windows(2) {
        assert_eq!(pair[1].date, pair[0].date + Duration::days(1));
    }
}

#[test]
fn test_seconds_of_day_in_range() {
    for r in &MOSCOW_2024.records {
        assert!(r.sunrise_seconds < SECONDS_PER_DAY, "{:?}", r);
        assert!(r.sunset_seconds < SECONDS_PER_DAY, "{:?}", r);
        assert!(r.daylight_duration_seconds >= 0, "{:?}", r);
    }
}

#[test]
fn test_duration_matches_utc_instants() {
    let observer = moscow().observer();
    for day in [date(2024, 1, 15), date(2024, 3, 20), date(2024, 6, 21), date(2024, 10, 27)] {
        let (sunrise, sunset) = SpaSunEvents.daylight(&observer, day).unwrap();
        let expected = (sunset - sunrise).num_seconds().abs();
        assert_eq!(record_for(&MOSCOW_2024, day).daylight_duration_seconds, expected);
    }
}

#[test]
fn test_summer_solstice_longer_than_winter() {
    let summer = record_for(&MOSCOW_2024, date(2024, 6, 21));
    let winter = record_for(&MOSCOW_2024, date(2024, 12, 21));
    assert!(summer.daylight_duration_seconds > winter.daylight_duration_seconds);
    assert!(summer.daylight_duration_seconds > 17 * HOUR);
    assert!(winter.daylight_duration_seconds < 7 * HOUR + 15 * 60);
}

#[test]
fn test_moscow_solstice_clock_times() {
    let summer = record_for(&MOSCOW_2024, date(2024, 6, 21));
    // about 03:45 and 21:18 MSK
    assert_approx!(summer.sunrise_seconds, 3 * 3600 + 45 * 60, 900.0);
    assert_approx!(summer.sunset_seconds, 21 * 3600 + 18 * 60, 900.0);
}

#[test]
fn test_longest_and_shortest_day() {
    let longest = MOSCOW_2024.longest_day().unwrap();
    let shortest = MOSCOW_2024.shortest_day().unwrap();
    assert_approx!(longest.date.ordinal(), date(2024, 6, 20).ordinal(), 4.0);
    assert_approx!(shortest.date.ordinal(), date(2024, 12, 21).ordinal(), 4.0);
}

#[test]
fn test_southern_hemisphere_inverted() {
    let table = build_year("Sydney", 2024).unwrap();
    let june = record_for(&table, date(2024, 6, 21));
    let december = record_for(&table, date(2024, 12, 21));
    assert!(december.daylight_duration_seconds > june.daylight_duration_seconds);
}

#[test]
fn test_far_from_greenwich_brackets_daylight() {
    // UTC+10 and UTC-7: the UTC day splits the local daylight period
    let sydney = build_year("Sydney", 2024).unwrap();
    assert_approx!(
        record_for(&sydney, date(2024, 6, 21)).daylight_duration_seconds,
        9 * HOUR + 54 * 60,
        1800.0
    );
    let los_angeles = build_year("Los Angeles", 2024).unwrap();
    assert_approx!(
        record_for(&los_angeles, date(2024, 6, 21)).daylight_duration_seconds,
        14 * HOUR + 26 * 60,
        1800.0
    );
}

#[test]
fn test_sunset_never_precedes_sunrise() {
    let observer = lookup("Auckland", &Database::bundled().unwrap())
        .unwrap()
        .observer();
    for day in day_range(2024).unwrap().step_by(7) {
        let (sunrise, sunset) = SpaSunEvents.daylight(&observer, day).unwrap();
        assert!(sunset > sunrise, "{}: {} .. {}", day, sunrise, sunset);
        assert!(sunset - sunrise < Duration::hours(24));
    }
}

#[test]
fn test_rerun_is_identical() {
    let again = build_year("Moscow", 2024).unwrap();
    assert_eq!(*MOSCOW_2024, again);
}

// ── Failures ──

#[test]
fn test_unknown_city_fails() {
    assert!(matches!(
        build_year("Nonexistent City", 2024),
        Err(DaylightError::LocationNotFound(name)) if name == "Nonexistent City"
    ));
}

#[test]
fn test_polar_day_has_no_sunrise() {
    let observer = lookup("Longyearbyen", &Database::bundled().unwrap())
        .unwrap()
        .observer();
    match SpaSunEvents.daylight(&observer, date(2024, 6, 21)) {
        Err(DaylightError::NoSunrise { condition, .. }) => {
            assert_eq!(condition, "above the horizon")
        }
        other => panic!("expected polar day, got {:?}", other),
    }
}

#[test]
fn test_polar_night_has_no_sunrise() {
    let observer = lookup("Longyearbyen", &Database::bundled().unwrap())
        .unwrap()
        .observer();
    match SpaSunEvents.daylight(&observer, date(2024, 12, 21)) {
        Err(DaylightError::NoSunrise { condition, .. }) => {
            assert_eq!(condition, "below the horizon")
        }
        other => panic!("expected polar night, got {:?}", other),
    }
}

#[test]
fn test_polar_year_is_fatal() {
    assert!(matches!(
        build_year("Longyearbyen", 2024),
        Err(DaylightError::NoSunrise { .. })
    ));
}
