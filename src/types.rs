use chrono::{Datelike, Local, NaiveDate};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Observer {
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Location {
    pub name: String,
    pub region: String,
    pub latitude: f64,
    pub longitude: f64,
    pub timezone: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DaylightInfo {
    pub sunrise_seconds: u32,
    pub sunset_seconds: u32,
    pub daylight_duration_seconds: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DayRecord {
    pub date: NaiveDate,
    pub sunrise_seconds: u32,
    pub sunset_seconds: u32,
    pub daylight_duration_seconds: i64,
}

impl DayRecord {
    pub fn new(date: NaiveDate, info: DaylightInfo) -> Self {
        Self {
            date,
            sunrise_seconds: info.sunrise_seconds,
            sunset_seconds: info.sunset_seconds,
            daylight_duration_seconds: info.daylight_duration_seconds,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DaylightTable {
    pub location: Location,
    pub year: i32,
    pub records: Vec<DayRecord>,
}

impl DaylightTable {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn longest_day(&self) -> Option<&DayRecord> {
        self.records
            .iter()
            .max_by_key(|r| r.daylight_duration_seconds)
    }

    pub fn shortest_day(&self) -> Option<&DayRecord> {
        self.records
            .iter()
            .min_by_key(|r| r.daylight_duration_seconds)
    }

    pub fn to_columns(&self) -> DaylightColumns {
        DaylightColumns {
            day: self.records.iter().map(|r| r.date).collect(),
            daylight_duration_sec: self
                .records
                .iter()
                .map(|r| r.daylight_duration_seconds)
                .collect(),
            sunrise_time_sec: self.records.iter().map(|r| r.sunrise_seconds).collect(),
            sunset_time_sec: self.records.iter().map(|r| r.sunset_seconds).collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DaylightColumns {
    pub day: Vec<NaiveDate>,
    pub daylight_duration_sec: Vec<i64>,
    pub sunrise_time_sec: Vec<u32>,
    pub sunset_time_sec: Vec<u32>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChartConfig {
    pub city: String,
    /// `None` means the current year.
    pub year: Option<i32>,
    pub width: u32,
    pub height: u32,
    pub svg_path: String,
    pub html_path: Option<String>,
    pub json_path: Option<String>,
}

impl ChartConfig {
    pub fn resolved_year(&self) -> i32 {
        self.year.unwrap_or_else(|| Local::now().year())
    }
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            city: "Moscow".to_string(),
            year: None,
            width: 1200,
            height: 700,
            svg_path: "daylight.svg".to_string(),
            html_path: Some("daylight.html".to_string()),
            json_path: Some("daylight.json".to_string()),
        }
    }
}
