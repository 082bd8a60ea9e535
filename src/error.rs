use chrono::NaiveDate;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DaylightError {
    #[error("location not found: {0}")]
    LocationNotFound(String),

    #[error("unknown timezone identifier: {0}")]
    UnknownTimezone(String),

    #[error("invalid city table entry on line {line}: {reason}")]
    InvalidTable { line: usize, reason: String },

    #[error("year {0} is outside the supported calendar range")]
    InvalidYear(i32),

    /// Polar day or polar night: the sun does not cross the horizon on this date.
    #[error("no sunrise or sunset on {date} at ({latitude}, {longitude}): sun is always {condition}")]
    NoSunrise {
        date: NaiveDate,
        latitude: f64,
        longitude: f64,
        condition: &'static str,
    },

    #[error("solar position calculation failed: {0}")]
    Solar(#[from] solar_positioning::Error),

    #[error("failed to render chart: {0}")]
    Render(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, DaylightError>;
