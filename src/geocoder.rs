use chrono_tz::Tz;
use tracing::debug;

use crate::error::{DaylightError, Result};
use crate::types::{Location, Observer};

const CITY_TABLE: &str = include_str!("geocoder/cities.csv");

#[derive(Debug, Clone, PartialEq)]
pub struct Database {
    entries: Vec<Location>,
}

impl Database {
    pub fn bundled() -> Result<Self> {
        Self::parse(CITY_TABLE)
    }

    /// Parses `name,region,latitude,longitude,timezone` lines. Blank lines and
    /// lines starting with `#` are skipped.
    pub fn parse(text: &str) -> Result<Self> {
        let mut entries = Vec::new();
        for (idx, raw) in text.lines().enumerate() {
            let line = raw.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let entry = parse_entry(line).map_err(|reason| DaylightError::InvalidTable {
                line: idx + 1,
                reason,
            })?;
            entries.push(entry);
        }
        Ok(Self { entries })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn locations(&self) -> impl Iterator<Item = &Location> {
        self.entries.iter()
    }
}

fn parse_entry(line: &str) -> std::result::Result<Location, String> {
    let fields: Vec<&str> = line.split(',').map(str::trim).collect();
    let [name, region, latitude, longitude, timezone] = fields[..] else {
        return Err(format!("expected 5 fields, found {}", fields.len()));
    };
    Ok(Location {
        name: name.to_string(),
        region: region.to_string(),
        latitude: parse_coordinate(latitude, 'N', 'S')?,
        longitude: parse_coordinate(longitude, 'E', 'W')?,
        timezone: timezone.to_string(),
    })
}

/// Accepts `55°45'N` style values or plain signed decimal degrees.
pub fn parse_coordinate(
    text: &str,
    positive: char,
    negative: char,
) -> std::result::Result<f64, String> {
    if let Ok(value) = text.parse::<f64>() {
        return Ok(value);
    }
    let sign = match text.chars().last() {
        Some(c) if c == positive => 1.0,
        Some(c) if c == negative => -1.0,
        _ => return Err(format!("bad hemisphere in {text:?}")),
    };
    let body = &text[..text.len() - 1];
    let (degrees, rest) = body
        .split_once('°')
        .ok_or_else(|| format!("missing degree sign in {text:?}"))?;
    let minutes = rest.trim_end_matches('\'');
    let degrees: f64 = degrees
        .parse()
        .map_err(|_| format!("bad degrees in {text:?}"))?;
    let minutes: f64 = if minutes.is_empty() {
        0.0
    } else {
        minutes
            .parse()
            .map_err(|_| format!("bad minutes in {text:?}"))?
    };
    Ok(sign * (degrees + minutes / 60.0))
}

fn normalize_key(key: &str) -> String {
    key.trim().to_lowercase().replace('_', " ")
}

/// Looks up a city by name, or by `"Name, Region"` when the name is ambiguous.
/// Without a region the first entry for the name wins.
pub fn lookup(query: &str, db: &Database) -> Result<Location> {
    let (name, region) = match query.split_once(',') {
        Some((name, region)) => (normalize_key(name), Some(normalize_key(region))),
        None => (normalize_key(query), None),
    };

    let found = db.entries.iter().find(|loc| {
        normalize_key(&loc.name) == name
            && region
                .as_ref()
                .map_or(true, |r| normalize_key(&loc.region) == *r)
    });

    match found {
        Some(loc) => {
            debug!(
                "Resolved {:?} to {}, {} ({:.4}, {:.4}, {})",
                query, loc.name, loc.region, loc.latitude, loc.longitude, loc.timezone
            );
            Ok(loc.clone())
        }
        None => Err(DaylightError::LocationNotFound(query.to_string())),
    }
}

impl Location {
    pub fn observer(&self) -> Observer {
        Observer {
            latitude: self.latitude,
            longitude: self.longitude,
        }
    }

    pub fn timezone(&self) -> Result<Tz> {
        self.timezone
            .parse::<Tz>()
            .map_err(|_| DaylightError::UnknownTimezone(self.timezone.clone()))
    }
}
