//! Free-form task location strings and their interpretation.
//!
//! A stored location is either a `"lat,lng"` pin, a JSON object carrying
//! `lat`, `lng` and an optional `name`, or an arbitrary place name.

use super::TaskDomainError;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Latitude/longitude pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    /// Latitude in decimal degrees.
    pub lat: f64,
    /// Longitude in decimal degrees.
    pub lng: f64,
}

impl Coordinates {
    /// Returns the pair as `[lat, lng]`.
    #[must_use]
    pub const fn as_pair(self) -> [f64; 2] {
        [self.lat, self.lng]
    }

    fn label(self) -> String {
        format!("{}, {}", fixed_four(self.lat), fixed_four(self.lng))
    }
}

/// Formats to four decimals, rounding exact halves away from zero and
/// printing negative zero as `0.0000`.
fn fixed_four(value: f64) -> String {
    let magnitude = value.abs();
    let rounded = if halfway_at_four_places(magnitude) {
        f64::from_bits(magnitude.to_bits().saturating_add(1))
    } else {
        magnitude
    };
    let digits = format!("{rounded:.4}");
    if value < 0.0 {
        format!("-{digits}")
    } else {
        digits
    }
}

/// True when `magnitude` is an odd multiple of 1/32, the only binary
/// fractions that end in a 5 at the fifth decimal place.
fn halfway_at_four_places(magnitude: f64) -> bool {
    const FRACTION_BITS: u32 = 52;
    const EXPONENT_BIAS: i32 = 1075;

    let bits = magnitude.to_bits();
    let fraction = bits & ((1_u64 << FRACTION_BITS) - 1);
    let Ok(biased) = i32::try_from(bits >> FRACTION_BITS) else {
        return false;
    };
    let (significand, exponent) = if biased == 0 {
        (fraction, 1 - EXPONENT_BIAS)
    } else {
        (fraction | (1_u64 << FRACTION_BITS), biased - EXPONENT_BIAS)
    };
    let Ok(lowest_bit) = i32::try_from(significand.trailing_zeros()) else {
        return false;
    };
    significand != 0 && exponent + lowest_bit == -5
}

/// Display name and optional coordinates recovered from a location string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParsedLocation {
    /// Human-readable place name.
    pub name: String,
    /// Coordinates, when the string carried them.
    pub coordinates: Option<Coordinates>,
}

/// Interprets a stored location string.
///
/// Returns `None` for empty input. A `"lat,lng"` pin is labelled with both
/// values to four decimals; a JSON object uses its `name` when present and
/// reads string coordinates by their leading number; any other text becomes
/// the name with no coordinates.
#[must_use]
pub fn parse_location(raw: &str) -> Option<ParsedLocation> {
    if raw.is_empty() {
        return None;
    }

    if let Some(coordinates) = parse_pin(raw) {
        return Some(ParsedLocation {
            name: coordinates.label(),
            coordinates: Some(coordinates),
        });
    }

    if let Ok(Value::Object(fields)) = serde_json::from_str::<Value>(raw)
        && let Some(parsed) = parse_object(&fields)
    {
        return Some(parsed);
    }

    Some(ParsedLocation {
        name: raw.to_owned(),
        coordinates: None,
    })
}

fn parse_pin(raw: &str) -> Option<Coordinates> {
    let (lat_text, rest) = raw.split_once(',')?;
    let lng_text = rest.trim_start();
    if !is_decimal(lat_text) || !is_decimal(lng_text) {
        return None;
    }
    let lat = lat_text.parse::<f64>().ok()?;
    let lng = lng_text.parse::<f64>().ok()?;
    Some(Coordinates { lat, lng })
}

/// Matches `-?\d+(\.\d+)?`.
fn is_decimal(text: &str) -> bool {
    let unsigned = text.strip_prefix('-').unwrap_or(text);
    let (whole, fraction) = match unsigned.split_once('.') {
        Some((whole, fraction)) => (whole, Some(fraction)),
        None => (unsigned, None),
    };
    let all_digits = |part: &str| !part.is_empty() && part.chars().all(|c| c.is_ascii_digit());
    all_digits(whole) && fraction.is_none_or(all_digits)
}

fn parse_object(fields: &Map<String, Value>) -> Option<ParsedLocation> {
    let name = fields
        .get("name")
        .and_then(Value::as_str)
        .filter(|name| !name.is_empty());
    let lat = fields.get("lat").and_then(numeric);
    let lng = fields.get("lng").and_then(numeric);

    match (lat, lng) {
        (Some(lat), Some(lng)) => {
            let coordinates = Coordinates { lat, lng };
            Some(ParsedLocation {
                name: name.map_or_else(|| coordinates.label(), str::to_owned),
                coordinates: Some(coordinates),
            })
        }
        _ => name.map(|place| ParsedLocation {
            name: place.to_owned(),
            coordinates: None,
        }),
    }
}

fn numeric(value: &Value) -> Option<f64> {
    let number = match value {
        Value::Number(number) => number.as_f64(),
        Value::String(text) => leading_decimal(text.trim_start())?.parse::<f64>().ok(),
        _ => None,
    }?;
    number.is_finite().then_some(number)
}

/// Returns the longest prefix of `text` that reads as a decimal number,
/// ignoring whatever trails it (`"12abc"` yields `"12"`).
fn leading_decimal(text: &str) -> Option<&str> {
    let bytes = text.as_bytes();
    let at = |index: usize| bytes.get(index).copied();
    let digits_from = |start: usize| {
        (start..)
            .find(|&index| !at(index).is_some_and(|byte| byte.is_ascii_digit()))
            .unwrap_or(start)
    };

    let mut end = usize::from(matches!(at(0), Some(b'+' | b'-')));
    let whole_end = digits_from(end);
    let mut has_digits = whole_end > end;
    end = whole_end;
    if at(end) == Some(b'.') {
        let fraction_end = digits_from(end + 1);
        has_digits |= fraction_end > end + 1;
        end = fraction_end;
    }
    if !has_digits {
        return None;
    }

    if matches!(at(end), Some(b'e' | b'E')) {
        let sign = usize::from(matches!(at(end + 1), Some(b'+' | b'-')));
        let exponent_start = end + 1 + sign;
        let exponent_end = digits_from(exponent_start);
        if exponent_end > exponent_start {
            end = exponent_end;
        }
    }
    text.get(..end)
}

/// Location string stored with a task.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskLocation(String);

impl TaskLocation {
    /// Wraps a location string that must resolve to coordinates.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::MissingCoordinates`] when the string is
    /// empty or only names a place.
    pub fn with_coordinates(raw: impl Into<String>) -> Result<Self, TaskDomainError> {
        let location = Self(raw.into());
        match location.parsed() {
            Some(ParsedLocation {
                coordinates: Some(_),
                ..
            }) => Ok(location),
            _ => Err(TaskDomainError::MissingCoordinates(location.0)),
        }
    }

    /// Wraps a location string read back from storage without validation.
    #[must_use]
    pub const fn from_stored(raw: String) -> Self {
        Self(raw)
    }

    /// Builds a `"lat,lng"` pin as produced by the map picker.
    #[must_use]
    pub fn pin(coordinates: Coordinates) -> Self {
        Self(format!("{},{}", coordinates.lat, coordinates.lng))
    }

    /// Builds a JSON location carrying a place name.
    #[must_use]
    pub fn named(coordinates: Coordinates, name: &str) -> Self {
        let value = serde_json::json!({
            "lat": coordinates.lat,
            "lng": coordinates.lng,
            "name": name,
        });
        Self(value.to_string())
    }

    /// Returns the stored string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Interprets the stored string.
    #[must_use]
    pub fn parsed(&self) -> Option<ParsedLocation> {
        parse_location(&self.0)
    }
}

impl fmt::Display for TaskLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
