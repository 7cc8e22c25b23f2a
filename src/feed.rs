//! tar1090 feed payload handling.
//!
//! The feed is a JSON document shaped like `{"now": ..., "aircraft": [...]}`.
//! Entries are full of optional fields (an aircraft with a stale fix has no
//! lat/lon at all) and the occasional surprise, `alt_baro` can be the string
//! `"ground"`.  Every entry is parsed individually so one malformed record
//! never poisons the whole batch.
//!

use serde::Deserialize;
use serde_json::Value;
use tracing::{trace, warn};

use crate::{GeoPoint, Status};

/// Document shape of one poll; entries stay untyped until parsed one by one.
///
#[derive(Debug, Deserialize)]
struct FeedDocument {
    /// Feed timestamp, UNIX seconds
    now: f64,
    /// Raw entries
    aircraft: Vec<Value>,
}

/// One aircraft entry as reported by the feed.
///
/// Only the hex identifier is guaranteed; everything else is optional and
/// stays `None` when the feed did not report it.
///
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RawAircraft {
    /// 24-bit ICAO transponder address as a hex string, lowercased
    pub hex: String,
    /// Callsign, trimmed, truncated to 8 characters
    pub callsign: Option<String>,
    /// Latitude in degrees
    pub lat: Option<f64>,
    /// Longitude in degrees
    pub lon: Option<f64>,
    /// Barometric altitude in feet; `None` when absent or on the ground
    pub altitude: Option<f64>,
    /// Reported as `alt_baro = "ground"`
    pub on_ground: bool,
    /// Ground speed in knots
    pub speed: Option<f64>,
    /// Track over ground in degrees, [0, 360]
    pub track: Option<f64>,
    /// Seconds since the last message from this aircraft
    pub seen: Option<f64>,
}

impl RawAircraft {
    /// Position of this aircraft, if it has a fresh fix.
    ///
    pub fn position(&self) -> Option<GeoPoint> {
        match (self.lat, self.lon) {
            (Some(lat), Some(lon)) => Some(GeoPoint::new(lat, lon)),
            _ => None,
        }
    }

    /// Parse one feed entry.
    ///
    /// A missing or non-string `hex` and any present-but-unparseable numeric
    /// field are `MalformedField` errors; absent optional fields are fine.
    ///
    pub fn from_json(entry: &Value) -> Result<Self, Status> {
        let hex = entry
            .get("hex")
            .and_then(Value::as_str)
            .ok_or_else(|| malformed("hex", entry.get("hex")))?
            .to_lowercase();

        let callsign = match entry.get("flight") {
            None | Some(Value::Null) => None,
            Some(Value::String(s)) => {
                let s = s.trim();
                match s.is_empty() {
                    true => None,
                    false => Some(s.chars().take(8).collect()),
                }
            }
            Some(v) => return Err(malformed("flight", Some(v))),
        };

        // "ground" is a legitimate barometric altitude in this feed
        //
        let (altitude, on_ground) = match entry.get("alt_baro") {
            None | Some(Value::Null) => (None, false),
            Some(Value::String(s)) if s == "ground" => (None, true),
            Some(v) => (
                Some(v.as_f64().ok_or_else(|| malformed("alt_baro", Some(v)))?),
                false,
            ),
        };

        Ok(RawAircraft {
            hex,
            callsign,
            lat: opt_f64(entry, "lat")?,
            lon: opt_f64(entry, "lon")?,
            altitude,
            on_ground,
            speed: opt_f64(entry, "gs")?,
            track: opt_f64(entry, "track")?,
            seen: opt_f64(entry, "seen")?,
        })
    }
}

fn malformed(field: &str, value: Option<&Value>) -> Status {
    Status::MalformedField(
        field.to_string(),
        value.map(Value::to_string).unwrap_or_else(|| "absent".into()),
    )
}

/// Numeric field that may be absent but must parse when present.
///
fn opt_f64(entry: &Value, field: &str) -> Result<Option<f64>, Status> {
    match entry.get(field) {
        None | Some(Value::Null) => Ok(None),
        Some(v) => v
            .as_f64()
            .map(Some)
            .ok_or_else(|| malformed(field, Some(v))),
    }
}

/// Parse a whole feed payload into a batch.
///
/// Malformed entries are skipped with a warning; a payload that is not a
/// document with an `aircraft` array is rejected outright.
///
#[tracing::instrument(skip(payload))]
pub fn parse_payload(payload: &str) -> Result<Vec<RawAircraft>, Status> {
    let doc: FeedDocument = serde_json::from_str(payload).map_err(Status::BadPayload)?;
    trace!("feed timestamp {}", doc.now);

    let batch: Vec<RawAircraft> = doc
        .aircraft
        .iter()
        .filter_map(|entry| match RawAircraft::from_json(entry) {
            Ok(a) => Some(a),
            Err(e) => {
                warn!("skipping entry: {}", e);
                None
            }
        })
        .collect();

    trace!("{} aircraft in batch", batch.len());
    Ok(batch)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_minimal_entry() {
        let entry = json!({"hex": "7C1234"});
        let a = RawAircraft::from_json(&entry).unwrap();

        assert_eq!("7c1234", a.hex);
        assert_eq!(None, a.callsign);
        assert_eq!(None, a.position());
    }

    #[test]
    fn test_parse_full_entry() {
        let entry = json!({
            "hex": "7c6b2d",
            "flight": "QFA123  ",
            "lat": -31.9,
            "lon": 115.8,
            "alt_baro": 35000,
            "gs": 450.3,
            "track": 270.0,
            "seen": 0.2,
        });
        let a = RawAircraft::from_json(&entry).unwrap();

        assert_eq!(Some("QFA123".to_string()), a.callsign);
        assert_eq!(Some(GeoPoint::new(-31.9, 115.8)), a.position());
        assert_eq!(Some(35000.), a.altitude);
        assert_eq!(Some(450.3), a.speed);
        assert!(!a.on_ground);
    }

    #[test]
    fn test_parse_ground_altitude() {
        let entry = json!({"hex": "7c1234", "alt_baro": "ground"});
        let a = RawAircraft::from_json(&entry).unwrap();

        assert_eq!(None, a.altitude);
        assert!(a.on_ground);
    }

    #[test]
    fn test_parse_bad_altitude() {
        let entry = json!({"hex": "7c1234", "alt_baro": "invalid_string"});

        assert!(RawAircraft::from_json(&entry).is_err());
    }

    #[test]
    fn test_parse_missing_hex() {
        let entry = json!({"lat": -31.9, "lon": 115.8});

        assert!(RawAircraft::from_json(&entry).is_err());
    }

    #[test]
    fn test_long_callsign_truncated() {
        let entry = json!({"hex": "7c1234", "flight": "VERYLONGCALLSIGN"});
        let a = RawAircraft::from_json(&entry).unwrap();

        assert_eq!(Some("VERYLONG".to_string()), a.callsign);
    }

    #[test]
    fn test_payload_skips_malformed_entry() {
        // 14 good entries plus one with a bogus altitude
        //
        let mut entries: Vec<Value> = (0..14)
            .map(|i| json!({"hex": format!("7c12{:02x}", i), "lat": -31.9, "lon": 115.8}))
            .collect();
        entries.push(json!({"hex": "7cffff", "alt_baro": "invalid_string"}));

        let payload = json!({"now": 1700000000.0, "aircraft": entries}).to_string();
        let batch = parse_payload(&payload).unwrap();

        assert_eq!(14, batch.len());
        assert!(batch.iter().all(|a| a.hex != "7cffff"));
    }

    #[test]
    fn test_payload_without_aircraft_array() {
        assert!(parse_payload(r#"{"now": 1700000000.0}"#).is_err());
    }

    #[test]
    fn test_payload_not_json() {
        assert!(parse_payload("not json at all").is_err());
    }
}
