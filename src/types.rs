//! Core data types for station map visualizations.
//!
//! All types serialize with `serde` using the field names the rendering
//! layer expects (`netFlow`, `totalTraffic`), and `Station` preserves any
//! extra fields it was loaded with verbatim.

use crate::error::Result;
use geo::Point;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

/// A point-of-interest record with an identifier and geographic coordinates.
///
/// Fields beyond `id`, `longitude`, and `latitude` are captured in `extra`
/// and carried through serialization and enrichment untouched.
///
/// # Examples
///
/// ```rust
/// use stationflow::Station;
///
/// let station: Station = serde_json::from_str(
///     r#"{"id": "S1", "longitude": -74.0, "latitude": 40.7, "name": "Broadway & W 41 St"}"#,
/// ).unwrap();
///
/// assert_eq!(station.id, "S1");
/// assert_eq!(station.extra["name"], "Broadway & W 41 St");
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Station {
    pub id: String,
    pub longitude: f64,
    pub latitude: f64,
    /// Additional fields preserved verbatim (name, capacity, ...).
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl Station {
    /// Create a station with no extra fields.
    pub fn new(id: impl Into<String>, longitude: f64, latitude: f64) -> Self {
        Self {
            id: id.into(),
            longitude,
            latitude,
            extra: serde_json::Map::new(),
        }
    }

    /// The station's position as a `geo::Point` (x = longitude, y = latitude).
    pub fn point(&self) -> Point {
        Point::new(self.longitude, self.latitude)
    }
}

/// A traffic-count sample for one station at one hour-of-day bucket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HourlyRecord {
    pub station_id: String,
    pub hour: u8,
    pub pickups: u32,
    pub dropoffs: u32,
}

/// An ordered collection of [`HourlyRecord`] samples.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TrafficDataset {
    pub hourly_data: Vec<HourlyRecord>,
}

impl TrafficDataset {
    /// Create a dataset from a sequence of hourly records.
    pub fn new(hourly_data: Vec<HourlyRecord>) -> Self {
        Self { hourly_data }
    }

    /// Parse a dataset from a JSON document of the form
    /// `{"hourly_data": [{"station_id": ..., "hour": ..., ...}]}`.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Number of hourly records in the dataset.
    pub fn len(&self) -> usize {
        self.hourly_data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hourly_data.is_empty()
    }

    /// Find the first record for the given station and hour.
    ///
    /// If the dataset contains duplicate (station_id, hour) pairs, the first
    /// one in iteration order wins; later duplicates are ignored.
    pub fn lookup(&self, station_id: &str, hour: u8) -> Option<&HourlyRecord> {
        self.hourly_data
            .iter()
            .find(|record| record.station_id == station_id && record.hour == hour)
    }

    /// Build a station-id keyed map of all records for one hour.
    ///
    /// First-match-wins on duplicate station ids, consistent with [`lookup`].
    /// Useful when enriching many stations for the same hour, since it avoids
    /// rescanning the dataset per station.
    ///
    /// [`lookup`]: TrafficDataset::lookup
    pub fn hour_lookup(&self, hour: u8) -> FxHashMap<&str, &HourlyRecord> {
        let mut by_station: FxHashMap<&str, &HourlyRecord> = FxHashMap::default();
        for record in self.hourly_data.iter().filter(|r| r.hour == hour) {
            by_station
                .entry(record.station_id.as_str())
                .or_insert(record);
        }
        by_station
    }
}

/// A [`Station`] augmented with computed traffic metrics for a specific hour.
///
/// Serializes with the station's own fields flattened at the top level plus
/// `pickups`, `dropoffs`, `netFlow`, and `totalTraffic`, matching what the
/// map rendering layer consumes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnrichedStation {
    #[serde(flatten)]
    pub station: Station,
    pub pickups: u32,
    pub dropoffs: u32,
    /// `pickups - dropoffs`; negative when more bikes leave than arrive.
    #[serde(rename = "netFlow")]
    pub net_flow: i64,
    /// `pickups + dropoffs`
    #[serde(rename = "totalTraffic")]
    pub total_traffic: u64,
}
