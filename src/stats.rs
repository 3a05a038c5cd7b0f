//! Per-hour traffic statistics for stations.

use crate::types::{EnrichedStation, Station, TrafficDataset};

/// Combine a station with its traffic counts for one hour.
///
/// Scans `traffic.hourly_data` for the first record matching the station's
/// id and the given hour; if none exists, pickups and dropoffs default to
/// zero. The inputs are never mutated.
///
/// # Examples
///
/// ```rust
/// use stationflow::{enrich_station_stats, HourlyRecord, Station, TrafficDataset};
///
/// let station = Station::new("S1", -74.0, 40.7);
/// let traffic = TrafficDataset::new(vec![HourlyRecord {
///     station_id: "S1".into(),
///     hour: 5,
///     pickups: 10,
///     dropoffs: 4,
/// }]);
///
/// let enriched = enrich_station_stats(&station, &traffic, 5);
/// assert_eq!(enriched.net_flow, 6);
/// assert_eq!(enriched.total_traffic, 14);
///
/// // Missing data is not an error; counts default to zero.
/// let quiet = enrich_station_stats(&station, &traffic, 6);
/// assert_eq!(quiet.total_traffic, 0);
/// ```
pub fn enrich_station_stats(
    station: &Station,
    traffic: &TrafficDataset,
    hour: u8,
) -> EnrichedStation {
    let (pickups, dropoffs) = traffic
        .lookup(&station.id, hour)
        .map(|record| (record.pickups, record.dropoffs))
        .unwrap_or((0, 0));

    with_counts(station, pickups, dropoffs)
}

/// Enrich every station in a snapshot for one hour.
///
/// Equivalent to calling [`enrich_station_stats`] per station, including
/// the first-match-wins behavior on duplicate records, but builds the
/// per-hour lookup once instead of rescanning the dataset for each station.
pub fn enrich_all_stations(
    stations: &[Station],
    traffic: &TrafficDataset,
    hour: u8,
) -> Vec<EnrichedStation> {
    let by_station = traffic.hour_lookup(hour);

    stations
        .iter()
        .map(|station| {
            let (pickups, dropoffs) = by_station
                .get(station.id.as_str())
                .map(|record| (record.pickups, record.dropoffs))
                .unwrap_or((0, 0));
            with_counts(station, pickups, dropoffs)
        })
        .collect()
}

fn with_counts(station: &Station, pickups: u32, dropoffs: u32) -> EnrichedStation {
    EnrichedStation {
        station: station.clone(),
        pickups,
        dropoffs,
        net_flow: i64::from(pickups) - i64::from(dropoffs),
        total_traffic: u64::from(pickups) + u64::from(dropoffs),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::HourlyRecord;

    fn record(station_id: &str, hour: u8, pickups: u32, dropoffs: u32) -> HourlyRecord {
        HourlyRecord {
            station_id: station_id.into(),
            hour,
            pickups,
            dropoffs,
        }
    }

    #[test]
    fn test_enrich_with_match() {
        let station = Station::new("S1", 1.0, 2.0);
        let traffic = TrafficDataset::new(vec![record("S1", 5, 10, 4)]);

        let enriched = enrich_station_stats(&station, &traffic, 5);
        assert_eq!(enriched.pickups, 10);
        assert_eq!(enriched.dropoffs, 4);
        assert_eq!(enriched.net_flow, 6);
        assert_eq!(enriched.total_traffic, 14);
        assert_eq!(enriched.station, station);
    }

    #[test]
    fn test_enrich_defaults_to_zero() {
        let station = Station::new("S1", 1.0, 2.0);
        let traffic = TrafficDataset::default();

        let enriched = enrich_station_stats(&station, &traffic, 5);
        assert_eq!(enriched.pickups, 0);
        assert_eq!(enriched.dropoffs, 0);
        assert_eq!(enriched.net_flow, 0);
        assert_eq!(enriched.total_traffic, 0);
    }

    #[test]
    fn test_enrich_negative_net_flow() {
        let station = Station::new("S1", 1.0, 2.0);
        let traffic = TrafficDataset::new(vec![record("S1", 8, 2, 9)]);

        let enriched = enrich_station_stats(&station, &traffic, 8);
        assert_eq!(enriched.net_flow, -7);
        assert_eq!(enriched.total_traffic, 11);
    }

    #[test]
    fn test_enrich_first_duplicate_wins() {
        let station = Station::new("S1", 1.0, 2.0);
        let traffic = TrafficDataset::new(vec![
            record("S1", 5, 10, 4),
            record("S1", 5, 99, 99),
        ]);

        let enriched = enrich_station_stats(&station, &traffic, 5);
        assert_eq!(enriched.pickups, 10);
        assert_eq!(enriched.dropoffs, 4);
    }

    #[test]
    fn test_enrich_does_not_mutate_inputs() {
        let mut station = Station::new("S1", 1.0, 2.0);
        station
            .extra
            .insert("name".into(), serde_json::Value::String("Main St".into()));
        let traffic = TrafficDataset::new(vec![record("S1", 5, 10, 4)]);

        let station_before = station.clone();
        let traffic_before = traffic.clone();

        let _ = enrich_station_stats(&station, &traffic, 5);

        assert_eq!(station, station_before);
        assert_eq!(traffic, traffic_before);
    }

    #[test]
    fn test_enrich_all_matches_per_station_calls() {
        let stations = vec![
            Station::new("S1", 1.0, 2.0),
            Station::new("S2", 3.0, 4.0),
            Station::new("S3", 5.0, 6.0),
        ];
        let traffic = TrafficDataset::new(vec![
            record("S1", 5, 10, 4),
            record("S2", 5, 3, 7),
            record("S2", 5, 50, 50),
            record("S1", 6, 1, 1),
        ]);

        let bulk = enrich_all_stations(&stations, &traffic, 5);
        assert_eq!(bulk.len(), 3);
        for (station, enriched) in stations.iter().zip(&bulk) {
            assert_eq!(*enriched, enrich_station_stats(station, &traffic, 5));
        }
        assert_eq!(bulk[1].pickups, 3);
        assert_eq!(bulk[2].total_traffic, 0);
    }
}
