//! 2D spatial index over station coordinates using an R-tree.
//!
//! The index is built once from a snapshot of stations and answers
//! nearest-neighbor, radius, and bounding-box queries. Radius queries use
//! envelope-based pruning: an axis-aligned bounding box in degrees is
//! computed around the query circle, the R-tree retrieves only candidates
//! intersecting that envelope, and exact Haversine distances filter the
//! remainder. This avoids scanning every station for localized queries.

use crate::error::{Result, StationflowError};
use crate::types::Station;
use geo::{Distance, Haversine, Point, Rect};
use rstar::{Point as RstarPoint, RTree};

/// Earth radius in meters for degree/meter conversions
const EARTH_RADIUS_METERS: f64 = 6_371_000.0;

/// A station wrapped for R-tree indexing, positioned at (longitude, latitude).
#[derive(Debug, Clone, PartialEq)]
pub struct IndexedStation {
    pub x: f64,
    pub y: f64,
    pub station: Station,
}

impl IndexedStation {
    fn from_station(station: &Station) -> Self {
        Self {
            x: station.longitude,
            y: station.latitude,
            station: station.clone(),
        }
    }
}

impl RstarPoint for IndexedStation {
    type Scalar = f64;
    const DIMENSIONS: usize = 2;

    fn generate(mut generator: impl FnMut(usize) -> Self::Scalar) -> Self {
        Self {
            x: generator(0),
            y: generator(1),
            station: Station::default(),
        }
    }

    fn nth(&self, index: usize) -> Self::Scalar {
        match index {
            0 => self.x,
            1 => self.y,
            _ => unreachable!(),
        }
    }

    fn nth_mut(&mut self, index: usize) -> &mut Self::Scalar {
        match index {
            0 => &mut self.x,
            1 => &mut self.y,
            _ => unreachable!(),
        }
    }
}

/// Validates that a station has finite, in-range coordinates.
///
/// Longitude: [-180.0, 180.0], Latitude: [-90.0, 90.0]
pub fn validate_station_coordinates(station: &Station) -> Result<()> {
    let (lon, lat) = (station.longitude, station.latitude);

    if !lon.is_finite() {
        return Err(StationflowError::InvalidCoordinates {
            id: station.id.clone(),
            reason: format!("longitude must be finite, got: {}", lon),
        });
    }

    if !lat.is_finite() {
        return Err(StationflowError::InvalidCoordinates {
            id: station.id.clone(),
            reason: format!("latitude must be finite, got: {}", lat),
        });
    }

    if !(-180.0..=180.0).contains(&lon) {
        return Err(StationflowError::InvalidCoordinates {
            id: station.id.clone(),
            reason: format!("longitude out of range [-180.0, 180.0]: {}", lon),
        });
    }

    if !(-90.0..=90.0).contains(&lat) {
        return Err(StationflowError::InvalidCoordinates {
            id: station.id.clone(),
            reason: format!("latitude out of range [-90.0, 90.0]: {}", lat),
        });
    }

    Ok(())
}

/// An immutable spatial index over a snapshot of stations.
///
/// Built once per station set; stations with identical coordinates are all
/// retained. Coordinates are validated up front, so queries never see
/// non-finite points.
///
/// # Examples
///
/// ```rust
/// use stationflow::{Station, StationIndex};
/// use geo::Point;
///
/// let stations = vec![
///     Station::new("S1", -74.0060, 40.7128),
///     Station::new("S2", -73.9442, 40.6782),
/// ];
///
/// let index = StationIndex::build(&stations)?;
/// assert_eq!(index.len(), 2);
///
/// let nearest = index.nearest(&Point::new(-74.0, 40.71)).unwrap();
/// assert_eq!(nearest.id, "S1");
/// # Ok::<(), stationflow::StationflowError>(())
/// ```
#[derive(Debug)]
pub struct StationIndex {
    tree: RTree<IndexedStation>,
}

impl StationIndex {
    /// Build an index from a snapshot of stations.
    ///
    /// # Errors
    ///
    /// Returns [`StationflowError::InvalidCoordinates`] if any station has
    /// non-finite or out-of-range coordinates. An empty input yields an
    /// empty, still-queryable index.
    pub fn build(stations: &[Station]) -> Result<Self> {
        for station in stations {
            validate_station_coordinates(station)?;
        }

        let points: Vec<IndexedStation> =
            stations.iter().map(IndexedStation::from_station).collect();

        log::debug!("Built station index with {} points", points.len());

        Ok(Self {
            tree: RTree::bulk_load(points),
        })
    }

    /// Number of stations in the index.
    pub fn len(&self) -> usize {
        self.tree.size()
    }

    pub fn is_empty(&self) -> bool {
        self.tree.size() == 0
    }

    /// Iterate over all indexed stations in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = &Station> {
        self.tree.iter().map(|indexed| &indexed.station)
    }

    /// Find the station closest to the query point, if any.
    pub fn nearest(&self, query: &Point) -> Option<&Station> {
        let query_point = IndexedStation::generate(|i| match i {
            0 => query.x(),
            _ => query.y(),
        });

        self.tree
            .nearest_neighbor(&query_point)
            .map(|indexed| &indexed.station)
    }

    /// Find the k stations closest to the query point.
    ///
    /// # Returns
    ///
    /// Vector of (station, distance) pairs sorted nearest first, with
    /// distances in meters (Haversine).
    pub fn nearest_n(&self, query: &Point, k: usize) -> Vec<(&Station, f64)> {
        let query_point = IndexedStation::generate(|i| match i {
            0 => query.x(),
            _ => query.y(),
        });

        self.tree
            .nearest_neighbor_iter(&query_point)
            .take(k)
            .map(|indexed| {
                let distance =
                    Haversine.distance(*query, Point::new(indexed.x, indexed.y));
                (&indexed.station, distance)
            })
            .collect()
    }

    /// Find all stations within `radius` meters of the center point.
    ///
    /// # Arguments
    ///
    /// * `center` - Center of the query circle
    /// * `radius` - Radius in meters
    /// * `limit` - Maximum number of results to return
    ///
    /// # Returns
    ///
    /// Vector of (station, distance) pairs within the radius, sorted by
    /// distance in meters. A non-finite or negative radius yields no
    /// results.
    pub fn within_radius(&self, center: &Point, radius: f64, limit: usize) -> Vec<(&Station, f64)> {
        if !radius.is_finite() || radius < 0.0 {
            log::warn!("Rejecting radius query with invalid radius: {}", radius);
            return Vec::new();
        }

        let lat_degrees = (radius / EARTH_RADIUS_METERS).to_degrees();
        let lon_degrees =
            (radius / (EARTH_RADIUS_METERS * center.y().to_radians().cos())).to_degrees();

        let min_corner = IndexedStation::generate(|i| match i {
            0 => center.x() - lon_degrees,
            _ => center.y() - lat_degrees,
        });
        let max_corner = IndexedStation::generate(|i| match i {
            0 => center.x() + lon_degrees,
            _ => center.y() + lat_degrees,
        });
        let envelope = rstar::AABB::from_corners(min_corner, max_corner);

        let mut results: Vec<(&Station, f64)> = self
            .tree
            .locate_in_envelope_intersecting(&envelope)
            .filter_map(|indexed| {
                let distance =
                    Haversine.distance(*center, Point::new(indexed.x, indexed.y));
                if distance <= radius {
                    Some((&indexed.station, distance))
                } else {
                    None
                }
            })
            .collect();

        results.sort_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal));
        results.truncate(limit);
        results
    }

    /// Find all stations inside a bounding box.
    ///
    /// The box's corners are normalized by `geo::Rect`, so min/max order
    /// does not matter. Non-finite corners yield no results.
    pub fn within_bbox(&self, bbox: &Rect) -> Vec<&Station> {
        let (min, max) = (bbox.min(), bbox.max());

        if ![min.x, min.y, max.x, max.y].iter().all(|v| v.is_finite()) {
            log::warn!("Rejecting bounding box query with non-finite coordinates");
            return Vec::new();
        }

        let min_corner = IndexedStation::generate(|i| match i {
            0 => min.x,
            _ => min.y,
        });
        let max_corner = IndexedStation::generate(|i| match i {
            0 => max.x,
            _ => max.y,
        });
        let envelope = rstar::AABB::from_corners(min_corner, max_corner);

        self.tree
            .locate_in_envelope_intersecting(&envelope)
            .map(|indexed| &indexed.station)
            .collect()
    }
}

/// Build a spatial index from a snapshot of stations.
///
/// Free-function form of [`StationIndex::build`], matching the signature
/// the visualization layer consumes.
pub fn build_station_index(stations: &[Station]) -> Result<StationIndex> {
    StationIndex::build(stations)
}
