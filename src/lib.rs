//! Spatial indexing, throttling, and traffic statistics for station map
//! visualizations.
//!
//! ```rust
//! use stationflow::{Point, Station, StationIndex, enrich_station_stats, TrafficDataset};
//!
//! let stations = vec![
//!     Station::new("S1", -74.0060, 40.7128),
//!     Station::new("S2", -73.9442, 40.6782),
//! ];
//!
//! let index = StationIndex::build(&stations)?;
//! let nearest = index.nearest(&Point::new(-74.0, 40.71)).unwrap();
//!
//! let traffic = TrafficDataset::default();
//! let enriched = enrich_station_stats(nearest, &traffic, 8);
//! assert_eq!(enriched.total_traffic, 0);
//! # Ok::<(), stationflow::StationflowError>(())
//! ```

pub mod error;
pub mod index;
pub mod stats;
pub mod throttle;
pub mod types;

pub use error::{Result, StationflowError};

pub use geo::{Point, Rect};

pub use index::{IndexedStation, StationIndex, build_station_index, validate_station_coordinates};

pub use stats::{enrich_all_stations, enrich_station_stats};

pub use throttle::{RateLimiter, Throttled, throttle};

pub use types::{EnrichedStation, HourlyRecord, Station, TrafficDataset};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Common imports
pub mod prelude {

    pub use crate::{Result, StationflowError};

    pub use geo::{Point, Rect};

    pub use crate::{StationIndex, build_station_index};

    pub use crate::{enrich_all_stations, enrich_station_stats};

    pub use crate::{RateLimiter, Throttled, throttle};

    pub use crate::{EnrichedStation, HourlyRecord, Station, TrafficDataset};

    pub use std::time::Duration;
}
