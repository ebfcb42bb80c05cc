use chrono::{DateTime, NaiveDate, Utc};
use geo::{Intersects, Polygon};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use wkt::ToWkt;

/// Flight direction of a Sentinel-1 pass
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum FlightDirection {
    Ascending,
    Descending,
}

impl std::fmt::Display for FlightDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FlightDirection::Ascending => write!(f, "ASCENDING"),
            FlightDirection::Descending => write!(f, "DESCENDING"),
        }
    }
}

impl FromStr for FlightDirection {
    type Err = AriaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "ASCENDING" => Ok(FlightDirection::Ascending),
            "DESCENDING" => Ok(FlightDirection::Descending),
            _ => Err(AriaError::InvalidFlightDirection(s.to_string())),
        }
    }
}

/// One fixed ARIA ground-track footprint
///
/// Frames are loaded once from the bundled catalog and never mutated.
/// The polygon is a single closed ring in lon/lat order.
#[derive(Debug, Clone)]
pub struct AriaFrame {
    pub frame_id: u32,
    pub path: u32,
    pub flight_direction: FlightDirection,
    pub polygon: Polygon<f64>,
}

impl AriaFrame {
    /// True if the frame footprint intersects the given polygon.
    /// Boundary contact counts as an intersection.
    pub fn does_intersect(&self, polygon: &Polygon<f64>) -> bool {
        self.polygon.intersects(polygon)
    }

    /// Frame footprint as a WKT polygon string, the form the search
    /// service expects for spatial constraints.
    pub fn wkt(&self) -> String {
        self.polygon.wkt_string()
    }
}

/// Raw metadata for one SLC acquisition returned by the search service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GranuleRecord {
    pub platform: String,
    pub orbit: u32,
    pub start_time: DateTime<Utc>,
    pub scene_name: String,
}

/// Granules sharing (platform, orbit): one pass over a frame
///
/// `date` is the earliest acquisition start among the members,
/// truncated to a calendar date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AcquisitionGroup {
    pub date: NaiveDate,
    pub granules: Vec<GranuleRecord>,
}

/// Error types for frame enumeration
#[derive(Debug, thiserror::Error)]
pub enum AriaError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("frame catalog error: {0}")]
    Catalog(String),

    #[error("frame {0} not found in the ARIA frame catalog")]
    FrameNotFound(u32),

    #[error("invalid flight direction '{0}' (expected ASCENDING or DESCENDING)")]
    InvalidFlightDirection(String),

    #[error("search gateway error: {0}")]
    Gateway(String),

    #[error("malformed product name: {0}")]
    ProductName(String),
}

/// Result type for frame enumeration operations
pub type AriaResult<T> = Result<T, AriaError>;
