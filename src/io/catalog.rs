use crate::types::{AriaError, AriaFrame, AriaResult, FlightDirection};
use geo::Polygon;
use geojson::{FeatureCollection, GeoJson};
use std::collections::BTreeMap;
use std::path::Path;
use std::str::FromStr;

/// Frame footprints bundled with the crate, one feature per ARIA frame
/// with `id`, `path` and `dir` properties and a polygon ring.
const FRAMES_GEOJSON: &str = include_str!("../../data/frames.geojson");

/// Read-once catalog of ARIA frame footprints
///
/// Loaded explicitly at startup and immutable afterwards, so shared
/// references can be handed out freely. Frames iterate in frame-id
/// order, which keeps filter results reproducible.
pub struct FrameCatalog {
    frames: BTreeMap<u32, AriaFrame>,
}

impl FrameCatalog {
    /// Load the catalog bundled with the crate.
    ///
    /// A malformed bundled catalog is a packaging defect; callers should
    /// treat this error as fatal.
    pub fn load() -> AriaResult<Self> {
        let catalog = Self::from_geojson(FRAMES_GEOJSON)?;
        log::info!("Loaded {} ARIA frames from bundled catalog", catalog.len());
        Ok(catalog)
    }

    /// Load a catalog from a GeoJSON file on disk.
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> AriaResult<Self> {
        log::info!("Loading ARIA frames from {}", path.as_ref().display());

        let content = std::fs::read_to_string(&path)?;
        Self::from_geojson(&content)
    }

    fn from_geojson(content: &str) -> AriaResult<Self> {
        let geojson = content
            .parse::<GeoJson>()
            .map_err(|e| AriaError::Catalog(format!("invalid GeoJSON: {}", e)))?;
        let collection = FeatureCollection::try_from(geojson)
            .map_err(|e| AriaError::Catalog(format!("not a feature collection: {}", e)))?;

        let mut frames = BTreeMap::new();

        for feature in collection.features {
            let frame = frame_from_feature(feature)?;

            if frames.contains_key(&frame.frame_id) {
                return Err(AriaError::Catalog(format!(
                    "duplicate frame id {}",
                    frame.frame_id
                )));
            }

            frames.insert(frame.frame_id, frame);
        }

        Ok(FrameCatalog { frames })
    }

    /// Look up a frame by id.
    pub fn get(&self, frame_id: u32) -> AriaResult<&AriaFrame> {
        self.frames
            .get(&frame_id)
            .ok_or(AriaError::FrameNotFound(frame_id))
    }

    /// All frames in the catalog, in frame-id order.
    pub fn iter(&self) -> impl Iterator<Item = &AriaFrame> {
        self.frames.values()
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Every frame satisfying all supplied constraints.
    ///
    /// Constraints are conjunctive; `None` imposes no filter. Path and
    /// direction are checked before the geometry predicate.
    pub fn find(
        &self,
        polygon: Option<&Polygon<f64>>,
        flight_direction: Option<FlightDirection>,
        path: Option<u32>,
    ) -> Vec<&AriaFrame> {
        self.frames
            .values()
            .filter(|frame| {
                if let Some(path) = path {
                    if frame.path != path {
                        return false;
                    }
                }

                if let Some(direction) = flight_direction {
                    if frame.flight_direction != direction {
                        return false;
                    }
                }

                if let Some(polygon) = polygon {
                    if !frame.does_intersect(polygon) {
                        return false;
                    }
                }

                true
            })
            .collect()
    }
}

fn frame_from_feature(feature: geojson::Feature) -> AriaResult<AriaFrame> {
    let properties = feature
        .properties
        .as_ref()
        .ok_or_else(|| AriaError::Catalog("frame feature has no properties".to_string()))?;

    let frame_id = require_u32(properties, "id")?;
    let path = require_u32(properties, "path")?;

    let direction = properties
        .get("dir")
        .and_then(|value| value.as_str())
        .ok_or_else(|| {
            AriaError::Catalog(format!("frame {}: missing 'dir' property", frame_id))
        })?;
    let flight_direction = FlightDirection::from_str(direction)
        .map_err(|e| AriaError::Catalog(format!("frame {}: {}", frame_id, e)))?;

    let geometry = feature.geometry.ok_or_else(|| {
        AriaError::Catalog(format!("frame {}: missing geometry", frame_id))
    })?;
    let polygon = Polygon::<f64>::try_from(geometry.value).map_err(|e| {
        AriaError::Catalog(format!("frame {}: geometry is not a polygon: {}", frame_id, e))
    })?;

    Ok(AriaFrame {
        frame_id,
        path,
        flight_direction,
        polygon,
    })
}

fn require_u32(properties: &geojson::JsonObject, key: &str) -> AriaResult<u32> {
    let value = properties
        .get(key)
        .and_then(|value| value.as_u64())
        .ok_or_else(|| {
            AriaError::Catalog(format!("frame feature missing integer '{}' property", key))
        })?;

    u32::try_from(value)
        .map_err(|_| AriaError::Catalog(format!("frame property '{}' out of range: {}", key, value)))
}
