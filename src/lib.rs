//! asf-enumeration: frame-based enumeration of Sentinel-1 acquisitions
//!
//! This library enumerates Sentinel-1 SLC granules and ARIA S1 GUNW
//! interferometric products that cover a fixed catalog of ground-track
//! frames. It groups raw search results into date-ordered acquisition
//! stacks and checks whether a (reference, secondary) date pair has
//! already been processed into a product.

pub mod core;
pub mod io;
pub mod types;

// Re-export main types and functions for easier access
pub use types::{
    AcquisitionGroup, AriaError, AriaFrame, AriaResult, FlightDirection, GranuleRecord,
};

pub use crate::core::{build_stack, group_granules, parse_date_pair};
pub use io::{AsfSearchClient, FrameCatalog};

use crate::core::any_product_matches;
use chrono::NaiveDate;
use geo::Polygon;

/// Frame enumeration service: the catalog plus a search client
///
/// All operations are synchronous; catalog lookups never touch the
/// network, the others perform one search request each.
pub struct AriaGunw {
    catalog: FrameCatalog,
    client: AsfSearchClient,
}

impl AriaGunw {
    /// Service over the bundled frame catalog and the production
    /// search endpoint.
    pub fn new() -> AriaResult<Self> {
        Ok(AriaGunw {
            catalog: FrameCatalog::load()?,
            client: AsfSearchClient::new()?,
        })
    }

    /// Service from preconstructed parts.
    pub fn from_parts(catalog: FrameCatalog, client: AsfSearchClient) -> Self {
        AriaGunw { catalog, client }
    }

    pub fn catalog(&self) -> &FrameCatalog {
        &self.catalog
    }

    /// Frames satisfying all supplied constraints; `None` imposes no
    /// filter.
    pub fn get_frames(
        &self,
        polygon: Option<&Polygon<f64>>,
        flight_direction: Option<FlightDirection>,
        path: Option<u32>,
    ) -> Vec<&AriaFrame> {
        self.catalog.find(polygon, flight_direction, path)
    }

    /// Frame by id.
    pub fn get_frame(&self, frame_id: u32) -> AriaResult<&AriaFrame> {
        self.catalog.get(frame_id)
    }

    /// Full acquisition stack for a frame, sorted ascending by date.
    pub fn get_stack(&self, frame_id: u32) -> AriaResult<Vec<AcquisitionGroup>> {
        let frame = self.catalog.get(frame_id)?;
        let granules = self.client.search_granules(frame, None)?;

        Ok(build_stack(granules))
    }

    /// SLC granules acquired over a frame on the given date.
    pub fn get_slcs(&self, frame_id: u32, date: NaiveDate) -> AriaResult<Vec<GranuleRecord>> {
        let frame = self.catalog.get(frame_id)?;

        self.client.search_granules(frame, Some(date))
    }

    /// True if a GUNW product for exactly this (reference, secondary)
    /// date pair already exists for the frame.
    ///
    /// A product name that fails to parse propagates as an error, not
    /// as `false`.
    pub fn does_product_exist(
        &self,
        frame_id: u32,
        reference_date: NaiveDate,
        secondary_date: NaiveDate,
    ) -> AriaResult<bool> {
        let frame = self.catalog.get(frame_id)?;
        let names = self
            .client
            .search_existing_products(frame.frame_id, reference_date)?;

        any_product_matches(&names, reference_date, secondary_date)
    }
}
