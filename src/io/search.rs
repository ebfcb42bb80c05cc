use crate::types::{AriaError, AriaFrame, AriaResult, GranuleRecord};
use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use serde::de::DeserializeOwned;
use serde::Deserialize;

/// ASF SearchAPI parameter endpoint
const SEARCH_ENDPOINT: &str = "https://api.daac.asf.alaska.edu/services/search/param";

const SENTINEL1_DATASET: &str = "SENTINEL-1";
const GUNW_DATASET: &str = "ARIA S1 GUNW";

/// Pad around a day's acquisition window, absorbing clock skew at
/// acquisition boundaries.
const ACQUISITION_PAD_MINUTES: i64 = 5;

/// Window around a reference date when searching for existing products.
const PRODUCT_SEARCH_WINDOW_DAYS: i64 = 1;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

/// Blocking client for the ASF search service
///
/// One request per call, no internal retries. Callers needing
/// resilience wrap these calls with their own retry policy.
pub struct AsfSearchClient {
    client: reqwest::blocking::Client,
    endpoint: String,
}

impl AsfSearchClient {
    /// Client against the production ASF SearchAPI.
    pub fn new() -> AriaResult<Self> {
        Self::with_endpoint(SEARCH_ENDPOINT)
    }

    /// Client against an alternate endpoint (staging, local stub).
    pub fn with_endpoint(endpoint: impl Into<String>) -> AriaResult<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .map_err(|e| AriaError::Gateway(format!("failed to create HTTP client: {}", e)))?;

        Ok(AsfSearchClient {
            client,
            endpoint: endpoint.into(),
        })
    }

    /// Search Sentinel-1 SLC granules covering the frame.
    ///
    /// With `date`, the window is the padded acquisition day; without,
    /// the query is unbounded and returns the full historical stack.
    pub fn search_granules(
        &self,
        frame: &AriaFrame,
        date: Option<NaiveDate>,
    ) -> AriaResult<Vec<GranuleRecord>> {
        let mut params: Vec<(&str, String)> = vec![
            ("output", "jsonlite".to_string()),
            ("dataset", SENTINEL1_DATASET.to_string()),
            ("platform", "SA,SB".to_string()),
            ("processingLevel", "SLC".to_string()),
            ("beamMode", "IW".to_string()),
            ("polarization", "VV,VV+VH".to_string()),
            ("flightDirection", frame.flight_direction.to_string()),
            ("relativeOrbit", frame.path.to_string()),
            ("intersectsWith", frame.wkt()),
        ];

        if let Some(date) = date {
            let midnight = date.and_time(NaiveTime::MIN);
            let start = midnight - Duration::minutes(ACQUISITION_PAD_MINUTES);
            let end = midnight + Duration::days(1) + Duration::minutes(ACQUISITION_PAD_MINUTES);

            params.push(("start", start.format(TIMESTAMP_FORMAT).to_string()));
            params.push(("end", end.format(TIMESTAMP_FORMAT).to_string()));
        }

        log::debug!(
            "Searching SLC granules for frame {} (path {}, {})",
            frame.frame_id,
            frame.path,
            frame.flight_direction
        );

        let response: SearchResponse<GranuleEntry> = self.query(&params)?;

        log::info!(
            "Search returned {} granules for frame {}",
            response.results.len(),
            frame.frame_id
        );

        response
            .results
            .into_iter()
            .map(granule_from_entry)
            .collect()
    }

    /// Search existing GUNW products for the frame near a reference
    /// date, returning their product names.
    pub fn search_existing_products(
        &self,
        frame_id: u32,
        reference_date: NaiveDate,
    ) -> AriaResult<Vec<String>> {
        let start = reference_date - Duration::days(PRODUCT_SEARCH_WINDOW_DAYS);
        let end = reference_date + Duration::days(PRODUCT_SEARCH_WINDOW_DAYS);

        let params: Vec<(&str, String)> = vec![
            ("output", "jsonlite".to_string()),
            ("dataset", GUNW_DATASET.to_string()),
            ("frame", frame_id.to_string()),
            ("start", start.format("%Y-%m-%d").to_string()),
            ("end", end.format("%Y-%m-%d").to_string()),
        ];

        log::debug!(
            "Searching GUNW products for frame {} around {}",
            frame_id,
            reference_date
        );

        let response: SearchResponse<ProductEntry> = self.query(&params)?;

        Ok(response
            .results
            .into_iter()
            .map(|entry| entry.scene_name)
            .collect())
    }

    fn query<T: DeserializeOwned>(&self, params: &[(&str, String)]) -> AriaResult<SearchResponse<T>> {
        let response = self
            .client
            .get(self.endpoint.as_str())
            .query(params)
            .send()
            .map_err(|e| AriaError::Gateway(format!("search request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(AriaError::Gateway(format!(
                "search request failed with status {}",
                status
            )));
        }

        response
            .json()
            .map_err(|e| AriaError::Gateway(format!("could not decode search response: {}", e)))
    }
}

#[derive(Debug, Deserialize)]
struct SearchResponse<T> {
    results: Vec<T>,
}

#[derive(Debug, Deserialize)]
struct GranuleEntry {
    platform: String,
    orbit: u32,
    #[serde(rename = "startTime")]
    start_time: String,
    #[serde(rename = "sceneName")]
    scene_name: String,
}

#[derive(Debug, Deserialize)]
struct ProductEntry {
    #[serde(rename = "sceneName")]
    scene_name: String,
}

fn granule_from_entry(entry: GranuleEntry) -> AriaResult<GranuleRecord> {
    Ok(GranuleRecord {
        start_time: parse_start_time(&entry.start_time)?,
        platform: entry.platform,
        orbit: entry.orbit,
        scene_name: entry.scene_name,
    })
}

/// The service emits RFC 3339 timestamps, occasionally without a
/// timezone suffix; bare timestamps are UTC.
fn parse_start_time(raw: &str) -> AriaResult<DateTime<Utc>> {
    if let Ok(timestamp) = DateTime::parse_from_rfc3339(raw) {
        return Ok(timestamp.with_timezone(&Utc));
    }

    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .map(|naive| naive.and_utc())
        .map_err(|_| {
            AriaError::Gateway(format!("unparseable startTime '{}' in search response", raw))
        })
}
