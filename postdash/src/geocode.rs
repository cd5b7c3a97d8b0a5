//! Geocoding lookup: free-text location search for the map.
//!
//! Thin client for a Nominatim-style search endpoint. The pipeline only
//! ever consumes the first candidate, so the lookup collapses the response
//! to an `Option<Place>`. Candidates arrive with `lat`/`lon` as JSON
//! strings and are parsed to `f64`; a candidate that fails to parse is
//! skipped.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{GeocodeError, Result};

/// The default geocoding search endpoint.
pub const DEFAULT_GEOCODE_ENDPOINT: &str = "https://nominatim.openstreetmap.org/search";

/// Number of candidates requested per lookup.
const CANDIDATE_LIMIT: usize = 5;

/// Configuration for geocoding lookups.
#[derive(Debug, Clone)]
pub struct GeocodeConfig {
    /// Search endpoint URL.
    pub endpoint: String,
    /// HTTP timeout for the request.
    pub timeout: Duration,
}

impl GeocodeConfig {
    /// Creates a config for the given endpoint with a 30s timeout.
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            timeout: Duration::from_secs(30),
        }
    }

    /// Sets the HTTP timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

impl Default for GeocodeConfig {
    fn default() -> Self {
        Self::new(DEFAULT_GEOCODE_ENDPOINT)
    }
}

/// One raw candidate from the search response.
#[derive(Debug, Deserialize)]
struct RawCandidate {
    /// Latitude as a decimal string.
    lat: String,
    /// Longitude as a decimal string.
    lon: String,
    /// Human-readable place name.
    display_name: String,
}

/// A resolved place: the first usable candidate of a lookup.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Place {
    /// Latitude in degrees.
    pub lat: f64,
    /// Longitude in degrees.
    pub lon: f64,
    /// Human-readable place name.
    pub name: String,
}

/// Extracts the first usable place from a search response body.
///
/// Returns `None` for an empty candidate list, an undecodable body, or
/// when no candidate has parseable coordinates. Decode problems are logged,
/// never raised: a bad geocode response must not crash the caller.
pub fn first_place(body: &str) -> Option<Place> {
    let candidates = match serde_json::from_str::<Vec<RawCandidate>>(body) {
        Ok(candidates) => candidates,
        Err(e) => {
            tracing::warn!("failed to decode geocode response: {e}");
            return None;
        }
    };

    candidates.into_iter().find_map(|candidate| {
        let lat = candidate.lat.parse().ok()?;
        let lon = candidate.lon.parse().ok()?;
        Some(Place {
            lat,
            lon,
            name: candidate.display_name,
        })
    })
}

/// Looks up a free-text query and returns the first candidate, if any.
///
/// # Errors
///
/// Returns [`GeocodeError`] variants for client construction, request
/// transport, HTTP status and body-read failures. A response with zero
/// candidates is `Ok(None)`, not an error.
pub fn lookup(config: &GeocodeConfig, query: &str) -> Result<Option<Place>> {
    let client = reqwest::blocking::Client::builder()
        .timeout(config.timeout)
        .build()
        .map_err(|e| GeocodeError::ClientCreate { source: e })?;

    let response = client
        .get(&config.endpoint)
        .query(&[
            ("format", "json"),
            ("q", query),
            ("limit", &CANDIDATE_LIMIT.to_string()),
        ])
        .send()
        .map_err(|e| GeocodeError::RequestFailed {
            query: query.to_string(),
            source: e,
        })?;

    let status = response.status();
    if !status.is_success() {
        return Err(GeocodeError::HttpStatus {
            query: query.to_string(),
            status: status.as_u16(),
        }
        .into());
    }

    let body = response.text().map_err(|e| GeocodeError::BodyRead {
        query: query.to_string(),
        source: e,
    })?;

    Ok(first_place(&body))
}
