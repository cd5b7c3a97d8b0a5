//! Error types for the postdash pipeline.
//!
//! The derivation engines (aggregation, sampling, filter/pagination, export
//! shaping) are total functions and never fail; errors only arise at the
//! boundaries — the upstream HTTP fetch, the geocoding lookup, and the
//! export sink that writes spreadsheet files.

use std::path::PathBuf;

use thiserror::Error;

/// The main error type for all postdash operations.
///
/// Covers the three fallible boundaries of the pipeline. Everything between
/// them (the pure derivation engines) returns plain values.
#[derive(Error, Debug)]
pub enum PostdashError {
    /// Error while fetching the upstream post list.
    #[error("fetch error: {0}")]
    Fetch(#[from] FetchError),

    /// Error during a geocoding lookup.
    #[error("geocode error: {0}")]
    Geocode(#[from] GeocodeError),

    /// Error while writing an export artifact.
    #[error("export error: {0}")]
    Export(#[from] ExportError),
}

/// Errors that can occur while fetching the upstream post list.
#[derive(Error, Debug)]
pub enum FetchError {
    /// Failed to construct the HTTP client.
    #[error("failed to create HTTP client: {source}")]
    ClientCreate {
        /// The underlying reqwest error.
        #[source]
        source: reqwest::Error,
    },

    /// The HTTP request itself failed (connection, timeout, DNS).
    #[error("request to '{endpoint}' failed: {source}")]
    RequestFailed {
        /// The endpoint that was contacted.
        endpoint: String,
        /// The underlying reqwest error.
        #[source]
        source: reqwest::Error,
    },

    /// The server returned a non-2xx status.
    #[error("'{endpoint}' returned status {status}")]
    HttpStatus {
        /// The endpoint that was contacted.
        endpoint: String,
        /// The HTTP status code.
        status: u16,
    },

    /// Failed to read the response body.
    #[error("failed to read response body from '{endpoint}': {source}")]
    BodyRead {
        /// The endpoint that was contacted.
        endpoint: String,
        /// The underlying reqwest error.
        #[source]
        source: reqwest::Error,
    },
}

/// Errors that can occur during a geocoding lookup.
#[derive(Error, Debug)]
pub enum GeocodeError {
    /// Failed to construct the HTTP client.
    #[error("failed to create HTTP client: {source}")]
    ClientCreate {
        /// The underlying reqwest error.
        #[source]
        source: reqwest::Error,
    },

    /// The HTTP request itself failed.
    #[error("geocode request for '{query}' failed: {source}")]
    RequestFailed {
        /// The free-text query being looked up.
        query: String,
        /// The underlying reqwest error.
        #[source]
        source: reqwest::Error,
    },

    /// The server returned a non-2xx status.
    #[error("geocode request for '{query}' returned status {status}")]
    HttpStatus {
        /// The free-text query being looked up.
        query: String,
        /// The HTTP status code.
        status: u16,
    },

    /// Failed to read the response body.
    #[error("failed to read geocode response for '{query}': {source}")]
    BodyRead {
        /// The free-text query being looked up.
        query: String,
        /// The underlying reqwest error.
        #[source]
        source: reqwest::Error,
    },
}

/// Errors that can occur while writing an export artifact.
#[derive(Error, Debug)]
pub enum ExportError {
    /// The output directory could not be created.
    #[error("failed to create export directory '{}': {source}", path.display())]
    DirectoryCreate {
        /// The directory that could not be created.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The export file could not be written.
    #[error("failed to write export file '{}': {source}", path.display())]
    FileWrite {
        /// The file that could not be written.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}

/// Type alias for `Result<T, PostdashError>`.
pub type Result<T> = std::result::Result<T, PostdashError>;
