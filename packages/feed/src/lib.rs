#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! USGS earthquake feed acquisition.
//!
//! Performs a single GET against a summary `GeoJSON` feed, parses the
//! `FeatureCollection`, and validates each feature into a
//! [`FeatureRecord`]. There is no retry and no timeout: a failed request
//! is returned to the caller as-is.

pub mod parse;
pub mod selection;

use quake_map_quake_models::FeatureRecord;
use thiserror::Error;

pub use parse::parse_feature_collection;
pub use selection::{FeedMagnitude, FeedPeriod, FeedSelection};

/// Errors that can occur while acquiring the feed.
#[derive(Debug, Error)]
pub enum FeedError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The feed answered with a non-success status.
    #[error("Feed request failed with status {status}")]
    Status {
        /// The HTTP status code returned by the feed.
        status: u16,
    },

    /// The body was not valid `GeoJSON`.
    #[error("GeoJSON error: {0}")]
    GeoJson(#[from] geojson::Error),

    /// The body was `GeoJSON` but not in the expected shape.
    #[error("Conversion error: {message}")]
    Conversion {
        /// Description of what went wrong.
        message: String,
    },
}

/// Result of one feed read: the valid records plus a count of features
/// that were dropped during validation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FeedSnapshot {
    /// Feed title from the collection metadata, when present.
    pub title: Option<String>,
    /// Validated records in feed order.
    pub records: Vec<FeatureRecord>,
    /// Number of features skipped because required fields were missing.
    pub skipped: usize,
}

/// Builds the HTTP client used for feed requests.
///
/// # Errors
///
/// Returns [`FeedError::Http`] if the TLS backend cannot be initialized.
pub fn client() -> Result<reqwest::Client, FeedError> {
    Ok(reqwest::Client::builder()
        .user_agent(concat!("quake-map/", env!("CARGO_PKG_VERSION")))
        .build()?)
}

/// Fetches and parses the feed at `url`.
///
/// # Errors
///
/// Returns [`FeedError`] if the request fails, the feed answers with a
/// non-success status, or the body is not a `GeoJSON` `FeatureCollection`.
pub async fn fetch(client: &reqwest::Client, url: &str) -> Result<FeedSnapshot, FeedError> {
    log::info!("Fetching earthquake feed from {url}");

    let resp = client.get(url).send().await?;
    if !resp.status().is_success() {
        return Err(FeedError::Status {
            status: resp.status().as_u16(),
        });
    }
    let body = resp.text().await?;

    let snapshot = parse_feature_collection(&body)?;

    log::info!(
        "Feed returned {} usable features ({} skipped)",
        snapshot.records.len(),
        snapshot.skipped
    );

    Ok(snapshot)
}
