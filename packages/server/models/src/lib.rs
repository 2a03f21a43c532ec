#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! API response types for the earthquake map server.
//!
//! The map view itself is served as-is from the map models; these are the
//! small envelopes around it.

use serde::{Deserialize, Serialize};

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiHealth {
    /// Whether the service is healthy.
    pub healthy: bool,
    /// Service version.
    pub version: String,
    /// Whether the map has been composed.
    pub built: bool,
    /// Lifecycle phase name (`unbuilt` or `built`).
    pub phase: String,
}

/// Body returned while the map is not yet available.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiUnavailable {
    /// Human-readable reason.
    pub message: String,
}
