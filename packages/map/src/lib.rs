#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Composition of the earthquake map.
//!
//! Wires the three stages together: [`initialize`] acquires the feed,
//! transforms every record into heat, marker, and event primitives, and
//! composes them with the registered base layers and the depth legend into
//! a [`MapView`]. The view is rendered into a standalone Leaflet page by
//! [`render::render_page`], and [`state::MapState`] models the one-time
//! transition from unbuilt to built.

pub mod compose;
pub mod registry;
pub mod render;
pub mod state;

use quake_map_feed::FeedError;
use quake_map_map_models::MapView;
use thiserror::Error;

pub use compose::compose;
pub use render::render_page;
pub use state::{BuiltMap, CompositionPhase, MapState};

/// Errors that can occur while building or rendering the map.
#[derive(Debug, Error)]
pub enum MapError {
    /// Feed acquisition failed.
    #[error("Feed error: {0}")]
    Feed(#[from] FeedError),

    /// The view could not be serialized.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The page template is missing a placeholder.
    #[error("Template error: {message}")]
    Template {
        /// Which placeholder was missing.
        message: String,
    },

    /// The map was already built.
    #[error("Map has already been built")]
    AlreadyBuilt,
}

/// Acquires the feed at `url` and composes the full map.
///
/// The only suspension point is the feed request; transformation and
/// composition run synchronously once it resolves.
///
/// # Errors
///
/// Returns [`MapError::Feed`] if the feed cannot be fetched or parsed.
pub async fn initialize(client: &reqwest::Client, url: &str) -> Result<MapView, MapError> {
    let snapshot = quake_map_feed::fetch(client, url).await?;
    let layers = quake_map_transform::transform(&snapshot.records);

    Ok(compose(layers, snapshot.title.as_deref()))
}
