//! The unbuilt/built lifecycle of a composed map.
//!
//! A map starts unbuilt and becomes built exactly once, when the feed has
//! been acquired, transformed, and composed. There is no partial state and
//! no way back: the page is rendered at the moment of the transition and
//! both the view and the page are immutable from then on.

use std::sync::{Arc, OnceLock};

use quake_map_map_models::MapView;
use serde::Serialize;
use strum_macros::{AsRefStr, Display};

use crate::{MapError, render::render_page};

/// Where a map is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Display, AsRefStr)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum CompositionPhase {
    /// The feed has not been composed yet
    Unbuilt,
    /// The view and page are available
    Built,
}

/// A composed view together with its rendered page.
#[derive(Debug)]
pub struct BuiltMap {
    /// The view model.
    pub view: MapView,
    /// The rendered HTML page.
    pub page: String,
}

/// Holder for the one-time unbuilt → built transition.
#[derive(Debug, Default)]
pub struct MapState {
    built: OnceLock<Arc<BuiltMap>>,
}

impl MapState {
    /// Creates an unbuilt state.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            built: OnceLock::new(),
        }
    }

    /// Renders `view` and moves the state to built.
    ///
    /// # Errors
    ///
    /// Returns [`MapError::AlreadyBuilt`] if the transition has already
    /// happened, or the [`crate::render::render_page`] error if the page
    /// cannot be rendered. In both cases the state is unchanged.
    pub fn complete(&self, view: MapView) -> Result<Arc<BuiltMap>, MapError> {
        if self.built.get().is_some() {
            return Err(MapError::AlreadyBuilt);
        }

        let page = render_page(&view)?;
        let built = Arc::new(BuiltMap { view, page });

        self.built
            .set(Arc::clone(&built))
            .map_err(|_| MapError::AlreadyBuilt)?;

        log::info!("Map composition complete");
        Ok(built)
    }

    /// Returns the built map, or `None` while unbuilt.
    #[must_use]
    pub fn get(&self) -> Option<Arc<BuiltMap>> {
        self.built.get().cloned()
    }

    /// Returns the current lifecycle phase.
    #[must_use]
    pub fn phase(&self) -> CompositionPhase {
        if self.built.get().is_some() {
            CompositionPhase::Built
        } else {
            CompositionPhase::Unbuilt
        }
    }

    /// Returns `true` once the map is built.
    #[must_use]
    pub fn is_built(&self) -> bool {
        self.phase() == CompositionPhase::Built
    }
}
