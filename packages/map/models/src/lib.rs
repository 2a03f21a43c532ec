#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! View-model types for the composed earthquake map.
//!
//! A [`MapView`] describes everything the page draws: the viewport, the
//! mutually exclusive base layers, the independently toggleable overlays,
//! and the layer and legend controls. These types are serialized to JSON
//! and handed to the browser, which only has to instantiate them.
//!
//! Layers are immutable once composed. What the viewer currently sees is
//! tracked separately by a [`LayerSelection`].

use std::collections::BTreeSet;

use quake_map_quake_models::{HeatSample, LegendEntry, MarkerSpec};
use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// A raster tile source, deserialized from TOML.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TileLayerDef {
    /// Unique layer identifier (e.g., `"street"`).
    pub id: String,
    /// Name shown in the layer control (e.g., "Street Map").
    pub name: String,
    /// Tile URL template with `{s}`, `{z}`, `{x}`, `{y}` placeholders.
    #[serde(alias = "url_template")]
    pub url_template: String,
    /// Attribution HTML shown in the map corner.
    pub attribution: String,
    /// Highest zoom level the tile server provides.
    #[serde(default = "default_max_zoom", alias = "max_zoom")]
    pub max_zoom: u8,
}

const fn default_max_zoom() -> u8 {
    19
}

/// A base layer and whether it is shown when the map opens.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BaseLayer {
    /// Tile source.
    pub tiles: TileLayerDef,
    /// Initially selected.
    pub visible: bool,
}

/// The three overlays of the map.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum OverlayKind {
    /// One plain point feature per event
    Events,
    /// Bubble markers sized by magnitude and colored by depth
    Earthquakes,
    /// Magnitude-weighted heat layer
    Heatmap,
}

impl OverlayKind {
    /// Returns the name shown in the layer control.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Events => "Event Locations",
            Self::Earthquakes => "Earthquakes",
            Self::Heatmap => "Heatmap",
        }
    }

    /// Returns all variants of this enum, in layer-control order.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::Events, Self::Earthquakes, Self::Heatmap]
    }
}

/// Rendering options for the heat layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeatLayerOptions {
    /// Radius of each point in pixels.
    pub radius: u32,
    /// Blur amount in pixels.
    pub blur: u32,
    /// Zoom level at which points reach full intensity.
    pub max_zoom: u8,
}

impl Default for HeatLayerOptions {
    fn default() -> Self {
        Self {
            radius: 40,
            blur: 15,
            max_zoom: 10,
        }
    }
}

/// The renderable content of an overlay.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum OverlayLayer {
    /// `GeoJSON` point features with a `popup` property.
    Vector {
        /// Feature collection drawn as default markers.
        features: geojson::FeatureCollection,
    },
    /// Circle markers.
    Markers {
        /// Marker specs in feed order.
        markers: Vec<MarkerSpec>,
    },
    /// Heat samples.
    Heat {
        /// `(lat, lon, intensity)` samples.
        samples: Vec<HeatSample>,
        /// Heat rendering options.
        options: HeatLayerOptions,
    },
}

impl OverlayLayer {
    /// Number of primitives in this layer.
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::Vector { features } => features.features.len(),
            Self::Markers { markers } => markers.len(),
            Self::Heat { samples, .. } => samples.len(),
        }
    }

    /// Returns `true` if the layer has nothing to draw.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// An overlay and whether it is shown when the map opens.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Overlay {
    /// Which overlay this is.
    pub kind: OverlayKind,
    /// Name shown in the layer control.
    pub name: String,
    /// Initially visible.
    pub visible: bool,
    /// Layer content.
    pub layer: OverlayLayer,
}

/// A geographic point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    /// Latitude in degrees.
    pub lat: f64,
    /// Longitude in degrees.
    pub lng: f64,
}

/// Initial map center and zoom.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Viewport {
    /// Map center.
    pub center: LatLng,
    /// Zoom level.
    pub zoom: u8,
}

/// Corner of the map a control is anchored to. Serialized with the
/// names Leaflet uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, AsRefStr)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ControlPosition {
    /// Top-left corner
    TopLeft,
    /// Top-right corner
    TopRight,
    /// Bottom-left corner
    BottomLeft,
    /// Bottom-right corner
    BottomRight,
}

/// The base/overlay selection control.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayerControl {
    /// Whether the control starts collapsed into an icon.
    pub collapsed: bool,
    /// Anchor corner.
    pub position: ControlPosition,
}

/// The static depth legend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LegendControl {
    /// Anchor corner.
    pub position: ControlPosition,
    /// Heading above the rows.
    pub title: String,
    /// Rows, shallowest first.
    pub entries: Vec<LegendEntry>,
}

/// The fully composed map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MapView {
    /// Page title.
    pub title: String,
    /// Initial center and zoom.
    pub viewport: Viewport,
    /// Mutually exclusive base layers.
    pub base_layers: Vec<BaseLayer>,
    /// Independently toggleable overlays.
    pub overlays: Vec<Overlay>,
    /// Layer selection control.
    pub layer_control: LayerControl,
    /// Depth legend.
    pub legend: LegendControl,
}

impl MapView {
    /// Returns the overlay of the given kind.
    #[must_use]
    pub fn overlay(&self, kind: OverlayKind) -> Option<&Overlay> {
        self.overlays.iter().find(|o| o.kind == kind)
    }

    /// Returns the base layer with the given id.
    #[must_use]
    pub fn base_layer(&self, id: &str) -> Option<&BaseLayer> {
        self.base_layers.iter().find(|b| b.tiles.id == id)
    }

    /// Returns the selection the map opens with.
    #[must_use]
    pub fn initial_selection(&self) -> LayerSelection {
        let base = self
            .base_layers
            .iter()
            .find(|b| b.visible)
            .or_else(|| self.base_layers.first())
            .map(|b| b.tiles.id.clone())
            .unwrap_or_default();

        let overlays = self
            .overlays
            .iter()
            .filter(|o| o.visible)
            .map(|o| o.kind)
            .collect();

        LayerSelection { base, overlays }
    }
}

/// Which layers the viewer currently has switched on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayerSelection {
    /// Id of the selected base layer.
    pub base: String,
    /// Overlays currently shown.
    pub overlays: BTreeSet<OverlayKind>,
}

/// Error returned when selecting a base layer the map does not have.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownBaseLayerError {
    /// The id that was requested.
    pub id: String,
}

impl std::fmt::Display for UnknownBaseLayerError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "unknown base layer '{}'", self.id)
    }
}

impl std::error::Error for UnknownBaseLayerError {}

impl LayerSelection {
    /// Switches to another base layer, replacing the current one.
    ///
    /// # Errors
    ///
    /// Returns [`UnknownBaseLayerError`] if `view` has no base layer with
    /// that id; the selection is left unchanged.
    pub fn select_base(&mut self, view: &MapView, id: &str) -> Result<(), UnknownBaseLayerError> {
        if view.base_layer(id).is_none() {
            return Err(UnknownBaseLayerError { id: id.to_string() });
        }
        self.base = id.to_string();
        Ok(())
    }

    /// Flips one overlay on or off without touching the others. Returns
    /// whether the overlay is now visible.
    pub fn toggle_overlay(&mut self, kind: OverlayKind) -> bool {
        if self.overlays.remove(&kind) {
            false
        } else {
            self.overlays.insert(kind);
            true
        }
    }

    /// Returns `true` if the overlay is shown.
    #[must_use]
    pub fn is_visible(&self, kind: OverlayKind) -> bool {
        self.overlays.contains(&kind)
    }
}
