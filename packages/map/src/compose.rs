//! Assembly of the derived layers into a [`MapView`].

use geojson::{Feature, FeatureCollection, Geometry, JsonObject, feature::Id};
use quake_map_map_models::{
    BaseLayer, ControlPosition, HeatLayerOptions, LatLng, LayerControl, LegendControl, MapView,
    Overlay, OverlayKind, OverlayLayer, Viewport,
};
use quake_map_quake_models::{Popup, VectorFeature, legend_entries};
use quake_map_transform::Transformed;

use crate::registry;

/// Initial map center, over the continental United States.
pub const MAP_CENTER: LatLng = LatLng {
    lat: 37.09,
    lng: -95.71,
};

/// Initial zoom level.
pub const MAP_ZOOM: u8 = 5;

/// Page title used when the feed does not name itself.
pub const DEFAULT_TITLE: &str = "Earthquake Map";

/// Heading of the depth legend.
pub const LEGEND_TITLE: &str = "Depth";

/// Builds the complete map from the transformed layers.
///
/// The first registered base layer and the bubble-marker overlay start
/// visible; the event and heat overlays start hidden. The legend is built
/// here, once, and never refreshed.
#[must_use]
pub fn compose(layers: Transformed, title: Option<&str>) -> MapView {
    let Transformed {
        heat_samples,
        markers,
        events,
    } = layers;

    let base_layers: Vec<BaseLayer> = registry::all_basemaps()
        .into_iter()
        .enumerate()
        .map(|(i, tiles)| BaseLayer {
            tiles,
            visible: i == 0,
        })
        .collect();

    let overlays = vec![
        overlay(
            OverlayKind::Events,
            false,
            OverlayLayer::Vector {
                features: events_to_collection(&events),
            },
        ),
        overlay(
            OverlayKind::Earthquakes,
            true,
            OverlayLayer::Markers { markers },
        ),
        overlay(
            OverlayKind::Heatmap,
            false,
            OverlayLayer::Heat {
                samples: heat_samples,
                options: HeatLayerOptions::default(),
            },
        ),
    ];

    for o in &overlays {
        log::debug!("Overlay {} has {} primitives", o.kind, o.layer.len());
    }

    MapView {
        title: title.unwrap_or(DEFAULT_TITLE).to_string(),
        viewport: Viewport {
            center: MAP_CENTER,
            zoom: MAP_ZOOM,
        },
        base_layers,
        overlays,
        layer_control: LayerControl {
            collapsed: false,
            position: ControlPosition::TopRight,
        },
        legend: LegendControl {
            position: ControlPosition::TopLeft,
            title: LEGEND_TITLE.to_string(),
            entries: legend_entries(),
        },
    }
}

fn overlay(kind: OverlayKind, visible: bool, layer: OverlayLayer) -> Overlay {
    Overlay {
        kind,
        name: kind.label().to_string(),
        visible,
        layer,
    }
}

/// Converts event features into a `GeoJSON` collection whose `popup`
/// property carries the popup text.
fn events_to_collection(events: &[VectorFeature]) -> FeatureCollection {
    let features = events
        .iter()
        .map(|event| Feature {
            bbox: None,
            geometry: Some(Geometry::new(geojson::Value::Point(vec![
                event.longitude,
                event.latitude,
            ]))),
            id: event.id.clone().map(Id::String),
            properties: Some(popup_properties(&event.popup)),
            foreign_members: None,
        })
        .collect();

    FeatureCollection {
        bbox: None,
        features,
        foreign_members: None,
    }
}

fn popup_properties(popup: &Popup) -> JsonObject {
    let mut content = serde_json::Map::new();
    content.insert(
        "title".to_string(),
        serde_json::Value::from(popup.title.clone()),
    );
    content.insert(
        "rows".to_string(),
        serde_json::Value::from(popup.rows.clone()),
    );

    let mut properties = JsonObject::new();
    properties.insert("popup".to_string(), serde_json::Value::Object(content));
    properties
}
