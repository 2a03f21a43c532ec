#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Per-event derivation of map primitives.
//!
//! Every [`FeatureRecord`] yields exactly one [`HeatSample`], one
//! [`MarkerSpec`], and one [`VectorFeature`]. [`transform_feature`] is a
//! pure function of a single record; [`transform`] maps it over a slice
//! and collects the three outputs in input order, with no filtering or
//! reordering.

use chrono::DateTime;
use quake_map_quake_models::{
    FeatureRecord, HeatSample, MarkerSpec, MarkerStyle, Popup, VectorFeature, depth_color,
};

/// Pixels of marker radius per unit of magnitude.
pub const RADIUS_PER_MAGNITUDE: f64 = 3.0;

/// Text shown in place of a timestamp that cannot be represented.
pub const INVALID_DATE: &str = "Invalid Date";

/// The three derived collections, index-aligned with the input records.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Transformed {
    /// Heat layer samples.
    pub heat_samples: Vec<HeatSample>,
    /// Bubble markers.
    pub markers: Vec<MarkerSpec>,
    /// Plain event features.
    pub events: Vec<VectorFeature>,
}

impl Transformed {
    /// Number of records that were transformed.
    #[must_use]
    pub fn len(&self) -> usize {
        self.heat_samples.len()
    }

    /// Returns `true` if no records were transformed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.heat_samples.is_empty()
    }
}

/// Derives all three map primitives for a single record.
#[must_use]
pub fn transform_feature(record: &FeatureRecord) -> (HeatSample, MarkerSpec, VectorFeature) {
    let latitude = record.latitude();
    let longitude = record.longitude();
    let depth = record.depth();
    let time = format_event_time(record.time);

    let heat = HeatSample {
        latitude,
        longitude,
        intensity: record.magnitude,
    };

    let marker = MarkerSpec {
        latitude,
        longitude,
        radius: marker_radius(record.magnitude),
        style: MarkerStyle::with_fill(depth_color(depth)),
        popup: Popup {
            title: record.place.clone(),
            rows: vec![
                format!("Magnitude: {}", record.magnitude),
                format!("Depth: {depth} km"),
                time.clone(),
            ],
        },
    };

    let event = VectorFeature {
        id: record.id.clone(),
        latitude,
        longitude,
        popup: Popup {
            title: record.place.clone(),
            rows: vec![time],
        },
    };

    (heat, marker, event)
}

/// Applies [`transform_feature`] to every record, preserving order.
#[must_use]
pub fn transform(records: &[FeatureRecord]) -> Transformed {
    let mut out = Transformed {
        heat_samples: Vec::with_capacity(records.len()),
        markers: Vec::with_capacity(records.len()),
        events: Vec::with_capacity(records.len()),
    };

    for record in records {
        let (heat, marker, event) = transform_feature(record);
        out.heat_samples.push(heat);
        out.markers.push(marker);
        out.events.push(event);
    }

    log::debug!("Transformed {} records", out.len());

    out
}

/// Marker radius for a magnitude. Negative magnitudes clamp to zero.
#[must_use]
pub fn marker_radius(magnitude: f64) -> f64 {
    (magnitude * RADIUS_PER_MAGNITUDE).max(0.0)
}

/// Formats an epoch-millisecond timestamp as a UTC date-time string,
/// e.g. `Tue Nov 14 2023 22:13:20 UTC`.
#[must_use]
pub fn format_event_time(epoch_ms: i64) -> String {
    DateTime::from_timestamp_millis(epoch_ms).map_or_else(
        || INVALID_DATE.to_string(),
        |dt| dt.format("%a %b %d %Y %H:%M:%S UTC").to_string(),
    )
}
