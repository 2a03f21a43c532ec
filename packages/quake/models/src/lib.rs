#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Earthquake event types, depth bands, and derived map primitives.
//!
//! This crate defines the records read from the seismic feed and the
//! primitives derived from them (heat samples, bubble markers, vector
//! features). It also owns the depth color bands shared by the markers and
//! the legend, so both always agree on which color a depth gets.

use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// A single seismic event as read from the feed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeatureRecord {
    /// Feed-assigned event id (e.g. `"us7000abcd"`), when present.
    pub id: Option<String>,
    /// Human-readable location description.
    pub place: String,
    /// Event origin time in epoch milliseconds.
    pub time: i64,
    /// Event magnitude.
    pub magnitude: f64,
    /// Longitude, latitude, and depth of the hypocenter.
    pub coordinates: Coordinates,
}

impl FeatureRecord {
    /// Latitude in degrees.
    #[must_use]
    pub const fn latitude(&self) -> f64 {
        self.coordinates.latitude
    }

    /// Longitude in degrees.
    #[must_use]
    pub const fn longitude(&self) -> f64 {
        self.coordinates.longitude
    }

    /// Hypocenter depth in kilometers.
    #[must_use]
    pub const fn depth(&self) -> f64 {
        self.coordinates.depth_km
    }
}

/// Hypocenter position, in the feed's `[lon, lat, depth]` order.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Coordinates {
    /// Longitude in degrees.
    pub longitude: f64,
    /// Latitude in degrees.
    pub latitude: f64,
    /// Depth below the surface in kilometers.
    pub depth_km: f64,
}

/// Depth band used to color markers and legend rows.
///
/// Bands are evaluated from the deepest threshold down with a strict `>`
/// comparison, so a boundary value belongs to the shallower band (a depth
/// of exactly 50 km is [`DepthBand::Intermediate`], not
/// [`DepthBand::Deep`]).
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
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum DepthBand {
    /// Deeper than 50 km (red)
    Deep,
    /// Deeper than 30 km, up to 50 km (orange)
    Intermediate,
    /// Deeper than 10 km, up to 30 km (yellow)
    Moderate,
    /// Deeper than 0 km, up to 10 km (light green)
    Shallow,
    /// At or above the surface, or unknown (green)
    Surface,
}

impl DepthBand {
    /// Returns the band a depth (in km) falls into.
    ///
    /// Total over all `f64` values: anything that fails every `>` test,
    /// including `NaN`, lands in [`DepthBand::Surface`].
    #[must_use]
    pub fn for_depth(depth_km: f64) -> Self {
        if depth_km > 50.0 {
            Self::Deep
        } else if depth_km > 30.0 {
            Self::Intermediate
        } else if depth_km > 10.0 {
            Self::Moderate
        } else if depth_km > 0.0 {
            Self::Shallow
        } else {
            Self::Surface
        }
    }

    /// Returns the CSS hex color for this band.
    #[must_use]
    pub const fn color(self) -> &'static str {
        match self {
            Self::Deep => "#FF0000",
            Self::Intermediate => "#FF7F00",
            Self::Moderate => "#FFFF00",
            Self::Shallow => "#7FFF00",
            Self::Surface => "#00FF00",
        }
    }

    /// Returns all variants of this enum, deepest first.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::Deep,
            Self::Intermediate,
            Self::Moderate,
            Self::Shallow,
            Self::Surface,
        ]
    }
}

/// Maps a depth in kilometers to its fill color.
#[must_use]
pub fn depth_color(depth_km: f64) -> &'static str {
    DepthBand::for_depth(depth_km).color()
}

/// A `(lat, lon, intensity)` sample feeding the heat layer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeatSample {
    /// Latitude in degrees.
    pub latitude: f64,
    /// Longitude in degrees.
    pub longitude: f64,
    /// Sample weight (the event magnitude).
    pub intensity: f64,
}

/// Popup content bound to a marker or vector feature.
///
/// Only text is stored here; turning it into markup (and escaping it) is
/// left to whatever renders the map.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Popup {
    /// Heading line, the event place.
    pub title: String,
    /// Body lines shown under a rule, in order.
    pub rows: Vec<String>,
}

/// Stroke and fill styling of a bubble marker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarkerStyle {
    /// Fill color, chosen by depth band.
    pub fill_color: String,
    /// Stroke color.
    pub color: String,
    /// Stroke width in pixels.
    pub weight: u32,
    /// Stroke opacity.
    pub opacity: f64,
    /// Fill opacity.
    pub fill_opacity: f64,
}

impl MarkerStyle {
    /// Stroke color shared by every marker.
    pub const STROKE_COLOR: &'static str = "#000";
    /// Stroke width shared by every marker.
    pub const STROKE_WEIGHT: u32 = 1;
    /// Stroke opacity shared by every marker.
    pub const STROKE_OPACITY: f64 = 1.0;
    /// Fill opacity shared by every marker.
    pub const FILL_OPACITY: f64 = 0.6;

    /// Builds the fixed marker style with the given fill color.
    #[must_use]
    pub fn with_fill(fill_color: &str) -> Self {
        Self {
            fill_color: fill_color.to_string(),
            color: Self::STROKE_COLOR.to_string(),
            weight: Self::STROKE_WEIGHT,
            opacity: Self::STROKE_OPACITY,
            fill_opacity: Self::FILL_OPACITY,
        }
    }
}

/// A circle marker sized by magnitude and colored by depth.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarkerSpec {
    /// Latitude in degrees.
    pub latitude: f64,
    /// Longitude in degrees.
    pub longitude: f64,
    /// Circle radius in pixels.
    pub radius: f64,
    /// Stroke and fill styling.
    pub style: MarkerStyle,
    /// Popup with place, magnitude, depth, and time.
    pub popup: Popup,
}

/// A point feature for the plain event layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VectorFeature {
    /// Feed-assigned event id, when present.
    pub id: Option<String>,
    /// Latitude in degrees.
    pub latitude: f64,
    /// Longitude in degrees.
    pub longitude: f64,
    /// Popup with place and time only.
    pub popup: Popup,
}

/// Depth thresholds (km) shown in the legend, shallowest first.
pub const LEGEND_THRESHOLDS: [u32; 4] = [0, 10, 30, 50];

/// One row of the depth legend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LegendEntry {
    /// Lower bound of the row's depth range in km.
    pub threshold: u32,
    /// Swatch color, taken from the band just above the threshold.
    pub color: String,
    /// Range label such as `"10–30 km"` or `"50+ km"`.
    pub label: String,
}

/// Builds the legend rows for [`LEGEND_THRESHOLDS`].
///
/// Each row is colored with the band of `threshold + 1` and labelled with
/// the range up to the next threshold; the last row is open-ended.
#[must_use]
pub fn legend_entries() -> Vec<LegendEntry> {
    LEGEND_THRESHOLDS
        .iter()
        .enumerate()
        .map(|(i, &threshold)| {
            let label = LEGEND_THRESHOLDS.get(i + 1).map_or_else(
                || format!("{threshold}+ km"),
                |next| format!("{threshold}\u{2013}{next} km"),
            );

            LegendEntry {
                threshold,
                color: depth_color(f64::from(threshold + 1)).to_string(),
                label,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn boundary_depths_fall_in_shallower_band() {
        assert_eq!(DepthBand::for_depth(50.0), DepthBand::Intermediate);
        assert_eq!(DepthBand::for_depth(30.0), DepthBand::Moderate);
        assert_eq!(DepthBand::for_depth(10.0), DepthBand::Shallow);
        assert_eq!(DepthBand::for_depth(0.0), DepthBand::Surface);
    }

    #[test]
    fn boundary_depth_colors() {
        assert_eq!(depth_color(50.0), "#FF7F00");
        assert_eq!(depth_color(30.0), "#FFFF00");
        assert_eq!(depth_color(10.0), "#7FFF00");
        assert_eq!(depth_color(0.0), "#00FF00");
        assert_eq!(depth_color(50.001), "#FF0000");
    }

    #[test]
    fn every_depth_maps_to_a_band_color() {
        let colors: Vec<&str> = DepthBand::all().iter().map(|b| b.color()).collect();
        let depths = [
            f64::NEG_INFINITY,
            -1000.0,
            -3.5,
            -0.0,
            0.5,
            9.99,
            25.0,
            49.9,
            700.0,
            f64::INFINITY,
            f64::NAN,
        ];
        for depth in depths {
            let color = depth_color(depth);
            assert!(colors.contains(&color), "depth {depth} gave {color}");
        }
    }

    #[test]
    fn nan_depth_is_surface() {
        assert_eq!(DepthBand::for_depth(f64::NAN), DepthBand::Surface);
    }

    #[test]
    fn legend_rows_in_order() {
        let entries = legend_entries();
        let labels: Vec<&str> = entries.iter().map(|e| e.label.as_str()).collect();
        assert_eq!(
            labels,
            ["0\u{2013}10 km", "10\u{2013}30 km", "30\u{2013}50 km", "50+ km"]
        );

        let colors: Vec<&str> = entries.iter().map(|e| e.color.as_str()).collect();
        assert_eq!(
            colors,
            [
                depth_color(1.0),
                depth_color(11.0),
                depth_color(31.0),
                depth_color(51.0)
            ]
        );
    }

    #[test]
    fn legend_is_deterministic() {
        assert_eq!(legend_entries(), legend_entries());
    }

    #[test]
    fn band_names_parse_back() {
        for band in DepthBand::all() {
            let parsed: DepthBand = band.to_string().parse().unwrap();
            assert_eq!(parsed, *band);
        }
    }
}
