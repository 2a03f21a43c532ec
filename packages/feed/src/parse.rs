//! `GeoJSON` parsing and per-feature validation.
//!
//! A feature becomes a [`FeatureRecord`] only if it carries a numeric
//! `mag`, an integer `time`, and a `Point` geometry with longitude,
//! latitude, and depth. Anything else is logged and skipped so a single
//! bad entry never poisons the rest of the feed.

use geojson::{Feature, GeoJson, feature::Id};
use quake_map_quake_models::{Coordinates, FeatureRecord};

use crate::{FeedError, FeedSnapshot};

/// Place text used when a feature has no `place` property.
pub const UNKNOWN_PLACE: &str = "Unknown location";

/// Parses a `GeoJSON` `FeatureCollection` body into a [`FeedSnapshot`].
///
/// # Errors
///
/// Returns [`FeedError::GeoJson`] if the body is not valid `GeoJSON`, or
/// [`FeedError::Conversion`] if it is valid but not a `FeatureCollection`.
pub fn parse_feature_collection(body: &str) -> Result<FeedSnapshot, FeedError> {
    let geojson: GeoJson = body.parse()?;

    let GeoJson::FeatureCollection(collection) = geojson else {
        return Err(FeedError::Conversion {
            message: "Feed body is not a FeatureCollection".to_string(),
        });
    };

    let title = collection
        .foreign_members
        .as_ref()
        .and_then(|members| members.get("metadata"))
        .and_then(|metadata| metadata.get("title"))
        .and_then(serde_json::Value::as_str)
        .map(str::to_string);

    let mut records = Vec::with_capacity(collection.features.len());
    let mut skipped = 0;

    for (index, feature) in collection.features.iter().enumerate() {
        match decode_feature(feature) {
            Ok(record) => records.push(record),
            Err(reason) => {
                log::warn!(
                    "Skipping feature {} ({}): {reason}",
                    index,
                    feature_id(feature).as_deref().unwrap_or("no id")
                );
                skipped += 1;
            }
        }
    }

    Ok(FeedSnapshot {
        title,
        records,
        skipped,
    })
}

/// Validates one feature into a [`FeatureRecord`].
///
/// Returns a short reason string when a required field is missing.
fn decode_feature(feature: &Feature) -> Result<FeatureRecord, &'static str> {
    let coordinates = decode_point(feature)?;

    let magnitude = feature
        .property("mag")
        .and_then(serde_json::Value::as_f64)
        .ok_or("missing magnitude")?;

    let time = feature
        .property("time")
        .and_then(serde_json::Value::as_i64)
        .ok_or("missing time")?;

    let place = feature
        .property("place")
        .and_then(serde_json::Value::as_str)
        .map_or_else(
            || {
                log::debug!("Feature has no place, using default");
                UNKNOWN_PLACE.to_string()
            },
            str::to_string,
        );

    Ok(FeatureRecord {
        id: feature_id(feature),
        place,
        time,
        magnitude,
        coordinates,
    })
}

fn decode_point(feature: &Feature) -> Result<Coordinates, &'static str> {
    let geometry = feature.geometry.as_ref().ok_or("missing geometry")?;

    let geojson::Value::Point(position) = &geometry.value else {
        return Err("geometry is not a point");
    };

    match position.as_slice() {
        [longitude, latitude, depth_km, ..] => Ok(Coordinates {
            longitude: *longitude,
            latitude: *latitude,
            depth_km: *depth_km,
        }),
        _ => Err("point has no depth"),
    }
}

fn feature_id(feature: &Feature) -> Option<String> {
    match feature.id.as_ref()? {
        Id::String(s) => Some(s.clone()),
        Id::Number(n) => Some(n.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn collection(features: &str) -> String {
        format!(
            r#"{{
                "type": "FeatureCollection",
                "metadata": {{ "title": "USGS All Earthquakes, Past Week", "count": 2 }},
                "features": [{features}]
            }}"#
        )
    }

    const GOOD: &str = r#"{
        "type": "Feature",
        "id": "nc75000001",
        "properties": { "mag": 4.5, "place": "10km N of X", "time": 1700000000000 },
        "geometry": { "type": "Point", "coordinates": [-120.5, 38.0, 25] }
    }"#;

    #[test]
    fn parses_valid_feature() {
        let snapshot = parse_feature_collection(&collection(GOOD)).unwrap();
        assert_eq!(snapshot.skipped, 0);
        assert_eq!(snapshot.records.len(), 1);

        let record = &snapshot.records[0];
        assert_eq!(record.id.as_deref(), Some("nc75000001"));
        assert_eq!(record.place, "10km N of X");
        assert_eq!(record.time, 1_700_000_000_000);
        assert!((record.magnitude - 4.5).abs() < f64::EPSILON);
        assert!((record.longitude() - -120.5).abs() < f64::EPSILON);
        assert!((record.latitude() - 38.0).abs() < f64::EPSILON);
        assert!((record.depth() - 25.0).abs() < f64::EPSILON);
    }

    #[test]
    fn reads_metadata_title() {
        let snapshot = parse_feature_collection(&collection(GOOD)).unwrap();
        assert_eq!(
            snapshot.title.as_deref(),
            Some("USGS All Earthquakes, Past Week")
        );
    }

    #[test]
    fn skips_feature_with_null_magnitude() {
        let bad = r#"{
            "type": "Feature",
            "properties": { "mag": null, "place": "Somewhere", "time": 1700000000000 },
            "geometry": { "type": "Point", "coordinates": [1.0, 2.0, 3.0] }
        }"#;
        let snapshot = parse_feature_collection(&collection(&format!("{GOOD}, {bad}"))).unwrap();
        assert_eq!(snapshot.records.len(), 1);
        assert_eq!(snapshot.skipped, 1);
    }

    #[test]
    fn skips_feature_without_depth() {
        let bad = r#"{
            "type": "Feature",
            "properties": { "mag": 1.0, "place": "Somewhere", "time": 1700000000000 },
            "geometry": { "type": "Point", "coordinates": [1.0, 2.0] }
        }"#;
        let snapshot = parse_feature_collection(&collection(bad)).unwrap();
        assert!(snapshot.records.is_empty());
        assert_eq!(snapshot.skipped, 1);
    }

    #[test]
    fn skips_feature_without_geometry() {
        let bad = r#"{
            "type": "Feature",
            "properties": { "mag": 1.0, "place": "Somewhere", "time": 1700000000000 },
            "geometry": null
        }"#;
        let snapshot = parse_feature_collection(&collection(bad)).unwrap();
        assert_eq!(snapshot.skipped, 1);
    }

    #[test]
    fn skips_feature_with_null_time() {
        let bad = GOOD.replace("\"time\": 1700000000000", "\"time\": null");
        let snapshot = parse_feature_collection(&collection(&bad)).unwrap();
        assert!(snapshot.records.is_empty());
        assert_eq!(snapshot.skipped, 1);
    }

    #[test]
    fn skips_feature_with_fractional_time() {
        let bad = GOOD.replace("\"time\": 1700000000000", "\"time\": 1.5");
        let snapshot = parse_feature_collection(&collection(&format!("{GOOD}, {bad}"))).unwrap();
        assert_eq!(snapshot.records.len(), 1);
        assert_eq!(snapshot.skipped, 1);
    }

    #[test]
    fn skips_non_point_geometry() {
        let bad = r#"{
            "type": "Feature",
            "properties": { "mag": 1.0, "place": "Fault trace", "time": 1700000000000 },
            "geometry": { "type": "LineString", "coordinates": [[1.0, 2.0, 3.0], [4.0, 5.0, 6.0]] }
        }"#;
        let snapshot = parse_feature_collection(&collection(bad)).unwrap();
        assert!(snapshot.records.is_empty());
        assert_eq!(snapshot.skipped, 1);
    }

    #[test]
    fn defaults_missing_place() {
        let no_place = r#"{
            "type": "Feature",
            "properties": { "mag": 2.0, "place": null, "time": 1700000000000 },
            "geometry": { "type": "Point", "coordinates": [1.0, 2.0, 3.0] }
        }"#;
        let snapshot = parse_feature_collection(&collection(no_place)).unwrap();
        assert_eq!(snapshot.records[0].place, UNKNOWN_PLACE);
        assert_eq!(snapshot.records[0].id, None);
    }

    #[test]
    fn preserves_feed_order() {
        let second = GOOD
            .replace("nc75000001", "nc75000002")
            .replace("10km N of X", "3km E of Z");
        let snapshot =
            parse_feature_collection(&collection(&format!("{GOOD}, {second}"))).unwrap();
        let places: Vec<&str> = snapshot.records.iter().map(|r| r.place.as_str()).collect();
        assert_eq!(places, ["10km N of X", "3km E of Z"]);
    }

    #[test]
    fn empty_collection_is_ok() {
        let snapshot = parse_feature_collection(&collection("")).unwrap();
        assert!(snapshot.records.is_empty());
        assert_eq!(snapshot.skipped, 0);
    }

    #[test]
    fn rejects_non_collection() {
        let err = parse_feature_collection(GOOD).unwrap_err();
        assert!(matches!(err, FeedError::Conversion { .. }));
    }

    #[test]
    fn rejects_malformed_json() {
        let err = parse_feature_collection("{ not json").unwrap_err();
        assert!(matches!(err, FeedError::GeoJson(_)));
    }
}
