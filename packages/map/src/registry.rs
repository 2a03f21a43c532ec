//! Tile sources offered in the base layer picker.
//!
//! Definitions live in `basemaps/*.toml` and are baked into the binary, so
//! the map never needs a config file at runtime. The layer listed first is
//! the one visible when the map opens; the rest are alternatives the user
//! can switch to.

use quake_map_map_models::TileLayerDef;

#[cfg(test)]
const EXPECTED_BASEMAP_COUNT: usize = 2;

/// `(id, definition)` pairs in picker order.
const BASEMAP_TOMLS: &[(&str, &str)] = &[
    ("street", include_str!("../basemaps/street.toml")),
    ("topo", include_str!("../basemaps/topo.toml")),
];

/// Returns the tile layers for the base layer picker, default first.
///
/// # Panics
///
/// Panics if a bundled `basemaps/*.toml` definition is not a valid
/// [`TileLayerDef`]. The tests in this module load every definition.
#[must_use]
pub fn all_basemaps() -> Vec<TileLayerDef> {
    BASEMAP_TOMLS
        .iter()
        .map(|(id, toml_str)| {
            toml::de::from_str(toml_str).unwrap_or_else(|e| {
                panic!("Invalid tile layer definition basemaps/{id}.toml: {e}")
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    #[test]
    fn loads_all_basemaps() {
        let basemaps = all_basemaps();
        assert_eq!(
            basemaps.len(),
            EXPECTED_BASEMAP_COUNT,
            "Base layer picker should offer {EXPECTED_BASEMAP_COUNT} tile layers, found {}",
            basemaps.len()
        );
    }

    #[test]
    fn basemap_ids_are_unique_and_match_file_names() {
        let mut seen = BTreeSet::new();
        for ((name, _), basemap) in BASEMAP_TOMLS.iter().zip(all_basemaps()) {
            assert_eq!(*name, basemap.id, "basemaps/{name}.toml declares another id");
            assert!(
                seen.insert(basemap.id.clone()),
                "Tile layer id {name} is used twice"
            );
        }
    }

    #[test]
    fn basemaps_have_tile_templates_and_attribution() {
        for basemap in &all_basemaps() {
            for placeholder in ["{z}", "{x}", "{y}"] {
                assert!(
                    basemap.url_template.contains(placeholder),
                    "Basemap {} template lacks {placeholder}",
                    basemap.id
                );
            }
            assert!(
                !basemap.attribution.is_empty(),
                "Basemap {} has empty attribution",
                basemap.id
            );
        }
    }

    #[test]
    fn street_is_the_default() {
        let basemaps = all_basemaps();
        assert_eq!(basemaps[0].id, "street");
        assert_eq!(basemaps[0].name, "Street Map");
        assert_eq!(basemaps[1].name, "Topographic Map");
    }
}
