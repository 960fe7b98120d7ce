//! Oversized asset removal.

use serde_json::{Map, Value};

pub const IMAGES: &str = "images";
pub const SVGS: &str = "svgs";

/// Number of entries removed from each asset collection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PrunedAssets {
    pub images: usize,
    pub svgs: usize,
}

impl PrunedAssets {
    pub fn total(&self) -> usize {
        self.images + self.svgs
    }
}

/// Remove images and SVGs whose content exceeds the given sizes in KB.
///
/// Records that lack their content field are kept, as are entries exactly at
/// the limit.
pub fn prune_assets(
    assets: &mut Map<String, Value>,
    image_max_kb: f64,
    svg_max_kb: f64,
) -> PrunedAssets {
    let images = match assets.get_mut(IMAGES).and_then(Value::as_object_mut) {
        Some(images) => remove_oversized(images, "base64", image_max_kb, base64_kb),
        None => 0,
    };
    let svgs = match assets.get_mut(SVGS).and_then(Value::as_object_mut) {
        Some(svgs) => remove_oversized(svgs, "svgCode", svg_max_kb, utf8_kb),
        None => 0,
    };
    PrunedAssets { images, svgs }
}

/// Approximate decoded size of a base64 payload, from its character count.
pub fn base64_kb(encoded: &str) -> f64 {
    (encoded.chars().count() as f64 * 0.75) / 1024.0
}

pub fn utf8_kb(text: &str) -> f64 {
    text.len() as f64 / 1024.0
}

fn remove_oversized(
    collection: &mut Map<String, Value>,
    field: &str,
    max_kb: f64,
    size_kb: fn(&str) -> f64,
) -> usize {
    let before = collection.len();
    collection.retain(|_, record| {
        match record.get(field).and_then(Value::as_str) {
            Some(content) => size_kb(content) <= max_kb,
            None => true,
        }
    });
    before - collection.len()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn object(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => panic!("fixture must be an object"),
        }
    }

    #[test]
    fn test_base64_kb() {
        assert_eq!(base64_kb(&"A".repeat(102_400)), 75.0);
        assert_eq!(base64_kb(""), 0.0);
    }

    #[test]
    fn test_image_threshold_is_strict() {
        let mut assets = object(json!({
            "images": {
                "at-limit": {"base64": "A".repeat(102_400)},
                "over-limit": {"base64": "A".repeat(102_401)},
                "small": {"base64": "AAAA", "width": 4}
            }
        }));
        let pruned = prune_assets(&mut assets, 75.0, 30.0);
        assert_eq!(pruned, PrunedAssets { images: 1, svgs: 0 });

        let kept: Vec<_> = assets["images"].as_object().unwrap().keys().cloned().collect();
        assert_eq!(kept, ["at-limit", "small"]);
    }

    #[test]
    fn test_svg_uses_utf8_bytes() {
        // 512 two-byte chars = 1 KB, 513 pushes it over
        let mut assets = object(json!({
            "svgs": {
                "exact": {"svgCode": "é".repeat(512)},
                "over": {"svgCode": "é".repeat(513)}
            }
        }));
        let pruned = prune_assets(&mut assets, 100.0, 1.0);
        assert_eq!(pruned.svgs, 1);
        assert!(assets["svgs"].get("exact").is_some());
        assert!(assets["svgs"].get("over").is_none());
    }

    #[test]
    fn test_records_without_content_survive() {
        let mut assets = object(json!({
            "images": {
                "url-only": {"url": "https://example.com/a.png"},
                "not-a-record": "zzz",
                "numeric-payload": {"base64": 12345}
            },
            "svgs": {"ref": {"id": "icon"}}
        }));
        let before = assets.clone();
        let pruned = prune_assets(&mut assets, 0.0, 0.0);
        assert_eq!(pruned.total(), 0);
        assert_eq!(assets, before);
    }

    #[test]
    fn test_wrong_shape_is_noop() {
        let mut assets = object(json!({"images": [1, 2], "svgs": null}));
        let before = assets.clone();
        assert_eq!(prune_assets(&mut assets, 0.0, 0.0).total(), 0);
        assert_eq!(assets, before);
    }

    #[test]
    fn test_surviving_records_untouched() {
        let mut assets = object(json!({
            "images": {
                "a": {"base64": "QUJD", "hash": "a", "meta": {"w": 1}},
                "b": {"base64": "A".repeat(4096)}
            }
        }));
        prune_assets(&mut assets, 1.0, 1.0);
        assert_eq!(
            assets["images"],
            json!({"a": {"base64": "QUJD", "hash": "a", "meta": {"w": 1}}})
        );
    }
}
