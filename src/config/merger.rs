//! Layered merging of YAML configuration values.
//!
//! # Merge Rules
//!
//! - Mappings merge key by key, recursively
//! - Sequences and scalars in the overlay replace the base
//! - A null in the overlay removes the key from the base

use serde_yaml::Value;

/// Merge `overlay` onto `base`, overlay winning at each conflict.
pub fn deep_merge(base: &Value, overlay: &Value) -> Value {
    match (base, overlay) {
        (Value::Mapping(base_map), Value::Mapping(overlay_map)) => {
            let mut merged = base_map.clone();
            for (key, value) in overlay_map {
                if value.is_null() {
                    merged.remove(key);
                    continue;
                }
                let next = match base_map.get(key) {
                    Some(existing) => deep_merge(existing, value),
                    None => value.clone(),
                };
                merged.insert(key.clone(), next);
            }
            Value::Mapping(merged)
        }
        (_, overlay) => overlay.clone(),
    }
}

/// Fold layers in order; the last layer has the highest priority.
///
/// Empty documents (null) are skipped rather than wiping earlier layers.
pub fn merge_configs(layers: &[Value]) -> Value {
    layers
        .iter()
        .filter(|layer| !layer.is_null())
        .fold(Value::Mapping(Default::default()), |acc, layer| {
            deep_merge(&acc, layer)
        })
}
