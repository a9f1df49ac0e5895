//! Turning external gearset documents into model gearsets.
//!
//! Sources only parse; they never fetch. Every gearset a source produces
//! is validated before it is handed back, so malformed input never reaches
//! the store.
//!
//! # Modules
//!
//! - [`json`] - Native JSON/YAML gearset documents
//! - [`xivgear`] - Xivgear planner documents

pub mod json;
pub mod xivgear;

pub use json::JsonSource;
pub use xivgear::{api_url, XivgearSource};

use crate::error::{GearplanError, Result};
use crate::model::{validate_gearset, Gearset, ImportSourceType};

/// A parser for one external gearset format.
pub trait ImportSource {
    /// Which source this is, recorded on imported gearsets.
    fn source_type(&self) -> ImportSourceType;

    /// Parse gearsets out of `input`.
    fn import(&self, input: &str) -> Result<Vec<Gearset>>;
}

/// Import through `source`, dropping gearsets that fail validation.
///
/// Fails with [`GearplanError::NoGearsets`] when nothing usable is left.
pub fn import_gearsets(source: &dyn ImportSource, input: &str) -> Result<Vec<Gearset>> {
    let source_type = source.source_type();
    let gearsets: Vec<Gearset> = source
        .import(input)?
        .into_iter()
        .filter(|gearset| match validate_gearset(gearset) {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!("Skipping imported gearset '{}': {}", gearset.name, e);
                false
            }
        })
        .collect();

    if gearsets.is_empty() {
        return Err(GearplanError::NoGearsets {
            source_type: source_type.to_string(),
        });
    }
    tracing::debug!("Imported {} gearsets from {}", gearsets.len(), source_type);
    Ok(gearsets)
}

pub(crate) fn import_error(source_type: ImportSourceType, message: impl Into<String>) -> GearplanError {
    GearplanError::Import {
        source_type: source_type.to_string(),
        message: message.into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Gearpiece, GearpieceSlot};

    struct Fixed(Vec<Gearset>);

    impl ImportSource for Fixed {
        fn source_type(&self) -> ImportSourceType {
            ImportSourceType::Manual
        }

        fn import(&self, _input: &str) -> Result<Vec<Gearset>> {
            Ok(self.0.clone())
        }
    }

    #[test]
    fn invalid_gearsets_are_dropped() {
        let source = Fixed(vec![
            Gearset::new("Empty", vec![]),
            Gearset::new("Ok", vec![Gearpiece::new(GearpieceSlot::Head, 1)]),
        ]);
        let gearsets = import_gearsets(&source, "").unwrap();
        assert_eq!(gearsets.len(), 1);
        assert_eq!(gearsets[0].name, "Ok");
    }

    #[test]
    fn nothing_usable_is_no_gearsets() {
        let source = Fixed(vec![Gearset::new("Empty", vec![])]);
        assert!(matches!(
            import_gearsets(&source, ""),
            Err(GearplanError::NoGearsets { .. })
        ));
    }
}
