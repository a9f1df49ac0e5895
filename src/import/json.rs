//! Native gearset documents.

use serde::Deserialize;

use super::{import_error, ImportSource};
use crate::error::Result;
use crate::model::{Gearset, GearsetSource, GearsetsFile, ImportSourceType};

/// Parses gearsets in the crate's own format.
///
/// Accepts a gearsets file (`{"gearsets": [...]}`), a bare list, or a single
/// gearset. YAML works too since it is a superset of JSON.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonSource;

#[derive(Deserialize)]
#[serde(untagged)]
enum Document {
    List(Vec<Gearset>),
    // tried before `File`, whose list defaults to empty
    Single(Box<Gearset>),
    File(GearsetsFile),
}

impl ImportSource for JsonSource {
    fn source_type(&self) -> ImportSourceType {
        ImportSourceType::Json
    }

    fn import(&self, input: &str) -> Result<Vec<Gearset>> {
        let document: Document = serde_yaml::from_str(input)
            .map_err(|e| import_error(ImportSourceType::Json, e.to_string()))?;
        let mut gearsets = match document {
            Document::List(list) => list,
            Document::Single(gearset) => vec![*gearset],
            Document::File(file) => file.gearsets,
        };
        for gearset in &mut gearsets {
            if gearset.source.is_none() {
                gearset.source = Some(GearsetSource {
                    source_type: ImportSourceType::Json,
                    url: None,
                });
            }
        }
        Ok(gearsets)
    }
}
