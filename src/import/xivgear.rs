//! Xivgear planner documents.
//!
//! A planner page url names either a shortlink (`?page=sl|<uuid>`) or a
//! curated best-in-slot page (`?page=bis|<job>|<tier>`). The matching API
//! document holds a single set (`items` at the root) or several (`sets`).
//! Fetching that document is the caller's business; this module derives the
//! API url and parses the document.

use regex::Regex;
use serde_json::Value;
use std::str::FromStr;
use std::sync::LazyLock;

use super::{import_error, ImportSource};
use crate::catalog::{class_job_id, ItemCatalog, ItemId};
use crate::error::{GearplanError, Result};
use crate::model::{Gearpiece, GearpieceFactory, GearpieceSlot, Gearset, ImportSourceType};

const HOST: &str = "xivgear.app";
const SHORTLINK_API: &str = "https://api.xivgear.app/shortlink/";
const FULLDATA_API: &str = "https://api.xivgear.app/fulldata/";
const SET_INDEX_PARAM: &str = "&onlySetIndex=";
const STATIC_BIS_PREFIX: &str = "bis|";
const DEFAULT_NAME: &str = "Imported Gearset";

static PAGE_URL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^https?://([^/?#:]+)(?::\d+)?[^?#]*\?([^#]*)").unwrap());
static SET_INDEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[?&]onlySetIndex=(\d+)").unwrap());

/// API url for a planner page url, or `None` when the url is not a
/// recognizable planner page.
pub fn api_url(page_url: &str) -> Option<String> {
    let captures = PAGE_URL.captures(page_url.trim())?;
    if !captures[1].eq_ignore_ascii_case(HOST) {
        return None;
    }
    let page = captures[2]
        .split('&')
        .filter_map(|pair| pair.split_once('='))
        .find(|(key, _)| *key == "page")
        .map(|(_, value)| value.replace("%7C", "|").replace("%7c", "|"))?;
    if !page.contains('|') {
        return None;
    }

    if page.starts_with(STATIC_BIS_PREFIX) {
        Some(format!("{}{}", FULLDATA_API, page.replace('|', "/")))
    } else {
        let uuid = page.split('|').nth(1)?;
        Some(format!("{}{}", SHORTLINK_API, uuid))
    }
}

fn set_index(page_url: &str) -> Option<usize> {
    SET_INDEX
        .captures(page_url)
        .and_then(|c| c[1].parse().ok())
}

/// Parses Xivgear API documents into gearsets.
///
/// Planner item ids are NQ; they are converted to HQ where the catalog says
/// the item has an HQ variant.
pub struct XivgearSource<'a> {
    catalog: &'a dyn ItemCatalog,
    page_url: Option<String>,
    api_url: Option<String>,
}

impl<'a> XivgearSource<'a> {
    /// A source for documents whose page url is unknown.
    pub fn new(catalog: &'a dyn ItemCatalog) -> Self {
        Self {
            catalog,
            page_url: None,
            api_url: None,
        }
    }

    /// A source for the document behind `page_url`.
    ///
    /// The url is recorded on imported gearsets and may restrict a
    /// multi-set page to one set with `onlySetIndex`.
    pub fn for_page(catalog: &'a dyn ItemCatalog, page_url: &str) -> Result<Self> {
        let api = api_url(page_url)
            .ok_or_else(|| import_error(ImportSourceType::Xivgear, "Invalid URL"))?;
        tracing::debug!("Xivgear page {} resolves to {}", page_url, api);
        Ok(Self {
            catalog,
            page_url: Some(page_url.trim().to_string()),
            api_url: Some(api),
        })
    }

    /// The API url the document should be fetched from, when a page url
    /// was given.
    pub fn api_url(&self) -> Option<&str> {
        self.api_url.as_deref()
    }

    fn parse_sets(&self, sets: &[Value], root: &Value) -> Vec<Gearset> {
        let only = self.page_url.as_deref().and_then(set_index);
        let root_job = root
            .get("job")
            .and_then(Value::as_str)
            .and_then(class_job_id);

        let mut gearsets = Vec::new();
        for (index, set) in sets.iter().enumerate() {
            if only.is_some_and(|only| only != index) {
                continue;
            }
            let url = self.page_url.as_ref().map(|url| {
                if set_index(url).is_some() {
                    url.clone()
                } else {
                    format!("{}{}{}", url, SET_INDEX_PARAM, index)
                }
            });
            match self.parse_set(set, root_job, url) {
                Ok(Some(gearset)) => gearsets.push(gearset),
                Ok(None) => tracing::debug!("Set {} has no gearpieces", index),
                Err(e) => tracing::warn!("Failed to import set {}: {}", index, e),
            }
        }
        gearsets
    }

    fn parse_set(
        &self,
        set: &Value,
        job_override: Option<u32>,
        url: Option<String>,
    ) -> Result<Option<Gearset>> {
        let name = set
            .get("name")
            .and_then(Value::as_str)
            .unwrap_or(DEFAULT_NAME);
        let job = set
            .get("jobOverride")
            .or_else(|| set.get("job"))
            .and_then(Value::as_str)
            .map(|abbrev| class_job_id(abbrev).unwrap_or(0))
            .or(job_override)
            .unwrap_or(0);

        let slots = set
            .get("items")
            .and_then(Value::as_object)
            .ok_or_else(|| invalid_response(format!("No items found in {}", name)))?;

        let factory = GearpieceFactory::new(self.catalog);
        let mut gearpieces = Vec::new();
        for (slot_key, entry) in slots {
            gearpieces.push(self.parse_gearpiece(&factory, slot_key, entry)?);
        }
        if gearpieces.is_empty() {
            return Ok(None);
        }

        Ok(Some(
            Gearset::new(name, gearpieces)
                .with_job(job)
                .with_source(ImportSourceType::Xivgear, url),
        ))
    }

    fn parse_gearpiece(
        &self,
        factory: &GearpieceFactory<'_>,
        slot_key: &str,
        entry: &Value,
    ) -> Result<Gearpiece> {
        let id = entry
            .get("id")
            .and_then(Value::as_u64)
            .and_then(|id| u32::try_from(id).ok())
            .ok_or_else(|| invalid_response(format!("No item ID for slot {}", slot_key)))?;
        let item = self.catalog.convert_to_hq(ItemId::new(id));

        let materia: Vec<ItemId> = entry
            .get("materia")
            .and_then(Value::as_array)
            .map(|sockets| {
                sockets
                    .iter()
                    .filter_map(|socket| socket.get("id").and_then(Value::as_i64))
                    .filter(|id| *id > 0)
                    .filter_map(|id| u32::try_from(id).ok())
                    .map(ItemId::new)
                    .collect()
            })
            .unwrap_or_default();

        let slot = GearpieceSlot::from_str(slot_key).ok();
        factory
            .build(slot, item, &materia)
            .ok_or_else(|| invalid_response(format!("No gear slot for item {} in {}", item, slot_key)))
    }
}

impl ImportSource for XivgearSource<'_> {
    fn source_type(&self) -> ImportSourceType {
        ImportSourceType::Xivgear
    }

    fn import(&self, input: &str) -> Result<Vec<Gearset>> {
        if input.trim().is_empty() {
            return Err(GearplanError::InternalError {
                message: "empty Xivgear response".to_string(),
            });
        }
        let root: Value = serde_json::from_str(input).map_err(|e| invalid_response(e.to_string()))?;

        if let Some(sets) = root.get("sets").and_then(Value::as_array) {
            Ok(self.parse_sets(sets, &root))
        } else if root.get("items").is_some() {
            let url = self.page_url.clone();
            Ok(self.parse_set(&root, None, url)?.into_iter().collect())
        } else {
            Err(GearplanError::NoGearsets {
                source_type: ImportSourceType::Xivgear.to_string(),
            })
        }
    }
}

fn invalid_response(message: impl Into<String>) -> GearplanError {
    import_error(ImportSourceType::Xivgear, message)
}
