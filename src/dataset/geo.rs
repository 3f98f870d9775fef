//! Geo Reference - boundary polygons keyed by state code
//!
//! Loads a GeoJSON `FeatureCollection` once at startup and indexes its
//! features by a property path such as `properties.sigla`. The document is
//! kept verbatim so it can be handed to the browser for choropleth drawing.

use crate::dataset::error::{DatasetError, DatasetResult};
use serde_json::Value;
use std::collections::HashMap;
use std::path::Path;

/// Default feature id key of the Brazilian states boundary file
pub const DEFAULT_FEATURE_ID_KEY: &str = "properties.sigla";

/// Read-only mapping from region code to boundary feature
#[derive(Debug, Clone)]
pub struct GeoReference {
    /// The full GeoJSON document
    document: Value,
    /// Dotted path used to identify features (e.g. `properties.sigla`)
    feature_id_key: String,
    /// region code → index into `features`
    index: HashMap<String, usize>,
}

impl GeoReference {
    /// Load and index a GeoJSON file
    pub fn load(path: &Path, feature_id_key: &str) -> DatasetResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            DatasetError::Geo(format!("Failed to read {}: {}", path.display(), e))
        })?;

        let geo = Self::from_str(&content, feature_id_key)?;
        tracing::info!(
            path = %path.display(),
            features = geo.len(),
            "Loaded geo reference"
        );
        Ok(geo)
    }

    /// Parse and index GeoJSON text
    pub fn from_str(content: &str, feature_id_key: &str) -> DatasetResult<Self> {
        let document: Value = serde_json::from_str(content)?;
        Self::from_value(document, feature_id_key)
    }

    /// Index an already parsed GeoJSON document
    pub fn from_value(document: Value, feature_id_key: &str) -> DatasetResult<Self> {
        if document.get("type").and_then(Value::as_str) != Some("FeatureCollection") {
            return Err(DatasetError::Geo(
                "expected a GeoJSON FeatureCollection".to_string(),
            ));
        }

        let features = document
            .get("features")
            .and_then(Value::as_array)
            .ok_or_else(|| DatasetError::Geo("FeatureCollection has no features".to_string()))?;

        let mut index = HashMap::with_capacity(features.len());
        for (i, feature) in features.iter().enumerate() {
            match lookup_path(feature, feature_id_key).and_then(value_as_key) {
                Some(code) => {
                    index.insert(code, i);
                }
                None => tracing::debug!(feature = i, key = feature_id_key, "Feature has no id"),
            }
        }

        Ok(Self {
            document,
            feature_id_key: feature_id_key.to_string(),
            index,
        })
    }

    /// An empty collection, for tables that never reach the choropleth
    pub fn empty() -> Self {
        Self {
            document: serde_json::json!({"type": "FeatureCollection", "features": []}),
            feature_id_key: DEFAULT_FEATURE_ID_KEY.to_string(),
            index: HashMap::new(),
        }
    }

    /// Whether a boundary exists for a region code
    pub fn contains(&self, code: &str) -> bool {
        self.index.contains_key(code)
    }

    /// Boundary feature for a region code
    pub fn feature(&self, code: &str) -> Option<&Value> {
        let idx = *self.index.get(code)?;
        self.document.get("features")?.get(idx)
    }

    /// All indexed region codes, sorted
    pub fn codes(&self) -> Vec<&str> {
        let mut codes: Vec<&str> = self.index.keys().map(String::as_str).collect();
        codes.sort_unstable();
        codes
    }

    pub fn feature_id_key(&self) -> &str {
        &self.feature_id_key
    }

    pub fn document(&self) -> &Value {
        &self.document
    }

    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }
}

/// Follow a dotted path (`properties.sigla`) into a JSON value
fn lookup_path<'a>(value: &'a Value, path: &str) -> Option<&'a Value> {
    path.split('.')
        .filter(|segment| !segment.is_empty())
        .try_fold(value, |current, segment| current.get(segment))
}

fn value_as_key(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}
