use serde::Deserialize;
use serde_json::{Map, Value};

/// One raw provider record: a loosely-keyed JSON mapping whose attribute
/// names are aliased and whose presence is not guaranteed. This shape
/// never leaks past the normalizer.
#[derive(Debug, Clone, Deserialize)]
#[serde(transparent)]
pub struct RawRecord(Map<String, Value>);

impl RawRecord {
    pub fn new(fields: Map<String, Value>) -> Self {
        Self(fields)
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }
}
