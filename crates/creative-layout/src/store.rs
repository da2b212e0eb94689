//! Read-only access to raw design-rule records.

use indexmap::IndexMap;
use serde_json::{Map, Value};

/// A read-only mapping of design id to raw rule record.
pub trait DesignStore {
    /// The raw record for `design_id`, if present.
    fn design(&self, design_id: &str) -> Option<&Value>;

    /// All design ids, in store order.
    fn design_ids(&self) -> Vec<&str>;
}

impl DesignStore for IndexMap<String, Value> {
    fn design(&self, design_id: &str) -> Option<&Value> {
        self.get(design_id)
    }

    fn design_ids(&self) -> Vec<&str> {
        self.keys().map(String::as_str).collect()
    }
}

impl DesignStore for Map<String, Value> {
    fn design(&self, design_id: &str) -> Option<&Value> {
        self.get(design_id)
    }

    fn design_ids(&self) -> Vec<&str> {
        self.keys().map(String::as_str).collect()
    }
}
