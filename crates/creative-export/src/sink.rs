//! Persistence of serialized designs.

use creative_core::SinkError;
use creative_layout::DesignStore;
use indexmap::IndexMap;
use serde_json::Value;

use crate::rules::{DesignType, SerializedDesign};

/// Write-only destination for serialized designs.
pub trait DesignSink {
    /// Store `design` under its id.
    fn persist(&mut self, design: &SerializedDesign) -> Result<(), SinkError>;
}

/// In-memory sink that keeps rule records and catalog entries side by side.
///
/// Ids are write-once. Persisted records can be read back through
/// [`DesignStore`], so a sink can feed a further derivation.
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    records: IndexMap<String, Value>,
    design_types: IndexMap<String, DesignType>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn design_type(&self, design_id: &str) -> Option<&DesignType> {
        self.design_types.get(design_id)
    }

    pub fn design_types(&self) -> impl Iterator<Item = &DesignType> {
        self.design_types.values()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl DesignSink for MemorySink {
    fn persist(&mut self, design: &SerializedDesign) -> Result<(), SinkError> {
        let id = design.id();
        if self.records.contains_key(id) {
            return Err(SinkError::Rejected {
                design_id: id.to_string(),
                reason: "a design with this id already exists".to_string(),
            });
        }

        let record = design.rules.to_record()?;
        self.records.insert(id.to_string(), record);
        self.design_types.insert(id.to_string(), design.design_type.clone());
        Ok(())
    }
}

impl DesignStore for MemorySink {
    fn design(&self, design_id: &str) -> Option<&Value> {
        self.records.get(design_id)
    }

    fn design_ids(&self) -> Vec<&str> {
        self.records.keys().map(String::as_str).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use creative_core::{DesignRule, LayerRule};

    fn design(id: &str) -> SerializedDesign {
        let mut rules = DesignRule {
            width: 320.0,
            height: 50.0,
            ..DesignRule::default()
        };
        rules.layers.insert(
            "logo".to_string(),
            LayerRule {
                width: Some(40.0),
                height: Some(20.0),
                ..LayerRule::default()
            },
        );
        SerializedDesign {
            rules,
            design_type: DesignType {
                id: id.to_string(),
                name: "Mobile banner".to_string(),
                width: 320.0,
                height: 50.0,
                description: "320x50 design".to_string(),
                is_reflowed: false,
                source_design: None,
                reflow_date: None,
            },
        }
    }

    #[test]
    fn test_persist_and_read_back() {
        let mut sink = MemorySink::new();
        sink.persist(&design("mobile")).unwrap();

        assert_eq!(sink.len(), 1);
        assert_eq!(sink.design_ids(), ["mobile"]);
        let record = sink.design("mobile").unwrap();
        assert_eq!(record["width"], 320.0);
        assert_eq!(record["logo"]["width"], 40.0);
        assert_eq!(sink.design_type("mobile").map(|t| t.name.as_str()), Some("Mobile banner"));
    }

    #[test]
    fn test_duplicate_id_is_rejected() {
        let mut sink = MemorySink::new();
        sink.persist(&design("mobile")).unwrap();
        match sink.persist(&design("mobile")) {
            Err(SinkError::Rejected { design_id, .. }) => assert_eq!(design_id, "mobile"),
            other => panic!("expected rejection, got {:?}", other),
        }
        assert_eq!(sink.design_types().count(), 1);
    }
}
