use std::fs;
use std::path::PathBuf;

use creative_core::SinkError;
use creative_export::{DesignSink, SerializedDesign};

/// Writes each design to `<dir>/<id>.json`.
#[derive(Debug, Clone)]
pub struct DirectorySink {
    dir: PathBuf,
}

impl DirectorySink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn path_for(&self, design_id: &str) -> PathBuf {
        self.dir.join(format!("{}.json", design_id))
    }
}

impl DesignSink for DirectorySink {
    fn persist(&mut self, design: &SerializedDesign) -> Result<(), SinkError> {
        let id = design.id();
        if id.is_empty() || id.contains(['/', '\\']) || id.starts_with('.') {
            return Err(SinkError::Rejected {
                design_id: id.to_string(),
                reason: "id is not a valid file name".to_string(),
            });
        }

        let path = self.path_for(id);
        if path.exists() {
            return Err(SinkError::Rejected {
                design_id: id.to_string(),
                reason: format!("{} already exists", path.display()),
            });
        }

        fs::create_dir_all(&self.dir)?;
        let json = serde_json::to_string_pretty(design)?;
        fs::write(&path, json)?;

        tracing::debug!(target: "creative.export", design_id = id, path = %path.display(), "wrote design");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use creative_export::export_rules;
    use creative_layout::{build_layout, LayoutOptions};
    use indexmap::IndexMap;
    use serde_json::{json, Value};

    fn design(id: &str) -> SerializedDesign {
        let designs: IndexMap<String, Value> = serde_json::from_value(json!({
            "d": { "width": 100, "height": 100, "logo": { "width": 20, "height": 20 } }
        }))
        .unwrap();
        let tree = build_layout(&designs, "d", &LayoutOptions::default()).unwrap();
        export_rules(&tree, id, "Copy")
    }

    #[test]
    fn test_writes_one_file_per_design() {
        let dir = tempfile::tempdir().unwrap();
        let mut sink = DirectorySink::new(dir.path().join("out"));
        sink.persist(&design("copy")).unwrap();

        let raw = fs::read_to_string(sink.path_for("copy")).unwrap();
        let value: Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(value["designType"]["id"], "copy");
        assert_eq!(value["rules"]["logo"]["width"], 20.0);
    }

    #[test]
    fn test_rejects_existing_and_unsafe_ids() {
        let dir = tempfile::tempdir().unwrap();
        let mut sink = DirectorySink::new(dir.path());
        sink.persist(&design("copy")).unwrap();

        assert!(matches!(sink.persist(&design("copy")), Err(SinkError::Rejected { .. })));
        assert!(matches!(sink.persist(&design("../escape")), Err(SinkError::Rejected { .. })));
    }
}
