use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use creative_export::{DeriveOptions, SerializeOptions};
use creative_layout::LayoutOptions;
use creative_reflow::ReflowOptions;
use serde::{Deserialize, Serialize};

/// Engine settings read from an optional JSON file.
///
/// Every section and field may be omitted and falls back to its default.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub layout: LayoutOptions,
    pub reflow: ReflowOptions,
    pub serialize: SerializeOptions,
}

impl EngineConfig {
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let raw = fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;
        let config: Self =
            serde_json::from_str(&raw).with_context(|| format!("failed to parse {}", path.display()))?;
        Ok(config)
    }

    pub fn derive_options(&self) -> DeriveOptions {
        DeriveOptions {
            layout: self.layout.clone(),
            reflow: self.reflow.clone(),
            serialize: self.serialize.clone(),
        }
    }
}
