//! Reflow output types.

use chrono::{DateTime, Utc};
use creative_core::Size;
use creative_layout::{LayoutNode, LayoutTree};
use serde::{Deserialize, Serialize};

/// Tree-level record of how a reflowed tree was produced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReflowMetadata {
    /// False when the engine fell back to the source geometry
    pub is_reflowed: bool,
    pub original_container: Size,
    pub scale_factor: f64,
    pub reflow_date: DateTime<Utc>,
    pub visible_layer_count: usize,
}

/// A layout tree recomputed for a new container size.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReflowedLayoutTree {
    #[serde(flatten)]
    tree: LayoutTree,
    metadata: ReflowMetadata,
}

impl ReflowedLayoutTree {
    pub(crate) fn new(tree: LayoutTree, metadata: ReflowMetadata) -> Self {
        Self { tree, metadata }
    }

    /// The source tree unchanged, marked as not reflowed.
    pub(crate) fn unchanged(source: &LayoutTree, reflow_date: DateTime<Utc>) -> Self {
        let metadata = ReflowMetadata {
            is_reflowed: false,
            original_container: source.container().size(),
            scale_factor: 1.0,
            reflow_date,
            visible_layer_count: source.nodes().iter().filter(|n| n.is_visible()).count(),
        };
        Self::new(source.clone(), metadata)
    }

    pub fn tree(&self) -> &LayoutTree {
        &self.tree
    }

    pub fn metadata(&self) -> &ReflowMetadata {
        &self.metadata
    }

    pub fn into_tree(self) -> LayoutTree {
        self.tree
    }

    /// Nodes that survived the reflow, in paint order.
    pub fn visible_nodes(&self) -> impl Iterator<Item = &LayoutNode> {
        self.tree.nodes().iter().filter(|n| n.is_visible())
    }

    /// Number of nodes hidden by the reflow.
    pub fn hidden_count(&self) -> usize {
        self.tree.len().saturating_sub(self.metadata.visible_layer_count)
    }
}
