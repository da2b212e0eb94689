//! Layout tree to design-rule serialization.
//!
//! Each node's absolute box is turned back into a gravity-anchored offset,
//! so the output can be fed to the tree builder again.

use chrono::{DateTime, Utc};
use creative_core::{DesignRule, LayerRule, Size};
use creative_layout::{infer_gravity, LayoutNode, LayoutTree, NodeContent, DEFAULT_CENTER_TOLERANCE};
use creative_reflow::{ReflowMetadata, ReflowedLayoutTree};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Options for rule serialization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SerializeOptions {
    /// Distance from the container midline within which a box is centered
    pub center_tolerance: f64,
}

impl Default for SerializeOptions {
    fn default() -> Self {
        Self {
            center_tolerance: DEFAULT_CENTER_TOLERANCE,
        }
    }
}

/// Identity of the design being written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SerializeRequest {
    pub design_id: String,
    pub name: String,
    /// Design this one was derived from
    pub source_design: Option<String>,
}

impl SerializeRequest {
    pub fn new(design_id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            design_id: design_id.into(),
            name: name.into(),
            source_design: None,
        }
    }

    pub fn with_source(mut self, source_design: impl Into<String>) -> Self {
        self.source_design = Some(source_design.into());
        self
    }
}

/// Catalog record describing a serialized design.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DesignType {
    pub id: String,
    pub name: String,
    pub width: f64,
    pub height: f64,
    pub description: String,
    pub is_reflowed: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_design: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reflow_date: Option<DateTime<Utc>>,
}

/// A rule record together with its catalog entry.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SerializedDesign {
    pub rules: DesignRule,
    pub design_type: DesignType,
}

impl SerializedDesign {
    pub fn id(&self) -> &str {
        &self.design_type.id
    }
}

/// Serialize a reflowed tree, carrying its reflow provenance.
pub fn serialize_reflowed(
    reflowed: &ReflowedLayoutTree,
    request: &SerializeRequest,
    options: &SerializeOptions,
) -> SerializedDesign {
    serialize_tree(reflowed.tree(), Some(reflowed.metadata()), request, options)
}

/// Serialize `tree` into a rule record.
///
/// Every node is written, including nodes a reflow marked hidden. Text
/// layers keep their content and styling; image layers keep their source
/// and product flags.
pub fn serialize_tree(
    tree: &LayoutTree,
    reflow: Option<&ReflowMetadata>,
    request: &SerializeRequest,
    options: &SerializeOptions,
) -> SerializedDesign {
    let container = tree.container().size();

    let layers: IndexMap<String, LayerRule> = tree
        .nodes()
        .iter()
        .map(|node| (node.key.clone(), layer_rule(node, container, options)))
        .collect();
    let hidden = tree.nodes().iter().filter(|n| !n.is_visible()).count();

    let rules = DesignRule {
        width: container.width,
        height: container.height,
        background_color: tree.container().background_color.clone(),
        background_image: tree.background_image().cloned(),
        layers,
    };

    let is_reflowed = reflow.map_or(false, |m| m.is_reflowed);
    let design_type = DesignType {
        id: request.design_id.clone(),
        name: request.name.clone(),
        width: container.width,
        height: container.height,
        description: describe(container, reflow, request.source_design.as_deref()),
        is_reflowed,
        source_design: request.source_design.clone(),
        reflow_date: reflow.map(|m| m.reflow_date),
    };

    tracing::info!(
        target: "creative.export",
        design_id = %request.design_id,
        layers = rules.layers.len(),
        hidden,
        is_reflowed,
        "serialized layout tree to design rules"
    );

    SerializedDesign { rules, design_type }
}

fn layer_rule(node: &LayoutNode, container: Size, options: &SerializeOptions) -> LayerRule {
    let anchor = infer_gravity(&node.bounds(), container, options.center_tolerance);

    let mut layer = LayerRule {
        x: anchor.x,
        y: anchor.y,
        gravity: anchor.gravity,
        width: Some(node.layout.width),
        height: Some(node.layout.height),
        display_name: (node.display_name != node.key).then(|| node.display_name.clone()),
        ..LayerRule::default()
    };

    match &node.content {
        NodeContent::Text { text } => {
            layer.font_size = Some(text.font_size);
            layer.font = text.font.clone();
            layer.color = text.color.clone();
            layer.default_value = text.default_value.clone();
            layer.field_name = text.field_name.clone();
            layer.text_wrap = text.text_wrap;
            layer.text_width = text.text_width;
            layer.bold = text.bold;
            layer.italic = text.italic;
        }
        NodeContent::Image { image } => {
            layer.public_id = image.public_id.clone();
            layer.is_main_product = Some(image.is_main_product);
            if node.key.to_lowercase().contains("logo") {
                layer.is_logo = Some(true);
            }
        }
    }

    layer
}

fn describe(container: Size, reflow: Option<&ReflowMetadata>, source: Option<&str>) -> String {
    match (reflow.filter(|m| m.is_reflowed), source) {
        (Some(meta), Some(source)) => format!(
            "Reflowed from {} ({}x{}) to {}x{}",
            source,
            meta.original_container.width,
            meta.original_container.height,
            container.width,
            container.height
        ),
        (Some(meta), None) => format!(
            "Reflowed from {}x{} to {}x{}",
            meta.original_container.width,
            meta.original_container.height,
            container.width,
            container.height
        ),
        (None, _) => format!("{}x{} design", container.width, container.height),
    }
}
