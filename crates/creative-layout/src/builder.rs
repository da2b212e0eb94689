//! Layout tree construction from design-rule records.

use creative_core::{is_valid_dimension, BuildError, DesignRule, LayerRule, Size};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::gravity::absolute_position;
use crate::priority::classify_priority;
use crate::store::DesignStore;
use crate::text::{measure_text_with, TextMetricsOptions, TextStyle};
use crate::tree::{
    Container, ImageContent, LayoutNode, LayoutTree, NodeContent, NodeLayout, TextContent,
};

/// Options for layout tree construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LayoutOptions {
    /// Font size for text layers that don't declare one
    pub default_font_size: f64,
    /// Width for image layers that don't declare one
    pub default_image_width: f64,
    /// Height for image layers that don't declare one
    pub default_image_height: f64,
    /// Text size heuristic
    pub text: TextMetricsOptions,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            default_font_size: 16.0,
            default_image_width: 100.0,
            default_image_height: 100.0,
            text: TextMetricsOptions::default(),
        }
    }
}

/// Build the layout tree for one design in `store`.
pub fn build_layout<S>(store: &S, design_id: &str, options: &LayoutOptions) -> Result<LayoutTree, BuildError>
where
    S: DesignStore + ?Sized,
{
    let record = store.design(design_id).ok_or_else(|| BuildError::NotFound {
        design_id: design_id.to_string(),
    })?;
    let rule = DesignRule::from_record(design_id, record)?;
    build_from_rule(design_id, &rule, options)
}

/// Build layout trees for every design in `store`.
///
/// Designs that fail to convert are logged and left out of the result; the
/// batch as a whole never fails.
pub fn build_all<S>(store: &S, options: &LayoutOptions) -> IndexMap<String, LayoutTree>
where
    S: DesignStore + ?Sized,
{
    let mut trees = IndexMap::new();
    for design_id in store.design_ids() {
        match build_layout(store, design_id, options) {
            Ok(tree) => {
                trees.insert(design_id.to_string(), tree);
            }
            Err(error) => {
                tracing::warn!(
                    target: "creative.build",
                    design_id,
                    %error,
                    "skipping design that failed to convert"
                );
            }
        }
    }
    trees
}

/// Build the layout tree for an already decoded rule record.
pub fn build_from_rule(
    design_id: &str,
    rule: &DesignRule,
    options: &LayoutOptions,
) -> Result<LayoutTree, BuildError> {
    let container_size = rule.size();
    if !container_size.is_valid() {
        return Err(BuildError::InvalidDimensions {
            design_id: design_id.to_string(),
            detail: format!("width={}, height={}", rule.width, rule.height),
        });
    }

    let children = rule
        .layers
        .iter()
        .map(|(key, layer)| layout_layer(design_id, key, layer, container_size, options))
        .collect::<Result<Vec<_>, _>>()?;

    let container = Container::new(rule.width, rule.height)
        .with_background_color(rule.background_color.clone());
    let tree = LayoutTree::new(container, rule.background_image.clone(), children);

    tracing::info!(
        target: "creative.build",
        design_id,
        layers = tree.len(),
        width = rule.width,
        height = rule.height,
        "converted design rules to layout tree"
    );

    Ok(tree)
}

/// Convert one layer into a positioned node.
fn layout_layer(
    design_id: &str,
    key: &str,
    layer: &LayerRule,
    container: Size,
    options: &LayoutOptions,
) -> Result<LayoutNode, BuildError> {
    let invalid = |field: &str, value: f64| BuildError::ConversionFailure {
        design_id: design_id.to_string(),
        layer: key.to_string(),
        reason: format!("{} must be finite and positive, got {}", field, value),
    };
    let explicit = |field: &str, value: Option<f64>| match value {
        Some(v) if !is_valid_dimension(v) => Err(invalid(field, v)),
        other => Ok(other),
    };

    let width = explicit("width", layer.width)?;
    let height = explicit("height", layer.height)?;

    let (content, estimated) = if layer.is_text() {
        let font_size = explicit("fontSize", layer.font_size)?.unwrap_or(options.default_font_size);
        let text = TextContent {
            font_size,
            default_value: layer.default_value.clone(),
            font: layer.font.clone(),
            color: layer.color.clone(),
            field_name: layer.field_name.clone(),
            text_wrap: layer.text_wrap,
            text_width: layer.text_width,
            bold: layer.bold,
            italic: layer.italic,
        };
        // Only estimate what the record leaves out
        let estimated = if width.is_none() || height.is_none() {
            let style = TextStyle::new(font_size).bold(text.is_bold());
            let metrics = measure_text_with(text.text(), &style, &options.text);
            (metrics.width.max(1.0), metrics.height.max(1.0))
        } else {
            (0.0, 0.0)
        };
        (NodeContent::Text { text }, estimated)
    } else {
        let image = ImageContent {
            public_id: layer.public_id.clone(),
            is_main_product: layer.is_main_product.unwrap_or(false),
        };
        (
            NodeContent::Image { image },
            (options.default_image_width, options.default_image_height),
        )
    };

    let width = width.unwrap_or(estimated.0);
    let height = height.unwrap_or(estimated.1);
    let placement = absolute_position(layer.x, layer.y, layer.gravity, width, height, container);
    let priority = classify_priority(key, layer.priority, layer.is_main_product.unwrap_or(false));

    let layout = NodeLayout::absolute(placement.left, placement.top, width, height);
    Ok(LayoutNode::new(key, content, layout)
        .with_display_name(layer.display_name.clone())
        .with_priority(priority)
        .with_origin(layer.x, layer.y, layer.gravity))
}
