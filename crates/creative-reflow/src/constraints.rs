//! Per-tier sizing rules for reflow.
//!
//! Each node becomes a [`FlowItem`] whose minimum box, weights, and margin
//! depend on its priority tier and content type.

use creative_core::{Priority, Size};
use creative_layout::{measure_text_with, FlowItem, LayoutNode, NodeContent, TextMetricsOptions, TextStyle};
use serde::{Deserialize, Serialize};

/// Options for reflow computation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ReflowOptions {
    /// Space kept free along each axis of the target; bounds every node's max box
    pub container_inset: f64,
    /// Margin at scale 1, scaled with the layout
    pub margin: f64,
    /// Lower clamp of the scaled margin
    pub min_margin: f64,
    /// Upper clamp of the scaled margin
    pub max_margin: f64,
    /// Fraction of the minimum box below which a node is hidden
    pub visibility_threshold: f64,
    /// Text size heuristic for minimum text boxes
    pub text: TextMetricsOptions,
}

impl Default for ReflowOptions {
    fn default() -> Self {
        Self {
            container_inset: 20.0,
            margin: 8.0,
            min_margin: 2.0,
            max_margin: 8.0,
            visibility_threshold: 0.8,
            text: TextMetricsOptions::default(),
        }
    }
}

impl ReflowOptions {
    /// Margin around every node at `scale`.
    pub fn margin_at(&self, scale: f64) -> f64 {
        (self.margin * scale).max(self.min_margin).min(self.max_margin)
    }
}

/// Grow and shrink weights of a tier.
pub fn tier_weights(priority: Priority) -> (f64, f64) {
    match priority {
        Priority::Critical => (0.0, 0.0),
        Priority::High => (0.5, 0.3),
        Priority::Medium => (1.0, 1.0),
        Priority::Low => (0.0, 2.0),
    }
}

/// Smallest font a text node of this tier may be set in.
pub fn min_font_size(priority: Priority, font_size: f64) -> f64 {
    match priority {
        Priority::Critical => font_size,
        Priority::High => (font_size * 0.7).max(12.0),
        Priority::Medium => (font_size * 0.5).max(10.0),
        Priority::Low => 8.0,
    }
}

/// Smallest box an image node of this tier may be given.
pub fn min_image_box(priority: Priority, width: f64, height: f64) -> (f64, f64) {
    match priority {
        Priority::Critical => (width * 0.8, height * 0.8),
        Priority::High => (50.0, 50.0),
        Priority::Medium | Priority::Low => (30.0, 30.0),
    }
}

/// Flow constraints of one node, plus what is needed to finish it afterwards.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NodeConstraints {
    pub item: FlowItem,
    /// Tier minimum; drives visibility
    pub min_width: f64,
    pub min_height: f64,
    /// Font floor for text nodes
    pub min_font_size: Option<f64>,
}

impl NodeConstraints {
    /// Derive constraints for `node` when laying out into `target` at `scale`.
    ///
    /// Non-critical nodes are floored at their tier minimum, which may exceed
    /// their current box; when it does not fit the target, the target's max
    /// box wins. Critical nodes are floored at the larger of their tier
    /// minimum and their current box, and keep that floor even when it does
    /// not fit the target.
    pub fn for_node(node: &LayoutNode, scale: f64, target: Size, options: &ReflowOptions) -> Self {
        let width = node.layout.width;
        let height = node.layout.height;
        let priority = node.priority;

        let (tier_min, min_font) = match &node.content {
            NodeContent::Text { text } => {
                let min_font = min_font_size(priority, text.font_size);
                let style = TextStyle::new(min_font).bold(text.is_bold());
                let metrics = measure_text_with(text.text(), &style, &options.text);
                ((metrics.width, metrics.height), Some(min_font))
            }
            NodeContent::Image { .. } => (min_image_box(priority, width, height), None),
        };
        let (min_width, min_height) = tier_min;

        let critical = priority == Priority::Critical;
        let (floor_width, floor_height) = if critical {
            (min_width.max(width), min_height.max(height))
        } else {
            (min_width, min_height)
        };

        let (grow, shrink) = tier_weights(priority);
        let mut item = FlowItem::new(
            (width * scale).max(floor_width),
            (height * scale).max(floor_height),
        )
        .with_min(floor_width, floor_height)
        .with_max(
            (target.width - options.container_inset).max(1.0),
            (target.height - options.container_inset).max(1.0),
        )
        .with_weights(grow, shrink)
        .with_margin(options.margin_at(scale))
        .with_min_wins(critical);

        if !node.is_text() {
            item = item.with_aspect_ratio(width / height);
        }

        Self {
            item,
            min_width,
            min_height,
            min_font_size: min_font,
        }
    }
}
