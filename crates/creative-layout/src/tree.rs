//! Layout tree data structures.
//!
//! The layout tree mirrors a design-rule record but every layer carries a
//! resolved absolute box. Children are kept sorted by their resolved top,
//! which approximates paint order.

use creative_core::{Gravity, Priority, Size};
use serde::{Deserialize, Serialize};

/// Axis-aligned bounding box in container coordinates.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Bounds {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Bounds {
    /// Create bounds with position and size.
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }

    /// Get the right edge (x + width).
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    /// Get the bottom edge (y + height).
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// Get the center X coordinate.
    pub fn center_x(&self) -> f64 {
        self.x + self.width / 2.0
    }

    /// Get the center Y coordinate.
    pub fn center_y(&self) -> f64 {
        self.y + self.height / 2.0
    }

    /// Compute union (bounding box) with another bounds.
    pub fn union(&self, other: &Bounds) -> Bounds {
        let x1 = self.x.min(other.x);
        let y1 = self.y.min(other.y);
        let x2 = self.right().max(other.right());
        let y2 = self.bottom().max(other.bottom());
        Bounds::new(x1, y1, x2 - x1, y2 - y1)
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.width.is_finite() && self.height.is_finite()
    }
}

/// Main-axis direction of the root container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlowDirection {
    #[default]
    Column,
}

/// The root container a design is laid out in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Container {
    pub width: f64,
    pub height: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background_color: Option<String>,
    #[serde(default)]
    pub flex_direction: FlowDirection,
}

impl Container {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            background_color: None,
            flex_direction: FlowDirection::Column,
        }
    }

    pub fn with_background_color(mut self, color: Option<String>) -> Self {
        self.background_color = color;
        self
    }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }
}

/// Positioning scheme of a node. Nodes are always absolutely positioned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Position {
    #[default]
    Absolute,
}

/// Cross-axis alignment of a node within its flow line. Reflowed nodes are
/// always start-aligned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AlignSelf {
    #[default]
    FlexStart,
}

/// Resolved geometry of a node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeLayout {
    pub position: Position,
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub align_self: Option<AlignSelf>,
}

impl NodeLayout {
    /// An absolutely positioned box.
    pub fn absolute(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            position: Position::Absolute,
            left,
            top,
            width,
            height,
            align_self: None,
        }
    }

    pub fn bounds(&self) -> Bounds {
        Bounds::new(self.left, self.top, self.width, self.height)
    }
}

/// Payload of a text layer.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextContent {
    pub font_size: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_value: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_wrap: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_width: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bold: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub italic: Option<bool>,
}

impl TextContent {
    /// The displayed text, empty when the layer has no default value.
    pub fn text(&self) -> &str {
        self.default_value.as_deref().unwrap_or("")
    }

    pub fn is_bold(&self) -> bool {
        self.bold.unwrap_or(false)
    }
}

/// Payload of an image layer.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageContent {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub public_id: Option<String>,
    #[serde(default)]
    pub is_main_product: bool,
}

/// Type-specific payload of a node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum NodeContent {
    Text { text: TextContent },
    Image { image: ImageContent },
}

/// Per-node state attached by a reflow.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeReflowState {
    pub priority: Priority,
    pub is_visible: bool,
    pub computed: bool,
}

/// Provenance of a node's geometry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeMetadata {
    pub original_x: f64,
    pub original_y: f64,
    pub original_gravity: Gravity,
    pub absolute_top: f64,
    pub absolute_left: f64,
    #[serde(flatten)]
    pub reflow: Option<NodeReflowState>,
}

/// A node in the layout tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutNode {
    pub key: String,
    #[serde(flatten)]
    pub content: NodeContent,
    pub display_name: String,
    pub layout: NodeLayout,
    pub priority: Priority,
    pub metadata: NodeMetadata,
}

impl LayoutNode {
    /// Create a node at `layout`, named after its key.
    ///
    /// The origin defaults to a north-west anchor at the node's own corner.
    pub fn new(key: impl Into<String>, content: NodeContent, layout: NodeLayout) -> Self {
        let key = key.into();
        Self {
            display_name: key.clone(),
            key,
            content,
            priority: Priority::default(),
            metadata: NodeMetadata {
                original_x: layout.left,
                original_y: layout.top,
                original_gravity: Gravity::NorthWest,
                absolute_top: layout.top,
                absolute_left: layout.left,
                reflow: None,
            },
            layout,
        }
    }

    /// Set the display name. `None` keeps the key as the name.
    pub fn with_display_name(mut self, name: Option<String>) -> Self {
        if let Some(name) = name {
            self.display_name = name;
        }
        self
    }

    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    /// Record the gravity-relative offsets the node was placed from.
    pub fn with_origin(mut self, x: f64, y: f64, gravity: Gravity) -> Self {
        self.metadata.original_x = x;
        self.metadata.original_y = y;
        self.metadata.original_gravity = gravity;
        self
    }

    pub fn is_text(&self) -> bool {
        matches!(self.content, NodeContent::Text { .. })
    }

    pub fn text(&self) -> Option<&TextContent> {
        match &self.content {
            NodeContent::Text { text } => Some(text),
            NodeContent::Image { .. } => None,
        }
    }

    pub fn image(&self) -> Option<&ImageContent> {
        match &self.content {
            NodeContent::Image { image } => Some(image),
            NodeContent::Text { .. } => None,
        }
    }

    pub fn bounds(&self) -> Bounds {
        self.layout.bounds()
    }

    /// Visibility after a reflow. Nodes that were never reflowed are visible.
    pub fn is_visible(&self) -> bool {
        self.metadata.reflow.map_or(true, |state| state.is_visible)
    }
}

/// The complete layout tree for one design.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutTree {
    container: Container,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    background_image: Option<creative_core::BackgroundImage>,
    children: Vec<LayoutNode>,
}

impl LayoutTree {
    /// Assemble a tree, ordering children by ascending top.
    ///
    /// The sort is stable, so nodes sharing a top keep their given order.
    pub fn new(
        container: Container,
        background_image: Option<creative_core::BackgroundImage>,
        mut children: Vec<LayoutNode>,
    ) -> Self {
        children.sort_by(|a, b| a.layout.top.total_cmp(&b.layout.top));
        Self {
            container,
            background_image,
            children,
        }
    }

    pub fn container(&self) -> &Container {
        &self.container
    }

    pub fn background_image(&self) -> Option<&creative_core::BackgroundImage> {
        self.background_image.as_ref()
    }

    /// Nodes in paint order.
    pub fn nodes(&self) -> &[LayoutNode] {
        &self.children
    }

    /// Look up a node by its layer key.
    pub fn node(&self, key: &str) -> Option<&LayoutNode> {
        self.children.iter().find(|n| n.key == key)
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    /// Get the total bounds of all content.
    pub fn content_bounds(&self) -> Bounds {
        let mut nodes = self.children.iter().map(LayoutNode::bounds);
        match nodes.next() {
            Some(first) => nodes.fold(first, |acc, b| acc.union(&b)),
            None => Bounds::default(),
        }
    }
}
