//! Priority-aware reflow of a layout tree into a new container size.

use chrono::{DateTime, Utc};
use creative_core::{ReflowError, Size};
use creative_layout::{
    AlignSelf, Bounds, Container, FlowItem, FlowLayout, LayoutNode, LayoutTree, NodeContent, NodeLayout,
    NodeMetadata, NodeReflowState, TextContent,
};

use crate::constraints::{NodeConstraints, ReflowOptions};
use crate::reflowed::{ReflowMetadata, ReflowedLayoutTree};

/// Sizes closer than this along both axes count as the same container.
const SAME_SIZE_EPSILON: f64 = 1e-6;

/// Reflow a tree with default options.
pub fn reflow(tree: &LayoutTree, target_width: f64, target_height: f64) -> Result<ReflowedLayoutTree, ReflowError> {
    ReflowEngine::default().reflow(tree, target_width, target_height)
}

/// Recomputes layout trees for new container sizes.
///
/// Nodes are laid out in paint order as a wrapping flow. Each node's box is
/// its source box scaled by the uniform fit factor, then grown or shrunk by
/// its priority tier's weights within its tier's minimum and the target's
/// maximum. Critical nodes never shrink. Nodes squeezed well below their
/// tier minimum are marked hidden.
#[derive(Debug, Clone, Default)]
pub struct ReflowEngine {
    options: ReflowOptions,
}

impl ReflowEngine {
    pub fn new(options: ReflowOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &ReflowOptions {
        &self.options
    }

    /// Reflow `tree` into a `target_width` x `target_height` container.
    ///
    /// Fails only on an invalid target. If the source tree cannot be
    /// distributed, the source geometry is returned with `is_reflowed` unset.
    pub fn reflow(
        &self,
        tree: &LayoutTree,
        target_width: f64,
        target_height: f64,
    ) -> Result<ReflowedLayoutTree, ReflowError> {
        self.reflow_at(tree, target_width, target_height, Utc::now())
    }

    /// Same as [`ReflowEngine::reflow`] with a fixed timestamp.
    pub fn reflow_at(
        &self,
        tree: &LayoutTree,
        target_width: f64,
        target_height: f64,
        reflow_date: DateTime<Utc>,
    ) -> Result<ReflowedLayoutTree, ReflowError> {
        let target = Size::new(target_width, target_height);
        if !target.is_valid() {
            return Err(ReflowError::InvalidDimensions {
                width: target_width,
                height: target_height,
            });
        }

        let source = tree.container().size();
        let result = match self.distribute(tree, target, reflow_date) {
            Ok(reflowed) => reflowed,
            Err(error) => {
                tracing::error!(
                    target: "creative.reflow",
                    %error,
                    source_width = source.width,
                    source_height = source.height,
                    target_width,
                    target_height,
                    "reflow failed, keeping source layout"
                );
                ReflowedLayoutTree::unchanged(tree, reflow_date)
            }
        };

        let metadata = result.metadata();
        tracing::info!(
            target: "creative.reflow",
            source_width = source.width,
            source_height = source.height,
            target_width,
            target_height,
            scale = metadata.scale_factor,
            visible = metadata.visible_layer_count,
            hidden = result.hidden_count(),
            reflowed = metadata.is_reflowed,
            "reflowed layout tree"
        );

        Ok(result)
    }

    fn distribute(
        &self,
        tree: &LayoutTree,
        target: Size,
        reflow_date: DateTime<Utc>,
    ) -> Result<ReflowedLayoutTree, ReflowError> {
        let source = tree.container().size();
        if !source.is_valid() {
            return Err(ReflowError::DistributionFailed {
                reason: format!("source container is {}x{}", source.width, source.height),
            });
        }

        if same_size(source, target) {
            return Ok(self.identity(tree, reflow_date));
        }

        let scale = (target.width / source.width).min(target.height / source.height);
        let constraints: Vec<NodeConstraints> = tree
            .nodes()
            .iter()
            .map(|node| NodeConstraints::for_node(node, scale, target, &self.options))
            .collect();
        let items: Vec<FlowItem> = constraints.iter().map(|c| c.item).collect();

        let outcome = FlowLayout::new(target.width)
            .layout(&items)
            .map_err(|e| ReflowError::DistributionFailed { reason: e.to_string() })?;

        tracing::debug!(
            target: "creative.reflow",
            rows = outcome.rows,
            content_height = outcome.content_height,
            overflow = outcome.content_height > target.height,
            "distributed boxes"
        );

        let children: Vec<LayoutNode> = tree
            .nodes()
            .iter()
            .zip(&constraints)
            .zip(&outcome.bounds)
            .map(|((node, constraints), bounds)| self.place(node, constraints, bounds))
            .collect();
        let visible_layer_count = children.iter().filter(|n| n.is_visible()).count();

        let container = Container::new(target.width, target.height)
            .with_background_color(tree.container().background_color.clone());
        let metadata = ReflowMetadata {
            is_reflowed: true,
            original_container: source,
            scale_factor: scale,
            reflow_date,
            visible_layer_count,
        };

        Ok(ReflowedLayoutTree::new(
            LayoutTree::new(container, tree.background_image().cloned(), children),
            metadata,
        ))
    }

    /// Finish a node from its distributed box.
    fn place(&self, node: &LayoutNode, constraints: &NodeConstraints, bounds: &Bounds) -> LayoutNode {
        let threshold = self.options.visibility_threshold;
        let is_visible = bounds.width >= threshold * constraints.min_width
            && bounds.height >= threshold * constraints.min_height;

        let content = match &node.content {
            NodeContent::Text { text } => {
                let scaled = (text.font_size * bounds.height / node.layout.height).round();
                let font_size = scaled.max(constraints.min_font_size.unwrap_or(0.0));
                NodeContent::Text {
                    text: TextContent {
                        font_size,
                        ..text.clone()
                    },
                }
            }
            NodeContent::Image { .. } => node.content.clone(),
        };

        tracing::debug!(
            target: "creative.reflow",
            key = %node.key,
            priority = %node.priority,
            is_visible,
            width = bounds.width,
            height = bounds.height,
            "placed node"
        );

        let mut layout = NodeLayout::absolute(bounds.x, bounds.y, bounds.width, bounds.height);
        layout.align_self = Some(AlignSelf::FlexStart);

        LayoutNode {
            key: node.key.clone(),
            content,
            display_name: node.display_name.clone(),
            layout,
            priority: node.priority,
            metadata: reflowed_metadata(node, bounds, is_visible),
        }
    }

    /// Same-size reflow keeps every box and shows every node.
    fn identity(&self, tree: &LayoutTree, reflow_date: DateTime<Utc>) -> ReflowedLayoutTree {
        let children: Vec<LayoutNode> = tree
            .nodes()
            .iter()
            .map(|node| LayoutNode {
                metadata: reflowed_metadata(node, &node.bounds(), true),
                ..node.clone()
            })
            .collect();
        let metadata = ReflowMetadata {
            is_reflowed: true,
            original_container: tree.container().size(),
            scale_factor: 1.0,
            reflow_date,
            visible_layer_count: children.len(),
        };
        ReflowedLayoutTree::new(
            LayoutTree::new(tree.container().clone(), tree.background_image().cloned(), children),
            metadata,
        )
    }
}

fn reflowed_metadata(node: &LayoutNode, bounds: &Bounds, is_visible: bool) -> NodeMetadata {
    NodeMetadata {
        absolute_top: bounds.y,
        absolute_left: bounds.x,
        reflow: Some(NodeReflowState {
            priority: node.priority,
            is_visible,
            computed: true,
        }),
        ..node.metadata.clone()
    }
}

fn same_size(a: Size, b: Size) -> bool {
    (a.width - b.width).abs() < SAME_SIZE_EPSILON && (a.height - b.height).abs() < SAME_SIZE_EPSILON
}
