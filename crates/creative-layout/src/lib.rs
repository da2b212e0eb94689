//! Layout tree construction for creative designs.
//!
//! This crate turns gravity-anchored design-rule records into layout trees
//! whose nodes carry absolute boxes, and provides the row-wrapping flow
//! layout used to reflow those trees.
//!
//! # Architecture
//!
//! 1. **Gravity positioning**: Resolves anchor + offset into top/left, and back
//! 2. **Text measurement**: Estimates boxes for text layers without a size
//! 3. **Priority**: Classifies each layer into an importance tier
//! 4. **Tree building**: Assembles the ordered, absolute-coordinate tree
//!
//! # Example
//!
//! ```ignore
//! use creative_layout::{build_layout, LayoutOptions};
//!
//! let designs: IndexMap<String, serde_json::Value> = serde_json::from_str(source)?;
//! let tree = build_layout(&designs, "banner-300x250", &LayoutOptions::default())?;
//!
//! for node in tree.nodes() {
//!     println!("{}: {:?}", node.key, node.bounds());
//! }
//! ```

mod builder;
mod flow;
mod gravity;
mod priority;
mod store;
mod text;
mod tree;

pub use builder::{build_all, build_from_rule, build_layout, LayoutOptions};
pub use flow::{FlowError, FlowItem, FlowLayout, FlowOutcome};
pub use gravity::{absolute_position, infer_gravity, GravityOffset, Placement, DEFAULT_CENTER_TOLERANCE};
pub use priority::classify_priority;
pub use store::DesignStore;
pub use text::{measure_text, measure_text_with, TextMetrics, TextMetricsOptions, TextStyle};
pub use tree::{
    AlignSelf, Bounds, Container, FlowDirection, ImageContent, LayoutNode, LayoutTree, NodeContent,
    NodeLayout, NodeMetadata, NodeReflowState, Position, TextContent,
};
