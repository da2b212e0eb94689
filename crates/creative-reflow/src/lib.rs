//! Responsive reflow of creative layout trees.
//!
//! A layout tree built for one container size is recomputed for another.
//! Every node is scaled by the uniform fit factor and then flowed in paint
//! order, with priority tiers deciding how much each node may grow, shrink,
//! or be hidden.
//!
//! # Example
//!
//! ```ignore
//! use creative_reflow::{ReflowEngine, ReflowOptions};
//!
//! let engine = ReflowEngine::new(ReflowOptions::default());
//! let leaderboard = engine.reflow(&tree, 728.0, 90.0)?;
//!
//! for node in leaderboard.visible_nodes() {
//!     println!("{}: {:?}", node.key, node.bounds());
//! }
//! ```

mod constraints;
mod engine;
mod reflowed;

pub use constraints::{min_font_size, min_image_box, tier_weights, NodeConstraints, ReflowOptions};
pub use engine::{reflow, ReflowEngine};
pub use reflowed::{ReflowMetadata, ReflowedLayoutTree};
