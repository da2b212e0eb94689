//! Serialization and persistence of creative layout trees.
//!
//! Supported operations:
//! - Rule serialization (layout tree back to a gravity-anchored rule record)
//! - Persistence through a [`DesignSink`]
//! - One-call derivation of a new design size from an existing design

mod derive;
pub mod rules;
pub mod sink;

use creative_layout::LayoutTree;
use creative_reflow::ReflowedLayoutTree;

// Re-export commonly used types
pub use derive::{derive_design, DeriveOptions, DeriveRequest};
pub use rules::{
    serialize_reflowed, serialize_tree, DesignType, SerializeOptions, SerializeRequest, SerializedDesign,
};
pub use sink::{DesignSink, MemorySink};

/// Serialize an unreflowed tree with default options.
pub fn export_rules(tree: &LayoutTree, design_id: &str, name: &str) -> SerializedDesign {
    serialize_tree(
        tree,
        None,
        &SerializeRequest::new(design_id, name),
        &SerializeOptions::default(),
    )
}

/// Serialize a reflowed tree derived from `source_design` with default options.
pub fn export_reflowed(
    reflowed: &ReflowedLayoutTree,
    design_id: &str,
    name: &str,
    source_design: &str,
) -> SerializedDesign {
    serialize_reflowed(
        reflowed,
        &SerializeRequest::new(design_id, name).with_source(source_design),
        &SerializeOptions::default(),
    )
}
