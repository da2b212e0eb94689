//! Build, reflow, serialize, and persist in one step.

use creative_core::CreativeError;
use creative_layout::{build_layout, DesignStore, LayoutOptions};
use creative_reflow::{ReflowEngine, ReflowOptions};
use serde::{Deserialize, Serialize};

use crate::rules::{serialize_reflowed, SerializeOptions, SerializeRequest, SerializedDesign};
use crate::sink::DesignSink;

/// Options for every stage of a derivation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeriveOptions {
    pub layout: LayoutOptions,
    pub reflow: ReflowOptions,
    pub serialize: SerializeOptions,
}

/// A new design size derived from an existing design.
#[derive(Debug, Clone, PartialEq)]
pub struct DeriveRequest {
    pub source_id: String,
    pub design_id: String,
    pub name: String,
    pub width: f64,
    pub height: f64,
}

/// Derive a new design from `request.source_id` and persist it to `sink`.
///
/// Returns the design that was persisted.
pub fn derive_design<S, K>(
    store: &S,
    sink: &mut K,
    request: &DeriveRequest,
    options: &DeriveOptions,
) -> Result<SerializedDesign, CreativeError>
where
    S: DesignStore + ?Sized,
    K: DesignSink + ?Sized,
{
    let tree = build_layout(store, &request.source_id, &options.layout)?;
    let reflowed = ReflowEngine::new(options.reflow.clone()).reflow(&tree, request.width, request.height)?;

    let serialize_request =
        SerializeRequest::new(request.design_id.clone(), request.name.clone()).with_source(request.source_id.clone());
    let design = serialize_reflowed(&reflowed, &serialize_request, &options.serialize);
    sink.persist(&design)?;

    tracing::info!(
        target: "creative.export",
        source_id = %request.source_id,
        design_id = %request.design_id,
        width = request.width,
        height = request.height,
        is_reflowed = design.design_type.is_reflowed,
        "derived design"
    );

    Ok(design)
}
