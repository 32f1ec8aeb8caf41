//! Loading of pipeline documents and the component catalog.

use std::fs;

use anyhow::Context;
use pipewright_core::{Pipeline, Registry};

/// Read a pipeline JSON document from disk.
pub fn load_pipeline(path: &str) -> anyhow::Result<Pipeline> {
    let content =
        fs::read_to_string(path).with_context(|| format!("failed to read pipeline {path}"))?;
    let pipeline: Pipeline = serde_json::from_str(&content)
        .with_context(|| format!("failed to parse pipeline {path}"))?;
    tracing::debug!(
        "loaded pipeline '{}' with {} nodes and {} edges",
        pipeline.name,
        pipeline.nodes.len(),
        pipeline.edges.len()
    );
    Ok(pipeline)
}

/// Load the component catalog: a caller-supplied file, or the builtin
/// catalog when none is given.
pub fn load_registry(catalog: Option<&str>) -> anyhow::Result<Registry> {
    let registry = match catalog {
        Some(path) => Registry::load(path)?,
        None => Registry::builtin()?,
    };
    tracing::debug!("catalog holds {} components", registry.len());
    Ok(registry)
}
