//! `pipewright validate` - structural and hyperparameter validation.

use pipewright_core::{Registry, validate};

use crate::input;

/// Validate a pipeline document. Returns whether it passed.
pub fn execute(pipeline_path: &str, registry: &Registry) -> anyhow::Result<bool> {
    let pipeline = input::load_pipeline(pipeline_path)?;
    let result = validate(&pipeline.nodes, &pipeline.edges, registry);

    for error in &result.errors {
        println!("error: {error}");
    }
    for warning in &result.warnings {
        println!("warning: {warning}");
    }

    if result.is_ok() {
        println!(
            "Pipeline '{}' is valid ({} nodes, {} edges)",
            pipeline.name,
            pipeline.nodes.len(),
            pipeline.edges.len()
        );
    }

    Ok(result.is_ok())
}
