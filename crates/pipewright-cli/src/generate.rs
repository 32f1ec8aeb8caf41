//! `pipewright generate` - emit the pipeline's Python script.

use std::fs;

use anyhow::Context;
use pipewright_core::{Registry, generate_script};

use crate::input;

/// Generate the script and write it to stdout or a file.
pub fn execute(
    pipeline_path: &str,
    output: Option<&str>,
    registry: &Registry,
) -> anyhow::Result<()> {
    let pipeline = input::load_pipeline(pipeline_path)?;
    let script = generate_script(&pipeline.nodes, &pipeline.edges, &pipeline.name, registry);

    match output {
        Some(path) => {
            fs::write(path, &script).with_context(|| format!("failed to write {path}"))?;
            println!("Wrote {path}");
        }
        None => print!("{script}"),
    }

    Ok(())
}
