//! Exporters: runnable artifacts derived from a compiled pipeline.
//!
//! Four independent, stateless backends over the same compiled node and
//! import material:
//! - Script: the generator's output, optionally with an argparse block
//! - Notebook: nbformat 4 cells, one per step
//! - Docker: container recipe bundle
//! - Requirements: deduplicated dependency manifest

mod docker;
mod notebook;
mod requirements;
mod script;

pub use docker::{DockerBundle, DockerOptions, export_docker};
pub use notebook::{
    CellMetadata, KernelSpec, LanguageInfo, NotebookCell, NotebookGenerator, NotebookMetadata,
    PipelineNotebook, export_notebook,
};
pub use requirements::{build_requirements, requirements_file};
pub use script::{ScriptArtifact, ScriptOptions, export_script};

/// Derive an artifact file stem from the pipeline name: lowercased, with
/// runs of non-alphanumeric characters collapsed to a single `_`.
pub fn artifact_stem(pipeline_name: &str) -> String {
    let mut stem = String::with_capacity(pipeline_name.len());
    for ch in pipeline_name.chars() {
        if ch.is_ascii_alphanumeric() {
            stem.push(ch.to_ascii_lowercase());
        } else if !stem.is_empty() && !stem.ends_with('_') {
            stem.push('_');
        }
    }
    let stem = stem.trim_end_matches('_');
    if stem.is_empty() {
        "pipeline".to_string()
    } else {
        stem.to_string()
    }
}
