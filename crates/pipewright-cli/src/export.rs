//! `pipewright export` - write runnable artifacts to disk.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use pipewright_core::{
    DockerOptions, Pipeline, Registry, ScriptOptions, artifact_stem, export_docker,
    export_notebook, export_script, requirements_file,
};

use crate::ExportFormat;
use crate::input;

/// Options collected from the command line.
pub struct ExportOptions {
    pub format: ExportFormat,
    pub output_dir: String,
    pub pinned: bool,
    pub python_version: String,
    pub with_cli: bool,
}

/// Export the pipeline in the requested format.
pub fn execute(
    pipeline_path: &str,
    registry: &Registry,
    options: &ExportOptions,
) -> anyhow::Result<()> {
    let pipeline = input::load_pipeline(pipeline_path)?;
    let output_dir = Path::new(&options.output_dir);
    fs::create_dir_all(output_dir)
        .with_context(|| format!("failed to create {}", output_dir.display()))?;

    match options.format {
        ExportFormat::Python => export_python(&pipeline, registry, options, output_dir),
        ExportFormat::Notebook => export_ipynb(&pipeline, registry, output_dir),
        ExportFormat::Docker => export_bundle(&pipeline, registry, options, output_dir),
        ExportFormat::Requirements => export_requirements(&pipeline, registry, options, output_dir),
    }
}

fn export_python(
    pipeline: &Pipeline,
    registry: &Registry,
    options: &ExportOptions,
    output_dir: &Path,
) -> anyhow::Result<()> {
    let script_options = ScriptOptions {
        include_cli: options.with_cli,
    };
    let artifact = export_script(
        &pipeline.nodes,
        &pipeline.edges,
        &pipeline.name,
        registry,
        &script_options,
    );
    write_file(output_dir.join(&artifact.filename), &artifact.script)?;
    // A script is only runnable with its dependencies alongside.
    write_file(
        output_dir.join("requirements.txt"),
        &requirements_file(&pipeline.nodes, registry, options.pinned),
    )?;
    Ok(())
}

fn export_ipynb(pipeline: &Pipeline, registry: &Registry, output_dir: &Path) -> anyhow::Result<()> {
    let notebook = export_notebook(
        &pipeline.nodes,
        &pipeline.edges,
        &pipeline.name,
        pipeline.description.as_deref(),
        registry,
    );
    let filename = format!("{}.ipynb", artifact_stem(&pipeline.name));
    write_file(output_dir.join(filename), &notebook.to_json()?)?;
    Ok(())
}

fn export_bundle(
    pipeline: &Pipeline,
    registry: &Registry,
    options: &ExportOptions,
    output_dir: &Path,
) -> anyhow::Result<()> {
    let docker_options = DockerOptions {
        python_version: options.python_version.clone(),
    };
    let bundle = export_docker(
        &pipeline.nodes,
        &pipeline.edges,
        &pipeline.name,
        registry,
        &docker_options,
    );

    write_file(output_dir.join("Dockerfile"), &bundle.dockerfile)?;
    write_file(output_dir.join("docker-compose.yml"), &bundle.compose)?;
    write_file(output_dir.join(".dockerignore"), &bundle.dockerignore)?;
    write_file(output_dir.join("README.md"), &bundle.readme)?;
    write_file(output_dir.join(&bundle.script.filename), &bundle.script.script)?;
    write_file(output_dir.join("requirements.txt"), &bundle.requirements)?;
    Ok(())
}

fn export_requirements(
    pipeline: &Pipeline,
    registry: &Registry,
    options: &ExportOptions,
    output_dir: &Path,
) -> anyhow::Result<()> {
    write_file(
        output_dir.join("requirements.txt"),
        &requirements_file(&pipeline.nodes, registry, options.pinned),
    )
}

fn write_file(path: PathBuf, content: &str) -> anyhow::Result<()> {
    fs::write(&path, content).with_context(|| format!("failed to write {}", path.display()))?;
    println!("Wrote {}", path.display());
    Ok(())
}
