//! Docker bundle export: container recipe plus supporting files.
//!
//! The bundle mirrors what a user needs to containerize a pipeline in
//! one download: Dockerfile, compose file, ignore file, README, the
//! generated script, and a pinned requirements manifest.

use crate::graph::{Edge, Node};
use crate::registry::Registry;

use super::requirements::requirements_file;
use super::script::{ScriptArtifact, ScriptOptions, export_script};
use super::artifact_stem;

/// Options for Docker export.
#[derive(Debug, Clone)]
pub struct DockerOptions {
    /// Python runtime version for the base image tag.
    pub python_version: String,
}

impl Default for DockerOptions {
    fn default() -> Self {
        Self {
            python_version: "3.11".to_string(),
        }
    }
}

/// The complete set of files for containerizing a pipeline.
#[derive(Debug, Clone)]
pub struct DockerBundle {
    /// Dockerfile text.
    pub dockerfile: String,
    /// docker-compose.yml text.
    pub compose: String,
    /// .dockerignore text.
    pub dockerignore: String,
    /// README.md text with build and run instructions.
    pub readme: String,
    /// The generated pipeline script.
    pub script: ScriptArtifact,
    /// Pinned requirements.txt body.
    pub requirements: String,
    /// The declared base image tag.
    pub base_image: String,
}

/// Export the pipeline as a Docker bundle.
///
/// The recipe installs the pinned requirements and runs the generated
/// script; unresolved nodes are excluded exactly as in script
/// generation.
pub fn export_docker(
    nodes: &[Node],
    edges: &[Edge],
    pipeline_name: &str,
    registry: &Registry,
    options: &DockerOptions,
) -> DockerBundle {
    let script = export_script(nodes, edges, pipeline_name, registry, &ScriptOptions::default());
    let requirements = requirements_file(nodes, registry, true);
    let base_image = format!("python:{}-slim", options.python_version);
    let service = artifact_stem(pipeline_name);

    let dockerfile = format!(
        "FROM {base_image}\n\n\
         WORKDIR /app\n\n\
         COPY requirements.txt .\n\
         RUN pip install --no-cache-dir -r requirements.txt\n\n\
         COPY {script} .\n\n\
         CMD [\"python\", \"{script}\"]\n",
        script = script.filename,
    );

    let compose =
        format!("services:\n  {service}:\n    build: .\n    container_name: {service}\n");

    let dockerignore = "\
__pycache__/
*.pyc
.git/
.venv/
*.ipynb_checkpoints
"
    .to_string();

    let readme = format!(
        "# {pipeline_name}\n\n\
         Generated ML pipeline, packaged for Docker.\n\n\
         ## Build\n\n\
         ```sh\n\
         docker build -t {service} .\n\
         ```\n\n\
         ## Run\n\n\
         ```sh\n\
         docker run --rm {service}\n\
         ```\n\n\
         Or with compose:\n\n\
         ```sh\n\
         docker compose up --build\n\
         ```\n",
    );

    DockerBundle {
        dockerfile,
        compose,
        dockerignore,
        readme,
        script,
        requirements,
        base_image,
    }
}
