//! Core compiler for Pipewright ML pipelines.
//!
//! This crate provides:
//! - The pipeline graph model (nodes, edges, parameter values)
//! - Structural and hyperparameter validation
//! - Deterministic topological ordering
//! - Python script generation via template substitution
//! - Exporters: script, Jupyter notebook, Docker bundle, requirements
//!
//! Everything is synchronous and side-effect free: each operation is a
//! pure function of its inputs and a read-only [`Registry`] constructed
//! once at startup.

pub mod codegen;
pub mod error;
pub mod export;
pub mod graph;
pub mod registry;

pub use codegen::{collect_imports, generate_script, substitute};
pub use error::{Error, Result};
pub use export::{
    DockerBundle, DockerOptions, PipelineNotebook, ScriptArtifact, ScriptOptions, artifact_stem,
    build_requirements, export_docker, export_notebook, export_script, requirements_file,
};
pub use graph::{Edge, Node, ParamValue, Pipeline, ValidationResult, topological_sort, validate};
pub use registry::{Component, PackageDependency, ParamKind, ParameterSpec, Registry};
