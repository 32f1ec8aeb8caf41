//! Standalone Python script export.

use crate::codegen::generate_script;
use crate::graph::{Edge, Node};
use crate::registry::Registry;

use super::artifact_stem;

/// Options for script export.
#[derive(Debug, Clone, Default)]
pub struct ScriptOptions {
    /// Prefix the script with a command-line argument parser block.
    pub include_cli: bool,
}

/// A generated script artifact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptArtifact {
    /// UTF-8 script text.
    pub script: String,
    /// Suggested filename, derived from the pipeline name.
    pub filename: String,
}

/// Export the pipeline as a standalone Python script.
///
/// Returns the code generator's output verbatim, optionally prefixed
/// with an argparse block when `include_cli` is set.
pub fn export_script(
    nodes: &[Node],
    edges: &[Edge],
    pipeline_name: &str,
    registry: &Registry,
    options: &ScriptOptions,
) -> ScriptArtifact {
    let generated = generate_script(nodes, edges, pipeline_name, registry);
    let script = if options.include_cli {
        format!("{}{generated}", cli_prologue(pipeline_name))
    } else {
        generated
    };

    ScriptArtifact {
        script,
        filename: format!("{}.py", artifact_stem(pipeline_name)),
    }
}

fn cli_prologue(pipeline_name: &str) -> String {
    format!(
        "import argparse\n\n\
         parser = argparse.ArgumentParser(description=\"{pipeline_name}\")\n\
         parser.add_argument(\"--verbose\", action=\"store_true\", help=\"Print step-by-step progress\")\n\
         args = parser.parse_args()\n\n"
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::Registry;

    #[test]
    fn test_filename_derivation() {
        let registry = Registry::from_components(Vec::new());
        let artifact = export_script(&[], &[], "Churn Model v2", &registry, &ScriptOptions::default());
        assert_eq!(artifact.filename, "churn_model_v2.py");
    }

    #[test]
    fn test_cli_prologue_prefixes_script() {
        let registry = Registry::from_components(Vec::new());
        let nodes = vec![Node::new("a", "A")];
        let options = ScriptOptions { include_cli: true };
        let artifact = export_script(&nodes, &[], "P", &registry, &options);
        assert!(artifact.script.starts_with("import argparse\n"));
        assert!(artifact.script.contains("# P\n# Generated ML Pipeline Code"));
    }

    #[test]
    fn test_default_is_generator_output_verbatim() {
        let registry = Registry::from_components(Vec::new());
        let nodes = vec![Node::new("a", "A")];
        let artifact = export_script(&nodes, &[], "P", &registry, &ScriptOptions::default());
        assert_eq!(
            artifact.script,
            generate_script(&nodes, &[], "P", &registry)
        );
    }
}
