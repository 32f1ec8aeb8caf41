//! Python script synthesis from a pipeline graph.

use std::collections::BTreeSet;

use crate::graph::{Edge, Node, topological_sort};
use crate::registry::Registry;

use super::template;

/// Script returned for an empty pipeline.
const EMPTY_PIPELINE_SCRIPT: &str =
    "# No nodes in pipeline\nprint(\"Please add components to your pipeline first!\")";

/// Collect the import lines of every resolved node, deduplicated and
/// sorted lexicographically.
///
/// An import line is a trimmed template line starting with `import ` or
/// `from `. Nodes whose component does not resolve contribute nothing.
pub fn collect_imports(nodes: &[Node], registry: &Registry) -> Vec<String> {
    let mut imports = BTreeSet::new();
    for node in nodes {
        if let Some(component) = registry.resolve_node(node) {
            for line in component.code_template.lines() {
                let line = line.trim();
                if line.starts_with("import ") || line.starts_with("from ") {
                    imports.insert(line.to_string());
                }
            }
        }
    }
    imports.into_iter().collect()
}

/// Render one node's step block: header comment, progress print, and the
/// substituted template. Returns `None` when the component is unresolved.
pub(crate) fn step_block(node: &Node, step: usize, registry: &Registry) -> Option<String> {
    let component = registry.resolve_node(node)?;
    let mut block = format!("# Step {step}: {}\nprint(\"Step {step}: {}\")\n", node.label, node.label);
    block.push_str(&template::substitute(&component.code_template, &node.parameters));
    Some(block)
}

/// Generate an executable Python script for the pipeline.
///
/// The script hoists imports to the top, wraps one annotated block per
/// resolved node in a `run_ml_pipeline()` entry function, and appends a
/// run guard. Output is a pure function of the inputs: identical nodes,
/// edges, name and registry yield byte-identical text.
pub fn generate_script(
    nodes: &[Node],
    edges: &[Edge],
    pipeline_name: &str,
    registry: &Registry,
) -> String {
    if nodes.is_empty() {
        return EMPTY_PIPELINE_SCRIPT.to_string();
    }

    let sorted = topological_sort(nodes, edges);

    let mut code = format!("# {pipeline_name}\n# Generated ML Pipeline Code\n\n");
    code.push_str(&collect_imports(&sorted, registry).join("\n"));
    code.push_str("\n\n");

    code.push_str("# Main Pipeline\n");
    code.push_str("def run_ml_pipeline():\n");
    code.push_str("    \"\"\"Execute the complete ML pipeline\"\"\"\n");
    code.push_str("    print(\"Starting ML Pipeline execution...\")\n    \n");

    for (index, node) in sorted.iter().enumerate() {
        // Unresolved nodes are skipped but still consume a step index.
        let Some(block) = step_block(node, index + 1, registry) else {
            tracing::debug!(
                "node {} ({}) has no resolvable component, skipping",
                node.id,
                node.label
            );
            continue;
        };

        for line in block.lines().filter(|line| !line.trim().is_empty()) {
            code.push_str("    ");
            code.push_str(line);
            code.push('\n');
        }
        code.push_str("    \n");
    }

    code.push_str("    print(\"Pipeline execution completed!\")\n\n");
    code.push_str("# Execute the pipeline\n");
    code.push_str("if __name__ == \"__main__\":\n");
    code.push_str("    run_ml_pipeline()\n");

    code
}
