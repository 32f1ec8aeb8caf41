//! Dependency manifest builder.

use rustc_hash::FxHashSet;

use crate::graph::Node;
use crate::registry::Registry;

/// Build manifest lines: one per package, `name` or `name==version`.
///
/// Walks the resolved components of every node in pipeline order (edges
/// and execution order are irrelevant here), deduplicating by package
/// name and keeping the first pinned version seen. With `pinned` unset,
/// or for a package with no pin, the line is the bare name.
pub fn build_requirements(nodes: &[Node], registry: &Registry, pinned: bool) -> Vec<String> {
    let mut seen = FxHashSet::default();
    let mut lines = Vec::new();

    for node in nodes {
        let Some(component) = registry.resolve_node(node) else {
            continue;
        };
        for package in &component.package_dependencies {
            if !seen.insert(package.name.as_str()) {
                continue;
            }
            let line = match (&package.pinned_version, pinned) {
                (Some(version), true) => format!("{}=={version}", package.name),
                _ => package.name.clone(),
            };
            lines.push(line);
        }
    }

    lines
}

/// Render the manifest as a `requirements.txt`-style file body.
pub fn requirements_file(nodes: &[Node], registry: &Registry, pinned: bool) -> String {
    let lines = build_requirements(nodes, registry, pinned);
    if lines.is_empty() {
        String::new()
    } else {
        format!("{}\n", lines.join("\n"))
    }
}
