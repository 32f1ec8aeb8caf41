//! Jupyter notebook (.ipynb) export.
//!
//! Restructures the per-node step blocks into one code cell per step,
//! led by a markdown title cell, in the nbformat 4 interchange shape.

use serde::{Deserialize, Serialize};

use crate::codegen::{collect_imports, step_block};
use crate::error::Result;
use crate::graph::{Edge, Node, topological_sort};
use crate::registry::Registry;

/// A Jupyter notebook.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineNotebook {
    /// Notebook metadata
    pub metadata: NotebookMetadata,

    /// Format version (always 4)
    pub nbformat: u32,

    /// Minor format version
    pub nbformat_minor: u32,

    /// Notebook cells
    pub cells: Vec<NotebookCell>,
}

/// Notebook-level metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotebookMetadata {
    /// Kernel specification
    pub kernelspec: KernelSpec,

    /// Language info
    pub language_info: LanguageInfo,
}

/// Kernel specification.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KernelSpec {
    /// Display name
    pub display_name: String,

    /// Language
    pub language: String,

    /// Kernel name
    pub name: String,
}

/// Language information.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LanguageInfo {
    /// File extension
    pub file_extension: String,

    /// MIME type
    pub mimetype: String,

    /// Language name
    pub name: String,

    /// Version
    pub version: String,
}

/// A notebook cell.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotebookCell {
    /// Cell type: "code" or "markdown"
    pub cell_type: String,

    /// Cell metadata
    pub metadata: CellMetadata,

    /// Cell source (lines)
    pub source: Vec<String>,

    /// Cell outputs (code cells only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub outputs: Option<Vec<serde_json::Value>>,

    /// Execution count (code cells only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub execution_count: Option<u32>,
}

/// Cell metadata. Empty for generated notebooks.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CellMetadata {}

impl Default for NotebookMetadata {
    fn default() -> Self {
        Self {
            kernelspec: KernelSpec {
                display_name: "Python 3".to_string(),
                language: "python".to_string(),
                name: "python3".to_string(),
            },
            language_info: LanguageInfo {
                file_extension: ".py".to_string(),
                mimetype: "text/x-python".to_string(),
                name: "python".to_string(),
                version: "3.11".to_string(),
            },
        }
    }
}

impl PipelineNotebook {
    /// Create a new empty notebook.
    pub fn new() -> Self {
        Self {
            metadata: NotebookMetadata::default(),
            nbformat: 4,
            nbformat_minor: 5,
            cells: Vec::new(),
        }
    }

    /// Serialize the notebook to pretty-printed JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl Default for PipelineNotebook {
    fn default() -> Self {
        Self::new()
    }
}

/// Generator for pipeline notebooks.
pub struct NotebookGenerator {
    execution_count: u32,
}

impl NotebookGenerator {
    /// Create a new generator.
    pub fn new() -> Self {
        Self { execution_count: 1 }
    }

    /// Generate a notebook from the pipeline.
    ///
    /// Cells: a markdown title cell holding the pipeline name and
    /// description, one code cell for the hoisted imports when any
    /// exist, then one code cell per resolved step in sorted order.
    /// Unresolved nodes are excluded exactly as in script generation.
    pub fn generate(
        &mut self,
        nodes: &[Node],
        edges: &[Edge],
        pipeline_name: &str,
        description: Option<&str>,
        registry: &Registry,
    ) -> PipelineNotebook {
        let mut notebook = PipelineNotebook::new();

        let mut title = format!("# {pipeline_name}");
        if let Some(description) = description {
            if !description.is_empty() {
                title.push_str("\n\n");
                title.push_str(description);
            }
        }
        notebook.cells.push(markdown_cell(&title));

        let sorted = topological_sort(nodes, edges);

        let imports = collect_imports(&sorted, registry);
        if !imports.is_empty() {
            notebook.cells.push(self.code_cell(&imports.join("\n")));
        }

        for (index, node) in sorted.iter().enumerate() {
            if let Some(block) = step_block(node, index + 1, registry) {
                notebook.cells.push(self.code_cell(block.trim_end()));
            }
        }

        notebook
    }

    fn code_cell(&mut self, source: &str) -> NotebookCell {
        let execution_count = self.execution_count;
        self.execution_count += 1;

        NotebookCell {
            cell_type: "code".to_string(),
            metadata: CellMetadata::default(),
            source: source_lines(source),
            outputs: Some(Vec::new()),
            execution_count: Some(execution_count),
        }
    }
}

impl Default for NotebookGenerator {
    fn default() -> Self {
        Self::new()
    }
}

/// Export the pipeline as a Jupyter notebook.
pub fn export_notebook(
    nodes: &[Node],
    edges: &[Edge],
    pipeline_name: &str,
    description: Option<&str>,
    registry: &Registry,
) -> PipelineNotebook {
    NotebookGenerator::new().generate(nodes, edges, pipeline_name, description, registry)
}

fn markdown_cell(source: &str) -> NotebookCell {
    NotebookCell {
        cell_type: "markdown".to_string(),
        metadata: CellMetadata::default(),
        source: source_lines(source),
        outputs: None,
        execution_count: None,
    }
}

/// Split source into nbformat line entries, each retaining its newline
/// except the last.
fn source_lines(source: &str) -> Vec<String> {
    let mut lines: Vec<String> = source.lines().map(|line| format!("{line}\n")).collect();
    if let Some(last) = lines.last_mut() {
        if !source.ends_with('\n') {
            last.pop();
        }
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::Component;

    fn test_registry() -> Registry {
        Registry::from_components(vec![Component {
            id: "load".to_string(),
            name: "Load Data".to_string(),
            parameter_specs: Vec::new(),
            code_template: "import pandas as pd\n\ndata = pd.read_csv({file_path})".to_string(),
            package_dependencies: Vec::new(),
        }])
    }

    #[test]
    fn test_empty_notebook_format() {
        let notebook = PipelineNotebook::new();
        assert_eq!(notebook.nbformat, 4);
        assert_eq!(notebook.nbformat_minor, 5);
        assert!(notebook.cells.is_empty());
    }

    #[test]
    fn test_title_cell_leads() {
        let registry = test_registry();
        let notebook = export_notebook(&[], &[], "Churn Model", Some("Predicts churn."), &registry);
        let title = &notebook.cells[0];
        assert_eq!(title.cell_type, "markdown");
        assert_eq!(title.source[0], "# Churn Model\n");
        assert!(title.source.iter().any(|l| l.contains("Predicts churn.")));
        assert!(title.outputs.is_none());
        assert!(title.execution_count.is_none());
    }

    #[test]
    fn test_one_code_cell_per_step() {
        let registry = test_registry();
        let nodes = vec![
            Node::new("n1", "Load Data")
                .with_component("load")
                .with_parameter("file_path", "a.csv"),
            Node::new("n2", "Load Data")
                .with_component("load")
                .with_parameter("file_path", "b.csv"),
        ];
        let edges = vec![Edge::new("n1", "n2")];
        let notebook = export_notebook(&nodes, &edges, "P", None, &registry);

        // Title, imports, two steps.
        assert_eq!(notebook.cells.len(), 4);
        let steps: Vec<&NotebookCell> = notebook.cells[2..].iter().collect();
        assert!(steps.iter().all(|c| c.cell_type == "code"));
        assert_eq!(steps[0].source[0], "# Step 1: Load Data\n");
        assert!(steps[0].source.iter().any(|l| l.contains("'a.csv'")));
        assert_eq!(steps[1].source[0], "# Step 2: Load Data\n");
        assert!(steps[1].source.iter().any(|l| l.contains("'b.csv'")));
    }

    #[test]
    fn test_unresolved_nodes_are_excluded() {
        let registry = test_registry();
        let nodes = vec![Node::new("n1", "Mystery Step")];
        let notebook = export_notebook(&nodes, &[], "P", None, &registry);
        // Only the title cell: no imports, no steps.
        assert_eq!(notebook.cells.len(), 1);
    }

    #[test]
    fn test_serialization_shape() {
        let registry = test_registry();
        let nodes = vec![
            Node::new("n1", "Load Data")
                .with_component("load")
                .with_parameter("file_path", "a.csv"),
        ];
        let notebook = export_notebook(&nodes, &[], "P", None, &registry);
        let json = notebook.to_json().unwrap();
        assert!(json.contains("\"nbformat\": 4"));
        assert!(json.contains("\"cell_type\": \"markdown\""));
        assert!(json.contains("\"cell_type\": \"code\""));
        // Code cells carry outputs and an execution count.
        assert!(json.contains("\"outputs\": []"));
        assert!(json.contains("\"execution_count\": 1"));
    }
}
