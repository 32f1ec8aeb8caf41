//! Input types for the pipeline compiler.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A single parameter value carried by a node.
///
/// Values arrive as JSON scalars and keep their tag; how each variant is
/// rendered into generated code is defined by [`ParamValue::render_literal`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
    /// Boolean flag.
    Bool(bool),
    /// Numeric value. Integers and floats are not distinguished.
    Number(f64),
    /// Free-form text.
    Text(String),
}

impl ParamValue {
    /// Render the value as a literal token in generated Python code.
    ///
    /// Text is single-quoted, booleans become `True`/`False`, numbers use
    /// their shortest decimal form.
    pub fn render_literal(&self) -> String {
        match self {
            ParamValue::Bool(true) => "True".to_string(),
            ParamValue::Bool(false) => "False".to_string(),
            ParamValue::Number(n) => n.to_string(),
            ParamValue::Text(s) => format!("'{s}'"),
        }
    }

    /// Coerce the value to a number the way the generated runtime would:
    /// text parses as a float, booleans coerce to 1/0.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            ParamValue::Number(n) => Some(*n),
            ParamValue::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
            ParamValue::Text(s) => s.trim().parse().ok(),
        }
    }
}

impl From<f64> for ParamValue {
    fn from(n: f64) -> Self {
        ParamValue::Number(n)
    }
}

impl From<bool> for ParamValue {
    fn from(b: bool) -> Self {
        ParamValue::Bool(b)
    }
}

impl From<&str> for ParamValue {
    fn from(s: &str) -> Self {
        ParamValue::Text(s.to_string())
    }
}

/// One step instance in a pipeline.
///
/// Nodes are immutable input: the compiler reads them and never writes
/// them back.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Node {
    /// Unique id within the pipeline.
    pub id: String,

    /// Reference into the component registry. May be absent or stale;
    /// resolution then falls back to an exact name match on `label`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub component_id: Option<String>,

    /// Display text for the step, also the name-fallback key.
    #[serde(default)]
    pub label: String,

    /// Parameter values keyed by parameter name.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub parameters: BTreeMap<String, ParamValue>,
}

impl Node {
    /// Create a node with no component reference and no parameters.
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            component_id: None,
            label: label.into(),
            parameters: BTreeMap::new(),
        }
    }

    /// Set the component reference.
    pub fn with_component(mut self, component_id: impl Into<String>) -> Self {
        self.component_id = Some(component_id.into());
        self
    }

    /// Add a parameter value.
    pub fn with_parameter(mut self, name: impl Into<String>, value: impl Into<ParamValue>) -> Self {
        self.parameters.insert(name.into(), value.into());
        self
    }
}

/// A directed dependency between two nodes.
///
/// Multiple edges between the same pair are permitted and only duplicate
/// the ordering constraint. An edge whose endpoints are not both present
/// in the pipeline is ignored by every algorithm.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Edge {
    /// Id of the upstream node.
    pub source: String,
    /// Id of the downstream node.
    pub target: String,
}

impl Edge {
    /// Create an edge from `source` to `target`.
    pub fn new(source: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
        }
    }
}

/// A user-authored pipeline: nodes in insertion order, edges, metadata.
///
/// Node order is the tie-break order for topological sorting, so it is
/// part of the compiler's deterministic contract.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pipeline {
    /// Display name, used in generated artifact headers.
    #[serde(default = "default_pipeline_name")]
    pub name: String,

    /// Optional longer description, used by the notebook title cell.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Steps in insertion order.
    #[serde(default)]
    pub nodes: Vec<Node>,

    /// Dependencies between steps.
    #[serde(default)]
    pub edges: Vec<Edge>,
}

fn default_pipeline_name() -> String {
    "ML Pipeline".to_string()
}

impl Default for Pipeline {
    fn default() -> Self {
        Self {
            name: default_pipeline_name(),
            description: None,
            nodes: Vec::new(),
            edges: Vec::new(),
        }
    }
}
