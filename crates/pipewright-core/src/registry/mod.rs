//! The immutable component catalog.
//!
//! The registry is loaded once at process start and read-only afterward.
//! It is passed by reference into every compiler entry point; there is no
//! global instance.

use std::fs;
use std::path::Path;

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::graph::Node;

/// The catalog shipped with the crate.
const BUILTIN_CATALOG: &str = include_str!("../../data/components.json");

/// Parameter value kind accepted by a component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ParamKind {
    #[serde(rename = "number")]
    Number,
    #[serde(rename = "string")]
    Text,
    #[serde(rename = "boolean")]
    Boolean,
}

/// One entry of a component's declared parameter schema.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParameterSpec {
    /// Placeholder name used in the code template.
    pub name: String,
    /// Human-readable label used in validation messages.
    pub label: String,
    #[serde(rename = "type")]
    pub kind: ParamKind,
    #[serde(default)]
    pub required: bool,
    /// Lower bound, numbers only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    /// Upper bound, numbers only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
}

/// A package required by a component's template.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PackageDependency {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pinned_version: Option<String>,
}

/// A registry-defined step kind: parameter schema, code template, and the
/// packages the template imports.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Component {
    pub id: String,
    /// Display name, also the name-fallback key for node resolution.
    pub name: String,
    #[serde(default, rename = "parameterSpecs")]
    pub parameter_specs: Vec<ParameterSpec>,
    /// Python source with `{paramName}` placeholders and import lines.
    #[serde(rename = "codeTemplate")]
    pub code_template: String,
    #[serde(default, rename = "packageDependencies")]
    pub package_dependencies: Vec<PackageDependency>,
}

/// The component catalog.
#[derive(Debug, Clone)]
pub struct Registry {
    components: Vec<Component>,
    by_id: FxHashMap<String, usize>,
}

impl Registry {
    /// Build a registry from an in-memory component list.
    pub fn from_components(components: Vec<Component>) -> Self {
        let by_id = components
            .iter()
            .enumerate()
            .map(|(index, component)| (component.id.clone(), index))
            .collect();
        Self { components, by_id }
    }

    /// Parse a catalog from JSON text (an array of components).
    pub fn from_json(json: &str) -> Result<Self> {
        let components: Vec<Component> =
            serde_json::from_str(json).map_err(|e| Error::RegistryLoad {
                path: None,
                message: e.to_string(),
            })?;
        Ok(Self::from_components(components))
    }

    /// Load the catalog from a JSON file.
    ///
    /// Fails fast if the file is missing or malformed so a broken catalog
    /// is caught at startup rather than per request.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| Error::RegistryLoad {
            path: Some(path.display().to_string()),
            message: e.to_string(),
        })?;
        Self::from_json(&content).map_err(|e| match e {
            Error::RegistryLoad { message, .. } => Error::RegistryLoad {
                path: Some(path.display().to_string()),
                message,
            },
            other => other,
        })
    }

    /// The ML component catalog embedded in the crate.
    pub fn builtin() -> Result<Self> {
        Self::from_json(BUILTIN_CATALOG)
    }

    /// Look up a component by id.
    pub fn resolve(&self, component_id: &str) -> Option<&Component> {
        self.by_id.get(component_id).map(|&index| &self.components[index])
    }

    /// Look up a component by declared name; first match wins.
    pub fn resolve_by_name(&self, name: &str) -> Option<&Component> {
        self.components.iter().find(|c| c.name == name)
    }

    /// Resolve the component backing a node: by `componentId`, then by an
    /// exact name match on the label.
    ///
    /// `None` means the node contributes no code and no imports to any
    /// artifact.
    pub fn resolve_node(&self, node: &Node) -> Option<&Component> {
        node.component_id
            .as_deref()
            .and_then(|id| self.resolve(id))
            .or_else(|| self.resolve_by_name(&node.label))
    }

    /// All components in catalog order.
    pub fn components(&self) -> &[Component] {
        &self.components
    }

    /// Number of components in the catalog.
    pub fn len(&self) -> usize {
        self.components.len()
    }

    /// Whether the catalog is empty.
    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }
}
