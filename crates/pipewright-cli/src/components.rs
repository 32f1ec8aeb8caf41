//! `pipewright components` - list the component catalog.

use pipewright_core::Registry;

/// Print the catalog: id, name, and declared parameters.
pub fn execute(registry: &Registry) {
    for component in registry.components() {
        println!("{}  ({})", component.id, component.name);
        for spec in &component.parameter_specs {
            let mut detail = format!("{:?}", spec.kind).to_lowercase();
            if spec.required {
                detail.push_str(", required");
            }
            if let Some(min) = spec.min {
                detail.push_str(&format!(", min {min}"));
            }
            if let Some(max) = spec.max {
                detail.push_str(&format!(", max {max}"));
            }
            println!("    {} - {} [{detail}]", spec.name, spec.label);
        }
    }
}
