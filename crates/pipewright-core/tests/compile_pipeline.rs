//! Integration tests for the full compile path.
//!
//! Exercises validation, ordering, generation, and every exporter
//! against the shipped component catalog.

use pipewright_core::{
    DockerOptions, Edge, Node, Registry, ScriptOptions, build_requirements, export_docker,
    export_notebook, export_script, generate_script, topological_sort, validate,
};

// =============================================================================
// Test Helpers
// =============================================================================

/// A four-step classification pipeline over the builtin catalog.
fn classification_pipeline() -> (Vec<Node>, Vec<Edge>) {
    let nodes = vec![
        Node::new("n1", "Load CSV Data")
            .with_component("load_csv")
            .with_parameter("file_path", "churn.csv"),
        Node::new("n2", "Select Features")
            .with_component("select_features")
            .with_parameter("target_column", "churned"),
        Node::new("n3", "Train/Test Split")
            .with_component("train_test_split")
            .with_parameter("test_size", 0.2)
            .with_parameter("random_state", 42.0),
        Node::new("n4", "Logistic Regression")
            .with_component("logistic_regression")
            .with_parameter("C", 1.0)
            .with_parameter("max_iter", 1000.0),
    ];
    let edges = vec![
        Edge::new("n1", "n2"),
        Edge::new("n2", "n3"),
        Edge::new("n3", "n4"),
    ];
    (nodes, edges)
}

fn node_ids(nodes: &[Node]) -> Vec<&str> {
    nodes.iter().map(|n| n.id.as_str()).collect()
}

fn registry() -> Registry {
    Registry::builtin().expect("builtin catalog must load")
}

// =============================================================================
// Sorting and validation
// =============================================================================

#[test]
fn acyclic_sort_is_a_permutation_respecting_edges() {
    let (nodes, edges) = classification_pipeline();
    let sorted = topological_sort(&nodes, &edges);

    assert_eq!(sorted.len(), nodes.len());
    for edge in &edges {
        let source = sorted.iter().position(|n| n.id == edge.source).unwrap();
        let target = sorted.iter().position(|n| n.id == edge.target).unwrap();
        assert!(source < target, "{} must sort before {}", edge.source, edge.target);
    }
}

#[test]
fn simple_chain_sorts_in_order_and_validates_clean() {
    let nodes = vec![Node::new("a", "A"), Node::new("b", "B"), Node::new("c", "C")];
    let edges = vec![Edge::new("a", "b"), Edge::new("b", "c")];

    assert_eq!(node_ids(&topological_sort(&nodes, &edges)), vec!["a", "b", "c"]);

    let result = validate(&nodes, &edges, &registry());
    assert!(result.errors.is_empty());
    assert!(result.warnings.is_empty());
}

#[test]
fn two_node_cycle_reports_error_and_sorts_empty() {
    let nodes = vec![Node::new("a", "A"), Node::new("b", "B")];
    let edges = vec![Edge::new("a", "b"), Edge::new("b", "a")];

    let result = validate(&nodes, &edges, &registry());
    assert_eq!(result.errors.len(), 1);
    assert!(result.errors[0].contains("cycles"));

    assert!(topological_sort(&nodes, &edges).is_empty());
}

#[test]
fn cyclic_graph_sort_is_shorter_than_node_set() {
    let nodes = vec![
        Node::new("a", "A"),
        Node::new("b", "B"),
        Node::new("c", "C"),
        Node::new("d", "D"),
    ];
    // a feeds a b<->c cycle; d is downstream of the cycle.
    let edges = vec![
        Edge::new("a", "b"),
        Edge::new("b", "c"),
        Edge::new("c", "b"),
        Edge::new("c", "d"),
    ];

    let result = validate(&nodes, &edges, &registry());
    assert!(result.errors.iter().any(|e| e.contains("cycles")));

    let sorted = topological_sort(&nodes, &edges);
    assert!(sorted.len() < nodes.len());
    assert_eq!(node_ids(&sorted), vec!["a"]);
}

#[test]
fn empty_pipeline_validates_with_single_error() {
    let result = validate(&[], &[], &registry());
    assert_eq!(result.errors, vec!["Pipeline is empty"]);
    assert!(result.warnings.is_empty());
}

#[test]
fn out_of_bound_parameter_names_the_violated_bound() {
    let nodes = vec![
        Node::new("n1", "Train/Test Split")
            .with_component("train_test_split")
            .with_parameter("test_size", 5.0)
            .with_parameter("random_state", 42.0),
    ];
    let result = validate(&nodes, &[], &registry());
    assert_eq!(result.errors, vec!["Test Size must be <= 1"]);
}

#[test]
fn catalog_parameters_validate_against_declared_specs() {
    let (nodes, edges) = classification_pipeline();
    let result = validate(&nodes, &edges, &registry());
    assert!(result.is_ok(), "unexpected errors: {:?}", result.errors);
    assert!(result.warnings.is_empty());
}

// =============================================================================
// Generation
// =============================================================================

#[test]
fn generate_is_deterministic() {
    let (nodes, edges) = classification_pipeline();
    let registry = registry();
    let first = generate_script(&nodes, &edges, "Churn Model", &registry);
    let second = generate_script(&nodes, &edges, "Churn Model", &registry);
    assert_eq!(first, second);
}

#[test]
fn empty_pipeline_generates_placeholder_script() {
    let script = generate_script(&[], &[], "Churn Model", &registry());
    assert!(script.starts_with("# No nodes in pipeline"));
}

#[test]
fn generated_script_substitutes_parameters_in_sorted_order() {
    let (nodes, edges) = classification_pipeline();
    let script = generate_script(&nodes, &edges, "Churn Model", &registry());

    assert!(script.contains("data = pd.read_csv('churn.csv')"));
    assert!(script.contains("test_size=0.2, random_state=42"));
    assert!(script.contains("LogisticRegression(C=1, max_iter=1000)"));

    let load_at = script.find("# Step 1: Load CSV Data").unwrap();
    let fit_at = script.find("# Step 4: Logistic Regression").unwrap();
    assert!(load_at < fit_at);

    // The f-string inside the load template survives substitution.
    assert!(script.contains("{data.shape[0]}"));
}

// =============================================================================
// Exporters
// =============================================================================

#[test]
fn script_export_matches_generator_and_derives_filename() {
    let (nodes, edges) = classification_pipeline();
    let registry = registry();
    let artifact = export_script(
        &nodes,
        &edges,
        "Churn Model",
        &registry,
        &ScriptOptions::default(),
    );
    assert_eq!(artifact.filename, "churn_model.py");
    assert_eq!(
        artifact.script,
        generate_script(&nodes, &edges, "Churn Model", &registry)
    );
}

#[test]
fn notebook_export_produces_cell_per_step() {
    let (nodes, edges) = classification_pipeline();
    let notebook = export_notebook(
        &nodes,
        &edges,
        "Churn Model",
        Some("Predicts customer churn."),
        &registry(),
    );

    assert_eq!(notebook.nbformat, 4);
    assert_eq!(notebook.cells[0].cell_type, "markdown");
    // Title + imports + four steps.
    assert_eq!(notebook.cells.len(), 6);
    assert!(notebook.cells[1..].iter().all(|c| c.cell_type == "code"));
}

#[test]
fn requirements_have_no_duplicate_packages() {
    let (nodes, _) = classification_pipeline();
    let registry = registry();

    let pinned = build_requirements(&nodes, &registry, true);
    let mut names: Vec<&str> = pinned
        .iter()
        .map(|line| line.split("==").next().unwrap())
        .collect();
    let total = names.len();
    names.sort_unstable();
    names.dedup();
    assert_eq!(names.len(), total, "duplicate package in {pinned:?}");
    assert!(pinned.iter().all(|line| line.matches("==").count() == 1));

    let unpinned = build_requirements(&nodes, &registry, false);
    assert!(unpinned.iter().all(|line| !line.contains("==")));
}

#[test]
fn docker_export_bundles_script_and_requirements() {
    let (nodes, edges) = classification_pipeline();
    let bundle = export_docker(
        &nodes,
        &edges,
        "Churn Model",
        &registry(),
        &DockerOptions::default(),
    );

    assert_eq!(bundle.base_image, "python:3.11-slim");
    assert!(bundle.dockerfile.contains("COPY churn_model.py ."));
    assert!(bundle.requirements.contains("scikit-learn==1.3.2"));
    assert!(bundle.script.script.contains("def run_ml_pipeline():"));
}

// =============================================================================
// Degraded inputs
// =============================================================================

#[test]
fn unresolved_nodes_are_dropped_from_every_artifact() {
    let registry = registry();
    let nodes = vec![
        Node::new("n1", "Load CSV Data")
            .with_component("load_csv")
            .with_parameter("file_path", "a.csv"),
        Node::new("n2", "Some Custom Step").with_component("no_such_component"),
    ];
    let edges = vec![Edge::new("n1", "n2")];

    let script = generate_script(&nodes, &edges, "P", &registry);
    assert!(!script.contains("Some Custom Step"));

    let notebook = export_notebook(&nodes, &edges, "P", None, &registry);
    assert!(
        notebook
            .cells
            .iter()
            .all(|c| !c.source.concat().contains("Some Custom Step"))
    );

    let requirements = build_requirements(&nodes, &registry, true);
    assert_eq!(requirements, vec!["pandas==2.1.4"]);
}

#[test]
fn stale_component_id_falls_back_to_label() {
    let registry = registry();
    let nodes = vec![
        Node::new("n1", "Load CSV Data")
            .with_component("load_csv_v0")
            .with_parameter("file_path", "a.csv"),
    ];
    let script = generate_script(&nodes, &[], "P", &registry);
    assert!(script.contains("data = pd.read_csv('a.csv')"));
}
