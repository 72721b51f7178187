//! Construction failure modes, end to end.

use lifewire::{ClassToken, DependencyGraph, GraphError, MetadataRegistry, State};
use lifewire::metadata::ParameterDescriptor;

fn token(name: &str) -> ClassToken {
    ClassToken::named(name)
}

#[test]
fn test_missing_field_dependency_reports_full_chain() {
    // Repo is described but never supplied, and the failure surfaces from
    // two classes away: Handler -> Service -> Repo.
    let mut registry = MetadataRegistry::new();
    registry.class(token("Repo"));
    registry.class(token("Service")).require_field("repo", token("Repo"));
    registry.class(token("Handler")).require_field("service", token("Service"));

    let err = DependencyGraph::build(&registry, [token("Handler"), token("Service")]).unwrap_err();
    assert_eq!(err, GraphError::cyclic(vec![token("Service"), token("Repo")]));
    assert_eq!(err.to_string(), "cyclic reference detected: Service -> Repo");
}

#[test]
fn test_three_class_cycle_chain_closes_on_start() {
    let mut registry = MetadataRegistry::new();
    registry.class(token("A")).require_field("b", token("B"));
    registry.class(token("B")).require_field("c", token("C"));
    registry.class(token("C")).require_field("a", token("A"));

    let err =
        DependencyGraph::build(&registry, [token("A"), token("B"), token("C")]).unwrap_err();
    match err {
        GraphError::CyclicReference {
            chain,
        } => {
            assert_eq!(chain.len(), 4);
            assert_eq!(chain.first(), chain.last());
            for name in ["A", "B", "C"] {
                assert!(chain.contains(&token(name)), "chain should name {name}");
            }
        }
        other => panic!("expected CyclicReference, got {other:?}"),
    }
}

#[test]
fn test_configuration_error_is_not_a_cycle() {
    let mut registry = MetadataRegistry::new();
    registry
        .class(token("worker.Pool"))
        .execute_before("drain", State::Stopped, vec![ParameterDescriptor::bare(token("Timeout"))]);

    let err = DependencyGraph::build(&registry, [token("worker.Pool")]).unwrap_err();
    assert_eq!(
        err,
        GraphError::ConfigurationError {
            method: "worker.Pool#drain(Timeout)".to_string(),
            parameter: 0,
        }
    );
}

#[test]
fn test_unknown_dependency_is_not_coerced_into_a_cycle_chain() {
    let mut registry = MetadataRegistry::new();
    registry.class(token("A")).require_field("ghost", token("Ghost"));

    let err = DependencyGraph::build(&registry, [token("A")]).unwrap_err();
    assert!(matches!(err, GraphError::UnknownDependency { .. }));
    assert_eq!(err.to_string(), "'A' depends on 'Ghost' but no metadata describes that type");
}

#[test]
fn test_failed_build_returns_no_graph() {
    // The error carries everything; there is no partial graph to misuse.
    let mut registry = MetadataRegistry::new();
    registry.class(token("A")).require_field("b", token("B"));
    registry.class(token("B")).require_field("a", token("A"));

    let result: Result<DependencyGraph, GraphError> =
        DependencyGraph::build(&registry, [token("A"), token("B")]);
    assert!(result.is_err());
}
