//! Realistic application wiring scenarios.

use anyhow::Result;
use lifewire::{ClassToken, DependencyGraph, MetadataRegistry, State};
use lifewire::metadata::ParameterDescriptor;

/// A small but realistic application: config at the bottom, a connection
/// pool and logger above it, services on top, and a metrics sink dragged in
/// on demand by a lifecycle hook.
fn application_registry() -> (MetadataRegistry, Vec<ClassToken>) {
    let config = ClassToken::named("app.Config");
    let logger = ClassToken::named("app.Logger");
    let pool = ClassToken::named("db.ConnectionPool");
    let users = ClassToken::named("svc.UserService");
    let server = ClassToken::named("web.Server");
    let metrics = ClassToken::named("obs.Metrics");

    let mut registry = MetadataRegistry::new();
    registry.class(config.clone());
    registry.class(logger.clone()).require_field("config", config.clone());
    registry
        .class(pool.clone())
        .require_field("config", config.clone())
        .execute_before("connect", State::Initialized, vec![]);
    registry
        .class(users.clone())
        .require_field("pool", pool.clone())
        .require_field("logger", logger.clone());
    registry
        .class(server.clone())
        .require_field("users", users.clone())
        .execute("serve", vec![ParameterDescriptor::injected(metrics.clone(), State::Started)]);
    registry.class(metrics.clone()).require_field("logger", logger.clone());

    let initial = vec![config, logger, pool, users, server];
    (registry, initial)
}

#[test]
fn test_application_graph_builds_completely() -> Result<()> {
    let (registry, initial) = application_registry();
    let graph = DependencyGraph::build(&registry, initial)?;

    // Five supplied classes plus the on-demand metrics sink.
    assert_eq!(graph.node_count(), 6);
    assert!(graph.node(&ClassToken::named("obs.Metrics")).is_some());

    // The on-demand node got its own field wiring resolved.
    let metrics = graph.node(&ClassToken::named("obs.Metrics")).unwrap();
    assert_eq!(metrics.dependencies().len(), 1);
    Ok(())
}

#[test]
fn test_topological_order_puts_config_first_and_server_last() -> Result<()> {
    let (registry, initial) = application_registry();
    let graph = DependencyGraph::build(&registry, initial)?;

    let order: Vec<String> = graph
        .topological_order()?
        .into_iter()
        .map(|node| node.class().name().to_string())
        .collect();

    assert_eq!(order.first().map(String::as_str), Some("app.Config"));
    let position = |name: &str| order.iter().position(|c| c == name).unwrap();
    assert!(position("db.ConnectionPool") < position("svc.UserService"));
    assert!(position("svc.UserService") < position("web.Server"));
    Ok(())
}

#[test]
fn test_rebuilding_yields_identical_graphs() -> Result<()> {
    let (registry, initial) = application_registry();
    let first = DependencyGraph::build(&registry, initial.clone())?;
    let second = DependencyGraph::build(&registry, initial)?;

    let first_nodes: Vec<_> = first.nodes().cloned().collect();
    let second_nodes: Vec<_> = second.nodes().cloned().collect();
    assert_eq!(first_nodes, second_nodes);
    Ok(())
}

#[test]
fn test_tree_rendering_for_diagnostics() -> Result<()> {
    let (registry, initial) = application_registry();
    let graph = DependencyGraph::build(&registry, initial)?;

    let tree = graph.to_tree_string(&ClassToken::named("web.Server"));
    assert!(tree.starts_with("└── web.Server\n"));
    assert!(tree.contains("svc.UserService [resolved]"));
    assert!(tree.contains("app.Config [resolved]"));
    Ok(())
}

#[test]
fn test_graph_reads_are_shareable_across_threads() -> Result<()> {
    // Post-build the graph is read-only; the external invoker may fan out
    // over independent subtrees in parallel.
    let (registry, initial) = application_registry();
    let graph = std::sync::Arc::new(DependencyGraph::build(&registry, initial)?);

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let graph = std::sync::Arc::clone(&graph);
            std::thread::spawn(move || {
                graph.nodes().map(|node| node.dependencies().len()).sum::<usize>()
            })
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().unwrap(), graph.edge_count());
    }
    Ok(())
}
