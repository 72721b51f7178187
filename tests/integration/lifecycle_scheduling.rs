//! Execution hooks and lifecycle state ordering.

use anyhow::Result;
use lifewire::{ClassToken, DependencyGraph, MetadataRegistry, State};
use lifewire::metadata::ParameterDescriptor;

fn token(name: &str) -> ClassToken {
    ClassToken::named(name)
}

#[test]
fn test_hooks_are_filed_under_their_target_states() -> Result<()> {
    let mut registry = MetadataRegistry::new();
    registry
        .class(token("Cache"))
        .execute_before("allocate", State::Initialized, vec![])
        .execute_before("warm", State::Started, vec![])
        .execute("report", vec![])
        .execute_before("flush", State::Stopped, vec![]);

    let graph = DependencyGraph::build(&registry, [token("Cache")])?;
    let cache = graph.node(&token("Cache")).unwrap();

    let fired: Vec<(String, State)> = cache
        .executions()
        .iter()
        .map(|e| (e.method().to_string(), e.fires_at()))
        .collect();
    assert_eq!(
        fired,
        vec![
            ("Cache#allocate()".to_string(), State::Initialized),
            ("Cache#warm()".to_string(), State::Started),
            ("Cache#report()".to_string(), State::Started),
            ("Cache#flush()".to_string(), State::Stopped),
        ]
    );
    Ok(())
}

#[test]
fn test_invoker_can_walk_states_in_order() -> Result<()> {
    // Simulates the out-of-scope state-transition driver: walk the state
    // sequence and collect the hooks that fire at each phase.
    let mut registry = MetadataRegistry::new();
    registry
        .class(token("Db"))
        .execute_before("connect", State::Initialized, vec![])
        .execute_before("disconnect", State::Stopped, vec![]);
    registry
        .class(token("Server"))
        .require_field("db", token("Db"))
        .execute("serve", vec![]);

    let graph = DependencyGraph::build(&registry, [token("Db"), token("Server")])?;

    let mut fired = Vec::new();
    for state in State::sequence() {
        for node in graph.topological_order()? {
            for execution in node.executions() {
                if execution.fires_at() == state {
                    fired.push(execution.method().to_string());
                }
            }
        }
    }
    assert_eq!(fired, vec!["Db#connect()", "Server#serve()", "Db#disconnect()"]);
    Ok(())
}

#[test]
fn test_hook_dependency_states_are_preserved() -> Result<()> {
    let mut registry = MetadataRegistry::new();
    registry.class(token("Journal"));
    registry.class(token("Store")).execute_before(
        "recover",
        State::Resolved,
        vec![ParameterDescriptor::injected(token("Journal"), State::Initialized)],
    );

    let graph = DependencyGraph::build(&registry, [token("Store"), token("Journal")])?;
    let execution = &graph.node(&token("Store")).unwrap().executions()[0];

    assert_eq!(execution.fires_at(), State::Resolved);
    let dependency = execution.dependencies().iter().next().unwrap();
    assert_eq!(dependency.target(), &token("Journal"));
    assert_eq!(dependency.required_state(), State::Initialized);
    Ok(())
}

#[test]
fn test_two_hooks_at_same_state_order_by_dependency_sets() -> Result<()> {
    // Both hooks fire at Started; only their dependency sets distinguish
    // them, and the graph records those sets for the invoker to order by.
    let mut registry = MetadataRegistry::new();
    registry.class(token("Queue"));
    registry
        .class(token("Consumer"))
        .execute("poll", vec![ParameterDescriptor::injected(token("Queue"), State::Started)])
        .execute("heartbeat", vec![]);

    let graph = DependencyGraph::build(&registry, [token("Consumer"), token("Queue")])?;
    let consumer = graph.node(&token("Consumer")).unwrap();

    let poll = &consumer.executions()[0];
    let heartbeat = &consumer.executions()[1];
    assert_eq!(poll.fires_at(), heartbeat.fires_at());
    assert_eq!(poll.dependencies().len(), 1);
    assert!(heartbeat.dependencies().is_empty());
    Ok(())
}
