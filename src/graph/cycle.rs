//! Cycle detection and topological ordering over the realized graph.
//!
//! Runs after the wiring pass has produced the full field-dependency edge
//! set. Detection is an explicit three-color DFS over a [`petgraph`]
//! directed graph: any strongly connected component of size greater than
//! one, and any self-loop, is reported as a
//! [`GraphError::CyclicReference`] carrying the closing cycle path. This is
//! deliberately stronger than lazy lookup-time detection, which only fires
//! when resolution order happens to touch an unregistered class.
//!
//! Execution parameter dependencies are not edges here: they are
//! preconditions on hook invocation, ordered by lifecycle state, not
//! construction prerequisites between nodes.

use petgraph::algo::toposort;
use petgraph::graph::{DiGraph, NodeIndex};
use std::collections::HashMap;

use crate::core::{ClassToken, GraphError};
use crate::graph::{DependencyGraph, DependencyNode};

/// Color states for cycle detection using DFS.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Color {
    /// Node has not been visited.
    White,
    /// Node is currently being visited (in the DFS stack).
    Gray,
    /// Node has been fully visited.
    Black,
}

/// The field-dependency edge set lifted into a petgraph structure.
struct Realized<'a> {
    graph: DiGraph<&'a ClassToken, ()>,
    index_of: HashMap<&'a ClassToken, NodeIndex>,
}

impl<'a> Realized<'a> {
    fn ensure(&mut self, class: &'a ClassToken) -> NodeIndex {
        if let Some(&index) = self.index_of.get(class) {
            index
        } else {
            let index = self.graph.add_node(class);
            self.index_of.insert(class, index);
            index
        }
    }
}

fn realize(graph: &DependencyGraph) -> Realized<'_> {
    let mut realized = Realized {
        graph: DiGraph::new(),
        index_of: HashMap::new(),
    };

    // Index every registered node first so edge targets are always known.
    for node in graph.nodes() {
        realized.ensure(node.class());
    }
    for node in graph.nodes() {
        let from = realized.ensure(node.class());
        for dependency in node.dependencies() {
            let to = realized.ensure(dependency.target());
            if !realized.graph.contains_edge(from, to) {
                realized.graph.add_edge(from, to, ());
            }
        }
    }

    realized
}

/// Reject any cycle in the realized field-dependency graph.
///
/// Returns the first cycle found as a [`GraphError::CyclicReference`] whose
/// chain is the cycle path with the starting class repeated at the end.
pub(crate) fn check(graph: &DependencyGraph) -> Result<(), GraphError> {
    let realized = realize(graph);

    let mut colors: HashMap<NodeIndex, Color> = HashMap::new();
    for node in realized.graph.node_indices() {
        colors.insert(node, Color::White);
    }

    let mut path: Vec<ClassToken> = Vec::new();
    for node in realized.graph.node_indices() {
        if matches!(colors.get(&node), Some(Color::White))
            && let Some(chain) = dfs_visit(&realized.graph, node, &mut colors, &mut path)
        {
            return Err(GraphError::cyclic(chain));
        }
    }

    Ok(())
}

/// DFS visit for cycle detection.
///
/// Returns `Some(cycle_path)` if a cycle is detected, `None` otherwise.
fn dfs_visit(
    graph: &DiGraph<&ClassToken, ()>,
    node: NodeIndex,
    colors: &mut HashMap<NodeIndex, Color>,
    path: &mut Vec<ClassToken>,
) -> Option<Vec<ClassToken>> {
    colors.insert(node, Color::Gray);
    path.push((*graph[node]).clone());

    for neighbor in graph.neighbors(node) {
        match colors.get(&neighbor) {
            Some(Color::Gray) => {
                // Found a cycle - find where it starts in the path.
                let cycle_start = path.iter().position(|c| c == graph[neighbor]).unwrap_or(0);
                let mut chain = path[cycle_start..].to_vec();
                // Repeat the starting class so the chain closes.
                chain.push((*graph[neighbor]).clone());
                return Some(chain);
            }
            Some(Color::White) => {
                if let Some(chain) = dfs_visit(graph, neighbor, colors, path) {
                    return Some(chain);
                }
            }
            _ => {}
        }
    }

    path.pop();
    colors.insert(node, Color::Black);
    None
}

/// Nodes in dependency-first order.
///
/// All prerequisites of a node appear before it. Checks for cycles first,
/// so the toposort itself cannot fail on a graph that passed [`check`].
pub(crate) fn topological_order(graph: &DependencyGraph) -> Result<Vec<&DependencyNode>, GraphError> {
    check(graph)?;

    let realized = realize(graph);
    match toposort(&realized.graph, None) {
        Ok(indices) => {
            // Reverse so dependencies come before their dependents.
            Ok(indices
                .into_iter()
                .rev()
                .filter_map(|index| graph.node(realized.graph[index]))
                .collect())
        }
        Err(cycle) => {
            // Unreachable once check() has passed.
            let class = (*realized.graph[cycle.node_id()]).clone();
            Err(GraphError::cyclic(vec![class.clone(), class]))
        }
    }
}
