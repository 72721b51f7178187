//! Dependency graph construction.
//!
//! This module owns the central data structure of the crate: a directed
//! graph with one [`DependencyNode`] per participating class, field-level
//! [`Dependency`] edges between nodes, and [`Execution`] hooks filed
//! against the lifecycle state at which they run.
//!
//! # Build phases
//!
//! [`DependencyGraph::build`] runs three phases:
//!
//! 1. **Registration** — one empty node per input class, so mutually
//!    dependent classes can reference each other regardless of input order.
//! 2. **Wiring** (`inject`) — a worklist pass over the live, possibly
//!    growing node collection. For each node exactly once: injectable
//!    fields are resolved *strictly* (the target must already be
//!    registered), hook methods are turned into executions whose parameters
//!    are resolved *permissively* (unknown types become new nodes and join
//!    the worklist). The strict/permissive asymmetry lets mutually
//!    referential hook parameters bootstrap new nodes while still catching
//!    dangling field wiring.
//! 3. **Cycle check** — an explicit DFS over the realized field-dependency
//!    edge set rejects every strongly connected component of size greater
//!    than one and every self-loop. See [`cycle`].
//!
//! Any failure in any phase aborts the build; no partial graph escapes.
//! After a successful build the graph is read-only, so concurrent reads by
//! a parallel state-transition driver are safe.
//!
//! # Examples
//!
//! ```rust
//! use lifewire::core::ClassToken;
//! use lifewire::graph::DependencyGraph;
//! use lifewire::metadata::{MetadataRegistry, ParameterDescriptor};
//! use lifewire::State;
//!
//! let database = ClassToken::named("Database");
//! let server = ClassToken::named("Server");
//! let metrics = ClassToken::named("Metrics");
//!
//! let mut registry = MetadataRegistry::new();
//! registry.class(database.clone());
//! registry
//!     .class(server.clone())
//!     .inject_field("db", database.clone(), State::Resolved)
//!     .execute("serve", vec![ParameterDescriptor::required(metrics.clone())]);
//!
//! let graph = DependencyGraph::build(&registry, [database, server]).unwrap();
//!
//! // Metrics was created on demand for the hook parameter.
//! assert_eq!(graph.node_count(), 3);
//! ```

use std::collections::hash_map::Entry;
use std::collections::{BTreeSet, HashMap};

use crate::core::{ClassToken, GraphError};
use crate::metadata::{HookMarker, MetadataScanner};
use crate::state::State;

pub mod cycle;
pub mod node;

pub use node::{Dependency, DependencyNode, Execution};

/// Directed graph of construction and initialization dependencies.
///
/// Exclusive owner of all [`DependencyNode`]s, keyed by [`ClassToken`].
/// Nodes are created lazily, exactly once per token, and the registry
/// preserves insertion order so iteration and rebuilds are deterministic.
#[derive(Debug, Clone, Default)]
pub struct DependencyGraph {
    nodes: HashMap<ClassToken, DependencyNode>,
    /// Insertion order of `nodes`; doubles as the wiring worklist.
    order: Vec<ClassToken>,
}

impl DependencyGraph {
    /// Create an empty graph.
    ///
    /// Most callers want [`DependencyGraph::build`]; `new` exists for
    /// incremental assembly in tests and tooling.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the graph for the given classes using the scanner's metadata.
    ///
    /// # Errors
    ///
    /// - [`GraphError::CyclicReference`] if a field dependency cannot be
    ///   strictly resolved, or the realized graph contains a cycle.
    /// - [`GraphError::ConfigurationError`] if a hook parameter lacks an
    ///   inject marker.
    /// - [`GraphError::UnknownDependency`] if a field depends on a type the
    ///   scanner cannot describe at all.
    pub fn build<S: MetadataScanner>(
        scanner: &S,
        classes: impl IntoIterator<Item = ClassToken>,
    ) -> Result<Self, GraphError> {
        let mut graph = Self::new();
        for class in classes {
            graph.get_or_create(&class);
        }
        tracing::debug!("registered {} classes for injection", graph.order.len());

        graph.inject(scanner)?;
        cycle::check(&graph)?;

        tracing::debug!(
            "dependency graph built: {} nodes, {} edges",
            graph.node_count(),
            graph.edge_count()
        );
        Ok(graph)
    }

    /// Return the node for this class, registering an empty one on first
    /// sight. Idempotent; never fails. This is the permissive resolution
    /// path.
    pub fn get_or_create(&mut self, class: &ClassToken) -> &mut DependencyNode {
        match self.nodes.entry(class.clone()) {
            Entry::Occupied(entry) => entry.into_mut(),
            Entry::Vacant(entry) => {
                tracing::debug!("registering dependency node for '{class}'");
                self.order.push(class.clone());
                entry.insert(DependencyNode::new(class.clone()))
            }
        }
    }

    /// Return the node for this class, failing if it is not registered.
    ///
    /// This is the strict resolution path: absence at lookup time means
    /// resolution reached a class nobody registered, which surfaces as a
    /// [`GraphError::CyclicReference`] whose chain starts at the missing
    /// class and grows as the error propagates outward.
    pub fn get(&self, class: &ClassToken) -> Result<&DependencyNode, GraphError> {
        self.nodes.get(class).ok_or_else(|| GraphError::cyclic(vec![class.clone()]))
    }

    /// Non-failing lookup for post-build consumers.
    pub fn node(&self, class: &ClassToken) -> Option<&DependencyNode> {
        self.nodes.get(class)
    }

    /// All registered nodes, in registration order.
    ///
    /// The order carries no dependency semantics; consumers that need
    /// prerequisites first use [`DependencyGraph::topological_order`].
    pub fn nodes(&self) -> impl Iterator<Item = &DependencyNode> {
        self.order.iter().filter_map(|class| self.nodes.get(class))
    }

    /// Number of registered nodes.
    pub fn node_count(&self) -> usize {
        self.order.len()
    }

    /// Total number of field-dependency edges.
    pub fn edge_count(&self) -> usize {
        self.nodes.values().map(|node| node.dependencies().len()).sum()
    }

    /// Whether the graph has no nodes.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Nodes in dependency-first order: every prerequisite appears before
    /// its dependents.
    pub fn topological_order(&self) -> Result<Vec<&DependencyNode>, GraphError> {
        cycle::topological_order(self)
    }

    /// Render the dependency tree below `root` as indented text, with each
    /// edge annotated by its required state. Repeat visits of a shared
    /// dependency are marked instead of re-expanded.
    pub fn to_tree_string(&self, root: &ClassToken) -> String {
        let mut result = String::new();
        let mut visited = BTreeSet::new();
        self.render_subtree(root, None, &mut result, "", true, &mut visited);
        result
    }

    fn render_subtree(
        &self,
        class: &ClassToken,
        via: Option<State>,
        result: &mut String,
        prefix: &str,
        is_last: bool,
        visited: &mut BTreeSet<ClassToken>,
    ) {
        let connector = if is_last {
            "└── "
        } else {
            "├── "
        };
        let label = match via {
            Some(state) => format!("{class} [{state}]"),
            None => class.to_string(),
        };
        result.push_str(&format!("{prefix}{connector}{label}\n"));

        let child_prefix = if is_last {
            format!("{prefix}    ")
        } else {
            format!("{prefix}│   ")
        };

        if !visited.insert(class.clone()) {
            result.push_str(&format!("{child_prefix}└── (repeated)\n"));
            return;
        }

        let dependencies: Vec<&Dependency> = self
            .node(class)
            .map(|node| node.dependencies().iter().collect())
            .unwrap_or_default();
        for (i, dependency) in dependencies.iter().enumerate() {
            self.render_subtree(
                dependency.target(),
                Some(dependency.required_state()),
                result,
                &child_prefix,
                i == dependencies.len() - 1,
                visited,
            );
        }
    }

    /// Phase 2: resolve fields and schedule executions for every node.
    ///
    /// Walks the registration order as a worklist. Nodes created on demand
    /// by hook parameters are appended to the order and picked up later in
    /// the same pass, so each node is resolved exactly once.
    fn inject<S: MetadataScanner>(&mut self, scanner: &S) -> Result<(), GraphError> {
        let mut cursor = 0;
        while cursor < self.order.len() {
            let class = self.order[cursor].clone();
            cursor += 1;

            let field_dependencies = self.resolve_fields(scanner, &class)?;
            tracing::debug!(
                "resolved {} field dependencies for '{class}'",
                field_dependencies.len()
            );

            let mut executions = Vec::new();
            for method in scanner.methods(&class) {
                let Some(hook) = method.hook else {
                    continue;
                };
                let fires_at = match hook {
                    HookMarker::Execute => State::EXECUTE_DEFAULT,
                    HookMarker::ExecuteBefore(state) => state,
                };

                let mut dependencies = BTreeSet::new();
                for (index, parameter) in method.parameters.iter().enumerate() {
                    let Some(required) = parameter.inject else {
                        return Err(GraphError::ConfigurationError {
                            method: method.qualified_name(&class),
                            parameter: index,
                        });
                    };
                    // Permissive path: an unknown parameter type becomes a
                    // new node and joins the worklist.
                    self.get_or_create(&parameter.declared_type);
                    dependencies.insert(Dependency::new(parameter.declared_type.clone(), required));
                }

                // A hook also waits on its class's own field dependencies.
                dependencies.extend(field_dependencies.iter().cloned());

                let signature = method.qualified_name(&class);
                tracing::debug!("scheduled '{signature}' at state '{fires_at}'");
                executions.push(Execution::new(signature, fires_at, dependencies));
            }

            if let Some(node) = self.nodes.get_mut(&class) {
                node.install(field_dependencies, executions);
            }
        }
        Ok(())
    }

    /// Resolve a class's injectable fields through the strict path.
    fn resolve_fields<S: MetadataScanner>(
        &self,
        scanner: &S,
        class: &ClassToken,
    ) -> Result<BTreeSet<Dependency>, GraphError> {
        let mut dependencies = BTreeSet::new();
        for field in scanner.fields(class) {
            let Some(required) = field.inject else {
                continue;
            };
            match self.get(&field.declared_type) {
                Ok(target) => {
                    dependencies.insert(Dependency::new(target.class().clone(), required));
                }
                Err(_) if !scanner.knows(&field.declared_type) => {
                    return Err(GraphError::UnknownDependency {
                        dependency: field.declared_type.clone(),
                        required_by: class.clone(),
                    });
                }
                Err(err) => return Err(err.implicate(class.clone())),
            }
        }
        Ok(dependencies)
    }
}
