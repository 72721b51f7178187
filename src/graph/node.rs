//! Node, edge, and execution records.
//!
//! These are the value types the graph is made of. They are mutated only
//! while [`DependencyGraph::build`](crate::graph::DependencyGraph::build)
//! runs; afterwards the graph hands out shared references only, so the
//! whole structure is safe for concurrent reads by the state-transition
//! driver.

use std::collections::BTreeSet;
use std::fmt;

use crate::core::ClassToken;
use crate::state::State;

/// A dependency edge: the target class must have reached the required
/// state before the dependent can proceed.
///
/// Equality and ordering are structural on `(target, state)`, so a
/// `BTreeSet<Dependency>` deduplicates repeated declarations and iterates
/// deterministically.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct Dependency {
    target: ClassToken,
    state: State,
}

impl Dependency {
    pub(crate) fn new(target: ClassToken, state: State) -> Self {
        Self {
            target,
            state,
        }
    }

    /// The class this edge points at.
    pub fn target(&self) -> &ClassToken {
        &self.target
    }

    /// The state the target must have reached.
    pub fn required_state(&self) -> State {
        self.state
    }
}

impl fmt::Display for Dependency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{}]", self.target, self.state)
    }
}

/// A lifecycle hook scheduled against a node.
///
/// Fires when the graph reaches [`Execution::fires_at`]. Its dependency set
/// covers both the hook's own parameters and the declaring class's field
/// dependencies, so the invoker can check a single set before running it.
/// Two hooks with the same target state may fire in any relative order
/// unless their dependency sets impose one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Execution {
    method: String,
    fires_at: State,
    dependencies: BTreeSet<Dependency>,
}

impl Execution {
    pub(crate) fn new(method: String, fires_at: State, dependencies: BTreeSet<Dependency>) -> Self {
        Self {
            method,
            fires_at,
            dependencies,
        }
    }

    /// Qualified signature of the hook method.
    pub fn method(&self) -> &str {
        &self.method
    }

    /// The state at which the hook fires.
    pub fn fires_at(&self) -> State {
        self.fires_at
    }

    /// The hook's resolved dependencies: parameters plus the declaring
    /// class's own field dependencies.
    pub fn dependencies(&self) -> &BTreeSet<Dependency> {
        &self.dependencies
    }
}

/// One node per participating class.
///
/// Created lazily, exactly once per [`ClassToken`]; holds the class's
/// outgoing field-dependency edges and the executions scheduled against it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DependencyNode {
    class: ClassToken,
    dependencies: BTreeSet<Dependency>,
    executions: Vec<Execution>,
}

impl DependencyNode {
    pub(crate) fn new(class: ClassToken) -> Self {
        Self {
            class,
            dependencies: BTreeSet::new(),
            executions: Vec::new(),
        }
    }

    /// The class this node stands for.
    pub fn class(&self) -> &ClassToken {
        &self.class
    }

    /// The node's field-dependency edges.
    pub fn dependencies(&self) -> &BTreeSet<Dependency> {
        &self.dependencies
    }

    /// The lifecycle hooks registered against this node.
    pub fn executions(&self) -> &[Execution] {
        &self.executions
    }

    pub(crate) fn install(&mut self, dependencies: BTreeSet<Dependency>, executions: Vec<Execution>) {
        self.dependencies = dependencies;
        self.executions = executions;
    }
}
