//! Error handling for graph construction.
//!
//! Every failure mode of [`DependencyGraph::build`](crate::graph::DependencyGraph::build)
//! maps to one variant of [`GraphError`]. The taxonomy separates three very
//! different situations that a container author needs to tell apart:
//!
//! - [`GraphError::CyclicReference`] — a genuine wiring problem: a strict
//!   dependency lookup missed, or the realized graph contains a cycle. The
//!   error carries the ordered chain of implicated classes rather than a
//!   nest of wrapped causes, so callers can render or inspect the chain
//!   directly.
//! - [`GraphError::ConfigurationError`] — malformed input metadata: a
//!   lifecycle hook declares a parameter without an inject marker. This is
//!   never a cycle; it means the class metadata itself must be fixed.
//! - [`GraphError::UnknownDependency`] — a declared dependency names a type
//!   the metadata scanner cannot describe at all, as opposed to one that is
//!   merely not registered yet.
//!
//! All construction errors abort the entire build; no partial graph is
//! returned.

use crate::core::ClassToken;
use thiserror::Error;

fn format_chain(chain: &[ClassToken]) -> String {
    chain.iter().map(ClassToken::name).collect::<Vec<_>>().join(" -> ")
}

/// Errors raised while constructing a dependency graph.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GraphError {
    /// A dependency could not be strictly resolved, or the realized graph
    /// contains a dependency cycle.
    ///
    /// The chain lists the implicated classes in order. For a strict lookup
    /// miss the chain runs from the outermost requiring class down to the
    /// unresolvable target; for a detected cycle the chain is the cycle path
    /// with the starting class repeated at the end.
    #[error("cyclic reference detected: {}", format_chain(.chain))]
    CyclicReference {
        /// Ordered list of implicated classes.
        chain: Vec<ClassToken>,
    },

    /// A lifecycle hook method has a parameter without an inject marker.
    #[error("method '{method}' has no inject marker on parameter #{parameter}")]
    ConfigurationError {
        /// Qualified method signature, e.g. `app.Server#start(Database)`.
        method: String,
        /// Zero-based index of the unmarked parameter.
        parameter: usize,
    },

    /// A declared dependency names a type the metadata scanner cannot
    /// describe at all.
    #[error("'{required_by}' depends on '{dependency}' but no metadata describes that type")]
    UnknownDependency {
        /// The type nobody can describe.
        dependency: ClassToken,
        /// The class whose field or parameter declared the dependency.
        required_by: ClassToken,
    },
}

impl GraphError {
    /// Shorthand for a cyclic-reference error over the given chain.
    pub fn cyclic(chain: Vec<ClassToken>) -> Self {
        Self::CyclicReference {
            chain,
        }
    }

    /// Prepend a newly-implicated class to a cyclic-reference chain.
    ///
    /// As resolution failures propagate outward, each frame adds the class
    /// it was resolving, so the final error names the full path from the
    /// original request down to the unresolvable target. Other variants
    /// pass through unchanged.
    #[must_use]
    pub fn implicate(self, class: ClassToken) -> Self {
        match self {
            Self::CyclicReference {
                mut chain,
            } => {
                chain.insert(0, class);
                Self::CyclicReference {
                    chain,
                }
            }
            other => other,
        }
    }
}
