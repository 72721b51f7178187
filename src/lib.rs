//! Lifewire - lifecycle-aware dependency graph construction
//!
//! Lifewire builds the dependency graph at the heart of a dependency
//! injection container: given a set of classes described by lifecycle and
//! injection metadata, it constructs a directed graph of construction
//! dependencies, rejects cycles, and schedules execution hooks against the
//! lifecycle states at which they fire. The graph is then handed to an
//! external state-transition driver that walks nodes through their
//! lifecycle in dependency order; that driver, and any public injector API
//! around it, live outside this crate.
//!
//! # Architecture Overview
//!
//! - [`metadata`] - the reflection substitute: a [`MetadataScanner`]
//!   collaborator enumerates each class's injectable fields and
//!   lifecycle-marked methods. The in-memory [`MetadataRegistry`] lets
//!   hosts declare wiring explicitly, with no runtime introspection.
//! - [`graph`] - the [`DependencyGraph`] itself: node registry, two-phase
//!   wiring with strict field resolution and permissive on-demand parameter
//!   resolution, and an explicit DFS cycle check over the realized edge
//!   set.
//! - [`state`] - the totally ordered lifecycle [`State`] enumeration.
//! - [`core`] - [`ClassToken`] identities and the [`GraphError`] taxonomy.
//!
//! # Examples
//!
//! ```rust
//! use lifewire::{ClassToken, DependencyGraph, MetadataRegistry, State};
//!
//! let database = ClassToken::named("app.Database");
//! let server = ClassToken::named("app.Server");
//!
//! let mut registry = MetadataRegistry::new();
//! registry
//!     .class(database.clone())
//!     .execute_before("connect", State::Initialized, vec![]);
//! registry
//!     .class(server.clone())
//!     .inject_field("db", database.clone(), State::Resolved)
//!     .execute("serve", vec![]);
//!
//! let graph = DependencyGraph::build(&registry, [database.clone(), server.clone()])?;
//!
//! // The database must be wired before the server.
//! let order: Vec<_> = graph
//!     .topological_order()?
//!     .into_iter()
//!     .map(|node| node.class().clone())
//!     .collect();
//! assert_eq!(order, vec![database, server]);
//! # Ok::<(), lifewire::GraphError>(())
//! ```

pub mod core;
pub mod graph;
pub mod metadata;
pub mod state;

pub use crate::core::{ClassToken, GraphError};
pub use crate::graph::{Dependency, DependencyGraph, DependencyNode, Execution};
pub use crate::metadata::{MetadataRegistry, MetadataScanner};
pub use crate::state::State;
