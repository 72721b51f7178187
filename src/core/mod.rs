//! Core types for the dependency graph builder.
//!
//! This module holds the two foundations everything else leans on:
//!
//! - [`ClassToken`] — the opaque identity of a participating type, used as
//!   the graph's key. See [`token`].
//! - [`GraphError`] — the strongly-typed error taxonomy for graph
//!   construction. See [`error`].
//!
//! # Design Principles
//!
//! Every operation that can fail returns a [`Result`] carrying a
//! [`GraphError`] variant specific to the failure mode. Cycle chains are
//! structured values (ordered lists of [`ClassToken`]s) rather than nested
//! wrapped causes, so diagnostics can be rendered or inspected without
//! unwinding an error source chain.

pub mod error;
pub mod token;

pub use error::GraphError;
pub use token::ClassToken;
