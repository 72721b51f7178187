//! Class identity tokens.
//!
//! A [`ClassToken`] is the opaque identifier the graph uses to key its nodes.
//! The injector never inspects the type it names; it only needs a stable,
//! ordered, hashable identity that the metadata scanner and the graph agree
//! on. Hosts with real Rust types at hand can mint tokens with
//! [`ClassToken::of`], which uses [`std::any::type_name`]; hosts describing
//! foreign or dynamically-loaded types use [`ClassToken::named`].
//!
//! # Examples
//!
//! ```rust
//! use lifewire::core::ClassToken;
//!
//! struct UserService;
//!
//! let by_type = ClassToken::of::<UserService>();
//! let by_name = ClassToken::named("db.ConnectionPool");
//!
//! assert!(by_type.name().ends_with("UserService"));
//! assert_eq!(by_type.simple_name(), "UserService");
//! assert_eq!(by_name.simple_name(), "db.ConnectionPool");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque identity of a type participating in the dependency graph.
///
/// Tokens are compared, ordered, and hashed by their full name. Two tokens
/// with the same name refer to the same graph node, so names must be unique
/// within one graph build.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClassToken {
    name: String,
}

impl ClassToken {
    /// Create a token from an explicit name.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
        }
    }

    /// Create a token for a Rust type, named after its fully-qualified path.
    pub fn of<T: ?Sized>() -> Self {
        Self {
            name: std::any::type_name::<T>().to_string(),
        }
    }

    /// The full name of the type this token identifies.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The last path segment of the name, used in method signatures and
    /// diagnostics where the full path would be noise.
    pub fn simple_name(&self) -> &str {
        self.name.rsplit("::").next().unwrap_or(&self.name)
    }
}

impl fmt::Display for ClassToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}
