//! Class metadata and the scanner collaborator.
//!
//! The graph core never performs runtime type introspection itself. It asks
//! a [`MetadataScanner`] — a collaborator supplied by the host — which
//! fields and methods a class has and which of them carry injection or
//! lifecycle markers. Annotation-style markers are represented as plain
//! tagged records on the descriptors: a field is injectable when
//! [`FieldDescriptor::inject`] is set, a method is a lifecycle hook when
//! [`MethodDescriptor::hook`] is set.
//!
//! A scanner must be deterministic for a given class within one graph
//! build: the graph resolves each class exactly once, and the round-trip
//! guarantee (building the same class set twice yields identical graphs)
//! leans on the scanner answering the same way both times.
//!
//! The in-memory [`MetadataRegistry`] is the batteries-included scanner for
//! hosts that declare their wiring explicitly; see [`registry`].

use crate::core::ClassToken;
use crate::state::State;

pub mod registry;

pub use registry::MetadataRegistry;

/// One field of a class, as reported by the scanner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDescriptor {
    /// Field name, for diagnostics.
    pub name: String,
    /// The type the field holds.
    pub declared_type: ClassToken,
    /// Injection marker: the state the target must have reached before it
    /// may be injected here. `None` means the field is not injectable.
    pub inject: Option<State>,
}

impl FieldDescriptor {
    /// A field carrying an inject marker with the given required state.
    pub fn injected(name: impl Into<String>, declared_type: ClassToken, state: State) -> Self {
        Self {
            name: name.into(),
            declared_type,
            inject: Some(state),
        }
    }

    /// A field without any marker; the graph ignores it.
    pub fn plain(name: impl Into<String>, declared_type: ClassToken) -> Self {
        Self {
            name: name.into(),
            declared_type,
            inject: None,
        }
    }
}

/// One parameter of a lifecycle hook method.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParameterDescriptor {
    /// The type the parameter expects.
    pub declared_type: ClassToken,
    /// Injection marker, as for fields. A hook parameter without a marker
    /// is a configuration error.
    pub inject: Option<State>,
}

impl ParameterDescriptor {
    /// A parameter carrying an inject marker with the given required state.
    pub fn injected(declared_type: ClassToken, state: State) -> Self {
        Self {
            declared_type,
            inject: Some(state),
        }
    }

    /// A parameter carrying an inject marker with the default required
    /// state ([`State::INJECT_DEFAULT`]).
    pub fn required(declared_type: ClassToken) -> Self {
        Self::injected(declared_type, State::INJECT_DEFAULT)
    }

    /// A parameter without a marker. Only useful for exercising the
    /// configuration-error path.
    pub fn bare(declared_type: ClassToken) -> Self {
        Self {
            declared_type,
            inject: None,
        }
    }
}

/// Lifecycle marker on a method.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HookMarker {
    /// Run when the graph reaches the default start state
    /// ([`State::EXECUTE_DEFAULT`]).
    Execute,
    /// Run before the graph reaches the given state.
    ExecuteBefore(State),
}

/// One method of a class, as reported by the scanner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodDescriptor {
    /// Method name.
    pub name: String,
    /// Parameters in declaration order.
    pub parameters: Vec<ParameterDescriptor>,
    /// Lifecycle marker, if any. Unmarked methods are ignored by the graph.
    pub hook: Option<HookMarker>,
}

impl MethodDescriptor {
    /// A method marked to run at the default start state.
    pub fn execute(name: impl Into<String>, parameters: Vec<ParameterDescriptor>) -> Self {
        Self {
            name: name.into(),
            parameters,
            hook: Some(HookMarker::Execute),
        }
    }

    /// A method marked to run before the given state.
    pub fn execute_before(
        name: impl Into<String>,
        state: State,
        parameters: Vec<ParameterDescriptor>,
    ) -> Self {
        Self {
            name: name.into(),
            parameters,
            hook: Some(HookMarker::ExecuteBefore(state)),
        }
    }

    /// A method without a lifecycle marker.
    pub fn plain(name: impl Into<String>, parameters: Vec<ParameterDescriptor>) -> Self {
        Self {
            name: name.into(),
            parameters,
            hook: None,
        }
    }

    /// Qualified signature for diagnostics: the declaring class's full
    /// name, the method name, and the simple names of the parameter types,
    /// e.g. `app.Server#start(Database, Metrics)`.
    pub fn qualified_name(&self, declaring: &ClassToken) -> String {
        let parameters = self
            .parameters
            .iter()
            .map(|p| p.declared_type.simple_name())
            .collect::<Vec<_>>()
            .join(", ");
        format!("{}#{}({})", declaring.name(), self.name, parameters)
    }
}

/// Collaborator that enumerates the annotated members of a class.
///
/// The reflection substitute: given a class token, report its fields and
/// methods together with their markers. Implementations must be
/// deterministic within one graph build.
pub trait MetadataScanner {
    /// Whether this scanner can describe the type at all.
    ///
    /// Drives the distinction between a dependency on a type that is merely
    /// not registered in the graph yet (a cyclic-reference condition) and a
    /// dependency on a type nobody can describe
    /// ([`GraphError::UnknownDependency`](crate::core::GraphError::UnknownDependency)).
    fn knows(&self, class: &ClassToken) -> bool;

    /// The fields of the class, markers included. Unknown classes yield an
    /// empty list.
    fn fields(&self, class: &ClassToken) -> Vec<FieldDescriptor>;

    /// The methods of the class, markers included. Unknown classes yield an
    /// empty list.
    fn methods(&self, class: &ClassToken) -> Vec<MethodDescriptor>;
}
