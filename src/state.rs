//! Lifecycle states.
//!
//! Every managed instance passes through the same totally ordered sequence
//! of phases: `Created < Initialized < Resolved < Started < Stopped`. A
//! dependency edge is satisfied only once its target has reached the edge's
//! required state, and execution hooks are filed against the state at which
//! they fire. The graph core treats the enumeration as an opaque ordered
//! set; the ordering itself is consumed by the external state-transition
//! driver.
//!
//! # Examples
//!
//! ```rust
//! use lifewire::State;
//!
//! assert!(State::Created < State::Started);
//! assert_eq!(State::EXECUTE_DEFAULT, State::Started);
//! assert_eq!(State::Initialized.next(), Some(State::Resolved));
//! assert_eq!(State::Stopped.next(), None);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;

/// One phase in the lifecycle of a managed instance.
///
/// The derived [`Ord`] follows declaration order, which is the order the
/// external invoker drives nodes through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum State {
    /// The instance exists but nothing has been injected into it.
    Created,
    /// Field dependencies marked for early injection are in place.
    Initialized,
    /// All field dependencies are in place.
    Resolved,
    /// The instance is live and serving.
    Started,
    /// The instance has been shut down.
    Stopped,
}

impl State {
    /// The state at which a plain execute hook fires when no explicit
    /// target state is given.
    pub const EXECUTE_DEFAULT: State = State::Started;

    /// The default required state for an inject marker that does not name
    /// one explicitly: the target must be fully wired before it is handed
    /// out.
    pub const INJECT_DEFAULT: State = State::Resolved;

    /// All states in lifecycle order.
    pub const fn sequence() -> [State; 5] {
        [
            State::Created,
            State::Initialized,
            State::Resolved,
            State::Started,
            State::Stopped,
        ]
    }

    /// The state following this one, or `None` for the terminal state.
    pub const fn next(self) -> Option<State> {
        match self {
            State::Created => Some(State::Initialized),
            State::Initialized => Some(State::Resolved),
            State::Resolved => Some(State::Started),
            State::Started => Some(State::Stopped),
            State::Stopped => None,
        }
    }
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            State::Created => "created",
            State::Initialized => "initialized",
            State::Resolved => "resolved",
            State::Started => "started",
            State::Stopped => "stopped",
        };
        f.write_str(name)
    }
}
