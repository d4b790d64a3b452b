//! Error types for automaton construction and evaluation.

use thiserror::Error;

use crate::graph::{EdgeId, StateId};

/// Errors that can occur while building an automaton.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BuildError {
    /// A second state was marked initial.
    #[error("initial state already exists")]
    MultipleInitialStates,

    /// A state with this name already exists.
    #[error("duplicate state name {0:?}")]
    DuplicateState(String),

    /// The state id was not issued by this automaton.
    #[error("unknown state {0}")]
    UnknownState(StateId),

    /// The edge id does not refer to an edge of this automaton.
    #[error("unknown edge {0}")]
    UnknownEdge(EdgeId),

    /// Maximum state count exceeded.
    #[error("maximum states exceeded ({0})")]
    MaxStatesExceeded(usize),
}

/// Errors that can occur during evaluation.
///
/// The precondition errors are reported before any traversal starts.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EvalError {
    /// No state was marked initial.
    #[error("no initial state was found")]
    NoInitialState,

    /// No state was marked final.
    #[error("no final states were found")]
    NoFinalStates,

    /// An epsilon cycle exists and the limits reject it.
    #[error("automaton contains an epsilon cycle")]
    EpsilonCycle,

    /// The configured recursion depth bound was hit.
    #[error("maximum evaluation depth exceeded ({0})")]
    DepthLimitExceeded(usize),
}
