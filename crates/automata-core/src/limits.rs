//! Resource limits for construction and evaluation.

/// Resource limits for an automaton.
///
/// The evaluation engine recurses once per consumed symbol, epsilon hop
/// and dead-state fallback. An epsilon cycle without a consuming exit
/// recurses forever, so callers evaluating untrusted automata should set
/// `max_depth` or `reject_epsilon_cycles`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Limits {
    /// Maximum number of states in the automaton.
    pub max_states: usize,
    /// Maximum recursion depth of a single evaluation. `None` is unbounded.
    pub max_depth: Option<usize>,
    /// Refuse to evaluate automata that contain an epsilon cycle.
    pub reject_epsilon_cycles: bool,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_states: 4096,
            max_depth: None,
            reject_epsilon_cycles: false,
        }
    }
}

impl Limits {
    /// Create limits with custom values.
    pub fn new(max_states: usize, max_depth: Option<usize>, reject_epsilon_cycles: bool) -> Self {
        Self {
            max_states,
            max_depth,
            reject_epsilon_cycles,
        }
    }

    /// Permissive limits for testing.
    pub fn permissive() -> Self {
        Self {
            max_states: 65_536,
            max_depth: None,
            reject_epsilon_cycles: false,
        }
    }

    /// Strict limits for automata built from untrusted descriptions.
    pub fn strict() -> Self {
        Self {
            max_states: 256,
            max_depth: Some(1024),
            reject_epsilon_cycles: true,
        }
    }
}
