//! State/edge graph and the construction API.

use std::collections::{HashMap, HashSet};
use std::fmt;

use tracing::{debug, warn};

use crate::error::BuildError;
use crate::limits::Limits;
use crate::token::{Move, Target};

/// Identifier of a state within one automaton.
///
/// Ids are issued in insertion order by [`Automaton::add_state`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StateId(pub(crate) usize);

impl StateId {
    /// Position of the state in insertion order.
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for StateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Identifier of an edge: its source state and its position in that
/// state's edge list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EdgeId {
    pub state: StateId,
    pub index: usize,
}

impl fmt::Display for EdgeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.state, self.index)
    }
}

/// Whether a new state is initial, final, both or neither.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StateRole {
    pub initial: bool,
    pub accepting: bool,
}

impl StateRole {
    pub const NORMAL: Self = Self {
        initial: false,
        accepting: false,
    };
    pub const INITIAL: Self = Self {
        initial: true,
        accepting: false,
    };
    pub const FINAL: Self = Self {
        initial: false,
        accepting: true,
    };
    pub const INITIAL_FINAL: Self = Self {
        initial: true,
        accepting: true,
    };
}

/// A directed, labeled transition.
///
/// `E` is the output attached to the edge (Mealy output); plain automata
/// use `()`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edge<E = ()> {
    source: StateId,
    target: Target,
    moves: Vec<Move>,
    name: Option<String>,
    output: E,
}

impl<E> Edge<E> {
    pub fn source(&self) -> StateId {
        self.source
    }

    pub fn target(&self) -> Target {
        self.target
    }

    /// Move tokens in the order they were supplied.
    pub fn moves(&self) -> &[Move] {
        &self.moves
    }

    /// Optional display name.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn output(&self) -> &E {
        &self.output
    }

    /// Check if any move on this edge is epsilon.
    pub fn has_epsilon(&self) -> bool {
        self.moves.iter().any(Move::is_epsilon)
    }
}

/// A vertex with its outgoing edges.
///
/// `S` is the output attached to the state (Moore output).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct State<S = (), E = ()> {
    id: StateId,
    name: String,
    edges: Vec<Edge<E>>,
    output: S,
}

impl<S, E> State<S, E> {
    pub fn id(&self) -> StateId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Outgoing edges in insertion order.
    pub fn edges(&self) -> &[Edge<E>] {
        &self.edges
    }

    pub fn output(&self) -> &S {
        &self.output
    }
}

/// A finite automaton.
///
/// Holds every constructed state, at most one initial state and a set of
/// final states. Evaluation borrows the automaton immutably, so a single
/// instance can be evaluated from several callers at once.
///
/// # Example
///
/// ```
/// use automata_core::{Automaton, Move, StateRole};
///
/// let mut fa: Automaton = Automaton::new();
/// let a = fa.add_state("A", StateRole::INITIAL).unwrap();
/// let c = fa.add_state("C", StateRole::FINAL).unwrap();
/// fa.add_edge(a, c, [Move::Epsilon]).unwrap();
/// fa.add_edge(c, c, ['2']).unwrap();
///
/// assert!(fa.evaluate("22").unwrap());
/// ```
#[derive(Debug, Clone)]
pub struct Automaton<S = (), E = ()> {
    states: Vec<State<S, E>>,
    names: HashMap<String, StateId>,
    initial: Option<StateId>,
    finals: HashSet<StateId>,
    limits: Limits,
}

impl<S, E> Default for Automaton<S, E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S, E> Automaton<S, E> {
    /// Create an empty automaton with default limits.
    pub fn new() -> Self {
        Self::with_limits(Limits::default())
    }

    /// Create an empty automaton with custom limits.
    pub fn with_limits(limits: Limits) -> Self {
        Self {
            states: Vec::new(),
            names: HashMap::new(),
            initial: None,
            finals: HashSet::new(),
            limits,
        }
    }

    pub fn limits(&self) -> &Limits {
        &self.limits
    }

    /// Add a state whose output is `S::default()`.
    pub fn add_state(
        &mut self,
        name: impl Into<String>,
        role: StateRole,
    ) -> Result<StateId, BuildError>
    where
        S: Default,
    {
        self.add_state_with_output(name, role, S::default())
    }

    /// Add a state carrying a Moore output value.
    ///
    /// # Errors
    ///
    /// Returns an error, leaving the automaton unchanged, if:
    /// - `role.initial` is set and an initial state already exists
    /// - a state with the same name exists
    /// - the state limit is reached
    pub fn add_state_with_output(
        &mut self,
        name: impl Into<String>,
        role: StateRole,
        output: S,
    ) -> Result<StateId, BuildError> {
        let name = name.into();
        if role.initial && self.initial.is_some() {
            return Err(BuildError::MultipleInitialStates);
        }
        if self.names.contains_key(&name) {
            return Err(BuildError::DuplicateState(name));
        }
        if self.states.len() >= self.limits.max_states {
            return Err(BuildError::MaxStatesExceeded(self.limits.max_states));
        }

        let id = StateId(self.states.len());
        self.names.insert(name.clone(), id);
        self.states.push(State {
            id,
            name,
            edges: Vec::new(),
            output,
        });
        if role.initial {
            self.initial = Some(id);
        }
        if role.accepting {
            self.finals.insert(id);
        }
        Ok(id)
    }

    /// Add an edge whose output is `E::default()`.
    pub fn add_edge<I>(
        &mut self,
        from: StateId,
        to: impl Into<Target>,
        moves: I,
    ) -> Result<EdgeId, BuildError>
    where
        E: Default,
        I: IntoIterator,
        I::Item: Into<Move>,
    {
        self.add_edge_with_output(from, to, moves, E::default())
    }

    /// Append an edge carrying a Mealy output value to `from`'s edge list.
    ///
    /// An empty move list is accepted; such an edge never fires.
    /// Epsilon self-loops are accepted but make evaluation through `from`
    /// diverge unless [`Limits`] bound it.
    pub fn add_edge_with_output<I>(
        &mut self,
        from: StateId,
        to: impl Into<Target>,
        moves: I,
        output: E,
    ) -> Result<EdgeId, BuildError>
    where
        I: IntoIterator,
        I::Item: Into<Move>,
    {
        let target = to.into();
        if let Target::State(id) = target {
            if id.0 >= self.states.len() {
                return Err(BuildError::UnknownState(id));
            }
        }
        let source = self
            .states
            .get_mut(from.0)
            .ok_or(BuildError::UnknownState(from))?;

        let moves: Vec<Move> = moves.into_iter().map(Into::into).collect();
        if moves.is_empty() {
            debug!(state = %source.name, "edge added with no moves");
        }
        if target == Target::State(from) && moves.iter().any(Move::is_epsilon) {
            warn!(
                state = %source.name,
                "epsilon self-loop added; evaluation through this state will not terminate"
            );
        }

        let index = source.edges.len();
        source.edges.push(Edge {
            source: from,
            target,
            moves,
            name: None,
            output,
        });
        Ok(EdgeId { state: from, index })
    }

    /// Give an edge a display name.
    pub fn set_edge_name(
        &mut self,
        edge: EdgeId,
        name: impl Into<String>,
    ) -> Result<(), BuildError> {
        let slot = self
            .states
            .get_mut(edge.state.0)
            .and_then(|state| state.edges.get_mut(edge.index))
            .ok_or(BuildError::UnknownEdge(edge))?;
        slot.name = Some(name.into());
        Ok(())
    }

    /// Look up a state id by name.
    pub fn state_by_name(&self, name: &str) -> Option<StateId> {
        self.names.get(name).copied()
    }

    /// Get a state by id.
    pub fn state(&self, id: StateId) -> Option<&State<S, E>> {
        self.states.get(id.0)
    }

    /// Get an edge by id.
    pub fn edge(&self, id: EdgeId) -> Option<&Edge<E>> {
        self.state(id.state)?.edges.get(id.index)
    }

    /// All states in insertion order.
    pub fn states(&self) -> &[State<S, E>] {
        &self.states
    }

    pub fn state_count(&self) -> usize {
        self.states.len()
    }

    pub fn initial_state(&self) -> Option<StateId> {
        self.initial
    }

    pub fn final_states(&self) -> &HashSet<StateId> {
        &self.finals
    }

    pub fn is_final(&self, id: StateId) -> bool {
        self.finals.contains(&id)
    }

    /// Check if the epsilon edges alone form a cycle.
    ///
    /// Such a cycle makes the recursive evaluation diverge whenever it is
    /// entered with input left to consume.
    pub fn has_epsilon_cycle(&self) -> bool {
        #[derive(Clone, Copy, PartialEq, Eq)]
        enum Mark {
            Unvisited,
            OnStack,
            Done,
        }

        let successors: Vec<Vec<usize>> = self
            .states
            .iter()
            .map(|state| {
                state
                    .edges
                    .iter()
                    .filter(|edge| edge.has_epsilon())
                    .filter_map(|edge| edge.target.state())
                    .map(StateId::index)
                    .collect()
            })
            .collect();

        let mut marks = vec![Mark::Unvisited; self.states.len()];
        for root in 0..self.states.len() {
            if marks[root] != Mark::Unvisited {
                continue;
            }
            marks[root] = Mark::OnStack;
            let mut stack = vec![(root, 0usize)];

            while let Some(&(node, cursor)) = stack.last() {
                match successors[node].get(cursor) {
                    Some(&next) => {
                        if let Some(top) = stack.last_mut() {
                            top.1 += 1;
                        }
                        match marks[next] {
                            Mark::OnStack => return true,
                            Mark::Unvisited => {
                                marks[next] = Mark::OnStack;
                                stack.push((next, 0));
                            }
                            Mark::Done => {}
                        }
                    }
                    None => {
                        marks[node] = Mark::Done;
                        stack.pop();
                    }
                }
            }
        }
        false
    }
}
