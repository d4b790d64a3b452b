//! Recursive nondeterministic evaluator.
//!
//! Evaluation explores every path the edges permit, depth first, in edge
//! insertion order and then token order. A branch that reads a symbol no
//! edge consumes falls into the dead state. Acceptance is the OR over all
//! branches; once a branch accepts, the rest are skipped.

use tracing::{debug, debug_span, trace};

use crate::error::EvalError;
use crate::graph::{Automaton, StateId};
use crate::output::{Emitter, NoOutput, Step};
use crate::token::{Move, Target};

/// Counters collected while exploring.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EvalStats {
    /// Transitions taken along matching edges, epsilon moves included.
    pub transitions: usize,
    /// Of those, transitions taken on epsilon moves.
    pub epsilon_moves: usize,
    /// Branches that ended in the dead state.
    pub dead_ends: usize,
    /// Deepest recursion reached.
    pub max_depth: usize,
}

/// Result of a single evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Outcome {
    pub accepted: bool,
    pub stats: EvalStats,
}

/// Per-call evaluation context.
///
/// Owned by one `run` call and dropped when it returns, whichever way it
/// returns. Nothing is stored on the automaton.
struct Session<'a, 'h, S, E, H> {
    automaton: &'a Automaton<S, E>,
    input: Vec<char>,
    accepted: bool,
    emitter: &'h mut H,
    max_depth: Option<usize>,
    stats: EvalStats,
}

impl<'a, 'h, S, E, H> Session<'a, 'h, S, E, H>
where
    H: Emitter<S, E>,
{
    fn open(automaton: &'a Automaton<S, E>, input: &str, emitter: &'h mut H) -> Self {
        Self {
            automaton,
            input: input.chars().collect(),
            accepted: false,
            emitter,
            max_depth: automaton.limits().max_depth,
            stats: EvalStats::default(),
        }
    }

    fn close(self) -> Outcome {
        Outcome {
            accepted: self.accepted,
            stats: self.stats,
        }
    }

    fn explore(&mut self, position: usize, target: Target, depth: usize) -> Result<(), EvalError> {
        if self.accepted {
            return Ok(());
        }
        let Target::State(id) = target else {
            trace!(position, "dead state reached");
            self.stats.dead_ends += 1;
            return Ok(());
        };
        if let Some(limit) = self.max_depth {
            if depth > limit {
                return Err(EvalError::DepthLimitExceeded(limit));
            }
        }
        self.stats.max_depth = self.stats.max_depth.max(depth);

        let Some(&symbol) = self.input.get(position) else {
            if self.automaton.is_final(id) {
                trace!(position, state = id.index(), "input exhausted on final state");
                self.accepted = true;
            }
            return Ok(());
        };

        let automaton = self.automaton;
        // Edge targets are validated when edges are added.
        let Some(state) = automaton.state(id) else {
            return Ok(());
        };

        let mut matched = false;
        for (index, edge) in state.edges().iter().enumerate() {
            for &token in edge.moves() {
                let next = match token {
                    Move::Symbol(c) if c == symbol => {
                        matched = true;
                        position + 1
                    }
                    Move::Epsilon => position,
                    Move::Symbol(_) => continue,
                };
                if self.accepted {
                    return Ok(());
                }

                self.stats.transitions += 1;
                if token.is_epsilon() {
                    self.stats.epsilon_moves += 1;
                }
                trace!(
                    state = state.name(),
                    edge = index,
                    ?token,
                    position,
                    next,
                    "taking transition"
                );
                self.emitter.on_step(&Step {
                    state,
                    edge,
                    edge_index: index,
                    token,
                    position,
                    next_position: next,
                });
                self.explore(next, edge.target(), depth + 1)?;
            }
        }

        if !matched {
            trace!(state = state.name(), position, %symbol, "no edge consumes symbol");
            self.explore(position + 1, Target::Dead, depth + 1)?;
        }
        Ok(())
    }
}

impl<S, E> Automaton<S, E> {
    /// Evaluate `input` and report whether it is accepted.
    ///
    /// # Errors
    ///
    /// Fails before any traversal if there is no initial state or no final
    /// state, and during traversal only if the configured [`Limits`] bound
    /// the recursion depth.
    ///
    /// [`Limits`]: crate::Limits
    pub fn evaluate(&self, input: &str) -> Result<bool, EvalError> {
        Ok(self.run(input, &mut NoOutput)?.accepted)
    }

    /// Evaluate `input`, notifying `emitter` before every transition.
    pub fn run<H>(&self, input: &str, emitter: &mut H) -> Result<Outcome, EvalError>
    where
        H: Emitter<S, E>,
    {
        let initial = self.check_preconditions()?;

        let _span = debug_span!("evaluate", input_len = input.chars().count()).entered();
        let mut session = Session::open(self, input, emitter);
        let explored = session.explore(0, Target::State(initial), 0);
        let outcome = session.close();
        explored?;

        debug!(
            accepted = outcome.accepted,
            transitions = outcome.stats.transitions,
            dead_ends = outcome.stats.dead_ends,
            "evaluation finished"
        );
        Ok(outcome)
    }

    fn check_preconditions(&self) -> Result<StateId, EvalError> {
        let initial = self.initial_state().ok_or(EvalError::NoInitialState)?;
        if self.final_states().is_empty() {
            return Err(EvalError::NoFinalStates);
        }
        if self.limits().reject_epsilon_cycles && self.has_epsilon_cycle() {
            return Err(EvalError::EpsilonCycle);
        }
        Ok(initial)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::StateRole;
    use crate::limits::Limits;

    #[test]
    fn test_single_symbol() {
        let mut fa: Automaton = Automaton::new();
        let a = fa.add_state("A", StateRole::INITIAL).unwrap();
        let b = fa.add_state("B", StateRole::FINAL).unwrap();
        fa.add_edge(a, b, ['x']).unwrap();

        assert!(fa.evaluate("x").unwrap());
        assert!(!fa.evaluate("").unwrap());
        assert!(!fa.evaluate("y").unwrap());
        assert!(!fa.evaluate("xx").unwrap());
    }

    #[test]
    fn test_empty_input_on_initial_final() {
        let mut fa: Automaton = Automaton::new();
        fa.add_state("A", StateRole::INITIAL_FINAL).unwrap();
        assert!(fa.evaluate("").unwrap());
    }

    #[test]
    fn test_epsilon_not_followed_at_end_of_input() {
        let mut fa: Automaton = Automaton::new();
        let a = fa.add_state("A", StateRole::INITIAL).unwrap();
        let c = fa.add_state("C", StateRole::FINAL).unwrap();
        fa.add_edge(a, c, [Move::Epsilon]).unwrap();

        assert!(!fa.evaluate("").unwrap());
    }

    #[test]
    fn test_missing_initial_state() {
        let mut fa: Automaton = Automaton::new();
        fa.add_state("B", StateRole::FINAL).unwrap();
        assert_eq!(fa.evaluate("1"), Err(EvalError::NoInitialState));
    }

    #[test]
    fn test_missing_final_states() {
        let mut fa: Automaton = Automaton::new();
        fa.add_state("A", StateRole::INITIAL).unwrap();
        assert_eq!(fa.evaluate("1"), Err(EvalError::NoFinalStates));
    }

    #[test]
    fn test_unmatched_symbol_falls_into_dead_state() {
        let mut fa: Automaton = Automaton::new();
        let a = fa.add_state("A", StateRole::INITIAL).unwrap();
        let b = fa.add_state("B", StateRole::FINAL).unwrap();
        fa.add_edge(a, b, ['1']).unwrap();

        let outcome = fa.run("0", &mut NoOutput).unwrap();
        assert!(!outcome.accepted);
        assert_eq!(outcome.stats.transitions, 0);
        assert_eq!(outcome.stats.dead_ends, 1);
    }

    #[test]
    fn test_epsilon_match_does_not_block_fallback() {
        // A -ε-> B; B has no edges. Reading 'z' at A takes the epsilon edge
        // and also falls back to the dead state since no symbol matched.
        let mut fa: Automaton = Automaton::new();
        let a = fa.add_state("A", StateRole::INITIAL).unwrap();
        let b = fa.add_state("B", StateRole::FINAL).unwrap();
        fa.add_edge(a, b, [Move::Epsilon]).unwrap();

        let outcome = fa.run("z", &mut NoOutput).unwrap();
        assert!(!outcome.accepted);
        assert_eq!(outcome.stats.epsilon_moves, 1);
        assert_eq!(outcome.stats.dead_ends, 2);
    }

    #[test]
    fn test_explicit_dead_edge_never_accepts() {
        let mut fa: Automaton = Automaton::new();
        let a = fa.add_state("A", StateRole::INITIAL_FINAL).unwrap();
        fa.add_edge(a, Target::Dead, ['1']).unwrap();

        let outcome = fa.run("1", &mut NoOutput).unwrap();
        assert!(!outcome.accepted);
        assert_eq!(outcome.stats.transitions, 1);
        assert_eq!(outcome.stats.dead_ends, 1);
    }

    #[test]
    fn test_short_circuit_after_acceptance() {
        // Two identical edges: the second is never explored.
        let mut fa: Automaton = Automaton::new();
        let a = fa.add_state("A", StateRole::INITIAL).unwrap();
        let b = fa.add_state("B", StateRole::FINAL).unwrap();
        fa.add_edge(a, b, ['1']).unwrap();
        fa.add_edge(a, b, ['1']).unwrap();

        let outcome = fa.run("1", &mut NoOutput).unwrap();
        assert!(outcome.accepted);
        assert_eq!(outcome.stats.transitions, 1);
    }

    #[test]
    fn test_depth_limit_bounds_epsilon_cycle() {
        let mut fa: Automaton = Automaton::with_limits(Limits::new(16, Some(64), false));
        let a = fa.add_state("A", StateRole::INITIAL).unwrap();
        fa.add_state("B", StateRole::FINAL).unwrap();
        fa.add_edge(a, a, [Move::Epsilon]).unwrap();

        assert_eq!(fa.evaluate("x"), Err(EvalError::DepthLimitExceeded(64)));
    }

    #[test]
    fn test_reject_epsilon_cycles() {
        let mut fa: Automaton = Automaton::with_limits(Limits::strict());
        let a = fa.add_state("A", StateRole::INITIAL).unwrap();
        let b = fa.add_state("B", StateRole::FINAL).unwrap();
        fa.add_edge(a, b, [Move::Epsilon]).unwrap();
        fa.add_edge(b, a, [Move::Epsilon]).unwrap();

        assert_eq!(fa.evaluate(""), Err(EvalError::EpsilonCycle));
    }

    #[test]
    fn test_depth_tracks_longest_path() {
        let mut fa: Automaton = Automaton::new();
        let a = fa.add_state("A", StateRole::INITIAL_FINAL).unwrap();
        fa.add_edge(a, a, ['1']).unwrap();

        let outcome = fa.run("111", &mut NoOutput).unwrap();
        assert!(outcome.accepted);
        assert_eq!(outcome.stats.max_depth, 3);
    }
}
