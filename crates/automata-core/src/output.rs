//! Moore and Mealy output layered over the evaluator.
//!
//! The evaluator notifies an [`Emitter`] before every transition it takes.
//! A Moore emitter records the output of the state being left, a Mealy
//! emitter the output of the edge being taken. Emission happens during
//! exploration, so output from branches that are later rejected stays in
//! the sequence, in depth-first edge order.

use crate::error::EvalError;
use crate::eval::EvalStats;
use crate::graph::{Automaton, Edge, State};
use crate::token::Move;

/// One transition about to be taken by the evaluator.
#[derive(Debug)]
pub struct Step<'a, S, E> {
    /// State the transition leaves. Never the dead state.
    pub state: &'a State<S, E>,
    /// Edge being taken.
    pub edge: &'a Edge<E>,
    /// Position of `edge` in `state`'s edge list.
    pub edge_index: usize,
    /// Token on `edge` that matched.
    pub token: Move,
    /// Input position before the transition.
    pub position: usize,
    /// Input position after the transition; equal to `position` for epsilon.
    pub next_position: usize,
}

/// Per-step hook called by the evaluator.
///
/// Not called once the evaluation has accepted.
pub trait Emitter<S, E> {
    fn on_step(&mut self, step: &Step<'_, S, E>);
}

/// Emitter that records nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOutput;

impl<S, E> Emitter<S, E> for NoOutput {
    fn on_step(&mut self, _step: &Step<'_, S, E>) {}
}

/// Collects state outputs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MooreOutput<O> {
    output: Vec<O>,
}

impl<O> Default for MooreOutput<O> {
    fn default() -> Self {
        Self { output: Vec::new() }
    }
}

impl<O> MooreOutput<O> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn into_output(self) -> Vec<O> {
        self.output
    }
}

impl<O: Clone, E> Emitter<O, E> for MooreOutput<O> {
    fn on_step(&mut self, step: &Step<'_, O, E>) {
        self.output.push(step.state.output().clone());
    }
}

/// Collects edge outputs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MealyOutput<O> {
    output: Vec<O>,
}

impl<O> Default for MealyOutput<O> {
    fn default() -> Self {
        Self { output: Vec::new() }
    }
}

impl<O> MealyOutput<O> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn into_output(self) -> Vec<O> {
        self.output
    }
}

impl<S, O: Clone> Emitter<S, O> for MealyOutput<O> {
    fn on_step(&mut self, step: &Step<'_, S, O>) {
        self.output.push(step.edge.output().clone());
    }
}

/// Verdict plus the emitted output sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Evaluation<O> {
    pub accepted: bool,
    pub output: Vec<O>,
    pub stats: EvalStats,
}

/// Automaton without output.
pub type Nfa = Automaton<(), ()>;

/// Automaton whose states carry output.
pub type MooreMachine<O> = Automaton<O, ()>;

/// Automaton whose edges carry output.
pub type MealyMachine<O> = Automaton<(), O>;

impl<S: Clone, E> Automaton<S, E> {
    /// Evaluate `input`, collecting the output of every state a transition
    /// leaves.
    pub fn evaluate_moore(&self, input: &str) -> Result<Evaluation<S>, EvalError> {
        let mut emitter = MooreOutput::new();
        let outcome = self.run(input, &mut emitter)?;
        Ok(Evaluation {
            accepted: outcome.accepted,
            output: emitter.into_output(),
            stats: outcome.stats,
        })
    }
}

impl<S, E: Clone> Automaton<S, E> {
    /// Evaluate `input`, collecting the output of every edge taken.
    pub fn evaluate_mealy(&self, input: &str) -> Result<Evaluation<E>, EvalError> {
        let mut emitter = MealyOutput::new();
        let outcome = self.run(input, &mut emitter)?;
        Ok(Evaluation {
            accepted: outcome.accepted,
            output: emitter.into_output(),
            stats: outcome.stats,
        })
    }
}
