//! Finite automata with nondeterministic evaluation.
//!
//! # Overview
//!
//! An [`Automaton`] is a set of named states joined by edges labeled with
//! [`Move`] tokens: an input symbol, or epsilon which consumes nothing.
//! Evaluation explores every path the edges allow:
//!
//! - **Nondeterministic** — several edges may consume the same symbol
//! - **Epsilon moves** — followed without advancing the input
//! - **Total** — a symbol no edge consumes leads to the dead state
//! - **Short-circuit** — exploration stops at the first accepting branch
//!
//! # Example
//!
//! ```
//! use automata_core::{Automaton, Nfa, StateRole};
//!
//! // Strings over {0, 1} ending in "00" or "11".
//! let mut nfa: Nfa = Automaton::new();
//! let a = nfa.add_state("A", StateRole::INITIAL).unwrap();
//! let zero = nfa.add_state("A2", StateRole::NORMAL).unwrap();
//! let one = nfa.add_state("A3", StateRole::NORMAL).unwrap();
//! let end = nfa.add_state("A4", StateRole::FINAL).unwrap();
//!
//! nfa.add_edge(a, a, ['0', '1']).unwrap();
//! nfa.add_edge(a, zero, ['0']).unwrap();
//! nfa.add_edge(a, one, ['1']).unwrap();
//! nfa.add_edge(zero, end, ['0']).unwrap();
//! nfa.add_edge(one, end, ['1']).unwrap();
//!
//! assert!(nfa.evaluate("0100").unwrap());
//! assert!(!nfa.evaluate("01010101").unwrap());
//! ```
//!
//! # Output
//!
//! [`MooreMachine`] attaches output to states, [`MealyMachine`] to edges.
//! Both run the same evaluator with an [`Emitter`] plugged in:
//!
//! ```
//! use automata_core::{Automaton, MealyMachine, StateRole};
//!
//! let mut fa: MealyMachine<u8> = Automaton::new();
//! let a = fa.add_state("A", StateRole::INITIAL).unwrap();
//! let b = fa.add_state("B", StateRole::FINAL).unwrap();
//! fa.add_edge_with_output(a, b, ['1'], 0).unwrap();
//! fa.add_edge_with_output(b, b, ['1'], 1).unwrap();
//!
//! let result = fa.evaluate_mealy("111").unwrap();
//! assert!(result.accepted);
//! assert_eq!(result.output, vec![0, 1, 1]);
//! ```
//!
//! # Termination
//!
//! Evaluation recurses once per transition. An epsilon cycle with input
//! left to read never terminates; bound it with [`Limits`].

pub mod error;
pub mod eval;
pub mod graph;
pub mod limits;
pub mod output;
pub mod token;

pub use error::{BuildError, EvalError};
pub use eval::{EvalStats, Outcome};
pub use graph::{Automaton, Edge, EdgeId, State, StateId, StateRole};
pub use limits::Limits;
pub use output::{
    Emitter, Evaluation, MealyMachine, MealyOutput, MooreMachine, MooreOutput, Nfa, NoOutput, Step,
};
pub use token::{Move, Target};
