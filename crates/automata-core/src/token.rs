//! Move tokens and edge targets.
//!
//! Both sentinels of the model live here as enum variants: the epsilon
//! move ([`Move::Epsilon`]) and the absorbing dead state
//! ([`Target::Dead`]). They compare by variant, never by name.

use crate::graph::StateId;

/// A label on an edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Move {
    /// Consumes exactly this input symbol.
    Symbol(char),
    /// Consumes nothing; the input position is left unchanged.
    Epsilon,
}

impl Move {
    /// Expand a string into one symbol move per character.
    pub fn symbols(chars: &str) -> Vec<Move> {
        chars.chars().map(Move::Symbol).collect()
    }

    /// Check if this is the epsilon move.
    pub fn is_epsilon(&self) -> bool {
        matches!(self, Move::Epsilon)
    }

    /// Check if this move consumes `symbol`.
    #[inline]
    pub fn consumes(&self, symbol: char) -> bool {
        matches!(self, Move::Symbol(c) if *c == symbol)
    }
}

impl From<char> for Move {
    fn from(symbol: char) -> Self {
        Move::Symbol(symbol)
    }
}

/// Where an edge leads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Target {
    /// A state constructed in the owning automaton.
    State(StateId),
    /// The dead state: no edges, never final.
    Dead,
}

impl Target {
    /// The state id, or `None` for the dead state.
    pub fn state(&self) -> Option<StateId> {
        match self {
            Target::State(id) => Some(*id),
            Target::Dead => None,
        }
    }

    /// Check if this is the dead state.
    pub fn is_dead(&self) -> bool {
        matches!(self, Target::Dead)
    }
}

impl From<StateId> for Target {
    fn from(id: StateId) -> Self {
        Target::State(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_symbols_expansion() {
        assert_eq!(
            Move::symbols("01"),
            vec![Move::Symbol('0'), Move::Symbol('1')]
        );
        assert!(Move::symbols("").is_empty());
    }

    #[test]
    fn test_consumes() {
        assert!(Move::Symbol('a').consumes('a'));
        assert!(!Move::Symbol('a').consumes('b'));
        assert!(!Move::Epsilon.consumes('a'));
        assert!(Move::Epsilon.is_epsilon());
    }

    #[test]
    fn test_target_state() {
        let id = StateId(3);
        assert_eq!(Target::from(id).state(), Some(id));
        assert_eq!(Target::Dead.state(), None);
        assert!(Target::Dead.is_dead());
        assert_ne!(Target::Dead, Target::State(StateId(0)));
    }
}
