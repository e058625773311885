//! Finite automata over arbitrary state and symbol tokens.
//!
//! This module provides:
//! - The [`Automaton`] value type and its validity checks
//! - Epsilon closure and frontier-based membership testing
//! - Epsilon removal and subset construction (NFA to DFA conversion)
//! - Product, intersection and union
//! - State relabeling
//!
//! Internally every algorithm interns tokens into dense ids and works on
//! bit sets of states.

mod algebra;
mod determinize;
mod indexed;
mod interner;
mod model;
mod renumber;
mod simulate;
mod state;
mod symbol;

pub use algebra::UnionState;
pub use determinize::Subset;
pub use model::{Automaton, StateTransitions, Transitions};
pub use symbol::Symbol;
