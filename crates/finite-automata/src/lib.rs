//! Nondeterministic finite automata with epsilon moves.
//!
//! ```
//! use finite_automata::{Automaton, Symbol};
//!
//! // strings over {a, b} ending in "ab"
//! let nfa = Automaton::new(
//!     [0, 1, 2],
//!     ['a', 'b'],
//!     [
//!         (0, Symbol::Char('a'), 0),
//!         (0, Symbol::Char('b'), 0),
//!         (0, Symbol::Char('a'), 1),
//!         (1, Symbol::Char('b'), 2),
//!     ],
//!     0,
//!     [2],
//! );
//! assert!(nfa.is_valid());
//! assert!(nfa.accepts_str("abab"));
//!
//! let dfa = nfa.get_dfa();
//! assert!(dfa.is_deterministic());
//! assert!(!dfa.accepts_str("aba"));
//! ```

pub mod automaton;
pub mod error;

pub use automaton::{Automaton, Subset, Symbol, UnionState};
pub use error::{Error, Operand, Result, Violation};
