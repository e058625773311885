//! Symbol types for automata transitions.

use std::fmt;

/// The label of a transition: either an epsilon move or an alphabet symbol.
///
/// Epsilon is a variant of its own, so no alphabet token (not even an empty
/// string) can be mistaken for it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Symbol<A> {
    /// Taken without consuming input.
    Epsilon,
    Char(A),
}

impl<A> Symbol<A> {
    pub fn is_epsilon(&self) -> bool {
        matches!(self, Symbol::Epsilon)
    }

    /// The alphabet token carried by this label, if any.
    pub fn as_char(&self) -> Option<&A> {
        match self {
            Symbol::Epsilon => None,
            Symbol::Char(a) => Some(a),
        }
    }
}

impl<A> From<A> for Symbol<A> {
    fn from(a: A) -> Self {
        Symbol::Char(a)
    }
}

impl<A: fmt::Display> fmt::Display for Symbol<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Symbol::Epsilon => f.write_str("ε"),
            Symbol::Char(a) => a.fmt(f),
        }
    }
}

/// A dense symbol identifier inside the indexed kernel.
pub(crate) type SymbolId = u32;

/// Reserved kernel id for epsilon moves.
pub(crate) const EPSILON: SymbolId = u32::MAX;

#[inline]
pub(crate) fn is_epsilon(symbol: SymbolId) -> bool {
    symbol == EPSILON
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_epsilon() {
        assert!(is_epsilon(EPSILON));
        assert!(!is_epsilon(0));
        assert!(!is_epsilon(100));
    }

    #[test]
    fn test_symbol_variants() {
        let eps: Symbol<&str> = Symbol::Epsilon;
        let empty = Symbol::Char("");
        assert!(eps.is_epsilon());
        assert!(!empty.is_epsilon());
        assert_ne!(eps, empty);
        assert_eq!(empty.as_char(), Some(&""));
        assert_eq!(Symbol::from('a'), Symbol::Char('a'));
    }

    #[test]
    fn test_display() {
        assert_eq!(Symbol::Char('x').to_string(), "x");
        assert_eq!(Symbol::<char>::Epsilon.to_string(), "ε");
    }
}
