//! Epsilon closure and membership testing.

use crate::automaton::indexed::Indexed;
use crate::automaton::model::Automaton;
use crate::automaton::state::StateSet;
use crate::error::{Error, Result};
use indexmap::IndexSet;
use std::borrow::Borrow;
use std::hash::Hash;

impl<S, A> Automaton<S, A>
where
    S: Clone + Eq + Hash,
    A: Clone + Eq + Hash,
{
    /// States reachable from `state` through zero or more epsilon moves,
    /// `state` included.
    pub fn epsilon_closure(&self, state: &S) -> Result<IndexSet<S>> {
        let indexed = Indexed::compile(self);
        let id = indexed
            .states
            .declared_id(state)
            .ok_or(Error::StateNotFound)?;
        let closure = indexed
            .nfa
            .epsilon_closure(&StateSet::singleton(id, indexed.states.len()));

        Ok(indexed.resolve_states(&closure).into_iter().collect())
    }

    /// Decide whether the automaton accepts `input`.
    ///
    /// The automaton is simulated over a frontier of possible states.
    /// Symbols outside the alphabet have no transitions and reject.
    pub fn accept<I>(&self, input: I) -> bool
    where
        I: IntoIterator,
        I::Item: Borrow<A>,
    {
        let indexed = Indexed::compile(self);
        let symbols = input
            .into_iter()
            .map(|symbol| indexed.symbols.id(symbol.borrow()));
        indexed.nfa.accepts(symbols)
    }
}

impl<S> Automaton<S, char>
where
    S: Clone + Eq + Hash,
{
    /// [`Automaton::accept`] over the characters of `input`.
    pub fn accepts_str(&self, input: &str) -> bool {
        self.accept(input.chars())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::automaton::symbol::Symbol::{self, Char, Epsilon};

    /// Strings over {0,1} containing "11" or "101".
    fn contains_double_one() -> Automaton<&'static str, char> {
        Automaton::new(
            ["q1", "q2", "q3", "q4"],
            ['0', '1'],
            [
                ("q1", Char('0'), "q1"),
                ("q1", Char('1'), "q1"),
                ("q1", Char('1'), "q2"),
                ("q2", Char('0'), "q3"),
                ("q2", Epsilon, "q3"),
                ("q3", Char('1'), "q4"),
                ("q4", Char('0'), "q4"),
                ("q4", Char('1'), "q4"),
            ],
            "q1",
            ["q4"],
        )
    }

    #[test]
    fn test_epsilon_closure() {
        let automaton = contains_double_one();
        let closure = automaton.epsilon_closure(&"q2").unwrap();
        assert_eq!(closure, IndexSet::from(["q2", "q3"]));

        let closure = automaton.epsilon_closure(&"q4").unwrap();
        assert_eq!(closure, IndexSet::from(["q4"]));
    }

    #[test]
    fn test_epsilon_closure_cycle_terminates() {
        let automaton = Automaton::new(
            [0, 1, 2],
            Vec::<char>::new(),
            [(0, Epsilon, 1), (1, Epsilon, 2), (2, Epsilon, 0)],
            0,
            [],
        );
        assert_eq!(automaton.epsilon_closure(&1).unwrap().len(), 3);
    }

    #[test]
    fn test_epsilon_closure_unknown_state() {
        let automaton = contains_double_one();
        assert_eq!(automaton.epsilon_closure(&"q9"), Err(Error::StateNotFound));
    }

    #[test]
    fn test_accept() {
        let automaton = contains_double_one();
        assert!(automaton.accepts_str("000001100001"));
        assert!(automaton.accepts_str("0000011"));
        assert!(automaton.accepts_str("101"));
        assert!(!automaton.accepts_str("000001"));
        assert!(!automaton.accepts_str("1001"));
    }

    #[test]
    fn test_accept_empty_string() {
        assert!(!contains_double_one().accepts_str(""));

        let nullable = Automaton::new([0, 1], ['a'], [(0, Epsilon, 1)], 0, [1]);
        assert!(nullable.accepts_str(""));
        assert!(!nullable.accepts_str("a"));
    }

    #[test]
    fn test_accept_unknown_symbol() {
        let automaton = contains_double_one();
        assert!(!automaton.accepts_str("11x"));
        assert!(!automaton.accepts_str("x11"));
    }

    /// `0 -label-> 1 -label-> ... -> len - 1`, final at the end.
    fn long_chain(len: u32, label: Symbol<char>) -> Automaton<u32, char> {
        Automaton::new(
            0..len,
            ['a'],
            (1..len).map(|i| (i - 1, label, i)),
            0,
            [len - 1],
        )
    }

    #[test]
    fn test_long_chain_queries_touch_only_reached_states() {
        let len = 100_000;

        let chain = long_chain(len, Char('a'));
        assert!(!chain.accepts_str("a"));
        assert!(!chain.accepts_str("aaa"));
        assert!(!chain.accepts_str("b"));
        assert_eq!(chain.epsilon_closure(&0).unwrap(), IndexSet::from([0]));
        assert_eq!(
            chain.epsilon_closure(&(len - 1)).unwrap(),
            IndexSet::from([len - 1])
        );

        let epsilon_chain = long_chain(len, Epsilon);
        assert!(epsilon_chain.accepts_str(""));
        assert!(!epsilon_chain.accepts_str("a"));
        assert_eq!(epsilon_chain.epsilon_closure(&0).unwrap().len(), len as usize);
        assert_eq!(
            epsilon_chain.epsilon_closure(&(len - 2)).unwrap(),
            IndexSet::from([len - 2, len - 1])
        );
    }

    #[test]
    fn test_accept_multi_character_symbols() {
        let automaton = Automaton::new(
            ["0", "1", "2", "3", "4"],
            ["AA", "BB", "CC", "DD"],
            [
                ("0", Char("AA"), "1"),
                ("1", Char("BB"), "2"),
                ("2", Char("CC"), "3"),
                ("3", Epsilon, "1"),
                ("3", Char("DD"), "4"),
            ],
            "0",
            ["4"],
        );

        assert!(automaton.accept(["AA", "BB", "CC", "DD"]));
        assert!(automaton.accept(["AA", "BB", "CC", "BB", "CC", "DD"]));
        assert!(!automaton.accept(["AA", "BB", "CC"]));
        assert!(!automaton.accept(["AA", "CC", "DD"]));
    }
}
