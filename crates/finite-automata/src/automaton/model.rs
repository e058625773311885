//! The automaton value type and its structural invariants.

use crate::automaton::indexed::Indexed;
use crate::automaton::symbol::Symbol;
use crate::error::Violation;
use indexmap::{IndexMap, IndexSet};
use std::hash::Hash;

/// Outgoing transitions of one state: label -> destination states.
pub type StateTransitions<S, A> = IndexMap<Symbol<A>, IndexSet<S>>;

/// The full transition relation: source -> label -> destination states.
pub type Transitions<S, A> = IndexMap<S, StateTransitions<S, A>>;

/// A nondeterministic finite automaton with epsilon moves.
///
/// States and symbols are arbitrary tokens. The value is immutable once
/// built; every algorithm returns a new automaton. Construction performs no
/// checks, call [`Automaton::is_valid`] before relying on the other
/// operations.
///
/// Sets keep their insertion order, which makes every derived automaton
/// deterministic in layout. Equality ignores that order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Automaton<S, A>
where
    S: Hash + Eq,
    A: Hash + Eq,
{
    states: IndexSet<S>,
    alphabet: IndexSet<A>,
    transitions: Transitions<S, A>,
    initial_state: S,
    final_states: IndexSet<S>,
}

impl<S, A> Automaton<S, A>
where
    S: Clone + Eq + Hash,
    A: Clone + Eq + Hash,
{
    /// Build an automaton from explicit sets and `(source, label, destination)`
    /// triples. Duplicate triples collapse.
    pub fn new(
        states: impl IntoIterator<Item = S>,
        alphabet: impl IntoIterator<Item = A>,
        transitions: impl IntoIterator<Item = (S, Symbol<A>, S)>,
        initial_state: S,
        final_states: impl IntoIterator<Item = S>,
    ) -> Self {
        let mut relation: Transitions<S, A> = IndexMap::new();
        for (source, symbol, destination) in transitions {
            relation
                .entry(source)
                .or_default()
                .entry(symbol)
                .or_default()
                .insert(destination);
        }

        Self {
            states: states.into_iter().collect(),
            alphabet: alphabet.into_iter().collect(),
            transitions: relation,
            initial_state,
            final_states: final_states.into_iter().collect(),
        }
    }

    pub fn states(&self) -> &IndexSet<S> {
        &self.states
    }

    /// The input symbols; epsilon is never part of it.
    pub fn alphabet(&self) -> &IndexSet<A> {
        &self.alphabet
    }

    pub fn transitions(&self) -> &Transitions<S, A> {
        &self.transitions
    }

    pub fn initial_state(&self) -> &S {
        &self.initial_state
    }

    pub fn final_states(&self) -> &IndexSet<S> {
        &self.final_states
    }

    /// Direct destinations of `state` on `symbol`, without epsilon closure.
    pub fn targets(&self, state: &S, symbol: &Symbol<A>) -> Option<&IndexSet<S>> {
        self.transitions.get(state)?.get(symbol)
    }

    /// Get all transitions as a flat iterator.
    pub fn transition_triples(&self) -> impl Iterator<Item = (&S, &Symbol<A>, &S)> + '_ {
        self.transitions.iter().flat_map(|(source, by_symbol)| {
            by_symbol.iter().flat_map(move |(symbol, destinations)| {
                destinations
                    .iter()
                    .map(move |destination| (source, symbol, destination))
            })
        })
    }

    /// Check every structural invariant, naming the first one that fails.
    pub fn validate(&self) -> Result<(), Violation> {
        if !self.states.contains(&self.initial_state) {
            return Err(Violation::UnknownInitialState);
        }
        if !self.final_states.is_subset(&self.states) {
            return Err(Violation::UnknownFinalState);
        }

        for (source, by_symbol) in &self.transitions {
            if !self.states.contains(source) {
                return Err(Violation::UnknownSource);
            }
            for (symbol, destinations) in by_symbol {
                if symbol.as_char().is_some_and(|a| !self.alphabet.contains(a)) {
                    return Err(Violation::UnknownSymbol);
                }
                if !destinations.iter().all(|d| self.states.contains(d)) {
                    return Err(Violation::UnknownDestination);
                }
            }
        }

        Ok(())
    }

    /// Returns `true` iff every structural invariant holds.
    pub fn is_valid(&self) -> bool {
        self.validate().is_ok()
    }

    /// No epsilon moves and at most one destination per (state, symbol).
    pub fn is_deterministic(&self) -> bool {
        self.transitions.values().all(|by_symbol| {
            by_symbol
                .iter()
                .all(|(symbol, destinations)| !symbol.is_epsilon() && destinations.len() <= 1)
        })
    }

    /// Check if the automaton accepts no string at all.
    pub fn is_empty(&self) -> bool {
        Indexed::compile(self).nfa.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use Symbol::{Char, Epsilon};

    fn sample() -> Automaton<&'static str, char> {
        Automaton::new(
            ["q1", "q2", "q3"],
            ['0', '1'],
            [
                ("q1", Char('0'), "q1"),
                ("q1", Char('1'), "q1"),
                ("q1", Char('1'), "q2"),
                ("q2", Epsilon, "q3"),
            ],
            "q1",
            ["q3"],
        )
    }

    #[test]
    fn test_construction_groups_transitions() {
        let automaton = sample();
        assert_eq!(automaton.transitions().len(), 2);
        assert_eq!(automaton.targets(&"q1", &Char('1')).map(|d| d.len()), Some(2));
        assert_eq!(automaton.targets(&"q3", &Char('1')), None);
        assert_eq!(automaton.transition_triples().count(), 4);
    }

    #[test]
    fn test_valid() {
        assert_eq!(sample().validate(), Ok(()));
        assert!(sample().is_valid());
    }

    #[test]
    fn test_unknown_initial_state() {
        let automaton = Automaton::new(["a"], ['x'], [], "b", []);
        assert_eq!(automaton.validate(), Err(Violation::UnknownInitialState));
    }

    #[test]
    fn test_unknown_final_state() {
        let automaton = Automaton::new(["a"], ['x'], [], "a", ["b"]);
        assert_eq!(automaton.validate(), Err(Violation::UnknownFinalState));
    }

    #[test]
    fn test_unknown_source() {
        let automaton = Automaton::new(["a"], ['x'], [("b", Char('x'), "a")], "a", []);
        assert_eq!(automaton.validate(), Err(Violation::UnknownSource));
    }

    #[test]
    fn test_unknown_symbol() {
        let automaton = Automaton::new(["a"], ['x'], [("a", Char('y'), "a")], "a", []);
        assert_eq!(automaton.validate(), Err(Violation::UnknownSymbol));
    }

    #[test]
    fn test_epsilon_needs_no_alphabet_entry() {
        let automaton = Automaton::new(
            ["a", "b"],
            Vec::<char>::new(),
            [("a", Epsilon, "b")],
            "a",
            ["b"],
        );
        assert!(automaton.is_valid());
    }

    #[test]
    fn test_unknown_destination() {
        let automaton = Automaton::new(["a"], ['x'], [("a", Char('x'), "c")], "a", []);
        assert_eq!(automaton.validate(), Err(Violation::UnknownDestination));
    }

    #[test]
    fn test_empty_string_symbol_is_not_epsilon() {
        let automaton = Automaton::new(["a", "b"], [""], [("a", Char(""), "b")], "a", ["b"]);
        assert!(automaton.is_valid());
        assert!(automaton.targets(&"a", &Epsilon).is_none());
    }

    #[test]
    fn test_is_deterministic() {
        assert!(!sample().is_deterministic());

        let dfa = Automaton::new(
            [0, 1],
            ['a'],
            [(0, Char('a'), 1), (1, Char('a'), 0)],
            0,
            [1],
        );
        assert!(dfa.is_deterministic());
    }

    #[test]
    fn test_is_empty() {
        assert!(!sample().is_empty());

        let unreachable = Automaton::new([0, 1], ['a'], [(1, Char('a'), 1)], 0, [1]);
        assert!(unreachable.is_empty());

        let no_finals = Automaton::new([0], ['a'], [(0, Char('a'), 0)], 0, []);
        assert!(no_finals.is_empty());
    }

    #[test]
    fn test_equality_ignores_order() {
        let a = Automaton::new([1, 2], ['a'], [(1, Char('a'), 2)], 1, [2]);
        let b = Automaton::new([2, 1], ['a'], [(1, Char('a'), 2)], 1, [2]);
        assert_eq!(a, b);
    }
}
