//! State relabeling.

use crate::automaton::interner::Interner;
use crate::automaton::model::Automaton;
use std::hash::Hash;

impl<S, A> Automaton<S, A>
where
    S: Clone + Eq + Hash,
    A: Clone + Eq + Hash,
{
    /// Rename every state occurrence through `f`.
    ///
    /// `f` must be injective on the states it is called with, otherwise
    /// distinct states merge. The alphabet is untouched.
    pub fn map_states<T, F>(&self, mut f: F) -> Automaton<T, A>
    where
        T: Clone + Eq + Hash,
        F: FnMut(&S) -> T,
    {
        let states: Vec<T> = self.states().iter().map(&mut f).collect();
        let initial_state = f(self.initial_state());
        let final_states: Vec<T> = self.final_states().iter().map(&mut f).collect();
        let transitions: Vec<_> = self
            .transition_triples()
            .map(|(source, symbol, destination)| (f(source), symbol.clone(), f(destination)))
            .collect();

        Automaton::new(
            states,
            self.alphabet().iter().cloned(),
            transitions,
            initial_state,
            final_states,
        )
    }

    /// Relabel the states as `prefix0 .. prefix{n-1}`.
    ///
    /// States are numbered in declaration order. A token that is referenced
    /// but never declared gets the next free number and stays undeclared,
    /// so [`Automaton::is_valid`] gives the same answer before and after.
    pub fn renumber(&self, prefix: &str) -> Automaton<String, A> {
        let mut numbering = Interner::with_declared(self.states());
        self.map_states(|state| format!("{prefix}{}", numbering.intern(state)))
    }
}

impl<A> Automaton<String, A>
where
    A: Clone + Eq + Hash,
{
    /// [`Automaton::renumber`] that replaces `self`.
    pub fn renumber_in_place(&mut self, prefix: &str) {
        *self = self.renumber(prefix);
    }
}
