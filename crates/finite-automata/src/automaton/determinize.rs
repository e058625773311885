//! Epsilon removal and subset construction.

use crate::automaton::indexed::Indexed;
use crate::automaton::model::Automaton;
use crate::automaton::state::{StateId, StateSet};
use crate::automaton::symbol::{Symbol, SymbolId};
use indexmap::IndexMap;
use log::{debug, trace};
use std::collections::VecDeque;
use std::fmt;
use std::hash::Hash;

/// A state of a determinized automaton: the set of source states it stands
/// for, listed in the source automaton's declaration order.
///
/// Two subsets are equal exactly when they hold the same members.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Subset<S>(Vec<S>);

impl<S> Subset<S> {
    pub fn members(&self) -> &[S] {
        &self.0
    }

    pub fn into_members(self) -> Vec<S> {
        self.0
    }
}

impl<S: fmt::Display> fmt::Display for Subset<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (i, member) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            member.fmt(f)?;
        }
        f.write_str("}")
    }
}

impl<S, A> Automaton<S, A>
where
    S: Clone + Eq + Hash,
    A: Clone + Eq + Hash,
{
    /// Build an equivalent automaton without epsilon moves.
    ///
    /// Every state keeps its name. Its transitions on `a` lead to the
    /// closure of everything its own epsilon closure reaches on `a`, and it
    /// is final when its closure contains a final state.
    pub fn remove_epsilon_transitions(&self) -> Automaton<S, A> {
        let mut indexed = Indexed::compile(self);
        indexed.nfa.compute_epsilon_closures();
        let nfa = &indexed.nfa;
        let capacity = nfa.num_states() as usize;

        let mut transitions = Vec::new();
        let mut final_states = Vec::new();

        for state in self.states() {
            let Some(id) = indexed.states.id(state) else {
                continue;
            };
            let closure = nfa.epsilon_closure(&StateSet::singleton(id, capacity));

            if closure.intersects(nfa.final_states()) {
                final_states.push(state.clone());
            }

            for &symbol in nfa.alphabet() {
                let Some(token) = indexed.symbols.resolve(symbol) else {
                    continue;
                };
                let reached = nfa.move_on_symbol(&closure, symbol);
                for destination in indexed.resolve_states(&reached) {
                    transitions.push((state.clone(), Symbol::Char(token.clone()), destination));
                }
            }
        }

        Automaton::new(
            self.states().iter().cloned(),
            self.alphabet().iter().cloned(),
            transitions,
            self.initial_state().clone(),
            final_states,
        )
    }

    /// Convert to a DFA using the powerset construction.
    ///
    /// Only subsets reachable from the closure of the initial state are
    /// built. The result has no epsilon moves and at most one transition
    /// per (state, symbol); a subset is final when it holds a final state.
    pub fn get_dfa(&self) -> Automaton<Subset<S>, A> {
        let mut indexed = Indexed::compile(self);
        indexed.nfa.compute_epsilon_closures();
        let nfa = &indexed.nfa;

        let symbols: Vec<(SymbolId, &A)> = self
            .alphabet()
            .iter()
            .filter_map(|a| indexed.symbols.id(a).map(|id| (id, a)))
            .collect();

        // Each DFA state corresponds to a set of NFA states, numbered by
        // discovery order
        let mut discovered: IndexMap<Vec<StateId>, StateSet> = IndexMap::new();
        let initial = nfa.initial_closure();
        discovered.insert(initial.to_vec(), initial);

        let mut worklist = VecDeque::from([0usize]);
        let mut edges: Vec<(usize, &A, usize)> = Vec::new();

        while let Some(current) = worklist.pop_front() {
            let current_set = discovered[current].clone();

            for &(symbol, token) in &symbols {
                let next = nfa.move_on_symbol(&current_set, symbol);
                if next.is_empty() {
                    continue;
                }

                let key = next.to_vec();
                let target = match discovered.get_index_of(&key) {
                    Some(existing) => existing,
                    None => {
                        trace!("discovered subset {next:?}");
                        let (index, _) = discovered.insert_full(key, next);
                        worklist.push_back(index);
                        index
                    }
                };
                edges.push((current, token, target));
            }
        }

        debug!(
            "subset construction: {} states -> {} subsets, {} transitions",
            self.states().len(),
            discovered.len(),
            edges.len()
        );

        let subsets: Vec<Subset<S>> = discovered
            .values()
            .map(|set| Subset(indexed.resolve_states(set)))
            .collect();
        let final_states: Vec<Subset<S>> = discovered
            .values()
            .zip(&subsets)
            .filter(|(set, _)| set.intersects(nfa.final_states()))
            .map(|(_, subset)| subset.clone())
            .collect();
        let transitions = edges.into_iter().map(|(source, token, target)| {
            (
                subsets[source].clone(),
                Symbol::Char(token.clone()),
                subsets[target].clone(),
            )
        });

        Automaton::new(
            subsets.iter().cloned(),
            self.alphabet().iter().cloned(),
            transitions,
            subsets[0].clone(),
            final_states,
        )
    }
}
