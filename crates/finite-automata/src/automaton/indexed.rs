//! Dense epsilon-NFA kernel that the public algorithms run on.
//!
//! An [`Automaton`] is compiled into an [`IndexedNfa`] by interning its state
//! and symbol tokens. Every algorithm then works on bit sets of dense ids
//! and only resolves ids back to tokens when it builds its result.

use crate::automaton::interner::Interner;
use crate::automaton::model::Automaton;
use crate::automaton::state::{StateId, StateSet};
use crate::automaton::symbol::{EPSILON, Symbol, SymbolId, is_epsilon};
use std::collections::{HashMap, VecDeque};
use std::hash::Hash;

/// An epsilon-NFA over dense ids with a single start state.
#[derive(Debug, Clone)]
pub(crate) struct IndexedNfa {
    /// Number of states (states are numbered 0..num_states)
    num_states: StateId,
    start_state: StateId,
    final_states: StateSet,
    /// Transitions: (source, symbol) -> set of destination states
    /// For epsilon transitions, symbol == EPSILON
    transitions: HashMap<(StateId, SymbolId), StateSet>,
    /// Symbols used by at least one transition (excluding epsilon), ascending
    alphabet: Vec<SymbolId>,
    /// Per-state epsilon closures, filled by [`IndexedNfa::compute_epsilon_closures`]
    epsilon_closures: Option<Vec<StateSet>>,
}

impl IndexedNfa {
    fn new(num_states: StateId, start_state: StateId) -> Self {
        Self {
            num_states,
            start_state,
            final_states: StateSet::with_capacity(num_states as usize),
            transitions: HashMap::new(),
            alphabet: Vec::new(),
            epsilon_closures: None,
        }
    }

    fn add_transition(&mut self, source: StateId, symbol: SymbolId, destination: StateId) {
        match self.alphabet.binary_search(&symbol) {
            Err(pos) if !is_epsilon(symbol) => self.alphabet.insert(pos, symbol),
            _ => {}
        }

        let capacity = self.num_states as usize;
        self.transitions
            .entry((source, symbol))
            .or_insert_with(|| StateSet::with_capacity(capacity))
            .insert(destination);
    }

    pub fn num_states(&self) -> StateId {
        self.num_states
    }

    pub fn start_state(&self) -> StateId {
        self.start_state
    }

    pub fn final_states(&self) -> &StateSet {
        &self.final_states
    }

    /// Symbols that label at least one transition, epsilon excluded.
    pub fn alphabet(&self) -> &[SymbolId] {
        &self.alphabet
    }

    /// Direct destinations of a single transition, without closure.
    pub fn targets(&self, source: StateId, symbol: SymbolId) -> Option<&StateSet> {
        self.transitions.get(&(source, symbol))
    }

    /// Epsilon closure of a set of states by a single DFS over epsilon edges.
    ///
    /// Only the states in the closure are visited.
    fn search_epsilon_closure(&self, states: &StateSet) -> StateSet {
        let mut closure = StateSet::with_capacity(self.num_states as usize);
        let mut stack: Vec<StateId> = states.iter().collect();

        while let Some(s) = stack.pop() {
            if !closure.insert(s) {
                continue;
            }

            if let Some(destinations) = self.targets(s, EPSILON) {
                stack.extend(destinations.iter().filter(|&d| !closure.contains(d)));
            }
        }

        closure
    }

    /// Compute and cache the epsilon closure of every state.
    ///
    /// Worth it only for callers that take the closure of every state, such
    /// as subset construction. Costs one `num_states`-bit set per state.
    pub fn compute_epsilon_closures(&mut self) {
        if self.epsilon_closures.is_some() {
            return;
        }

        let capacity = self.num_states as usize;
        let closures = (0..self.num_states)
            .map(|state| self.search_epsilon_closure(&StateSet::singleton(state, capacity)))
            .collect();
        self.epsilon_closures = Some(closures);
    }

    /// Get the epsilon closure of a set of states.
    ///
    /// Uses the per-state cache when it was computed, otherwise searches.
    pub fn epsilon_closure(&self, states: &StateSet) -> StateSet {
        let Some(cached) = &self.epsilon_closures else {
            return self.search_epsilon_closure(states);
        };

        let mut closure = StateSet::with_capacity(self.num_states as usize);
        for state in states.iter() {
            if let Some(single) = cached.get(state as usize) {
                closure.union_with(single);
            }
        }
        closure
    }

    /// Epsilon closure of the start state.
    pub fn initial_closure(&self) -> StateSet {
        self.epsilon_closure(&StateSet::singleton(
            self.start_state,
            self.num_states as usize,
        ))
    }

    /// Get the states reachable from a set of states on a given symbol.
    /// Returns the epsilon closure of the reached states.
    pub fn move_on_symbol(&self, states: &StateSet, symbol: SymbolId) -> StateSet {
        debug_assert!(!is_epsilon(symbol), "Use epsilon_closure for epsilon moves");

        let mut reached = StateSet::with_capacity(self.num_states as usize);
        for state in states.iter() {
            if let Some(destinations) = self.targets(state, symbol) {
                reached.union_with(destinations);
            }
        }

        self.epsilon_closure(&reached)
    }

    /// Run the frontier simulation over a sequence of symbols.
    ///
    /// `None` stands for a symbol this automaton has never seen; it has no
    /// transitions, so the frontier empties and the input is rejected.
    pub fn accepts<I>(&self, input: I) -> bool
    where
        I: IntoIterator<Item = Option<SymbolId>>,
    {
        let mut frontier = self.initial_closure();

        for symbol in input {
            let Some(symbol) = symbol else {
                return false;
            };
            frontier = self.move_on_symbol(&frontier, symbol);
            if frontier.is_empty() {
                return false;
            }
        }

        frontier.intersects(&self.final_states)
    }

    /// Check if the NFA accepts no string at all.
    /// Uses BFS from the start state following all transitions, epsilon included.
    pub fn is_empty(&self) -> bool {
        if self.final_states.is_empty() {
            return true;
        }

        let mut visited = StateSet::with_capacity(self.num_states as usize);
        let mut queue = VecDeque::from([self.start_state]);

        while let Some(state) = queue.pop_front() {
            if !visited.insert(state) {
                continue;
            }

            if self.final_states.contains(state) {
                return false;
            }

            for &symbol in self.alphabet.iter().chain([&EPSILON]) {
                if let Some(destinations) = self.targets(state, symbol) {
                    queue.extend(destinations.iter().filter(|&d| !visited.contains(d)));
                }
            }
        }

        true
    }
}

/// An [`IndexedNfa`] together with the interners that produced it.
#[derive(Debug, Clone)]
pub(crate) struct Indexed<S, A> {
    pub nfa: IndexedNfa,
    pub states: Interner<S>,
    pub symbols: Interner<A>,
}

impl<S, A> Indexed<S, A>
where
    S: Clone + Eq + Hash,
    A: Clone + Eq + Hash,
{
    /// Intern every token of `automaton` and build the dense kernel.
    ///
    /// Declared states and symbols get the lowest ids; tokens that only
    /// appear in transitions or as initial/final states are interned after
    /// them, so malformed automata still compile.
    pub fn compile(automaton: &Automaton<S, A>) -> Self {
        let mut states = Interner::with_declared(automaton.states());
        let mut symbols = Interner::with_declared(automaton.alphabet());

        let start = states.intern(automaton.initial_state());
        let finals: Vec<StateId> = automaton
            .final_states()
            .iter()
            .map(|state| states.intern(state))
            .collect();

        let mut edges = Vec::new();
        for (source, symbol, destination) in automaton.transition_triples() {
            let src = states.intern(source);
            let dst = states.intern(destination);
            let sym = match symbol {
                Symbol::Epsilon => EPSILON,
                Symbol::Char(a) => symbols.intern(a),
            };
            edges.push((src, sym, dst));
        }

        let mut nfa = IndexedNfa::new(states.len() as StateId, start);
        for state in finals {
            nfa.final_states.insert(state);
        }
        for (src, sym, dst) in edges {
            nfa.add_transition(src, sym, dst);
        }

        Self {
            nfa,
            states,
            symbols,
        }
    }

    /// Resolve a set of dense ids back to state tokens, in id order.
    pub fn resolve_states(&self, set: &StateSet) -> Vec<S> {
        set.iter()
            .filter_map(|id| self.states.resolve(id))
            .cloned()
            .collect()
    }
}
