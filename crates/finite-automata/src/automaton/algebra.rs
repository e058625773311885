//! Product, intersection and union of two automata.

use crate::automaton::indexed::Indexed;
use crate::automaton::model::Automaton;
use crate::automaton::state::StateId;
use crate::automaton::symbol::{EPSILON, Symbol, SymbolId};
use crate::error::{Error, Operand, Result};
use indexmap::IndexSet;
use log::debug;
use std::collections::VecDeque;
use std::fmt;
use std::hash::Hash;

/// A state of a union automaton.
///
/// The two operands' states live in separate variants, so they never
/// collide even when both use the same names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum UnionState<S, T> {
    /// The fresh initial state with epsilon moves into both operands.
    Initial,
    Left(S),
    Right(T),
}

impl<S: fmt::Display, T: fmt::Display> fmt::Display for UnionState<S, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnionState::Initial => f.write_str("init"),
            UnionState::Left(s) => write!(f, "L.{s}"),
            UnionState::Right(t) => write!(f, "R.{t}"),
        }
    }
}

/// Register a pair state, queueing it if it is new. Returns its index.
fn enqueue(
    pairs: &mut IndexSet<(StateId, StateId)>,
    worklist: &mut VecDeque<usize>,
    pair: (StateId, StateId),
) -> usize {
    let (index, inserted) = pairs.insert_full(pair);
    if inserted {
        worklist.push_back(index);
    }
    index
}

fn check_operands<S, T, A>(left: &Automaton<S, A>, right: &Automaton<T, A>) -> Result<()>
where
    S: Clone + Eq + Hash,
    T: Clone + Eq + Hash,
    A: Clone + Eq + Hash,
{
    left.validate().map_err(|violation| Error::InvalidAutomaton {
        operand: Operand::Left,
        violation,
    })?;
    right.validate().map_err(|violation| Error::InvalidAutomaton {
        operand: Operand::Right,
        violation,
    })
}

impl<S, A> Automaton<S, A>
where
    S: Clone + Eq + Hash,
    A: Clone + Eq + Hash,
{
    /// Synchronized product over the shared alphabet.
    ///
    /// States are pairs `(a, b)` reachable from the pair of initial states.
    /// On a shared symbol both sides move together. An epsilon move of
    /// either side moves that side alone. A pair is final when both
    /// components are final, so the result accepts exactly the strings both
    /// operands accept.
    pub fn product<T>(&self, other: &Automaton<T, A>) -> Result<Automaton<(S, T), A>>
    where
        T: Clone + Eq + Hash,
    {
        check_operands(self, other)?;

        let left = Indexed::compile(self);
        let right = Indexed::compile(other);

        let alphabet: Vec<A> = self
            .alphabet()
            .iter()
            .filter(|a| other.alphabet().contains(*a))
            .cloned()
            .collect();
        let shared: Vec<(SymbolId, SymbolId)> = alphabet
            .iter()
            .filter_map(|a| Some((left.symbols.id(a)?, right.symbols.id(a)?)))
            .collect();

        let start = (left.nfa.start_state(), right.nfa.start_state());
        let mut pairs: IndexSet<(StateId, StateId)> = IndexSet::from([start]);
        let mut worklist = VecDeque::from([0usize]);
        // (source pair, index into `alphabet` or None for epsilon, target pair)
        let mut edges: Vec<(usize, Option<usize>, usize)> = Vec::new();

        while let Some(source) = worklist.pop_front() {
            let (p, q) = pairs[source];

            for (position, &(a, b)) in shared.iter().enumerate() {
                let (Some(left_targets), Some(right_targets)) =
                    (left.nfa.targets(p, a), right.nfa.targets(q, b))
                else {
                    continue;
                };
                for p2 in left_targets.iter() {
                    for q2 in right_targets.iter() {
                        let target = enqueue(&mut pairs, &mut worklist, (p2, q2));
                        edges.push((source, Some(position), target));
                    }
                }
            }

            if let Some(left_targets) = left.nfa.targets(p, EPSILON) {
                for p2 in left_targets.iter() {
                    let target = enqueue(&mut pairs, &mut worklist, (p2, q));
                    edges.push((source, None, target));
                }
            }
            if let Some(right_targets) = right.nfa.targets(q, EPSILON) {
                for q2 in right_targets.iter() {
                    let target = enqueue(&mut pairs, &mut worklist, (p, q2));
                    edges.push((source, None, target));
                }
            }
        }

        debug!(
            "product: {} x {} states -> {} reachable pairs, {} transitions",
            self.states().len(),
            other.states().len(),
            pairs.len(),
            edges.len()
        );

        // Every id in `pairs` is a start state or a transition target of the
        // compiled kernels, and compile interns all of those tokens
        let states: Vec<(S, T)> = pairs
            .iter()
            .map(|&(p, q)| (left.states.token(p).clone(), right.states.token(q).clone()))
            .collect();
        let final_states: Vec<(S, T)> = pairs
            .iter()
            .zip(&states)
            .filter(|&(&(p, q), _)| {
                left.nfa.final_states().contains(p) && right.nfa.final_states().contains(q)
            })
            .map(|(_, pair)| pair.clone())
            .collect();

        let transitions = edges.into_iter().map(|(source, position, target)| {
            let symbol = match position {
                Some(position) => Symbol::Char(alphabet[position].clone()),
                None => Symbol::Epsilon,
            };
            (states[source].clone(), symbol, states[target].clone())
        });

        Ok(Automaton::new(
            states.iter().cloned(),
            alphabet.iter().cloned(),
            transitions,
            (self.initial_state().clone(), other.initial_state().clone()),
            final_states,
        ))
    }

    /// Automaton for the strings accepted by both operands.
    ///
    /// This is the same construction as [`Automaton::product`]: the
    /// alphabet is the intersection of both alphabets and a pair is final
    /// when both components are.
    pub fn intersection<T>(&self, other: &Automaton<T, A>) -> Result<Automaton<(S, T), A>>
    where
        T: Clone + Eq + Hash,
    {
        self.product(other)
    }

    /// Automaton for the strings accepted by either operand.
    ///
    /// Both operands are carried over whole under [`UnionState::Left`] and
    /// [`UnionState::Right`], joined by a fresh initial state with epsilon
    /// moves to both original initial states.
    pub fn union<T>(&self, other: &Automaton<T, A>) -> Result<Automaton<UnionState<S, T>, A>>
    where
        T: Clone + Eq + Hash,
    {
        check_operands(self, other)?;

        let left: Automaton<UnionState<S, T>, A> = self.map_states(|s| UnionState::Left(s.clone()));
        let right: Automaton<UnionState<S, T>, A> =
            other.map_states(|t| UnionState::Right(t.clone()));

        let states = std::iter::once(UnionState::Initial)
            .chain(left.states().iter().cloned())
            .chain(right.states().iter().cloned());
        let alphabet = left
            .alphabet()
            .iter()
            .chain(right.alphabet())
            .cloned()
            .collect::<IndexSet<A>>();
        let transitions = [
            (
                UnionState::Initial,
                Symbol::Epsilon,
                left.initial_state().clone(),
            ),
            (
                UnionState::Initial,
                Symbol::Epsilon,
                right.initial_state().clone(),
            ),
        ]
        .into_iter()
        .chain(
            left.transition_triples()
                .chain(right.transition_triples())
                .map(|(s, symbol, d)| (s.clone(), symbol.clone(), d.clone())),
        );
        let final_states = left
            .final_states()
            .iter()
            .chain(right.final_states())
            .cloned();

        let union = Automaton::new(
            states,
            alphabet,
            transitions,
            UnionState::Initial,
            final_states,
        );
        debug!(
            "union: {} + {} states -> {} states",
            self.states().len(),
            other.states().len(),
            union.states().len()
        );
        Ok(union)
    }
}
