//! Two-way mapping between caller tokens and dense kernel ids.

use indexmap::IndexSet;
use std::hash::Hash;

/// Assigns dense ids to tokens in first-seen order.
///
/// Tokens passed to [`Interner::with_declared`] occupy the lowest ids.
/// Tokens interned later are undeclared: they still get ids, so malformed
/// automata compile, but [`Interner::declared_id`] does not report them.
#[derive(Debug, Clone)]
pub(crate) struct Interner<T> {
    tokens: IndexSet<T>,
    declared: usize,
}

impl<T: Clone + Eq + Hash> Interner<T> {
    /// Create an interner whose first ids are the given tokens.
    pub fn with_declared<'a, I>(declared: I) -> Self
    where
        I: IntoIterator<Item = &'a T>,
        T: 'a,
    {
        let tokens: IndexSet<T> = declared.into_iter().cloned().collect();
        let declared = tokens.len();
        Self { tokens, declared }
    }

    /// Get the id of a token, registering it as undeclared if unseen.
    pub fn intern(&mut self, token: &T) -> u32 {
        if let Some(id) = self.tokens.get_index_of(token) {
            return id as u32;
        }
        let (id, _) = self.tokens.insert_full(token.clone());
        id as u32
    }

    /// Look up the id of an already-registered token.
    pub fn id(&self, token: &T) -> Option<u32> {
        self.tokens.get_index_of(token).map(|id| id as u32)
    }

    /// Look up the id of a token only if it was declared.
    pub fn declared_id(&self, token: &T) -> Option<u32> {
        self.id(token).filter(|&id| (id as usize) < self.declared)
    }

    /// Resolve an id back to its token.
    pub fn resolve(&self, id: u32) -> Option<&T> {
        self.tokens.get_index(id as usize)
    }

    /// Resolve an id handed out by this interner.
    ///
    /// Panics if the id did not come from this interner.
    pub fn token(&self, id: u32) -> &T {
        &self.tokens[id as usize]
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }
}
