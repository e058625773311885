use thiserror::Error;

/// A structural invariant an automaton can break.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Violation {
    #[error("initial state is not a member of the state set")]
    UnknownInitialState,
    #[error("a final state is not a member of the state set")]
    UnknownFinalState,
    #[error("a transition leaves a state outside the state set")]
    UnknownSource,
    #[error("a transition is labeled with a symbol outside the alphabet")]
    UnknownSymbol,
    #[error("a transition enters a state outside the state set")]
    UnknownDestination,
}

/// Which input of a binary operation was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operand {
    Left,
    Right,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error("state not found in automaton")]
    StateNotFound,
    #[error("invalid automaton ({operand:?} operand): {violation}")]
    InvalidAutomaton {
        operand: Operand,
        #[source]
        violation: Violation,
    },
}

pub type Result<T> = std::result::Result<T, Error>;
