#![forbid(missing_docs)]
//! The `dfagen` crate compiles regular expressions, written against a fixed
//! finite alphabet, into deterministic finite automata. The compiled
//! automaton classifies input strings as accepted or rejected and reports
//! the sequence of states visited while scanning a string.
//!
//! The pipeline is: syntactic validation, infix-to-postfix rewriting,
//! Thompson construction of an NFA and subset construction of the DFA.

/// Module with error definitions
mod errors;
pub use errors::{
    AlphabetError, ConfigError, DfaGenError, DfaGenErrorKind, Result, SyntaxError,
};

/// Module with id types that can also be used to index into slices.
mod ids;
pub use ids::DfaStateID;

/// Module with the alphabet and the pre-compilation syntax checks.
mod alphabet;
pub use alphabet::Alphabet;

/// Module with the infix-to-postfix rewriter.
mod postfix;

/// The nfa module contains the NFA implementation and Thompson construction.
mod nfa;

/// The dfa module contains the DFA implementation and subset construction.
mod dfa;
pub use dfa::{Dfa, TransitionTableRow};

/// Module with the automaton facade exposing matching and tracing.
mod automaton;
pub use automaton::Automaton;

/// Module with the compiler driving the construction pipeline.
mod compiler;
pub use compiler::Compiler;

/// Module with conversion to graphviz dot format
mod dot;
pub use dot::dfa_render_to;
