//! This module contains the automaton facade returned by a successful
//! compilation. It owns the constructed DFA and answers membership and
//! state-trace queries; the intermediate NFA is gone by the time an
//! `Automaton` exists.

use crate::alphabet::Alphabet;
use crate::dfa::{Dfa, TransitionTableRow};
use crate::errors::AlphabetError;
use crate::ids::DfaStateID;
use crate::Result;

/// A compiled, immutable automaton.
///
/// All queries are read-only, so one automaton can serve concurrent callers
/// without synchronization.
#[derive(Debug, Clone)]
pub struct Automaton {
    dfa: Dfa,
}

impl Automaton {
    pub(crate) fn new(dfa: Dfa) -> Self {
        Self { dfa }
    }

    /// Get the alphabet the automaton was compiled against.
    pub fn alphabet(&self) -> &Alphabet {
        self.dfa.alphabet()
    }

    /// Check whether the automaton accepts the given input.
    ///
    /// Returns an `AlphabetError` if the input contains a symbol outside the
    /// configured alphabet; the automaton stays usable afterwards. The empty
    /// input is accepted iff the start state is a final state.
    pub fn matches(&self, input: &str) -> Result<bool> {
        let symbols = self.check_input(input)?;
        let mut state = self.dfa.start_state();
        for symbol_index in symbols {
            state = self.dfa.target(state, symbol_index);
        }
        Ok(self.dfa.is_final(state))
    }

    /// Get the sequence of states visited while scanning the given input,
    /// starting with the start state and appending one state per consumed
    /// symbol. The trace of `s` has length `|s| + 1`.
    ///
    /// Returns an `AlphabetError` and no partial trace if the input contains
    /// a symbol outside the configured alphabet.
    pub fn trace(&self, input: &str) -> Result<Vec<DfaStateID>> {
        let symbols = self.check_input(input)?;
        let mut state = self.dfa.start_state();
        let mut visited = Vec::with_capacity(symbols.len() + 1);
        visited.push(state);
        for symbol_index in symbols {
            state = self.dfa.target(state, symbol_index);
            visited.push(state);
        }
        Ok(visited)
    }

    /// A read-only projection of the DFA transition table for external
    /// printing. Not used by the matching algorithm.
    pub fn transition_table(&self) -> Vec<TransitionTableRow> {
        self.dfa.transition_table()
    }

    /// Map the input to alphabet column indices, rejecting any symbol that
    /// is not a member of the alphabet before the walk starts.
    fn check_input(&self, input: &str) -> Result<Vec<usize>> {
        input
            .chars()
            .map(|c| {
                self.alphabet()
                    .index_of(c)
                    .ok_or_else(|| AlphabetError::SymbolNotInAlphabet(c).into())
            })
            .collect()
    }
}

impl std::fmt::Display for Automaton {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.dfa)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::DfaGenErrorKind;
    use crate::Compiler;

    fn compile(regex: &str) -> Automaton {
        Compiler::new("0ab").unwrap().compile(regex).unwrap()
    }

    #[test]
    fn test_union_matches() {
        let automaton = compile("a+b");
        assert!(automaton.matches("a").unwrap());
        assert!(automaton.matches("b").unwrap());
        assert!(!automaton.matches("").unwrap());
        assert!(!automaton.matches("ab").unwrap());
    }

    #[test]
    fn test_out_of_alphabet_input() {
        let automaton = compile("a+b");
        let result = automaton.matches("c");
        assert_eq!(
            *result.unwrap_err().source,
            DfaGenErrorKind::Alphabet(AlphabetError::SymbolNotInAlphabet('c'))
        );
        // The automaton stays usable after a failed query.
        assert!(automaton.matches("a").unwrap());
        // No partial trace is returned either.
        assert!(automaton.trace("ac").is_err());
    }

    #[test]
    fn test_concatenation_matches() {
        let automaton = compile("a.b");
        assert!(automaton.matches("ab").unwrap());
        assert!(!automaton.matches("a").unwrap());
        assert!(!automaton.matches("b").unwrap());
        assert!(!automaton.matches("").unwrap());
    }

    #[test]
    fn test_kleene_star_matches() {
        let automaton = compile("a*");
        assert!(automaton.matches("").unwrap());
        assert!(automaton.matches("a").unwrap());
        assert!(automaton.matches("aaaa").unwrap());
        assert!(!automaton.matches("b").unwrap());
        assert!(!automaton.matches("ab").unwrap());
    }

    #[test]
    fn test_complex_regex_matches() {
        // (a+b)* then a then b* then a: any mixture of a/b, followed by an
        // 'a', any number of 'b's and a final 'a'.
        let automaton = compile("(a+b)*.a.b*.a");
        for accepted in ["aa", "aba", "abba", "abbaa", "bbaba", "aaaa"] {
            assert!(automaton.matches(accepted).unwrap(), "input {:?}", accepted);
        }
        for rejected in ["", "a", "ab", "abb", "b", "bab"] {
            assert!(!automaton.matches(rejected).unwrap(), "input {:?}", rejected);
        }
    }

    #[test]
    fn test_trace_length() {
        let automaton = compile("(a+b)*.a.b*.a");
        for input in ["", "a", "aa", "abbaa", "bbbbb"] {
            let trace = automaton.trace(input).unwrap();
            assert_eq!(trace.len(), input.len() + 1, "input {:?}", input);
            assert_eq!(trace[0], DfaStateID::new(0));
        }
    }

    #[test]
    fn test_trace_follows_transition_table() {
        let automaton = compile("a.b");
        let trace = automaton.trace("ab").unwrap();
        let table = automaton.transition_table();
        // Each step of the trace is the table lookup for the consumed symbol.
        let on_a = table[trace[0].as_usize()].transitions[0].1;
        assert_eq!(trace[1], on_a);
        let on_b = table[trace[1].as_usize()].transitions[1].1;
        assert_eq!(trace[2], on_b);
        assert!(table[trace[2].as_usize()].is_final);
    }

    #[test]
    fn test_empty_input_acceptance_depends_on_start_state() {
        assert!(compile("a*").matches("").unwrap());
        assert!(!compile("a").matches("").unwrap());
    }
}
