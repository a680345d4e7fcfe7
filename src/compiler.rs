//! This module contains the compiler that drives the whole pipeline:
//! syntactic validation, infix-to-postfix rewriting, Thompson construction
//! and subset construction.

use std::time::Instant;

use log::trace;

use crate::alphabet::Alphabet;
use crate::automaton::Automaton;
use crate::dfa::Dfa;
use crate::nfa::Nfa;
use crate::postfix::infix_to_postfix;
use crate::Result;

/// A regex compiler configured with one alphabet.
///
/// The compiler is read-only after construction and can compile any number
/// of regexes against its alphabet.
#[derive(Debug, Clone)]
pub struct Compiler {
    alphabet: Alphabet,
}

impl Compiler {
    /// Configure a compiler from an alphabet specification, whose first
    /// character is the epsilon symbol and whose remaining characters form
    /// the alphabet.
    /// # Errors
    /// A `ConfigError` is returned if the specification is too short to hold
    /// a usable alphabet.
    pub fn new(spec: &str) -> Result<Self> {
        let alphabet = Alphabet::parse(spec)?;
        trace!("Configured compiler, {}", alphabet);
        Ok(Self { alphabet })
    }

    /// Get the configured alphabet.
    pub fn alphabet(&self) -> &Alphabet {
        &self.alphabet
    }

    /// Compile a regex into an automaton.
    ///
    /// The construction is all-or-nothing: on any error no automaton is
    /// returned.
    /// # Errors
    /// A `SyntaxError` is returned for unbalanced brackets, symbols outside
    /// the alphabet, or a malformed expression.
    pub fn compile(&self, regex: &str) -> Result<Automaton> {
        let now = Instant::now();
        self.alphabet.validate_regex(regex)?;

        let postfix = infix_to_postfix(regex);
        trace!("Postfix form of '{}' is '{}'", regex, postfix);

        let nfa = Nfa::from_postfix(&postfix, &self.alphabet)?;
        let dfa = Dfa::from_nfa(&nfa, &self.alphabet);

        trace!("Compiled '{}' in {} µs", regex, now.elapsed().as_micros());
        Ok(Automaton::new(dfa))
    }
}
