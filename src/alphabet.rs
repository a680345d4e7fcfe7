//! This module contains the alphabet and the syntactic checks that run before
//! a regex is compiled.
//! The alphabet is a sorted set of single symbols plus a designated epsilon
//! symbol that is never itself a member of the alphabet.

use itertools::Itertools;

use crate::errors::{ConfigError, SyntaxError};
use crate::Result;

/// The operator symbols of the regex grammar: union, concatenation, Kleene star.
pub(crate) const OPERATORS: [char; 3] = ['+', '.', '*'];

/// The bracket symbols, ordered in open/close pairs.
pub(crate) const BRACKETS: [char; 6] = ['(', ')', '[', ']', '{', '}'];

/// The alphabet a regex is written against.
///
/// Symbols are stored sorted so that membership tests are a binary search and
/// so that the position of a symbol doubles as its column in the DFA
/// transition table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alphabet {
    epsilon: char,
    symbols: Vec<char>,
}

impl Alphabet {
    /// Parse an alphabet specification.
    /// The first character is the epsilon symbol, the remaining characters
    /// form the alphabet. Duplicates collapse and the stored form is sorted.
    pub fn parse(spec: &str) -> Result<Self> {
        let mut chars = spec.chars();
        let epsilon = chars.next();
        let mut symbols: Vec<char> = chars.collect();
        symbols.sort_unstable();
        symbols.dedup();
        // The epsilon symbol must not double as an alphabet symbol.
        symbols.retain(|s| Some(*s) != epsilon);

        match epsilon {
            Some(epsilon) if !symbols.is_empty() => Ok(Self { epsilon, symbols }),
            _ => Err(ConfigError::SpecTooShort(spec.chars().count()).into()),
        }
    }

    /// Get the epsilon symbol.
    pub fn epsilon(&self) -> char {
        self.epsilon
    }

    /// Get the alphabet symbols in sorted order.
    pub fn symbols(&self) -> &[char] {
        &self.symbols
    }

    /// Returns true if the given symbol is a member of the alphabet.
    pub fn contains(&self, symbol: char) -> bool {
        self.symbols.binary_search(&symbol).is_ok()
    }

    /// Get the position of a symbol in the sorted alphabet.
    /// The position is used as the column index of the DFA transition table.
    pub(crate) fn index_of(&self, symbol: char) -> Option<usize> {
        self.symbols.binary_search(&symbol).ok()
    }

    /// Run the syntactic checks that precede compilation: bracket balance and
    /// symbol membership.
    pub fn validate_regex(&self, regex: &str) -> Result<()> {
        self.check_bracket_balance(regex)?;
        self.check_symbol_membership(regex)
    }

    /// Check that brackets of all three kinds nest properly.
    /// A closing bracket must match the innermost open bracket, and no open
    /// bracket may remain unclosed at the end of the input.
    fn check_bracket_balance(&self, regex: &str) -> Result<()> {
        let mut open: Vec<usize> = Vec::new();
        for c in regex.chars() {
            if let Some(kind) = BRACKETS.iter().position(|b| *b == c) {
                if kind % 2 == 0 {
                    open.push(kind);
                } else if open.pop() != Some(kind - 1) {
                    return Err(SyntaxError::BracketMismatch.into());
                }
            }
        }

        if open.is_empty() {
            Ok(())
        } else {
            Err(SyntaxError::BracketMismatch.into())
        }
    }

    /// Check that every character that is not an operator or a bracket is a
    /// member of the alphabet.
    fn check_symbol_membership(&self, regex: &str) -> Result<()> {
        for c in regex.chars() {
            if OPERATORS.contains(&c) || BRACKETS.contains(&c) {
                continue;
            }
            if !self.contains(c) {
                return Err(SyntaxError::SymbolNotInAlphabet(c).into());
            }
        }
        Ok(())
    }
}

impl std::fmt::Display for Alphabet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "epsilon: '{}', alphabet: {{{}}}",
            self.epsilon,
            self.symbols.iter().join(", ")
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::DfaGenErrorKind;

    fn kind(result: Result<()>) -> DfaGenErrorKind {
        *result.unwrap_err().source
    }

    #[test]
    fn test_parse_spec() {
        let alphabet = Alphabet::parse("0ab").unwrap();
        assert_eq!(alphabet.epsilon(), '0');
        assert_eq!(alphabet.symbols(), &['a', 'b']);
    }

    #[test]
    fn test_parse_spec_sorts_and_dedups() {
        let alphabet = Alphabet::parse("0baab").unwrap();
        assert_eq!(alphabet.symbols(), &['a', 'b']);
    }

    #[test]
    fn test_parse_spec_too_short() {
        for spec in ["", "0"] {
            let result = Alphabet::parse(spec);
            assert!(matches!(
                *result.unwrap_err().source,
                DfaGenErrorKind::Config(ConfigError::SpecTooShort(_))
            ));
        }
    }

    #[test]
    fn test_parse_spec_epsilon_not_in_alphabet() {
        // An epsilon symbol repeated in the alphabet part is dropped.
        let alphabet = Alphabet::parse("0a0b").unwrap();
        assert_eq!(alphabet.epsilon(), '0');
        assert_eq!(alphabet.symbols(), &['a', 'b']);
        assert!(!alphabet.contains('0'));
    }

    #[test]
    fn test_membership() {
        let alphabet = Alphabet::parse("0ab").unwrap();
        assert!(alphabet.contains('a'));
        assert!(alphabet.contains('b'));
        assert!(!alphabet.contains('c'));
        assert_eq!(alphabet.index_of('a'), Some(0));
        assert_eq!(alphabet.index_of('b'), Some(1));
        assert_eq!(alphabet.index_of('c'), None);
    }

    #[test]
    fn test_validate_balanced_regex() {
        let alphabet = Alphabet::parse("0ab").unwrap();
        assert!(alphabet.validate_regex("(a+b)*.a.b*.a").is_ok());
        assert!(alphabet.validate_regex("{a.[b+a]}*").is_ok());
        assert!(alphabet.validate_regex("").is_ok());
    }

    #[test]
    fn test_validate_bracket_mismatch() {
        let alphabet = Alphabet::parse("0ab").unwrap();
        for regex in ["(a+b", "a)b", "(a+b]", "[a+b)", "{(a+b})"] {
            assert_eq!(
                kind(alphabet.validate_regex(regex)),
                DfaGenErrorKind::Syntax(SyntaxError::BracketMismatch),
                "regex {:?}",
                regex
            );
        }
    }

    #[test]
    fn test_validate_symbol_membership() {
        let alphabet = Alphabet::parse("0ab").unwrap();
        assert_eq!(
            kind(alphabet.validate_regex("a.c")),
            DfaGenErrorKind::Syntax(SyntaxError::SymbolNotInAlphabet('c'))
        );
        // The epsilon symbol is not a usable regex symbol either.
        assert_eq!(
            kind(alphabet.validate_regex("a.0")),
            DfaGenErrorKind::Syntax(SyntaxError::SymbolNotInAlphabet('0'))
        );
    }
}
