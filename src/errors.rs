use thiserror::Error;

/// The result type for the `dfagen` crate.
pub type Result<T> = std::result::Result<T, DfaGenError>;

/// The error type for the `dfagen` crate.
#[derive(Error, Debug)]
pub struct DfaGenError {
    /// The source of the error.
    pub source: Box<DfaGenErrorKind>,
}

impl DfaGenError {
    /// Create a new `DfaGenError`.
    pub fn new(kind: DfaGenErrorKind) -> Self {
        DfaGenError {
            source: Box::new(kind),
        }
    }
}

impl std::fmt::Display for DfaGenError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.source)
    }
}

/// The error kind type.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum DfaGenErrorKind {
    /// A malformed alphabet specification. Fatal to configuration, the caller
    /// must reconfigure.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The regular expression failed a syntactic check during compilation.
    /// No automaton is returned.
    #[error(transparent)]
    Syntax(#[from] SyntaxError),

    /// An input string presented to a compiled automaton contains a symbol
    /// outside the configured alphabet. The automaton itself stays usable.
    #[error(transparent)]
    Alphabet(#[from] AlphabetError),
}

impl From<ConfigError> for DfaGenError {
    fn from(error: ConfigError) -> Self {
        DfaGenError::new(DfaGenErrorKind::Config(error))
    }
}

impl From<SyntaxError> for DfaGenError {
    fn from(error: SyntaxError) -> Self {
        DfaGenError::new(DfaGenErrorKind::Syntax(error))
    }
}

impl From<AlphabetError> for DfaGenError {
    fn from(error: AlphabetError) -> Self {
        DfaGenError::new(DfaGenErrorKind::Alphabet(error))
    }
}

/// An error in the alphabet specification.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    /// The specification string is too short to hold an epsilon symbol plus
    /// at least one alphabet symbol.
    #[error("alphabet specification needs at least 2 symbols, got {0}")]
    SpecTooShort(usize),
}

/// A syntactic error in a regular expression, detected during compilation.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum SyntaxError {
    /// A closing bracket does not match the innermost open bracket, or an
    /// open bracket is never closed.
    #[error("bracket mismatch in regular expression")]
    BracketMismatch,

    /// The regex uses a symbol that is neither an operator, a bracket, nor a
    /// member of the configured alphabet.
    #[error("symbol '{0}' not in alphabet")]
    SymbolNotInAlphabet(char),

    /// The postfix form of the regex has an operand/operator count mismatch.
    #[error("malformed expression: {0}")]
    MalformedExpression(String),
}

/// An error raised when querying a compiled automaton.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum AlphabetError {
    /// The input string contains a symbol outside the configured alphabet.
    #[error("input symbol '{0}' not in alphabet")]
    SymbolNotInAlphabet(char),
}
