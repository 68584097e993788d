//! jsf_core - streaming JSON token filter
//!
//! Filters a stream of JSON tokens by path without holding the document in
//! memory: matched values are kept, dropped, or replaced while the output
//! stays a well-formed token stream.

pub mod assemble;
pub mod filter;
pub mod path;
pub mod policy;
pub mod predicate;
pub mod replacement;
pub mod sink;
pub mod stringify;
pub mod token;
pub mod tokenize;

pub use assemble::Assembler;
pub use filter::{Filter, FilterOptions, Mode};
pub use path::{Frame, PathStack};
pub use policy::{Action, Decide, Policy};
pub use predicate::Predicate;
pub use replacement::Replacement;
pub use sink::Sink;
pub use stringify::Stringer;
pub use token::{Token, TokenKind};
pub use tokenize::{TokenizeOptions, tokenize};

use serde_json::Value;

/// Category of an [`Error`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// A pattern predicate failed to compile
    Pattern,
    /// A predicate function failed
    Predicate,
    /// A replacement function failed
    Replacement,
    /// The downstream consumer rejected a token
    Sink,
    /// The filter was used after a fatal error
    Aborted,
    /// Malformed input handed to an adapter
    Input,
}

/// Error type for filtering operations
#[derive(Debug, Clone, PartialEq)]
pub struct Error {
    kind: ErrorKind,
    message: String,
}

impl Error {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for Error {}

/// Run `filter` over a parsed document and assemble the surviving values
///
/// # Example
/// ```
/// use serde_json::json;
/// use jsf_core::{Filter, FilterOptions, Predicate, filter_value};
///
/// let json = json!({"secret": "x", "keep": 1});
/// let filter = Filter::replace(FilterOptions::new(Predicate::path("secret")));
/// let results = filter_value(&json, filter).unwrap();
/// assert_eq!(results, vec![json!({"secret": null, "keep": 1})]);
/// ```
pub fn filter_value<D: Decide>(value: &Value, mut filter: Filter<D>) -> Result<Vec<Value>, Error> {
    let mut assembler = Assembler::new();
    filter.push_all(
        tokenize(value, &TokenizeOptions::default()),
        &mut assembler,
    )?;
    Ok(assembler.into_values())
}
