//! Path predicates deciding which tokens are "matched"

use crate::path::PathStack;
use crate::token::Token;
use crate::{Error, ErrorKind};
use regex::Regex;

/// Caller-supplied predicate over the current path
pub type PredicateFn = Box<dyn Fn(&PathStack, &Token) -> Result<bool, Error>>;

/// Selects the paths a filter treats as matched
#[derive(Default)]
pub enum Predicate {
    /// Matches nothing
    #[default]
    Never,
    /// Literal path, matched on whole components: `a.b` matches `a.b` and
    /// `a.b.c` but not `a.bc`
    Path(String),
    /// Unanchored regular expression searched in the joined path
    Pattern(Regex),
    /// Arbitrary function of the path stack and the current token
    Func(PredicateFn),
}

impl Predicate {
    pub fn path(path: impl Into<String>) -> Self {
        Predicate::Path(path.into())
    }

    /// Compile `pattern` into a [`Predicate::Pattern`]
    pub fn pattern(pattern: &str) -> Result<Self, Error> {
        Regex::new(pattern)
            .map(Predicate::Pattern)
            .map_err(|e| Error::new(ErrorKind::Pattern, format!("invalid pattern: {e}")))
    }

    pub fn func<F>(f: F) -> Self
    where
        F: Fn(&PathStack, &Token) -> bool + 'static,
    {
        Predicate::Func(Box::new(move |stack, token| Ok(f(stack, token))))
    }

    /// A predicate that may fail; a failure aborts the filtered stream
    pub fn try_func<F>(f: F) -> Self
    where
        F: Fn(&PathStack, &Token) -> Result<bool, Error> + 'static,
    {
        Predicate::Func(Box::new(f))
    }

    /// Evaluate against `stack`, using `buf` as scratch space for the joined path
    pub fn test(
        &self,
        stack: &PathStack,
        token: &Token,
        separator: &str,
        buf: &mut String,
    ) -> Result<bool, Error> {
        match self {
            Predicate::Never => Ok(false),
            Predicate::Path(literal) => {
                stack.join_into(separator, buf);
                Ok(matches_literal(buf, literal, separator))
            }
            Predicate::Pattern(re) => {
                stack.join_into(separator, buf);
                Ok(re.is_match(buf))
            }
            Predicate::Func(f) => f(stack, token).map_err(|e| {
                if e.kind() == ErrorKind::Predicate {
                    e
                } else {
                    Error::new(ErrorKind::Predicate, format!("predicate failed: {e}"))
                }
            }),
        }
    }
}

impl std::fmt::Debug for Predicate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Predicate::Never => f.write_str("Never"),
            Predicate::Path(p) => f.debug_tuple("Path").field(p).finish(),
            Predicate::Pattern(re) => f.debug_tuple("Pattern").field(&re.as_str()).finish(),
            Predicate::Func(_) => f.write_str("Func(..)"),
        }
    }
}

/// Whole-component prefix match of a joined path against a literal
fn matches_literal(path: &str, literal: &str, separator: &str) -> bool {
    match path.strip_prefix(literal) {
        Some("") => true,
        Some(rest) => rest.starts_with(separator),
        None => false,
    }
}
