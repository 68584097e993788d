//! Substitutes spliced in place of replaced values

use crate::path::PathStack;
use crate::token::Token;
use crate::{Error, ErrorKind};

/// Builds the substitute for a replaced value.
///
/// Receives the path stack, the token that opened the replaced value, and an
/// output buffer. The buffer reaches the sink only if the function succeeds.
pub type ReplacementFn = Box<dyn Fn(&PathStack, &Token, &mut Vec<Token>) -> Result<(), Error>>;

/// What to emit in place of a replaced value
pub enum Replacement {
    /// Fixed token sequence, emitted as-is
    Tokens(Vec<Token>),
    Func(ReplacementFn),
}

impl Replacement {
    pub fn tokens(tokens: impl IntoIterator<Item = Token>) -> Self {
        Replacement::Tokens(tokens.into_iter().collect())
    }

    /// Emit nothing; only well-formed where the enclosing key is dropped too
    pub fn empty() -> Self {
        Replacement::Tokens(Vec::new())
    }

    pub fn func<F>(f: F) -> Self
    where
        F: Fn(&PathStack, &Token, &mut Vec<Token>) -> Result<(), Error> + 'static,
    {
        Replacement::Func(Box::new(f))
    }

    /// Append the substitute for the value opened by `token` to `out`
    pub fn emit(
        &self,
        stack: &PathStack,
        token: &Token,
        out: &mut Vec<Token>,
    ) -> Result<(), Error> {
        match self {
            Replacement::Tokens(tokens) => {
                out.extend(tokens.iter().cloned());
                Ok(())
            }
            Replacement::Func(f) => f(stack, token, out).map_err(|e| {
                if e.kind() == ErrorKind::Replacement {
                    e
                } else {
                    Error::new(ErrorKind::Replacement, format!("replacement failed: {e}"))
                }
            }),
        }
    }
}

impl Default for Replacement {
    fn default() -> Self {
        Replacement::Tokens(vec![Token::NullValue])
    }
}

impl std::fmt::Debug for Replacement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Replacement::Tokens(tokens) => f.debug_tuple("Tokens").field(tokens).finish(),
            Replacement::Func(_) => f.write_str("Func(..)"),
        }
    }
}
