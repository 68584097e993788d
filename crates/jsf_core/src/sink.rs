//! Consumers of filtered token streams

use crate::Error;
use crate::token::Token;

/// Downstream consumer of tokens.
///
/// A sink error is fatal for the stream that produced the token.
pub trait Sink {
    fn push(&mut self, token: Token) -> Result<(), Error>;
}

impl Sink for Vec<Token> {
    fn push(&mut self, token: Token) -> Result<(), Error> {
        Vec::push(self, token);
        Ok(())
    }
}

impl<S: Sink + ?Sized> Sink for &mut S {
    fn push(&mut self, token: Token) -> Result<(), Error> {
        (**self).push(token)
    }
}
