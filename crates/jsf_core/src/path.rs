//! Path tracking over a token stream
//!
//! The stack holds one frame per open container. Object frames are named by
//! the most recent key, array frames carry the index of the current element.

use crate::token::{Token, TokenKind};
use smallvec::SmallVec;
use std::fmt::Write;

/// One level of the current path
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Frame {
    /// Object member, unnamed until the first key arrives
    Key(Option<String>),
    /// Array element index, `-1` before the first element
    Index(i64),
}

/// Ordered structural location of the token being processed
#[derive(Debug, Clone, Default)]
pub struct PathStack {
    frames: SmallVec<[Frame; 8]>,
    /// A string or number start was seen and its finalization is still due
    open_scalar: bool,
}

impl PathStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn last(&self) -> Option<&Frame> {
        self.frames.last()
    }

    /// Update the top frame for a token about to be decided on.
    ///
    /// Opening a value moves an enclosing array to its next index and a key
    /// finalization names the enclosing object member. Pushes and pops are
    /// left to the caller, which performs them after the decision.
    pub fn advance(&mut self, token: &Token) {
        match token.kind() {
            TokenKind::StartString | TokenKind::StartNumber => {
                self.next_index();
                self.open_scalar = true;
            }
            TokenKind::StartObject
            | TokenKind::StartArray
            | TokenKind::NullValue
            | TokenKind::TrueValue
            | TokenKind::FalseValue => {
                self.next_index();
                self.open_scalar = false;
            }
            TokenKind::StringValue | TokenKind::NumberValue => {
                // packed-only values carry no start event
                if !self.open_scalar {
                    self.next_index();
                }
                self.open_scalar = false;
            }
            TokenKind::KeyValue => {
                if let (Some(Frame::Key(name)), Token::KeyValue(key)) =
                    (self.frames.last_mut(), token)
                {
                    *name = Some(key.clone());
                }
            }
            _ => {}
        }
    }

    /// Enter the container opened by `kind`
    pub fn push_container(&mut self, kind: TokenKind) {
        match kind {
            TokenKind::StartObject => self.frames.push(Frame::Key(None)),
            TokenKind::StartArray => self.frames.push(Frame::Index(-1)),
            _ => {}
        }
    }

    pub fn pop(&mut self) -> Option<Frame> {
        self.frames.pop()
    }

    /// Forget a scalar start whose finalization was consumed elsewhere
    pub fn end_scalar(&mut self) {
        self.open_scalar = false;
    }

    /// Join the frames with `separator` into `buf`, replacing its contents
    pub fn join_into(&self, separator: &str, buf: &mut String) {
        buf.clear();
        for (i, frame) in self.frames.iter().enumerate() {
            if i > 0 {
                buf.push_str(separator);
            }
            match frame {
                Frame::Key(Some(name)) => buf.push_str(name),
                Frame::Key(None) => {}
                Frame::Index(index) => {
                    let _ = write!(buf, "{index}");
                }
            }
        }
    }

    pub fn join(&self, separator: &str) -> String {
        let mut buf = String::new();
        self.join_into(separator, &mut buf);
        buf
    }

    fn next_index(&mut self) {
        if let Some(Frame::Index(index)) = self.frames.last_mut() {
            *index += 1;
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn key(name: &str) -> Token {
        Token::KeyValue(name.to_string())
    }

    #[test]
    fn test_array_index_tracking() {
        let mut stack = PathStack::new();
        stack.advance(&Token::StartArray);
        stack.push_container(TokenKind::StartArray);
        assert_eq!(stack.frames(), &[Frame::Index(-1)]);

        stack.advance(&Token::StartNumber);
        assert_eq!(stack.frames(), &[Frame::Index(0)]);
        stack.advance(&Token::NumberValue("1".to_string()));
        assert_eq!(stack.frames(), &[Frame::Index(0)]);

        stack.advance(&Token::StartNumber);
        stack.advance(&Token::NumberValue("2".to_string()));
        assert_eq!(stack.frames(), &[Frame::Index(1)]);
    }

    #[test]
    fn test_packed_values_advance_index() {
        let mut stack = PathStack::new();
        stack.push_container(TokenKind::StartArray);
        stack.advance(&Token::StringValue("a".to_string()));
        stack.advance(&Token::NumberValue("1".to_string()));
        assert_eq!(stack.frames(), &[Frame::Index(1)]);
    }

    #[test]
    fn test_key_names_object_frame() {
        let mut stack = PathStack::new();
        stack.push_container(TokenKind::StartObject);
        assert_eq!(stack.frames(), &[Frame::Key(None)]);
        stack.advance(&key("a"));
        assert_eq!(stack.frames(), &[Frame::Key(Some("a".to_string()))]);
        stack.advance(&key("b"));
        assert_eq!(stack.join("."), "b");
    }

    #[test]
    fn test_key_outside_object_is_ignored() {
        let mut stack = PathStack::new();
        stack.advance(&key("a"));
        assert!(stack.is_empty());
    }

    #[test]
    fn test_join() {
        let mut stack = PathStack::new();
        stack.push_container(TokenKind::StartObject);
        stack.advance(&key("a"));
        stack.push_container(TokenKind::StartArray);
        stack.advance(&Token::StartObject);
        stack.push_container(TokenKind::StartObject);
        assert_eq!(stack.join("."), "a.0.");
        stack.advance(&key("b"));
        assert_eq!(stack.join("/"), "a/0/b");
        assert_eq!(stack.len(), 3);
    }

    #[test]
    fn test_pop() {
        let mut stack = PathStack::new();
        stack.push_container(TokenKind::StartArray);
        assert_eq!(stack.pop(), Some(Frame::Index(-1)));
        assert_eq!(stack.pop(), None);
    }
}
