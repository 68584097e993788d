//! Produces token streams from parsed documents
//!
//! The filter itself never parses JSON text. This adapter turns an already
//! parsed `serde_json::Value` into the token grammar, for tests, benchmarks,
//! and the command line tool.

use crate::token::Token;
use serde_json::Value;

/// How scalars are framed in the produced stream
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenizeOptions {
    /// Emit start, chunk, and end events for keys, strings, and numbers
    pub stream_values: bool,
    /// Emit finalization events for strings and numbers. Keys are always
    /// finalized, since path tracking depends on it.
    pub pack_values: bool,
    /// Maximum characters per chunk event; `0` emits one chunk per value
    pub chunk_size: usize,
}

impl Default for TokenizeOptions {
    fn default() -> Self {
        Self {
            stream_values: true,
            pack_values: true,
            chunk_size: 0,
        }
    }
}

/// Tokenize `value`
pub fn tokenize(value: &Value, options: &TokenizeOptions) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut tokenizer = Tokenizer {
        options: *options,
        out: &mut tokens,
    };
    tokenizer.value(value);
    tokens
}

struct Tokenizer<'a> {
    options: TokenizeOptions,
    out: &'a mut Vec<Token>,
}

impl Tokenizer<'_> {
    fn value(&mut self, value: &Value) {
        match value {
            Value::Null => self.out.push(Token::NullValue),
            Value::Bool(true) => self.out.push(Token::TrueValue),
            Value::Bool(false) => self.out.push(Token::FalseValue),
            Value::Number(n) => {
                let literal = n.to_string();
                if self.options.stream_values {
                    self.out.push(Token::StartNumber);
                    self.chunks(&literal, Token::NumberChunk);
                    self.out.push(Token::EndNumber);
                }
                if self.options.pack_values || !self.options.stream_values {
                    self.out.push(Token::NumberValue(literal));
                }
            }
            Value::String(s) => {
                if self.options.stream_values {
                    self.out.push(Token::StartString);
                    self.chunks(s, Token::StringChunk);
                    self.out.push(Token::EndString);
                }
                if self.options.pack_values || !self.options.stream_values {
                    self.out.push(Token::StringValue(s.clone()));
                }
            }
            Value::Array(items) => {
                self.out.push(Token::StartArray);
                for item in items {
                    self.value(item);
                }
                self.out.push(Token::EndArray);
            }
            Value::Object(map) => {
                self.out.push(Token::StartObject);
                for (key, item) in map {
                    if self.options.stream_values {
                        self.out.push(Token::StartKey);
                        self.chunks(key, Token::StringChunk);
                        self.out.push(Token::EndKey);
                    }
                    self.out.push(Token::KeyValue(key.clone()));
                    self.value(item);
                }
                self.out.push(Token::EndObject);
            }
        }
    }

    fn chunks(&mut self, text: &str, make: fn(String) -> Token) {
        if text.is_empty() {
            return;
        }
        if self.options.chunk_size == 0 {
            self.out.push(make(text.to_string()));
            return;
        }
        let mut chunk = String::new();
        for (i, ch) in text.chars().enumerate() {
            if i > 0 && i % self.options.chunk_size == 0 {
                self.out.push(make(std::mem::take(&mut chunk)));
            }
            chunk.push(ch);
        }
        self.out.push(make(chunk));
    }
}
