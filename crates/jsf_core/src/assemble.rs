//! Rebuilds JSON values from a token stream

use crate::sink::Sink;
use crate::token::Token;
use crate::{Error, ErrorKind};
use serde_json::{Map, Number, Value};

#[derive(Debug)]
enum Partial {
    Object {
        map: Map<String, Value>,
        key: Option<String>,
    },
    Array(Vec<Value>),
}

/// Sink collecting completed top-level values.
///
/// Scalars are taken from finalization events; start, chunk, and end events
/// are ignored, so the stream must carry packed values.
#[derive(Debug, Default)]
pub struct Assembler {
    stack: Vec<Partial>,
    values: Vec<Value>,
}

impl Assembler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Top-level values completed so far
    pub fn values(&self) -> &[Value] {
        &self.values
    }

    pub fn into_values(self) -> Vec<Value> {
        self.values
    }

    /// Number of containers still open
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    fn complete(&mut self, value: Value) -> Result<(), Error> {
        match self.stack.last_mut() {
            None => self.values.push(value),
            Some(Partial::Array(items)) => items.push(value),
            Some(Partial::Object { map, key }) => {
                let Some(key) = key.take() else {
                    return Err(Error::new(ErrorKind::Input, "object member without a key"));
                };
                map.insert(key, value);
            }
        }
        Ok(())
    }
}

impl Sink for Assembler {
    fn push(&mut self, token: Token) -> Result<(), Error> {
        match token {
            Token::StartObject => {
                self.stack.push(Partial::Object {
                    map: Map::new(),
                    key: None,
                });
                Ok(())
            }
            Token::StartArray => {
                self.stack.push(Partial::Array(Vec::new()));
                Ok(())
            }
            Token::EndObject => match self.stack.pop() {
                Some(Partial::Object { map, .. }) => self.complete(Value::Object(map)),
                _ => Err(Error::new(ErrorKind::Input, "unbalanced endObject")),
            },
            Token::EndArray => match self.stack.pop() {
                Some(Partial::Array(items)) => self.complete(Value::Array(items)),
                _ => Err(Error::new(ErrorKind::Input, "unbalanced endArray")),
            },
            Token::KeyValue(name) => match self.stack.last_mut() {
                Some(Partial::Object { key, .. }) => {
                    *key = Some(name);
                    Ok(())
                }
                _ => Err(Error::new(ErrorKind::Input, "key outside of an object")),
            },
            Token::StringValue(s) => self.complete(Value::String(s)),
            Token::NumberValue(literal) => {
                let number: Number = literal.parse().map_err(|e| {
                    Error::new(ErrorKind::Input, format!("invalid number '{literal}': {e}"))
                })?;
                self.complete(Value::Number(number))
            }
            Token::NullValue => self.complete(Value::Null),
            Token::TrueValue => self.complete(Value::Bool(true)),
            Token::FalseValue => self.complete(Value::Bool(false)),
            _ => Ok(()),
        }
    }
}
