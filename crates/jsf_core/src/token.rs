//! Token grammar shared by the tokenizer, the filter, and downstream consumers

use serde::{Deserialize, Serialize};

/// A single structural event of a JSON token stream.
///
/// Keys, strings, and numbers are split scalars: a start event, zero or more
/// chunk events, an end event, and then a finalization event carrying the
/// assembled value. Tokenizers may also emit only the finalization event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "name", content = "value", rename_all = "camelCase")]
pub enum Token {
    StartObject,
    EndObject,
    StartArray,
    EndArray,
    StartKey,
    EndKey,
    KeyValue(String),
    StartString,
    StringChunk(String),
    EndString,
    StringValue(String),
    StartNumber,
    NumberChunk(String),
    EndNumber,
    /// Literal number text, e.g. `-1.5e3`
    NumberValue(String),
    NullValue,
    TrueValue,
    FalseValue,
}

/// Discriminant of a [`Token`], without its value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    StartObject,
    EndObject,
    StartArray,
    EndArray,
    StartKey,
    EndKey,
    KeyValue,
    StartString,
    StringChunk,
    EndString,
    StringValue,
    StartNumber,
    NumberChunk,
    EndNumber,
    NumberValue,
    NullValue,
    TrueValue,
    FalseValue,
}

impl Token {
    pub fn kind(&self) -> TokenKind {
        match self {
            Token::StartObject => TokenKind::StartObject,
            Token::EndObject => TokenKind::EndObject,
            Token::StartArray => TokenKind::StartArray,
            Token::EndArray => TokenKind::EndArray,
            Token::StartKey => TokenKind::StartKey,
            Token::EndKey => TokenKind::EndKey,
            Token::KeyValue(_) => TokenKind::KeyValue,
            Token::StartString => TokenKind::StartString,
            Token::StringChunk(_) => TokenKind::StringChunk,
            Token::EndString => TokenKind::EndString,
            Token::StringValue(_) => TokenKind::StringValue,
            Token::StartNumber => TokenKind::StartNumber,
            Token::NumberChunk(_) => TokenKind::NumberChunk,
            Token::EndNumber => TokenKind::EndNumber,
            Token::NumberValue(_) => TokenKind::NumberValue,
            Token::NullValue => TokenKind::NullValue,
            Token::TrueValue => TokenKind::TrueValue,
            Token::FalseValue => TokenKind::FalseValue,
        }
    }

    /// The attached value, for kinds that carry one
    pub fn value(&self) -> Option<&str> {
        match self {
            Token::KeyValue(v)
            | Token::StringChunk(v)
            | Token::StringValue(v)
            | Token::NumberChunk(v)
            | Token::NumberValue(v) => Some(v),
            _ => None,
        }
    }
}

impl TokenKind {
    /// Name of the kind as it appears in serialized token streams
    pub fn name(self) -> &'static str {
        match self {
            TokenKind::StartObject => "startObject",
            TokenKind::EndObject => "endObject",
            TokenKind::StartArray => "startArray",
            TokenKind::EndArray => "endArray",
            TokenKind::StartKey => "startKey",
            TokenKind::EndKey => "endKey",
            TokenKind::KeyValue => "keyValue",
            TokenKind::StartString => "startString",
            TokenKind::StringChunk => "stringChunk",
            TokenKind::EndString => "endString",
            TokenKind::StringValue => "stringValue",
            TokenKind::StartNumber => "startNumber",
            TokenKind::NumberChunk => "numberChunk",
            TokenKind::EndNumber => "endNumber",
            TokenKind::NumberValue => "numberValue",
            TokenKind::NullValue => "nullValue",
            TokenKind::TrueValue => "trueValue",
            TokenKind::FalseValue => "falseValue",
        }
    }

    pub fn opens_container(self) -> bool {
        matches!(self, TokenKind::StartObject | TokenKind::StartArray)
    }

    pub fn closes_container(self) -> bool {
        matches!(self, TokenKind::EndObject | TokenKind::EndArray)
    }

    /// Single-event values: `null`, `true`, `false`
    pub fn is_atomic(self) -> bool {
        matches!(
            self,
            TokenKind::NullValue | TokenKind::TrueValue | TokenKind::FalseValue
        )
    }

    /// Events that can open a value. Packed-only streams open strings and
    /// numbers with their finalization.
    pub fn starts_value(self) -> bool {
        self.opens_container()
            || self.is_atomic()
            || matches!(
                self,
                TokenKind::StartString
                    | TokenKind::StartNumber
                    | TokenKind::StringValue
                    | TokenKind::NumberValue
            )
    }

    /// For a split-scalar start, the (end, finalization) kinds closing it
    pub fn scalar_closers(self) -> Option<(TokenKind, TokenKind)> {
        match self {
            TokenKind::StartKey => Some((TokenKind::EndKey, TokenKind::KeyValue)),
            TokenKind::StartString => Some((TokenKind::EndString, TokenKind::StringValue)),
            TokenKind::StartNumber => Some((TokenKind::EndNumber, TokenKind::NumberValue)),
            _ => None,
        }
    }
}

impl std::fmt::Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
