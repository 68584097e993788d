//! Re-serializes token streams as JSON text

use crate::sink::Sink;
use crate::token::Token;
use crate::{Error, ErrorKind};
use std::io::Write;

/// Sink writing JSON text to `W`.
///
/// Top-level values are separated by newlines. Scalars are written from
/// finalization events, so the stream must carry packed values.
#[derive(Debug)]
pub struct Stringer<W: Write> {
    out: W,
    /// One entry per open container: no member written yet
    first: Vec<bool>,
    after_key: bool,
    wrote_value: bool,
}

impl<W: Write> Stringer<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            first: Vec::new(),
            after_key: false,
            wrote_value: false,
        }
    }

    /// Terminate the output and hand back the writer
    pub fn finish(mut self) -> Result<W, Error> {
        if self.wrote_value {
            self.write(b"\n")?;
        }
        self.out.flush().map_err(io_error)?;
        Ok(self.out)
    }

    fn separate(&mut self) -> Result<(), Error> {
        if self.after_key {
            self.after_key = false;
            return Ok(());
        }
        match self.first.last_mut() {
            Some(first) => {
                let comma = !*first;
                *first = false;
                if comma {
                    self.write(b",")?;
                }
            }
            None => {
                if self.wrote_value {
                    self.write(b"\n")?;
                }
                self.wrote_value = true;
            }
        }
        Ok(())
    }

    fn write(&mut self, bytes: &[u8]) -> Result<(), Error> {
        self.out.write_all(bytes).map_err(io_error)
    }

    fn write_string(&mut self, s: &str) -> Result<(), Error> {
        serde_json::to_writer(&mut self.out, s)
            .map_err(|e| Error::new(ErrorKind::Sink, format!("write error: {e}")))
    }
}

impl<W: Write> Sink for Stringer<W> {
    fn push(&mut self, token: Token) -> Result<(), Error> {
        match token {
            Token::StartObject => {
                self.separate()?;
                self.first.push(true);
                self.write(b"{")
            }
            Token::StartArray => {
                self.separate()?;
                self.first.push(true);
                self.write(b"[")
            }
            Token::EndObject => {
                self.first.pop();
                self.write(b"}")
            }
            Token::EndArray => {
                self.first.pop();
                self.write(b"]")
            }
            Token::KeyValue(key) => {
                self.separate()?;
                self.write_string(&key)?;
                self.write(b":")?;
                self.after_key = true;
                Ok(())
            }
            Token::StringValue(s) => {
                self.separate()?;
                self.write_string(&s)
            }
            Token::NumberValue(literal) => {
                self.separate()?;
                self.write(literal.as_bytes())
            }
            Token::NullValue => {
                self.separate()?;
                self.write(b"null")
            }
            Token::TrueValue => {
                self.separate()?;
                self.write(b"true")
            }
            Token::FalseValue => {
                self.separate()?;
                self.write(b"false")
            }
            _ => Ok(()),
        }
    }
}

fn io_error(e: std::io::Error) -> Error {
    Error::new(ErrorKind::Sink, format!("write error: {e}"))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::tokenize::{TokenizeOptions, tokenize};
    use serde_json::json;

    fn stringify(tokens: Vec<Token>) -> String {
        let mut stringer = Stringer::new(Vec::new());
        for token in tokens {
            stringer.push(token).unwrap();
        }
        String::from_utf8(stringer.finish().unwrap()).unwrap()
    }

    #[test]
    fn test_document() {
        let doc = json!({"a": [1, "x\"y", null], "b": {}, "c": false});
        let text = stringify(tokenize(&doc, &TokenizeOptions::default()));
        assert_eq!(text, "{\"a\":[1,\"x\\\"y\",null],\"b\":{},\"c\":false}\n");
    }

    #[test]
    fn test_top_level_sequence() {
        let text = stringify(vec![
            Token::NumberValue("1".into()),
            Token::StartArray,
            Token::TrueValue,
            Token::EndArray,
        ]);
        assert_eq!(text, "1\n[true]\n");
    }

    #[test]
    fn test_empty_stream() {
        assert_eq!(stringify(Vec::new()), "");
    }
}
