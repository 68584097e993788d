//! The filter engine: path tracking plus the check/pass/skip mode machine
//!
//! In check mode every token updates the path stack, is tested against the
//! predicate, and is handed to the policy. A policy may claim a whole value
//! (container subtree, split scalar, or atomic token); the engine then
//! forwards or drops that value without further checks and returns to check
//! mode once it is complete. Memory use is bounded by the nesting depth.

use crate::path::PathStack;
use crate::policy::{Action, Decide, Policy};
use crate::predicate::Predicate;
use crate::replacement::Replacement;
use crate::sink::Sink;
use crate::token::{Token, TokenKind};
use crate::{Error, ErrorKind};
use log::{debug, trace, warn};

/// Construction-time configuration of a [`Filter`]
#[derive(Debug)]
pub struct FilterOptions {
    pub predicate: Predicate,
    /// Joins path frames for literal and pattern predicates
    pub separator: String,
    pub replacement: Replacement,
    /// Resolve only the first matched value; everything after it receives the
    /// opposite disposition without further checks
    pub once: bool,
}

impl FilterOptions {
    pub fn new(predicate: Predicate) -> Self {
        Self {
            predicate,
            ..Self::default()
        }
    }

    pub fn separator(mut self, separator: impl Into<String>) -> Self {
        self.separator = separator.into();
        self
    }

    pub fn replacement(mut self, replacement: Replacement) -> Self {
        self.replacement = replacement;
        self
    }

    pub fn once(mut self, once: bool) -> Self {
        self.once = once;
        self
    }
}

impl Default for FilterOptions {
    fn default() -> Self {
        Self {
            predicate: Predicate::Never,
            separator: ".".to_string(),
            replacement: Replacement::default(),
            once: false,
        }
    }
}

/// Dispatch state of a [`Filter`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Evaluate every token
    Check,
    /// Inside a claimed container; `depth` counts its open containers
    Container { emit: bool, depth: usize, once: bool },
    /// Inside a claimed split scalar. `ended` is set once `end` was seen and
    /// `finish` is the only expected next token.
    Scalar {
        emit: bool,
        end: TokenKind,
        finish: TokenKind,
        ended: bool,
        key: bool,
        once: bool,
    },
    /// Holding back a key's framing up to its end event; the key itself is
    /// settled by its value
    KeyFraming,
    /// A once-filter has resolved its match; everything is forwarded or dropped
    Done { emit: bool },
    /// A fatal error occurred
    Aborted,
}

/// Streaming token filter.
///
/// Tokens are fed one at a time with [`Filter::push`]; surviving tokens and
/// replacements go to the sink before `push` returns.
#[derive(Debug)]
pub struct Filter<D = Policy> {
    options: FilterOptions,
    policy: D,
    stack: PathStack,
    mode: Mode,
    /// Events of a held key, replayed before its value's first output
    held_key: Vec<Token>,
    /// The held key is complete and waits for its value
    key_complete: bool,
    path_buf: String,
    replacement_buf: Vec<Token>,
}

impl Filter<Policy> {
    /// Keep matched values only
    pub fn pick(options: FilterOptions) -> Self {
        Self::new(options, Policy::Pick)
    }

    /// Drop matched values and their keys
    pub fn ignore(options: FilterOptions) -> Self {
        Self::new(options, Policy::Ignore)
    }

    /// Substitute the configured replacement for matched values
    pub fn replace(options: FilterOptions) -> Self {
        Self::new(options, Policy::Replace { allow_empty: false })
    }
}

impl<D: Decide> Filter<D> {
    pub fn new(options: FilterOptions, policy: D) -> Self {
        Self {
            options,
            policy,
            stack: PathStack::new(),
            mode: Mode::Check,
            held_key: Vec::new(),
            key_complete: false,
            path_buf: String::new(),
            replacement_buf: Vec::new(),
        }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn stack(&self) -> &PathStack {
        &self.stack
    }

    /// Process one token. An error is fatal: the filter rejects all further input.
    pub fn push<S: Sink + ?Sized>(&mut self, token: Token, sink: &mut S) -> Result<(), Error> {
        if self.mode == Mode::Aborted {
            return Err(Error::new(
                ErrorKind::Aborted,
                "filter aborted by an earlier error",
            ));
        }
        let result = self.dispatch(token, sink);
        if result.is_err() {
            self.mode = Mode::Aborted;
        }
        result
    }

    pub fn push_all<I, S>(&mut self, tokens: I, sink: &mut S) -> Result<(), Error>
    where
        I: IntoIterator<Item = Token>,
        S: Sink + ?Sized,
    {
        for token in tokens {
            self.push(token, sink)?;
        }
        Ok(())
    }

    fn dispatch<S: Sink + ?Sized>(&mut self, token: Token, sink: &mut S) -> Result<(), Error> {
        match self.mode {
            Mode::Check => self.check(token, sink),
            Mode::Container { emit, depth, once } => {
                let kind = token.kind();
                let depth = if kind.opens_container() {
                    depth + 1
                } else if kind.closes_container() {
                    depth.saturating_sub(1)
                } else {
                    depth
                };
                if emit {
                    sink.push(token)?;
                }
                if depth == 0 {
                    self.finish_unit(emit, once);
                } else {
                    self.mode = Mode::Container { emit, depth, once };
                }
                Ok(())
            }
            Mode::Scalar {
                emit,
                end,
                finish,
                ended,
                key,
                once,
            } => {
                let kind = token.kind();
                if !ended {
                    if emit {
                        sink.push(token)?;
                    }
                    self.mode = Mode::Scalar {
                        emit,
                        end,
                        finish,
                        ended: kind == end,
                        key,
                        once,
                    };
                    return Ok(());
                }
                if kind != finish {
                    warn!("expected {finish} after {end}, got {kind}; rechecking it");
                    self.stack.end_scalar();
                    self.finish_unit(emit, once);
                    return self.dispatch(token, sink);
                }
                if key {
                    self.stack.advance(&token);
                } else {
                    self.stack.end_scalar();
                }
                if emit {
                    sink.push(token)?;
                }
                self.finish_unit(emit, once);
                Ok(())
            }
            Mode::KeyFraming => {
                if token.kind() == TokenKind::EndKey {
                    self.set_mode(Mode::Check);
                }
                self.held_key.push(token);
                Ok(())
            }
            Mode::Done { emit } => {
                if emit {
                    sink.push(token)?;
                }
                Ok(())
            }
            Mode::Aborted => Err(Error::new(
                ErrorKind::Aborted,
                "filter aborted by an earlier error",
            )),
        }
    }

    fn check<S: Sink + ?Sized>(&mut self, token: Token, sink: &mut S) -> Result<(), Error> {
        let kind = token.kind();
        if !self.key_complete && !self.held_key.is_empty() && kind != TokenKind::KeyValue {
            warn!("key without a {} event, holding it for its value", TokenKind::KeyValue);
            self.key_complete = true;
        }
        self.stack.advance(&token);
        let matched = self.options.predicate.test(
            &self.stack,
            &token,
            &self.options.separator,
            &mut self.path_buf,
        )?;
        let action = self.policy.decide(&token, matched);
        trace!("{kind} matched={matched} -> {action:?}");

        match action {
            Action::Forward => self.forward(token, sink),
            Action::Drop => {
                self.discard_key();
                self.track_structure(kind);
                Ok(())
            }
            Action::Hold => {
                self.hold(token);
                Ok(())
            }
            Action::Pass | Action::Skip | Action::Replace => {
                self.enter_unit(token, action, matched, sink)
            }
        }
    }

    /// Emit a single token in check mode, preceded by any held key
    fn forward<S: Sink + ?Sized>(&mut self, token: Token, sink: &mut S) -> Result<(), Error> {
        let kind = token.kind();
        self.release_key(sink)?;
        sink.push(token)?;
        self.track_structure(kind);
        Ok(())
    }

    fn hold(&mut self, token: Token) {
        let kind = token.kind();
        match kind {
            TokenKind::StartKey | TokenKind::KeyValue => {
                if self.key_complete {
                    // a second key before any value
                    self.discard_key();
                }
                self.held_key.push(token);
                if kind == TokenKind::StartKey {
                    self.set_mode(Mode::KeyFraming);
                } else {
                    self.key_complete = true;
                }
            }
            _ => {
                self.discard_key();
                self.track_structure(kind);
            }
        }
    }

    fn release_key<S: Sink + ?Sized>(&mut self, sink: &mut S) -> Result<(), Error> {
        self.key_complete = false;
        for held in self.held_key.drain(..) {
            sink.push(held)?;
        }
        Ok(())
    }

    fn discard_key(&mut self) {
        self.key_complete = false;
        self.held_key.clear();
    }

    /// Claim the value opened by `token` for passing, skipping, or replacing
    fn enter_unit<S: Sink + ?Sized>(
        &mut self,
        token: Token,
        action: Action,
        matched: bool,
        sink: &mut S,
    ) -> Result<(), Error> {
        let kind = token.kind();
        let is_value = kind.starts_value();
        let is_key = kind == TokenKind::StartKey;
        let emit = action == Action::Pass;

        if !is_value && !is_key {
            // not the opening of a value: degrade to a single-token decision
            return if emit {
                self.forward(token, sink)
            } else {
                self.discard_key();
                self.track_structure(kind);
                Ok(())
            };
        }

        let replaced = action == Action::Replace && is_value;
        if replaced {
            self.prepare_replacement(&token)?;
        }
        // a held key survives only if its value produces output
        if emit || (replaced && !self.replacement_buf.is_empty()) {
            self.release_key(sink)?;
        } else {
            self.discard_key();
        }
        if replaced {
            for replacement in self.replacement_buf.drain(..) {
                sink.push(replacement)?;
            }
        }
        let once = self.options.once && matched && is_value;

        if kind.opens_container() {
            if emit {
                sink.push(token)?;
            }
            self.set_mode(Mode::Container {
                emit,
                depth: 1,
                once,
            });
        } else if let Some((end, finish)) = kind.scalar_closers() {
            if emit {
                sink.push(token)?;
            }
            self.set_mode(Mode::Scalar {
                emit,
                end,
                finish,
                ended: false,
                key: is_key,
                once,
            });
        } else {
            if emit {
                sink.push(token)?;
            }
            self.finish_unit(emit, once);
        }
        Ok(())
    }

    /// Run the replacement into `replacement_buf`; nothing reaches the sink on failure
    fn prepare_replacement(&mut self, token: &Token) -> Result<(), Error> {
        self.replacement_buf.clear();
        self.options
            .replacement
            .emit(&self.stack, token, &mut self.replacement_buf)?;
        debug!(
            "replacing value at '{}' with {} token(s)",
            self.stack.join(&self.options.separator),
            self.replacement_buf.len()
        );
        Ok(())
    }

    fn finish_unit(&mut self, emit: bool, once: bool) {
        if once {
            self.set_mode(Mode::Done { emit: !emit });
        } else {
            self.set_mode(Mode::Check);
        }
    }

    fn track_structure(&mut self, kind: TokenKind) {
        if kind.opens_container() {
            self.stack.push_container(kind);
        } else if kind.closes_container() {
            self.stack.pop();
        }
    }

    fn set_mode(&mut self, mode: Mode) {
        if mode != self.mode {
            trace!("mode {:?} -> {:?}", self.mode, mode);
        }
        self.mode = mode;
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::path::Frame;
    use pretty_assertions::assert_eq;

    fn key(name: &str) -> Vec<Token> {
        vec![
            Token::StartKey,
            Token::StringChunk(name.to_string()),
            Token::EndKey,
            Token::KeyValue(name.to_string()),
        ]
    }

    fn string(value: &str) -> Vec<Token> {
        vec![
            Token::StartString,
            Token::StringChunk(value.to_string()),
            Token::EndString,
            Token::StringValue(value.to_string()),
        ]
    }

    fn number(value: &str) -> Vec<Token> {
        vec![
            Token::StartNumber,
            Token::NumberChunk(value.to_string()),
            Token::EndNumber,
            Token::NumberValue(value.to_string()),
        ]
    }

    /// `{"secret":"x","keep":1}`
    fn secret_doc() -> Vec<Token> {
        let mut tokens = vec![Token::StartObject];
        tokens.extend(key("secret"));
        tokens.extend(string("x"));
        tokens.extend(key("keep"));
        tokens.extend(number("1"));
        tokens.push(Token::EndObject);
        tokens
    }

    fn run<D: Decide>(filter: &mut Filter<D>, tokens: Vec<Token>) -> Vec<Token> {
        let mut out = Vec::new();
        filter.push_all(tokens, &mut out).unwrap();
        out
    }

    #[test]
    fn test_replace_default_null() {
        let mut filter = Filter::replace(FilterOptions::new(Predicate::path("secret")));
        let out = run(&mut filter, secret_doc());

        let mut expected = vec![Token::StartObject];
        expected.extend(key("secret"));
        expected.push(Token::NullValue);
        expected.extend(key("keep"));
        expected.extend(number("1"));
        expected.push(Token::EndObject);
        assert_eq!(out, expected);
        assert_eq!(filter.mode(), Mode::Check);
        assert!(filter.stack().is_empty());
    }

    #[test]
    fn test_ignore_drops_key_and_value() {
        let mut filter = Filter::ignore(FilterOptions::new(Predicate::path("secret")));
        let out = run(&mut filter, secret_doc());

        let mut expected = vec![Token::StartObject];
        expected.extend(key("keep"));
        expected.extend(number("1"));
        expected.push(Token::EndObject);
        assert_eq!(out, expected);
    }

    #[test]
    fn test_pick_emits_value_only() {
        let mut filter = Filter::pick(FilterOptions::new(Predicate::path("keep")));
        let out = run(&mut filter, secret_doc());
        assert_eq!(out, number("1"));
    }

    #[test]
    fn test_replace_allow_empty_keeps_key_for_null() {
        let options = FilterOptions::new(Predicate::path("secret"));
        let mut filter = Filter::new(options, Policy::Replace { allow_empty: true });
        let out = run(&mut filter, secret_doc());

        let mut expected = vec![Token::StartObject];
        expected.extend(key("secret"));
        expected.push(Token::NullValue);
        expected.extend(key("keep"));
        expected.extend(number("1"));
        expected.push(Token::EndObject);
        assert_eq!(out, expected);
    }

    #[test]
    fn test_replace_allow_empty_drops_member() {
        let options =
            FilterOptions::new(Predicate::path("secret")).replacement(Replacement::empty());
        let mut filter = Filter::new(options, Policy::Replace { allow_empty: true });
        let out = run(&mut filter, secret_doc());

        let mut expected = vec![Token::StartObject];
        expected.extend(key("keep"));
        expected.extend(number("1"));
        expected.push(Token::EndObject);
        assert_eq!(out, expected);
    }

    #[test]
    fn test_replacement_output_decides_key() {
        // strings vanish, everything else becomes null
        let replacement = Replacement::func(|_, token, out| {
            if token.kind() != TokenKind::StartString {
                out.push(Token::NullValue);
            }
            Ok(())
        });
        let mut tokens = vec![Token::StartObject];
        tokens.extend(key("secret"));
        tokens.extend(string("x"));
        tokens.extend(key("flag"));
        tokens.push(Token::TrueValue);
        tokens.push(Token::EndObject);

        let options = FilterOptions::new(Predicate::pattern("^(secret|flag)$").unwrap())
            .replacement(replacement);
        let mut filter = Filter::new(options, Policy::Replace { allow_empty: true });
        let out = run(&mut filter, tokens);

        let mut expected = vec![Token::StartObject];
        expected.extend(key("flag"));
        expected.push(Token::NullValue);
        expected.push(Token::EndObject);
        assert_eq!(out, expected);
    }

    #[test]
    fn test_key_without_finalization_is_replayed() {
        let tokens = vec![
            Token::StartObject,
            Token::StartKey,
            Token::StringChunk("a".to_string()),
            Token::EndKey,
            Token::StartString,
            Token::StringChunk("x".to_string()),
            Token::EndString,
            Token::StringValue("x".to_string()),
            Token::EndObject,
        ];
        let mut filter = Filter::ignore(FilterOptions::new(Predicate::Never));
        let out = run(&mut filter, tokens.clone());
        assert_eq!(out, tokens);
        assert_eq!(filter.mode(), Mode::Check);
    }

    #[test]
    fn test_key_without_finalization_dropped_with_value() {
        let tokens = vec![
            Token::StartObject,
            Token::StartKey,
            Token::StringChunk("a".to_string()),
            Token::EndKey,
            Token::StartString,
            Token::StringChunk("x".to_string()),
            Token::EndString,
            Token::StringValue("x".to_string()),
            Token::EndObject,
        ];
        let predicate = Predicate::func(|_, token| token.kind() == TokenKind::StartString);
        let mut filter = Filter::ignore(FilterOptions::new(predicate));
        let out = run(&mut filter, tokens);
        assert_eq!(out, vec![Token::StartObject, Token::EndObject]);
    }

    #[test]
    fn test_nothing_matched_is_identity() {
        let mut filter = Filter::ignore(FilterOptions::new(Predicate::Never));
        let out = run(&mut filter, secret_doc());
        assert_eq!(out, secret_doc());
    }

    #[test]
    fn test_container_depth_tracking() {
        // {"a":[[1],{}],"b":true}
        let mut tokens = vec![Token::StartObject];
        tokens.extend(key("a"));
        tokens.extend([Token::StartArray, Token::StartArray]);
        tokens.extend(number("1"));
        tokens.extend([Token::EndArray, Token::StartObject, Token::EndObject]);
        tokens.push(Token::EndArray);
        tokens.extend(key("b"));
        tokens.push(Token::TrueValue);
        tokens.push(Token::EndObject);

        let mut filter = Filter::pick(FilterOptions::new(Predicate::path("a")));
        let out = run(&mut filter, tokens);

        let mut expected = vec![Token::StartArray, Token::StartArray];
        expected.extend(number("1"));
        expected.extend([
            Token::EndArray,
            Token::StartObject,
            Token::EndObject,
            Token::EndArray,
        ]);
        assert_eq!(out, expected);
    }

    #[test]
    fn test_array_index_seen_by_predicate() {
        let seen = std::rc::Rc::new(std::cell::RefCell::new(Vec::new()));
        let log = seen.clone();
        let predicate = Predicate::func(move |stack, token| {
            if token.kind() == TokenKind::StartNumber {
                log.borrow_mut().push(stack.frames().to_vec());
            }
            false
        });
        let mut tokens = vec![Token::StartArray];
        tokens.extend(number("1"));
        tokens.extend(number("2"));
        tokens.extend(number("3"));
        tokens.push(Token::EndArray);

        let mut filter = Filter::ignore(FilterOptions::new(predicate));
        run(&mut filter, tokens);
        assert_eq!(
            *seen.borrow(),
            vec![
                vec![Frame::Index(0)],
                vec![Frame::Index(1)],
                vec![Frame::Index(2)]
            ]
        );
    }

    #[test]
    fn test_once_pick_drops_later_matches() {
        // [1,2,3] picking every element
        let mut tokens = vec![Token::StartArray];
        tokens.extend(number("1"));
        tokens.extend(number("2"));
        tokens.extend(number("3"));
        tokens.push(Token::EndArray);

        let predicate = Predicate::pattern(r"^\d+$").unwrap();
        let mut filter = Filter::pick(FilterOptions::new(predicate).once(true));
        let out = run(&mut filter, tokens);
        assert_eq!(out, number("1"));
        assert_eq!(filter.mode(), Mode::Done { emit: false });
    }

    #[test]
    fn test_once_ignore_passes_rest() {
        let mut tokens = vec![Token::StartArray];
        tokens.extend(number("1"));
        tokens.extend(number("2"));
        tokens.push(Token::EndArray);

        let predicate = Predicate::pattern(r"^\d+$").unwrap();
        let mut filter = Filter::ignore(FilterOptions::new(predicate).once(true));
        let out = run(&mut filter, tokens);

        let mut expected = vec![Token::StartArray];
        expected.extend(number("2"));
        expected.push(Token::EndArray);
        assert_eq!(out, expected);
    }

    #[test]
    fn test_once_not_triggered_by_keys() {
        let mut filter = Filter::ignore(FilterOptions::new(Predicate::path("secret")).once(true));
        let mut tokens = secret_doc();
        tokens.pop();
        run(&mut filter, tokens);
        assert_eq!(filter.mode(), Mode::Done { emit: true });
    }

    #[test]
    fn test_scalar_mismatch_in_skip_recovers() {
        // the string's finalization is replaced by an unrelated token
        let tokens = vec![
            Token::StartArray,
            Token::StartString,
            Token::StringChunk("x".to_string()),
            Token::EndString,
            Token::TrueValue,
            Token::EndArray,
        ];
        let predicate = Predicate::func(|stack, token| {
            token.kind() == TokenKind::StartString && stack.last() == Some(&Frame::Index(0))
        });
        let mut filter = Filter::ignore(FilterOptions::new(predicate));
        let out = run(&mut filter, tokens);
        assert_eq!(
            out,
            vec![Token::StartArray, Token::TrueValue, Token::EndArray]
        );
        assert_eq!(filter.mode(), Mode::Check);
    }

    #[test]
    fn test_scalar_mismatch_in_pass_keeps_framing() {
        let tokens = vec![
            Token::StartArray,
            Token::StartString,
            Token::StringChunk("x".to_string()),
            Token::EndString,
            Token::NullValue,
            Token::EndArray,
        ];
        let mut filter = Filter::ignore(FilterOptions::new(Predicate::Never));
        let out = run(&mut filter, tokens.clone());
        assert_eq!(out, tokens);
        assert_eq!(filter.mode(), Mode::Check);
    }

    #[test]
    fn test_predicate_error_aborts() {
        let predicate =
            Predicate::try_func(|_, _| Err(Error::new(ErrorKind::Input, "bad predicate")));
        let mut filter = Filter::ignore(FilterOptions::new(predicate));
        let mut out = Vec::new();
        let err = filter.push(Token::StartObject, &mut out).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Predicate);
        assert_eq!(filter.mode(), Mode::Aborted);

        let err = filter.push(Token::EndObject, &mut out).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Aborted);
        assert!(out.is_empty());
    }

    #[test]
    fn test_replacement_error_emits_nothing() {
        let replacement = Replacement::func(|_, _, out| {
            out.push(Token::StartArray);
            Err(Error::new(ErrorKind::Input, "half done"))
        });
        let options = FilterOptions::new(Predicate::path("secret")).replacement(replacement);
        let mut filter = Filter::replace(options);
        let mut out = Vec::new();
        let err = filter.push_all(secret_doc(), &mut out).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Replacement);
        assert!(!out.contains(&Token::StartArray));
    }

    #[test]
    fn test_replacement_once_per_value() {
        let count = std::rc::Rc::new(std::cell::Cell::new(0));
        let calls = count.clone();
        let replacement = Replacement::func(move |_, _, out| {
            calls.set(calls.get() + 1);
            out.push(Token::FalseValue);
            Ok(())
        });
        let mut tokens = vec![Token::StartObject];
        tokens.extend(key("a"));
        tokens.push(Token::StartArray);
        tokens.extend(string("long"));
        tokens.push(Token::EndArray);
        tokens.push(Token::EndObject);

        let options = FilterOptions::new(Predicate::path("a")).replacement(replacement);
        let mut filter = Filter::replace(options);
        let out = run(&mut filter, tokens);
        assert_eq!(count.get(), 1);

        let mut expected = vec![Token::StartObject];
        expected.extend(key("a"));
        expected.push(Token::FalseValue);
        expected.push(Token::EndObject);
        assert_eq!(out, expected);
    }

    #[test]
    fn test_packed_keys_are_not_resynthesized() {
        let tokens = vec![
            Token::StartObject,
            Token::KeyValue("a".to_string()),
            Token::NullValue,
            Token::EndObject,
        ];
        let mut filter = Filter::ignore(FilterOptions::new(Predicate::Never));
        let out = run(&mut filter, tokens.clone());
        assert_eq!(out, tokens);
    }

    #[test]
    fn test_custom_separator() {
        let mut tokens = vec![Token::StartObject];
        tokens.extend(key("a"));
        tokens.push(Token::StartObject);
        tokens.extend(key("b"));
        tokens.push(Token::NullValue);
        tokens.push(Token::EndObject);
        tokens.push(Token::EndObject);

        let options = FilterOptions::new(Predicate::path("a/b")).separator("/");
        let mut filter = Filter::pick(options);
        let out = run(&mut filter, tokens);
        assert_eq!(out, vec![Token::NullValue]);
    }

    #[test]
    fn test_closure_policy_forward_everything() {
        let policy = |_: &Token, _: bool| Action::Forward;
        let mut filter = Filter::new(FilterOptions::default(), policy);
        let out = run(&mut filter, secret_doc());
        assert_eq!(out, secret_doc());
    }

    #[test]
    fn test_sink_error_is_fatal() {
        struct Closed;
        impl Sink for Closed {
            fn push(&mut self, _: Token) -> Result<(), Error> {
                Err(Error::new(ErrorKind::Sink, "closed"))
            }
        }
        let mut filter = Filter::ignore(FilterOptions::default());
        let err = filter.push(Token::NullValue, &mut Closed).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Sink);
        assert_eq!(filter.mode(), Mode::Aborted);
    }
}
