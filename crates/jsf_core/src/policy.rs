//! Decision policies: what a filter does with a token given the predicate verdict

use crate::token::{Token, TokenKind};

/// Outcome of a decision in check mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Emit this token and keep checking; containers are descended into
    Forward,
    /// Discard this token and keep checking; containers are descended into
    Drop,
    /// Emit the whole value this token opens, without further checks
    Pass,
    /// Discard the whole value this token opens
    Skip,
    /// Discard the whole value this token opens and emit the replacement
    Replace,
    /// Hold back a key's events. A held key is replayed unchanged before the
    /// first output of the value it names, and discarded if that value emits
    /// nothing.
    Hold,
}

/// The per-filter decision hook
pub trait Decide {
    fn decide(&self, token: &Token, matched: bool) -> Action;
}

impl<F> Decide for F
where
    F: Fn(&Token, bool) -> Action,
{
    fn decide(&self, token: &Token, matched: bool) -> Action {
        self(token, matched)
    }
}

/// Built-in policies
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Policy {
    /// Keep matched values only, as a sequence of top-level values
    Pick,
    /// Drop matched values, along with their object keys
    Ignore,
    /// Substitute the replacement for matched values. With `allow_empty`,
    /// matched object keys are held so an empty replacement drops the member.
    Replace { allow_empty: bool },
}

impl Decide for Policy {
    fn decide(&self, token: &Token, matched: bool) -> Action {
        let kind = token.kind();
        match self {
            Policy::Pick => pick(kind, matched),
            Policy::Ignore => drop_matched(kind, matched, Action::Skip, true),
            Policy::Replace { allow_empty } => {
                drop_matched(kind, matched, Action::Replace, *allow_empty)
            }
        }
    }
}

fn pick(kind: TokenKind, matched: bool) -> Action {
    match kind {
        TokenKind::StartObject | TokenKind::StartArray => {
            if matched {
                Action::Pass
            } else {
                Action::Drop
            }
        }
        TokenKind::StartString | TokenKind::StartNumber => {
            if matched {
                Action::Pass
            } else {
                Action::Skip
            }
        }
        TokenKind::StartKey => Action::Skip,
        TokenKind::StringValue | TokenKind::NumberValue => {
            if matched {
                Action::Pass
            } else {
                Action::Drop
            }
        }
        k if k.is_atomic() && matched => Action::Pass,
        _ => Action::Drop,
    }
}

/// Shared by `Ignore` and `Replace`: `on_match` disposes of matched values,
/// `hold_keys` ties the object key of a matched member to its value.
fn drop_matched(kind: TokenKind, matched: bool, on_match: Action, hold_keys: bool) -> Action {
    match kind {
        TokenKind::StartKey => {
            if hold_keys {
                Action::Hold
            } else {
                Action::Pass
            }
        }
        TokenKind::KeyValue => {
            if hold_keys && matched {
                Action::Hold
            } else {
                Action::Forward
            }
        }
        TokenKind::StartString | TokenKind::StartNumber => {
            if matched {
                on_match
            } else {
                Action::Pass
            }
        }
        TokenKind::StartObject
        | TokenKind::StartArray
        | TokenKind::StringValue
        | TokenKind::NumberValue
        | TokenKind::NullValue
        | TokenKind::TrueValue
        | TokenKind::FalseValue => {
            if matched {
                on_match
            } else {
                Action::Forward
            }
        }
        _ => Action::Forward,
    }
}
