//! Immutable, position-carrying view over a token sequence.
//!
//! A `Cursor` is a value: reading through it never mutates it, so any cursor
//! obtained earlier remains a valid bookmark to resume from after a failed
//! speculative parse. All backtracking in this crate works by keeping the
//! pre-attempt cursor around, never by undoing anything.
//!
//! Tokens come from a token-source capability: a producer invoked lazily, at
//! most once per token, in strict left-to-right order. The source has no
//! rewind of its own — cursors retain every token already produced, which is
//! what makes re-reading from an old position pure.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;

use crate::error::ParseError;
use crate::lexer::{Spanned, Token};

struct Source {
    producer: RefCell<Box<dyn FnMut() -> Option<Spanned>>>,
    cache: RefCell<Vec<Spanned>>,
    done: Cell<bool>,
    file: String,
}

impl Source {
    /// Token at `pos`, pulling from the producer as needed. Already-produced
    /// tokens are served from the cache, so the producer is never re-invoked
    /// for a position that has been read before.
    fn token_at(&self, pos: usize) -> Option<Spanned> {
        loop {
            if let Some(spanned) = self.cache.borrow().get(pos) {
                return Some(spanned.clone());
            }
            if self.done.get() {
                return None;
            }
            let produced = {
                let mut producer = self.producer.borrow_mut();
                let producer: &mut dyn FnMut() -> Option<Spanned> = &mut **producer;
                producer()
            };
            match produced {
                Some(spanned) => self.cache.borrow_mut().push(spanned),
                None => self.done.set(true),
            }
        }
    }
}

#[derive(Clone)]
pub struct Cursor {
    src: Rc<Source>,
    pos: usize,
}

impl fmt::Debug for Cursor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cursor")
            .field("file", &self.src.file)
            .field("pos", &self.pos)
            .finish()
    }
}

impl Cursor {
    /// Cursor over an already-materialized token sequence.
    pub fn new(tokens: Vec<Spanned>, file: &str) -> Self {
        let mut iter = tokens.into_iter();
        Cursor::from_source(file, move || iter.next())
    }

    /// Cursor over a token-source capability.
    pub fn from_source(
        file: &str,
        produce: impl FnMut() -> Option<Spanned> + 'static,
    ) -> Self {
        Cursor {
            src: Rc::new(Source {
                producer: RefCell::new(Box::new(produce)),
                cache: RefCell::new(Vec::new()),
                done: Cell::new(false),
                file: file.to_owned(),
            }),
            pos: 0,
        }
    }

    /// The next token and the cursor positioned after it, or `None` when the
    /// source is exhausted.
    pub fn next(&self) -> Option<(Spanned, Cursor)> {
        let spanned = self.src.token_at(self.pos)?;
        let rest = Cursor {
            src: Rc::clone(&self.src),
            pos: self.pos + 1,
        };
        Some((spanned, rest))
    }

    pub fn peek(&self) -> Option<Token> {
        self.src.token_at(self.pos).map(|s| s.token)
    }

    /// Consume exactly the given token run. All-or-nothing: on any mismatch
    /// or early exhaustion the result is `None` and the receiver is still
    /// usable as the pre-call position.
    pub fn expect(&self, run: &[Token]) -> Option<Cursor> {
        let mut cur = self.clone();
        for expected in run {
            let (spanned, rest) = cur.next()?;
            if spanned.token != *expected {
                return None;
            }
            cur = rest;
        }
        Some(cur)
    }

    pub fn at_end(&self) -> bool {
        self.src.token_at(self.pos).is_none()
    }

    /// Line of the token at the cursor (the last seen token's line once
    /// exhausted).
    pub fn line(&self) -> u32 {
        if let Some(spanned) = self.src.token_at(self.pos) {
            return spanned.line;
        }
        self.src.cache.borrow().last().map_or(0, |s| s.line)
    }

    pub fn file(&self) -> &str {
        &self.src.file
    }

    pub(crate) fn err(&self, message: impl Into<String>) -> ParseError {
        ParseError::syntax(self.file(), self.line(), message)
    }

    pub(crate) fn unresolved(&self, name: impl Into<String>) -> ParseError {
        ParseError::unresolved(self.file(), self.line(), name)
    }

    pub(crate) fn unsupported(&self, what: impl Into<String>) -> ParseError {
        ParseError::unsupported(self.file(), self.line(), what)
    }
}

/// Result transformer: thread `value` through a required token run.
///
/// Given the outcome of a previous read, consume `expected` and discard it,
/// or turn the whole outcome into `None` on mismatch.
pub fn maybe_expect<T>(expected: &[Token], input: Option<(T, Cursor)>) -> Option<(T, Cursor)> {
    let (value, cur) = input?;
    let cur = cur.expect(expected)?;
    Some((value, cur))
}

// Shared token-level helpers for the declaration and data parsers.

pub(crate) fn take_name(cur: &Cursor) -> Result<(String, Cursor), ParseError> {
    match cur.next() {
        Some((spanned, rest)) => match spanned.token {
            Token::Name(name) => Ok((name, rest)),
            other => Err(cur.err(format!("expected name, got {:?}", other))),
        },
        None => Err(cur.err("expected name, got end of input")),
    }
}

pub(crate) fn require(cur: &Cursor, token: Token, what: &str) -> Result<Cursor, ParseError> {
    match cur.expect(std::slice::from_ref(&token)) {
        Some(rest) => Ok(rest),
        None => Err(cur.err(format!("expected {}, got {:?}", what, cur.peek()))),
    }
}

// ──────────────────────────────────────────────
// Tests
// ──────────────────────────────────────────────
