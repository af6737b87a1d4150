// SPDX-License-Identifier: Apache-2.0

//! Pushdown JSON grammar.
//!
//! Terminals are the [`TokenType`]s. Nonterminals are the `State`s kept on
//! an explicit, heap-allocated stack, so nesting depth is limited by memory
//! and never by the native call stack.
//!
//! ```text
//! <Document>   ::= <Value>
//! <Value>      ::= <Object> | <Array> | string | number | null | true | false
//! <Array>      ::= [ <ArrayList> ]
//! <ArrayList>  ::= e | <Value> | <Value> , <ArrayList>
//! <Object>     ::= { <ObjectList> }
//! <ObjectList> ::= e | <ObjectItem> | <ObjectItem> , <ObjectList>
//! <ObjectItem> ::= string : <Value>
//! ```
//!
//! The grammar is not validating: separators between list entries are
//! accepted but not required, so `[1 2]` parses as a two element array.

use alloc::string::String;
use alloc::vec::Vec;
use core::fmt::Write;

use crate::options::ParserOptions;
use crate::receiver::{SaxEvent, SaxReceiver};
use crate::tokenizer::{TokenType, Tokenizer};
use crate::ParseError;

use log::{debug, trace};

/// Grammar nonterminals.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Value,
    Array,
    Object,
    ArrayList,
    ObjectList,
    ObjectListItem,
    ObjectListItemValue,
    Failure,
}

impl State {
    fn name(self) -> &'static str {
        match self {
            State::Value => "Value",
            State::Array => "Array",
            State::Object => "Object",
            State::ArrayList => "ArrayList",
            State::ObjectList => "ObjectList",
            State::ObjectListItem => "ObjectListItem",
            State::ObjectListItemValue => "ObjectListItemValue",
            State::Failure => "Failure",
        }
    }
}

/// A pushdown JSON parser that reports what it sees to a [`SaxReceiver`].
///
/// The parser owns its receiver. Pass `&mut receiver` to keep ownership on
/// the caller side, or get it back with [`into_receiver`](Self::into_receiver).
///
/// # Generic Parameters
///
/// * `'input` - Lifetime of the buffers handed to [`parse`](Self::parse)
/// * `R` - The event receiver
pub struct SaxParser<'input, R> {
    tokenizer: Tokenizer<'input>,
    stack: Vec<State>,
    options: ParserOptions,
    failure: Option<ParseError>,
    error: String,
    receiver: R,
}

impl<'input, R> SaxParser<'input, R>
where
    R: SaxReceiver<'input>,
{
    /// Creates a parser with default [`ParserOptions`].
    pub fn new(receiver: R) -> Self {
        Self::with_options(receiver, ParserOptions::default())
    }

    /// Creates a parser with explicit options.
    pub fn with_options(receiver: R, options: ParserOptions) -> Self {
        Self {
            tokenizer: Tokenizer::default(),
            stack: Vec::with_capacity(options.initial_stack_capacity),
            options,
            failure: None,
            error: String::new(),
            receiver,
        }
    }

    /// The receiver.
    pub fn receiver(&self) -> &R {
        &self.receiver
    }

    /// The receiver, mutably.
    pub fn receiver_mut(&mut self) -> &mut R {
        &mut self.receiver
    }

    /// Destroys the parser and returns the receiver.
    pub fn into_receiver(self) -> R {
        self.receiver
    }

    /// Description of the last failure, empty after a successful parse.
    ///
    /// Holds the failed expectation, the byte offset, the offending token, a
    /// preview of the unconsumed input and the grammar stack.
    pub fn error(&self) -> &str {
        &self.error
    }

    /// Parses one complete document.
    ///
    /// The receiver sees `document_start`, the events, and then
    /// `document_stop` on success or `document_failure` otherwise.
    pub fn parse(&mut self, input: &'input [u8]) -> Result<(), ParseError> {
        self.tokenizer.reset(input);
        self.stack.clear();
        self.stack.push(State::Value);
        self.failure = None;
        self.error.clear();

        debug!("parse start: {} bytes", input.len());
        self.receiver.document_start();

        let mut has_token = self.tokenizer.read_next_token();
        while has_token {
            let state = match self.stack.last() {
                Some(State::Failure) | None => break,
                Some(&state) => state,
            };
            if self.step(state) {
                has_token = self.tokenizer.read_next_token();
            }
        }

        if let Err(err) = self.check_complete(has_token) {
            debug!("parse failed: {}", self.error);
            self.receiver.document_failure();
            return Err(err);
        }

        if !self.receiver.document_stop() {
            debug!("document rejected by receiver");
            return Err(self.record(ParseError::Rejected));
        }
        debug!("parse finished: {} bytes", self.tokenizer.consumed());
        Ok(())
    }

    /// Success means an empty stack exactly at the end of input.
    fn check_complete(&mut self, has_token: bool) -> Result<(), ParseError> {
        if let Some(err) = self.failure {
            return Err(err);
        }
        let offset = self.tokenizer.consumed();
        let err = if has_token {
            ParseError::TrailingContent { offset }
        } else if let Some(&byte) = self.tokenizer.remaining().first() {
            ParseError::UnrecognizedByte { offset, byte }
        } else if self.stack.is_empty() {
            return Ok(());
        } else if self.stack == [State::Value] {
            ParseError::EmptyDocument
        } else {
            ParseError::UnexpectedEnd { offset }
        };
        Err(self.record(err))
    }

    /// Applies one transition. Returns whether the current token was consumed.
    fn step(&mut self, state: State) -> bool {
        let Some(token) = self.tokenizer.token_type() else {
            return self.fail("token");
        };
        trace!("{} <- '{}' depth={}", state.name(), token, self.stack.len());

        match state {
            State::Value => self.read_value(token),
            State::Array => self.read_array(token),
            State::ArrayList => self.read_array_list(token),
            State::Object => self.read_object(token),
            State::ObjectList => self.read_object_list(token),
            State::ObjectListItem => self.read_object_list_item(token),
            State::ObjectListItemValue => self.read_object_item_value(token),
            State::Failure => false,
        }
    }

    fn read_value(&mut self, token: TokenType) -> bool {
        self.stack.pop();
        match token {
            TokenType::ObjectBegin => {
                self.stack.push(State::Object);
                false
            }
            TokenType::ArrayBegin => {
                self.stack.push(State::Array);
                false
            }
            TokenType::String => {
                self.emit(SaxEvent::String);
                true
            }
            TokenType::Number => {
                self.emit(SaxEvent::Number);
                true
            }
            TokenType::Null => {
                self.emit(SaxEvent::Null);
                true
            }
            TokenType::True | TokenType::False => {
                self.emit(SaxEvent::Bool);
                true
            }
            _ => self.fail("value"),
        }
    }

    fn read_array(&mut self, token: TokenType) -> bool {
        match token {
            TokenType::ArrayBegin => {
                self.emit(SaxEvent::ArrayStart);
                self.stack.push(State::ArrayList);
                true
            }
            TokenType::ArrayEnd => {
                self.stack.pop();
                self.emit(SaxEvent::ArrayStop);
                true
            }
            _ => self.fail("']'"),
        }
    }

    fn read_array_list(&mut self, token: TokenType) -> bool {
        match token {
            TokenType::ValueSeparator => {
                self.emit(SaxEvent::ValueSeparator);
                self.stack.push(State::Value);
                true
            }
            TokenType::ArrayEnd => {
                // Array consumes the bracket
                self.stack.pop();
                false
            }
            _ => {
                self.stack.push(State::Value);
                false
            }
        }
    }

    fn read_object(&mut self, token: TokenType) -> bool {
        match token {
            TokenType::ObjectBegin => {
                self.emit(SaxEvent::ObjectStart);
                self.stack.push(State::ObjectList);
                true
            }
            TokenType::ObjectEnd => {
                self.stack.pop();
                self.emit(SaxEvent::ObjectStop);
                true
            }
            _ => self.fail("'}'"),
        }
    }

    fn read_object_list(&mut self, token: TokenType) -> bool {
        match token {
            TokenType::ValueSeparator => {
                self.emit(SaxEvent::ValueSeparator);
                self.stack.push(State::ObjectListItem);
                true
            }
            TokenType::ObjectEnd => {
                // Object consumes the brace
                self.stack.pop();
                false
            }
            _ => {
                self.stack.push(State::ObjectListItem);
                false
            }
        }
    }

    fn read_object_list_item(&mut self, token: TokenType) -> bool {
        match token {
            TokenType::String => {
                self.emit(SaxEvent::ObjectItemStart);
                if let Some(top) = self.stack.last_mut() {
                    *top = State::ObjectListItemValue;
                }
                true
            }
            _ => self.fail("string"),
        }
    }

    fn read_object_item_value(&mut self, token: TokenType) -> bool {
        match token {
            TokenType::NameSeparator => {
                self.stack.push(State::Value);
                true
            }
            _ => {
                self.emit(SaxEvent::ObjectItemStop);
                self.stack.pop();
                false
            }
        }
    }

    fn emit(&mut self, event: SaxEvent) {
        let data = self.tokenizer.token_bytes();
        self.receiver.sax_event(event, data);
    }

    /// Moves the grammar into `Failure`. Never consumes the token.
    fn fail(&mut self, expected: &'static str) -> bool {
        self.stack.push(State::Failure);
        let err = ParseError::Grammar {
            expected,
            offset: self.tokenizer.consumed(),
        };
        self.failure = Some(self.record(err));
        false
    }

    /// Writes the failure description and hands the error back.
    fn record(&mut self, err: ParseError) -> ParseError {
        let tokenizer = &self.tokenizer;
        let out = &mut self.error;
        out.clear();

        let _ = match err {
            ParseError::Grammar { expected, .. } => write!(out, "{expected} expected"),
            ParseError::UnrecognizedByte { .. } => write!(out, "unrecognized byte"),
            ParseError::TrailingContent { .. } => write!(out, "end of input expected"),
            ParseError::UnexpectedEnd { .. } => write!(out, "unexpected end of input"),
            ParseError::EmptyDocument => write!(out, "value expected"),
            ParseError::Rejected => write!(out, "document rejected by receiver"),
        };

        let _ = write!(
            out,
            " : +{} token-type='{}' token='{}' >>> ",
            tokenizer.consumed(),
            tokenizer.token_type().map_or("none", TokenType::name),
            String::from_utf8_lossy(tokenizer.token_bytes()),
        );

        let rest = tokenizer.remaining();
        let limit = self.options.error_preview_limit;
        if rest.len() > limit {
            out.push_str(&String::from_utf8_lossy(&rest[..limit]));
            out.push_str("...");
        } else {
            out.push_str(&String::from_utf8_lossy(rest));
        }

        let _ = write!(out, "\nStack [{}] :", self.stack.len());
        for state in &self.stack {
            out.push(' ');
            out.push_str(state.name());
        }
        err
    }
}
