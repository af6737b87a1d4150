// SPDX-License-Identifier: Apache-2.0

//! The event interface between the [`SaxParser`](crate::SaxParser) and its consumers.

/// Events emitted by the parser while it walks the grammar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaxEvent {
    /// `{` opened an object.
    ObjectStart,
    /// `}` closed an object.
    ObjectStop,
    /// `[` opened an array.
    ArrayStart,
    /// `]` closed an array.
    ArrayStop,
    /// A key string started an object member. Payload is the quoted key.
    ObjectItemStart,
    /// The current object member ended. Payload is the token that ended it.
    ObjectItemStop,
    /// `,` between two values or members.
    ValueSeparator,
    /// A quoted string value, quotes included.
    String,
    /// A number value.
    Number,
    /// `null`
    Null,
    /// `true` or `false`
    Bool,
}

impl SaxEvent {
    /// Name used in traces and diagnostics.
    pub fn name(self) -> &'static str {
        match self {
            SaxEvent::ObjectStart => "ObjectStart",
            SaxEvent::ObjectStop => "ObjectStop",
            SaxEvent::ArrayStart => "ArrayStart",
            SaxEvent::ArrayStop => "ArrayStop",
            SaxEvent::ObjectItemStart => "ObjectItemStart",
            SaxEvent::ObjectItemStop => "ObjectItemStop",
            SaxEvent::ValueSeparator => "ValueSeparator",
            SaxEvent::String => "String",
            SaxEvent::Number => "Number",
            SaxEvent::Null => "Null",
            SaxEvent::Bool => "Bool",
        }
    }
}

/// A consumer of parser events.
///
/// One parse attempt is always bracketed by [`document_start`] and then
/// either [`document_stop`] (grammar accepted the input) or
/// [`document_failure`] (it did not). Payload slices borrow the input buffer
/// for `'input`, so a receiver may keep them without copying.
///
/// # Generic Parameters
///
/// * `'input` - Lifetime of the buffer being parsed
///
/// [`document_start`]: SaxReceiver::document_start
/// [`document_stop`]: SaxReceiver::document_stop
/// [`document_failure`]: SaxReceiver::document_failure
pub trait SaxReceiver<'input> {
    /// Called once before the first event of a parse.
    fn document_start(&mut self);

    /// Called once after the grammar accepted the whole input.
    ///
    /// Returning `false` rejects the document even though it parsed.
    fn document_stop(&mut self) -> bool;

    /// Called once when the parse failed.
    fn document_failure(&mut self);

    /// Handles a single event.
    fn sax_event(&mut self, event: SaxEvent, data: &'input [u8]);
}

impl<'input, R> SaxReceiver<'input> for &mut R
where
    R: SaxReceiver<'input> + ?Sized,
{
    fn document_start(&mut self) {
        (**self).document_start();
    }

    fn document_stop(&mut self) -> bool {
        (**self).document_stop()
    }

    fn document_failure(&mut self) {
        (**self).document_failure();
    }

    fn sax_event(&mut self, event: SaxEvent, data: &'input [u8]) {
        (**self).sax_event(event, data);
    }
}
