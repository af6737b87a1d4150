// SPDX-License-Identifier: Apache-2.0

//! Rejected input, and input a non-validating reader lets through.

use pdajson::{ParseError, SaxEvent, SaxParser, SaxReceiver, TreeBuilder};
use test_log::test;

/// Tracks the document brackets around the events.
#[derive(Default)]
struct Brackets {
    started: usize,
    stopped: usize,
    failed: usize,
    events: usize,
}

impl SaxReceiver<'_> for Brackets {
    fn document_start(&mut self) {
        self.started += 1;
    }

    fn document_stop(&mut self) -> bool {
        self.stopped += 1;
        true
    }

    fn document_failure(&mut self) {
        self.failed += 1;
    }

    fn sax_event(&mut self, _event: SaxEvent, _data: &[u8]) {
        self.events += 1;
    }
}

fn parse(input: &[u8]) -> (Result<(), ParseError>, Brackets) {
    let mut brackets = Brackets::default();
    let result = SaxParser::new(&mut brackets).parse(input);
    (result, brackets)
}

macro_rules! rejected_tests {
    ($($name:ident: $input:expr => $err:expr,)*) => {
        $(
            paste::paste! {
                #[test]
                fn [<test_rejects_ $name>]() {
                    let input: &[u8] = $input;
                    let (result, brackets) = parse(input);
                    assert_eq!(result, Err($err));
                    assert_eq!((brackets.started, brackets.stopped, brackets.failed), (1, 0, 1));

                    let mut tree = SaxParser::new(TreeBuilder::with_capacity(64));
                    assert_eq!(tree.parse(input), Err($err));
                    assert!(tree.receiver().root().is_none());
                }
            }
        )*
    };
}

rejected_tests! {
    missing_member_value: br#"{"a":}"# => ParseError::Grammar { expected: "value", offset: 5 },
    double_comma: b"[1,,2]" => ParseError::Grammar { expected: "value", offset: 3 },
    trailing_comma_in_object: br#"{"a":1,}"# => ParseError::Grammar { expected: "string", offset: 7 },
    number_as_key: br#"{"a" 1}"# => ParseError::Grammar { expected: "string", offset: 5 },
    mismatched_close: b"{]" => ParseError::Grammar { expected: "string", offset: 1 },
    close_without_open: b"]" => ParseError::Grammar { expected: "value", offset: 0 },
    colon_in_array: b"[:]" => ParseError::Grammar { expected: "value", offset: 1 },
    unquoted_key: b"{key:1}" => ParseError::UnrecognizedByte { offset: 1, byte: b'k' },
    unterminated_string: br#"["abc]"# => ParseError::UnrecognizedByte { offset: 1, byte: b'"' },
    truncated_literal: b"[tru]" => ParseError::UnrecognizedByte { offset: 1, byte: b't' },
    misspelled_literal: b"nul1" => ParseError::UnrecognizedByte { offset: 0, byte: b'n' },
    second_value: b"42 43" => ParseError::TrailingContent { offset: 3 },
    second_document: b"{}{}" => ParseError::TrailingContent { offset: 2 },
    trailing_garbage: b"[1]x" => ParseError::UnrecognizedByte { offset: 3, byte: b'x' },
    unclosed_array: b"[1,2" => ParseError::UnexpectedEnd { offset: 4 },
    unclosed_objects: b"{{{" => ParseError::Grammar { expected: "string", offset: 1 },
    dangling_key: br#"{"a":"# => ParseError::UnexpectedEnd { offset: 5 },
    empty: b"" => ParseError::EmptyDocument,
    blank: b" \t\r\n " => ParseError::EmptyDocument,
}

macro_rules! accepted_tests {
    ($($name:ident: $input:expr,)*) => {
        $(
            paste::paste! {
                #[test]
                fn [<test_accepts_ $name>]() {
                    let (result, brackets) = parse($input);
                    assert_eq!(result, Ok(()));
                    assert_eq!((brackets.started, brackets.stopped, brackets.failed), (1, 1, 0));
                }
            }
        )*
    };
}

accepted_tests! {
    array_without_commas: b"[1 2]",
    members_without_commas: br#"{"a":1 "b":2}"#,
    leading_comma: b"[,1]",
    permissive_number: b"1.2.3",
    lone_minus: b"-",
    leading_zeros: b"007",
    raw_control_bytes: b"\"a\x01b\"",
    surrounding_space: b"\n  [ ]\n",
}

#[test]
fn test_error_message_describes_failure() {
    let mut parser = SaxParser::new(Brackets::default());
    assert!(parser.parse(br#"{"a":}"#).is_err());

    let message = parser.error();
    assert!(message.starts_with("value expected : +5 token-type='}' token='}'"));
    assert!(message.ends_with("Stack [4] : Object ObjectList ObjectListItemValue Failure"));

    parser.parse(b"[]").unwrap();
    assert!(parser.error().is_empty());
}

#[test]
fn test_error_display() {
    let (result, _) = parse(b"[1,2");
    let err = result.unwrap_err();
    assert_eq!(err.to_string(), "unexpected end of input at 4");
}

#[test]
fn test_deep_nesting_fails_without_overflow() {
    let depth = 100_000;
    let mut input = vec![b'['; depth];
    input.push(b'}');
    let (result, brackets) = parse(&input);
    assert_eq!(
        result,
        Err(ParseError::Grammar {
            expected: "value",
            offset: depth
        })
    );
    assert_eq!(brackets.events, depth);
}
