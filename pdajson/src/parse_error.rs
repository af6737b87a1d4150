// SPDX-License-Identifier: Apache-2.0

/// Reasons a parse can fail.
///
/// Offsets are byte positions in the input. The parser also keeps a longer,
/// human-readable description of the last failure, see
/// [`SaxParser::error`](crate::SaxParser::error).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseError {
    /// The input holds no token at all.
    EmptyDocument,
    /// A byte that cannot start any token, including truncated literals and
    /// unterminated strings.
    UnrecognizedByte {
        /// Position of the byte.
        offset: usize,
        /// The byte itself.
        byte: u8,
    },
    /// The grammar did not accept the token at `offset`.
    Grammar {
        /// The construct the grammar was waiting for.
        expected: &'static str,
        /// Position of the rejected token.
        offset: usize,
    },
    /// Input ended while containers were still open.
    UnexpectedEnd {
        /// Input length.
        offset: usize,
    },
    /// A complete value was followed by another token.
    TrailingContent {
        /// Position of the first extra token.
        offset: usize,
    },
    /// The receiver refused the document in `document_stop`.
    Rejected,
}

impl core::fmt::Display for ParseError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ParseError::EmptyDocument => write!(f, "empty document"),
            ParseError::UnrecognizedByte { offset, byte } => {
                write!(f, "unrecognized byte {:?} at {}", *byte as char, offset)
            }
            ParseError::Grammar { expected, offset } => {
                write!(f, "{expected} expected at {offset}")
            }
            ParseError::UnexpectedEnd { offset } => {
                write!(f, "unexpected end of input at {offset}")
            }
            ParseError::TrailingContent { offset } => {
                write!(f, "trailing content at {offset}")
            }
            ParseError::Rejected => write!(f, "document rejected by receiver"),
        }
    }
}

impl core::error::Error for ParseError {}

#[cfg(test)]
mod tests {
    use super::*;
    use test_log::test;

    #[test]
    fn test_display() {
        let err = ParseError::Grammar {
            expected: "value",
            offset: 5,
        };
        assert_eq!(err.to_string(), "value expected at 5");

        let err = ParseError::UnrecognizedByte {
            offset: 1,
            byte: b'k',
        };
        assert_eq!(err.to_string(), "unrecognized byte 'k' at 1");

        assert_eq!(ParseError::EmptyDocument.to_string(), "empty document");
    }

    #[test]
    fn test_is_std_error() {
        fn takes_error(_: &dyn std::error::Error) {}
        takes_error(&ParseError::Rejected);
    }
}
