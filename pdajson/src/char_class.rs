// SPDX-License-Identifier: Apache-2.0

//! Static byte classification used by the tokenizer.
//!
//! Every possible input byte maps to one coarse class. The table is built at
//! compile time so classification is a single indexed load.

/// Coarse class of a single input byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CharClass {
    /// Not allowed at the start of any token.
    Unknown,
    /// Space, horizontal tab, line feed or carriage return.
    Space,
    /// One of `{ } [ ] : ,`.
    Structural,
    /// The `"` byte opening a string.
    Quote,
    /// `-` or an ASCII digit.
    Number,
    /// `n`, the first byte of `null`.
    Null,
    /// `t`, the first byte of `true`.
    True,
    /// `f`, the first byte of `false`.
    False,
}

static CHAR_CLASS: [CharClass; 256] = build_table();

const fn build_table() -> [CharClass; 256] {
    let mut table = [CharClass::Unknown; 256];

    table[b' ' as usize] = CharClass::Space;
    table[b'\t' as usize] = CharClass::Space;
    table[b'\n' as usize] = CharClass::Space;
    table[b'\r' as usize] = CharClass::Space;

    table[b'{' as usize] = CharClass::Structural;
    table[b'}' as usize] = CharClass::Structural;
    table[b'[' as usize] = CharClass::Structural;
    table[b']' as usize] = CharClass::Structural;
    table[b':' as usize] = CharClass::Structural;
    table[b',' as usize] = CharClass::Structural;

    table[b'"' as usize] = CharClass::Quote;

    table[b'-' as usize] = CharClass::Number;
    let mut digit = b'0';
    while digit <= b'9' {
        table[digit as usize] = CharClass::Number;
        digit += 1;
    }

    table[b'n' as usize] = CharClass::Null;
    table[b't' as usize] = CharClass::True;
    table[b'f' as usize] = CharClass::False;

    table
}

/// Returns the class of `byte`.
#[inline]
pub fn classify(byte: u8) -> CharClass {
    CHAR_CLASS[byte as usize]
}

/// True for the bytes a number token may continue with.
#[inline]
pub fn is_number_tail(byte: u8) -> bool {
    matches!(byte, b'0'..=b'9' | b'.')
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_log::test;

    #[test]
    fn test_whitespace() {
        for byte in [b' ', b'\t', b'\n', b'\r'] {
            assert_eq!(classify(byte), CharClass::Space, "byte {byte:#04x}");
        }
        // JSON only knows four whitespace bytes
        assert_eq!(classify(0x0b), CharClass::Unknown);
        assert_eq!(classify(0x0c), CharClass::Unknown);
    }

    #[test]
    fn test_structural() {
        for byte in *b"{}[]:," {
            assert_eq!(classify(byte), CharClass::Structural);
        }
    }

    #[test]
    fn test_number_start() {
        assert_eq!(classify(b'-'), CharClass::Number);
        for byte in b'0'..=b'9' {
            assert_eq!(classify(byte), CharClass::Number);
        }
        // these may continue a number but never start one
        assert_eq!(classify(b'.'), CharClass::Unknown);
        assert_eq!(classify(b'+'), CharClass::Unknown);
        assert_eq!(classify(b'e'), CharClass::Unknown);
    }

    #[test]
    fn test_literal_starts() {
        assert_eq!(classify(b'n'), CharClass::Null);
        assert_eq!(classify(b't'), CharClass::True);
        assert_eq!(classify(b'f'), CharClass::False);
        assert_eq!(classify(b'N'), CharClass::Unknown);
        assert_eq!(classify(b'T'), CharClass::Unknown);
    }

    #[test]
    fn test_everything_else_is_unknown() {
        let known = (0u8..=255)
            .filter(|&b| classify(b) != CharClass::Unknown)
            .count();
        // 4 spaces, 6 structural, 1 quote, 11 number starts, 3 literal starts
        assert_eq!(known, 25);
        assert_eq!(classify(0x00), CharClass::Unknown);
        assert_eq!(classify(0x80), CharClass::Unknown);
        assert_eq!(classify(0xff), CharClass::Unknown);
    }

    #[test]
    fn test_number_tail() {
        assert!(is_number_tail(b'.'));
        assert!(is_number_tail(b'7'));
        assert!(!is_number_tail(b'-'));
        assert!(!is_number_tail(b'e'));
        assert!(!is_number_tail(b','));
    }
}
