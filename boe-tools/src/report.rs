/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 27/1/26
******************************************************************************/

//! Payload comparison.

use std::fmt;

const RULE: &str = "========================================================================";

/// Outcome of comparing an input payload with its re-encoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comparison {
    /// Input payload as uppercase hex.
    pub original_hex: String,
    /// Re-encoded payload as uppercase hex.
    pub encoded_hex: String,
    /// Offset of the first differing byte, if any.
    pub first_mismatch: Option<usize>,
}

impl Comparison {
    /// Returns true if both payloads are identical.
    #[must_use]
    pub const fn is_match(&self) -> bool {
        self.first_mismatch.is_none()
    }
}

/// Compares two payloads byte by byte.
///
/// When one payload is a prefix of the other, the mismatch is reported at
/// the end of the shorter one.
#[must_use]
pub fn compare(original: &[u8], encoded: &[u8]) -> Comparison {
    let first_mismatch = original
        .iter()
        .zip(encoded)
        .position(|(a, b)| a != b)
        .or_else(|| (original.len() != encoded.len()).then(|| original.len().min(encoded.len())));

    Comparison {
        original_hex: hex::encode_upper(original),
        encoded_hex: hex::encode_upper(encoded),
        first_mismatch,
    }
}

impl fmt::Display for Comparison {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{RULE}")?;
        writeln!(
            f,
            "INPUT PAYLOAD -> DECODER -> MSG OBJECT -> ENCODER -> ENCODED PAYLOAD"
        )?;
        writeln!(f, "{RULE}")?;
        writeln!(f, "Original Hex Payload : {}", self.original_hex)?;
        writeln!(f, "Encoded Hex Payload  : {}", self.encoded_hex)?;
        writeln!(f)?;
        match self.first_mismatch {
            None => writeln!(f, "Result: INPUT PAYLOAD == ENCODED PAYLOAD")?,
            Some(offset) => writeln!(
                f,
                "Result: INPUT PAYLOAD != ENCODED PAYLOAD (first difference at byte {offset})"
            )?,
        }
        write!(f, "{RULE}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compare_equal() {
        let cmp = compare(&[0x0a, 0xff], &[0x0a, 0xff]);
        assert!(cmp.is_match());
        assert_eq!(cmp.original_hex, "0AFF");
        assert!(cmp.to_string().contains("INPUT PAYLOAD == ENCODED PAYLOAD"));
    }

    #[test]
    fn test_compare_first_difference() {
        let cmp = compare(&[1, 2, 3, 4], &[1, 2, 9, 4]);
        assert_eq!(cmp.first_mismatch, Some(2));
        assert!(cmp.to_string().contains("first difference at byte 2"));
    }

    #[test]
    fn test_compare_length_difference() {
        assert_eq!(compare(&[1, 2, 3], &[1, 2]).first_mismatch, Some(2));
        assert_eq!(compare(&[], &[7]).first_mismatch, Some(0));
    }
}
