//! 32-byte word interpretation.
//!
//! The encoding's atomic unit is a 32-byte big-endian word. Numerics are
//! left-padded, fixed-byte and string data right-padded. The helpers here
//! are the only place raw words are turned into typed scalars.

use alloy_primitives::{Address, B256, I256, U256};

/// A single 32-byte word of ABI-encoded data.
pub type Word = B256;

/// Width of one [`Word`] in bytes.
pub const WORD_BYTES: usize = 32;

/// Full big-endian magnitude of the word.
pub(crate) fn as_u256(word: Word) -> U256 {
    U256::from_be_bytes(word.0)
}

/// Two's-complement interpretation. Encoders sign-extend narrower signed
/// kinds to the full word, so no further extension is needed here.
pub(crate) fn as_i256(word: Word) -> I256 {
    I256::from_raw(as_u256(word))
}

/// A nonzero last byte reads as `true`.
pub(crate) fn as_bool(word: Word) -> bool {
    word[WORD_BYTES - 1] != 0
}

/// The low 20 bytes of the word.
pub(crate) fn as_address(word: Word) -> Address {
    Address::from_word(word)
}

/// The word as a host-sized quantity, for offsets, lengths and counts.
///
/// Returns `None` when the value cannot index any buffer on this platform.
/// A malformed or malicious buffer can encode an astronomically large
/// offset; rejecting it here keeps every downstream computation in `usize`.
pub(crate) fn as_usize(word: Word) -> Option<usize> {
    const LEAD: usize = WORD_BYTES - usize::BITS as usize / 8;
    if word[..LEAD].iter().any(|b| *b != 0) {
        return None;
    }
    let mut out = 0usize;
    for &byte in &word[LEAD..] {
        out = (out << 8) | byte as usize;
    }
    Some(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::{address, b256};

    #[test]
    fn numeric_words() {
        let word = b256!("000000000000000000000000000000000000000000000000000000000000002a");
        assert_eq!(as_u256(word), U256::from(42));
        assert_eq!(as_usize(word), Some(42));

        let minus_one = Word::repeat_byte(0xff);
        assert_eq!(as_i256(minus_one), I256::MINUS_ONE);
        assert_eq!(as_usize(minus_one), None);
    }

    #[test]
    fn bool_reads_last_byte() {
        assert!(!as_bool(Word::ZERO));
        let mut word = Word::ZERO;
        word[31] = 2;
        assert!(as_bool(word));
        // only the last byte participates
        let mut word = Word::ZERO;
        word[0] = 1;
        assert!(!as_bool(word));
    }

    #[test]
    fn address_is_low_20_bytes() {
        let word = b256!("000000000000000000000000d8da6bf26964af9d7eed9e03e53415d37aa96045");
        assert_eq!(as_address(word), address!("d8da6bf26964af9d7eed9e03e53415d37aa96045"));
    }
}
