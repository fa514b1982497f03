//! Block-relative read cursor over an ABI-encoded buffer.
//!
//! Offsets in the encoding are relative to the start of the *block* being
//! decoded: the top-level parameter list, a dynamic tuple's tail, or an
//! array's element region. The cursor carries that zero-point (`base`)
//! alongside the absolute position of the next head word (`pos`); offsets
//! read from head words are added to `base`, never to `pos`.

use crate::{
    error::ErrorKind,
    word::{self, WORD_BYTES, Word},
};

#[derive(Clone, Debug)]
pub(crate) struct Cursor<'a> {
    buf: &'a [u8],
    base: usize,
    pos: usize,
}

impl<'a> Cursor<'a> {
    /// Cursor over the top-level block, where the block start coincides with
    /// absolute offset 0.
    pub(crate) fn new(buf: &'a [u8]) -> Self {
        Self { buf, base: 0, pos: 0 }
    }

    /// Absolute position of the next head word.
    pub(crate) fn position(&self) -> usize {
        self.pos
    }

    /// Whole words left between the read position and the end of the buffer.
    pub(crate) fn remaining_words(&self) -> usize {
        self.buf.len().saturating_sub(self.pos) / WORD_BYTES
    }

    /// Total length of the underlying buffer.
    pub(crate) fn data_len(&self) -> usize {
        self.buf.len()
    }

    fn word_at(&self, offset: usize) -> Result<Word, ErrorKind> {
        let end = offset.checked_add(WORD_BYTES).filter(|&end| end <= self.buf.len()).ok_or(
            ErrorKind::OutOfBounds {
                offset,
                needed: WORD_BYTES,
                available: self.buf.len(),
            },
        )?;
        Ok(Word::from_slice(&self.buf[offset..end]))
    }

    /// Consumes the next head word of the current block.
    pub(crate) fn take_word(&mut self) -> Result<Word, ErrorKind> {
        let word = self.word_at(self.pos)?;
        self.pos += WORD_BYTES;
        Ok(word)
    }

    /// Consumes a head word holding an offset and returns the cursor for the
    /// block it points at: `base + offset`, which becomes both the new
    /// block's zero-point and its first read position.
    pub(crate) fn take_indirection(&mut self) -> Result<Self, ErrorKind> {
        let word = self.take_word()?;
        let relative = word::as_usize(word).ok_or(ErrorKind::InvalidOffset(word::as_u256(word)))?;
        let absolute = self
            .base
            .checked_add(relative)
            .ok_or(ErrorKind::InvalidOffset(word::as_u256(word)))?;
        if absolute > self.buf.len() {
            return Err(ErrorKind::OutOfBounds {
                offset: absolute,
                needed: WORD_BYTES,
                available: self.buf.len(),
            });
        }
        Ok(Self { buf: self.buf, base: absolute, pos: absolute })
    }

    /// A fresh block anchored at the current read position, with no
    /// indirection. Used for a dynamic array's element region, whose offsets
    /// count from the word after the element count.
    pub(crate) fn child(&self) -> Self {
        Self { buf: self.buf, base: self.pos, pos: self.pos }
    }

    /// Consumes a word holding a byte length or element count.
    pub(crate) fn take_length(&mut self) -> Result<usize, ErrorKind> {
        let offset = self.pos;
        let word = self.take_word()?;
        word::as_usize(word).ok_or(ErrorKind::OutOfBounds {
            offset,
            needed: usize::MAX,
            available: self.buf.len(),
        })
    }

    /// Consumes `len` bytes padded up to a whole word, returning the padded
    /// slice. The caller truncates to `len`; the entire padded span must be
    /// present.
    pub(crate) fn take_padded_bytes(&mut self, len: usize) -> Result<&'a [u8], ErrorKind> {
        let padded = len
            .checked_next_multiple_of(WORD_BYTES)
            .and_then(|padded| self.pos.checked_add(padded).map(|end| (padded, end)));
        let out_of_bounds = ErrorKind::OutOfBounds {
            offset: self.pos,
            needed: len.checked_next_multiple_of(WORD_BYTES).unwrap_or(usize::MAX),
            available: self.buf.len(),
        };
        let (padded, end) = padded.ok_or_else(|| out_of_bounds.clone())?;
        if end > self.buf.len() {
            return Err(out_of_bounds);
        }
        let slice = &self.buf[self.pos..self.pos + padded];
        self.pos = end;
        Ok(slice)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::{U256, hex};

    #[test]
    fn take_word_advances_and_bounds() {
        let data = hex!(
            "0000000000000000000000000000000000000000000000000000000000000001"
            "0000000000000000000000000000000000000000000000000000000000000002"
        );
        let mut cursor = Cursor::new(&data);
        assert_eq!(cursor.take_word().unwrap()[31], 1);
        assert_eq!(cursor.take_word().unwrap()[31], 2);
        assert_eq!(
            cursor.take_word(),
            Err(ErrorKind::OutOfBounds { offset: 64, needed: 32, available: 64 })
        );
    }

    #[test]
    fn indirection_is_base_relative() {
        // one head word pointing at offset 0x20, then a word holding 7
        let data = hex!(
            "0000000000000000000000000000000000000000000000000000000000000020"
            "0000000000000000000000000000000000000000000000000000000000000007"
        );
        let mut cursor = Cursor::new(&data);
        let mut tail = cursor.take_indirection().unwrap();
        assert_eq!(tail.position(), 32);
        assert_eq!(tail.take_word().unwrap()[31], 7);
        // the parent consumed exactly one head word
        assert_eq!(cursor.position(), 32);
    }

    #[test]
    fn oversized_offset_is_rejected() {
        let data = hex!("ffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffff");
        let mut cursor = Cursor::new(&data);
        assert_eq!(cursor.take_indirection().unwrap_err(), ErrorKind::InvalidOffset(U256::MAX));
    }

    #[test]
    fn offset_past_end_is_out_of_bounds() {
        // offset 1000 on a 32-byte buffer
        let data = hex!("00000000000000000000000000000000000000000000000000000000000003e8");
        let mut cursor = Cursor::new(&data);
        assert_eq!(
            cursor.take_indirection().unwrap_err(),
            ErrorKind::OutOfBounds { offset: 1000, needed: 32, available: 32 }
        );
    }

    #[test]
    fn padded_reads_truncate_to_whole_words() {
        let data = hex!("0102030000000000000000000000000000000000000000000000000000000000");
        let mut cursor = Cursor::new(&data);
        let padded = cursor.take_padded_bytes(3).unwrap();
        assert_eq!(padded.len(), 32);
        assert_eq!(&padded[..3], &[1, 2, 3]);
        assert_eq!(cursor.remaining_words(), 0);

        // a 33-byte payload needs two words; only one is present
        let mut cursor = Cursor::new(&data);
        assert!(matches!(
            cursor.take_padded_bytes(33),
            Err(ErrorKind::OutOfBounds { needed: 64, .. })
        ));
    }
}
