//! The recursive decode algorithm.
//!
//! Entry is a parameter list and a buffer. Within one block, every
//! parameter consumes exactly [`ParamType::head_words`] words: static values
//! are read inline, dynamic values read a single head word whose offset
//! (relative to the block start) locates their out-of-line tail. Tuples and
//! arrays recurse with a child cursor, so nesting of any depth reduces to
//! the same walk.

use crate::{
    cursor::Cursor,
    error::{Error, ErrorKind, Result},
    ty::{Param, ParamType},
    value::{DecodedParam, Value},
    word::{self, WORD_BYTES, Word},
};
use alloy_primitives::Bytes;

/// Decodes ABI-encoded parameter lists against their declared types.
///
/// Holds no mutable state: a single decoder can be shared and reused across
/// threads, and concurrent decode calls are fully independent.
#[derive(Clone, Copy, Debug, Default)]
pub struct Decoder {
    validate: bool,
}

impl Decoder {
    /// A decoder with validation off: padding bits are ignored, as most
    /// on-chain consumers do.
    pub const fn new() -> Self {
        Self { validate: false }
    }

    /// Controls canonical-encoding validation. When on, words with dirty
    /// padding (nonzero bytes beyond a value's declared width, booleans
    /// other than 0 or 1, nonzero bytes in a tail's padding) are rejected
    /// with [`ErrorKind::InvalidEncoding`].
    pub const fn validating(mut self, validate: bool) -> Self {
        self.validate = validate;
        self
    }

    /// Decodes `data` against a declared parameter list, yielding one
    /// [`DecodedParam`] per declared parameter, in declaration order.
    pub fn decode_params(&self, params: &[Param], data: &[u8]) -> Result<Vec<DecodedParam>> {
        if data.len() % WORD_BYTES != 0 {
            return Err(ErrorKind::encoding("buffer length is not a multiple of 32").into());
        }
        for (index, param) in params.iter().enumerate() {
            param
                .ty
                .ensure_supported()
                .map_err(|kind| Error::from(kind).at_param(index, &param.name))?;
        }

        trace!(params = params.len(), bytes = data.len(), "decoding parameter list");

        let mut cursor = Cursor::new(data);
        params
            .iter()
            .enumerate()
            .map(|(index, param)| {
                let value = self
                    .decode_value(&param.ty, &mut cursor)
                    .map_err(|err| err.at_param(index, &param.name))?;
                Ok(DecodedParam { name: param.name.clone(), ty: param.ty.clone(), value })
            })
            .collect()
    }

    /// [`Self::decode_params`] for anonymous parameters.
    pub fn decode_types(&self, types: &[ParamType], data: &[u8]) -> Result<Vec<DecodedParam>> {
        let params: Vec<Param> = types.iter().cloned().map(Param::from).collect();
        self.decode_params(&params, data)
    }

    fn decode_value(&self, ty: &ParamType, cursor: &mut Cursor<'_>) -> Result<Value> {
        match ty {
            ParamType::Uint(bits) => {
                let word = cursor.take_word()?;
                if self.validate {
                    check_left_padding(word, *bits, ty)?;
                }
                Ok(Value::Uint(word::as_u256(word), *bits))
            }
            ParamType::Int(bits) => {
                let word = cursor.take_word()?;
                if self.validate {
                    check_sign_extension(word, *bits, ty)?;
                }
                Ok(Value::Int(word::as_i256(word), *bits))
            }
            ParamType::Bool => {
                let word = cursor.take_word()?;
                if self.validate && (word[..WORD_BYTES - 1].iter().any(|b| *b != 0) || word[31] > 1)
                {
                    return Err(ErrorKind::encoding("boolean word is not 0 or 1").into());
                }
                Ok(Value::Bool(word::as_bool(word)))
            }
            ParamType::Address => {
                let word = cursor.take_word()?;
                if self.validate {
                    check_left_padding(word, 160, ty)?;
                }
                Ok(Value::Address(word::as_address(word)))
            }
            ParamType::FixedBytes(size) => {
                let word = cursor.take_word()?;
                if self.validate && word[*size..].iter().any(|b| *b != 0) {
                    return Err(ErrorKind::encoding(format!(
                        "bytes{size} word has nonzero bytes past its width"
                    ))
                    .into());
                }
                Ok(Value::FixedBytes(word, *size))
            }
            ParamType::Bytes | ParamType::String => {
                let mut tail = cursor.take_indirection()?;
                let len = tail.take_length()?;
                let padded = tail.take_padded_bytes(len)?;
                if self.validate && padded[len..].iter().any(|b| *b != 0) {
                    return Err(ErrorKind::encoding("nonzero bytes in tail padding").into());
                }
                Ok(Value::Bytes(Bytes::copy_from_slice(&padded[..len])))
            }
            ParamType::Tuple(components) => {
                if ty.is_dynamic() {
                    // the tail is a fresh block; component offsets count
                    // from its start
                    let mut tail = cursor.take_indirection()?;
                    self.decode_components(components, &mut tail)
                } else {
                    // static tuples lay their components inline
                    self.decode_components(components, cursor)
                }
            }
            ParamType::FixedArray(element, len) => {
                if ty.is_dynamic() {
                    // one head here; the tail holds `len` element heads whose
                    // offsets count from the tail start
                    let mut tail = cursor.take_indirection()?;
                    self.decode_elements(element, *len, &mut tail)
                } else {
                    self.decode_elements(element, *len, cursor)
                }
            }
            ParamType::Array(element) => {
                let mut tail = cursor.take_indirection()?;
                let count = tail.take_length()?;
                // element offsets are relative to the word after the count
                let mut block = tail.child();
                let needed = element.head_words().checked_mul(count).unwrap_or(usize::MAX);
                if block.remaining_words() < needed {
                    return Err(ErrorKind::OutOfBounds {
                        offset: block.position(),
                        needed: needed.saturating_mul(WORD_BYTES),
                        available: block.data_len(),
                    }
                    .into());
                }
                self.decode_elements(element, count, &mut block)
            }
        }
    }

    fn decode_components(&self, components: &[Param], cursor: &mut Cursor<'_>) -> Result<Value> {
        let mut decoded = Vec::with_capacity(components.len());
        for (index, component) in components.iter().enumerate() {
            let value = self
                .decode_value(&component.ty, cursor)
                .map_err(|err| err.at_component(index, &component.name))?;
            decoded.push(DecodedParam {
                name: component.name.clone(),
                ty: component.ty.clone(),
                value,
            });
        }
        Value::tuple(components, decoded).map_err(Error::from)
    }

    fn decode_elements(
        &self,
        element: &ParamType,
        count: usize,
        cursor: &mut Cursor<'_>,
    ) -> Result<Value> {
        let mut decoded = Vec::with_capacity(count);
        for index in 0..count {
            let value =
                self.decode_value(element, cursor).map_err(|err| err.at_element(index))?;
            decoded.push(DecodedParam { name: String::new(), ty: element.clone(), value });
        }
        Ok(Value::Array(decoded))
    }
}

/// Decodes `data` against `params` with a default [`Decoder`].
pub fn decode_params(params: &[Param], data: &[u8]) -> Result<Vec<DecodedParam>> {
    Decoder::new().decode_params(params, data)
}

/// Decodes `data` against anonymous `types` with a default [`Decoder`].
pub fn decode_types(types: &[ParamType], data: &[u8]) -> Result<Vec<DecodedParam>> {
    Decoder::new().decode_types(types, data)
}

fn check_left_padding(word: Word, bits: usize, ty: &ParamType) -> Result<(), Error> {
    let lead = WORD_BYTES - bits / 8;
    if word[..lead].iter().any(|b| *b != 0) {
        return Err(ErrorKind::encoding(format!("{ty} word has nonzero high bytes")).into());
    }
    Ok(())
}

fn check_sign_extension(word: Word, bits: usize, ty: &ParamType) -> Result<(), Error> {
    let lead = WORD_BYTES - bits / 8;
    if lead == 0 {
        return Ok(());
    }
    let fill = if word[lead] & 0x80 != 0 { 0xff } else { 0x00 };
    if word[..lead].iter().any(|b| *b != fill) {
        return Err(ErrorKind::encoding(format!("{ty} word is not sign-extended")).into());
    }
    Ok(())
}
