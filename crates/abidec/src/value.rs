//! Decoded result trees.
//!
//! Decoding produces one [`DecodedParam`] per declared parameter. Each node
//! carries the [`ParamType`] it was decoded from, so callers can inspect
//! structure and metadata (tuple-ness, array-ness, canonical type name)
//! alongside the value. Trees are built bottom-up during decode and never
//! mutated afterwards; components are exclusively owned by their parent.

use crate::{
    error::ErrorKind,
    ty::{Param, ParamType},
    word::Word,
};
use alloy_primitives::{Address, Bytes, I256, U256, hex};
use std::{fmt, str};

/// One decoded parameter: declared name, declared type, decoded value.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DecodedParam {
    /// Declared name; empty for anonymous parameters and array elements.
    pub name: String,
    /// The type this value was decoded from.
    pub ty: ParamType,
    /// The decoded value.
    pub value: Value,
}

impl DecodedParam {
    /// Canonical name of the declared type, e.g. `(address,uint256)[]`.
    pub fn type_name(&self) -> String {
        self.ty.to_string()
    }

    /// True when the declared type is a tuple.
    pub fn is_tuple(&self) -> bool {
        self.ty.is_tuple()
    }

    /// True when the declared type is an array.
    pub fn is_array(&self) -> bool {
        self.ty.is_array()
    }

    /// Ordered children of a tuple or array node; empty for scalars.
    pub fn components(&self) -> &[Self] {
        match &self.value {
            Value::Tuple(children) | Value::Array(children) => children,
            _ => &[],
        }
    }

    /// UTF-8 view of a `string` parameter.
    ///
    /// `string` values decode to raw bytes; this is the only place text
    /// interpretation happens, and it fails soft: `None` for non-`string`
    /// parameters and for byte sequences that are not valid UTF-8.
    pub fn as_text(&self) -> Option<&str> {
        match (&self.ty, &self.value) {
            (ParamType::String, Value::Bytes(bytes)) => str::from_utf8(bytes).ok(),
            _ => None,
        }
    }
}

impl fmt::Display for DecodedParam {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.as_text() {
            Some(text) => write!(f, "{text:?}"),
            None => self.value.fmt(f),
        }
    }
}

/// A decoded value.
///
/// Exactly one variant applies per node: scalars hold their interpreted
/// word, `bytes`/`string` hold their raw payload, tuples and arrays hold
/// their children in declaration order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Value {
    /// Unsigned integer and its declared bit width.
    Uint(U256, usize),
    /// Signed integer and its declared bit width.
    Int(I256, usize),
    /// Boolean.
    Bool(bool),
    /// Address.
    Address(Address),
    /// `bytes<N>` payload: the full word plus the declared width `N`.
    FixedBytes(Word, usize),
    /// Raw payload of a `bytes` or `string` parameter. The carried
    /// [`ParamType`] on the enclosing node distinguishes the two.
    Bytes(Bytes),
    /// Tuple components in declaration order.
    Tuple(Vec<DecodedParam>),
    /// Array elements in encoded order.
    Array(Vec<DecodedParam>),
}

impl Value {
    /// The unsigned integer, if this is a `uint` value.
    pub fn as_uint(&self) -> Option<U256> {
        match self {
            Self::Uint(value, _) => Some(*value),
            _ => None,
        }
    }

    /// The signed integer, if this is an `int` value.
    pub fn as_int(&self) -> Option<I256> {
        match self {
            Self::Int(value, _) => Some(*value),
            _ => None,
        }
    }

    /// The boolean, if this is a `bool` value.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(value) => Some(*value),
            _ => None,
        }
    }

    /// The address, if this is an `address` value.
    pub fn as_address(&self) -> Option<Address> {
        match self {
            Self::Address(value) => Some(*value),
            _ => None,
        }
    }

    /// The declared-width prefix of a `bytes<N>` value.
    pub fn as_fixed_bytes(&self) -> Option<&[u8]> {
        match self {
            Self::FixedBytes(word, size) => Some(&word[..*size]),
            _ => None,
        }
    }

    /// The raw payload of a `bytes` or `string` value.
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Self::Bytes(bytes) => Some(bytes),
            _ => None,
        }
    }

    /// Tuple components, if this is a tuple value.
    pub fn as_tuple(&self) -> Option<&[DecodedParam]> {
        match self {
            Self::Tuple(children) => Some(children),
            _ => None,
        }
    }

    /// Array elements, if this is an array value.
    pub fn as_array(&self) -> Option<&[DecodedParam]> {
        match self {
            Self::Array(children) => Some(children),
            _ => None,
        }
    }

    /// Assembles a tuple node, cross-checking the decoded component list
    /// against the declared arity. A mismatch means the descriptor and the
    /// decode walk disagree, which is fatal for the call.
    pub(crate) fn tuple(declared: &[Param], decoded: Vec<DecodedParam>) -> Result<Self, ErrorKind> {
        if decoded.len() != declared.len() {
            return Err(ErrorKind::ComponentCountMismatch {
                declared: declared.len(),
                decoded: decoded.len(),
            });
        }
        Ok(Self::Tuple(decoded))
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Uint(value, _) => value.fmt(f),
            Self::Int(value, _) => value.fmt(f),
            Self::Bool(value) => value.fmt(f),
            Self::Address(value) => value.fmt(f),
            Self::FixedBytes(word, size) => write!(f, "0x{}", hex::encode(&word[..*size])),
            Self::Bytes(bytes) => write!(f, "0x{}", hex::encode(bytes)),
            Self::Tuple(children) => {
                f.write_str("(")?;
                for (i, child) in children.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    child.fmt(f)?;
                }
                f.write_str(")")
            }
            Self::Array(children) => {
                f.write_str("[")?;
                for (i, child) in children.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    child.fmt(f)?;
                }
                f.write_str("]")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::address;

    fn param(ty: ParamType, value: Value) -> DecodedParam {
        DecodedParam { name: String::new(), ty, value }
    }

    #[test]
    fn accessors_are_variant_exact() {
        let uint = Value::Uint(U256::from(7), 256);
        assert_eq!(uint.as_uint(), Some(U256::from(7)));
        assert_eq!(uint.as_int(), None);
        assert_eq!(uint.as_bool(), None);

        let fixed = Value::FixedBytes(Word::repeat_byte(0xab), 4);
        assert_eq!(fixed.as_fixed_bytes(), Some(&[0xab; 4][..]));
    }

    #[test]
    fn text_is_a_string_only_view() {
        let text = param(ParamType::String, Value::Bytes(Bytes::from_static(b"hello")));
        assert_eq!(text.as_text(), Some("hello"));

        // same payload under `bytes` stays opaque
        let raw = param(ParamType::Bytes, Value::Bytes(Bytes::from_static(b"hello")));
        assert_eq!(raw.as_text(), None);

        // invalid utf-8 fails soft
        let bad = param(ParamType::String, Value::Bytes(Bytes::from_static(&[0xff, 0xfe])));
        assert_eq!(bad.as_text(), None);
    }

    #[test]
    fn tuple_assembly_checks_arity() {
        let declared = [Param::from(ParamType::Bool)];
        assert_eq!(
            Value::tuple(&declared, Vec::new()),
            Err(ErrorKind::ComponentCountMismatch { declared: 1, decoded: 0 })
        );
    }

    #[test]
    fn display_forms() {
        let addr = address!("d8da6bf26964af9d7eed9e03e53415d37aa96045");
        let value = Value::Tuple(vec![
            param(ParamType::Address, Value::Address(addr)),
            param(
                ParamType::Array(Box::new(ParamType::Uint(256))),
                Value::Array(vec![
                    param(ParamType::Uint(256), Value::Uint(U256::from(1), 256)),
                    param(ParamType::Uint(256), Value::Uint(U256::from(2), 256)),
                ]),
            ),
        ]);
        assert_eq!(value.to_string(), format!("({addr}, [1, 2])"));
    }
}
