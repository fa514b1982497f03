//! Parameter type descriptors.
//!
//! A [`ParamType`] describes one declared parameter as a tree: primitives at
//! the leaves, tuples and arrays as interior nodes. Descriptors are produced
//! externally (by a signature parser) and consumed here; the decoder never
//! mutates them.

use crate::error::ErrorKind;
use std::fmt;

/// A declared parameter or tuple component: a type plus its declared name.
///
/// The name may be empty; anonymous parameters decode identically.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Param {
    /// Declared name, or empty.
    pub name: String,
    /// Declared type.
    pub ty: ParamType,
}

impl Param {
    /// A named parameter.
    pub fn new(name: impl Into<String>, ty: ParamType) -> Self {
        Self { name: name.into(), ty }
    }
}

impl From<ParamType> for Param {
    fn from(ty: ParamType) -> Self {
        Self { name: String::new(), ty }
    }
}

/// A Solidity ABI parameter type.
///
/// The static/dynamic split drives every layout decision: static types are
/// encoded inline, dynamic types as an offset word (the head) pointing at
/// out-of-line data (the tail).
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ParamType {
    /// `uint<bits>`; `bits` a multiple of 8 in `8..=256`.
    Uint(usize),
    /// `int<bits>`; `bits` a multiple of 8 in `8..=256`.
    Int(usize),
    /// `bool`.
    Bool,
    /// `address`.
    Address,
    /// `bytes<size>`; `size` in `1..=32`.
    FixedBytes(usize),
    /// `bytes`.
    Bytes,
    /// `string`. Decodes to raw bytes; UTF-8 interpretation is left to the
    /// caller.
    String,
    /// `T[size]`.
    FixedArray(Box<ParamType>, usize),
    /// `T[]`.
    Array(Box<ParamType>),
    /// `(T1,...,Tn)` with per-component names.
    Tuple(Vec<Param>),
}

impl ParamType {
    /// Whether values of this type have variable encoded width.
    ///
    /// `bytes`, `string` and `T[]` are always dynamic; tuples and fixed
    /// arrays are dynamic iff any component or the element type is.
    pub fn is_dynamic(&self) -> bool {
        match self {
            Self::Bytes | Self::String | Self::Array(_) => true,
            Self::FixedArray(element, _) => element.is_dynamic(),
            Self::Tuple(components) => components.iter().any(|c| c.ty.is_dynamic()),
            _ => false,
        }
    }

    /// True for tuples.
    pub fn is_tuple(&self) -> bool {
        matches!(self, Self::Tuple(_))
    }

    /// True for fixed and dynamic arrays.
    pub fn is_array(&self) -> bool {
        matches!(self, Self::FixedArray(..) | Self::Array(_))
    }

    /// Number of words a value of this type occupies in its enclosing block:
    /// one head word for any dynamic type, the full inline width otherwise.
    pub fn head_words(&self) -> usize {
        if self.is_dynamic() { 1 } else { self.static_words() }
    }

    fn static_words(&self) -> usize {
        match self {
            Self::Tuple(components) => components.iter().map(|c| c.ty.head_words()).sum(),
            Self::FixedArray(element, len) => element.head_words() * len,
            _ => 1,
        }
    }

    /// Rejects descriptors this decoder version does not recognize.
    pub(crate) fn ensure_supported(&self) -> Result<(), ErrorKind> {
        let ok = match self {
            Self::Uint(bits) | Self::Int(bits) => {
                *bits >= 8 && *bits <= 256 && bits.is_multiple_of(8)
            }
            Self::FixedBytes(size) => (1..=32).contains(size),
            Self::FixedArray(element, _) | Self::Array(element) => {
                return element.ensure_supported();
            }
            Self::Tuple(components) => {
                if components.is_empty() {
                    false
                } else {
                    return components.iter().try_for_each(|c| c.ty.ensure_supported());
                }
            }
            _ => true,
        };
        if ok { Ok(()) } else { Err(ErrorKind::UnsupportedType(self.to_string())) }
    }
}

/// Canonical signature rendering: `uint256`, `(address,uint256)[]`, ...
/// Component names are not part of the canonical form.
impl fmt::Display for ParamType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Uint(bits) => write!(f, "uint{bits}"),
            Self::Int(bits) => write!(f, "int{bits}"),
            Self::Bool => f.write_str("bool"),
            Self::Address => f.write_str("address"),
            Self::FixedBytes(size) => write!(f, "bytes{size}"),
            Self::Bytes => f.write_str("bytes"),
            Self::String => f.write_str("string"),
            Self::FixedArray(element, len) => write!(f, "{element}[{len}]"),
            Self::Array(element) => write!(f, "{element}[]"),
            Self::Tuple(components) => {
                f.write_str("(")?;
                for (i, component) in components.iter().enumerate() {
                    if i > 0 {
                        f.write_str(",")?;
                    }
                    component.ty.fmt(f)?;
                }
                f.write_str(")")
            }
        }
    }
}
