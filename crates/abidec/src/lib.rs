//! # abidec
//!
//! Decoding of Ethereum contract ABI data: call arguments, event bodies and
//! return values. Given the declared parameter types (produced externally,
//! e.g. by parsing `transfer(address,uint256)`) and the raw byte buffer,
//! [`decode_params`] rebuilds the typed values, resolving the encoding's
//! head/tail offset indirection for arbitrarily nested tuples and arrays.
//!
//! Decoding is pure and synchronous; a [`Decoder`] holds no mutable state
//! and can be shared freely across threads.
//!
//! ```
//! use abidec::{ParamType, decode_types};
//! use alloy_primitives::hex;
//!
//! let data = hex!(
//!     "000000000000000000000000000000000000000000000000000000000000002a"
//! );
//! let decoded = decode_types(&[ParamType::Uint(256)], &data)?;
//! assert_eq!(decoded[0].to_string(), "42");
//! # Ok::<(), abidec::Error>(())
//! ```

#![cfg_attr(not(test), warn(unused_crate_dependencies))]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]

#[macro_use]
extern crate tracing;

mod cursor;
mod decoder;
mod error;
mod ty;
mod value;
mod word;

pub use decoder::{Decoder, decode_params, decode_types};
pub use error::{Error, ErrorKind, ParamPath, Result};
pub use ty::{Param, ParamType};
pub use value::{DecodedParam, Value};
pub use word::{WORD_BYTES, Word};
