//! Decode failure taxonomy and parameter paths.

use alloy_primitives::U256;
use std::{borrow::Cow, fmt};

/// Decode result type.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// The ways a single decode call can fail.
///
/// Every kind is terminal for the call that raised it: a parameter list
/// either decodes completely or not at all, since one misread offset
/// invalidates the position of everything decoded after it.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ErrorKind {
    /// A read would extend past the end of the buffer.
    #[error("out of bounds: need {needed} bytes at offset {offset}, buffer holds {available}")]
    OutOfBounds {
        /// Absolute offset of the attempted read.
        offset: usize,
        /// Bytes the read required.
        needed: usize,
        /// Total buffer length.
        available: usize,
    },

    /// A head word holds an offset that cannot index any buffer on this
    /// platform.
    #[error("offset {0} does not fit the addressable range")]
    InvalidOffset(U256),

    /// A tuple descriptor and its decoded component list disagree in arity.
    /// Indicates a descriptor bug on the caller's side.
    #[error("tuple arity mismatch: {declared} declared components, {decoded} decoded")]
    ComponentCountMismatch {
        /// Components the descriptor declares.
        declared: usize,
        /// Components actually decoded.
        decoded: usize,
    },

    /// The descriptor names a type this decoder does not recognize, e.g.
    /// `uint7` or `bytes33`.
    #[error("unsupported parameter type `{0}`")]
    UnsupportedType(String),

    /// The buffer is internally inconsistent with the declared types.
    #[error("invalid encoding: {0}")]
    InvalidEncoding(Cow<'static, str>),
}

impl ErrorKind {
    /// Shorthand for an [`ErrorKind::InvalidEncoding`].
    pub(crate) fn encoding(msg: impl Into<Cow<'static, str>>) -> Self {
        Self::InvalidEncoding(msg.into())
    }
}

/// A decode failure, locating the declared parameter that failed.
///
/// Carries the [`ErrorKind`] plus the path from the top-level parameter down
/// through tuple components and array elements to the value that could not
/// be decoded, e.g. `recipients[2].amount`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Error {
    kind: ErrorKind,
    path: ParamPath,
}

impl Error {
    /// The failure kind.
    pub fn kind(&self) -> &ErrorKind {
        &self.kind
    }

    /// Path from the top-level parameter to the failing value. Empty when
    /// the failure precedes parameter dispatch (e.g. a truncated buffer).
    pub fn path(&self) -> &ParamPath {
        &self.path
    }

    pub(crate) fn at_param(mut self, index: usize, name: &str) -> Self {
        self.path.push_front(PathSegment::Param(index, name.into()));
        self
    }

    pub(crate) fn at_component(mut self, index: usize, name: &str) -> Self {
        self.path.push_front(PathSegment::Component(index, name.into()));
        self
    }

    pub(crate) fn at_element(mut self, index: usize) -> Self {
        self.path.push_front(PathSegment::Element(index));
        self
    }
}

impl From<ErrorKind> for Error {
    fn from(kind: ErrorKind) -> Self {
        Self { kind, path: ParamPath::default() }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.path.is_empty() {
            self.kind.fmt(f)
        } else {
            write!(f, "{} (at `{}`)", self.kind, self.path)
        }
    }
}

impl std::error::Error for Error {}

/// Dotted path through tuple/array ancestry, root first.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ParamPath(Vec<PathSegment>);

#[derive(Clone, Debug, PartialEq, Eq)]
enum PathSegment {
    /// Top-level parameter: index and declared name (possibly empty).
    Param(usize, String),
    /// Tuple component: index within the tuple and declared name.
    Component(usize, String),
    /// Array element index.
    Element(usize),
}

impl ParamPath {
    /// True when no segments have been recorded.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    fn push_front(&mut self, segment: PathSegment) {
        self.0.insert(0, segment);
    }
}

impl fmt::Display for ParamPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.0.iter().enumerate() {
            match segment {
                PathSegment::Param(index, name) => {
                    if name.is_empty() {
                        write!(f, "{index}")?;
                    } else {
                        f.write_str(name)?;
                    }
                }
                PathSegment::Component(index, name) => {
                    if i > 0 {
                        f.write_str(".")?;
                    }
                    if name.is_empty() {
                        write!(f, "{index}")?;
                    } else {
                        f.write_str(name)?;
                    }
                }
                PathSegment::Element(index) => write!(f, "[{index}]")?,
            }
        }
        Ok(())
    }
}
