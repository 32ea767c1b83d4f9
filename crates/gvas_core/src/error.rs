use std::fmt;
use std::io;

use thiserror::Error;

pub type Result<T, E = DecodeError> = std::result::Result<T, E>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodeErrorCode {
    InvalidHeader,
    UnexpectedEof,
    InvalidLength,
    UnsupportedType,
    NestingTooDeep,
    SeekFailure,
}

/// Where in the stream an unrecognized type name was read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypePosition {
    Field,
    ArrayElement,
    ArrayStructInner,
    SetElement,
    MapKey,
    MapValue,
}

impl TypePosition {
    pub fn as_str(&self) -> &'static str {
        match *self {
            Self::Field => "field",
            Self::ArrayElement => "array element",
            Self::ArrayStructInner => "array struct inner",
            Self::SetElement => "set element",
            Self::MapKey => "map key",
            Self::MapValue => "map value",
        }
    }
}

impl fmt::Display for TypePosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A terminal failure while decoding a save. No partial document survives one.
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("invalid header: expected magic \"GVAS\", found {found:02x?}")]
    InvalidHeader { found: [u8; 4] },

    #[error("unexpected end of stream at offset {offset}")]
    UnexpectedEof {
        offset: u64,
        #[source]
        source: io::Error,
    },

    #[error("invalid {what} length {length} at offset {offset}")]
    InvalidLength {
        what: &'static str,
        length: i64,
        offset: u64,
    },

    #[error("unsupported {position} type {type_name:?} at offset {offset} (path: {path})")]
    UnsupportedType {
        position: TypePosition,
        type_name: String,
        path: String,
        offset: u64,
    },

    #[error("nesting exceeds {limit} levels at offset {offset}")]
    NestingTooDeep { limit: usize, offset: u64 },

    #[error("failed to reposition stream at offset {offset}")]
    SeekFailure {
        offset: u64,
        #[source]
        source: io::Error,
    },
}

impl DecodeError {
    pub fn code(&self) -> DecodeErrorCode {
        match self {
            Self::InvalidHeader { .. } => DecodeErrorCode::InvalidHeader,
            Self::UnexpectedEof { .. } => DecodeErrorCode::UnexpectedEof,
            Self::InvalidLength { .. } => DecodeErrorCode::InvalidLength,
            Self::UnsupportedType { .. } => DecodeErrorCode::UnsupportedType,
            Self::NestingTooDeep { .. } => DecodeErrorCode::NestingTooDeep,
            Self::SeekFailure { .. } => DecodeErrorCode::SeekFailure,
        }
    }

    /// Byte offset the failure was detected at, when one is known.
    pub fn offset(&self) -> Option<u64> {
        match *self {
            Self::InvalidHeader { .. } => None,
            Self::UnexpectedEof { offset, .. }
            | Self::InvalidLength { offset, .. }
            | Self::UnsupportedType { offset, .. }
            | Self::NestingTooDeep { offset, .. }
            | Self::SeekFailure { offset, .. } => Some(offset),
        }
    }
}
