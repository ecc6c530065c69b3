//! Error types for CT serialization

use std::fmt;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Which algorithm tag of a `DigitallySigned` struct failed to map
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlgorithmKind {
    Hash,
    Signature,
}

impl fmt::Display for AlgorithmKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AlgorithmKind::Hash => f.write_str("hash"),
            AlgorithmKind::Signature => f.write_str("signature"),
        }
    }
}

#[derive(Error, Debug)]
pub enum Error {
    #[error("unsupported version: {version}")]
    UnsupportedVersion { version: u64 },

    #[error("unsupported leaf type: {leaf_type}")]
    UnsupportedLeafType { leaf_type: u64 },

    #[error("unknown entry type: {entry_type}")]
    UnknownEntryType { entry_type: u64 },

    #[error("unknown {kind} algorithm: {value:#04x}")]
    UnknownAlgorithm { kind: AlgorithmKind, value: u8 },

    #[error("truncated input: expected {expected} bytes, got {actual}")]
    TruncatedInput { expected: u64, actual: u64 },

    #[error("corrupt data: {0}")]
    CorruptData(String),

    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("{remaining} trailing bytes after structure")]
    TrailingData { remaining: usize },

    #[error("audit path node {index} is not valid base64: {source}")]
    Base64 {
        index: usize,
        #[source]
        source: base64::DecodeError,
    },

    #[error(transparent)]
    Types(#[from] ctlog_types::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Number of bytes missing for a truncated read
    pub fn shortfall(&self) -> Option<u64> {
        match self {
            Error::TruncatedInput { expected, actual } => Some(expected - actual),
            _ => None,
        }
    }
}
