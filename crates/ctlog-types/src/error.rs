//! Error types for CT log records

use crate::entry::LogEntryType;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("invalid length: expected {expected}, got {actual}")]
    InvalidLength { expected: usize, actual: usize },

    #[error("hex decoding error: {0}")]
    Hex(#[from] hex::FromHexError),

    #[error("base64 decoding error: {0}")]
    Base64(#[from] base64::DecodeError),

    #[error("entry type mismatch: leaf is {leaf}, chain entry is {chain}")]
    EntryTypeMismatch {
        leaf: LogEntryType,
        chain: LogEntryType,
    },
}
