//! Core types for Certificate Transparency logs
//!
//! This crate provides the value records defined by RFC 6962: signed
//! certificate timestamps, Merkle tree leaves, log entries with their
//! certificate chains, and Merkle audit proofs.
//!
//! The records carry no behavior beyond construction and accessors. Binary
//! decoding and encoding live in `ctlog-serialization`.

pub mod constants;
pub mod encoding;
pub mod entry;
pub mod error;
pub mod proof;
pub mod sct;

pub use encoding::{base64_bytes, base64_bytes_vec, IssuerKeyHash, KeyId};
pub use entry::{
    LogEntry, LogEntryType, MerkleTreeLeaf, ParsedLogEntry, ParsedLogEntryWithProof, PreCert,
    PrecertChainEntry, SignedEntry, TimestampedEntry, X509ChainEntry,
};
pub use error::{Error, Result};
pub use proof::MerkleAuditProof;
pub use sct::{
    DigitallySigned, HashAlgorithm, LogId, SignatureAlgorithm, SignedCertificateTimestamp,
    Version,
};
