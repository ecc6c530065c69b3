//! Binary serialization of Certificate Transparency structures
//!
//! This crate decodes the TLS-style wire encoding of RFC 6962: signed
//! certificate timestamps, Merkle tree leaves and the chain data ("extra
//! data") of log entries. Decoding is strict: short reads, unknown tags and
//! chain framing mismatches are errors, never silently tolerated.
//!
//! # Example
//!
//! ```
//! use ctlog_serialization::{deserializer, DecodeOptions};
//! use ctlog_types::LogEntryType;
//!
//! // version 1, timestamped entry, timestamp 1, x509 entry with a 2 byte certificate
//! let leaf = [0, 0, 0, 0, 0, 0, 0, 0, 0, 1, 0, 0, 0, 0, 2, 0x30, 0x00];
//! // no issuer chain
//! let extra_data = [0, 0, 0];
//!
//! let entry =
//!     deserializer::log_entry_from_slices(&leaf, &extra_data, &DecodeOptions::default())
//!         .unwrap();
//! assert_eq!(entry.entry_type(), LogEntryType::X509Entry);
//! ```

pub mod deserializer;
pub mod error;
pub mod options;
pub mod proof;
pub mod reader;
pub mod serializer;

pub use deserializer::{
    log_entry_from_slices, merkle_tree_leaf_from_slice, parse_digitally_signed, parse_log_entry,
    parse_merkle_tree_leaf, parse_precert_chain_entry, parse_sct, parse_timestamped_entry,
    parse_x509_chain_entry, sct_from_slice,
};
pub use error::{AlgorithmKind, Error, Result};
pub use options::DecodeOptions;
pub use proof::{parse_audit_proof, parse_log_entry_with_proof};
pub use reader::{bytes_needed, Reader};
pub use serializer::Writer;
