//! Log entry types
//!
//! A log entry as returned by `get-entries` is split in two: the Merkle tree
//! leaf, which is what the log hashes, and the "extra data" holding the
//! certificate chain the submitter presented.

use crate::encoding::{base64_bytes, base64_bytes_vec, IssuerKeyHash};
use crate::error::{Error, Result};
use crate::proof::MerkleAuditProof;
use crate::sct::Version;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of certificate carried by a log entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u16)]
pub enum LogEntryType {
    X509Entry = 0,
    PrecertEntry = 1,
}

impl LogEntryType {
    pub fn from_u16(value: u16) -> Option<Self> {
        match value {
            0 => Some(LogEntryType::X509Entry),
            1 => Some(LogEntryType::PrecertEntry),
            _ => None,
        }
    }

    pub fn as_u16(self) -> u16 {
        self as u16
    }
}

impl fmt::Display for LogEntryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogEntryType::X509Entry => f.write_str("x509_entry"),
            LogEntryType::PrecertEntry => f.write_str("precert_entry"),
        }
    }
}

/// A precertificate as logged: the issuer key hash and the TBS certificate
/// with the poison extension removed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PreCert {
    pub issuer_key_hash: IssuerKeyHash,
    #[serde(with = "base64_bytes")]
    pub tbs_certificate: Vec<u8>,
}

/// The signed payload of a timestamped entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SignedEntry {
    /// DER-encoded leaf certificate
    X509(#[serde(with = "base64_bytes")] Vec<u8>),
    PreCert(PreCert),
}

impl SignedEntry {
    pub fn entry_type(&self) -> LogEntryType {
        match self {
            SignedEntry::X509(_) => LogEntryType::X509Entry,
            SignedEntry::PreCert(_) => LogEntryType::PrecertEntry,
        }
    }

    pub fn x509(&self) -> Option<&[u8]> {
        match self {
            SignedEntry::X509(cert) => Some(cert),
            SignedEntry::PreCert(_) => None,
        }
    }

    pub fn pre_cert(&self) -> Option<&PreCert> {
        match self {
            SignedEntry::X509(_) => None,
            SignedEntry::PreCert(pre_cert) => Some(pre_cert),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimestampedEntry {
    /// Milliseconds since the Unix epoch
    pub timestamp: u64,
    pub signed_entry: SignedEntry,
}

impl TimestampedEntry {
    /// The entry type tag, always consistent with the signed entry variant
    pub fn entry_type(&self) -> LogEntryType {
        self.signed_entry.entry_type()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MerkleTreeLeaf {
    pub version: Version,
    pub timestamped_entry: TimestampedEntry,
}

impl MerkleTreeLeaf {
    pub fn entry_type(&self) -> LogEntryType {
        self.timestamped_entry.entry_type()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct X509ChainEntry {
    #[serde(with = "base64_bytes")]
    pub leaf_certificate: Vec<u8>,
    /// Issuer chain, leaf-most first
    #[serde(with = "base64_bytes_vec")]
    pub certificate_chain: Vec<Vec<u8>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrecertChainEntry {
    pub pre_cert: PreCert,
    /// The submitted precertificate followed by its issuer chain
    #[serde(with = "base64_bytes_vec")]
    pub precertificate_chain: Vec<Vec<u8>>,
}

/// Chain data of a log entry, one variant per entry type
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogEntry {
    X509(X509ChainEntry),
    Precert(PrecertChainEntry),
}

impl LogEntry {
    pub fn entry_type(&self) -> LogEntryType {
        match self {
            LogEntry::X509(_) => LogEntryType::X509Entry,
            LogEntry::Precert(_) => LogEntryType::PrecertEntry,
        }
    }

    pub fn x509_entry(&self) -> Option<&X509ChainEntry> {
        match self {
            LogEntry::X509(entry) => Some(entry),
            LogEntry::Precert(_) => None,
        }
    }

    pub fn precert_entry(&self) -> Option<&PrecertChainEntry> {
        match self {
            LogEntry::X509(_) => None,
            LogEntry::Precert(entry) => Some(entry),
        }
    }
}

/// A Merkle tree leaf paired with the chain data of the same entry
///
/// Only serializable: construction goes through [`ParsedLogEntry::new`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedLogEntry {
    merkle_tree_leaf: MerkleTreeLeaf,
    log_entry: LogEntry,
}

impl ParsedLogEntry {
    /// Pair a leaf with its chain data
    ///
    /// Fails with [`Error::EntryTypeMismatch`] if the two describe different
    /// entry types.
    pub fn new(merkle_tree_leaf: MerkleTreeLeaf, log_entry: LogEntry) -> Result<Self> {
        let leaf = merkle_tree_leaf.entry_type();
        let chain = log_entry.entry_type();
        if leaf != chain {
            return Err(Error::EntryTypeMismatch { leaf, chain });
        }
        Ok(Self {
            merkle_tree_leaf,
            log_entry,
        })
    }

    pub fn merkle_tree_leaf(&self) -> &MerkleTreeLeaf {
        &self.merkle_tree_leaf
    }

    pub fn log_entry(&self) -> &LogEntry {
        &self.log_entry
    }

    pub fn entry_type(&self) -> LogEntryType {
        self.log_entry.entry_type()
    }

    pub fn into_parts(self) -> (MerkleTreeLeaf, LogEntry) {
        (self.merkle_tree_leaf, self.log_entry)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedLogEntryWithProof {
    pub parsed_log_entry: ParsedLogEntry,
    pub audit_proof: MerkleAuditProof,
}

impl ParsedLogEntryWithProof {
    pub fn new(parsed_log_entry: ParsedLogEntry, audit_proof: MerkleAuditProof) -> Self {
        Self {
            parsed_log_entry,
            audit_proof,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn x509_leaf() -> MerkleTreeLeaf {
        MerkleTreeLeaf {
            version: Version::V1,
            timestamped_entry: TimestampedEntry {
                timestamp: 1,
                signed_entry: SignedEntry::X509(vec![0x30, 0x00]),
            },
        }
    }

    fn pre_cert() -> PreCert {
        PreCert {
            issuer_key_hash: IssuerKeyHash::from_bytes([9u8; 32]),
            tbs_certificate: vec![0x30, 0x01, 0x00],
        }
    }

    #[test]
    fn test_entry_type_follows_variant() {
        assert_eq!(x509_leaf().entry_type(), LogEntryType::X509Entry);
        let entry = TimestampedEntry {
            timestamp: 1,
            signed_entry: SignedEntry::PreCert(pre_cert()),
        };
        assert_eq!(entry.entry_type(), LogEntryType::PrecertEntry);
        assert!(entry.signed_entry.x509().is_none());
        assert_eq!(entry.signed_entry.pre_cert(), Some(&pre_cert()));
    }

    #[test]
    fn test_entry_type_tags() {
        assert_eq!(LogEntryType::from_u16(0), Some(LogEntryType::X509Entry));
        assert_eq!(LogEntryType::from_u16(1), Some(LogEntryType::PrecertEntry));
        assert_eq!(LogEntryType::from_u16(2), None);
        assert_eq!(LogEntryType::PrecertEntry.as_u16(), 1);
    }

    #[test]
    fn test_parsed_log_entry_accepts_matching_types() {
        let chain = LogEntry::X509(X509ChainEntry {
            leaf_certificate: vec![0x30, 0x00],
            certificate_chain: vec![],
        });
        let parsed = ParsedLogEntry::new(x509_leaf(), chain).unwrap();
        assert_eq!(parsed.entry_type(), LogEntryType::X509Entry);
        assert!(parsed.log_entry().x509_entry().is_some());
    }

    #[test]
    fn test_parsed_log_entry_rejects_mismatched_types() {
        let chain = LogEntry::Precert(PrecertChainEntry {
            pre_cert: pre_cert(),
            precertificate_chain: vec![],
        });
        let err = ParsedLogEntry::new(x509_leaf(), chain).unwrap_err();
        assert!(matches!(
            err,
            Error::EntryTypeMismatch {
                leaf: LogEntryType::X509Entry,
                chain: LogEntryType::PrecertEntry
            }
        ));
        assert_eq!(
            err.to_string(),
            "entry type mismatch: leaf is x509_entry, chain entry is precert_entry"
        );
    }

    #[test]
    fn test_parsed_log_entry_into_parts() {
        let chain = LogEntry::X509(X509ChainEntry {
            leaf_certificate: vec![0x30, 0x00],
            certificate_chain: vec![vec![0x30, 0x01]],
        });
        let parsed = ParsedLogEntry::new(x509_leaf(), chain.clone()).unwrap();
        let (leaf, log_entry) = parsed.into_parts();
        assert_eq!(leaf, x509_leaf());
        assert_eq!(log_entry, chain);
    }
}
