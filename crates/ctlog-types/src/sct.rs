//! Signed Certificate Timestamp types
//!
//! An SCT is a log's promise to incorporate a certificate into its Merkle
//! tree within the maximum merge delay (RFC 6962 §3.2).

use crate::encoding::{base64_bytes, KeyId};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Protocol version
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[repr(u8)]
pub enum Version {
    V1 = 0,
}

impl Version {
    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(Version::V1),
            _ => None,
        }
    }

    pub fn as_u8(self) -> u8 {
        self as u8
    }
}

/// Hash algorithm of a `DigitallySigned` struct (RFC 5246 §7.4.1.4.1)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[repr(u8)]
pub enum HashAlgorithm {
    None = 0,
    Md5 = 1,
    Sha1 = 2,
    Sha224 = 3,
    Sha256 = 4,
    Sha384 = 5,
    Sha512 = 6,
}

impl HashAlgorithm {
    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(HashAlgorithm::None),
            1 => Some(HashAlgorithm::Md5),
            2 => Some(HashAlgorithm::Sha1),
            3 => Some(HashAlgorithm::Sha224),
            4 => Some(HashAlgorithm::Sha256),
            5 => Some(HashAlgorithm::Sha384),
            6 => Some(HashAlgorithm::Sha512),
            _ => None,
        }
    }

    pub fn as_u8(self) -> u8 {
        self as u8
    }
}

/// Signature algorithm of a `DigitallySigned` struct (RFC 5246 §7.4.1.4.1)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[repr(u8)]
pub enum SignatureAlgorithm {
    Anonymous = 0,
    Rsa = 1,
    Dsa = 2,
    Ecdsa = 3,
}

impl SignatureAlgorithm {
    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(SignatureAlgorithm::Anonymous),
            1 => Some(SignatureAlgorithm::Rsa),
            2 => Some(SignatureAlgorithm::Dsa),
            3 => Some(SignatureAlgorithm::Ecdsa),
            _ => None,
        }
    }

    pub fn as_u8(self) -> u8 {
        self as u8
    }
}

impl fmt::Display for HashAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            HashAlgorithm::None => "none",
            HashAlgorithm::Md5 => "md5",
            HashAlgorithm::Sha1 => "sha1",
            HashAlgorithm::Sha224 => "sha224",
            HashAlgorithm::Sha256 => "sha256",
            HashAlgorithm::Sha384 => "sha384",
            HashAlgorithm::Sha512 => "sha512",
        };
        f.write_str(name)
    }
}

impl fmt::Display for SignatureAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SignatureAlgorithm::Anonymous => "anonymous",
            SignatureAlgorithm::Rsa => "rsa",
            SignatureAlgorithm::Dsa => "dsa",
            SignatureAlgorithm::Ecdsa => "ecdsa",
        };
        f.write_str(name)
    }
}

/// A signature together with the algorithms that produced it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DigitallySigned {
    pub hash_algorithm: HashAlgorithm,
    pub signature_algorithm: SignatureAlgorithm,
    #[serde(with = "base64_bytes")]
    pub signature: Vec<u8>,
}

/// Identifies a log by the hash of its public key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogId {
    pub key_id: KeyId,
}

impl From<KeyId> for LogId {
    fn from(key_id: KeyId) -> Self {
        Self { key_id }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignedCertificateTimestamp {
    pub version: Version,
    pub id: LogId,
    /// Milliseconds since the Unix epoch
    pub timestamp: u64,
    #[serde(with = "base64_bytes")]
    pub extensions: Vec<u8>,
    pub signature: DigitallySigned,
}
