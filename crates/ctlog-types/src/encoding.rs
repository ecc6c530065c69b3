//! Encoding helpers for fixed-size hashes and raw byte fields
//!
//! Byte blobs in the records are serialized as standard base64, matching the
//! representation CT logs use in their JSON API.

use crate::error::{Error, Result};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

macro_rules! hash32_type {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq, Hash)]
        pub struct $name([u8; 32]);

        impl $name {
            pub const LEN: usize = 32;

            pub fn from_bytes(bytes: [u8; 32]) -> Self {
                Self(bytes)
            }

            /// Build from a slice, which must be exactly 32 bytes long
            pub fn from_slice(slice: &[u8]) -> Result<Self> {
                let bytes: [u8; 32] = slice.try_into().map_err(|_| Error::InvalidLength {
                    expected: Self::LEN,
                    actual: slice.len(),
                })?;
                Ok(Self(bytes))
            }

            pub fn from_hex(s: &str) -> Result<Self> {
                let bytes = hex::decode(s)?;
                Self::from_slice(&bytes)
            }

            pub fn from_base64(s: &str) -> Result<Self> {
                let bytes = STANDARD.decode(s)?;
                Self::from_slice(&bytes)
            }

            pub fn as_bytes(&self) -> &[u8; 32] {
                &self.0
            }

            pub fn to_hex(&self) -> String {
                hex::encode(self.0)
            }

            pub fn to_base64(&self) -> String {
                STANDARD.encode(self.0)
            }
        }

        impl From<[u8; 32]> for $name {
            fn from(bytes: [u8; 32]) -> Self {
                Self(bytes)
            }
        }

        impl AsRef<[u8]> for $name {
            fn as_ref(&self) -> &[u8] {
                &self.0
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), hex::encode(&self.0[..8]))
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.to_hex())
            }
        }

        impl Serialize for $name {
            fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
            where
                S: Serializer,
            {
                serializer.serialize_str(&self.to_base64())
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
            where
                D: Deserializer<'de>,
            {
                let encoded = String::deserialize(deserializer)?;
                Self::from_base64(&encoded).map_err(serde::de::Error::custom)
            }
        }
    };
}

hash32_type!(
    /// Log key id: SHA-256 hash of the log's DER-encoded public key
    KeyId
);

hash32_type!(
    /// SHA-256 hash of a precertificate issuer's SubjectPublicKeyInfo
    IssuerKeyHash
);

/// Serde adapter for `Vec<u8>` fields carried as base64 text
pub mod base64_bytes {
    use super::STANDARD;
    use base64::Engine;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&STANDARD.encode(bytes))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Vec<u8>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let encoded = String::deserialize(deserializer)?;
        STANDARD.decode(encoded).map_err(serde::de::Error::custom)
    }
}

/// Serde adapter for ordered lists of byte blobs (certificate chains, proof paths)
pub mod base64_bytes_vec {
    use super::STANDARD;
    use base64::Engine;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(items: &[Vec<u8>], serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_seq(items.iter().map(|item| STANDARD.encode(item)))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Vec<Vec<u8>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Vec::<String>::deserialize(deserializer)?
            .iter()
            .map(|encoded| STANDARD.decode(encoded).map_err(serde::de::Error::custom))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_id_hex_roundtrip() {
        let hex_str = "a4b90990b418581487bb13a2cc67700a3c359804f91bdfb8e377cd0ec80ddc10";
        let key_id = KeyId::from_hex(hex_str).unwrap();
        assert_eq!(key_id.to_hex(), hex_str);
        assert_eq!(key_id.to_string(), hex_str);
    }

    #[test]
    fn test_key_id_wrong_length() {
        let err = KeyId::from_slice(&[0u8; 31]).unwrap_err();
        assert!(matches!(
            err,
            Error::InvalidLength {
                expected: 32,
                actual: 31
            }
        ));
    }

    #[test]
    fn test_issuer_key_hash_base64() {
        let hash = IssuerKeyHash::from_bytes([7u8; 32]);
        let decoded = IssuerKeyHash::from_base64(&hash.to_base64()).unwrap();
        assert_eq!(decoded, hash);
    }

    #[test]
    fn test_key_id_serializes_as_base64() {
        let key_id = KeyId::from_bytes([0u8; 32]);
        let json = serde_json::to_string(&key_id).unwrap();
        assert_eq!(json, "\"AAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAA=\"");
        let back: KeyId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, key_id);
    }

    #[test]
    fn test_debug_is_truncated() {
        let key_id = KeyId::from_bytes([0xab; 32]);
        assert_eq!(format!("{:?}", key_id), "KeyId(abababababababab)");
    }
}
