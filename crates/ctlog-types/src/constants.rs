//! Field widths and length limits of the RFC 6962 wire format

/// Length of a log key id (SHA-256 of the log's public key)
pub const KEY_ID_LENGTH: usize = 32;

/// Length of a precertificate issuer key hash
pub const ISSUER_KEY_HASH_LENGTH: usize = 32;

/// Width of a timestamp field (milliseconds since the epoch)
pub const TIMESTAMP_LENGTH: usize = 8;

/// Width of a version tag
pub const VERSION_LENGTH: usize = 1;

/// Width of a Merkle leaf type tag
pub const LEAF_TYPE_LENGTH: usize = 1;

/// Width of a log entry type tag
pub const LOG_ENTRY_TYPE_LENGTH: usize = 2;

/// Width of a hash or signature algorithm tag
pub const ALGORITHM_LENGTH: usize = 1;

pub const MAX_EXTENSIONS_LENGTH: u64 = (1 << 16) - 1;
pub const MAX_SIGNATURE_LENGTH: u64 = (1 << 16) - 1;
pub const MAX_CERTIFICATE_LENGTH: u64 = (1 << 24) - 1;
pub const MAX_TBS_CERTIFICATE_LENGTH: u64 = (1 << 16) - 1;
pub const MAX_CHAIN_LENGTH: u64 = (1 << 24) - 1;

/// The only Merkle leaf type defined by RFC 6962
pub const TIMESTAMPED_ENTRY_LEAF_TYPE: u8 = 0;
