//! Decoding CT structures from their binary encoding
//!
//! Every `parse_*` function consumes exactly one structure from a shared
//! [`Reader`], so nested structures are decoded by passing the same cursor
//! down. Decoding is single-pass and fails on the first violation; no partial
//! structure is ever returned.
//!
//! The `*_from_slice` functions wrap the readers for in-memory input and
//! reject bytes left over after the structure unless
//! [`DecodeOptions::allow_trailing_data`] is set.

use crate::error::{AlgorithmKind, Error, Result};
use crate::options::DecodeOptions;
use crate::reader::{bytes_needed, Reader};
use ctlog_types::constants::{
    ALGORITHM_LENGTH, ISSUER_KEY_HASH_LENGTH, KEY_ID_LENGTH, LEAF_TYPE_LENGTH,
    LOG_ENTRY_TYPE_LENGTH, MAX_CERTIFICATE_LENGTH, MAX_CHAIN_LENGTH, MAX_EXTENSIONS_LENGTH,
    MAX_SIGNATURE_LENGTH, MAX_TBS_CERTIFICATE_LENGTH, TIMESTAMPED_ENTRY_LEAF_TYPE,
    TIMESTAMP_LENGTH, VERSION_LENGTH,
};
use ctlog_types::{
    DigitallySigned, HashAlgorithm, IssuerKeyHash, KeyId, LogEntry, LogEntryType, LogId,
    MerkleTreeLeaf, ParsedLogEntry, PreCert, PrecertChainEntry, SignatureAlgorithm,
    SignedCertificateTimestamp, SignedEntry, TimestampedEntry, Version, X509ChainEntry,
};
use std::io::Read;

/// Parse a `SignedCertificateTimestamp`
pub fn parse_sct<R: Read>(reader: &mut Reader<R>) -> Result<SignedCertificateTimestamp> {
    let version = parse_version(reader)?;
    let key_id = KeyId::from_bytes(reader.read_array::<KEY_ID_LENGTH>()?);
    let timestamp = reader.read_number(TIMESTAMP_LENGTH)?;
    let extensions = reader.read_variable_length(MAX_EXTENSIONS_LENGTH)?;
    let signature = parse_digitally_signed(reader)?;

    tracing::debug!(
        "parsed SCT from log {} at timestamp {}",
        key_id,
        timestamp
    );

    Ok(SignedCertificateTimestamp {
        version,
        id: LogId::from(key_id),
        timestamp,
        extensions,
        signature,
    })
}

/// Parse a `DigitallySigned` struct
pub fn parse_digitally_signed<R: Read>(reader: &mut Reader<R>) -> Result<DigitallySigned> {
    let hash_value = reader.read_number(ALGORITHM_LENGTH)? as u8;
    let hash_algorithm = HashAlgorithm::from_u8(hash_value).ok_or(Error::UnknownAlgorithm {
        kind: AlgorithmKind::Hash,
        value: hash_value,
    })?;

    let signature_value = reader.read_number(ALGORITHM_LENGTH)? as u8;
    let signature_algorithm =
        SignatureAlgorithm::from_u8(signature_value).ok_or(Error::UnknownAlgorithm {
            kind: AlgorithmKind::Signature,
            value: signature_value,
        })?;

    let signature = reader.read_variable_length(MAX_SIGNATURE_LENGTH)?;

    Ok(DigitallySigned {
        hash_algorithm,
        signature_algorithm,
        signature,
    })
}

/// Parse a `MerkleTreeLeaf`
pub fn parse_merkle_tree_leaf<R: Read>(reader: &mut Reader<R>) -> Result<MerkleTreeLeaf> {
    let version = parse_version(reader)?;

    let leaf_type = reader.read_number(LEAF_TYPE_LENGTH)?;
    if leaf_type != u64::from(TIMESTAMPED_ENTRY_LEAF_TYPE) {
        return Err(Error::UnsupportedLeafType { leaf_type });
    }

    let timestamped_entry = parse_timestamped_entry(reader)?;
    Ok(MerkleTreeLeaf {
        version,
        timestamped_entry,
    })
}

/// Parse a `TimestampedEntry`
///
/// The entry type tag selects the signed entry variant; an unknown tag fails
/// before any part of the signed entry is read.
pub fn parse_timestamped_entry<R: Read>(reader: &mut Reader<R>) -> Result<TimestampedEntry> {
    let timestamp = reader.read_number(TIMESTAMP_LENGTH)?;

    let entry_type_value = reader.read_number(LOG_ENTRY_TYPE_LENGTH)?;
    let entry_type = u16::try_from(entry_type_value)
        .ok()
        .and_then(LogEntryType::from_u16)
        .ok_or(Error::UnknownEntryType {
            entry_type: entry_type_value,
        })?;

    let signed_entry = match entry_type {
        LogEntryType::X509Entry => {
            SignedEntry::X509(reader.read_variable_length(MAX_CERTIFICATE_LENGTH)?)
        }
        LogEntryType::PrecertEntry => {
            let issuer_key_hash =
                IssuerKeyHash::from_bytes(reader.read_array::<ISSUER_KEY_HASH_LENGTH>()?);
            let tbs_certificate = reader.read_variable_length(MAX_TBS_CERTIFICATE_LENGTH)?;
            SignedEntry::PreCert(PreCert {
                issuer_key_hash,
                tbs_certificate,
            })
        }
    };

    tracing::trace!("parsed {} timestamped entry", entry_type);

    Ok(TimestampedEntry {
        timestamp,
        signed_entry,
    })
}

/// Parse the extra data of an X.509 entry
///
/// `leaf_certificate` comes from the entry's Merkle tree leaf and is not
/// present in the extra data.
pub fn parse_x509_chain_entry<R: Read>(
    reader: &mut Reader<R>,
    leaf_certificate: Vec<u8>,
) -> Result<X509ChainEntry> {
    let certificate_chain = parse_chain(reader, "certificate chain")?;
    Ok(X509ChainEntry {
        leaf_certificate,
        certificate_chain,
    })
}

/// Parse the extra data of a precertificate entry
pub fn parse_precert_chain_entry<R: Read>(
    reader: &mut Reader<R>,
    pre_cert: PreCert,
) -> Result<PrecertChainEntry> {
    let precertificate_chain = parse_chain(reader, "precertificate chain")?;
    Ok(PrecertChainEntry {
        pre_cert,
        precertificate_chain,
    })
}

/// Parse a log entry from its Merkle tree leaf and its extra data
pub fn parse_log_entry<L: Read, E: Read>(
    leaf_reader: &mut Reader<L>,
    extra_data_reader: &mut Reader<E>,
) -> Result<ParsedLogEntry> {
    let merkle_tree_leaf = parse_merkle_tree_leaf(leaf_reader)?;

    let log_entry = match &merkle_tree_leaf.timestamped_entry.signed_entry {
        SignedEntry::X509(certificate) => LogEntry::X509(parse_x509_chain_entry(
            extra_data_reader,
            certificate.clone(),
        )?),
        SignedEntry::PreCert(pre_cert) => LogEntry::Precert(parse_precert_chain_entry(
            extra_data_reader,
            pre_cert.clone(),
        )?),
    };

    Ok(ParsedLogEntry::new(merkle_tree_leaf, log_entry)?)
}

/// Decode an SCT held in memory
pub fn sct_from_slice(data: &[u8], options: &DecodeOptions) -> Result<SignedCertificateTimestamp> {
    let mut reader = Reader::new(data);
    let sct = parse_sct(&mut reader)?;
    finish(&reader, options)?;
    Ok(sct)
}

/// Decode a Merkle tree leaf held in memory, e.g. a `leaf_input` of `get-entries`
pub fn merkle_tree_leaf_from_slice(data: &[u8], options: &DecodeOptions) -> Result<MerkleTreeLeaf> {
    let mut reader = Reader::new(data);
    let leaf = parse_merkle_tree_leaf(&mut reader)?;
    finish(&reader, options)?;
    Ok(leaf)
}

/// Decode a log entry from its `leaf_input` and `extra_data`
pub fn log_entry_from_slices(
    leaf_input: &[u8],
    extra_data: &[u8],
    options: &DecodeOptions,
) -> Result<ParsedLogEntry> {
    let mut leaf_reader = Reader::new(leaf_input);
    let mut extra_data_reader = Reader::new(extra_data);
    let entry = parse_log_entry(&mut leaf_reader, &mut extra_data_reader)?;
    finish(&leaf_reader, options)?;
    Ok(entry)
}

fn parse_version<R: Read>(reader: &mut Reader<R>) -> Result<Version> {
    let version = reader.read_number(VERSION_LENGTH)?;
    u8::try_from(version)
        .ok()
        .and_then(Version::from_u8)
        .ok_or(Error::UnsupportedVersion { version })
}

/// Read a chain of length-prefixed certificates filling the rest of the stream
///
/// The outer length must equal the number of bytes remaining in the stream.
/// At most one byte past the declared length is buffered.
fn parse_chain<R: Read>(reader: &mut Reader<R>, what: &str) -> Result<Vec<Vec<u8>>> {
    let corrupt = |e: Error| match e {
        Error::Io(io) => Error::CorruptData(format!("cannot read {}: {}", what, io)),
        other => other,
    };

    let declared_length = reader
        .read_number(bytes_needed(MAX_CHAIN_LENGTH))
        .map_err(corrupt)?;
    // one byte past the declared length is enough to detect surplus data
    let chain_data = reader
        .read_at_most(declared_length + 1)
        .map_err(corrupt)?;

    let available = chain_data.len() as u64;
    if available > declared_length {
        return Err(Error::CorruptData(format!(
            "{} declares {} bytes but more remain",
            what, declared_length
        )));
    }
    if available < declared_length {
        return Err(Error::CorruptData(format!(
            "{} declares {} bytes but {} remain",
            what, declared_length, available
        )));
    }

    let mut chain_reader = Reader::new(chain_data.as_slice());
    let mut chain = Vec::new();
    while !chain_reader.is_empty() {
        chain.push(chain_reader.read_variable_length(MAX_CERTIFICATE_LENGTH)?);
    }

    tracing::debug!("parsed {} with {} certificates", what, chain.len());
    Ok(chain)
}

fn finish(reader: &Reader<&[u8]>, options: &DecodeOptions) -> Result<()> {
    let remaining = reader.remaining();
    if remaining == 0 {
        return Ok(());
    }
    if options.allow_trailing_data {
        tracing::warn!("ignoring {} trailing bytes", remaining);
        return Ok(());
    }
    Err(Error::TrailingData { remaining })
}
