//! Encoding CT structures into their binary form
//!
//! The inverse of [`crate::deserializer`]. Encoders refuse values that do not
//! fit their wire field rather than truncating them.

use crate::error::{Error, Result};
use crate::reader::{bytes_needed, MAX_NUMBER_WIDTH};
use ctlog_types::constants::{
    ALGORITHM_LENGTH, LEAF_TYPE_LENGTH, LOG_ENTRY_TYPE_LENGTH, MAX_CERTIFICATE_LENGTH,
    MAX_CHAIN_LENGTH, MAX_EXTENSIONS_LENGTH, MAX_SIGNATURE_LENGTH, MAX_TBS_CERTIFICATE_LENGTH,
    TIMESTAMPED_ENTRY_LEAF_TYPE, TIMESTAMP_LENGTH, VERSION_LENGTH,
};
use ctlog_types::{
    DigitallySigned, MerkleTreeLeaf, PrecertChainEntry, SignedCertificateTimestamp, SignedEntry,
    TimestampedEntry, X509ChainEntry,
};
use std::io::Write;

/// Cursor over a byte sink
#[derive(Debug)]
pub struct Writer<W> {
    inner: W,
    position: u64,
}

impl<W: Write> Writer<W> {
    pub fn new(inner: W) -> Self {
        Self { inner, position: 0 }
    }

    /// Bytes written so far
    pub fn position(&self) -> u64 {
        self.position
    }

    pub fn into_inner(self) -> W {
        self.inner
    }

    pub fn write_fixed_length(&mut self, data: &[u8]) -> Result<()> {
        self.inner.write_all(data)?;
        self.position += data.len() as u64;
        Ok(())
    }

    /// Write `value` big-endian in exactly `num_bytes` bytes
    pub fn write_number(&mut self, value: u64, num_bytes: usize) -> Result<()> {
        if num_bytes > MAX_NUMBER_WIDTH {
            return Err(Error::InvalidArgument(format!(
                "cannot write a number of {} bytes, at most {} are supported",
                num_bytes, MAX_NUMBER_WIDTH
            )));
        }
        if num_bytes < MAX_NUMBER_WIDTH && value >> (8 * num_bytes) != 0 {
            return Err(Error::InvalidArgument(format!(
                "value {} does not fit in {} bytes",
                value, num_bytes
            )));
        }

        let bytes = value.to_be_bytes();
        self.write_fixed_length(&bytes[MAX_NUMBER_WIDTH - num_bytes..])
    }

    /// Write `data` prefixed with its length, sized for `max_data_length`
    pub fn write_variable_length(&mut self, data: &[u8], max_data_length: u64) -> Result<()> {
        let length = data.len() as u64;
        if length > max_data_length {
            return Err(Error::InvalidArgument(format!(
                "field of {} bytes exceeds maximum {}",
                length, max_data_length
            )));
        }
        self.write_number(length, bytes_needed(max_data_length))?;
        self.write_fixed_length(data)
    }
}

pub fn serialize_sct<W: Write>(
    writer: &mut Writer<W>,
    sct: &SignedCertificateTimestamp,
) -> Result<()> {
    writer.write_number(u64::from(sct.version.as_u8()), VERSION_LENGTH)?;
    writer.write_fixed_length(sct.id.key_id.as_bytes())?;
    writer.write_number(sct.timestamp, TIMESTAMP_LENGTH)?;
    writer.write_variable_length(&sct.extensions, MAX_EXTENSIONS_LENGTH)?;
    serialize_digitally_signed(writer, &sct.signature)
}

pub fn serialize_digitally_signed<W: Write>(
    writer: &mut Writer<W>,
    signed: &DigitallySigned,
) -> Result<()> {
    writer.write_number(u64::from(signed.hash_algorithm.as_u8()), ALGORITHM_LENGTH)?;
    writer.write_number(
        u64::from(signed.signature_algorithm.as_u8()),
        ALGORITHM_LENGTH,
    )?;
    writer.write_variable_length(&signed.signature, MAX_SIGNATURE_LENGTH)
}

pub fn serialize_merkle_tree_leaf<W: Write>(
    writer: &mut Writer<W>,
    leaf: &MerkleTreeLeaf,
) -> Result<()> {
    writer.write_number(u64::from(leaf.version.as_u8()), VERSION_LENGTH)?;
    writer.write_number(u64::from(TIMESTAMPED_ENTRY_LEAF_TYPE), LEAF_TYPE_LENGTH)?;
    serialize_timestamped_entry(writer, &leaf.timestamped_entry)
}

pub fn serialize_timestamped_entry<W: Write>(
    writer: &mut Writer<W>,
    entry: &TimestampedEntry,
) -> Result<()> {
    writer.write_number(entry.timestamp, TIMESTAMP_LENGTH)?;
    writer.write_number(u64::from(entry.entry_type().as_u16()), LOG_ENTRY_TYPE_LENGTH)?;
    match &entry.signed_entry {
        SignedEntry::X509(certificate) => {
            writer.write_variable_length(certificate, MAX_CERTIFICATE_LENGTH)
        }
        SignedEntry::PreCert(pre_cert) => {
            writer.write_fixed_length(pre_cert.issuer_key_hash.as_bytes())?;
            writer.write_variable_length(&pre_cert.tbs_certificate, MAX_TBS_CERTIFICATE_LENGTH)
        }
    }
}

/// Write the extra data of an X.509 entry (the leaf certificate is not included)
pub fn serialize_x509_chain_entry<W: Write>(
    writer: &mut Writer<W>,
    entry: &X509ChainEntry,
) -> Result<()> {
    serialize_chain(writer, &entry.certificate_chain)
}

/// Write the extra data of a precertificate entry
pub fn serialize_precert_chain_entry<W: Write>(
    writer: &mut Writer<W>,
    entry: &PrecertChainEntry,
) -> Result<()> {
    serialize_chain(writer, &entry.precertificate_chain)
}

pub fn sct_to_vec(sct: &SignedCertificateTimestamp) -> Result<Vec<u8>> {
    to_vec(|writer| serialize_sct(writer, sct))
}

pub fn digitally_signed_to_vec(signed: &DigitallySigned) -> Result<Vec<u8>> {
    to_vec(|writer| serialize_digitally_signed(writer, signed))
}

pub fn merkle_tree_leaf_to_vec(leaf: &MerkleTreeLeaf) -> Result<Vec<u8>> {
    to_vec(|writer| serialize_merkle_tree_leaf(writer, leaf))
}

pub fn timestamped_entry_to_vec(entry: &TimestampedEntry) -> Result<Vec<u8>> {
    to_vec(|writer| serialize_timestamped_entry(writer, entry))
}

pub fn x509_chain_entry_to_vec(entry: &X509ChainEntry) -> Result<Vec<u8>> {
    to_vec(|writer| serialize_x509_chain_entry(writer, entry))
}

pub fn precert_chain_entry_to_vec(entry: &PrecertChainEntry) -> Result<Vec<u8>> {
    to_vec(|writer| serialize_precert_chain_entry(writer, entry))
}

fn serialize_chain<W: Write>(writer: &mut Writer<W>, chain: &[Vec<u8>]) -> Result<()> {
    let mut body = Writer::new(Vec::new());
    for certificate in chain {
        body.write_variable_length(certificate, MAX_CERTIFICATE_LENGTH)?;
    }
    writer.write_variable_length(&body.into_inner(), MAX_CHAIN_LENGTH)
}

fn to_vec<F>(encode: F) -> Result<Vec<u8>>
where
    F: FnOnce(&mut Writer<Vec<u8>>) -> Result<()>,
{
    let mut writer = Writer::new(Vec::new());
    encode(&mut writer)?;
    Ok(writer.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::deserializer::{
        log_entry_from_slices, merkle_tree_leaf_from_slice, parse_digitally_signed,
        parse_timestamped_entry, sct_from_slice,
    };
    use crate::options::DecodeOptions;
    use crate::reader::Reader;
    use ctlog_types::{
        HashAlgorithm, IssuerKeyHash, KeyId, LogEntry, LogId, PreCert, SignatureAlgorithm,
        Version,
    };

    fn sample_sct() -> SignedCertificateTimestamp {
        SignedCertificateTimestamp {
            version: Version::V1,
            id: LogId::from(KeyId::from_bytes([0x5a; 32])),
            timestamp: 1_512_556_025_588,
            extensions: vec![0xe0, 0x01],
            signature: DigitallySigned {
                hash_algorithm: HashAlgorithm::Sha256,
                signature_algorithm: SignatureAlgorithm::Rsa,
                signature: vec![0x42; 256],
            },
        }
    }

    fn sample_pre_cert() -> PreCert {
        PreCert {
            issuer_key_hash: IssuerKeyHash::from_bytes([0x33; 32]),
            tbs_certificate: vec![0x30, 0x82, 0x01, 0x00],
        }
    }

    #[test]
    fn test_write_number() {
        let mut writer = Writer::new(Vec::new());
        writer.write_number(0x010203, 3).unwrap();
        writer.write_number(0, 0).unwrap();
        assert_eq!(writer.position(), 3);
        assert_eq!(writer.into_inner(), vec![0x01, 0x02, 0x03]);
    }

    #[test]
    fn test_write_number_full_width() {
        let mut writer = Writer::new(Vec::new());
        writer.write_number(u64::MAX, 8).unwrap();
        assert_eq!(writer.into_inner(), vec![0xff; 8]);
    }

    #[test]
    fn test_write_number_overflow() {
        let mut writer = Writer::new(Vec::new());
        let err = writer.write_number(256, 1).unwrap_err();
        assert!(matches!(err, Error::InvalidArgument(_)));
        let err = writer.write_number(1, 9).unwrap_err();
        assert!(matches!(err, Error::InvalidArgument(_)));
        assert!(writer.into_inner().is_empty());
    }

    #[test]
    fn test_write_variable_length_too_long() {
        let mut writer = Writer::new(Vec::new());
        let err = writer.write_variable_length(&[0u8; 256], 255).unwrap_err();
        assert!(matches!(err, Error::InvalidArgument(_)));
    }

    #[test]
    fn test_sct_roundtrip() {
        let sct = sample_sct();
        let encoded = sct_to_vec(&sct).unwrap();
        assert_eq!(encoded.len(), 1 + 32 + 8 + 2 + 2 + 2 + 2 + 256);
        let decoded = sct_from_slice(&encoded, &DecodeOptions::default()).unwrap();
        assert_eq!(decoded, sct);
    }

    #[test]
    fn test_digitally_signed_roundtrip() {
        let signed = sample_sct().signature;
        let encoded = digitally_signed_to_vec(&signed).unwrap();
        assert_eq!(&encoded[..4], &[0x04, 0x01, 0x01, 0x00]);
        let decoded = parse_digitally_signed(&mut Reader::new(&encoded[..])).unwrap();
        assert_eq!(decoded, signed);
    }

    #[test]
    fn test_timestamped_entry_roundtrip() {
        let entry = TimestampedEntry {
            timestamp: 7,
            signed_entry: SignedEntry::PreCert(sample_pre_cert()),
        };
        let encoded = timestamped_entry_to_vec(&entry).unwrap();
        let decoded = parse_timestamped_entry(&mut Reader::new(&encoded[..])).unwrap();
        assert_eq!(decoded, entry);
    }

    #[test]
    fn test_log_entry_roundtrip() {
        let leaf = MerkleTreeLeaf {
            version: Version::V1,
            timestamped_entry: TimestampedEntry {
                timestamp: 1_400_000_000_000,
                signed_entry: SignedEntry::PreCert(sample_pre_cert()),
            },
        };
        let chain = PrecertChainEntry {
            pre_cert: sample_pre_cert(),
            precertificate_chain: vec![vec![0x01; 40], vec![0x02; 70]],
        };

        let leaf_bytes = merkle_tree_leaf_to_vec(&leaf).unwrap();
        let extra_bytes = precert_chain_entry_to_vec(&chain).unwrap();
        assert_eq!(&extra_bytes[..3], &[0x00, 0x00, 116]);

        let entry =
            log_entry_from_slices(&leaf_bytes, &extra_bytes, &DecodeOptions::default()).unwrap();
        assert_eq!(entry.merkle_tree_leaf(), &leaf);
        assert_eq!(entry.log_entry(), &LogEntry::Precert(chain));
    }

    #[test]
    fn test_x509_leaf_encoding() {
        let leaf = MerkleTreeLeaf {
            version: Version::V1,
            timestamped_entry: TimestampedEntry {
                timestamp: 1,
                signed_entry: SignedEntry::X509(vec![0xaa, 0xbb]),
            },
        };
        let encoded = merkle_tree_leaf_to_vec(&leaf).unwrap();
        assert_eq!(
            encoded,
            vec![0, 0, 0, 0, 0, 0, 0, 0, 0, 1, 0, 0, 0, 0, 2, 0xaa, 0xbb]
        );
        let decoded = merkle_tree_leaf_from_slice(&encoded, &DecodeOptions::default()).unwrap();
        assert_eq!(decoded, leaf);
    }

    #[test]
    fn test_empty_chain_encoding() {
        let entry = X509ChainEntry {
            leaf_certificate: vec![0x30],
            certificate_chain: vec![],
        };
        assert_eq!(x509_chain_entry_to_vec(&entry).unwrap(), vec![0, 0, 0]);
    }
}
