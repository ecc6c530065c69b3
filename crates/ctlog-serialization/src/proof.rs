//! Audit proof assembly
//!
//! Logs return audit paths as JSON arrays of base64 strings
//! (`get-proof-by-hash`, `get-entry-and-proof`). Parsing the JSON is left to
//! the transport; these functions take the already-extracted strings.

use crate::error::{Error, Result};
use base64::alphabet;
use base64::engine::general_purpose::{GeneralPurpose, GeneralPurposeConfig};
use base64::engine::DecodePaddingMode;
use base64::Engine;
use ctlog_types::{MerkleAuditProof, ParsedLogEntry, ParsedLogEntryWithProof, Version};

/// Standard alphabet, padding optional
const PATH_NODE_ENGINE: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// Build a [`MerkleAuditProof`] from base64-encoded path nodes
///
/// Node order is preserved. Node contents are not checked beyond being valid
/// base64; padding may be omitted.
pub fn parse_audit_proof<S: AsRef<str>>(
    proof: &[S],
    leaf_index: u64,
    tree_size: u64,
) -> Result<MerkleAuditProof> {
    let path_node = proof
        .iter()
        .enumerate()
        .map(|(index, node)| {
            PATH_NODE_ENGINE
                .decode(node.as_ref())
                .map_err(|source| Error::Base64 { index, source })
        })
        .collect::<Result<Vec<_>>>()?;

    tracing::debug!(
        "parsed audit proof for leaf {} of {} with {} nodes",
        leaf_index,
        tree_size,
        path_node.len()
    );

    Ok(MerkleAuditProof::new(Version::V1, tree_size, leaf_index).with_path(path_node))
}

/// Attach an audit proof to an already parsed log entry
pub fn parse_log_entry_with_proof<S: AsRef<str>>(
    entry: ParsedLogEntry,
    proof: &[S],
    leaf_index: u64,
    tree_size: u64,
) -> Result<ParsedLogEntryWithProof> {
    let audit_proof = parse_audit_proof(proof, leaf_index, tree_size)?;
    Ok(ParsedLogEntryWithProof::new(entry, audit_proof))
}

#[cfg(test)]
mod tests {
    use super::*;
    use base64::engine::general_purpose::STANDARD;
    use ctlog_types::{LogEntry, MerkleTreeLeaf, SignedEntry, TimestampedEntry, X509ChainEntry};

    #[test]
    fn test_parse_audit_proof_keeps_order() {
        let nodes = ["AQID", "BAUG", "Bwg="];
        let proof = parse_audit_proof(&nodes, 5, 10).unwrap();
        assert_eq!(proof.version, Version::V1);
        assert_eq!(proof.leaf_index, 5);
        assert_eq!(proof.tree_size, 10);
        assert_eq!(
            proof.path_node,
            vec![vec![1, 2, 3], vec![4, 5, 6], vec![7, 8]]
        );
    }

    #[test]
    fn test_parse_audit_proof_empty() {
        let nodes: [&str; 0] = [];
        let proof = parse_audit_proof(&nodes, 0, 1).unwrap();
        assert!(proof.path_node.is_empty());
    }

    #[test]
    fn test_parse_audit_proof_accepts_owned_strings() {
        let nodes = vec![STANDARD.encode([0u8; 32])];
        let proof = parse_audit_proof(&nodes, 0, 2).unwrap();
        assert_eq!(proof.path_node, vec![vec![0u8; 32]]);
    }

    #[test]
    fn test_parse_audit_proof_accepts_unpadded_nodes() {
        let proof = parse_audit_proof(&["AQI", "AQI="], 0, 2).unwrap();
        assert_eq!(proof.path_node, vec![vec![1, 2], vec![1, 2]]);
    }

    #[test]
    fn test_parse_audit_proof_invalid_base64() {
        let nodes = ["AQID", "not base64!"];
        let err = parse_audit_proof(&nodes, 1, 2).unwrap_err();
        assert!(matches!(err, Error::Base64 { index: 1, .. }));
    }

    #[test]
    fn test_parse_log_entry_with_proof() {
        let leaf = MerkleTreeLeaf {
            version: Version::V1,
            timestamped_entry: TimestampedEntry {
                timestamp: 0,
                signed_entry: SignedEntry::X509(vec![0x30]),
            },
        };
        let chain = LogEntry::X509(X509ChainEntry {
            leaf_certificate: vec![0x30],
            certificate_chain: vec![],
        });
        let entry = ParsedLogEntry::new(leaf, chain).unwrap();

        let with_proof = parse_log_entry_with_proof(entry.clone(), &["AA=="], 3, 4).unwrap();
        assert_eq!(with_proof.parsed_log_entry, entry);
        assert_eq!(with_proof.audit_proof.leaf_index, 3);
        assert_eq!(with_proof.audit_proof.path_node, vec![vec![0]]);
    }

    #[test]
    fn test_log_entry_with_proof_json_shape() {
        let leaf = MerkleTreeLeaf {
            version: Version::V1,
            timestamped_entry: TimestampedEntry {
                timestamp: 7,
                signed_entry: SignedEntry::X509(vec![0x30]),
            },
        };
        let chain = LogEntry::X509(X509ChainEntry {
            leaf_certificate: vec![0x30],
            certificate_chain: vec![vec![0x01]],
        });
        let entry = ParsedLogEntry::new(leaf, chain).unwrap();
        let with_proof = parse_log_entry_with_proof(entry, &["AQID"], 1, 2).unwrap();

        let json = serde_json::to_value(&with_proof).unwrap();
        assert_eq!(
            json["parsedLogEntry"]["merkleTreeLeaf"]["timestampedEntry"]["timestamp"],
            7
        );
        assert_eq!(
            json["parsedLogEntry"]["logEntry"]["x509"]["certificateChain"][0],
            "AQ=="
        );
        assert_eq!(json["auditProof"]["pathNode"][0], "AQID");
        assert_eq!(json["auditProof"]["treeSize"], 2);
    }
}
