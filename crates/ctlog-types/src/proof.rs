//! Merkle audit proof

use crate::encoding::base64_bytes_vec;
use crate::sct::Version;
use serde::{Deserialize, Serialize};

/// Inclusion proof for a single leaf at a given tree size
///
/// Path nodes are raw hash values, ordered from the leaf towards the root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MerkleAuditProof {
    pub version: Version,
    pub tree_size: u64,
    pub leaf_index: u64,
    #[serde(with = "base64_bytes_vec")]
    pub path_node: Vec<Vec<u8>>,
}

impl MerkleAuditProof {
    /// Create a proof with an empty path
    pub fn new(version: Version, tree_size: u64, leaf_index: u64) -> Self {
        Self {
            version,
            tree_size,
            leaf_index,
            path_node: Vec::new(),
        }
    }

    pub fn with_path(mut self, path_node: Vec<Vec<u8>>) -> Self {
        self.path_node = path_node;
        self
    }

    pub fn path_len(&self) -> usize {
        self.path_node.len()
    }
}
