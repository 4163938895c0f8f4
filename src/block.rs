use crate::verse::Verse;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// SHA-256 digest as a lowercase hex string.
pub type BlockHash = String;

/// Sentinel hash of the genesis block. Fixed by construction, never computed.
pub const GENESIS_HASH: &str = "0";

/// One record in the chain: a verse payload linked to its predecessor by
/// hash, sealed by a proof-of-work nonce.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Block {
    /// The verse carried by this block. `None` only for the genesis block,
    /// which anchors the chain and carries no record.
    pub data: Option<Verse>,
    /// Hash of the preceding block; empty for genesis.
    pub previous_hash: BlockHash,
    /// Cached digest of this block's own fields.
    pub hash: BlockHash,
    /// Proof-of-work nonce.
    pub nonce: u64,
    /// When the block was appended.
    pub timestamp: DateTime<Utc>,
}

impl Block {
    /// Create the genesis block: sentinel hash, no predecessor, not mined.
    pub fn genesis() -> Self {
        Self {
            data: None,
            previous_hash: String::new(),
            hash: GENESIS_HASH.into(),
            nonce: 0,
            timestamp: Utc::now(),
        }
    }

    /// Create a new block on top of `previous_hash`, not yet mined.
    pub fn new(data: Verse, previous_hash: BlockHash) -> Self {
        let mut block = Self {
            data: Some(data),
            previous_hash,
            hash: String::new(),
            nonce: 0,
            timestamp: Utc::now(),
        };
        block.hash = block.compute_hash();
        block
    }

    /// Recompute this block's digest from its stored fields (excluding the
    /// cached `hash` itself).
    ///
    /// The preimage concatenates the previous hash, the canonical JSON
    /// encoding of the payload, the nonce, and the RFC 3339 timestamp, in
    /// that order. Every field participates; changing any of them changes
    /// the digest.
    pub fn compute_hash(&self) -> BlockHash {
        let payload = serde_json::to_string(&self.data).expect("verse serializes to JSON");
        let preimage = format!(
            "{}{}{}{}",
            self.previous_hash,
            payload,
            self.nonce,
            self.timestamp.to_rfc3339(),
        );
        sha256_hex(preimage.as_bytes())
    }

    /// Whether this block's cached hash matches its content.
    pub fn verify(&self) -> bool {
        self.hash == self.compute_hash()
    }
}

/// Compute the SHA-256 hex digest of some data.
pub fn sha256_hex(data: &[u8]) -> BlockHash {
    let mut hasher = Sha256::new();
    hasher.update(data);
    format!("{:x}", hasher.finalize())
}
