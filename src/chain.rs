use crate::block::{Block, BlockHash};
use crate::miner;
use crate::verse::Verse;
use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use uuid::Uuid;

/// An append-only chain of verse blocks anchored by an unmined genesis
/// block. Every later block is mined against the chain's difficulty and
/// links to its predecessor by hash.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Chain {
    /// Identity of this ledger instance, preserved across snapshots.
    pub id: Uuid,
    /// Leading-zero requirement applied to every mined block. Fixed at
    /// creation; recorded here so a reloaded chain states what it was
    /// mined under.
    pub difficulty: u32,
    /// `blocks[0]` is genesis. Grows by append only.
    pub blocks: Vec<Block>,
}

impl Chain {
    /// Create a chain containing only the genesis block.
    pub fn new(difficulty: u32) -> Self {
        Self {
            id: Uuid::new_v4(),
            difficulty,
            blocks: vec![Block::genesis()],
        }
    }

    /// The most recent block.
    pub fn tip(&self) -> &Block {
        self.blocks
            .last()
            .expect("chain always holds at least the genesis block")
    }

    /// Mine a block carrying `data` on top of the current tip and append it.
    ///
    /// Appends are strictly sequential: each block's identity depends on the
    /// finished hash of the one before it, so call order defines the chain.
    /// Never fails; mining may be slow at high difficulty.
    pub fn append(&mut self, data: Verse) -> &Block {
        let mut block = Block::new(data, self.tip().hash.clone());
        let attempts = miner::mine(&mut block, self.difficulty);
        debug!(
            "sealed block #{} nonce={} attempts={}",
            self.blocks.len(),
            block.nonce,
            attempts
        );
        self.blocks.push(block);
        self.tip()
    }

    // ── Integrity ─────────────────────────────────────────────

    /// Index of the first block that fails the integrity scan: its cached
    /// hash no longer matches its content, or its previous-hash link is
    /// broken. Scans forward from index 1. Genesis itself is never
    /// hash-checked; a tampered genesis hash still surfaces through the
    /// link check at index 1.
    pub fn first_invalid(&self) -> Option<usize> {
        for i in 1..self.blocks.len() {
            let prev = &self.blocks[i - 1];
            let cur = &self.blocks[i];
            if !cur.verify() || cur.previous_hash != prev.hash {
                return Some(i);
            }
        }
        None
    }

    /// Whether every block's hash matches its content and every link holds.
    pub fn validate(&self) -> bool {
        self.first_invalid().is_none()
    }

    // ── Lookup ────────────────────────────────────────────────

    /// Find the first block in chain order whose verse matches all three
    /// key components exactly (case-sensitive book). Duplicates are
    /// permitted; the earliest appended wins. Genesis carries no verse and
    /// matches nothing.
    pub fn find(&self, book: &str, chapter: u32, verse: u32) -> Option<&Block> {
        self.blocks.iter().find(|b| {
            b.data
                .as_ref()
                .is_some_and(|d| d.matches(book, chapter, verse))
        })
    }

    /// Number of blocks, genesis included.
    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Summary counters for display.
    pub fn stats(&self) -> ChainStats {
        let verses = self.blocks.iter().filter(|b| b.data.is_some()).count();
        let books: BTreeSet<&str> = self
            .blocks
            .iter()
            .filter_map(|b| b.data.as_ref())
            .map(|d| d.book.as_str())
            .collect();
        ChainStats {
            id: self.id,
            blocks: self.blocks.len(),
            verses,
            books: books.len(),
            difficulty: self.difficulty,
            genesis_at: self.blocks[0].timestamp,
            tip_hash: self.tip().hash.clone(),
        }
    }
}

/// Chain statistics.
#[derive(Debug, Clone)]
pub struct ChainStats {
    pub id: Uuid,
    pub blocks: usize,
    pub verses: usize,
    pub books: usize,
    pub difficulty: u32,
    pub genesis_at: chrono::DateTime<chrono::Utc>,
    pub tip_hash: BlockHash,
}

impl std::fmt::Display for ChainStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Chain:      {}", self.id)?;
        writeln!(f, "Blocks:     {}", self.blocks)?;
        writeln!(f, "Verses:     {}", self.verses)?;
        writeln!(f, "Books:      {}", self.books)?;
        writeln!(f, "Difficulty: {}", self.difficulty)?;
        writeln!(
            f,
            "Genesis:    {}",
            self.genesis_at.format("%Y-%m-%d %H:%M:%S")
        )?;
        writeln!(f, "Tip:        {}", self.tip_hash)?;
        Ok(())
    }
}
