use crate::block::Block;

/// Whether a digest satisfies the proof-of-work predicate: at least
/// `difficulty` leading hexadecimal zero characters.
pub fn meets_difficulty(hash: &str, difficulty: u32) -> bool {
    let want = difficulty as usize;
    hash.len() >= want && hash.bytes().take(want).all(|b| b == b'0')
}

/// Perform proof-of-work on a block: recompute its digest, and while the
/// digest misses the difficulty target, bump the nonce and retry. Starts
/// from the block's current nonce and has no attempt bound; expected cost
/// grows exponentially with `difficulty`.
///
/// The hash is computed at least once, so even at difficulty 0 the block
/// leaves here with `hash` matching its content. Returns the number of
/// digest evaluations, for diagnostics.
pub fn mine(block: &mut Block, difficulty: u32) -> u64 {
    let mut attempts: u64 = 0;
    loop {
        block.hash = block.compute_hash();
        attempts += 1;
        if meets_difficulty(&block.hash, difficulty) {
            return attempts;
        }
        block.nonce = block.nonce.wrapping_add(1);
    }
}
