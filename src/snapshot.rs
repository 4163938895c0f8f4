use crate::chain::Chain;
use crate::error::{ChainError, Result};
use log::debug;
use lz4_flex::{compress_prepend_size, decompress_size_prepended};
use std::fs;
use std::path::Path;

/// Write the whole chain to `path` as one LZ4-compressed JSON blob.
///
/// The snapshot is whole-structure: every block, the chain id and the
/// difficulty round-trip exactly, so `validate()` behaves identically
/// before and after a save/load cycle.
pub fn save(chain: &Chain, path: &Path) -> Result<()> {
    let json = serde_json::to_vec(chain)?;
    let blob = compress_prepend_size(&json);
    fs::write(path, &blob)?;
    debug!(
        "saved chain {} to {} ({} blocks, {} bytes compressed)",
        chain.id,
        path.display(),
        chain.len(),
        blob.len()
    );
    Ok(())
}

/// Restore a chain from a snapshot file. The structure is either fully
/// reconstructed or the failure is surfaced; there is no partial load.
pub fn load(path: &Path) -> Result<Chain> {
    let blob = fs::read(path)?;
    let json = decompress_size_prepended(&blob)
        .map_err(|e| ChainError::SnapshotCorrupt(format!("LZ4 frame: {}", e)))?;
    let chain: Chain = serde_json::from_slice(&json)?;
    debug!(
        "loaded chain {} from {} ({} blocks)",
        chain.id,
        path.display(),
        chain.len()
    );
    Ok(chain)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::verse::Verse;

    fn sample_chain() -> Chain {
        let mut chain = Chain::new(1);
        chain.append(Verse::new("John".into(), 3, 16, "For God so loved".into()));
        chain.append(Verse::new("John".into(), 3, 17, "For God sent not".into()));
        chain
    }

    #[test]
    fn roundtrip_preserves_every_field() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("verses.chain");

        let chain = sample_chain();
        save(&chain, &path).unwrap();
        let loaded = load(&path).unwrap();

        assert_eq!(loaded, chain);
        assert_eq!(loaded.id, chain.id);
        assert_eq!(loaded.difficulty, 1);
        assert!(loaded.validate());
    }

    #[test]
    fn validation_result_survives_roundtrip() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("verses.chain");

        let mut chain = sample_chain();
        chain.blocks[1].nonce += 1; // tamper before saving
        save(&chain, &path).unwrap();
        let loaded = load(&path).unwrap();

        assert_eq!(chain.validate(), loaded.validate());
        assert!(!loaded.validate());
    }

    #[test]
    fn missing_file_is_io_error() {
        let tmp = tempfile::tempdir().unwrap();
        let err = load(&tmp.path().join("absent.chain")).unwrap_err();
        assert!(matches!(err, ChainError::Io(_)));
    }

    #[test]
    fn garbage_blob_is_corrupt() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("bad.chain");
        // Claims 5 decompressed bytes, then an invalid LZ4 block.
        fs::write(&path, [5u8, 0, 0, 0, 0xFF, 0xFF]).unwrap();

        let err = load(&path).unwrap_err();
        assert!(matches!(err, ChainError::SnapshotCorrupt(_)));
    }

    #[test]
    fn valid_frame_with_bad_json_is_serde_error() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("bad.chain");
        fs::write(&path, compress_prepend_size(b"not a chain")).unwrap();

        let err = load(&path).unwrap_err();
        assert!(matches!(err, ChainError::Serde(_)));
    }
}
