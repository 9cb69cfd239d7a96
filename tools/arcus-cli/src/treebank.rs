use std::fs;
use std::path::Path;

use anyhow::{anyhow, Context};
use arcus_parser::tab;
use arcus_protocol::Treebank;
use rkyv::AlignedVec;

fn is_archive(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == "rkyv")
}

/// Loads a `.rkyv` archive, or anything else as tab text.
pub fn load(path: &Path) -> anyhow::Result<Treebank> {
    if !is_archive(path) {
        return tab::load_treebank(path)
            .with_context(|| format!("failed to load {}", path.display()));
    }

    let bytes = fs::read(path).with_context(|| format!("failed to read {}", path.display()))?;
    // Validation requires the archive to be aligned
    let mut aligned = AlignedVec::with_capacity(bytes.len());
    aligned.extend_from_slice(&bytes);

    rkyv::from_bytes::<Treebank>(&aligned)
        .map_err(|e| anyhow!("invalid treebank archive {}: {:?}", path.display(), e))
}

/// Archives a tab treebank. Returns the number of sentences written.
pub fn compile(input: &Path, output: &Path) -> anyhow::Result<usize> {
    let treebank = load(input)?;
    let bytes = rkyv::to_bytes::<_, 4096>(&treebank)
        .map_err(|e| anyhow!("failed to archive treebank: {:?}", e))?;
    fs::write(output, bytes.as_slice())
        .with_context(|| format!("failed to write {}", output.display()))?;
    Ok(treebank.sentences.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compile_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("gold.tab");
        let output = dir.path().join("gold.rkyv");
        fs::write(&input, "the\tDET\t2\tdet\ncat\tNOUN\t0\troot\n\nhi\tX\t0\troot\n").unwrap();

        assert_eq!(compile(&input, &output).unwrap(), 2);
        let archived = load(&output).unwrap();
        assert_eq!(archived, load(&input).unwrap());
    }

    #[test]
    fn test_corrupt_archive_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.rkyv");
        fs::write(&path, b"not an archive").unwrap();
        assert!(load(&path).is_err());
    }
}
