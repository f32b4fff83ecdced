//! Model artifact discovery.
//!
//! Scans the configured models directory once at startup for a GGUF
//! artifact. Discovery failure degrades to "no model" rather than aborting
//! startup; the process never re-scans.

use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Magic bytes at the start of every GGUF file.
const GGUF_MAGIC: &[u8; 4] = b"GGUF";

/// Process-wide handle to the single discovered model artifact.
///
/// Immutable after discovery; shared read-only across concurrent requests.
#[derive(Debug, Clone)]
pub struct ModelHandle {
    path: PathBuf,
    size_bytes: u64,
}

impl ModelHandle {
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn size_bytes(&self) -> u64 {
        self.size_bytes
    }

    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default()
    }
}

/// Discover zero or one model artifact in a directory.
///
/// Picks the lexically first `*.gguf` file when multiple exist and validates
/// its header. Any failure (missing directory, no artifacts, corrupt file)
/// is logged and yields `None`.
pub fn discover_model(models_dir: &Path) -> Option<ModelHandle> {
    if !models_dir.is_dir() {
        warn!(
            "Models directory not found at {}; generative tier disabled",
            models_dir.display()
        );
        return None;
    }

    let mut candidates: Vec<PathBuf> = match std::fs::read_dir(models_dir) {
        Ok(entries) => entries
            .flatten()
            .map(|e| e.path())
            .filter(|p| p.extension().is_some_and(|ext| ext == "gguf"))
            .collect(),
        Err(e) => {
            warn!("Cannot read models directory {}: {}", models_dir.display(), e);
            return None;
        }
    };

    if candidates.is_empty() {
        warn!(
            "No .gguf files found in {}; generative tier disabled",
            models_dir.display()
        );
        return None;
    }

    // Deterministic pick: lexical path order.
    candidates.sort();
    let path = candidates.remove(0);

    match validate_gguf(&path) {
        Ok(size_bytes) => {
            info!("Found model artifact: {}", path.display());
            Some(ModelHandle { path, size_bytes })
        }
        Err(e) => {
            warn!("Model artifact {} failed validation: {}", path.display(), e);
            None
        }
    }
}

/// Check the GGUF magic header and return the file size.
fn validate_gguf(path: &Path) -> std::io::Result<u64> {
    let mut file = File::open(path)?;
    let mut magic = [0u8; 4];
    file.read_exact(&mut magic)?;

    if &magic != GGUF_MAGIC {
        return Err(std::io::Error::new(
            std::io::ErrorKind::InvalidData,
            "not a GGUF file (bad magic header)",
        ));
    }

    Ok(file.metadata()?.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_model(dir: &Path, name: &str, contents: &[u8]) {
        std::fs::write(dir.join(name), contents).unwrap();
    }

    #[test]
    fn test_discover_missing_directory() {
        assert!(discover_model(Path::new("/nonexistent/models")).is_none());
    }

    #[test]
    fn test_discover_empty_directory() {
        let dir = tempfile::tempdir().unwrap();
        assert!(discover_model(dir.path()).is_none());
    }

    #[test]
    fn test_discover_picks_lexically_first() {
        let dir = tempfile::tempdir().unwrap();
        write_model(dir.path(), "b-model.gguf", b"GGUFdata");
        write_model(dir.path(), "a-model.gguf", b"GGUFdata");
        write_model(dir.path(), "notes.txt", b"ignored");

        let handle = discover_model(dir.path()).unwrap();
        assert_eq!(handle.file_name(), "a-model.gguf");
        assert_eq!(handle.size_bytes(), 8);
    }

    #[test]
    fn test_discover_rejects_corrupt_artifact() {
        let dir = tempfile::tempdir().unwrap();
        write_model(dir.path(), "corrupt.gguf", b"XXXX not a model");

        assert!(discover_model(dir.path()).is_none());
    }

    #[test]
    fn test_discover_rejects_truncated_artifact() {
        let dir = tempfile::tempdir().unwrap();
        write_model(dir.path(), "tiny.gguf", b"GG");

        assert!(discover_model(dir.path()).is_none());
    }
}
