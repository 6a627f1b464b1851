/// Artifact Lifecycle - Scratch Files With Guaranteed Cleanup
///
/// Every execution attempt materializes one or more filesystem objects
/// (source file, compiled binary or class directory). An ArtifactSet owns
/// them for exactly one attempt and removes them on drop, so every exit
/// path - success, compile failure, timeout, early `?` return - cleans up
/// without per-branch bookkeeping. Cleanup failures are logged and never
/// mask the primary result.

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::warn;

/// Unique per-attempt name stem: fresh random token plus a timestamp, so
/// concurrent executions never collide on the same scratch path.
pub fn unique_stem() -> String {
    format!(
        "{}_{}",
        uuid::Uuid::new_v4().simple(),
        chrono::Utc::now().timestamp_millis()
    )
}

/// Create the scratch directory if absent.
pub fn ensure_scratch_dir(dir: &Path) -> Result<()> {
    fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create scratch directory {}", dir.display()))
}

enum Artifact {
    File(PathBuf),
    Dir(PathBuf),
}

/// Owner of the filesystem objects created for one execution attempt.
pub struct ArtifactSet {
    artifacts: Vec<Artifact>,
}

impl ArtifactSet {
    pub fn new() -> Self {
        Self {
            artifacts: Vec::new(),
        }
    }

    /// Write source text to `dir/{stem}.{extension}` and track it.
    pub fn write_source(
        &mut self,
        dir: &Path,
        extension: &str,
        source: &str,
    ) -> Result<PathBuf> {
        let path = dir.join(format!("{}.{}", unique_stem(), extension));
        fs::write(&path, source)
            .with_context(|| format!("Failed to write source file {}", path.display()))?;
        self.track_file(path.clone());
        Ok(path)
    }

    /// Track a file that the toolchain is expected to create (e.g. the
    /// compiled binary). Tracked before compilation so cleanup covers the
    /// partial-failure case too.
    pub fn track_file(&mut self, path: PathBuf) {
        self.artifacts.push(Artifact::File(path));
    }

    /// Create and track a per-attempt subdirectory (used by the JVM
    /// strategy, whose compiler dictates the source file name).
    pub fn create_dir(&mut self, parent: &Path) -> Result<PathBuf> {
        let dir = parent.join(unique_stem());
        fs::create_dir_all(&dir)
            .with_context(|| format!("Failed to create artifact directory {}", dir.display()))?;
        self.artifacts.push(Artifact::Dir(dir.clone()));
        Ok(dir)
    }
}

impl Default for ArtifactSet {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for ArtifactSet {
    fn drop(&mut self) {
        for artifact in &self.artifacts {
            let result = match artifact {
                Artifact::File(path) => (fs::remove_file(path), path),
                Artifact::Dir(path) => (fs::remove_dir_all(path), path),
            };
            if let (Err(e), path) = result {
                // Already-removed artifacts are fine; anything else is
                // worth a warning but must not override the result.
                if e.kind() != std::io::ErrorKind::NotFound {
                    warn!(path = %path.display(), error = %e, "Failed to clean up artifact");
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_scratch() -> PathBuf {
        let dir = std::env::temp_dir().join(format!("runbox_test_{}", unique_stem()));
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn test_unique_stems_never_collide() {
        let stems: Vec<String> = (0..100).map(|_| unique_stem()).collect();
        let mut deduped = stems.clone();
        deduped.sort();
        deduped.dedup();
        assert_eq!(stems.len(), deduped.len());
    }

    #[test]
    fn test_source_file_removed_on_drop() {
        let scratch = test_scratch();
        let path = {
            let mut artifacts = ArtifactSet::new();
            let path = artifacts
                .write_source(&scratch, "py", "print('hi')")
                .unwrap();
            assert!(path.exists());
            assert_eq!(fs::read_to_string(&path).unwrap(), "print('hi')");
            path
        };
        assert!(!path.exists());
        fs::remove_dir_all(&scratch).unwrap();
    }

    #[test]
    fn test_missing_artifact_is_not_an_error() {
        let scratch = test_scratch();
        let mut artifacts = ArtifactSet::new();
        // Tracked but never produced, as after a failed compile.
        artifacts.track_file(scratch.join("never_created.bin"));
        drop(artifacts);
        fs::remove_dir_all(&scratch).unwrap();
    }

    #[test]
    fn test_dir_removed_recursively() {
        let scratch = test_scratch();
        let dir = {
            let mut artifacts = ArtifactSet::new();
            let dir = artifacts.create_dir(&scratch).unwrap();
            fs::write(dir.join("Main.java"), "class Main {}").unwrap();
            fs::write(dir.join("Main.class"), b"\xca\xfe\xba\xbe").unwrap();
            dir
        };
        assert!(!dir.exists());
        fs::remove_dir_all(&scratch).unwrap();
    }

    #[test]
    fn test_two_sets_do_not_share_paths() {
        let scratch = test_scratch();
        let mut a = ArtifactSet::new();
        let mut b = ArtifactSet::new();
        let pa = a.write_source(&scratch, "js", "1").unwrap();
        let pb = b.write_source(&scratch, "js", "2").unwrap();
        assert_ne!(pa, pb);
        drop(a);
        assert!(!pa.exists());
        assert!(pb.exists());
        drop(b);
        fs::remove_dir_all(&scratch).unwrap();
    }
}
