//! Embedded sample descriptions
//!
//! `softproof init` writes a small working set (paper, ink, light, a batch
//! script and the default config) so a first render needs no other files.

use rust_embed::RustEmbed;
use std::borrow::Cow;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Sample descriptions, batch script and config
#[derive(RustEmbed)]
#[folder = "assets/"]
#[include = "*.p"]
#[include = "*.i"]
#[include = "*.l"]
#[include = "*.scr"]
#[include = "*.yaml"]
struct EmbeddedSamples;

/// Report of init (extraction) operations
#[derive(Debug, Default)]
pub struct InitReport {
    pub written: Vec<String>,
    pub skipped: Vec<String>,
}

/// Extracts the embedded samples into a directory
pub struct SampleAssets {
    dir: PathBuf,
}

impl SampleAssets {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Names of the embedded samples, sorted
    pub fn list_embedded() -> Vec<String> {
        let mut files: Vec<String> = EmbeddedSamples::iter().map(|s| s.to_string()).collect();
        files.sort();
        files
    }

    /// Contents of one embedded sample
    pub fn read_embedded(name: &str) -> Option<Cow<'static, [u8]>> {
        EmbeddedSamples::get(name).map(|f| f.data)
    }

    /// Write every sample into the directory, creating it if needed.
    ///
    /// Existing files are left alone unless `force` is set.
    pub fn init(&self, force: bool) -> io::Result<InitReport> {
        let mut report = InitReport::default();
        fs::create_dir_all(&self.dir)?;

        for name in Self::list_embedded() {
            let path = self.dir.join(&name);
            if !force && path.exists() {
                report.skipped.push(path.display().to_string());
                continue;
            }
            if let Some(data) = Self::read_embedded(&name) {
                fs::write(&path, &*data)?;
                tracing::debug!(path = %path.display(), "Extracted sample");
                report.written.push(path.display().to_string());
            }
        }

        Ok(report)
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ProofConfig;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_embedded_samples() {
        assert_eq!(
            SampleAssets::list_embedded(),
            vec!["ink.i", "light.l", "paper.p", "proof.scr", "softproof.yaml"]
        );
    }

    #[test]
    fn test_embedded_config_matches_defaults() {
        let data = SampleAssets::read_embedded("softproof.yaml").unwrap();
        let text = std::str::from_utf8(&data).unwrap();
        assert_eq!(ProofConfig::parse(text).unwrap(), ProofConfig::default());
    }

    #[test]
    fn test_init_skips_existing_unless_forced() {
        let dir = tempfile::tempdir().unwrap();
        let assets = SampleAssets::new(dir.path().join("samples"));

        let first = assets.init(false).unwrap();
        assert_eq!(first.written.len(), 5);
        assert!(first.skipped.is_empty());

        let paper = assets.dir().join("paper.p");
        fs::write(&paper, "# edited\n").unwrap();

        let second = assets.init(false).unwrap();
        assert!(second.written.is_empty());
        assert_eq!(second.skipped.len(), 5);
        assert_eq!(fs::read_to_string(&paper).unwrap(), "# edited\n");

        let forced = assets.init(true).unwrap();
        assert_eq!(forced.written.len(), 5);
        assert_ne!(fs::read_to_string(&paper).unwrap(), "# edited\n");
    }
}
