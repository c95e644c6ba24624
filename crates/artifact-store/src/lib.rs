//! Screenshot persistence with name-plus-timestamp file naming.
//!
//! Failing probes capture a screenshot for diagnosis; files land under a
//! fixed root as `{name}-{iso-timestamp}.png` with `:` and `.` in the
//! timestamp replaced by `-` so the names stay filesystem-safe everywhere.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::{SecondsFormat, Utc};
use page_port::PagePort;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum ArtifactError {
    /// The engine failed to produce a screenshot
    #[error("screenshot capture failed: {0}")]
    Capture(String),

    #[error("artifact i/o error: {0}")]
    Io(#[from] std::io::Error),
}

/// Directory screenshots are written into.
pub struct ArtifactStore {
    root: PathBuf,
}

impl ArtifactStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Capture the page and write `{name}-{timestamp}.png` under the root.
    pub async fn capture(&self, page: &dyn PagePort, name: &str) -> Result<PathBuf, ArtifactError> {
        let bytes = page
            .screenshot()
            .await
            .map_err(|err| ArtifactError::Capture(err.to_string()))?;
        let path = self
            .root
            .join(format!("{name}-{}.png", sanitize(&current_timestamp())));
        write_atomic(&path, &bytes)?;
        debug!(path = %path.display(), size = bytes.len(), "screenshot captured");
        Ok(path)
    }
}

/// Current wall-clock time as an ISO-8601 string.
pub fn current_timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Replace the characters in an ISO timestamp that are unsafe in file names.
pub fn sanitize(timestamp: &str) -> String {
    timestamp.replace([':', '.'], "-")
}

fn write_atomic(path: &Path, data: &[u8]) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let tmp = path.with_extension("tmp");
    let mut file = OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open(&tmp)?;
    file.write_all(data)?;
    file.sync_all()?;
    fs::rename(tmp, path)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use page_sim::PageSim;

    #[test]
    fn sanitize_strips_colons_and_periods() {
        let cleaned = sanitize("2026-08-07T10:00:00.123Z");
        assert!(!cleaned.contains(':'));
        assert!(!cleaned.contains('.'));
        assert_eq!(cleaned, "2026-08-07T10-00-00-123Z");
    }

    #[test]
    fn current_timestamp_is_iso_utc() {
        let ts = current_timestamp();
        assert!(ts.ends_with('Z'));
        assert!(ts.contains('T'));
    }

    #[tokio::test]
    async fn capture_writes_named_png() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = ArtifactStore::new(dir.path());
        let sim = PageSim::builder().title("Demo Page").build();

        let path = store.capture(&sim, "form-submission").await.expect("capture");

        let file_name = path.file_name().unwrap().to_str().unwrap();
        assert!(file_name.starts_with("form-submission-"));
        assert!(file_name.ends_with(".png"));
        let bytes = fs::read(&path).expect("read artifact");
        assert!(bytes.starts_with(&[0x89, b'P', b'N', b'G']));
    }
}
