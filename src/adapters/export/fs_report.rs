//! Implements ReportPort by writing report files into a directory.

use crate::domain::DomainError;
use crate::ports::ReportPort;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::info;

/// File-system report sink. One file per export.
pub struct FsReportSink {
    base_dir: PathBuf,
}

impl FsReportSink {
    pub fn new(base_dir: impl AsRef<Path>) -> Self {
        Self {
            base_dir: base_dir.as_ref().to_path_buf(),
        }
    }
}

#[async_trait::async_trait]
impl ReportPort for FsReportSink {
    /// Write-replace: temp file, sync, then rename, so a partial report never appears
    /// under the final name.
    async fn save(&self, file_name: &str, contents: &str) -> Result<PathBuf, DomainError> {
        fs::create_dir_all(&self.base_dir)
            .await
            .map_err(|e| DomainError::Export(format!("create reports dir: {}", e)))?;

        let path = self.base_dir.join(file_name);
        let temp_path = path.with_extension("csv.tmp");
        let mut f = fs::File::create(&temp_path)
            .await
            .map_err(|e| DomainError::Export(format!("create temp file: {}", e)))?;
        f.write_all(contents.as_bytes())
            .await
            .map_err(|e| DomainError::Export(format!("write temp file: {}", e)))?;
        f.sync_all()
            .await
            .map_err(|e| DomainError::Export(format!("sync temp file: {}", e)))?;
        drop(f);

        fs::rename(&temp_path, &path)
            .await
            .map_err(|e| DomainError::Export(format!("rename failed: {}", e)))?;

        let abs_path = path.canonicalize().unwrap_or_else(|_| path.clone());
        info!(path = %abs_path.display(), bytes = contents.len(), "report written");
        Ok(abs_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_save_creates_dir_and_file() {
        let dir = tempfile::tempdir().unwrap();
        let sink = FsReportSink::new(dir.path().join("reports"));
        let path = sink
            .save("MrDaniel_Report_1.csv", "Title,Category,Verified,Time,URL\n")
            .await
            .unwrap();
        assert!(path.ends_with("MrDaniel_Report_1.csv"));
        let written = std::fs::read_to_string(&path).unwrap();
        assert_eq!(written, "Title,Category,Verified,Time,URL\n");
        assert!(!dir.path().join("reports/MrDaniel_Report_1.csv.tmp").exists());
    }
}
