use crate::{FileWriter, WriteMode};
use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use std::path::Path;
use tokio::fs::{create_dir_all, OpenOptions};
use tokio::io::AsyncWriteExt;

/// Writes save payloads to the local filesystem.
pub struct FsFileWriter;

#[async_trait]
impl FileWriter for FsFileWriter {
    async fn write_file(
        &self,
        file_name: &str,
        directory: &Path,
        payload: &str,
        mode: WriteMode,
    ) -> Result<()> {
        let trimmed = file_name.trim();
        if trimmed.is_empty() {
            return Err(anyhow!("File name is empty"));
        }

        if !directory.as_os_str().is_empty() && !directory.exists() {
            create_dir_all(directory)
                .await
                .with_context(|| format!("Could not create {}", directory.display()))?;
        }

        let path = directory.join(trimmed);
        let mut options = OpenOptions::new();
        options.create(true);
        match mode {
            WriteMode::Overwrite => options.write(true).truncate(true),
            WriteMode::Append => options.append(true),
        };

        let mut file = options
            .open(&path)
            .await
            .with_context(|| format!("Could not open {}", path.display()))?;
        file.write_all(payload.as_bytes()).await?;
        file.flush().await?;

        tracing::info!(
            path = %path.display(),
            mode = %mode,
            bytes = payload.len(),
            "Payload written"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn append_keeps_previous_content() {
        let tmp = tempdir().unwrap();
        let writer = FsFileWriter;

        writer
            .write_file("out.txt", tmp.path(), "first\n", WriteMode::Append)
            .await
            .unwrap();
        writer
            .write_file("out.txt", tmp.path(), "second\n", WriteMode::Append)
            .await
            .unwrap();

        let content = tokio::fs::read_to_string(tmp.path().join("out.txt"))
            .await
            .unwrap();
        assert_eq!(content, "first\nsecond\n");
    }

    #[tokio::test]
    async fn overwrite_replaces_previous_content() {
        let tmp = tempdir().unwrap();
        let writer = FsFileWriter;

        writer
            .write_file("out.txt", tmp.path(), "a much longer line\n", WriteMode::Append)
            .await
            .unwrap();
        writer
            .write_file("out.txt", tmp.path(), "short", WriteMode::Overwrite)
            .await
            .unwrap();

        let content = tokio::fs::read_to_string(tmp.path().join("out.txt"))
            .await
            .unwrap();
        assert_eq!(content, "short");
    }

    #[tokio::test]
    async fn creates_missing_directory() {
        let tmp = tempdir().unwrap();
        let nested = tmp.path().join("a").join("b");

        FsFileWriter
            .write_file("log.txt", &nested, "X", WriteMode::Overwrite)
            .await
            .unwrap();

        assert!(nested.join("log.txt").exists());
    }

    #[tokio::test]
    async fn rejects_blank_file_name() {
        let tmp = tempdir().unwrap();
        assert!(FsFileWriter
            .write_file("  ", tmp.path(), "X", WriteMode::Append)
            .await
            .is_err());
    }
}
