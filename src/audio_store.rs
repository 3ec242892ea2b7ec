use std::io;
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};

use chrono::Utc;
use tokio::io::AsyncWriteExt;
use tracing::debug;
use uuid::Uuid;

/// Local directory holding scratch uploads and served synthesis output.
///
/// Scratch uploads are isolated under a per-request token so that two
/// concurrent uploads with the same caller-supplied file name never share a
/// path. Output files live in the directory root, named by timestamp, and
/// are served statically.
pub struct AudioStore {
    root: PathBuf,
}

/// A scratch copy of one upload, removed after the transcription attempt.
pub struct StagedUpload {
    dir: PathBuf,
    path: PathBuf,
}

impl StagedUpload {
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Delete the scratch copy and its token directory.
    pub async fn remove(self) -> io::Result<()> {
        debug!(path = %self.path.display(), "Removing scratch upload");
        tokio::fs::remove_dir_all(&self.dir).await
    }
}

impl AudioStore {
    pub fn new(root: impl Into<PathBuf>) -> io::Result<Self> {
        let root = root.into();
        std::fs::create_dir_all(&root)?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Write an uploaded audio buffer to scratch space.
    ///
    /// Only the final path component of `file_name` is used, so callers
    /// cannot escape the store directory.
    pub async fn stage_upload(&self, file_name: &str, data: &[u8]) -> io::Result<StagedUpload> {
        let safe_name = Path::new(file_name)
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| {
                io::Error::new(io::ErrorKind::InvalidInput, "invalid upload file name")
            })?;

        let dir = self.root.join(Uuid::new_v4().to_string());
        tokio::fs::create_dir_all(&dir).await?;
        let path = dir.join(safe_name);
        tokio::fs::write(&path, data).await?;

        debug!(path = %path.display(), bytes = data.len(), "Staged upload to scratch");

        Ok(StagedUpload {
            dir,
            path,
        })
    }

    /// Write synthesized audio under a timestamped name and return the name.
    ///
    /// The file is created with `create_new`, bumping the millisecond value
    /// until an unused name is found, so two writes in the same millisecond
    /// still produce distinct files.
    pub async fn write_output(&self, data: &[u8]) -> io::Result<String> {
        let mut millis = Utc::now().timestamp_millis();
        loop {
            let name = format!("output_{}.wav", millis);
            let path = self.root.join(&name);
            match tokio::fs::OpenOptions::new()
                .write(true)
                .create_new(true)
                .open(&path)
                .await
            {
                Ok(mut file) => {
                    file.write_all(data).await?;
                    file.flush().await?;
                    debug!(name = %name, bytes = data.len(), "Wrote synthesis output");
                    return Ok(name);
                }
                Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {
                    millis += 1;
                }
                Err(e) => return Err(e),
            }
        }
    }

    /// Delete output files whose modification time is at or past `max_age`.
    /// Returns the number of files removed. Scratch token directories are
    /// left alone.
    pub async fn prune_outputs_older_than(&self, max_age: Duration) -> io::Result<usize> {
        let cutoff = match SystemTime::now().checked_sub(max_age) {
            Some(t) => t,
            None => return Ok(0),
        };

        let mut removed = 0;
        let mut entries = tokio::fs::read_dir(&self.root).await?;
        while let Some(entry) = entries.next_entry().await? {
            let file_name = entry.file_name();
            let name = match file_name.to_str() {
                Some(n) => n,
                None => continue,
            };
            if !name.starts_with("output_") || !name.ends_with(".wav") {
                continue;
            }
            let metadata = match entry.metadata().await {
                Ok(m) if m.is_file() => m,
                _ => continue,
            };
            let modified = match metadata.modified() {
                Ok(t) => t,
                Err(_) => continue,
            };
            if modified <= cutoff && tokio::fs::remove_file(entry.path()).await.is_ok() {
                debug!(name = %name, "Pruned expired output file");
                removed += 1;
            }
        }

        Ok(removed)
    }
}
