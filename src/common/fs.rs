use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use serde::Serialize;
use tempfile::NamedTempFile;

/// Write-then-rename wrapper for atomic outputs.
struct PendingWrite {
    target: PathBuf,
    tmp: NamedTempFile,
}

impl PendingWrite {
    /// Open a temp file next to `target`, refusing to clobber it unless `force`.
    fn open(target: &Path, force: bool) -> Result<Self> {
        let parent = target.parent().filter(|p| !p.as_os_str().is_empty()).unwrap_or(Path::new("."));
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create dir {}", parent.display()))?;
        if !force && target.exists() {
            bail!("Refusing to overwrite existing file: {} (use --force)", target.display());
        }
        let tmp = NamedTempFile::new_in(parent).context("create temp file")?;
        Ok(Self { target: target.to_path_buf(), tmp })
    }

    /// Flush and move the temp file into place.
    fn finalize(self) -> Result<()> {
        self.tmp.as_file().sync_all().ok(); // best-effort fsync file
        self.tmp.persist(&self.target)
            .with_context(|| format!("rename to {}", self.target.display()))?;
        if let Some(dir) = self.target.parent() {
            let _ = File::open(dir).and_then(|f| f.sync_all());
        }
        Ok(())
    }
}

/// Serialize `value` as pretty JSON to `path` atomically.
pub fn write_json_atomic<T: Serialize>(path: &Path, value: &T, force: bool) -> Result<()> {
    let mut pending = PendingWrite::open(path, force)?;
    serde_json::to_writer_pretty(&mut pending.tmp, value)
        .with_context(|| format!("serialize {}", path.display()))?;
    pending.tmp.write_all(b"\n")?;
    pending.finalize()
}
