//! Split file writer.
//!
//! Records go to `<policy_dir>/<split>.json` as a pretty-printed JSON array.
//! The file is staged in a temp file next to its destination and renamed into
//! place, so a failed write never leaves a truncated split behind.
use serde::Serialize;
use std::fs;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::info;

use crate::error::{Error, Result};
use crate::types::Split;

pub fn split_path(policy_dir: &Path, split: Split) -> PathBuf {
    policy_dir.join(split.file_name())
}

/// Write `records` for `split`, creating `policy_dir` if needed and replacing
/// any existing file.
pub fn write_split<T: Serialize>(policy_dir: &Path, split: Split, records: &[T]) -> Result<PathBuf> {
    let io_err = |path: &Path| {
        let path = path.to_path_buf();
        move |source: std::io::Error| Error::Io { path, source }
    };
    fs::create_dir_all(policy_dir).map_err(io_err(policy_dir))?;

    let dest = split_path(policy_dir, split);
    let staged = NamedTempFile::new_in(policy_dir).map_err(io_err(policy_dir))?;
    {
        let mut out = BufWriter::new(staged.as_file());
        serde_json::to_writer_pretty(&mut out, records).map_err(|source| Error::Json { path: dest.clone(), source })?;
        out.write_all(b"\n").map_err(io_err(&dest))?;
        out.flush().map_err(io_err(&dest))?;
    }
    staged.persist(&dest).map_err(|e| Error::Io { path: dest.clone(), source: e.error })?;

    info!(path = %dest.display(), records = records.len(), "Wrote split");
    Ok(dest)
}
