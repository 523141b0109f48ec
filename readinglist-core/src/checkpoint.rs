use std::io::ErrorKind;
use std::path::Path;

use chrono::{DateTime, Utc};
use tracing::debug;

use crate::error::CheckpointError;
use crate::reader::parse_sync_date;

/// Format used to render the checkpoint; whole-second precision.
pub const CHECKPOINT_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Reads the last sync checkpoint. A missing or empty file is not an
/// error; the caller falls back to the epoch start.
pub async fn load(path: &Path) -> Result<Option<DateTime<Utc>>, CheckpointError> {
    let text = match tokio::fs::read_to_string(path).await {
        Ok(text) => text,
        Err(err) if err.kind() == ErrorKind::NotFound => return Ok(None),
        Err(err) => return Err(err.into()),
    };
    let line = text.lines().next().unwrap_or("").trim();
    if line.is_empty() {
        return Ok(None);
    }
    let parsed =
        parse_sync_date(line).map_err(|_| CheckpointError::Invalid(line.to_owned()))?;
    Ok(Some(parsed))
}

/// Overwrites the checkpoint with `instant`, creating parent directories
/// as needed. Written before any submission so a crash mid-run re-sends a
/// few articles instead of dropping them.
pub async fn store(path: &Path, instant: DateTime<Utc>) -> Result<(), CheckpointError> {
    if let Some(parent) = path.parent() {
        tokio::fs::create_dir_all(parent).await?;
    }
    let line = instant.format(CHECKPOINT_FORMAT).to_string();
    tokio::fs::write(path, &line).await?;
    debug!(path = %path.display(), %line, "checkpoint updated");
    Ok(())
}
