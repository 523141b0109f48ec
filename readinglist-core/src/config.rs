use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::error::CredentialsError;

pub const APP_DIR: &str = "readinglist2instapaper";
pub const CREDENTIALS_FILE: &str = "instapaperrc";
pub const CHECKPOINT_FILE: &str = "lastsyncdate";

/// Per-user configuration directory for the sync tool.
pub fn config_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(APP_DIR))
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

/// Loads credentials from a `username:password` file. The first line with
/// a separator and a non-empty username wins; the password may be empty.
/// A missing file yields `None` so the caller can require explicit flags.
pub async fn load_credentials(path: &Path) -> Result<Option<Credentials>, CredentialsError> {
    let text = match tokio::fs::read_to_string(path).await {
        Ok(text) => text,
        Err(err) if err.kind() == ErrorKind::NotFound => return Ok(None),
        Err(err) => return Err(err.into()),
    };

    for line in text.lines() {
        if let Some((username, password)) = line.split_once(':') {
            let username = username.trim();
            if username.is_empty() {
                continue;
            }
            return Ok(Some(Credentials {
                username: username.to_owned(),
                password: password.trim().to_owned(),
            }));
        }
    }

    Err(CredentialsError::NoLoginLine(path.display().to_string()))
}
