use thiserror::Error;

/// Errors raised while reading or querying the bookmark store.
#[derive(Debug, Error)]
pub enum ReadError {
    #[error("failed to run converter `{tool}`: {source}")]
    ConverterSpawn {
        tool: String,
        #[source]
        source: std::io::Error,
    },
    #[error("converter `{tool}` exited with {status}")]
    ConverterFailed {
        tool: String,
        status: std::process::ExitStatus,
    },
    #[error("bookmarks parsing error: {0}")]
    Parse(#[from] plist::Error),
    #[error("bookmarks file is not a plist dictionary")]
    UnexpectedShape,
    #[error("bookmark entry is missing required field `{0}`")]
    MissingField(&'static str),
    #[error("unknown sort field `{0}`")]
    UnknownSortField(String),
    #[error("unknown show filter `{0}`")]
    UnknownShowFilter(String),
    #[error("invalid sync date `{0}`")]
    InvalidSyncDate(String),
}

/// Errors returned by the Instapaper API client.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),
    #[error("authentication rejected ({status}): {message}")]
    Auth { status: u16, message: String },
    #[error("submission rejected ({status}): {message}")]
    Rejected { status: u16, message: String },
}

#[derive(Debug, Error)]
pub enum CheckpointError {
    #[error("checkpoint i/o error: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid checkpoint timestamp `{0}`")]
    Invalid(String),
}

#[derive(Debug, Error)]
pub enum CredentialsError {
    #[error("credentials i/o error: {0}")]
    Io(#[from] std::io::Error),
    #[error("no username:password line found in {0}")]
    NoLoginLine(String),
}
