pub mod article;
pub mod checkpoint;
pub mod config;
pub mod decoder;
pub mod error;
pub mod instapaper;
pub mod reader;

pub use article::{Article, DateField};
pub use config::{load_credentials, Credentials};
pub use decoder::{PlutilDecoder, SourceDecoder};
pub use error::{ApiError, CheckpointError, CredentialsError, ReadError};
pub use instapaper::Instapaper;
pub use reader::{parse_sync_date, ReadOptions, ReadingListReader, Show, SortField};
