use std::io::Cursor;
use std::path::{Path, PathBuf};

use tokio::process::Command;
use tracing::debug;

use crate::error::ReadError;

/// Turns a bookmark store file into a generic plist value tree.
///
/// The default decoder shells out to the system `plutil`; substituting a
/// native binary-plist parser only requires another implementation of
/// this trait.
#[allow(async_fn_in_trait)]
pub trait SourceDecoder {
    async fn decode(&self, path: &Path) -> Result<plist::Value, ReadError>;
}

/// Decoder backed by `plutil`, which normalizes both binary and XML
/// property lists to XML on stdout.
#[derive(Debug, Clone)]
pub struct PlutilDecoder {
    binary: PathBuf,
}

impl PlutilDecoder {
    pub fn with_binary(binary: impl Into<PathBuf>) -> Self {
        Self {
            binary: binary.into(),
        }
    }
}

impl Default for PlutilDecoder {
    fn default() -> Self {
        Self::with_binary("/usr/bin/plutil")
    }
}

impl SourceDecoder for PlutilDecoder {
    async fn decode(&self, path: &Path) -> Result<plist::Value, ReadError> {
        let tool = self.binary.display().to_string();
        debug!(%tool, path = %path.display(), "converting bookmarks file");

        // Blocks until plutil exits and its stdout is fully captured.
        let output = Command::new(&self.binary)
            .args(["-convert", "xml1", "-o", "-"])
            .arg(path)
            .output()
            .await
            .map_err(|source| ReadError::ConverterSpawn {
                tool: tool.clone(),
                source,
            })?;
        if !output.status.success() {
            return Err(ReadError::ConverterFailed {
                tool,
                status: output.status,
            });
        }

        Ok(plist::Value::from_reader_xml(Cursor::new(output.stdout))?)
    }
}
