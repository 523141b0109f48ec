use chrono::{DateTime, Utc};
use plist::{Dictionary, Value};
use serde::{Deserialize, Serialize};

use crate::error::ReadError;

/// One date field on an [`Article`].
///
/// The bookmark store either carries a real instant or leaves the date
/// genuinely unset. `Text` only appears in `read` output when a date
/// format was requested; unset dates render as empty text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DateField {
    Undefined,
    At(DateTime<Utc>),
    Text(String),
}

impl DateField {
    pub(crate) fn from_plist(dict: &Dictionary, key: &str) -> Self {
        match dict.get(key).and_then(Value::as_date) {
            Some(date) => Self::At(DateTime::<Utc>::from(std::time::SystemTime::from(date))),
            None => Self::Undefined,
        }
    }

    /// Instant used for sort and filter comparisons. Unset dates compare
    /// as the Unix epoch so they order before any real instant.
    pub fn sort_instant(&self) -> DateTime<Utc> {
        match self {
            Self::At(at) => *at,
            Self::Undefined | Self::Text(_) => DateTime::<Utc>::UNIX_EPOCH,
        }
    }

    pub fn is_undefined(&self) -> bool {
        matches!(self, Self::Undefined)
    }

    /// Renders the field with a strftime-style format string.
    pub fn render(&self, format: &str) -> Self {
        match self {
            Self::At(at) => Self::Text(at.format(format).to_string()),
            Self::Undefined => Self::Text(String::new()),
            Self::Text(text) => Self::Text(text.clone()),
        }
    }
}

/// A single Reading List entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Article {
    pub title: String,
    pub url: String,
    pub preview: String,
    /// Last fetched.
    pub date: DateField,
    /// Date added.
    pub added: DateField,
    /// Last viewed; unset means the article was never opened.
    pub viewed: DateField,
    pub uuid: String,
    pub synckey: Option<String>,
    pub syncserverid: Option<String>,
}

impl Article {
    /// Builds an article from one `Children` entry of the reading list
    /// section. Title and URL are required; everything else falls back to
    /// empty or unset.
    pub fn from_plist_item(item: &Dictionary) -> Result<Self, ReadError> {
        let title = item
            .get("URIDictionary")
            .and_then(Value::as_dictionary)
            .and_then(|uri| uri.get("title"))
            .and_then(Value::as_string)
            .ok_or(ReadError::MissingField("URIDictionary.title"))?
            .to_owned();
        let url = item
            .get("URLString")
            .and_then(Value::as_string)
            .ok_or(ReadError::MissingField("URLString"))?
            .to_owned();

        let reading_list = item.get("ReadingList").and_then(Value::as_dictionary);
        let preview = reading_list
            .and_then(|rl| rl.get("PreviewText"))
            .and_then(Value::as_string)
            .unwrap_or_default()
            .to_owned();
        let (date, added, viewed) = match reading_list {
            Some(rl) => (
                DateField::from_plist(rl, "DateLastFetched"),
                DateField::from_plist(rl, "DateAdded"),
                DateField::from_plist(rl, "DateLastViewed"),
            ),
            None => (
                DateField::Undefined,
                DateField::Undefined,
                DateField::Undefined,
            ),
        };

        let uuid = item
            .get("WebBookmarkUUID")
            .and_then(Value::as_string)
            .unwrap_or_default()
            .to_owned();
        let sync = item.get("Sync").and_then(Value::as_dictionary);
        let synckey = sync
            .and_then(|s| s.get("Key"))
            .and_then(Value::as_string)
            .map(ToOwned::to_owned);
        let syncserverid = sync
            .and_then(|s| s.get("ServerID"))
            .and_then(Value::as_string)
            .map(ToOwned::to_owned);

        Ok(Self {
            title,
            url,
            preview,
            date,
            added,
            viewed,
            uuid,
            synckey,
            syncserverid,
        })
    }
}
