use std::path::{Path, PathBuf};
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use plist::Value;
use tracing::debug;

use crate::article::Article;
use crate::decoder::{PlutilDecoder, SourceDecoder};
use crate::error::ReadError;

/// Declared title of the reading list section inside the bookmarks file.
pub const READING_LIST_TITLE: &str = "com.apple.ReadingList";

/// Which articles `read` keeps, based on the last-viewed date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Show {
    #[default]
    All,
    Unread,
    Read,
}

impl FromStr for Show {
    type Err = ReadError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "all" => Ok(Self::All),
            "unread" => Ok(Self::Unread),
            "read" => Ok(Self::Read),
            other => Err(ReadError::UnknownShowFilter(other.to_owned())),
        }
    }
}

/// Article field used as the sort key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortField {
    Title,
    Url,
    Preview,
    #[default]
    Date,
    Added,
    Viewed,
    Uuid,
}

impl FromStr for SortField {
    type Err = ReadError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "title" => Ok(Self::Title),
            "url" => Ok(Self::Url),
            "preview" => Ok(Self::Preview),
            "date" => Ok(Self::Date),
            "added" => Ok(Self::Added),
            "viewed" => Ok(Self::Viewed),
            "uuid" => Ok(Self::Uuid),
            other => Err(ReadError::UnknownSortField(other.to_owned())),
        }
    }
}

/// Options for [`ReadingListReader::read`].
#[derive(Debug, Clone)]
pub struct ReadOptions {
    pub show: Show,
    pub sortfield: SortField,
    pub ascending: bool,
    /// strftime-style format; when set, all date fields in the output are
    /// rendered as text, unset dates as empty text.
    pub dateformat: Option<String>,
    /// Keep only articles fetched or added on or after this instant.
    pub syncdate: Option<DateTime<Utc>>,
}

impl Default for ReadOptions {
    fn default() -> Self {
        Self {
            show: Show::All,
            sortfield: SortField::Date,
            ascending: true,
            dateformat: None,
            syncdate: None,
        }
    }
}

/// Parses a sync date given as either a date-time or a bare date
/// (interpreted as midnight UTC).
pub fn parse_sync_date(text: &str) -> Result<DateTime<Utc>, ReadError> {
    let trimmed = text.trim();
    if let Ok(at) = NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%d %H:%M:%S") {
        return Ok(at.and_utc());
    }
    if let Ok(day) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return Ok(day.and_time(NaiveTime::MIN).and_utc());
    }
    Err(ReadError::InvalidSyncDate(trimmed.to_owned()))
}

/// Reads the reading list section of a Safari bookmarks file.
///
/// Construction decodes the whole store once; the resulting articles are
/// only reachable through [`read`](Self::read), which always hands out a
/// fresh copy.
#[derive(Debug)]
pub struct ReadingListReader {
    articles: Vec<Article>,
}

impl ReadingListReader {
    /// Opens the bookmark store with the system `plutil` decoder. `None`
    /// means the current user's Safari bookmarks file.
    pub async fn open(input: Option<&Path>) -> Result<Self, ReadError> {
        Self::open_with(&PlutilDecoder::default(), input).await
    }

    pub async fn open_with<D: SourceDecoder>(
        decoder: &D,
        input: Option<&Path>,
    ) -> Result<Self, ReadError> {
        let path = match input {
            Some(path) => path.to_path_buf(),
            None => default_bookmarks_path(),
        };
        let value = decoder.decode(&path).await?;
        Self::from_value(value)
    }

    /// Builds a reader from an already decoded plist tree.
    pub fn from_value(value: Value) -> Result<Self, ReadError> {
        let root = value.as_dictionary().ok_or(ReadError::UnexpectedShape)?;
        let reading_list = root
            .get("Children")
            .and_then(Value::as_array)
            .and_then(|children| {
                children.iter().filter_map(Value::as_dictionary).find(|child| {
                    child.get("Title").and_then(Value::as_string) == Some(READING_LIST_TITLE)
                })
            })
            .and_then(|section| section.get("Children"))
            .and_then(Value::as_array);

        // A missing reading list section just means there are no articles.
        let mut articles = Vec::new();
        if let Some(items) = reading_list {
            for item in items.iter().filter_map(Value::as_dictionary) {
                articles.push(Article::from_plist_item(item)?);
            }
        }
        debug!(count = articles.len(), "loaded reading list articles");

        Ok(Self { articles })
    }

    /// Filters, sorts, and formats a fresh copy of the article list.
    /// The stored list is never mutated.
    pub fn read(&self, options: &ReadOptions) -> Vec<Article> {
        let mut articles = self.articles.clone();

        // Keep anything fetched OR added on or after the sync date. The OR
        // means a duplicate submission is preferred over a lost article.
        if let Some(syncdate) = options.syncdate {
            articles.retain(|article| {
                article.added.sort_instant() >= syncdate
                    || article.date.sort_instant() >= syncdate
            });
        }

        match options.show {
            Show::All => {}
            Show::Unread => articles.retain(|article| article.viewed.is_undefined()),
            Show::Read => articles.retain(|article| !article.viewed.is_undefined()),
        }

        // Stable ascending sort; descending output is the exact reverse,
        // so equal keys flip relative order too.
        sort_articles(&mut articles, options.sortfield);
        if !options.ascending {
            articles.reverse();
        }

        if let Some(format) = options.dateformat.as_deref() {
            for article in &mut articles {
                article.date = article.date.render(format);
                article.added = article.added.render(format);
                article.viewed = article.viewed.render(format);
            }
        }

        articles
    }
}

fn sort_articles(articles: &mut [Article], field: SortField) {
    match field {
        SortField::Title => articles.sort_by(|a, b| a.title.cmp(&b.title)),
        SortField::Url => articles.sort_by(|a, b| a.url.cmp(&b.url)),
        SortField::Preview => articles.sort_by(|a, b| a.preview.cmp(&b.preview)),
        SortField::Date => articles.sort_by_key(|a| a.date.sort_instant()),
        SortField::Added => articles.sort_by_key(|a| a.added.sort_instant()),
        SortField::Viewed => articles.sort_by_key(|a| a.viewed.sort_instant()),
        SortField::Uuid => articles.sort_by(|a, b| a.uuid.cmp(&b.uuid)),
    }
}

fn default_bookmarks_path() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("Library/Safari/Bookmarks.plist")
}
