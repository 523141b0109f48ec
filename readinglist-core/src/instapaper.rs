use reqwest::{Client, Response, StatusCode};
use tracing::debug;

use crate::error::ApiError;

const DEFAULT_BASE_URL: &str = "https://www.instapaper.com";

/// Minimal client for the Instapaper simple API: authenticate once, then
/// submit one article per call. No retries, no batching.
#[derive(Debug, Clone)]
pub struct Instapaper {
    client: Client,
    base_url: String,
    username: String,
    password: String,
}

impl Instapaper {
    pub fn new(client: Client, username: impl Into<String>, password: impl Into<String>) -> Self {
        Self::with_base_url(client, DEFAULT_BASE_URL, username, password)
    }

    pub fn with_base_url(
        client: Client,
        base_url: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            client,
            base_url: base_url.into(),
            username: username.into(),
            password: password.into(),
        }
    }

    /// Verifies the credentials. HTTP 200 means the account is valid.
    pub async fn authenticate(&self) -> Result<(), ApiError> {
        let response = self
            .client
            .post(format!("{}/api/authenticate", self.base_url))
            .form(&[
                ("username", self.username.as_str()),
                ("password", self.password.as_str()),
            ])
            .send()
            .await?;

        let status = response.status();
        match status {
            StatusCode::OK => Ok(()),
            StatusCode::FORBIDDEN => Err(ApiError::Auth {
                status: status.as_u16(),
                message: describe(status, response).await,
            }),
            _ => Err(ApiError::Rejected {
                status: status.as_u16(),
                message: describe(status, response).await,
            }),
        }
    }

    /// Submits one article. HTTP 201 means it was added; anything else is
    /// fatal for the current run.
    pub async fn add(&self, url: &str, title: &str, selection: &str) -> Result<(), ApiError> {
        let response = self
            .client
            .post(format!("{}/api/add", self.base_url))
            .form(&[
                ("username", self.username.as_str()),
                ("password", self.password.as_str()),
                ("url", url),
                ("title", title),
                ("selection", selection),
            ])
            .send()
            .await?;

        let status = response.status();
        match status {
            StatusCode::CREATED => {
                debug!(url, "article added");
                Ok(())
            }
            StatusCode::FORBIDDEN => Err(ApiError::Auth {
                status: status.as_u16(),
                message: describe(status, response).await,
            }),
            _ => Err(ApiError::Rejected {
                status: status.as_u16(),
                message: describe(status, response).await,
            }),
        }
    }
}

/// Human-readable message for an API response, preferring the documented
/// status meanings over whatever is in the body.
async fn describe(status: StatusCode, response: Response) -> String {
    let known = match status.as_u16() {
        200 => Some("OK."),
        201 => Some("URL successfully added."),
        400 => Some("Bad request or exceeded the rate limit."),
        403 => Some("Invalid username or password."),
        500 => Some("The service encountered an error."),
        _ => None,
    };
    match known {
        Some(message) => message.to_owned(),
        None => response.text().await.unwrap_or_default(),
    }
}
