use async_trait::async_trait;
use reqwest::StatusCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("request failed: status={status}")]
    BadStatus { status: StatusCode },
}

/// Retrieves the vector markup for one icon URL.
#[async_trait]
pub trait IconFetcher {
    async fn fetch_svg(&self, url: &str) -> Result<String, FetchError>;
}

/// Single GET per icon, no retries. Timeouts are whatever the client defaults to.
#[derive(Clone, Default)]
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl IconFetcher for HttpFetcher {
    async fn fetch_svg(&self, url: &str) -> Result<String, FetchError> {
        let resp = self.client.get(url).send().await?;
        let status = resp.status();
        if !status.is_success() {
            return Err(FetchError::BadStatus { status });
        }
        Ok(resp.text().await?)
    }
}
