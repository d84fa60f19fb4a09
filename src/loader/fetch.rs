//! Network access to the live dataset feed.

use std::time::Duration;

use chrono::Utc;
use reqwest::{
    StatusCode,
    blocking::Client,
    header::{CACHE_CONTROL, HeaderMap, HeaderValue, PRAGMA},
};
use thiserror::Error;

use crate::data::DistroRecord;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("failed to build HTTP client")]
    Client(#[source] reqwest::Error),

    #[error("request to `{url}` failed")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("`{url}` answered {status}")]
    Status { url: String, status: StatusCode },

    #[error("`{url}` did not return a distribution list")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Source of the live dataset.
pub trait DatasetFetcher {
    /// Fetch the full record list, bypassing any HTTP cache.
    fn fetch(&self) -> Result<Vec<DistroRecord>, FetchError>;
}

impl<F: DatasetFetcher + ?Sized> DatasetFetcher for &F {
    fn fetch(&self) -> Result<Vec<DistroRecord>, FetchError> {
        (**self).fetch()
    }
}

/// Blocking HTTP fetcher for `<base>/<dataset path>`.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
    url: String,
}

impl HttpFetcher {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self, FetchError> {
        let mut headers = HeaderMap::new();
        headers.insert(CACHE_CONTROL, HeaderValue::from_static("no-cache"));
        headers.insert(PRAGMA, HeaderValue::from_static("no-cache"));

        let client = Client::builder()
            .timeout(timeout)
            .default_headers(headers)
            .build()
            .map_err(FetchError::Client)?;

        Ok(Self {
            client,
            url: url.into(),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Request URL with a timestamp parameter so intermediaries never answer
    /// from their own cache.
    fn busted_url(&self) -> String {
        let sep = if self.url.contains('?') { '&' } else { '?' };
        format!("{}{sep}t={}", self.url, Utc::now().timestamp_millis())
    }
}

impl DatasetFetcher for HttpFetcher {
    fn fetch(&self) -> Result<Vec<DistroRecord>, FetchError> {
        let url = self.busted_url();
        crate::debug!("fetch"; "GET {url}");

        let transport = |source| FetchError::Transport {
            url: self.url.clone(),
            source,
        };

        let response = self.client.get(&url).send().map_err(transport)?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: self.url.clone(),
                status,
            });
        }

        let body = response.text().map_err(transport)?;
        parse_feed(&body).map_err(|source| FetchError::Decode {
            url: self.url.clone(),
            source,
        })
    }
}

/// Decode a feed body. The feed must be a JSON array of records.
pub fn parse_feed(body: &str) -> serde_json::Result<Vec<DistroRecord>> {
    serde_json::from_str(body.trim_start_matches('\u{feff}'))
}
