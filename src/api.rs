// API client module: a small blocking HTTP client for the news API's
// top-headlines endpoint. Both "latest headlines" and "keyword search" hit
// the same endpoint and differ only in their query parameters.

use crate::config::Config;
use anyhow::Context;
use reqwest::blocking::Client;
use reqwest::StatusCode;
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// One article from a fetch, tagged with its 1-based position in that
/// fetch's result list. Positions mean nothing across two fetches.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Headline {
    pub position: usize,
    pub title: Option<String>,
    pub description: Option<String>,
    pub url: String,
}

/// Raw article object as it appears in the `articles` array.
#[derive(Deserialize, Debug)]
pub struct Article {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub url: String,
}

/// Envelope returned by the endpoint. `code` and `message` are only
/// populated when `status` is `"error"`.
#[derive(Deserialize, Debug)]
pub struct NewsResponse {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub articles: Vec<Article>,
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("HTTP {0}")]
    Status(u16),
    #[error("news API rejected the request: {code} - {message}")]
    Rejected { code: String, message: String },
    #[error("failed to reach the news API: {0}")]
    Transport(#[source] reqwest::Error),
    #[error("failed to parse news API response: {0}")]
    Decode(#[source] reqwest::Error),
}

/// Where headlines come from. `NewsClient` is the real implementation;
/// tests plug in canned data.
pub trait NewsSource {
    fn top_headlines(&self, country: &str) -> Result<Vec<Headline>, ApiError>;
    fn search(&self, keyword: &str) -> Result<Vec<Headline>, ApiError>;
}

/// Number articles 1..=N in response order.
pub fn number_articles(articles: Vec<Article>) -> Vec<Headline> {
    articles
        .into_iter()
        .enumerate()
        .map(|(i, article)| Headline {
            position: i + 1,
            title: article.title,
            description: article.description,
            url: article.url,
        })
        .collect()
}

/// Blocking client holding the reqwest client, the endpoint URL and the API key.
#[derive(Clone)]
pub struct NewsClient {
    client: Client,
    endpoint: String,
    api_key: String,
}

impl NewsClient {
    /// Build a client from the loaded configuration.
    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        let mut builder = Client::builder().user_agent(USER_AGENT);
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().context("Failed to build HTTP client")?;
        Ok(NewsClient {
            client,
            endpoint: config.endpoint.clone(),
            api_key: config.api_key.clone(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// GET the endpoint with `apiKey` plus the given parameter, and number
    /// the returned articles. Only a 200 counts as success.
    fn fetch(&self, param: (&str, &str)) -> Result<Vec<Headline>, ApiError> {
        debug!(endpoint = %self.endpoint, query = param.0, "requesting articles");
        let res = self
            .client
            .get(&self.endpoint)
            .query(&[("apiKey", self.api_key.as_str()), param])
            .send()
            .map_err(ApiError::Transport)?;

        let status = res.status();
        if status != StatusCode::OK {
            return Err(ApiError::Status(status.as_u16()));
        }

        let body: NewsResponse = res.json().map_err(ApiError::Decode)?;
        if let Some(s) = body.status.as_deref() {
            if s != "ok" {
                return Err(ApiError::Rejected {
                    code: body.code.unwrap_or_else(|| s.to_string()),
                    message: body.message.unwrap_or_default(),
                });
            }
        }

        debug!(count = body.articles.len(), "articles received");
        Ok(number_articles(body.articles))
    }
}

impl NewsSource for NewsClient {
    fn top_headlines(&self, country: &str) -> Result<Vec<Headline>, ApiError> {
        self.fetch(("country", country))
    }

    fn search(&self, keyword: &str) -> Result<Vec<Headline>, ApiError> {
        self.fetch(("q", keyword))
    }
}
