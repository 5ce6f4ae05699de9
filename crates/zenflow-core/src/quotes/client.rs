//! Quotable API client -- one GET per refresh, local fallback on any failure.

use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, warn};

use super::{LocalQuotes, Quote, QuoteSource};
use crate::storage::QuotesConfig;

#[derive(Debug, Deserialize)]
struct QuotableResponse {
    content: String,
    author: String,
}

pub struct QuotableClient {
    client: Client,
    endpoint: String,
    offline: bool,
}

impl QuotableClient {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            endpoint: endpoint.into(),
            offline: false,
        }
    }

    pub fn from_config(config: &QuotesConfig) -> Self {
        Self {
            offline: config.offline,
            ..Self::new(config.endpoint.clone())
        }
    }

    pub fn offline(mut self, offline: bool) -> Self {
        self.offline = offline;
        self
    }

    /// The raw request, without fallback.
    async fn fetch_remote(&self) -> Result<Quote, Box<dyn std::error::Error + Send + Sync>> {
        let resp = self
            .client
            .get(&self.endpoint)
            .send()
            .await?
            .error_for_status()?;
        let body: QuotableResponse = resp.json().await?;
        if body.content.trim().is_empty() {
            return Err("quote response has empty content".into());
        }
        Ok(Quote {
            content: body.content,
            author: body.author,
        })
    }
}

impl QuoteSource for QuotableClient {
    async fn fetch(&self) -> Quote {
        if !self.offline {
            match self.fetch_remote().await {
                Ok(quote) => {
                    debug!(author = %quote.author, "fetched remote quote");
                    return quote;
                }
                Err(e) => warn!(error = %e, endpoint = %self.endpoint, "quote fetch failed, using local quote"),
            }
        }
        LocalQuotes.fetch().await
    }
}
