use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use digest_core::{FixtureSet, Result, TimeframeResponse};

use crate::api::ApiClient;
use crate::config::ClientConfig;

/// Where the controller gets a fresh article list from.
#[async_trait]
pub trait ArticleSource: Send + Sync + fmt::Debug {
    fn name(&self) -> &str;

    /// Submits the serialized form fields once and returns the parsed
    /// envelope.
    async fn fetch_articles(&self, fields: &[(String, String)]) -> Result<TimeframeResponse>;
}

/// The backend's timeframe endpoint over HTTP.
#[derive(Debug, Clone)]
pub struct HttpArticleSource {
    api: ApiClient,
    endpoint: String,
}

impl HttpArticleSource {
    pub fn new(config: &ClientConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            api: ApiClient::new(&config.base_url, config.timeout)?,
            endpoint: config.endpoint.clone(),
        })
    }
}

#[async_trait]
impl ArticleSource for HttpArticleSource {
    fn name(&self) -> &str {
        "http"
    }

    async fn fetch_articles(&self, fields: &[(String, String)]) -> Result<TimeframeResponse> {
        self.api.post_form(&self.endpoint, fields).await
    }
}

/// Answers from canned fixtures without touching the network.
#[derive(Debug, Clone, Default)]
pub struct FixtureSource {
    fixtures: FixtureSet,
}

impl FixtureSource {
    pub fn new(fixtures: FixtureSet) -> Self {
        Self { fixtures }
    }
}

#[async_trait]
impl ArticleSource for FixtureSource {
    fn name(&self) -> &str {
        "fixtures"
    }

    async fn fetch_articles(&self, fields: &[(String, String)]) -> Result<TimeframeResponse> {
        Ok(self.fixtures.respond(fields))
    }
}

/// Picks the source the configuration asks for: fixtures when given,
/// otherwise the HTTP endpoint.
pub fn create_source(config: &ClientConfig, fixtures: Option<FixtureSet>) -> Result<Arc<dyn ArticleSource>> {
    match fixtures {
        Some(fixtures) => Ok(Arc::new(FixtureSource::new(fixtures))),
        None => Ok(Arc::new(HttpArticleSource::new(config)?)),
    }
}
