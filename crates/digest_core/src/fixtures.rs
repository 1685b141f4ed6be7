use std::collections::HashMap;
use std::path::Path;
use std::str::FromStr;

use crate::{ArticleRecord, Error, Result, Timeframe, TimeframeResponse};

pub const NO_ARTICLES_MESSAGE: &str = "No articles found for the updated timeframe";

/// Canned article lists keyed by timeframe, answering the timeframe
/// endpoint the way the real backend does.
#[derive(Debug, Clone, Default)]
pub struct FixtureSet {
    articles: HashMap<Timeframe, Vec<ArticleRecord>>,
}

impl FixtureSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_articles(mut self, timeframe: Timeframe, articles: Vec<ArticleRecord>) -> Self {
        self.articles.insert(timeframe, articles);
        self
    }

    /// Parses `{"weekly": [ArticleRecord, ...], ...}`.
    pub fn from_json(json: &str) -> Result<Self> {
        let raw: HashMap<String, Vec<ArticleRecord>> = serde_json::from_str(json)?;
        let mut articles = HashMap::with_capacity(raw.len());
        for (key, list) in raw {
            articles.insert(Timeframe::from_str(&key)?, list);
        }
        Ok(Self { articles })
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    pub fn articles(&self, timeframe: Timeframe) -> &[ArticleRecord] {
        self.articles.get(&timeframe).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Answers a form submission carrying a `timeframe` field.
    pub fn respond(&self, fields: &[(String, String)]) -> TimeframeResponse {
        let Some((_, value)) = fields.iter().find(|(name, _)| name == "timeframe") else {
            return TimeframeResponse::failure("Missing timeframe");
        };

        let timeframe = match Timeframe::from_str(value) {
            Ok(timeframe) => timeframe,
            Err(Error::Validation(message)) => return TimeframeResponse::failure(message),
            Err(other) => return TimeframeResponse::failure(other.to_string()),
        };

        let articles = self.articles(timeframe);
        if articles.is_empty() {
            tracing::warn!("No articles found after timeframe update to {}", timeframe);
            return TimeframeResponse::failure(NO_ARTICLES_MESSAGE);
        }

        tracing::info!("Serving {} summaries for {} timeframe", articles.len(), timeframe);
        TimeframeResponse::ok(articles.to_vec())
    }
}
