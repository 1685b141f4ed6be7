use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use digest_core::{Document, Error, FailureKind, PageLayout, Timeframe};
use digest_page::{update_articles, LoadingGuard};

use crate::config::{ClientConfig, StalePolicy};
use crate::logging::Logger;
use crate::source::ArticleSource;

pub const GENERIC_FAILURE_MESSAGE: &str = "Failed to update timeframe. Please try again.";

/// What a single selection change ended with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RefreshOutcome {
    /// This many articles were handed to the renderer.
    Rendered(usize),
    /// The reader was alerted with this message.
    Failed(String),
    /// A newer selection was made while this one was in flight.
    Superseded,
}

/// Message shown to the reader for a failed refresh.
pub fn failure_message(err: &Error) -> String {
    match (err.kind(), err) {
        (FailureKind::Application, Error::Application(message)) => {
            format!("Error updating timeframe: {}", message)
        }
        _ => GENERIC_FAILURE_MESSAGE.to_string(),
    }
}

/// Refetches the article list whenever the timeframe selector changes.
///
/// The host routes the selector's change events to [`handle_change`]; each
/// call issues exactly one request and always leaves the loading indicator
/// hidden.
///
/// [`handle_change`]: RefreshController::handle_change
pub struct RefreshController {
    document: Arc<dyn Document>,
    source: Arc<dyn ArticleSource>,
    layout: PageLayout,
    stale_policy: StalePolicy,
    generation: AtomicU64,
    logger: Logger,
}

impl RefreshController {
    /// Binds to the page's timeframe selector. Returns `None` when the page
    /// has no selector, in which case nothing is ever refreshed.
    pub fn bind(
        document: Arc<dyn Document>,
        source: Arc<dyn ArticleSource>,
        config: &ClientConfig,
    ) -> Option<Self> {
        if !document.contains(&config.layout.timeframe_select) {
            tracing::debug!("timeframe selector {} not found, refresh disabled", config.layout.timeframe_select);
            return None;
        }

        tracing::debug!("refresh controller bound to {} using {} source", config.layout.timeframe_select, source.name());
        Some(Self {
            document,
            source,
            layout: config.layout.clone(),
            stale_policy: config.stale_policy,
            generation: AtomicU64::new(0),
            logger: Logger::new().with_prefix("[refresh]"),
        })
    }

    pub fn selected_timeframe(&self) -> Option<Timeframe> {
        self.document
            .value(&self.layout.timeframe_select)
            .and_then(|value| value.parse().ok())
    }

    fn form_payload(&self) -> Vec<(String, String)> {
        if let Some(fields) = self.document.form_fields(&self.layout.timeframe_form) {
            return fields;
        }
        // No enclosing form: submit the selector on its own
        self.document
            .value(&self.layout.timeframe_select)
            .map(|value| vec![("timeframe".to_string(), value)])
            .unwrap_or_default()
    }

    fn is_superseded(&self, generation: u64) -> bool {
        self.stale_policy == StalePolicy::DiscardStale
            && self.generation.load(Ordering::SeqCst) != generation
    }

    /// Handles one change of the timeframe selector.
    pub async fn handle_change(&self) -> RefreshOutcome {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        let loading = LoadingGuard::acquire(self.document.as_ref(), &self.layout.loading_indicator);

        let fields = self.form_payload();
        let timeframe = fields
            .iter()
            .find(|(name, _)| name == "timeframe")
            .map(|(_, value)| value.clone())
            .unwrap_or_default();
        self.logger.info(&format!("Updating timeframe to {}", timeframe));

        let result = self
            .source
            .fetch_articles(&fields)
            .await
            .and_then(|response| response.into_articles());

        if self.is_superseded(generation) {
            // The newer request still owns the indicator and hides it when done
            self.logger.debug(&format!("Dropping stale response for {}", timeframe));
            loading.hand_over();
            return RefreshOutcome::Superseded;
        }

        match result {
            Ok(articles) => {
                update_articles(self.document.as_ref(), &self.layout.articles_container, &articles);
                self.logger.info(&format!("Rendered {} summaries for {}", articles.len(), timeframe));
                RefreshOutcome::Rendered(articles.len())
            }
            Err(err) => {
                self.logger.error(&format!("Error updating timeframe: {}", err));
                let message = failure_message(&err);
                self.document.alert(&message);
                RefreshOutcome::Failed(message)
            }
        }
    }
}
