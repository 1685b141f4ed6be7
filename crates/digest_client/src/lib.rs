pub mod api;
pub mod config;
pub mod controller;
pub mod logging;
pub mod source;

pub use api::ApiClient;
pub use config::{ClientConfig, StalePolicy};
pub use controller::{RefreshController, RefreshOutcome};
pub use logging::{init_logging, Logger};
pub use source::{create_source, ArticleSource, FixtureSource, HttpArticleSource};

pub mod prelude {
    pub use super::{ArticleSource, ClientConfig, RefreshController, RefreshOutcome};
    pub use digest_page::prelude::*;
}
