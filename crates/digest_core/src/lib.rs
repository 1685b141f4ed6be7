pub mod dates;
pub mod dom;
pub mod error;
pub mod fixtures;
pub mod node;
pub mod types;
pub mod validate;

pub use dom::{Document, PageLayout};
pub use error::{Error, FailureKind, Result};
pub use fixtures::FixtureSet;
pub use node::{Element, Node};
pub use types::{ArticleRecord, Citation, Timeframe, TimeframeResponse};

pub mod prelude {
    pub use crate::{ArticleRecord, Citation, Document, Error, Node, PageLayout, Result, Timeframe};
}
