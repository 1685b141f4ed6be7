pub mod backends;
pub mod debounce;
pub mod loading;
pub mod notify;
pub mod renderer;

pub use backends::MemoryDocument;
pub use debounce::Debouncer;
pub use loading::LoadingGuard;
pub use notify::{Banner, BannerKind, Notifier};
pub use renderer::{render_articles, update_articles};

pub mod prelude {
    pub use super::renderer::{render_articles, update_articles};
    pub use super::{LoadingGuard, MemoryDocument, Notifier};
    pub use digest_core::prelude::*;
}
