//! Transient banners shown at the top of the page.
//!
//! Timers are plain tokio tasks, so these helpers must be called from inside
//! a runtime.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use digest_core::node::{Element, Node};
use digest_core::Document;
use tokio::task::JoinHandle;
use tokio::time::sleep;

pub const INFO_TIMEOUT: Duration = Duration::from_secs(5);
pub const SUCCESS_TIMEOUT: Duration = Duration::from_secs(3);
pub const ERROR_TIMEOUT: Duration = Duration::from_secs(5);
pub const FLASH_TIMEOUT: Duration = Duration::from_secs(5);
pub const FLASH_FADE: Duration = Duration::from_millis(500);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BannerKind {
    Info,
    Success,
    Error,
}

impl BannerKind {
    pub fn timeout(&self) -> Duration {
        match self {
            BannerKind::Info => INFO_TIMEOUT,
            BannerKind::Success => SUCCESS_TIMEOUT,
            BannerKind::Error => ERROR_TIMEOUT,
        }
    }

    fn classes(&self) -> &'static str {
        match self {
            BannerKind::Info => "bg-blue-100 border border-blue-400 text-blue-700 px-4 py-3 rounded relative",
            BannerKind::Success => "bg-green-100 border border-green-400 text-green-700 px-4 py-3 rounded relative",
            BannerKind::Error => "bg-red-100 border border-red-400 text-red-700 px-4 py-3 rounded relative",
        }
    }
}

fn close_button(target_id: &str) -> Element {
    Node::element("button")
        .attr("type", "button")
        .attr("aria-label", "Close")
        .attr("data-dismiss", target_id)
        .class("ml-4 text-lg font-bold")
        .text("×")
}

fn banner_markup(id: &str, kind: BannerKind, message: &str) -> Element {
    let banner = Node::element("div")
        .id(id)
        .attr("role", "alert")
        .class(kind.classes());
    let banner = match kind {
        BannerKind::Error => banner.child(Node::element("strong").class("font-bold").text("Error! ")),
        _ => banner,
    };
    banner
        .child(Node::element("span").class("block sm:inline").text(message))
        .child(close_button(id))
}

/// A banner currently on the page.
///
/// Dropping the handle leaves the auto-removal timer running.
pub struct Banner {
    id: String,
    document: Arc<dyn Document>,
    timer: JoinHandle<()>,
}

impl Banner {
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Removes the banner now, as its close control does.
    pub fn dismiss(self) -> bool {
        self.timer.abort();
        self.document.remove(&self.id)
    }
}

pub struct Notifier {
    document: Arc<dyn Document>,
    next_id: AtomicU64,
}

impl Notifier {
    pub fn new(document: Arc<dyn Document>) -> Self {
        Self {
            document,
            next_id: AtomicU64::new(1),
        }
    }

    pub fn show_info(&self, message: &str) -> Option<Banner> {
        self.show(BannerKind::Info, message)
    }

    pub fn show_success(&self, message: &str) -> Option<Banner> {
        self.show(BannerKind::Success, message)
    }

    pub fn show_error(&self, message: &str) -> Option<Banner> {
        self.show(BannerKind::Error, message)
    }

    pub fn show(&self, kind: BannerKind, message: &str) -> Option<Banner> {
        let id = format!("banner-{}", self.next_id.fetch_add(1, Ordering::Relaxed));
        let id = self.document.insert_at_top(banner_markup(&id, kind, message).into())?;

        let document = self.document.clone();
        let timeout = kind.timeout();
        let removal_id = id.clone();
        let timer = tokio::spawn(async move {
            sleep(timeout).await;
            document.remove(&removal_id);
        });

        Some(Banner {
            id,
            document: self.document.clone(),
            timer,
        })
    }
}

/// A server-rendered flash message picked up at page load.
pub struct FlashMessage {
    id: String,
    document: Arc<dyn Document>,
    timer: JoinHandle<()>,
}

impl FlashMessage {
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn dismiss(self) -> bool {
        self.timer.abort();
        self.document.remove(&self.id)
    }
}

/// Gives every `role="alert"` element a close control and schedules its
/// fade-out and removal.
pub fn init_flash_messages(document: Arc<dyn Document>) -> Vec<FlashMessage> {
    document
        .ids_with_role("alert")
        .into_iter()
        .map(|id| {
            document.append_child(&id, close_button(&id).into());

            let doc = document.clone();
            let fade_id = id.clone();
            let timer = tokio::spawn(async move {
                sleep(FLASH_TIMEOUT).await;
                doc.set_style(&fade_id, "opacity", "0");
                doc.set_style(&fade_id, "transition", "opacity 0.5s");
                sleep(FLASH_FADE).await;
                doc.remove(&fade_id);
            });

            FlashMessage {
                id,
                document: document.clone(),
                timer,
            }
        })
        .collect()
}
