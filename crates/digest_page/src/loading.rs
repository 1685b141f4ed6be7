use digest_core::node::Node;
use digest_core::Document;

/// Scoped loading state: the indicator is revealed on acquisition and
/// hidden again when the guard goes out of scope, whatever the exit path.
pub struct LoadingGuard<'a> {
    document: &'a dyn Document,
    indicator_id: &'a str,
    release: bool,
}

impl<'a> LoadingGuard<'a> {
    pub fn acquire(document: &'a dyn Document, indicator_id: &'a str) -> Self {
        if !document.set_hidden(indicator_id, false) {
            tracing::debug!("loading indicator {} not found", indicator_id);
        }
        Self {
            document,
            indicator_id,
            release: true,
        }
    }

    /// Drops the guard without hiding the indicator. Used when a newer
    /// operation holding its own guard has taken over the indicator.
    pub fn hand_over(mut self) {
        self.release = false;
    }
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        if self.release {
            self.document.set_hidden(self.indicator_id, true);
        }
    }
}

/// Replaces the element's content with a spinner and a "Loading..." label.
pub fn show_loading_placeholder(document: &dyn Document, id: &str) -> bool {
    let placeholder = Node::element("div")
        .class("flex justify-center items-center")
        .child(Node::element("div").class("loader"))
        .child(Node::element("span").class("ml-2").text("Loading..."));
    document.replace_children(id, vec![placeholder.into()])
}

/// Puts `content` back once the work behind a placeholder has finished.
pub fn restore_content(document: &dyn Document, id: &str, content: Vec<Node>) -> bool {
    document.replace_children(id, content)
}

/// Flips the element's visibility. Returns the new hidden state.
pub fn toggle_visibility(document: &dyn Document, id: &str) -> Option<bool> {
    let hidden = !document.is_hidden(id)?;
    document.set_hidden(id, hidden);
    Some(hidden)
}
