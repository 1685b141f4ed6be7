use crate::node::Node;

pub const ARTICLES_CONTAINER_ID: &str = "articles-container";
pub const LOADING_INDICATOR_ID: &str = "loading-indicator";
pub const TIMEFRAME_SELECT_ID: &str = "timeframe";
pub const TIMEFRAME_FORM_ID: &str = "timeframe-form";

/// Stable identifiers of the elements the page exposes to this crate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageLayout {
    pub articles_container: String,
    pub loading_indicator: String,
    pub timeframe_select: String,
    pub timeframe_form: String,
}

impl Default for PageLayout {
    fn default() -> Self {
        Self {
            articles_container: ARTICLES_CONTAINER_ID.to_string(),
            loading_indicator: LOADING_INDICATOR_ID.to_string(),
            timeframe_select: TIMEFRAME_SELECT_ID.to_string(),
            timeframe_form: TIMEFRAME_FORM_ID.to_string(),
        }
    }
}

/// The host document as seen by the renderer, the controller and the
/// notification helpers.
///
/// Every mutating call reports whether the target existed so callers can
/// degrade to a no-op; none of them fail.
pub trait Document: Send + Sync {
    fn contains(&self, id: &str) -> bool;

    /// Replaces the element's content with `children` in one write.
    fn replace_children(&self, id: &str, children: Vec<Node>) -> bool;

    fn append_child(&self, id: &str, child: Node) -> bool;

    /// Current content of the element, if present.
    fn children(&self, id: &str) -> Option<Vec<Node>>;

    fn set_hidden(&self, id: &str, hidden: bool) -> bool;

    fn is_hidden(&self, id: &str) -> Option<bool>;

    fn set_style(&self, id: &str, property: &str, value: &str) -> bool;

    /// Current value of a form control.
    fn value(&self, id: &str) -> Option<String>;

    /// Name/value pairs of the controls belonging to `form_id`, in document
    /// order.
    fn form_fields(&self, form_id: &str) -> Option<Vec<(String, String)>>;

    /// Inserts `node` as the first child of the body. The node must carry an
    /// `id` attribute, which becomes its handle.
    fn insert_at_top(&self, node: Node) -> Option<String>;

    fn remove(&self, id: &str) -> bool;

    /// Ids of the top-level elements carrying `role="{role}"`.
    fn ids_with_role(&self, role: &str) -> Vec<String>;

    /// Blocking notification shown to the reader.
    fn alert(&self, message: &str);
}
