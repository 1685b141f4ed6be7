use digest_core::node::{Element, Node};
use digest_core::{ArticleRecord, Citation, Document};

pub const CITATION_TITLE_LIMIT: usize = 60;
pub const SUMMARY_UNAVAILABLE: &str = "Summary not available";
pub const NO_RESULTS_MESSAGE: &str = "No articles found for the selected timeframe.";
pub const PREFERENCES_PATH: &str = "/preferences";

fn strip_marker(line: &str) -> &str {
    if let Some(rest) = line.strip_prefix('•') {
        return rest.trim_start();
    }
    // A dash only counts as a marker when whitespace follows, so "-5%" survives
    match line.strip_prefix('-') {
        Some(rest) if rest.starts_with(char::is_whitespace) => rest.trim_start(),
        _ => line,
    }
}

/// Splits a summary into bullet points.
///
/// Blank lines are dropped and a single leading marker is stripped from each
/// line: `•` with any whitespace after it, or `-` followed by whitespace.
pub fn summary_points(summary: &str) -> Vec<String> {
    summary
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(|line| strip_marker(line).to_string())
        .collect()
}

/// Cuts `title` to `limit` characters, appending `...` when anything was cut.
pub fn truncate_title(title: &str, limit: usize) -> String {
    match title.char_indices().nth(limit) {
        Some((cut, _)) => format!("{}...", &title[..cut]),
        None => title.to_string(),
    }
}

fn render_summary(record: &ArticleRecord) -> Element {
    let block = Node::element("div").class("summary mb-4");
    match record.summary_text() {
        Some(summary) => block.child(
            Node::element("ul")
                .class("list-disc pl-5 space-y-2")
                .children(summary_points(summary).into_iter().map(|point| {
                    Node::element("li").class("text-gray-700").text(point)
                })),
        ),
        None => block.child(
            Node::element("p")
                .class("text-gray-500 italic")
                .text(SUMMARY_UNAVAILABLE),
        ),
    }
}

fn render_citations(citations: &[Citation]) -> Option<Element> {
    if citations.is_empty() {
        return None;
    }

    let links = citations.iter().map(|citation| {
        Node::element("li").child(
            Node::element("a")
                .attr("href", citation.url.as_str())
                .attr("target", "_blank")
                .attr("rel", "noopener noreferrer")
                .attr("title", citation.title.as_str())
                .class("text-blue-600 hover:underline text-sm")
                .text(truncate_title(&citation.title, CITATION_TITLE_LIMIT)),
        )
    });

    Some(
        Node::element("div")
            .class("sources-used mt-4 pt-4 border-t")
            .child(
                Node::element("h3")
                    .class("text-sm font-semibold text-gray-600 mb-2")
                    .text("Sources used:"),
            )
            .child(Node::element("ul").class("space-y-1").children(links)),
    )
}

pub fn render_card(record: &ArticleRecord) -> Element {
    Node::element("div")
        .class("article-card bg-white rounded-lg shadow-md p-6 mb-6")
        .child(
            Node::element("h2")
                .class("text-xl font-semibold mb-2")
                .text(record.title.as_str()),
        )
        .child(
            Node::element("p")
                .class("article-date text-sm text-gray-500 mb-4")
                .text(record.date.as_str()),
        )
        .child(render_summary(record))
        .child(
            Node::element("div")
                .class("flex justify-between items-center")
                .child(
                    Node::element("a")
                        .attr("href", record.url.as_str())
                        .attr("target", "_blank")
                        .attr("rel", "noopener noreferrer")
                        .class("text-blue-600 hover:underline")
                        .text("Read original article"),
                )
                .child(
                    Node::element("span")
                        .class("article-source text-sm text-gray-500")
                        .text(record.source.as_str()),
                ),
        )
        .maybe_child(render_citations(&record.sources_used))
}

pub fn render_no_results() -> Element {
    Node::element("div")
        .class("no-results text-center py-8")
        .child(Node::element("p").class("text-gray-600 mb-4").text(NO_RESULTS_MESSAGE))
        .child(
            Node::element("a")
                .attr("href", PREFERENCES_PATH)
                .class("text-blue-600 hover:underline")
                .text("Update your preferences"),
        )
}

/// Builds the article list content, one card per record in input order.
pub fn render_articles(articles: &[ArticleRecord]) -> Vec<Node> {
    if articles.is_empty() {
        return vec![render_no_results().into()];
    }
    articles.iter().map(|record| render_card(record).into()).collect()
}

/// Installs the rendered list into `container_id` with a single write.
///
/// Returns false, leaving the document untouched, when the container is
/// absent.
pub fn update_articles(document: &dyn Document, container_id: &str, articles: &[ArticleRecord]) -> bool {
    if !document.contains(container_id) {
        tracing::debug!("article container {} not found, skipping render", container_id);
        return false;
    }
    document.replace_children(container_id, render_articles(articles))
}
