use digest_core::node::{fragment_html, Element, Node};
use digest_core::Timeframe;
use digest_page::render_articles;

use crate::AppState;

fn timeframe_select(id: &str, selected: Timeframe) -> Element {
    let options = Timeframe::ALL.iter().map(|tf| {
        let option = Node::element("option").attr("value", tf.as_str()).text(tf.label());
        if *tf == selected {
            option.attr("selected", "selected")
        } else {
            option
        }
    });

    Node::element("select")
        .id(id)
        .attr("name", "timeframe")
        .class("border rounded px-3 py-2")
        .children(options)
}

/// The home page body: selector form, loading indicator and the first
/// render of the article list.
pub fn page_body(state: &AppState) -> Vec<Node> {
    let layout = &state.layout;

    let form = Node::element("form")
        .id(&layout.timeframe_form)
        .attr("method", "post")
        .attr("action", "/update_timeframe")
        .class("mb-6 flex items-center gap-4")
        .child(
            Node::element("label")
                .attr("for", &layout.timeframe_select)
                .class("font-semibold")
                .text("Timeframe"),
        )
        .child(timeframe_select(&layout.timeframe_select, state.default_timeframe))
        .maybe_child(state.preference_id.as_deref().map(|id| {
            Node::element("input")
                .attr("type", "hidden")
                .attr("name", "preference_id")
                .attr("value", id)
        }));

    let indicator = Node::element("div")
        .id(&layout.loading_indicator)
        .class("loading hidden flex justify-center py-4")
        .child(Node::element("div").class("loader"))
        .child(Node::element("span").class("ml-2").text("Loading..."));

    let container = Node::element("div")
        .id(&layout.articles_container)
        .class("articles")
        .children(render_articles(state.fixtures.articles(state.default_timeframe)));

    vec![form.into(), indicator.into(), container.into()]
}

pub fn render_page(state: &AppState) -> String {
    format!(
        "<!DOCTYPE html><html lang=\"en\"><head><meta charset=\"utf-8\"><title>Article Summaries</title></head><body><main class=\"container mx-auto px-4 py-8\">{}</main></body></html>",
        fragment_html(&page_body(state))
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use digest_core::{ArticleRecord, FixtureSet};

    #[test]
    fn test_page_contains_contract_elements() {
        let state = AppState::new(FixtureSet::new()).with_preference_id("3");
        let html = render_page(&state);

        assert!(html.contains("id=\"timeframe-form\""));
        assert!(html.contains("id=\"timeframe\""));
        assert!(html.contains("id=\"loading-indicator\" class=\"loading hidden"));
        assert!(html.contains("id=\"articles-container\""));
        assert!(html.contains("<option value=\"weekly\" selected=\"selected\">Past week</option>"));
        assert!(html.contains("name=\"preference_id\" value=\"3\""));
        assert!(html.contains("No articles found for the selected timeframe."));
    }

    #[test]
    fn test_page_renders_default_timeframe_articles() {
        let fixtures = FixtureSet::new().with_articles(
            Timeframe::Daily,
            vec![ArticleRecord {
                title: "Summary: daily".to_string(),
                ..Default::default()
            }],
        );
        let state = AppState::new(fixtures).with_default_timeframe(Timeframe::Daily);
        let html = render_page(&state);

        assert!(html.contains("Summary: daily"));
        assert!(!html.contains("name=\"preference_id\""));
    }
}
