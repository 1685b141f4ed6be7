use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use digest_core::node::{fragment_html, Element, Node};
use digest_core::{Document, PageLayout, Timeframe};

#[derive(Debug, Clone)]
struct Slot {
    element: Element,
    form: Option<String>,
    value: Option<String>,
    writes: usize,
}

impl Slot {
    fn new(element: Element) -> Self {
        let value = element.get_attr("value").map(str::to_string);
        Self {
            element,
            form: None,
            value,
            writes: 0,
        }
    }
}

#[derive(Debug, Default)]
struct MemoryStore {
    slots: HashMap<String, Slot>,
    body: Vec<String>,
    controls: Vec<String>,
    alerts: Vec<String>,
}

impl MemoryStore {
    fn render_slot(&self, id: &str, out: &mut String) {
        let Some(slot) = self.slots.get(id) else {
            return;
        };
        let mut element = slot.element.clone();
        for control_id in &self.controls {
            if let Some(control) = self.slots.get(control_id) {
                if control.form.as_deref() == Some(id) {
                    let mut control_el = control.element.clone();
                    if let Some(value) = &control.value {
                        control_el.set_attr("value", value.clone());
                    }
                    element.children.push(Node::Element(control_el));
                }
            }
        }
        Node::Element(element).write_html(out);
    }
}

/// Document held entirely in memory.
///
/// Top-level elements live in body order; form controls are tracked
/// separately and rendered inside their owning form.
#[derive(Debug, Default)]
pub struct MemoryDocument {
    store: Mutex<MemoryStore>,
}

impl MemoryDocument {
    pub fn new() -> Self {
        Self::default()
    }

    /// A page carrying every element of `layout`, with the selector set to
    /// `timeframe` and the indicator hidden.
    pub fn standard_page(layout: &PageLayout, timeframe: Timeframe, preference_id: Option<&str>) -> Self {
        let doc = Self::new();
        doc.push(Node::element("form").id(&layout.timeframe_form).attr("method", "post"));
        doc.add_control(
            &layout.timeframe_form,
            Node::element("select")
                .id(&layout.timeframe_select)
                .attr("name", "timeframe")
                .attr("value", timeframe.as_str()),
        );
        if let Some(preference_id) = preference_id {
            doc.add_control(
                &layout.timeframe_form,
                Node::element("input")
                    .id("preference-id")
                    .attr("type", "hidden")
                    .attr("name", "preference_id")
                    .attr("value", preference_id),
            );
        }
        doc.push(Node::element("div").id(&layout.loading_indicator).class("loading hidden"));
        doc.push(Node::element("div").id(&layout.articles_container).class("articles"));
        doc
    }

    fn store(&self) -> MutexGuard<'_, MemoryStore> {
        self.store.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Appends a top-level element. Elements without an id are ignored.
    pub fn push(&self, element: Element) -> bool {
        let Some(id) = element.get_attr("id").map(str::to_string) else {
            return false;
        };
        let mut store = self.store();
        store.slots.insert(id.clone(), Slot::new(element));
        store.body.retain(|existing| existing != &id);
        store.body.push(id);
        true
    }

    /// Registers a control owned by `form_id`.
    pub fn add_control(&self, form_id: &str, element: Element) -> bool {
        let Some(id) = element.get_attr("id").map(str::to_string) else {
            return false;
        };
        let mut slot = Slot::new(element);
        slot.form = Some(form_id.to_string());
        let mut store = self.store();
        store.slots.insert(id.clone(), slot);
        store.controls.retain(|existing| existing != &id);
        store.controls.push(id);
        true
    }

    /// Changes a control's value, as a reader picking an option would.
    pub fn set_value(&self, id: &str, value: &str) -> bool {
        match self.store().slots.get_mut(id) {
            Some(slot) => {
                slot.value = Some(value.to_string());
                true
            }
            None => false,
        }
    }

    pub fn alerts(&self) -> Vec<String> {
        self.store().alerts.clone()
    }

    /// Number of content writes the element has received.
    pub fn write_count(&self, id: &str) -> usize {
        self.store().slots.get(id).map(|slot| slot.writes).unwrap_or(0)
    }

    pub fn attr(&self, id: &str, name: &str) -> Option<String> {
        self.store()
            .slots
            .get(id)
            .and_then(|slot| slot.element.get_attr(name).map(str::to_string))
    }

    /// Top-level ids in body order.
    pub fn body_ids(&self) -> Vec<String> {
        self.store().body.clone()
    }

    pub fn inner_html(&self, id: &str) -> Option<String> {
        self.store()
            .slots
            .get(id)
            .map(|slot| fragment_html(&slot.element.children))
    }

    pub fn to_html(&self) -> String {
        let store = self.store();
        let mut out = String::from("<body>");
        for id in &store.body {
            store.render_slot(id, &mut out);
        }
        out.push_str("</body>");
        out
    }
}

impl Document for MemoryDocument {
    fn contains(&self, id: &str) -> bool {
        self.store().slots.contains_key(id)
    }

    fn replace_children(&self, id: &str, children: Vec<Node>) -> bool {
        match self.store().slots.get_mut(id) {
            Some(slot) => {
                slot.element.children = children;
                slot.writes += 1;
                true
            }
            None => false,
        }
    }

    fn append_child(&self, id: &str, child: Node) -> bool {
        match self.store().slots.get_mut(id) {
            Some(slot) => {
                slot.element.children.push(child);
                slot.writes += 1;
                true
            }
            None => false,
        }
    }

    fn children(&self, id: &str) -> Option<Vec<Node>> {
        self.store().slots.get(id).map(|slot| slot.element.children.clone())
    }

    fn set_hidden(&self, id: &str, hidden: bool) -> bool {
        match self.store().slots.get_mut(id) {
            Some(slot) => {
                if hidden {
                    slot.element.add_class("hidden");
                } else {
                    slot.element.remove_class("hidden");
                }
                true
            }
            None => false,
        }
    }

    fn is_hidden(&self, id: &str) -> Option<bool> {
        self.store().slots.get(id).map(|slot| slot.element.has_class("hidden"))
    }

    fn set_style(&self, id: &str, property: &str, value: &str) -> bool {
        match self.store().slots.get_mut(id) {
            Some(slot) => {
                let mut declarations: Vec<(String, String)> = slot
                    .element
                    .get_attr("style")
                    .unwrap_or_default()
                    .split(';')
                    .filter_map(|decl| decl.split_once(':'))
                    .map(|(k, v)| (k.trim().to_string(), v.trim().to_string()))
                    .filter(|(k, _)| k != property)
                    .collect();
                declarations.push((property.to_string(), value.to_string()));
                let style = declarations
                    .iter()
                    .map(|(k, v)| format!("{}: {}", k, v))
                    .collect::<Vec<_>>()
                    .join("; ");
                slot.element.set_attr("style", style);
                true
            }
            None => false,
        }
    }

    fn value(&self, id: &str) -> Option<String> {
        self.store().slots.get(id).and_then(|slot| slot.value.clone())
    }

    fn form_fields(&self, form_id: &str) -> Option<Vec<(String, String)>> {
        let store = self.store();
        if !store.slots.contains_key(form_id) {
            return None;
        }
        let fields = store
            .controls
            .iter()
            .filter_map(|id| store.slots.get(id))
            .filter(|slot| slot.form.as_deref() == Some(form_id))
            .filter_map(|slot| {
                let name = slot.element.get_attr("name")?;
                Some((name.to_string(), slot.value.clone().unwrap_or_default()))
            })
            .collect();
        Some(fields)
    }

    fn insert_at_top(&self, node: Node) -> Option<String> {
        let Node::Element(element) = node else {
            return None;
        };
        let id = element.get_attr("id")?.to_string();
        let mut store = self.store();
        store.slots.insert(id.clone(), Slot::new(element));
        store.body.retain(|existing| existing != &id);
        store.body.insert(0, id.clone());
        Some(id)
    }

    fn remove(&self, id: &str) -> bool {
        let mut store = self.store();
        let existed = store.slots.remove(id).is_some();
        store.body.retain(|existing| existing != id);
        store.controls.retain(|existing| existing != id);
        existed
    }

    fn ids_with_role(&self, role: &str) -> Vec<String> {
        let store = self.store();
        store
            .body
            .iter()
            .filter(|id| {
                store
                    .slots
                    .get(id.as_str())
                    .and_then(|slot| slot.element.get_attr("role"))
                    == Some(role)
            })
            .cloned()
            .collect()
    }

    fn alert(&self, message: &str) {
        tracing::debug!("alert: {}", message);
        self.store().alerts.push(message.to_string());
    }
}
