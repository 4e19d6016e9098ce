//! Arena document: elements, text, attributes, form state and listeners

use super::{ElementId, Listener};

/// Whether the document has finished parsing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReadyState {
    #[default]
    Loading,
    Complete,
}

#[derive(Debug, Clone)]
struct Node {
    parent: Option<ElementId>,
    kind: NodeKind,
}

#[derive(Debug, Clone)]
enum NodeKind {
    Element(ElementData),
    Text(String),
}

#[derive(Debug, Clone, Default)]
struct ElementData {
    tag: String,
    attributes: Vec<(String, String)>,
    children: Vec<ElementId>,
    /// Live `value` property; `None` until written, then the attribute is only the default
    value: Option<String>,
    /// Live `checked` property; `None` falls back to the `checked` attribute
    checked: Option<bool>,
    listeners: Vec<(String, Listener)>,
}

/// A parsed page
#[derive(Debug, Clone)]
pub struct Document {
    nodes: Vec<Node>,
    root: ElementId,
    ready_state: ReadyState,
    alerts: Vec<String>,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    /// Create an empty, still-loading document with an `<html>` root
    pub fn new() -> Self {
        let root = Node {
            parent: None,
            kind: NodeKind::Element(ElementData {
                tag: "html".to_string(),
                ..Default::default()
            }),
        };
        Self {
            nodes: vec![root],
            root: ElementId(0),
            ready_state: ReadyState::Loading,
            alerts: Vec::new(),
        }
    }

    pub fn root(&self) -> ElementId {
        self.root
    }

    pub fn ready_state(&self) -> ReadyState {
        self.ready_state
    }

    /// Mark parsing as finished (the "document ready" signal)
    pub fn finish_loading(&mut self) {
        self.ready_state = ReadyState::Complete;
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Tree construction
    // ─────────────────────────────────────────────────────────────────────────

    /// Create a detached element
    pub fn create_element(&mut self, tag: &str) -> ElementId {
        let id = ElementId(self.nodes.len());
        self.nodes.push(Node {
            parent: None,
            kind: NodeKind::Element(ElementData {
                tag: tag.to_ascii_lowercase(),
                ..Default::default()
            }),
        });
        id
    }

    /// Append `child` as the last child of `parent`
    ///
    /// A child that already has a parent is moved.
    pub fn append_child(&mut self, parent: ElementId, child: ElementId) {
        if let Some(old_parent) = self.nodes[child.0].parent {
            self.element_mut(old_parent).children.retain(|c| *c != child);
        }
        self.nodes[child.0].parent = Some(parent);
        self.element_mut(parent).children.push(child);
    }

    pub fn append_text(&mut self, parent: ElementId, text: &str) {
        let id = ElementId(self.nodes.len());
        self.nodes.push(Node {
            parent: Some(parent),
            kind: NodeKind::Text(text.to_string()),
        });
        self.element_mut(parent).children.push(id);
    }

    fn element(&self, id: ElementId) -> &ElementData {
        match &self.nodes[id.0].kind {
            NodeKind::Element(data) => data,
            NodeKind::Text(_) => panic!("{} is a text node", id),
        }
    }

    fn element_mut(&mut self, id: ElementId) -> &mut ElementData {
        match &mut self.nodes[id.0].kind {
            NodeKind::Element(data) => data,
            NodeKind::Text(_) => panic!("{} is a text node", id),
        }
    }

    fn is_element(&self, id: ElementId) -> bool {
        matches!(self.nodes[id.0].kind, NodeKind::Element(_))
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Attributes
    // ─────────────────────────────────────────────────────────────────────────

    pub fn tag_name(&self, el: ElementId) -> &str {
        &self.element(el).tag
    }

    pub fn attribute(&self, el: ElementId, name: &str) -> Option<&str> {
        self.element(el)
            .attributes
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    pub fn has_attribute(&self, el: ElementId, name: &str) -> bool {
        self.attribute(el, name).is_some()
    }

    /// Set an attribute; names are stored lower-cased like HTML does
    pub fn set_attribute(&mut self, el: ElementId, name: &str, value: &str) {
        let name = name.to_ascii_lowercase();
        let attributes = &mut self.element_mut(el).attributes;
        match attributes.iter_mut().find(|(key, _)| *key == name) {
            Some((_, existing)) => *existing = value.to_string(),
            None => attributes.push((name, value.to_string())),
        }
    }

    /// Read `data-*` attributes through their camelCase dataset key
    ///
    /// `targetStats` reads `data-target-stats`.
    pub fn dataset(&self, el: ElementId, key: &str) -> Option<&str> {
        self.attribute(el, &dataset_attribute_name(key))
    }

    pub fn id_attribute(&self, el: ElementId) -> Option<&str> {
        self.attribute(el, "id")
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Traversal
    // ─────────────────────────────────────────────────────────────────────────

    pub fn parent(&self, el: ElementId) -> Option<ElementId> {
        self.nodes[el.0].parent
    }

    /// Element children, in document order
    pub fn children(&self, el: ElementId) -> Vec<ElementId> {
        self.element(el)
            .children
            .iter()
            .copied()
            .filter(|c| self.is_element(*c))
            .collect()
    }

    /// Every element below `el` in document (pre-)order, `el` excluded
    pub fn descendants(&self, el: ElementId) -> Vec<ElementId> {
        let mut out = Vec::new();
        self.walk(el, &mut |_| true, &mut out);
        out
    }

    /// Pre-order walk below `el`. `descend` decides whether the children of an
    /// already-collected element are visited.
    pub fn descendants_pruned<F>(&self, el: ElementId, mut descend: F) -> Vec<ElementId>
    where
        F: FnMut(ElementId) -> bool,
    {
        let mut out = Vec::new();
        self.walk(el, &mut descend, &mut out);
        out
    }

    fn walk<F>(&self, el: ElementId, descend: &mut F, out: &mut Vec<ElementId>)
    where
        F: FnMut(ElementId) -> bool,
    {
        for child in self.children(el) {
            out.push(child);
            if descend(child) {
                self.walk(child, descend, out);
            }
        }
    }

    /// Parent chain from the nearest ancestor up to the root
    pub fn ancestors(&self, el: ElementId) -> Vec<ElementId> {
        let mut out = Vec::new();
        let mut current = self.parent(el);
        while let Some(id) = current {
            out.push(id);
            current = self.parent(id);
        }
        out
    }

    /// Nearest element, starting at `el` itself, with the given tag
    pub fn closest(&self, el: ElementId, tag: &str) -> Option<ElementId> {
        std::iter::once(el)
            .chain(self.ancestors(el))
            .find(|id| self.tag_name(*id).eq_ignore_ascii_case(tag))
    }

    /// Descendants of `root` carrying `attribute`, root excluded
    pub fn query_attribute(&self, root: ElementId, attribute: &str) -> Vec<ElementId> {
        self.descendants(root)
            .into_iter()
            .filter(|el| self.has_attribute(*el, attribute))
            .collect()
    }

    pub fn element_by_id(&self, id: &str) -> Option<ElementId> {
        std::iter::once(self.root)
            .chain(self.descendants(self.root))
            .find(|el| self.id_attribute(*el) == Some(id))
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Content
    // ─────────────────────────────────────────────────────────────────────────

    /// Concatenated text of every text node below `el`
    pub fn text_content(&self, el: ElementId) -> String {
        let mut out = String::new();
        self.collect_text(el, &mut out);
        out
    }

    fn collect_text(&self, el: ElementId, out: &mut String) {
        for child in &self.element(el).children {
            match &self.nodes[child.0].kind {
                NodeKind::Text(text) => out.push_str(text),
                NodeKind::Element(_) => self.collect_text(*child, out),
            }
        }
    }

    /// Replace every child of `el` with a single text node
    pub fn set_text_content(&mut self, el: ElementId, text: &str) {
        let old = std::mem::take(&mut self.element_mut(el).children);
        for child in old {
            self.nodes[child.0].parent = None;
        }
        self.append_text(el, text);
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Form controls
    // ─────────────────────────────────────────────────────────────────────────

    /// Current `value` property
    pub fn value(&self, el: ElementId) -> String {
        let data = self.element(el);
        if let Some(value) = &data.value {
            return value.clone();
        }
        if data.tag == "textarea" {
            return self.text_content(el);
        }
        self.attribute(el, "value").unwrap_or_default().to_string()
    }

    pub fn set_value(&mut self, el: ElementId, value: &str) {
        self.element_mut(el).value = Some(value.to_string());
    }

    /// Current `checked` property
    pub fn checked(&self, el: ElementId) -> bool {
        self.element(el)
            .checked
            .unwrap_or_else(|| self.has_attribute(el, "checked"))
    }

    /// Set `checked`; checking a radio unchecks the rest of its group
    pub fn set_checked(&mut self, el: ElementId, checked: bool) {
        if checked && self.is_radio(el) {
            for other in self.radio_group(el) {
                if other != el {
                    self.element_mut(other).checked = Some(false);
                }
            }
        }
        self.element_mut(el).checked = Some(checked);
    }

    fn is_radio(&self, el: ElementId) -> bool {
        self.tag_name(el) == "input"
            && self
                .attribute(el, "type")
                .is_some_and(|t| t.eq_ignore_ascii_case("radio"))
    }

    /// Radios sharing `el`'s `name` within the same form (or the whole page)
    fn radio_group(&self, el: ElementId) -> Vec<ElementId> {
        let Some(name) = self.attribute(el, "name").filter(|n| !n.is_empty()) else {
            return vec![el];
        };
        let scope = self.closest(el, "form");
        let container = scope.unwrap_or(self.root);
        self.descendants(container)
            .into_iter()
            .filter(|other| {
                self.is_radio(*other)
                    && self.attribute(*other, "name") == Some(name)
                    && self.closest(*other, "form") == scope
            })
            .collect()
    }

    /// Restore every control under `form` to its markup defaults
    pub fn reset_form(&mut self, form: ElementId) {
        for el in self.descendants(form) {
            if matches!(self.tag_name(el), "input" | "textarea" | "select") {
                let data = self.element_mut(el);
                data.value = None;
                data.checked = None;
            }
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Dialogs
    // ─────────────────────────────────────────────────────────────────────────

    /// Show a message to the user
    pub fn alert(&mut self, message: &str) {
        tracing::info!(target: "simple_components::alert", "{}", message);
        self.alerts.push(message.to_string());
    }

    /// Every alert shown so far, oldest first
    pub fn alerts(&self) -> &[String] {
        &self.alerts
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Listeners
    // ─────────────────────────────────────────────────────────────────────────

    pub fn add_event_listener(&mut self, el: ElementId, event_type: &str, listener: Listener) {
        self.element_mut(el)
            .listeners
            .push((event_type.to_string(), listener));
    }

    /// Listeners for `event_type` on `el`, in registration order
    pub fn listeners(&self, el: ElementId, event_type: &str) -> Vec<Listener> {
        self.element(el)
            .listeners
            .iter()
            .filter(|(kind, _)| kind == event_type)
            .map(|(_, listener)| *listener)
            .collect()
    }

    /// Detach every listener on the page
    pub fn clear_listeners(&mut self) {
        for node in &mut self.nodes {
            if let NodeKind::Element(data) = &mut node.kind {
                data.listeners.clear();
            }
        }
    }

    pub fn listener_count(&self, el: ElementId) -> usize {
        self.element(el).listeners.len()
    }
}

/// `targetStats` -> `data-target-stats`
fn dataset_attribute_name(key: &str) -> String {
    let mut name = String::from("data-");
    for c in key.chars() {
        if c.is_ascii_uppercase() {
            name.push('-');
            name.push(c.to_ascii_lowercase());
        } else {
            name.push(c);
        }
    }
    name
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form_with_radios() -> (Document, ElementId, Vec<ElementId>) {
        let mut doc = Document::new();
        let form = doc.create_element("form");
        doc.append_child(doc.root(), form);
        let radios: Vec<_> = ["5", "10", "20"]
            .iter()
            .map(|value| {
                let radio = doc.create_element("input");
                doc.set_attribute(radio, "type", "radio");
                doc.set_attribute(radio, "name", "amount");
                doc.set_attribute(radio, "value", value);
                doc.append_child(form, radio);
                radio
            })
            .collect();
        doc.finish_loading();
        (doc, form, radios)
    }

    #[test]
    fn test_dataset_maps_camel_case_to_data_attribute() {
        assert_eq!(dataset_attribute_name("targetStats"), "data-target-stats");
        assert_eq!(dataset_attribute_name("component"), "data-component");

        let mut doc = Document::new();
        let el = doc.create_element("div");
        doc.set_attribute(el, "data-action-form", "submit#submitForm");
        assert_eq!(doc.dataset(el, "actionForm"), Some("submit#submitForm"));
    }

    #[test]
    fn test_attribute_names_are_case_insensitive() {
        let mut doc = Document::new();
        let el = doc.create_element("DIV");
        doc.set_attribute(el, "Data-Component", "stats");
        assert_eq!(doc.tag_name(el), "div");
        assert_eq!(doc.attribute(el, "data-component"), Some("stats"));
    }

    #[test]
    fn test_descendants_are_in_document_order() {
        let mut doc = Document::new();
        let a = doc.create_element("div");
        let b = doc.create_element("span");
        let c = doc.create_element("p");
        doc.append_child(doc.root(), a);
        doc.append_child(a, b);
        doc.append_child(doc.root(), c);
        assert_eq!(doc.descendants(doc.root()), vec![a, b, c]);
        assert_eq!(doc.ancestors(b), vec![a, doc.root()]);
    }

    #[test]
    fn test_set_text_content_replaces_children() {
        let mut doc = Document::new();
        let el = doc.create_element("span");
        let inner = doc.create_element("b");
        doc.append_child(el, inner);
        doc.append_text(inner, "old");
        doc.set_text_content(el, "3");
        assert_eq!(doc.text_content(el), "3");
        assert!(doc.children(el).is_empty());
    }

    #[test]
    fn test_checking_radio_unchecks_group() {
        let (mut doc, _, radios) = form_with_radios();
        doc.set_checked(radios[0], true);
        doc.set_checked(radios[2], true);
        assert!(!doc.checked(radios[0]));
        assert!(!doc.checked(radios[1]));
        assert!(doc.checked(radios[2]));
    }

    #[test]
    fn test_reset_form_restores_defaults() {
        let (mut doc, form, radios) = form_with_radios();
        doc.set_attribute(radios[1], "checked", "");
        let text = doc.create_element("input");
        doc.set_attribute(text, "value", "default");
        doc.append_child(form, text);

        doc.set_checked(radios[0], true);
        doc.set_value(text, "typed");
        doc.reset_form(form);

        assert!(!doc.checked(radios[0]));
        assert!(doc.checked(radios[1]));
        assert_eq!(doc.value(text), "default");
    }

    #[test]
    fn test_alerts_are_recorded() {
        let mut doc = Document::new();
        doc.alert("E-mail is invalid");
        assert_eq!(doc.alerts(), ["E-mail is invalid".to_string()]);
    }
}
