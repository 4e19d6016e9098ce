// Typed binding scope: one component name plus its root element
//
// Attribute keys are derived here and nowhere else, so markup written for
// `stats` can never be picked up by `form`.

use crate::config::MarkupConfig;
use crate::dom::{Document, ElementId};

/// Capitalize for dataset keys: first letter upper-cased, the rest lower-cased
pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

/// How a namespaced declaration is read from an element
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributeKey {
    /// Attribute name as written in markup, e.g. `data-target-stats`
    pub attribute: String,
    /// camelCase dataset key, e.g. `targetStats`
    ///
    /// Only derived for `data-<kind>-` prefixes. Any other prefix is read
    /// by attribute name, so both lookups always name the same attribute.
    pub dataset: Option<String>,
}

impl AttributeKey {
    fn new(prefix: &str, component: &str) -> Self {
        let attribute = format!("{}{}", prefix, component.to_ascii_lowercase());
        let dataset = prefix
            .strip_prefix("data-")
            .and_then(|kind| kind.strip_suffix('-'))
            .filter(|kind| !kind.is_empty() && !kind.contains('-'))
            .map(|kind| format!("{}{}", kind, capitalize(component)));
        Self { attribute, dataset }
    }

    pub fn read<'d>(&self, doc: &'d Document, el: ElementId) -> Option<&'d str> {
        match &self.dataset {
            Some(key) => doc.dataset(el, key),
            None => doc.attribute(el, &self.attribute),
        }
    }
}

/// A component name bound to one root element
#[derive(Debug, Clone)]
pub struct Scope<'a> {
    name: &'a str,
    root: ElementId,
    markup: &'a MarkupConfig,
}

impl<'a> Scope<'a> {
    pub fn new(name: &'a str, root: ElementId, markup: &'a MarkupConfig) -> Self {
        Self { name, root, markup }
    }

    pub fn name(&self) -> &'a str {
        self.name
    }

    pub fn root(&self) -> ElementId {
        self.root
    }

    pub fn separator(&self) -> char {
        self.markup.action_separator
    }

    pub fn target_key(&self) -> AttributeKey {
        AttributeKey::new(&self.markup.target_prefix, self.name)
    }

    pub fn action_key(&self) -> AttributeKey {
        AttributeKey::new(&self.markup.action_prefix, self.name)
    }

    /// Descendants belonging to this scope, in document order
    ///
    /// A nested root of the same component is included (its targets may
    /// address us) but its subtree belongs to it, not to us.
    pub fn elements(&self, doc: &Document) -> Vec<ElementId> {
        doc.descendants_pruned(self.root, |el| !self.is_nested_root(doc, el))
    }

    /// `el` is another root of this same component below our root
    ///
    /// Its actions are bound by that instance, never by us.
    pub fn is_nested_root(&self, doc: &Document, el: ElementId) -> bool {
        el != self.root && doc.attribute(el, &self.markup.component_attribute) == Some(self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capitalize() {
        assert_eq!(capitalize("stats"), "Stats");
        assert_eq!(capitalize("dONATIONform"), "Donationform");
        assert_eq!(capitalize(""), "");
    }

    #[test]
    fn test_keys_follow_component_name() {
        let markup = MarkupConfig::default();
        let doc = Document::new();
        let scope = Scope::new("stats", doc.root(), &markup);

        let target = scope.target_key();
        assert_eq!(target.attribute, "data-target-stats");
        assert_eq!(target.dataset.as_deref(), Some("targetStats"));

        let action = scope.action_key();
        assert_eq!(action.attribute, "data-action-stats");
        assert_eq!(action.dataset.as_deref(), Some("actionStats"));
    }

    #[test]
    fn test_custom_prefix_reads_attribute_directly() {
        let markup = MarkupConfig {
            target_prefix: "x-ref-".to_string(),
            ..Default::default()
        };
        let mut doc = Document::new();
        let el = doc.create_element("span");
        doc.set_attribute(el, "x-ref-stats", "raised");

        let key = Scope::new("stats", doc.root(), &markup).target_key();
        assert_eq!(key.dataset, None);
        assert_eq!(key.read(&doc, el), Some("raised"));
    }

    #[test]
    fn test_data_prefix_without_trailing_dash() {
        let markup = MarkupConfig {
            target_prefix: "data-ref".to_string(),
            ..Default::default()
        };
        let mut doc = Document::new();
        let el = doc.create_element("span");
        doc.set_attribute(el, "data-refstats", "raised");
        doc.set_attribute(el, "data-ref-stats", "elsewhere");

        let key = Scope::new("stats", doc.root(), &markup).target_key();
        assert_eq!(key.attribute, "data-refstats");
        assert_eq!(key.dataset, None);
        assert_eq!(key.read(&doc, el), Some("raised"));
    }
}
