// Resolved target groups
//
// Cardinality is fixed at bind time: one match exposes `<name>Target`,
// two or more expose `<name>Targets`, zero exposes nothing.

use crate::dom::ElementId;

/// A target group as seen by the component
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetBinding<'a> {
    One(ElementId),
    Many(&'a [ElementId]),
}

/// Target name -> matching elements, groups in first-seen order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Targets {
    groups: Vec<(String, Vec<ElementId>)>,
}

impl Targets {
    pub(crate) fn push(&mut self, name: &str, element: ElementId) {
        match self.groups.iter_mut().find(|(key, _)| key == name) {
            Some((_, elements)) => elements.push(element),
            None => self.groups.push((name.to_string(), vec![element])),
        }
    }

    pub fn binding(&self, name: &str) -> Option<TargetBinding<'_>> {
        self.groups
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, elements)| match elements.as_slice() {
                [single] => TargetBinding::One(*single),
                many => TargetBinding::Many(many),
            })
    }

    /// `<name>Target`: present only when exactly one element matched
    pub fn target(&self, name: &str) -> Option<ElementId> {
        match self.binding(name)? {
            TargetBinding::One(el) => Some(el),
            TargetBinding::Many(_) => None,
        }
    }

    /// `<name>Targets`: present only when two or more elements matched
    pub fn targets(&self, name: &str) -> Option<&[ElementId]> {
        match self.binding(name)? {
            TargetBinding::Many(elements) => Some(elements),
            TargetBinding::One(_) => None,
        }
    }

    /// Every match regardless of cardinality (empty when absent)
    pub fn all(&self, name: &str) -> &[ElementId] {
        self.groups
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, elements)| elements.as_slice())
            .unwrap_or_default()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.groups.iter().map(|(key, _)| key.as_str())
    }

    /// Exposed property names, e.g. `emailTarget`, `amountTargets`
    pub fn property_names(&self) -> Vec<String> {
        self.groups
            .iter()
            .map(|(key, elements)| {
                if elements.len() > 1 {
                    format!("{}Targets", key)
                } else {
                    format!("{}Target", key)
                }
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}
