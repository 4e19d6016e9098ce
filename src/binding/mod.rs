//! Binder: resolves a component's targets and actions from its markup
//!
//! Everything here is read-only over the document. The registry takes the
//! resulting [`Binding`] and attaches listeners, so a half-bound instance
//! never exists.
//!
//! # Markup
//!
//! ```text
//! <form data-component="form" data-action-form="submit#submitForm">
//!   <input data-target-form="email">
//!   <input data-target-form="amount" data-action-form="change#clearCustomAmount">
//!   <input data-target-form="amount" data-action-form="change#clearCustomAmount">
//! </form>
//! ```
//!
//! yields `emailTarget` (one element) and `amountTargets` (two elements),
//! plus three listeners.

mod action;
mod scope;
mod targets;

pub use action::ActionSpec;
pub use scope::{capitalize, AttributeKey, Scope};
pub use targets::{TargetBinding, Targets};

use crate::dom::{Document, ElementId};
use crate::error::Diagnostic;

/// One listener to attach: `event` on `element` calls dispatch slot `slot`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoundAction {
    pub element: ElementId,
    pub event: String,
    pub slot: usize,
    pub method: &'static str,
}

/// Result of binding one component root
#[derive(Debug, Clone, Default)]
pub struct Binding {
    pub targets: Targets,
    pub actions: Vec<BoundAction>,
    pub diagnostics: Vec<Diagnostic>,
}

/// Resolve targets, then actions, for one component root
///
/// `methods` is the component's dispatch table; an action's slot is the
/// position of its method in that table.
pub fn bind(doc: &Document, scope: &Scope<'_>, methods: &[&'static str]) -> Binding {
    let targets = resolve_targets(doc, scope);
    let mut binding = Binding {
        targets,
        ..Default::default()
    };
    resolve_actions(doc, scope, methods, &mut binding);

    tracing::debug!(
        "Bound {} at {}: {} target group(s), {} action(s)",
        scope.name(),
        scope.root(),
        binding.targets.len(),
        binding.actions.len()
    );
    binding
}

fn resolve_targets(doc: &Document, scope: &Scope<'_>) -> Targets {
    let key = scope.target_key();
    let mut targets = Targets::default();
    for el in scope.elements(doc) {
        if let Some(name) = key.read(doc, el) {
            targets.push(name, el);
        }
    }
    targets
}

fn resolve_actions(
    doc: &Document,
    scope: &Scope<'_>,
    methods: &[&'static str],
    binding: &mut Binding,
) {
    let key = scope.action_key();
    let candidates = std::iter::once(scope.root()).chain(
        scope
            .elements(doc)
            .into_iter()
            .filter(|el| !scope.is_nested_root(doc, *el)),
    );

    for el in candidates {
        let Some(value) = key.read(doc, el) else {
            continue;
        };

        let Some(spec) = ActionSpec::parse(value, scope.separator()) else {
            let diagnostic = Diagnostic::MalformedAction {
                component: scope.name().to_string(),
                value: value.to_string(),
                element: el,
            };
            tracing::warn!("{}", diagnostic);
            binding.diagnostics.push(diagnostic);
            continue;
        };

        match methods.iter().position(|m| *m == spec.method) {
            Some(slot) => binding.actions.push(BoundAction {
                element: el,
                event: spec.event.to_string(),
                slot,
                method: methods[slot],
            }),
            None => {
                let diagnostic = Diagnostic::UnresolvedAction {
                    component: scope.name().to_string(),
                    method: spec.method.to_string(),
                    element: el,
                };
                tracing::warn!("{}", diagnostic);
                binding.diagnostics.push(diagnostic);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MarkupConfig;

    const METHODS: &[&str] = &["submitForm", "clearAmounts", "clearCustomAmount"];

    fn bind_first(html: &str, name: &str) -> (Document, Binding) {
        let doc = Document::parse(html);
        let markup = MarkupConfig::default();
        let root = doc
            .query_attribute(doc.root(), "data-component")
            .into_iter()
            .find(|el| doc.attribute(*el, "data-component") == Some(name))
            .expect("component root");
        let scope = Scope::new(name, root, &markup);
        let binding = bind(&doc, &scope, METHODS);
        (doc, binding)
    }

    #[test]
    fn test_single_target_is_singular() {
        let (doc, binding) = bind_first(
            r#"<form data-component="form"><input id="e" data-target-form="email"></form>"#,
            "form",
        );
        let email = doc.element_by_id("e").unwrap();
        assert_eq!(binding.targets.target("email"), Some(email));
        assert_eq!(binding.targets.targets("email"), None);
    }

    #[test]
    fn test_repeated_target_is_sequence_in_document_order() {
        let (doc, binding) = bind_first(
            r#"<form data-component="form">
                 <input id="a" data-target-form="amount">
                 <div><input id="b" data-target-form="amount"></div>
                 <input id="c" data-target-form="amount">
               </form>"#,
            "form",
        );
        let expected: Vec<_> = ["a", "b", "c"]
            .iter()
            .map(|id| doc.element_by_id(id).unwrap())
            .collect();
        assert_eq!(binding.targets.targets("amount"), Some(expected.as_slice()));
        assert_eq!(binding.targets.target("amount"), None);
    }

    #[test]
    fn test_missing_target_is_absent() {
        let (_, binding) = bind_first(r#"<form data-component="form"></form>"#, "form");
        assert!(binding.targets.is_empty());
        assert_eq!(binding.targets.target("email"), None);
        assert!(binding.targets.all("email").is_empty());
    }

    #[test]
    fn test_target_names_are_case_sensitive() {
        let (_, binding) = bind_first(
            r#"<form data-component="form">
                 <input data-target-form="Email"><input data-target-form="email">
               </form>"#,
            "form",
        );
        assert!(binding.targets.target("Email").is_some());
        assert!(binding.targets.target("email").is_some());
    }

    #[test]
    fn test_other_component_targets_are_ignored() {
        let (_, binding) = bind_first(
            r#"<form data-component="form">
                 <span data-target-stats="raised"></span>
               </form>"#,
            "form",
        );
        assert!(binding.targets.is_empty());
    }

    #[test]
    fn test_nested_same_name_scope_keeps_its_own_targets() {
        let (doc, binding) = bind_first(
            r#"<form data-component="form">
                 <input id="outer" data-target-form="email">
                 <div data-component="form"><input id="inner" data-target-form="email"></div>
               </form>"#,
            "form",
        );
        let outer = doc.element_by_id("outer").unwrap();
        assert_eq!(binding.targets.target("email"), Some(outer));
    }

    #[test]
    fn test_nested_same_name_root_actions_belong_to_inner_scope() {
        let (doc, binding) = bind_first(
            r#"<form id="outer" data-component="form">
                 <div id="inner" data-component="form" data-action-form="click#submitForm"></div>
               </form>"#,
            "form",
        );
        let inner = doc.element_by_id("inner").unwrap();
        assert!(binding.actions.iter().all(|a| a.element != inner));
        assert!(binding.diagnostics.is_empty());

        let markup = MarkupConfig::default();
        let inner_scope = Scope::new("form", inner, &markup);
        assert!(!inner_scope.is_nested_root(&doc, inner));
        let inner_binding = bind(&doc, &inner_scope, METHODS);
        assert_eq!(inner_binding.actions.len(), 1);
        assert_eq!(inner_binding.actions[0].element, inner);
    }

    #[test]
    fn test_actions_on_root_and_descendants() {
        let (doc, binding) = bind_first(
            r#"<form id="f" data-component="form" data-action-form="submit#submitForm">
                 <input id="r" data-action-form="change#clearCustomAmount">
               </form>"#,
            "form",
        );
        let form = doc.element_by_id("f").unwrap();
        let radio = doc.element_by_id("r").unwrap();
        assert_eq!(
            binding.actions,
            vec![
                BoundAction {
                    element: form,
                    event: "submit".into(),
                    slot: 0,
                    method: "submitForm",
                },
                BoundAction {
                    element: radio,
                    event: "change".into(),
                    slot: 2,
                    method: "clearCustomAmount",
                },
            ]
        );
        assert!(binding.diagnostics.is_empty());
    }

    #[test]
    fn test_unknown_and_malformed_actions_are_diagnostics() {
        let (doc, binding) = bind_first(
            r#"<form data-component="form">
                 <button id="a" data-action-form="click#launchRocket"></button>
                 <button id="b" data-action-form="clickSubmit"></button>
                 <button id="c" data-action-form="click#submitForm"></button>
               </form>"#,
            "form",
        );
        let a = doc.element_by_id("a").unwrap();
        let b = doc.element_by_id("b").unwrap();
        assert_eq!(binding.actions.len(), 1);
        assert_eq!(
            binding.diagnostics,
            vec![
                Diagnostic::UnresolvedAction {
                    component: "form".into(),
                    method: "launchRocket".into(),
                    element: a,
                },
                Diagnostic::MalformedAction {
                    component: "form".into(),
                    value: "clickSubmit".into(),
                    element: b,
                },
            ]
        );
    }
}
