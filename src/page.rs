//! Page: one document plus its registry, and the event loop that drives them
//!
//! Everything is single-threaded. `dispatch` plays the role of the host
//! event loop: it runs the listeners for one event along the bubbling path
//! and returns once all of them finished.

use crate::component::Params;
use crate::config::MarkupConfig;
use crate::dom::{Document, ElementId, Event};
use crate::error::{NotifyError, RegistrationError};
use crate::registry::{ComponentClass, Registry};

/// Result of dispatching one event
#[derive(Debug)]
pub struct Dispatched {
    pub event: Event,
    /// Number of listeners that ran
    pub handled: usize,
    /// Handler failures; the remaining listeners still ran
    pub errors: Vec<NotifyError>,
}

impl Dispatched {
    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }
}

pub struct Page {
    document: Document,
    registry: Registry,
}

impl Page {
    /// Pair `document` with a fresh registry
    ///
    /// Listeners left by an earlier binding are detached: they point into a
    /// registry this page does not own.
    pub fn new(mut document: Document, markup: MarkupConfig) -> Self {
        document.clear_listeners();
        Self {
            document,
            registry: Registry::new(markup),
        }
    }

    /// Parse `html` into a ready document
    pub fn parse(html: &str, markup: MarkupConfig) -> Self {
        Self::new(Document::parse(html), markup)
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn document_mut(&mut self) -> &mut Document {
        &mut self.document
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn register(&mut self, name: &str, class: ComponentClass) -> Result<(), RegistrationError> {
        self.registry.register(name, class)
    }

    pub fn register_all<'n, I>(&mut self, classes: I) -> Result<(), RegistrationError>
    where
        I: IntoIterator<Item = (&'n str, ComponentClass)>,
    {
        self.registry.register_all(classes)
    }

    /// Bind every component on the page (once)
    ///
    /// While the document is still loading this only arms the load;
    /// [`Page::finish_loading`] runs it.
    pub fn load(&mut self) -> usize {
        self.registry.load(&mut self.document)
    }

    /// Mark the document ready and run a pending load
    pub fn finish_loading(&mut self) -> usize {
        self.document.finish_loading();
        self.registry.document_ready(&mut self.document)
    }

    pub fn notify(&mut self, component: &str, method: &str, params: &Params) -> Result<(), NotifyError> {
        self.registry
            .notify(&mut self.document, component, method, params)
    }

    /// Look up an element by its `id` attribute
    pub fn by_id(&self, id: &str) -> Option<ElementId> {
        self.document.element_by_id(id)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Event loop
    // ─────────────────────────────────────────────────────────────────────────

    /// Fire `event_type` at `target` and bubble it to the root
    pub fn dispatch(&mut self, target: ElementId, event_type: &str) -> Dispatched {
        let mut event = Event::new(event_type, target);
        let mut handled = 0;
        let mut errors = Vec::new();

        let path: Vec<ElementId> = std::iter::once(target)
            .chain(self.document.ancestors(target))
            .collect();

        for element in path {
            let listeners = self.document.listeners(element, event_type);
            if listeners.is_empty() {
                continue;
            }
            event.set_current_target(element);
            for listener in listeners {
                handled += 1;
                if let Err(e) =
                    self.registry
                        .invoke_listener(&mut self.document, listener, &mut event)
                {
                    tracing::error!("Uncaught error in {} listener: {}", event_type, e);
                    errors.push(e);
                }
            }
            if event.propagation_stopped() {
                break;
            }
        }

        Dispatched {
            event,
            handled,
            errors,
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // User interaction
    // ─────────────────────────────────────────────────────────────────────────

    pub fn click(&mut self, target: ElementId) -> Dispatched {
        self.dispatch(target, "click")
    }

    pub fn submit(&mut self, form: ElementId) -> Dispatched {
        self.dispatch(form, "submit")
    }

    /// Select a checkbox/radio and fire `change`
    pub fn check(&mut self, target: ElementId) -> Dispatched {
        self.document.set_checked(target, true);
        self.dispatch(target, "change")
    }

    /// Replace a control's value and fire `input`
    pub fn type_text(&mut self, target: ElementId, text: &str) -> Dispatched {
        self.document.set_value(target, text);
        self.dispatch(target, "input")
    }
}
