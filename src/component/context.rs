// Per-call context handed to component hooks and handlers

use super::{Component, Params};
use crate::dom::{Document, ElementId};
use crate::error::NotifyError;
use crate::registry::Registry;

/// Mutable access to the page plus a handle back to the registry
///
/// Replaces a stored back-reference: the instance gets the registry for the
/// duration of one call, which keeps ownership single-rooted.
pub struct Context<'a> {
    document: &'a mut Document,
    registry: &'a Registry,
    element: ElementId,
    component: &'a str,
}

impl<'a> Context<'a> {
    pub(crate) fn new(
        document: &'a mut Document,
        registry: &'a Registry,
        element: ElementId,
        component: &'a str,
    ) -> Self {
        Self {
            document,
            registry,
            element,
            component,
        }
    }

    pub fn document(&self) -> &Document {
        &*self.document
    }

    pub fn document_mut(&mut self) -> &mut Document {
        &mut *self.document
    }

    /// Root element of the running instance
    pub fn element(&self) -> ElementId {
        self.element
    }

    /// Registered name of the running instance
    pub fn component(&self) -> &str {
        self.component
    }

    pub fn registry(&self) -> &Registry {
        self.registry
    }

    /// Broadcast `method` to every live instance of `component`
    pub fn notify(
        &mut self,
        component: &str,
        method: &str,
        params: &Params,
    ) -> Result<(), NotifyError> {
        self.registry
            .notify(&mut *self.document, component, method, params)
    }

    /// Typed broadcast; the method cannot be missing
    pub fn notify_action<C: Component>(
        &mut self,
        component: &str,
        action: C::Action,
        params: &Params,
    ) -> Result<(), NotifyError> {
        self.registry
            .notify_action::<C>(&mut *self.document, component, action, params)
    }

    pub fn alert(&mut self, message: &str) {
        self.document.alert(message);
    }
}
