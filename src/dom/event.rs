// DOM events and the listener records that route them to component instances

use super::ElementId;
use crate::registry::InstanceKey;

/// An event travelling from its target up through its ancestors
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    event_type: String,
    target: ElementId,
    current_target: ElementId,
    default_prevented: bool,
    propagation_stopped: bool,
}

impl Event {
    pub fn new(event_type: impl Into<String>, target: ElementId) -> Self {
        Self {
            event_type: event_type.into(),
            target,
            current_target: target,
            default_prevented: false,
            propagation_stopped: false,
        }
    }

    pub fn event_type(&self) -> &str {
        &self.event_type
    }

    /// Element the event was dispatched on
    pub fn target(&self) -> ElementId {
        self.target
    }

    /// Element whose listener is currently running
    pub fn current_target(&self) -> ElementId {
        self.current_target
    }

    pub(crate) fn set_current_target(&mut self, element: ElementId) {
        self.current_target = element;
    }

    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    pub fn default_prevented(&self) -> bool {
        self.default_prevented
    }

    /// Stop bubbling after the listeners of the current element have run
    pub fn stop_propagation(&mut self) {
        self.propagation_stopped = true;
    }

    pub fn propagation_stopped(&self) -> bool {
        self.propagation_stopped
    }
}

/// A bound action: which live instance to call, and which dispatch slot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Listener {
    pub instance: InstanceKey,
    pub slot: usize,
}
