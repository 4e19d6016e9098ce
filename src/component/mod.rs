//! Component contract
//!
//! A component is a type bound to one root element. Instead of looking up
//! methods by string at call time, each component declares a fixed dispatch
//! table from method names to its own `Action` enum. The registry checks the
//! table once at registration, and every later call goes through it.
//!
//! # Example
//!
//! ```ignore
//! #[derive(Debug, Clone, Copy, PartialEq, Eq)]
//! enum CounterAction { Increment }
//!
//! struct Counter { value: Option<ElementId> }
//!
//! impl Component for Counter {
//!     type Action = CounterAction;
//!
//!     fn dispatch_table() -> &'static [(&'static str, CounterAction)] {
//!         &[("increment", CounterAction::Increment)]
//!     }
//!
//!     fn create(bound: Bound) -> Self {
//!         Counter { value: bound.targets.target("value") }
//!     }
//!
//!     fn handle(&mut self, action: CounterAction, _: Invocation<'_>, cx: &mut Context<'_>)
//!         -> Result<(), NotifyError>
//!     {
//!         // ...
//!         Ok(())
//!     }
//! }
//! ```

mod context;
mod params;

pub use context::Context;
pub use params::Params;

use crate::binding::Targets;
use crate::dom::{ElementId, Event};
use crate::error::NotifyError;
use std::fmt;

/// What a freshly bound component receives at construction
#[derive(Debug, Clone)]
pub struct Bound {
    /// The element carrying the component marker
    pub element: ElementId,
    pub targets: Targets,
}

/// How a component method is being called
#[derive(Debug)]
pub enum Invocation<'a> {
    /// From an action listener, with the triggering event
    Event(&'a mut Event),
    /// From a registry broadcast, with the caller's params
    Params(&'a Params),
}

impl Invocation<'_> {
    pub fn event(&mut self) -> Option<&mut Event> {
        match self {
            Invocation::Event(event) => Some(event),
            Invocation::Params(_) => None,
        }
    }

    pub fn params(&self) -> Option<&Params> {
        match self {
            Invocation::Params(params) => Some(params),
            Invocation::Event(_) => None,
        }
    }
}

/// A component type that can be registered under a name
pub trait Component: Sized + 'static {
    /// Every callable method, as a closed set
    type Action: Copy + PartialEq + fmt::Debug + 'static;

    /// Method name -> action. Names are what markup and `notify` use.
    fn dispatch_table() -> &'static [(&'static str, Self::Action)];

    /// Construct from the bound root; targets are already resolved and
    /// listeners already attached
    fn create(bound: Bound) -> Self;

    /// Post-construction hook, runs once after binding
    fn initialize(&mut self, _cx: &mut Context<'_>) {}

    /// Run one method
    fn handle(
        &mut self,
        action: Self::Action,
        invocation: Invocation<'_>,
        cx: &mut Context<'_>,
    ) -> Result<(), NotifyError>;
}
