//! Simple Components
//!
//! Declarative components bound to HTML markup. A page marks component roots
//! with `data-component="<name>"`, names child elements with
//! `data-target-<name>="<target>"` and wires events with
//! `data-action-<name>="<event>#<method>"`. The registry finds the roots,
//! builds one instance per root and lets components call each other by name.
//!
//! ```ignore
//! let mut page = Page::parse(html, MarkupConfig::default());
//! page.register("stats", ComponentClass::of::<Stats>())?;
//! page.load();
//! page.notify("stats", "increaseDonations", &Params::new())?;
//! ```

pub mod binding;
pub mod component;
pub mod config;
pub mod demo;
pub mod dom;
pub mod error;
pub mod logging;
pub mod page;
pub mod registry;

pub use component::{Bound, Component, Context, Invocation, Params};
pub use config::{Config, MarkupConfig};
pub use dom::{Document, ElementId, Event};
pub use error::{Diagnostic, Error, NotifyError, RegistrationError, Result};
pub use page::Page;
pub use registry::{ComponentClass, Registry};
