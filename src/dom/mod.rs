//! Host document model
//!
//! A small arena-backed stand-in for the browser DOM: just the parts the
//! binder reads (elements, attributes, dataset) and drives (listeners,
//! text content, form controls).
//!
//! # Architecture
//!
//! ```text
//! HTML string ──scraper──► Document (arena of nodes, ElementId handles)
//!                              │
//!                              ├── attributes / dataset
//!                              ├── value / checked (form controls)
//!                              └── listeners ──► Listener { instance, slot }
//! ```

mod document;
mod event;
mod html;

pub use document::{Document, ReadyState};
pub use event::{Event, Listener};

use std::fmt;

/// Handle to one node in a [`Document`]
///
/// Only element nodes are ever handed out; text nodes stay internal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(usize);

impl ElementId {
    pub(crate) fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "element #{}", self.0)
    }
}
