//! Error and diagnostic types
//!
//! Hard failures are `Error` variants and travel through `Result`.
//! Markup mistakes are `Diagnostic` values: recorded, logged, skipped.

use crate::dom::ElementId;
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Umbrella error for the crate
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Registration(#[from] RegistrationError),

    #[error(transparent)]
    Notify(#[from] NotifyError),

    #[error("no element with id {0:?} on the page")]
    MissingElement(String),
}

/// Rejected at `register` time, before any markup is scanned
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RegistrationError {
    #[error("invalid component name {0:?}: expected [a-z][a-z0-9_]*")]
    InvalidName(String),

    #[error("component {0:?} is already registered")]
    Duplicate(String),

    #[error("component {component:?} declares method {method:?} more than once")]
    DuplicateMethod { component: String, method: String },

    #[error("component {component:?} declares unusable method name {method:?}")]
    InvalidMethod { component: String, method: String },

    #[error("cannot register {0:?}: load() was already called")]
    AlreadyLoaded(String),
}

/// Broadcast failures. These indicate an integration defect between
/// components, so they are surfaced to the caller instead of logged.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum NotifyError {
    #[error("component {component:?} has no method {method:?}")]
    UnknownMethod { component: String, method: String },

    #[error("instance {index} of {component:?} is already handling a call")]
    InstanceBusy { component: String, index: usize },

    /// Listener left on a document by a different registry
    #[error("listener points at no live instance (class {class}, index {index})")]
    DetachedListener { class: usize, index: usize },

    #[error("action type does not belong to component {0:?}")]
    ActionMismatch(String),

    #[error("{component}.{method}: {message}")]
    Handler {
        component: String,
        method: String,
        message: String,
    },
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config file {path}: {source}")]
    Toml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid value for {key}: {message}")]
    Invalid { key: &'static str, message: String },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

// ─────────────────────────────────────────────────────────────────────────────
// Diagnostics
// ─────────────────────────────────────────────────────────────────────────────

/// A non-fatal problem found while scanning or binding markup
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    /// Element names a component that was never registered
    UnknownComponent { name: String, element: ElementId },

    /// Action attribute is not of the form `event#method`
    MalformedAction {
        component: String,
        value: String,
        element: ElementId,
    },

    /// Action names a method missing from the component's dispatch table
    UnresolvedAction {
        component: String,
        method: String,
        element: ElementId,
    },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::UnknownComponent { name, element } => write!(
                f,
                "Component \"{}\" not found in registered components ({})",
                name, element
            ),
            Diagnostic::MalformedAction {
                component,
                value,
                element,
            } => write!(
                f,
                "Malformed action {:?} for component {} ({})",
                value, component, element
            ),
            Diagnostic::UnresolvedAction {
                component,
                method,
                element,
            } => write!(
                f,
                "Action {} not found on component: {} ({})",
                method, component, element
            ),
        }
    }
}
