//! Component registry and loader
//!
//! Holds the name -> class table, scans a document for component roots,
//! builds one instance per root, and broadcasts method calls to the live
//! instances of a name.
//!
//! # Lifecycle
//!
//! ```text
//!   register(..)*          load(doc), document ready           notify(..)*
//! ┌──────────────┐  ───────────────────────────────────►  ┌──────────────┐
//! │   Unloaded   │                                        │    Loaded    │
//! └──────────────┘                                        └──────────────┘
//!        │ load(doc) while still loading                        ▲
//!        ▼                                                      │
//! ┌──────────────┐        document_ready(doc)                   │
//! │   Pending    │ ─────────────────────────────────────────────┘
//! └──────────────┘
//! ```
//!
//! `load()` again once loaded is a no-op.
//!
//! Instances live as long as the registry; there is no teardown.

mod class;

pub use class::ComponentClass;

use class::Mounted;

use crate::binding::{self, Scope, Targets};
use crate::component::{Bound, Component, Context, Invocation, Params};
use crate::config::MarkupConfig;
use crate::dom::{Document, ElementId, Event, Listener, ReadyState};
use crate::error::{Diagnostic, NotifyError, RegistrationError};
use std::cell::RefCell;

/// Addresses one live instance: registered class slot + position in its list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct InstanceKey {
    class: usize,
    index: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoadState {
    #[default]
    Unloaded,
    /// `load` was called before the document was ready
    Pending,
    Loaded,
}

struct Registered {
    name: String,
    class: ComponentClass,
    instances: Vec<InstanceRecord>,
}

struct InstanceRecord {
    element: ElementId,
    targets: Targets,
    cell: RefCell<Box<dyn Mounted>>,
}

/// Process-wide table of component classes and their live instances
#[derive(Default)]
pub struct Registry {
    markup: MarkupConfig,
    components: Vec<Registered>,
    state: LoadState,
    diagnostics: Vec<Diagnostic>,
}

impl Registry {
    pub fn new(markup: MarkupConfig) -> Self {
        Self {
            markup,
            ..Default::default()
        }
    }

    pub fn markup(&self) -> &MarkupConfig {
        &self.markup
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Registration
    // ─────────────────────────────────────────────────────────────────────────

    /// Register `class` under `name`; must happen before `load`
    pub fn register(&mut self, name: &str, class: ComponentClass) -> Result<(), RegistrationError> {
        if self.state != LoadState::Unloaded {
            return Err(RegistrationError::AlreadyLoaded(name.to_string()));
        }
        if !class::is_valid_name(name) {
            return Err(RegistrationError::InvalidName(name.to_string()));
        }
        if self.position(name).is_some() {
            return Err(RegistrationError::Duplicate(name.to_string()));
        }
        class.validate(name, self.markup.action_separator)?;

        tracing::debug!(
            "Registered component {} ({}) with methods {:?}",
            name,
            class.type_name(),
            class.methods()
        );
        self.components.push(Registered {
            name: name.to_string(),
            class,
            instances: Vec::new(),
        });
        Ok(())
    }

    /// Register a whole name -> class mapping, stopping at the first rejection
    pub fn register_all<'n, I>(&mut self, classes: I) -> Result<(), RegistrationError>
    where
        I: IntoIterator<Item = (&'n str, ComponentClass)>,
    {
        classes
            .into_iter()
            .try_for_each(|(name, class)| self.register(name, class))
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.components.iter().position(|c| c.name == name)
    }

    pub fn is_registered(&self, name: &str) -> bool {
        self.position(name).is_some()
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Loading
    // ─────────────────────────────────────────────────────────────────────────

    pub fn state(&self) -> LoadState {
        self.state
    }

    pub fn is_loaded(&self) -> bool {
        self.state == LoadState::Loaded
    }

    /// Scan `doc` for component roots and bind one instance per root
    ///
    /// Returns the number of instances created. Unknown component names are
    /// recorded as diagnostics and skipped. A second call does nothing.
    ///
    /// On a document that is still loading the scan is deferred until
    /// [`Registry::document_ready`], and 0 is returned.
    pub fn load(&mut self, doc: &mut Document) -> usize {
        match self.state {
            LoadState::Loaded => {
                tracing::debug!("Registry already loaded, ignoring load()");
                0
            }
            LoadState::Pending => self.document_ready(doc),
            LoadState::Unloaded if doc.ready_state() != ReadyState::Complete => {
                tracing::debug!("Document still loading, deferring component scan");
                self.state = LoadState::Pending;
                0
            }
            LoadState::Unloaded => self.scan(doc),
        }
    }

    /// The "document ready" signal: runs a load deferred by [`Registry::load`]
    ///
    /// Does nothing unless a load is pending and `doc` is complete.
    pub fn document_ready(&mut self, doc: &mut Document) -> usize {
        if self.state != LoadState::Pending || doc.ready_state() != ReadyState::Complete {
            return 0;
        }
        self.scan(doc)
    }

    fn scan(&mut self, doc: &mut Document) -> usize {
        let attribute = self.markup.component_attribute.clone();
        let roots: Vec<ElementId> = std::iter::once(doc.root())
            .chain(doc.descendants(doc.root()))
            .filter(|el| doc.has_attribute(*el, &attribute))
            .collect();

        let mut created = 0;
        for root in roots {
            let name = doc.attribute(root, &attribute).unwrap_or_default().to_string();
            match self.position(&name) {
                Some(class) => {
                    self.instantiate(doc, class, root);
                    created += 1;
                }
                None => self.record(Diagnostic::UnknownComponent {
                    name,
                    element: root,
                }),
            }
        }

        self.state = LoadState::Loaded;
        tracing::info!(
            "Loaded {} component instance(s), {} diagnostic(s)",
            created,
            self.diagnostics.len()
        );
        created
    }

    /// Bind targets, attach actions, construct, initialize, then publish
    fn instantiate(&mut self, doc: &mut Document, class: usize, root: ElementId) {
        let key = InstanceKey {
            class,
            index: self.components[class].instances.len(),
        };

        let registered = &self.components[class];
        let scope = Scope::new(&registered.name, root, &self.markup);
        let binding = binding::bind(doc, &scope, registered.class.methods());

        for action in &binding.actions {
            doc.add_event_listener(
                action.element,
                &action.event,
                Listener {
                    instance: key,
                    slot: action.slot,
                },
            );
        }
        let mut mounted = registered.class.construct(Bound {
            element: root,
            targets: binding.targets.clone(),
        });

        {
            let registry: &Registry = self;
            let name = &registry.components[class].name;
            let mut cx = Context::new(&mut *doc, registry, root, name);
            mounted.initialize(&mut cx);
        }

        for diagnostic in binding.diagnostics {
            self.record(diagnostic);
        }
        self.components[class].instances.push(InstanceRecord {
            element: root,
            targets: binding.targets,
            cell: RefCell::new(mounted),
        });
    }

    fn record(&mut self, diagnostic: Diagnostic) {
        if matches!(diagnostic, Diagnostic::UnknownComponent { .. }) {
            tracing::warn!("{}", diagnostic);
        }
        self.diagnostics.push(diagnostic);
    }

    /// Every non-fatal problem seen during load, in order
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Instances
    // ─────────────────────────────────────────────────────────────────────────

    /// Number of live instances for `name` (0 when unregistered)
    pub fn instance_count(&self, name: &str) -> usize {
        self.position(name)
            .map(|i| self.components[i].instances.len())
            .unwrap_or(0)
    }

    /// Root element of instance `index` of `name`
    pub fn instance_element(&self, name: &str, index: usize) -> Option<ElementId> {
        let class = self.position(name)?;
        Some(self.components[class].instances.get(index)?.element)
    }

    /// Resolved targets of instance `index` of `name`
    pub fn instance_targets(&self, name: &str, index: usize) -> Option<&Targets> {
        let class = self.position(name)?;
        Some(&self.components[class].instances.get(index)?.targets)
    }

    /// Borrow instance `index` of `name` as its concrete type
    ///
    /// `None` if the instance is missing, of another type, or currently running.
    pub fn with_instance<C, R>(&self, name: &str, index: usize, f: impl FnOnce(&C) -> R) -> Option<R>
    where
        C: Component,
    {
        let class = self.position(name)?;
        let record = self.components[class].instances.get(index)?;
        let mounted = record.cell.try_borrow().ok()?;
        mounted.as_any().downcast_ref::<C>().map(f)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Broadcast
    // ─────────────────────────────────────────────────────────────────────────

    /// Call `method` with `params` on every live instance of `name`, in
    /// creation order
    ///
    /// Unknown names and names without instances are no-ops. A method missing
    /// from the dispatch table is an `UnknownMethod` error. A handler error
    /// stops the broadcast and is returned.
    pub fn notify(
        &self,
        doc: &mut Document,
        name: &str,
        method: &str,
        params: &Params,
    ) -> Result<(), NotifyError> {
        let Some(class) = self.position(name) else {
            tracing::debug!("notify({}, {}): no such component", name, method);
            return Ok(());
        };
        let registered = &self.components[class];
        if registered.instances.is_empty() {
            return Ok(());
        }
        let slot = registered
            .class
            .slot(method)
            .ok_or_else(|| NotifyError::UnknownMethod {
                component: name.to_string(),
                method: method.to_string(),
            })?;
        self.broadcast(doc, class, slot, params)
    }

    /// Typed variant of [`Registry::notify`]
    pub fn notify_action<C: Component>(
        &self,
        doc: &mut Document,
        name: &str,
        action: C::Action,
        params: &Params,
    ) -> Result<(), NotifyError> {
        let Some(class) = self.position(name) else {
            return Ok(());
        };
        let registered = &self.components[class];
        if !registered.class.is::<C>() {
            return Err(NotifyError::ActionMismatch(name.to_string()));
        }
        let slot = C::dispatch_table()
            .iter()
            .position(|(_, a)| *a == action)
            .ok_or_else(|| NotifyError::ActionMismatch(name.to_string()))?;
        self.broadcast(doc, class, slot, params)
    }

    fn broadcast(
        &self,
        doc: &mut Document,
        class: usize,
        slot: usize,
        params: &Params,
    ) -> Result<(), NotifyError> {
        let registered = &self.components[class];
        for (index, record) in registered.instances.iter().enumerate() {
            let mut mounted =
                record
                    .cell
                    .try_borrow_mut()
                    .map_err(|_| NotifyError::InstanceBusy {
                        component: registered.name.clone(),
                        index,
                    })?;
            let mut cx = Context::new(&mut *doc, self, record.element, &registered.name);
            mounted.invoke(slot, Invocation::Params(params), &mut cx)?;
        }
        Ok(())
    }

    /// Run one action listener for `event`
    pub(crate) fn invoke_listener(
        &self,
        doc: &mut Document,
        listener: Listener,
        event: &mut Event,
    ) -> Result<(), NotifyError> {
        let InstanceKey { class, index } = listener.instance;
        let Some((registered, record)) = self
            .components
            .get(class)
            .and_then(|registered| Some((registered, registered.instances.get(index)?)))
        else {
            return Err(NotifyError::DetachedListener { class, index });
        };
        let mut mounted = record
            .cell
            .try_borrow_mut()
            .map_err(|_| NotifyError::InstanceBusy {
                component: registered.name.clone(),
                index,
            })?;
        let mut cx = Context::new(doc, self, record.element, &registered.name);
        mounted.invoke(listener.slot, Invocation::Event(event), &mut cx)
    }
}
