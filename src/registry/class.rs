// Component classes and the type-erased instances built from them

use crate::component::{Bound, Component, Context, Invocation};
use crate::error::{NotifyError, RegistrationError};
use std::any::{Any, TypeId};
use std::fmt;

/// A registrable component type: factory plus dispatch table
#[derive(Clone)]
pub struct ComponentClass {
    type_id: TypeId,
    type_name: &'static str,
    methods: Vec<&'static str>,
    factory: fn(Bound) -> Box<dyn Mounted>,
}

impl ComponentClass {
    pub fn of<C: Component>() -> Self {
        Self {
            type_id: TypeId::of::<C>(),
            type_name: std::any::type_name::<C>(),
            methods: C::dispatch_table().iter().map(|(name, _)| *name).collect(),
            factory: mount::<C>,
        }
    }

    /// Method names in dispatch-slot order
    pub fn methods(&self) -> &[&'static str] {
        &self.methods
    }

    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    pub(crate) fn slot(&self, method: &str) -> Option<usize> {
        self.methods.iter().position(|m| *m == method)
    }

    pub(crate) fn is<C: Component>(&self) -> bool {
        self.type_id == TypeId::of::<C>()
    }

    pub(crate) fn construct(&self, bound: Bound) -> Box<dyn Mounted> {
        (self.factory)(bound)
    }

    /// Dispatch table sanity, checked once at registration
    pub(crate) fn validate(&self, name: &str, separator: char) -> Result<(), RegistrationError> {
        for (i, method) in self.methods.iter().enumerate() {
            if method.is_empty()
                || method.contains(separator)
                || method.chars().any(char::is_whitespace)
            {
                return Err(RegistrationError::InvalidMethod {
                    component: name.to_string(),
                    method: method.to_string(),
                });
            }
            if self.methods[..i].contains(method) {
                return Err(RegistrationError::DuplicateMethod {
                    component: name.to_string(),
                    method: method.to_string(),
                });
            }
        }
        Ok(())
    }
}

impl fmt::Debug for ComponentClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ComponentClass")
            .field("type_name", &self.type_name)
            .field("methods", &self.methods)
            .finish()
    }
}

/// Registered names must be `[a-z][a-z0-9_]*`
pub(crate) fn is_valid_name(name: &str) -> bool {
    let mut chars = name.chars();
    matches!(chars.next(), Some(c) if c.is_ascii_lowercase())
        && chars.all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_')
}

/// Object-safe view of a live component
pub(crate) trait Mounted {
    fn initialize(&mut self, cx: &mut Context<'_>);

    fn invoke(
        &mut self,
        slot: usize,
        invocation: Invocation<'_>,
        cx: &mut Context<'_>,
    ) -> Result<(), NotifyError>;

    fn as_any(&self) -> &dyn Any;
}

struct Instance<C: Component> {
    component: C,
}

fn mount<C: Component>(bound: Bound) -> Box<dyn Mounted> {
    Box::new(Instance {
        component: C::create(bound),
    })
}

impl<C: Component> Mounted for Instance<C> {
    fn initialize(&mut self, cx: &mut Context<'_>) {
        self.component.initialize(cx);
    }

    fn invoke(
        &mut self,
        slot: usize,
        invocation: Invocation<'_>,
        cx: &mut Context<'_>,
    ) -> Result<(), NotifyError> {
        let Some((_, action)) = C::dispatch_table().get(slot) else {
            return Err(NotifyError::UnknownMethod {
                component: cx.component().to_string(),
                method: format!("#{}", slot),
            });
        };
        self.component.handle(*action, invocation, cx)
    }

    fn as_any(&self) -> &dyn Any {
        &self.component
    }
}
