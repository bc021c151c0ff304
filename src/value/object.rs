//! Objects and type definitions
//!
//! An [`Object`] is the only value kind that can own operator handlers. It
//! carries named fields, an optional link to its [`TypeDef`], and a lazily
//! created instance-level handler registry that shadows the type-level one.
//!
//! Type definitions are built once through [`TypeDefBuilder`] and frozen by
//! [`TypeDefBuilder::build`]; after that the type-level registry is
//! immutable and shared by every instance of the type. Registration-time
//! invariants (handler arity, `StrictEquals` requiring `Equals` on the same
//! registry level) are enforced by the builder, never at dispatch time.

use std::cell::RefCell;
use std::rc::Rc;

use rustc_hash::FxHashMap;

use crate::engine::errors::EngineError;
use crate::registry::{Handler, HandlerRegistry, OperatorSelector};
use crate::value::Value;

/// Shared, mutable reference to an object. `Rc` identity is the storage
/// identity the equality fast path checks.
pub type ObjRef = Rc<RefCell<Object>>;

/// A taggable runtime value: named fields plus up to two handler registries
#[derive(Debug)]
pub struct Object {
    type_def: Option<Rc<TypeDef>>,
    fields: FxHashMap<String, Value>,
    instance_handlers: Option<HandlerRegistry>,
}

impl Object {
    /// Create an untagged structural object: no type definition, no
    /// handlers. Behaves like a taggable value with an empty registry, so
    /// the category default policies apply uniformly.
    pub fn untagged() -> ObjRef {
        Rc::new(RefCell::new(Object {
            type_def: None,
            fields: FxHashMap::default(),
            instance_handlers: None,
        }))
    }

    /// Create an instance of a defined type
    pub fn instance_of(type_def: &Rc<TypeDef>) -> ObjRef {
        Rc::new(RefCell::new(Object {
            type_def: Some(Rc::clone(type_def)),
            fields: FxHashMap::default(),
            instance_handlers: None,
        }))
    }

    pub fn type_def(&self) -> Option<&Rc<TypeDef>> {
        self.type_def.as_ref()
    }

    pub fn type_name(&self) -> Option<&str> {
        self.type_def.as_deref().map(TypeDef::name)
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }

    pub fn set(&mut self, field: impl Into<String>, value: Value) {
        self.fields.insert(field.into(), value);
    }

    pub fn fields(&self) -> &FxHashMap<String, Value> {
        &self.fields
    }

    pub(crate) fn instance_handlers(&self) -> Option<&HandlerRegistry> {
        self.instance_handlers.as_ref()
    }

    pub(crate) fn instance_handlers_mut(&mut self) -> &mut HandlerRegistry {
        self.instance_handlers.get_or_insert_with(FxHashMap::default)
    }

    /// Detached copy of the observable state: fields, type link and
    /// instance registry. Used for the postfix `++`/`--` pre-mutation
    /// result; the copy never aliases the live object.
    pub fn snapshot(&self) -> ObjRef {
        Rc::new(RefCell::new(Object {
            type_def: self.type_def.clone(),
            fields: self.fields.clone(),
            instance_handlers: self.instance_handlers.clone(),
        }))
    }
}

/// An immutable type definition: a name, an optional parent in the
/// delegation chain, and the type-level handler registry shared by all
/// instances.
#[derive(Debug)]
pub struct TypeDef {
    name: String,
    parent: Option<Rc<TypeDef>>,
    handlers: HandlerRegistry,
}

impl TypeDef {
    /// Start defining a type. Handlers are appended on the builder and the
    /// registry is frozen by [`TypeDefBuilder::build`].
    pub fn define(name: impl Into<String>) -> TypeDefBuilder {
        TypeDefBuilder {
            name: name.into(),
            parent: None,
            handlers: FxHashMap::default(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn parent(&self) -> Option<&Rc<TypeDef>> {
        self.parent.as_ref()
    }

    /// Handler registered on this definition itself, ignoring the chain
    pub(crate) fn own_handler(&self, selector: OperatorSelector) -> Option<Handler> {
        self.handlers.get(&selector).cloned()
    }
}

/// Builder for a [`TypeDef`]; the only way handlers reach a type-level
/// registry.
pub struct TypeDefBuilder {
    name: String,
    parent: Option<Rc<TypeDef>>,
    handlers: HandlerRegistry,
}

impl TypeDefBuilder {
    /// Set the parent type. Lookup walks from the most-derived definition
    /// to the least-derived; an override here shadows the parent's.
    pub fn derive(mut self, parent: &Rc<TypeDef>) -> Self {
        self.parent = Some(Rc::clone(parent));
        self
    }

    /// Register a handler for one selector. Re-registering a selector
    /// during definition replaces the earlier entry.
    pub fn handler(mut self, selector: OperatorSelector, handler: Handler) -> Self {
        self.handlers.insert(selector, handler);
        self
    }

    /// Validate and freeze the registry, yielding the shared definition.
    ///
    /// Fails with [`EngineError::InvalidOverrideConfiguration`] if a handler
    /// arity does not match its selector, or if `StrictEquals` was
    /// registered without `Equals` on this same registry level.
    pub fn build(self) -> Result<Rc<TypeDef>, EngineError> {
        for (&selector, handler) in &self.handlers {
            if !handler.arity_matches(selector) {
                return Err(EngineError::InvalidOverrideConfiguration {
                    type_name: Some(self.name.clone()),
                    reason: format!(
                        "{} handler registered for selector {:?}",
                        handler.arity_name(),
                        selector
                    ),
                });
            }
        }
        if self.handlers.contains_key(&OperatorSelector::StrictEquals)
            && !self.handlers.contains_key(&OperatorSelector::Equals)
        {
            return Err(EngineError::InvalidOverrideConfiguration {
                type_name: Some(self.name.clone()),
                reason: "StrictEquals registered without Equals".to_string(),
            });
        }
        Ok(Rc::new(TypeDef {
            name: self.name,
            parent: self.parent,
            handlers: self.handlers,
        }))
    }
}
