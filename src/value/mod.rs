//! Runtime value representation
//!
//! This module defines the [`Value`] enum, the operand type the host
//! evaluator hands to the dispatch engine. Values are tagged and type-safe.
//!
//! # Value Types
//!
//! - [`Value::Number`]: 64-bit float
//! - [`Value::Str`]: owned string
//! - [`Value::Bool`]: boolean
//! - [`Value::Object`]: shared reference to an [`Object`], the only value
//!   kind that can own operator handlers
//!
//! Numbers, strings and booleans are *primitives*: they never own handlers
//! and participate in dispatch only through the built-in fallback and the
//! category default policies.

pub mod object;

pub use object::{Object, ObjRef, TypeDef, TypeDefBuilder};

/// A runtime value as seen by the dispatch engine
#[derive(Debug, Clone)]
pub enum Value {
    Number(f64),
    Str(String),
    Bool(bool),
    Object(ObjRef),
}

/// The kind of a primitive value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrimitiveKind {
    Number,
    Str,
    Bool,
}

impl Value {
    /// The not-a-number sentinel returned by arithmetic/shift default policies
    pub fn nan() -> Value {
        Value::Number(f64::NAN)
    }

    /// Get the numeric value, returns None if not a Number
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Get the boolean value, returns None if not a Bool
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Get the string contents, returns None if not a Str
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Get the object reference, returns None if not an Object
    pub fn as_object(&self) -> Option<&ObjRef> {
        match self {
            Value::Object(obj) => Some(obj),
            _ => None,
        }
    }

    /// Truthiness used when a handler result feeds a boolean context
    /// (equality derivation and `!=`/`!==` negation).
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Number(n) => *n != 0.0 && !n.is_nan(),
            Value::Str(s) => !s.is_empty(),
            Value::Bool(b) => *b,
            Value::Object(_) => true,
        }
    }

    /// Human-readable kind name used in error messages
    pub fn kind_name(&self) -> &'static str {
        match self {
            Value::Number(_) => "number",
            Value::Str(_) => "string",
            Value::Bool(_) => "boolean",
            Value::Object(_) => "object",
        }
    }
}

/// Storage identity: objects compare by reference, primitives by kind and
/// payload. This is the identity relation the equality fast path uses, not
/// the host language's `==`.
impl PartialEq for Value {
    fn eq(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Number(a), Value::Number(b)) => a == b,
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Object(a), Value::Object(b)) => std::rc::Rc::ptr_eq(a, b),
            _ => false,
        }
    }
}
