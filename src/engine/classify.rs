//! Operand classification
//!
//! Splits a runtime value into the two shapes dispatch cares about:
//! primitives, which can never own handlers, and taggables, which carry a
//! (possibly empty) handler registry. Untagged structural objects classify
//! as taggable so the category default policies apply to them uniformly.

use crate::value::{ObjRef, PrimitiveKind, Value};

/// A classified operand
#[derive(Debug)]
pub enum Operand<'a> {
    Primitive(PrimitiveKind),
    Taggable(&'a ObjRef),
}

/// Classify a value. Pure; never fails.
pub fn classify(value: &Value) -> Operand<'_> {
    match value {
        Value::Number(_) => Operand::Primitive(PrimitiveKind::Number),
        Value::Str(_) => Operand::Primitive(PrimitiveKind::Str),
        Value::Bool(_) => Operand::Primitive(PrimitiveKind::Bool),
        Value::Object(obj) => Operand::Taggable(obj),
    }
}
