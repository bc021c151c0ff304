//! Dispatch engine boundary
//!
//! This module is the contract surface the host expression evaluator calls:
//! - [`dispatch_binary`]: operator token plus two fully evaluated operands
//! - [`dispatch_unary`]: operator token, syntactic position, one operand
//! - [`register_instance_handler`]: attach a handler to one specific value
//!
//! Type-level registration happens through [`crate::value::TypeDef::define`]
//! at type definition time; see [`crate::value::object`].
//!
//! `!=` and `!==` are accepted here but have no selector: they are always
//! the boolean negation of `==` / `===`, computed after equality resolves.
//! Compound assignment (`+=`, `<<=`, ...) has no entry point anywhere in
//! the engine: it is binary dispatch of the underlying operator followed by
//! a host-side rebind of the LHS slot.
//!
//! # Execution Model
//!
//! Every call is a single synchronous computation that runs to completion
//! (return or raise) before the caller continues. Operands arrive fully
//! evaluated, left to right. The engine reads registries and never writes
//! them; the only mutation it triggers is the one explicitly delegated to
//! `++`/`--` handlers.

pub mod classify;
pub mod errors;
pub mod ops;
pub mod policy;

pub use ops::unary::Position;

use tracing::trace;

use crate::engine::errors::EngineError;
use crate::registry::{Handler, OperatorSelector};
use crate::value::{ObjRef, Value};

/// Dispatch a binary operator over two evaluated operands.
///
/// Accepts the binary operator tokens of the selector set plus the derived
/// negation forms `!=` and `!==`. Returns the handler's (or built-in)
/// result, or raises: `OperatorNotDefined` when a default policy throws,
/// `UnknownOperator` for a token outside the closed set, or the handler's
/// own error passed through unchanged.
pub fn dispatch_binary(operator: &str, lhs: &Value, rhs: &Value) -> Result<Value, EngineError> {
    trace!(operator, lhs = lhs.kind_name(), rhs = rhs.kind_name(), "binary dispatch");
    match operator {
        "!=" => return Ok(Value::Bool(!ops::equality::loose_equals(lhs, rhs)?)),
        "!==" => return Ok(Value::Bool(!ops::equality::strict_equals(lhs, rhs)?)),
        _ => {}
    }
    let selector = OperatorSelector::from_binary_literal(operator).ok_or_else(|| {
        EngineError::UnknownOperator {
            literal: operator.to_string(),
        }
    })?;
    match selector {
        OperatorSelector::Equals => Ok(Value::Bool(ops::equality::loose_equals(lhs, rhs)?)),
        OperatorSelector::StrictEquals => {
            Ok(Value::Bool(ops::equality::strict_equals(lhs, rhs)?))
        }
        _ => ops::binary::dispatch_general_binary(selector, lhs, rhs),
    }
}

/// Dispatch a unary operator over one evaluated operand.
///
/// `position` matters only for `++`/`--`; pass [`Position::None`] for
/// `-x` and `~x`.
pub fn dispatch_unary(
    operator: &str,
    position: Position,
    operand: &Value,
) -> Result<Value, EngineError> {
    trace!(operator, ?position, operand = operand.kind_name(), "unary dispatch");
    let selector = OperatorSelector::from_unary_literal(operator).ok_or_else(|| {
        EngineError::UnknownOperator {
            literal: operator.to_string(),
        }
    })?;
    ops::unary::dispatch_unary_op(selector, position, operand)
}

/// Attach a handler to one specific value, shadowing its type-level
/// registry for that selector. The instance registry is created lazily on
/// first registration.
///
/// The same registration-time guards as type definition apply: the handler
/// arity must match the selector, and `StrictEquals` requires `Equals` to
/// already be present on this instance's own registry.
pub fn register_instance_handler(
    obj: &ObjRef,
    selector: OperatorSelector,
    handler: Handler,
) -> Result<(), EngineError> {
    let mut borrowed = obj.borrow_mut();
    if !handler.arity_matches(selector) {
        return Err(EngineError::InvalidOverrideConfiguration {
            type_name: borrowed.type_name().map(str::to_string),
            reason: format!(
                "{} handler registered for selector {:?}",
                handler.arity_name(),
                selector
            ),
        });
    }
    if selector == OperatorSelector::StrictEquals
        && !borrowed
            .instance_handlers()
            .is_some_and(|registry| registry.contains_key(&OperatorSelector::Equals))
    {
        return Err(EngineError::InvalidOverrideConfiguration {
            type_name: borrowed.type_name().map(str::to_string),
            reason: "StrictEquals registered without Equals".to_string(),
        });
    }
    borrowed.instance_handlers_mut().insert(selector, handler);
    Ok(())
}
