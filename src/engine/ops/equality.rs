//! Equality state machine
//!
//! Two entry points sharing structure:
//!
//! - [`strict_equals`] (`===`): storage-identity fast path, then a
//!   `StrictEquals` handler, then a synthesized form derived from an
//!   `Equals` handler plus the nominal-compatibility check, then false.
//! - [`loose_equals`] (`==`): identity fast path, then an `Equals` handler,
//!   then false. There is no silent fallback to structural comparison.
//!
//! `!=` and `!==` are never dispatched on their own; the boundary in
//! [`crate::engine`] negates these results after resolution, so negation
//! symmetry holds for every handler configuration.
//!
//! The identity fast path precedes any handler: `x === x` is true even when
//! a `StrictEquals` handler would say otherwise. Handler results feed a
//! boolean context through standard truthiness.

use tracing::trace;

use crate::engine::classify::{classify, Operand};
use crate::engine::errors::EngineError;
use crate::engine::ops::invoke_binary;
use crate::registry::{self, OperatorSelector};
use crate::value::{ObjRef, Value};

pub(crate) fn strict_equals(lhs: &Value, rhs: &Value) -> Result<bool, EngineError> {
    if identical(lhs, rhs) {
        return Ok(true);
    }
    if let Operand::Taggable(obj) = classify(lhs) {
        if let Some(handler) = registry::resolve(obj, OperatorSelector::StrictEquals) {
            return Ok(invoke_binary(&handler, obj, rhs)?.is_truthy());
        }
        if let Some(handler) = registry::resolve(obj, OperatorSelector::Equals) {
            trace!("deriving strict equality from Equals handler");
            if !nominally_compatible(obj, rhs) {
                return Ok(false);
            }
            return Ok(invoke_binary(&handler, obj, rhs)?.is_truthy());
        }
    }
    Ok(false)
}

pub(crate) fn loose_equals(lhs: &Value, rhs: &Value) -> Result<bool, EngineError> {
    if identical(lhs, rhs) {
        return Ok(true);
    }
    if let Operand::Taggable(obj) = classify(lhs) {
        if let Some(handler) = registry::resolve(obj, OperatorSelector::Equals) {
            return Ok(invoke_binary(&handler, obj, rhs)?.is_truthy());
        }
    }
    Ok(false)
}

/// Storage identity: pointer identity for objects, kind-and-payload
/// identity for primitives. `NaN` is never identical to anything,
/// including itself.
fn identical(lhs: &Value, rhs: &Value) -> bool {
    lhs == rhs
}

/// The nominal-compatibility check used when strict equality is derived
/// from an `Equals` handler: the RHS must share the LHS's runtime type, or,
/// when the LHS is an untagged structural value, merely be any
/// non-primitive.
fn nominally_compatible(lhs: &ObjRef, rhs: &Value) -> bool {
    let Operand::Taggable(rhs_obj) = classify(rhs) else {
        return false;
    };
    match lhs.borrow().type_def() {
        None => true,
        Some(lhs_type) => rhs_obj
            .borrow()
            .type_def()
            .is_some_and(|rhs_type| std::rc::Rc::ptr_eq(lhs_type, rhs_type)),
    }
}
