//! Unary operator dispatch
//!
//! Three shapes share this module:
//!
//! - `-x` (`UnaryNegate`) and `~x` (`BitwiseComplement`): non-mutating
//!   0-ary handlers returning a new value, with the general resolve/default
//!   rule and built-in behavior for number primitives.
//! - `++` / `--` (`UnaryAdd` / `UnarySubtract`): mutating 0-ary handlers
//!   with a position-sensitive timing contract. Prefix invokes the handler
//!   and yields the live value afterwards; postfix captures a detached
//!   snapshot of the observable state first, invokes the handler, and
//!   yields the pre-mutation snapshot. "Compute result" and "apply
//!   mutation" are the two distinct steps; only their order differs.
//!
//! A missing `++`/`--` handler raises the unary-arithmetic wording
//! regardless of position. Primitive operands never reach a handler; the
//! host applies its own lvalue rebind for native increment, so the engine
//! raises for them as well.

use tracing::trace;

use crate::engine::classify::{classify, Operand};
use crate::engine::errors::EngineError;
use crate::engine::ops::apply_default_policy;
use crate::registry::{self, Handler, OperatorSelector};
use crate::value::Value;

/// Syntactic position of a unary operator. `None` is used for operators
/// with no prefix/postfix distinction (`-x`, `~x`); for `++`/`--` it is
/// treated as the prefix form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Position {
    Prefix,
    Postfix,
    None,
}

pub(crate) fn dispatch_unary_op(
    selector: OperatorSelector,
    position: Position,
    operand: &Value,
) -> Result<Value, EngineError> {
    match selector {
        OperatorSelector::UnaryAdd | OperatorSelector::UnarySubtract => {
            dispatch_step(selector, position, operand)
        }
        OperatorSelector::UnaryNegate | OperatorSelector::BitwiseComplement => {
            dispatch_pure_unary(selector, operand)
        }
        _ => unreachable!("binary selector in unary dispatch"),
    }
}

fn dispatch_pure_unary(
    selector: OperatorSelector,
    operand: &Value,
) -> Result<Value, EngineError> {
    match classify(operand) {
        Operand::Taggable(obj) => {
            let Some(handler) = registry::resolve(obj, selector) else {
                trace!(?selector, "no unary handler, applying default policy");
                return apply_default_policy(selector, Some(obj));
            };
            match handler {
                Handler::Unary(f) => f(obj).map_err(EngineError::Handler),
                _ => unreachable!("handler arity validated at registration"),
            }
        }
        Operand::Primitive(_) => match (selector, operand) {
            (OperatorSelector::UnaryNegate, Value::Number(n)) => Ok(Value::Number(-n)),
            (OperatorSelector::BitwiseComplement, Value::Number(n)) => {
                let truncated = if n.is_finite() { n.trunc() as i64 } else { 0 };
                Ok(Value::Number(!truncated as f64))
            }
            _ => apply_default_policy(selector, None),
        },
    }
}

/// Increment/decrement: resolve the mutating handler, then order snapshot
/// and mutation by position
fn dispatch_step(
    selector: OperatorSelector,
    position: Position,
    operand: &Value,
) -> Result<Value, EngineError> {
    let Operand::Taggable(obj) = classify(operand) else {
        return apply_default_policy(selector, None);
    };
    let Some(handler) = registry::resolve(obj, selector) else {
        return apply_default_policy(selector, Some(obj));
    };
    let Handler::Mutating(f) = handler else {
        unreachable!("handler arity validated at registration");
    };

    match position {
        Position::Postfix => {
            let before = obj.borrow().snapshot();
            f(obj).map_err(EngineError::Handler)?;
            Ok(Value::Object(before))
        }
        Position::Prefix | Position::None => {
            f(obj).map_err(EngineError::Handler)?;
            Ok(Value::Object(obj.clone()))
        }
    }
}
