//! General binary dispatch rule
//!
//! Applies to every binary category except equality (which has its own
//! state machine in [`super::equality`]). The rule, in order:
//!
//! 1. Primitive LHS against a taggable RHS: apply the category's
//!    primitive-LHS policy immediately. Arithmetic and shift operators get
//!    the not-a-number sentinel; relational and bitwise combinations raise
//!    the same "no behavior" error the taggable-LHS case raises.
//! 2. Taggable LHS: resolve through the instance registry and the type
//!    delegation chain; a resolved handler's result or error is returned
//!    verbatim.
//! 3. No handler: the category default policy, which for every non-equality
//!    binary category is `OperatorNotDefined`.
//!
//! The RHS registry is never consulted. There is no reflected-operand
//! fallback; only the LHS defines behavior.
//!
//! When both operands are primitive the built-in semantics of the host's
//! primitive types apply (plain f64 arithmetic, string concatenation and
//! comparison, integer-truncated bitwise and shift forms).

use tracing::trace;

use crate::engine::classify::{classify, Operand};
use crate::engine::errors::EngineError;
use crate::engine::ops::{apply_default_policy, invoke_binary, not_defined};
use crate::engine::policy::DefaultPolicy;
use crate::registry::{self, OperatorSelector};
use crate::value::Value;

pub(crate) fn dispatch_general_binary(
    selector: OperatorSelector,
    lhs: &Value,
    rhs: &Value,
) -> Result<Value, EngineError> {
    match classify(lhs) {
        Operand::Taggable(obj) => {
            if let Some(handler) = registry::resolve(obj, selector) {
                return invoke_binary(&handler, obj, rhs);
            }
            trace!(?selector, "no handler on taggable LHS, applying default policy");
            apply_default_policy(selector, Some(obj))
        }
        Operand::Primitive(_) => {
            if matches!(classify(rhs), Operand::Taggable(_)) {
                return match selector.category().primitive_lhs_policy() {
                    DefaultPolicy::ReturnNan => Ok(Value::nan()),
                    DefaultPolicy::FalseByIdentity => Ok(Value::Bool(false)),
                    DefaultPolicy::Throw => not_defined(selector, None),
                };
            }
            native_primitive_binary(selector, lhs, rhs)
        }
    }
}

/// Built-in behavior for primitive-only operands. Combinations with no
/// built-in meaning follow the category's primitive-LHS policy: the
/// sentinel for arithmetic/shift, `OperatorNotDefined` otherwise.
fn native_primitive_binary(
    selector: OperatorSelector,
    lhs: &Value,
    rhs: &Value,
) -> Result<Value, EngineError> {
    use OperatorSelector::*;

    match selector {
        Add => match (lhs, rhs) {
            (Value::Number(a), Value::Number(b)) => Ok(Value::Number(a + b)),
            (Value::Str(a), Value::Str(b)) => {
                let mut joined = String::with_capacity(a.len() + b.len());
                joined.push_str(a);
                joined.push_str(b);
                Ok(Value::Str(joined))
            }
            _ => Ok(Value::nan()),
        },
        Subtract | Multiply | Divide | Modulus | Exponent => {
            match (lhs.as_number(), rhs.as_number()) {
                (Some(a), Some(b)) => Ok(Value::Number(match selector {
                    Subtract => a - b,
                    Multiply => a * b,
                    Divide => a / b,
                    Modulus => a % b,
                    Exponent => a.powf(b),
                    _ => unreachable!(),
                })),
                _ => Ok(Value::nan()),
            }
        }

        GreaterThan | GreaterThanEqual | LessThan | LessThanEqual => {
            compare_primitives(selector, lhs, rhs)
        }

        BitwiseAnd | BitwiseOr | BitwiseXor => match (lhs.as_number(), rhs.as_number()) {
            (Some(a), Some(b)) => {
                let (a, b) = (truncate_to_int(a), truncate_to_int(b));
                let result = match selector {
                    BitwiseAnd => a & b,
                    BitwiseOr => a | b,
                    BitwiseXor => a ^ b,
                    _ => unreachable!(),
                };
                Ok(Value::Number(result as f64))
            }
            _ => not_defined(selector, None),
        },

        LeftShift | RightShift | UnsignedRightShift => {
            match (lhs.as_number(), rhs.as_number()) {
                (Some(a), Some(b)) => {
                    let a = truncate_to_int(a);
                    let shift = (truncate_to_int(b) & 63) as u32;
                    let result = match selector {
                        LeftShift => a.wrapping_shl(shift),
                        RightShift => a.wrapping_shr(shift),
                        UnsignedRightShift => (a as u64).wrapping_shr(shift) as i64,
                        _ => unreachable!(),
                    };
                    Ok(Value::Number(result as f64))
                }
                _ => Ok(Value::nan()),
            }
        }

        Equals | StrictEquals => {
            unreachable!("equality is dispatched through the equality state machine")
        }
        UnaryNegate | UnaryAdd | UnarySubtract | BitwiseComplement => {
            unreachable!("unary selector in binary dispatch")
        }
    }
}

fn compare_primitives(
    selector: OperatorSelector,
    lhs: &Value,
    rhs: &Value,
) -> Result<Value, EngineError> {
    use std::cmp::Ordering;
    use OperatorSelector::*;

    let ordering = match (lhs, rhs) {
        (Value::Number(a), Value::Number(b)) => a.partial_cmp(b),
        (Value::Str(a), Value::Str(b)) => Some(a.cmp(b)),
        _ => None,
    };
    let Some(ordering) = ordering else {
        // Mixed kinds and NaN comparisons have no built-in ordering
        return match (lhs, rhs) {
            // NaN against a number: every relational comparison is false
            (Value::Number(_), Value::Number(_)) => Ok(Value::Bool(false)),
            _ => not_defined(selector, None),
        };
    };

    let result = match selector {
        GreaterThan => ordering == Ordering::Greater,
        GreaterThanEqual => ordering != Ordering::Less,
        LessThan => ordering == Ordering::Less,
        LessThanEqual => ordering != Ordering::Greater,
        _ => unreachable!(),
    };
    Ok(Value::Bool(result))
}

/// Truncating f64-to-integer conversion used by the built-in bitwise and
/// shift forms; non-finite inputs map to zero
fn truncate_to_int(n: f64) -> i64 {
    if n.is_finite() {
        n.trunc() as i64
    } else {
        0
    }
}
