pub mod binary;
pub mod equality;
pub mod unary;

use crate::engine::errors::EngineError;
use crate::engine::policy::DefaultPolicy;
use crate::registry::OperatorSelector;
use crate::value::{ObjRef, Value};

/// Shared failure path: build the category-correct `OperatorNotDefined`
pub(crate) fn not_defined<T>(
    selector: OperatorSelector,
    lhs: Option<&ObjRef>,
) -> Result<T, EngineError> {
    Err(EngineError::OperatorNotDefined {
        category: selector.category(),
        operator: selector.literal().to_string(),
        type_name: lhs.and_then(|obj| obj.borrow().type_name().map(str::to_string)),
    })
}

/// Apply the category's default policy for an unresolved selector
pub(crate) fn apply_default_policy(
    selector: OperatorSelector,
    lhs: Option<&ObjRef>,
) -> Result<Value, EngineError> {
    match selector.category().default_policy() {
        DefaultPolicy::Throw => not_defined(selector, lhs),
        DefaultPolicy::ReturnNan => Ok(Value::nan()),
        DefaultPolicy::FalseByIdentity => Ok(Value::Bool(false)),
    }
}

/// Invoke a resolved binary handler and pass its result (or error) through
/// verbatim. Arity is validated at registration, so a non-binary handler
/// under a binary selector cannot occur.
pub(crate) fn invoke_binary(
    handler: &crate::registry::Handler,
    lhs: &ObjRef,
    rhs: &Value,
) -> Result<Value, EngineError> {
    match handler {
        crate::registry::Handler::Binary(f) => f(lhs, rhs).map_err(EngineError::Handler),
        _ => unreachable!("handler arity validated at registration"),
    }
}
