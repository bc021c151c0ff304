//! # Introduction
//!
//! `opdispatch` is an operator dispatch resolution engine for a
//! dynamic-language runtime. Given an operator token and one or two fully
//! evaluated operand values, it decides which user-supplied behavior (if
//! any) executes, in what order competing definitions are consulted, what
//! happens when none is defined, and the timing/identity rules for the
//! operators with special semantics (equality, increment/decrement).
//!
//! ## Dispatch pipeline
//!
//! ```text
//! Host evaluator → classify operands → resolve handler
//!                    (instance registry, then type delegation chain)
//!                → invoke handler | apply category default policy
//!                → value or raised error, back to the host
//! ```
//!
//! 1. [`engine`] — the boundary the host calls ([`dispatch_binary`],
//!    [`dispatch_unary`]) plus classification, the category policy table
//!    and the dispatch rules themselves.
//! 2. [`registry`] — the closed [`OperatorSelector`] set, handler arities,
//!    and delegation-chain resolution.
//! 3. [`value`] — tagged [`Value`] variants; [`value::Object`] is the only
//!    kind that can own handlers, registered at type definition time via
//!    [`TypeDef::define`] or per instance via
//!    [`register_instance_handler`].
//!
//! ## Dispatch rules in brief
//!
//! Only the LHS defines behavior: the RHS registry is never consulted and
//! there is no reflected-operand fallback. A primitive LHS meeting a
//! taggable RHS yields the not-a-number sentinel for arithmetic and shift
//! operators and raises for the rest. `===` checks storage identity before
//! any handler runs, and derives from an `Equals` handler (plus a nominal
//! type check) when no `StrictEquals` handler exists. `!=`/`!==` are always
//! the negation of `==`/`===`. Postfix `++`/`--` returns a pre-mutation
//! snapshot; prefix returns the live value after mutation. Compound
//! assignment never reaches the engine as its own operation.
//!
//! ## Example
//!
//! ```
//! use opdispatch::{dispatch_binary, Handler, Object, OperatorSelector, TypeDef, Value};
//!
//! let counter = TypeDef::define("Counter")
//!     .handler(
//!         OperatorSelector::Add,
//!         Handler::binary(|obj, rhs| {
//!             let n = obj.borrow().get("n").and_then(|v| v.as_number()).unwrap_or(0.0);
//!             let rhs = rhs.as_number().unwrap_or(0.0);
//!             Ok(Value::Number(n + rhs))
//!         }),
//!     )
//!     .build()
//!     .unwrap();
//!
//! let c = Object::instance_of(&counter);
//! c.borrow_mut().set("n", Value::Number(40.0));
//!
//! let sum = dispatch_binary("+", &Value::Object(c), &Value::Number(2.0)).unwrap();
//! assert_eq!(sum.as_number(), Some(42.0));
//! ```

pub mod engine;
pub mod registry;
pub mod value;

pub use engine::errors::{EngineError, HandlerError};
pub use engine::{dispatch_binary, dispatch_unary, register_instance_handler, Position};
pub use registry::{Handler, OperatorCategory, OperatorSelector};
pub use value::{Object, ObjRef, TypeDef, TypeDefBuilder, Value};
