//! Operator selectors, categories, handlers and registry resolution
//!
//! The [`OperatorSelector`] identifiers are the engine's only wire format:
//! a closed, process-wide enumeration the host imports by name. No selector
//! is ever created at runtime.
//!
//! A [`Handler`] is a user-supplied function implementing one selector's
//! behavior for one value or type. Handlers are arity-tagged so that
//! registration can validate them against their selector; dispatch never
//! re-checks arity.
//!
//! [`resolve`] reproduces single-inheritance method resolution: the
//! instance-level registry is consulted first, then the type definition's
//! delegation chain from most-derived to least-derived. First match wins,
//! no merging. Lookup never mutates a registry.

use std::fmt;
use std::rc::Rc;

use rustc_hash::FxHashMap;
use tracing::trace;

use crate::engine::errors::HandlerError;
use crate::value::{ObjRef, Value};

/// 1-ary handler over the owning object and the other operand
pub type BinaryFn = dyn Fn(&ObjRef, &Value) -> Result<Value, HandlerError>;
/// 0-ary handler producing a fresh value (`-x`, `~x`)
pub type UnaryFn = dyn Fn(&ObjRef) -> Result<Value, HandlerError>;
/// 0-ary handler mutating the owning object in place (`++`, `--`)
pub type MutatingFn = dyn Fn(&ObjRef) -> Result<(), HandlerError>;

/// A user-supplied operator behavior, tagged by arity
#[derive(Clone)]
pub enum Handler {
    Binary(Rc<BinaryFn>),
    Unary(Rc<UnaryFn>),
    Mutating(Rc<MutatingFn>),
}

impl Handler {
    pub fn binary<F>(f: F) -> Handler
    where
        F: Fn(&ObjRef, &Value) -> Result<Value, HandlerError> + 'static,
    {
        Handler::Binary(Rc::new(f))
    }

    pub fn unary<F>(f: F) -> Handler
    where
        F: Fn(&ObjRef) -> Result<Value, HandlerError> + 'static,
    {
        Handler::Unary(Rc::new(f))
    }

    pub fn mutating<F>(f: F) -> Handler
    where
        F: Fn(&ObjRef) -> Result<(), HandlerError> + 'static,
    {
        Handler::Mutating(Rc::new(f))
    }

    pub(crate) fn arity_matches(&self, selector: OperatorSelector) -> bool {
        match self {
            Handler::Binary(_) => selector.takes_operand(),
            Handler::Unary(_) => matches!(
                selector,
                OperatorSelector::UnaryNegate | OperatorSelector::BitwiseComplement
            ),
            Handler::Mutating(_) => matches!(
                selector,
                OperatorSelector::UnaryAdd | OperatorSelector::UnarySubtract
            ),
        }
    }

    pub(crate) fn arity_name(&self) -> &'static str {
        match self {
            Handler::Binary(_) => "binary",
            Handler::Unary(_) => "unary",
            Handler::Mutating(_) => "mutating",
        }
    }
}

impl fmt::Debug for Handler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Handler::{}", self.arity_name())
    }
}

/// Selector-to-handler mapping; one per type definition, plus an optional
/// one per instance
pub type HandlerRegistry = FxHashMap<OperatorSelector, Handler>;

/// The closed set of operator-behavior identifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperatorSelector {
    Equals,
    StrictEquals,
    GreaterThan,
    GreaterThanEqual,
    LessThan,
    LessThanEqual,
    Add,
    Subtract,
    Multiply,
    Divide,
    Modulus,
    Exponent,
    UnaryNegate,
    UnaryAdd,
    UnarySubtract,
    BitwiseAnd,
    BitwiseOr,
    BitwiseXor,
    BitwiseComplement,
    LeftShift,
    RightShift,
    UnsignedRightShift,
}

/// Selector grouping; each category owns one default policy and one error
/// message template
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperatorCategory {
    Equality,
    Relational,
    ArithmeticBinary,
    UnaryArithmetic,
    BitwiseBinary,
    BitwiseUnary,
    Shift,
}

impl OperatorSelector {
    pub const ALL: [OperatorSelector; 22] = [
        OperatorSelector::Equals,
        OperatorSelector::StrictEquals,
        OperatorSelector::GreaterThan,
        OperatorSelector::GreaterThanEqual,
        OperatorSelector::LessThan,
        OperatorSelector::LessThanEqual,
        OperatorSelector::Add,
        OperatorSelector::Subtract,
        OperatorSelector::Multiply,
        OperatorSelector::Divide,
        OperatorSelector::Modulus,
        OperatorSelector::Exponent,
        OperatorSelector::UnaryNegate,
        OperatorSelector::UnaryAdd,
        OperatorSelector::UnarySubtract,
        OperatorSelector::BitwiseAnd,
        OperatorSelector::BitwiseOr,
        OperatorSelector::BitwiseXor,
        OperatorSelector::BitwiseComplement,
        OperatorSelector::LeftShift,
        OperatorSelector::RightShift,
        OperatorSelector::UnsignedRightShift,
    ];

    pub fn category(self) -> OperatorCategory {
        use OperatorSelector::*;
        match self {
            Equals | StrictEquals => OperatorCategory::Equality,
            GreaterThan | GreaterThanEqual | LessThan | LessThanEqual => {
                OperatorCategory::Relational
            }
            Add | Subtract | Multiply | Divide | Modulus | Exponent => {
                OperatorCategory::ArithmeticBinary
            }
            UnaryNegate | UnaryAdd | UnarySubtract => OperatorCategory::UnaryArithmetic,
            BitwiseAnd | BitwiseOr | BitwiseXor => OperatorCategory::BitwiseBinary,
            BitwiseComplement => OperatorCategory::BitwiseUnary,
            LeftShift | RightShift | UnsignedRightShift => OperatorCategory::Shift,
        }
    }

    /// Source-level operator token for this selector
    pub fn literal(self) -> &'static str {
        use OperatorSelector::*;
        match self {
            Equals => "==",
            StrictEquals => "===",
            GreaterThan => ">",
            GreaterThanEqual => ">=",
            LessThan => "<",
            LessThanEqual => "<=",
            Add => "+",
            Subtract => "-",
            Multiply => "*",
            Divide => "/",
            Modulus => "%",
            Exponent => "**",
            UnaryNegate => "-",
            UnaryAdd => "++",
            UnarySubtract => "--",
            BitwiseAnd => "&",
            BitwiseOr => "|",
            BitwiseXor => "^",
            BitwiseComplement => "~",
            LeftShift => "<<",
            RightShift => ">>",
            UnsignedRightShift => ">>>",
        }
    }

    /// Map a binary operator token to its selector. `!=` and `!==` have no
    /// selector of their own; the dispatch boundary derives them by
    /// negation.
    pub fn from_binary_literal(op: &str) -> Option<OperatorSelector> {
        use OperatorSelector::*;
        Some(match op {
            "==" => Equals,
            "===" => StrictEquals,
            ">" => GreaterThan,
            ">=" => GreaterThanEqual,
            "<" => LessThan,
            "<=" => LessThanEqual,
            "+" => Add,
            "-" => Subtract,
            "*" => Multiply,
            "/" => Divide,
            "%" => Modulus,
            "**" => Exponent,
            "&" => BitwiseAnd,
            "|" => BitwiseOr,
            "^" => BitwiseXor,
            "<<" => LeftShift,
            ">>" => RightShift,
            ">>>" => UnsignedRightShift,
            _ => return None,
        })
    }

    /// Map a unary operator token to its selector
    pub fn from_unary_literal(op: &str) -> Option<OperatorSelector> {
        use OperatorSelector::*;
        Some(match op {
            "-" => UnaryNegate,
            "~" => BitwiseComplement,
            "++" => UnaryAdd,
            "--" => UnarySubtract,
            _ => return None,
        })
    }

    /// True for selectors whose handler receives the other operand
    pub fn takes_operand(self) -> bool {
        !matches!(
            self,
            OperatorSelector::UnaryNegate
                | OperatorSelector::UnaryAdd
                | OperatorSelector::UnarySubtract
                | OperatorSelector::BitwiseComplement
        )
    }
}

/// Resolve a handler for `selector` on `obj`: instance registry first, then
/// the delegation chain of its type definition. Returns a clone of the
/// handler so no registry borrow is held across invocation.
pub fn resolve(obj: &ObjRef, selector: OperatorSelector) -> Option<Handler> {
    let borrowed = obj.borrow();
    if let Some(handler) = borrowed
        .instance_handlers()
        .and_then(|registry| registry.get(&selector))
    {
        trace!(?selector, "handler resolved at instance level");
        return Some(handler.clone());
    }

    let mut current = borrowed.type_def().cloned();
    drop(borrowed);
    while let Some(type_def) = current {
        if let Some(handler) = type_def.own_handler(selector) {
            trace!(?selector, type_name = type_def.name(), "handler resolved on type");
            return Some(handler);
        }
        current = type_def.parent().cloned();
    }
    None
}
