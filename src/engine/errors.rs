//! Dispatch error types
//!
//! Two disjoint error families flow out of the engine:
//!
//! - [`EngineError`] variants the engine raises itself: a default policy
//!   fired ([`EngineError::OperatorNotDefined`]), a registration-time
//!   invariant was violated ([`EngineError::InvalidOverrideConfiguration`]),
//!   or the host passed a token outside the closed operator set
//!   ([`EngineError::UnknownOperator`]).
//! - [`HandlerError`], raised by user-supplied handlers. The engine never
//!   synthesizes these and never rewords or suppresses them; they travel
//!   to the host inside [`EngineError::Handler`] untouched.
//!
//! All failures are terminal for the expression being evaluated; nothing is
//! retried.

use std::fmt;

use crate::registry::OperatorCategory;

/// Errors raised by the dispatch engine itself, plus the pass-through
/// wrapper for handler-raised errors
#[derive(Debug, Clone)]
pub enum EngineError {
    /// No handler resolved and the category's default policy is to throw.
    /// The message wording per category is part of the engine contract.
    OperatorNotDefined {
        category: OperatorCategory,
        operator: String,
        type_name: Option<String>,
    },

    /// A registration-time invariant was violated (wrong handler arity, or
    /// `StrictEquals` without `Equals` on the same registry level)
    InvalidOverrideConfiguration {
        type_name: Option<String>,
        reason: String,
    },

    /// Operator token outside the closed selector enumeration
    UnknownOperator { literal: String },

    /// An error raised by a user-supplied handler, propagated unchanged
    Handler(HandlerError),
}

/// Errors a user-supplied handler raises (e.g. an operand of an unsupported
/// kind). Owned entirely by handler authors.
#[derive(Debug, Clone)]
pub enum HandlerError {
    /// Operand kind the handler does not accept
    TypeMismatch { expected: String, got: String },

    /// Free-form handler failure
    Message(String),
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EngineError::OperatorNotDefined {
                category, operator, ..
            } => {
                write!(
                    f,
                    "No behavior defined for {} '{}'",
                    category.message_noun(),
                    operator
                )
            }
            EngineError::InvalidOverrideConfiguration { type_name, reason } => {
                match type_name {
                    Some(name) => {
                        write!(f, "Invalid override configuration for '{}': {}", name, reason)
                    }
                    None => write!(f, "Invalid override configuration: {}", reason),
                }
            }
            EngineError::UnknownOperator { literal } => {
                write!(f, "Unknown operator '{}'", literal)
            }
            EngineError::Handler(err) => err.fmt(f),
        }
    }
}

impl fmt::Display for HandlerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HandlerError::TypeMismatch { expected, got } => {
                write!(f, "Type error: expected {}, got {}", expected, got)
            }
            HandlerError::Message(message) => write!(f, "{}", message),
        }
    }
}

impl std::error::Error for HandlerError {}

impl std::error::Error for EngineError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            EngineError::Handler(err) => Some(err),
            _ => None,
        }
    }
}

impl From<HandlerError> for EngineError {
    fn from(err: HandlerError) -> EngineError {
        EngineError::Handler(err)
    }
}
