//! Category policy table
//!
//! Each operator category owns exactly one default policy (applied when no
//! handler resolves on a taggable LHS), one primitive-LHS policy (applied
//! when a primitive meets a taggable RHS), and one message noun for the
//! `OperatorNotDefined` wording. The table is static; nothing here is
//! configurable at runtime.

use crate::registry::OperatorCategory;

/// Fallback effect applied when handler lookup fails
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DefaultPolicy {
    /// Raise `OperatorNotDefined` with the category's wording
    Throw,
    /// Return the not-a-number sentinel
    ReturnNan,
    /// Equality only: fall back to the storage-identity comparison,
    /// yielding false for distinct values
    FalseByIdentity,
}

impl OperatorCategory {
    /// Policy when a taggable LHS has no handler for the selector.
    ///
    /// The "number on LHS yields the sentinel, object on LHS raises" split
    /// for arithmetic is intentional: the taggable side of that split is
    /// always [`DefaultPolicy::Throw`].
    pub fn default_policy(self) -> DefaultPolicy {
        match self {
            OperatorCategory::Equality => DefaultPolicy::FalseByIdentity,
            OperatorCategory::Relational
            | OperatorCategory::ArithmeticBinary
            | OperatorCategory::UnaryArithmetic
            | OperatorCategory::BitwiseBinary
            | OperatorCategory::BitwiseUnary
            | OperatorCategory::Shift => DefaultPolicy::Throw,
        }
    }

    /// Policy when the LHS is primitive and the RHS is taggable. Only
    /// arithmetic and shift operators get the sentinel; relational and
    /// bitwise combinations raise exactly as the taggable-LHS case does.
    ///
    /// Only binary dispatch consults this row: equality and the unary
    /// operators resolve their fallbacks through [`Self::default_policy`],
    /// so the Equality, UnaryArithmetic and BitwiseUnary entries exist for
    /// table completeness only.
    pub fn primitive_lhs_policy(self) -> DefaultPolicy {
        match self {
            OperatorCategory::ArithmeticBinary | OperatorCategory::Shift => {
                DefaultPolicy::ReturnNan
            }
            OperatorCategory::Equality => DefaultPolicy::FalseByIdentity,
            OperatorCategory::Relational
            | OperatorCategory::UnaryArithmetic
            | OperatorCategory::BitwiseBinary
            | OperatorCategory::BitwiseUnary => DefaultPolicy::Throw,
        }
    }

    /// Noun used in the `OperatorNotDefined` message; contract wording
    pub fn message_noun(self) -> &'static str {
        match self {
            OperatorCategory::Equality
            | OperatorCategory::Relational
            | OperatorCategory::ArithmeticBinary => "operator",
            OperatorCategory::UnaryArithmetic => "unary operator",
            OperatorCategory::BitwiseBinary | OperatorCategory::BitwiseUnary => {
                "bitwise operator"
            }
            OperatorCategory::Shift => "shifting operator",
        }
    }
}
