//! # Error Types
//!
//! Domain-specific error types for savor-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  savor-core errors (this file)                                         │
//! │  └── NormalizeError   - A raw row cannot become a canonical entity     │
//! │                                                                         │
//! │  Everything else degrades instead of erroring:                         │
//! │  ├── Unparseable HH:MM or timestamp  → dependent check is false        │
//! │  └── Dangling parent reference       → upstream constraint satisfied   │
//! │                                                                         │
//! │  Flow: raw row → NormalizeError → dropped by the batch normalizer      │
//! │        (logged, never propagated out of the resolution core)           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (tier, offending key)
//! 3. Errors are enum variants, never String
//! 4. The resolver itself is infallible for structurally valid input

use thiserror::Error;

use crate::types::Tier;

// =============================================================================
// Normalize Error
// =============================================================================

/// Reasons a raw catalog or schedule row is rejected during normalization.
///
/// These never escape the core: batch normalization drops the offending row
/// and continues. The single-row functions return them so callers (and the
/// batch logging) can say *why* a row was dropped.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum NormalizeError {
    /// The raw value is not a JSON object at all.
    ///
    /// ## When This Occurs
    /// - A storage scan returned a bare string/number where a row was expected
    /// - A tagged wrapper was double-encoded upstream
    #[error("{tier} row is not an object")]
    NotAnObject { tier: Tier },

    /// The row has neither a generic `id` nor the tier-specific alias.
    #[error("{tier} row has no usable id (checked `id` and `{alias}`)")]
    MissingId { tier: Tier, alias: &'static str },

    /// The row has no non-empty `name`.
    #[error("{tier} row {id} has no name")]
    MissingName { tier: Tier, id: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for single-row normalization results.
pub type NormalizeResult<T> = Result<T, NormalizeError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = NormalizeError::MissingId {
            tier: Tier::Subcategory,
            alias: "subcategoryId",
        };
        assert_eq!(
            err.to_string(),
            "subcategory row has no usable id (checked `id` and `subcategoryId`)"
        );

        let err = NormalizeError::MissingName {
            tier: Tier::Item,
            id: "item-9".to_string(),
        };
        assert_eq!(err.to_string(), "item row item-9 has no name");
    }

    #[test]
    fn test_not_an_object_message() {
        let err = NormalizeError::NotAnObject {
            tier: Tier::MainCategory,
        };
        assert_eq!(err.to_string(), "main category row is not an object");
    }
}
