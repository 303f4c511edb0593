//! # Error Types
//!
//! Domain-specific error types for duka-core.
//!
//! ## Where Errors Live (and Where They Don't)
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  duka-core errors (this file)                                           │
//! │  ├── CoreError        - domain failures                                 │
//! │  └── ValidationError  - input validation failures                       │
//! │                                                                         │
//! │  NOT errors in this system:                                             │
//! │  • precondition violations on checkout (no shift, empty cart):          │
//! │    the state machine returns None / no-ops, callers check the result    │
//! │  • stock underflow: clamped to zero by policy                           │
//! │  • tab-not-found / remove-last-tab: silent no-ops                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in messages (product id, field name)
//! 3. Errors are enum variants, never String

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Domain logic errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Product id not present in the catalog cache.
    #[error("Product not found: {0}")]
    ProductNotFound(i64),

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors, raised before domain logic runs.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Numeric value is out of range.
    #[error("{field} must be at most {max}")]
    TooLarge { field: String, max: i64 },

    /// Invalid format (bad barcode characters, malformed PIN).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

// =============================================================================
// Result Type Aliases
// =============================================================================

/// Convenience alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
