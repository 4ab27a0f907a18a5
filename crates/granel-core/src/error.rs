//! # Error Types
//!
//! Domain-specific error types for granel-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                         Error Types                             │
//! │                                                                 │
//! │  granel-core errors (this file)                                 │
//! │  ├── CoreError        - Business rule / invariant guards        │
//! │  └── ValidationError  - Input validation failures               │
//! │                                                                 │
//! │  granel-store errors (separate crate)                           │
//! │  └── StoreError       - Persistence and import failures         │
//! │                                                                 │
//! │  Flow: ValidationError → CoreError → StoreError → UI notice     │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (code, amounts, ...)
//! 3. Errors are enum variants, never String
//! 4. A rejected operation mutates nothing

use thiserror::Error;

use crate::money::Money;

// =============================================================================
// Core Error
// =============================================================================

/// Business rule violations and invariant guards.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Product cannot be found in the catalog.
    #[error("Product not found: {0}")]
    ProductNotFound(String),

    /// Adding to the cart requires an open drawer session.
    #[error("Cash drawer is closed")]
    CashierClosed,

    /// `open()` was called while a session is already running.
    #[error("Cash drawer is already open")]
    CashierAlreadyOpen,

    /// Cash payment below the total minus the tolerance.
    ///
    /// ## When This Occurs
    /// ```text
    /// Checkout (cash), total R$ 10,00
    ///      │
    ///      ▼
    /// tendered R$ 9,00 < 10,00 - 0,05
    ///      │
    ///      ▼
    /// InsufficientPayment { total, tendered }
    /// ```
    #[error("Insufficient payment: total {total}, tendered {tendered}")]
    InsufficientPayment { total: Money, tendered: Money },

    /// Checkout on an empty cart.
    #[error("Cart is empty")]
    EmptyCart,

    /// Cart line index out of bounds.
    #[error("No cart line at position {0}")]
    LineNotFound(usize),

    /// Sale record not found in the ledger.
    #[error("Sale not found: {0}")]
    SaleNotFound(String),

    /// Expense record not found in the ledger.
    #[error("Expense not found: {0}")]
    ExpenseNotFound(String),

    /// Appointment not found.
    #[error("Appointment not found: {0}")]
    AppointmentNotFound(String),

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These occur when user input doesn't meet requirements; they are raised
/// before any business logic runs, so no state has been touched.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Value must not be negative.
    #[error("{field} must not be negative")]
    MustNotBeNegative { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// The report date range has not been selected.
    #[error("select a start and end date")]
    DateRangeNotSelected,

    /// Gram/amount input offered for a unit-priced product or vice versa.
    #[error("input mode not valid for this product kind")]
    InputModeMismatch,

    /// Start date after end date.
    #[error("start date {start} is after end date {end}")]
    InvertedDateRange { start: String, end: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
