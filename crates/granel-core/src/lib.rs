//! # granel-core: Pure Business Logic for Granel POS
//!
//! This crate is the **heart** of Granel POS. It contains all business logic
//! as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                    Granel POS Architecture                      │
//! │                                                                 │
//! │  ┌───────────────────────────────────────────────────────────┐  │
//! │  │                  UI shell (out of scope)                  │  │
//! │  │    product grid ─► cart ─► payment ─► finance screens     │  │
//! │  └────────────────────────────┬──────────────────────────────┘  │
//! │                               │                                 │
//! │  ┌────────────────────────────▼──────────────────────────────┐  │
//! │  │           granel-store (state + command layer)            │  │
//! │  │     owned document, write-through flush, backup, CSV      │  │
//! │  └────────────────────────────┬──────────────────────────────┘  │
//! │                               │                                 │
//! │  ┌────────────────────────────▼──────────────────────────────┐  │
//! │  │              ★ granel-core (THIS CRATE) ★                 │  │
//! │  │                                                           │  │
//! │  │  ┌────────┐ ┌─────────┐ ┌────────┐ ┌─────────┐ ┌────────┐ │  │
//! │  │  │ money  │ │ pricing │ │ ledger │ │ cashier │ │ types  │ │  │
//! │  │  │ Money  │ │ Cart    │ │ Range  │ │ Session │ │ Sale   │ │  │
//! │  │  └────────┘ └─────────┘ └────────┘ └─────────┘ └────────┘ │  │
//! │  │                                                           │  │
//! │  │       NO I/O • NO CLOCK • NO FILES • PURE FUNCTIONS       │  │
//! │  └───────────────────────────────────────────────────────────┘  │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Product, Sale, Expense, Appointment, ...)
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`pricing`] - Weight/price conversion, cart lines, cash settlement
//! - [`ledger`] - Date-range filter and the financial statement
//! - [`cashier`] - Cash-drawer session life-cycle and reconciliation
//! - [`error`] - Domain error types
//! - [`validation`] - Input validation
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: same input = same output; timestamps are passed in
//! 2. **No I/O**: file, network and clock access is FORBIDDEN here
//! 3. **Integer Money**: all monetary values are centavos (i64)
//! 4. **Explicit Errors**: all errors are typed, never strings or panics

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cashier;
pub mod error;
pub mod ledger;
pub mod money;
pub mod pricing;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use cashier::{CashSession, SessionEvent, SessionEventKind};
pub use error::{CoreError, CoreResult, ValidationError};
pub use ledger::{DateRange, FinancialStatement};
pub use money::Money;
pub use pricing::{Cart, CartLine};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Grams per kilogram, the pivot between gram input and per-kg pricing.
pub const GRAMS_PER_KILOGRAM: i64 = 1000;

/// Rounding slack accepted on cash payments, in centavos.
///
/// A legacy constant with no stated rationale; kept as documented behavior
/// rather than replaced by a different tolerance policy.
pub const CASH_TOLERANCE: Money = Money::from_cents(5);
