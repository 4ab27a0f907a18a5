//! # Domain Types
//!
//! Core domain types persisted in the Granel POS state document.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                            │
//! │                                                                 │
//! │  ┌───────────────┐   ┌───────────────┐   ┌───────────────┐      │
//! │  │   Product     │   │     Sale      │   │   Expense     │      │
//! │  │ ───────────── │   │ ───────────── │   │ ───────────── │      │
//! │  │ id (UUID)     │   │ id (UUID)     │   │ id (UUID)     │      │
//! │  │ code          │   │ lines         │   │ description   │      │
//! │  │ kind          │   │ total/cost/   │   │ value_cents   │      │
//! │  │ price_cents   │   │   profit      │   │ category      │      │
//! │  │ stock         │   │ method        │   └───────────────┘      │
//! │  └───────────────┘   └───────────────┘                          │
//! │                                                                 │
//! │  ┌───────────────┐   ┌─────────────────────┐                    │
//! │  │ PaymentMethod │   │    Appointment      │                    │
//! │  │ ───────────── │   │ ─────────────────── │                    │
//! │  │ Cash ("dinhe- │   │ date/time/patient   │                    │
//! │  │  iro"), Card, │   │ status: Scheduled → │                    │
//! │  │  Pix          │   │  Done → Cancelled → │                    │
//! │  └───────────────┘   └─────────────────────┘                    │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Dual-Key Identity Pattern
//! Products carry both:
//! - `id`: UUID v4 - immutable, referenced by cart lines
//! - `code`: business code shown to the operator (potentially mutable)

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

use crate::money::Money;
use crate::pricing::CartLine;

// =============================================================================
// Product Kind
// =============================================================================

/// How a product is quantified and priced.
///
/// ## Why an explicit field?
/// The legacy data keyed this off a code prefix (`AGR...` meant bulk
/// goods). A naming convention silently misclassifies the first product
/// whose code drifts; the kind is set once at creation and never inferred.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProductKind {
    /// Sold by mass, priced per kilogram, entered in grams.
    Weight,
    /// Sold by piece, priced per unit.
    Unit,
}

impl ProductKind {
    /// Label for the product's stock unit: `"kg"` or `"un"`.
    pub const fn unit_label(&self) -> &'static str {
        match self {
            ProductKind::Weight => "kg",
            ProductKind::Unit => "un",
        }
    }
}

// =============================================================================
// Product
// =============================================================================

/// A product available for sale.
///
/// Stock is an `i64` in the product's smallest quantity unit: grams for
/// weight-priced goods, whole units otherwise.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Business code shown on cards and inventory lists.
    pub code: String,

    /// Weight-priced or unit-priced. Set at creation.
    pub kind: ProductKind,

    /// Display name.
    pub name: String,

    /// Sale price in centavos, per kilogram or per unit.
    pub price_cents: i64,

    /// Cost price in centavos (for profit calculations).
    pub cost_cents: i64,

    /// Previous sale price, kept for discount display.
    pub previous_price_cents: Option<i64>,

    /// Current stock: grams for weight goods, units otherwise.
    pub stock: i64,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Product {
    /// Returns the sale price as Money.
    #[inline]
    pub fn price(&self) -> Money {
        Money::from_cents(self.price_cents)
    }

    /// Returns the cost price as Money.
    #[inline]
    pub fn cost(&self) -> Money {
        Money::from_cents(self.cost_cents)
    }

    /// Low-stock warning threshold: 1 kg for bulk goods, 5 units otherwise.
    pub fn is_low_stock(&self) -> bool {
        match self.kind {
            ProductKind::Weight => self.stock <= 1000,
            ProductKind::Unit => self.stock <= 5,
        }
    }
}

// =============================================================================
// Payment Method
// =============================================================================

/// Payment method tag recorded on a sale.
///
/// Serialized with the legacy pt-BR tags so old backups keep loading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaymentMethod {
    #[serde(rename = "dinheiro")]
    Cash,
    #[serde(rename = "cartao")]
    Card,
    #[serde(rename = "pix")]
    Pix,
}

impl PaymentMethod {
    /// Only cash affects the physical drawer at session close.
    #[inline]
    pub const fn is_cash(&self) -> bool {
        matches!(self, PaymentMethod::Cash)
    }
}

// =============================================================================
// Sale
// =============================================================================

/// A completed sale transaction.
///
/// Immutable once created, except for explicit deletion from the ledger.
///
/// ## Invariants
/// - `total_cents == Σ line.subtotal_cents`
/// - `profit_cents == total_cents - cost_cents`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Sale {
    pub id: String,
    pub created_at: DateTime<Utc>,
    /// Cart line snapshots frozen at checkout.
    pub lines: Vec<CartLine>,
    pub total_cents: i64,
    pub cost_cents: i64,
    pub profit_cents: i64,
    pub method: PaymentMethod,
}

impl Sale {
    #[inline]
    pub fn total(&self) -> Money {
        Money::from_cents(self.total_cents)
    }

    #[inline]
    pub fn cost(&self) -> Money {
        Money::from_cents(self.cost_cents)
    }
}

// =============================================================================
// Expense
// =============================================================================

/// Default expense category when the record carries none.
pub const DEFAULT_EXPENSE_CATEGORY: &str = "Outros";

/// A bookkeeping expense.
///
/// Immutable once created, except for explicit deletion.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Expense {
    pub id: String,
    pub created_at: DateTime<Utc>,
    pub description: String,
    pub value_cents: i64,
    /// Free-form category ("Operacional", "Fornecedores", ...). Empty means
    /// uncategorized; the aggregator maps that to [`DEFAULT_EXPENSE_CATEGORY`].
    #[serde(default)]
    pub category: String,
}

impl Expense {
    #[inline]
    pub fn value(&self) -> Money {
        Money::from_cents(self.value_cents)
    }

    /// Category with the uncategorized fallback applied.
    pub fn category_or_default(&self) -> &str {
        if self.category.trim().is_empty() {
            DEFAULT_EXPENSE_CATEGORY
        } else {
            &self.category
        }
    }
}

// =============================================================================
// Appointment
// =============================================================================

/// Appointment life-cycle status.
///
/// A closed enumeration with a total-order cycle, replacing the legacy
/// chained string comparisons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AppointmentStatus {
    Scheduled,
    Done,
    Cancelled,
}

impl AppointmentStatus {
    /// The explicit transition table:
    /// Scheduled → Done → Cancelled → Scheduled.
    pub const fn next(&self) -> Self {
        match self {
            AppointmentStatus::Scheduled => AppointmentStatus::Done,
            AppointmentStatus::Done => AppointmentStatus::Cancelled,
            AppointmentStatus::Cancelled => AppointmentStatus::Scheduled,
        }
    }
}

impl Default for AppointmentStatus {
    fn default() -> Self {
        AppointmentStatus::Scheduled
    }
}

/// A scheduled appointment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Appointment {
    pub id: String,
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub patient: String,
    /// Appointment type/category (free text in the source data).
    pub kind: String,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub status: AppointmentStatus,
}

// =============================================================================
// Unit Tests
// =============================================================================
