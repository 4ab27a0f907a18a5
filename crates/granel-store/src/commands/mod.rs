//! # Command Layer
//!
//! Thin orchestration between operator actions and the core logic: each
//! command validates its input, applies the business operation through the
//! store's single write path, and returns a serializable response.
//!
//! ## Command Groups
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │  product      save / delete catalog entries                     │
//! │  cart         add_to_cart (drawer guard), checkout              │
//! │  cashier      open_cashier, close_cashier (reconciliation)      │
//! │  finance      expenses, statement, ledger rows, CSV export      │
//! │  appointment  save, status toggle, delete, agenda listing       │
//! └─────────────────────────────────────────────────────────────────┘
//! ```

pub mod appointment;
pub mod cart;
pub mod cashier;
pub mod finance;
pub mod product;

use uuid::Uuid;

/// Fresh UUID v4 string for a new record.
pub(crate) fn new_id() -> String {
    Uuid::new_v4().to_string()
}
