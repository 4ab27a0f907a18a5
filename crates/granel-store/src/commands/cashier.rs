//! # Cash Drawer Commands

use chrono::Utc;
use tracing::info;

use crate::commands::new_id;
use crate::document::AppDocument;
use crate::error::StoreResult;
use crate::store::Store;
use granel_core::{validation, Money};

/// Opens the drawer with `initial_float_cents` in starting cash.
pub fn open_cashier(store: &mut Store, initial_float_cents: i64) -> StoreResult<()> {
    let float = Money::from_cents(initial_float_cents);
    validation::validate_initial_float(float)?;

    store.try_mutate(|doc| doc.cashier.open(float, new_id(), Utc::now()))?;
    info!(float = initial_float_cents, "cashier opened");
    Ok(())
}

/// Closes the drawer and returns the expected cash-on-hand for the
/// operator to reconcile against a physical count.
pub fn close_cashier(store: &mut Store) -> StoreResult<Money> {
    let expected = store.try_mutate(|doc| {
        let AppDocument {
            sales,
            expenses,
            cashier,
            ..
        } = doc;
        cashier.close(sales, expenses, new_id(), Utc::now())
    })?;
    info!(expected = expected.cents(), "cashier closed");
    Ok(expected)
}

// =============================================================================
// Unit Tests
// =============================================================================
