//! # Finance Commands
//!
//! Expense bookkeeping, ledger-record deletion, and the period views: the
//! DRE statement, the merged movement listing, and the CSV export.

use chrono::{NaiveDate, Utc};
use tracing::{info, warn};

use crate::commands::new_id;
use crate::error::{StoreError, StoreResult};
use crate::report;
use crate::store::Store;
use granel_core::ledger::{
    expenses_in_range, merge_entries, sales_in_range, FinancialStatement, LedgerEntry,
};
use granel_core::{validation, CoreError, DateRange, Expense, Money};

/// Books an expense. An absent category falls back to the default bucket
/// at display time; the record stores what was given.
pub fn add_expense(
    store: &mut Store,
    description: &str,
    value_cents: i64,
    category: Option<&str>,
) -> StoreResult<Expense> {
    validation::validate_expense_description(description)?;
    validation::validate_expense_value(Money::from_cents(value_cents))?;

    let expense = Expense {
        id: new_id(),
        created_at: Utc::now(),
        description: description.trim().to_string(),
        value_cents,
        category: category.unwrap_or_default().trim().to_string(),
    };
    store.mutate(|doc| doc.expenses.push(expense.clone()))?;
    info!(id = %expense.id, value = value_cents, "expense booked");
    Ok(expense)
}

/// Removes a sale from the ledger.
///
/// Stock is not restored and past session events are not rewritten; the
/// resulting drift in closed-session totals is accepted behavior.
pub fn delete_sale(store: &mut Store, id: &str) -> StoreResult<()> {
    warn!(id = %id, "deleting ledger sale");
    store.try_mutate(|doc| {
        let before = doc.sales.len();
        doc.sales.retain(|s| s.id != id);
        if doc.sales.len() == before {
            return Err(CoreError::SaleNotFound(id.to_string()));
        }
        Ok(())
    })
}

/// Removes an expense from the ledger.
pub fn delete_expense(store: &mut Store, id: &str) -> StoreResult<()> {
    warn!(id = %id, "deleting ledger expense");
    store.try_mutate(|doc| {
        let before = doc.expenses.len();
        doc.expenses.retain(|e| e.id != id);
        if doc.expenses.len() == before {
            return Err(CoreError::ExpenseNotFound(id.to_string()));
        }
        Ok(())
    })
}

/// DRE statement for the selected period. Both dates must be picked.
pub fn statement(
    store: &Store,
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
) -> StoreResult<FinancialStatement> {
    let range = DateRange::from_selection(start, end)?;
    let doc = store.document();
    let sales = sales_in_range(&doc.sales, range);
    let expenses = expenses_in_range(&doc.expenses, range);
    Ok(FinancialStatement::compute(&sales, &expenses))
}

/// The merged movement listing for the selected period, newest first.
pub fn ledger_entries(
    store: &Store,
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
) -> StoreResult<Vec<LedgerEntry>> {
    let range = DateRange::from_selection(start, end)?;
    let doc = store.document();
    let sales = sales_in_range(&doc.sales, range);
    let expenses = expenses_in_range(&doc.expenses, range);
    Ok(merge_entries(&sales, &expenses))
}

/// CSV export for the selected period.
///
/// Exporting from a system with no ledger records at all is rejected; a
/// period that merely filters down to nothing still yields a header-only
/// file.
pub fn export_report(
    store: &Store,
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
) -> StoreResult<String> {
    let range = DateRange::from_selection(start, end)?;
    let doc = store.document();
    if doc.sales.is_empty() && doc.expenses.is_empty() {
        return Err(StoreError::NothingToExport);
    }
    report::financial_report_csv(&doc.sales, &doc.expenses, range)
}

// =============================================================================
// Unit Tests
// =============================================================================
