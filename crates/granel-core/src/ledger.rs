//! # Ledger Filtering & Financial Aggregation
//!
//! The date-range filter and the DRE-style statement (revenue, cost of
//! goods, gross/net profit) computed over a filtered slice of the ledger.
//!
//! ## Data Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │  sales ─┐                                                       │
//! │         ├──► DateRange::contains ──► FinancialStatement::compute│
//! │  expenses ┘      (inclusive days)        (pure reductions)      │
//! │                                                                 │
//! │  Degenerate inputs never fail: empty slices produce a           │
//! │  statement of zeros, margin included.                           │
//! └─────────────────────────────────────────────────────────────────┘
//! ```

use std::collections::HashMap;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{CoreResult, ValidationError};
use crate::money::Money;
use crate::types::{Expense, Sale};

// =============================================================================
// Date-Range Filter
// =============================================================================

/// An inclusive calendar-day window selected by the operator.
///
/// Records are binned by the calendar day of their stored UTC timestamp,
/// matching how the legacy data was filed. Both boundary days are included.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    /// Builds a range, rejecting inverted bounds.
    pub fn new(start: NaiveDate, end: NaiveDate) -> CoreResult<Self> {
        if start > end {
            return Err(ValidationError::InvertedDateRange {
                start: start.to_string(),
                end: end.to_string(),
            }
            .into());
        }
        Ok(DateRange { start, end })
    }

    /// A single-day range.
    pub fn single_day(day: NaiveDate) -> Self {
        DateRange { start: day, end: day }
    }

    /// Builds a range from the operator's (possibly unset) date pickers.
    ///
    /// A missing bound is a hard rejection ("select dates"), never a
    /// default filter.
    pub fn from_selection(
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    ) -> CoreResult<Self> {
        match (start, end) {
            (Some(start), Some(end)) => DateRange::new(start, end),
            _ => Err(ValidationError::DateRangeNotSelected.into()),
        }
    }

    /// True iff the timestamp's calendar day falls within `[start, end]`.
    #[inline]
    pub fn contains(&self, timestamp: DateTime<Utc>) -> bool {
        let day = timestamp.date_naive();
        day >= self.start && day <= self.end
    }
}

/// Sales whose day falls inside the range, in ledger order.
pub fn sales_in_range<'a>(sales: &'a [Sale], range: DateRange) -> Vec<&'a Sale> {
    sales.iter().filter(|s| range.contains(s.created_at)).collect()
}

/// Expenses whose day falls inside the range, in ledger order.
pub fn expenses_in_range<'a>(expenses: &'a [Expense], range: DateRange) -> Vec<&'a Expense> {
    expenses
        .iter()
        .filter(|e| range.contains(e.created_at))
        .collect()
}

// =============================================================================
// Financial Statement
// =============================================================================

/// One expense category's slice of the period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryTotal {
    pub category: String,
    pub value_cents: i64,
    /// Share of total expenses, 0.0 when the period has none.
    pub share_pct: f64,
}

/// The DRE-style profit/loss statement over a filtered record set.
///
/// All fields are simple reductions with no hidden state; degenerate cases
/// (no sales, no revenue) are defined as zero rather than errors.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FinancialStatement {
    pub revenue_cents: i64,
    pub cost_of_goods_cents: i64,
    pub gross_profit_cents: i64,
    pub total_expenses_cents: i64,
    pub net_profit_cents: i64,
    /// netProfit / revenue × 100; 0.0 when revenue is zero.
    pub margin_pct: f64,
    /// revenue / sale count; 0 when there are no sales.
    pub average_ticket_cents: i64,
    pub sale_count: usize,
    /// Per-category expense totals, descending by value.
    pub expense_breakdown: Vec<CategoryTotal>,
}

impl FinancialStatement {
    /// Computes the statement over records already filtered by [`DateRange`].
    pub fn compute(sales: &[&Sale], expenses: &[&Expense]) -> Self {
        let revenue: Money = sales.iter().map(|s| s.total()).sum();
        let cost_of_goods: Money = sales.iter().map(|s| s.cost()).sum();
        let gross_profit = revenue - cost_of_goods;
        let total_expenses: Money = expenses.iter().map(|e| e.value()).sum();
        let net_profit = gross_profit - total_expenses;

        let margin_pct = if revenue.is_zero() {
            0.0
        } else {
            net_profit.cents() as f64 / revenue.cents() as f64 * 100.0
        };

        let average_ticket_cents = if sales.is_empty() {
            0
        } else {
            revenue.cents() / sales.len() as i64
        };

        FinancialStatement {
            revenue_cents: revenue.cents(),
            cost_of_goods_cents: cost_of_goods.cents(),
            gross_profit_cents: gross_profit.cents(),
            total_expenses_cents: total_expenses.cents(),
            net_profit_cents: net_profit.cents(),
            margin_pct,
            average_ticket_cents,
            sale_count: sales.len(),
            expense_breakdown: expense_breakdown(expenses, total_expenses),
        }
    }
}

/// Per-category expense totals with each category's share of the period.
///
/// Uncategorized records fall under `"Outros"`. Sorted descending by value;
/// ties break alphabetically so the output is deterministic.
fn expense_breakdown(expenses: &[&Expense], total: Money) -> Vec<CategoryTotal> {
    let mut by_category: HashMap<&str, i64> = HashMap::new();
    for expense in expenses {
        *by_category.entry(expense.category_or_default()).or_insert(0) += expense.value_cents;
    }

    let mut breakdown: Vec<CategoryTotal> = by_category
        .into_iter()
        .map(|(category, value_cents)| CategoryTotal {
            category: category.to_string(),
            value_cents,
            share_pct: if total.is_zero() {
                0.0
            } else {
                value_cents as f64 / total.cents() as f64 * 100.0
            },
        })
        .collect();

    breakdown.sort_by(|a, b| {
        b.value_cents
            .cmp(&a.value_cents)
            .then_with(|| a.category.cmp(&b.category))
    });
    breakdown
}

// =============================================================================
// Merged Ledger View
// =============================================================================

/// Row type in the merged sales+expenses listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EntryKind {
    #[serde(rename = "VENDA")]
    Sale,
    #[serde(rename = "DESPESA")]
    Expense,
}

/// One row of the period's movement table (and of the CSV report).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LedgerEntry {
    pub id: String,
    pub created_at: DateTime<Utc>,
    pub kind: EntryKind,
    pub category: String,
    pub description: String,
    pub inflow_cents: i64,
    pub outflow_cents: i64,
}

impl LedgerEntry {
    fn from_sale(sale: &Sale) -> Self {
        LedgerEntry {
            id: sale.id.clone(),
            created_at: sale.created_at,
            kind: EntryKind::Sale,
            category: "Vendas".to_string(),
            description: format!("Venda ({} itens)", sale.lines.len()),
            inflow_cents: sale.total_cents,
            outflow_cents: 0,
        }
    }

    fn from_expense(expense: &Expense) -> Self {
        LedgerEntry {
            id: expense.id.clone(),
            created_at: expense.created_at,
            kind: EntryKind::Expense,
            category: expense.category_or_default().to_string(),
            description: expense.description.clone(),
            inflow_cents: 0,
            outflow_cents: expense.value_cents,
        }
    }
}

/// Merges filtered sales and expenses into one listing, newest first.
pub fn merge_entries(sales: &[&Sale], expenses: &[&Expense]) -> Vec<LedgerEntry> {
    let mut entries: Vec<LedgerEntry> = sales
        .iter()
        .map(|s| LedgerEntry::from_sale(s))
        .chain(expenses.iter().map(|e| LedgerEntry::from_expense(e)))
        .collect();
    entries.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    entries
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::PaymentMethod;
    use chrono::TimeZone;

    fn sale_on(day: &str, total: i64, cost: i64) -> Sale {
        let created_at: DateTime<Utc> = format!("{day}T12:00:00Z").parse().unwrap();
        Sale {
            id: format!("s-{day}-{total}"),
            created_at,
            lines: Vec::new(),
            total_cents: total,
            cost_cents: cost,
            profit_cents: total - cost,
            method: PaymentMethod::Cash,
        }
    }

    fn expense_on(day: &str, value: i64, category: &str) -> Expense {
        let created_at: DateTime<Utc> = format!("{day}T12:00:00Z").parse().unwrap();
        Expense {
            id: format!("e-{day}-{value}"),
            created_at,
            description: "despesa".to_string(),
            value_cents: value,
            category: category.to_string(),
        }
    }

    fn day(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    #[test]
    fn test_range_is_inclusive_on_both_ends() {
        let range = DateRange::new(day("2024-03-10"), day("2024-03-12")).unwrap();

        let at = |d: u32| Utc.with_ymd_and_hms(2024, 3, d, 23, 59, 59).unwrap();
        assert!(range.contains(at(10)));
        assert!(range.contains(at(12)));
        assert!(!range.contains(at(9)));
        assert!(!range.contains(at(13)));
    }

    #[test]
    fn test_inverted_range_rejected() {
        assert!(DateRange::new(day("2024-03-12"), day("2024-03-10")).is_err());
    }

    #[test]
    fn test_unset_selection_rejected() {
        assert!(DateRange::from_selection(Some(day("2024-03-10")), None).is_err());
        assert!(DateRange::from_selection(None, None).is_err());
        assert!(
            DateRange::from_selection(Some(day("2024-03-10")), Some(day("2024-03-10"))).is_ok()
        );
    }

    #[test]
    fn test_filter_selects_by_day() {
        let sales = vec![
            sale_on("2024-03-09", 1000, 400),
            sale_on("2024-03-10", 2000, 800),
            sale_on("2024-03-13", 3000, 900),
        ];
        let range = DateRange::new(day("2024-03-10"), day("2024-03-12")).unwrap();
        let filtered = sales_in_range(&sales, range);
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].total_cents, 2000);
    }

    #[test]
    fn test_statement_reductions() {
        let sales = vec![
            sale_on("2024-03-10", 5000, 2000),
            sale_on("2024-03-11", 3000, 1000),
        ];
        let expenses = vec![
            expense_on("2024-03-10", 1000, "Operacional"),
            expense_on("2024-03-11", 500, ""),
        ];
        let sale_refs: Vec<&Sale> = sales.iter().collect();
        let expense_refs: Vec<&Expense> = expenses.iter().collect();

        let statement = FinancialStatement::compute(&sale_refs, &expense_refs);
        assert_eq!(statement.revenue_cents, 8000);
        assert_eq!(statement.cost_of_goods_cents, 3000);
        assert_eq!(statement.gross_profit_cents, 5000);
        assert_eq!(statement.total_expenses_cents, 1500);
        assert_eq!(statement.net_profit_cents, 3500);
        assert_eq!(statement.average_ticket_cents, 4000);
        assert!((statement.margin_pct - 43.75).abs() < 1e-9);

        // Breakdown: Operacional 1000 (66.67%), Outros 500 (33.33%)
        assert_eq!(statement.expense_breakdown.len(), 2);
        assert_eq!(statement.expense_breakdown[0].category, "Operacional");
        assert_eq!(statement.expense_breakdown[1].category, "Outros");
        assert!((statement.expense_breakdown[0].share_pct - 2.0 / 3.0 * 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_zero_revenue_margin_is_zero_not_error() {
        let expenses = vec![expense_on("2024-03-10", 700, "Marketing")];
        let expense_refs: Vec<&Expense> = expenses.iter().collect();

        let statement = FinancialStatement::compute(&[], &expense_refs);
        assert_eq!(statement.revenue_cents, 0);
        assert_eq!(statement.margin_pct, 0.0);
        assert_eq!(statement.average_ticket_cents, 0);
        assert_eq!(statement.net_profit_cents, -700);
    }

    #[test]
    fn test_breakdown_share_zero_when_no_expenses() {
        let statement = FinancialStatement::compute(&[], &[]);
        assert!(statement.expense_breakdown.is_empty());
        assert_eq!(statement.total_expenses_cents, 0);
    }

    #[test]
    fn test_merged_entries_newest_first() {
        let sales = vec![sale_on("2024-03-10", 1000, 400)];
        let expenses = vec![expense_on("2024-03-11", 300, "Geral")];
        let sale_refs: Vec<&Sale> = sales.iter().collect();
        let expense_refs: Vec<&Expense> = expenses.iter().collect();

        let entries = merge_entries(&sale_refs, &expense_refs);
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].kind, EntryKind::Expense);
        assert_eq!(entries[1].kind, EntryKind::Sale);
        assert_eq!(entries[1].description, "Venda (0 itens)");
        assert_eq!(entries[1].inflow_cents, 1000);
        assert_eq!(entries[0].outflow_cents, 300);
    }
}
