//! # Cash Session Manager
//!
//! Tracks the drawer session: opening float, session history, and the
//! expected cash-on-hand computed at close.
//!
//! ## Life-Cycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │            CLOSED ──open(float)──► OPEN                         │
//! │              ▲                      │                           │
//! │              └──────close()─────────┘                           │
//! │                                                                 │
//! │  open:  only from CLOSED, records float + Open history event    │
//! │  close: only from OPEN, computes                                │
//! │         float + Σ cash sales after open − Σ expenses after open │
//! │         and records a Close event carrying that value           │
//! │                                                                 │
//! │  History is append-only and never truncated. Ledger deletions   │
//! │  after a close do NOT rewrite past session events; the drift    │
//! │  is documented behavior, not a bug to silently fix.             │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Records stamped exactly at the open instant belong to the *prior*
//! session: the reconciliation comparison is a strict greater-than.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::types::{Expense, PaymentMethod, Sale};

// =============================================================================
// Session Events
// =============================================================================

/// Kind of a permanent session history entry.
///
/// Serialized with the legacy pt-BR tags for backup compatibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionEventKind {
    #[serde(rename = "ABERTURA")]
    Open,
    #[serde(rename = "FECHAMENTO")]
    Close,
}

/// A permanent entry in the session history.
///
/// Never edited or removed once appended.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionEvent {
    pub id: String,
    pub kind: SessionEventKind,
    pub description: String,
    pub value_cents: i64,
    /// Always [`PaymentMethod::Cash`]: the drawer only ever holds cash.
    pub method: PaymentMethod,
    pub created_at: DateTime<Utc>,
}

// =============================================================================
// Cash Session
// =============================================================================

/// The drawer session state persisted in the application document.
///
/// Exactly one session is active at a time; `is_open` is flipped only by
/// [`CashSession::open`] and [`CashSession::close`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CashSession {
    #[serde(default)]
    pub is_open: bool,

    /// When the current (or last) session was opened.
    #[serde(default)]
    pub opened_at: Option<DateTime<Utc>>,

    /// Starting cash placed in the drawer at open.
    #[serde(default)]
    pub initial_float_cents: i64,

    /// OPEN and CLOSE entries across the application's whole lifetime.
    #[serde(default)]
    pub history: Vec<SessionEvent>,
}

impl Default for CashSession {
    fn default() -> Self {
        CashSession {
            is_open: false,
            opened_at: None,
            initial_float_cents: 0,
            history: Vec::new(),
        }
    }
}

impl CashSession {
    /// Opens the drawer with a non-negative starting float.
    ///
    /// Allowed only while CLOSED; appends an Open history event.
    pub fn open(
        &mut self,
        initial_float: Money,
        event_id: String,
        now: DateTime<Utc>,
    ) -> CoreResult<()> {
        if self.is_open {
            return Err(CoreError::CashierAlreadyOpen);
        }

        self.is_open = true;
        self.opened_at = Some(now);
        self.initial_float_cents = initial_float.cents();
        self.history.push(SessionEvent {
            id: event_id,
            kind: SessionEventKind::Open,
            description: "Abertura de Caixa".to_string(),
            value_cents: initial_float.cents(),
            method: PaymentMethod::Cash,
            created_at: now,
        });
        Ok(())
    }

    /// Closes the drawer and returns the expected cash-on-hand.
    ///
    /// Allowed only while OPEN. The computed value is reported to the
    /// operator; the system never verifies it against a physical count.
    pub fn close(
        &mut self,
        sales: &[Sale],
        expenses: &[Expense],
        event_id: String,
        now: DateTime<Utc>,
    ) -> CoreResult<Money> {
        if !self.is_open {
            return Err(CoreError::CashierClosed);
        }
        // A session imported with is_open but no open timestamp cannot be
        // reconciled; reject without mutating.
        let Some(opened_at) = self.opened_at else {
            return Err(CoreError::CashierClosed);
        };

        let expected = expected_cash(
            Money::from_cents(self.initial_float_cents),
            opened_at,
            sales,
            expenses,
        );

        self.history.push(SessionEvent {
            id: event_id,
            kind: SessionEventKind::Close,
            description: format!("Fechamento (Gaveta: {expected})"),
            value_cents: expected.cents(),
            method: PaymentMethod::Cash,
            created_at: now,
        });
        self.is_open = false;
        Ok(expected)
    }
}

/// Expected drawer cash for a session opened at `opened_at`:
/// `float + Σ cash-method sale totals − Σ expense values`, counting only
/// records strictly after the open instant.
pub fn expected_cash(
    initial_float: Money,
    opened_at: DateTime<Utc>,
    sales: &[Sale],
    expenses: &[Expense],
) -> Money {
    let cash_sales: Money = sales
        .iter()
        .filter(|s| s.method.is_cash() && s.created_at > opened_at)
        .map(|s| s.total())
        .sum();
    let spent: Money = expenses
        .iter()
        .filter(|e| e.created_at > opened_at)
        .map(|e| e.value())
        .sum();

    initial_float + cash_sales - spent
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn sale_at(at: DateTime<Utc>, total: i64, method: PaymentMethod) -> Sale {
        Sale {
            id: format!("s-{total}"),
            created_at: at,
            lines: Vec::new(),
            total_cents: total,
            cost_cents: 0,
            profit_cents: total,
            method,
        }
    }

    fn expense_at(at: DateTime<Utc>, value: i64) -> Expense {
        Expense {
            id: format!("e-{value}"),
            created_at: at,
            description: "despesa".to_string(),
            value_cents: value,
            category: "Geral".to_string(),
        }
    }

    #[test]
    fn test_open_close_reconciliation() {
        // Float 100,00 + cash sale 50,00 − expense 20,00 = 130,00
        let mut session = CashSession::default();
        let t0 = Utc::now();
        session
            .open(Money::from_cents(10_000), "ev-open".to_string(), t0)
            .unwrap();
        assert!(session.is_open);

        let sales = vec![sale_at(t0 + Duration::minutes(5), 5_000, PaymentMethod::Cash)];
        let expenses = vec![expense_at(t0 + Duration::minutes(10), 2_000)];

        let expected = session
            .close(&sales, &expenses, "ev-close".to_string(), t0 + Duration::hours(8))
            .unwrap();
        assert_eq!(expected.cents(), 13_000);
        assert!(!session.is_open);

        let close_event = session.history.last().unwrap();
        assert_eq!(close_event.kind, SessionEventKind::Close);
        assert_eq!(close_event.value_cents, 13_000);
        assert!(close_event.description.contains("R$ 130,00"));
    }

    #[test]
    fn test_non_cash_sales_do_not_enter_the_drawer() {
        let t0 = Utc::now();
        let sales = vec![
            sale_at(t0 + Duration::minutes(1), 5_000, PaymentMethod::Card),
            sale_at(t0 + Duration::minutes(2), 3_000, PaymentMethod::Pix),
            sale_at(t0 + Duration::minutes(3), 1_000, PaymentMethod::Cash),
        ];
        let expected = expected_cash(Money::from_cents(2_000), t0, &sales, &[]);
        assert_eq!(expected.cents(), 3_000);
    }

    #[test]
    fn test_boundary_records_belong_to_prior_session() {
        // A sale stamped exactly at the open instant is excluded.
        let t0 = Utc::now();
        let sales = vec![sale_at(t0, 5_000, PaymentMethod::Cash)];
        let expenses = vec![expense_at(t0, 1_000)];
        let expected = expected_cash(Money::from_cents(10_000), t0, &sales, &expenses);
        assert_eq!(expected.cents(), 10_000);
    }

    #[test]
    fn test_close_while_closed_is_rejected_without_side_effects() {
        let mut session = CashSession::default();
        let result = session.close(&[], &[], "ev".to_string(), Utc::now());
        assert!(matches!(result, Err(CoreError::CashierClosed)));
        assert!(session.history.is_empty());
        assert!(!session.is_open);
    }

    #[test]
    fn test_open_while_open_is_rejected() {
        let mut session = CashSession::default();
        let now = Utc::now();
        session
            .open(Money::from_cents(500), "ev-1".to_string(), now)
            .unwrap();
        let result = session.open(Money::from_cents(700), "ev-2".to_string(), now);
        assert!(matches!(result, Err(CoreError::CashierAlreadyOpen)));
        // The running session is untouched
        assert_eq!(session.initial_float_cents, 500);
        assert_eq!(session.history.len(), 1);
    }

    #[test]
    fn test_history_accumulates_across_cycles() {
        let mut session = CashSession::default();
        let mut now = Utc::now();
        for i in 0..3 {
            session
                .open(Money::from_cents(1_000), format!("open-{i}"), now)
                .unwrap();
            now += Duration::hours(8);
            session.close(&[], &[], format!("close-{i}"), now).unwrap();
            now += Duration::hours(16);
        }
        assert_eq!(session.history.len(), 6);
        assert!(!session.is_open);
    }
}
