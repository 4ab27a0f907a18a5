//! # Application State Document
//!
//! The single persisted object: `{ products, sales, expenses,
//! appointments, cashier }`.
//!
//! ## Backward Compatibility
//! Every field carries `#[serde(default)]`, so a backup written before a
//! section existed (e.g. pre-appointments) loads with that section empty
//! and a missing cashier defaulting to a closed drawer with no history.

use serde::{Deserialize, Serialize};

use granel_core::{Appointment, CashSession, Expense, Product, Sale};

/// The whole application state, serialized as one JSON document.
///
/// Ordered lists are append-only from the application's perspective;
/// deletions are explicit operator actions in the command layer.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppDocument {
    #[serde(default)]
    pub products: Vec<Product>,

    #[serde(default)]
    pub sales: Vec<Sale>,

    #[serde(default)]
    pub expenses: Vec<Expense>,

    #[serde(default)]
    pub appointments: Vec<Appointment>,

    #[serde(default)]
    pub cashier: CashSession,
}

impl AppDocument {
    /// A fresh, empty document: no records, drawer closed.
    pub fn empty() -> Self {
        AppDocument::default()
    }

    /// Looks up a catalog product by id.
    pub fn product(&self, id: &str) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    /// Mutable catalog lookup (stock decrement, edits).
    pub fn product_mut(&mut self, id: &str) -> Option<&mut Product> {
        self.products.iter_mut().find(|p| p.id == id)
    }

    /// Looks up an appointment by id.
    pub fn appointment(&self, id: &str) -> Option<&Appointment> {
        self.appointments.iter().find(|a| a.id == id)
    }

    /// Mutable appointment lookup (edits, status toggles).
    pub fn appointment_mut(&mut self, id: &str) -> Option<&mut Appointment> {
        self.appointments.iter_mut().find(|a| a.id == id)
    }
}
