//! # Backup Import / Export
//!
//! Full-state JSON backup: export serializes the whole document; import
//! replaces the state wholesale (after the caller has confirmed with the
//! operator) and re-applies the missing-field defaults, so backups taken
//! before newer sections existed keep restoring.

use tracing::{info, warn};

use crate::document::AppDocument;
use crate::error::{StoreError, StoreResult};
use crate::store::Store;

/// Counts reported back to the operator after a restore.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportSummary {
    pub products: usize,
    pub sales: usize,
    pub expenses: usize,
    pub appointments: usize,
}

/// Serializes the full document as pretty-printed JSON for download.
pub fn export_backup(document: &AppDocument) -> StoreResult<String> {
    Ok(serde_json::to_string_pretty(document)?)
}

/// Restores a backup, replacing the entire state.
///
/// Parsing happens before any mutation: a malformed file reports the
/// underlying reason and leaves the existing state untouched. Missing
/// sections come back as their defaults via the document's serde config.
pub fn import_backup(store: &mut Store, raw: &str) -> StoreResult<ImportSummary> {
    let document: AppDocument = serde_json::from_str(raw).map_err(|err| {
        warn!(error = %err, "backup import rejected");
        StoreError::Import {
            reason: err.to_string(),
        }
    })?;

    let summary = ImportSummary {
        products: document.products.len(),
        sales: document.sales.len(),
        expenses: document.expenses.len(),
        appointments: document.appointments.len(),
    };

    store.replace(document)?;
    info!(
        products = summary.products,
        sales = summary.sales,
        expenses = summary.expenses,
        appointments = summary.appointments,
        "backup restored"
    );
    Ok(summary)
}

// =============================================================================
// Unit Tests
// =============================================================================
