//! # granel-store: State Store & Command Layer for Granel POS
//!
//! Owns the persisted application document and exposes the operator-facing
//! commands on top of the pure logic in `granel-core`.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                  UI shell (out of scope)                        │
//! └───────────────────────────────┬─────────────────────────────────┘
//!                                 │
//! ┌───────────────────────────────▼─────────────────────────────────┐
//! │               ★ granel-store (THIS CRATE) ★                     │
//! │                                                                 │
//! │  ┌──────────┐ ┌─────────┐ ┌──────────┐ ┌────────┐ ┌─────────┐   │
//! │  │ document │ │  store  │ │ commands │ │ backup │ │ report  │   │
//! │  │ AppDoc   │ │ flush   │ │ product  │ │ JSON   │ │ CSV     │   │
//! │  │          │ │ path    │ │ cart ... │ │ io     │ │ export  │   │
//! │  └──────────┘ └─────────┘ └──────────┘ └────────┘ └─────────┘   │
//! └───────────────────────────────┬─────────────────────────────────┘
//!                                 │
//! ┌───────────────────────────────▼─────────────────────────────────┐
//! │              granel-core (pure business logic)                  │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`document`] - The persisted application state object
//! - [`store`] - Write-through JSON store (single write path)
//! - [`commands`] - Operator commands: catalog, cart, drawer, finance, agenda
//! - [`backup`] - Full-state JSON export and restore
//! - [`report`] - Semicolon-delimited CSV financial report
//! - [`config`] - Data-file location and export naming
//! - [`error`] - Store error types

// =============================================================================
// Module Declarations
// =============================================================================

pub mod backup;
pub mod commands;
pub mod config;
pub mod document;
pub mod error;
pub mod report;
pub mod store;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use backup::{export_backup, import_backup, ImportSummary};
pub use config::StoreConfig;
pub use document::AppDocument;
pub use error::{StoreError, StoreResult};
pub use store::Store;
