//! # Product Commands

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::commands::new_id;
use crate::error::StoreResult;
use crate::store::Store;
use granel_core::{validation, CoreError, Money, Product, ProductKind};

/// Fields of the product form.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductInput {
    pub code: String,
    pub kind: ProductKind,
    pub name: String,
    pub price_cents: i64,
    pub cost_cents: i64,
    pub previous_price_cents: Option<i64>,
    /// Grams for weight goods, units otherwise.
    pub stock: i64,
}

/// Creates a product, or updates it in place when `id` is given.
///
/// The kind is fixed at creation; editing keeps the record's original
/// creation timestamp and bumps `updated_at`.
pub fn save_product(
    store: &mut Store,
    input: ProductInput,
    id: Option<String>,
) -> StoreResult<Product> {
    validation::validate_product_name(&input.name)?;
    validation::validate_product_code(&input.code)?;
    validation::validate_price(Money::from_cents(input.price_cents))?;
    validation::validate_price(Money::from_cents(input.cost_cents))?;

    let now = Utc::now();
    let saved = store.try_mutate(|doc| match id {
        Some(id) => {
            let product = doc
                .product_mut(&id)
                .ok_or_else(|| CoreError::ProductNotFound(id.clone()))?;
            product.code = input.code;
            product.name = input.name;
            product.price_cents = input.price_cents;
            product.cost_cents = input.cost_cents;
            product.previous_price_cents = input.previous_price_cents;
            product.stock = input.stock;
            product.updated_at = now;
            Ok(product.clone())
        }
        None => {
            let product = Product {
                id: new_id(),
                code: input.code,
                kind: input.kind,
                name: input.name,
                price_cents: input.price_cents,
                cost_cents: input.cost_cents,
                previous_price_cents: input.previous_price_cents,
                stock: input.stock,
                created_at: now,
                updated_at: now,
            };
            doc.products.push(product.clone());
            Ok(product)
        }
    })?;

    info!(id = %saved.id, code = %saved.code, "product saved");
    Ok(saved)
}

/// Removes a product from the catalog.
///
/// Past sales keep their line snapshots; only the catalog entry goes away.
pub fn delete_product(store: &mut Store, id: &str) -> StoreResult<()> {
    debug!(id = %id, "delete_product command");
    store.try_mutate(|doc| {
        let before = doc.products.len();
        doc.products.retain(|p| p.id != id);
        if doc.products.len() == before {
            return Err(CoreError::ProductNotFound(id.to_string()));
        }
        Ok(())
    })
}

// =============================================================================
// Unit Tests
// =============================================================================
