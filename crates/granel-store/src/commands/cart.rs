//! # Cart & Checkout Commands
//!
//! ## Checkout Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │  add_to_cart (drawer must be open)                              │
//! │       │                                                         │
//! │       ▼                                                         │
//! │  checkout(method, tendered)                                     │
//! │       │  cash: tendered ≥ total − tolerance, change computed    │
//! │       │  other methods: confirmed immediately                   │
//! │       ▼                                                         │
//! │  Sale appended ─► stock decremented ─► cart cleared ─► flush    │
//! └─────────────────────────────────────────────────────────────────┘
//! ```

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::commands::new_id;
use crate::error::StoreResult;
use crate::store::Store;
use granel_core::pricing::{grams_for_amount, verify_cash_payment};
use granel_core::{
    validation, Cart, CoreError, Money, PaymentMethod, ProductKind, ValidationError,
};

/// How the operator quantified the product on its card.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub enum QuantityInput {
    /// Weight field of a bulk-goods card.
    Grams(i64),
    /// Currency field of a bulk-goods card, in centavos.
    Amount(i64),
    /// Count field of a unit-priced card.
    Units(i64),
}

/// Adds a product to the active cart.
///
/// Rejected while the drawer is closed; the cart never outlives a session
/// boundary unvalidated. The line freezes the product's current price and
/// cost.
pub fn add_to_cart(
    store: &Store,
    cart: &mut Cart,
    product_id: &str,
    input: QuantityInput,
) -> StoreResult<()> {
    let doc = store.document();
    if !doc.cashier.is_open {
        return Err(CoreError::CashierClosed.into());
    }

    let product = doc
        .product(product_id)
        .ok_or_else(|| CoreError::ProductNotFound(product_id.to_string()))?;

    let now = Utc::now();
    match (product.kind, input) {
        (ProductKind::Weight, QuantityInput::Grams(grams)) => {
            validation::validate_quantity(grams)?;
            cart.add_weight_item(product, grams, now);
        }
        (ProductKind::Weight, QuantityInput::Amount(cents)) => {
            let grams = grams_for_amount(Money::from_cents(cents), product.price())
                .ok_or(ValidationError::MustBePositive {
                    field: "amount".to_string(),
                })?;
            validation::validate_quantity(grams)?;
            cart.add_weight_item(product, grams, now);
        }
        (ProductKind::Unit, QuantityInput::Units(quantity)) => {
            validation::validate_quantity(quantity)?;
            cart.add_unit_item(product, quantity, now);
        }
        _ => return Err(ValidationError::InputModeMismatch.into()),
    }

    debug!(product = %product_id, lines = cart.line_count(), "cart line added");
    Ok(())
}

/// Checkout confirmation response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckoutReceipt {
    pub sale_id: String,
    pub total_cents: i64,
    pub change_cents: i64,
    pub method: PaymentMethod,
}

/// Confirms the payment and books the sale.
///
/// On success the sale is appended to the ledger, each involved product's
/// stock drops by its line quantity, and the cart is cleared. A rejection
/// (insufficient cash, empty cart) leaves the cart and the ledger as they
/// were.
pub fn checkout(
    store: &mut Store,
    cart: &mut Cart,
    method: PaymentMethod,
    tendered_cents: Option<i64>,
) -> StoreResult<CheckoutReceipt> {
    if cart.is_empty() {
        return Err(CoreError::EmptyCart.into());
    }

    let total = cart.total();
    let change = if method.is_cash() {
        let tendered = tendered_cents.ok_or(ValidationError::Required {
            field: "amount paid".to_string(),
        })?;
        verify_cash_payment(total, Money::from_cents(tendered))?
    } else {
        Money::zero()
    };

    // Payment verified; from here on the cart is consumed.
    let working = std::mem::take(cart);
    let sale = working.into_sale(new_id(), method, Utc::now())?;
    let sale_id = sale.id.clone();

    store.mutate(|doc| {
        for line in &sale.lines {
            // A product deleted since the add keeps its line in the sale;
            // there is simply no stock left to decrement.
            if let Some(product) = doc.product_mut(&line.product_id) {
                product.stock -= line.quantity;
            }
        }
        doc.sales.push(sale);
    })?;

    info!(sale = %sale_id, total = total.cents(), ?method, "sale booked");
    Ok(CheckoutReceipt {
        sale_id,
        total_cents: total.cents(),
        change_cents: change.cents(),
        method,
    })
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::cashier::open_cashier;
    use crate::commands::product::{save_product, ProductInput};

    fn temp_store() -> (tempfile::TempDir, Store) {
        let dir = tempfile::tempdir().unwrap();
        let store = Store::open(dir.path().join("state.json")).unwrap();
        (dir, store)
    }

    fn seed_weight_product(store: &mut Store) -> String {
        save_product(
            store,
            ProductInput {
                code: "GR001".to_string(),
                kind: ProductKind::Weight,
                name: "Granola".to_string(),
                price_cents: 4000,
                cost_cents: 2000,
                previous_price_cents: None,
                stock: 5000,
            },
            None,
        )
        .unwrap()
        .id
    }

    fn seed_unit_product(store: &mut Store) -> String {
        save_product(
            store,
            ProductInput {
                code: "ML010".to_string(),
                kind: ProductKind::Unit,
                name: "Mel 500g".to_string(),
                price_cents: 1200,
                cost_cents: 700,
                previous_price_cents: None,
                stock: 20,
            },
            None,
        )
        .unwrap()
        .id
    }

    #[test]
    fn test_add_to_cart_requires_open_drawer() {
        let (_dir, mut store) = temp_store();
        let product_id = seed_weight_product(&mut store);

        let mut cart = Cart::new();
        let result = add_to_cart(&store, &mut cart, &product_id, QuantityInput::Grams(250));
        assert!(matches!(
            result,
            Err(crate::error::StoreError::Core(CoreError::CashierClosed))
        ));
        assert!(cart.is_empty());
    }

    #[test]
    fn test_add_by_grams_and_by_amount_agree() {
        let (_dir, mut store) = temp_store();
        let product_id = seed_weight_product(&mut store);
        open_cashier(&mut store, 0).unwrap();

        let mut cart = Cart::new();
        add_to_cart(&store, &mut cart, &product_id, QuantityInput::Grams(250)).unwrap();
        add_to_cart(&store, &mut cart, &product_id, QuantityInput::Amount(1000)).unwrap();

        // 250 g at R$ 40,00/kg both ways
        assert_eq!(cart.lines[0].quantity, 250);
        assert_eq!(cart.lines[1].quantity, 250);
        assert_eq!(cart.total().cents(), 2000);
    }

    #[test]
    fn test_input_mode_mismatch_rejected() {
        let (_dir, mut store) = temp_store();
        let product_id = seed_unit_product(&mut store);
        open_cashier(&mut store, 0).unwrap();

        let mut cart = Cart::new();
        let result = add_to_cart(&store, &mut cart, &product_id, QuantityInput::Grams(100));
        assert!(result.is_err());
        assert!(cart.is_empty());
    }

    #[test]
    fn test_cash_checkout_books_sale_and_decrements_stock() {
        let (_dir, mut store) = temp_store();
        let weight_id = seed_weight_product(&mut store);
        let unit_id = seed_unit_product(&mut store);
        open_cashier(&mut store, 10_000).unwrap();

        let mut cart = Cart::new();
        add_to_cart(&store, &mut cart, &weight_id, QuantityInput::Grams(500)).unwrap();
        add_to_cart(&store, &mut cart, &unit_id, QuantityInput::Units(2)).unwrap();
        // 500 g × 40,00/kg + 2 × 12,00 = 44,00
        assert_eq!(cart.total().cents(), 4400);

        let receipt =
            checkout(&mut store, &mut cart, PaymentMethod::Cash, Some(5000)).unwrap();
        assert_eq!(receipt.total_cents, 4400);
        assert_eq!(receipt.change_cents, 600);
        assert!(cart.is_empty());

        let doc = store.document();
        assert_eq!(doc.sales.len(), 1);
        assert_eq!(doc.sales[0].profit_cents, 4400 - (1000 + 1400));
        assert_eq!(doc.product(&weight_id).unwrap().stock, 4500);
        assert_eq!(doc.product(&unit_id).unwrap().stock, 18);
    }

    #[test]
    fn test_insufficient_cash_keeps_cart_and_ledger() {
        let (_dir, mut store) = temp_store();
        let weight_id = seed_weight_product(&mut store);
        open_cashier(&mut store, 0).unwrap();

        let mut cart = Cart::new();
        add_to_cart(&store, &mut cart, &weight_id, QuantityInput::Grams(250)).unwrap();

        let result = checkout(&mut store, &mut cart, PaymentMethod::Cash, Some(900));
        assert!(result.is_err());
        assert_eq!(cart.line_count(), 1);
        assert!(store.document().sales.is_empty());
        assert_eq!(store.document().product(&weight_id).unwrap().stock, 5000);
    }

    #[test]
    fn test_non_cash_confirms_without_tendered_amount() {
        let (_dir, mut store) = temp_store();
        let unit_id = seed_unit_product(&mut store);
        open_cashier(&mut store, 0).unwrap();

        let mut cart = Cart::new();
        add_to_cart(&store, &mut cart, &unit_id, QuantityInput::Units(1)).unwrap();

        let receipt = checkout(&mut store, &mut cart, PaymentMethod::Pix, None).unwrap();
        assert_eq!(receipt.change_cents, 0);
        assert_eq!(store.document().sales.len(), 1);
    }
}
