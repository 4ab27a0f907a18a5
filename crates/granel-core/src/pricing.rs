//! # Cart Pricing Engine
//!
//! Converts operator input (grams, currency amount, or unit count) into
//! sellable cart lines, and settles the cash payment at checkout.
//!
//! ## Weight-Priced Input Modes
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │  Bulk goods card: two linked fields                             │
//! │                                                                 │
//! │  Gramas [ 250 ] ──► price_for_grams ──► Valor [ R$ 10,00 ]      │
//! │                                                                 │
//! │  Valor [ 10,00 ] ──► grams_for_amount ──► Gramas [ 250 ]        │
//! │                                                                 │
//! │  money = grams/1000 × price_per_kg                              │
//! │  grams = money/price_per_kg × 1000 (nearest whole gram)         │
//! │  Zero or unparsable input clears the paired field (None).       │
//! └─────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::types::{PaymentMethod, Product, ProductKind, Sale};
use crate::{CASH_TOLERANCE, GRAMS_PER_KILOGRAM};

// =============================================================================
// Weight / Price Conversion
// =============================================================================

/// Subtotal in centavos for `grams` of a product priced per kilogram.
///
/// Integer math with half-up rounding: `round(grams × price / 1000)`.
/// i128 intermediates keep large carts away from overflow.
pub fn weight_subtotal(grams: i64, price_per_kg: Money) -> Money {
    let cents = (grams as i128 * price_per_kg.cents() as i128 + GRAMS_PER_KILOGRAM as i128 / 2)
        / GRAMS_PER_KILOGRAM as i128;
    Money::from_cents(cents as i64)
}

/// Preview for the money field while the operator types grams.
///
/// `None` when the entered weight is zero or negative, which clears the
/// paired field instead of leaving a stale value.
pub fn price_for_grams(grams: i64, price_per_kg: Money) -> Option<Money> {
    if grams <= 0 {
        return None;
    }
    Some(weight_subtotal(grams, price_per_kg))
}

/// Inverse conversion: whole grams purchasable for a currency amount.
///
/// Rounded to the nearest gram for display re-population. `None` when the
/// amount is zero/negative or the product has no price.
pub fn grams_for_amount(amount: Money, price_per_kg: Money) -> Option<i64> {
    if amount.cents() <= 0 || price_per_kg.cents() <= 0 {
        return None;
    }
    let grams = (amount.cents() as i128 * GRAMS_PER_KILOGRAM as i128
        + price_per_kg.cents() as i128 / 2)
        / price_per_kg.cents() as i128;
    Some(grams as i64)
}

/// Subtotal preview for unit-priced goods, shown only for positive counts.
pub fn unit_preview(quantity: i64, unit_price: Money) -> Option<Money> {
    if quantity <= 0 {
        return None;
    }
    Some(unit_price * quantity)
}

// =============================================================================
// Cart Line
// =============================================================================

/// A line in the active checkout cart.
///
/// ## Design Notes
/// - `product_id` references the catalog entry (for stock decrement)
/// - price and cost are frozen at add time: later catalog edits do not
///   retroactively change an open cart
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartLine {
    /// Product ID (UUID)
    pub product_id: String,

    /// Business code at time of adding (frozen)
    pub code: String,

    /// Product name at time of adding (frozen)
    pub name: String,

    pub kind: ProductKind,

    /// Sale price in centavos at time of adding (frozen)
    pub unit_price_cents: i64,

    /// Cost price in centavos at time of adding (frozen)
    pub unit_cost_cents: i64,

    /// Raw entered quantity: grams for weight goods, units otherwise.
    pub quantity: i64,

    /// quantity × price, in the product's pricing unit.
    pub subtotal_cents: i64,

    /// quantity × cost.
    pub cost_cents: i64,

    pub added_at: DateTime<Utc>,
}

impl CartLine {
    /// Builds a line for a weight-priced product from entered grams.
    pub fn weight(product: &Product, grams: i64, now: DateTime<Utc>) -> Self {
        CartLine {
            product_id: product.id.clone(),
            code: product.code.clone(),
            name: product.name.clone(),
            kind: ProductKind::Weight,
            unit_price_cents: product.price_cents,
            unit_cost_cents: product.cost_cents,
            quantity: grams,
            subtotal_cents: weight_subtotal(grams, product.price()).cents(),
            cost_cents: weight_subtotal(grams, product.cost()).cents(),
            added_at: now,
        }
    }

    /// Builds a line for a unit-priced product from an entered count.
    pub fn unit(product: &Product, quantity: i64, now: DateTime<Utc>) -> Self {
        CartLine {
            product_id: product.id.clone(),
            code: product.code.clone(),
            name: product.name.clone(),
            kind: ProductKind::Unit,
            unit_price_cents: product.price_cents,
            unit_cost_cents: product.cost_cents,
            quantity,
            subtotal_cents: (product.price() * quantity).cents(),
            cost_cents: (product.cost() * quantity).cents(),
            added_at: now,
        }
    }

    #[inline]
    pub fn subtotal(&self) -> Money {
        Money::from_cents(self.subtotal_cents)
    }

    #[inline]
    pub fn cost(&self) -> Money {
        Money::from_cents(self.cost_cents)
    }

    /// Receipt-style quantity label: `"250g"` or `"3un"`.
    pub fn quantity_label(&self) -> String {
        match self.kind {
            ProductKind::Weight => format!("{}g", self.quantity),
            ProductKind::Unit => format!("{}un", self.quantity),
        }
    }
}

// =============================================================================
// Cart
// =============================================================================

/// The active checkout cart.
///
/// Transient: lives only between adds and the checkout confirmation (or an
/// explicit clear). Lines are independent snapshots; adding the same
/// product twice keeps two lines, matching how bulk weighing is operated.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Cart {
    pub lines: Vec<CartLine>,
}

impl Cart {
    pub fn new() -> Self {
        Cart { lines: Vec::new() }
    }

    /// Adds a weight-priced product by entered grams.
    pub fn add_weight_item(&mut self, product: &Product, grams: i64, now: DateTime<Utc>) {
        self.lines.push(CartLine::weight(product, grams, now));
    }

    /// Adds a unit-priced product by entered count.
    pub fn add_unit_item(&mut self, product: &Product, quantity: i64, now: DateTime<Utc>) {
        self.lines.push(CartLine::unit(product, quantity, now));
    }

    /// Removes and returns the line at `index`.
    pub fn remove_line(&mut self, index: usize) -> CoreResult<CartLine> {
        if index >= self.lines.len() {
            return Err(CoreError::LineNotFound(index));
        }
        Ok(self.lines.remove(index))
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    pub fn total(&self) -> Money {
        self.lines.iter().map(CartLine::subtotal).sum()
    }

    pub fn total_cost(&self) -> Money {
        self.lines.iter().map(CartLine::cost).sum()
    }

    /// Consumes the cart into an immutable [`Sale`] record.
    ///
    /// Totals are derived from the lines here, so the `total == Σ subtotal`
    /// and `profit == total - cost` invariants hold by construction.
    pub fn into_sale(
        self,
        id: String,
        method: PaymentMethod,
        now: DateTime<Utc>,
    ) -> CoreResult<Sale> {
        if self.is_empty() {
            return Err(CoreError::EmptyCart);
        }
        let total = self.total();
        let cost = self.total_cost();
        Ok(Sale {
            id,
            created_at: now,
            lines: self.lines,
            total_cents: total.cents(),
            cost_cents: cost.cents(),
            profit_cents: (total - cost).cents(),
            method,
        })
    }
}

// =============================================================================
// Cash Settlement
// =============================================================================

/// Verifies a cash payment against the cart total and returns the change.
///
/// Accepts `tendered >= total - CASH_TOLERANCE` (5 centavos of rounding
/// slack, a legacy constant kept as documented behavior). Change never goes
/// below zero.
pub fn verify_cash_payment(total: Money, tendered: Money) -> CoreResult<Money> {
    if tendered < total - CASH_TOLERANCE {
        return Err(CoreError::InsufficientPayment { total, tendered });
    }
    Ok((tendered - total).max_zero())
}

// =============================================================================
// Unit Tests
// =============================================================================
