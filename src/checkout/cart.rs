use std::collections::HashMap;

use rust_decimal::Decimal;
use serde::Deserialize;
use uuid::Uuid;

use super::CheckoutError;

/// Largest total the NUMERIC(12, 2) `orders.total_price` column can hold.
pub fn max_order_total() -> Decimal {
    Decimal::new(999_999_999_999, 2)
}

/// One requested line. `product_id` stays a raw string so that an id which
/// can never exist is reported the same way as one that does not.
#[derive(Debug, Clone, Deserialize)]
pub struct CartLine {
    pub product_id: String,
    pub quantity: i64,
}

/// A cart line resolved against the catalog.
#[derive(Debug, Clone, PartialEq)]
pub struct PricedLine {
    pub product_id: Uuid,
    pub quantity: i32,
    pub unit_price: Decimal,
}

/// Shape checks that need no storage: a non-empty cart of positive quantities.
pub fn validate(cart: &[CartLine]) -> Result<(), CheckoutError> {
    if cart.is_empty() {
        return Err(CheckoutError::EmptyCart);
    }
    for line in cart {
        if line.quantity < 1 || line.quantity > i64::from(i32::MAX) {
            return Err(CheckoutError::InvalidQuantity {
                product_id: line.product_id.clone(),
                quantity: line.quantity,
            });
        }
    }
    Ok(())
}

/// Distinct well-formed ids in the cart, for a single catalog lookup.
pub fn product_ids(cart: &[CartLine]) -> Vec<Uuid> {
    let mut ids: Vec<Uuid> = cart
        .iter()
        .filter_map(|line| Uuid::parse_str(&line.product_id).ok())
        .collect();
    ids.sort_unstable();
    ids.dedup();
    ids
}

/// Snapshot current prices into priced lines and sum the order total.
///
/// Lines keep cart order and duplicates are not merged. The first line whose
/// product is absent from `prices` fails the whole cart, as does a total
/// above [`max_order_total`].
pub fn price(
    cart: &[CartLine],
    prices: &HashMap<Uuid, Decimal>,
) -> Result<(Vec<PricedLine>, Decimal), CheckoutError> {
    let mut lines = Vec::with_capacity(cart.len());
    let mut total = Decimal::ZERO;

    for line in cart {
        let found = Uuid::parse_str(&line.product_id)
            .ok()
            .and_then(|id| prices.get(&id).map(|price| (id, *price)));
        let Some((product_id, unit_price)) = found else {
            return Err(CheckoutError::ProductNotFound(line.product_id.clone()));
        };

        let quantity = i32::try_from(line.quantity).map_err(|_| CheckoutError::InvalidQuantity {
            product_id: line.product_id.clone(),
            quantity: line.quantity,
        })?;

        total = unit_price
            .checked_mul(Decimal::from(quantity))
            .and_then(|subtotal| total.checked_add(subtotal))
            .filter(|sum| *sum <= max_order_total())
            .ok_or(CheckoutError::TotalOverflow)?;

        lines.push(PricedLine {
            product_id,
            quantity,
            unit_price,
        });
    }

    Ok((lines, total))
}
