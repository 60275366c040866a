//! Money calculation for order lines
//!
//! 文档里金额存 `f64`，所有运算内部走 `Decimal`，落盘前四舍五入到 2 位。

use crate::utils::{AppError, AppResult};
use rust_decimal::prelude::*;

/// Rounding for monetary values (2 decimal places)
const DECIMAL_PLACES: u32 = 2;

/// Maximum allowed unit price
const MAX_PRICE: f64 = 1_000_000.0;
/// Maximum allowed quantity per line
const MAX_QUANTITY: i32 = 999;

/// Validate a captured unit price
pub fn validate_price(price: f64) -> AppResult<()> {
    if !price.is_finite() {
        return Err(AppError::validation(format!(
            "Price must be a finite number, got {}",
            price
        )));
    }
    if price < 0.0 {
        return Err(AppError::validation(format!(
            "Price must be non-negative, got {}",
            price
        )));
    }
    if price > MAX_PRICE {
        return Err(AppError::validation(format!(
            "Price exceeds maximum allowed ({}), got {}",
            MAX_PRICE, price
        )));
    }
    Ok(())
}

/// Validate a line quantity
pub fn validate_quantity(quantity: i32) -> AppResult<()> {
    if quantity < 1 {
        return Err(AppError::validation(format!(
            "Quantity must be at least 1, got {}",
            quantity
        )));
    }
    if quantity > MAX_QUANTITY {
        return Err(AppError::validation(format!(
            "Quantity exceeds maximum allowed ({}), got {}",
            MAX_QUANTITY, quantity
        )));
    }
    Ok(())
}

/// line_total = price × quantity, rounded to 2dp
pub fn line_total(price: f64, quantity: i32) -> AppResult<f64> {
    validate_price(price)?;
    validate_quantity(quantity)?;
    let price = Decimal::from_f64(price)
        .ok_or_else(|| AppError::internal(format!("Unrepresentable price: {}", price)))?;
    let total = (price * Decimal::from(quantity)).round_dp(DECIMAL_PLACES);
    total
        .to_f64()
        .ok_or_else(|| AppError::internal("Line total out of range".to_string()))
}

/// Sum of line totals, rounded to 2dp
pub fn order_total(line_totals: &[f64]) -> AppResult<f64> {
    let mut sum = Decimal::ZERO;
    for &value in line_totals {
        sum += Decimal::from_f64(value)
            .ok_or_else(|| AppError::internal(format!("Unrepresentable amount: {}", value)))?;
    }
    sum.round_dp(DECIMAL_PLACES)
        .to_f64()
        .ok_or_else(|| AppError::internal("Order total out of range".to_string()))
}
