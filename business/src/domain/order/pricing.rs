use std::sync::Arc;

use bigdecimal::num_bigint::BigInt;
use bigdecimal::{BigDecimal, Zero};

use crate::domain::shared::value_objects::{ProductId, VariantId};

/// Input to the pricing engine: a resolved line with its price snapshot.
#[derive(Debug, Clone)]
pub struct PricedLine {
    pub variant_id: VariantId,
    pub product_id: ProductId,
    pub product_name: String,
    pub quantity: i64,
    pub unit_price: BigDecimal,
}

#[derive(Debug, Clone)]
pub struct OrderTotals {
    pub subtotal: BigDecimal,
    pub discount: BigDecimal,
    pub tax: BigDecimal,
    pub grand_total: BigDecimal,
}

/// Extension point for per-line discount rules. The shipped policy applies
/// no discount.
pub trait DiscountPolicy: Send + Sync {
    fn line_discount(&self, line: &PricedLine) -> BigDecimal;
}

pub struct NoDiscount;

impl DiscountPolicy for NoDiscount {
    fn line_discount(&self, _line: &PricedLine) -> BigDecimal {
        BigDecimal::zero()
    }
}

/// Deterministic, side-effect-free price computation.
///
/// subtotal = Σ unit_price × quantity
/// tax      = tax_override if given, else tax_rate × (subtotal - discount)
/// total    = subtotal - discount + tax
#[derive(Clone)]
pub struct PricingEngine {
    tax_rate: BigDecimal,
    discount_policy: Arc<dyn DiscountPolicy>,
}

impl PricingEngine {
    pub fn new(tax_rate: BigDecimal, discount_policy: Arc<dyn DiscountPolicy>) -> Self {
        Self {
            tax_rate,
            discount_policy,
        }
    }

    /// Discount for a single line under the configured policy. Order lines
    /// store this value, so the stored line discounts always sum to the
    /// aggregate discount in the totals.
    pub fn line_discount(&self, line: &PricedLine) -> BigDecimal {
        self.discount_policy.line_discount(line)
    }

    pub fn price(&self, lines: &[PricedLine], tax_override: Option<BigDecimal>) -> OrderTotals {
        let mut subtotal = BigDecimal::zero();
        let mut discount = BigDecimal::zero();
        for line in lines {
            subtotal += &line.unit_price * BigDecimal::from(line.quantity);
            discount += self.discount_policy.line_discount(line);
        }

        let taxable = &subtotal - &discount;
        let tax = tax_override.unwrap_or_else(|| &self.tax_rate * &taxable);
        let grand_total = &taxable + &tax;

        OrderTotals {
            subtotal,
            discount,
            tax,
            grand_total,
        }
    }
}

impl Default for PricingEngine {
    /// Flat 14% tax, no discount.
    fn default() -> Self {
        Self::new(BigDecimal::new(BigInt::from(14), 2), Arc::new(NoDiscount))
    }
}
