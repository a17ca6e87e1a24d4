use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::shared::value_objects::{
    CustomerId, OrderId, ProductId, StoreId, VariantId,
};

use super::errors::OrderError;
use super::pricing::OrderTotals;

/// Order lifecycle states.
///
/// Fulfillment moves strictly forward (`Pending` → `Processing` → `Shipped`
/// → `Delivered`); `Pending` and `Processing` orders may move sideways to
/// `Cancelled`. `Cancelled`, `Delivered` and `Completed` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrderStatus {
    Pending,
    Processing,
    Shipped,
    Delivered,
    Cancelled,
    Completed,
}

impl OrderStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            OrderStatus::Cancelled | OrderStatus::Delivered | OrderStatus::Completed
        )
    }

    /// Whether the state machine permits moving from `self` to `next`.
    /// Forward skips and any move out of a terminal state are rejected.
    pub fn can_transition(&self, next: &OrderStatus) -> bool {
        use OrderStatus::*;
        matches!(
            (self, next),
            (Pending, Processing)
                | (Processing, Shipped)
                | (Shipped, Delivered)
                | (Pending, Cancelled)
                | (Processing, Cancelled)
        )
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OrderStatus::Pending => write!(f, "pending"),
            OrderStatus::Processing => write!(f, "processing"),
            OrderStatus::Shipped => write!(f, "shipped"),
            OrderStatus::Delivered => write!(f, "delivered"),
            OrderStatus::Cancelled => write!(f, "cancelled"),
            OrderStatus::Completed => write!(f, "completed"),
        }
    }
}

impl std::str::FromStr for OrderStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(OrderStatus::Pending),
            "processing" => Ok(OrderStatus::Processing),
            "shipped" => Ok(OrderStatus::Shipped),
            "delivered" => Ok(OrderStatus::Delivered),
            "cancelled" => Ok(OrderStatus::Cancelled),
            "completed" => Ok(OrderStatus::Completed),
            _ => Err(format!("Invalid order status: {}", s)),
        }
    }
}

/// One line of an order.
///
/// Stores the variant identifier (not only the parent product) so the exact
/// reservation can be compensated on cancellation, and snapshots the unit
/// price at order time.
#[derive(Debug, Clone)]
pub struct OrderLine {
    pub variant_id: VariantId,
    pub product_id: ProductId,
    pub quantity: i64,
    pub unit_price: BigDecimal,
    pub discount: BigDecimal,
}

impl OrderLine {
    pub fn new(
        variant_id: VariantId,
        product_id: ProductId,
        quantity: i64,
        unit_price: BigDecimal,
        discount: BigDecimal,
    ) -> Result<Self, OrderError> {
        if quantity <= 0 {
            return Err(OrderError::InvalidQuantity { variant_id });
        }
        Ok(Self {
            variant_id,
            product_id,
            quantity,
            unit_price,
            discount,
        })
    }

    /// Constructor for data already persisted in the repository (no validation).
    pub fn from_repository(
        variant_id: VariantId,
        product_id: ProductId,
        quantity: i64,
        unit_price: BigDecimal,
        discount: BigDecimal,
    ) -> Self {
        Self {
            variant_id,
            product_id,
            quantity,
            unit_price,
            discount,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Order {
    pub id: OrderId,
    pub customer_id: CustomerId,
    pub store_id: StoreId,
    pub payment_type_id: i32,
    pub shipment_method_id: i32,
    pub status: OrderStatus,
    pub subtotal: BigDecimal,
    pub discount: BigDecimal,
    pub tax: BigDecimal,
    pub grand_total: BigDecimal,
    pub order_date: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub is_deleted: bool,
    pub updated_by: Option<CustomerId>,
    pub lines: Vec<OrderLine>,
}

pub struct NewOrderProps {
    pub id: OrderId,
    pub customer_id: CustomerId,
    pub store_id: StoreId,
    pub payment_type_id: i32,
    pub shipment_method_id: i32,
    pub status: OrderStatus,
    pub totals: OrderTotals,
    pub lines: Vec<OrderLine>,
}

impl Order {
    pub fn new(props: NewOrderProps) -> Result<Self, OrderError> {
        if props.lines.is_empty() {
            return Err(OrderError::EmptyOrder);
        }
        for line in &props.lines {
            if line.quantity <= 0 {
                return Err(OrderError::InvalidQuantity {
                    variant_id: line.variant_id,
                });
            }
        }
        let expected_total =
            &props.totals.subtotal - &props.totals.discount + &props.totals.tax;
        if props.totals.grand_total != expected_total {
            return Err(OrderError::InconsistentTotals);
        }

        let now = Utc::now();
        Ok(Self {
            id: props.id,
            customer_id: props.customer_id,
            store_id: props.store_id,
            payment_type_id: props.payment_type_id,
            shipment_method_id: props.shipment_method_id,
            status: props.status,
            subtotal: props.totals.subtotal,
            discount: props.totals.discount,
            tax: props.totals.tax,
            grand_total: props.totals.grand_total,
            order_date: now,
            created_at: now,
            is_deleted: false,
            updated_by: None,
            lines: props.lines,
        })
    }

    /// Constructor for data already persisted in the repository (no validation).
    #[allow(clippy::too_many_arguments)]
    pub fn from_repository(
        id: OrderId,
        customer_id: CustomerId,
        store_id: StoreId,
        payment_type_id: i32,
        shipment_method_id: i32,
        status: OrderStatus,
        totals: OrderTotals,
        order_date: DateTime<Utc>,
        created_at: DateTime<Utc>,
        is_deleted: bool,
        updated_by: Option<CustomerId>,
        lines: Vec<OrderLine>,
    ) -> Self {
        Self {
            id,
            customer_id,
            store_id,
            payment_type_id,
            shipment_method_id,
            status,
            subtotal: totals.subtotal,
            discount: totals.discount,
            tax: totals.tax,
            grand_total: totals.grand_total,
            order_date,
            created_at,
            is_deleted,
            updated_by,
            lines,
        }
    }

    /// Validates a status change against the state machine.
    pub fn transition_to(&self, next: OrderStatus) -> Result<(), OrderError> {
        if !self.status.can_transition(&next) {
            return Err(OrderError::InvalidTransition {
                from: self.status,
                to: next,
            });
        }
        Ok(())
    }
}
