use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::shared::value_objects::{OrderId, VariantId};

use super::model::OrderStatus;

/// Read model returned across the workflow boundary, with display names
/// joined in from the related catalogs.
#[derive(Debug, Clone, Serialize)]
pub struct OrderView {
    pub order_id: OrderId,
    pub order_date: DateTime<Utc>,
    pub status: OrderStatus,
    pub store_name: String,
    pub payment_type: String,
    pub shipment_method: String,
    pub subtotal: BigDecimal,
    pub discount: BigDecimal,
    pub tax: BigDecimal,
    pub grand_total: BigDecimal,
    pub lines: Vec<OrderLineView>,
}

#[derive(Debug, Clone, Serialize)]
pub struct OrderLineView {
    pub variant_id: VariantId,
    pub product_name: String,
    pub quantity: i64,
    pub unit_price: BigDecimal,
}
