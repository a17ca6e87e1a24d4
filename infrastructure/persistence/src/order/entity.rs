use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

use business::domain::errors::RepositoryError;
use business::domain::order::model::{Order, OrderLine, OrderStatus};
use business::domain::order::pricing::OrderTotals;
use business::domain::order::view::{OrderLineView, OrderView};
use business::domain::shared::value_objects::{
    CustomerId, OrderId, ProductId, StoreId, VariantId,
};

#[derive(Debug, FromRow)]
pub struct OrderEntity {
    pub order_id: String,
    pub customer_id: Uuid,
    pub store_id: Uuid,
    pub payment_type_id: i32,
    pub shipment_method_id: i32,
    pub status: String,
    pub subtotal: BigDecimal,
    pub discount: BigDecimal,
    pub tax: BigDecimal,
    pub grand_total: BigDecimal,
    pub order_date: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub is_deleted: bool,
    pub updated_by: Option<Uuid>,
}

impl OrderEntity {
    /// A status column that no longer parses is corrupt data, not a default.
    pub fn into_domain(self, lines: Vec<OrderLine>) -> Result<Order, RepositoryError> {
        let status = self
            .status
            .parse::<OrderStatus>()
            .map_err(|_| RepositoryError::DatabaseError)?;

        Ok(Order::from_repository(
            OrderId::new(self.order_id),
            CustomerId::new(self.customer_id),
            StoreId::new(self.store_id),
            self.payment_type_id,
            self.shipment_method_id,
            status,
            OrderTotals {
                subtotal: self.subtotal,
                discount: self.discount,
                tax: self.tax,
                grand_total: self.grand_total,
            },
            self.order_date,
            self.created_at,
            self.is_deleted,
            self.updated_by.map(CustomerId::new),
            lines,
        ))
    }
}

#[derive(Debug, FromRow)]
pub struct OrderLineEntity {
    pub variant_id: Uuid,
    pub product_id: Uuid,
    pub quantity: i64,
    pub unit_price: BigDecimal,
    pub discount: BigDecimal,
}

impl OrderLineEntity {
    pub fn into_domain(self) -> OrderLine {
        OrderLine::from_repository(
            VariantId::new(self.variant_id),
            ProductId::new(self.product_id),
            self.quantity,
            self.unit_price,
            self.discount,
        )
    }
}

#[derive(Debug, FromRow)]
pub struct OrderViewEntity {
    pub order_id: String,
    pub order_date: DateTime<Utc>,
    pub status: String,
    pub store_name: String,
    pub payment_type: String,
    pub shipment_method: String,
    pub subtotal: BigDecimal,
    pub discount: BigDecimal,
    pub tax: BigDecimal,
    pub grand_total: BigDecimal,
}

impl OrderViewEntity {
    pub fn into_domain(self, lines: Vec<OrderLineView>) -> Result<OrderView, RepositoryError> {
        let status = self
            .status
            .parse::<OrderStatus>()
            .map_err(|_| RepositoryError::DatabaseError)?;

        Ok(OrderView {
            order_id: OrderId::new(self.order_id),
            order_date: self.order_date,
            status,
            store_name: self.store_name,
            payment_type: self.payment_type,
            shipment_method: self.shipment_method,
            subtotal: self.subtotal,
            discount: self.discount,
            tax: self.tax,
            grand_total: self.grand_total,
            lines,
        })
    }
}

#[derive(Debug, FromRow)]
pub struct OrderLineViewEntity {
    pub variant_id: Uuid,
    pub product_name: String,
    pub quantity: i64,
    pub unit_price: BigDecimal,
}

impl OrderLineViewEntity {
    pub fn into_domain(self) -> OrderLineView {
        OrderLineView {
            variant_id: VariantId::new(self.variant_id),
            product_name: self.product_name,
            quantity: self.quantity,
            unit_price: self.unit_price,
        }
    }
}
