use async_trait::async_trait;
use bigdecimal::BigDecimal;

use crate::domain::order::errors::OrderError;
use crate::domain::order::view::OrderView;
use crate::domain::shared::value_objects::{CustomerId, StoreId, VariantId};

pub struct OrderItemRequest {
    pub variant_id: VariantId,
    pub quantity: i64,
}

pub struct CreateOrderParams {
    pub customer_id: CustomerId,
    pub store_id: StoreId,
    pub payment_type_id: i32,
    pub shipment_method_id: i32,
    pub items: Vec<OrderItemRequest>,
    pub tax_override: Option<BigDecimal>,
}

#[async_trait]
pub trait CreateOrderUseCase: Send + Sync {
    async fn execute(&self, params: CreateOrderParams) -> Result<OrderView, OrderError>;
}
