use bigdecimal::BigDecimal;
use sqlx::FromRow;
use uuid::Uuid;

use business::domain::catalog::model::VariantSnapshot;
use business::domain::shared::value_objects::{ProductId, VariantId};

#[derive(Debug, FromRow)]
pub struct VariantEntity {
    pub variant_id: Uuid,
    pub product_id: Uuid,
    pub product_name: String,
    pub price: BigDecimal,
    pub is_deleted: bool,
}

impl VariantEntity {
    pub fn into_domain(self) -> VariantSnapshot {
        VariantSnapshot {
            variant_id: VariantId::new(self.variant_id),
            product_id: ProductId::new(self.product_id),
            product_name: self.product_name,
            unit_price: self.price,
            is_deleted: self.is_deleted,
        }
    }
}
