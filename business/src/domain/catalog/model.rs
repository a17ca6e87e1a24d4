use bigdecimal::BigDecimal;

use crate::domain::shared::value_objects::{ProductId, VariantId};

/// Point-in-time view of a product variant as resolved from the catalog.
///
/// The unit price captured here is the price snapshotted onto order lines;
/// it is never recomputed from the catalog after the order is created.
#[derive(Debug, Clone)]
pub struct VariantSnapshot {
    pub variant_id: VariantId,
    pub product_id: ProductId,
    pub product_name: String,
    pub unit_price: BigDecimal,
    pub is_deleted: bool,
}

impl VariantSnapshot {
    pub fn is_available(&self) -> bool {
        !self.is_deleted
    }
}
