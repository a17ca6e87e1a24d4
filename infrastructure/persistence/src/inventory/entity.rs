use sqlx::FromRow;
use uuid::Uuid;

use business::domain::inventory::model::InventoryRecord;
use business::domain::shared::value_objects::VariantId;

#[derive(Debug, FromRow)]
pub struct InventoryEntity {
    pub variant_id: Uuid,
    pub quantity_available: i64,
    pub quantity_reserved: i64,
    pub reorder_level: i64,
}

impl InventoryEntity {
    pub fn into_domain(self) -> InventoryRecord {
        InventoryRecord {
            variant_id: VariantId::new(self.variant_id),
            quantity_available: self.quantity_available,
            quantity_reserved: self.quantity_reserved,
            reorder_level: self.reorder_level,
        }
    }
}
