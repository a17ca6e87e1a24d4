use crate::domain::shared::value_objects::VariantId;

/// Stock counters for one product variant.
///
/// `quantity_available` never goes negative; the only writers are the
/// ledger's `reserve` and `release` primitives.
#[derive(Debug, Clone)]
pub struct InventoryRecord {
    pub variant_id: VariantId,
    pub quantity_available: i64,
    pub quantity_reserved: i64,
    pub reorder_level: i64,
}

impl InventoryRecord {
    pub fn is_low_stock(&self) -> bool {
        self.quantity_available <= self.reorder_level
    }
}

/// Proof that stock was decremented, kept by the workflow so it can
/// compensate with `release` if a later step fails.
#[derive(Debug, Clone)]
pub struct Reservation {
    pub variant_id: VariantId,
    pub quantity: i64,
}
