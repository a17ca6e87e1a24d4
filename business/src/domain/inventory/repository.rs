use async_trait::async_trait;

use crate::domain::errors::RepositoryError;
use crate::domain::shared::pagination::PagedResult;
use crate::domain::shared::value_objects::VariantId;

use super::errors::InventoryError;
use super::model::{InventoryRecord, Reservation};

/// Port over the per-variant stock counters.
///
/// `reserve` is the single correctness-critical primitive: the check of
/// `quantity_available` and the decrement must be one atomic operation in
/// the backing store (a conditional update), never a read followed by a
/// write from application memory. Concurrent reservations against the same
/// variant are serialized by the store and can never drive the available
/// count below zero.
#[async_trait]
pub trait InventoryLedger: Send + Sync {
    /// Atomically reserves `quantity` units if that many are available.
    async fn reserve(
        &self,
        variant_id: &VariantId,
        quantity: i64,
    ) -> Result<Reservation, InventoryError>;

    /// Unconditionally returns `quantity` units to the available count.
    /// Idempotency is the caller's responsibility.
    async fn release(&self, variant_id: &VariantId, quantity: i64) -> Result<(), RepositoryError>;

    /// Read-only stock level; not used on the order path.
    async fn get_level(&self, variant_id: &VariantId) -> Result<InventoryRecord, RepositoryError>;

    /// Variants at or below their reorder level, lowest stock first.
    async fn low_stock(
        &self,
        page: u32,
        page_size: u32,
    ) -> Result<PagedResult<InventoryRecord>, RepositoryError>;
}
