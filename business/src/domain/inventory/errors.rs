use crate::domain::shared::value_objects::VariantId;

#[derive(Debug, thiserror::Error)]
pub enum InventoryError {
    /// Expected outcome when demand exceeds stock; not a fault.
    #[error("inventory.insufficient_stock")]
    InsufficientStock {
        variant_id: VariantId,
        requested: i64,
        available: i64,
    },
    #[error("repository.persistence")]
    Repository(#[from] crate::domain::errors::RepositoryError),
}
