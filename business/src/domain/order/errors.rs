use crate::domain::shared::value_objects::VariantId;

use super::model::OrderStatus;

/// Order workflow error taxonomy.
/// Use code-style identifiers for all error variants for i18n compatibility;
/// diagnostic data rides on the variant fields so clients can report the
/// offending line or status.
#[derive(Debug, thiserror::Error)]
pub enum OrderError {
    #[error("order.store_not_found")]
    StoreNotFound,
    #[error("order.variant_unavailable")]
    VariantUnavailable { variant_id: VariantId },
    /// Expected, frequent outcome under contention; safe for the client to
    /// retry with an adjusted quantity.
    #[error("order.insufficient_stock")]
    InsufficientStock {
        variant_id: VariantId,
        requested: i64,
        available: i64,
    },
    #[error("order.invalid_quantity")]
    InvalidQuantity { variant_id: VariantId },
    #[error("order.no_lines")]
    EmptyOrder,
    /// Totals that do not satisfy `grand_total = subtotal - discount + tax`.
    #[error("order.inconsistent_totals")]
    InconsistentTotals,
    #[error("order.invalid_transition")]
    InvalidTransition {
        from: OrderStatus,
        to: OrderStatus,
    },
    #[error("order.not_found")]
    NotFound,
    /// Missing status catalog entries; operator-visible, not user-recoverable.
    #[error("order.configuration")]
    ConfigurationError,
    /// Transient store failure. Compensation has already run, so the caller
    /// may safely retry.
    #[error("order.persistence")]
    PersistenceFailure,
}
