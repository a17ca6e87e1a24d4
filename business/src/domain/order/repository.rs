use async_trait::async_trait;

use crate::domain::errors::RepositoryError;
use crate::domain::shared::pagination::PagedResult;
use crate::domain::shared::value_objects::{CustomerId, OrderId};

use super::model::{Order, OrderStatus};
use super::view::OrderView;

/// Port over the authoritative order store.
///
/// `create_with_lines` and `cancel_with_restock` are transactional: an order
/// and its lines are never partially persisted, and a cancellation's status
/// update commits together with the inventory releases for every line.
#[async_trait]
pub trait OrderRepository: Send + Sync {
    async fn create_with_lines(&self, order: &Order) -> Result<(), RepositoryError>;

    /// When `customer_id` is given the read is scoped to that owner, so one
    /// customer can never load another's order.
    async fn get_by_id(
        &self,
        order_id: &OrderId,
        customer_id: Option<CustomerId>,
    ) -> Result<Order, RepositoryError>;

    async fn get_view(
        &self,
        order_id: &OrderId,
        customer_id: Option<CustomerId>,
    ) -> Result<OrderView, RepositoryError>;

    /// Newest orders first.
    async fn list_views_by_customer(
        &self,
        customer_id: &CustomerId,
        page: u32,
        page_size: u32,
    ) -> Result<PagedResult<OrderView>, RepositoryError>;

    /// Writes `new_status` only if the row still holds `expected`, so a
    /// transition validated against a stale read cannot be persisted.
    async fn update_status(
        &self,
        order_id: &OrderId,
        expected: OrderStatus,
        new_status: OrderStatus,
        actor: &CustomerId,
    ) -> Result<(), RepositoryError>;

    /// Marks the order cancelled and releases the reserved stock of every
    /// line, in a single transaction.
    async fn cancel_with_restock(
        &self,
        order: &Order,
        actor: &CustomerId,
    ) -> Result<(), RepositoryError>;
}
