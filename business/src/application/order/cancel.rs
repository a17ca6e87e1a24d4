use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::errors::RepositoryError;
use crate::domain::logger::Logger;
use crate::domain::order::errors::OrderError;
use crate::domain::order::model::OrderStatus;
use crate::domain::order::repository::OrderRepository;
use crate::domain::order::use_cases::cancel::CancelOrderUseCase;
use crate::domain::shared::value_objects::{CustomerId, OrderId};

pub struct CancelOrderUseCaseImpl {
    pub orders: Arc<dyn OrderRepository>,
    pub logger: Arc<dyn Logger>,
}

#[async_trait]
impl CancelOrderUseCase for CancelOrderUseCaseImpl {
    async fn execute(
        &self,
        order_id: OrderId,
        customer_id: CustomerId,
    ) -> Result<(), OrderError> {
        self.logger
            .info(&format!("Cancelling order {} for customer {}", order_id, customer_id));

        let order = self
            .orders
            .get_by_id(&order_id, Some(customer_id))
            .await
            .map_err(|e| match e {
                RepositoryError::NotFound => OrderError::NotFound,
                _ => OrderError::PersistenceFailure,
            })?;

        order.transition_to(OrderStatus::Cancelled)?;

        // Status update and per-line inventory release commit together; a
        // failure leaves both untouched.
        self.orders
            .cancel_with_restock(&order, &customer_id)
            .await
            .map_err(|e| match e {
                RepositoryError::NotFound => OrderError::NotFound,
                _ => OrderError::PersistenceFailure,
            })?;

        self.logger
            .info(&format!("Order {} cancelled, stock restored", order_id));
        Ok(())
    }
}
