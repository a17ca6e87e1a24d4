use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::errors::RepositoryError;
use crate::domain::logger::Logger;
use crate::domain::order::errors::OrderError;
use crate::domain::order::model::OrderStatus;
use crate::domain::order::repository::OrderRepository;
use crate::domain::order::use_cases::update_status::{
    UpdateOrderStatusParams, UpdateOrderStatusUseCase,
};

pub struct UpdateOrderStatusUseCaseImpl {
    pub orders: Arc<dyn OrderRepository>,
    pub logger: Arc<dyn Logger>,
}

#[async_trait]
impl UpdateOrderStatusUseCase for UpdateOrderStatusUseCaseImpl {
    async fn execute(&self, params: UpdateOrderStatusParams) -> Result<(), OrderError> {
        self.logger.info(&format!(
            "Updating order {} status to {}",
            params.order_id, params.new_status
        ));

        // Unscoped read: this is the administrative entry point.
        let order = self
            .orders
            .get_by_id(&params.order_id, None)
            .await
            .map_err(|e| match e {
                RepositoryError::NotFound => OrderError::NotFound,
                _ => OrderError::PersistenceFailure,
            })?;

        order.transition_to(params.new_status)?;

        // A cancellation must release the reserved stock of every line, so
        // it goes through the same transaction as the customer-facing path.
        if params.new_status == OrderStatus::Cancelled {
            return self
                .orders
                .cancel_with_restock(&order, &params.actor_id)
                .await
                .map_err(|e| match e {
                    RepositoryError::NotFound => OrderError::NotFound,
                    _ => OrderError::PersistenceFailure,
                });
        }

        self.orders
            .update_status(&params.order_id, order.status, params.new_status, &params.actor_id)
            .await
            .map_err(|e| match e {
                RepositoryError::NotFound => OrderError::NotFound,
                _ => OrderError::PersistenceFailure,
            })
    }
}
