use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::errors::RepositoryError;
use crate::domain::logger::Logger;
use crate::domain::order::errors::OrderError;
use crate::domain::order::repository::OrderRepository;
use crate::domain::order::use_cases::get_by_id::GetOrderUseCase;
use crate::domain::order::view::OrderView;
use crate::domain::shared::value_objects::{CustomerId, OrderId};

pub struct GetOrderUseCaseImpl {
    pub orders: Arc<dyn OrderRepository>,
    pub logger: Arc<dyn Logger>,
}

#[async_trait]
impl GetOrderUseCase for GetOrderUseCaseImpl {
    async fn execute(
        &self,
        order_id: OrderId,
        customer_id: CustomerId,
    ) -> Result<OrderView, OrderError> {
        self.logger
            .debug(&format!("Fetching order {} for customer {}", order_id, customer_id));

        self.orders
            .get_view(&order_id, Some(customer_id))
            .await
            .map_err(|e| match e {
                RepositoryError::NotFound => OrderError::NotFound,
                _ => OrderError::PersistenceFailure,
            })
    }
}
