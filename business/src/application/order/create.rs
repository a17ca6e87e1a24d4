use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::catalog::repository::CatalogLookup;
use crate::domain::errors::RepositoryError;
use crate::domain::inventory::errors::InventoryError;
use crate::domain::inventory::model::Reservation;
use crate::domain::inventory::repository::InventoryLedger;
use crate::domain::logger::Logger;
use crate::domain::order::errors::OrderError;
use crate::domain::order::model::{NewOrderProps, Order, OrderLine};
use crate::domain::order::pricing::{PricedLine, PricingEngine};
use crate::domain::order::repository::OrderRepository;
use crate::domain::order::status_catalog::OrderStatusCatalog;
use crate::domain::order::use_cases::create::{CreateOrderParams, CreateOrderUseCase};
use crate::domain::order::view::OrderView;
use crate::domain::shared::value_objects::OrderId;
use crate::domain::store::repository::StoreRepository;

pub struct CreateOrderUseCaseImpl {
    pub stores: Arc<dyn StoreRepository>,
    pub status_catalog: Arc<dyn OrderStatusCatalog>,
    pub catalog: Arc<dyn CatalogLookup>,
    pub inventory: Arc<dyn InventoryLedger>,
    pub orders: Arc<dyn OrderRepository>,
    pub pricing: PricingEngine,
    pub logger: Arc<dyn Logger>,
}

impl CreateOrderUseCaseImpl {
    /// Compensates reservations already made in this request. Release
    /// failures are logged and skipped; the remaining lines still get
    /// released.
    async fn release_reservations(&self, reservations: &[Reservation]) {
        for reservation in reservations {
            if let Err(e) = self
                .inventory
                .release(&reservation.variant_id, reservation.quantity)
                .await
            {
                self.logger.error(&format!(
                    "Failed to release {} units of variant {}: {}",
                    reservation.quantity, reservation.variant_id, e
                ));
            }
        }
    }
}

#[async_trait]
impl CreateOrderUseCase for CreateOrderUseCaseImpl {
    async fn execute(&self, params: CreateOrderParams) -> Result<OrderView, OrderError> {
        self.logger.info(&format!(
            "Creating order for customer {} with {} line(s)",
            params.customer_id,
            params.items.len()
        ));

        if params.items.is_empty() {
            return Err(OrderError::EmptyOrder);
        }
        for item in &params.items {
            if item.quantity <= 0 {
                return Err(OrderError::InvalidQuantity {
                    variant_id: item.variant_id,
                });
            }
        }

        let store = self
            .stores
            .get_by_id(&params.store_id)
            .await
            .map_err(|e| match e {
                RepositoryError::NotFound => OrderError::StoreNotFound,
                _ => OrderError::PersistenceFailure,
            })?;
        if !store.is_active {
            return Err(OrderError::StoreNotFound);
        }

        let initial_status = self
            .status_catalog
            .default_status()
            .await
            .map_err(|_| OrderError::ConfigurationError)?;

        let order_id = OrderId::generate();

        // Reserve line by line; on any failure every reservation made so far
        // in this request is released before the error surfaces.
        let mut reservations: Vec<Reservation> = Vec::with_capacity(params.items.len());
        let mut priced_lines: Vec<PricedLine> = Vec::with_capacity(params.items.len());
        for item in &params.items {
            let snapshot = match self.catalog.resolve_variant(&item.variant_id).await {
                Ok(Some(s)) if s.is_available() => s,
                Ok(_) => {
                    self.release_reservations(&reservations).await;
                    return Err(OrderError::VariantUnavailable {
                        variant_id: item.variant_id,
                    });
                }
                Err(_) => {
                    self.release_reservations(&reservations).await;
                    return Err(OrderError::PersistenceFailure);
                }
            };

            match self.inventory.reserve(&item.variant_id, item.quantity).await {
                Ok(reservation) => reservations.push(reservation),
                Err(InventoryError::InsufficientStock {
                    variant_id,
                    requested,
                    available,
                }) => {
                    self.logger.warn(&format!(
                        "Insufficient stock for variant {}: requested {}, available {}",
                        variant_id, requested, available
                    ));
                    self.release_reservations(&reservations).await;
                    return Err(OrderError::InsufficientStock {
                        variant_id,
                        requested,
                        available,
                    });
                }
                Err(InventoryError::Repository(_)) => {
                    self.release_reservations(&reservations).await;
                    return Err(OrderError::PersistenceFailure);
                }
            }

            priced_lines.push(PricedLine {
                variant_id: item.variant_id,
                product_id: snapshot.product_id,
                product_name: snapshot.product_name,
                quantity: item.quantity,
                unit_price: snapshot.unit_price,
            });
        }

        let totals = self.pricing.price(&priced_lines, params.tax_override.clone());

        let mut lines = Vec::with_capacity(priced_lines.len());
        for priced in &priced_lines {
            lines.push(OrderLine::new(
                priced.variant_id,
                priced.product_id,
                priced.quantity,
                priced.unit_price.clone(),
                self.pricing.line_discount(priced),
            )?);
        }

        let order = Order::new(NewOrderProps {
            id: order_id.clone(),
            customer_id: params.customer_id,
            store_id: params.store_id,
            payment_type_id: params.payment_type_id,
            shipment_method_id: params.shipment_method_id,
            status: initial_status,
            totals,
            lines,
        })?;

        if let Err(e) = self.orders.create_with_lines(&order).await {
            self.logger.error(&format!(
                "Persisting order {} failed, releasing reservations: {}",
                order_id, e
            ));
            self.release_reservations(&reservations).await;
            return Err(OrderError::PersistenceFailure);
        }

        self.logger
            .info(&format!("Order created with id: {}", order_id));

        // The order is committed at this point, so a failed read of the view
        // is a retryable read problem and must not trigger compensation.
        self.orders
            .get_view(&order_id, Some(params.customer_id))
            .await
            .map_err(|_| OrderError::PersistenceFailure)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::catalog::model::VariantSnapshot;
    use crate::domain::inventory::model::InventoryRecord;
    use crate::domain::order::model::OrderStatus;
    use crate::domain::shared::pagination::PagedResult;
    use crate::domain::shared::value_objects::{CustomerId, ProductId, StoreId, VariantId};
    use crate::domain::order::pricing::DiscountPolicy;
    use crate::domain::store::model::Store;
    use bigdecimal::{BigDecimal, Zero};
    use mockall::mock;
    use mockall::predicate::eq;
    use uuid::Uuid;

    use crate::domain::order::use_cases::create::OrderItemRequest;
    use crate::domain::order::view::OrderLineView;

    mock! {
        pub Stores {}

        #[async_trait]
        impl StoreRepository for Stores {
            async fn get_by_id(&self, store_id: &StoreId) -> Result<Store, RepositoryError>;
        }
    }

    mock! {
        pub Statuses {}

        #[async_trait]
        impl OrderStatusCatalog for Statuses {
            async fn default_status(&self) -> Result<OrderStatus, RepositoryError>;
        }
    }

    mock! {
        pub Catalog {}

        #[async_trait]
        impl CatalogLookup for Catalog {
            async fn resolve_variant(&self, variant_id: &VariantId) -> Result<Option<VariantSnapshot>, RepositoryError>;
        }
    }

    mock! {
        pub Ledger {}

        #[async_trait]
        impl InventoryLedger for Ledger {
            async fn reserve(&self, variant_id: &VariantId, quantity: i64) -> Result<Reservation, InventoryError>;
            async fn release(&self, variant_id: &VariantId, quantity: i64) -> Result<(), RepositoryError>;
            async fn get_level(&self, variant_id: &VariantId) -> Result<InventoryRecord, RepositoryError>;
            async fn low_stock(&self, page: u32, page_size: u32) -> Result<PagedResult<InventoryRecord>, RepositoryError>;
        }
    }

    mock! {
        pub Orders {}

        #[async_trait]
        impl OrderRepository for Orders {
            async fn create_with_lines(&self, order: &Order) -> Result<(), RepositoryError>;
            async fn get_by_id(&self, order_id: &OrderId, customer_id: Option<CustomerId>) -> Result<Order, RepositoryError>;
            async fn get_view(&self, order_id: &OrderId, customer_id: Option<CustomerId>) -> Result<OrderView, RepositoryError>;
            async fn list_views_by_customer(&self, customer_id: &CustomerId, page: u32, page_size: u32) -> Result<PagedResult<OrderView>, RepositoryError>;
            async fn update_status(&self, order_id: &OrderId, expected: OrderStatus, new_status: OrderStatus, actor: &CustomerId) -> Result<(), RepositoryError>;
            async fn cancel_with_restock(&self, order: &Order, actor: &CustomerId) -> Result<(), RepositoryError>;
        }
    }

    mock! {
        pub Log {}

        impl Logger for Log {
            fn info(&self, message: &str);
            fn warn(&self, message: &str);
            fn error(&self, message: &str);
            fn debug(&self, message: &str);
        }
    }

    fn mock_logger() -> Arc<dyn Logger> {
        let mut logger = MockLog::new();
        logger.expect_info().returning(|_| ());
        logger.expect_warn().returning(|_| ());
        logger.expect_error().returning(|_| ());
        logger.expect_debug().returning(|_| ());
        Arc::new(logger)
    }

    fn active_store(store_id: StoreId) -> Store {
        Store {
            id: store_id,
            name: "Corner Deli".to_string(),
            is_active: true,
        }
    }

    fn snapshot(variant_id: VariantId, price: i64) -> VariantSnapshot {
        VariantSnapshot {
            variant_id,
            product_id: ProductId::new(Uuid::new_v4()),
            product_name: "Ground Coffee 500g".to_string(),
            unit_price: BigDecimal::from(price),
            is_deleted: false,
        }
    }

    fn view(order_id: OrderId) -> OrderView {
        OrderView {
            order_id,
            order_date: chrono::Utc::now(),
            status: OrderStatus::Pending,
            store_name: "Corner Deli".to_string(),
            payment_type: "card".to_string(),
            shipment_method: "standard".to_string(),
            subtotal: BigDecimal::from(20),
            discount: BigDecimal::zero(),
            tax: BigDecimal::from(2),
            grand_total: BigDecimal::from(22),
            lines: Vec::<OrderLineView>::new(),
        }
    }

    fn params(store_id: StoreId, items: Vec<OrderItemRequest>) -> CreateOrderParams {
        CreateOrderParams {
            customer_id: CustomerId::new(Uuid::new_v4()),
            store_id,
            payment_type_id: 1,
            shipment_method_id: 1,
            items,
            tax_override: None,
        }
    }

    struct Fixture {
        stores: MockStores,
        statuses: MockStatuses,
        catalog: MockCatalog,
        ledger: MockLedger,
        orders: MockOrders,
    }

    impl Fixture {
        fn new() -> Self {
            Self {
                stores: MockStores::new(),
                statuses: MockStatuses::new(),
                catalog: MockCatalog::new(),
                ledger: MockLedger::new(),
                orders: MockOrders::new(),
            }
        }

        fn build(self) -> CreateOrderUseCaseImpl {
            CreateOrderUseCaseImpl {
                stores: Arc::new(self.stores),
                status_catalog: Arc::new(self.statuses),
                catalog: Arc::new(self.catalog),
                inventory: Arc::new(self.ledger),
                orders: Arc::new(self.orders),
                pricing: PricingEngine::default(),
                logger: mock_logger(),
            }
        }
    }

    #[tokio::test]
    async fn should_create_order_and_return_view() {
        let store_id = StoreId::new(Uuid::new_v4());
        let variant_id = VariantId::new(Uuid::new_v4());

        let mut fx = Fixture::new();
        fx.stores
            .expect_get_by_id()
            .returning(move |id| Ok(active_store(*id)));
        fx.statuses
            .expect_default_status()
            .returning(|| Ok(OrderStatus::Pending));
        fx.catalog
            .expect_resolve_variant()
            .returning(|id| Ok(Some(snapshot(*id, 10))));
        fx.ledger
            .expect_reserve()
            .with(eq(variant_id), eq(2))
            .times(1)
            .returning(|id, q| {
                Ok(Reservation {
                    variant_id: *id,
                    quantity: q,
                })
            });
        fx.ledger.expect_release().times(0);
        fx.orders
            .expect_create_with_lines()
            .times(1)
            .withf(|order| {
                order.status == OrderStatus::Pending
                    && order.lines.len() == 1
                    && order.subtotal == BigDecimal::from(20)
                    && order.grand_total == &order.subtotal - &order.discount + &order.tax
            })
            .returning(|_| Ok(()));
        fx.orders
            .expect_get_view()
            .times(1)
            .returning(|id, _| Ok(view(id.clone())));

        let use_case = fx.build();
        let result = use_case
            .execute(params(
                store_id,
                vec![OrderItemRequest {
                    variant_id,
                    quantity: 2,
                }],
            ))
            .await;

        assert!(result.is_ok());
        assert_eq!(result.unwrap().status, OrderStatus::Pending);
    }

    #[tokio::test]
    async fn should_fail_when_store_missing() {
        let mut fx = Fixture::new();
        fx.stores
            .expect_get_by_id()
            .returning(|_| Err(RepositoryError::NotFound));

        let use_case = fx.build();
        let result = use_case
            .execute(params(
                StoreId::new(Uuid::new_v4()),
                vec![OrderItemRequest {
                    variant_id: VariantId::new(Uuid::new_v4()),
                    quantity: 1,
                }],
            ))
            .await;

        assert!(matches!(result.unwrap_err(), OrderError::StoreNotFound));
    }

    #[tokio::test]
    async fn should_fail_when_store_inactive() {
        let mut fx = Fixture::new();
        fx.stores.expect_get_by_id().returning(|id| {
            Ok(Store {
                id: *id,
                name: "Shuttered".to_string(),
                is_active: false,
            })
        });

        let use_case = fx.build();
        let result = use_case
            .execute(params(
                StoreId::new(Uuid::new_v4()),
                vec![OrderItemRequest {
                    variant_id: VariantId::new(Uuid::new_v4()),
                    quantity: 1,
                }],
            ))
            .await;

        assert!(matches!(result.unwrap_err(), OrderError::StoreNotFound));
    }

    #[tokio::test]
    async fn should_fail_with_configuration_error_when_status_catalog_empty() {
        let mut fx = Fixture::new();
        fx.stores
            .expect_get_by_id()
            .returning(|id| Ok(active_store(*id)));
        fx.statuses
            .expect_default_status()
            .returning(|| Err(RepositoryError::NotFound));

        let use_case = fx.build();
        let result = use_case
            .execute(params(
                StoreId::new(Uuid::new_v4()),
                vec![OrderItemRequest {
                    variant_id: VariantId::new(Uuid::new_v4()),
                    quantity: 1,
                }],
            ))
            .await;

        assert!(matches!(result.unwrap_err(), OrderError::ConfigurationError));
    }

    #[tokio::test]
    async fn should_reject_empty_item_list() {
        let use_case = Fixture::new().build();
        let result = use_case
            .execute(params(StoreId::new(Uuid::new_v4()), vec![]))
            .await;

        assert!(matches!(result.unwrap_err(), OrderError::EmptyOrder));
    }

    #[tokio::test]
    async fn should_reject_non_positive_quantity_before_reserving() {
        let use_case = Fixture::new().build();
        let variant_id = VariantId::new(Uuid::new_v4());
        let result = use_case
            .execute(params(
                StoreId::new(Uuid::new_v4()),
                vec![OrderItemRequest {
                    variant_id,
                    quantity: 0,
                }],
            ))
            .await;

        assert!(matches!(
            result.unwrap_err(),
            OrderError::InvalidQuantity { .. }
        ));
    }

    #[tokio::test]
    async fn should_fail_when_variant_missing_or_soft_deleted() {
        for deleted in [false, true] {
            let mut fx = Fixture::new();
            fx.stores
                .expect_get_by_id()
                .returning(|id| Ok(active_store(*id)));
            fx.statuses
                .expect_default_status()
                .returning(|| Ok(OrderStatus::Pending));
            fx.catalog.expect_resolve_variant().returning(move |id| {
                if deleted {
                    let mut s = snapshot(*id, 10);
                    s.is_deleted = true;
                    Ok(Some(s))
                } else {
                    Ok(None)
                }
            });
            fx.ledger.expect_reserve().times(0);

            let use_case = fx.build();
            let result = use_case
                .execute(params(
                    StoreId::new(Uuid::new_v4()),
                    vec![OrderItemRequest {
                        variant_id: VariantId::new(Uuid::new_v4()),
                        quantity: 1,
                    }],
                ))
                .await;

            assert!(matches!(
                result.unwrap_err(),
                OrderError::VariantUnavailable { .. }
            ));
        }
    }

    #[tokio::test]
    async fn should_release_earlier_reservations_when_later_line_lacks_stock() {
        let store_id = StoreId::new(Uuid::new_v4());
        let variant_a = VariantId::new(Uuid::new_v4());
        let variant_b = VariantId::new(Uuid::new_v4());

        let mut fx = Fixture::new();
        fx.stores
            .expect_get_by_id()
            .returning(|id| Ok(active_store(*id)));
        fx.statuses
            .expect_default_status()
            .returning(|| Ok(OrderStatus::Pending));
        fx.catalog
            .expect_resolve_variant()
            .returning(|id| Ok(Some(snapshot(*id, 10))));
        fx.ledger
            .expect_reserve()
            .with(eq(variant_a), eq(3))
            .times(1)
            .returning(|id, q| {
                Ok(Reservation {
                    variant_id: *id,
                    quantity: q,
                })
            });
        fx.ledger
            .expect_reserve()
            .with(eq(variant_b), eq(1))
            .times(1)
            .returning(|id, q| {
                Err(InventoryError::InsufficientStock {
                    variant_id: *id,
                    requested: q,
                    available: 0,
                })
            });
        // Compensation: line 1's reservation must be returned.
        fx.ledger
            .expect_release()
            .with(eq(variant_a), eq(3))
            .times(1)
            .returning(|_, _| Ok(()));
        fx.orders.expect_create_with_lines().times(0);

        let use_case = fx.build();
        let result = use_case
            .execute(params(
                store_id,
                vec![
                    OrderItemRequest {
                        variant_id: variant_a,
                        quantity: 3,
                    },
                    OrderItemRequest {
                        variant_id: variant_b,
                        quantity: 1,
                    },
                ],
            ))
            .await;

        match result.unwrap_err() {
            OrderError::InsufficientStock {
                variant_id,
                requested,
                available,
            } => {
                assert_eq!(variant_id, variant_b);
                assert_eq!(requested, 1);
                assert_eq!(available, 0);
            }
            other => panic!("expected InsufficientStock, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn should_release_all_reservations_when_persistence_fails() {
        let variant_a = VariantId::new(Uuid::new_v4());
        let variant_b = VariantId::new(Uuid::new_v4());

        let mut fx = Fixture::new();
        fx.stores
            .expect_get_by_id()
            .returning(|id| Ok(active_store(*id)));
        fx.statuses
            .expect_default_status()
            .returning(|| Ok(OrderStatus::Pending));
        fx.catalog
            .expect_resolve_variant()
            .returning(|id| Ok(Some(snapshot(*id, 10))));
        fx.ledger.expect_reserve().times(2).returning(|id, q| {
            Ok(Reservation {
                variant_id: *id,
                quantity: q,
            })
        });
        fx.ledger
            .expect_release()
            .with(eq(variant_a), eq(2))
            .times(1)
            .returning(|_, _| Ok(()));
        fx.ledger
            .expect_release()
            .with(eq(variant_b), eq(5))
            .times(1)
            .returning(|_, _| Ok(()));
        fx.orders
            .expect_create_with_lines()
            .returning(|_| Err(RepositoryError::Timeout));
        fx.orders.expect_get_view().times(0);

        let use_case = fx.build();
        let result = use_case
            .execute(params(
                StoreId::new(Uuid::new_v4()),
                vec![
                    OrderItemRequest {
                        variant_id: variant_a,
                        quantity: 2,
                    },
                    OrderItemRequest {
                        variant_id: variant_b,
                        quantity: 5,
                    },
                ],
            ))
            .await;

        assert!(matches!(
            result.unwrap_err(),
            OrderError::PersistenceFailure
        ));
    }

    struct OneOffEveryLine;

    impl DiscountPolicy for OneOffEveryLine {
        fn line_discount(&self, _line: &PricedLine) -> BigDecimal {
            BigDecimal::from(1)
        }
    }

    #[tokio::test]
    async fn should_store_policy_discount_on_each_line() {
        let variant_id = VariantId::new(Uuid::new_v4());

        let mut fx = Fixture::new();
        fx.stores
            .expect_get_by_id()
            .returning(|id| Ok(active_store(*id)));
        fx.statuses
            .expect_default_status()
            .returning(|| Ok(OrderStatus::Pending));
        fx.catalog
            .expect_resolve_variant()
            .returning(|id| Ok(Some(snapshot(*id, 10))));
        fx.ledger.expect_reserve().returning(|id, q| {
            Ok(Reservation {
                variant_id: *id,
                quantity: q,
            })
        });
        fx.orders
            .expect_create_with_lines()
            .times(1)
            .withf(|order| {
                order.lines.iter().all(|l| l.discount == BigDecimal::from(1))
                    && order.discount == BigDecimal::from(2)
                    && order.grand_total == &order.subtotal - &order.discount + &order.tax
            })
            .returning(|_| Ok(()));
        fx.orders
            .expect_get_view()
            .returning(|id, _| Ok(view(id.clone())));

        let mut use_case = fx.build();
        use_case.pricing = PricingEngine::new(BigDecimal::zero(), Arc::new(OneOffEveryLine));

        let result = use_case
            .execute(params(
                StoreId::new(Uuid::new_v4()),
                vec![
                    OrderItemRequest {
                        variant_id,
                        quantity: 1,
                    },
                    OrderItemRequest {
                        variant_id: VariantId::new(Uuid::new_v4()),
                        quantity: 2,
                    },
                ],
            ))
            .await;

        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn should_apply_tax_override_to_persisted_totals() {
        let variant_id = VariantId::new(Uuid::new_v4());

        let mut fx = Fixture::new();
        fx.stores
            .expect_get_by_id()
            .returning(|id| Ok(active_store(*id)));
        fx.statuses
            .expect_default_status()
            .returning(|| Ok(OrderStatus::Pending));
        fx.catalog
            .expect_resolve_variant()
            .returning(|id| Ok(Some(snapshot(*id, 100))));
        fx.ledger.expect_reserve().returning(|id, q| {
            Ok(Reservation {
                variant_id: *id,
                quantity: q,
            })
        });
        fx.orders
            .expect_create_with_lines()
            .withf(|order| {
                order.tax == BigDecimal::from(3) && order.grand_total == BigDecimal::from(103)
            })
            .returning(|_| Ok(()));
        fx.orders
            .expect_get_view()
            .returning(|id, _| Ok(view(id.clone())));

        let use_case = fx.build();
        let mut p = params(
            StoreId::new(Uuid::new_v4()),
            vec![OrderItemRequest {
                variant_id,
                quantity: 1,
            }],
        );
        p.tax_override = Some(BigDecimal::from(3));

        assert!(use_case.execute(p).await.is_ok());
    }
}
