use sqlx::FromRow;
use uuid::Uuid;

use business::domain::shared::value_objects::StoreId;
use business::domain::store::model::Store;

#[derive(Debug, FromRow)]
pub struct StoreEntity {
    pub store_id: Uuid,
    pub store_name: String,
    pub is_active: bool,
}

impl StoreEntity {
    pub fn into_domain(self) -> Store {
        Store {
            id: StoreId::new(self.store_id),
            name: self.store_name,
            is_active: self.is_active,
        }
    }
}
