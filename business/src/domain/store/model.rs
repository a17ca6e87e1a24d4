use crate::domain::shared::value_objects::StoreId;

#[derive(Debug, Clone)]
pub struct Store {
    pub id: StoreId,
    pub name: String,
    pub is_active: bool,
}
