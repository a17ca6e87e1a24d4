pub mod db;
pub mod catalog {
    pub mod entity;
    pub mod repository;
}
pub mod inventory {
    pub mod entity;
    pub mod repository;
}
pub mod order {
    pub mod entity;
    pub mod repository;
}
pub mod status {
    pub mod repository;
}
pub mod store {
    pub mod entity;
    pub mod repository;
}
