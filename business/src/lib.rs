pub mod application {
    pub mod inventory {
        pub mod get_level;
        pub mod low_stock;
    }
    pub mod order {
        pub mod cancel;
        pub mod create;
        pub mod get_by_id;
        pub mod list_by_customer;
        pub mod update_status;
    }
}

pub mod domain {
    pub mod errors;
    pub mod logger;
    pub mod catalog {
        pub mod model;
        pub mod repository;
    }
    pub mod inventory {
        pub mod errors;
        pub mod model;
        pub mod repository;
        pub mod use_cases {
            pub mod get_level;
            pub mod low_stock;
        }
    }
    pub mod order {
        pub mod errors;
        pub mod model;
        pub mod pricing;
        pub mod repository;
        pub mod status_catalog;
        pub mod view;
        pub mod use_cases {
            pub mod cancel;
            pub mod create;
            pub mod get_by_id;
            pub mod list_by_customer;
            pub mod update_status;
        }
    }
    pub mod shared {
        pub mod pagination;
        pub mod value_objects;
    }
    pub mod store {
        pub mod model;
        pub mod repository;
    }
}
