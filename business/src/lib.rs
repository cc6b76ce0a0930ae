pub mod application {
    pub mod basket {
        pub mod create_or_replace;
        pub mod decrease_quantity;
        pub mod delete;
        pub mod get;
        pub mod increase_quantity;
        pub(crate) mod persist;
        pub mod remove_item;
        pub mod upsert_items;
    }
}

pub mod domain {
    pub mod errors;
    pub mod logger;
    pub mod shared {
        pub mod value_objects;
    }
    pub mod basket {
        pub mod errors;
        pub mod keys;
        pub mod lock;
        pub mod model;
        pub mod options;
        pub mod repository;
        pub mod use_cases {
            pub mod create_or_replace;
            pub mod decrease_quantity;
            pub mod delete;
            pub mod get;
            pub mod increase_quantity;
            pub mod remove_item;
            pub mod upsert_items;
        }
    }
}
