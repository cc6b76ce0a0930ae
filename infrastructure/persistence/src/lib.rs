pub mod memory;
pub mod redis_client;
pub mod basket {
    pub mod entity;
    pub mod lock;
    pub mod repository;
}
