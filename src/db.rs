pub mod client_repo;
pub use client_repo::ClientRepository;
pub mod order_repo;
pub use order_repo::OrderRepository;
pub mod delivery_repo;
pub use delivery_repo::DeliveryRepository;

pub mod store;
pub use store::{ClientStore, DeliveryStore, LogisticsStore, OrderStore, PgStore};

#[cfg(test)]
pub mod memory_store;
