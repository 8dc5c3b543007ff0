pub mod client_service;
pub mod delivery_service;
pub mod order_service;
pub mod pricing;
pub mod validation;
