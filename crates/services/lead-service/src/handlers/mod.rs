//! HTTP request handlers.

pub mod health_handler;
pub mod lead_handler;

pub use health_handler::health_routes;
pub use lead_handler::lead_routes;
