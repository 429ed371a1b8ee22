//! Request middleware applied around the whole router

pub mod maintenance;
pub mod request_tracing;

pub use maintenance::maintenance_middleware;
pub use request_tracing::request_tracing_middleware;
