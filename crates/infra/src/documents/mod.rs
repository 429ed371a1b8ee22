//! Documents upstream adapter used by the catalogue and hero proxies

pub mod client;

pub use client::DocumentClient;
