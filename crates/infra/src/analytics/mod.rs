//! Analytics backend adapter

pub mod client;

pub use client::HttpAnalyticsBackend;
