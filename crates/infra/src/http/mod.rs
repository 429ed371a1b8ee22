//! HTTP client shared by the upstream adapters

pub mod client;

pub use client::{HttpClient, HttpClientBuilder};
