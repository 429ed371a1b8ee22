//! Site-status adapter used by the maintenance gate

pub mod client;

pub use client::HttpSiteStatusSource;
