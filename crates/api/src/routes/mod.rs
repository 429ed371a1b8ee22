//! Route handlers

pub mod catalogue;
pub mod fallback;
pub mod health;
pub mod hero;
pub mod maintenance;

pub use catalogue::catalogue;
pub use fallback::not_found;
pub use health::health;
pub use hero::hero;
pub use maintenance::maintenance_page;
