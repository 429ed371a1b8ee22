//! Content proxy rules
//!
//! Validation of caller-supplied document names and the style injection
//! applied to hero fragments. The HTTP fetches live in the infra crate.

pub mod inject;
pub mod validation;

pub use inject::{hero_style_block, inject_style_block};
pub use validation::{CataloguePath, HeroFileName};
