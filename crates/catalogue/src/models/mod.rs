//! Data model for catalogue entities.

pub mod types;

pub use types::*;
