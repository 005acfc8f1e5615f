//! Data loading and validation for game content.

pub mod catalog;
pub mod schema;
pub mod store;

pub use catalog::*;
pub use schema::*;
pub use store::*;
