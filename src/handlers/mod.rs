//! HTTP handlers for scale CRUD.

pub mod scales;
pub use scales::*;
