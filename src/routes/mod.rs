//! Routers: common (health/ready/version) and scale CRUD.

mod common;
mod scales;
pub use common::common_routes_with_ready;
pub use scales::scale_routes;
