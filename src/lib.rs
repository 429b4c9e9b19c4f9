//! Food scale catalog API: optimistic-concurrency CRUD over PostgreSQL.

pub mod error;
pub mod handlers;
pub mod model;
pub mod response;
pub mod routes;
pub mod service;
pub mod sql;
pub mod state;
pub mod store;

pub use error::{AppError, FieldErrorMap};
pub use model::{FoodScale, ScaleCandidate};
pub use response::{success_many, success_one, success_one_ok, Metadata};
pub use routes::{common_routes_with_ready, scale_routes};
pub use service::{resolve_filters, validate_scale, FieldErrors, ScaleStore};
pub use sql::{Filters, Sort, SortKey};
pub use state::AppState;
pub use store::{ensure_database_exists, ensure_scales_table};
