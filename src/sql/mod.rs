//! Safe SQL builder: identifiers from the sort allowlist only, values as parameters.

mod builder;
mod filters;
pub use builder::*;
pub use filters::*;
