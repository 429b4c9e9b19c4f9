//! Statement text for the food_scales table. Values are always bound as
//! parameters; the only dynamic identifier is the sort column, which comes
//! from the [`Sort`](crate::sql::Sort) allowlist.

use crate::sql::Filters;

pub const TABLE: &str = "food_scales";

/// Insert a new scale. Price and version come back from the row defaults.
pub fn insert() -> String {
    format!(
        "INSERT INTO {TABLE} (model, year, runtime, dimensions) \
         VALUES ($1, $2, $3, $4) \
         RETURNING id, price, version"
    )
}

pub fn select_by_id() -> String {
    format!(
        "SELECT id, model, price, year, dimensions, runtime, version \
         FROM {TABLE} WHERE id = $1"
    )
}

/// Conditional update: the row is written only when both the id and the
/// version the caller read are still current. Zero rows means another writer
/// got there first (or the row is gone) and the caller sees an edit conflict.
pub fn update() -> String {
    format!(
        "UPDATE {TABLE} \
         SET model = $1, year = $2, runtime = $3, dimensions = $4, version = version + 1 \
         WHERE id = $5 AND version = $6 \
         RETURNING version"
    )
}

pub fn delete() -> String {
    format!("DELETE FROM {TABLE} WHERE id = $1")
}

/// List page with a window count so rows and totals come from one read.
/// An empty model filter matches every row via the `OR $1 = ''` arm.
/// The id tiebreaker keeps page boundaries stable when the sort column
/// has duplicate values.
pub fn select_list(filters: &Filters) -> String {
    format!(
        "SELECT count(*) OVER() AS total_records, \
                id, model, price, year, dimensions, runtime, version \
         FROM {TABLE} \
         WHERE (to_tsvector('simple', model) @@ plainto_tsquery('simple', $1) OR $1 = '') \
         ORDER BY {} {}, id ASC \
         LIMIT $2 OFFSET $3",
        filters.sort.column(),
        filters.sort.direction(),
    )
}
