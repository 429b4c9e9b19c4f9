//! Scale store: conditional writes and the paginated list query against PostgreSQL.

use crate::error::AppError;
use crate::model::{FoodScale, ScaleCandidate};
use crate::response::Metadata;
use crate::sql::{self, Filters};
use sqlx::PgPool;
use std::future::Future;
use std::time::Duration;

/// Per-statement deadline. Exceeding it aborts the call and surfaces
/// [`AppError::Timeout`]; each call's deadline is independent.
const QUERY_TIMEOUT: Duration = Duration::from_secs(3);

/// All food_scales access goes through this store. Concurrency safety for
/// updates comes from the version predicate in the UPDATE statement, not
/// from any in-process locking.
#[derive(Clone)]
pub struct ScaleStore {
    pool: PgPool,
}

#[derive(sqlx::FromRow)]
struct InsertRow {
    id: i64,
    price: f64,
    version: i32,
}

#[derive(sqlx::FromRow)]
struct ListRow {
    total_records: i64,
    id: i64,
    model: String,
    price: f64,
    year: i32,
    dimensions: Vec<f64>,
    runtime: i32,
    version: i32,
}

impl ScaleStore {
    pub fn new(pool: PgPool) -> Self {
        ScaleStore { pool }
    }

    async fn bounded<T, F>(fut: F) -> Result<T, AppError>
    where
        F: Future<Output = Result<T, sqlx::Error>>,
    {
        match tokio::time::timeout(QUERY_TIMEOUT, fut).await {
            Ok(res) => res.map_err(AppError::Db),
            Err(_) => Err(AppError::Timeout),
        }
    }

    /// Persist a new scale. The store assigns id, price, and the initial
    /// version; the candidate must already have passed validation.
    pub async fn insert(&self, candidate: &ScaleCandidate) -> Result<FoodScale, AppError> {
        let sql = sql::insert();
        tracing::debug!(sql = %sql, "insert scale");
        let dimensions = candidate.dimensions.clone().unwrap_or_default();
        let row: InsertRow = Self::bounded(
            sqlx::query_as(&sql)
                .bind(&candidate.model)
                .bind(candidate.year)
                .bind(candidate.runtime)
                .bind(&dimensions)
                .fetch_one(&self.pool),
        )
        .await?;
        Ok(FoodScale {
            id: row.id,
            model: candidate.model.clone(),
            price: row.price,
            year: candidate.year,
            dimensions,
            runtime: candidate.runtime,
            version: row.version,
        })
    }

    /// Fetch one scale. Ids below 1 can never exist, so they resolve to
    /// NotFound without a storage round trip.
    pub async fn get(&self, id: i64) -> Result<FoodScale, AppError> {
        if id < 1 {
            return Err(AppError::NotFound);
        }
        let sql = sql::select_by_id();
        tracing::debug!(sql = %sql, id, "get scale");
        let row: Option<FoodScale> =
            Self::bounded(sqlx::query_as(&sql).bind(id).fetch_optional(&self.pool)).await?;
        row.ok_or(AppError::NotFound)
    }

    /// Conditional write keyed on (id, version). Zero matched rows means the
    /// record is gone or another writer already advanced the version; either
    /// way the caller gets EditConflict and must re-fetch before retrying.
    pub async fn update(&self, scale: &FoodScale) -> Result<i32, AppError> {
        let sql = sql::update();
        tracing::debug!(sql = %sql, id = scale.id, version = scale.version, "update scale");
        let row: Option<(i32,)> = Self::bounded(
            sqlx::query_as(&sql)
                .bind(&scale.model)
                .bind(scale.year)
                .bind(scale.runtime)
                .bind(&scale.dimensions)
                .bind(scale.id)
                .bind(scale.version)
                .fetch_optional(&self.pool),
        )
        .await?;
        match row {
            Some((version,)) => Ok(version),
            None => Err(AppError::EditConflict),
        }
    }

    /// Hard delete, regardless of version. NotFound when the row was already
    /// gone.
    pub async fn delete(&self, id: i64) -> Result<(), AppError> {
        if id < 1 {
            return Err(AppError::NotFound);
        }
        let sql = sql::delete();
        tracing::debug!(sql = %sql, id, "delete scale");
        let result = Self::bounded(sqlx::query(&sql).bind(id).execute(&self.pool)).await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound);
        }
        Ok(())
    }

    /// Page of scales matching the model filter, plus pagination metadata
    /// computed from the same read via the window count.
    pub async fn list(
        &self,
        model: &str,
        filters: &Filters,
    ) -> Result<(Vec<FoodScale>, Metadata), AppError> {
        let sql = sql::select_list(filters);
        tracing::debug!(sql = %sql, model, "list scales");
        let rows: Vec<ListRow> = Self::bounded(
            sqlx::query_as(&sql)
                .bind(model)
                .bind(filters.limit())
                .bind(filters.offset())
                .fetch_all(&self.pool),
        )
        .await?;
        let total_records = rows.first().map(|r| r.total_records).unwrap_or(0);
        let scales = rows
            .into_iter()
            .map(|r| FoodScale {
                id: r.id,
                model: r.model,
                price: r.price,
                year: r.year,
                dimensions: r.dimensions,
                runtime: r.runtime,
                version: r.version,
            })
            .collect();
        let metadata = Metadata::compute(total_records, filters.page, filters.page_size);
        Ok((scales, metadata))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlx::postgres::PgPoolOptions;

    // connect_lazy opens no connection; any statement against this pool would
    // fail with a connect error, so a NotFound result proves the id check
    // never reached storage.
    fn detached_store() -> ScaleStore {
        let pool = PgPoolOptions::new()
            .connect_lazy("postgres://localhost:1/unreachable")
            .unwrap();
        ScaleStore::new(pool)
    }

    #[tokio::test]
    async fn get_rejects_non_positive_ids_before_storage() {
        let store = detached_store();
        assert!(matches!(store.get(0).await, Err(AppError::NotFound)));
        assert!(matches!(store.get(-7).await, Err(AppError::NotFound)));
    }

    #[tokio::test]
    async fn delete_rejects_non_positive_ids_before_storage() {
        let store = detached_store();
        assert!(matches!(store.delete(0).await, Err(AppError::NotFound)));
        assert!(matches!(store.delete(-1).await, Err(AppError::NotFound)));
    }
}
