//! Postgres implementation of the storage traits.
//!
//! Queries are built at runtime (`query_as::<_, T>`) so the crate compiles
//! without a reachable database. Column lists live next to each table's
//! queries.

mod applications;
mod companies;
mod listings;
mod recipes;
mod recruiters;
mod seekers;
mod users;

use sqlx::{postgres::PgRow, FromRow, PgPool};

use super::{Page, PageRequest};
use crate::error::Result;

#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

/// Runs `SELECT {columns} FROM {table} ORDER BY id` for one window plus the
/// matching `COUNT(*)`.
async fn fetch_page<T>(
    pool: &PgPool,
    table: &str,
    columns: &str,
    request: PageRequest,
) -> Result<Page<T>>
where
    T: for<'r> FromRow<'r, PgRow> + Send + Unpin,
{
    let items_query = format!(
        "SELECT {} FROM {} ORDER BY id LIMIT $1 OFFSET $2",
        columns, table
    );
    let items = sqlx::query_as::<_, T>(&items_query)
        .bind(request.limit)
        .bind(request.skip)
        .fetch_all(pool)
        .await?;

    let total_query = format!("SELECT COUNT(*) FROM {}", table);
    let total = sqlx::query_scalar::<_, i64>(&total_query)
        .fetch_one(pool)
        .await?;

    Ok(Page::new(items, total, request))
}

async fn delete_by_id(pool: &PgPool, table: &str, id: i64) -> Result<bool> {
    let query = format!("DELETE FROM {} WHERE id = $1", table);
    let res = sqlx::query(&query).bind(id).execute(pool).await?;
    Ok(res.rows_affected() > 0)
}
