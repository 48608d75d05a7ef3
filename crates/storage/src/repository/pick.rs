use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use crate::error::{Result, StorageError};
use crate::models::{NewPick, Pick, PickChange, PickField, PickFilter, PickPage};

use super::PickStore;

#[derive(FromRow)]
struct PageRow {
    total: i64,
    pick_id: Option<Uuid>,
    user_id: Option<String>,
    league_id: Option<String>,
    race_id: Option<String>,
    p10_driver_id: Option<String>,
    first_retirement_driver_id: Option<String>,
    fastest_lap_driver_id: Option<String>,
    submitted_at: Option<DateTime<Utc>>,
}

impl PageRow {
    /// `None` for the filler row produced when the page is empty.
    fn into_pick(self) -> Option<Pick> {
        Some(Pick {
            pick_id: self.pick_id?,
            user_id: self.user_id?,
            league_id: self.league_id?,
            race_id: self.race_id?,
            p10_driver_id: self.p10_driver_id,
            first_retirement_driver_id: self.first_retirement_driver_id,
            fastest_lap_driver_id: self.fastest_lap_driver_id,
            submitted_at: self.submitted_at?,
        })
    }
}

fn push_conditions(query: &mut QueryBuilder<'_, Postgres>, filter: &PickFilter) {
    for (field, value) in filter.conditions() {
        query
            .push(" AND ")
            .push(field.column())
            .push(" = ")
            .push_bind(value.to_owned());
    }
}

/// [`PickStore`] backed by the Postgres `picks` table.
#[derive(Debug, Clone)]
pub struct PickRepository {
    pool: PgPool,
}

impl PickRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PickStore for PickRepository {
    async fn list(&self, filter: &PickFilter) -> Result<PickPage> {
        // The count subquery always yields one row, so the total survives an
        // empty page.
        let mut query = QueryBuilder::<Postgres>::new(
            "SELECT c.total, p.* FROM (SELECT COUNT(*) AS total FROM picks WHERE 1=1",
        );
        push_conditions(&mut query, filter);
        query.push(") c LEFT JOIN LATERAL (SELECT ");
        query.push(PickField::column_list());
        query.push(" FROM picks WHERE 1=1");
        push_conditions(&mut query, filter);
        query.push(" ORDER BY submitted_at, pick_id LIMIT ");
        query.push_bind(filter.limit);
        query.push(" OFFSET ");
        query.push_bind(filter.offset);
        query.push(") p ON TRUE ORDER BY p.submitted_at, p.pick_id");

        let rows: Vec<PageRow> = query.build_query_as().fetch_all(&self.pool).await?;

        let total = rows.first().map_or(0, |row| row.total);
        let items = rows.into_iter().filter_map(PageRow::into_pick).collect();

        Ok(PickPage { items, total })
    }

    async fn insert(&self, pick: &NewPick) -> Result<Pick> {
        let sql = format!(
            "INSERT INTO picks (user_id, league_id, race_id, p10_driver_id, \
             first_retirement_driver_id, fastest_lap_driver_id) \
             VALUES ($1, $2, $3, $4, $5, $6) RETURNING {}",
            PickField::column_list()
        );

        let created = sqlx::query_as::<_, Pick>(&sql)
            .bind(&pick.user_id)
            .bind(&pick.league_id)
            .bind(&pick.race_id)
            .bind(&pick.p10_driver_id)
            .bind(&pick.first_retirement_driver_id)
            .bind(&pick.fastest_lap_driver_id)
            .fetch_one(&self.pool)
            .await
            .map_err(StorageError::from_write)?;

        Ok(created)
    }

    async fn find(&self, pick_id: &str) -> Result<Pick> {
        let pick_id = Uuid::parse_str(pick_id).map_err(|_| StorageError::NotFound)?;

        let sql = format!(
            "SELECT {} FROM picks WHERE pick_id = $1",
            PickField::column_list()
        );

        sqlx::query_as::<_, Pick>(&sql)
            .bind(pick_id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(StorageError::NotFound)
    }

    async fn replace(&self, pick_id: &str, pick: &NewPick) -> Result<Pick> {
        self.update(pick_id, &pick.changes()).await
    }

    async fn update(&self, pick_id: &str, changes: &[PickChange]) -> Result<Pick> {
        if changes.is_empty() {
            return self.find(pick_id).await;
        }
        let pick_id = Uuid::parse_str(pick_id).map_err(|_| StorageError::NotFound)?;

        let mut query = QueryBuilder::<Postgres>::new("UPDATE picks SET ");
        let mut assignments = query.separated(", ");
        for change in changes {
            assignments.push(format!("{} = ", change.field().column()));
            assignments.push_bind_unseparated(change.value().map(str::to_owned));
        }
        query.push(" WHERE pick_id = ");
        query.push_bind(pick_id);
        query.push(" RETURNING ");
        query.push(PickField::column_list());

        query
            .build_query_as::<Pick>()
            .fetch_optional(&self.pool)
            .await
            .map_err(StorageError::from_write)?
            .ok_or(StorageError::NotFound)
    }

    async fn delete(&self, pick_id: &str) -> Result<u64> {
        let Ok(pick_id) = Uuid::parse_str(pick_id) else {
            return Ok(0);
        };

        let result = sqlx::query("DELETE FROM picks WHERE pick_id = $1")
            .bind(pick_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }
}
