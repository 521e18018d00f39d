//! Idols Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as};

use crate::domain::idols::{
    data::{IdolUpdate, NewIdol},
    records::IdolRecord,
};

const LIST_IDOLS_SQL: &str = include_str!("sql/list_idols.sql");
const GET_IDOL_SQL: &str = include_str!("sql/get_idol.sql");
const CREATE_IDOL_SQL: &str = include_str!("sql/create_idol.sql");
const UPDATE_IDOL_SQL: &str = include_str!("sql/update_idol.sql");
const DELETE_IDOL_SQL: &str = include_str!("sql/delete_idol.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgIdolsRepository;

impl PgIdolsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn list_idols(
        &self,
        tx: &mut Transaction<'_, Postgres>,
    ) -> Result<Vec<IdolRecord>, sqlx::Error> {
        query_as::<Postgres, IdolRecord>(LIST_IDOLS_SQL)
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn get_idol(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        id: i64,
    ) -> Result<IdolRecord, sqlx::Error> {
        query_as::<Postgres, IdolRecord>(GET_IDOL_SQL)
            .bind(id)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn create_idol(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        idol: &NewIdol,
    ) -> Result<IdolRecord, sqlx::Error> {
        query_as::<Postgres, IdolRecord>(CREATE_IDOL_SQL)
            .bind(&idol.name)
            .bind(&idol.group)
            .bind(&idol.position)
            .bind(&idol.created_by)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn update_idol(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        id: i64,
        update: &IdolUpdate,
    ) -> Result<IdolRecord, sqlx::Error> {
        query_as::<Postgres, IdolRecord>(UPDATE_IDOL_SQL)
            .bind(id)
            .bind(&update.name)
            .bind(&update.group)
            .bind(&update.position)
            .bind(&update.updated_by)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn delete_idol(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        id: i64,
        deleted_by: &str,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(DELETE_IDOL_SQL)
            .bind(id)
            .bind(deleted_by)
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }
}

impl<'r> FromRow<'r, PgRow> for IdolRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            id: row.try_get("id")?,
            name: row.try_get("name")?,
            group: row.try_get("group_name")?,
            position: row.try_get("position")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
            created_by: row.try_get("created_by")?,
            updated_by: row.try_get("updated_by")?,
            deleted_at: row
                .try_get::<Option<SqlxTimestamp>, _>("deleted_at")?
                .map(SqlxTimestamp::to_jiff),
            version: row.try_get("version")?,
        })
    }
}
