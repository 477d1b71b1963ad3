//! SurrealDB implementation of [`BodyWeightRepository`].

use chrono::{DateTime, NaiveDate, Utc};
use surrealdb::{Connection, Surreal};
use surrealdb_types::SurrealValue;
use trainlog_core::error::TrainlogResult;
use trainlog_core::models::body_weight::{BodyWeight, CreateBodyWeight, UpdateBodyWeight};
use trainlog_core::repository::BodyWeightRepository;
use uuid::Uuid;

use super::{date_key, parse_stored_date, parse_uuid};
use crate::error::DbError;

#[derive(Debug, SurrealValue)]
struct BodyWeightRow {
    user_id: String,
    date: String,
    weight: f64,
    body_fat_percentage: Option<f64>,
    created_at: DateTime<Utc>,
}

#[derive(Debug, SurrealValue)]
struct BodyWeightRowWithId {
    record_id: String,
    user_id: String,
    date: String,
    weight: f64,
    body_fat_percentage: Option<f64>,
    created_at: DateTime<Utc>,
}

impl BodyWeightRow {
    fn into_body_weight(self, id: Uuid) -> Result<BodyWeight, DbError> {
        Ok(BodyWeight {
            id,
            user_id: parse_uuid(&self.user_id, "user")?,
            date: parse_stored_date(&self.date)?,
            weight: self.weight,
            body_fat_percentage: self.body_fat_percentage,
            created_at: self.created_at,
        })
    }
}

impl BodyWeightRowWithId {
    fn try_into_body_weight(self) -> Result<BodyWeight, DbError> {
        Ok(BodyWeight {
            id: parse_uuid(&self.record_id, "body_weight")?,
            user_id: parse_uuid(&self.user_id, "user")?,
            date: parse_stored_date(&self.date)?,
            weight: self.weight,
            body_fat_percentage: self.body_fat_percentage,
            created_at: self.created_at,
        })
    }
}

fn collect_rows(rows: Vec<BodyWeightRowWithId>) -> Result<Vec<BodyWeight>, DbError> {
    rows.into_iter()
        .map(BodyWeightRowWithId::try_into_body_weight)
        .collect()
}

/// SurrealDB implementation of the BodyWeight repository.
#[derive(Clone)]
pub struct SurrealBodyWeightRepository<C: Connection> {
    db: Surreal<C>,
}

impl<C: Connection> SurrealBodyWeightRepository<C> {
    pub fn new(db: Surreal<C>) -> Self {
        Self { db }
    }
}

impl<C: Connection> BodyWeightRepository for SurrealBodyWeightRepository<C> {
    async fn create(&self, input: CreateBodyWeight) -> TrainlogResult<BodyWeight> {
        let id = Uuid::new_v4();
        let id_str = id.to_string();

        let result = self
            .db
            .query(
                "CREATE type::record('body_weight', $id) SET \
                 user_id = $user_id, date = $date, weight = $weight, \
                 body_fat_percentage = $body_fat",
            )
            .bind(("id", id_str.clone()))
            .bind(("user_id", input.user_id.to_string()))
            .bind(("date", date_key(input.date)))
            .bind(("weight", input.weight))
            .bind(("body_fat", input.body_fat_percentage))
            .await
            .map_err(DbError::from)?;

        let mut result = result.check().map_err(DbError::from_statement)?;

        let rows: Vec<BodyWeightRow> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: "body_weight".into(),
            id: id_str,
        })?;

        Ok(row.into_body_weight(id)?)
    }

    async fn get_by_id(&self, id: Uuid) -> TrainlogResult<BodyWeight> {
        let id_str = id.to_string();

        let mut result = self
            .db
            .query("SELECT * FROM type::record('body_weight', $id)")
            .bind(("id", id_str.clone()))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<BodyWeightRow> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: "body_weight".into(),
            id: id_str,
        })?;

        Ok(row.into_body_weight(id)?)
    }

    async fn get_by_user_and_date(
        &self,
        user_id: Uuid,
        date: NaiveDate,
    ) -> TrainlogResult<BodyWeight> {
        let date_str = date_key(date);

        let mut result = self
            .db
            .query(
                "SELECT meta::id(id) AS record_id, * FROM body_weight \
                 WHERE user_id = $user_id AND date = $date LIMIT 1",
            )
            .bind(("user_id", user_id.to_string()))
            .bind(("date", date_str.clone()))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<BodyWeightRowWithId> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: "body_weight".into(),
            id: format!("date={date_str}"),
        })?;

        Ok(row.try_into_body_weight()?)
    }

    async fn update(&self, id: Uuid, input: UpdateBodyWeight) -> TrainlogResult<BodyWeight> {
        let id_str = id.to_string();

        let result = self
            .db
            .query(
                "UPDATE type::record('body_weight', $id) SET \
                 weight = $weight, body_fat_percentage = $body_fat",
            )
            .bind(("id", id_str.clone()))
            .bind(("weight", input.weight))
            .bind(("body_fat", input.body_fat_percentage))
            .await
            .map_err(DbError::from)?;

        let mut result = result.check().map_err(DbError::from_statement)?;

        let rows: Vec<BodyWeightRow> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: "body_weight".into(),
            id: id_str,
        })?;

        Ok(row.into_body_weight(id)?)
    }

    async fn list_recent(&self, user_id: Uuid, limit: u64) -> TrainlogResult<Vec<BodyWeight>> {
        let mut result = self
            .db
            .query(
                "SELECT meta::id(id) AS record_id, * FROM body_weight \
                 WHERE user_id = $user_id ORDER BY date DESC LIMIT $limit",
            )
            .bind(("user_id", user_id.to_string()))
            .bind(("limit", limit))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<BodyWeightRowWithId> = result.take(0).map_err(DbError::from)?;
        Ok(collect_rows(rows)?)
    }

    async fn list_in_range(
        &self,
        user_id: Uuid,
        start: NaiveDate,
        end: NaiveDate,
    ) -> TrainlogResult<Vec<BodyWeight>> {
        let mut result = self
            .db
            .query(
                "SELECT meta::id(id) AS record_id, * FROM body_weight \
                 WHERE user_id = $user_id AND date >= $start AND date <= $end \
                 ORDER BY date ASC",
            )
            .bind(("user_id", user_id.to_string()))
            .bind(("start", date_key(start)))
            .bind(("end", date_key(end)))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<BodyWeightRowWithId> = result.take(0).map_err(DbError::from)?;
        Ok(collect_rows(rows)?)
    }

    async fn latest(&self, user_id: Uuid) -> TrainlogResult<BodyWeight> {
        let user_id_str = user_id.to_string();

        let mut result = self
            .db
            .query(
                "SELECT meta::id(id) AS record_id, * FROM body_weight \
                 WHERE user_id = $user_id ORDER BY date DESC LIMIT 1",
            )
            .bind(("user_id", user_id_str.clone()))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<BodyWeightRowWithId> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: "body_weight".into(),
            id: format!("latest for user={user_id_str}"),
        })?;

        Ok(row.try_into_body_weight()?)
    }

    async fn delete(&self, id: Uuid) -> TrainlogResult<()> {
        self.db
            .query("DELETE type::record('body_weight', $id)")
            .bind(("id", id.to_string()))
            .await
            .map_err(DbError::from)?
            .check()
            .map_err(DbError::from_statement)?;

        Ok(())
    }
}
