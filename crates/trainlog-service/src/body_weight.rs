//! Body-weight log with upsert-by-date writes.

use chrono::NaiveDate;
use tracing::{debug, info};
use trainlog_core::error::{TrainlogError, TrainlogResult};
use trainlog_core::models::body_weight::{BodyWeight, CreateBodyWeight, UpdateBodyWeight};
use trainlog_core::models::parse_date;
use trainlog_core::ownership::ensure_owner;
use trainlog_core::repository::BodyWeightRepository;
use uuid::Uuid;

use crate::config::ServiceConfig;

const MIN_WEIGHT: f64 = 0.1;
const MAX_WEIGHT: f64 = 500.0;

pub struct BodyWeightService<B: BodyWeightRepository> {
    records: B,
    config: ServiceConfig,
}

impl<B: BodyWeightRepository> BodyWeightService<B> {
    pub fn new(records: B, config: ServiceConfig) -> Self {
        Self { records, config }
    }

    /// Record the weight for `date`, overwriting that day's record if
    /// one exists.
    pub async fn create_or_update(
        &self,
        owner: Uuid,
        date: &str,
        weight: f64,
        body_fat_percentage: Option<f64>,
    ) -> TrainlogResult<BodyWeight> {
        let date = parse_date(date)?;
        if !(weight.is_finite() && (MIN_WEIGHT..=MAX_WEIGHT).contains(&weight)) {
            return Err(TrainlogError::validation(format!(
                "weight must be between {MIN_WEIGHT} and {MAX_WEIGHT}"
            )));
        }
        if body_fat_percentage.is_some_and(|p| !(p.is_finite() && (0.0..=100.0).contains(&p))) {
            return Err(TrainlogError::validation(
                "body fat percentage must be between 0 and 100",
            ));
        }
        self.upsert_for_date(owner, date, weight, body_fat_percentage)
            .await
    }

    /// Read-then-write keyed on (owner, date). Not transactional; the
    /// storage layer's unique (user, date) index rejects a racing
    /// duplicate insert.
    async fn upsert_for_date(
        &self,
        owner: Uuid,
        date: NaiveDate,
        weight: f64,
        body_fat_percentage: Option<f64>,
    ) -> TrainlogResult<BodyWeight> {
        match self.records.get_by_user_and_date(owner, date).await {
            Ok(existing) => {
                debug!(record_id = %existing.id, %date, "Overwriting body weight");
                self.records
                    .update(
                        existing.id,
                        UpdateBodyWeight {
                            weight,
                            body_fat_percentage,
                        },
                    )
                    .await
            }
            Err(TrainlogError::NotFound { .. }) => {
                let record = self
                    .records
                    .create(CreateBodyWeight {
                        user_id: owner,
                        date,
                        weight,
                        body_fat_percentage,
                    })
                    .await?;
                info!(record_id = %record.id, %date, "Recorded body weight");
                Ok(record)
            }
            Err(e) => Err(e),
        }
    }

    /// Most recent first; `limit == 0` uses the configured default.
    pub async fn list_records(&self, owner: Uuid, limit: u64) -> TrainlogResult<Vec<BodyWeight>> {
        let limit = if limit == 0 {
            self.config.default_body_weight_limit
        } else {
            limit
        };
        self.records.list_recent(owner, limit).await
    }

    /// Inclusive range, date ascending.
    pub async fn list_by_date_range(
        &self,
        owner: Uuid,
        start: &str,
        end: &str,
    ) -> TrainlogResult<Vec<BodyWeight>> {
        let start = parse_date(start)?;
        let end = parse_date(end)?;
        if start > end {
            return Err(TrainlogError::validation("start date is after end date"));
        }
        self.records.list_in_range(owner, start, end).await
    }

    pub async fn latest(&self, owner: Uuid) -> TrainlogResult<BodyWeight> {
        self.records.latest(owner).await
    }

    pub async fn delete(&self, owner: Uuid, record_id: Uuid) -> TrainlogResult<()> {
        let record = self.records.get_by_id(record_id).await?;
        ensure_owner(record, owner)?;
        self.records.delete(record_id).await
    }
}
