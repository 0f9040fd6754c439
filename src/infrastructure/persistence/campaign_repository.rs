//! SQLite campaign repository
//!
//! The configuration is stored as the same camelCase JSON the API accepts,
//! so rows stay readable and tolerate new optional fields.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::SqlitePool;

use crate::application::dto::CampaignConfigurationDto;
use crate::application::ports::outbound::{CampaignRepositoryError, CampaignRepositoryPort};
use crate::domain::entities::{CampaignConfiguration, CampaignRecord, CampaignStatus};
use crate::domain::value_objects::CampaignId;

type CampaignRow = (String, String, String, String, String, Option<String>);

const SELECT_COLUMNS: &str =
    "SELECT id, configuration, generated_message, status, created_at, launched_at FROM campaigns";

pub struct SqliteCampaignRepository {
    pool: SqlitePool,
}

impl SqliteCampaignRepository {
    pub async fn new(pool: SqlitePool) -> Result<Self, sqlx::Error> {
        sqlx::query(r#"
            CREATE TABLE IF NOT EXISTS campaigns (
                id TEXT PRIMARY KEY,
                configuration TEXT NOT NULL,
                generated_message TEXT NOT NULL,
                status TEXT NOT NULL,
                created_at TEXT NOT NULL,
                launched_at TEXT
            )
        "#).execute(&pool).await?;

        Ok(Self { pool })
    }
}

fn database_error(e: sqlx::Error) -> CampaignRepositoryError {
    CampaignRepositoryError::Database(e.to_string())
}

fn parse_timestamp(id: &str, value: &str) -> Result<DateTime<Utc>, CampaignRepositoryError> {
    DateTime::parse_from_rfc3339(value)
        .map(|t| t.with_timezone(&Utc))
        .map_err(|e| CampaignRepositoryError::Corrupt {
            id: id.to_string(),
            reason: format!("bad timestamp {:?}: {}", value, e),
        })
}

fn row_to_record(row: CampaignRow) -> Result<CampaignRecord, CampaignRepositoryError> {
    let (id, configuration, generated_message, status, created_at, launched_at) = row;
    let corrupt = |reason: String| CampaignRepositoryError::Corrupt {
        id: id.clone(),
        reason,
    };

    let campaign_id = id
        .parse::<CampaignId>()
        .map_err(|e| corrupt(format!("bad id: {}", e)))?;
    let configuration: CampaignConfigurationDto = serde_json::from_str(&configuration)
        .map_err(|e| corrupt(format!("bad configuration: {}", e)))?;
    let status = CampaignStatus::parse(&status)
        .ok_or_else(|| corrupt(format!("unknown status {:?}", status)))?;

    Ok(CampaignRecord {
        id: campaign_id,
        configuration: CampaignConfiguration::from(configuration),
        generated_message,
        status,
        created_at: parse_timestamp(&id, &created_at)?,
        launched_at: launched_at
            .as_deref()
            .map(|t| parse_timestamp(&id, t))
            .transpose()?,
    })
}

#[async_trait]
impl CampaignRepositoryPort for SqliteCampaignRepository {
    async fn create(&self, record: &CampaignRecord) -> Result<(), CampaignRepositoryError> {
        let configuration = serde_json::to_string(&CampaignConfigurationDto::from(&record.configuration))
            .map_err(|e| CampaignRepositoryError::Database(e.to_string()))?;

        sqlx::query(
            "INSERT INTO campaigns (id, configuration, generated_message, status, created_at, launched_at) \
             VALUES (?, ?, ?, ?, ?, ?)",
        )
        .bind(record.id.to_string())
        .bind(configuration)
        .bind(&record.generated_message)
        .bind(record.status.as_str())
        .bind(record.created_at.to_rfc3339())
        .bind(record.launched_at.map(|t| t.to_rfc3339()))
        .execute(&self.pool)
        .await
        .map_err(database_error)?;

        Ok(())
    }

    async fn get(&self, id: CampaignId) -> Result<Option<CampaignRecord>, CampaignRepositoryError> {
        let row: Option<CampaignRow> = sqlx::query_as(&format!("{} WHERE id = ?", SELECT_COLUMNS))
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(database_error)?;

        row.map(row_to_record).transpose()
    }

    async fn list(&self) -> Result<Vec<CampaignRecord>, CampaignRepositoryError> {
        let rows: Vec<CampaignRow> =
            sqlx::query_as(&format!("{} ORDER BY created_at DESC", SELECT_COLUMNS))
                .fetch_all(&self.pool)
                .await
                .map_err(database_error)?;

        rows.into_iter().map(row_to_record).collect()
    }
}
