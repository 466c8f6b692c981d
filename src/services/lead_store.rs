use std::time::Duration;

use async_trait::async_trait;
use log::{error, warn};
use sqlx::postgres::{PgPool, PgPoolOptions};

use crate::error::AppError;
use crate::models::lead::Lead;

pub const MIN_CONNECTIONS: u32 = 1;
pub const MAX_CONNECTIONS: u32 = 20;

const INSERT_LEAD: &str =
    "INSERT INTO leads (nombre, telefono, servicio, mensaje) VALUES ($1, $2, $3, $4)";

/// Append-only sink for validated leads.
#[async_trait]
pub trait LeadStore: Send + Sync {
    async fn insert(&self, lead: &Lead) -> Result<(), AppError>;
}

pub struct PgLeadStore {
    pool: PgPool,
}

impl PgLeadStore {
    pub async fn connect(database_url: &str, acquire_timeout: Duration) -> Result<Self, sqlx::Error> {
        let pool = PgPoolOptions::new()
            .min_connections(MIN_CONNECTIONS)
            .max_connections(MAX_CONNECTIONS)
            .acquire_timeout(acquire_timeout)
            .connect(database_url)
            .await?;
        Ok(Self { pool })
    }
}

#[async_trait]
impl LeadStore for PgLeadStore {
    async fn insert(&self, lead: &Lead) -> Result<(), AppError> {
        // The transaction owns the pooled connection and hands it back when
        // dropped, whichever way this function exits.
        let mut tx = self.pool.begin().await.map_err(|e| {
            error!("Failed to acquire a database connection: {}", e);
            AppError::from(e)
        })?;

        let inserted = sqlx::query(INSERT_LEAD)
            .bind(&lead.nombre)
            .bind(&lead.telefono)
            .bind(&lead.servicio)
            .bind(&lead.mensaje)
            .execute(&mut *tx)
            .await;

        if let Err(e) = inserted {
            error!("Failed to save lead: {}", e);
            if let Err(rollback_err) = tx.rollback().await {
                warn!("Rollback after failed insert also failed: {}", rollback_err);
            }
            return Err(e.into());
        }

        tx.commit().await.map_err(|e| {
            error!("Failed to commit lead: {}", e);
            AppError::from(e)
        })
    }
}
