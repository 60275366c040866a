//! Queue Status Repository (Singleton)
//!
//! 每个区域一条记录，record key 即区域名（well-known identity）。
//! 写入永远是整条记录的覆盖（单语句 upsert），历史截断随写一起落盘。

use super::{BaseRepository, RepoError, RepoResult};
use crate::db::models::QueueStatus;
use surrealdb::engine::local::Db;
use surrealdb::{RecordId, Surreal};

const TABLE: &str = "queue_status";

#[derive(Clone)]
pub struct QueueStatusRepository {
    base: BaseRepository,
}

impl QueueStatusRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    fn record(location: &str) -> RecordId {
        RecordId::from_table_key(TABLE, location)
    }

    /// Fetch the singleton for a location
    pub async fn get(&self, location: &str) -> RepoResult<Option<QueueStatus>> {
        let status: Option<QueueStatus> = self.base.db().select(Self::record(location)).await?;
        Ok(status)
    }

    /// Full overwrite of the singleton (create-if-absent)
    pub async fn save(&self, location: &str, mut status: QueueStatus) -> RepoResult<QueueStatus> {
        status.id = None;
        let saved: Option<QueueStatus> = self
            .base
            .db()
            .upsert(Self::record(location))
            .content(status)
            .await?;
        saved.ok_or_else(|| RepoError::Database("Failed to save queue status".to_string()))
    }
}
