//! Dining Table Repository
//!
//! 占桌是全引擎唯一需要关死的竞态：
//! `occupy` 用单条 `UPDATE ... WHERE status = 'available'` 做
//! compare-and-set，两个并发请求最多一个能赢。

use super::{BaseRepository, RepoError, RepoResult};
use crate::db::models::{DiningTable, DiningTableCreate, DiningTableUpdate, TableStatus, TableZone};
use crate::utils::now_millis;
use surrealdb::engine::local::Db;
use surrealdb::{RecordId, Surreal};

const TABLE: &str = "dining_table";

#[derive(Clone)]
pub struct DiningTableRepository {
    base: BaseRepository,
}

impl DiningTableRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Find all active tables
    pub async fn find_all(&self) -> RepoResult<Vec<DiningTable>> {
        let tables: Vec<DiningTable> = self
            .base
            .db()
            .query("SELECT * FROM dining_table WHERE is_active = true ORDER BY table_number")
            .await?
            .take(0)?;
        Ok(tables)
    }

    /// Find tables currently available for seating
    pub async fn find_available(&self) -> RepoResult<Vec<DiningTable>> {
        let tables: Vec<DiningTable> = self
            .base
            .db()
            .query(
                "SELECT * FROM dining_table WHERE is_active = true AND status = 'available' ORDER BY table_number",
            )
            .await?
            .take(0)?;
        Ok(tables)
    }

    /// Find table by id
    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<DiningTable>> {
        let thing: RecordId = id
            .parse()
            .map_err(|_| RepoError::Validation(format!("Invalid ID: {}", id)))?;
        let table: Option<DiningTable> = self.base.db().select(thing).await?;
        Ok(table)
    }

    /// Find table by its unique table number
    pub async fn find_by_number(&self, table_number: &str) -> RepoResult<Option<DiningTable>> {
        let mut result = self
            .base
            .db()
            .query("SELECT * FROM dining_table WHERE table_number = $number LIMIT 1")
            .bind(("number", table_number.to_string()))
            .await?;
        let tables: Vec<DiningTable> = result.take(0)?;
        Ok(tables.into_iter().next())
    }

    /// Create a new dining table
    pub async fn create(&self, data: DiningTableCreate) -> RepoResult<DiningTable> {
        if data.table_number.trim().is_empty() {
            return Err(RepoError::Validation("Table number must not be empty".into()));
        }
        if let Some(capacity) = data.capacity
            && capacity < 1
        {
            return Err(RepoError::Validation(format!(
                "Capacity must be at least 1, got {}",
                capacity
            )));
        }
        // Unique table number
        if self.find_by_number(&data.table_number).await?.is_some() {
            return Err(RepoError::Duplicate(format!(
                "Table '{}' already exists",
                data.table_number
            )));
        }

        let now = now_millis();
        let table = DiningTable {
            id: None,
            table_number: data.table_number,
            capacity: data.capacity.unwrap_or(4),
            zone: data.zone.unwrap_or(TableZone::Indoor),
            status: TableStatus::Available,
            current_order: None,
            is_active: true,
            created_at: now,
            updated_at: now,
        };

        let created: Option<DiningTable> = self.base.db().create(TABLE).content(table).await?;
        created.ok_or_else(|| RepoError::Database("Failed to create dining table".to_string()))
    }

    /// Update a dining table (capacity / zone / active flag)
    pub async fn update(&self, id: &str, data: DiningTableUpdate) -> RepoResult<DiningTable> {
        let thing: RecordId = id
            .parse()
            .map_err(|_| RepoError::Validation(format!("Invalid ID: {}", id)))?;
        let existing = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Dining table {} not found", id)))?;

        if let Some(capacity) = data.capacity
            && capacity < 1
        {
            return Err(RepoError::Validation(format!(
                "Capacity must be at least 1, got {}",
                capacity
            )));
        }

        // 字段级 UPDATE，不整条覆盖：current_order 是 record link，
        // 走 CONTENT 会被序列化成字符串
        let mut result = self
            .base
            .db()
            .query(
                "UPDATE $thing SET capacity = $capacity, zone = $zone, is_active = $is_active, \
                 updated_at = $now RETURN AFTER",
            )
            .bind(("thing", thing))
            .bind(("capacity", data.capacity.unwrap_or(existing.capacity)))
            .bind(("zone", data.zone.unwrap_or(existing.zone)))
            .bind(("is_active", data.is_active.unwrap_or(existing.is_active)))
            .bind(("now", now_millis()))
            .await?;
        let updated: Vec<DiningTable> = result.take(0)?;
        updated
            .into_iter()
            .next()
            .ok_or_else(|| RepoError::NotFound(format!("Dining table {} not found", id)))
    }

    /// Atomically claim an available table for an order.
    ///
    /// 单语句 compare-and-set：status 非 available 时零行命中，
    /// 返回 `None` 交由调用方判定 Conflict / NotFound。
    pub async fn try_occupy(
        &self,
        table_number: &str,
        order_id: &RecordId,
    ) -> RepoResult<Option<DiningTable>> {
        let mut result = self
            .base
            .db()
            .query(
                "UPDATE dining_table SET status = 'occupied', current_order = $order, updated_at = $now \
                 WHERE table_number = $number AND status = 'available' AND is_active = true \
                 RETURN AFTER",
            )
            .bind(("order", order_id.clone()))
            .bind(("now", now_millis()))
            .bind(("number", table_number.to_string()))
            .await?;
        let updated: Vec<DiningTable> = result.take(0)?;
        Ok(updated.into_iter().next())
    }

    /// Release a table back to available and clear the order link.
    ///
    /// 状态与 current_order 在同一条语句里改，幂等：
    /// 已经 available 的桌台再释放一次是 no-op。
    pub async fn release(&self, table_number: &str) -> RepoResult<()> {
        self.base
            .db()
            .query(
                "UPDATE dining_table SET status = 'available', current_order = NONE, updated_at = $now \
                 WHERE table_number = $number",
            )
            .bind(("now", now_millis()))
            .bind(("number", table_number.to_string()))
            .await?;
        Ok(())
    }

    /// Direct status override, bypassing order linkage (admin / maintenance)
    pub async fn set_status(&self, id: &str, status: TableStatus) -> RepoResult<DiningTable> {
        let thing: RecordId = id
            .parse()
            .map_err(|_| RepoError::Validation(format!("Invalid ID: {}", id)))?;
        let mut result = self
            .base
            .db()
            .query("UPDATE $thing SET status = $status, updated_at = $now RETURN AFTER")
            .bind(("thing", thing))
            .bind(("status", status))
            .bind(("now", now_millis()))
            .await?;
        let updated: Vec<DiningTable> = result.take(0)?;
        updated
            .into_iter()
            .next()
            .ok_or_else(|| RepoError::NotFound(format!("Dining table {} not found", id)))
    }
}
