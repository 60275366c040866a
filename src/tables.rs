//! Table Allocator
//!
//! 跟踪桌台占用状态并与活动订单互联。
//! 占桌走仓储层的单语句 compare-and-set；释放是幂等操作。

use crate::auth::{Actor, require_admin};
use crate::db::models::{DiningTable, DiningTableCreate, DiningTableUpdate, TableStatus};
use crate::db::repository::DiningTableRepository;
use crate::utils::{AppError, AppResult};
use surrealdb::{RecordId, Surreal};
use surrealdb::engine::local::Db;

#[derive(Clone)]
pub struct TableAllocator {
    repo: DiningTableRepository,
}

impl TableAllocator {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            repo: DiningTableRepository::new(db),
        }
    }

    /// Tables currently open for seating
    pub async fn find_available(&self) -> AppResult<Vec<DiningTable>> {
        Ok(self.repo.find_available().await?)
    }

    /// All active tables (admin management view)
    pub async fn list_all(&self, actor: &Actor) -> AppResult<Vec<DiningTable>> {
        require_admin(actor)?;
        Ok(self.repo.find_all().await?)
    }

    /// Claim a table for an order.
    ///
    /// Fails with `Conflict` when the table is not currently available —
    /// 两个并发请求抢同一张桌，恰好一个成功。
    pub async fn occupy(&self, table_number: &str, order_id: &RecordId) -> AppResult<DiningTable> {
        if let Some(table) = self.repo.try_occupy(table_number, order_id).await? {
            tracing::info!(table = %table_number, order = %order_id, "Table occupied");
            return Ok(table);
        }
        // CAS 零命中：区分桌台不存在、已停用与状态冲突
        match self.repo.find_by_number(table_number).await? {
            None => Err(AppError::not_found(format!(
                "Table {} not found",
                table_number
            ))),
            Some(table) if !table.is_active => Err(AppError::conflict(format!(
                "Table {} is not in service",
                table_number
            ))),
            Some(table) => Err(AppError::conflict(format!(
                "Table {} is not available (status: {:?})",
                table_number, table.status
            ))),
        }
    }

    /// Release a table back to available, clearing the order link.
    /// Idempotent: releasing an already-available table is a no-op.
    pub async fn release(&self, table_number: &str) -> AppResult<()> {
        self.repo.release(table_number).await?;
        tracing::info!(table = %table_number, "Table released");
        Ok(())
    }

    /// Direct status override bypassing order linkage (administrator only)
    pub async fn set_status(
        &self,
        actor: &Actor,
        table_id: &str,
        status: TableStatus,
    ) -> AppResult<DiningTable> {
        require_admin(actor)?;
        let table = self.repo.set_status(table_id, status).await?;
        tracing::info!(table = %table.table_number, status = ?status, by = %actor.id, "Table status overridden");
        Ok(table)
    }

    /// Create a table (administrator only)
    pub async fn create(&self, actor: &Actor, data: DiningTableCreate) -> AppResult<DiningTable> {
        require_admin(actor)?;
        Ok(self.repo.create(data).await?)
    }

    /// Update table capacity / zone / active flag (administrator only)
    pub async fn update(
        &self,
        actor: &Actor,
        table_id: &str,
        data: DiningTableUpdate,
    ) -> AppResult<DiningTable> {
        require_admin(actor)?;
        Ok(self.repo.update(table_id, data).await?)
    }
}
