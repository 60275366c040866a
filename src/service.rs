//! Cafeteria Service Facade
//!
//! 把各组件装配到一个入口上，对外暴露边界操作。
//! 传输层（HTTP、模板渲染、session）由外部协作方负责。

use crate::auth::{Actor, require_admin};
use crate::catalog::MenuCatalog;
use crate::config::Config;
use crate::db::DbService;
use crate::db::models::{DiningTable, Order, OrderCreate, OrderStatus, QueueOverride, QueueStatus};
use crate::orders::{OrderManager, PlacedOrder};
use crate::queue::QueueTracker;
use crate::tables::TableAllocator;
use crate::utils::AppResult;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

/// The assembled engine
#[derive(Clone)]
pub struct CafeteriaService {
    pub orders: OrderManager,
    pub catalog: MenuCatalog,
    pub tables: TableAllocator,
    pub queue: QueueTracker,
}

impl CafeteriaService {
    /// Assemble the service on an existing database handle
    pub fn new(db: Surreal<Db>, config: &Config) -> Self {
        Self {
            orders: OrderManager::new(db.clone()),
            catalog: MenuCatalog::new(db.clone()),
            tables: TableAllocator::new(db.clone()),
            queue: QueueTracker::new(db, config),
        }
    }

    /// Open the on-disk database and assemble the service
    pub async fn open(config: &Config) -> AppResult<Self> {
        let db = DbService::new(&config.data_dir).await?;
        Ok(Self::new(db.db(), config))
    }

    /// In-memory variant (tests / ephemeral deployments)
    pub async fn memory(config: &Config) -> AppResult<Self> {
        let db = DbService::memory().await?;
        Ok(Self::new(db.db(), config))
    }

    // ========== Boundary operations ==========

    pub async fn place_order(&self, actor: &Actor, data: OrderCreate) -> AppResult<PlacedOrder> {
        self.orders.create_order(actor, data).await
    }

    pub async fn list_orders(&self, actor: &Actor) -> AppResult<Vec<Order>> {
        self.orders.orders_for_user(actor).await
    }

    pub async fn get_order(&self, order_id: &str, actor: &Actor) -> AppResult<Order> {
        self.orders.get(order_id, actor).await
    }

    pub async fn cancel_order(&self, actor: &Actor, order_id: &str) -> AppResult<Order> {
        self.orders.cancel(actor, order_id).await
    }

    pub async fn advance_order(
        &self,
        actor: &Actor,
        order_id: &str,
        status: OrderStatus,
    ) -> AppResult<Order> {
        self.orders.advance_status(actor, order_id, status).await
    }

    pub async fn get_queue_status(&self) -> AppResult<QueueStatus> {
        self.queue.current().await
    }

    /// Sensor feed: no override metadata
    pub async fn update_queue_status(&self, count: u32, capacity: u32) -> AppResult<QueueStatus> {
        self.queue.update(count, capacity, None).await
    }

    /// Manual admin override of the queue status
    pub async fn override_queue_status(
        &self,
        actor: &Actor,
        count: u32,
        capacity: u32,
        reason: impl Into<String>,
    ) -> AppResult<QueueStatus> {
        require_admin(actor)?;
        self.queue
            .update(
                count,
                capacity,
                Some(QueueOverride {
                    reason: reason.into(),
                    by: actor.id.clone(),
                }),
            )
            .await
    }

    pub async fn list_available_tables(&self) -> AppResult<Vec<DiningTable>> {
        self.tables.find_available().await
    }
}
