//! Order Repository
//!
//! 订单只创建、只更新，从不删除（保留用于报表）。
//! 状态流转的合法性由 OrderManager 校验，这里只负责原子写。

use super::{BaseRepository, RepoError, RepoResult};
use crate::db::models::{Order, OrderStats, OrderStatus, PaymentStatus};
use crate::utils::now_millis;
use serde::Deserialize;
use surrealdb::engine::local::Db;
use surrealdb::{RecordId, Surreal};

const TABLE: &str = "order";

#[derive(Clone)]
pub struct OrderRepository {
    base: BaseRepository,
}

impl OrderRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Persist a freshly validated order
    pub async fn create(&self, order: Order) -> RepoResult<Order> {
        let created: Option<Order> = self.base.db().create(TABLE).content(order).await?;
        created.ok_or_else(|| RepoError::Database("Failed to create order".to_string()))
    }

    /// Find order by id
    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Order>> {
        let thing: RecordId = id
            .parse()
            .map_err(|_| RepoError::Validation(format!("Invalid ID: {}", id)))?;
        let order: Option<Order> = self.base.db().select(thing).await?;
        Ok(order)
    }

    /// Find order by its human-readable order number
    pub async fn find_by_order_number(&self, order_number: &str) -> RepoResult<Option<Order>> {
        let mut result = self
            .base
            .db()
            .query("SELECT * FROM order WHERE order_number = $number LIMIT 1")
            .bind(("number", order_number.to_string()))
            .await?;
        let orders: Vec<Order> = result.take(0)?;
        Ok(orders.into_iter().next())
    }

    /// All orders of a user, newest first
    pub async fn find_by_user(&self, user: &str) -> RepoResult<Vec<Order>> {
        let orders: Vec<Order> = self
            .base
            .db()
            .query("SELECT * FROM order WHERE user = $user ORDER BY created_at DESC")
            .bind(("user", user.to_string()))
            .await?
            .take(0)?;
        Ok(orders)
    }

    /// All orders, optionally filtered by status, newest first (admin view)
    pub async fn find_all(&self, status: Option<OrderStatus>) -> RepoResult<Vec<Order>> {
        let sql = if status.is_some() {
            "SELECT * FROM order WHERE status = $status ORDER BY created_at DESC"
        } else {
            "SELECT * FROM order ORDER BY created_at DESC"
        };
        let mut query = self.base.db().query(sql);
        if let Some(status) = status {
            query = query.bind(("status", status));
        }
        let orders: Vec<Order> = query.await?.take(0)?;
        Ok(orders)
    }

    /// Set the lifecycle status in a single atomic statement.
    ///
    /// `completed_at` 与 status 同一条语句落盘。
    pub async fn set_status(
        &self,
        id: &str,
        status: OrderStatus,
        completed_at: Option<i64>,
    ) -> RepoResult<Order> {
        let thing: RecordId = id
            .parse()
            .map_err(|_| RepoError::Validation(format!("Invalid ID: {}", id)))?;
        let mut result = self
            .base
            .db()
            .query(
                "UPDATE $thing SET status = $status, completed_at = $completed_at, updated_at = $now \
                 RETURN AFTER",
            )
            .bind(("thing", thing))
            .bind(("status", status))
            .bind(("completed_at", completed_at))
            .bind(("now", now_millis()))
            .await?;
        let updated: Vec<Order> = result.take(0)?;
        updated
            .into_iter()
            .next()
            .ok_or_else(|| RepoError::NotFound(format!("Order {} not found", id)))
    }

    /// Record the table actually reserved for this order.
    ///
    /// 只在占桌成功后调用；占桌失败的订单不携带桌号，
    /// 避免终结时误释放别人的桌台。
    pub async fn set_table_number(&self, id: &str, table_number: &str) -> RepoResult<Order> {
        let thing: RecordId = id
            .parse()
            .map_err(|_| RepoError::Validation(format!("Invalid ID: {}", id)))?;
        let mut result = self
            .base
            .db()
            .query("UPDATE $thing SET table_number = $number, updated_at = $now RETURN AFTER")
            .bind(("thing", thing))
            .bind(("number", table_number.to_string()))
            .bind(("now", now_millis()))
            .await?;
        let updated: Vec<Order> = result.take(0)?;
        updated
            .into_iter()
            .next()
            .ok_or_else(|| RepoError::NotFound(format!("Order {} not found", id)))
    }

    /// Set the payment sub-state (independent of order progress)
    pub async fn set_payment_status(
        &self,
        id: &str,
        payment_status: PaymentStatus,
    ) -> RepoResult<Order> {
        let thing: RecordId = id
            .parse()
            .map_err(|_| RepoError::Validation(format!("Invalid ID: {}", id)))?;
        let mut result = self
            .base
            .db()
            .query("UPDATE $thing SET payment_status = $payment, updated_at = $now RETURN AFTER")
            .bind(("thing", thing))
            .bind(("payment", payment_status))
            .bind(("now", now_millis()))
            .await?;
        let updated: Vec<Order> = result.take(0)?;
        updated
            .into_iter()
            .next()
            .ok_or_else(|| RepoError::NotFound(format!("Order {} not found", id)))
    }

    /// Attach rating and feedback to a completed order
    pub async fn set_rating(
        &self,
        id: &str,
        rating: i32,
        feedback: Option<String>,
    ) -> RepoResult<Order> {
        let thing: RecordId = id
            .parse()
            .map_err(|_| RepoError::Validation(format!("Invalid ID: {}", id)))?;
        let mut result = self
            .base
            .db()
            .query(
                "UPDATE $thing SET rating = $rating, feedback = $feedback, updated_at = $now \
                 RETURN AFTER",
            )
            .bind(("thing", thing))
            .bind(("rating", rating))
            .bind(("feedback", feedback))
            .bind(("now", now_millis()))
            .await?;
        let updated: Vec<Order> = result.take(0)?;
        updated
            .into_iter()
            .next()
            .ok_or_else(|| RepoError::NotFound(format!("Order {} not found", id)))
    }

    /// Aggregate counts and completed revenue for the admin dashboard
    pub async fn stats(&self) -> RepoResult<OrderStats> {
        #[derive(Deserialize)]
        struct StatusCount {
            status: OrderStatus,
            count: i64,
        }
        #[derive(Deserialize)]
        struct RevenueRow {
            revenue: Option<f64>,
        }

        let mut result = self
            .base
            .db()
            .query("SELECT status, count() AS count FROM order GROUP BY status")
            .query(
                "SELECT math::sum(total_amount) AS revenue FROM order \
                 WHERE status = 'completed' GROUP ALL",
            )
            .await?;
        let counts: Vec<StatusCount> = result.take(0)?;
        let revenue: Vec<RevenueRow> = result.take(1)?;

        let mut stats = OrderStats::default();
        for row in counts {
            stats.total_orders += row.count;
            match row.status {
                OrderStatus::Pending => stats.pending_orders = row.count,
                OrderStatus::Completed => stats.completed_orders = row.count,
                OrderStatus::Cancelled => stats.cancelled_orders = row.count,
                _ => {}
            }
        }
        stats.total_revenue = revenue
            .into_iter()
            .next()
            .and_then(|r| r.revenue)
            .unwrap_or(0.0);
        Ok(stats)
    }
}
