//! Order Lifecycle Manager
//!
//! 订单生命周期的唯一入口：
//! - 下单：逐行校验菜品、快照价格、重算总价、生成唯一订单号
//! - 状态推进：按状态机校验，进入 `completed` 时释放桌台
//! - 取消：仅限本人，仅限 `pending` / `confirmed`
//!
//! 下单与占桌是两次独立写入，不构成事务：占桌失败时订单保留，
//! 结果通过 [`TableReservation`] 显式告知调用方。

pub mod money;


use crate::auth::{Actor, require_admin};
use crate::db::models::{
    Order, OrderCreate, OrderLine, OrderStats, OrderStatus, PaymentMethod, PaymentStatus,
};
use crate::db::repository::{MenuItemRepository, OrderRepository};
use crate::tables::TableAllocator;
use crate::utils::{AppError, AppResult, now_millis};
use rand::Rng;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

/// 订单号碰撞重试上限
const ORDER_NUMBER_MAX_ATTEMPTS: u32 = 5;

/// Outcome of the table reservation attempted during order placement
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableReservation {
    /// No table was requested
    NotRequested,
    /// The requested table was claimed for this order
    Reserved,
    /// The order was created, but the table could not be claimed
    Failed { reason: String },
}

/// Result of placing an order
#[derive(Debug, Clone)]
pub struct PlacedOrder {
    pub order: Order,
    pub table: TableReservation,
}

#[derive(Clone)]
pub struct OrderManager {
    orders: OrderRepository,
    catalog: MenuItemRepository,
    tables: TableAllocator,
}

impl OrderManager {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            orders: OrderRepository::new(db.clone()),
            catalog: MenuItemRepository::new(db.clone()),
            tables: TableAllocator::new(db),
        }
    }

    /// Place a new order for `actor`.
    ///
    /// 每一行都按目录当前状态校验；价格在此刻快照到订单行，
    /// 总价由引擎重算，不信任输入。
    pub async fn create_order(&self, actor: &Actor, data: OrderCreate) -> AppResult<PlacedOrder> {
        if data.lines.is_empty() {
            return Err(AppError::validation("Order must contain at least one item"));
        }

        let mut lines = Vec::with_capacity(data.lines.len());
        let mut line_totals = Vec::with_capacity(data.lines.len());
        let mut max_prep_time = 0;

        for input in &data.lines {
            money::validate_quantity(input.quantity)?;
            let item = self
                .catalog
                .find_by_id(&input.menu_item)
                .await?
                .filter(|item| item.is_available)
                .ok_or_else(|| {
                    AppError::not_available(format!(
                        "Menu item {} is not available",
                        input.menu_item
                    ))
                })?;

            let line_total = money::line_total(item.price, input.quantity)?;
            max_prep_time = max_prep_time.max(item.preparation_time);
            line_totals.push(line_total);
            let item_id = item
                .id
                .ok_or_else(|| AppError::internal("Persisted menu item is missing its id"))?;
            lines.push(OrderLine {
                menu_item: item_id,
                name: item.name,
                quantity: input.quantity,
                price: item.price,
                line_total,
                special_instructions: input.special_instructions.clone(),
            });
        }

        let total_amount = money::order_total(&line_totals)?;
        let order_number = self.generate_order_number().await?;
        let now = now_millis();

        let order = Order {
            id: None,
            order_number,
            user: actor.id.clone(),
            items: lines,
            total_amount,
            status: OrderStatus::Pending,
            payment_status: PaymentStatus::Pending,
            payment_method: data.payment_method.unwrap_or(PaymentMethod::Cash),
            table_number: None,
            is_takeaway: data.is_takeaway,
            estimated_preparation_time: max_prep_time,
            special_requests: data.special_requests.unwrap_or_default(),
            rating: None,
            feedback: None,
            created_at: now,
            updated_at: now,
            completed_at: None,
        };

        let mut order = self.orders.create(order).await?;
        tracing::info!(
            order = %order.order_number,
            user = %actor.id,
            total = total_amount,
            "Order placed"
        );

        // 占桌在订单落盘之后单独进行，失败不回滚订单
        let table = match data.table_number {
            None => TableReservation::NotRequested,
            Some(table_number) => {
                let order_id = order
                    .id
                    .clone()
                    .ok_or_else(|| AppError::internal("Persisted order is missing its id"))?;
                match self.tables.occupy(&table_number, &order_id).await {
                    Ok(_) => {
                        order = self
                            .orders
                            .set_table_number(&order_id.to_string(), &table_number)
                            .await?;
                        TableReservation::Reserved
                    }
                    Err(err) => {
                        tracing::warn!(
                            order = %order.order_number,
                            table = %table_number,
                            error = %err,
                            "Table could not be reserved, order kept without table"
                        );
                        TableReservation::Failed {
                            reason: err.to_string(),
                        }
                    }
                }
            }
        };

        Ok(PlacedOrder { order, table })
    }

    /// Advance the lifecycle status (administrator only).
    ///
    /// 进入 `completed` 时盖上 completed_at 并释放关联桌台。
    pub async fn advance_status(
        &self,
        actor: &Actor,
        order_id: &str,
        new_status: OrderStatus,
    ) -> AppResult<Order> {
        require_admin(actor)?;
        let order = self.require_order(order_id).await?;

        if !order.status.can_transition_to(new_status) {
            return Err(AppError::invalid_transition(format!(
                "Order {} cannot move from {} to {}",
                order.order_number, order.status, new_status
            )));
        }

        let completed_at = (new_status == OrderStatus::Completed).then(now_millis);
        let updated = self.orders.set_status(order_id, new_status, completed_at).await?;

        if new_status == OrderStatus::Completed
            && let Some(table_number) = &updated.table_number
        {
            self.tables.release(table_number).await?;
        }

        tracing::info!(order = %updated.order_number, status = %new_status, "Order status advanced");
        Ok(updated)
    }

    /// Cancel an order (owner only, pending/confirmed only).
    pub async fn cancel(&self, actor: &Actor, order_id: &str) -> AppResult<Order> {
        let order = self.require_order(order_id).await?;

        if order.user != actor.id {
            return Err(AppError::forbidden(format!(
                "Order {} does not belong to {}",
                order.order_number, actor.id
            )));
        }
        if !order.status.is_cancellable() {
            return Err(AppError::invalid_transition(format!(
                "Order {} cannot be cancelled while {}",
                order.order_number, order.status
            )));
        }

        let updated = self
            .orders
            .set_status(order_id, OrderStatus::Cancelled, None)
            .await?;

        if let Some(table_number) = &updated.table_number {
            self.tables.release(table_number).await?;
        }

        tracing::info!(order = %updated.order_number, user = %actor.id, "Order cancelled");
        Ok(updated)
    }

    /// All orders of the acting user, newest first
    pub async fn orders_for_user(&self, actor: &Actor) -> AppResult<Vec<Order>> {
        Ok(self.orders.find_by_user(&actor.id).await?)
    }

    /// Fetch one order; only the owner or an administrator may see it
    pub async fn get(&self, order_id: &str, actor: &Actor) -> AppResult<Order> {
        let order = self.require_order(order_id).await?;
        if order.user != actor.id && !actor.is_admin() {
            return Err(AppError::forbidden(format!(
                "Order {} does not belong to {}",
                order.order_number, actor.id
            )));
        }
        Ok(order)
    }

    /// All orders, optionally filtered by status (administrator only)
    pub async fn list_all(
        &self,
        actor: &Actor,
        status: Option<OrderStatus>,
    ) -> AppResult<Vec<Order>> {
        require_admin(actor)?;
        Ok(self.orders.find_all(status).await?)
    }

    /// Set the payment sub-state (administrator only; does not gate progress)
    pub async fn set_payment_status(
        &self,
        actor: &Actor,
        order_id: &str,
        payment_status: PaymentStatus,
    ) -> AppResult<Order> {
        require_admin(actor)?;
        self.require_order(order_id).await?;
        Ok(self.orders.set_payment_status(order_id, payment_status).await?)
    }

    /// Rate a completed order (owner only, rating 1-5)
    pub async fn rate(
        &self,
        actor: &Actor,
        order_id: &str,
        rating: i32,
        feedback: Option<String>,
    ) -> AppResult<Order> {
        if !(1..=5).contains(&rating) {
            return Err(AppError::validation(format!(
                "Rating must be between 1 and 5, got {}",
                rating
            )));
        }
        let order = self.require_order(order_id).await?;
        if order.user != actor.id {
            return Err(AppError::forbidden(format!(
                "Order {} does not belong to {}",
                order.order_number, actor.id
            )));
        }
        if order.status != OrderStatus::Completed {
            return Err(AppError::validation(format!(
                "Order {} can only be rated after completion (currently {})",
                order.order_number, order.status
            )));
        }
        Ok(self.orders.set_rating(order_id, rating, feedback).await?)
    }

    /// Aggregate statistics for the admin dashboard
    pub async fn stats(&self, actor: &Actor) -> AppResult<OrderStats> {
        require_admin(actor)?;
        Ok(self.orders.stats().await?)
    }

    async fn require_order(&self, order_id: &str) -> AppResult<Order> {
        self.orders
            .find_by_id(order_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Order {} not found", order_id)))
    }

    /// Generate a unique, time-sortable order number.
    ///
    /// `ORD-{millis}-{rand3}`：毫秒前缀保证按创建时间可排序，
    /// 碰撞时重新生成而不是硬失败。
    async fn generate_order_number(&self) -> AppResult<String> {
        for _ in 0..ORDER_NUMBER_MAX_ATTEMPTS {
            let candidate = format!(
                "ORD-{}-{:03}",
                now_millis(),
                rand::thread_rng().gen_range(0..1000)
            );
            if self.orders.find_by_order_number(&candidate).await?.is_none() {
                return Ok(candidate);
            }
        }
        Err(AppError::internal(
            "Failed to generate a unique order number".to_string(),
        ))
    }
}
