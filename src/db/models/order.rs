//! Order Model
//!
//! 订单状态机：
//!
//! ```text
//! pending → confirmed → preparing → ready → completed
//!    └──────────┴─→ cancelled
//! ```
//!
//! `completed` / `cancelled` 为终态，不允许任何后续流转。
//! 取消只允许从 `pending` / `confirmed` 发起。

use super::serde_helpers;
use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

/// Order lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Pending,
    Confirmed,
    Preparing,
    Ready,
    Completed,
    Cancelled,
}

impl OrderStatus {
    /// Terminal statuses admit no further transition
    pub fn is_terminal(&self) -> bool {
        matches!(self, OrderStatus::Completed | OrderStatus::Cancelled)
    }

    /// Whether the order may still be cancelled by its owner
    pub fn is_cancellable(&self) -> bool {
        matches!(self, OrderStatus::Pending | OrderStatus::Confirmed)
    }

    /// State machine check for `self → next`
    pub fn can_transition_to(&self, next: OrderStatus) -> bool {
        use OrderStatus::*;
        matches!(
            (self, next),
            (Pending, Confirmed)
                | (Confirmed, Preparing)
                | (Preparing, Ready)
                | (Ready, Completed)
                | (Pending, Cancelled)
                | (Confirmed, Cancelled)
        )
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Confirmed => "confirmed",
            OrderStatus::Preparing => "preparing",
            OrderStatus::Ready => "ready",
            OrderStatus::Completed => "completed",
            OrderStatus::Cancelled => "cancelled",
        };
        f.write_str(s)
    }
}

/// Payment sub-state, independent of order progress
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    Pending,
    Paid,
    Failed,
    Refunded,
}

/// Payment method
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    Cash,
    Card,
    Upi,
    Wallet,
}

/// Order line with point-in-time price snapshot
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderLine {
    /// Menu item reference
    #[serde(with = "serde_helpers::record_id")]
    pub menu_item: RecordId,
    /// 菜品名称快照
    pub name: String,
    pub quantity: i32,
    /// 下单时单价快照
    pub price: f64,
    pub line_total: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub special_instructions: Option<String>,
}

/// Order entity (订单)
///
/// `total_amount` 永远等于 Σ line.price × line.quantity，由引擎重算，
/// 不信任输入。订单只终结不删除，保留用于报表。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    #[serde(
        default,
        with = "serde_helpers::option_record_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<RecordId>,
    /// 唯一订单号，按创建时间可排序
    pub order_number: String,
    /// Owning user reference
    pub user: String,
    /// 插入顺序 = 展示顺序
    pub items: Vec<OrderLine>,
    pub total_amount: f64,
    pub status: OrderStatus,
    pub payment_status: PaymentStatus,
    pub payment_method: PaymentMethod,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub table_number: Option<String>,
    #[serde(default)]
    pub is_takeaway: bool,
    /// 预计制作时间（分钟），取各订单行的最大值
    #[serde(default)]
    pub estimated_preparation_time: i32,
    #[serde(default)]
    pub special_requests: String,
    /// 评分 1-5，仅完成后可填
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feedback: Option<String>,
    pub created_at: i64,
    pub updated_at: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<i64>,
}

/// Single line of an order request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderLineInput {
    /// Menu item id ("menu_item:xyz")
    pub menu_item: String,
    pub quantity: i32,
    #[serde(default)]
    pub special_instructions: Option<String>,
}

/// Create order payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderCreate {
    pub lines: Vec<OrderLineInput>,
    #[serde(default)]
    pub table_number: Option<String>,
    #[serde(default)]
    pub is_takeaway: bool,
    #[serde(default)]
    pub special_requests: Option<String>,
    #[serde(default)]
    pub payment_method: Option<PaymentMethod>,
}

/// Aggregated order statistics for the admin dashboard
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OrderStats {
    pub total_orders: i64,
    pub pending_orders: i64,
    pub completed_orders: i64,
    pub cancelled_orders: i64,
    /// 已完成订单的营收合计
    pub total_revenue: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn forward_transitions_are_legal() {
        use OrderStatus::*;
        assert!(Pending.can_transition_to(Confirmed));
        assert!(Confirmed.can_transition_to(Preparing));
        assert!(Preparing.can_transition_to(Ready));
        assert!(Ready.can_transition_to(Completed));
    }

    #[test]
    fn cancellation_only_from_pending_or_confirmed() {
        use OrderStatus::*;
        assert!(Pending.can_transition_to(Cancelled));
        assert!(Confirmed.can_transition_to(Cancelled));
        assert!(!Preparing.can_transition_to(Cancelled));
        assert!(!Ready.can_transition_to(Cancelled));
        assert!(!Completed.can_transition_to(Cancelled));
    }

    #[test]
    fn terminal_states_admit_nothing() {
        use OrderStatus::*;
        for next in [Pending, Confirmed, Preparing, Ready, Completed, Cancelled] {
            assert!(!Completed.can_transition_to(next));
            assert!(!Cancelled.can_transition_to(next));
        }
    }

    #[test]
    fn no_skipping_states() {
        use OrderStatus::*;
        assert!(!Pending.can_transition_to(Preparing));
        assert!(!Pending.can_transition_to(Ready));
        assert!(!Confirmed.can_transition_to(Completed));
        assert!(!Ready.can_transition_to(Preparing)); // no going back
    }
}
