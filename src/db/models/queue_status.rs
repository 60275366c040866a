//! Queue Status Model (Singleton)
//!
//! 每个区域一条单例记录，首次读取时懒创建。
//! 历史是嵌入在记录内的尾部滑动窗口（最多 100 条，FIFO 淘汰），
//! 不是可查询的时间序列。

use super::serde_helpers;
use crate::crowd::CrowdTier;
use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

/// One history sample: appended whenever count or tier changes
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueueSample {
    pub timestamp: i64,
    pub count: u32,
    pub tier: CrowdTier,
}

/// Queue status entity (排队状态单例)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueueStatus {
    #[serde(
        default,
        with = "serde_helpers::option_record_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<RecordId>,
    pub current_count: u32,
    pub max_capacity: u32,
    /// Derived: 由 Crowd Classifier 重算，不信任输入
    pub tier: CrowdTier,
    pub message: String,
    /// Dashboard 显示颜色，随 tier 派生
    #[serde(default)]
    pub color: String,
    pub estimated_wait_minutes: u32,
    #[serde(default)]
    pub is_manual_override: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub override_reason: Option<String>,
    /// Overriding admin reference
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub override_by: Option<String>,
    /// 尾部滑动窗口，最旧的先淘汰
    #[serde(default)]
    pub history: Vec<QueueSample>,
    pub last_updated: i64,
}

/// Manual override metadata for a queue update
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueueOverride {
    pub reason: String,
    /// Admin id
    pub by: String,
}
