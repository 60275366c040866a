//! Queue Status Tracker
//!
//! 维护排队状态单例：当前人数、容量、派生的拥挤等级、人工覆盖标记，
//! 以及一个有界的历史窗口。传感器和管理员共用 [`QueueTracker::update`]。

use crate::config::Config;
use crate::crowd;
use crate::db::models::{QueueOverride, QueueSample, QueueStatus};
use crate::db::repository::QueueStatusRepository;
use crate::utils::{AppResult, now_millis};
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

#[derive(Clone)]
pub struct QueueTracker {
    repo: QueueStatusRepository,
    location: String,
    default_capacity: u32,
    history_limit: usize,
}

impl QueueTracker {
    pub fn new(db: Surreal<Db>, config: &Config) -> Self {
        Self {
            repo: QueueStatusRepository::new(db),
            location: config.queue_location.clone(),
            default_capacity: config.queue_default_capacity,
            history_limit: config.queue_history_limit,
        }
    }

    /// Latest snapshot; lazily creates and persists the default on first read
    /// so subsequent reads are stable.
    pub async fn current(&self) -> AppResult<QueueStatus> {
        if let Some(status) = self.repo.get(&self.location).await? {
            return Ok(status);
        }

        let classification = crowd::classify(0, self.default_capacity)?;
        let default = QueueStatus {
            id: None,
            current_count: 0,
            max_capacity: self.default_capacity,
            tier: classification.tier,
            message: classification.message.to_string(),
            color: classification.color.to_string(),
            estimated_wait_minutes: classification.estimated_wait_minutes,
            is_manual_override: false,
            override_reason: None,
            override_by: None,
            history: Vec::new(),
            last_updated: now_millis(),
        };
        tracing::info!(location = %self.location, "Queue status created with defaults");
        Ok(self.repo.save(&self.location, default).await?)
    }

    /// Overwrite the singleton with a new reading.
    ///
    /// 人数或等级变化时追加一条历史样本并截断到窗口上限；
    /// 截断与状态更新落在同一次整条覆盖里。
    pub async fn update(
        &self,
        count: u32,
        capacity: u32,
        manual_override: Option<QueueOverride>,
    ) -> AppResult<QueueStatus> {
        let classification = crowd::classify(count, capacity)?;
        let now = now_millis();

        let prior = self.repo.get(&self.location).await?;
        let (mut history, changed) = match &prior {
            Some(p) => (
                p.history.clone(),
                p.current_count != count || p.tier != classification.tier,
            ),
            // 无历史记录时首笔更新视为变化
            None => (Vec::new(), true),
        };

        if changed {
            history.push(QueueSample {
                timestamp: now,
                count,
                tier: classification.tier,
            });
            if history.len() > self.history_limit {
                let excess = history.len() - self.history_limit;
                history.drain(0..excess);
            }
        }

        let (is_manual_override, override_reason, override_by) = match manual_override {
            Some(o) => (true, Some(o.reason), Some(o.by)),
            None => (false, None, None),
        };

        let status = QueueStatus {
            id: None,
            current_count: count,
            max_capacity: capacity,
            tier: classification.tier,
            message: classification.message.to_string(),
            color: classification.color.to_string(),
            estimated_wait_minutes: classification.estimated_wait_minutes,
            is_manual_override,
            override_reason,
            override_by,
            history,
            last_updated: now,
        };

        tracing::info!(
            location = %self.location,
            count,
            capacity,
            tier = ?classification.tier,
            manual = is_manual_override,
            "Queue status updated"
        );
        Ok(self.repo.save(&self.location, status).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crowd::CrowdTier;
    use crate::db::DbService;
    use crate::utils::AppError;

    async fn tracker() -> QueueTracker {
        let db = DbService::memory().await.unwrap();
        QueueTracker::new(db.db(), &Config::default())
    }

    #[tokio::test]
    async fn first_read_persists_default() {
        let tracker = tracker().await;

        let first = tracker.current().await.unwrap();
        assert_eq!(first.current_count, 0);
        assert_eq!(first.max_capacity, 100);
        assert_eq!(first.tier, CrowdTier::Low);
        assert_eq!(first.color, "white");

        // 再次读取拿到的是同一条持久化记录
        let second = tracker.current().await.unwrap();
        assert_eq!(second.last_updated, first.last_updated);
        assert!(second.id.is_some());
    }

    #[tokio::test]
    async fn update_reclassifies_and_appends_history() {
        let tracker = tracker().await;

        let status = tracker.update(40, 100, None).await.unwrap();
        assert_eq!(status.tier, CrowdTier::Medium);
        assert_eq!(status.color, "orange");
        assert_eq!(status.estimated_wait_minutes, 15);
        assert_eq!(status.history.len(), 1);
        assert_eq!(status.history[0].count, 40);

        // 人数与等级都没变 → 不追加
        let status = tracker.update(40, 100, None).await.unwrap();
        assert_eq!(status.history.len(), 1);

        // 人数变了 → 追加
        let status = tracker.update(41, 100, None).await.unwrap();
        assert_eq!(status.history.len(), 2);
    }

    #[tokio::test]
    async fn invalid_capacity_is_rejected() {
        let tracker = tracker().await;
        let err = tracker.update(10, 0, None).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[tokio::test]
    async fn override_metadata_only_recorded_when_set() {
        let tracker = tracker().await;

        let status = tracker
            .update(
                90,
                100,
                Some(QueueOverride {
                    reason: "Festival rush".into(),
                    by: "admin-1".into(),
                }),
            )
            .await
            .unwrap();
        assert!(status.is_manual_override);
        assert_eq!(status.override_reason.as_deref(), Some("Festival rush"));
        assert_eq!(status.override_by.as_deref(), Some("admin-1"));

        let status = tracker.update(50, 100, None).await.unwrap();
        assert!(!status.is_manual_override);
        assert!(status.override_reason.is_none());
        assert!(status.override_by.is_none());
    }

    #[tokio::test]
    async fn history_is_capped_at_100_fifo() {
        let tracker = tracker().await;

        // 101 qualifying updates (每次人数都不同)
        for count in 1..=101u32 {
            tracker.update(count, 200, None).await.unwrap();
        }

        let status = tracker.current().await.unwrap();
        assert_eq!(status.history.len(), 100);
        // 最旧的 (count=1) 已被淘汰，最新的 (count=101) 在尾部
        assert_eq!(status.history.first().unwrap().count, 2);
        assert_eq!(status.history.last().unwrap().count, 101);
    }
}
