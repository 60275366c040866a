//! 时间工具函数
//!
//! 全部实体统一使用 UTC 毫秒时间戳 (`i64`)。

/// 获取当前 UTC 时间戳（毫秒）
pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}
