//! 引擎配置
//!
//! # 环境变量
//!
//! 所有配置项都可以通过环境变量覆盖：
//!
//! | 环境变量 | 默认值 | 说明 |
//! |----------|--------|------|
//! | DATA_DIR | /var/lib/cafeteria | 数据目录 (嵌入式数据库文件) |
//! | QUEUE_LOCATION | main_hall | 排队状态所属区域 |
//! | QUEUE_DEFAULT_CAPACITY | 100 | 排队状态默认容量 |
//! | QUEUE_HISTORY_LIMIT | 100 | 排队历史保留条数 |

/// Engine configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// 数据目录，存储嵌入式数据库文件
    pub data_dir: String,
    /// 排队状态单例所属区域 (决定单例记录的 key)
    pub queue_location: String,
    /// 首次读取时懒创建的默认容量
    pub queue_default_capacity: u32,
    /// 排队历史保留条数 (FIFO 截断)
    pub queue_history_limit: usize,
}

impl Config {
    /// 从环境变量加载配置，未设置的项使用默认值
    pub fn from_env() -> Self {
        Self {
            data_dir: std::env::var("DATA_DIR").unwrap_or_else(|_| "/var/lib/cafeteria".into()),
            queue_location: std::env::var("QUEUE_LOCATION")
                .unwrap_or_else(|_| "main_hall".into()),
            queue_default_capacity: std::env::var("QUEUE_DEFAULT_CAPACITY")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(100),
            queue_history_limit: std::env::var("QUEUE_HISTORY_LIMIT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(100),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: "/var/lib/cafeteria".into(),
            queue_location: "main_hall".into(),
            queue_default_capacity: 100,
            queue_history_limit: 100,
        }
    }
}
