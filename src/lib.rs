//! Cafeteria Ordering & Queue-Status Engine
//!
//! 校园食堂点餐与排队状态核心：
//!
//! - [`crowd`] — 拥挤等级分类（纯函数）
//! - [`queue`] — 排队状态单例 + 有界历史
//! - [`catalog`] — 菜品目录
//! - [`tables`] — 桌台分配（compare-and-set 占桌）
//! - [`orders`] — 订单生命周期状态机
//! - [`service`] — 装配好的引擎入口 [`CafeteriaService`]
//!
//! 持久化走嵌入式 SurrealDB；HTTP/渲染/session 属外部协作方。

pub mod auth;
pub mod catalog;
pub mod config;
pub mod crowd;
pub mod db;
pub mod orders;
pub mod queue;
pub mod service;
pub mod tables;
pub mod utils;

pub use auth::{Actor, Role};
pub use config::Config;
pub use service::CafeteriaService;
pub use utils::{AppError, AppResult};
