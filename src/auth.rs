//! Actor / role gate
//!
//! 角色校验是注入到各边界操作的横切检查，不嵌入实体本身。
//! 身份来源 (session、JWT 等) 由外部协作方提供。

use crate::utils::{AppError, AppResult};

/// Actor role
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Student,
    Admin,
}

/// Acting user identity as supplied by the session layer
#[derive(Debug, Clone)]
pub struct Actor {
    pub id: String,
    pub role: Role,
}

impl Actor {
    pub fn student(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            role: Role::Student,
        }
    }

    pub fn admin(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            role: Role::Admin,
        }
    }

    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

/// 管理员权限门禁
pub fn require_admin(actor: &Actor) -> AppResult<()> {
    if actor.is_admin() {
        Ok(())
    } else {
        Err(AppError::forbidden(format!(
            "Administrator role required (actor {})",
            actor.id
        )))
    }
}
