//! Database Module
//!
//! Owns the embedded SurrealDB handle (RocksDB on disk, in-memory for tests).

pub mod models;
pub mod repository;

use crate::utils::{AppError, AppResult};
use surrealdb::Surreal;
use surrealdb::engine::local::{Db, Mem, RocksDb};

const NAMESPACE: &str = "cafeteria";
const DATABASE: &str = "cafeteria";

/// Database service — owns the embedded SurrealDB connection
#[derive(Clone)]
pub struct DbService {
    db: Surreal<Db>,
}

impl DbService {
    /// Open (or create) the on-disk database under `data_dir`
    pub async fn new(data_dir: &str) -> AppResult<Self> {
        let path = std::path::Path::new(data_dir).join("cafeteria.db");
        let db: Surreal<Db> = Surreal::new::<RocksDb>(path.as_path())
            .await
            .map_err(|e| AppError::database(format!("Failed to open database: {e}")))?;
        db.use_ns(NAMESPACE)
            .use_db(DATABASE)
            .await
            .map_err(|e| AppError::database(format!("Failed to select namespace: {e}")))?;
        tracing::info!(path = %path.display(), "Database connection established");
        Ok(Self { db })
    }

    /// In-memory database (tests / ephemeral deployments)
    pub async fn memory() -> AppResult<Self> {
        let db: Surreal<Db> = Surreal::new::<Mem>(())
            .await
            .map_err(|e| AppError::database(format!("Failed to open in-memory database: {e}")))?;
        db.use_ns(NAMESPACE)
            .use_db(DATABASE)
            .await
            .map_err(|e| AppError::database(format!("Failed to select namespace: {e}")))?;
        Ok(Self { db })
    }

    pub fn db(&self) -> Surreal<Db> {
        self.db.clone()
    }
}
