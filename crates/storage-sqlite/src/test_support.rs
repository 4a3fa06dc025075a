//! Temporary on-disk database for repository tests.

use std::sync::Arc;

use tempfile::TempDir;

use crate::db::{create_pool, init, run_migrations, spawn_writer, DbPool, WriteHandle};

pub struct TestDb {
    // Keeps the directory alive for the lifetime of the pool.
    _dir: TempDir,
    pub pool: Arc<DbPool>,
    pub writer: WriteHandle,
}

impl TestDb {
    /// Must be called from within a Tokio runtime; the writer actor is spawned on it.
    pub fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        let db_path = dir.path().join("fintrack-test.db");
        let db_path = db_path.to_str().unwrap();
        init(db_path).unwrap();
        let pool = create_pool(db_path).unwrap();
        run_migrations(&pool).unwrap();
        let writer = spawn_writer(pool.as_ref().clone());
        Self {
            _dir: dir,
            pool,
            writer,
        }
    }
}
