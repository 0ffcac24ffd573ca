//! Fixtures shared by the integration tests.
#![allow(dead_code)]

use std::path::Path;
use std::sync::Arc;

use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use showroom_cms::db::{DbPool, establish_connection_pool};
use tempfile::{NamedTempFile, TempDir};

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!();

/// SQLite file with every migration applied, removed on drop.
pub struct TestDb {
    _file: NamedTempFile,
    pool: DbPool,
}

impl TestDb {
    pub fn new() -> Self {
        let file = NamedTempFile::new().expect("create database file");
        let path = file.path().to_str().expect("utf-8 temp path");
        let pool = establish_connection_pool(path).expect("open connection pool");
        pool.get()
            .expect("check out connection")
            .run_pending_migrations(MIGRATIONS)
            .expect("apply migrations");
        Self { _file: file, pool }
    }

    pub fn pool(&self) -> DbPool {
        self.pool.clone()
    }
}

/// Media root in a temporary directory.
pub struct TestMedia {
    dir: TempDir,
}

impl TestMedia {
    pub fn new() -> Self {
        Self {
            dir: tempfile::tempdir().expect("create media dir"),
        }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Pipeline writing below [`TestMedia::path`] with CDN invalidation disabled.
    pub fn pipeline(&self) -> showroom_cms::media::MediaPipeline {
        use showroom_cms::media::{LocalMediaStorage, MediaPipeline, NoopInvalidator, Thumbnailer};

        MediaPipeline::new(
            Arc::new(LocalMediaStorage::new(self.dir.path())),
            Thumbnailer::default(),
            Arc::new(NoopInvalidator),
        )
    }
}
