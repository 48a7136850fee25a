//! Schema migrations for the blog database.
//!
//! Only table creation lives here; the server runs [`Migrator`] at startup
//! when `RUN_MIGRATIONS` is enabled, and tests run it against SQLite.

pub use sea_orm_migration::prelude::*;

mod m20241018_000001_create_blog_tables;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![Box::new(m20241018_000001_create_blog_tables::Migration)]
    }
}
