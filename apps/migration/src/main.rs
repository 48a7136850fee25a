//! Migration CLI for the blog schema.
//!
//! Targets `DATABASE_URL`, e.g. `migration up`, `migration status`, `migration fresh`.

use migration::Migrator;
use sea_orm_migration::cli;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,sqlx=warn"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    tracing::info!("Running blog schema migrations");
    cli::run_cli(Migrator).await;
}
