//! # CLI Migration Command
//!
//! Applies, lists or rolls back the schema migrations.

use error::Result;
use migration::{DatabaseConfig, Migrator, MigratorTrait as _};
use sea_orm::DatabaseConnection;
use tracing::info;

use crate::commands::MigrateArgs;

/// Runs the migrate subcommand against the configured database.
pub async fn migrate(config: &DatabaseConfig, args: &MigrateArgs) -> Result<()> {
    let db = config.connect().await?;

    if args.dry_run {
        return report_pending(&db).await;
    }

    if args.rollback {
        info!(target: "migrate", steps = args.steps, "Rolling back migrations...");
        Migrator::down(&db, Some(args.steps)).await?;
        info!(target: "migrate", steps = args.steps, "Rollback completed");
        return Ok(());
    }

    let pending = Migrator::get_pending_migrations(&db).await?.len();
    if pending == 0 {
        info!(target: "migrate", "Schema is up to date");
        return Ok(());
    }
    Migrator::up(&db, None).await?;
    info!(target: "migrate", applied = pending, "Migrations applied");
    Ok(())
}

async fn report_pending(db: &DatabaseConnection) -> Result<()> {
    let pending = Migrator::get_pending_migrations(db).await?;
    if pending.is_empty() {
        info!(target: "migrate", "No pending migrations");
    }
    for m in &pending {
        info!(target: "migrate", migration = %m.name(), "Would apply");
    }
    Ok(())
}
