pub use sea_orm_migration::prelude::*;
use sea_orm_migration::sea_orm::Statement;
pub use sea_orm_migration::sea_orm::{ConnectionTrait, DatabaseConnection};

mod m20250301_000001_users; // keep filename + module name in sync

pub use m20250301_000001_users::{USERS_EMAIL_UNIQUE, USERS_SUB_UNIQUE};

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![Box::new(m20250301_000001_users::Migration)]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MigrationCommand {
    Up,
    Down,
    Fresh,
    Reset,
    Refresh,
    Status,
}

/// Run a migration command against an already-open connection.
/// Invoked by the migration CLI.
pub async fn migrate(db: &DatabaseConnection, command: MigrationCommand) -> Result<(), DbErr> {
    let name_before = current_database(db).await?;
    let applied_before = count_applied_migrations(db).await.unwrap_or(0);

    tracing::info!(
        command = ?command,
        database = %name_before,
        defined = Migrator::migrations().len(),
        applied = applied_before,
        "migration starting"
    );

    let result = match command {
        MigrationCommand::Up => Migrator::up(db, None).await,
        MigrationCommand::Down => Migrator::down(db, None).await,
        MigrationCommand::Fresh => Migrator::fresh(db).await,
        MigrationCommand::Reset => Migrator::reset(db).await,
        MigrationCommand::Refresh => Migrator::refresh(db).await,
        MigrationCommand::Status => Migrator::status(db).await,
    };

    match result {
        Ok(()) => {
            if command != MigrationCommand::Status {
                let applied_after = count_applied_migrations(db).await.unwrap_or(0);
                tracing::info!(command = ?command, applied = applied_after, "migration finished");
            }
            Ok(())
        }
        Err(e) => {
            tracing::error!(command = ?command, error = %e, "migration failed");
            Err(e)
        }
    }
}

async fn current_database(db: &DatabaseConnection) -> Result<String, DbErr> {
    let stmt = Statement::from_string(
        db.get_database_backend(),
        String::from("select current_database() as name"),
    );
    match db.query_one(stmt).await? {
        Some(row) => row.try_get("", "name"),
        None => Ok("<unknown>".to_string()),
    }
}

/// Count the number of migrations that have been applied to the database.
/// Returns 0 if the migration table doesn't exist yet.
pub async fn count_applied_migrations(db: &DatabaseConnection) -> Result<usize, DbErr> {
    match Migrator::get_applied_migrations(db).await {
        Ok(migrations) => Ok(migrations.len()),
        Err(DbErr::Exec(_)) => Ok(0),
        Err(e) => Err(e),
    }
}
