use migration::{count_applied_migrations, Migrator, MigratorTrait};
use sea_orm::{Database, DatabaseConnection};

use crate::config::db::{db_url, DbOwner, DbProfile};
use crate::error::AppError;

/// Open a connection for `profile` as `owner`. Does not run migrations;
/// those are applied by the `migration` binary with owner credentials.
pub async fn connect_db(
    profile: DbProfile,
    owner: DbOwner,
) -> Result<DatabaseConnection, AppError> {
    let database_url = db_url(profile, owner)?;
    let conn = Database::connect(&database_url).await?;
    Ok(conn)
}

/// Warn when the schema lags behind the migrations compiled into this binary.
pub async fn ensure_schema_ready(db: &DatabaseConnection) -> Result<(), AppError> {
    let applied = count_applied_migrations(db).await?;
    let defined = Migrator::migrations().len();

    if applied < defined {
        tracing::warn!(
            applied,
            defined,
            "database schema is behind; run `migration up` with owner credentials"
        );
    }
    Ok(())
}
