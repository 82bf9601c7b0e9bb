use crate::{
    cli::{commands::database, globals::GlobalArgs, telemetry},
    storage::postgres::PgStore,
};
use anyhow::Result;
use tracing::info;

#[derive(Debug)]
pub struct Args {
    pub database: database::Options,
}

/// Apply pending migrations and exit.
/// # Errors
/// Returns an error if the database is unreachable or a migration fails.
pub async fn execute(args: Args) -> Result<()> {
    let globals = GlobalArgs::new(args.database.username, args.database.password);
    let dsn = globals.database_url(&args.database.dsn)?;

    let store = PgStore::connect(&dsn, 1).await?;
    let result = store.migrate().await;

    if result.is_ok() {
        info!("Database migrations applied");
    }

    telemetry::shutdown_tracer();

    result
}
