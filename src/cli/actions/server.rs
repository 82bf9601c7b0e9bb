use crate::{
    api,
    cli::{commands::database, globals::GlobalArgs, telemetry},
    storage::postgres::PgStore,
};
use anyhow::Result;
use std::sync::Arc;
use tracing::{debug, info};

#[derive(Debug)]
pub struct Args {
    pub port: u16,
    pub migrate: bool,
    pub database: database::Options,
}

/// Execute the server action.
/// # Errors
/// Returns an error if the database is unreachable, migrations fail, or the server fails to start.
pub async fn execute(args: Args) -> Result<()> {
    let globals = GlobalArgs::new(args.database.username, args.database.password);

    debug!("Global args: {:?}", globals);

    let dsn = globals.database_url(&args.database.dsn)?;

    let store = PgStore::connect(&dsn, args.database.max_connections).await?;

    if args.migrate {
        store.migrate().await?;
        info!("Database migrations applied");
    }

    let result = api::new(args.port, Arc::new(store)).await;

    telemetry::shutdown_tracer();

    result
}
