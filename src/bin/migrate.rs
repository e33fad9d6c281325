use anyhow::{Result, anyhow, bail};
use diesel::{Connection, PgConnection};
use diesel_migrations::MigrationHarness;
use subscription_ledger::{
    config::config_loader, infrastructure::postgres::migrations::MIGRATIONS,
};
use tracing::{error, info};

const USAGE: &str = "usage: migrate <up|down|redo>";

fn main() {
    if let Err(error) = run() {
        error!("migrate exited with error: {:?}", error);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    subscription_ledger::init_tracing()?;

    let direction = std::env::args().nth(1).ok_or_else(|| anyhow!(USAGE))?;

    let database_url = config_loader::load_database_url();
    let mut conn = PgConnection::establish(&database_url)?;
    info!("Postgres connection has been established");

    match direction.as_str() {
        "up" => {
            let applied = conn
                .run_pending_migrations(MIGRATIONS)
                .map_err(|err| anyhow!("failed to run pending migrations: {err}"))?;
            if applied.is_empty() {
                info!("migrate: no pending migrations");
            }
            for version in applied {
                info!(%version, "migrate: applied");
            }
        }
        "down" => {
            let reverted = conn
                .revert_last_migration(MIGRATIONS)
                .map_err(|err| anyhow!("failed to revert last migration: {err}"))?;
            info!(version = %reverted, "migrate: reverted");
        }
        "redo" => {
            let reverted = conn
                .revert_last_migration(MIGRATIONS)
                .map_err(|err| anyhow!("failed to revert last migration: {err}"))?;
            info!(version = %reverted, "migrate: reverted");

            conn.run_pending_migrations(MIGRATIONS)
                .map_err(|err| anyhow!("failed to re-run migrations: {err}"))?;
            info!("migrate: re-applied pending migrations");
        }
        other => bail!("unknown direction `{other}`; {USAGE}"),
    }

    Ok(())
}
