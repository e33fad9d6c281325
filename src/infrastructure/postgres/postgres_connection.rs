use std::time::Duration;

use anyhow::{Result, bail};
use diesel::{
    PgConnection,
    connection::SimpleConnection,
    r2d2::{ConnectionManager, CustomizeConnection, Error as R2d2Error, Pool},
};

use crate::config::config_model::Database;

/// Caps every statement run on a pooled connection at `statement_timeout`.
#[derive(Debug)]
struct StatementTimeout {
    statement_timeout: Duration,
}

impl CustomizeConnection<PgConnection, R2d2Error> for StatementTimeout {
    fn on_acquire(&self, conn: &mut PgConnection) -> std::result::Result<(), R2d2Error> {
        conn.batch_execute(&format!(
            "SET statement_timeout = {}",
            self.statement_timeout.as_millis()
        ))
        .map_err(R2d2Error::QueryError)
    }
}

pub type PgPoolSquad = Pool<ConnectionManager<PgConnection>>;

pub fn establish_connection(database: &Database) -> Result<PgPoolSquad> {
    if database.max_connections == 0 || database.call_timeout == 0 {
        bail!("database pool size and call timeout must be greater than zero");
    }

    let call_timeout = Duration::from_secs(database.call_timeout);

    let manager = ConnectionManager::<PgConnection>::new(&database.url);
    let pool = Pool::builder()
        .max_size(database.max_connections)
        .connection_timeout(call_timeout)
        .connection_customizer(Box::new(StatementTimeout {
            statement_timeout: call_timeout,
        }))
        .build(manager)?;
    Ok(pool)
}
