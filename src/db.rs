use chrono::prelude::*;
use chrono::NaiveDateTime;
use diesel::connection::SimpleConnection;
use diesel::r2d2;
use diesel::sqlite::SqliteConnection;

pub mod guild_configs;
pub mod posted_entries;

pub type Pool = r2d2::Pool<r2d2::ConnectionManager<SqliteConnection>>;

const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS guild_configs (
    guild_id        BIGINT PRIMARY KEY NOT NULL,
    news_channel_id BIGINT,
    created_at      TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP,
    updated_at      TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP
);

CREATE TABLE IF NOT EXISTS posted_rss_entries (
    id         INTEGER PRIMARY KEY AUTOINCREMENT NOT NULL,
    entry_guid TEXT NOT NULL UNIQUE,
    title      TEXT NOT NULL,
    link       TEXT NOT NULL,
    posted_at  TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP
);
";

pub fn create_connection_pool(url: &str, max_size: u32) -> Pool {
    let manager = r2d2::ConnectionManager::<SqliteConnection>::new(url);

    r2d2::Pool::builder().max_size(max_size).build(manager).unwrap()
}

/// Creates the tables this crate owns. Idempotent, runs at every startup.
pub fn setup_database(connection: &mut SqliteConnection) -> diesel::QueryResult<()> {
    connection.batch_execute(SCHEMA)
}

pub fn current_time() -> NaiveDateTime {
    Utc::now().round_subsecs(0).naive_utc()
}

#[cfg(test)]
pub fn establish_in_memory_connection() -> SqliteConnection {
    use diesel::connection::Connection;

    let mut connection = SqliteConnection::establish(":memory:").unwrap();
    setup_database(&mut connection).unwrap();

    connection
}
