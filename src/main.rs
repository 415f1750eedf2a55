use dotenv::dotenv;
use loretta::bot::discord_client::Api;
use loretta::db;
use loretta::sync::source::NewsSource;
use loretta::sync::watcher::NewsWatcher;
use loretta::Config;

#[tokio::main]
async fn main() {
    dotenv().ok();
    env_logger::init();

    let pool = db::create_connection_pool(&Config::database_url(), Config::database_pool_size());

    {
        let mut connection = pool.get().expect("Failed to check out a database connection");
        db::setup_database(&mut connection).expect("Failed to set up the database schema");
    }

    let api = Api::new();

    let computerbase = NewsWatcher::new(NewsSource::ComputerBase, pool.clone(), api.clone()).start();
    let pcgh = NewsWatcher::new(NewsSource::Pcgh, pool.clone(), api).start();

    log::info!("Started news watchers");

    match tokio::signal::ctrl_c().await {
        Ok(()) => log::info!("Shutting down news watchers"),
        Err(error) => log::error!("Failed to listen for the shutdown signal: {:?}", error),
    }

    computerbase.shutdown().await;
    pcgh.shutdown().await;
}
