pub mod discord_client;

pub use discord_client::Api;
