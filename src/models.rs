pub mod guild_config;
pub mod posted_entry;

pub use guild_config::GuildConfig;
pub use posted_entry::PostedEntry;
