#[macro_use]
extern crate diesel;

pub mod bot;
pub mod config;
pub mod db;
pub mod deliver;
pub mod http_client;
pub mod keywords;
pub mod models;
pub mod schema;
pub mod sync;

pub use config::Config;
