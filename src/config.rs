use std::env;
use std::fmt::Debug;
use std::str::FromStr;

const DEFAULT_DATABASE_URL: &str = "data/loretta.db";

const DEFAULT_HARDWARE_KEYWORDS: &str = "CPU,GPU,Grafikkarte,Prozessor,Mainboard,RAM,\
Arbeitsspeicher,SSD,Netzteil,Gehäuse,Kühler,AMD,Intel,Nvidia,Ryzen,Radeon,GeForce,RTX,Benchmark";

pub struct Config {}

impl Config {
    pub fn database_url() -> String {
        env::var("DATABASE_URL").unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string())
    }

    pub fn discord_bot_token() -> String {
        env::var("DISCORD_BOT_TOKEN").expect("No DISCORD_BOT_TOKEN environment variable found")
    }

    pub fn database_pool_size() -> u32 {
        Self::parse_var("DATABASE_POOL_SIZE", "5")
    }

    pub fn request_timeout_in_seconds() -> u64 {
        Self::parse_var("REQUEST_TIMEOUT_IN_SECONDS", "30")
    }

    pub fn news_check_interval_in_seconds() -> u64 {
        Self::parse_var("NEWS_CHECK_INTERVAL_IN_SECONDS", "900")
    }

    pub fn hardware_keywords() -> Vec<String> {
        let raw =
            env::var("HARDWARE_KEYWORDS").unwrap_or_else(|_| DEFAULT_HARDWARE_KEYWORDS.to_string());

        raw.split(',')
            .map(|keyword| keyword.trim().to_string())
            .filter(|keyword| !keyword.is_empty())
            .collect()
    }

    fn parse_var<T: FromStr>(name: &str, default_value: &str) -> T
    where
        <T as FromStr>::Err: Debug,
    {
        env::var(name)
            .unwrap_or_else(|_| default_value.to_string())
            .parse()
            .unwrap_or_else(|_| panic!("{} environment variable should parse to an integer", name))
    }
}
