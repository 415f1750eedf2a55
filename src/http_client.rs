use crate::config::Config;
use isahc::config::RedirectPolicy;
use isahc::prelude::*;
use isahc::HttpClient;
use std::time::Duration;

/// Builds the HTTP client a news watcher owns for its lifetime. Every
/// request shares one bounded total timeout so a stalling feed can never
/// hang a check cycle.
pub fn build() -> HttpClient {
    HttpClient::builder()
        .redirect_policy(RedirectPolicy::Limit(10))
        .timeout(request_timeout_seconds())
        .build()
        .unwrap()
}

fn request_timeout_seconds() -> Duration {
    let secs = Config::request_timeout_in_seconds();

    Duration::from_secs(secs)
}
