use crate::bot::discord_client::SendNewsItem;
use crate::config::Config;
use crate::db::Pool;
use crate::http_client;
use crate::keywords::KeywordMatcher;
use crate::sync::news_check_job::NewsCheckJob;
use crate::sync::source::NewsSource;
use log::error;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

enum WatcherMessage {
    Shutdown,
}

/// Periodic runner for one news source. Owns its job, pool handle, HTTP
/// client and delivery API; the skip tick behavior guarantees a slow cycle
/// is never overlapped by the next one.
pub struct NewsWatcher<A> {
    source: NewsSource,
    job: NewsCheckJob,
    pool: Pool,
    api: A,
    http_client: isahc::HttpClient,
    check_interval: Duration,
}

impl<A: SendNewsItem + 'static> NewsWatcher<A> {
    pub fn new(source: NewsSource, pool: Pool, api: A) -> Self {
        let feed_urls = source
            .feed_urls()
            .iter()
            .map(|url| url.to_string())
            .collect();
        let matcher = KeywordMatcher::new(&Config::hardware_keywords());

        NewsWatcher {
            source,
            job: NewsCheckJob::new(source, feed_urls, matcher),
            pool,
            api,
            http_client: http_client::build(),
            check_interval: Duration::from_secs(Config::news_check_interval_in_seconds()),
        }
    }

    pub fn with_check_interval(mut self, check_interval: Duration) -> Self {
        self.check_interval = check_interval;

        self
    }

    pub fn start(self) -> WatcherHandle {
        let (sender, mut receiver) = mpsc::channel(8);

        let join_handle = tokio::spawn(async move {
            let mut timer = tokio::time::interval(self.check_interval);
            timer.set_missed_tick_behavior(MissedTickBehavior::Skip);

            loop {
                tokio::select! {
                    _ = timer.tick() => self.check().await,
                    message = receiver.recv() => match message {
                        Some(WatcherMessage::Shutdown) | None => {
                            log::info!("{} news watcher stopped", self.source.name());

                            break;
                        }
                    },
                }
            }
        });

        WatcherHandle {
            sender,
            join_handle,
        }
    }

    async fn check(&self) {
        let mut connection = match self.pool.get() {
            Ok(connection) => connection,
            Err(err) => {
                error!(
                    "Failed to check out a connection for the {} news check: {:?}",
                    self.source.name(),
                    err
                );

                return;
            }
        };

        if let Err(err) = self
            .job
            .execute(&mut connection, &self.http_client, &self.api)
            .await
        {
            error!("{} news check failed: {:?}", self.source.name(), err);
        }
    }
}

/// Handle for stopping a running watcher. Scheduling stops immediately; an
/// in-flight cycle finishes before the task joins.
pub struct WatcherHandle {
    sender: mpsc::Sender<WatcherMessage>,
    join_handle: JoinHandle<()>,
}

impl WatcherHandle {
    pub async fn shutdown(self) {
        let _ = self.sender.send(WatcherMessage::Shutdown).await;
        let _ = self.join_handle.await;
    }
}

#[cfg(test)]
mod tests {
    use super::NewsWatcher;
    use crate::bot::discord_client::{DeliveryError, SendNewsItem};
    use crate::db;
    use crate::deliver::RenderedNewsItem;
    use crate::sync::source::NewsSource;
    use async_trait::async_trait;
    use std::time::Duration;

    struct NullApi;

    #[async_trait]
    impl SendNewsItem for NullApi {
        async fn send_news_item(
            &self,
            _channel_id: i64,
            _item: &RenderedNewsItem,
        ) -> Result<(), DeliveryError> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn it_stops_cleanly_on_shutdown() {
        let pool = db::create_connection_pool(":memory:", 1);

        let handle = NewsWatcher::new(NewsSource::ComputerBase, pool, NullApi)
            .with_check_interval(Duration::from_secs(3600))
            .start();

        handle.shutdown().await;
    }
}
