use crate::bot::discord_client::SendNewsItem;
use crate::db::{guild_configs, posted_entries};
use crate::deliver;
use crate::keywords::KeywordMatcher;
use crate::sync::reader;
use crate::sync::reader::atom::AtomReader;
use crate::sync::reader::rss::RssReader;
use crate::sync::reader::{FeedReaderError, FetchedFeed, FetchedFeedItem, ReadFeed};
use crate::sync::source::NewsSource;
use diesel::result::Error as DieselError;
use diesel::sqlite::SqliteConnection;
use isahc::HttpClient;
use log::error;
use std::time::Duration;

const PACING_DELAY: Duration = Duration::from_secs(1);

/// One check cycle for one news source: fetch every configured feed,
/// filter by keywords, deliver what has not been posted yet, record it.
pub struct NewsCheckJob {
    source: NewsSource,
    feed_urls: Vec<String>,
    matcher: KeywordMatcher,
}

#[derive(Debug, PartialEq, Eq)]
pub enum NewsCheckError {
    DbError { msg: String },
}

impl From<DieselError> for NewsCheckError {
    fn from(error: DieselError) -> Self {
        let msg = format!("{:?}", error);

        NewsCheckError::DbError { msg }
    }
}

#[derive(Debug, Default, PartialEq, Eq)]
pub struct CycleSummary {
    pub delivered: usize,
    pub channel_ids: Vec<i64>,
}

struct TaggedEntry {
    feed_index: usize,
    ordinal: usize,
    item: FetchedFeedItem,
}

impl NewsCheckJob {
    pub fn new(source: NewsSource, feed_urls: Vec<String>, matcher: KeywordMatcher) -> Self {
        NewsCheckJob {
            source,
            feed_urls,
            matcher,
        }
    }

    pub async fn execute(
        &self,
        connection: &mut SqliteConnection,
        http_client: &HttpClient,
        api: &impl SendNewsItem,
    ) -> Result<CycleSummary, NewsCheckError> {
        let channel_ids = guild_configs::news_channels(connection)?;

        if channel_ids.is_empty() {
            log::debug!("No news channels configured for {} news", self.source.name());

            return Ok(CycleSummary::default());
        }

        let entries = self.collect_entries(http_client).await;

        if entries.is_empty() {
            log::debug!("No entries found in the {} feeds", self.source.name());

            return Ok(CycleSummary {
                delivered: 0,
                channel_ids,
            });
        }

        let mut delivered = 0;

        for entry in &entries {
            if self.process_entry(connection, api, &channel_ids, &entry.item).await {
                delivered += 1;

                // Crude self-imposed rate limit between posts.
                tokio::time::sleep(PACING_DELAY).await;
            }
        }

        if delivered > 0 {
            log::info!(
                "{} new {} items sent to {} news channels: {:?}",
                delivered,
                self.source.name(),
                channel_ids.len(),
                channel_ids
            );
        }

        Ok(CycleSummary {
            delivered,
            channel_ids,
        })
    }

    /// Fetches every configured feed independently and merges the entries.
    /// Feeds list newest first, so entries are reordered by descending
    /// in-feed ordinal: the oldest is processed first and the newest lands
    /// last in the destination channels.
    async fn collect_entries(&self, http_client: &HttpClient) -> Vec<TaggedEntry> {
        let mut entries: Vec<TaggedEntry> = Vec::new();

        for (feed_index, url) in self.feed_urls.iter().enumerate() {
            match self.fetch_feed(http_client, url).await {
                Ok(fetched_feed) => {
                    if fetched_feed.items.is_empty() {
                        log::warn!("No entries in {} feed {}", self.source.name(), url);

                        continue;
                    }

                    log::debug!(
                        "{} entries in {} feed #{}",
                        fetched_feed.items.len(),
                        self.source.name(),
                        feed_index
                    );

                    for (ordinal, item) in fetched_feed.items.into_iter().enumerate() {
                        entries.push(TaggedEntry {
                            feed_index,
                            ordinal,
                            item,
                        });
                    }
                }
                Err(err) => {
                    error!(
                        "Failed to fetch {} feed {}: {:?}",
                        self.source.name(),
                        url,
                        err
                    );

                    continue;
                }
            }
        }

        entries.sort_by(|a, b| {
            b.ordinal
                .cmp(&a.ordinal)
                .then(a.feed_index.cmp(&b.feed_index))
        });

        entries
    }

    async fn fetch_feed(
        &self,
        http_client: &HttpClient,
        url: &str,
    ) -> Result<FetchedFeed, FeedReaderError> {
        let body = reader::read_url(http_client, url).await?;

        self.reader_for(url).read_from_bytes(body.as_bytes())
    }

    fn reader_for(&self, url: &str) -> Box<dyn ReadFeed> {
        match self.source.feed_type() {
            "atom" => Box::new(AtomReader {
                url: url.to_string(),
            }),
            &_ => Box::new(RssReader {
                url: url.to_string(),
            }),
        }
    }

    /// Returns true when the entry was new, relevant and fanned out. A
    /// keyword miss is skipped without recording it, so a later edit of the
    /// same entry can still match.
    async fn process_entry(
        &self,
        connection: &mut SqliteConnection,
        api: &impl SendNewsItem,
        channel_ids: &[i64],
        item: &FetchedFeedItem,
    ) -> bool {
        let entry_guid = self.source.entry_guid(item);

        if self.is_posted(connection, &entry_guid) {
            return false;
        }

        let search_text = self.source.search_text(item);

        if self.matcher.matches(&search_text).is_empty() {
            return false;
        }

        let rendered = deliver::render(item, self.source, &self.source.render_options());

        deliver::fan_out(api, &rendered, channel_ids).await;

        if let Err(err) = posted_entries::mark_posted(connection, &entry_guid, &item.title, &item.link)
        {
            error!(
                "Failed to mark {} entry {} as posted: {:?}",
                self.source.name(),
                entry_guid,
                err
            );
        }

        true
    }

    /// Read failures count as already posted. Spamming every destination on
    /// a transient storage error is worse than missing one item.
    fn is_posted(&self, connection: &mut SqliteConnection, entry_guid: &str) -> bool {
        match posted_entries::is_posted(connection, entry_guid) {
            Ok(posted) => posted,
            Err(err) => {
                error!(
                    "Failed to check {} entry {}: {:?}",
                    self.source.name(),
                    entry_guid,
                    err
                );

                true
            }
        }
    }
}
