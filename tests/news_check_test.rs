use async_trait::async_trait;
use diesel::Connection;
use diesel::sqlite::SqliteConnection;
use loretta::bot::discord_client::{DeliveryError, SendNewsItem};
use loretta::db;
use loretta::db::{guild_configs, posted_entries};
use loretta::deliver::RenderedNewsItem;
use loretta::http_client;
use loretta::keywords::KeywordMatcher;
use loretta::sync::{NewsCheckJob, NewsSource};
use mockito::mock;
use std::collections::HashSet;
use std::fs;
use std::sync::Mutex;

#[derive(Default)]
struct RecordingApi {
    sent: Mutex<Vec<(i64, RenderedNewsItem)>>,
}

#[async_trait]
impl SendNewsItem for RecordingApi {
    async fn send_news_item(
        &self,
        channel_id: i64,
        item: &RenderedNewsItem,
    ) -> Result<(), DeliveryError> {
        self.sent.lock().unwrap().push((channel_id, item.clone()));

        Ok(())
    }
}

fn establish_connection() -> SqliteConnection {
    let mut connection = SqliteConnection::establish(":memory:").unwrap();
    db::setup_database(&mut connection).unwrap();

    connection
}

fn hardware_matcher() -> KeywordMatcher {
    KeywordMatcher::new(&["GeForce".to_string(), "Arbeitsspeicher".to_string()])
}

fn news_check_job(path: &str) -> NewsCheckJob {
    let feed_url = format!("{}{}", mockito::server_url(), path);

    NewsCheckJob::new(NewsSource::ComputerBase, vec![feed_url], hardware_matcher())
}

#[tokio::test(start_paused = true)]
async fn it_delivers_matching_entries_oldest_first() {
    let response = fs::read_to_string("./tests/support/rss_feed_example.xml").unwrap();
    let path = "/rss/artikel.xml";
    let _m = mock("GET", path)
        .with_status(200)
        .with_body(response)
        .create();

    let mut connection = establish_connection();
    guild_configs::set_news_channel(&mut connection, 100, Some(111)).unwrap();
    guild_configs::set_news_channel(&mut connection, 200, Some(222)).unwrap();

    let job = news_check_job(path);
    let api = RecordingApi::default();
    let http_client = http_client::build();

    let summary = job
        .execute(&mut connection, &http_client, &api)
        .await
        .unwrap();

    assert_eq!(summary.delivered, 2);
    assert_eq!(summary.channel_ids.len(), 2);

    {
        let sent = api.sent.lock().unwrap();

        // Two matching entries, fanned out to both channels each, the
        // older entry first so the newest ends up last in the channel.
        assert_eq!(sent.len(), 4);
        assert_eq!(sent[0].1.title, "Arbeitsspeicher wird wieder günstiger");
        assert_eq!(sent[1].1.title, "Arbeitsspeicher wird wieder günstiger");
        assert_eq!(sent[2].1.title, "Neue GeForce RTX 5090 vorgestellt");
        assert_eq!(sent[3].1.title, "Neue GeForce RTX 5090 vorgestellt");

        let channels: HashSet<i64> = sent.iter().take(2).map(|(channel, _)| *channel).collect();
        assert_eq!(channels, HashSet::from([111, 222]));

        // Enclosure image beats the inline img tag.
        assert_eq!(
            sent[2].1.thumbnail_url,
            Some("https://pics.computerbase.de/rtx-5090-teaser.jpg".to_string())
        );
    }

    assert!(posted_entries::find(&mut connection, "cb_news_cb-10001").is_some());
    assert!(posted_entries::find(&mut connection, "cb_news_cb-10002").is_some());

    // The entry without keyword matches is not recorded.
    assert_eq!(posted_entries::count(&mut connection).unwrap(), 2);
}

#[tokio::test(start_paused = true)]
async fn it_delivers_nothing_on_a_second_run_with_the_same_content() {
    let response = fs::read_to_string("./tests/support/rss_feed_example.xml").unwrap();
    let path = "/rss/artikel-repeat.xml";
    let _m = mock("GET", path)
        .with_status(200)
        .with_body(response)
        .expect(2)
        .create();

    let mut connection = establish_connection();
    guild_configs::set_news_channel(&mut connection, 100, Some(111)).unwrap();

    let job = news_check_job(path);
    let api = RecordingApi::default();
    let http_client = http_client::build();

    let first = job
        .execute(&mut connection, &http_client, &api)
        .await
        .unwrap();
    let second = job
        .execute(&mut connection, &http_client, &api)
        .await
        .unwrap();

    assert_eq!(first.delivered, 2);
    assert_eq!(second.delivered, 0);
    assert_eq!(api.sent.lock().unwrap().len(), 2);
    assert_eq!(posted_entries::count(&mut connection).unwrap(), 2);
}

#[tokio::test(start_paused = true)]
async fn it_skips_the_cycle_without_fetching_when_no_channel_is_configured() {
    let path = "/rss/artikel-unwatched.xml";
    let m = mock("GET", path).with_status(200).expect(0).create();

    let mut connection = establish_connection();

    let job = news_check_job(path);
    let api = RecordingApi::default();
    let http_client = http_client::build();

    let summary = job
        .execute(&mut connection, &http_client, &api)
        .await
        .unwrap();

    assert_eq!(summary.delivered, 0);
    assert!(api.sent.lock().unwrap().is_empty());

    m.assert();
}

#[tokio::test(start_paused = true)]
async fn it_treats_a_bad_status_as_an_empty_feed() {
    let path = "/rss/artikel-broken.xml";
    let _m = mock("GET", path).with_status(500).create();

    let mut connection = establish_connection();
    guild_configs::set_news_channel(&mut connection, 100, Some(111)).unwrap();

    let job = news_check_job(path);
    let api = RecordingApi::default();
    let http_client = http_client::build();

    let summary = job
        .execute(&mut connection, &http_client, &api)
        .await
        .unwrap();

    assert_eq!(summary.delivered, 0);
    assert!(api.sent.lock().unwrap().is_empty());
    assert_eq!(posted_entries::count(&mut connection).unwrap(), 0);
}
