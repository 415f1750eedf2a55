use crate::sync::reader::{
    FeedReaderError, FetchedEnclosure, FetchedFeed, FetchedFeedItem, ReadFeed,
};
use chrono::{DateTime, Utc};
use rss::{Channel, Item};

pub struct RssReader {
    pub url: String,
}

impl ReadFeed for RssReader {
    fn read_from_bytes(&self, data: &[u8]) -> Result<FetchedFeed, FeedReaderError> {
        match Channel::read_from(data) {
            Ok(channel) => Ok(FetchedFeed::from(channel)),
            Err(err) => {
                let msg = format!("{}", err);

                Err(FeedReaderError { msg })
            }
        }
    }

    fn url(&self) -> String {
        self.url.clone()
    }
}

impl From<Channel> for FetchedFeed {
    fn from(channel: Channel) -> Self {
        let mut items = channel
            .items()
            .iter()
            .filter(|item| item.link().is_some())
            .map(|item| FetchedFeedItem {
                title: item
                    .title()
                    .map_or_else(|| "".to_string(), |s| s.to_string()),
                description: item.description().map(|s| s.to_string()),
                link: item.link().unwrap().to_string(),
                guid: item.guid().map(|guid| guid.value().to_string()),
                publication_date: parse_time(item.pub_date()),
                enclosures: parse_enclosures(item),
                categories: item
                    .categories()
                    .iter()
                    .map(|category| category.name().to_string())
                    .collect(),
            })
            .collect::<Vec<FetchedFeedItem>>();

        items.dedup_by(|a, b| a.link == b.link && a.title == b.title);

        FetchedFeed {
            title: channel.title().to_string(),
            link: channel.link().to_string(),
            description: channel.description().to_string(),
            items,
        }
    }
}

fn parse_enclosures(item: &Item) -> Vec<FetchedEnclosure> {
    item.enclosure()
        .map(|enclosure| {
            let mime_type = enclosure.mime_type();

            vec![FetchedEnclosure {
                url: enclosure.url().to_string(),
                mime_type: if mime_type.is_empty() {
                    None
                } else {
                    Some(mime_type.to_string())
                },
            }]
        })
        .unwrap_or_default()
}

fn parse_time(pub_date: Option<&str>) -> Option<DateTime<Utc>> {
    pub_date.and_then(|string| {
        DateTime::parse_from_rfc2822(string)
            .ok()
            .map(|date| date.into())
    })
}

#[cfg(test)]
mod tests {
    use super::FetchedFeed;
    use rss::Channel;
    use std::fs;
    use std::str::FromStr;

    #[test]
    fn it_converts_an_rss_channel_to_a_fetched_feed() {
        let xml_feed = fs::read_to_string("./tests/support/rss_feed_example.xml").unwrap();
        let channel = Channel::from_str(&xml_feed).unwrap();

        let fetched_feed: FetchedFeed = channel.into();

        assert_eq!(fetched_feed.title, "ComputerBase".to_string());
        assert_eq!(fetched_feed.items.len(), 3);

        let newest = &fetched_feed.items[0];
        assert_eq!(newest.title, "Neue GeForce RTX 5090 vorgestellt");
        assert_eq!(
            newest.link,
            "https://www.computerbase.de/news/grafikkarten/rtx-5090"
        );
        assert_eq!(newest.guid, Some("cb-10001".to_string()));
        assert!(newest.publication_date.is_some());
        assert_eq!(newest.categories, vec!["Grafikkarten".to_string()]);

        assert_eq!(newest.enclosures.len(), 1);
        assert_eq!(
            newest.enclosures[0].url,
            "https://pics.computerbase.de/rtx-5090-teaser.jpg"
        );
        assert_eq!(newest.enclosures[0].mime_type, Some("image/jpeg".to_string()));
    }

    #[test]
    fn it_keeps_items_without_a_guid() {
        let xml_feed = fs::read_to_string("./tests/support/rss_feed_example.xml").unwrap();
        let channel = Channel::from_str(&xml_feed).unwrap();

        let fetched_feed: FetchedFeed = channel.into();
        let oldest = fetched_feed.items.last().unwrap();

        assert_eq!(oldest.guid, None);
        assert_eq!(
            oldest.link,
            "https://www.computerbase.de/news/wirtschaft/quartalszahlen"
        );
    }
}
