use crate::sync::reader::{
    FeedReaderError, FetchedEnclosure, FetchedFeed, FetchedFeedItem, ReadFeed,
};
use atom_syndication::{Entry, Feed as AtomFeed, FixedDateTime};
use chrono::{DateTime, Utc};

pub struct AtomReader {
    pub url: String,
}

impl ReadFeed for AtomReader {
    fn read_from_bytes(&self, data: &[u8]) -> Result<FetchedFeed, FeedReaderError> {
        match AtomFeed::read_from(data) {
            Ok(atom_feed) => Ok(FetchedFeed::from(atom_feed)),
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

impl From<AtomFeed> for FetchedFeed {
    fn from(feed: AtomFeed) -> Self {
        let mut items = feed
            .entries()
            .iter()
            .filter(|entry| entry.links().first().is_some())
            .map(|entry| FetchedFeedItem {
                title: entry.title().to_string(),
                description: entry.summary().map(|summary| summary.to_string()),
                link: entry.links().first().unwrap().href().to_string(),
                guid: Some(entry.id().to_string()),
                publication_date: parse_time(entry.published(), entry.updated()),
                enclosures: parse_enclosures(entry),
                categories: entry
                    .categories()
                    .iter()
                    .map(|category| category.term().to_string())
                    .collect(),
            })
            .collect::<Vec<FetchedFeedItem>>();

        items.dedup_by(|a, b| a.link == b.link && a.title == b.title);

        FetchedFeed {
            title: feed.title().to_string(),
            link: feed
                .links()
                .first()
                .map_or_else(|| "".to_string(), |link| link.href().to_string()),
            description: feed
                .subtitle()
                .map_or_else(|| "".to_string(), |subtitle| subtitle.to_string()),
            items,
        }
    }
}

fn parse_enclosures(entry: &Entry) -> Vec<FetchedEnclosure> {
    entry
        .links()
        .iter()
        .filter(|link| link.rel() == "enclosure")
        .map(|link| FetchedEnclosure {
            url: link.href().to_string(),
            mime_type: link.mime_type().map(|mime_type| mime_type.to_string()),
        })
        .collect()
}

fn parse_time(
    published: Option<&FixedDateTime>,
    updated: &FixedDateTime,
) -> Option<DateTime<Utc>> {
    let base_date = match published {
        None => updated,
        Some(date_time) => date_time,
    };

    Some((*base_date).into())
}
