pub mod atom;
pub mod rss;

use chrono::{DateTime, Utc};
use isahc::AsyncReadResponseExt;
use isahc::HttpClient;

#[derive(Debug)]
pub struct FeedReaderError {
    pub msg: String,
}

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct FetchedFeedItem {
    pub title: String,
    pub description: Option<String>,
    pub link: String,
    pub guid: Option<String>,
    pub publication_date: Option<DateTime<Utc>>,
    pub enclosures: Vec<FetchedEnclosure>,
    pub categories: Vec<String>,
}

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct FetchedEnclosure {
    pub url: String,
    pub mime_type: Option<String>,
}

#[derive(Debug, Eq, PartialEq)]
pub struct FetchedFeed {
    pub title: String,
    pub link: String,
    pub description: String,
    pub items: Vec<FetchedFeedItem>,
}

pub trait ReadFeed {
    fn read_from_bytes(&self, data: &[u8]) -> Result<FetchedFeed, FeedReaderError>;

    fn url(&self) -> String;
}

/// Fetches a feed document. A non-success status is a fetch failure like
/// any transport error; the caller decides what a failed feed means for
/// the rest of its cycle.
pub async fn read_url(client: &HttpClient, url: &str) -> Result<String, FeedReaderError> {
    let mut response = match client.get_async(url).await {
        Ok(response) => response,
        Err(error) => {
            let msg = format!("{:?}", error);

            return Err(FeedReaderError { msg });
        }
    };

    if !response.status().is_success() {
        let msg = format!("HTTP {}", response.status());

        return Err(FeedReaderError { msg });
    }

    match response.text().await {
        Ok(body) => Ok(body),
        Err(error) => {
            let msg = format!("{:?}", error);

            Err(FeedReaderError { msg })
        }
    }
}
