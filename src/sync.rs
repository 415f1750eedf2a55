pub mod news_check_job;
pub mod reader;
pub mod source;
pub mod watcher;

pub use news_check_job::{CycleSummary, NewsCheckJob};
pub use reader::{FetchedFeed, FetchedFeedItem};
pub use source::NewsSource;
pub use watcher::{NewsWatcher, WatcherHandle};
