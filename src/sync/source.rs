use crate::sync::reader::FetchedFeedItem;

/// A monitored news site. Each source carries the fixed facts the pipeline
/// needs: where to fetch, how to build the dedup identity, and how the
/// resulting embed is branded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NewsSource {
    ComputerBase,
    Pcgh,
}

#[derive(Debug, Clone, Copy)]
pub struct RenderOptions {
    pub include_description: bool,
    pub include_thumbnail: bool,
    pub include_category: bool,
}

impl NewsSource {
    pub fn name(&self) -> &'static str {
        match self {
            NewsSource::ComputerBase => "ComputerBase",
            NewsSource::Pcgh => "PC Games Hardware",
        }
    }

    pub fn feed_urls(&self) -> &'static [&'static str] {
        match self {
            NewsSource::ComputerBase => &["https://www.computerbase.de/rss/artikel.xml"],
            NewsSource::Pcgh => &[
                "https://www.pcgameshardware.de/feed.cfm?menu_alias=Test/",
                "https://www.pcgameshardware.de/feed.cfm",
            ],
        }
    }

    pub fn feed_type(&self) -> &'static str {
        match self {
            NewsSource::ComputerBase => "rss",
            NewsSource::Pcgh => "rss",
        }
    }

    /// The per-source prefix keeps identical native ids from two sites from
    /// colliding in the shared dedup table.
    pub fn guid_prefix(&self) -> &'static str {
        match self {
            NewsSource::ComputerBase => "cb_news_",
            NewsSource::Pcgh => "pcgh_",
        }
    }

    pub fn color(&self) -> u32 {
        match self {
            NewsSource::ComputerBase => 0x3498DB,
            NewsSource::Pcgh => 0x206694,
        }
    }

    pub fn footer_text(&self) -> &'static str {
        match self {
            NewsSource::ComputerBase => "ComputerBase News • Nachrichten",
            NewsSource::Pcgh => "PC Games Hardware • Nachrichten",
        }
    }

    pub fn footer_icon_url(&self) -> &'static str {
        match self {
            NewsSource::ComputerBase => {
                "https://github.com/stuoningur/loretta/blob/master/data/icons/others/computerbase.png?raw=true"
            }
            NewsSource::Pcgh => {
                "https://github.com/stuoningur/loretta/blob/master/data/icons/others/pcgh.png?raw=true"
            }
        }
    }

    pub fn render_options(&self) -> RenderOptions {
        RenderOptions {
            include_description: true,
            include_thumbnail: true,
            include_category: false,
        }
    }

    /// The text the keyword filter runs against. Kept per source so a feed
    /// whose summaries are useless can switch to tags instead.
    pub fn search_text(&self, item: &FetchedFeedItem) -> String {
        match item.description.as_deref() {
            Some(description) => format!("{} {}", item.title, description),
            None => item.title.clone(),
        }
    }

    pub fn entry_guid(&self, item: &FetchedFeedItem) -> String {
        let native_id = item
            .guid
            .as_deref()
            .filter(|guid| !guid.is_empty())
            .unwrap_or(&item.link);

        format!("{}{}", self.guid_prefix(), native_id)
    }
}
