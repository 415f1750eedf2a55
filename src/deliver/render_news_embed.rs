use crate::sync::reader::FetchedFeedItem;
use crate::sync::source::{NewsSource, RenderOptions};
use chrono::{DateTime, Utc};
use htmlescape::decode_html;
use once_cell::sync::Lazy;
use regex::Regex;
use typed_builder::TypedBuilder as Builder;

const DESCRIPTION_LIMIT: usize = 200;
const ELLIPSIS: &str = "...";

static IMG_SRC_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"(?i)<img\s+[^>]*src=["']([^"']+)["']"#).unwrap());
static HTML_TAG_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]+>").unwrap());

/// Platform-neutral rendering of one news entry. The Discord client turns
/// this into an embed; tests inspect it directly.
#[derive(Builder, Debug, Clone, Eq, PartialEq)]
pub struct RenderedNewsItem {
    #[builder(setter(into))]
    pub title: String,
    #[builder(setter(into))]
    pub link: String,
    pub color: u32,
    #[builder(setter(into), default)]
    pub thumbnail_url: Option<String>,
    #[builder(setter(into), default)]
    pub description: Option<String>,
    #[builder(default)]
    pub published_at: Option<DateTime<Utc>>,
    #[builder(setter(into), default)]
    pub category: Option<String>,
    #[builder(setter(into))]
    pub footer_text: String,
    #[builder(setter(into))]
    pub footer_icon_url: String,
}

pub fn render(
    entry: &FetchedFeedItem,
    source: NewsSource,
    options: &RenderOptions,
) -> RenderedNewsItem {
    let thumbnail_url = if options.include_thumbnail {
        find_thumbnail(entry)
    } else {
        None
    };

    let description = if options.include_description {
        entry.description.as_deref().and_then(clean_description)
    } else {
        None
    };

    let category = if options.include_category {
        entry.categories.first().cloned()
    } else {
        None
    };

    RenderedNewsItem::builder()
        .title(entry.title.clone())
        .link(entry.link.clone())
        .color(source.color())
        .thumbnail_url(thumbnail_url)
        .description(description)
        .published_at(entry.publication_date)
        .category(category)
        .footer_text(source.footer_text())
        .footer_icon_url(source.footer_icon_url())
        .build()
}

/// An image enclosure wins over an `<img>` tag scraped out of the summary.
fn find_thumbnail(entry: &FetchedFeedItem) -> Option<String> {
    let enclosure_image = entry.enclosures.iter().find(|enclosure| {
        enclosure
            .mime_type
            .as_deref()
            .map_or(false, |mime_type| mime_type.starts_with("image/"))
    });

    if let Some(enclosure) = enclosure_image {
        return Some(enclosure.url.clone());
    }

    entry.description.as_deref().and_then(extract_image_url)
}

fn extract_image_url(html: &str) -> Option<String> {
    IMG_SRC_REGEX
        .captures(html)
        .map(|captures| captures[1].to_string())
}

fn clean_description(html: &str) -> Option<String> {
    let stripped = HTML_TAG_REGEX.replace_all(html, "");
    let decoded = decode_html(&stripped).unwrap_or_else(|_| stripped.to_string());
    let trimmed = decoded.trim();

    if trimmed.is_empty() {
        return None;
    }

    Some(truncate(trimmed, DESCRIPTION_LIMIT))
}

fn truncate(text: &str, limit: usize) -> String {
    if text.chars().count() > limit {
        let mut truncated = text.chars().take(limit).collect::<String>();
        truncated.push_str(ELLIPSIS);

        truncated
    } else {
        text.to_string()
    }
}
