use crate::config::Config;
use crate::deliver::render_news_embed::RenderedNewsItem;
use async_trait::async_trait;
use serenity::builder::{CreateEmbed, CreateEmbedFooter, CreateMessage};
use serenity::http::{Http, HttpError};
use serenity::model::id::ChannelId;
use serenity::model::Colour;
use serenity::model::Timestamp;
use std::sync::Arc;

#[derive(Debug)]
pub enum DeliveryError {
    NotFound,
    PermissionDenied,
    Transport { msg: String },
}

/// The delivery seam the pipeline depends on. Production uses the Discord
/// REST client below; tests substitute a recording implementation.
#[async_trait]
pub trait SendNewsItem: Send + Sync {
    async fn send_news_item(
        &self,
        channel_id: i64,
        item: &RenderedNewsItem,
    ) -> Result<(), DeliveryError>;
}

#[derive(Clone)]
pub struct Api {
    http: Arc<Http>,
}

impl Default for Api {
    fn default() -> Self {
        Self::new()
    }
}

impl Api {
    pub fn new() -> Api {
        let token = Config::discord_bot_token();

        Self::with_token(&token)
    }

    pub fn with_token(token: &str) -> Api {
        Api {
            http: Arc::new(Http::new(token)),
        }
    }
}

#[async_trait]
impl SendNewsItem for Api {
    async fn send_news_item(
        &self,
        channel_id: i64,
        item: &RenderedNewsItem,
    ) -> Result<(), DeliveryError> {
        let channel_id = match u64::try_from(channel_id).ok().filter(|id| *id != 0) {
            Some(id) => ChannelId::new(id),
            None => return Err(DeliveryError::NotFound),
        };

        let message = CreateMessage::new().embed(news_embed(item));

        match channel_id.send_message(&self.http, message).await {
            Ok(_) => Ok(()),
            Err(error) => Err(map_error(error)),
        }
    }
}

fn news_embed(item: &RenderedNewsItem) -> CreateEmbed {
    let footer = CreateEmbedFooter::new(item.footer_text.clone())
        .icon_url(item.footer_icon_url.clone());

    let mut embed = CreateEmbed::new()
        .title(item.title.clone())
        .url(item.link.clone())
        .colour(Colour::new(item.color))
        .timestamp(Timestamp::now())
        .footer(footer);

    if let Some(thumbnail_url) = &item.thumbnail_url {
        embed = embed.thumbnail(thumbnail_url.clone());
    }

    if let Some(description) = &item.description {
        embed = embed.field("Beschreibung", description.clone(), false);
    }

    if let Some(published_at) = item.published_at {
        embed = embed.field(
            "Veröffentlicht",
            format!("<t:{}:R>", published_at.timestamp()),
            true,
        );
    }

    if let Some(category) = &item.category {
        embed = embed.field("Kategorie", category.clone(), true);
    }

    embed
}

fn map_error(error: serenity::Error) -> DeliveryError {
    match error {
        serenity::Error::Http(HttpError::UnsuccessfulRequest(response)) => {
            match response.status_code.as_u16() {
                404 => DeliveryError::NotFound,
                403 => DeliveryError::PermissionDenied,
                _ => DeliveryError::Transport {
                    msg: format!("HTTP {}", response.status_code),
                },
            }
        }
        other => DeliveryError::Transport {
            msg: format!("{:?}", other),
        },
    }
}
