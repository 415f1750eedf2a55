pub mod render_news_embed;

pub use render_news_embed::{render, RenderedNewsItem};

use crate::bot::discord_client::{DeliveryError, SendNewsItem};

/// Sends one rendered item to every destination. Each destination gets
/// exactly one attempt; a failed channel never blocks the remaining ones.
pub async fn fan_out<A: SendNewsItem>(
    api: &A,
    item: &RenderedNewsItem,
    channel_ids: &[i64],
) -> usize {
    let mut delivered = 0;

    for channel_id in channel_ids {
        match api.send_news_item(*channel_id, item).await {
            Ok(()) => {
                delivered += 1;

                log::info!("Sent news item {} to channel {}", item.link, channel_id);
            }
            Err(DeliveryError::NotFound) => {
                log::warn!("Channel {} not found", channel_id);
            }
            Err(error) => {
                log::error!(
                    "Failed to send news item to channel {}: {:?}",
                    channel_id,
                    error
                );
            }
        }
    }

    delivered
}
