//! Thin YouTube Data API v3 client used when an admin adds a channel.

use crate::error::ClientError;
use curator_types::YouTubeChannel;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

pub const YOUTUBE_API_BASE: &str = "https://www.googleapis.com/youtube/v3";

#[derive(Debug, Deserialize)]
struct ChannelListResponse {
    #[serde(default)]
    items: Vec<ChannelItem>,
}

#[derive(Debug, Deserialize)]
struct ChannelItem {
    id: String,
    snippet: ChannelSnippet,
    #[serde(default)]
    statistics: Option<ChannelStatistics>,
}

#[derive(Debug, Deserialize)]
struct ChannelSnippet {
    title: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    thumbnails: Thumbnails,
}

#[derive(Debug, Default, Deserialize)]
struct Thumbnails {
    high: Option<Thumbnail>,
    medium: Option<Thumbnail>,
    default: Option<Thumbnail>,
}

#[derive(Debug, Deserialize)]
struct Thumbnail {
    url: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ChannelStatistics {
    subscriber_count: Option<String>,
    video_count: Option<String>,
}

fn parse_count(raw: Option<&str>) -> u64 {
    raw.and_then(|s| s.parse().ok()).unwrap_or(0)
}

impl From<ChannelItem> for YouTubeChannel {
    fn from(item: ChannelItem) -> Self {
        let thumbnails = item.snippet.thumbnails;
        let thumbnail = thumbnails.high.or(thumbnails.medium).or(thumbnails.default).map(|t| t.url);
        let stats = item.statistics.as_ref();
        Self {
            id: String::new(),
            channel_id: item.id,
            channel_name: item.snippet.title,
            channel_description: Some(item.snippet.description).filter(|d| !d.is_empty()),
            channel_thumbnail: thumbnail,
            subscriber_count: parse_count(stats.and_then(|s| s.subscriber_count.as_deref())),
            video_count: parse_count(stats.and_then(|s| s.video_count.as_deref())),
            is_active: true,
            created_at: None,
        }
    }
}

/// Whether the input already looks like a channel id (`UC` + 22 chars).
pub fn is_channel_id(input: &str) -> bool {
    input.len() == 24 && input.starts_with("UC")
}

pub struct YouTubeClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl YouTubeClient {
    pub fn new(api_key: impl Into<String>) -> Result<Self, ClientError> {
        Self::with_base_url(api_key, YOUTUBE_API_BASE)
    }

    pub fn with_base_url(
        api_key: impl Into<String>,
        base_url: impl Into<String>,
    ) -> Result<Self, ClientError> {
        let client = Client::builder().timeout(Duration::from_secs(15)).build()?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
        })
    }

    async fn list_channels(&self, selector: (&str, &str)) -> Result<ChannelItem, ClientError> {
        let resp = self
            .client
            .get(format!("{}/channels", self.base_url))
            .query(&[("part", "snippet,statistics"), selector, ("key", self.api_key.as_str())])
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(ClientError::Status {
                status: status.as_u16(),
                message: crate::client::error_message(&body, status),
            });
        }

        let list: ChannelListResponse =
            resp.json().await.map_err(|e| ClientError::InvalidResponse(e.to_string()))?;
        list.items
            .into_iter()
            .next()
            .ok_or_else(|| ClientError::NotFound(format!("channel {}", selector.1)))
    }

    /// Look a channel up by its `UC...` id.
    pub async fn channel_info(&self, channel_id: &str) -> Result<YouTubeChannel, ClientError> {
        self.list_channels(("id", channel_id)).await.map(YouTubeChannel::from)
    }

    /// Look a channel up by legacy username (a leading `@` is ignored).
    pub async fn channel_by_username(&self, username: &str) -> Result<YouTubeChannel, ClientError> {
        let clean = username.trim().trim_start_matches('@');
        let item = self.list_channels(("forUsername", clean)).await?;
        self.channel_info(&item.id).await
    }

    /// Accept either a channel id or a username.
    pub async fn resolve_channel(&self, input: &str) -> Result<YouTubeChannel, ClientError> {
        let input = input.trim();
        if is_channel_id(input) {
            self.channel_info(input).await
        } else {
            self.channel_by_username(input).await
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_channel_item_conversion() {
        let item: ChannelItem = serde_json::from_value(serde_json::json!({
            "id": "UCaaaaaaaaaaaaaaaaaaaaaa",
            "snippet": {
                "title": "Bitcoin Cash Podcast",
                "description": "",
                "thumbnails": { "medium": { "url": "https://yt3.example/m.jpg" } }
            },
            "statistics": { "subscriberCount": "1200", "videoCount": "not-a-number" }
        }))
        .unwrap();

        let channel = YouTubeChannel::from(item);
        assert_eq!(channel.channel_name, "Bitcoin Cash Podcast");
        assert_eq!(channel.channel_description, None);
        assert_eq!(channel.channel_thumbnail.as_deref(), Some("https://yt3.example/m.jpg"));
        assert_eq!(channel.subscriber_count, 1200);
        assert_eq!(channel.video_count, 0);
        assert!(channel.is_active);
    }

    #[test]
    fn test_is_channel_id() {
        assert!(is_channel_id("UCaaaaaaaaaaaaaaaaaaaaaa"));
        assert!(!is_channel_id("@bitcoincashpodcast"));
    }
}
