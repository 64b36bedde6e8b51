use crate::error::UpstreamError;
use log::debug;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::collections::HashMap;
use url::Url;

pub const SEARCH_ENDPOINT: &str = "search";
pub const VIDEOS_ENDPOINT: &str = "videos";
pub const CHANNELS_ENDPOINT: &str = "channels";

/// Thumbnail sizes in the order they are tried when the preferred one is missing.
const THUMBNAIL_SIZES: [&str; 5] = ["default", "medium", "high", "standard", "maxres"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    pub keyword: String,
    pub region: String,
    pub max_results: u32,
    pub published_after: Option<String>,
}

/// The subset of the YouTube Data API the backend talks to.
#[rocket::async_trait]
pub trait VideoPlatform: Send + Sync {
    /// `search` restricted to videos, ordered by view count.
    async fn search_videos(&self, query: &SearchQuery) -> Result<SearchListResponse, UpstreamError>;

    /// Batched `videos` lookup; `parts` is the comma-separated `part` value.
    async fn list_videos(
        &self,
        ids: &[String],
        parts: &str,
    ) -> Result<VideoListResponse, UpstreamError>;

    /// `videos` with `chart=mostPopular`, including snippet and statistics.
    async fn most_popular(
        &self,
        region: &str,
        category_id: Option<&str>,
        max_results: u32,
    ) -> Result<VideoListResponse, UpstreamError>;

    /// Batched `channels` lookup with snippet and statistics.
    async fn list_channels(&self, ids: &[String]) -> Result<ChannelListResponse, UpstreamError>;
}

// Documentation: https://developers.google.com/youtube/v3/docs
#[derive(Debug, Default, Deserialize)]
pub struct SearchListResponse {
    #[serde(default)]
    pub items: Vec<SearchItem>,
}

#[derive(Debug, Deserialize)]
pub struct SearchItem {
    pub id: SearchItemId,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchItemId {
    pub video_id: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct VideoListResponse {
    #[serde(default)]
    pub items: Vec<VideoItem>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoItem {
    pub id: String,
    pub snippet: VideoSnippet,
    pub statistics: Option<VideoStatistics>,
    pub content_details: Option<ContentDetails>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoSnippet {
    pub title: String,
    pub channel_id: String,
    pub channel_title: String,
    #[serde(default)]
    pub thumbnails: HashMap<String, Thumbnail>,
}

#[derive(Debug, Deserialize)]
pub struct Thumbnail {
    pub url: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoStatistics {
    pub view_count: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ContentDetails {
    pub duration: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ChannelListResponse {
    #[serde(default)]
    pub items: Vec<ChannelItem>,
}

#[derive(Debug, Deserialize)]
pub struct ChannelItem {
    pub id: String,
    pub snippet: Option<ChannelSnippet>,
    pub statistics: Option<ChannelStatistics>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChannelSnippet {
    pub published_at: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChannelStatistics {
    pub subscriber_count: Option<String>,
    #[serde(default)]
    pub hidden_subscriber_count: bool,
}

impl SearchListResponse {
    pub fn video_ids(&self) -> impl Iterator<Item = String> + '_ {
        self.items
            .iter()
            .filter_map(|item| item.id.video_id.clone())
    }
}

impl VideoItem {
    pub fn view_count(&self) -> String {
        self.statistics
            .as_ref()
            .and_then(|stats| stats.view_count.clone())
            .unwrap_or_else(|| "0".to_string())
    }

    pub fn duration(&self) -> Option<&str> {
        self.content_details
            .as_ref()
            .and_then(|details| details.duration.as_deref())
    }

    /// URL of the `preferred` thumbnail, else the first available size, else empty.
    pub fn thumbnail_url(&self, preferred: &str) -> String {
        let thumbnails = &self.snippet.thumbnails;
        thumbnails
            .get(preferred)
            .or_else(|| THUMBNAIL_SIZES.iter().find_map(|size| thumbnails.get(*size)))
            .map(|thumbnail| thumbnail.url.clone())
            .unwrap_or_default()
    }
}

/// reqwest-backed client for the YouTube Data API v3.
pub struct YouTubeClient {
    client: Client,
    base_url: Url,
    api_key: String,
}

impl YouTubeClient {
    pub fn new(client: Client, base_url: Url, api_key: String) -> Self {
        Self {
            client,
            base_url,
            api_key,
        }
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        endpoint: &'static str,
        params: &[(&str, String)],
    ) -> Result<T, UpstreamError> {
        let url = self
            .base_url
            .join(endpoint)
            .map_err(|source| UpstreamError::Url { endpoint, source })?;

        debug!("GET {url} {params:?}");

        let response = self
            .client
            .get(url)
            .query(params)
            .query(&[("key", self.api_key.as_str())])
            .send()
            .await
            .map_err(|source| UpstreamError::Transport {
                endpoint,
                source: source.without_url(),
            })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|source| UpstreamError::Transport {
                endpoint,
                source: source.without_url(),
            })?;

        if !status.is_success() {
            return Err(UpstreamError::Status {
                endpoint,
                status: status.as_u16(),
                body,
            });
        }

        serde_json::from_str(&body).map_err(|source| UpstreamError::Decode { endpoint, source })
    }
}

#[rocket::async_trait]
impl VideoPlatform for YouTubeClient {
    async fn search_videos(&self, query: &SearchQuery) -> Result<SearchListResponse, UpstreamError> {
        let mut params = vec![
            ("part", "snippet".to_string()),
            ("q", query.keyword.clone()),
            ("type", "video".to_string()),
            ("order", "viewCount".to_string()),
            ("regionCode", query.region.clone()),
            ("maxResults", query.max_results.to_string()),
        ];
        if let Some(published_after) = &query.published_after {
            params.push(("publishedAfter", published_after.clone()));
        }

        self.get_json(SEARCH_ENDPOINT, &params).await
    }

    async fn list_videos(
        &self,
        ids: &[String],
        parts: &str,
    ) -> Result<VideoListResponse, UpstreamError> {
        let params = [("part", parts.to_string()), ("id", ids.join(","))];
        self.get_json(VIDEOS_ENDPOINT, &params).await
    }

    async fn most_popular(
        &self,
        region: &str,
        category_id: Option<&str>,
        max_results: u32,
    ) -> Result<VideoListResponse, UpstreamError> {
        let mut params = vec![
            ("part", "snippet,statistics".to_string()),
            ("chart", "mostPopular".to_string()),
            ("regionCode", region.to_string()),
            ("maxResults", max_results.to_string()),
        ];
        if let Some(category_id) = category_id {
            params.push(("videoCategoryId", category_id.to_string()));
        }

        self.get_json(VIDEOS_ENDPOINT, &params).await
    }

    async fn list_channels(&self, ids: &[String]) -> Result<ChannelListResponse, UpstreamError> {
        let params = [("part", "snippet,statistics".to_string()), ("id", ids.join(","))];
        self.get_json(CHANNELS_ENDPOINT, &params).await
    }
}
