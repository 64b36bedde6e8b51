//! In-memory `VideoPlatform` that records every call it receives.

use crate::error::UpstreamError;
use crate::services::youtube_service::{
    ChannelListResponse, SearchListResponse, SearchQuery, VideoListResponse, VideoPlatform,
    CHANNELS_ENDPOINT, SEARCH_ENDPOINT, VIDEOS_ENDPOINT,
};
use serde_json::{json, Value};
use std::sync::Mutex;

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Search(SearchQuery),
    Videos { ids: Vec<String>, parts: String },
    MostPopular { region: String, category_id: Option<String>, max_results: u32 },
    Channels(Vec<String>),
}

#[derive(Default)]
pub struct FakePlatform {
    pub search: Value,
    pub videos: Value,
    pub channels: Value,
    /// Endpoint that answers with a 500 instead of its payload.
    pub failing: Option<&'static str>,
    pub calls: Mutex<Vec<Call>>,
}

impl FakePlatform {
    pub fn new(search: Value, videos: Value, channels: Value) -> Self {
        Self {
            search,
            videos,
            channels,
            ..Default::default()
        }
    }

    pub fn failing_on(mut self, endpoint: &'static str) -> Self {
        self.failing = Some(endpoint);
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    fn respond<T: serde::de::DeserializeOwned + Default>(
        &self,
        endpoint: &'static str,
        payload: &Value,
        call: Call,
    ) -> Result<T, UpstreamError> {
        self.calls.lock().unwrap().push(call);
        if self.failing == Some(endpoint) {
            return Err(UpstreamError::Status {
                endpoint,
                status: 500,
                body: "backend error".to_string(),
            });
        }
        if payload.is_null() {
            return Ok(T::default());
        }
        serde_json::from_value(payload.clone())
            .map_err(|source| UpstreamError::Decode { endpoint, source })
    }
}

#[rocket::async_trait]
impl VideoPlatform for FakePlatform {
    async fn search_videos(&self, query: &SearchQuery) -> Result<SearchListResponse, UpstreamError> {
        self.respond(SEARCH_ENDPOINT, &self.search, Call::Search(query.clone()))
    }

    async fn list_videos(
        &self,
        ids: &[String],
        parts: &str,
    ) -> Result<VideoListResponse, UpstreamError> {
        let call = Call::Videos {
            ids: ids.to_vec(),
            parts: parts.to_string(),
        };
        self.respond(VIDEOS_ENDPOINT, &self.videos, call)
    }

    async fn most_popular(
        &self,
        region: &str,
        category_id: Option<&str>,
        max_results: u32,
    ) -> Result<VideoListResponse, UpstreamError> {
        let call = Call::MostPopular {
            region: region.to_string(),
            category_id: category_id.map(String::from),
            max_results,
        };
        self.respond(VIDEOS_ENDPOINT, &self.videos, call)
    }

    async fn list_channels(&self, ids: &[String]) -> Result<ChannelListResponse, UpstreamError> {
        self.respond(CHANNELS_ENDPOINT, &self.channels, Call::Channels(ids.to_vec()))
    }
}

pub fn search_hits(ids: &[&str]) -> Value {
    json!({
        "items": ids
            .iter()
            .map(|id| json!({ "id": { "kind": "youtube#video", "videoId": id } }))
            .collect::<Vec<_>>()
    })
}

pub fn video(id: &str, channel_id: &str, views: Option<&str>, duration: &str) -> Value {
    let mut item = json!({
        "id": id,
        "snippet": {
            "title": format!("Video {id}"),
            "channelId": channel_id,
            "channelTitle": format!("Channel {channel_id}"),
            "thumbnails": {
                "default": { "url": format!("https://i.ytimg.com/vi/{id}/default.jpg") },
                "medium": { "url": format!("https://i.ytimg.com/vi/{id}/mqdefault.jpg") }
            }
        },
        "contentDetails": { "duration": duration }
    });
    if let Some(views) = views {
        item["statistics"] = json!({ "viewCount": views });
    }
    item
}

pub fn channel(id: &str, subscribers: &str, hidden: bool, published_at: &str) -> Value {
    json!({
        "id": id,
        "snippet": { "publishedAt": published_at },
        "statistics": { "subscriberCount": subscribers, "hiddenSubscriberCount": hidden }
    })
}

pub fn items(items: Vec<Value>) -> Value {
    json!({ "items": items })
}
