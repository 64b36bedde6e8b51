use crate::categories::{phrase_for_region, resolve_category, CategorySource};
use crate::error::{TrendingError, TrendingPath, UpstreamError};
use crate::models::TrendingVideo;
use crate::services::youtube_service::{SearchQuery, VideoItem, VideoPlatform, VIDEOS_ENDPOINT};
use crate::utils::distinct_in_order;
use log::info;
use std::sync::Arc;

/// Page size of both trending paths.
pub const TRENDING_PAGE_SIZE: u32 = 30;

const TRENDING_DETAIL_PARTS: &str = "snippet,statistics";
const TRENDING_THUMBNAIL: &str = "medium";

pub struct TrendingService {
    platform: Arc<dyn VideoPlatform>,
}

impl TrendingService {
    pub fn new(platform: Arc<dyn VideoPlatform>) -> Self {
        Self { platform }
    }

    pub async fn trending(
        &self,
        region: &str,
        category: &str,
    ) -> Result<Vec<TrendingVideo>, TrendingError> {
        info!("Fetching trends for: {region}, category: {category}");

        let videos = match resolve_category(category) {
            CategorySource::Chart(category_id) => self
                .chart(region, category_id)
                .await
                .map_err(|source| TrendingError {
                    path: TrendingPath::Chart,
                    source,
                })?,
            CategorySource::Search(phrases) => self
                .search(region, phrase_for_region(phrases, region))
                .await
                .map_err(|source| TrendingError {
                    path: TrendingPath::Search,
                    source,
                })?,
        };

        info!("Trending lookup for {region} returned {} videos", videos.len());
        Ok(videos)
    }

    async fn chart(
        &self,
        region: &str,
        category_id: Option<&str>,
    ) -> Result<Vec<TrendingVideo>, UpstreamError> {
        let response = self
            .platform
            .most_popular(region, category_id, TRENDING_PAGE_SIZE)
            .await?;
        // an empty chart means no trend data for the region
        if response.items.is_empty() {
            return Err(UpstreamError::NoItems {
                endpoint: VIDEOS_ENDPOINT,
            });
        }
        Ok(response.items.iter().map(to_trending_video).collect())
    }

    async fn search(&self, region: &str, phrase: &str) -> Result<Vec<TrendingVideo>, UpstreamError> {
        let query = SearchQuery {
            keyword: phrase.to_string(),
            region: region.to_string(),
            max_results: TRENDING_PAGE_SIZE,
            published_after: None,
        };
        let hits = self.platform.search_videos(&query).await?;

        let video_ids = distinct_in_order(hits.video_ids());
        if video_ids.is_empty() {
            return Ok(Vec::new());
        }

        let response = self
            .platform
            .list_videos(&video_ids, TRENDING_DETAIL_PARTS)
            .await?;
        Ok(response.items.iter().map(to_trending_video).collect())
    }
}

fn to_trending_video(video: &VideoItem) -> TrendingVideo {
    TrendingVideo {
        id: video.id.clone(),
        title: video.snippet.title.clone(),
        channel_title: video.snippet.channel_title.clone(),
        thumbnail: video.thumbnail_url(TRENDING_THUMBNAIL),
        view_count: video.view_count(),
    }
}
