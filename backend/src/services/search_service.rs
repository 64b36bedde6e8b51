use crate::error::AggregationError;
use crate::models::{VideoSummary, HIDDEN_SENTINEL, UNKNOWN_SENTINEL};
use crate::services::youtube_service::{ChannelItem, SearchQuery, VideoItem, VideoPlatform};
use crate::utils::{
    date_portion, distinct_in_order, is_short_form, parse_count,
    parse_iso8601_duration_to_seconds, published_after,
};
use chrono::{DateTime, Utc};
use log::{debug, info};
use std::cmp::Reverse;
use std::collections::HashMap;
use std::sync::Arc;

/// Fixed page size of the keyword search.
pub const SEARCH_PAGE_SIZE: u32 = 50;

const VIDEO_DETAIL_PARTS: &str = "snippet,statistics,contentDetails";
const SEARCH_THUMBNAIL: &str = "default";

/// Channel fields copied onto every video of that channel.
#[derive(Debug, Clone, PartialEq)]
struct ChannelInfo {
    subscriber_count: String,
    published_at: String,
}

impl ChannelInfo {
    fn from_item(item: &ChannelItem) -> Self {
        let subscriber_count = match &item.statistics {
            Some(stats) if stats.hidden_subscriber_count => HIDDEN_SENTINEL.to_string(),
            Some(stats) => stats
                .subscriber_count
                .clone()
                .unwrap_or_else(|| "0".to_string()),
            None => "0".to_string(),
        };

        let published_at = item
            .snippet
            .as_ref()
            .and_then(|snippet| snippet.published_at.as_deref())
            .map(|published| date_portion(published).to_string())
            .unwrap_or_else(|| UNKNOWN_SENTINEL.to_string());

        Self {
            subscriber_count,
            published_at,
        }
    }

    fn unknown() -> Self {
        Self {
            subscriber_count: UNKNOWN_SENTINEL.to_string(),
            published_at: UNKNOWN_SENTINEL.to_string(),
        }
    }
}

/// Keyword search joined with video and channel details, ranked by views.
pub struct VideoAggregator {
    platform: Arc<dyn VideoPlatform>,
    region: String,
}

impl VideoAggregator {
    pub fn new(platform: Arc<dyn VideoPlatform>, region: impl Into<String>) -> Self {
        Self {
            platform,
            region: region.into(),
        }
    }

    pub async fn search(
        &self,
        keyword: &str,
        period_days: u32,
        now: DateTime<Utc>,
    ) -> Result<Vec<VideoSummary>, AggregationError> {
        // Step 1: lower bound of the search window
        let published_after = published_after(now, period_days)
            .ok_or(AggregationError::PeriodOutOfRange(period_days))?;

        // Step 2: most viewed videos matching the keyword inside the window
        let query = SearchQuery {
            keyword: keyword.to_string(),
            region: self.region.clone(),
            max_results: SEARCH_PAGE_SIZE,
            published_after: Some(published_after),
        };
        let hits = self.platform.search_videos(&query).await?;

        let video_ids = distinct_in_order(hits.video_ids());
        if video_ids.is_empty() {
            info!("No videos found for '{keyword}' in the last {period_days} days");
            return Ok(Vec::new());
        }

        // Step 3: video details for every hit
        let videos = self
            .platform
            .list_videos(&video_ids, VIDEO_DETAIL_PARTS)
            .await?
            .items;
        if videos.is_empty() {
            return Ok(Vec::new());
        }

        // Step 4: channel details for every distinct channel
        let channel_ids =
            distinct_in_order(videos.iter().map(|video| video.snippet.channel_id.clone()));
        let channels: HashMap<String, ChannelInfo> = self
            .platform
            .list_channels(&channel_ids)
            .await?
            .items
            .iter()
            .map(|item| (item.id.clone(), ChannelInfo::from_item(item)))
            .collect();

        debug!(
            "Joining {} videos with {} of {} channels",
            videos.len(),
            channels.len(),
            channel_ids.len()
        );

        let mut summaries: Vec<VideoSummary> = videos
            .iter()
            .map(|video| summarize(video, channels.get(&video.snippet.channel_id)))
            .collect();

        // sort_by_key is stable, so ties keep the search ranking
        summaries.sort_by_key(|summary| Reverse(parse_count(&summary.view_count)));

        info!(
            "Search for '{keyword}' ({period_days} days) returned {} videos",
            summaries.len()
        );
        Ok(summaries)
    }
}

fn summarize(video: &VideoItem, channel: Option<&ChannelInfo>) -> VideoSummary {
    let channel = channel.cloned().unwrap_or_else(ChannelInfo::unknown);
    let duration_seconds = parse_iso8601_duration_to_seconds(video.duration());

    VideoSummary {
        id: video.id.clone(),
        title: video.snippet.title.clone(),
        channel_title: video.snippet.channel_title.clone(),
        thumbnail: video.thumbnail_url(SEARCH_THUMBNAIL),
        view_count: video.view_count(),
        subscriber_count: channel.subscriber_count,
        channel_published_at: channel.published_at,
        is_short: is_short_form(duration_seconds),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::UpstreamError;
    use crate::services::fake_platform::{channel, items, search_hits, video, Call, FakePlatform};
    use crate::services::youtube_service::CHANNELS_ENDPOINT;
    use chrono::TimeZone;
    use serde_json::Value;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 8, 9, 0, 0).unwrap()
    }

    fn aggregator(platform: &Arc<FakePlatform>) -> VideoAggregator {
        VideoAggregator::new(platform.clone(), "KR")
    }

    fn fixture() -> FakePlatform {
        FakePlatform::new(
            search_hits(&["a", "b", "c", "a", "d", "e"]),
            items(vec![
                video("a", "chan1", Some("100"), "PT1M30S"),
                video("b", "chan2", Some("5000"), "PT59S"),
                video("c", "chan1", Some("100"), "PT10M"),
                video("d", "chan3", None, "PT30S"),
                video("e", "chan2", Some("300"), "PT2M"),
            ]),
            items(vec![
                channel("chan1", "1200", false, "2011-02-03T04:05:06Z"),
                channel("chan2", "999", true, "2019-12-31T23:59:59.5Z"),
            ]),
        )
    }

    #[tokio::test]
    async fn test_search_joins_and_ranks() {
        let platform = Arc::new(fixture());
        let results = aggregator(&platform).search("test", 7, now()).await.unwrap();

        let ids: Vec<&str> = results.iter().map(|v| v.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "e", "a", "c", "d"]);

        let views: Vec<u64> = results.iter().map(|v| parse_count(&v.view_count)).collect();
        assert!(views.windows(2).all(|pair| pair[0] >= pair[1]));

        let a = &results[2];
        assert_eq!(a.title, "Video a");
        assert_eq!(a.channel_title, "Channel chan1");
        assert_eq!(a.thumbnail, "https://i.ytimg.com/vi/a/default.jpg");
        assert_eq!(a.subscriber_count, "1200");
        assert_eq!(a.channel_published_at, "2011-02-03");
        assert!(!a.is_short);
        assert!(results[0].is_short);
    }

    #[tokio::test]
    async fn test_search_issues_three_batched_calls() {
        let platform = Arc::new(fixture());
        aggregator(&platform).search("test", 7, now()).await.unwrap();

        let calls = platform.calls();
        assert_eq!(calls.len(), 3);
        assert_eq!(
            calls[0],
            Call::Search(SearchQuery {
                keyword: "test".to_string(),
                region: "KR".to_string(),
                max_results: 50,
                published_after: Some("2024-05-01T09:00:00.000000Z".to_string()),
            })
        );
        assert_eq!(
            calls[1],
            Call::Videos {
                ids: vec!["a", "b", "c", "d", "e"].into_iter().map(String::from).collect(),
                parts: "snippet,statistics,contentDetails".to_string(),
            }
        );
        assert_eq!(
            calls[2],
            Call::Channels(vec!["chan1".into(), "chan2".into(), "chan3".into()])
        );
    }

    #[tokio::test]
    async fn test_hidden_subscribers_use_sentinel() {
        let platform = Arc::new(fixture());
        let results = aggregator(&platform).search("test", 7, now()).await.unwrap();

        let hidden: Vec<&VideoSummary> = results
            .iter()
            .filter(|v| v.channel_title == "Channel chan2")
            .collect();
        assert_eq!(hidden.len(), 2);
        for video in hidden {
            assert_eq!(video.subscriber_count, HIDDEN_SENTINEL);
            assert_eq!(video.channel_published_at, "2019-12-31");
        }
    }

    #[tokio::test]
    async fn test_missing_channel_falls_back_to_unknown() {
        let platform = Arc::new(fixture());
        let results = aggregator(&platform).search("test", 7, now()).await.unwrap();

        let d = results.iter().find(|v| v.id == "d").unwrap();
        assert_eq!(d.subscriber_count, UNKNOWN_SENTINEL);
        assert_eq!(d.channel_published_at, UNKNOWN_SENTINEL);
        assert_eq!(d.view_count, "0");
    }

    #[tokio::test]
    async fn test_no_hits_skips_detail_calls() {
        let platform = Arc::new(FakePlatform::new(
            search_hits(&[]),
            Value::Null,
            Value::Null,
        ));
        let results = aggregator(&platform).search("test", 7, now()).await.unwrap();

        assert!(results.is_empty());
        assert_eq!(platform.calls().len(), 1);
    }

    #[tokio::test]
    async fn test_no_details_skips_channel_call() {
        let platform = Arc::new(FakePlatform::new(
            search_hits(&["gone"]),
            items(vec![]),
            Value::Null,
        ));
        let results = aggregator(&platform).search("test", 7, now()).await.unwrap();

        assert!(results.is_empty());
        assert_eq!(platform.calls().len(), 2);
    }

    #[tokio::test]
    async fn test_channel_failure_fails_whole_search() {
        let platform = Arc::new(fixture().failing_on(CHANNELS_ENDPOINT));
        let error = aggregator(&platform)
            .search("test", 7, now())
            .await
            .unwrap_err();

        assert!(matches!(
            error,
            AggregationError::Upstream(UpstreamError::Status { endpoint: "channels", .. })
        ));
    }

    #[tokio::test]
    async fn test_unrepresentable_period() {
        let platform = Arc::new(fixture());
        let error = aggregator(&platform)
            .search("test", u32::MAX, now())
            .await
            .unwrap_err();

        assert!(matches!(error, AggregationError::PeriodOutOfRange(_)));
        assert!(platform.calls().is_empty());
    }

    #[test]
    fn test_channel_without_statistics() {
        let item: ChannelItem = serde_json::from_value(serde_json::json!({
            "id": "chan9",
            "snippet": { "publishedAt": "2020-01-01T00:00:00Z" }
        }))
        .unwrap();

        let info = ChannelInfo::from_item(&item);
        assert_eq!(info.subscriber_count, "0");
        assert_eq!(info.published_at, "2020-01-01");
    }
}
