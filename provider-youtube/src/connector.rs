//! YouTube Data API client.
//!
//! ## Endpoints
//!
//! - **Search**: `{base}/search?key=...&channelId=...&order=date&type=video`
//! - **Videos**: `{base}/videos?key=...&id=...&part=contentDetails,statistics,snippet`
//! - **Channels**: `{base}/channels?key=...&id=...&part=statistics|contentDetails`
//! - **Playlist items**: `{base}/playlistItems?key=...&playlistId=...&part=snippet`
//!
//! ## Caching
//!
//! Successful results are cached with a fixed TTL under keys that encode
//! the request identity: `{channel}-{page}-{page_size}` for recent video
//! pages, `{channel}-popular-{max}` for the popular list and `{channel}`
//! for statistics. Distinct pagination requests never collide but also
//! never share partial overlap — refetching page 1 does not warm page 2.
//! Failures are never cached.

use crate::error::{ProviderError, Result};
use crate::format::{format_duration, format_views};
use crate::retry::{self, RetryPolicy};
use crate::types::{
    ChannelListResponse, ChannelStats, PlaylistItemsResponse, SearchResponse, VideoItem,
    VideoListResponse, VideoResource,
};
use bridge_http::{HttpClient, HttpRequest};
use core_cache::CacheStore;
use core_runtime::logging::redact_key;
use serde::de::DeserializeOwned;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, instrument};

/// YouTube Data API base URL
const YOUTUBE_API_BASE: &str = "https://www.googleapis.com/youtube/v3";

/// Timeout for API requests
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Connector settings.
///
/// The API key and channel id are required inputs; their absence is a
/// fatal configuration error detected at construction, before any request
/// is attempted.
#[derive(Debug, Clone)]
pub struct ConnectorConfig {
    pub api_key: String,
    pub channel_id: String,
    /// Fixed TTL applied to every cached result.
    pub cache_ttl: Duration,
    pub retry: RetryPolicy,
}

impl ConnectorConfig {
    /// Creates a config with the default TTL (5 minutes) and retry policy.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError::MissingConfiguration`] when either input
    /// is empty.
    pub fn new(api_key: impl Into<String>, channel_id: impl Into<String>) -> Result<Self> {
        let api_key = api_key.into();
        let channel_id = channel_id.into();

        if api_key.is_empty() {
            return Err(ProviderError::MissingConfiguration(
                "API key is required".to_string(),
            ));
        }
        if channel_id.is_empty() {
            return Err(ProviderError::MissingConfiguration(
                "channel id is required".to_string(),
            ));
        }

        Ok(Self {
            api_key,
            channel_id,
            cache_ttl: Duration::from_secs(300),
            retry: RetryPolicy::default(),
        })
    }

    pub fn with_cache_ttl(mut self, ttl: Duration) -> Self {
        self.cache_ttl = ttl;
        self
    }

    pub fn with_retry(mut self, policy: RetryPolicy) -> Self {
        self.retry = policy;
        self
    }
}

/// Remote data client for channel video metadata and statistics.
///
/// Composes the injected cache stores with the retry executor: every
/// operation checks its cache first, runs the network calls through
/// [`retry::execute`] on a miss, and caches only successes.
pub struct YouTubeConnector {
    http: Arc<dyn HttpClient>,
    config: ConnectorConfig,
    video_cache: Arc<CacheStore<Vec<VideoItem>>>,
    stats_cache: Arc<CacheStore<ChannelStats>>,
}

impl YouTubeConnector {
    pub fn new(
        http: Arc<dyn HttpClient>,
        config: ConnectorConfig,
        video_cache: Arc<CacheStore<Vec<VideoItem>>>,
        stats_cache: Arc<CacheStore<ChannelStats>>,
    ) -> Self {
        Self {
            http,
            config,
            video_cache,
            stats_cache,
        }
    }

    /// Fetches the channel's most recent videos, newest first.
    ///
    /// Issues a search-by-channel request ordered by recency, then a batch
    /// detail request for the returned identifiers, and joins the two into
    /// display-ready [`VideoItem`]s. `page` participates in cache identity
    /// only; the upstream search endpoint has no page parameter.
    #[instrument(skip(self))]
    pub async fn fetch_videos(&self, page: u32, page_size: u32) -> Result<Vec<VideoItem>> {
        let key = format!("{}-{}-{}", self.config.channel_id, page, page_size);

        if let Some(hit) = self.video_cache.get(&key) {
            debug!(key = %key, "Video page served from cache");
            return Ok(hit);
        }

        let videos =
            retry::execute(&self.config.retry, || self.load_recent_videos(page_size)).await?;

        info!(count = videos.len(), "Fetched recent videos");
        self.video_cache
            .set(key, videos.clone(), self.config.cache_ttl);
        Ok(videos)
    }

    /// Fetches the channel's most-viewed uploads.
    ///
    /// Resolves the channel's uploads playlist, lists its items, batch-
    /// fetches their details, sorts by view count descending and truncates
    /// to `max_results`.
    #[instrument(skip(self))]
    pub async fn fetch_popular_videos(&self, max_results: u32) -> Result<Vec<VideoItem>> {
        let key = format!("{}-popular-{}", self.config.channel_id, max_results);

        if let Some(hit) = self.video_cache.get(&key) {
            debug!(key = %key, "Popular videos served from cache");
            return Ok(hit);
        }

        let videos =
            retry::execute(&self.config.retry, || self.load_popular_videos(max_results)).await?;

        info!(count = videos.len(), "Fetched popular videos");
        self.video_cache
            .set(key, videos.clone(), self.config.cache_ttl);
        Ok(videos)
    }

    /// Fetches aggregate channel statistics.
    #[instrument(skip(self))]
    pub async fn fetch_channel_stats(&self) -> Result<ChannelStats> {
        let key = self.config.channel_id.clone();

        if let Some(hit) = self.stats_cache.get(&key) {
            debug!(key = %key, "Channel stats served from cache");
            return Ok(hit);
        }

        let stats = retry::execute(&self.config.retry, || self.load_channel_stats()).await?;

        info!(
            subscribers = stats.subscriber_count,
            views = stats.view_count,
            "Fetched channel stats"
        );
        self.stats_cache.set(key, stats, self.config.cache_ttl);
        Ok(stats)
    }

    // ------------------------------------------------------------------
    // Network operations (single pass, no caching, no retrying)
    // ------------------------------------------------------------------

    async fn load_recent_videos(&self, page_size: u32) -> Result<Vec<VideoItem>> {
        let search_url = format!(
            "{}/search?key={}&channelId={}&part=snippet,id&order=date&maxResults={}&type=video",
            YOUTUBE_API_BASE,
            urlencoding::encode(&self.config.api_key),
            urlencoding::encode(&self.config.channel_id),
            page_size
        );

        let search: SearchResponse = self.get_json(&search_url).await?;

        let ids: Vec<&str> = search
            .items
            .iter()
            .map(|item| item.id.video_id.as_str())
            .collect();

        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let details: VideoListResponse = self.get_json(&self.videos_url(&ids)).await?;
        build_video_items(details.items)
    }

    async fn load_popular_videos(&self, max_results: u32) -> Result<Vec<VideoItem>> {
        let channel_url = format!(
            "{}/channels?key={}&id={}&part=contentDetails",
            YOUTUBE_API_BASE,
            urlencoding::encode(&self.config.api_key),
            urlencoding::encode(&self.config.channel_id)
        );

        let channels: ChannelListResponse = self.get_json(&channel_url).await?;
        let uploads = channels
            .items
            .first()
            .and_then(|channel| channel.content_details.as_ref())
            .map(|details| details.related_playlists.uploads.clone())
            .ok_or_else(|| {
                ProviderError::MalformedResponse("channel has no uploads playlist".to_string())
            })?;

        let playlist_url = format!(
            "{}/playlistItems?key={}&playlistId={}&part=snippet&maxResults={}",
            YOUTUBE_API_BASE,
            urlencoding::encode(&self.config.api_key),
            urlencoding::encode(&uploads),
            max_results
        );

        let playlist: PlaylistItemsResponse = self.get_json(&playlist_url).await?;
        let ids: Vec<&str> = playlist
            .items
            .iter()
            .map(|item| item.snippet.resource_id.video_id.as_str())
            .collect();

        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let details: VideoListResponse = self.get_json(&self.videos_url(&ids)).await?;

        let mut resources = details.items;
        resources.sort_by_key(|resource| {
            std::cmp::Reverse(
                resource
                    .statistics
                    .view_count
                    .parse::<u64>()
                    .unwrap_or(0),
            )
        });
        resources.truncate(max_results as usize);

        build_video_items(resources)
    }

    async fn load_channel_stats(&self) -> Result<ChannelStats> {
        let url = format!(
            "{}/channels?part=statistics&id={}&key={}",
            YOUTUBE_API_BASE,
            urlencoding::encode(&self.config.channel_id),
            urlencoding::encode(&self.config.api_key)
        );

        let channels: ChannelListResponse = self.get_json(&url).await?;
        let stats = channels
            .items
            .first()
            .and_then(|channel| channel.statistics.as_ref())
            .ok_or_else(|| {
                ProviderError::MalformedResponse("channel statistics absent".to_string())
            })?;

        Ok(ChannelStats {
            subscriber_count: parse_count(&stats.subscriber_count, "subscriberCount")?,
            view_count: parse_count(&stats.view_count, "viewCount")?,
            video_count: parse_count(&stats.video_count, "videoCount")?,
        })
    }

    fn videos_url(&self, ids: &[&str]) -> String {
        format!(
            "{}/videos?key={}&id={}&part=contentDetails,statistics,snippet",
            YOUTUBE_API_BASE,
            urlencoding::encode(&self.config.api_key),
            ids.join(",")
        )
    }

    /// Executes one GET and parses the JSON body.
    ///
    /// Transport failures and non-success statuses map to
    /// [`ProviderError::UpstreamUnavailable`]; a body that fails strict
    /// deserialization maps to [`ProviderError::MalformedResponse`].
    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        debug!(url = %redact_key(url), "Requesting upstream");

        let request = HttpRequest::get(url)
            .header("Accept", "application/json")
            .timeout(REQUEST_TIMEOUT);

        let response = self
            .http
            .execute(request)
            .await
            .map_err(|e| ProviderError::UpstreamUnavailable(e.to_string()))?;

        if !response.is_success() {
            return Err(ProviderError::UpstreamUnavailable(format!(
                "upstream answered HTTP {}",
                response.status
            )));
        }

        serde_json::from_slice(&response.body)
            .map_err(|e| ProviderError::MalformedResponse(e.to_string()))
    }
}

fn build_video_items(resources: Vec<VideoResource>) -> Result<Vec<VideoItem>> {
    resources
        .into_iter()
        .map(|resource| {
            let views = parse_count(&resource.statistics.view_count, "viewCount")?;
            Ok(VideoItem {
                video_id: resource.id,
                title: resource.snippet.title,
                thumbnail_url: resource.snippet.thumbnails.medium.url,
                views_label: format_views(views),
                duration_label: format_duration(&resource.content_details.duration),
            })
        })
        .collect()
}

fn parse_count(raw: &str, field: &str) -> Result<u64> {
    raw.parse::<u64>().map_err(|_| {
        ProviderError::MalformedResponse(format!("{} is not a number: {:?}", field, raw))
    })
}
