//! Showcase session façade.
//!
//! Wires the configuration, transport, cache stores, remote data client
//! and carousel driver into one page-session object. The data flow
//! mirrors the page lifecycle: on load the session requests videos and
//! channel statistics (through cache and retry), feeds the resulting item
//! list to the carousel, and from then on the visibility tracker, the
//! autoplay timer and user input drive the gallery.
//!
//! A failed fetch degrades only its own section: the session publishes a
//! `FeedEvent::Failed` for it and keeps everything else running. Teardown
//! cancels every timer the session started.

pub mod error;

pub use error::{Result, ServiceError};

use bridge_http::{Clock, HttpClient, ReqwestHttpClient, SystemClock};
use core_cache::{CacheStore, SweeperHandle};
use core_carousel::{CarouselConfig, CarouselHandle, VisibilityTracker};
use core_runtime::events::{CoreEvent, EventBus, FeedEvent, FeedSection};
use core_runtime::ShowcaseConfig;
use provider_youtube::{
    ChannelStats, ConnectorConfig, FetchState, RetryPolicy, VideoItem, YouTubeConnector,
};
use std::sync::Arc;
use tokio::sync::watch;
use tracing::{info, warn};

/// One page session: owns the client, the carousel driver, the cache
/// sweepers and the event bus.
pub struct ShowcaseSession {
    event_bus: EventBus,
    connector: Arc<YouTubeConnector>,
    carousel: CarouselHandle<VideoItem>,
    visibility: VisibilityTracker,
    sweepers: Vec<SweeperHandle>,
    page_size: u32,
    videos_state: watch::Sender<FetchState<Vec<VideoItem>>>,
    stats_state: watch::Sender<FetchState<ChannelStats>>,
}

impl ShowcaseSession {
    /// Assembles a session from the given configuration.
    ///
    /// Constructs the cache stores and their sweep tasks, the connector
    /// and the carousel driver. No network request is made yet; call
    /// [`load`](Self::load) for that.
    pub fn start(config: ShowcaseConfig) -> Result<Self> {
        config.validate()?;

        let clock: Arc<dyn Clock> = config
            .clock
            .clone()
            .unwrap_or_else(|| Arc::new(SystemClock));
        let http: Arc<dyn HttpClient> = config
            .http_client
            .clone()
            .unwrap_or_else(|| Arc::new(ReqwestHttpClient::new()));

        let video_cache: Arc<CacheStore<Vec<VideoItem>>> =
            Arc::new(CacheStore::new(Arc::clone(&clock)));
        let stats_cache: Arc<CacheStore<ChannelStats>> =
            Arc::new(CacheStore::new(Arc::clone(&clock)));

        let sweepers = vec![
            CacheStore::spawn_sweeper(&video_cache, config.cache_sweep_interval),
            CacheStore::spawn_sweeper(&stats_cache, config.cache_sweep_interval),
        ];

        let connector_config = ConnectorConfig::new(&config.api_key, &config.channel_id)?
            .with_cache_ttl(config.cache_ttl)
            .with_retry(RetryPolicy {
                max_attempts: config.retry_max_attempts,
                base_delay: config.retry_base_delay,
                max_delay: config.retry_max_delay,
            });
        let connector = Arc::new(YouTubeConnector::new(
            http,
            connector_config,
            video_cache,
            stats_cache,
        ));

        let event_bus = EventBus::new(config.event_buffer);
        let visibility = VisibilityTracker::new(config.visibility_threshold);
        let carousel = CarouselHandle::spawn(
            CarouselConfig {
                tick_interval: config.tick_interval,
                drag_threshold: config.drag_threshold,
            },
            visibility.subscribe(),
            event_bus.clone(),
        );

        let (videos_state, _) = watch::channel(FetchState::Pending);
        let (stats_state, _) = watch::channel(FetchState::Pending);

        info!(channel = %config.channel_id, "Showcase session started");

        Ok(Self {
            event_bus,
            connector,
            carousel,
            visibility,
            sweepers,
            page_size: config.page_size,
            videos_state,
            stats_state,
        })
    }

    /// Loads the first video page and the channel statistics.
    ///
    /// The two sections load independently: either failure leaves the
    /// other section intact and is reported through the event bus, never
    /// panicking and never tearing the session down. Re-invoking refreshes
    /// both sections; the cache makes an early refresh cheap.
    pub async fn load(&self) {
        self.emit(FeedEvent::Loading {
            section: FeedSection::Videos,
        });
        self.emit(FeedEvent::Loading {
            section: FeedSection::Stats,
        });

        let (videos, stats) = tokio::join!(
            self.connector.fetch_videos(1, self.page_size),
            self.connector.fetch_channel_stats(),
        );

        match videos {
            Ok(videos) => {
                self.videos_state
                    .send_replace(FetchState::Ready(videos.clone()));
                self.emit(FeedEvent::VideosLoaded {
                    count: videos.len(),
                });
                self.carousel.replace_items(videos).await;
            }
            Err(e) => {
                warn!(error = %e, "Video feed degraded");
                self.videos_state
                    .send_replace(FetchState::Failed(e.to_string()));
                self.emit(FeedEvent::Failed {
                    section: FeedSection::Videos,
                    message: e.to_string(),
                    degraded: true,
                });
            }
        }

        match stats {
            Ok(stats) => {
                self.stats_state.send_replace(FetchState::Ready(stats));
                self.emit(FeedEvent::StatsLoaded {
                    subscriber_count: stats.subscriber_count,
                    view_count: stats.view_count,
                    video_count: stats.video_count,
                });
            }
            Err(e) => {
                warn!(error = %e, "Stats section degraded");
                self.stats_state
                    .send_replace(FetchState::Failed(e.to_string()));
                self.emit(FeedEvent::Failed {
                    section: FeedSection::Stats,
                    message: e.to_string(),
                    degraded: true,
                });
            }
        }
    }

    /// The carousel driver handle: navigation, keys, gestures, snapshots.
    pub fn carousel(&self) -> &CarouselHandle<VideoItem> {
        &self.carousel
    }

    /// The visibility tracker feeding the carousel's autoplay gate.
    pub fn visibility(&self) -> &VisibilityTracker {
        &self.visibility
    }

    /// The session's event bus.
    pub fn events(&self) -> EventBus {
        self.event_bus.clone()
    }

    /// The remote data client, for callers needing more than the first
    /// page (e.g. the popular-videos rail).
    pub fn connector(&self) -> &Arc<YouTubeConnector> {
        &self.connector
    }

    /// Latest video-section fetch state.
    pub fn videos(&self) -> FetchState<Vec<VideoItem>> {
        self.videos_state.borrow().clone()
    }

    /// Latest stats-section fetch state.
    pub fn stats(&self) -> FetchState<ChannelStats> {
        self.stats_state.borrow().clone()
    }

    /// Tears the session down: stops the carousel driver and the cache
    /// sweep tasks. Every timer the session armed is cancelled; none may
    /// fire afterwards.
    pub async fn shutdown(self) {
        self.carousel.shutdown_and_wait().await;
        for sweeper in self.sweepers {
            sweeper.shutdown_and_wait().await;
        }
        info!("Showcase session shut down");
    }

    fn emit(&self, event: FeedEvent) {
        self.event_bus.emit(CoreEvent::Feed(event)).ok();
    }
}
