//! Domain and wire types for the YouTube provider.
//!
//! Wire types mirror only the response fields this client consumes.
//! Deserialization is the strict parse step at the boundary: a response
//! missing an expected field fails to deserialize and surfaces as
//! [`MalformedResponse`](crate::ProviderError::MalformedResponse) instead
//! of reaching presentation code half-populated.

use serde::{Deserialize, Serialize};

// ============================================================================
// Domain Types
// ============================================================================

/// One gallery item, fully formatted for display.
///
/// Immutable once constructed; the list is rebuilt wholesale on each
/// successful fetch, never patched field-by-field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoItem {
    /// Upstream-assigned unique video identifier.
    pub video_id: String,
    /// Video title.
    pub title: String,
    /// Medium-size thumbnail URL.
    pub thumbnail_url: String,
    /// Pre-formatted view count, e.g. `"1,234,567 views"`.
    pub views_label: String,
    /// Pre-formatted duration, `H:MM:SS` or `M:SS`.
    pub duration_label: String,
}

/// Aggregate channel statistics. Immutable snapshot, replaced wholesale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelStats {
    pub subscriber_count: u64,
    pub view_count: u64,
    pub video_count: u64,
}

/// Snapshot of one fetch for the presentation boundary.
///
/// A partially populated value is never produced: either the whole `T`
/// arrived or the section shows a loading/error affordance.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchState<T> {
    /// No result yet.
    Pending,
    /// The value arrived intact.
    Ready(T),
    /// The fetch failed terminally; the message is user-presentable.
    Failed(String),
}

impl<T> FetchState<T> {
    pub fn is_ready(&self) -> bool {
        matches!(self, FetchState::Ready(_))
    }

    pub fn value(&self) -> Option<&T> {
        match self {
            FetchState::Ready(value) => Some(value),
            _ => None,
        }
    }
}

// ============================================================================
// Wire Types — search endpoint
// ============================================================================

#[derive(Debug, Deserialize)]
pub(crate) struct SearchResponse {
    #[serde(default)]
    pub items: Vec<SearchItem>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct SearchItem {
    pub id: SearchItemId,
}

#[derive(Debug, Deserialize)]
pub(crate) struct SearchItemId {
    #[serde(rename = "videoId")]
    pub video_id: String,
}

// ============================================================================
// Wire Types — videos endpoint
// ============================================================================

#[derive(Debug, Deserialize)]
pub(crate) struct VideoListResponse {
    #[serde(default)]
    pub items: Vec<VideoResource>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct VideoResource {
    pub id: String,
    pub snippet: VideoSnippet,
    pub statistics: VideoStatistics,
    #[serde(rename = "contentDetails")]
    pub content_details: VideoContentDetails,
}

#[derive(Debug, Deserialize)]
pub(crate) struct VideoSnippet {
    pub title: String,
    pub thumbnails: Thumbnails,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Thumbnails {
    pub medium: Thumbnail,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Thumbnail {
    pub url: String,
}

/// View counts arrive as decimal strings, not numbers.
#[derive(Debug, Deserialize)]
pub(crate) struct VideoStatistics {
    #[serde(rename = "viewCount")]
    pub view_count: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct VideoContentDetails {
    pub duration: String,
}

// ============================================================================
// Wire Types — channels endpoint
// ============================================================================

#[derive(Debug, Deserialize)]
pub(crate) struct ChannelListResponse {
    #[serde(default)]
    pub items: Vec<ChannelResource>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ChannelResource {
    pub statistics: Option<ChannelStatistics>,
    #[serde(rename = "contentDetails")]
    pub content_details: Option<ChannelContentDetails>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ChannelStatistics {
    #[serde(rename = "subscriberCount")]
    pub subscriber_count: String,
    #[serde(rename = "viewCount")]
    pub view_count: String,
    #[serde(rename = "videoCount")]
    pub video_count: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ChannelContentDetails {
    #[serde(rename = "relatedPlaylists")]
    pub related_playlists: RelatedPlaylists,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RelatedPlaylists {
    pub uploads: String,
}

// ============================================================================
// Wire Types — playlist items endpoint
// ============================================================================

#[derive(Debug, Deserialize)]
pub(crate) struct PlaylistItemsResponse {
    #[serde(default)]
    pub items: Vec<PlaylistItem>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct PlaylistItem {
    pub snippet: PlaylistItemSnippet,
}

#[derive(Debug, Deserialize)]
pub(crate) struct PlaylistItemSnippet {
    #[serde(rename = "resourceId")]
    pub resource_id: PlaylistResourceId,
}

#[derive(Debug, Deserialize)]
pub(crate) struct PlaylistResourceId {
    #[serde(rename = "videoId")]
    pub video_id: String,
}
