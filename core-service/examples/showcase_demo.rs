//! End-to-end demo against the real upstream API.
//!
//! Requires `SHOWCASE_API_KEY` and `SHOWCASE_CHANNEL_ID` in the
//! environment. Loads the feed, prints the gallery and statistics, then
//! simulates the carousel scrolling into view so autoplay advances twice.
//!
//! ```sh
//! SHOWCASE_API_KEY=... SHOWCASE_CHANNEL_ID=... cargo run --example showcase_demo
//! ```

use core_carousel::Rect;
use core_runtime::logging::{init_logging, LogFormat, LoggingConfig};
use core_runtime::ShowcaseConfig;
use core_service::ShowcaseSession;
use provider_youtube::FetchState;
use std::time::Duration;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_logging(LoggingConfig::default().with_format(LogFormat::Compact))?;

    let config = ShowcaseConfig::from_env()?;
    let session = ShowcaseSession::start(config)?;

    session.load().await;

    match session.videos() {
        FetchState::Ready(videos) => {
            println!("Latest uploads:");
            for video in &videos {
                println!(
                    "  [{}] {} — {}",
                    video.duration_label, video.title, video.views_label
                );
            }
        }
        FetchState::Failed(message) => println!("Video section degraded: {}", message),
        FetchState::Pending => println!("Video section still pending"),
    }

    match session.stats() {
        FetchState::Ready(stats) => {
            println!(
                "Channel: {} subscribers, {} videos, {} total views",
                stats.subscriber_count, stats.video_count, stats.view_count
            );
        }
        FetchState::Failed(message) => println!("Stats section degraded: {}", message),
        FetchState::Pending => println!("Stats section still pending"),
    }

    // Scroll the gallery into view; autoplay starts on the 5s interval.
    let viewport = Rect::new(0.0, 0.0, 1280.0, 800.0);
    let gallery = Rect::new(0.0, 300.0, 1280.0, 400.0);
    session.visibility().measure(&gallery, &viewport);

    tokio::time::sleep(Duration::from_secs(11)).await;
    let snapshot = session.carousel().snapshot();
    println!(
        "Carousel advanced to index {} of {}",
        snapshot.current_index, snapshot.item_count
    );

    session.shutdown().await;
    Ok(())
}
