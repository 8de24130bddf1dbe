//! HTTP and time abstractions for the Channel Showcase Core.
//!
//! This crate provides the seam between core logic and the outside world:
//! an object-safe [`HttpClient`] trait with value-type requests and
//! responses, a reqwest-backed implementation for production use, and an
//! injectable [`Clock`] so time-dependent logic stays deterministic in
//! tests.
//!
//! Core crates depend on `Arc<dyn HttpClient>` / `Arc<dyn Clock>` rather
//! than on reqwest or the system clock directly.

pub mod client;
pub mod error;
pub mod reqwest_client;
pub mod time;

pub use client::{HttpClient, HttpMethod, HttpRequest, HttpResponse};
pub use error::{BridgeError, Result};
pub use reqwest_client::ReqwestHttpClient;
pub use time::{Clock, SystemClock};
