//! Workspace facade crate.
//!
//! Host applications can depend on `channel-core` alone and reach every
//! workspace crate through the re-exports below instead of wiring each
//! member crate individually.

pub use bridge_http;
pub use core_cache;
pub use core_carousel;
pub use core_runtime;
pub use core_service;
pub use provider_youtube;
