//! # TTL Cache Store
//!
//! In-memory cache keyed by request identity, with advisory time-to-live
//! expiry. Entries past their expiry behave as absent and are evicted
//! lazily on lookup; a scheduled sweep evicts entries nobody asks for.
//!
//! ## Overview
//!
//! The store is an explicitly constructed, injectable object: create it at
//! application start, share it via `Arc`, and stop its sweep task at
//! shutdown. There is no ambient global state.
//!
//! Concurrent `set` calls for the same key are last-write-wins; the store
//! does not serialize writers and does not deduplicate concurrent
//! in-flight fetches for the same key — callers own that decision.
//!
//! ## Usage
//!
//! ```ignore
//! use core_cache::CacheStore;
//! use bridge_http::SystemClock;
//! use std::sync::Arc;
//! use std::time::Duration;
//!
//! let store: Arc<CacheStore<String>> = Arc::new(CacheStore::new(Arc::new(SystemClock)));
//! let sweeper = CacheStore::spawn_sweeper(&store, Duration::from_secs(60));
//!
//! store.set("stats".to_string(), "cached".to_string(), Duration::from_secs(300));
//! assert_eq!(store.get("stats"), Some("cached".to_string()));
//!
//! sweeper.shutdown();
//! ```

pub mod store;
pub mod sweep;

pub use store::CacheStore;
pub use sweep::SweeperHandle;
