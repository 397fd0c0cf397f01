//! # Spare Cache
//!
//! 判定結果的過期快取

pub mod fingerprint;
pub mod snapshot;

// Re-export 主要類型
pub use fingerprint::snapshot_fingerprint;
pub use snapshot::{evaluate_cached, CacheKey, ResultCache, SnapshotCache, DEFAULT_TTL_SECONDS};
