//! 判定結果快取

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use spare_calc::{LifecycleEngine, LifecycleResult};
use spare_core::{RawRow, ReferenceDate};

use crate::fingerprint::snapshot_fingerprint;

/// 預設存活時間（一小時）
pub const DEFAULT_TTL_SECONDS: i64 = 3600;

/// 快取鍵：機台類型 + 資料快照 + 參考日期
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    pub machine_type: String,
    pub fingerprint: u64,
    pub reference: ReferenceDate,
}

impl CacheKey {
    /// 由資料列快照建立
    pub fn new(machine_type: &str, rows: &[RawRow], reference: ReferenceDate) -> Self {
        Self {
            machine_type: machine_type.to_string(),
            fingerprint: snapshot_fingerprint(rows),
            reference,
        }
    }
}

struct CacheEntry<V> {
    value: Arc<V>,
    inserted_at: DateTime<Utc>,
}

/// 過期快取
///
/// 項目寫入後不再修改，只會在超過存活時間後失效；時間由呼叫端傳入。
pub struct SnapshotCache<V> {
    ttl: Duration,
    entries: HashMap<CacheKey, CacheEntry<V>>,
}

impl<V> SnapshotCache<V> {
    /// 創建快取
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: HashMap::new(),
        }
    }

    /// 存活時間
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// 取得未過期的項目
    pub fn get(&self, key: &CacheKey, now: DateTime<Utc>) -> Option<Arc<V>> {
        self.entries
            .get(key)
            .filter(|entry| !self.is_expired(entry, now))
            .map(|entry| Arc::clone(&entry.value))
    }

    /// 取得未過期的項目，沒有則計算並寫入
    ///
    /// 未過期的項目不會被覆寫；未命中時先清除所有過期項目再寫入。
    pub fn get_or_insert_with<F>(
        &mut self,
        key: CacheKey,
        now: DateTime<Utc>,
        compute: F,
    ) -> Arc<V>
    where
        F: FnOnce() -> V,
    {
        if let Some(value) = self.get(&key, now) {
            tracing::debug!("快取命中: {}", key.machine_type);
            return value;
        }

        tracing::debug!("快取未命中: {}", key.machine_type);
        let purged = self.purge_expired(now);
        if purged > 0 {
            tracing::debug!("清除過期快取 {} 筆", purged);
        }

        let value = Arc::new(compute());
        self.entries.insert(
            key,
            CacheEntry {
                value: Arc::clone(&value),
                inserted_at: now,
            },
        );
        value
    }

    /// 移除所有過期項目，回傳移除數量
    pub fn purge_expired(&mut self, now: DateTime<Utc>) -> usize {
        let ttl = self.ttl;
        let before = self.entries.len();
        self.entries.retain(|_, entry| now - entry.inserted_at < ttl);
        before - self.entries.len()
    }

    /// 項目數量（含尚未清除的過期項目）
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn is_expired(&self, entry: &CacheEntry<V>, now: DateTime<Utc>) -> bool {
        now - entry.inserted_at >= self.ttl
    }
}

impl<V> Default for SnapshotCache<V> {
    fn default() -> Self {
        Self::new(Duration::seconds(DEFAULT_TTL_SECONDS))
    }
}

/// 判定結果快取
pub type ResultCache = SnapshotCache<LifecycleResult>;

/// 以快取執行判定
///
/// 相同機台類型、相同資料快照與相同參考日期在存活時間內共用同一份結果。
pub fn evaluate_cached(
    engine: &LifecycleEngine,
    cache: &mut ResultCache,
    machine_type: &str,
    rows: &[RawRow],
    reference: ReferenceDate,
    now: DateTime<Utc>,
) -> Arc<LifecycleResult> {
    let key = CacheKey::new(machine_type, rows, reference);
    cache.get_or_insert_with(key, now, || engine.evaluate(rows, &reference))
}
