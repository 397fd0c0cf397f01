//! 資料快照指紋

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use spare_core::RawRow;

/// 計算資料列快照的指紋
///
/// 內容與順序完全相同的快照得到相同指紋；只在同一個行程內比較。
pub fn snapshot_fingerprint(rows: &[RawRow]) -> u64 {
    let mut hasher = DefaultHasher::new();
    rows.hash(&mut hasher);
    hasher.finish()
}
