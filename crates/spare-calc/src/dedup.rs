//! 去除重複備品

use std::collections::hash_map::Entry;
use std::collections::{HashMap, HashSet};
use std::hash::Hash;

use spare_core::PartRecord;

/// 去重保留規則
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DedupPolicy {
    /// 保留輸入順序中第一筆
    FirstSeen,
    /// 保留下次更換日最早的一筆（日期未知的排在最後，同日以先出現者為準）
    ///
    /// 結果位置仍依該鍵第一次出現的位置排列。
    SoonestReplacement,
}

/// 備品識別鍵（料號, 品名）
pub fn part_key(record: &PartRecord) -> (String, String) {
    (record.part_code.clone(), record.part_name.clone())
}

/// 單一機台內的識別鍵（機台, 料號）
pub fn machine_part_key(record: &PartRecord) -> (String, String) {
    (record.machine.clone(), record.part_code.clone())
}

/// 去重器
pub struct Deduplicator;

impl Deduplicator {
    /// 依識別鍵去重，每個鍵只保留一筆
    pub fn dedup_by<T, K, F>(records: &[T], key: F, policy: DedupPolicy) -> Vec<T>
    where
        T: AsRef<PartRecord> + Clone,
        K: Eq + Hash,
        F: Fn(&PartRecord) -> K,
    {
        match policy {
            DedupPolicy::FirstSeen => {
                let mut seen = HashSet::new();
                records
                    .iter()
                    .filter(|r| seen.insert(key((*r).as_ref())))
                    .cloned()
                    .collect()
            }
            DedupPolicy::SoonestReplacement => {
                let mut kept: Vec<T> = Vec::new();
                let mut positions: HashMap<K, usize> = HashMap::new();

                for record in records {
                    match positions.entry(key(record.as_ref())) {
                        Entry::Vacant(slot) => {
                            slot.insert(kept.len());
                            kept.push(record.clone());
                        }
                        Entry::Occupied(slot) => {
                            let current = &mut kept[*slot.get()];
                            let candidate = record.as_ref().next_replacement_date();
                            let existing = current.as_ref().next_replacement_date();
                            let sooner = match (candidate, existing) {
                                (Some(c), Some(e)) => c < e,
                                (Some(_), None) => true,
                                _ => false,
                            };
                            if sooner {
                                *current = record.clone();
                            }
                        }
                    }
                }

                kept
            }
        }
    }

    /// 以（料號, 品名）去重，保留第一筆
    pub fn distinct_parts<T>(records: &[T]) -> Vec<T>
    where
        T: AsRef<PartRecord> + Clone,
    {
        Self::dedup_by(records, part_key, DedupPolicy::FirstSeen)
    }
}
