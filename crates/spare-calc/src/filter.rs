//! 待處理清單篩選

use serde::Serialize;
use spare_core::{LifecycleConfig, PartRecord, SearchField};

use crate::classifier::ClassifiedRecord;
use crate::duration::remaining_phrase;

/// 篩選範圍
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum AttentionScope {
    /// 所有紀錄
    #[default]
    Everything,
    /// 只看重要備品且狀態含急件標記（通知清單）
    VitalUrgent,
}

/// 篩選條件
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AttentionQuery {
    /// 狀態篩選代號（「全部」代號不篩選）
    pub status: String,
    /// 自由文字搜尋
    pub search: String,
    /// 篩選範圍
    pub scope: AttentionScope,
}

impl AttentionQuery {
    /// 不篩選
    pub fn all() -> Self {
        Self {
            status: "all".to_string(),
            search: String::new(),
            scope: AttentionScope::Everything,
        }
    }

    /// 建構器模式：設置狀態篩選
    pub fn with_status(mut self, status: &str) -> Self {
        self.status = status.to_string();
        self
    }

    /// 建構器模式：設置搜尋文字
    pub fn with_search(mut self, search: &str) -> Self {
        self.search = search.to_string();
        self
    }

    /// 建構器模式：設置篩選範圍
    pub fn with_scope(mut self, scope: AttentionScope) -> Self {
        self.scope = scope;
        self
    }
}

impl Default for AttentionQuery {
    fn default() -> Self {
        Self::all()
    }
}

/// 處理方式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum AttentionLevel {
    /// 需下單
    Reorder,
    /// 需更換
    Replace,
}

impl AttentionLevel {
    /// 依狀態文字判斷
    pub fn of(record: &PartRecord, config: &LifecycleConfig) -> Self {
        if record.status_text.contains(config.reorder_marker.as_str()) {
            AttentionLevel::Reorder
        } else {
            AttentionLevel::Replace
        }
    }
}

/// 待處理清單項目
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AttentionItem {
    pub record: ClassifiedRecord,
    pub level: AttentionLevel,
    /// 剩餘時間文字
    pub remaining: String,
}

/// 待處理清單篩選器
pub struct AttentionFilter;

impl AttentionFilter {
    /// 依狀態代號與搜尋文字篩選（保持輸入順序）
    ///
    /// - 狀態代號為「全部」時不篩選，否則狀態文字須包含代號（區分大小寫）
    /// - 搜尋文字非空時，任一搜尋欄位包含搜尋文字即符合（不分大小寫）
    pub fn apply<T>(records: &[T], status_token: &str, search: &str, config: &LifecycleConfig) -> Vec<T>
    where
        T: AsRef<PartRecord> + Clone,
    {
        let search = search.trim().to_lowercase();
        let all_status = config.is_all_sentinel(status_token);

        records
            .iter()
            .filter(|r| {
                let record = (*r).as_ref();
                (all_status || record.status_text.contains(status_token))
                    && (search.is_empty() || Self::matches_search(record, &search, config))
            })
            .cloned()
            .collect()
    }

    /// 依完整條件篩選（含篩選範圍）
    pub fn apply_query<T>(records: &[T], query: &AttentionQuery, config: &LifecycleConfig) -> Vec<T>
    where
        T: AsRef<PartRecord> + Clone,
    {
        let scoped: Vec<T> = match query.scope {
            AttentionScope::Everything => records.to_vec(),
            AttentionScope::VitalUrgent => records
                .iter()
                .filter(|r| {
                    let record = (*r).as_ref();
                    config.is_vital_category(&record.category)
                        && config.is_urgent_status(&record.status_text)
                })
                .cloned()
                .collect(),
        };

        Self::apply(&scoped, &query.status, &query.search, config)
    }

    /// 產生待處理清單項目
    pub fn items(
        records: &[ClassifiedRecord],
        query: &AttentionQuery,
        config: &LifecycleConfig,
    ) -> Vec<AttentionItem> {
        Self::apply_query(records, query, config)
            .into_iter()
            .map(|record| {
                let level = AttentionLevel::of(&record.record, config);
                let remaining = remaining_phrase(
                    record.classification.days_until_replacement,
                    &config.duration_labels,
                );
                AttentionItem {
                    record,
                    level,
                    remaining,
                }
            })
            .collect()
    }

    fn matches_search(record: &PartRecord, search: &str, config: &LifecycleConfig) -> bool {
        config.search_fields.iter().any(|field| {
            let text = match field {
                SearchField::Machine => &record.machine,
                SearchField::PartCode => &record.part_code,
                SearchField::PartName => &record.part_name,
                SearchField::Category => &record.category,
                SearchField::Status => &record.status_text,
            };
            text.to_lowercase().contains(search)
        })
    }
}
