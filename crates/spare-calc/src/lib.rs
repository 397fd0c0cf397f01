//! # Spare Lifecycle Engine
//!
//! 備品壽命狀態判定與 KPI 計算引擎

pub mod classifier;
pub mod dedup;
pub mod duration;
pub mod engine;
pub mod filter;
pub mod kpi;
pub mod normalizer;

// Re-export 主要類型
pub use classifier::{Classification, ClassifiedRecord, LifecycleClassifier, UrgencyBucket};
pub use dedup::{DedupPolicy, Deduplicator};
pub use duration::{format_duration, format_duration_with, remaining_phrase};
pub use engine::{LifecycleEngine, MachineView, NO_MACHINE_LABEL};
pub use filter::{AttentionFilter, AttentionItem, AttentionLevel, AttentionQuery, AttentionScope};
pub use kpi::{KpiAggregator, KpiKind, KpiRow};
pub use normalizer::{NormalizeReport, RecordNormalizer};

use serde::Serialize;
use spare_core::ReferenceDate;

/// 單次判定結果
#[derive(Debug, Clone, Serialize)]
pub struct LifecycleResult {
    /// 參考日期
    pub reference: ReferenceDate,

    /// 已判定的紀錄（保持輸入順序）
    pub records: Vec<ClassifiedRecord>,

    /// 資料品質警告
    pub warnings: Vec<LifecycleWarning>,

    /// 計算耗時（毫秒）
    pub calculation_time_ms: Option<u128>,
}

impl LifecycleResult {
    /// 創建空的判定結果
    pub fn empty(reference: ReferenceDate) -> Self {
        Self {
            reference,
            records: Vec::new(),
            warnings: Vec::new(),
            calculation_time_ms: None,
        }
    }

    /// 添加警告
    pub fn add_warning(&mut self, warning: LifecycleWarning) {
        self.warnings.push(warning);
    }
}

/// 資料品質警告
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LifecycleWarning {
    pub subject: String,
    pub message: String,
    pub severity: WarningSeverity,
}

impl LifecycleWarning {
    pub fn new(subject: String, message: String, severity: WarningSeverity) -> Self {
        Self {
            subject,
            message,
            severity,
        }
    }

    pub fn info(subject: String, message: String) -> Self {
        Self::new(subject, message, WarningSeverity::Info)
    }

    pub fn warning(subject: String, message: String) -> Self {
        Self::new(subject, message, WarningSeverity::Warning)
    }

    pub fn error(subject: String, message: String) -> Self {
        Self::new(subject, message, WarningSeverity::Error)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum WarningSeverity {
    Info,
    Warning,
    Error,
}
