//! # Spare Core
//!
//! 備品壽命追蹤的核心資料模型與類型定義

pub mod calendar;
pub mod config;
pub mod record;
pub mod row;
pub mod source;

// Re-export 主要類型
pub use calendar::ReferenceDate;
pub use config::{ColumnMap, DueWindow, DurationLabels, LifecycleConfig, SearchField};
pub use record::PartRecord;
pub use row::{rows_from_grid, RawRow};
pub use source::{load_all, InMemorySource, RecordSource};

/// 備品壽命錯誤類型
#[derive(Debug, thiserror::Error)]
pub enum SpareError {
    #[error("缺少欄位: {0}")]
    MissingField(String),

    #[error("無效的日期: {0}")]
    InvalidDate(String),

    #[error("無效的數值: {0}")]
    InvalidNumber(String),

    #[error("配置錯誤: {0}")]
    InvalidConfig(String),

    #[error("資料來源不可用: {0}")]
    SourceUnavailable(String),

    #[error("其他錯誤: {0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, SpareError>;
