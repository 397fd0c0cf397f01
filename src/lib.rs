//! # Sparelife
//!
//! 備品壽命狀態與 KPI 引擎的整合入口

pub mod logging;
pub mod view;

pub use spare_cache::{evaluate_cached, ResultCache, SnapshotCache};
pub use spare_calc::{
    format_duration, format_duration_with, remaining_phrase, AttentionFilter, AttentionItem,
    AttentionLevel, AttentionQuery, AttentionScope, ClassifiedRecord, DedupPolicy, Deduplicator,
    KpiAggregator, KpiKind, KpiRow, LifecycleClassifier, LifecycleEngine, LifecycleResult,
    LifecycleWarning, MachineView, RecordNormalizer, UrgencyBucket, WarningSeverity,
};
pub use spare_core::{
    load_all, rows_from_grid, DueWindow, InMemorySource, LifecycleConfig, PartRecord, RawRow,
    RecordSource, ReferenceDate, SpareError,
};
pub use view::{MachineSelection, ViewKind, ViewSelection};
