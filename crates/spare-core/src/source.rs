//! 原始資料來源

use std::collections::HashMap;

use crate::row::{rows_from_grid, RawRow};
use crate::{Result, SpareError};

/// 原始資料來源（依機台類型取得資料列）
///
/// 實作端負責連線、認證與來源格式；引擎只消費取得後的資料列。
pub trait RecordSource {
    /// 取得指定機台類型的所有資料列
    fn fetch(&self, machine_type: &str) -> Result<Vec<RawRow>>;
}

/// 記憶體資料來源
#[derive(Debug, Clone, Default)]
pub struct InMemorySource {
    sheets: HashMap<String, Vec<RawRow>>,
}

impl InMemorySource {
    /// 創建空的資料來源
    pub fn new() -> Self {
        Self::default()
    }

    /// 建構器模式：加入已轉換的資料列
    pub fn with_rows(mut self, machine_type: &str, rows: Vec<RawRow>) -> Self {
        self.sheets.insert(machine_type.to_string(), rows);
        self
    }

    /// 建構器模式：加入試算表網格（第二行為欄位標題）
    pub fn with_grid(self, machine_type: &str, grid: &[Vec<String>]) -> Self {
        self.with_rows(machine_type, rows_from_grid(grid))
    }
}

impl RecordSource for InMemorySource {
    fn fetch(&self, machine_type: &str) -> Result<Vec<RawRow>> {
        self.sheets
            .get(machine_type)
            .cloned()
            .ok_or_else(|| SpareError::SourceUnavailable(format!("找不到工作表: {}", machine_type)))
    }
}

/// 載入所有機台類型的資料列（依傳入順序）
///
/// 來源不可用或找不到工作表時，該機台類型回傳空集合並記錄警告。
pub fn load_all<S: RecordSource + ?Sized>(
    source: &S,
    machine_types: &[String],
) -> Vec<(String, Vec<RawRow>)> {
    machine_types
        .iter()
        .map(|machine_type| {
            let rows = match source.fetch(machine_type) {
                Ok(rows) => rows,
                Err(e) => {
                    tracing::warn!("機台類型 {} 載入失敗，以空資料處理: {}", machine_type, e);
                    Vec::new()
                }
            };
            tracing::debug!("機台類型 {} 資料列: {}", machine_type, rows.len());
            (machine_type.clone(), rows)
        })
        .collect()
}
