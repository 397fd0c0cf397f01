//! 資料列正規化

use spare_core::{ColumnMap, PartRecord, RawRow};

/// 正規化統計
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NormalizeReport {
    /// 處理的資料列數
    pub rows: usize,
    /// 補上的空白欄位數
    pub filled_fields: usize,
    /// 交期無法解析（含空白）的紀錄數
    pub unknown_leadtime: usize,
    /// 下次更換日有值但無法解析的紀錄數
    pub unparseable_dates: usize,
}

/// 資料列正規化器
pub struct RecordNormalizer;

impl RecordNormalizer {
    /// 補齊必要欄位
    ///
    /// 缺少的欄位補空字串；既有欄位原樣保留，因此對已正規化的資料再次執行不會改變結果。
    pub fn normalize(rows: &[RawRow], required: &[&str]) -> Vec<RawRow> {
        Self::normalize_counted(rows, required).0
    }

    fn normalize_counted(rows: &[RawRow], required: &[&str]) -> (Vec<RawRow>, usize) {
        let mut filled = 0;

        let normalized = rows
            .iter()
            .map(|row| {
                let mut row = row.clone();
                for &field in required {
                    if !row.contains_key(field) {
                        row.insert(field.to_string(), String::new());
                        filled += 1;
                    }
                }
                row
            })
            .collect();

        (normalized, filled)
    }

    /// 補齊欄位並轉換為備品紀錄
    pub fn to_records(rows: &[RawRow], columns: &ColumnMap) -> (Vec<PartRecord>, NormalizeReport) {
        let (rows, filled_fields) = Self::normalize_counted(rows, &columns.required());

        let mut report = NormalizeReport {
            rows: rows.len(),
            filled_fields,
            ..NormalizeReport::default()
        };

        let records: Vec<PartRecord> = rows
            .iter()
            .map(|row| PartRecord::from_row(row, columns))
            .collect();

        for record in &records {
            if record.leadtime_days.is_none() {
                report.unknown_leadtime += 1;
            }
            if !record.next_replacement_on.trim().is_empty()
                && record.next_replacement_date().is_none()
            {
                report.unparseable_dates += 1;
            }
        }

        if report.filled_fields > 0 {
            tracing::debug!("補齊缺少欄位 {} 個", report.filled_fields);
        }

        (records, report)
    }
}
