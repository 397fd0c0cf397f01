//! 備品紀錄模型

use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calendar::parse_sheet_date;
use crate::config::ColumnMap;
use crate::row::RawRow;

/// 單一機台上的一筆備品紀錄
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartRecord {
    /// 機台
    pub machine: String,

    /// 料號（不同機台可能重複）
    pub part_code: String,

    /// 品名
    pub part_name: String,

    /// 數量（無法解析為未知）
    pub quantity: Option<Decimal>,

    /// 分類（包含 Vital 為重要備品）
    pub category: String,

    /// 使用壽命（月）
    pub lifetime_months: Option<Decimal>,

    /// 上次更換日
    pub last_replaced_on: Option<NaiveDate>,

    /// 下次更換日（原文，`dd/mm/yyyy`）
    pub next_replacement_on: String,

    /// 外部提供的狀態文字
    pub status_text: String,

    /// 交期（天），無法解析為未知
    pub leadtime_days: Option<Decimal>,
}

impl PartRecord {
    /// 創建新的備品紀錄
    pub fn new(machine: String, part_code: String, part_name: String) -> Self {
        Self {
            machine,
            part_code,
            part_name,
            quantity: None,
            category: String::new(),
            lifetime_months: None,
            last_replaced_on: None,
            next_replacement_on: String::new(),
            status_text: String::new(),
            leadtime_days: None,
        }
    }

    /// 從已補齊欄位的資料列建立
    ///
    /// 缺少的欄位視為空字串，數值與日期無法解析時為未知，不會失敗。
    pub fn from_row(row: &RawRow, columns: &ColumnMap) -> Self {
        let text = |header: &str| row.get(header).cloned().unwrap_or_default();

        Self {
            machine: text(&columns.machine),
            part_code: text(&columns.part_code),
            part_name: text(&columns.part_name),
            quantity: parse_number(&text(&columns.quantity)),
            category: text(&columns.category),
            lifetime_months: parse_number(&text(&columns.lifetime_months)),
            last_replaced_on: parse_sheet_date(&text(&columns.last_replaced_on)),
            next_replacement_on: text(&columns.next_replacement_on),
            status_text: text(&columns.status_text),
            leadtime_days: parse_number(&text(&columns.leadtime_days)),
        }
    }

    /// 建構器模式：設置分類
    pub fn with_category(mut self, category: &str) -> Self {
        self.category = category.to_string();
        self
    }

    /// 建構器模式：設置狀態文字
    pub fn with_status(mut self, status_text: &str) -> Self {
        self.status_text = status_text.to_string();
        self
    }

    /// 建構器模式：設置下次更換日（原文）
    pub fn with_next_replacement(mut self, next_replacement_on: &str) -> Self {
        self.next_replacement_on = next_replacement_on.to_string();
        self
    }

    /// 建構器模式：設置數量
    pub fn with_quantity(mut self, quantity: Decimal) -> Self {
        self.quantity = Some(quantity);
        self
    }

    /// 建構器模式：設置交期
    pub fn with_leadtime_days(mut self, leadtime_days: Decimal) -> Self {
        self.leadtime_days = Some(leadtime_days);
        self
    }

    /// 下次更換日，無法解析為 `None`
    pub fn next_replacement_date(&self) -> Option<NaiveDate> {
        parse_sheet_date(&self.next_replacement_on)
    }

    /// 是否有可識別的料號或品名
    pub fn has_identity(&self) -> bool {
        !self.part_code.trim().is_empty() || !self.part_name.trim().is_empty()
    }
}

impl AsRef<PartRecord> for PartRecord {
    fn as_ref(&self) -> &PartRecord {
        self
    }
}

/// 解析數值欄位，空白或格式錯誤回傳 `None`
pub fn parse_number(text: &str) -> Option<Decimal> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }
    Decimal::from_str(text)
        .or_else(|_| Decimal::from_scientific(text))
        .ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_row() -> RawRow {
        [
            ("Mesin", "ILAPAK 1"),
            ("Kode Part", "A1"),
            ("Part", "Belt"),
            ("Qty", "2"),
            ("Category", "Vital"),
            ("Lifetime (Bulan)", "12"),
            ("Penggantian Terakhir", "05/01/2024"),
            ("Penggantian Selanjutnya", "05/01/2025"),
            ("STATUS", ""),
            ("Leadtime (Hari)", "30"),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
    }

    #[test]
    fn test_from_row() {
        let record = PartRecord::from_row(&sample_row(), &ColumnMap::default());

        assert_eq!(record.machine, "ILAPAK 1");
        assert_eq!(record.part_code, "A1");
        assert_eq!(record.part_name, "Belt");
        assert_eq!(record.quantity, Some(Decimal::from(2)));
        assert_eq!(record.lifetime_months, Some(Decimal::from(12)));
        assert_eq!(record.last_replaced_on, NaiveDate::from_ymd_opt(2024, 1, 5));
        assert_eq!(record.next_replacement_date(), NaiveDate::from_ymd_opt(2025, 1, 5));
        assert_eq!(record.leadtime_days, Some(Decimal::from(30)));
    }

    #[test]
    fn test_from_row_degrades_malformed_fields() {
        let mut row = sample_row();
        row.insert("Leadtime (Hari)".to_string(), "dua minggu".to_string());
        row.insert("Qty".to_string(), "".to_string());
        row.insert("Penggantian Terakhir".to_string(), "-".to_string());
        row.remove("STATUS");

        let record = PartRecord::from_row(&row, &ColumnMap::default());

        assert_eq!(record.leadtime_days, None);
        assert_eq!(record.quantity, None);
        assert_eq!(record.last_replaced_on, None);
        assert_eq!(record.status_text, "");
    }

    #[test]
    fn test_parse_number() {
        assert_eq!(parse_number(" 14 "), Some(Decimal::from(14)));
        assert_eq!(parse_number("1.5"), Some(Decimal::new(15, 1)));
        assert_eq!(parse_number("1e2"), Some(Decimal::from(100)));
        assert_eq!(parse_number(""), None);
        assert_eq!(parse_number("n/a"), None);
    }

    #[test]
    fn test_has_identity() {
        let record = PartRecord::new("SIG 1".to_string(), "".to_string(), " ".to_string());
        assert!(!record.has_identity());

        let record = PartRecord::new("SIG 1".to_string(), "B2".to_string(), "".to_string());
        assert!(record.has_identity());
    }
}
