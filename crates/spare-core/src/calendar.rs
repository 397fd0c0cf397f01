//! 參考日期

use chrono::{Datelike, Local, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::{Result, SpareError};

/// 參考日期輸入格式（今天）
pub const TODAY_FORMAT: &str = "%d-%m-%Y";

/// 月份鍵格式
pub const MONTH_FORMAT: &str = "%Y-%m";

/// 來源工作表的日期格式
pub const SHEET_DATE_FORMAT: &str = "%d/%m/%Y";

/// 參考日期
///
/// 所有剩餘天數都以此日期計算，由呼叫端注入，引擎內部不讀取系統時間。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ReferenceDate {
    /// 今天
    pub today: NaiveDate,
}

impl ReferenceDate {
    /// 以指定日期建立
    pub fn new(today: NaiveDate) -> Self {
        Self { today }
    }

    /// 讀取系統本地日期（僅供外層呼叫端使用）
    pub fn system() -> Self {
        Self::new(Local::now().date_naive())
    }

    /// 解析參考日期
    ///
    /// 接受 `dd-mm-yyyy`，也接受工作表的 `dd/mm/yyyy`。
    pub fn parse(text: &str) -> Result<Self> {
        let text = text.trim();
        NaiveDate::parse_from_str(text, TODAY_FORMAT)
            .or_else(|_| NaiveDate::parse_from_str(text, SHEET_DATE_FORMAT))
            .map(Self::new)
            .map_err(|_| SpareError::InvalidDate(text.to_string()))
    }

    /// 今天（`dd-mm-yyyy`）
    pub fn today_text(&self) -> String {
        self.today.format(TODAY_FORMAT).to_string()
    }

    /// 本月（`yyyy-mm`）
    pub fn month_key(&self) -> String {
        self.today.format(MONTH_FORMAT).to_string()
    }

    /// 計算到指定日期的天數（過去為負數）
    pub fn days_until(&self, date: NaiveDate) -> i64 {
        date.signed_duration_since(self.today).num_days()
    }

    /// 是否與今天同年同月
    pub fn is_same_month(&self, date: NaiveDate) -> bool {
        date.year() == self.today.year() && date.month() == self.today.month()
    }
}

/// 解析工作表日期（`dd/mm/yyyy`），無法解析回傳 `None`
pub fn parse_sheet_date(text: &str) -> Option<NaiveDate> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }
    NaiveDate::parse_from_str(text, SHEET_DATE_FORMAT).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_parse_reference_date() {
        let reference = ReferenceDate::parse("01-01-2025").unwrap();
        assert_eq!(reference.today, NaiveDate::from_ymd_opt(2025, 1, 1).unwrap());
        assert_eq!(reference.today_text(), "01-01-2025");
        assert_eq!(reference.month_key(), "2025-01");

        // 工作表格式也接受
        let reference = ReferenceDate::parse("15/03/2025").unwrap();
        assert_eq!(reference.month_key(), "2025-03");

        assert!(matches!(
            ReferenceDate::parse("2025-01-01"),
            Err(SpareError::InvalidDate(_))
        ));
    }

    #[test]
    fn test_days_until() {
        let reference = ReferenceDate::new(NaiveDate::from_ymd_opt(2025, 1, 1).unwrap());

        assert_eq!(reference.days_until(NaiveDate::from_ymd_opt(2025, 1, 8).unwrap()), 7);
        assert_eq!(reference.days_until(NaiveDate::from_ymd_opt(2024, 12, 31).unwrap()), -1);
        assert_eq!(reference.days_until(reference.today), 0);
    }

    #[test]
    fn test_same_month() {
        let reference = ReferenceDate::new(NaiveDate::from_ymd_opt(2025, 2, 10).unwrap());

        assert!(reference.is_same_month(NaiveDate::from_ymd_opt(2025, 2, 28).unwrap()));
        assert!(!reference.is_same_month(NaiveDate::from_ymd_opt(2025, 3, 1).unwrap()));
        assert!(!reference.is_same_month(NaiveDate::from_ymd_opt(2024, 2, 10).unwrap()));
    }

    #[rstest]
    #[case("05/01/2099", Some((2099, 1, 5)))]
    #[case(" 31/12/2024 ", Some((2024, 12, 31)))]
    #[case("", None)]
    #[case("   ", None)]
    #[case("2025-01-05", None)]
    #[case("31/02/2025", None)]
    #[case("belum ada", None)]
    fn test_parse_sheet_date(#[case] text: &str, #[case] expected: Option<(i32, u32, u32)>) {
        let expected = expected.and_then(|(y, m, d)| NaiveDate::from_ymd_opt(y, m, d));
        assert_eq!(parse_sheet_date(text), expected);
    }
}
