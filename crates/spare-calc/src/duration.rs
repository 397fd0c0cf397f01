//! 剩餘時間文字

use spare_core::DurationLabels;

const DAYS_PER_YEAR: u32 = 365;
const DAYS_PER_MONTH: u32 = 30;

/// 以預設文字格式化剩餘天數
pub fn format_duration(days: u32) -> String {
    format_duration_with(days, &DurationLabels::default())
}

/// 格式化剩餘天數
///
/// 拆成整年（365 天）、整月（30 天）與剩餘天數，只列出非零的單位，
/// 最後接上延續詞；0 天回傳「沒有剩餘時間」。
pub fn format_duration_with(days: u32, labels: &DurationLabels) -> String {
    if days == 0 {
        return labels.none_left.clone();
    }

    let years = days / DAYS_PER_YEAR;
    let months = (days % DAYS_PER_YEAR) / DAYS_PER_MONTH;
    let rest = (days % DAYS_PER_YEAR) % DAYS_PER_MONTH;

    let parts: Vec<String> = [(years, &labels.year), (months, &labels.month), (rest, &labels.day)]
        .into_iter()
        .filter(|(count, _)| *count > 0)
        .map(|(count, unit)| format!("{} {}", count, unit))
        .collect();

    format!("{}{}", parts.join(labels.separator.as_str()), labels.continuation)
}

/// 畫面用剩餘時間
///
/// 先處理日期未知與已過期，只有非負天數才交給 [`format_duration_with`]。
pub fn remaining_phrase(days_until: Option<i64>, labels: &DurationLabels) -> String {
    match days_until {
        None => labels.unknown.clone(),
        Some(days) if days < 0 => {
            format!("{} {} {}", labels.overdue_prefix, days.unsigned_abs(), labels.day)
        }
        Some(days) => {
            let days = u32::try_from(days).unwrap_or(u32::MAX);
            format_duration_with(days, labels)
        }
    }
}
