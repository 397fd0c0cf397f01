//! KPI 彙總

use rust_decimal::Decimal;
use serde::Serialize;
use spare_core::{DueWindow, LifecycleConfig, PartRecord, ReferenceDate, SpareError};

use crate::classifier::{ClassifiedRecord, LifecycleClassifier, UrgencyBucket};
use crate::dedup::Deduplicator;

/// KPI 項目（順序固定）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum KpiKind {
    /// 監控中的備品數（去重後）
    MonitoredParts,
    /// 重要備品數
    VitalParts,
    /// 到期窗口內的備品數
    DueSoon,
    /// 逾期備品數
    Overdue,
}

impl KpiKind {
    /// 所有 KPI，依畫面顯示順序
    pub const ALL: [KpiKind; 4] = [
        KpiKind::MonitoredParts,
        KpiKind::VitalParts,
        KpiKind::DueSoon,
        KpiKind::Overdue,
    ];

    /// 顯示名稱
    pub fn label(&self, machine: &str, window: DueWindow) -> String {
        match self {
            KpiKind::MonitoredParts => format!("Total Sparepart Terpantau ({})", machine),
            KpiKind::VitalParts => "Part Vital".to_string(),
            KpiKind::DueSoon => match window {
                DueWindow::Days(days) => format!("Part akan diganti dalam {} hari", days),
                DueWindow::CalendarMonth => "Part akan diganti bulan ini".to_string(),
            },
            KpiKind::Overdue => "Part overdue (belum diganti)".to_string(),
        }
    }
}

/// KPI 表格的一列
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KpiRow {
    pub kind: KpiKind,
    pub label: String,
    /// 顯示值，例如 `"3 part"`；計算失敗為 `"-"`
    pub value: String,
    pub count: Option<usize>,
    pub error: Option<String>,
}

impl KpiRow {
    fn from_result(kind: KpiKind, label: String, result: spare_core::Result<usize>) -> Self {
        match result {
            Ok(count) => Self {
                kind,
                label,
                value: format!("{} part", count),
                count: Some(count),
                error: None,
            },
            Err(e) => {
                tracing::warn!("KPI {:?} 計算失敗: {}", kind, e);
                Self {
                    kind,
                    label,
                    value: "-".to_string(),
                    count: None,
                    error: Some(e.to_string()),
                }
            }
        }
    }
}

/// KPI 彙總器
pub struct KpiAggregator;

impl KpiAggregator {
    /// 計算已判定紀錄的 KPI
    ///
    /// 一律以（料號, 品名）去重並保留第一筆後再計數。
    /// 輸入為空時每一列都是 `0 part`；單一 KPI 失敗不影響其他列。
    pub fn calculate(
        records: &[ClassifiedRecord],
        machine: &str,
        config: &LifecycleConfig,
    ) -> Vec<KpiRow> {
        let distinct = Deduplicator::distinct_parts(records);

        tracing::debug!(
            "KPI 計算：機台 {}，紀錄 {} 筆，去重後 {} 筆",
            machine,
            records.len(),
            distinct.len()
        );

        KpiKind::ALL
            .iter()
            .map(|&kind| {
                let label = kind.label(machine, config.due_window);
                KpiRow::from_result(kind, label, Self::count(kind, &distinct))
            })
            .collect()
    }

    /// 從未判定的紀錄計算 KPI（以參考日期判定後再彙總）
    pub fn from_records(
        records: &[PartRecord],
        machine: &str,
        reference: &ReferenceDate,
        config: &LifecycleConfig,
    ) -> Vec<KpiRow> {
        let classified = LifecycleClassifier::classify_all(records.to_vec(), reference, config);
        Self::calculate(&classified, machine, config)
    }

    fn count(kind: KpiKind, distinct: &[ClassifiedRecord]) -> spare_core::Result<usize> {
        let in_bucket = |bucket: UrgencyBucket| {
            distinct
                .iter()
                .filter(|r| r.classification.bucket == bucket)
                .count()
        };

        match kind {
            KpiKind::MonitoredParts => {
                if let Some(missing) = distinct.iter().find(|r| !r.record.has_identity()) {
                    return Err(SpareError::MissingField(format!(
                        "機台 {} 有紀錄缺少料號與品名",
                        missing.record.machine
                    )));
                }
                Ok(distinct.len())
            }
            KpiKind::VitalParts => Ok(distinct.iter().filter(|r| r.classification.vital).count()),
            KpiKind::DueSoon => Ok(in_bucket(UrgencyBucket::UrgentThisWindow)),
            KpiKind::Overdue => Ok(in_bucket(UrgencyBucket::Overdue)),
        }
    }

    /// 平均交期（天），交期未知的紀錄不列入；沒有任何已知交期時回傳 `None`
    pub fn average_leadtime<T: AsRef<PartRecord>>(records: &[T]) -> Option<Decimal> {
        let known: Vec<Decimal> = records
            .iter()
            .filter_map(|r| r.as_ref().leadtime_days)
            .collect();

        if known.is_empty() {
            return None;
        }

        let total: Decimal = known.iter().sum();
        Some(total / Decimal::from(known.len()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn reference() -> ReferenceDate {
        ReferenceDate::new(NaiveDate::from_ymd_opt(2025, 1, 1).unwrap())
    }

    fn part(code: &str, name: &str) -> PartRecord {
        PartRecord::new("CHIMEI 1".to_string(), code.to_string(), name.to_string())
    }

    fn values(rows: &[KpiRow]) -> Vec<&str> {
        rows.iter().map(|r| r.value.as_str()).collect()
    }

    #[test]
    fn test_empty_records() {
        let config = LifecycleConfig::default();

        let rows = KpiAggregator::from_records(&[], "CHIMEI", &reference(), &config);

        assert_eq!(rows.len(), 4);
        assert_eq!(values(&rows), vec!["0 part"; 4]);
        assert_eq!(rows[0].label, "Total Sparepart Terpantau (CHIMEI)");
        assert!(rows.iter().all(|r| r.error.is_none()));
    }

    #[test]
    fn test_counts_over_distinct_parts() {
        let config = LifecycleConfig::default();
        let records = vec![
            part("A1", "Belt").with_category("Vital").with_next_replacement("03/01/2025"),
            // 重複料號：保留第一筆，不重複計數
            part("A1", "Belt").with_category("Vital").with_next_replacement("01/12/2024"),
            part("A2", "Seal").with_status("Melewati Jadwal Penggantian"),
            part("A3", "Bearing").with_next_replacement("20/12/2024"),
            part("A4", "Nozzle").with_next_replacement("01/06/2025"),
        ];

        let rows = KpiAggregator::from_records(&records, "CHIMEI 1", &reference(), &config);

        let kinds: Vec<KpiKind> = rows.iter().map(|r| r.kind).collect();
        assert_eq!(kinds, KpiKind::ALL.to_vec());
        assert_eq!(values(&rows), vec!["4 part", "1 part", "1 part", "2 part"]);
        assert_eq!(rows[2].label, "Part akan diganti dalam 7 hari");
    }

    #[test]
    fn test_failed_kpi_does_not_abort_batch() {
        let config = LifecycleConfig::default();
        let records = vec![
            part("A1", "Belt").with_status("Melewati"),
            part("", "").with_category("Vital"),
        ];

        let rows = KpiAggregator::from_records(&records, "CHIMEI 1", &reference(), &config);

        assert_eq!(rows.len(), 4);
        assert_eq!(rows[0].value, "-");
        assert_eq!(rows[0].count, None);
        assert!(rows[0].error.is_some());
        assert_eq!(values(&rows)[1..], ["1 part", "0 part", "1 part"]);
    }

    #[test]
    fn test_rows_serialize_for_presentation() {
        let config = LifecycleConfig::default();
        let records = vec![
            part("A1", "Belt").with_status("Melewati"),
            part("", "").with_category("Vital"),
        ];

        let rows = KpiAggregator::from_records(&records, "CHIMEI 1", &reference(), &config);
        let value = serde_json::to_value(&rows).unwrap();

        assert_eq!(value[0]["kind"], "MonitoredParts");
        assert_eq!(value[0]["value"], "-");
        assert!(value[0]["count"].is_null());
        assert!(value[0]["error"].is_string());
        assert_eq!(value[3]["label"], "Part overdue (belum diganti)");
        assert_eq!(value[3]["count"], 1);
    }

    #[test]
    fn test_calendar_month_label() {
        let config = LifecycleConfig::default().with_due_window(DueWindow::CalendarMonth);

        let rows = KpiAggregator::from_records(&[], "SIG", &reference(), &config);

        assert_eq!(rows[2].label, "Part akan diganti bulan ini");
    }

    #[test]
    fn test_average_leadtime_skips_unknown() {
        let records = vec![
            part("A1", "Belt").with_leadtime_days(Decimal::from(10)),
            part("A2", "Seal"),
            part("A3", "Bearing").with_leadtime_days(Decimal::from(20)),
        ];

        assert_eq!(KpiAggregator::average_leadtime(&records), Some(Decimal::from(15)));

        let unknown = vec![part("A2", "Seal")];
        assert_eq!(KpiAggregator::average_leadtime(&unknown), None);
    }
}
