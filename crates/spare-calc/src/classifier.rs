//! 更換狀態判定

use serde::Serialize;
use spare_core::{DueWindow, LifecycleConfig, PartRecord, ReferenceDate};

/// 緊急程度
///
/// 依緊急程度由低到高排列，可直接比較。
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum UrgencyBucket {
    /// 一般
    Normal,
    /// 到期窗口內（預設 7 天內）
    UrgentThisWindow,
    /// 已逾期
    Overdue,
}

/// 判定結果
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Classification {
    /// 距離下次更換的天數（過去為負數，日期未知為 `None`）
    pub days_until_replacement: Option<i64>,

    /// 緊急程度
    pub bucket: UrgencyBucket,

    /// 重要備品標記（與緊急程度無關）
    pub vital: bool,
}

/// 附帶判定結果的備品紀錄
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClassifiedRecord {
    #[serde(flatten)]
    pub record: PartRecord,

    #[serde(flatten)]
    pub classification: Classification,
}

impl AsRef<PartRecord> for ClassifiedRecord {
    fn as_ref(&self) -> &PartRecord {
        &self.record
    }
}

/// 更換狀態判定器
pub struct LifecycleClassifier;

impl LifecycleClassifier {
    /// 判定單筆紀錄
    ///
    /// 規則（順序執行，命中即返回）:
    /// 1) 狀態文字含逾期標記，或天數已知且為負 → Overdue
    /// 2) 天數已知且落在到期窗口內，或日期未知且狀態文字含急件標記 → UrgentThisWindow
    /// 3) 其他 → Normal
    ///
    /// 日期已知時急件只看到期窗口；日期未知時只有狀態文字能判定為逾期或急件。
    pub fn classify(
        record: &PartRecord,
        reference: &ReferenceDate,
        config: &LifecycleConfig,
    ) -> Classification {
        let next_date = record.next_replacement_date();
        let days = next_date.map(|date| reference.days_until(date));

        let bucket = if config.is_overdue_status(&record.status_text)
            || matches!(days, Some(d) if d < 0)
        {
            UrgencyBucket::Overdue
        } else if Self::in_due_window(days, next_date, reference, config.due_window)
            || (days.is_none() && config.is_urgent_status(&record.status_text))
        {
            UrgencyBucket::UrgentThisWindow
        } else {
            UrgencyBucket::Normal
        };

        Classification {
            days_until_replacement: days,
            bucket,
            vital: config.is_vital_category(&record.category),
        }
    }

    /// 判定整批紀錄（保持輸入順序）
    pub fn classify_all(
        records: Vec<PartRecord>,
        reference: &ReferenceDate,
        config: &LifecycleConfig,
    ) -> Vec<ClassifiedRecord> {
        records
            .into_iter()
            .map(|record| {
                let classification = Self::classify(&record, reference, config);
                ClassifiedRecord {
                    record,
                    classification,
                }
            })
            .collect()
    }

    fn in_due_window(
        days: Option<i64>,
        next_date: Option<chrono::NaiveDate>,
        reference: &ReferenceDate,
        window: DueWindow,
    ) -> bool {
        match (days, next_date) {
            (Some(d), _) if d < 0 => false,
            (Some(d), _) if matches!(window, DueWindow::Days(n) if d <= i64::from(n)) => true,
            (Some(_), Some(date)) if window == DueWindow::CalendarMonth => {
                reference.is_same_month(date)
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kpi::KpiAggregator;
    use chrono::NaiveDate;
    use rstest::rstest;

    fn reference() -> ReferenceDate {
        ReferenceDate::new(NaiveDate::from_ymd_opt(2025, 1, 1).unwrap())
    }

    fn part(next: &str, status: &str) -> PartRecord {
        PartRecord::new("ILAPAK 1".to_string(), "A1".to_string(), "Belt".to_string())
            .with_next_replacement(next)
            .with_status(status)
    }

    #[rstest]
    #[case("31/12/2024", "", Some(-1), UrgencyBucket::Overdue)]
    #[case("01/01/2025", "", Some(0), UrgencyBucket::UrgentThisWindow)]
    #[case("08/01/2025", "", Some(7), UrgencyBucket::UrgentThisWindow)]
    #[case("09/01/2025", "", Some(8), UrgencyBucket::Normal)]
    #[case("", "", None, UrgencyBucket::Normal)]
    #[case("bukan tanggal", "", None, UrgencyBucket::Normal)]
    #[case("", "Melewati Jadwal Penggantian", None, UrgencyBucket::Overdue)]
    #[case("", "Segera Jadwalkan Penggantian", None, UrgencyBucket::UrgentThisWindow)]
    #[case("05/01/2099", "Melewati", Some(27032), UrgencyBucket::Overdue)]
    #[case("05/01/2099", "Segera Lakukan Pemesanan", Some(27032), UrgencyBucket::Normal)]
    #[case("04/01/2025", "Segera Lakukan Pemesanan", Some(3), UrgencyBucket::UrgentThisWindow)]
    fn test_classify(
        #[case] next: &str,
        #[case] status: &str,
        #[case] expected_days: Option<i64>,
        #[case] expected_bucket: UrgencyBucket,
    ) {
        let config = LifecycleConfig::default();

        let result = LifecycleClassifier::classify(&part(next, status), &reference(), &config);

        assert_eq!(result.days_until_replacement, expected_days);
        assert_eq!(result.bucket, expected_bucket);
    }

    #[test]
    fn test_vital_is_independent_of_bucket() {
        let config = LifecycleConfig::default();

        let overdue = part("01/12/2024", "").with_category("Vital");
        let normal = part("05/01/2099", "").with_category("vital part");
        let standard = part("01/12/2024", "").with_category("Standard");

        let overdue = LifecycleClassifier::classify(&overdue, &reference(), &config);
        let normal = LifecycleClassifier::classify(&normal, &reference(), &config);
        let standard = LifecycleClassifier::classify(&standard, &reference(), &config);

        assert!(overdue.vital);
        assert_eq!(overdue.bucket, UrgencyBucket::Overdue);
        assert!(normal.vital);
        assert_eq!(normal.bucket, UrgencyBucket::Normal);
        assert!(!standard.vital);
    }

    #[test]
    fn test_calendar_month_window() {
        let config = LifecycleConfig::default().with_due_window(DueWindow::CalendarMonth);
        let reference = ReferenceDate::new(NaiveDate::from_ymd_opt(2025, 1, 20).unwrap());

        let end_of_month = LifecycleClassifier::classify(&part("31/01/2025", ""), &reference, &config);
        let next_month = LifecycleClassifier::classify(&part("01/02/2025", ""), &reference, &config);
        let earlier = LifecycleClassifier::classify(&part("10/01/2025", ""), &reference, &config);

        assert_eq!(end_of_month.bucket, UrgencyBucket::UrgentThisWindow);
        assert_eq!(next_month.bucket, UrgencyBucket::Normal);
        // 同月但已過期
        assert_eq!(earlier.bucket, UrgencyBucket::Overdue);
    }

    #[test]
    fn test_custom_window_width() {
        let config = LifecycleConfig::default().with_due_window(DueWindow::Days(30));

        let result = LifecycleClassifier::classify(&part("31/01/2025", ""), &reference(), &config);

        assert_eq!(result.days_until_replacement, Some(30));
        assert_eq!(result.bucket, UrgencyBucket::UrgentThisWindow);
    }

    #[test]
    fn test_earlier_date_is_never_less_urgent() {
        let statuses = ["", "Segera Lakukan Pemesanan", "Melewati"];
        let windows = [DueWindow::Days(7), DueWindow::CalendarMonth];
        let start = NaiveDate::from_ymd_opt(2024, 11, 1).unwrap();

        for window in windows {
            let config = LifecycleConfig::default().with_due_window(window);
            for status in statuses {
                let buckets: Vec<UrgencyBucket> = (0..120)
                    .map(|offset| {
                        let date = start + chrono::Duration::days(offset);
                        let next = date.format("%d/%m/%Y").to_string();
                        LifecycleClassifier::classify(&part(&next, status), &reference(), &config)
                            .bucket
                    })
                    .collect();

                for pair in buckets.windows(2) {
                    assert!(pair[0] >= pair[1], "{:?} {:?} {:?}", window, status, pair);
                }
            }
        }
    }

    #[test]
    fn test_urgent_status_does_not_move_far_dates_into_window() {
        let config = LifecycleConfig::default();
        let records = vec![
            part("05/01/2099", "Segera Lakukan Pemesanan").with_category("Vital"),
            part("", "Segera Jadwalkan Penggantian"),
        ];

        let rows = KpiAggregator::from_records(&records, "ILAPAK 1", &reference(), &config);

        assert_eq!(rows[2].label, "Part akan diganti dalam 7 hari");
        assert_eq!(rows[2].count, Some(1));
    }

    #[test]
    fn test_classify_all_keeps_order() {
        let config = LifecycleConfig::default();
        let records = vec![part("09/01/2025", ""), part("31/12/2024", "")];

        let classified = LifecycleClassifier::classify_all(records, &reference(), &config);

        assert_eq!(classified[0].classification.bucket, UrgencyBucket::Normal);
        assert_eq!(classified[1].classification.bucket, UrgencyBucket::Overdue);
    }
}
