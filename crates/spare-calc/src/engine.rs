//! 備品壽命判定主流程

use serde::Serialize;
use spare_core::{LifecycleConfig, RawRow, ReferenceDate};

use crate::classifier::{ClassifiedRecord, LifecycleClassifier};
use crate::filter::{AttentionFilter, AttentionItem, AttentionQuery};
use crate::kpi::{KpiAggregator, KpiRow};
use crate::normalizer::RecordNormalizer;
use crate::{LifecycleResult, LifecycleWarning};

/// 資料中沒有任何機台名稱時的 KPI 標籤
pub const NO_MACHINE_LABEL: &str = "Tidak Ada Data";

/// 單一機台的畫面資料
#[derive(Debug, Clone, Serialize)]
pub struct MachineView {
    /// 機台
    pub machine: String,

    /// 該機台的紀錄（保持輸入順序，不去重）
    pub records: Vec<ClassifiedRecord>,

    /// KPI 表格
    pub kpis: Vec<KpiRow>,

    /// 待處理清單
    pub attention: Vec<AttentionItem>,
}

/// 備品壽命判定引擎
///
/// 不保存任何計算結果，每次呼叫都以傳入的資料與參考日期重新計算。
pub struct LifecycleEngine {
    config: LifecycleConfig,
}

impl LifecycleEngine {
    /// 創建新的判定引擎
    pub fn new(config: LifecycleConfig) -> spare_core::Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// 目前配置
    pub fn config(&self) -> &LifecycleConfig {
        &self.config
    }

    /// 主判定入口：正規化並判定所有資料列
    pub fn evaluate(&self, rows: &[RawRow], reference: &ReferenceDate) -> LifecycleResult {
        tracing::info!(
            "開始壽命判定：資料列 {} 筆，參考日期 {}",
            rows.len(),
            reference.today_text()
        );

        let start_time = std::time::Instant::now();
        let mut result = LifecycleResult::empty(*reference);

        // Step 1: 補齊欄位並轉換型別
        tracing::debug!("Step 1: 正規化");
        let (records, report) = RecordNormalizer::to_records(rows, &self.config.columns);

        if report.unparseable_dates > 0 {
            result.add_warning(LifecycleWarning::warning(
                self.config.columns.next_replacement_on.clone(),
                format!("{} 筆下次更換日無法解析，視為未知", report.unparseable_dates),
            ));
        }
        if report.unknown_leadtime > 0 {
            result.add_warning(LifecycleWarning::info(
                self.config.columns.leadtime_days.clone(),
                format!("{} 筆交期未知，不列入平均", report.unknown_leadtime),
            ));
        }

        let unnamed = records.iter().filter(|r| r.machine.trim().is_empty()).count();
        if unnamed > 0 {
            result.add_warning(LifecycleWarning::warning(
                self.config.columns.machine.clone(),
                format!("{} 筆紀錄缺少機台名稱", unnamed),
            ));
        }

        let unidentified = records.iter().filter(|r| !r.has_identity()).count();
        if unidentified > 0 {
            result.add_warning(LifecycleWarning::error(
                self.config.columns.part_code.clone(),
                format!("{} 筆紀錄缺少料號與品名，監控數 KPI 無法計算", unidentified),
            ));
        }

        // Step 2: 判定更換狀態
        tracing::debug!("Step 2: 判定更換狀態");
        result.records = LifecycleClassifier::classify_all(records, reference, &self.config);

        for warning in &result.warnings {
            tracing::warn!("{}: {}", warning.subject, warning.message);
        }

        result.calculation_time_ms = Some(start_time.elapsed().as_millis());
        tracing::info!("壽命判定完成，耗時 {:?}", start_time.elapsed());

        result
    }

    /// 計算 KPI（以料號+品名去重，保留第一筆）
    pub fn kpis(&self, records: &[ClassifiedRecord], machine: &str) -> Vec<KpiRow> {
        KpiAggregator::calculate(records, machine, &self.config)
    }

    /// 待處理清單（不去重，保留所有紀錄）
    pub fn attention(
        &self,
        records: &[ClassifiedRecord],
        query: &AttentionQuery,
    ) -> Vec<AttentionItem> {
        AttentionFilter::items(records, query, &self.config)
    }

    /// 依機台拆分畫面資料
    ///
    /// - 機台依第一次出現的順序排列，空白機台名稱不建立分頁
    /// - 有其他機台時，機台名稱空白的紀錄不屬於任何畫面，只在判定結果中留下警告
    /// - 有資料但沒有任何機台名稱時，回傳一個只含 KPI 的 [`NO_MACHINE_LABEL`] 畫面
    /// - 沒有資料時回傳空集合
    pub fn machine_views(
        &self,
        result: &LifecycleResult,
        query: &AttentionQuery,
    ) -> Vec<MachineView> {
        if result.records.is_empty() {
            tracing::debug!("沒有資料，不建立機台畫面");
            return Vec::new();
        }

        let machines = distinct_machines(&result.records);

        if machines.is_empty() {
            tracing::warn!("資料中沒有機台名稱");
            return vec![MachineView {
                machine: NO_MACHINE_LABEL.to_string(),
                records: result.records.clone(),
                kpis: self.kpis(&result.records, NO_MACHINE_LABEL),
                attention: Vec::new(),
            }];
        }

        machines
            .into_iter()
            .map(|machine| {
                let records: Vec<ClassifiedRecord> = result
                    .records
                    .iter()
                    .filter(|r| r.record.machine == machine)
                    .cloned()
                    .collect();

                let kpis = self.kpis(&records, &machine);
                let attention = self.attention(&records, query);

                tracing::debug!(
                    "機台 {}: 紀錄 {} 筆，待處理 {} 筆",
                    machine,
                    records.len(),
                    attention.len()
                );

                MachineView {
                    machine,
                    records,
                    kpis,
                    attention,
                }
            })
            .collect()
    }
}

/// 不重複的機台名稱（依第一次出現順序，略過空白）
pub fn distinct_machines(records: &[ClassifiedRecord]) -> Vec<String> {
    let mut machines: Vec<String> = Vec::new();

    for record in records {
        let machine = &record.record.machine;
        if !machine.trim().is_empty() && !machines.contains(machine) {
            machines.push(machine.clone());
        }
    }

    machines
}
