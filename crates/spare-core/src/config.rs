//! 壽命判定配置

use serde::{Deserialize, Serialize};

use crate::{Result, SpareError};

/// 逾期標記（狀態文字包含即視為逾期）
pub const OVERDUE_MARKER: &str = "Melewati";

/// 舊版逾期標記，舊版 KPI 以此字串計算逾期數
pub const LEGACY_OVERDUE_MARKER: &str = "Segera Jadwalkan Penggantian";

/// 急件標記
pub const URGENT_MARKER: &str = "Segera";

/// 需要下單的狀態文字
pub const REORDER_MARKER: &str = "Segera Lakukan Pemesanan";

/// 重要備品分類標籤（不分大小寫）
pub const VITAL_TAG: &str = "Vital";

/// 到期窗口預設天數（含頭尾）
pub const DEFAULT_DUE_WINDOW_DAYS: u32 = 7;

/// 「全部」篩選代號
pub const ALL_STATUS_SENTINELS: [&str; 2] = ["all", "Semua"];

/// 預設機台類型（每個類型對應一個資料來源工作表）
pub const DEFAULT_MACHINE_TYPES: [&str; 5] = ["ILAPAK", "SIG", "CHIMEI", "JINSUNG", "UNIFILL"];

/// 到期窗口
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "days", rename_all = "snake_case")]
pub enum DueWindow {
    /// 今天起 N 天內（含第 N 天）
    Days(u32),
    /// 與今天同一個月份，且尚未過期
    CalendarMonth,
}

impl Default for DueWindow {
    fn default() -> Self {
        Self::Days(DEFAULT_DUE_WINDOW_DAYS)
    }
}

/// 自由文字搜尋可比對的欄位
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchField {
    Machine,
    PartCode,
    PartName,
    Category,
    Status,
}

/// 來源欄位標題對應
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColumnMap {
    pub machine: String,
    pub part_code: String,
    pub part_name: String,
    pub quantity: String,
    pub category: String,
    pub lifetime_months: String,
    pub last_replaced_on: String,
    pub next_replacement_on: String,
    pub status_text: String,
    pub leadtime_days: String,
}

impl ColumnMap {
    /// 所有必要欄位（依來源工作表順序）
    pub fn required(&self) -> Vec<&str> {
        vec![
            self.machine.as_str(),
            self.part_code.as_str(),
            self.part_name.as_str(),
            self.quantity.as_str(),
            self.category.as_str(),
            self.lifetime_months.as_str(),
            self.last_replaced_on.as_str(),
            self.next_replacement_on.as_str(),
            self.status_text.as_str(),
            self.leadtime_days.as_str(),
        ]
    }
}

impl Default for ColumnMap {
    fn default() -> Self {
        Self {
            machine: "Mesin".to_string(),
            part_code: "Kode Part".to_string(),
            part_name: "Part".to_string(),
            quantity: "Qty".to_string(),
            category: "Category".to_string(),
            lifetime_months: "Lifetime (Bulan)".to_string(),
            last_replaced_on: "Penggantian Terakhir".to_string(),
            next_replacement_on: "Penggantian Selanjutnya".to_string(),
            status_text: "STATUS".to_string(),
            leadtime_days: "Leadtime (Hari)".to_string(),
        }
    }
}

/// 剩餘時間文字
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DurationLabels {
    pub year: String,
    pub month: String,
    pub day: String,
    /// 各單位之間的分隔
    pub separator: String,
    /// 接在最後一個單位之後
    pub continuation: String,
    /// 天數為 0
    pub none_left: String,
    /// 已過期（後接天數）
    pub overdue_prefix: String,
    /// 日期未知
    pub unknown: String,
}

impl Default for DurationLabels {
    fn default() -> Self {
        Self {
            year: "tahun".to_string(),
            month: "bulan".to_string(),
            day: "hari".to_string(),
            separator: ", ".to_string(),
            continuation: " lagi".to_string(),
            none_left: "Tidak ada sisa waktu".to_string(),
            overdue_prefix: "Terlambat".to_string(),
            unknown: "Tanggal tidak diketahui".to_string(),
        }
    }
}

/// 壽命判定配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LifecycleConfig {
    /// 欄位標題對應
    pub columns: ColumnMap,

    /// 逾期標記（任一符合即逾期，區分大小寫）
    pub overdue_markers: Vec<String>,

    /// 急件標記（任一符合即列入到期窗口，區分大小寫）
    pub urgent_markers: Vec<String>,

    /// 需下單標記
    pub reorder_marker: String,

    /// 重要備品標籤
    pub vital_tag: String,

    /// 「全部」篩選代號（不分大小寫）
    pub all_sentinels: Vec<String>,

    /// 到期窗口
    pub due_window: DueWindow,

    /// 自由文字搜尋欄位
    pub search_fields: Vec<SearchField>,

    /// 剩餘時間文字
    pub duration_labels: DurationLabels,

    /// 機台類型
    pub machine_types: Vec<String>,
}

impl Default for LifecycleConfig {
    fn default() -> Self {
        Self {
            columns: ColumnMap::default(),
            overdue_markers: vec![OVERDUE_MARKER.to_string()],
            urgent_markers: vec![URGENT_MARKER.to_string()],
            reorder_marker: REORDER_MARKER.to_string(),
            vital_tag: VITAL_TAG.to_string(),
            all_sentinels: ALL_STATUS_SENTINELS.iter().map(|s| s.to_string()).collect(),
            due_window: DueWindow::default(),
            search_fields: vec![SearchField::Machine, SearchField::PartCode],
            duration_labels: DurationLabels::default(),
            machine_types: DEFAULT_MACHINE_TYPES.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl LifecycleConfig {
    /// 從 JSON 載入配置（未列出的欄位使用預設值）
    pub fn from_json(text: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(text)
            .map_err(|e| SpareError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// 建構器模式：設置到期窗口
    pub fn with_due_window(mut self, window: DueWindow) -> Self {
        self.due_window = window;
        self
    }

    /// 建構器模式：設置逾期標記
    pub fn with_overdue_markers(mut self, markers: Vec<String>) -> Self {
        self.overdue_markers = markers;
        self
    }

    /// 建構器模式：設置急件標記
    pub fn with_urgent_markers(mut self, markers: Vec<String>) -> Self {
        self.urgent_markers = markers;
        self
    }

    /// 建構器模式：設置搜尋欄位
    pub fn with_search_fields(mut self, fields: Vec<SearchField>) -> Self {
        self.search_fields = fields;
        self
    }

    /// 建構器模式：設置欄位標題對應
    pub fn with_columns(mut self, columns: ColumnMap) -> Self {
        self.columns = columns;
        self
    }

    /// 建構器模式：設置剩餘時間文字
    pub fn with_duration_labels(mut self, labels: DurationLabels) -> Self {
        self.duration_labels = labels;
        self
    }

    /// 建構器模式：設置機台類型
    pub fn with_machine_types(mut self, machine_types: Vec<String>) -> Self {
        self.machine_types = machine_types;
        self
    }

    /// 檢查配置
    pub fn validate(&self) -> Result<()> {
        if self.overdue_markers.iter().all(|m| m.is_empty()) {
            return Err(SpareError::InvalidConfig("逾期標記不可為空".to_string()));
        }

        // 空字串標記會讓所有狀態都符合
        if self.overdue_markers.iter().any(|m| m.is_empty())
            || self.urgent_markers.iter().any(|m| m.is_empty())
        {
            return Err(SpareError::InvalidConfig("標記不可為空字串".to_string()));
        }

        if self.vital_tag.is_empty() {
            return Err(SpareError::InvalidConfig("重要備品標籤不可為空".to_string()));
        }

        if self.search_fields.is_empty() {
            return Err(SpareError::InvalidConfig("至少需要一個搜尋欄位".to_string()));
        }

        if self.all_sentinels.is_empty() {
            return Err(SpareError::InvalidConfig("缺少「全部」篩選代號".to_string()));
        }

        Ok(())
    }

    /// 狀態文字是否為逾期
    pub fn is_overdue_status(&self, status_text: &str) -> bool {
        self.overdue_markers
            .iter()
            .any(|marker| status_text.contains(marker.as_str()))
    }

    /// 狀態文字是否為急件
    pub fn is_urgent_status(&self, status_text: &str) -> bool {
        self.urgent_markers
            .iter()
            .any(|marker| status_text.contains(marker.as_str()))
    }

    /// 分類是否為重要備品
    pub fn is_vital_category(&self, category: &str) -> bool {
        category
            .to_lowercase()
            .contains(&self.vital_tag.to_lowercase())
    }

    /// 篩選代號是否代表「全部」
    pub fn is_all_sentinel(&self, token: &str) -> bool {
        self.all_sentinels
            .iter()
            .any(|s| s.eq_ignore_ascii_case(token.trim()))
    }
}
