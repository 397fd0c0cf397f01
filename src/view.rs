//! 畫面選擇狀態
//!
//! 由呼叫端保存並傳入，引擎本身不保存任何畫面狀態。

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use spare_calc::{AttentionQuery, AttentionScope, LifecycleEngine, LifecycleResult, MachineView};

/// 目前顯示的畫面
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ViewKind {
    /// KPI 摘要
    #[default]
    KpiSummary,
    /// 重要且急件的通知清單
    AttentionList,
    /// 完整資料表
    FullTable,
}

/// 單一機台分頁的篩選狀態
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MachineSelection {
    /// 狀態篩選代號
    pub status: String,
    /// 搜尋文字
    pub search: String,
}

impl Default for MachineSelection {
    fn default() -> Self {
        Self {
            status: "Semua".to_string(),
            search: String::new(),
        }
    }
}

/// 畫面選擇狀態
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewSelection {
    /// 目前選擇的機台類型
    pub machine_type: String,
    /// 目前顯示的畫面
    pub active: ViewKind,
    /// 各機台分頁的篩選狀態
    pub machines: HashMap<String, MachineSelection>,
}

impl ViewSelection {
    /// 創建新的畫面狀態
    pub fn new(machine_type: &str) -> Self {
        Self {
            machine_type: machine_type.to_string(),
            active: ViewKind::default(),
            machines: HashMap::new(),
        }
    }

    /// 切換畫面
    pub fn select(&mut self, kind: ViewKind) {
        self.active = kind;
    }

    /// 切換機台類型（各分頁篩選狀態依機台名稱保留）
    pub fn select_machine_type(&mut self, machine_type: &str) {
        self.machine_type = machine_type.to_string();
    }

    /// 設置機台分頁的狀態篩選
    pub fn set_status(&mut self, machine: &str, status: &str) {
        self.machines.entry(machine.to_string()).or_default().status = status.to_string();
    }

    /// 設置機台分頁的搜尋文字
    pub fn set_search(&mut self, machine: &str, search: &str) {
        self.machines.entry(machine.to_string()).or_default().search = search.to_string();
    }

    /// 機台分頁的篩選條件
    ///
    /// 通知清單只列重要且急件的備品，完整資料表列出所有紀錄。
    pub fn query_for(&self, machine: &str) -> AttentionQuery {
        let selection = self.machines.get(machine).cloned().unwrap_or_default();
        let scope = match self.active {
            ViewKind::FullTable => AttentionScope::Everything,
            ViewKind::KpiSummary | ViewKind::AttentionList => AttentionScope::VitalUrgent,
        };

        AttentionQuery::all()
            .with_status(&selection.status)
            .with_search(&selection.search)
            .with_scope(scope)
    }

    /// 依各分頁的篩選狀態產生機台畫面
    pub fn machine_views(
        &self,
        engine: &LifecycleEngine,
        result: &LifecycleResult,
    ) -> Vec<MachineView> {
        engine
            .machine_views(result, &AttentionQuery::all())
            .into_iter()
            .map(|mut view| {
                let query = self.query_for(&view.machine);
                view.attention = engine.attention(&view.records, &query);
                view
            })
            .collect()
    }
}
