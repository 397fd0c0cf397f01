//! 原始資料列

use std::collections::BTreeMap;

/// 原始資料列：欄位標題 → 儲存格文字
///
/// 使用 `BTreeMap` 使欄位順序固定，方便比較與序列化。
pub type RawRow = BTreeMap<String, String>;

/// 將試算表網格轉換為資料列
///
/// 來源格式的第一行是標題說明，第二行才是欄位標題，資料從第三行開始。
/// - 少於兩行：回傳空集合
/// - 資料列較短：缺少的儲存格補空字串
/// - 資料列較長：沒有標題的儲存格直接忽略
/// - 空白標題的欄位不收錄
pub fn rows_from_grid(grid: &[Vec<String>]) -> Vec<RawRow> {
    if grid.len() < 2 {
        return Vec::new();
    }

    let headers = &grid[1];

    grid[2..]
        .iter()
        .map(|cells| {
            headers
                .iter()
                .enumerate()
                .filter(|(_, header)| !header.is_empty())
                .map(|(i, header)| {
                    let value = cells.get(i).cloned().unwrap_or_default();
                    (header.clone(), value)
                })
                .collect()
        })
        .collect()
}
