//! 機台備品摘要示例

use sparelife::{
    format_duration, load_all, remaining_phrase, AttentionQuery, AttentionScope, InMemorySource,
    LifecycleConfig, LifecycleEngine, ReferenceDate,
};

fn line(cells: &[&str]) -> Vec<String> {
    cells.iter().map(|c| c.to_string()).collect()
}

fn main() -> anyhow::Result<()> {
    sparelife::logging::init();

    println!("=== 機台備品摘要示例 ===\n");

    let grid = vec![
        line(&["DATABASE LIFETIME SPAREPART SIG"]),
        line(&[
            "Mesin",
            "Kode Part",
            "Part",
            "Qty",
            "Category",
            "Lifetime (Bulan)",
            "Penggantian Terakhir",
            "Penggantian Selanjutnya",
            "STATUS",
            "Leadtime (Hari)",
        ]),
        line(&[
            "SIG 1", "SG-11", "Heater", "1", "Vital", "6", "02/07/2024", "05/01/2025",
            "Segera Jadwalkan Penggantian", "21",
        ]),
        line(&[
            "SIG 1", "SG-12", "Anvil", "2", "Vital", "12", "15/12/2023", "15/12/2024",
            "Melewati Jadwal Penggantian", "45",
        ]),
        line(&[
            "SIG 2", "SG-20", "Gear Box", "1", "Vital", "24", "01/02/2024", "01/03/2025",
            "Segera Lakukan Pemesanan", "60",
        ]),
        line(&["SIG 2", "SG-31", "O-Ring", "10", "Standard", "3", "", "", "", "7"]),
    ];

    // 參考日期由呼叫端提供
    let reference = ReferenceDate::parse("01-01-2025")?;
    let config = LifecycleConfig::default();
    let source = InMemorySource::new().with_grid("SIG", &grid);
    let engine = LifecycleEngine::new(config.clone())?;

    for (machine_type, rows) in load_all(&source, &config.machine_types) {
        let result = engine.evaluate(&rows, &reference);
        if result.records.is_empty() {
            println!("[{}] Tidak ada data untuk mesin ini.\n", machine_type);
            continue;
        }

        let query = AttentionQuery::all().with_scope(AttentionScope::VitalUrgent);
        for view in engine.machine_views(&result, &query) {
            println!("[{}] {}", machine_type, view.machine);
            for kpi in &view.kpis {
                println!("  - {}: {}", kpi.label, kpi.value);
            }

            println!("  Menampilkan {} item Sparepart", view.attention.len());
            for item in &view.attention {
                println!(
                    "    {:?} {} - {} ({})",
                    item.level,
                    item.record.record.part_code,
                    item.record.record.part_name,
                    item.remaining
                );
            }
            println!();
        }

        println!("{}", serde_json::to_string_pretty(&result.warnings)?);
    }

    println!(
        "400 hari = {} / -3 hari = {}",
        format_duration(400),
        remaining_phrase(Some(-3), &config.duration_labels)
    );

    Ok(())
}
