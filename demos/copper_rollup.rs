//! 銅材報價單捲算示例

use costing::{rollup_vendor, CostPolicy, CostRollupEngine, InMemoryRepository};
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    println!("=== 銅材報價單捲算示例 ===\n");

    // 載入範例資料
    let repo = InMemoryRepository::sample()?;

    // 政策可由環境變數指定的 JSON 覆寫
    let policy = match std::env::var("COSTING_POLICY") {
        Ok(json) => CostPolicy::from_json(&json)?,
        Err(_) => CostPolicy::default(),
    };
    println!(
        "政策: 報廢 {}, 回收 {}, 利潤 {}\n",
        policy.rejection_rate, policy.rejection_recovery_rate, policy.profit_margin
    );

    let engine = CostRollupEngine::try_new(policy)?;
    let report = rollup_vendor(&repo, &engine, "V-0234")?;

    for row in &report.rows {
        let c = &row.costs;
        println!("  - {} {}", row.item.part_code, row.item.part_name);
        println!(
            "      原料 {:.2} | 外購件 {:.2} | 焊料 {:.2}",
            c.total_rm_cost, c.total_amt_bop, c.total_amt_brazing
        );
        println!(
            "      報廢 {:.2} | 回收 {:.2} | 小計 {:.2}",
            c.rejection_rm, c.rejection_recovery, c.total_after_rejection
        );
        println!("      利潤 {:.2} | 總計 {:.2}", c.profit, c.g_total);
    }

    println!("\n總計: {:.2}", report.grand_total);

    Ok(())
}
