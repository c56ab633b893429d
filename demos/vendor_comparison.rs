//! 供應商比價示例

use chrono::NaiveDate;
use costing::{CostingRepository, InMemoryRepository, VendorComparison, VendorQuery};
use costing_calc::{ComparisonRow, VarianceTrend};
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    println!("=== 供應商比價示例 ===\n");

    let repo = InMemoryRepository::sample()?;

    // 列出合作中的供應商
    let today = NaiveDate::from_ymd_opt(2024, 11, 1).unwrap_or_default();
    let page = VendorQuery::new()
        .with_status(costing_core::VendorStatus::Active)
        .apply(&repo.list_vendors());
    println!("合作中供應商 ({} 家):", page.total);
    for vendor in &page.items {
        println!(
            "  - {} {} ({}), 距上次議價 {} 天",
            vendor.id,
            vendor.name,
            vendor.location,
            (today - vendor.last_negotiation).num_days()
        );
    }

    let selection = repo.comparison_selection(&["V-0234", "V-0189", "V-0342"]);
    let comparison = VendorComparison::build(&selection)?;

    println!("\n供應商總成本:");
    for summary in &comparison.vendors {
        println!(
            "  - {} {}: {} 項, {}",
            summary.vendor_id, summary.vendor_name, summary.item_count, summary.total_cost
        );
    }

    println!("\n逐項比價:");
    for item in &comparison.items {
        println!("  {} {}", item.part_code, item.description);
        for row in &item.rows {
            match row {
                ComparisonRow::Quoted {
                    vendor_name,
                    item,
                    variance_pct,
                    trend,
                    ..
                } => {
                    let marker = match trend {
                        Some(VarianceTrend::AboveAverage) => "▲",
                        Some(VarianceTrend::BelowAverage) => "▼",
                        None => "-",
                    };
                    let pct = variance_pct
                        .map(|p| {
                            let sign = if p > rust_decimal::Decimal::ZERO { "+" } else { "" };
                            format!("{}{:.1}%", sign, p)
                        })
                        .unwrap_or_else(|| "無法比較".to_string());
                    println!(
                        "    {:<28} {:>10} {} {}",
                        vendor_name, item.total_cost, marker, pct
                    );
                }
                ComparisonRow::NotProcured { vendor_name, .. } => {
                    println!("    {:<28} 未向此供應商採購", vendor_name);
                }
            }
        }
    }

    Ok(())
}
