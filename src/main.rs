// CLI entry point: run the funding engine over a scenario file.
//
// Usage:
//   proforma-engine <scenario.json>              Run gates, print results
//   proforma-engine <scenario.json> <output-dir> Also write CSV reports

use std::env;
use std::path::Path;
use std::process;

use anyhow::Result;

use proforma_engine::export::{write_gate_checks_csv, write_timeline_csv};
use proforma_engine::funding::compute_funding;
use proforma_engine::rounding::fmt_money;
use proforma_engine::Scenario;

fn main() -> Result<()> {
    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        eprintln!("Usage: proforma-engine <scenario.json> [output-dir]");
        process::exit(2);
    }

    let scenario = Scenario::load(Path::new(&args[1]))?;
    run_scenario(&scenario, args.get(2).map(Path::new))
}

fn run_scenario(scenario: &Scenario, output_dir: Option<&Path>) -> Result<()> {
    println!("🏨 Pro Forma Engine v{}", proforma_engine::VERSION);
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!("Scenario:    {}", scenario.name);
    println!("Fingerprint: {}", scenario.fingerprint());

    let output = compute_funding(&scenario.funding);

    if !output.flags.invalid_inputs.is_empty() {
        eprintln!("\n❌ Invalid inputs:");
        for error in &output.flags.invalid_inputs {
            eprintln!("   - {error}");
        }
        process::exit(1);
    }

    for warning in &output.warnings {
        println!("⚠️  {warning}");
    }

    println!("\n🚦 Funding gates:");
    for check in &output.gate_checks {
        let marker = if check.passed { "✅ PASS" } else { "❌ FAIL" };
        println!("   {marker}  {}", check.message);
    }

    println!("\n💰 Totals:");
    println!(
        "   Equity committed: ${}",
        fmt_money(output.total_equity_committed)
    );
    println!("   Funded to OpCo:   ${}", fmt_money(output.total_funded_opco));
    println!(
        "   Funded to assets: ${}",
        fmt_money(output.total_funded_properties)
    );

    if let Some(dir) = output_dir {
        std::fs::create_dir_all(dir)?;
        write_gate_checks_csv(&dir.join("gate_checks.csv"), &output.gate_checks)?;
        write_timeline_csv(&dir.join("funding_timeline.csv"), &output.funding_timeline)?;
        println!("\n📤 Reports written to {}", dir.display());
    }

    println!("\n━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    if output.flags.all_gates_passed {
        println!("✅ All funding gates passed");
    } else {
        println!("❌ One or more funding gates failed");
    }

    Ok(())
}
