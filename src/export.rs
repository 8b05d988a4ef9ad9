// 📤 CSV Export - Flat report feeds for the engine's outputs
// Writes gate checks, the funding timeline, and debt schedules as CSV.
// Gate messages are written verbatim: downstream reports embed them
// unchanged, which is what keeps exports reproducible run over run.

use std::path::Path;

use anyhow::{Context, Result};
use csv::Writer;

use crate::funding::{FundingEvent, GateCheck, GateType};
use crate::schedule::ScheduleEntry;

fn gate_type_label(gate_type: GateType) -> &'static str {
    match gate_type {
        GateType::OpcoOpsBeforeFunding => "opco_ops_before_funding",
        GateType::PropertyOpsBeforeEquity => "property_ops_before_equity",
        GateType::FundingShortfall => "funding_shortfall",
    }
}

/// Write gate checks as CSV, one row per check in evaluation order.
pub fn write_gate_checks_csv(path: &Path, checks: &[GateCheck]) -> Result<()> {
    let mut writer = Writer::from_path(path)
        .with_context(|| format!("Failed to create CSV file: {}", path.display()))?;

    writer.write_record([
        "entity_id",
        "entity_name",
        "gate_type",
        "passed",
        "required_date",
        "earliest_funding_date",
        "shortfall_amount",
        "message",
    ])?;

    for check in checks {
        writer.write_record([
            check.entity.id.clone(),
            check.entity.name.clone(),
            gate_type_label(check.gate_type).to_string(),
            if check.passed { "PASS" } else { "FAIL" }.to_string(),
            check.required_date.to_string(),
            check
                .earliest_funding_date
                .map(|d| d.to_string())
                .unwrap_or_default(),
            check
                .shortfall_amount
                .map(|s| format!("{s:.2}"))
                .unwrap_or_default(),
            check.message.clone(),
        ])?;
    }

    writer.flush().context("Failed to flush gate check CSV")?;
    Ok(())
}

/// Write the resolved funding timeline as CSV.
pub fn write_timeline_csv(path: &Path, events: &[FundingEvent]) -> Result<()> {
    let mut writer = Writer::from_path(path)
        .with_context(|| format!("Failed to create CSV file: {}", path.display()))?;

    writer.write_record([
        "date",
        "tranche_id",
        "label",
        "amount",
        "target_type",
        "target_id",
        "target_name",
        "source",
    ])?;

    for event in events {
        let target_type = match event.target_entity.entity_type {
            crate::funding::FundingEntityType::Opco => "OPCO",
            crate::funding::FundingEntityType::Property => "PROPERTY",
        };
        writer.write_record([
            event.date.to_string(),
            event.tranche_id.clone(),
            event.label.clone(),
            format!("{:.2}", event.amount),
            target_type.to_string(),
            event.target_entity.id.clone(),
            event.target_entity.name.clone(),
            event.source.clone(),
        ])?;
    }

    writer.flush().context("Failed to flush timeline CSV")?;
    Ok(())
}

/// Write a debt service schedule as CSV, one row per month.
pub fn write_schedule_csv(path: &Path, schedule: &[ScheduleEntry]) -> Result<()> {
    let mut writer = Writer::from_path(path)
        .with_context(|| format!("Failed to create CSV file: {}", path.display()))?;

    writer.write_record([
        "month",
        "beginning_balance",
        "interest",
        "principal",
        "payment",
        "ending_balance",
        "is_io",
    ])?;

    for entry in schedule {
        writer.write_record([
            entry.month.to_string(),
            format!("{:.2}", entry.beginning_balance),
            format!("{:.2}", entry.interest),
            format!("{:.2}", entry.principal),
            format!("{:.2}", entry.payment),
            format!("{:.2}", entry.ending_balance),
            if entry.is_io { "true" } else { "false" }.to_string(),
        ])?;
    }

    writer.flush().context("Failed to flush schedule CSV")?;
    Ok(())
}

// ============================================================================
// TESTS
// ============================================================================
