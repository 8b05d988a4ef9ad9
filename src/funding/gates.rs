// 🚦 Funding Gates - Capital must arrive before operations begin
// Two business rules, evaluated as data (never exceptions):
// 1. The OpCo cannot operate before its first funding tranche arrives.
// 2. Each property must have its equity requirement met by acquisition date.
//
// Output order is fixed: OpCo check first, then one check per property
// requirement in input order. Exported reports embed the messages verbatim,
// so wording and amount formatting are part of the contract.

use chrono::NaiveDate;

use super::types::{
    FundingEntity, FundingEntityType, FundingEvent, GateCheck, GateType,
    PropertyFundingRequirement,
};
use crate::rounding::{fmt_money, round_to, RoundingPolicy};

/// Evaluate all funding gates for one input snapshot.
///
/// Pure function of its four inputs: no I/O, no shared state, and it never
/// errors for well-formed input. Failure is expressed entirely through
/// `passed: false` records.
pub fn check_gates(
    company_ops_start_date: NaiveDate,
    events: &[FundingEvent],
    property_requirements: &[PropertyFundingRequirement],
    rounding: RoundingPolicy,
) -> Vec<GateCheck> {
    let mut checks = Vec::with_capacity(1 + property_requirements.len());

    checks.push(check_opco_gate(company_ops_start_date, events));

    for prop in property_requirements {
        checks.push(check_property_gate(prop, events, rounding));
    }

    checks
}

fn check_opco_gate(ops_start: NaiveDate, events: &[FundingEvent]) -> GateCheck {
    let earliest_opco = events
        .iter()
        .filter(|e| e.target_entity.entity_type == FundingEntityType::Opco)
        .map(|e| e.date)
        .min();

    let entity = FundingEntity::opco();

    match earliest_opco {
        None => GateCheck {
            entity,
            gate_type: GateType::OpcoOpsBeforeFunding,
            passed: false,
            message: "No OPCO-targeted funding tranches found; \
                      company cannot operate without funding"
                .to_string(),
            required_date: ops_start,
            earliest_funding_date: None,
            shortfall_amount: None,
        },
        Some(earliest) if earliest > ops_start => GateCheck {
            entity,
            gate_type: GateType::OpcoOpsBeforeFunding,
            passed: false,
            message: format!(
                "Company operations start {ops_start} but \
                 first funding tranche arrives {earliest}"
            ),
            required_date: ops_start,
            earliest_funding_date: Some(earliest),
            shortfall_amount: None,
        },
        Some(earliest) => GateCheck {
            entity,
            gate_type: GateType::OpcoOpsBeforeFunding,
            passed: true,
            message: format!(
                "Company funded by {earliest}, operations start {ops_start}"
            ),
            required_date: ops_start,
            earliest_funding_date: Some(earliest),
            shortfall_amount: None,
        },
    }
}

fn check_property_gate(
    prop: &PropertyFundingRequirement,
    events: &[FundingEvent],
    rounding: RoundingPolicy,
) -> GateCheck {
    let entity = FundingEntity {
        entity_type: FundingEntityType::Property,
        id: prop.property_id.clone(),
        name: prop.property_name.clone(),
    };

    // Funding that arrives after the acquisition deadline never counts.
    let qualifying: Vec<&FundingEvent> = events
        .iter()
        .filter(|e| {
            e.target_entity.entity_type == FundingEntityType::Property
                && e.target_entity.id == prop.property_id
                && e.date <= prop.acquisition_date
        })
        .collect();

    // Round the running sum once, not per-event.
    let total_funded = round_to(
        qualifying.iter().map(|e| e.amount).sum::<f64>(),
        rounding,
    );

    let earliest_funding_date = qualifying.iter().map(|e| e.date).min();

    if qualifying.is_empty() {
        GateCheck {
            entity,
            gate_type: GateType::PropertyOpsBeforeEquity,
            passed: false,
            message: format!(
                "Property \"{}\" has no funding tranches \
                 by acquisition date {}",
                prop.property_name, prop.acquisition_date
            ),
            required_date: prop.acquisition_date,
            earliest_funding_date: None,
            shortfall_amount: Some(prop.equity_required),
        }
    } else if total_funded < prop.equity_required {
        let shortfall = round_to(prop.equity_required - total_funded, rounding);
        GateCheck {
            entity,
            gate_type: GateType::FundingShortfall,
            passed: false,
            message: format!(
                "Property \"{}\" funded ${} of ${} required — shortfall ${}",
                prop.property_name,
                fmt_money(total_funded),
                fmt_money(prop.equity_required),
                fmt_money(shortfall)
            ),
            required_date: prop.acquisition_date,
            earliest_funding_date,
            shortfall_amount: Some(shortfall),
        }
    } else {
        GateCheck {
            entity,
            gate_type: GateType::PropertyOpsBeforeEquity,
            passed: true,
            message: format!(
                "Property \"{}\" fully funded (${}) by {}",
                prop.property_name,
                fmt_money(total_funded),
                prop.acquisition_date
            ),
            required_date: prop.acquisition_date,
            earliest_funding_date,
            shortfall_amount: None,
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================
