// 🏦 Funding Engine - Orchestrates the tranche-to-gate pipeline
//
// Flow:
// 1. Validate inputs
// 2. Resolve tranche triggers -> chronological timeline
// 3. Check funding gates (OpCo + properties)
// 4. Build equity roll-forward per entity
// 5. Build journal hooks
// 6. Assemble totals and flags

use super::gates::check_gates;
use super::hooks::build_funding_journal_hooks;
use super::rollforward::build_equity_rollforward;
use super::timeline::build_funding_timeline;
use super::types::{FundingEntityType, FundingFlags, FundingInput, FundingOutput, GateType};
use super::validate::validate_funding_input;
use crate::rounding::round_to;

fn build_error_result(errors: Vec<String>) -> FundingOutput {
    FundingOutput {
        funding_timeline: Vec::new(),
        gate_checks: Vec::new(),
        equity_rollforward: Vec::new(),
        total_equity_committed: 0.0,
        total_funded_opco: 0.0,
        total_funded_properties: 0.0,
        journal_hooks: Vec::new(),
        flags: FundingFlags {
            all_gates_passed: false,
            has_shortfalls: false,
            invalid_inputs: errors,
        },
        warnings: Vec::new(),
    }
}

/// Run the full funding engine for one input snapshot.
///
/// Invalid inputs produce a zeroed output with `flags.invalid_inputs`
/// populated; the function itself never panics or returns an error.
pub fn compute_funding(input: &FundingInput) -> FundingOutput {
    let rounding = input.rounding_policy;

    let errors = validate_funding_input(input);
    if !errors.is_empty() {
        return build_error_result(errors);
    }

    let (events, warnings) =
        build_funding_timeline(&input.tranches, &input.property_requirements);

    let gate_checks = check_gates(
        input.company_ops_start_date,
        &events,
        &input.property_requirements,
        rounding,
    );

    let equity_rollforward =
        build_equity_rollforward(&events, input.model_start_date, rounding);

    let journal_hooks = build_funding_journal_hooks(&events);

    let total_equity_committed =
        round_to(events.iter().map(|e| e.amount).sum::<f64>(), rounding);

    let total_funded_opco = round_to(
        events
            .iter()
            .filter(|e| e.target_entity.entity_type == FundingEntityType::Opco)
            .map(|e| e.amount)
            .sum::<f64>(),
        rounding,
    );

    let total_funded_properties = round_to(
        events
            .iter()
            .filter(|e| e.target_entity.entity_type == FundingEntityType::Property)
            .map(|e| e.amount)
            .sum::<f64>(),
        rounding,
    );

    let all_gates_passed = gate_checks.iter().all(|g| g.passed);
    let has_shortfalls = gate_checks
        .iter()
        .any(|g| g.gate_type == GateType::FundingShortfall && !g.passed);

    FundingOutput {
        funding_timeline: events,
        gate_checks,
        equity_rollforward,
        total_equity_committed,
        total_funded_opco,
        total_funded_properties,
        journal_hooks,
        flags: FundingFlags {
            all_gates_passed,
            has_shortfalls,
            invalid_inputs: Vec::new(),
        },
        warnings,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::funding::types::{
        FundingEntity, FundingTranche, PropertyFundingRequirement, TrancheTrigger,
    };
    use crate::journal::AccountingPolicy;
    use crate::rounding::DEFAULT_ROUNDING;
    use chrono::NaiveDate;

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    fn property_entity(id: &str) -> FundingEntity {
        FundingEntity {
            entity_type: crate::funding::types::FundingEntityType::Property,
            id: id.to_string(),
            name: format!("Hotel {id}"),
        }
    }

    fn sample_input() -> FundingInput {
        FundingInput {
            model_start_date: date("2025-11-01"),
            company_ops_start_date: date("2026-01-01"),
            tranches: vec![
                FundingTranche {
                    tranche_id: "t1".to_string(),
                    label: "OpCo Seed".to_string(),
                    amount: 500_000.0,
                    trigger: TrancheTrigger::Scheduled {
                        date: date("2025-12-01"),
                    },
                    target_entity: FundingEntity::opco(),
                    source: "SAFE Round 1".to_string(),
                },
                FundingTranche {
                    tranche_id: "t2".to_string(),
                    label: "P1 Equity".to_string(),
                    amount: 1_000_000.0,
                    trigger: TrancheTrigger::OnAcquisition {
                        property_id: "p1".to_string(),
                    },
                    target_entity: property_entity("p1"),
                    source: "LP Equity".to_string(),
                },
            ],
            property_requirements: vec![PropertyFundingRequirement {
                property_id: "p1".to_string(),
                property_name: "Hotel p1".to_string(),
                acquisition_date: date("2026-06-01"),
                operations_start_date: date("2026-08-01"),
                total_cost: 4_000_000.0,
                loan_amount: 3_000_000.0,
                equity_required: 1_000_000.0,
            }],
            accounting_policy_ref: AccountingPolicy::default(),
            rounding_policy: DEFAULT_ROUNDING,
        }
    }

    #[test]
    fn test_full_pipeline_happy_path() {
        let output = compute_funding(&sample_input());

        assert!(output.flags.invalid_inputs.is_empty());
        assert!(output.flags.all_gates_passed);
        assert!(!output.flags.has_shortfalls);

        assert_eq!(output.funding_timeline.len(), 2);
        assert_eq!(output.gate_checks.len(), 2);
        assert_eq!(output.journal_hooks.len(), 4);
        assert!(!output.equity_rollforward.is_empty());

        assert_eq!(output.total_equity_committed, 1_500_000.0);
        assert_eq!(output.total_funded_opco, 500_000.0);
        assert_eq!(output.total_funded_properties, 1_000_000.0);
    }

    #[test]
    fn test_invalid_input_yields_zeroed_error_output() {
        let mut input = sample_input();
        input.tranches.clear();
        let output = compute_funding(&input);

        assert_eq!(
            output.flags.invalid_inputs,
            vec!["At least one funding tranche is required"]
        );
        assert!(!output.flags.all_gates_passed);
        assert!(output.funding_timeline.is_empty());
        assert!(output.gate_checks.is_empty());
        assert_eq!(output.total_equity_committed, 0.0);
    }

    #[test]
    fn test_shortfall_sets_flag() {
        let mut input = sample_input();
        input.property_requirements[0].equity_required = 2_000_000.0;
        let output = compute_funding(&input);

        assert!(!output.flags.all_gates_passed);
        assert!(output.flags.has_shortfalls);
        let shortfall = &output.gate_checks[1];
        assert_eq!(shortfall.gate_type, GateType::FundingShortfall);
        assert_eq!(shortfall.shortfall_amount, Some(1_000_000.0));
    }

    #[test]
    fn test_unresolvable_tranche_becomes_warning_not_error() {
        let mut input = sample_input();
        input.tranches[1].trigger = TrancheTrigger::OnAcquisition {
            property_id: "ghost".to_string(),
        };
        let output = compute_funding(&input);

        assert!(output.flags.invalid_inputs.is_empty());
        assert_eq!(output.warnings.len(), 1);
        assert_eq!(output.funding_timeline.len(), 1);
        // The property now has no qualifying funding at all
        assert!(!output.flags.all_gates_passed);
        assert_eq!(output.gate_checks[1].shortfall_amount, Some(1_000_000.0));
    }

    #[test]
    fn test_deterministic_across_runs() {
        let input = sample_input();
        assert_eq!(compute_funding(&input), compute_funding(&input));
    }
}
