// Input validation for the funding engine.
// Returns a list of human-readable errors; empty means the input is usable.
// Date-format checks from older revisions are gone: dates are typed
// `NaiveDate`s and malformed strings fail at deserialization instead.

use super::types::FundingInput;

pub fn validate_funding_input(input: &FundingInput) -> Vec<String> {
    let mut errors = Vec::new();

    if input.tranches.is_empty() {
        errors.push("At least one funding tranche is required".to_string());
    }

    for t in &input.tranches {
        if t.tranche_id.is_empty() {
            errors.push("Each tranche must have a tranche_id".to_string());
        }
        if t.amount <= 0.0 {
            errors.push(format!("Tranche \"{}\": amount must be > 0", t.label));
        }
    }

    for p in &input.property_requirements {
        if p.property_id.is_empty() {
            errors.push("Each property requirement must have a property_id".to_string());
        }
        if p.total_cost <= 0.0 {
            errors.push(format!(
                "Property \"{}\": total_cost must be > 0",
                p.property_name
            ));
        }
        if p.equity_required < 0.0 {
            errors.push(format!(
                "Property \"{}\": equity_required must be >= 0",
                p.property_name
            ));
        }
    }

    errors
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

    fn base_input() -> FundingInput {
        FundingInput {
            model_start_date: date("2026-01-01"),
            company_ops_start_date: date("2026-01-01"),
            tranches: vec![FundingTranche {
                tranche_id: "t1".to_string(),
                label: "Seed".to_string(),
                amount: 500_000.0,
                trigger: TrancheTrigger::Scheduled {
                    date: date("2025-12-01"),
                },
                target_entity: FundingEntity::opco(),
                source: "SAFE Round 1".to_string(),
            }],
            property_requirements: vec![],
            accounting_policy_ref: AccountingPolicy::default(),
            rounding_policy: DEFAULT_ROUNDING,
        }
    }

    #[test]
    fn test_valid_input_has_no_errors() {
        assert!(validate_funding_input(&base_input()).is_empty());
    }

    #[test]
    fn test_empty_tranche_list_rejected() {
        let mut input = base_input();
        input.tranches.clear();
        let errors = validate_funding_input(&input);
        assert_eq!(errors, vec!["At least one funding tranche is required"]);
    }

    #[test]
    fn test_nonpositive_amount_rejected() {
        let mut input = base_input();
        input.tranches[0].amount = 0.0;
        let errors = validate_funding_input(&input);
        assert_eq!(errors, vec!["Tranche \"Seed\": amount must be > 0"]);
    }

    #[test]
    fn test_bad_property_requirement_collects_all_errors() {
        let mut input = base_input();
        input.property_requirements.push(PropertyFundingRequirement {
            property_id: String::new(),
            property_name: "Hotel X".to_string(),
            acquisition_date: date("2026-06-01"),
            operations_start_date: date("2026-07-01"),
            total_cost: 0.0,
            loan_amount: 0.0,
            equity_required: -1.0,
        });
        let errors = validate_funding_input(&input);
        assert_eq!(errors.len(), 3);
    }
}
