// 📅 Funding Timeline - Resolve tranche triggers to concrete dates
// Scheduled tranches keep their date, on-acquisition tranches borrow the
// property's acquisition date, conditional tranches fall back to their
// fallback date (the condition itself is evaluated upstream).

use std::collections::HashMap;

use chrono::NaiveDate;

use super::types::{FundingEvent, FundingTranche, PropertyFundingRequirement, TrancheTrigger};

fn resolve_date(
    tranche: &FundingTranche,
    properties: &HashMap<&str, &PropertyFundingRequirement>,
) -> Option<NaiveDate> {
    match &tranche.trigger {
        TrancheTrigger::Scheduled { date } => Some(*date),
        TrancheTrigger::OnAcquisition { property_id } => properties
            .get(property_id.as_str())
            .map(|p| p.acquisition_date),
        TrancheTrigger::Conditional { fallback_date, .. } => Some(*fallback_date),
    }
}

/// Build a chronologically-sorted funding timeline by resolving every
/// tranche trigger. Unresolvable tranches (on-acquisition with an unknown
/// property id) are skipped with a warning rather than an error.
pub fn build_funding_timeline(
    tranches: &[FundingTranche],
    property_requirements: &[PropertyFundingRequirement],
) -> (Vec<FundingEvent>, Vec<String>) {
    let properties: HashMap<&str, &PropertyFundingRequirement> = property_requirements
        .iter()
        .map(|p| (p.property_id.as_str(), p))
        .collect();

    let mut events = Vec::with_capacity(tranches.len());
    let mut warnings = Vec::new();

    for tranche in tranches {
        let Some(date) = resolve_date(tranche, &properties) else {
            warnings.push(format!(
                "Tranche \"{}\" ({}): could not resolve trigger to a date — skipped",
                tranche.label, tranche.tranche_id
            ));
            continue;
        };

        events.push(FundingEvent {
            date,
            tranche_id: tranche.tranche_id.clone(),
            label: tranche.label.clone(),
            amount: tranche.amount,
            target_entity: tranche.target_entity.clone(),
            source: tranche.source.clone(),
        });
    }

    // Stable sort keeps input order for same-day tranches
    events.sort_by_key(|e| e.date);

    (events, warnings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::funding::types::{FundingEntity, FundingEntityType};

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    fn tranche(id: &str, trigger: TrancheTrigger) -> FundingTranche {
        FundingTranche {
            tranche_id: id.to_string(),
            label: format!("Tranche {id}"),
            amount: 250_000.0,
            trigger,
            target_entity: FundingEntity::opco(),
            source: "SAFE Round 1".to_string(),
        }
    }

    fn requirement(id: &str, acq: &str) -> PropertyFundingRequirement {
        PropertyFundingRequirement {
            property_id: id.to_string(),
            property_name: format!("Hotel {id}"),
            acquisition_date: date(acq),
            operations_start_date: date(acq),
            total_cost: 3_000_000.0,
            loan_amount: 2_000_000.0,
            equity_required: 1_000_000.0,
        }
    }

    #[test]
    fn test_scheduled_and_conditional_resolve_directly() {
        let tranches = vec![
            tranche(
                "t2",
                TrancheTrigger::Conditional {
                    condition: "occupancy >= 70%".to_string(),
                    fallback_date: date("2026-03-01"),
                },
            ),
            tranche(
                "t1",
                TrancheTrigger::Scheduled {
                    date: date("2026-01-15"),
                },
            ),
        ];
        let (events, warnings) = build_funding_timeline(&tranches, &[]);
        assert!(warnings.is_empty());
        assert_eq!(events.len(), 2);
        // Sorted chronologically, not in input order
        assert_eq!(events[0].tranche_id, "t1");
        assert_eq!(events[1].tranche_id, "t2");
        assert_eq!(events[1].date, date("2026-03-01"));
    }

    #[test]
    fn test_on_acquisition_borrows_property_date() {
        let tranches = vec![tranche(
            "t1",
            TrancheTrigger::OnAcquisition {
                property_id: "p1".to_string(),
            },
        )];
        let reqs = vec![requirement("p1", "2026-06-01")];
        let (events, warnings) = build_funding_timeline(&tranches, &reqs);
        assert!(warnings.is_empty());
        assert_eq!(events[0].date, date("2026-06-01"));
    }

    #[test]
    fn test_unknown_property_is_skipped_with_warning() {
        let tranches = vec![tranche(
            "t1",
            TrancheTrigger::OnAcquisition {
                property_id: "ghost".to_string(),
            },
        )];
        let (events, warnings) = build_funding_timeline(&tranches, &[]);
        assert!(events.is_empty());
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains("Tranche t1"));
        assert!(warnings[0].contains("skipped"));
    }

    #[test]
    fn test_event_carries_tranche_fields() {
        let mut t = tranche(
            "t1",
            TrancheTrigger::Scheduled {
                date: date("2026-01-15"),
            },
        );
        t.target_entity = FundingEntity {
            entity_type: FundingEntityType::Property,
            id: "p1".to_string(),
            name: "Hotel p1".to_string(),
        };
        let (events, _) = build_funding_timeline(&[t], &[]);
        assert_eq!(events[0].amount, 250_000.0);
        assert_eq!(events[0].label, "Tranche t1");
        assert_eq!(events[0].target_entity.id, "p1");
        assert_eq!(events[0].source, "SAFE Round 1");
    }
}
