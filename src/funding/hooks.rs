// Journal hooks for funding events.
// Each event produces a balanced pair:
//   CASH                debit=amount   BS_ASSET   FINANCING
//   EQUITY_CONTRIBUTED  credit=amount  BS_EQUITY  FINANCING
// GAAP invariant: equity contributions never hit the income statement.

use super::types::{FundingEntityType, FundingEvent};
use crate::journal::{CashFlowBucket, Classification, JournalDelta};

pub fn build_funding_journal_hooks(events: &[FundingEvent]) -> Vec<JournalDelta> {
    let mut deltas = Vec::with_capacity(events.len() * 2);

    for event in events {
        let entity_label = match event.target_entity.entity_type {
            FundingEntityType::Opco => "OpCo",
            FundingEntityType::Property => event.target_entity.name.as_str(),
        };

        deltas.push(JournalDelta {
            account: "CASH".to_string(),
            debit: event.amount,
            credit: 0.0,
            classification: Classification::BsAsset,
            cash_flow_bucket: CashFlowBucket::Financing,
            memo: format!("{} — cash received by {entity_label}", event.label),
        });

        deltas.push(JournalDelta {
            account: "EQUITY_CONTRIBUTED".to_string(),
            debit: 0.0,
            credit: event.amount,
            classification: Classification::BsEquity,
            cash_flow_bucket: CashFlowBucket::Financing,
            memo: format!("{} — equity contribution to {entity_label}", event.label),
        });
    }

    deltas
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::funding::types::FundingEntity;
    use crate::journal::imbalance;
    use chrono::NaiveDate;

    fn event(amount: f64) -> FundingEvent {
        FundingEvent {
            date: NaiveDate::from_ymd_opt(2026, 1, 15).unwrap(),
            tranche_id: "t1".to_string(),
            label: "Seed Tranche".to_string(),
            amount,
            target_entity: FundingEntity::opco(),
            source: "SAFE Round 1".to_string(),
        }
    }

    #[test]
    fn test_each_event_yields_a_balanced_pair() {
        let deltas = build_funding_journal_hooks(&[event(500_000.0), event(250_000.0)]);
        assert_eq!(deltas.len(), 4);
        assert_eq!(imbalance(&deltas), 0.0);
        assert_eq!(deltas[0].account, "CASH");
        assert_eq!(deltas[0].debit, 500_000.0);
        assert_eq!(deltas[1].account, "EQUITY_CONTRIBUTED");
        assert_eq!(deltas[1].credit, 500_000.0);
    }

    #[test]
    fn test_opco_memo_uses_opco_label() {
        let deltas = build_funding_journal_hooks(&[event(100.0)]);
        assert!(deltas[0].memo.contains("cash received by OpCo"));
        assert!(deltas[1].memo.contains("equity contribution to OpCo"));
    }
}
