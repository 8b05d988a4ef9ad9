// Equity roll-forward: month-by-month contribution balances per entity,
// from model start through the last funding event. Distributions are zero
// here; they are modeled by the statement layer.

use std::collections::HashMap;

use chrono::{Datelike, NaiveDate};

use super::types::{EquityRollForwardEntry, FundingEvent};
use crate::rounding::{round_to, RoundingPolicy};

/// YYYY-MM period label for a date.
fn to_period(date: NaiveDate) -> String {
    format!("{:04}-{:02}", date.year(), date.month())
}

/// Inclusive list of YYYY-MM periods between two dates.
fn generate_periods(start: NaiveDate, end: NaiveDate) -> Vec<String> {
    let mut periods = Vec::new();
    let (mut y, mut m) = (start.year(), start.month());
    let (end_y, end_m) = (end.year(), end.month());

    while y < end_y || (y == end_y && m <= end_m) {
        periods.push(format!("{y:04}-{m:02}"));
        m += 1;
        if m > 12 {
            m = 1;
            y += 1;
        }
    }

    periods
}

/// Build the per-entity equity roll-forward. Expects `events` sorted by
/// date, as produced by the timeline builder.
pub fn build_equity_rollforward(
    events: &[FundingEvent],
    model_start_date: NaiveDate,
    rounding: RoundingPolicy,
) -> Vec<EquityRollForwardEntry> {
    let Some(last) = events.last() else {
        return Vec::new();
    };
    let periods = generate_periods(model_start_date, last.date);

    // Entity ids in first-seen order so the output is deterministic
    let mut entity_ids: Vec<&str> = Vec::new();
    let mut contributions: HashMap<&str, HashMap<String, f64>> = HashMap::new();
    for event in events {
        let eid = event.target_entity.id.as_str();
        if !contributions.contains_key(eid) {
            entity_ids.push(eid);
        }
        *contributions
            .entry(eid)
            .or_default()
            .entry(to_period(event.date))
            .or_insert(0.0) += event.amount;
    }

    let mut entries = Vec::with_capacity(entity_ids.len() * periods.len());

    for entity_id in entity_ids {
        let by_period = &contributions[entity_id];
        let mut balance = 0.0;

        for period in &periods {
            let contributed = round_to(by_period.get(period).copied().unwrap_or(0.0), rounding);
            let beginning = round_to(balance, rounding);
            let ending = round_to(beginning + contributed, rounding);

            entries.push(EquityRollForwardEntry {
                period: period.clone(),
                entity_id: entity_id.to_string(),
                beginning_balance: beginning,
                contributions: contributed,
                distributions: 0.0,
                ending_balance: ending,
            });

            balance = ending;
        }
    }

    entries
}
