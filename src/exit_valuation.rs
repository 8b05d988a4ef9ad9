// 🏁 Exit Valuation - Direct capitalization sale proceeds
// Gross sale price = stabilized NOI / exit cap rate, then the waterfall
// down to net-to-equity:
//   Gross - commission - other closing costs = net sale proceeds
//   Net sale proceeds - debt repayment = net to equity
// Implied price per key (gross / room count) is the hospitality industry's
// standard comparability metric.

use serde::{Deserialize, Serialize};

use crate::rounding::{round_to, RoundingPolicy};

/// Broker commission applied when the input does not specify one.
pub const DEFAULT_COMMISSION_RATE: f64 = 0.02;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExitValuationInput {
    pub stabilized_noi: f64,
    pub exit_cap_rate: f64,
    pub commission_rate: Option<f64>,
    pub outstanding_debt: Option<f64>,
    pub other_closing_costs: Option<f64>,
    pub room_count: Option<u32>,
    pub property_name: Option<String>,
    pub rounding_policy: RoundingPolicy,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExitValuationOutput {
    pub gross_sale_price: f64,
    pub implied_price_per_key: Option<f64>,
    pub commission: f64,
    pub net_sale_proceeds: f64,
    pub debt_repayment: f64,
    pub net_to_equity: f64,
    pub debt_free_at_exit: bool,
}

/// Compute gross and net sale proceeds via direct capitalization.
/// A non-positive cap rate produces a zero valuation rather than an error.
pub fn compute_exit_valuation(input: &ExitValuationInput) -> ExitValuationOutput {
    let r = |v: f64| round_to(v, input.rounding_policy);
    let commission_rate = input.commission_rate.unwrap_or(DEFAULT_COMMISSION_RATE);
    let outstanding_debt = input.outstanding_debt.unwrap_or(0.0);
    let other_closing_costs = input.other_closing_costs.unwrap_or(0.0);

    let gross_sale_price = if input.exit_cap_rate > 0.0 {
        r(input.stabilized_noi / input.exit_cap_rate)
    } else {
        0.0
    };

    let implied_price_per_key = match input.room_count {
        Some(rooms) if rooms > 0 => Some(r(gross_sale_price / rooms as f64)),
        _ => None,
    };

    let commission = r(gross_sale_price * commission_rate);
    let net_sale_proceeds = r(gross_sale_price - commission - other_closing_costs);
    let debt_repayment = r(outstanding_debt);
    let net_to_equity = r(net_sale_proceeds - debt_repayment);

    ExitValuationOutput {
        gross_sale_price,
        implied_price_per_key,
        commission,
        net_sale_proceeds,
        debt_repayment,
        net_to_equity,
        debt_free_at_exit: net_to_equity >= 0.0,
    }
}
