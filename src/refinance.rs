// 🔄 Refinance Calculator - Cash-out refinance engine
// When a property's value rises, the owner can replace the old loan with a
// larger one and take the difference out as financing cash flow. The new
// loan is sized to the lesser of the LTV cap and the DSCR constraint;
// whichever produces the smaller loan binds.
//
// Pipeline:
//   1. Validate
//   2. Payoff      - old balance + prepayment penalty + accrued interest
//   3. Size        - min(LTV cap, DSCR cap)
//   4. Cash-out    - net proceeds minus payoff, clamped at zero
//   5. Proceeds    - settlement-statement breakdown
//   6. Schedule    - new loan amortization
//   7. Hooks       - old debt removal, new debt recording
//   8. Flags

use serde::{Deserialize, Serialize};

use crate::journal::{AccountingPolicy, CashFlowBucket, Classification, JournalDelta};
use crate::rounding::{round_to, RoundingPolicy};
use crate::schedule::{build_schedule, NewLoanTerms, ScheduleEntry};

// ============================================================================
// INPUT
// ============================================================================

/// How the property is valued at refinance.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "method", rename_all = "snake_case")]
pub enum PropertyValuation {
    /// Appraised or contracted value
    Direct { property_value_at_refi: f64 },
    /// Income approach: NOI / cap rate
    CapRate { stabilized_noi: f64, cap_rate: f64 },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RefinanceInput {
    pub property_name: String,
    pub valuation: PropertyValuation,

    pub current_loan_balance: f64,
    pub prepayment_penalty: f64,
    pub accrued_interest_to_payoff: Option<f64>,

    pub ltv_max: f64,
    /// Minimum debt service coverage ratio, if the lender imposes one
    pub dscr_min: Option<f64>,
    /// Annual NOI used for the DSCR test
    pub noi_for_dscr: Option<f64>,

    pub new_loan_terms: NewLoanTerms,
    pub closing_cost_pct: f64,

    pub accounting_policy_ref: AccountingPolicy,
    pub rounding_policy: RoundingPolicy,
}

// ============================================================================
// OUTPUT
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PayoffBreakdown {
    pub old_loan_balance: f64,
    pub prepayment_penalty: f64,
    pub accrued_interest: f64,
    pub total: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SizingResult {
    pub property_value: f64,
    pub max_loan_ltv: f64,
    pub max_loan_dscr: Option<f64>,
    pub final_loan_amount: f64,
    pub dscr_binding: bool,
    pub ltv_binding: bool,
}

/// One line of the settlement-statement style proceeds breakdown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProceedsLineItem {
    pub label: String,
    pub amount: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RefinanceFlags {
    pub dscr_binding: bool,
    pub ltv_binding: bool,
    /// New loan did not cover the payoff; cash-out was clamped to zero
    pub negative_cash_out: bool,
    pub invalid_inputs: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RefinanceOutput {
    pub payoff: PayoffBreakdown,
    pub sizing: SizingResult,
    pub new_loan_gross: f64,
    pub closing_costs: f64,
    pub new_loan_net: f64,
    pub cash_out_to_equity: f64,
    pub proceeds_breakdown: Vec<ProceedsLineItem>,
    pub new_debt_schedule: Vec<ScheduleEntry>,
    pub journal_hooks: Vec<JournalDelta>,
    pub flags: RefinanceFlags,
}

// ============================================================================
// VALIDATION
// ============================================================================

pub fn validate_refinance_input(input: &RefinanceInput) -> Vec<String> {
    let mut errors = Vec::new();

    match input.valuation {
        PropertyValuation::Direct {
            property_value_at_refi,
        } if property_value_at_refi <= 0.0 => {
            errors.push("property_value_at_refi must be > 0".to_string());
        }
        PropertyValuation::CapRate {
            stabilized_noi,
            cap_rate,
        } => {
            if stabilized_noi <= 0.0 {
                errors.push("stabilized_noi must be > 0".to_string());
            }
            if cap_rate <= 0.0 {
                errors.push("cap_rate must be > 0".to_string());
            }
        }
        _ => {}
    }

    if input.current_loan_balance < 0.0 {
        errors.push("current_loan_balance must be >= 0".to_string());
    }
    if input.prepayment_penalty < 0.0 {
        errors.push("prepayment_penalty must be >= 0".to_string());
    }
    if input.ltv_max <= 0.0 || input.ltv_max > 1.0 {
        errors.push("ltv_max must be between 0 (exclusive) and 1 (inclusive)".to_string());
    }
    if input.closing_cost_pct < 0.0 || input.closing_cost_pct >= 1.0 {
        errors.push("closing_cost_pct must be between 0 and 1".to_string());
    }
    if input.new_loan_terms.term_months == 0 {
        errors.push("term_months must be > 0".to_string());
    }
    if input.new_loan_terms.amortization_months == 0 {
        errors.push("amortization_months must be > 0".to_string());
    }

    errors
}

// ============================================================================
// PAYOFF + SIZING
// ============================================================================

pub fn compute_payoff(
    current_loan_balance: f64,
    prepayment_penalty: f64,
    accrued_interest: f64,
    rounding: RoundingPolicy,
) -> PayoffBreakdown {
    let old_loan_balance = round_to(current_loan_balance, rounding);
    let penalty = round_to(prepayment_penalty, rounding);
    let accrued = round_to(accrued_interest, rounding);
    PayoffBreakdown {
        old_loan_balance,
        prepayment_penalty: penalty,
        accrued_interest: accrued,
        total: round_to(old_loan_balance + penalty + accrued, rounding),
    }
}

pub fn resolve_property_value(valuation: PropertyValuation) -> f64 {
    match valuation {
        PropertyValuation::Direct {
            property_value_at_refi,
        } => property_value_at_refi,
        PropertyValuation::CapRate {
            stabilized_noi,
            cap_rate,
        } => stabilized_noi / cap_rate,
    }
}

/// Size the new loan subject to LTV and optional DSCR constraints.
///
/// The DSCR cap uses amortizing-period debt service (the worst case):
///   annual_ds = 12 * PMT(L, r, amort_months)
/// PMT is linear in L, so with k = r(1+r)^n / ((1+r)^n - 1):
///   DSCR = NOI / annual_ds >= dscr_min  =>  L <= NOI / (12 * k * dscr_min)
pub fn compute_sizing(
    valuation: PropertyValuation,
    ltv_max: f64,
    terms: &NewLoanTerms,
    dscr_min: Option<f64>,
    noi_for_dscr: Option<f64>,
    rounding: RoundingPolicy,
) -> SizingResult {
    let property_value = resolve_property_value(valuation);
    let max_loan_ltv = round_to(property_value * ltv_max, rounding);

    let max_loan_dscr = match (dscr_min, noi_for_dscr) {
        (Some(dscr), Some(noi)) if dscr > 0.0 && noi > 0.0 => {
            let monthly_rate = terms.rate_annual / 12.0;
            let n = terms.amortization_months;
            if monthly_rate == 0.0 {
                // Zero rate: annual_ds = 12 * L / amort_months
                Some(round_to(noi * n as f64 / (12.0 * dscr), rounding))
            } else {
                let factor = (1.0 + monthly_rate).powi(n as i32);
                let k = (monthly_rate * factor) / (factor - 1.0);
                Some(round_to(noi / (12.0 * k * dscr), rounding))
            }
        }
        _ => None,
    };

    let (final_loan_amount, dscr_binding, ltv_binding) = match max_loan_dscr {
        Some(dscr_cap) if dscr_cap < max_loan_ltv => (dscr_cap, true, false),
        _ => (max_loan_ltv, false, true),
    };

    SizingResult {
        property_value: round_to(property_value, rounding),
        max_loan_ltv,
        max_loan_dscr,
        final_loan_amount,
        dscr_binding,
        ltv_binding,
    }
}

// ============================================================================
// JOURNAL HOOKS
// ============================================================================

fn build_refi_journal_hooks(
    property_name: &str,
    payoff: &PayoffBreakdown,
    new_loan_gross: f64,
    closing_costs: f64,
    cash_out_to_equity: f64,
) -> Vec<JournalDelta> {
    let mut deltas = vec![
        // Record the new loan
        JournalDelta {
            account: "CASH".to_string(),
            debit: new_loan_gross,
            credit: 0.0,
            classification: Classification::BsAsset,
            cash_flow_bucket: CashFlowBucket::Financing,
            memo: format!("New refinance loan — {property_name}"),
        },
        JournalDelta {
            account: "LOAN_PAYABLE".to_string(),
            debit: 0.0,
            credit: new_loan_gross,
            classification: Classification::BsLiability,
            cash_flow_bucket: CashFlowBucket::Financing,
            memo: format!("New refinance loan — {property_name}"),
        },
        // Retire the old loan
        JournalDelta {
            account: "LOAN_PAYABLE".to_string(),
            debit: payoff.old_loan_balance,
            credit: 0.0,
            classification: Classification::BsLiability,
            cash_flow_bucket: CashFlowBucket::Financing,
            memo: format!("Old loan payoff — {property_name}"),
        },
        JournalDelta {
            account: "CASH".to_string(),
            debit: 0.0,
            credit: payoff.old_loan_balance,
            classification: Classification::BsAsset,
            cash_flow_bucket: CashFlowBucket::Financing,
            memo: format!("Old loan payoff — {property_name}"),
        },
    ];

    // Penalties and fees are expensed in the period incurred
    for (account, amount, label) in [
        ("PREPAYMENT_PENALTY_EXPENSE", payoff.prepayment_penalty, "Prepayment penalty"),
        ("INTEREST_EXPENSE", payoff.accrued_interest, "Accrued interest at payoff"),
        ("REFI_CLOSING_COST_EXPENSE", closing_costs, "Refinance closing costs"),
    ] {
        if amount > 0.0 {
            deltas.push(JournalDelta {
                account: account.to_string(),
                debit: amount,
                credit: 0.0,
                classification: Classification::IsExpense,
                cash_flow_bucket: CashFlowBucket::Operating,
                memo: format!("{label} — {property_name}"),
            });
            deltas.push(JournalDelta {
                account: "CASH".to_string(),
                debit: 0.0,
                credit: amount,
                classification: Classification::BsAsset,
                cash_flow_bucket: CashFlowBucket::Operating,
                memo: format!("{label} paid — {property_name}"),
            });
        }
    }

    // Cash-out is financing cash flow, never income
    if cash_out_to_equity > 0.0 {
        deltas.push(JournalDelta {
            account: "EQUITY_DISTRIBUTED".to_string(),
            debit: cash_out_to_equity,
            credit: 0.0,
            classification: Classification::BsEquity,
            cash_flow_bucket: CashFlowBucket::Financing,
            memo: format!("Cash-out distribution — {property_name}"),
        });
        deltas.push(JournalDelta {
            account: "CASH".to_string(),
            debit: 0.0,
            credit: cash_out_to_equity,
            classification: Classification::BsAsset,
            cash_flow_bucket: CashFlowBucket::Financing,
            memo: format!("Cash-out distribution — {property_name}"),
        });
    }

    deltas
}

// ============================================================================
// MAIN ENTRY POINT
// ============================================================================

fn build_error_result(errors: Vec<String>) -> RefinanceOutput {
    RefinanceOutput {
        payoff: PayoffBreakdown {
            old_loan_balance: 0.0,
            prepayment_penalty: 0.0,
            accrued_interest: 0.0,
            total: 0.0,
        },
        sizing: SizingResult {
            property_value: 0.0,
            max_loan_ltv: 0.0,
            max_loan_dscr: None,
            final_loan_amount: 0.0,
            dscr_binding: false,
            ltv_binding: false,
        },
        new_loan_gross: 0.0,
        closing_costs: 0.0,
        new_loan_net: 0.0,
        cash_out_to_equity: 0.0,
        proceeds_breakdown: Vec::new(),
        new_debt_schedule: Vec::new(),
        journal_hooks: Vec::new(),
        flags: RefinanceFlags {
            dscr_binding: false,
            ltv_binding: false,
            negative_cash_out: false,
            invalid_inputs: errors,
        },
    }
}

/// Compute refinance payoff, new loan sizing, cash-out to equity, the new
/// debt schedule, and journal hooks.
pub fn compute_refinance(input: &RefinanceInput) -> RefinanceOutput {
    let rounding = input.rounding_policy;
    let r = |v: f64| round_to(v, rounding);

    let errors = validate_refinance_input(input);
    if !errors.is_empty() {
        return build_error_result(errors);
    }

    let payoff = compute_payoff(
        input.current_loan_balance,
        input.prepayment_penalty,
        input.accrued_interest_to_payoff.unwrap_or(0.0),
        rounding,
    );

    let sizing = compute_sizing(
        input.valuation,
        input.ltv_max,
        &input.new_loan_terms,
        input.dscr_min,
        input.noi_for_dscr,
        rounding,
    );

    let new_loan_gross = sizing.final_loan_amount;
    let closing_costs = r(new_loan_gross * input.closing_cost_pct);
    let new_loan_net = r(new_loan_gross - closing_costs);

    let raw_cash_out = r(new_loan_net - payoff.total);
    let negative_cash_out = raw_cash_out < 0.0;
    let cash_out_to_equity = if negative_cash_out { 0.0 } else { raw_cash_out };

    let mut proceeds = vec![
        ProceedsLineItem {
            label: "New Loan (Gross)".to_string(),
            amount: new_loan_gross,
        },
        ProceedsLineItem {
            label: "Less: Closing Costs".to_string(),
            amount: -closing_costs,
        },
        ProceedsLineItem {
            label: "Net Loan Proceeds".to_string(),
            amount: new_loan_net,
        },
        ProceedsLineItem {
            label: "Less: Old Loan Payoff".to_string(),
            amount: -payoff.old_loan_balance,
        },
    ];
    if payoff.prepayment_penalty > 0.0 {
        proceeds.push(ProceedsLineItem {
            label: "Less: Prepayment Penalty".to_string(),
            amount: -payoff.prepayment_penalty,
        });
    }
    if payoff.accrued_interest > 0.0 {
        proceeds.push(ProceedsLineItem {
            label: "Less: Accrued Interest".to_string(),
            amount: -payoff.accrued_interest,
        });
    }
    proceeds.push(ProceedsLineItem {
        label: "Cash-Out to Equity".to_string(),
        amount: cash_out_to_equity,
    });

    let schedule = build_schedule(new_loan_gross, &input.new_loan_terms, rounding);

    let journal_hooks = build_refi_journal_hooks(
        &input.property_name,
        &payoff,
        new_loan_gross,
        closing_costs,
        cash_out_to_equity,
    );

    RefinanceOutput {
        payoff,
        sizing,
        new_loan_gross,
        closing_costs,
        new_loan_net,
        cash_out_to_equity,
        proceeds_breakdown: proceeds,
        new_debt_schedule: schedule,
        journal_hooks,
        flags: RefinanceFlags {
            dscr_binding: sizing.dscr_binding,
            ltv_binding: sizing.ltv_binding,
            negative_cash_out,
            invalid_inputs: Vec::new(),
        },
    }
}

// ============================================================================
// TESTS
// ============================================================================
