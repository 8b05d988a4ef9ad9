// 🏨 Acquisition Financing Calculator
// Sizes the acquisition loan (LTV cap or explicit override), computes
// closing costs and the equity check the sponsor must write, builds the
// monthly debt service schedule, and emits origination journal hooks.
//
// Pipeline:
//   1. Validate    - reject impossible inputs
//   2. Size        - LTV cap or override amount
//   3. Closing     - percentage-based + fixed fees
//   4. Net         - gross loan minus closing costs
//   5. Equity      - purchase price + closing costs + reserves - net proceeds
//   6. Schedule    - monthly amortization table
//   7. Hooks       - double-entry origination postings
//
// GAAP treatment: closing costs are deferred (capitalized) per ASC 310-20
// under the default policy; only interest ever reaches the income statement;
// equity contributions flow through equity accounts.

use serde::{Deserialize, Serialize};

use crate::journal::{AccountingPolicy, CashFlowBucket, Classification, JournalDelta};
use crate::rounding::{round_to, RoundingPolicy};
use crate::schedule::{build_schedule, NewLoanTerms, ScheduleEntry};

// ============================================================================
// INPUT
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LoanType {
    /// Level payments from month one
    #[serde(rename = "amortizing")]
    Amortizing,
    /// Interest-only period first, then level payments
    #[serde(rename = "IO_then_amortizing")]
    IoThenAmortizing,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinancingInput {
    pub property_name: String,
    pub purchase_price: f64,

    /// Maximum loan-to-value ratio; mutually exclusive with the override
    pub ltv_max: Option<f64>,
    /// Explicit loan amount, bypassing LTV sizing
    pub loan_amount_override: Option<f64>,

    pub interest_rate_annual: f64,
    pub term_months: u32,
    pub amortization_months: u32,
    pub loan_type: LoanType,

    /// Closing costs as a fraction of the gross loan
    pub closing_cost_pct: f64,
    pub fixed_fees: Option<f64>,
    pub upfront_reserves: Option<f64>,

    pub accounting_policy_ref: AccountingPolicy,
    pub rounding_policy: RoundingPolicy,
}

// ============================================================================
// OUTPUT
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClosingCostBreakdown {
    pub pct_based: f64,
    pub fixed_fees: f64,
    pub total: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SizingResult {
    pub loan_amount: f64,
    pub ltv_binding: bool,
    pub override_binding: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinancingFlags {
    pub ltv_binding: bool,
    pub override_binding: bool,
    pub invalid_inputs: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinancingOutput {
    pub loan_amount_gross: f64,
    pub loan_amount_net: f64,
    pub closing_costs: ClosingCostBreakdown,
    /// Equity check the sponsor must write at closing
    pub equity_required: f64,
    pub initial_cash_in: f64,
    pub upfront_reserves: f64,
    pub debt_service_schedule: Vec<ScheduleEntry>,
    pub journal_hooks: Vec<JournalDelta>,
    pub flags: FinancingFlags,
}

// ============================================================================
// VALIDATION
// ============================================================================

pub fn validate_financing_input(input: &FinancingInput) -> Vec<String> {
    let mut errors = Vec::new();

    if input.purchase_price <= 0.0 {
        errors.push("purchase_price must be > 0".to_string());
    }

    // Exactly one sizing method must be chosen
    match (input.ltv_max, input.loan_amount_override) {
        (None, None) => {
            errors.push("Either ltv_max or loan_amount_override must be provided".to_string())
        }
        (Some(_), Some(_)) => {
            errors.push("ltv_max and loan_amount_override are mutually exclusive".to_string())
        }
        (Some(ltv), None) if ltv <= 0.0 || ltv > 1.0 => {
            errors.push("ltv_max must be between 0 (exclusive) and 1 (inclusive)".to_string())
        }
        (None, Some(amount)) if amount <= 0.0 => {
            errors.push("loan_amount_override must be > 0".to_string())
        }
        _ => {}
    }

    if input.closing_cost_pct < 0.0 || input.closing_cost_pct >= 1.0 {
        errors.push("closing_cost_pct must be between 0 and 1".to_string());
    }
    if input.interest_rate_annual < 0.0 {
        errors.push("interest_rate_annual must be >= 0".to_string());
    }
    if input.term_months == 0 {
        errors.push("term_months must be > 0".to_string());
    }
    if input.amortization_months == 0 {
        errors.push("amortization_months must be > 0".to_string());
    }

    if input.loan_type == LoanType::IoThenAmortizing
        && input.term_months <= input.amortization_months
    {
        errors.push("IO_then_amortizing requires term_months > amortization_months".to_string());
    }

    if input.fixed_fees.map_or(false, |f| f < 0.0) {
        errors.push("fixed_fees must be >= 0".to_string());
    }
    if input.upfront_reserves.map_or(false, |r| r < 0.0) {
        errors.push("upfront_reserves must be >= 0".to_string());
    }

    errors
}

// ============================================================================
// SIZING + CLOSING COSTS
// ============================================================================

/// Size the acquisition loan: the override wins when present, otherwise the
/// LTV cap applies.
pub fn compute_acq_sizing(
    purchase_price: f64,
    ltv_max: Option<f64>,
    loan_amount_override: Option<f64>,
    rounding: RoundingPolicy,
) -> SizingResult {
    if let Some(amount) = loan_amount_override {
        return SizingResult {
            loan_amount: round_to(amount, rounding),
            ltv_binding: false,
            override_binding: true,
        };
    }

    let ltv = ltv_max.unwrap_or(0.0);
    SizingResult {
        loan_amount: round_to(purchase_price * ltv, rounding),
        ltv_binding: true,
        override_binding: false,
    }
}

pub fn compute_closing_costs(
    loan_amount: f64,
    closing_cost_pct: f64,
    fixed_fees: f64,
    rounding: RoundingPolicy,
) -> ClosingCostBreakdown {
    let pct_based = round_to(loan_amount * closing_cost_pct, rounding);
    let fixed = round_to(fixed_fees, rounding);
    ClosingCostBreakdown {
        pct_based,
        fixed_fees: fixed,
        total: round_to(pct_based + fixed, rounding),
    }
}

// ============================================================================
// JOURNAL HOOKS
// ============================================================================

fn build_acq_journal_hooks(
    property_name: &str,
    loan_amount: f64,
    closing_costs: f64,
    equity_required: f64,
    policy: &AccountingPolicy,
) -> Vec<JournalDelta> {
    let mut deltas = vec![
        JournalDelta {
            account: "CASH".to_string(),
            debit: loan_amount,
            credit: 0.0,
            classification: Classification::BsAsset,
            cash_flow_bucket: CashFlowBucket::Financing,
            memo: format!("Loan origination — {property_name}"),
        },
        JournalDelta {
            account: "LOAN_PAYABLE".to_string(),
            debit: 0.0,
            credit: loan_amount,
            classification: Classification::BsLiability,
            cash_flow_bucket: CashFlowBucket::Financing,
            memo: format!("Loan origination — {property_name}"),
        },
        JournalDelta {
            account: "CASH".to_string(),
            debit: equity_required,
            credit: 0.0,
            classification: Classification::BsAsset,
            cash_flow_bucket: CashFlowBucket::Financing,
            memo: format!("Equity contribution at closing — {property_name}"),
        },
        JournalDelta {
            account: "EQUITY_CONTRIBUTED".to_string(),
            debit: 0.0,
            credit: equity_required,
            classification: Classification::BsEquity,
            cash_flow_bucket: CashFlowBucket::Financing,
            memo: format!("Equity contribution at closing — {property_name}"),
        },
    ];

    if closing_costs > 0.0 {
        let (account, classification) = if policy.defer_closing_costs {
            ("DEFERRED_FINANCING_COSTS", Classification::BsAsset)
        } else {
            ("CLOSING_COST_EXPENSE", Classification::IsExpense)
        };
        deltas.push(JournalDelta {
            account: account.to_string(),
            debit: closing_costs,
            credit: 0.0,
            classification,
            cash_flow_bucket: CashFlowBucket::Financing,
            memo: format!("Closing costs — {property_name}"),
        });
        deltas.push(JournalDelta {
            account: "CASH".to_string(),
            debit: 0.0,
            credit: closing_costs,
            classification: Classification::BsAsset,
            cash_flow_bucket: CashFlowBucket::Financing,
            memo: format!("Closing costs paid — {property_name}"),
        });
    }

    deltas
}

// ============================================================================
// MAIN ENTRY POINT
// ============================================================================

fn build_error_result(errors: Vec<String>) -> FinancingOutput {
    FinancingOutput {
        loan_amount_gross: 0.0,
        loan_amount_net: 0.0,
        closing_costs: ClosingCostBreakdown {
            pct_based: 0.0,
            fixed_fees: 0.0,
            total: 0.0,
        },
        equity_required: 0.0,
        initial_cash_in: 0.0,
        upfront_reserves: 0.0,
        debt_service_schedule: Vec::new(),
        journal_hooks: Vec::new(),
        flags: FinancingFlags {
            ltv_binding: false,
            override_binding: false,
            invalid_inputs: errors,
        },
    }
}

/// Compute acquisition loan sizing, closing costs, equity required,
/// the debt service schedule, and origination journal hooks.
pub fn compute_financing(input: &FinancingInput) -> FinancingOutput {
    let rounding = input.rounding_policy;
    let r = |v: f64| round_to(v, rounding);

    let errors = validate_financing_input(input);
    if !errors.is_empty() {
        return build_error_result(errors);
    }

    let sizing = compute_acq_sizing(
        input.purchase_price,
        input.ltv_max,
        input.loan_amount_override,
        rounding,
    );
    let loan_amount_gross = sizing.loan_amount;

    let closing_costs = compute_closing_costs(
        loan_amount_gross,
        input.closing_cost_pct,
        input.fixed_fees.unwrap_or(0.0),
        rounding,
    );

    let loan_amount_net = r(loan_amount_gross - closing_costs.total);
    let reserves = r(input.upfront_reserves.unwrap_or(0.0));

    // Equity = purchase price + closing costs + reserves - net loan proceeds
    let equity_required =
        r(input.purchase_price + closing_costs.total + reserves - loan_amount_net);

    let io_months = if input.loan_type == LoanType::IoThenAmortizing {
        input.term_months - input.amortization_months
    } else {
        0
    };

    let terms = NewLoanTerms {
        rate_annual: input.interest_rate_annual,
        term_months: input.term_months,
        amortization_months: input.amortization_months,
        io_months,
    };

    let schedule = build_schedule(loan_amount_gross, &terms, rounding);

    let journal_hooks = build_acq_journal_hooks(
        &input.property_name,
        loan_amount_gross,
        closing_costs.total,
        equity_required,
        &input.accounting_policy_ref,
    );

    FinancingOutput {
        loan_amount_gross,
        loan_amount_net,
        closing_costs,
        equity_required,
        initial_cash_in: loan_amount_net,
        upfront_reserves: reserves,
        debt_service_schedule: schedule,
        journal_hooks,
        flags: FinancingFlags {
            ltv_binding: sizing.ltv_binding,
            override_binding: sizing.override_binding,
            invalid_inputs: Vec::new(),
        },
    }
}

// ============================================================================
// TESTS
// ============================================================================
