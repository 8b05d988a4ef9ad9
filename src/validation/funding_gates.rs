// 🧪 Portfolio Funding Gate Validator
// Post-computation sanity rules run over an entity's monthly cash series:
//   - Operations cannot start before funding is received
//   - Cash balances must never go below zero in any month
//   - All debt must be repaid by the end of the projection
//   - Distributions cannot be made while cash is negative
// Violations surface as data with a severity, never as errors.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::rounding::{round_cents, CENTS_TOLERANCE};

// ============================================================================
// INPUT
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GateEntityType {
    Property,
    ManagementCompany,
    Portfolio,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FundingGateInput {
    pub entity_type: GateEntityType,
    pub entity_name: String,
    pub operations_start_date: Option<NaiveDate>,
    pub funding_date: Option<NaiveDate>,
    /// Ending cash balance per projection month
    pub monthly_ending_cash: Vec<f64>,
    pub final_debt_outstanding: Option<f64>,
    pub monthly_distributions: Option<Vec<f64>>,
}

// ============================================================================
// OUTPUT
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Critical,
    Material,
    Info,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GateResult {
    pub rule: String,
    pub description: String,
    pub passed: bool,
    pub details: String,
    pub severity: Severity,
    /// Month index of the first violation, -1 when not applicable
    pub first_violation_month: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FundingGateOutput {
    pub all_gates_passed: bool,
    pub gates: Vec<GateResult>,
    pub negative_cash_months: Vec<usize>,
    pub minimum_cash_balance: f64,
}

// ============================================================================
// VALIDATOR
// ============================================================================

pub fn check_funding_gates(input: &FundingGateInput) -> FundingGateOutput {
    let mut gates = Vec::new();

    // Ops-before-funding rule, when both dates are known
    if let (Some(ops_date), Some(fund_date)) =
        (input.operations_start_date, input.funding_date)
    {
        let passed = fund_date <= ops_date;
        let (rule, description) = match input.entity_type {
            GateEntityType::ManagementCompany => (
                "Management Company Funding Gate",
                "Operations cannot start before SAFE funding is received",
            ),
            _ => (
                "Property Activation Gate",
                "Property cannot operate before acquisition/funding",
            ),
        };
        gates.push(GateResult {
            rule: rule.to_string(),
            description: description.to_string(),
            passed,
            details: if passed {
                format!("Funded on {fund_date}, operations start {ops_date}")
            } else {
                format!(
                    "Operations start {ops_date} but funding not received until {fund_date}"
                )
            },
            severity: if passed { Severity::Info } else { Severity::Critical },
            first_violation_month: -1,
        });
    }

    // No negative cash, and track the low-water mark
    let mut negative_cash_months = Vec::new();
    let mut minimum_cash_balance = f64::INFINITY;
    for (i, &cash) in input.monthly_ending_cash.iter().enumerate() {
        if cash < minimum_cash_balance {
            minimum_cash_balance = cash;
        }
        if cash < 0.0 {
            negative_cash_months.push(i);
        }
    }
    if minimum_cash_balance == f64::INFINITY {
        minimum_cash_balance = 0.0;
    }

    let cash_ok = negative_cash_months.is_empty();
    gates.push(GateResult {
        rule: "No Negative Cash".to_string(),
        description: "Cash balances must never go below zero in any month".to_string(),
        passed: cash_ok,
        details: if cash_ok {
            format!(
                "All {} months have non-negative cash (min: ${})",
                input.monthly_ending_cash.len(),
                crate::rounding::fmt_money(minimum_cash_balance)
            )
        } else {
            format!(
                "{} months have negative cash. First violation: month {}. Min balance: ${}",
                negative_cash_months.len(),
                negative_cash_months[0],
                crate::rounding::fmt_money(minimum_cash_balance)
            )
        },
        severity: if cash_ok { Severity::Info } else { Severity::Material },
        first_violation_month: negative_cash_months.first().map_or(-1, |&m| m as i32),
    });

    // Debt-free at exit, when a final balance was supplied
    if let Some(final_debt) = input.final_debt_outstanding {
        let debt_free = final_debt <= CENTS_TOLERANCE;
        gates.push(GateResult {
            rule: "Debt-Free at Exit".to_string(),
            description: "All debt must be repaid by end of projection period".to_string(),
            passed: debt_free,
            details: if debt_free {
                "No outstanding debt at exit".to_string()
            } else {
                format!(
                    "Outstanding debt at exit: ${}",
                    crate::rounding::fmt_money(final_debt)
                )
            },
            severity: if debt_free { Severity::Info } else { Severity::Critical },
            first_violation_month: -1,
        });
    }

    // No distribution while cash is negative
    if let Some(distributions) = &input.monthly_distributions {
        if !distributions.is_empty() {
            let mut over_dist_month: i32 = -1;
            for (i, &dist) in distributions.iter().enumerate() {
                let cash = input.monthly_ending_cash.get(i).copied().unwrap_or(0.0);
                if dist > 0.0 && cash < 0.0 {
                    over_dist_month = i as i32;
                    break;
                }
            }
            let passed = over_dist_month == -1;
            gates.push(GateResult {
                rule: "No Over-Distribution".to_string(),
                description: "Distributions cannot exceed available cash".to_string(),
                passed,
                details: if passed {
                    "No over-distributions detected".to_string()
                } else {
                    format!(
                        "Over-distribution detected in month {over_dist_month}: \
                         distribution made when cash is negative"
                    )
                },
                severity: if passed { Severity::Info } else { Severity::Material },
                first_violation_month: over_dist_month,
            });
        }
    }

    FundingGateOutput {
        all_gates_passed: gates.iter().all(|g| g.passed),
        gates,
        negative_cash_months,
        minimum_cash_balance: round_cents(minimum_cash_balance),
    }
}

// ============================================================================
// TESTS
// ============================================================================
