// Funding & tranche engine - data model
// Capital tranches flow in, a chronological timeline plus gate checks,
// equity roll-forward, and journal hooks flow out.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::journal::{AccountingPolicy, JournalDelta};
use crate::rounding::RoundingPolicy;

// ============================================================================
// ENTITY MODEL
// ============================================================================

/// Who receives capital: the management company or a single asset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FundingEntityType {
    #[serde(rename = "OPCO")]
    Opco,
    #[serde(rename = "PROPERTY")]
    Property,
}

/// Identity of a capital recipient. `(entity_type, id)` is unique within
/// one model run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FundingEntity {
    #[serde(rename = "type")]
    pub entity_type: FundingEntityType,
    pub id: String,
    /// Display label used in gate messages
    pub name: String,
}

impl FundingEntity {
    /// The canonical OpCo entity used on company-level gate checks.
    pub fn opco() -> Self {
        FundingEntity {
            entity_type: FundingEntityType::Opco,
            id: "opco".to_string(),
            name: "Management Company".to_string(),
        }
    }
}

// ============================================================================
// TRANCHE TRIGGERS
// ============================================================================

/// When a committed tranche actually funds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TrancheTrigger {
    /// Funds on an explicit calendar date
    Scheduled { date: NaiveDate },

    /// Funds on the acquisition date of the named property
    OnAcquisition { property_id: String },

    /// Condition is evaluated externally; the fallback date is used here
    Conditional {
        condition: String,
        fallback_date: NaiveDate,
    },
}

/// A committed capital contribution, not yet resolved to a date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FundingTranche {
    pub tranche_id: String,
    pub label: String,
    pub amount: f64,
    pub trigger: TrancheTrigger,
    pub target_entity: FundingEntity,
    /// Capital source label (e.g. "SAFE Round 1", "LP Equity")
    pub source: String,
}

// ============================================================================
// PROPERTY REQUIREMENTS
// ============================================================================

/// The capital target one property must hit by its acquisition date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertyFundingRequirement {
    pub property_id: String,
    pub property_name: String,
    /// Deadline by which equity must be in place
    pub acquisition_date: NaiveDate,
    pub operations_start_date: NaiveDate,
    pub total_cost: f64,
    pub loan_amount: f64,
    /// Equity that must be funded by `acquisition_date`
    pub equity_required: f64,
}

// ============================================================================
// ENGINE INPUT
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FundingInput {
    pub model_start_date: NaiveDate,
    /// Date the management company begins operating (and must be funded by)
    pub company_ops_start_date: NaiveDate,
    pub tranches: Vec<FundingTranche>,
    pub property_requirements: Vec<PropertyFundingRequirement>,
    pub accounting_policy_ref: AccountingPolicy,
    pub rounding_policy: RoundingPolicy,
}

// ============================================================================
// ENGINE OUTPUT
// ============================================================================

/// A tranche resolved to a concrete funding date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FundingEvent {
    pub date: NaiveDate,
    pub tranche_id: String,
    pub label: String,
    pub amount: f64,
    pub target_entity: FundingEntity,
    pub source: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GateType {
    OpcoOpsBeforeFunding,
    PropertyOpsBeforeEquity,
    FundingShortfall,
}

/// One pass/fail gate evaluation. The message text is embedded verbatim in
/// exported reports, so it is a stable contract, not incidental logging.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GateCheck {
    pub entity: FundingEntity,
    pub gate_type: GateType,
    pub passed: bool,
    pub message: String,
    /// The date the gate is evaluated against (ops start or acquisition date)
    pub required_date: NaiveDate,
    /// Earliest qualifying funding date, if any funding qualified
    pub earliest_funding_date: Option<NaiveDate>,
    /// Rounded gap between required and funded equity (shortfall checks only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shortfall_amount: Option<f64>,
}

/// One month of the per-entity equity roll-forward.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EquityRollForwardEntry {
    /// YYYY-MM period label
    pub period: String,
    pub entity_id: String,
    pub beginning_balance: f64,
    pub contributions: f64,
    pub distributions: f64,
    pub ending_balance: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FundingFlags {
    pub all_gates_passed: bool,
    pub has_shortfalls: bool,
    /// Validation errors; non-empty means the rest of the output is zeroed
    pub invalid_inputs: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FundingOutput {
    pub funding_timeline: Vec<FundingEvent>,
    pub gate_checks: Vec<GateCheck>,
    pub equity_rollforward: Vec<EquityRollForwardEntry>,
    pub total_equity_committed: f64,
    pub total_funded_opco: f64,
    pub total_funded_properties: f64,
    pub journal_hooks: Vec<JournalDelta>,
    pub flags: FundingFlags,
    pub warnings: Vec<String>,
}
