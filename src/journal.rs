// 📒 Journal Deltas - Pre-formatted double-entry accounting hooks
// Every calculator emits balanced journal entries so the statement layer
// can post funding, origination, and refinance activity without re-deriving
// the accounting treatment.

use serde::{Deserialize, Serialize};

// ============================================================================
// CLASSIFICATION
// ============================================================================

/// Where an account lives on the financial statements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Classification {
    BsAsset,
    BsLiability,
    BsEquity,
    IsExpense,
}

/// Which cash flow statement section the entry flows through (ASC 230).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CashFlowBucket {
    Operating,
    Investing,
    Financing,
}

// ============================================================================
// JOURNAL DELTA
// ============================================================================

/// One side of a double-entry posting.
///
/// Invariant: every hook builder emits entries whose total debits equal
/// total credits for each underlying event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JournalDelta {
    /// Ledger account name (e.g. "CASH", "EQUITY_CONTRIBUTED")
    pub account: String,

    pub debit: f64,
    pub credit: f64,

    pub classification: Classification,
    pub cash_flow_bucket: CashFlowBucket,

    /// Human-readable audit memo
    pub memo: String,
}

/// Accounting elections that change how costs are posted.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AccountingPolicy {
    /// Defer (capitalize) loan closing costs per ASC 310-20 instead of
    /// expensing them in the period incurred.
    pub defer_closing_costs: bool,
}

impl Default for AccountingPolicy {
    fn default() -> Self {
        AccountingPolicy {
            defer_closing_costs: true,
        }
    }
}

/// Sum of debits minus sum of credits across a set of deltas.
/// Zero (within float noise) for any well-formed hook batch.
pub fn imbalance(deltas: &[JournalDelta]) -> f64 {
    deltas.iter().map(|d| d.debit - d.credit).sum()
}
