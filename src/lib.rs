// Hospitality Pro Forma Calculation Engine - Core Library
// Exposes the funding, financing, refinance, exit, and validation modules
// for use in the CLI and tests.

pub mod exit_valuation;
pub mod export;
pub mod financing;
pub mod funding;
pub mod journal;
pub mod refinance;
pub mod rounding;
pub mod scenario;
pub mod schedule;
pub mod validation;

// Re-export commonly used types
pub use exit_valuation::{compute_exit_valuation, ExitValuationInput, ExitValuationOutput};
pub use financing::{
    compute_financing, FinancingFlags, FinancingInput, FinancingOutput, LoanType,
};
pub use funding::{
    check_gates, compute_funding, FundingEntity, FundingEntityType, FundingEvent,
    FundingInput, FundingOutput, FundingTranche, GateCheck, GateType,
    PropertyFundingRequirement, TrancheTrigger,
};
pub use journal::{AccountingPolicy, CashFlowBucket, Classification, JournalDelta};
pub use refinance::{
    compute_refinance, PropertyValuation, RefinanceInput, RefinanceOutput,
};
pub use rounding::{
    fmt_money, round_to, RoundingPolicy, DEFAULT_ROUNDING, DEFAULT_TOLERANCE,
    RATE_ROUNDING, RATIO_ROUNDING,
};
pub use scenario::Scenario;
pub use schedule::{build_schedule, NewLoanTerms, ScheduleEntry};
pub use validation::{
    check_funding_gates, verify_export, ExportVerificationInput, ExportVerificationOutput,
    FundingGateInput, FundingGateOutput,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
