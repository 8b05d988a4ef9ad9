// Funding & Tranche Engine
// Resolves committed capital tranches into a funding timeline, enforces
// the funding gates, and produces the equity roll-forward and journal hooks.

pub mod engine;
pub mod gates;
pub mod hooks;
pub mod rollforward;
pub mod timeline;
pub mod types;
pub mod validate;

pub use engine::compute_funding;
pub use gates::check_gates;
pub use hooks::build_funding_journal_hooks;
pub use rollforward::build_equity_rollforward;
pub use timeline::build_funding_timeline;
pub use types::{
    EquityRollForwardEntry, FundingEntity, FundingEntityType, FundingEvent, FundingFlags,
    FundingInput, FundingOutput, FundingTranche, GateCheck, GateType,
    PropertyFundingRequirement, TrancheTrigger,
};
pub use validate::validate_funding_input;
