// Post-computation validators: portfolio funding gates over monthly cash
// series, and export integrity spot checks.

pub mod export_verification;
pub mod funding_gates;

pub use export_verification::{
    verify_export, ExportCheck, ExportFormat, ExportSource, ExportVerificationInput,
    ExportVerificationOutput, SampleValue, ValueMismatch,
};
pub use funding_gates::{
    check_funding_gates, FundingGateInput, FundingGateOutput, GateEntityType, GateResult,
    Severity,
};
