// 🔍 Export Verification - Post-export data integrity spot checks
// After financial data is exported to a report format, this validator
// confirms the output still matches the engine: expected sections present,
// spot-checked values within tolerance, no dropped years or properties.
// Full cell-by-cell comparison is impractical for large multi-property
// exports; spot-checking catches the common failure modes fast.

use serde::{Deserialize, Serialize};

use crate::rounding::{round_cents, DEFAULT_TOLERANCE};

// ============================================================================
// INPUT
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExportFormat {
    Excel,
    Pdf,
    Pptx,
    Csv,
    PngChart,
    PngTable,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExportSource {
    IncomeStatement,
    CashFlow,
    BalanceSheet,
    InvestmentAnalysis,
    Dashboard,
    CompanyFinancials,
    Consolidated,
}

impl ExportFormat {
    fn label(self) -> &'static str {
        match self {
            ExportFormat::Excel => "excel",
            ExportFormat::Pdf => "pdf",
            ExportFormat::Pptx => "pptx",
            ExportFormat::Csv => "csv",
            ExportFormat::PngChart => "png_chart",
            ExportFormat::PngTable => "png_table",
        }
    }
}

impl ExportSource {
    fn label(self) -> &'static str {
        match self {
            ExportSource::IncomeStatement => "income_statement",
            ExportSource::CashFlow => "cash_flow",
            ExportSource::BalanceSheet => "balance_sheet",
            ExportSource::InvestmentAnalysis => "investment_analysis",
            ExportSource::Dashboard => "dashboard",
            ExportSource::CompanyFinancials => "company_financials",
            ExportSource::Consolidated => "consolidated",
        }
    }
}

/// One known value to spot-check against its exported counterpart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SampleValue {
    pub label: String,
    pub expected_value: f64,
    pub exported_value: f64,
    /// Overrides the default penny tolerance
    pub tolerance: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportVerificationInput {
    pub export_format: ExportFormat,
    pub export_source: ExportSource,
    pub expected_sections: Option<Vec<String>>,
    pub sample_values: Option<Vec<SampleValue>>,
    pub expected_year_count: Option<u32>,
    pub expected_property_count: Option<u32>,
    pub actual_sections: Option<Vec<String>>,
    pub actual_year_count: Option<u32>,
    pub actual_property_count: Option<u32>,
}

// ============================================================================
// OUTPUT
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportCheck {
    pub check: String,
    pub passed: bool,
    pub details: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValueMismatch {
    pub label: String,
    pub expected: f64,
    pub actual: f64,
    pub variance: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportVerificationOutput {
    pub all_passed: bool,
    pub checks: Vec<ExportCheck>,
    pub missing_sections: Vec<String>,
    pub value_mismatches: Vec<ValueMismatch>,
}

// ============================================================================
// VERIFIER
// ============================================================================

pub fn verify_export(input: &ExportVerificationInput) -> ExportVerificationOutput {
    let mut checks = Vec::new();
    let mut missing_sections = Vec::new();
    let mut value_mismatches = Vec::new();

    checks.push(ExportCheck {
        check: "Export Format Valid".to_string(),
        passed: true,
        details: format!(
            "Format: {}, Source: {}",
            input.export_format.label(),
            input.export_source.label()
        ),
    });

    match (&input.expected_sections, &input.actual_sections) {
        (Some(expected), Some(actual)) => {
            let actual_lower: Vec<String> =
                actual.iter().map(|s| s.to_lowercase()).collect();
            for section in expected {
                if !actual_lower.contains(&section.to_lowercase()) {
                    missing_sections.push(section.clone());
                }
            }
            let passed = missing_sections.is_empty();
            checks.push(ExportCheck {
                check: "All Expected Sections Present".to_string(),
                passed,
                details: if passed {
                    format!("All {} sections found", expected.len())
                } else {
                    format!(
                        "Missing {} sections: {}",
                        missing_sections.len(),
                        missing_sections.join(", ")
                    )
                },
            });
        }
        (Some(_), None) => {
            checks.push(ExportCheck {
                check: "All Expected Sections Present".to_string(),
                passed: false,
                details: "Cannot verify sections — actual_sections not provided".to_string(),
            });
        }
        _ => {}
    }

    if let Some(samples) = &input.sample_values {
        for sv in samples {
            let tolerance = sv.tolerance.unwrap_or(DEFAULT_TOLERANCE);
            let variance = (sv.expected_value - sv.exported_value).abs();
            if variance > tolerance {
                value_mismatches.push(ValueMismatch {
                    label: sv.label.clone(),
                    expected: sv.expected_value,
                    actual: sv.exported_value,
                    variance: round_cents(variance),
                });
            }
        }
        let passed = value_mismatches.is_empty();
        checks.push(ExportCheck {
            check: "Sample Values Match".to_string(),
            passed,
            details: if passed {
                format!(
                    "All {} spot-check values match within tolerance",
                    samples.len()
                )
            } else {
                format!(
                    "{} of {} values have mismatches",
                    value_mismatches.len(),
                    samples.len()
                )
            },
        });
    }

    if let (Some(expected), Some(actual)) =
        (input.expected_year_count, input.actual_year_count)
    {
        let passed = actual == expected;
        checks.push(ExportCheck {
            check: "Year Count Correct".to_string(),
            passed,
            details: if passed {
                format!("{actual} years as expected")
            } else {
                format!("Expected {expected} years, found {actual}")
            },
        });
    }

    if let (Some(expected), Some(actual)) =
        (input.expected_property_count, input.actual_property_count)
    {
        let passed = actual == expected;
        checks.push(ExportCheck {
            check: "Property Count Correct".to_string(),
            passed,
            details: if passed {
                format!("{actual} properties as expected")
            } else {
                format!("Expected {expected} properties, found {actual}")
            },
        });
    }

    ExportVerificationOutput {
        all_passed: checks.iter().all(|c| c.passed)
            && missing_sections.is_empty()
            && value_mismatches.is_empty(),
        checks,
        missing_sections,
        value_mismatches,
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn base_input() -> ExportVerificationInput {
        ExportVerificationInput {
            export_format: ExportFormat::Excel,
            export_source: ExportSource::IncomeStatement,
            expected_sections: Some(vec![
                "Revenue".to_string(),
                "Operating Expenses".to_string(),
                "NOI".to_string(),
            ]),
            sample_values: Some(vec![SampleValue {
                label: "Year 1 NOI".to_string(),
                expected_value: 1_200_000.0,
                exported_value: 1_200_000.005,
                tolerance: None,
            }]),
            expected_year_count: Some(10),
            expected_property_count: Some(3),
            actual_sections: Some(vec![
                "revenue".to_string(),
                "Operating Expenses".to_string(),
                "noi".to_string(),
            ]),
            actual_year_count: Some(10),
            actual_property_count: Some(3),
        }
    }

    #[test]
    fn test_clean_export_passes_all_checks() {
        let output = verify_export(&base_input());
        assert!(output.all_passed);
        assert_eq!(output.checks.len(), 5);
        assert!(output.missing_sections.is_empty());
        assert!(output.value_mismatches.is_empty());
    }

    #[test]
    fn test_section_matching_is_case_insensitive() {
        let output = verify_export(&base_input());
        let sections = output
            .checks
            .iter()
            .find(|c| c.check == "All Expected Sections Present")
            .unwrap();
        assert!(sections.passed);
    }

    #[test]
    fn test_missing_section_is_reported() {
        let mut input = base_input();
        input.actual_sections = Some(vec!["Revenue".to_string()]);
        let output = verify_export(&input);

        assert!(!output.all_passed);
        assert_eq!(
            output.missing_sections,
            vec!["Operating Expenses", "NOI"]
        );
    }

    #[test]
    fn test_absent_actual_sections_fails_the_check() {
        let mut input = base_input();
        input.actual_sections = None;
        let output = verify_export(&input);
        let sections = output
            .checks
            .iter()
            .find(|c| c.check == "All Expected Sections Present")
            .unwrap();
        assert!(!sections.passed);
        assert!(sections.details.contains("not provided"));
    }

    #[test]
    fn test_value_drift_beyond_tolerance_is_a_mismatch() {
        let mut input = base_input();
        input.sample_values = Some(vec![SampleValue {
            label: "Total Revenue".to_string(),
            expected_value: 5_000_000.0,
            exported_value: 5_000_100.0,
            tolerance: None,
        }]);
        let output = verify_export(&input);

        assert!(!output.all_passed);
        assert_eq!(output.value_mismatches.len(), 1);
        assert_eq!(output.value_mismatches[0].variance, 100.0);
    }

    #[test]
    fn test_custom_tolerance_is_honored() {
        let mut input = base_input();
        input.sample_values = Some(vec![SampleValue {
            label: "Rounded Total".to_string(),
            expected_value: 5_000_000.0,
            exported_value: 5_000_100.0,
            tolerance: Some(500.0),
        }]);
        let output = verify_export(&input);
        assert!(output.all_passed);
    }

    #[test]
    fn test_dropped_year_detected() {
        let mut input = base_input();
        input.actual_year_count = Some(9);
        let output = verify_export(&input);

        assert!(!output.all_passed);
        let years = output
            .checks
            .iter()
            .find(|c| c.check == "Year Count Correct")
            .unwrap();
        assert!(!years.passed);
        assert_eq!(years.details, "Expected 10 years, found 9");
    }

    #[test]
    fn test_dropped_property_detected() {
        let mut input = base_input();
        input.actual_property_count = Some(2);
        let output = verify_export(&input);
        assert!(!output.all_passed);
    }

    #[test]
    fn test_minimal_input_only_checks_format() {
        let input = ExportVerificationInput {
            export_format: ExportFormat::Csv,
            export_source: ExportSource::Dashboard,
            expected_sections: None,
            sample_values: None,
            expected_year_count: None,
            expected_property_count: None,
            actual_sections: None,
            actual_year_count: None,
            actual_property_count: None,
        };
        let output = verify_export(&input);
        assert!(output.all_passed);
        assert_eq!(output.checks.len(), 1);
    }
}
