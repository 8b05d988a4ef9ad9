// 💰 Rounding Policy - Shared numerical utilities
// Consistent rounding, tolerance thresholds, and currency formatting
// used by every calculation module.
//
// Financial calculations require careful control of decimal precision:
// rounding too early loses accuracy, rounding too late creates penny
// discrepancies that look like bugs in audit reports. Every module takes
// the policy as an explicit parameter - there is no hidden global.

use serde::{Deserialize, Serialize};

// ============================================================================
// ROUNDING POLICY
// ============================================================================

/// How monetary aggregates are rounded before comparison or display.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RoundingPolicy {
    /// Number of decimal places kept
    pub precision: u32,

    /// Use banker's rounding (round half to even) instead of half away from zero
    #[serde(default)]
    pub bankers_rounding: bool,
}

impl Default for RoundingPolicy {
    fn default() -> Self {
        DEFAULT_ROUNDING
    }
}

/// Dollar amounts: $1,234.56
pub const DEFAULT_ROUNDING: RoundingPolicy = RoundingPolicy {
    precision: 2,
    bankers_rounding: false,
};

/// Ratios like occupancy: 0.7350 (73.50%)
pub const RATIO_ROUNDING: RoundingPolicy = RoundingPolicy {
    precision: 4,
    bankers_rounding: false,
};

/// Interest rates: 0.065000 (6.5%)
pub const RATE_ROUNDING: RoundingPolicy = RoundingPolicy {
    precision: 6,
    bankers_rounding: false,
};

/// Two values within a penny are considered equal. Floating-point math
/// (0.1 + 0.2 != 0.3) means exact equality would reject correct results.
pub const DEFAULT_TOLERANCE: f64 = 0.01;

/// Tolerance for "is this debt balance effectively zero" style checks.
pub const CENTS_TOLERANCE: f64 = 0.01;

/// Round a value according to the policy. Idempotent: rounding an
/// already-rounded value is a no-op.
pub fn round_to(v: f64, policy: RoundingPolicy) -> f64 {
    let factor = 10f64.powi(policy.precision as i32);
    let scaled = v * factor;
    let rounded = if policy.bankers_rounding {
        round_half_even(scaled)
    } else {
        scaled.round()
    };
    rounded / factor
}

fn round_half_even(x: f64) -> f64 {
    let floor = x.floor();
    let diff = x - floor;
    if (diff - 0.5).abs() < f64::EPSILON {
        if (floor as i64) % 2 == 0 {
            floor
        } else {
            floor + 1.0
        }
    } else {
        x.round()
    }
}

/// Round to whole cents regardless of policy.
pub fn round_cents(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

// ============================================================================
// NUMERIC HELPERS
// ============================================================================

pub fn sum(values: &[f64]) -> f64 {
    values.iter().sum()
}

pub fn within_tolerance(a: f64, b: f64, tolerance: f64) -> bool {
    (a - b).abs() <= tolerance
}

pub fn variance(a: f64, b: f64) -> f64 {
    (a - b).abs()
}

/// Percent change from baseline to alternative, rounded to cents.
/// Zero baseline yields 0 rather than a division error.
pub fn pct_change(baseline: f64, alternative: f64) -> f64 {
    if baseline == 0.0 {
        return 0.0;
    }
    round_cents(((alternative - baseline) / baseline) * 100.0)
}

// ============================================================================
// CURRENCY FORMATTING
// ============================================================================

/// Format a dollar amount with thousands separators: 1234567.5 -> "1,234,567.5".
///
/// Whole amounts drop the decimal part ("400,000"), fractional amounts keep
/// up to two digits with trailing zeros trimmed. Gate messages embed this
/// output verbatim, so the format is part of the reporting contract.
pub fn fmt_money(v: f64) -> String {
    let cents = (v.abs() * 100.0).round() as u64;
    let whole = cents / 100;
    let frac = cents % 100;

    let mut grouped = String::new();
    let digits = whole.to_string();
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    let sign = if v < 0.0 && cents > 0 { "-" } else { "" };

    if frac == 0 {
        format!("{sign}{grouped}")
    } else if frac % 10 == 0 {
        format!("{sign}{grouped}.{}", frac / 10)
    } else {
        format!("{sign}{grouped}.{frac:02}")
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_to_default_policy() {
        assert_eq!(round_to(1.2344, DEFAULT_ROUNDING), 1.23);
        assert_eq!(round_to(1.2356, DEFAULT_ROUNDING), 1.24);
        assert_eq!(round_to(1234.5678, DEFAULT_ROUNDING), 1234.57);
        assert_eq!(round_to(-1234.5678, DEFAULT_ROUNDING), -1234.57);
    }

    #[test]
    fn test_round_to_is_idempotent() {
        let once = round_to(987.654321, DEFAULT_ROUNDING);
        assert_eq!(round_to(once, DEFAULT_ROUNDING), once);

        let ratio = round_to(0.73505, RATIO_ROUNDING);
        assert_eq!(round_to(ratio, RATIO_ROUNDING), ratio);
    }

    #[test]
    fn test_bankers_rounding_half_to_even() {
        let bankers = RoundingPolicy {
            precision: 2,
            bankers_rounding: true,
        };
        assert_eq!(round_to(0.125, bankers), 0.12);
        assert_eq!(round_to(0.135, bankers), 0.14);
        assert_eq!(round_to(2.5, RoundingPolicy { precision: 0, bankers_rounding: true }), 2.0);
        assert_eq!(round_to(3.5, RoundingPolicy { precision: 0, bankers_rounding: true }), 4.0);
    }

    #[test]
    fn test_precision_variants() {
        assert_eq!(round_to(0.73505678, RATIO_ROUNDING), 0.7351);
        assert_eq!(round_to(0.0650004, RATE_ROUNDING), 0.065);
    }

    #[test]
    fn test_tolerance_helpers() {
        assert!(within_tolerance(100.0, 100.009, DEFAULT_TOLERANCE));
        assert!(!within_tolerance(100.0, 100.02, DEFAULT_TOLERANCE));
        assert_eq!(variance(5.0, 7.5), 2.5);
    }

    #[test]
    fn test_pct_change() {
        assert_eq!(pct_change(100.0, 150.0), 50.0);
        assert_eq!(pct_change(0.0, 150.0), 0.0);
        assert_eq!(pct_change(200.0, 150.0), -25.0);
    }

    #[test]
    fn test_fmt_money_grouping() {
        assert_eq!(fmt_money(400000.0), "400,000");
        assert_eq!(fmt_money(1234567.5), "1,234,567.5");
        assert_eq!(fmt_money(1234567.89), "1,234,567.89");
        assert_eq!(fmt_money(999.0), "999");
        assert_eq!(fmt_money(0.0), "0");
        assert_eq!(fmt_money(-1500.25), "-1,500.25");
    }
}
