// 📈 Debt Service Schedule - Month-by-month loan amortization
// Two-phase structure: an optional interest-only period (balance does not
// move), then level amortizing payments via the PMT formula. If the
// amortization period outlives the loan term, the remaining balance falls
// due as a balloon in the final month. The final month always sets
// principal = remaining balance so no rounding dust survives on the
// balance sheet.

use serde::{Deserialize, Serialize};

use crate::rounding::{round_to, RoundingPolicy};

// ============================================================================
// LOAN TERMS
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NewLoanTerms {
    /// Annual interest rate as a decimal (0.065 = 6.5%)
    pub rate_annual: f64,

    /// Months until maturity
    pub term_months: u32,

    /// Months the level payment is computed over (may exceed the term,
    /// producing a balloon)
    pub amortization_months: u32,

    /// Leading interest-only months (0 for fully amortizing loans)
    pub io_months: u32,
}

/// One month of the debt service schedule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleEntry {
    /// Zero-based month index from loan origination
    pub month: u32,
    pub beginning_balance: f64,
    /// Income statement expense
    pub interest: f64,
    /// Balance sheet only; never an expense
    pub principal: f64,
    pub payment: f64,
    pub ending_balance: f64,
    pub is_io: bool,
}

// ============================================================================
// PAYMENT FORMULAS
// ============================================================================

/// Level payment for a fully amortizing loan:
///   PMT = L * r(1+r)^n / ((1+r)^n - 1)
/// Zero-rate loans degrade to straight-line principal.
pub fn pmt(principal: f64, monthly_rate: f64, n_payments: u32) -> f64 {
    if n_payments == 0 {
        return 0.0;
    }
    if monthly_rate == 0.0 {
        return principal / n_payments as f64;
    }
    let factor = (1.0 + monthly_rate).powi(n_payments as i32);
    principal * (monthly_rate * factor) / (factor - 1.0)
}

/// Interest-only payment: balance times the monthly rate.
pub fn io_payment(balance: f64, monthly_rate: f64) -> f64 {
    balance * monthly_rate
}

// ============================================================================
// SCHEDULE BUILDER
// ============================================================================

/// Build the monthly debt service schedule for a new loan.
pub fn build_schedule(
    loan_amount: f64,
    terms: &NewLoanTerms,
    rounding: RoundingPolicy,
) -> Vec<ScheduleEntry> {
    let mut schedule = Vec::with_capacity(terms.term_months as usize);
    let monthly_rate = terms.rate_annual / 12.0;
    let mut balance = loan_amount;

    // Level payment is sized on the full loan amount over the amortization
    // period, regardless of any IO months in front of it.
    let amort_payment = pmt(loan_amount, monthly_rate, terms.amortization_months);

    for m in 0..terms.term_months {
        let beginning_balance = round_to(balance, rounding);
        let is_io = m < terms.io_months;

        let (interest, principal, payment) = if is_io {
            let interest = round_to(io_payment(balance, monthly_rate), rounding);
            (interest, 0.0, interest)
        } else if m == terms.term_months - 1 {
            // Final month: retire whatever is left (balloon if amortization
            // outlives the term)
            let interest = round_to(balance * monthly_rate, rounding);
            let principal = round_to(balance, rounding);
            let payment = round_to(interest + principal, rounding);
            (interest, principal, payment)
        } else {
            let interest = round_to(balance * monthly_rate, rounding);
            let payment = round_to(amort_payment, rounding);
            let principal = round_to(payment - interest, rounding);
            (interest, principal, payment)
        };

        balance = round_to((balance - principal).max(0.0), rounding);

        schedule.push(ScheduleEntry {
            month: m,
            beginning_balance,
            interest,
            principal,
            payment,
            ending_balance: balance,
            is_io,
        });
    }

    schedule
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rounding::DEFAULT_ROUNDING;

    const EPS: f64 = 0.01;

    #[test]
    fn test_pmt_known_value() {
        // $1M at 6% annual over 360 months: standard tables say $5,995.51
        let payment = pmt(1_000_000.0, 0.06 / 12.0, 360);
        assert!((payment - 5995.51).abs() < EPS);
    }

    #[test]
    fn test_pmt_zero_rate_is_straight_line() {
        assert_eq!(pmt(120_000.0, 0.0, 120), 1000.0);
    }

    #[test]
    fn test_pmt_zero_payments_is_zero() {
        assert_eq!(pmt(100_000.0, 0.005, 0), 0.0);
    }

    #[test]
    fn test_io_phase_keeps_balance_flat() {
        let terms = NewLoanTerms {
            rate_annual: 0.06,
            term_months: 24,
            amortization_months: 12,
            io_months: 12,
        };
        let schedule = build_schedule(1_000_000.0, &terms, DEFAULT_ROUNDING);

        for entry in &schedule[..12] {
            assert!(entry.is_io);
            assert_eq!(entry.principal, 0.0);
            assert_eq!(entry.ending_balance, 1_000_000.0);
            assert_eq!(entry.interest, 5000.0); // 1M * 0.5%
            assert_eq!(entry.payment, entry.interest);
        }
        assert!(!schedule[12].is_io);
    }

    #[test]
    fn test_fully_amortizing_loan_reaches_zero() {
        let terms = NewLoanTerms {
            rate_annual: 0.06,
            term_months: 120,
            amortization_months: 120,
            io_months: 0,
        };
        let schedule = build_schedule(500_000.0, &terms, DEFAULT_ROUNDING);
        assert_eq!(schedule.len(), 120);
        assert_eq!(schedule.last().unwrap().ending_balance, 0.0);
        // No balloon: final principal is in line with the regular payment
        assert!(schedule.last().unwrap().principal < 2.0 * schedule[118].principal);
    }

    #[test]
    fn test_balloon_when_amortization_outlives_term() {
        // 30-year amortization on a 10-year term leaves a large balloon
        let terms = NewLoanTerms {
            rate_annual: 0.06,
            term_months: 120,
            amortization_months: 360,
            io_months: 0,
        };
        let schedule = build_schedule(1_000_000.0, &terms, DEFAULT_ROUNDING);
        let last = schedule.last().unwrap();
        assert_eq!(last.ending_balance, 0.0);
        assert!(last.principal > 800_000.0, "balloon principal: {}", last.principal);
    }

    #[test]
    fn test_schedule_is_self_consistent() {
        let terms = NewLoanTerms {
            rate_annual: 0.075,
            term_months: 60,
            amortization_months: 300,
            io_months: 12,
        };
        let schedule = build_schedule(2_500_000.0, &terms, DEFAULT_ROUNDING);

        for pair in schedule.windows(2) {
            assert_eq!(pair[0].ending_balance, pair[1].beginning_balance);
        }
        for entry in &schedule {
            assert!(
                (entry.ending_balance - (entry.beginning_balance - entry.principal)).abs() < EPS,
                "month {} does not reconcile",
                entry.month
            );
            assert!((entry.payment - (entry.interest + entry.principal)).abs() < EPS);
            assert!(entry.ending_balance >= 0.0);
        }
    }

    #[test]
    fn test_zero_rate_schedule() {
        let terms = NewLoanTerms {
            rate_annual: 0.0,
            term_months: 12,
            amortization_months: 12,
            io_months: 0,
        };
        let schedule = build_schedule(12_000.0, &terms, DEFAULT_ROUNDING);
        for entry in &schedule {
            assert_eq!(entry.interest, 0.0);
            assert_eq!(entry.principal, 1000.0);
        }
        assert_eq!(schedule.last().unwrap().ending_balance, 0.0);
    }
}
