//! Level-payment loan amortization
//!
//! Only the first month's principal/interest split is produced; a full
//! schedule is never needed by the projections.

use serde::{Deserialize, Serialize};

use crate::error::{AnalysisError, AnalysisResult};

/// Principal, annual rate (percent) and tenure (years) of a single loan
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LoanTerms {
    pub principal: f64,
    pub annual_rate_percent: f64,
    pub years: f64,
}

impl LoanTerms {
    pub fn new(principal: f64, annual_rate_percent: f64, years: f64) -> Self {
        Self {
            principal,
            annual_rate_percent,
            years,
        }
    }

    /// Reject non-positive principal or tenure and negative rates.
    /// NaN in any field is rejected as well.
    pub fn validate(&self) -> AnalysisResult<()> {
        let viable = self.principal > 0.0
            && self.years > 0.0
            && self.annual_rate_percent >= 0.0
            && self.principal.is_finite()
            && self.years.is_finite()
            && self.annual_rate_percent.is_finite();

        if viable {
            Ok(())
        } else {
            Err(AnalysisError::InvalidLoanInput {
                principal: self.principal,
                annual_rate_percent: self.annual_rate_percent,
                years: self.years,
            })
        }
    }

    pub fn monthly_rate(&self) -> f64 {
        self.annual_rate_percent / 100.0 / 12.0
    }

    pub fn total_months(&self) -> f64 {
        self.years * 12.0
    }
}

/// Monthly installment and the split of the first payment
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Amortization {
    pub monthly_payment: f64,
    pub first_month_principal: f64,
    pub first_month_interest: f64,
}

impl Amortization {
    /// The "no loan" result
    pub fn zero() -> Self {
        Self::default()
    }

    pub fn is_zero(&self) -> bool {
        self.monthly_payment == 0.0
    }
}

/// Amortize a loan. Unviable terms yield the all-zero result, never an error.
pub fn amortize(principal: f64, annual_rate_percent: f64, years: f64) -> Amortization {
    amortize_terms(&LoanTerms::new(principal, annual_rate_percent, years))
}

pub fn amortize_terms(terms: &LoanTerms) -> Amortization {
    if terms.validate().is_err() {
        return Amortization::zero();
    }

    let principal = terms.principal;
    let r = terms.monthly_rate();
    let n = terms.total_months();

    if r == 0.0 {
        let monthly_payment = principal / n;
        return Amortization {
            monthly_payment,
            first_month_principal: monthly_payment,
            first_month_interest: 0.0,
        };
    }

    let growth = (1.0 + r).powf(n);
    let monthly_payment = principal * r * growth / (growth - 1.0);
    let first_month_interest = principal * r;

    Amortization {
        monthly_payment,
        first_month_principal: monthly_payment - first_month_interest,
        first_month_interest,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::{assert_abs_diff_eq, assert_relative_eq};

    #[test]
    fn test_zero_rate_is_straight_line() {
        let result = amortize(120_000.0, 0.0, 10.0);
        assert_abs_diff_eq!(result.monthly_payment, 1000.0, epsilon = 1e-9);
        assert_abs_diff_eq!(result.first_month_principal, 1000.0, epsilon = 1e-9);
        assert_eq!(result.first_month_interest, 0.0);
    }

    #[test]
    fn test_known_annuity_values() {
        // P·r·(1+r)^n / ((1+r)^n − 1) with r = 0.00375, n = 420
        let result = amortize(500_000.0, 4.5, 35.0);
        assert_abs_diff_eq!(result.monthly_payment, 2366.28, epsilon = 0.01);
        assert_abs_diff_eq!(result.first_month_interest, 1875.0, epsilon = 1e-9);

        let result = amortize(480_000.0, 4.5, 35.0);
        assert_abs_diff_eq!(result.monthly_payment, 2271.63, epsilon = 0.01);
    }

    #[test]
    fn test_first_month_split_sums_to_payment() {
        let cases = [
            (100_000.0, 3.0, 30.0),
            (750_000.0, 4.0, 35.0),
            (1.0, 0.01, 1.0),
            (2_500_000.0, 12.0, 5.0),
            (350_000.0, 0.0, 25.0),
            (80_000.0, 6.25, 7.5),
        ];
        for (principal, rate, years) in cases {
            let result = amortize(principal, rate, years);
            assert!(result.monthly_payment > 0.0);
            assert_relative_eq!(
                result.first_month_principal + result.first_month_interest,
                result.monthly_payment,
                max_relative = 1e-12
            );
        }
    }

    #[test]
    fn test_unviable_terms_fail_soft() {
        assert!(amortize(0.0, 4.5, 35.0).is_zero());
        assert!(amortize(-10_000.0, 4.5, 35.0).is_zero());
        assert!(amortize(100_000.0, -0.5, 35.0).is_zero());
        assert!(amortize(100_000.0, 4.5, 0.0).is_zero());
        assert!(amortize(f64::NAN, 4.5, 35.0).is_zero());
        assert_eq!(amortize(100_000.0, 4.5, -1.0), Amortization::zero());
    }

    #[test]
    fn test_validate_reports_invalid_loan_input() {
        let err = LoanTerms::new(0.0, 4.5, 35.0).validate().unwrap_err();
        assert!(matches!(err, AnalysisError::InvalidLoanInput { .. }));
        assert!(LoanTerms::new(1.0, 0.0, 1.0).validate().is_ok());
    }

    #[test]
    fn test_higher_rate_costs_more() {
        let low = amortize(400_000.0, 3.5, 30.0);
        let high = amortize(400_000.0, 5.5, 30.0);
        assert!(high.monthly_payment > low.monthly_payment);
        assert!(high.first_month_interest > low.first_month_interest);
    }
}
