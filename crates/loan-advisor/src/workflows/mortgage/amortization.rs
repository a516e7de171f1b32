use super::domain::{AnalysisError, MAX_TERM_YEARS};
use chrono::{Months, NaiveDate};
use serde::{Deserialize, Serialize};

const MONTHS_PER_YEAR: u32 = 12;

/// Level-payment terms for a fixed-rate loan.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Amortization {
    pub principal: f64,
    pub annual_rate: f64,
    pub payments: u32,
    pub monthly_payment: f64,
    pub total_interest: f64,
}

/// Principal and interest paid during one loan year.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AmortizationYear {
    pub year: u32,
    pub principal_paid: f64,
    pub interest_paid: f64,
    pub ending_balance: f64,
}

/// Annuity payment for `principal` at `annual_rate` percent over `term_years`.
///
/// Non-positive rates fall back to straight-line repayment.
pub fn amortize(
    principal: f64,
    annual_rate: f64,
    term_years: u32,
) -> Result<Amortization, AnalysisError> {
    if !principal.is_finite() || principal <= 0.0 {
        return Err(AnalysisError::invalid("principal", "must be greater than zero"));
    }
    if !annual_rate.is_finite() {
        return Err(AnalysisError::invalid("interest_rate", "must be a finite number"));
    }
    if term_years == 0 {
        return Err(AnalysisError::invalid("term_years", "must be at least one year"));
    }
    if term_years > MAX_TERM_YEARS {
        return Err(AnalysisError::invalid("term_years", "must not exceed 50 years"));
    }
    let payments = term_years * MONTHS_PER_YEAR;

    let monthly_rate = annual_rate / 100.0 / MONTHS_PER_YEAR as f64;
    let monthly_payment = if monthly_rate > 0.0 {
        let growth = (1.0 + monthly_rate).powf(payments as f64);
        principal * monthly_rate * growth / (growth - 1.0)
    } else {
        principal / payments as f64
    };

    if !monthly_payment.is_finite() {
        return Err(AnalysisError::invalid(
            "interest_rate",
            "produces an unbounded payment",
        ));
    }

    Ok(Amortization {
        principal,
        annual_rate,
        payments,
        monthly_payment,
        total_interest: monthly_payment * payments as f64 - principal,
    })
}

impl Amortization {
    pub fn total_paid(&self) -> f64 {
        self.monthly_payment * self.payments as f64
    }

    fn monthly_rate(&self) -> f64 {
        (self.annual_rate / 100.0 / MONTHS_PER_YEAR as f64).max(0.0)
    }

    /// Walks the payment schedule and rolls it up by loan year.
    pub fn yearly_schedule(&self) -> Vec<AmortizationYear> {
        let monthly_rate = self.monthly_rate();
        let mut balance = self.principal;
        let mut years = Vec::with_capacity((self.payments / MONTHS_PER_YEAR) as usize + 1);
        let mut current = AmortizationYear {
            year: 1,
            principal_paid: 0.0,
            interest_paid: 0.0,
            ending_balance: balance,
        };

        for payment_number in 1..=self.payments {
            let interest = balance * monthly_rate;
            // The final payment absorbs floating-point drift.
            let principal = if payment_number == self.payments {
                balance
            } else {
                (self.monthly_payment - interest).min(balance)
            };
            balance -= principal;

            current.principal_paid += principal;
            current.interest_paid += interest;
            current.ending_balance = balance.max(0.0);

            if payment_number % MONTHS_PER_YEAR == 0 || payment_number == self.payments {
                years.push(current);
                current = AmortizationYear {
                    year: current.year + 1,
                    principal_paid: 0.0,
                    interest_paid: 0.0,
                    ending_balance: current.ending_balance,
                };
            }
        }

        years
    }

    /// Date of the last scheduled payment when the first falls on `first_payment`.
    pub fn payoff_date(&self, first_payment: NaiveDate) -> Option<NaiveDate> {
        first_payment.checked_add_months(Months::new(self.payments.saturating_sub(1)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reference_thirty_year_loan() {
        let amortization = amortize(300_000.0, 6.0, 30).expect("valid loan");
        assert_eq!(amortization.payments, 360);
        assert!((amortization.monthly_payment - 1_798.65).abs() < 0.5);
        assert!((amortization.total_interest - 347_514.0).abs() < 50.0);
        assert!((amortization.total_paid() - 647_514.0).abs() < 50.0);
    }

    #[test]
    fn zero_rate_is_straight_line() {
        let amortization = amortize(120_000.0, 0.0, 10).expect("valid loan");
        assert!((amortization.monthly_payment - 1_000.0).abs() < 1e-9);
        assert!((amortization.monthly_payment * 120.0 - 120_000.0).abs() < 1e-6);
        assert!(amortization.total_interest.abs() < 1e-6);
    }

    #[test]
    fn negative_rate_does_not_produce_nan() {
        let amortization = amortize(90_000.0, -0.25, 15).expect("valid loan");
        assert!(amortization.monthly_payment.is_finite());
        assert!((amortization.monthly_payment - 500.0).abs() < 1e-9);
    }

    #[test]
    fn rejects_non_positive_principal_and_term() {
        assert_eq!(
            amortize(0.0, 6.0, 30).expect_err("zero principal").field(),
            Some("principal")
        );
        assert_eq!(
            amortize(-10.0, 6.0, 30).expect_err("negative principal").field(),
            Some("principal")
        );
        assert_eq!(
            amortize(100_000.0, 6.0, 0).expect_err("zero term").field(),
            Some("term_years")
        );
        assert_eq!(
            amortize(100_000.0, 0.0, 30_000_000)
                .expect_err("unbounded term")
                .field(),
            Some("term_years")
        );
    }

    #[test]
    fn schedule_retires_the_balance() {
        let amortization = amortize(300_000.0, 6.0, 30).expect("valid loan");
        let schedule = amortization.yearly_schedule();

        assert_eq!(schedule.len(), 30);
        assert_eq!(schedule[0].year, 1);
        assert!(schedule[0].interest_paid > schedule[0].principal_paid);
        assert!(schedule[29].ending_balance.abs() < 1e-6);

        let principal: f64 = schedule.iter().map(|year| year.principal_paid).sum();
        let interest: f64 = schedule.iter().map(|year| year.interest_paid).sum();
        assert!((principal - 300_000.0).abs() < 1e-3);
        assert!((interest - amortization.total_interest).abs() < 1.0);
    }

    #[test]
    fn payoff_date_is_last_installment() {
        let amortization = amortize(200_000.0, 5.0, 30).expect("valid loan");
        let first = NaiveDate::from_ymd_opt(2026, 1, 1).expect("valid date");
        assert_eq!(
            amortization.payoff_date(first),
            NaiveDate::from_ymd_opt(2055, 12, 1)
        );
    }
}
