use super::catalog::LoanProgram;
use super::domain::LoanRequest;
use serde::{Deserialize, Serialize};

/// Loan-to-value percentage above which insured programs charge mortgage insurance.
pub const PMI_LTV_THRESHOLD: f64 = 80.0;
const LTV_TOLERANCE: f64 = 1e-9;

/// Monthly housing obligation broken down by component.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MonthlyCosts {
    pub principal_and_interest: f64,
    pub property_tax: f64,
    pub home_insurance: f64,
    pub mortgage_insurance: f64,
    pub hoa: f64,
    pub total: f64,
}

/// Strictly above the threshold; a loan at exactly 80% LTV carries no PMI.
pub fn charges_mortgage_insurance(loan_to_value: f64, program: &LoanProgram) -> bool {
    program.requires_mortgage_insurance && loan_to_value - PMI_LTV_THRESHOLD > LTV_TOLERANCE
}

impl MonthlyCosts {
    pub fn aggregate(
        principal_and_interest: f64,
        loan: &LoanRequest,
        program: &LoanProgram,
    ) -> Self {
        let (property_tax, home_insurance, mortgage_insurance) = if loan.include_taxes_insurance {
            let property_tax = monthly_share(loan.home_price, loan.property_tax_rate);
            let home_insurance = monthly_share(loan.home_price, loan.insurance_rate);
            let mortgage_insurance = if charges_mortgage_insurance(loan.loan_to_value(), program) {
                monthly_share(loan.loan_amount(), program.mortgage_insurance_rate)
            } else {
                0.0
            };
            (property_tax, home_insurance, mortgage_insurance)
        } else {
            (0.0, 0.0, 0.0)
        };

        let hoa = loan.hoa_monthly;
        Self {
            principal_and_interest,
            property_tax,
            home_insurance,
            mortgage_insurance,
            hoa,
            total: principal_and_interest + property_tax + home_insurance + mortgage_insurance + hoa,
        }
    }
}

fn monthly_share(base: f64, annual_rate_pct: f64) -> f64 {
    base * annual_rate_pct / 100.0 / 12.0
}
