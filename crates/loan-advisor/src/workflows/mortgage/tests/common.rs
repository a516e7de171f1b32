use std::sync::Arc;

use axum::response::Response;
use serde_json::Value;

use crate::workflows::mortgage::catalog::ProgramCatalog;
use crate::workflows::mortgage::domain::{
    AnalysisRequest, BorrowerProfile, EmploymentType, LoanRequest, Occupancy, PropertyProfile,
    PropertyType,
};
use crate::workflows::mortgage::service::LoanAdvisor;

pub(super) fn borrower() -> BorrowerProfile {
    BorrowerProfile {
        monthly_income: 8_000.0,
        monthly_debts: 500.0,
        credit_score: 720,
        employment: EmploymentType::Salaried,
        years_employed: 5.0,
    }
}

pub(super) fn property() -> PropertyProfile {
    PropertyProfile {
        property_type: PropertyType::SingleFamily,
        occupancy: Occupancy::Primary,
        location: "West Des Moines, IA".to_string(),
        eligibility_markers: Vec::new(),
    }
}

pub(super) fn loan(down_payment: f64) -> LoanRequest {
    let mut loan = LoanRequest::new(400_000.0, down_payment, 6.5, 30);
    loan.property_tax_rate = 1.2;
    loan.insurance_rate = 0.4;
    loan.hoa_monthly = 150.0;
    loan
}

/// 400k purchase, 20% down, 6.5% for 30 years, 8k/month income.
pub(super) fn reference_request() -> AnalysisRequest {
    AnalysisRequest {
        borrower: borrower(),
        property: property(),
        loan: loan(80_000.0),
    }
}

pub(super) fn advisor() -> LoanAdvisor {
    LoanAdvisor::new(Arc::new(ProgramCatalog::standard()))
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body collects");
    serde_json::from_slice(&bytes).expect("body is json")
}
