//! Home loan eligibility scoring, payment, and affordability analysis.
//!
//! A request flows one way: every catalog program is scored, the best one is
//! amortized and costed, the resulting obligation is measured against income, and
//! the composer turns the computed figures into guidance.

pub mod affordability;
pub mod amortization;
pub mod catalog;
pub mod costs;
pub mod domain;
pub mod eligibility;
pub(crate) mod recommendation;
pub mod router;
pub mod service;

#[cfg(test)]
mod tests;

pub use affordability::{AffordabilityAssessment, AffordabilityTier};
pub use amortization::{amortize, Amortization, AmortizationYear};
pub use catalog::{CatalogError, LoanProgram, ProgramCatalog, ProgramSummary};
pub use costs::MonthlyCosts;
pub use domain::{
    AnalysisError, AnalysisRequest, BorrowerProfile, EligibilityMarker, EmploymentType,
    LoanRequest, Occupancy, PropertyProfile, PropertyType, MAX_TERM_YEARS,
};
pub use eligibility::{EligibilityResult, EligibilityRule, EligibilityScorer, Penalty};
pub use recommendation::format_currency;
pub use router::advisor_router;
pub use service::{LoanAdvisor, LoanAnalysis, ProgramQuote};
