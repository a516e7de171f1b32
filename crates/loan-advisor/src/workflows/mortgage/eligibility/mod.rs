mod rules;

pub(crate) use rules::CREDIT_SOFT_BAND;

use super::catalog::{LoanProgram, ProgramCatalog};
use super::domain::{BorrowerProfile, LoanRequest, PropertyProfile};
use rules::ScoringContext;
use serde::{Deserialize, Serialize};

const PERFECT_SCORE: u8 = 100;

/// Criteria a program can penalize.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EligibilityRule {
    DownPayment,
    CreditScore,
    LoanLimit,
    PropertyType,
    EmploymentTenure,
    EligibilityMarker,
}

/// One deduction from the perfect score, kept for transparent audits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Penalty {
    pub rule: EligibilityRule,
    pub points: u8,
    pub notes: String,
}

/// How well a request fits one program.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EligibilityResult {
    pub program_key: String,
    pub program_name: String,
    pub score: u8,
    pub adjusted_rate: f64,
    pub penalties: Vec<Penalty>,
}

impl EligibilityResult {
    pub fn is_disqualified(&self) -> bool {
        self.score == 0
    }
}

/// Stateless scorer; each program is judged on its own criteria only.
#[derive(Debug, Default, Clone, Copy)]
pub struct EligibilityScorer;

impl EligibilityScorer {
    pub fn score(
        &self,
        borrower: &BorrowerProfile,
        property: &PropertyProfile,
        loan: &LoanRequest,
        program: &LoanProgram,
    ) -> EligibilityResult {
        let context = ScoringContext {
            borrower,
            property,
            loan,
            program,
        };
        let penalties = rules::collect_penalties(&context);
        let score = penalties
            .iter()
            .fold(PERFECT_SCORE, |score, penalty| score.saturating_sub(penalty.points));

        EligibilityResult {
            program_key: program.key.clone(),
            program_name: program.name.clone(),
            score,
            adjusted_rate: loan.interest_rate + program.rate_adjustment,
            penalties,
        }
    }

    /// Scores every program and orders them best first; ties keep catalog order.
    pub fn rank(
        &self,
        catalog: &ProgramCatalog,
        borrower: &BorrowerProfile,
        property: &PropertyProfile,
        loan: &LoanRequest,
    ) -> Vec<EligibilityResult> {
        let mut results: Vec<EligibilityResult> = catalog
            .programs()
            .iter()
            .map(|program| self.score(borrower, property, loan, program))
            .collect();
        results.sort_by(|a, b| b.score.cmp(&a.score));
        results
    }
}
