use std::sync::Arc;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::affordability::{AffordabilityAssessment, AffordabilityTier};
use super::amortization::{amortize, AmortizationYear};
use super::catalog::{LoanProgram, ProgramCatalog, ProgramSummary};
use super::costs::MonthlyCosts;
use super::domain::{AnalysisError, AnalysisRequest, LoanRequest};
use super::eligibility::{EligibilityResult, EligibilityScorer};
use super::recommendation::{GuidanceInputs, RecommendationComposer};

/// A ranked program with the payment it would carry at its adjusted rate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgramQuote {
    pub program: ProgramSummary,
    pub eligibility: EligibilityResult,
    pub monthly_principal_and_interest: f64,
}

/// Complete output of one analysis run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanAnalysis {
    pub recommended: ProgramQuote,
    pub alternatives: Vec<ProgramQuote>,
    pub loan_amount: f64,
    pub down_payment_percent: f64,
    pub loan_to_value: f64,
    pub monthly_principal_and_interest: f64,
    pub costs: MonthlyCosts,
    pub total_monthly_payment: f64,
    pub total_interest: f64,
    pub debt_to_income: f64,
    pub approval_probability: f64,
    pub affordability: AffordabilityTier,
    pub max_affordable_payment: f64,
    pub recommendations: Vec<String>,
    pub warnings: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payoff_date: Option<NaiveDate>,
    pub schedule: Vec<AmortizationYear>,
}

/// Runs the scoring, payment, affordability, and guidance pipeline against one catalog.
#[derive(Debug, Clone)]
pub struct LoanAdvisor {
    catalog: Arc<ProgramCatalog>,
    scorer: EligibilityScorer,
    composer: RecommendationComposer,
}

impl LoanAdvisor {
    pub fn new(catalog: Arc<ProgramCatalog>) -> Self {
        Self {
            catalog,
            scorer: EligibilityScorer,
            composer: RecommendationComposer,
        }
    }

    pub fn catalog(&self) -> &ProgramCatalog {
        &self.catalog
    }

    pub fn analyze(&self, request: &AnalysisRequest) -> Result<LoanAnalysis, AnalysisError> {
        request.validate()?;
        let AnalysisRequest {
            borrower,
            property,
            loan,
        } = request;

        let ranked = self.scorer.rank(&self.catalog, borrower, property, loan);
        let all_disqualified = ranked.iter().all(EligibilityResult::is_disqualified);
        let selection = self
            .composer
            .select(ranked)
            .ok_or(AnalysisError::EmptyCatalog)?;
        let program = self.program_for(&selection.recommended)?;

        let loan_amount = loan.loan_amount();
        let amortization = amortize(
            loan_amount,
            selection.recommended.adjusted_rate,
            loan.term_years,
        )?;
        let costs = MonthlyCosts::aggregate(amortization.monthly_payment, loan, program);
        let affordability = AffordabilityAssessment::assess(
            costs.total,
            borrower.monthly_debts,
            borrower.monthly_income,
            selection.recommended.score,
            borrower.years_employed,
        );

        let guidance = self.composer.guidance(&GuidanceInputs {
            borrower,
            property,
            loan,
            program,
            eligibility: &selection.recommended,
            costs: &costs,
            affordability: &affordability,
            all_disqualified,
        });

        debug!(
            program = %selection.recommended.program_key,
            score = selection.recommended.score,
            dti = affordability.debt_to_income,
            tier = affordability.tier.label(),
            "loan analysis complete"
        );

        let alternatives = selection
            .alternatives
            .into_iter()
            .filter_map(|result| {
                let key = result.program_key.clone();
                match self.quote(result, loan) {
                    Ok(quote) => Some(quote),
                    Err(error) => {
                        warn!(program = %key, error = %error, "skipping unquotable alternative");
                        None
                    }
                }
            })
            .collect();

        Ok(LoanAnalysis {
            recommended: ProgramQuote {
                program: ProgramSummary::from(program),
                eligibility: selection.recommended,
                monthly_principal_and_interest: amortization.monthly_payment,
            },
            alternatives,
            loan_amount,
            down_payment_percent: loan.down_payment_percent(),
            loan_to_value: loan.loan_to_value(),
            monthly_principal_and_interest: amortization.monthly_payment,
            total_monthly_payment: costs.total,
            costs,
            total_interest: amortization.total_interest,
            debt_to_income: affordability.debt_to_income,
            approval_probability: affordability.approval_probability,
            affordability: affordability.tier,
            max_affordable_payment: affordability.max_affordable_payment,
            recommendations: guidance.recommendations,
            warnings: guidance.warnings,
            payoff_date: loan
                .first_payment_on
                .and_then(|first| amortization.payoff_date(first)),
            schedule: amortization.yearly_schedule(),
        })
    }

    fn program_for(&self, result: &EligibilityResult) -> Result<&LoanProgram, AnalysisError> {
        self.catalog
            .get(&result.program_key)
            .ok_or(AnalysisError::EmptyCatalog)
    }

    fn quote(
        &self,
        result: EligibilityResult,
        loan: &LoanRequest,
    ) -> Result<ProgramQuote, AnalysisError> {
        let program = self.program_for(&result)?;
        let amortization = amortize(loan.loan_amount(), result.adjusted_rate, loan.term_years)?;
        Ok(ProgramQuote {
            program: ProgramSummary::from(program),
            eligibility: result,
            monthly_principal_and_interest: amortization.monthly_payment,
        })
    }
}
