use super::affordability::{AffordabilityAssessment, MAX_QUALIFYING_DTI, TARGET_DTI};
use super::catalog::LoanProgram;
use super::costs::{MonthlyCosts, PMI_LTV_THRESHOLD};
use super::domain::{BorrowerProfile, LoanRequest, Occupancy, PropertyProfile};
use super::eligibility::{EligibilityResult, CREDIT_SOFT_BAND};

const MAX_ALTERNATIVES: usize = 2;
const STRONG_FIT_SCORE: u8 = 80;
const FAIR_FIT_SCORE: u8 = 60;

/// Best-scoring program plus the runners-up, in rank order.
#[derive(Debug, Clone, PartialEq)]
pub struct Selection {
    pub recommended: EligibilityResult,
    pub alternatives: Vec<EligibilityResult>,
}

/// Human-readable guidance attached to an analysis.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Guidance {
    pub recommendations: Vec<String>,
    pub warnings: Vec<String>,
}

/// Figures already computed by the pipeline; messages quote these verbatim.
pub struct GuidanceInputs<'a> {
    pub borrower: &'a BorrowerProfile,
    pub property: &'a PropertyProfile,
    pub loan: &'a LoanRequest,
    pub program: &'a LoanProgram,
    pub eligibility: &'a EligibilityResult,
    pub costs: &'a MonthlyCosts,
    pub affordability: &'a AffordabilityAssessment,
    pub all_disqualified: bool,
}

#[derive(Debug, Default, Clone, Copy)]
pub struct RecommendationComposer;

impl RecommendationComposer {
    /// Expects results already ranked best first. Returns `None` for an empty ranking.
    pub fn select(&self, ranked: Vec<EligibilityResult>) -> Option<Selection> {
        let mut ranked = ranked.into_iter();
        let recommended = ranked.next()?;
        let alternatives = ranked.take(MAX_ALTERNATIVES).collect();
        Some(Selection {
            recommended,
            alternatives,
        })
    }

    pub fn guidance(&self, inputs: &GuidanceInputs<'_>) -> Guidance {
        let mut guidance = Guidance::default();

        program_fit(inputs, &mut guidance);
        debt_to_income(inputs, &mut guidance);
        mortgage_insurance(inputs, &mut guidance);

        if inputs.all_disqualified {
            guidance.warnings.push(
                "No loan program fully fits this profile; treat these figures as planning estimates only"
                    .to_string(),
            );
        }

        if inputs.program.primary_residence_only && inputs.property.occupancy != Occupancy::Primary
        {
            guidance.warnings.push(format!(
                "The {} is limited to primary residences; a {} property will need a different program",
                inputs.program.name,
                inputs.property.occupancy.label()
            ));
        }

        guidance
    }
}

fn program_fit(inputs: &GuidanceInputs<'_>, guidance: &mut Guidance) {
    let program = inputs.program;
    let score = inputs.eligibility.score;
    let loan = inputs.loan;

    if score >= STRONG_FIT_SCORE {
        guidance.recommendations.push(format!(
            "You are a strong candidate for the {} ({}/100 eligibility)",
            program.name, score
        ));
        if loan.down_payment_below(program.min_down_payment_pct) {
            guidance.recommendations.push(format!(
                "Raise your down payment to {:.1}% ({}) to meet the {} minimum",
                program.min_down_payment_pct,
                format_currency(loan.home_price * program.min_down_payment_pct / 100.0),
                program.name
            ));
        }
    } else if score >= FAIR_FIT_SCORE {
        guidance.recommendations.push(format!(
            "The {} is a workable fit ({}/100 eligibility) but some criteria need attention",
            program.name, score
        ));
        let credit_target = program.min_credit_score.saturating_add(CREDIT_SOFT_BAND);
        if inputs.borrower.credit_score < credit_target {
            guidance.recommendations.push(format!(
                "Improving your credit score from {} to {} or higher would strengthen your eligibility",
                inputs.borrower.credit_score, credit_target
            ));
        } else {
            let notes: Vec<&str> = inputs
                .eligibility
                .penalties
                .iter()
                .map(|penalty| penalty.notes.as_str())
                .collect();
            guidance
                .recommendations
                .push(format!("Address the remaining gaps: {}", notes.join("; ")));
        }
    } else {
        guidance.warnings.push(format!(
            "The {} may not be suitable for this purchase ({}/100 eligibility)",
            program.name, score
        ));
        let target_pct = if loan.down_payment_below(program.min_down_payment_pct) {
            Some(program.min_down_payment_pct)
        } else if loan.down_payment_below(100.0 - PMI_LTV_THRESHOLD) {
            Some(100.0 - PMI_LTV_THRESHOLD)
        } else {
            None
        };
        match target_pct {
            Some(pct) => guidance.warnings.push(format!(
                "Consider a down payment of {} ({:.1}%) instead of {}",
                format_currency(loan.home_price * pct / 100.0),
                pct,
                format_currency(loan.effective_down_payment())
            )),
            None => guidance.warnings.push(
                "Your down payment is already strong; review credit and loan-limit requirements instead"
                    .to_string(),
            ),
        }
    }
}

fn debt_to_income(inputs: &GuidanceInputs<'_>, guidance: &mut Guidance) {
    let affordability = inputs.affordability;
    let dti = affordability.debt_to_income;
    let income = inputs.borrower.monthly_income;

    if dti > MAX_QUALIFYING_DTI {
        let ceiling = MAX_QUALIFYING_DTI / 100.0;
        let debt_reduction = affordability.monthly_obligations - income * ceiling;
        let income_increase = affordability.monthly_obligations / ceiling - income;
        guidance.warnings.push(format!(
            "Your debt-to-income ratio of {:.1}% exceeds {:.0}%; reduce monthly debts by {} or increase monthly income by {} to qualify",
            dti,
            MAX_QUALIFYING_DTI,
            format_currency(debt_reduction),
            format_currency(income_increase)
        ));
    } else if dti > TARGET_DTI {
        guidance.recommendations.push(format!(
            "Your debt-to-income ratio of {:.1}% is acceptable, but lenders prefer {:.0}% or lower",
            dti, TARGET_DTI
        ));
    }
}

fn mortgage_insurance(inputs: &GuidanceInputs<'_>, guidance: &mut Guidance) {
    let pmi = inputs.costs.mortgage_insurance;
    if pmi > 0.0 {
        let equity_pct = 100.0 - PMI_LTV_THRESHOLD;
        guidance.recommendations.push(format!(
            "Mortgage insurance adds {}/month; a {:.0}% down payment ({}) removes it",
            format_currency(pmi),
            equity_pct,
            format_currency(inputs.loan.home_price * equity_pct / 100.0)
        ));
    }
}

/// `$1,234` style rounding to whole dollars.
pub fn format_currency(amount: f64) -> String {
    let rounded = amount.round();
    let sign = if rounded < 0.0 { "-" } else { "" };
    let digits = format!("{:.0}", rounded.abs());

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, digit) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    format!("{sign}${grouped}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn currency_is_grouped_by_thousands() {
        assert_eq!(format_currency(0.0), "$0");
        assert_eq!(format_currency(999.4), "$999");
        assert_eq!(format_currency(1_798.65), "$1,799");
        assert_eq!(format_currency(1_234_567.0), "$1,234,567");
        assert_eq!(format_currency(-2_500.0), "-$2,500");
    }

    #[test]
    fn select_takes_at_most_two_alternatives() {
        let result = |key: &str, score: u8| EligibilityResult {
            program_key: key.to_string(),
            program_name: key.to_string(),
            score,
            adjusted_rate: 6.0,
            penalties: Vec::new(),
        };

        let selection = RecommendationComposer
            .select(vec![
                result("a", 100),
                result("b", 80),
                result("c", 50),
                result("d", 0),
            ])
            .expect("non-empty ranking");
        assert_eq!(selection.recommended.program_key, "a");
        let alternatives: Vec<&str> = selection
            .alternatives
            .iter()
            .map(|alternative| alternative.program_key.as_str())
            .collect();
        assert_eq!(alternatives, vec!["b", "c"]);

        assert!(RecommendationComposer.select(Vec::new()).is_none());
    }
}
