use super::super::catalog::LoanProgram;
use super::super::domain::{BorrowerProfile, LoanRequest, PropertyProfile, PropertyType};
use super::{EligibilityRule, Penalty};

/// Tenure below which programs without short-tenure tolerance apply a penalty.
pub(crate) const MIN_EMPLOYMENT_YEARS: f64 = 2.0;
/// Width of the soft band above a program's credit floor.
pub(crate) const CREDIT_SOFT_BAND: u16 = 50;

pub(crate) struct ScoringContext<'a> {
    pub borrower: &'a BorrowerProfile,
    pub property: &'a PropertyProfile,
    pub loan: &'a LoanRequest,
    pub program: &'a LoanProgram,
}

type Check = fn(&ScoringContext<'_>) -> Option<(u8, String)>;

/// Applied in order; each check reports the points to subtract and a note.
const RULES: &[(EligibilityRule, Check)] = &[
    (EligibilityRule::DownPayment, down_payment),
    (EligibilityRule::CreditScore, credit_score),
    (EligibilityRule::LoanLimit, loan_limit),
    (EligibilityRule::PropertyType, property_type),
    (EligibilityRule::EmploymentTenure, employment_tenure),
    (EligibilityRule::EligibilityMarker, eligibility_marker),
];

pub(crate) fn collect_penalties(context: &ScoringContext<'_>) -> Vec<Penalty> {
    RULES
        .iter()
        .filter_map(|(rule, check)| {
            check(context).map(|(points, notes)| Penalty {
                rule: *rule,
                points,
                notes,
            })
        })
        .collect()
}

fn down_payment(context: &ScoringContext<'_>) -> Option<(u8, String)> {
    let pct = context.loan.down_payment_percent();
    let minimum = context.program.min_down_payment_pct;
    context.loan.down_payment_below(minimum).then(|| {
        (
            50,
            format!("down payment {pct:.1}% below program minimum {minimum:.1}%"),
        )
    })
}

fn credit_score(context: &ScoringContext<'_>) -> Option<(u8, String)> {
    let score = context.borrower.credit_score;
    let minimum = context.program.min_credit_score;
    if score < minimum {
        Some((40, format!("credit score {score} below minimum {minimum}")))
    } else if score < minimum.saturating_add(CREDIT_SOFT_BAND) {
        Some((
            20,
            format!(
                "credit score {score} within {CREDIT_SOFT_BAND} points of minimum {minimum}"
            ),
        ))
    } else {
        None
    }
}

fn loan_limit(context: &ScoringContext<'_>) -> Option<(u8, String)> {
    let amount = context.loan.loan_amount();
    let limit = context.program.max_loan_amount;
    (amount > limit).then(|| {
        (
            50,
            format!("loan amount ${amount:.0} exceeds program limit ${limit:.0}"),
        )
    })
}

fn property_type(context: &ScoringContext<'_>) -> Option<(u8, String)> {
    (context.property.property_type == PropertyType::Manufactured
        && !context.program.manufactured_friendly)
        .then(|| (20, "manufactured homes face limited financing".to_string()))
}

fn employment_tenure(context: &ScoringContext<'_>) -> Option<(u8, String)> {
    let years = context.borrower.years_employed;
    (years < MIN_EMPLOYMENT_YEARS && !context.program.tolerates_short_tenure).then(|| {
        (
            30,
            format!("{years:.1} years in current employment, {MIN_EMPLOYMENT_YEARS:.0} expected"),
        )
    })
}

fn eligibility_marker(context: &ScoringContext<'_>) -> Option<(u8, String)> {
    let marker = context.program.required_marker?;
    (!context.property.satisfies(marker)).then(|| {
        (
            80,
            format!("requires {} eligibility", marker.label().replace('_', " ")),
        )
    })
}
