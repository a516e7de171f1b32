use serde::{Deserialize, Serialize};

/// Back-end DTI considered comfortable.
pub const TARGET_DTI: f64 = 36.0;
/// Back-end DTI most lenders treat as the qualifying ceiling.
pub const MAX_QUALIFYING_DTI: f64 = 43.0;
/// Back-end DTI beyond which approval odds drop sharply.
pub const HIGH_RISK_DTI: f64 = 50.0;

const MIN_APPROVAL_PROBABILITY: f64 = 5.0;
const MAX_APPROVAL_PROBABILITY: f64 = 95.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AffordabilityTier {
    Excellent,
    Good,
    Fair,
    Poor,
}

impl AffordabilityTier {
    pub const fn label(self) -> &'static str {
        match self {
            AffordabilityTier::Excellent => "Excellent",
            AffordabilityTier::Good => "Good",
            AffordabilityTier::Fair => "Fair",
            AffordabilityTier::Poor => "Poor",
        }
    }

    /// First matching band wins.
    pub fn classify(eligibility_score: u8, debt_to_income: f64) -> Self {
        if eligibility_score >= 80 && debt_to_income <= TARGET_DTI {
            AffordabilityTier::Excellent
        } else if eligibility_score >= 60 && debt_to_income <= MAX_QUALIFYING_DTI {
            AffordabilityTier::Good
        } else if eligibility_score >= 40 && debt_to_income <= HIGH_RISK_DTI {
            AffordabilityTier::Fair
        } else {
            AffordabilityTier::Poor
        }
    }
}

/// Affordability figures derived from the housing payment and borrower income.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AffordabilityAssessment {
    /// Housing payment plus existing debts.
    pub monthly_obligations: f64,
    pub debt_to_income: f64,
    pub approval_probability: f64,
    pub tier: AffordabilityTier,
    /// Housing payment that keeps DTI at the comfortable target.
    pub max_affordable_payment: f64,
}

impl AffordabilityAssessment {
    /// `monthly_income` must be positive; the caller validates it.
    pub fn assess(
        total_monthly_payment: f64,
        monthly_debts: f64,
        monthly_income: f64,
        eligibility_score: u8,
        years_employed: f64,
    ) -> Self {
        let monthly_obligations = total_monthly_payment + monthly_debts;
        let debt_to_income = monthly_obligations / monthly_income * 100.0;

        Self {
            monthly_obligations,
            debt_to_income,
            approval_probability: approval_probability(
                eligibility_score,
                debt_to_income,
                years_employed,
            ),
            tier: AffordabilityTier::classify(eligibility_score, debt_to_income),
            max_affordable_payment: (monthly_income * TARGET_DTI / 100.0 - monthly_debts)
                .max(0.0),
        }
    }
}

pub fn approval_probability(eligibility_score: u8, debt_to_income: f64, years_employed: f64) -> f64 {
    let mut probability = 50.0 + f64::from(eligibility_score) / 100.0 * 30.0;

    if debt_to_income <= TARGET_DTI {
        probability += 20.0;
    } else if debt_to_income <= MAX_QUALIFYING_DTI {
        probability += 10.0;
    } else if debt_to_income > HIGH_RISK_DTI {
        probability -= 20.0;
    }

    if years_employed >= 3.0 {
        probability += 10.0;
    } else if years_employed < 2.0 {
        probability -= 10.0;
    }

    probability.clamp(MIN_APPROVAL_PROBABILITY, MAX_APPROVAL_PROBABILITY)
}
