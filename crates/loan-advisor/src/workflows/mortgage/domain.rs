use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Longest loan term accepted for analysis.
pub const MAX_TERM_YEARS: u32 = 50;
/// Slack when comparing a derived down payment percentage with a threshold.
const PERCENT_TOLERANCE: f64 = 1e-9;

/// How the borrower earns the income declared on the request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmploymentType {
    Salaried,
    SelfEmployed,
    Freelance,
    Retired,
}

impl EmploymentType {
    pub const fn label(self) -> &'static str {
        match self {
            EmploymentType::Salaried => "salaried",
            EmploymentType::SelfEmployed => "self_employed",
            EmploymentType::Freelance => "freelance",
            EmploymentType::Retired => "retired",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "salaried" => Some(Self::Salaried),
            "self_employed" => Some(Self::SelfEmployed),
            "freelance" => Some(Self::Freelance),
            "retired" => Some(Self::Retired),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PropertyType {
    SingleFamily,
    Condo,
    Townhouse,
    MultiFamily,
    Manufactured,
}

impl PropertyType {
    pub const fn label(self) -> &'static str {
        match self {
            PropertyType::SingleFamily => "single_family",
            PropertyType::Condo => "condo",
            PropertyType::Townhouse => "townhouse",
            PropertyType::MultiFamily => "multi_family",
            PropertyType::Manufactured => "manufactured",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "single_family" => Some(Self::SingleFamily),
            "condo" => Some(Self::Condo),
            "townhouse" => Some(Self::Townhouse),
            "multi_family" => Some(Self::MultiFamily),
            "manufactured" => Some(Self::Manufactured),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Occupancy {
    Primary,
    Secondary,
    Investment,
}

impl Occupancy {
    pub const fn label(self) -> &'static str {
        match self {
            Occupancy::Primary => "primary",
            Occupancy::Secondary => "secondary",
            Occupancy::Investment => "investment",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "primary" => Some(Self::Primary),
            "secondary" => Some(Self::Secondary),
            "investment" => Some(Self::Investment),
            _ => None,
        }
    }
}

/// Eligibility facts some programs gate on (military service, rural designation).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EligibilityMarker {
    MilitaryService,
    RuralArea,
}

impl EligibilityMarker {
    pub const fn label(self) -> &'static str {
        match self {
            EligibilityMarker::MilitaryService => "military_service",
            EligibilityMarker::RuralArea => "rural_area",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "military_service" | "military" => Some(Self::MilitaryService),
            "rural_area" | "rural" => Some(Self::RuralArea),
            _ => None,
        }
    }

    /// Lowercase fragments accepted in free-text location descriptions.
    pub const fn location_keywords(self) -> &'static [&'static str] {
        match self {
            EligibilityMarker::MilitaryService => &["military", "veteran"],
            EligibilityMarker::RuralArea => &["rural"],
        }
    }
}

/// Income and credit facts about the borrower.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BorrowerProfile {
    pub monthly_income: f64,
    pub monthly_debts: f64,
    pub credit_score: u16,
    pub employment: EmploymentType,
    pub years_employed: f64,
}

/// The home being financed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertyProfile {
    pub property_type: PropertyType,
    pub occupancy: Occupancy,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub eligibility_markers: Vec<EligibilityMarker>,
}

impl PropertyProfile {
    /// Explicit markers are authoritative; the location text is a fallback hint.
    pub fn satisfies(&self, marker: EligibilityMarker) -> bool {
        if self.eligibility_markers.contains(&marker) {
            return true;
        }

        let location = self.location.to_lowercase();
        marker
            .location_keywords()
            .iter()
            .any(|keyword| location.contains(keyword))
    }
}

/// Purchase terms. The down payment is stored in dollars; the percentage is derived.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanRequest {
    pub home_price: f64,
    pub down_payment: f64,
    pub interest_rate: f64,
    pub term_years: u32,
    #[serde(default = "default_include_taxes_insurance")]
    pub include_taxes_insurance: bool,
    #[serde(default)]
    pub property_tax_rate: f64,
    #[serde(default)]
    pub insurance_rate: f64,
    #[serde(default)]
    pub hoa_monthly: f64,
    #[serde(default)]
    pub first_payment_on: Option<NaiveDate>,
}

fn default_include_taxes_insurance() -> bool {
    true
}

impl LoanRequest {
    pub fn new(home_price: f64, down_payment: f64, interest_rate: f64, term_years: u32) -> Self {
        Self {
            home_price,
            down_payment,
            interest_rate,
            term_years,
            include_taxes_insurance: true,
            property_tax_rate: 0.0,
            insurance_rate: 0.0,
            hoa_monthly: 0.0,
            first_payment_on: None,
        }
    }

    pub fn with_down_payment_percent(
        home_price: f64,
        down_payment_pct: f64,
        interest_rate: f64,
        term_years: u32,
    ) -> Self {
        let mut request = Self::new(home_price, 0.0, interest_rate, term_years);
        request.set_down_payment_percent(down_payment_pct);
        request
    }

    pub fn set_down_payment_percent(&mut self, down_payment_pct: f64) {
        self.down_payment = self.home_price * down_payment_pct / 100.0;
    }

    /// Down payment bounded to `[0, home_price]`.
    pub fn effective_down_payment(&self) -> f64 {
        self.down_payment.min(self.home_price).max(0.0)
    }

    pub fn down_payment_percent(&self) -> f64 {
        if self.home_price <= 0.0 {
            return 0.0;
        }
        self.effective_down_payment() * 100.0 / self.home_price
    }

    /// True when the down payment is below `minimum_pct` beyond rounding noise.
    pub fn down_payment_below(&self, minimum_pct: f64) -> bool {
        minimum_pct - self.down_payment_percent() > PERCENT_TOLERANCE
    }

    pub fn loan_amount(&self) -> f64 {
        (self.home_price - self.effective_down_payment()).max(0.0)
    }

    pub fn loan_to_value(&self) -> f64 {
        if self.home_price <= 0.0 {
            return 0.0;
        }
        self.loan_amount() * 100.0 / self.home_price
    }
}

/// Everything needed for one analysis run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisRequest {
    pub borrower: BorrowerProfile,
    pub property: PropertyProfile,
    pub loan: LoanRequest,
}

impl AnalysisRequest {
    pub fn validate(&self) -> Result<(), AnalysisError> {
        let borrower = &self.borrower;
        let loan = &self.loan;

        require_finite("monthly_income", borrower.monthly_income)?;
        require_finite("monthly_debts", borrower.monthly_debts)?;
        require_finite("years_employed", borrower.years_employed)?;
        require_finite("home_price", loan.home_price)?;
        require_finite("down_payment", loan.down_payment)?;
        require_finite("interest_rate", loan.interest_rate)?;
        require_finite("property_tax_rate", loan.property_tax_rate)?;
        require_finite("insurance_rate", loan.insurance_rate)?;
        require_finite("hoa_monthly", loan.hoa_monthly)?;

        if borrower.monthly_income <= 0.0 {
            return Err(AnalysisError::invalid(
                "monthly_income",
                "must be greater than zero",
            ));
        }
        if loan.home_price <= 0.0 {
            return Err(AnalysisError::invalid("home_price", "must be greater than zero"));
        }
        if loan.term_years == 0 {
            return Err(AnalysisError::invalid("term_years", "must be at least one year"));
        }
        if loan.term_years > MAX_TERM_YEARS {
            return Err(AnalysisError::invalid(
                "term_years",
                "must not exceed 50 years",
            ));
        }

        for (field, value) in [
            ("monthly_debts", borrower.monthly_debts),
            ("years_employed", borrower.years_employed),
            ("down_payment", loan.down_payment),
            ("interest_rate", loan.interest_rate),
            ("property_tax_rate", loan.property_tax_rate),
            ("insurance_rate", loan.insurance_rate),
            ("hoa_monthly", loan.hoa_monthly),
        ] {
            if value < 0.0 {
                return Err(AnalysisError::invalid(field, "must not be negative"));
            }
        }

        if loan.down_payment >= loan.home_price {
            return Err(AnalysisError::invalid(
                "down_payment",
                "must be less than the home price",
            ));
        }

        Ok(())
    }
}

fn require_finite(field: &'static str, value: f64) -> Result<(), AnalysisError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(AnalysisError::invalid(field, "must be a finite number"))
    }
}

/// Errors raised synchronously by the analysis pipeline.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum AnalysisError {
    #[error("invalid {field}: {reason}")]
    InvalidInput {
        field: &'static str,
        reason: &'static str,
    },
    #[error("program catalog is empty")]
    EmptyCatalog,
}

impl AnalysisError {
    pub(crate) fn invalid(field: &'static str, reason: &'static str) -> Self {
        Self::InvalidInput { field, reason }
    }

    /// Request field to highlight, when the error concerns one.
    pub fn field(&self) -> Option<&'static str> {
        match self {
            AnalysisError::InvalidInput { field, .. } => Some(field),
            AnalysisError::EmptyCatalog => None,
        }
    }
}
