mod parser;

use super::domain::EligibilityMarker;
use serde::{Deserialize, Serialize};
use std::io::Read;
use std::path::Path;

/// Lending criteria and presentation copy for one loan program.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanProgram {
    pub key: String,
    pub name: String,
    pub description: String,
    pub min_down_payment_pct: f64,
    pub max_loan_amount: f64,
    pub min_credit_score: u16,
    /// Percentage points added to the nominal rate; negative for discounted programs.
    pub rate_adjustment: f64,
    pub requires_mortgage_insurance: bool,
    /// Annual premium as a percentage of the loan amount.
    pub mortgage_insurance_rate: f64,
    pub manufactured_friendly: bool,
    pub tolerates_short_tenure: bool,
    pub required_marker: Option<EligibilityMarker>,
    pub primary_residence_only: bool,
    pub pros: Vec<String>,
    pub cons: Vec<String>,
    pub eligibility_criteria: Vec<String>,
}

/// Presentation subset of a program returned with an analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgramSummary {
    pub key: String,
    pub name: String,
    pub description: String,
    pub pros: Vec<String>,
    pub cons: Vec<String>,
    pub eligibility_criteria: Vec<String>,
}

impl From<&LoanProgram> for ProgramSummary {
    fn from(program: &LoanProgram) -> Self {
        Self {
            key: program.key.clone(),
            name: program.name.clone(),
            description: program.description.clone(),
            pros: program.pros.clone(),
            cons: program.cons.clone(),
            eligibility_criteria: program.eligibility_criteria.clone(),
        }
    }
}

#[derive(Debug)]
pub enum CatalogError {
    Io(std::io::Error),
    Csv(csv::Error),
    Empty,
    InvalidProgram { key: String, reason: String },
}

impl std::fmt::Display for CatalogError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CatalogError::Io(err) => write!(f, "failed to read program catalog: {}", err),
            CatalogError::Csv(err) => write!(f, "invalid program catalog CSV: {}", err),
            CatalogError::Empty => write!(f, "program catalog must define at least one program"),
            CatalogError::InvalidProgram { key, reason } => {
                write!(f, "program '{}' is invalid: {}", key, reason)
            }
        }
    }
}

impl std::error::Error for CatalogError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CatalogError::Io(err) => Some(err),
            CatalogError::Csv(err) => Some(err),
            CatalogError::Empty | CatalogError::InvalidProgram { .. } => None,
        }
    }
}

impl From<std::io::Error> for CatalogError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<csv::Error> for CatalogError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}

/// Immutable, ordered set of loan programs. Declaration order breaks score ties.
#[derive(Debug, Clone, PartialEq)]
pub struct ProgramCatalog {
    programs: Vec<LoanProgram>,
}

impl ProgramCatalog {
    pub fn new(programs: Vec<LoanProgram>) -> Result<Self, CatalogError> {
        if programs.is_empty() {
            return Err(CatalogError::Empty);
        }

        for (index, program) in programs.iter().enumerate() {
            validate_program(program)?;
            if programs[..index].iter().any(|other| other.key == program.key) {
                return Err(CatalogError::InvalidProgram {
                    key: program.key.clone(),
                    reason: "duplicate program key".to_string(),
                });
            }
        }

        Ok(Self { programs })
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, CatalogError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, CatalogError> {
        let programs = parser::parse_programs(reader)?;
        Self::new(programs)
    }

    pub fn programs(&self) -> &[LoanProgram] {
        &self.programs
    }

    pub fn get(&self, key: &str) -> Option<&LoanProgram> {
        self.programs.iter().find(|program| program.key == key)
    }

    pub fn len(&self) -> usize {
        self.programs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.programs.is_empty()
    }

    /// Built-in conforming, FHA, VA, and USDA programs.
    pub fn standard() -> Self {
        Self {
            programs: vec![
                LoanProgram {
                    key: "conventional".to_string(),
                    name: "Conventional Loan".to_string(),
                    description: "Conforming loan backed by private lenders".to_string(),
                    min_down_payment_pct: 3.0,
                    max_loan_amount: 726_200.0,
                    min_credit_score: 620,
                    rate_adjustment: 0.0,
                    requires_mortgage_insurance: true,
                    mortgage_insurance_rate: 0.5,
                    manufactured_friendly: false,
                    tolerates_short_tenure: false,
                    required_marker: None,
                    primary_residence_only: false,
                    pros: strings(&[
                        "Mortgage insurance cancels at 20% equity",
                        "Financing for primary, second, and investment homes",
                        "Competitive rates for strong credit",
                    ]),
                    cons: strings(&[
                        "Stricter credit requirements",
                        "Higher down payment for the best pricing",
                    ]),
                    eligibility_criteria: strings(&[
                        "Credit score 620 or higher",
                        "Down payment of at least 3%",
                        "Loan within the conforming limit",
                    ]),
                },
                LoanProgram {
                    key: "fha".to_string(),
                    name: "FHA Loan".to_string(),
                    description: "Government-insured loan for lower down payments".to_string(),
                    min_down_payment_pct: 3.5,
                    max_loan_amount: 420_680.0,
                    min_credit_score: 580,
                    rate_adjustment: 0.25,
                    requires_mortgage_insurance: true,
                    mortgage_insurance_rate: 0.85,
                    manufactured_friendly: true,
                    tolerates_short_tenure: false,
                    required_marker: None,
                    primary_residence_only: true,
                    pros: strings(&[
                        "Lower credit score minimum",
                        "3.5% down payment",
                        "Manufactured homes accepted",
                    ]),
                    cons: strings(&[
                        "Mortgage insurance for most of the loan term",
                        "Lower loan limits",
                        "Primary residence only",
                    ]),
                    eligibility_criteria: strings(&[
                        "Credit score 580 or higher",
                        "Down payment of at least 3.5%",
                        "Property will be the primary residence",
                    ]),
                },
                LoanProgram {
                    key: "va".to_string(),
                    name: "VA Loan".to_string(),
                    description: "Zero-down loan for eligible service members and veterans"
                        .to_string(),
                    min_down_payment_pct: 0.0,
                    max_loan_amount: 726_200.0,
                    min_credit_score: 620,
                    rate_adjustment: -0.25,
                    requires_mortgage_insurance: false,
                    mortgage_insurance_rate: 0.0,
                    manufactured_friendly: false,
                    tolerates_short_tenure: true,
                    required_marker: Some(EligibilityMarker::MilitaryService),
                    primary_residence_only: true,
                    pros: strings(&[
                        "No down payment",
                        "No monthly mortgage insurance",
                        "Below-market rates",
                    ]),
                    cons: strings(&[
                        "Requires qualifying military service",
                        "One-time funding fee",
                    ]),
                    eligibility_criteria: strings(&[
                        "Certificate of eligibility from military service",
                        "Property will be the primary residence",
                    ]),
                },
                LoanProgram {
                    key: "usda".to_string(),
                    name: "USDA Loan".to_string(),
                    description: "Zero-down loan for eligible rural properties".to_string(),
                    min_down_payment_pct: 0.0,
                    max_loan_amount: 338_000.0,
                    min_credit_score: 640,
                    rate_adjustment: 0.0,
                    requires_mortgage_insurance: true,
                    mortgage_insurance_rate: 0.35,
                    manufactured_friendly: false,
                    tolerates_short_tenure: false,
                    required_marker: Some(EligibilityMarker::RuralArea),
                    primary_residence_only: true,
                    pros: strings(&["No down payment", "Low annual guarantee fee"]),
                    cons: strings(&[
                        "Property must be in an eligible rural area",
                        "Household income limits apply",
                    ]),
                    eligibility_criteria: strings(&[
                        "Property in a USDA-designated rural area",
                        "Credit score 640 or higher",
                    ]),
                },
            ],
        }
    }
}

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|value| value.to_string()).collect()
}

fn validate_program(program: &LoanProgram) -> Result<(), CatalogError> {
    let invalid = |reason: &str| CatalogError::InvalidProgram {
        key: program.key.clone(),
        reason: reason.to_string(),
    };

    if program.key.trim().is_empty() {
        return Err(invalid("key must not be empty"));
    }
    if !program.min_down_payment_pct.is_finite()
        || !(0.0..=100.0).contains(&program.min_down_payment_pct)
    {
        return Err(invalid("min_down_payment_pct must be between 0 and 100"));
    }
    if !program.max_loan_amount.is_finite() || program.max_loan_amount <= 0.0 {
        return Err(invalid("max_loan_amount must be positive"));
    }
    if !program.rate_adjustment.is_finite() {
        return Err(invalid("rate_adjustment must be finite"));
    }
    if !program.mortgage_insurance_rate.is_finite() || program.mortgage_insurance_rate < 0.0 {
        return Err(invalid("mortgage_insurance_rate must not be negative"));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    const CATALOG_CSV: &str = "\
key,name,description,min_down_payment_pct,max_loan_amount,min_credit_score,rate_adjustment,requires_mortgage_insurance,mortgage_insurance_rate,manufactured_friendly,tolerates_short_tenure,required_marker,primary_residence_only,pros,cons,eligibility_criteria
jumbo,Jumbo Loan,Loans above the conforming limit,10,2000000,700,0.375,true,0.6,false,false,,false,High limits|Flexible property types,Large reserves,Credit 700+|10% down
rural-plus,Rural Plus,Credit union rural product,0,300000,650,-0.125,false,0,true,true,rural,true,No down payment,,Rural property
";

    #[test]
    fn standard_catalog_preserves_declaration_order() {
        let catalog = ProgramCatalog::standard();
        let keys: Vec<&str> = catalog
            .programs()
            .iter()
            .map(|program| program.key.as_str())
            .collect();
        assert_eq!(keys, vec!["conventional", "fha", "va", "usda"]);
        assert!(ProgramCatalog::new(catalog.programs().to_vec()).is_ok());
    }

    #[test]
    fn empty_catalog_is_a_configuration_error() {
        let error = ProgramCatalog::new(Vec::new()).expect_err("empty catalog rejected");
        assert!(matches!(error, CatalogError::Empty));
    }

    #[test]
    fn duplicate_keys_are_rejected() {
        let program = ProgramCatalog::standard().programs()[0].clone();
        let error = ProgramCatalog::new(vec![program.clone(), program])
            .expect_err("duplicate rejected");
        assert!(matches!(error, CatalogError::InvalidProgram { .. }));
    }

    #[test]
    fn loads_programs_from_csv() {
        let catalog =
            ProgramCatalog::from_reader(Cursor::new(CATALOG_CSV)).expect("catalog parses");
        assert_eq!(catalog.len(), 2);

        let jumbo = catalog.get("jumbo").expect("jumbo present");
        assert_eq!(jumbo.min_credit_score, 700);
        assert_eq!(jumbo.pros, vec!["High limits", "Flexible property types"]);
        assert_eq!(jumbo.required_marker, None);

        let rural = catalog.get("rural-plus").expect("rural present");
        assert_eq!(rural.rate_adjustment, -0.125);
        assert_eq!(rural.required_marker, Some(EligibilityMarker::RuralArea));
        assert!(rural.cons.is_empty());
    }

    #[test]
    fn header_only_csv_is_empty() {
        let header = CATALOG_CSV.lines().next().expect("header line");
        let error = ProgramCatalog::from_reader(Cursor::new(header)).expect_err("no programs");
        assert!(matches!(error, CatalogError::Empty));
    }

    #[test]
    fn unknown_marker_is_rejected() {
        let csv = CATALOG_CSV.replace(",rural,", ",coastal,");
        let error = ProgramCatalog::from_reader(Cursor::new(csv)).expect_err("bad marker");
        match error {
            CatalogError::InvalidProgram { key, .. } => assert_eq!(key, "rural-plus"),
            other => panic!("expected invalid program, got {other:?}"),
        }
    }
}
