use super::{CatalogError, LoanProgram};
use crate::workflows::mortgage::domain::EligibilityMarker;
use serde::{Deserialize, Deserializer};
use std::io::Read;

const LIST_SEPARATOR: char = '|';

pub(crate) fn parse_programs<R: Read>(reader: R) -> Result<Vec<LoanProgram>, CatalogError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut programs = Vec::new();

    for record in csv_reader.deserialize::<ProgramRow>() {
        let row = record?;
        programs.push(row.into_program()?);
    }

    Ok(programs)
}

#[derive(Debug, Deserialize)]
struct ProgramRow {
    key: String,
    name: String,
    #[serde(default)]
    description: String,
    min_down_payment_pct: f64,
    max_loan_amount: f64,
    min_credit_score: u16,
    rate_adjustment: f64,
    requires_mortgage_insurance: bool,
    mortgage_insurance_rate: f64,
    #[serde(default)]
    manufactured_friendly: bool,
    #[serde(default)]
    tolerates_short_tenure: bool,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    required_marker: Option<String>,
    #[serde(default)]
    primary_residence_only: bool,
    #[serde(default)]
    pros: String,
    #[serde(default)]
    cons: String,
    #[serde(default)]
    eligibility_criteria: String,
}

impl ProgramRow {
    fn into_program(self) -> Result<LoanProgram, CatalogError> {
        let required_marker = match self.required_marker.as_deref() {
            None => None,
            Some(raw) => Some(EligibilityMarker::parse(raw).ok_or_else(|| {
                CatalogError::InvalidProgram {
                    key: self.key.clone(),
                    reason: format!("unknown eligibility marker '{raw}'"),
                }
            })?),
        };

        Ok(LoanProgram {
            required_marker,
            pros: split_list(&self.pros),
            cons: split_list(&self.cons),
            eligibility_criteria: split_list(&self.eligibility_criteria),
            key: self.key,
            name: self.name,
            description: self.description,
            min_down_payment_pct: self.min_down_payment_pct,
            max_loan_amount: self.max_loan_amount,
            min_credit_score: self.min_credit_score,
            rate_adjustment: self.rate_adjustment,
            requires_mortgage_insurance: self.requires_mortgage_insurance,
            mortgage_insurance_rate: self.mortgage_insurance_rate,
            manufactured_friendly: self.manufactured_friendly,
            tolerates_short_tenure: self.tolerates_short_tenure,
            primary_residence_only: self.primary_residence_only,
        })
    }
}

fn split_list(raw: &str) -> Vec<String> {
    raw.split(LIST_SEPARATOR)
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}
