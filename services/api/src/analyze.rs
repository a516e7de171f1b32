use crate::infra::{load_catalog, parse_date};
use chrono::NaiveDate;
use clap::Args;
use loan_advisor::config::AppConfig;
use loan_advisor::error::AppError;
use loan_advisor::workflows::mortgage::{
    format_currency, AnalysisRequest, BorrowerProfile, EligibilityMarker, EmploymentType,
    LoanAdvisor, LoanAnalysis, LoanRequest, Occupancy, ProgramCatalog, ProgramQuote,
    PropertyProfile, PropertyType,
};
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Args, Debug)]
pub(crate) struct AnalyzeArgs {
    /// Gross monthly income
    #[arg(long)]
    pub(crate) income: f64,
    /// Existing monthly debt payments
    #[arg(long, default_value_t = 0.0)]
    pub(crate) debts: f64,
    /// Credit score (300-850)
    #[arg(long)]
    pub(crate) credit_score: u16,
    /// salaried, self_employed, freelance, or retired
    #[arg(long, default_value = "salaried", value_parser = parse_employment)]
    pub(crate) employment: EmploymentType,
    /// Years in current employment
    #[arg(long)]
    pub(crate) years_employed: f64,
    /// single_family, condo, townhouse, multi_family, or manufactured
    #[arg(long, default_value = "single_family", value_parser = parse_property_type)]
    pub(crate) property_type: PropertyType,
    /// primary, secondary, or investment
    #[arg(long, default_value = "primary", value_parser = parse_occupancy)]
    pub(crate) occupancy: Occupancy,
    /// Free-form location text
    #[arg(long, default_value = "")]
    pub(crate) location: String,
    /// Eligibility marker the borrower holds (repeatable): military_service, rural_area
    #[arg(long = "marker", value_parser = parse_marker)]
    pub(crate) markers: Vec<EligibilityMarker>,
    /// Purchase price of the home
    #[arg(long)]
    pub(crate) home_price: f64,
    /// Down payment in dollars
    #[arg(long)]
    pub(crate) down_payment: Option<f64>,
    /// Down payment as a percentage of the price
    #[arg(long, conflicts_with = "down_payment")]
    pub(crate) down_payment_percent: Option<f64>,
    /// Nominal annual interest rate in percent
    #[arg(long)]
    pub(crate) rate: f64,
    /// Loan term in years
    #[arg(long, default_value_t = 30)]
    pub(crate) term: u32,
    /// Annual property tax as a percentage of the price
    #[arg(long, default_value_t = 0.0)]
    pub(crate) property_tax_rate: f64,
    /// Annual homeowner insurance as a percentage of the price
    #[arg(long, default_value_t = 0.0)]
    pub(crate) insurance_rate: f64,
    /// Monthly HOA dues
    #[arg(long, default_value_t = 0.0)]
    pub(crate) hoa: f64,
    /// Leave taxes, insurance, and mortgage insurance out of the monthly payment
    #[arg(long)]
    pub(crate) exclude_taxes_insurance: bool,
    /// First payment date (YYYY-MM-DD) used to project the payoff date
    #[arg(long, value_parser = parse_date)]
    pub(crate) first_payment: Option<NaiveDate>,
    /// CSV program catalog overriding APP_PROGRAM_CATALOG
    #[arg(long)]
    pub(crate) catalog: Option<PathBuf>,
    /// Print the full analysis as JSON
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug, Default)]
pub(crate) struct ProgramsArgs {
    /// CSV program catalog overriding APP_PROGRAM_CATALOG
    #[arg(long)]
    pub(crate) catalog: Option<PathBuf>,
    /// Print the catalog as JSON
    #[arg(long)]
    pub(crate) json: bool,
}

impl AnalyzeArgs {
    fn request(&self) -> AnalysisRequest {
        let mut loan = LoanRequest::new(
            self.home_price,
            self.down_payment.unwrap_or(0.0),
            self.rate,
            self.term,
        );
        if let Some(percent) = self.down_payment_percent {
            loan.set_down_payment_percent(percent);
        }
        loan.include_taxes_insurance = !self.exclude_taxes_insurance;
        loan.property_tax_rate = self.property_tax_rate;
        loan.insurance_rate = self.insurance_rate;
        loan.hoa_monthly = self.hoa;
        loan.first_payment_on = self.first_payment;

        AnalysisRequest {
            borrower: BorrowerProfile {
                monthly_income: self.income,
                monthly_debts: self.debts,
                credit_score: self.credit_score,
                employment: self.employment,
                years_employed: self.years_employed,
            },
            property: PropertyProfile {
                property_type: self.property_type,
                occupancy: self.occupancy,
                location: self.location.clone(),
                eligibility_markers: self.markers.clone(),
            },
            loan,
        }
    }
}

pub(crate) fn run_analyze(args: AnalyzeArgs) -> Result<(), AppError> {
    let catalog = resolve_catalog(args.catalog.clone())?;
    let advisor = LoanAdvisor::new(Arc::new(catalog));
    let request = args.request();
    let analysis = advisor.analyze(&request)?;

    if args.json {
        let json = serde_json::to_string_pretty(&analysis).map_err(|err| AppError::Io(err.into()))?;
        println!("{json}");
    } else {
        render_analysis(&request, &analysis);
    }

    Ok(())
}

pub(crate) fn run_programs(args: ProgramsArgs) -> Result<(), AppError> {
    let catalog = resolve_catalog(args.catalog)?;

    if args.json {
        let json = serde_json::to_string_pretty(catalog.programs())
            .map_err(|err| AppError::Io(err.into()))?;
        println!("{json}");
        return Ok(());
    }

    println!("Loan programs ({})", catalog.len());
    for program in catalog.programs() {
        println!(
            "  {:<14} {:<20} min down {:>4.1}%  min credit {}  limit {}  rate {:+.2}%",
            program.key,
            program.name,
            program.min_down_payment_pct,
            program.min_credit_score,
            format_currency(program.max_loan_amount),
            program.rate_adjustment
        );
    }
    Ok(())
}

fn resolve_catalog(explicit: Option<PathBuf>) -> Result<ProgramCatalog, AppError> {
    let path = match explicit {
        Some(path) => Some(path),
        None => AppConfig::load()?.catalog.program_catalog,
    };
    Ok(load_catalog(path.as_deref())?)
}

fn render_analysis(request: &AnalysisRequest, analysis: &LoanAnalysis) {
    let loan = &request.loan;

    println!("Home loan analysis");
    println!(
        "  Price {}  Down payment {} ({:.1}%)  Loan {} ({:.1}% LTV)",
        format_currency(loan.home_price),
        format_currency(loan.effective_down_payment()),
        analysis.down_payment_percent,
        format_currency(analysis.loan_amount),
        analysis.loan_to_value
    );

    println!("\nRecommended program");
    render_quote(&analysis.recommended);
    for penalty in &analysis.recommended.eligibility.penalties {
        println!("    -{:>3}  {}", penalty.points, penalty.notes);
    }

    let costs = &analysis.costs;
    println!("\nMonthly payment");
    println!(
        "  Principal & interest {:>10}",
        format_currency(costs.principal_and_interest)
    );
    println!("  Property tax         {:>10}", format_currency(costs.property_tax));
    println!("  Home insurance       {:>10}", format_currency(costs.home_insurance));
    println!(
        "  Mortgage insurance   {:>10}",
        format_currency(costs.mortgage_insurance)
    );
    println!("  HOA                  {:>10}", format_currency(costs.hoa));
    println!("  Total                {:>10}", format_currency(costs.total));
    println!(
        "  Total interest over the term: {}",
        format_currency(analysis.total_interest)
    );
    if let Some(payoff) = analysis.payoff_date {
        println!("  Final payment: {payoff}");
    }

    println!("\nAffordability");
    println!(
        "  Debt-to-income {:.1}%  Tier {}  Approval likelihood {:.0}%",
        analysis.debt_to_income,
        analysis.affordability.label(),
        analysis.approval_probability
    );
    println!(
        "  Comfortable housing payment: up to {}",
        format_currency(analysis.max_affordable_payment)
    );

    if analysis.alternatives.is_empty() {
        println!("\nAlternatives: none");
    } else {
        println!("\nAlternatives");
        for quote in &analysis.alternatives {
            render_quote(quote);
        }
    }

    if !analysis.recommendations.is_empty() {
        println!("\nRecommendations");
        for message in &analysis.recommendations {
            println!("  - {message}");
        }
    }
    if !analysis.warnings.is_empty() {
        println!("\nWarnings");
        for message in &analysis.warnings {
            println!("  ! {message}");
        }
    }
}

fn render_quote(quote: &ProgramQuote) {
    println!(
        "  {} [{}] score {}/100 at {:.3}% -> {}/month principal & interest",
        quote.program.name,
        quote.program.key,
        quote.eligibility.score,
        quote.eligibility.adjusted_rate,
        format_currency(quote.monthly_principal_and_interest)
    );
}

fn parse_employment(raw: &str) -> Result<EmploymentType, String> {
    EmploymentType::parse(raw).ok_or_else(|| format!("unknown employment type '{raw}'"))
}

fn parse_property_type(raw: &str) -> Result<PropertyType, String> {
    PropertyType::parse(raw).ok_or_else(|| format!("unknown property type '{raw}'"))
}

fn parse_occupancy(raw: &str) -> Result<Occupancy, String> {
    Occupancy::parse(raw).ok_or_else(|| format!("unknown occupancy '{raw}'"))
}

fn parse_marker(raw: &str) -> Result<EligibilityMarker, String> {
    EligibilityMarker::parse(raw).ok_or_else(|| format!("unknown eligibility marker '{raw}'"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Parser)]
    struct Harness {
        #[command(flatten)]
        args: AnalyzeArgs,
    }

    fn parse(extra: &[&str]) -> AnalyzeArgs {
        let mut argv = vec![
            "loan-advisor",
            "--income",
            "8000",
            "--credit-score",
            "720",
            "--years-employed",
            "5",
            "--home-price",
            "400000",
            "--rate",
            "6.5",
        ];
        argv.extend_from_slice(extra);
        Harness::try_parse_from(argv).expect("arguments parse").args
    }

    #[test]
    fn percent_down_payment_is_converted_to_dollars() {
        let request = parse(&["--down-payment-percent", "20"]).request();
        assert_eq!(request.loan.down_payment, 80_000.0);
        assert_eq!(request.loan.term_years, 30);
        assert!(request.loan.include_taxes_insurance);
    }

    #[test]
    fn enum_flags_accept_hyphenated_values() {
        let args = parse(&[
            "--employment",
            "self-employed",
            "--property-type",
            "multi-family",
            "--occupancy",
            "investment",
            "--marker",
            "military",
            "--exclude-taxes-insurance",
        ]);
        let request = args.request();
        assert_eq!(request.borrower.employment, EmploymentType::SelfEmployed);
        assert_eq!(request.property.property_type, PropertyType::MultiFamily);
        assert_eq!(request.property.occupancy, Occupancy::Investment);
        assert_eq!(
            request.property.eligibility_markers,
            vec![EligibilityMarker::MilitaryService]
        );
        assert!(!request.loan.include_taxes_insurance);
    }

    #[test]
    fn both_down_payment_forms_conflict() {
        let result = Harness::try_parse_from([
            "loan-advisor",
            "--income",
            "8000",
            "--credit-score",
            "720",
            "--years-employed",
            "5",
            "--home-price",
            "400000",
            "--rate",
            "6.5",
            "--down-payment",
            "80000",
            "--down-payment-percent",
            "20",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn unknown_property_type_is_rejected() {
        let result = Harness::try_parse_from([
            "loan-advisor",
            "--income",
            "8000",
            "--credit-score",
            "720",
            "--years-employed",
            "5",
            "--home-price",
            "400000",
            "--rate",
            "6.5",
            "--property-type",
            "castle",
        ]);
        assert!(result.is_err());
    }
}
