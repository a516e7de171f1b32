use super::common::*;
use crate::workflows::mortgage::domain::{Occupancy, PropertyType};
use crate::workflows::mortgage::recommendation::format_currency;

#[test]
fn strong_fit_confirms_program_and_tips_on_moderate_dti() {
    let analysis = advisor()
        .analyze(&reference_request())
        .expect("analysis succeeds");

    assert!(analysis.recommendations[0].contains("strong candidate for the Conventional Loan"));
    let dti_tip = format!("{:.1}%", analysis.debt_to_income);
    assert!(analysis
        .recommendations
        .iter()
        .any(|message| message.contains(&dti_tip) && message.contains("36% or lower")));
    assert!(analysis.warnings.is_empty());
}

#[test]
fn pmi_tip_quotes_the_charged_premium() {
    let mut request = reference_request();
    request.loan.down_payment = 40_000.0;

    let analysis = advisor().analyze(&request).expect("analysis succeeds");

    let premium = format_currency(analysis.costs.mortgage_insurance);
    assert!(analysis.recommendations.iter().any(|message| {
        message.contains(&format!("adds {premium}/month")) && message.contains("$80,000")
    }));
}

#[test]
fn workable_fit_names_credit_score_target() {
    let mut request = reference_request();
    request.borrower.credit_score = 650;
    request.property.property_type = PropertyType::Manufactured;
    // 440k exceeds the FHA limit.
    request.loan.home_price = 550_000.0;
    request.loan.down_payment = 110_000.0;

    let analysis = advisor().analyze(&request).expect("analysis succeeds");

    assert_eq!(analysis.recommended.program.key, "conventional");
    assert_eq!(analysis.recommended.eligibility.score, 60);
    assert!(analysis
        .recommendations
        .iter()
        .any(|message| message.contains("workable fit")));
    assert!(analysis
        .recommendations
        .iter()
        .any(|message| message.contains("from 650 to 670 or higher")));
}

#[test]
fn workable_fit_without_credit_gap_lists_penalties() {
    let mut request = reference_request();
    request.borrower.years_employed = 1.5;

    let analysis = advisor().analyze(&request).expect("analysis succeeds");

    assert_eq!(analysis.recommended.program.key, "conventional");
    assert_eq!(analysis.recommended.eligibility.score, 70);
    assert!(analysis.recommendations.iter().any(|message| {
        message.contains("remaining gaps") && message.contains("1.5 years in current employment")
    }));
}

#[test]
fn weak_fit_suggests_corrective_down_payment() {
    let mut request = reference_request();
    request.borrower.credit_score = 600;
    request.borrower.years_employed = 1.0;
    request.loan.home_price = 500_000.0;
    request.loan.down_payment = 50_000.0;

    let analysis = advisor().analyze(&request).expect("analysis succeeds");

    assert_eq!(analysis.recommended.program.key, "conventional");
    assert_eq!(analysis.recommended.eligibility.score, 30);
    assert!(analysis
        .warnings
        .iter()
        .any(|warning| warning.contains("may not be suitable")));
    assert!(analysis
        .warnings
        .iter()
        .any(|warning| warning.contains("$100,000 (20.0%) instead of $50,000")));
}

#[test]
fn high_dti_warns_with_exact_gap() {
    let mut request = reference_request();
    request.borrower.monthly_debts = 1_500.0;

    let analysis = advisor().analyze(&request).expect("analysis succeeds");

    assert!(analysis.debt_to_income > 43.0);
    let obligations = analysis.total_monthly_payment + 1_500.0;
    let reduction = format_currency(obligations - 8_000.0 * 0.43);
    let increase = format_currency(obligations / 0.43 - 8_000.0);
    let warning = analysis
        .warnings
        .iter()
        .find(|warning| warning.contains("exceeds 43%"))
        .expect("dti warning present");
    assert!(warning.contains(&reduction), "{warning}");
    assert!(warning.contains(&increase), "{warning}");
}

#[test]
fn investment_property_is_flagged_for_primary_only_program() {
    let mut request = reference_request();
    request.property.occupancy = Occupancy::Investment;
    request.borrower.credit_score = 640;

    let analysis = advisor().analyze(&request).expect("analysis succeeds");

    assert_eq!(analysis.recommended.program.key, "fha");
    assert!(analysis
        .warnings
        .iter()
        .any(|warning| warning.contains("limited to primary residences")));
}
