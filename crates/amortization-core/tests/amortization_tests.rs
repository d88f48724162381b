use amortization_core::amortization::schedule::{self, LoanParameters};
use amortization_core::amortization::summary;
use amortization_core::AmortizationError;
use pretty_assertions::assert_eq;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn reference_loan() -> LoanParameters {
    LoanParameters::new(dec!(500000), dec!(7.5), 20)
}

fn assert_schedule_shape(params: &LoanParameters) {
    let out = schedule::compute_amortization(params).unwrap().result;
    assert!(!out.schedule.is_empty());
    assert!(out.schedule.len() as u32 <= params.years * 12);

    let mut previous_balance = params.principal;
    for (idx, period) in out.schedule.iter().enumerate() {
        assert_eq!(period.month, idx as u32 + 1);
        assert!(period.balance >= Decimal::ZERO);
        assert!(period.balance <= previous_balance);
        previous_balance = period.balance;
    }

    let interest_sum: Decimal = out.schedule.iter().map(|p| p.interest).sum();
    assert_eq!(out.total_interest, interest_sum);
}

// ===========================================================================
// Reference scenarios
// ===========================================================================

#[test]
fn test_scenario_a_plain_twenty_year_loan() {
    let out = schedule::compute_amortization(&reference_loan()).unwrap().result;
    // EMI = P·r·(1+r)^n / ((1+r)^n − 1) with r = 0.625%, n = 240
    assert!((out.scheduled_payment - dec!(4027.97)).abs() < dec!(0.01));
    assert_eq!(out.schedule.len(), 240);
    assert!(out.schedule[239].balance < dec!(0.000001));
}

#[test]
fn test_scenario_b_extra_monthly_payoff_early() {
    let mut params = reference_loan();
    params.extra_monthly = dec!(5000);
    let out = schedule::compute_amortization(&params).unwrap().result;
    assert!(out.schedule.len() < 240);
    // Roughly 9k/month against a 500k balance clears in well under 6 years.
    assert!(out.schedule.len() < 72);
    assert_eq!(out.schedule.last().unwrap().balance, Decimal::ZERO);
}

#[test]
fn test_scenario_c_balloon_in_year_five() {
    let mut params = reference_loan();
    params.balloon_year = 5;
    params.balloon_amount = dec!(100000);
    let out = schedule::compute_amortization(&params).unwrap().result;

    let month_59 = &out.schedule[58];
    let month_60 = &out.schedule[59];
    assert_eq!(month_60.month, 60);
    assert!(month_60.principal > dec!(100000));
    assert!(month_59.balance - month_60.balance > dec!(100000));
    assert!(out.schedule.len() < 240);
}

#[test]
fn test_scenario_d_one_year_loan() {
    let params = LoanParameters::new(dec!(12000), dec!(10), 1);
    let out = schedule::compute_amortization(&params).unwrap().result;
    assert_eq!(out.schedule.len(), 12);
    assert!(out.schedule[11].balance < dec!(0.000001));
}

// ===========================================================================
// Properties
// ===========================================================================

#[test]
fn test_schedule_shape_across_inputs() {
    let mut cases = vec![
        reference_loan(),
        LoanParameters::new(dec!(12000), dec!(10), 1),
        LoanParameters::new(dec!(250000), dec!(3.25), 30),
        LoanParameters::new(dec!(1500), dec!(24), 2),
    ];
    let mut with_extras = reference_loan();
    with_extras.extra_monthly = dec!(300);
    with_extras.extra_yearly = dec!(12000);
    with_extras.balloon_year = 10;
    with_extras.balloon_amount = dec!(75000);
    cases.push(with_extras);

    for params in &cases {
        assert_schedule_shape(params);
    }
}

#[test]
fn test_more_extra_never_lengthens_schedule() {
    let mut previous_len = usize::MAX;
    for extra in [0, 100, 500, 1000, 2500, 5000, 20000, 600000] {
        let mut params = reference_loan();
        params.extra_monthly = Decimal::from(extra);
        let len = schedule::compute_amortization(&params)
            .unwrap()
            .result
            .schedule
            .len();
        assert!(len <= previous_len, "extra {extra} lengthened schedule");
        previous_len = len;
    }
    assert_eq!(previous_len, 1);
}

#[test]
fn test_computation_is_deterministic() {
    let mut params = reference_loan();
    params.extra_yearly = dec!(7500);
    let first = schedule::compute_amortization(&params).unwrap().result;
    let second = schedule::compute_amortization(&params).unwrap().result;
    assert_eq!(first.schedule, second.schedule);
    assert_eq!(first.total_interest, second.total_interest);
}

#[test]
fn test_summary_agrees_with_schedule() {
    let mut params = reference_loan();
    params.extra_monthly = dec!(1000);
    let sched = schedule::compute_amortization(&params).unwrap().result;
    let summ = summary::summarize_amortization(&params).unwrap().result;
    assert_eq!(summ.total_interest, sched.total_interest);
    assert_eq!(summ.total_payment, sched.total_payment);
    assert_eq!(summ.payoff_month, sched.schedule.len() as u32);
}

// ===========================================================================
// JSON input
// ===========================================================================

#[test]
fn test_json_input_defaults_optional_fields() {
    let json = r#"{"principal": "500000", "annual_rate_percent": "7.5", "years": 20}"#;
    let params: LoanParameters = serde_json::from_str(json).unwrap();
    assert_eq!(params, reference_loan());
}

#[test]
fn test_json_input_with_extras_and_date() {
    let json = r#"{
        "principal": "12000",
        "annual_rate_percent": "10",
        "years": 1,
        "extra_monthly": "100",
        "balloon_year": 1,
        "balloon_amount": "500",
        "first_payment_date": "2026-03-01"
    }"#;
    let params: LoanParameters = serde_json::from_str(json).unwrap();
    assert_eq!(params.extra_monthly, dec!(100));
    assert_eq!(params.extra_yearly, Decimal::ZERO);
    let out = schedule::compute_amortization(&params).unwrap();
    let value = serde_json::to_value(&out).unwrap();
    assert_eq!(value["result"]["schedule"][0]["payment_date"], "2026-03-01");
    assert_eq!(value["assumptions"]["years"], 1);
}

// ===========================================================================
// Errors
// ===========================================================================

#[test]
fn test_invalid_parameters_rejected() {
    let bad = [
        LoanParameters::new(dec!(0), dec!(7.5), 20),
        LoanParameters::new(dec!(-100), dec!(7.5), 20),
        LoanParameters::new(dec!(1000), dec!(0), 20),
        LoanParameters::new(dec!(1000), dec!(-2), 20),
        LoanParameters::new(dec!(1000), dec!(7.5), 0),
    ];
    for params in &bad {
        let err = schedule::compute_amortization(params).unwrap_err();
        assert!(
            matches!(err, AmortizationError::InvalidParameter { .. }),
            "expected InvalidParameter for {params:?}, got {err:?}"
        );
    }
}

#[test]
fn test_error_message_names_field() {
    let err = schedule::compute_amortization(&LoanParameters::new(dec!(1000), dec!(7.5), 0))
        .unwrap_err();
    assert!(err.to_string().contains("years"));
}
