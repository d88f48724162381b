//! Level-payment loan amortization with extra and balloon payments.
//!
//! The scheduled payment is sized once from the nominal tenure. Extra
//! monthly, extra yearly and balloon amounts are layered on top of the
//! principal portion, so they shorten the schedule instead of lowering the
//! payment. All math in `rust_decimal::Decimal`.

use chrono::{Months, NaiveDate};
use log::{debug, warn};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::error::AmortizationError;
use crate::time_value::{self, out_of_range};
use crate::types::{monthly_rate_from_percent, with_metadata, ComputationOutput, Money, Percent};
use crate::AmortizationResult;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

const MONTHS_PER_YEAR: u32 = 12;

// ---------------------------------------------------------------------------
// Input types
// ---------------------------------------------------------------------------

/// Loan terms for a single schedule computation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanParameters {
    /// Amount borrowed.
    pub principal: Money,
    /// Nominal annual interest rate in percent (e.g., 7.5 = 7.5%).
    pub annual_rate_percent: Percent,
    /// Nominal tenure in whole years.
    pub years: u32,
    /// Added to the principal portion of every payment.
    #[serde(default)]
    pub extra_monthly: Money,
    /// Added to the principal portion of every 12th payment.
    #[serde(default)]
    pub extra_yearly: Money,
    /// Year at whose final month the balloon is paid. 0 disables it.
    #[serde(default)]
    pub balloon_year: u32,
    #[serde(default)]
    pub balloon_amount: Money,
    /// Date of the first payment. When set, every period carries its date.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_payment_date: Option<NaiveDate>,
}

impl LoanParameters {
    /// Plain level-payment loan with no extras and no balloon.
    pub fn new(principal: Money, annual_rate_percent: Percent, years: u32) -> Self {
        Self {
            principal,
            annual_rate_percent,
            years,
            extra_monthly: Decimal::ZERO,
            extra_yearly: Decimal::ZERO,
            balloon_year: 0,
            balloon_amount: Decimal::ZERO,
            first_payment_date: None,
        }
    }

    /// Same loan with every extra and balloon payment removed.
    pub fn without_prepayments(&self) -> Self {
        Self {
            extra_monthly: Decimal::ZERO,
            extra_yearly: Decimal::ZERO,
            balloon_year: 0,
            balloon_amount: Decimal::ZERO,
            ..self.clone()
        }
    }

    /// Number of monthly periods in the nominal tenure.
    pub fn nominal_periods(&self) -> u32 {
        self.years.saturating_mul(MONTHS_PER_YEAR)
    }

    /// Principal added on top of the scheduled payment in `month`.
    pub fn extra_for_month(&self, month: u32) -> AmortizationResult<Money> {
        let mut extra = self.extra_monthly;
        if month % MONTHS_PER_YEAR == 0 {
            extra = checked_sum(extra, self.extra_yearly, "extra_yearly")?;
        }
        if self.balloon_year > 0 && u64::from(month) == u64::from(self.balloon_year) * 12 {
            extra = checked_sum(extra, self.balloon_amount, "balloon_amount")?;
        }
        Ok(extra)
    }
}

// ---------------------------------------------------------------------------
// Output types
// ---------------------------------------------------------------------------

/// One month of the schedule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentPeriod {
    /// 1-based period index.
    pub month: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_date: Option<NaiveDate>,
    /// Level payment, identical in every period.
    pub scheduled_payment: Money,
    pub interest: Money,
    /// Principal portion including extras and balloon. Not reduced when the
    /// final payment overshoots the outstanding balance.
    pub principal: Money,
    /// Ending balance, floored at zero.
    pub balance: Money,
}

/// Full month-by-month schedule plus totals.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AmortizationSchedule {
    pub schedule: Vec<PaymentPeriod>,
    pub scheduled_payment: Money,
    pub total_interest: Money,
    /// Total interest plus the original principal.
    pub total_payment: Money,
    pub nominal_periods: u32,
    /// Number of periods actually emitted before the balance reached zero.
    pub periods_paid: u32,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Build the amortization schedule for a fixed-rate loan.
pub fn compute_amortization(
    params: &LoanParameters,
) -> AmortizationResult<ComputationOutput<AmortizationSchedule>> {
    let start = Instant::now();

    let (output, warnings) = build_schedule(params)?;

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Level-Payment Amortization with Extra and Balloon Payments",
        params,
        warnings,
        elapsed,
        output,
    ))
}

/// Run the month-by-month simulation without the metadata envelope.
pub(crate) fn build_schedule(
    params: &LoanParameters,
) -> AmortizationResult<(AmortizationSchedule, Vec<String>)> {
    validate(params)?;
    let warnings = collect_warnings(params);
    for w in &warnings {
        warn!("{w}");
    }

    let period_rate = monthly_rate_from_percent(params.annual_rate_percent);
    let nominal_periods = params.nominal_periods();
    let scheduled_payment =
        time_value::pmt(period_rate, nominal_periods, -params.principal, Decimal::ZERO)
            .map_err(rename_loan_field)?;

    let mut schedule = Vec::with_capacity(nominal_periods as usize);
    let mut balance = params.principal;
    let mut total_interest = Decimal::ZERO;

    for month in 1..=nominal_periods {
        let interest = balance
            .checked_mul(period_rate)
            .ok_or_else(|| out_of_range("annual_rate_percent", "Monthly interest"))?;
        total_interest = checked_sum(total_interest, interest, "principal")?;

        let principal = checked_sum(
            scheduled_payment - interest,
            params.extra_for_month(month)?,
            "extra_monthly",
        )?;

        balance -= principal;
        if balance < Decimal::ZERO {
            balance = Decimal::ZERO;
        }

        schedule.push(PaymentPeriod {
            month,
            payment_date: payment_date(params.first_payment_date, month)?,
            scheduled_payment,
            interest,
            principal,
            balance,
        });

        if balance <= Decimal::ZERO {
            break;
        }
    }

    let periods_paid = schedule.len() as u32;
    debug!(
        "amortized {} over {}/{} periods: payment {}, total interest {}",
        params.principal, periods_paid, nominal_periods, scheduled_payment, total_interest
    );

    Ok((
        AmortizationSchedule {
            schedule,
            scheduled_payment,
            total_interest,
            total_payment: checked_sum(total_interest, params.principal, "principal")?,
            nominal_periods,
            periods_paid,
        },
        warnings,
    ))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn checked_sum(a: Money, b: Money, field: &str) -> AmortizationResult<Money> {
    a.checked_add(b)
        .ok_or_else(|| out_of_range(field, "Running total"))
}

/// Report `time_value` failures against the loan's own field names.
fn rename_loan_field(err: AmortizationError) -> AmortizationError {
    match err {
        AmortizationError::InvalidParameter { field, reason } => {
            let field = match field.as_str() {
                "rate" => "annual_rate_percent".to_string(),
                "present_value" => "principal".to_string(),
                "nper" => "years".to_string(),
                _ => field,
            };
            AmortizationError::InvalidParameter { field, reason }
        }
        other => other,
    }
}

fn validate(params: &LoanParameters) -> AmortizationResult<()> {
    if params.principal <= Decimal::ZERO {
        return Err(AmortizationError::InvalidParameter {
            field: "principal".into(),
            reason: "Principal must be positive".into(),
        });
    }
    if params.annual_rate_percent <= Decimal::ZERO {
        return Err(AmortizationError::InvalidParameter {
            field: "annual_rate_percent".into(),
            reason: "Annual rate must be positive".into(),
        });
    }
    if params.years == 0 {
        return Err(AmortizationError::InvalidParameter {
            field: "years".into(),
            reason: "Tenure must be at least 1 year".into(),
        });
    }
    let non_negative = [
        ("extra_monthly", params.extra_monthly),
        ("extra_yearly", params.extra_yearly),
        ("balloon_amount", params.balloon_amount),
    ];
    for (field, value) in non_negative {
        if value < Decimal::ZERO {
            return Err(AmortizationError::InvalidParameter {
                field: field.into(),
                reason: "Extra and balloon payments cannot be negative".into(),
            });
        }
    }
    Ok(())
}

fn collect_warnings(params: &LoanParameters) -> Vec<String> {
    let mut warnings = Vec::new();
    if params.balloon_year > params.years {
        warnings.push(format!(
            "Balloon year {} is beyond the {}-year tenure; balloon payment is never applied",
            params.balloon_year, params.years
        ));
    }
    if params.balloon_year == 0 && params.balloon_amount > Decimal::ZERO {
        warnings.push("Balloon amount given without a balloon year; ignored".into());
    }
    warnings
}

fn payment_date(first: Option<NaiveDate>, month: u32) -> AmortizationResult<Option<NaiveDate>> {
    let Some(first) = first else {
        return Ok(None);
    };
    first
        .checked_add_months(Months::new(month - 1))
        .map(Some)
        .ok_or_else(|| AmortizationError::InvalidParameter {
            field: "first_payment_date".into(),
            reason: format!("Payment date for month {month} is out of calendar range"),
        })
}
