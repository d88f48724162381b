//! Headline figures and chart data derived from an amortization schedule.
//!
//! Compares the loan as configured against the same loan without any
//! extra or balloon payments, so callers can show how much interest and
//! how many months the prepayments save.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use super::schedule::{build_schedule, AmortizationSchedule, LoanParameters};
use crate::error::AmortizationError;
use crate::types::{with_metadata, ComputationOutput, Money, Rate};
use crate::AmortizationResult;

// ---------------------------------------------------------------------------
// Output types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BreakdownCategory {
    Principal,
    Interest,
}

/// One slice of the principal-vs-interest split of total payments.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BreakdownSlice {
    pub category: BreakdownCategory,
    pub amount: Money,
    /// Fraction of total payments (0.25 = 25%).
    pub share: Rate,
}

/// Per-period values for a balance/interest/principal trend chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendPoint {
    pub month: u32,
    pub balance: Money,
    pub interest: Money,
    pub principal: Money,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AmortizationSummary {
    pub scheduled_payment: Money,
    pub total_interest: Money,
    pub total_payment: Money,
    pub breakdown: Vec<BreakdownSlice>,
    /// Month in which the balance reaches zero.
    pub payoff_month: u32,
    pub nominal_periods: u32,
    pub months_saved: u32,
    /// Total interest of the same loan with no extra or balloon payments.
    pub baseline_total_interest: Money,
    pub interest_saved: Money,
    /// Extra monthly, extra yearly and balloon amounts as recorded in the
    /// schedule, including any final-period overshoot.
    pub total_extra_paid: Money,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Summarise a loan: totals, principal/interest split, and savings from
/// prepayments relative to the plain level-payment baseline.
pub fn summarize_amortization(
    params: &LoanParameters,
) -> AmortizationResult<ComputationOutput<AmortizationSummary>> {
    let start = Instant::now();

    let (actual, warnings) = build_schedule(params)?;
    let (baseline, _) = build_schedule(&params.without_prepayments())?;

    let total_extra_paid = actual
        .schedule
        .iter()
        .try_fold(Decimal::ZERO, |acc, p| {
            let extra = params.extra_for_month(p.month)?;
            acc.checked_add(extra)
                .ok_or_else(|| AmortizationError::InvalidParameter {
                    field: "extra_monthly".into(),
                    reason: "Total extra payments exceed decimal range".into(),
                })
        })?;

    let summary = AmortizationSummary {
        scheduled_payment: actual.scheduled_payment,
        total_interest: actual.total_interest,
        total_payment: actual.total_payment,
        breakdown: breakdown(params.principal, actual.total_interest, actual.total_payment),
        payoff_month: actual.periods_paid,
        nominal_periods: actual.nominal_periods,
        months_saved: actual.nominal_periods - actual.periods_paid,
        baseline_total_interest: baseline.total_interest,
        interest_saved: baseline.total_interest - actual.total_interest,
        total_extra_paid,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Amortization Summary vs Level-Payment Baseline",
        params,
        warnings,
        elapsed,
        summary,
    ))
}

/// Extract the balance/interest/principal series from a schedule.
pub fn trend_series(schedule: &AmortizationSchedule) -> Vec<TrendPoint> {
    schedule
        .schedule
        .iter()
        .map(|p| TrendPoint {
            month: p.month,
            balance: p.balance,
            interest: p.interest,
            principal: p.principal,
        })
        .collect()
}

fn breakdown(principal: Money, total_interest: Money, total_payment: Money) -> Vec<BreakdownSlice> {
    let principal_share = principal / total_payment;
    vec![
        BreakdownSlice {
            category: BreakdownCategory::Principal,
            amount: principal,
            share: principal_share,
        },
        BreakdownSlice {
            category: BreakdownCategory::Interest,
            amount: total_interest,
            share: Decimal::ONE - principal_share,
        },
    ]
}
