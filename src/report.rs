use crate::aggregate::DailyTotals;
use crate::error::UdemyError;
use chrono::{Datelike, NaiveDateTime};
use rust_decimal::{Decimal, RoundingStrategy};
use std::io::Write;

/// Days used to extrapolate the month-end figure.
pub const PROJECTION_DAYS: u32 = 31;

/// Grand totals and the per-day figures derived from them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Summary {
    pub students: u32,
    pub revenue: Decimal,
    pub refunds: Decimal,
    /// Day of month of the moment the report runs, not of the statement period.
    pub day_of_month: u32,
}

impl Summary {
    pub fn new(
        totals: &DailyTotals,
        refunds: Decimal,
        day_of_month: u32,
    ) -> Result<Self, UdemyError> {
        let students = totals.values().try_fold(0u32, |sum, d| {
            sum.checked_add(d.students)
                .ok_or(UdemyError::Overflow("total students"))
        })?;
        let revenue = totals.values().try_fold(Decimal::ZERO, |sum, d| {
            sum.checked_add(d.revenue)
                .ok_or(UdemyError::Overflow("total revenue"))
        })?;
        Ok(Self {
            students,
            revenue,
            refunds,
            day_of_month,
        })
    }

    pub fn net_revenue(&self) -> Result<Decimal, UdemyError> {
        self.revenue
            .checked_sub(self.refunds)
            .ok_or(UdemyError::Overflow("net revenue"))
    }

    pub fn students_per_day(&self) -> Result<Decimal, UdemyError> {
        Decimal::from(self.students)
            .checked_div(Decimal::from(self.day_of_month))
            .ok_or(UdemyError::DivisionByZero("students per day"))
    }

    pub fn net_per_day(&self) -> Result<Decimal, UdemyError> {
        self.net_revenue()?
            .checked_div(Decimal::from(self.day_of_month))
            .ok_or(UdemyError::DivisionByZero("revenue per day"))
    }

    /// Fails when there were no sales at all.
    pub fn net_per_student(&self) -> Result<Decimal, UdemyError> {
        self.net_revenue()?
            .checked_div(Decimal::from(self.students))
            .ok_or(UdemyError::DivisionByZero("revenue per student"))
    }

    pub fn month_projection(&self) -> Result<Decimal, UdemyError> {
        self.net_per_day()?
            .checked_mul(Decimal::from(PROJECTION_DAYS))
            .ok_or(UdemyError::Overflow("month projection"))
    }
}

/// Write the console report for `totals` as of `now` to `out`.
///
/// Lines are written as soon as they are computed, so a failure part way
/// (no sales at all gives a division by zero on the average line) leaves
/// the figures printed so far in `out`.
pub fn display<W: Write>(
    totals: &DailyTotals,
    refund_total: Decimal,
    now: NaiveDateTime,
    out: &mut W,
) -> Result<(), UdemyError> {
    writeln!(out, "Date:  {}", now.format("%Y-%m-%d %H:%M:%S%.6f"))?;

    for (date, day) in totals {
        writeln!(
            out,
            "{}: {:2} students - total: ${:6.2} - average: ${:6.2}",
            date_token(date),
            day.students,
            money(day.revenue),
            money(day.average()?)
        )?;
    }

    let summary = Summary::new(totals, refund_total, now.day())?;
    writeln!(out)?;
    writeln!(
        out,
        "total: {} students ${:.2}",
        summary.students,
        money(summary.revenue)
    )?;
    writeln!(out, "refunds: {:6.2}", money(summary.refunds))?;
    writeln!(out, "revenues: {:6.2}", money(summary.net_revenue()?))?;
    writeln!(
        out,
        "average: {:.1} students/day ${:.2}/day ${:.2}/student",
        round(summary.students_per_day()?, 1),
        money(summary.net_per_day()?),
        money(summary.net_per_student()?)
    )?;
    writeln!(
        out,
        "month preview: ${:.2}",
        money(summary.month_projection()?)
    )?;
    Ok(())
}

/// Second whitespace-separated field of a formatted date ("Mon, Jan 1" gives "Jan").
fn date_token(date: &str) -> &str {
    date.split_whitespace().nth(1).unwrap_or(date)
}

fn money(value: Decimal) -> Decimal {
    round(value, 2)
}

fn round(value: Decimal, dp: u32) -> Decimal {
    value.round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero)
}
