use crate::error::UdemyError;
use crate::models::{Refund, RefundsPage, Sale, SalesPage};
use log::debug;
use rust_decimal::Decimal;
use std::collections::BTreeMap;

/// Sales on one calendar day.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DailyAggregate {
    pub students: u32,
    pub revenue: Decimal,
}

impl DailyAggregate {
    /// Count one more student paying `share`.
    pub fn record(self, share: Decimal) -> Result<Self, UdemyError> {
        let students = self
            .students
            .checked_add(1)
            .ok_or(UdemyError::Overflow("daily students"))?;
        let revenue = self
            .revenue
            .checked_add(share)
            .ok_or(UdemyError::Overflow("daily revenue"))?;
        Ok(Self { students, revenue })
    }

    pub fn average(&self) -> Result<Decimal, UdemyError> {
        self.revenue
            .checked_div(Decimal::from(self.students))
            .ok_or(UdemyError::DivisionByZero("daily average"))
    }
}

/// Aggregates keyed by the API's formatted date, iterated in ascending key order.
pub type DailyTotals = BTreeMap<String, DailyAggregate>;

pub fn fold_sale(mut totals: DailyTotals, sale: &Sale) -> Result<DailyTotals, UdemyError> {
    let day = totals
        .get(&sale.formatted_date)
        .copied()
        .unwrap_or_default()
        .record(sale.instructor_share)?;
    totals.insert(sale.formatted_date.clone(), day);
    Ok(totals)
}

pub fn daily_totals(sales: &[Sale]) -> Result<DailyTotals, UdemyError> {
    sales.iter().try_fold(DailyTotals::new(), fold_sale)
}

pub fn refund_total(refunds: &[Refund]) -> Result<Decimal, UdemyError> {
    refunds.iter().try_fold(Decimal::ZERO, |total, r| {
        total
            .checked_add(r.instructor_refund_amount)
            .ok_or(UdemyError::Overflow("refund total"))
    })
}

pub fn summarize(
    sales: &SalesPage,
    refunds: &RefundsPage,
) -> Result<(DailyTotals, Decimal), UdemyError> {
    let totals = daily_totals(&sales.data)?;
    let refunds = refund_total(&refunds.data)?;
    debug!(
        "Aggregated {} sales into {} days, refunds {}",
        sales.data.len(),
        totals.len(),
        refunds
    );
    Ok((totals, refunds))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Page;

    fn sale(date: &str, cents: i64) -> Sale {
        Sale {
            formatted_date: date.to_string(),
            instructor_share: Decimal::new(cents, 2),
        }
    }

    fn refund(cents: i64) -> Refund {
        Refund {
            instructor_refund_amount: Decimal::new(cents, 2),
        }
    }

    fn page<T>(data: Vec<T>) -> Page<T> {
        Page {
            data,
            count: None,
            next: None,
        }
    }

    #[test]
    fn record_is_pure() {
        let start = DailyAggregate::default();
        let next = start.record(Decimal::new(1250, 2)).unwrap();
        assert_eq!(start, DailyAggregate::default());
        assert_eq!(next.students, 1);
        assert_eq!(next.revenue, Decimal::new(1250, 2));
    }

    #[test]
    fn groups_sales_by_formatted_date() {
        let totals = daily_totals(&[
            sale("Mon, Jan 1", 1000),
            sale("Tue, Jan 2", 2000),
            sale("Mon, Jan 1", 500),
        ])
        .unwrap();
        assert_eq!(totals.len(), 2);
        assert_eq!(
            totals["Mon, Jan 1"],
            DailyAggregate {
                students: 2,
                revenue: Decimal::new(1500, 2)
            }
        );
        assert_eq!(
            totals["Tue, Jan 2"],
            DailyAggregate {
                students: 1,
                revenue: Decimal::new(2000, 2)
            }
        );
    }

    #[test]
    fn distinct_dates_never_merge() {
        let totals = daily_totals(&[sale("Mon, Jan 1", 100), sale("Mon, Jan  1", 100)]).unwrap();
        assert_eq!(totals.len(), 2);
    }

    #[test]
    fn conserves_students_and_revenue() {
        let sales: Vec<Sale> = (0..37)
            .map(|i| sale(&format!("Day, Feb {}", i % 9 + 1), 199 + i * 13))
            .collect();
        let totals = daily_totals(&sales).unwrap();

        let students: u32 = totals.values().map(|d| d.students).sum();
        let revenue: Decimal = totals.values().map(|d| d.revenue).sum();
        let expected: Decimal = sales.iter().map(|s| s.instructor_share).sum();

        assert_eq!(students as usize, sales.len());
        assert_eq!(revenue, expected);
        assert_eq!(totals.len(), 9);
    }

    #[test]
    fn no_dates_are_invented() {
        let totals = daily_totals(&[sale("Mon, Jan 1", 100), sale("Thu, Jan 4", 100)]).unwrap();
        let keys: Vec<&str> = totals.keys().map(String::as_str).collect();
        assert_eq!(keys, ["Mon, Jan 1", "Thu, Jan 4"]);
    }

    #[test]
    fn refund_total_is_plain_sum() {
        assert_eq!(
            refund_total(&[refund(300), refund(125)]).unwrap(),
            Decimal::new(425, 2)
        );
        assert_eq!(refund_total(&[]).unwrap(), Decimal::ZERO);
    }

    #[test]
    fn huge_shares_overflow_into_an_error() {
        let huge = Sale {
            formatted_date: "Mon, Jan 1".to_string(),
            instructor_share: Decimal::MAX,
        };
        let err = daily_totals(&[huge.clone(), huge]).unwrap_err();
        assert!(matches!(err, UdemyError::Overflow("daily revenue")));

        let huge = Refund {
            instructor_refund_amount: Decimal::MAX,
        };
        let err = refund_total(&[huge.clone(), huge]).unwrap_err();
        assert!(matches!(err, UdemyError::Overflow("refund total")));
    }

    #[test]
    fn summarize_empty_pages() {
        let (totals, refunds) = summarize(&page(vec![]), &page(vec![])).unwrap();
        assert!(totals.is_empty());
        assert_eq!(refunds, Decimal::ZERO);
    }

    #[test]
    fn summarize_keeps_refunds_independent_of_sales() {
        let refunds = page(vec![refund(300)]);
        let (_, with_sales) =
            summarize(&page(vec![sale("Mon, Jan 1", 1000)]), &refunds).unwrap();
        let (_, without_sales) = summarize(&page(vec![]), &refunds).unwrap();
        assert_eq!(with_sales, without_sales);
    }

    #[test]
    fn average_per_student() {
        let day = DailyAggregate::default()
            .record(Decimal::new(1000, 2))
            .and_then(|day| day.record(Decimal::new(500, 2)))
            .unwrap();
        assert_eq!(day.average().unwrap(), Decimal::new(750, 2));
        assert!(matches!(
            DailyAggregate::default().average(),
            Err(UdemyError::DivisionByZero(_))
        ));
    }
}
