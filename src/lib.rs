//! Daily sales report for a Udemy instructor statement.
//! Fetches the first page of sales and refunds, groups sales per day and
//! renders a console summary with a month-end projection.

pub mod aggregate;
pub mod client;
pub mod config;
pub mod error;
pub mod models;
pub mod report;

pub use aggregate::{DailyAggregate, DailyTotals, summarize};
pub use client::{Client, Endpoint, HttpTransport, Transport};
pub use config::{Config, Credentials};
pub use error::{ConfigError, UdemyError};
pub use models::{Refund, RefundsPage, Sale, SalesPage};
pub use report::{Summary, display};

use chrono::NaiveDateTime;
use std::io::Write;

/// Fetch sales, then refunds, and write the report as of `now` to `out`.
pub async fn run<T: Transport, W: Write>(
    client: &Client<T>,
    now: NaiveDateTime,
    out: &mut W,
) -> Result<(), UdemyError> {
    let sales = client.fetch_sales().await?;
    let refunds = client.fetch_refunds().await?;
    let (totals, refund_total) = summarize(&sales, &refunds)?;
    display(&totals, refund_total, now, out)
}
