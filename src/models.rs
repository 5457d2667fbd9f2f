use crate::error::UdemyError;
use log::{debug, warn};
use rust_decimal::Decimal;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

/// One sale on the statement.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Sale {
    /// Human readable date such as `"Mon, Jan 1"`, used verbatim as grouping key.
    pub formatted_date: String,
    pub instructor_share: Decimal,
}

/// One refund on the statement.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Refund {
    pub instructor_refund_amount: Decimal,
}

/// A single page of a paginated statement endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct Page<T> {
    pub data: Vec<T>,
    #[serde(default)]
    pub count: Option<u64>,
    #[serde(default)]
    pub next: Option<String>,
}

pub type SalesPage = Page<Sale>;
pub type RefundsPage = Page<Refund>;

impl<T> Page<T> {
    /// Whether the endpoint holds more records than this page carries.
    pub fn is_truncated(&self) -> bool {
        self.next.is_some() || self.count.is_some_and(|count| count > self.data.len() as u64)
    }
}

pub fn parse_sales(data: &str) -> Result<SalesPage, UdemyError> {
    parse_page(data, "sales")
}

pub fn parse_refunds(data: &str) -> Result<RefundsPage, UdemyError> {
    parse_page(data, "refunds")
}

fn parse_page<T: DeserializeOwned>(data: &str, kind: &str) -> Result<Page<T>, UdemyError> {
    let value: Value = serde_json::from_str(data).map_err(UdemyError::Json)?;
    let page: Page<T> =
        serde_json::from_value(value).map_err(|e| UdemyError::Shape(format!("{kind}: {e}")))?;
    debug!("Parsed {} {} records", page.data.len(), kind);
    if page.is_truncated() {
        warn!(
            "Only the first page of {} was fetched: got {} of {} records",
            kind,
            page.data.len(),
            page.count
                .map(|c| c.to_string())
                .unwrap_or_else(|| "more".to_string())
        );
    }
    Ok(page)
}
