use crate::config::Config;
use crate::error::UdemyError;
use crate::models::{RefundsPage, SalesPage, parse_refunds, parse_sales};
use log::{debug, info};
use reqwest::Client as HttpClient;
use std::fmt;
use std::future::Future;
use std::time::Duration;

pub const AUTHORIZATION_HEADER: &str = "authorization";
pub const UDEMY_AUTHORIZATION_HEADER: &str = "x-udemy-authorization";

/// Statement endpoints exposed by the instructor API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Sales,
    Refunds,
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let v = match self {
            Endpoint::Sales => "sales",
            Endpoint::Refunds => "refunds",
        };
        f.write_str(v)
    }
}

/// Name/value pairs sent along with a request.
pub type Headers = Vec<(&'static str, String)>;

/// Performs a GET and returns the response body.
///
/// The HTTP implementation is [`HttpTransport`]; tests plug in canned bodies.
pub trait Transport {
    fn get_text(&self, url: &str, headers: &Headers)
    -> impl Future<Output = Result<String, UdemyError>>;
}

impl<T: Transport> Transport for &T {
    fn get_text(
        &self,
        url: &str,
        headers: &Headers,
    ) -> impl Future<Output = Result<String, UdemyError>> {
        (**self).get_text(url, headers)
    }
}

#[derive(Debug, Clone)]
pub struct HttpTransport {
    http: HttpClient,
}

impl HttpTransport {
    pub fn new(timeout: Duration) -> Result<Self, UdemyError> {
        let http = HttpClient::builder().timeout(timeout).build()?;
        Ok(Self { http })
    }
}

impl Transport for HttpTransport {
    async fn get_text(&self, url: &str, headers: &Headers) -> Result<String, UdemyError> {
        let mut request = self.http.get(url);
        for (name, value) in headers {
            request = request.header(*name, value);
        }
        let response = request.send().await?;
        let status = response.status();
        debug!("Received status {}", status);
        if !status.is_success() {
            return Err(UdemyError::Status(status));
        }
        response.text().await.map_err(UdemyError::from)
    }
}

#[derive(Debug, Clone)]
pub struct Client<T = HttpTransport> {
    config: Config,
    transport: T,
}

impl Client<HttpTransport> {
    /// Create a client backed by reqwest, using the configured timeout.
    pub fn new(config: Config) -> Result<Self, UdemyError> {
        let transport = HttpTransport::new(config.timeout)?;
        info!("Initialized Udemy API client for {}", config.base_url);
        Ok(Self::with_transport(config, transport))
    }
}

impl<T: Transport> Client<T> {
    pub fn with_transport(config: Config, transport: T) -> Self {
        Self { config, transport }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Fetch the first page of sales for the configured statement.
    pub async fn fetch_sales(&self) -> Result<SalesPage, UdemyError> {
        let body = self.get(Endpoint::Sales).await?;
        parse_sales(&body)
    }

    /// Fetch the first page of refunds for the configured statement.
    pub async fn fetch_refunds(&self) -> Result<RefundsPage, UdemyError> {
        let body = self.get(Endpoint::Refunds).await?;
        parse_refunds(&body)
    }

    /// URL of the first page of `endpoint`. Later pages are never requested.
    pub fn endpoint_url(&self, endpoint: Endpoint) -> String {
        format!(
            "{}/statements/{}/{}?page=1&page_size={}",
            self.config.base_url,
            self.config.credentials.statement_id(),
            endpoint,
            self.config.page_size
        )
    }

    fn auth_headers(&self) -> Headers {
        let bearer = format!("Bearer {}", self.config.credentials.token());
        vec![
            (AUTHORIZATION_HEADER, bearer.clone()),
            (UDEMY_AUTHORIZATION_HEADER, bearer),
        ]
    }

    async fn get(&self, endpoint: Endpoint) -> Result<String, UdemyError> {
        let url = self.endpoint_url(endpoint);
        debug!("GET request to {}", url);
        self.transport.get_text(&url, &self.auth_headers()).await
    }
}
