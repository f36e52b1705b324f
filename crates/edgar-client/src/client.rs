//! SEC EDGAR API client with rate limiting.

use crate::cik::pad_cik;
use crate::error::{EdgarError, Result};
use crate::filings::{Filing, RecentFilings, TickerExchangeTable};
use crate::parsers::filing::{FilingObject, parse_filing_content};
use crate::parsers::tables::{Table, extract_tables};
use chrono::NaiveDate;
use futures::future;
use rand::Rng;
use rand::distr::Alphanumeric;
use reqwest::header::{self, HeaderMap, HeaderValue};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::collections::VecDeque;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::{Instant, sleep_until};
use url::Url;

/// Base URL for endpoints hosted on the main SEC site
const WWW_BASE_URL: &str = "https://www.sec.gov";

/// Base URL for the data API (submissions, XBRL facts)
const DATA_BASE_URL: &str = "https://data.sec.gov";

/// Default rate limit: 10 requests per rolling second (SEC requirement)
const DEFAULT_MAX_REQUESTS: usize = 10;
const DEFAULT_WINDOW: Duration = Duration::from_millis(1000);

/// Form types fetched by [`EdgarClient::get_reports`]
pub const DEFAULT_FORMS: &[&str] = &["10-Q", "10-K", "8-K"];

/// Filing-date cutoff used by [`EdgarClient::get_reports`]
fn default_after() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, 1).expect("valid date")
}

/// Sliding-window rate limiter.
///
/// At most `max_requests` acquisitions may start within any rolling `per`
/// window; excess callers are delayed until the oldest start falls out of
/// the window. Nothing is ever rejected.
struct RateLimiter {
    max_requests: usize,
    per: Duration,
    starts: VecDeque<Instant>,
}

impl RateLimiter {
    fn new(max_requests: usize, per: Duration) -> Self {
        Self {
            // A zero ceiling would never admit anything.
            max_requests: max_requests.max(1),
            per,
            starts: VecDeque::new(),
        }
    }

    async fn acquire(&mut self) {
        loop {
            let now = Instant::now();
            while let Some(&oldest) = self.starts.front() {
                if now.duration_since(oldest) >= self.per {
                    self.starts.pop_front();
                } else {
                    break;
                }
            }

            if self.starts.len() < self.max_requests {
                self.starts.push_back(now);
                return;
            }

            let oldest = self.starts[0];
            sleep_until(oldest + self.per).await;
        }
    }
}

/// `Host` header value for a target URL: the host, plus the port when it is
/// not the scheme default.
fn host_header(parsed: &Url) -> Result<String> {
    let host = parsed
        .host_str()
        .ok_or_else(|| EdgarError::Parse(format!("URL has no host: {parsed}")))?;
    Ok(match parsed.port() {
        Some(port) => format!("{host}:{port}"),
        None => host.to_string(),
    })
}

/// Headers the SEC requires on every request: a `User-Agent` with contact
/// information and a `Host` matching the target. `Accept-Encoding: gzip,
/// deflate` is attached by the transport (reqwest's `gzip`/`deflate`
/// features), which also decompresses responses transparently.
fn request_headers(host: &str, user_agent: &str) -> Result<HeaderMap> {
    let mut headers = HeaderMap::new();
    headers.insert(
        header::USER_AGENT,
        HeaderValue::from_str(user_agent)
            .map_err(|_| EdgarError::Parse(format!("invalid user agent: {user_agent:?}")))?,
    );
    headers.insert(
        header::HOST,
        HeaderValue::from_str(host)
            .map_err(|_| EdgarError::Parse(format!("invalid host: {host:?}")))?,
    );
    Ok(headers)
}

/// Async client for the SEC EDGAR public data endpoints.
///
/// Each instance owns its HTTP client and rate limiter; two instances with
/// different rate policies never interfere. Calls are otherwise stateless.
///
/// # Example
/// ```no_run
/// use edgar_client::EdgarClient;
///
/// # async fn example() -> edgar_client::Result<()> {
/// let client = EdgarClient::new("Company Name <contact@company.domain>")?;
/// if let Some(cik) = client.cik_lookup("AAPL").await? {
///     let reports = client.get_reports(&cik).await?;
///     println!("{} reports", reports.len());
/// }
/// # Ok(())
/// # }
/// ```
pub struct EdgarClient {
    http: reqwest::Client,
    limiter: Arc<Mutex<RateLimiter>>,
    user_agent: String,
    www_base: String,
    data_base: String,
}

impl EdgarClient {
    /// Create a client with the default rate limit (10 requests/second).
    ///
    /// The SEC requires `user_agent` to identify the caller with contact
    /// information, e.g. `"acme-research/1.0 (ops@acme.com)"`.
    ///
    /// # Errors
    /// Fails if the underlying HTTP client cannot be constructed.
    pub fn new(user_agent: &str) -> Result<Self> {
        Self::with_rate_limit(user_agent, DEFAULT_MAX_REQUESTS, DEFAULT_WINDOW)
    }

    /// Create a client with a custom request ceiling per rolling window.
    ///
    /// # Errors
    /// Fails if the underlying HTTP client cannot be constructed.
    pub fn with_rate_limit(user_agent: &str, max_requests: usize, per: Duration) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(EdgarError::Network)?;

        Ok(Self {
            http,
            limiter: Arc::new(Mutex::new(RateLimiter::new(max_requests, per))),
            user_agent: user_agent.to_string(),
            www_base: WWW_BASE_URL.to_string(),
            data_base: DATA_BASE_URL.to_string(),
        })
    }

    /// Point the client at alternative base URLs (`www.sec.gov` and
    /// `data.sec.gov` respectively). Intended for tests running against a
    /// local server.
    #[must_use]
    pub fn with_base_urls(mut self, www_base: &str, data_base: &str) -> Self {
        self.www_base = www_base.trim_end_matches('/').to_string();
        self.data_base = data_base.trim_end_matches('/').to_string();
        self
    }

    /// Look up the Central Index Key (CIK) for a ticker symbol.
    ///
    /// Fetches the full ticker/exchange dataset (with a random cache-busting
    /// query parameter on every call) and matches the symbol
    /// case-insensitively.
    ///
    /// # Returns
    /// The CIK zero-padded to 10 digits, or `None` when no ticker matches.
    ///
    /// # Errors
    /// Returns [`EdgarError::Http`] on a non-success upstream status.
    pub async fn cik_lookup(&self, ticker: &str) -> Result<Option<String>> {
        let cache_buster: String = rand::rng()
            .sample_iter(Alphanumeric)
            .take(8)
            .map(char::from)
            .collect();
        let url = format!(
            "{}/files/company_tickers_exchange.json?time={}",
            self.www_base, cache_buster
        );

        let table: TickerExchangeTable = self.get_json(&url).await?;
        let wanted = ticker.to_uppercase();

        Ok(table
            .into_companies()
            .into_iter()
            .find(|company| company.ticker.to_uppercase() == wanted)
            .map(|company| pad_cik(company.cik)))
    }

    /// Fetch company metadata from the submissions endpoint.
    ///
    /// The `cik` field of the response is re-padded to 10 digits in place
    /// before it is returned; everything else passes through untouched.
    ///
    /// # Errors
    /// Returns [`EdgarError::Http`] on a non-success upstream status.
    pub async fn get_company_data(&self, cik: &str) -> Result<Value> {
        let url = format!("{}/submissions/CIK{}.json", self.data_base, pad_cik(cik));
        let mut data: Value = self.get_json(&url).await?;

        if let Some(cik_field) = data.get_mut("cik") {
            let padded = match cik_field.as_str() {
                Some(s) => pad_cik(s),
                None => pad_cik(&*cik_field),
            };
            *cik_field = Value::String(padded);
        }

        Ok(data)
    }

    /// Fetch recent filings with their document bodies attached, using the
    /// default cutoff (filed after 2024-01-01) and form set
    /// ([`DEFAULT_FORMS`]).
    ///
    /// # Errors
    /// See [`EdgarClient::get_reports_since`].
    pub async fn get_reports(&self, cik: &str) -> Result<Vec<Filing>> {
        self.get_reports_since(cik, default_after(), DEFAULT_FORMS).await
    }

    /// Fetch recent filings whose form is in `forms` and whose filing date
    /// is strictly after `after`, then download each surviving filing's
    /// primary document concurrently and attach it as
    /// [`Filing::content`].
    ///
    /// Only the submissions endpoint's recent window is visible; older
    /// filings are not paged in. The downloads are joined as a unit: one
    /// failure fails the whole call.
    ///
    /// # Errors
    /// Returns [`EdgarError::DataShape`] when the submissions response's
    /// parallel arrays disagree in length, and [`EdgarError::Http`] /
    /// [`EdgarError::Network`] when any fetch fails.
    pub async fn get_reports_since(
        &self,
        cik: &str,
        after: NaiveDate,
        forms: &[&str],
    ) -> Result<Vec<Filing>> {
        let data = self.get_company_data(cik).await?;
        let recent = data
            .pointer("/filings/recent")
            .cloned()
            .ok_or_else(|| {
                EdgarError::DataShape("submissions response missing filings.recent".to_string())
            })?;
        let recent: RecentFilings = serde_json::from_value(recent)?;

        let selected: Vec<Filing> = recent
            .into_filings(cik)?
            .into_iter()
            .filter(|filing| {
                forms.contains(&filing.form.as_str()) && filing.filing_date > after
            })
            .collect();
        tracing::debug!(cik, matched = selected.len(), "downloading filing documents");

        let downloads = selected.into_iter().map(|filing| async move {
            let url = filing.document_url(&self.www_base)?;
            let content = self.get_text(&url).await?;
            Ok::<_, EdgarError>(Filing {
                content: Some(content),
                ..filing
            })
        });

        future::try_join_all(downloads).await
    }

    /// Fetch the XBRL company-facts JSON, passed through unmodified.
    ///
    /// # Errors
    /// Returns [`EdgarError::Http`] on a non-success upstream status.
    pub async fn get_company_facts(&self, cik: &str) -> Result<Value> {
        let url = format!(
            "{}/api/xbrl/companyfacts/CIK{}.json",
            self.data_base,
            pad_cik(cik)
        );
        self.get_json(&url).await
    }

    /// Parse filing content into a [`FilingObject`].
    ///
    /// # Errors
    /// Returns [`EdgarError::Xml`] on structurally malformed markup.
    pub fn get_object_from_string(&self, content: &str) -> Result<FilingObject> {
        parse_filing_content(content)
    }

    /// Download a filing from `url` and parse it into a [`FilingObject`].
    ///
    /// # Errors
    /// Propagates download failures and [`EdgarError::Xml`] on malformed
    /// markup.
    pub async fn get_object_from_url(&self, url: &str) -> Result<FilingObject> {
        let content = self.get_text(url).await?;
        parse_filing_content(&content)
    }

    /// Extract every HTML table from the supplied filing content.
    pub fn extract_tables_from_content(&self, content: &str) -> Vec<Table> {
        extract_tables(content)
    }

    /// Download a filing from `url` and extract every HTML table from it.
    ///
    /// # Errors
    /// Propagates download failures; extraction itself never fails.
    pub async fn extract_tables_from_url(&self, url: &str) -> Result<Vec<Table>> {
        let content = self.get_text(url).await?;
        Ok(extract_tables(&content))
    }

    /// Rate-limited GET with the required header set; non-2xx is an error.
    async fn get(&self, url: &str) -> Result<reqwest::Response> {
        let parsed = Url::parse(url)?;
        let host = host_header(&parsed)?;
        let headers = request_headers(&host, &self.user_agent)?;

        self.limiter.lock().await.acquire().await;
        tracing::trace!(url, "GET");

        let response = self.http.get(url).headers(headers).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(EdgarError::Http {
                url: url.to_string(),
                status,
            });
        }
        Ok(response)
    }

    async fn get_text(&self, url: &str) -> Result<String> {
        Ok(self.get(url).await?.text().await?)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        Ok(self.get(url).await?.json().await?)
    }
}

impl std::fmt::Debug for EdgarClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EdgarClient")
            .field("user_agent", &self.user_agent)
            .field("www_base", &self.www_base)
            .field("data_base", &self.data_base)
            .finish_non_exhaustive()
    }
}
