//! Data model for EDGAR ticker and filing records.
//!
//! The submissions API returns filing information as parallel arrays where
//! each index corresponds to a single filing; [`RecentFilings`] mirrors that
//! wire shape and [`RecentFilings::into_filings`] performs the validated zip
//! into per-filing [`Filing`] records.

use crate::cik::pad_cik;
use crate::error::{EdgarError, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One row of the SEC ticker/exchange dataset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompanyTicker {
    /// CIK as a number (the dataset stores it unpadded)
    pub cik: u64,
    /// Company name
    pub name: String,
    /// Ticker symbol
    pub ticker: String,
    /// Listing exchange; empty when the dataset carries `null`
    pub exchange: String,
}

/// Wire shape of `company_tickers_exchange.json`:
/// `{"fields": ["cik","name","ticker","exchange"], "data": [[320193, "Apple Inc.", "AAPL", "Nasdaq"], ...]}`.
#[derive(Debug, Deserialize)]
pub(crate) struct TickerExchangeTable {
    #[allow(dead_code)]
    pub(crate) fields: Vec<String>,
    pub(crate) data: Vec<(u64, String, String, Option<String>)>,
}

impl TickerExchangeTable {
    /// Map the raw rows into [`CompanyTicker`] records.
    pub(crate) fn into_companies(self) -> Vec<CompanyTicker> {
        self.data
            .into_iter()
            .map(|(cik, name, ticker, exchange)| CompanyTicker {
                cik,
                name,
                ticker,
                exchange: exchange.unwrap_or_default(),
            })
            .collect()
    }
}

/// A single filing from the submissions API's recent window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Filing {
    /// Form type (e.g., "10-K", "10-Q", "8-K")
    pub form: String,
    /// CIK, zero-padded to 10 digits
    pub cik: String,
    /// Primary document filename
    pub primary_document: String,
    /// Filing date
    pub filing_date: NaiveDate,
    /// Accession number in dash-delimited display form
    pub accession_number: String,
    /// 1 when the filing carries inline XBRL, 0 otherwise
    pub is_xbrl: u8,
    /// Securities act the filing was made under (may be empty)
    pub act: String,
    /// Description of the primary document (may be empty)
    pub primary_doc_description: String,
    /// Raw document body, attached after download
    pub content: Option<String>,
}

impl Filing {
    /// URL of the primary document on the EDGAR archive.
    ///
    /// Document URLs use the integer CIK (no padding) and the accession
    /// number without dashes.
    pub fn document_url(&self, www_base: &str) -> Result<String> {
        let cik_number: u64 = self
            .cik
            .parse()
            .map_err(|_| EdgarError::Parse(format!("non-numeric CIK: {}", self.cik)))?;
        let accession_no_dashes = self.accession_number.replace('-', "");

        Ok(format!(
            "{}/Archives/edgar/data/{}/{}/{}",
            www_base, cik_number, accession_no_dashes, self.primary_document
        ))
    }
}

/// Parallel arrays under `filings.recent` in the submissions response.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecentFilings {
    /// Accession numbers (dash-delimited)
    pub accession_number: Vec<String>,
    /// Filing dates in YYYY-MM-DD form
    pub filing_date: Vec<String>,
    /// Form types
    pub form: Vec<String>,
    /// Primary document filenames
    pub primary_document: Vec<String>,
    /// Inline-XBRL flags
    #[serde(rename = "isXBRL")]
    pub is_xbrl: Vec<u8>,
    /// Securities acts
    pub act: Vec<String>,
    /// Primary document descriptions
    pub primary_doc_description: Vec<String>,
}

impl RecentFilings {
    /// Zip the parallel arrays into one [`Filing`] per index.
    ///
    /// Index alignment determines correctness, so all arrays must agree in
    /// length; a misaligned response fails with [`EdgarError::DataShape`]
    /// rather than silently truncating.
    ///
    /// # Errors
    /// Returns `DataShape` on misaligned arrays and `Parse` on a filing date
    /// that is not `YYYY-MM-DD`.
    pub fn into_filings(self, cik: &str) -> Result<Vec<Filing>> {
        self.check_alignment()?;
        let cik = pad_cik(cik);

        let mut filings = Vec::with_capacity(self.form.len());
        for i in 0..self.form.len() {
            let filing_date = NaiveDate::parse_from_str(&self.filing_date[i], "%Y-%m-%d")
                .map_err(|e| {
                    EdgarError::Parse(format!(
                        "invalid filing date {:?}: {}",
                        self.filing_date[i], e
                    ))
                })?;

            filings.push(Filing {
                form: self.form[i].clone(),
                cik: cik.clone(),
                primary_document: self.primary_document[i].clone(),
                filing_date,
                accession_number: self.accession_number[i].clone(),
                is_xbrl: self.is_xbrl[i],
                act: self.act[i].clone(),
                primary_doc_description: self.primary_doc_description[i].clone(),
                content: None,
            });
        }

        Ok(filings)
    }

    fn check_alignment(&self) -> Result<()> {
        let expected = self.form.len();
        let lengths = [
            ("accessionNumber", self.accession_number.len()),
            ("filingDate", self.filing_date.len()),
            ("primaryDocument", self.primary_document.len()),
            ("isXBRL", self.is_xbrl.len()),
            ("act", self.act.len()),
            ("primaryDocDescription", self.primary_doc_description.len()),
        ];

        for (field, len) in lengths {
            if len != expected {
                return Err(EdgarError::DataShape(format!(
                    "filings.recent.{field} has {len} entries, expected {expected}"
                )));
            }
        }

        Ok(())
    }
}
