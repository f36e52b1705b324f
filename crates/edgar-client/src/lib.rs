#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/edgar-rs/edgar-client/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod cik;
pub mod client;
pub mod error;
pub mod filings;
pub mod parsers;

pub use cik::pad_cik;
pub use client::{DEFAULT_FORMS, EdgarClient};
pub use error::{EdgarError, Result};
pub use filings::{CompanyTicker, Filing, RecentFilings};
pub use parsers::{FilingObject, Table, extract_tables, parse_filing_content};

/// Version information.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
