//! Parsers for filing bodies.
//!
//! - [`filing`] turns XML/SGML filing markup into a generic value tree
//! - [`tables`] pulls every HTML `<table>` out of a filing as a text grid

pub mod filing;
pub mod tables;

pub use filing::{FilingObject, parse_filing_content, values};
pub use tables::{Table, extract_tables};
