//! Demo of the SEC EDGAR client.
//!
//! This example demonstrates how to:
//! - Look up a company's CIK from its ticker symbol
//! - Fetch company metadata and recent reports
//! - Parse a filing into a generic object and extract its tables
//!
//! Run with: cargo run --example edgar_demo

use edgar_client::EdgarClient;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // The SEC requires contact info in the user agent.
    let client = EdgarClient::new("Company Name <contact@company.domain>")?;

    let ticker = "AAPL";
    let Some(cik) = client.cik_lookup(ticker).await? else {
        println!("No CIK found for {ticker}");
        return Ok(());
    };
    println!("{ticker} CIK: {cik}");

    let company = client.get_company_data(&cik).await?;
    println!("Company: {}", company["name"]);

    let reports = client.get_reports(&cik).await?;
    println!("\n{} recent reports:", reports.len());
    for filing in &reports {
        println!(
            "  {} filed {} ({})",
            filing.form, filing.filing_date, filing.primary_document
        );
    }

    // Parse the newest report and count its tables.
    if let Some(filing) = reports.first() {
        let url = filing.document_url("https://www.sec.gov")?;

        let object = client.get_object_from_url(&url).await?;
        if let Some(map) = object.as_object() {
            let keys: Vec<&String> = map.keys().collect();
            println!("\nTop-level keys in {}: {:?}", filing.primary_document, keys);
        }

        let tables = client.extract_tables_from_url(&url).await?;
        println!("Extracted {} tables", tables.len());
    }

    Ok(())
}
