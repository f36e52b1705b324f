//! HTML table extraction from filing documents.

use scraper::{Html, Selector};
use std::sync::LazyLock;

/// One extracted table: rows of trimmed cell text, in document order.
///
/// No header/body distinction is modeled; the first row is an ordinary row
/// unless the caller treats it as a header by convention.
pub type Table = Vec<Vec<String>>;

static TABLE: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("table").expect("static selector"));
static ROW: LazyLock<Selector> = LazyLock::new(|| Selector::parse("tr").expect("static selector"));
static CELL: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("td, th").expect("static selector"));

/// Extract every `<table>` from the given filing HTML.
///
/// For each table, descendant `<tr>` rows are visited in document order and
/// each `<td>`/`<th>` cell contributes its text content with surrounding
/// whitespace trimmed. Traversal is unrestricted: a nested table shows up
/// both inside its parent's grid and as its own top-level entry, and no
/// deduplication is applied.
///
/// A `<table>` with no rows yields an empty entry, a row with no cells an
/// empty row. Malformed HTML never fails; it is recovered permissively by
/// the underlying HTML5 parser.
///
/// # Example
/// ```
/// use edgar_client::parsers::tables::extract_tables;
///
/// let tables = extract_tables("<table><tr><td> a </td><td>b</td></tr></table>");
/// assert_eq!(tables, vec![vec![vec!["a".to_string(), "b".to_string()]]]);
/// ```
pub fn extract_tables(filing_content: &str) -> Vec<Table> {
    let document = Html::parse_document(filing_content);

    document
        .select(&TABLE)
        .map(|table| {
            table
                .select(&ROW)
                .map(|row| {
                    row.select(&CELL)
                        .map(|cell| cell.text().collect::<String>().trim().to_string())
                        .collect()
                })
                .collect()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_header_and_data_rows_in_order() {
        let content = r#"
            <html>
              <body>
                <table>
                  <tr><th>Header 1</th><th>Header 2</th></tr>
                  <tr><td>Row 1 Col 1</td><td>Row 1 Col 2</td></tr>
                  <tr><td>Row 2 Col 1</td><td>Row 2 Col 2</td></tr>
                </table>
              </body>
            </html>
        "#;

        let tables = extract_tables(content);
        assert_eq!(tables.len(), 1);
        assert_eq!(tables[0][0], vec!["Header 1", "Header 2"]);
        assert_eq!(tables[0][1], vec!["Row 1 Col 1", "Row 1 Col 2"]);
        assert_eq!(tables[0][2], vec!["Row 2 Col 1", "Row 2 Col 2"]);
    }

    #[test]
    fn no_tables_yields_empty_sequence() {
        let tables = extract_tables("<html><body><p>Total assets</p></body></html>");
        assert!(tables.is_empty());
    }

    #[test]
    fn cell_text_is_trimmed() {
        let tables = extract_tables("<table><tr><td>  $1,234  </td><td>\n\t(56)\n</td></tr></table>");
        assert_eq!(tables[0][0], vec!["$1,234", "(56)"]);
    }

    #[test]
    fn empty_table_and_empty_row_are_preserved() {
        let tables = extract_tables("<table></table><table><tr></tr></table>");

        assert_eq!(tables.len(), 2);
        assert!(tables[0].is_empty());
        assert_eq!(tables[1], vec![Vec::<String>::new()]);
    }

    #[test]
    fn nested_tables_are_listed_at_top_level_too() {
        let content = r#"
            <table>
              <tr><td>
                <table><tr><td>inner</td></tr></table>
              </td></tr>
            </table>
        "#;

        let tables = extract_tables(content);
        // Outer and inner each get a top-level entry.
        assert_eq!(tables.len(), 2);
        // The outer table's descendant traversal sees the inner cells as well.
        assert_eq!(tables[0].len(), 2);
        assert_eq!(tables[1], vec![vec!["inner".to_string()]]);
    }

    #[test]
    fn malformed_html_is_recovered() {
        let tables = extract_tables("<table><tr><td>unclosed");
        assert_eq!(tables[0][0], vec!["unclosed"]);
    }
}
