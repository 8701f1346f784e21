// src/core/html.rs
//
// Thin helpers over `scraper` shared by the HTML sources.

use scraper::{ElementRef, Selector};

use super::sanitize::normalize_ws;
use crate::error::{IngestError, Result};

/// Compile a CSS selector, turning parse failures into a crate error.
pub fn selector(css: &str) -> Result<Selector> {
    Selector::parse(css).map_err(|e| IngestError::Selector(format!("{css}: {e:?}")))
}

/// Visible text of an element with whitespace collapsed.
pub fn text_of(el: ElementRef<'_>) -> String {
    normalize_ws(&el.text().collect::<Vec<_>>().join(" "))
}

/// One table cell: collapsed text plus whether it came from a `<th>`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Cell {
    pub text: String,
    pub is_header: bool,
}

/// Rows of a table as cells, in document order. Nested tables are not
/// descended into separately; their text lands in the enclosing cell.
pub fn table_rows(table: ElementRef<'_>) -> Result<Vec<Vec<Cell>>> {
    let tr = selector("tr")?;
    let cells = selector("th, td")?;

    let mut out = Vec::new();
    for row in table.select(&tr) {
        let row_cells: Vec<Cell> = row
            .select(&cells)
            .map(|c| Cell { text: text_of(c), is_header: c.value().name() == "th" })
            .collect();
        out.push(row_cells);
    }
    Ok(out)
}
