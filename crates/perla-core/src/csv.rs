//! # CSV Writer
//!
//! Spreadsheet-compatible CSV rendering for the export layer.
//!
//! ## Format
//! - UTF-8 with a byte-order-mark prefix, so Excel detects the encoding and
//!   Chinese headers survive a double-click open
//! - fields containing a comma, double quote or newline are wrapped in
//!   double quotes, with internal quotes doubled
//! - rows end with `\n`, including the last one

/// Byte-order mark prepended to every export.
pub const BOM: &str = "\u{feff}";

/// Quotes a field if it contains a delimiter, quote or newline.
fn escape_field(value: &str) -> String {
    if value.contains(',') || value.contains('"') || value.contains('\n') {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

/// Renders a header row plus data rows into a BOM-prefixed CSV string.
///
/// ## Example
/// ```rust
/// use perla_core::csv::render;
///
/// let csv = render(&["色号", "名称"], &[vec!["A01".into(), "樱花粉".into()]]);
/// assert!(csv.starts_with('\u{feff}'));
/// assert!(csv.ends_with("A01,樱花粉\n"));
/// ```
pub fn render<H: AsRef<str>>(headers: &[H], rows: &[Vec<String>]) -> String {
    let mut out = String::from(BOM);

    out.push_str(
        &headers
            .iter()
            .map(|h| escape_field(h.as_ref()))
            .collect::<Vec<_>>()
            .join(","),
    );
    out.push('\n');

    for row in rows {
        out.push_str(
            &row.iter()
                .map(|field| escape_field(field))
                .collect::<Vec<_>>()
                .join(","),
        );
        out.push('\n');
    }

    out
}

// =============================================================================
// Unit Tests
// =============================================================================
