//! Terminal output utilities
//!
//! Status lines go to stderr except `header` and `info`, which frame
//! human-readable results on stdout.

use console::{measure_text_width, pad_str, Alignment};
use owo_colors::OwoColorize;

/// Status message helpers
pub struct Status;

impl Status {
    /// Print an error message
    pub fn error(message: &str) {
        eprintln!("{} {}", "✗".red(), message);
    }

    /// Print a warning message
    pub fn warning(message: &str) {
        eprintln!("{} {}", "⚠".yellow(), message);
    }

    /// Print an info message
    pub fn info(message: &str) {
        println!("{} {}", "ℹ".blue(), message);
    }

    /// Print a header
    pub fn header(message: &str) {
        println!();
        println!("{}", message.bold());
        println!("{}", "─".repeat(measure_text_width(message)));
    }
}

/// Render rows as an aligned plain-text table.
///
/// Numeric-looking cells are right-aligned, everything else left-aligned.
pub fn render_table(headers: &[String], rows: &[Vec<String>]) -> String {
    let columns = headers.len();
    let mut widths: Vec<usize> = headers.iter().map(|h| measure_text_width(h)).collect();
    for row in rows {
        for (i, cell) in row.iter().take(columns).enumerate() {
            widths[i] = widths[i].max(measure_text_width(cell));
        }
    }

    let mut out = String::new();
    let header_line: Vec<String> = headers
        .iter()
        .zip(&widths)
        .map(|(h, w)| pad_str(h, *w, Alignment::Left, None).into_owned())
        .collect();
    out.push_str(header_line.join("  ").trim_end());
    out.push('\n');

    let rule: Vec<String> = widths.iter().map(|w| "─".repeat(*w)).collect();
    out.push_str(&rule.join("  "));
    out.push('\n');

    for row in rows {
        let line: Vec<String> = (0..columns)
            .map(|i| {
                let cell = row.get(i).map(String::as_str).unwrap_or("");
                let align = if cell.parse::<f64>().is_ok() {
                    Alignment::Right
                } else {
                    Alignment::Left
                };
                pad_str(cell, widths[i], align, None).into_owned()
            })
            .collect();
        out.push_str(line.join("  ").trim_end());
        out.push('\n');
    }

    out
}

/// Format a distance in kilometers for display
pub fn format_km(km: f64) -> String {
    if km < 1.0 {
        format!("{:.0} m", km * 1000.0)
    } else if km < 100.0 {
        format!("{:.2} km", km)
    } else {
        format!("{:.0} km", km)
    }
}

/// Format a count with singular/plural
pub fn format_count(count: usize, singular: &str, plural: &str) -> String {
    if count == 1 {
        format!("{} {}", count, singular)
    } else {
        format!("{} {}", count, plural)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(cells: &[&str]) -> Vec<String> {
        cells.iter().map(|c| c.to_string()).collect()
    }

    #[test]
    fn test_render_table_aligns_columns() {
        let headers = strings(&["ID", "Distance_km"]);
        let rows = vec![strings(&["alpha", "1.5"]), strings(&["b", "120.25"])];

        let table = render_table(&headers, &rows);
        let lines: Vec<&str> = table.lines().collect();

        assert_eq!(lines[0], "ID     Distance_km");
        assert_eq!(lines[2], "alpha          1.5");
        assert_eq!(lines[3], "b           120.25");
    }

    #[test]
    fn test_render_table_pads_short_rows() {
        let headers = strings(&["A", "B"]);
        let rows = vec![strings(&["x"])];
        let table = render_table(&headers, &rows);
        assert_eq!(table.lines().nth(2), Some("x"));
    }

    #[test]
    fn test_format_km() {
        assert_eq!(format_km(0.25), "250 m");
        assert_eq!(format_km(12.345), "12.35 km");
        assert_eq!(format_km(3935.7), "3936 km");
    }

    #[test]
    fn test_format_count_singular() {
        assert_eq!(format_count(1, "row", "rows"), "1 row");
    }

    #[test]
    fn test_format_count_plural() {
        assert_eq!(format_count(5, "row", "rows"), "5 rows");
    }
}
