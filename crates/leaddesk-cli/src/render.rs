//! Plain-text tables and JSON output.

use anyhow::Result;
use serde::Serialize;

use leaddesk_core::utils::truncate_string;

/// Widest a single cell may get before it is truncated.
const MAX_CELL_WIDTH: usize = 48;

/// Column separator
const GAP: &str = "  ";

/// A simple left-aligned text table.
#[derive(Debug, Default)]
pub struct Table {
    headers: Vec<&'static str>,
    rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new(headers: &[&'static str]) -> Self {
        Self {
            headers: headers.to_vec(),
            rows: Vec::new(),
        }
    }

    pub fn row<I, S>(&mut self, cells: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut row: Vec<String> = cells
            .into_iter()
            .map(|c| truncate_string(&c.into(), MAX_CELL_WIDTH))
            .collect();
        row.resize(self.headers.len(), String::new());
        self.rows.push(row);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn render(&self) -> String {
        let widths: Vec<usize> = self
            .headers
            .iter()
            .enumerate()
            .map(|(i, h)| {
                self.rows
                    .iter()
                    .map(|r| r[i].chars().count())
                    .chain(std::iter::once(h.chars().count()))
                    .max()
                    .unwrap_or(0)
            })
            .collect();

        let line = |cells: Vec<&str>| -> String {
            cells
                .iter()
                .zip(&widths)
                .map(|(cell, width)| {
                    let pad = width.saturating_sub(cell.chars().count());
                    format!("{}{}", cell, " ".repeat(pad))
                })
                .collect::<Vec<_>>()
                .join(GAP)
                .trim_end()
                .to_string()
        };

        let rules: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();

        let mut out = String::new();
        out.push_str(&line(self.headers.clone()));
        out.push('\n');
        out.push_str(&line(rules.iter().map(String::as_str).collect()));
        out.push('\n');
        for row in &self.rows {
            out.push_str(&line(row.iter().map(String::as_str).collect()));
            out.push('\n');
        }
        out
    }

    pub fn print(&self, empty_message: &str) {
        if self.is_empty() {
            println!("{}", empty_message);
        } else {
            print!("{}", self.render());
        }
    }
}

/// Aligned `label: value` lines for a single record.
pub fn details(pairs: &[(&str, String)]) -> String {
    let width = pairs.iter().map(|(k, _)| k.chars().count()).max().unwrap_or(0);
    pairs
        .iter()
        .map(|(k, v)| format!("{:<width$}  {}\n", format!("{}:", k), v, width = width + 1))
        .collect()
}

pub fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

pub fn yes_no(value: bool) -> &'static str {
    if value {
        "yes"
    } else {
        "no"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_aligns_columns() {
        let mut table = Table::new(&["ID", "NAME"]);
        table.row(["1", "Anna"]).row(["12", "Bo"]);

        assert_eq!(
            table.render(),
            "ID  NAME\n--  ----\n1   Anna\n12  Bo\n"
        );
    }

    #[test]
    fn test_table_pads_short_rows() {
        let mut table = Table::new(&["A", "B", "C"]);
        table.row(["x"]);
        assert_eq!(table.render().lines().last(), Some("x"));
    }

    #[test]
    fn test_table_truncates_long_cells() {
        let mut table = Table::new(&["TEXT"]);
        table.row(["y".repeat(100)]);
        let last = table.render().lines().last().map(str::to_string).unwrap_or_default();
        assert!(last.chars().count() <= MAX_CELL_WIDTH);
        assert!(last.ends_with("..."));
    }

    #[test]
    fn test_details_aligns_labels() {
        let out = details(&[("ID", "7".to_string()), ("Status", "New".to_string())]);
        assert_eq!(out, "ID:      7\nStatus:  New\n");
    }
}
