/// Standard output utilities for consistent command formatting
use crate::cli::OutputFormat;
use anyhow::Result;
use colored::*;
use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, ContentArrangement, Table};
use orthocons_tools::{Column, ConservationMatrix, ConservationRecord};
use serde::Serialize;

/// Display a section header
pub fn section_header(title: &str) {
    println!("\n{}", title.bold().cyan());
}

/// Display a success message
pub fn success(message: &str) {
    eprintln!("{} {}", "✓".green(), message);
}

/// Display an info message
pub fn info(message: &str) {
    eprintln!("{} {}", "●".blue(), message);
}

/// Display a warning message
pub fn warning(message: &str) {
    eprintln!("{} {}", "⚠".yellow(), message);
}

/// Tree structure item
pub fn tree_item(is_last: bool, label: &str, value: &str) {
    let prefix = if is_last { "└─" } else { "├─" };
    println!("{} {}: {}", prefix.dimmed(), label, value);
}

#[derive(Serialize)]
struct ScoreReport<'a> {
    alpha: Option<f64>,
    columns: &'a [Column],
    records: &'a [ConservationRecord],
}

/// Render the conservation table in the requested format
pub fn render_matrix(matrix: &ConservationMatrix, alpha: Option<f64>, format: OutputFormat) -> Result<String> {
    let rendered = match format {
        OutputFormat::Tsv => matrix.to_tsv(),
        OutputFormat::Json => {
            let report = ScoreReport {
                alpha,
                columns: &matrix.columns,
                records: &matrix.records,
            };
            let mut json = serde_json::to_string_pretty(&report)?;
            json.push('\n');
            json
        }
        OutputFormat::Table => {
            let mut table = Table::new();
            table
                .load_preset(UTF8_FULL)
                .apply_modifier(UTF8_ROUND_CORNERS)
                .set_content_arrangement(ContentArrangement::Dynamic);

            let mut header = vec![Cell::new("POS").add_attribute(Attribute::Bold)];
            header.extend(
                matrix
                    .columns
                    .iter()
                    .map(|c| Cell::new(c.heading()).add_attribute(Attribute::Bold)),
            );
            table.set_header(header);

            for (record, row) in matrix.records.iter().zip(matrix.rows()) {
                let mut cells = vec![Cell::new(record.position).set_alignment(CellAlignment::Right)];
                cells.extend(row.into_iter().map(Cell::new));
                table.add_row(cells);
            }

            let mut out = String::new();
            if let Some(alpha) = alpha {
                out.push_str(&format!("alpha parameter: {}\n", alpha));
            }
            out.push_str(&table.to_string());
            out.push('\n');
            out
        }
    };
    Ok(rendered)
}

pub fn print_matrix(matrix: &ConservationMatrix, alpha: Option<f64>, format: OutputFormat) -> Result<()> {
    print!("{}", render_matrix(matrix, alpha, format)?);
    Ok(())
}
