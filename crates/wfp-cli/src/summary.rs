use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, Color, ContentArrangement, Table};

use wfp_model::{FileSpec, RuleRegistry, ValidationOutcome};

pub fn print_outcome(file_type: &str, outcome: &ValidationOutcome) {
    let mut table = Table::new();
    apply_table_style(&mut table);
    table.set_header(vec![
        header_cell("File type"),
        header_cell("Status"),
        header_cell("Message"),
    ]);
    table.add_row(vec![
        Cell::new(file_type),
        status_cell(outcome.valid),
        Cell::new(&outcome.message),
    ]);
    if let Some(warning) = &outcome.warning {
        table.add_row(vec![
            Cell::new(""),
            Cell::new("WARNING").fg(Color::Yellow),
            Cell::new(warning).fg(Color::Yellow),
        ]);
    }
    println!("{table}");
}

pub fn print_types(registry: &RuleRegistry) {
    let mut table = Table::new();
    apply_table_style(&mut table);
    table.set_header(vec![
        header_cell("File type"),
        header_cell("Layout"),
        header_cell("Export"),
    ]);
    for (file_type, spec) in registry.iter() {
        let (layout, export) = match spec {
            FileSpec::Single(rule) => ("single table".to_string(), destination(rule.export.as_ref())),
            FileSpec::Sheets(sheets) => {
                let names: Vec<&str> = sheets.keys().map(String::as_str).collect();
                let destinations: Vec<String> = sheets
                    .values()
                    .map(|rule| destination(rule.export.as_ref()))
                    .collect();
                (
                    format!("sheets: {}", names.join(", ")),
                    destinations.join("\n"),
                )
            }
        };
        table.add_row(vec![Cell::new(file_type), Cell::new(layout), Cell::new(export)]);
    }
    println!("{table}");
}

fn destination(export: Option<&wfp_model::ExportSpec>) -> String {
    match export {
        Some(spec) => format!("{} ({})", spec.destination.display(), spec.sink),
        None => "-".to_string(),
    }
}

fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
}

fn header_cell(text: &str) -> Cell {
    Cell::new(text)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn status_cell(valid: bool) -> Cell {
    if valid {
        Cell::new("VALID")
            .fg(Color::Green)
            .add_attribute(Attribute::Bold)
    } else {
        Cell::new("INVALID")
            .fg(Color::Red)
            .add_attribute(Attribute::Bold)
    }
}
