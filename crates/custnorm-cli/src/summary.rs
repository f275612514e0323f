use std::collections::BTreeMap;

use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use custnorm_cli::types::CleanResult;
use custnorm_model::{FieldFailure, IssueSeverity};
use custnorm_transform::normalization::{CANONICAL_CITIES, CITY_VARIANTS};

/// Rows shown in the preview table.
pub const PREVIEW_ROWS: usize = 8;

/// Distinct raw values listed per issue group.
const MAX_EXAMPLES: usize = 3;

pub fn print_summary(result: &CleanResult) {
    println!("Input: {}", result.input.display());
    match &result.output {
        Some(path) => println!("Output: {}", path.display()),
        None => println!("Output: - (dry run)"),
    }
    if let Some(path) = &result.report_path {
        println!("Issue report: {}", path.display());
    }

    let mut table = Table::new();
    table.set_header(vec![header_cell("Metric"), header_cell("Count")]);
    apply_summary_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    table.add_row(vec![Cell::new("Rows read"), Cell::new(result.rows_in)]);
    table.add_row(vec![
        Cell::new("Duplicates removed"),
        count_cell(result.duplicates_removed, Color::Yellow),
    ]);
    table.add_row(vec![
        Cell::new("Rows written")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        Cell::new(result.rows_out()).add_attribute(Attribute::Bold),
    ]);
    let counts = result.report.counts_by_failure();
    for failure in FieldFailure::ALL {
        let count = counts.get(&failure).copied().unwrap_or(0);
        table.add_row(vec![
            Cell::new(failure.message()),
            count_cell(count, severity_color(failure.severity())),
        ]);
    }
    println!("{table}");

    print_preview(result);
    print_issue_table(result);
}

fn print_preview(result: &CleanResult) {
    let dataset = &result.dataset;
    if dataset.is_empty() {
        return;
    }
    let mut table = Table::new();
    table.set_header(
        dataset
            .headers
            .iter()
            .map(|header| header_cell(header))
            .collect::<Vec<_>>(),
    );
    apply_table_style(&mut table);
    for row in dataset.rows.iter().take(PREVIEW_ROWS) {
        table.add_row(
            dataset
                .ordered_values(row)
                .into_iter()
                .map(|value| {
                    if value.is_empty() {
                        dim_cell("-")
                    } else {
                        Cell::new(value)
                    }
                })
                .collect::<Vec<_>>(),
        );
    }
    println!();
    println!("Preview (first {} rows):", dataset.len().min(PREVIEW_ROWS));
    println!("{table}");
}

struct IssueGroup<'a> {
    count: usize,
    examples: Vec<&'a str>,
}

fn print_issue_table(result: &CleanResult) {
    let mut groups: BTreeMap<(IssueSeverity, &str, FieldFailure), IssueGroup<'_>> =
        BTreeMap::new();
    for issue in &result.report.issues {
        let group = groups
            .entry((issue.severity(), issue.column.as_str(), issue.failure))
            .or_insert(IssueGroup {
                count: 0,
                examples: Vec::new(),
            });
        group.count += 1;
        let value = issue.value.as_str();
        if group.examples.len() < MAX_EXAMPLES && !group.examples.contains(&value) {
            group.examples.push(value);
        }
    }
    if groups.is_empty() {
        return;
    }

    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Severity"),
        header_cell("Column"),
        header_cell("Code"),
        header_cell("Count"),
        header_cell("Message"),
        header_cell("Examples"),
    ]);
    apply_issue_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Center);
    align_column(&mut table, 2, CellAlignment::Center);
    align_column(&mut table, 3, CellAlignment::Right);
    // Errors sort before warnings.
    for ((severity, column, failure), group) in groups {
        table.add_row(vec![
            severity_cell(severity),
            Cell::new(column)
                .fg(Color::Blue)
                .add_attribute(Attribute::Bold),
            Cell::new(failure.code()),
            Cell::new(group.count).fg(severity_color(severity)),
            Cell::new(failure.message()),
            example_cell(&group.examples),
        ]);
    }
    println!();
    println!("Issues:");
    println!("{table}");
}

pub fn print_cities() {
    let mut table = Table::new();
    table.set_header(vec![header_cell("City"), header_cell("Accepted variants")]);
    apply_table_style(&mut table);
    let mut canonical: Vec<&str> = CANONICAL_CITIES.to_vec();
    canonical.sort_unstable();
    for city in canonical {
        let variants: Vec<&str> = CITY_VARIANTS
            .iter()
            .filter(|(_, target)| *target == city)
            .map(|(variant, _)| *variant)
            .collect();
        let variants_cell = if variants.is_empty() {
            dim_cell("-")
        } else {
            Cell::new(variants.join(", "))
        };
        table.add_row(vec![Cell::new(city), variants_cell]);
    }
    println!("{table}");
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn apply_summary_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(80);
}

fn apply_issue_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::DynamicFullWidth)
        .set_width(160);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn count_cell(count: usize, color: Color) -> Cell {
    if count > 0 {
        Cell::new(count).fg(color).add_attribute(Attribute::Bold)
    } else {
        dim_cell(count)
    }
}

fn severity_cell(severity: IssueSeverity) -> Cell {
    match severity {
        IssueSeverity::Error => Cell::new("ERROR").fg(Color::Red),
        IssueSeverity::Warning => Cell::new("WARN").fg(Color::Yellow),
    }
}

fn severity_color(severity: IssueSeverity) -> Color {
    match severity {
        IssueSeverity::Error => Color::Red,
        IssueSeverity::Warning => Color::Yellow,
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn example_cell(examples: &[&str]) -> Cell {
    let shown: Vec<String> = examples
        .iter()
        .filter(|value| !value.is_empty())
        .map(|value| format!("{value:?}"))
        .collect();
    if shown.is_empty() {
        dim_cell("-")
    } else {
        Cell::new(shown.join(", "))
    }
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
