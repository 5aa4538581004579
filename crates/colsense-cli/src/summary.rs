use std::sync::Arc;

use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use colsense_catalog::{CatalogSummary, Keyword, PatternRule};
use colsense_cli::profile::{MappingComplexity, TableProfile};
use colsense_model::{ClassificationResult, RuleProvenance};

pub fn print_catalog(source: &str, summary: &CatalogSummary, rules: &[Arc<PatternRule>]) {
    println!("Catalog: {source}");
    println!(
        "Patterns: {} ({} built-in, {} custom)",
        summary.total_patterns, summary.builtin_count, summary.custom_count
    );
    println!("Validation types: {}", summary.validation_types.join(", "));

    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Type"),
        header_cell("Label"),
        header_cell("Keywords"),
        header_cell("Validation"),
        header_cell("Threshold"),
        header_cell("Source"),
        header_cell("Description"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 4, CellAlignment::Right);
    for rule in rules {
        let keywords: Vec<&str> = rule.keywords().iter().map(Keyword::as_str).collect();
        table.add_row(vec![
            Cell::new(rule.type_key())
                .fg(Color::Blue)
                .add_attribute(Attribute::Bold),
            Cell::new(rule.field_type_label()),
            Cell::new(keywords.join(", ")),
            Cell::new(rule.validation_kind()),
            Cell::new(format!("{:.2}", rule.threshold())),
            provenance_cell(rule.provenance()),
            rule.description().map_or_else(|| dim_cell("-"), Cell::new),
        ]);
    }
    println!("{table}");
}

pub fn print_classification(result: &ClassificationResult) {
    let mut table = Table::new();
    table.set_header(vec![header_cell("Field"), header_cell("Value")]);
    apply_table_style(&mut table);
    table.add_row(vec![Cell::new("Column"), Cell::new(&result.column_name)]);
    table.add_row(vec![Cell::new("Type"), type_cell(result)]);
    table.add_row(vec![Cell::new("Label"), Cell::new(&result.field_type_label)]);
    table.add_row(vec![
        Cell::new("Keyword"),
        result
            .matched_keyword
            .as_deref()
            .map_or_else(|| dim_cell("-"), Cell::new),
    ]);
    table.add_row(vec![
        Cell::new("Valid"),
        Cell::new(format!("{}/{}", result.valid_count, result.total_count)),
    ]);
    table.add_row(vec![Cell::new("Score"), score_cell(result)]);
    table.add_row(vec![
        Cell::new("Threshold"),
        result
            .threshold
            .map_or_else(|| dim_cell("-"), |threshold| Cell::new(format!("{threshold:.2}"))),
    ]);
    table.add_row(vec![Cell::new("Confirmed"), confirmed_cell(result)]);
    if !result.invalid_samples.is_empty() {
        table.add_row(vec![
            Cell::new("Invalid"),
            Cell::new(result.invalid_samples.join(", ")).fg(Color::Yellow),
        ]);
    }
    println!("{table}");
}

pub fn print_profile(profile: &TableProfile) {
    let insights = &profile.insights;
    println!(
        "Table: {} ({} rows, {} columns, {} naming, {} complexity)",
        profile.table_name,
        profile.row_count,
        profile.column_count,
        insights.naming_convention,
        insights.mapping_complexity
    );

    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Column"),
        header_cell("Type"),
        header_cell("Keyword"),
        header_cell("Valid"),
        header_cell("Score"),
        header_cell("Confirmed"),
        header_cell("Invalid samples"),
    ]);
    apply_summary_table_style(&mut table);
    align_column(&mut table, 3, CellAlignment::Right);
    align_column(&mut table, 4, CellAlignment::Right);
    align_column(&mut table, 5, CellAlignment::Center);
    for result in &profile.columns {
        let invalid = if result.invalid_samples.is_empty() {
            dim_cell("-")
        } else {
            Cell::new(result.invalid_samples.join(", ")).fg(Color::Yellow)
        };
        table.add_row(vec![
            Cell::new(&result.column_name),
            type_cell(result),
            result
                .matched_keyword
                .as_deref()
                .map_or_else(|| dim_cell("-"), Cell::new),
            Cell::new(format!("{}/{}", result.valid_count, result.total_count)),
            score_cell(result),
            confirmed_cell(result),
            invalid,
        ]);
    }
    println!("{table}");

    for note in &insights.data_type_notes {
        println!("  note: {note}");
    }
    for issue in &insights.potential_issues {
        println!("  issue: {issue}");
    }
    println!(
        "  complexity: {}",
        complexity_label(insights.mapping_complexity)
    );
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
        .set_content_arrangement(ContentArrangement::DynamicFullWidth)
        .set_width(140);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn type_cell(result: &ClassificationResult) -> Cell {
    if result.is_classified() {
        Cell::new(&result.type_key)
            .fg(Color::Blue)
            .add_attribute(Attribute::Bold)
    } else {
        dim_cell(&result.type_key)
    }
}

fn score_cell(result: &ClassificationResult) -> Cell {
    if result.total_count == 0 {
        return dim_cell("-");
    }
    let text = format!("{:.0}%", result.match_score * 100.0);
    if result.is_confirmed {
        Cell::new(text).fg(Color::Green)
    } else {
        Cell::new(text).fg(Color::Yellow)
    }
}

fn confirmed_cell(result: &ClassificationResult) -> Cell {
    if result.is_confirmed {
        Cell::new("✓")
            .fg(Color::Green)
            .add_attribute(Attribute::Bold)
    } else if result.is_classified() && result.total_count > 0 {
        Cell::new("✗").fg(Color::Yellow)
    } else {
        dim_cell("-")
    }
}

fn provenance_cell(provenance: RuleProvenance) -> Cell {
    match provenance {
        RuleProvenance::BuiltIn => dim_cell(provenance),
        RuleProvenance::Custom => Cell::new(provenance).fg(Color::Magenta),
    }
}

fn complexity_label(complexity: MappingComplexity) -> String {
    match complexity {
        MappingComplexity::Low => format!("{complexity} - names and samples agree"),
        MappingComplexity::Medium => format!("{complexity} - review flagged columns"),
        MappingComplexity::High => format!("{complexity} - expect manual mapping"),
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
