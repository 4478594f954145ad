use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use shop_cli::registry::RegistrationResponse;
use shop_cli::session::{ColumnProfile, ExportOutcome};
use shop_map::ColumnStatus;
use shop_model::{AdminConfig, DEFAULT_HEADERS, HeaderCatalog};

use crate::commands::MapReport;

pub fn print_headers(catalog: &HeaderCatalog) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("#"),
        header_cell("Header"),
        header_cell("Exported"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Right);
    align_column(&mut table, 2, CellAlignment::Center);
    for (index, header) in DEFAULT_HEADERS.iter().enumerate() {
        let enabled = catalog.contains(header);
        table.add_row(vec![
            Cell::new(index + 1),
            if enabled {
                Cell::new(header)
            } else {
                dim_cell(header)
            },
            flag_cell(enabled),
        ]);
    }
    println!("{table}");
    println!("{} of {} headers exported", catalog.len(), DEFAULT_HEADERS.len());
}

pub fn print_mapping(report: &MapReport) {
    let state = &report.mapping;
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Column"),
        header_cell("Values"),
        header_cell("Mapped to"),
        header_cell("Source"),
        header_cell("Suggestions"),
    ]);
    apply_summary_table_style(&mut table);
    align_column(&mut table, 3, CellAlignment::Center);
    for (column, header) in state.header_map().iter() {
        let profile = report.profiles.iter().find(|p| p.hint.column == column);
        let suggestions = state
            .suggestions_for(column)
            .iter()
            .map(|s| format!("{} ({:.0}, {})", s.header, s.score, s.kind))
            .collect::<Vec<_>>()
            .join("\n");
        table.add_row(vec![
            Cell::new(column),
            profile.map_or_else(|| dim_cell("-"), profile_cell),
            if header.is_empty() {
                dim_cell("-")
            } else {
                Cell::new(header).add_attribute(Attribute::Bold)
            },
            status_cell(state.status(column)),
            if suggestions.is_empty() {
                dim_cell("none")
            } else {
                Cell::new(suggestions)
            },
        ]);
    }
    println!("{table}");

    let summary = state.summary();
    println!(
        "{} of {} columns mapped ({} manual); {} of {} headers filled",
        summary.mapped,
        summary.total_columns,
        summary.manual,
        summary.headers_filled,
        summary.total_headers
    );
    for (header, columns) in state.conflicts() {
        eprintln!(
            "warning: '{header}' is mapped from {}; only '{}' is exported",
            columns.join(", "),
            columns[0]
        );
    }
}

pub fn print_export(outcome: &ExportOutcome) {
    println!("Wrote {}", outcome.path.display());
    let mut table = Table::new();
    table.set_header(vec![header_cell("Metric"), header_cell("Value")]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    table.add_row(vec![Cell::new("Format"), Cell::new(outcome.format)]);
    table.add_row(vec![Cell::new("Records"), Cell::new(outcome.records)]);
    table.add_row(vec![
        Cell::new("Price cells"),
        Cell::new(outcome.stats.price_fields),
    ]);
    table.add_row(vec![
        Cell::new("Unreadable prices"),
        count_cell(outcome.stats.degraded_prices, Color::Yellow),
    ]);
    println!("{table}");
}

pub fn print_rules(config: &AdminConfig) {
    if config.pricing_rules.is_empty() {
        println!("No pricing rules configured.");
        return;
    }
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Category"),
        header_cell("Margin %"),
        header_cell("Tax %"),
        header_cell("Shipping"),
        header_cell("Rates"),
    ]);
    apply_table_style(&mut table);
    for index in 1..=3 {
        align_column(&mut table, index, CellAlignment::Right);
    }
    for rule in &config.pricing_rules {
        let rates = if rule.conversion_rates.is_empty() {
            "-".to_string()
        } else {
            rule.conversion_rates
                .iter()
                .map(|(code, rate)| format!("{code} {rate}"))
                .collect::<Vec<_>>()
                .join(", ")
        };
        table.add_row(vec![
            Cell::new(&rule.category).add_attribute(Attribute::Bold),
            Cell::new(rule.margin_percent),
            Cell::new(rule.tax_percent),
            Cell::new(format!("{:.2}", rule.shipping_cost)),
            Cell::new(rates),
        ]);
    }
    println!("{table}");
}

pub fn print_registration(response: &RegistrationResponse) {
    let (label, color) = if response.success {
        ("accepted", Color::Green)
    } else {
        ("rejected", Color::Red)
    };
    let mut table = Table::new();
    apply_table_style(&mut table);
    table.add_row(vec![
        header_cell("Result"),
        Cell::new(label).fg(color).add_attribute(Attribute::Bold),
    ]);
    if let Some(id) = response.seller_id {
        table.add_row(vec![header_cell("Seller id"), Cell::new(id)]);
    }
    table.add_row(vec![header_cell("Message"), Cell::new(&response.message)]);
    println!("{table}");
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value.to_string()).fg(Color::DarkGrey)
}

fn flag_cell(enabled: bool) -> Cell {
    if enabled {
        Cell::new("✓")
            .fg(Color::Green)
            .add_attribute(Attribute::Bold)
    } else {
        dim_cell("-")
    }
}

fn profile_cell(profile: &ColumnProfile) -> Cell {
    let kind = if profile.hint.is_numeric { "numeric" } else { "text" };
    let mut lines = vec![format!(
        "{kind}, {:.0}% empty",
        profile.hint.null_ratio * 100.0
    )];
    lines.extend(profile.samples.iter().map(|sample| format!("e.g. {sample}")));
    Cell::new(lines.join("\n"))
}

fn status_cell(status: ColumnStatus) -> Cell {
    match status {
        ColumnStatus::Auto => Cell::new("auto").fg(Color::Green),
        ColumnStatus::Manual => Cell::new("manual").fg(Color::Blue),
        ColumnStatus::Unmapped => Cell::new("unmapped").fg(Color::Yellow),
    }
}

fn count_cell(count: usize, color: Color) -> Cell {
    if count > 0 {
        Cell::new(count).fg(color).add_attribute(Attribute::Bold)
    } else {
        dim_cell(count)
    }
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
