use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use shoplink_model::{OrderField, OrderRecord};
use shoplink_transform::PipelineStats;

use crate::commands::CleanResult;

pub fn print_summary(result: &CleanResult) {
    println!("Input: {} ({})", result.input.display(), result.format);
    println!("{}", stats_table(&result.output.stats));
    if let Some(table) = preview_table(&result.output.records, result.preview) {
        println!();
        let shown = result.preview.min(result.output.records.len());
        println!("Preview ({shown} of {}):", result.output.records.len());
        println!("{table}");
    }
}

fn stats_table(stats: &PipelineStats) -> Table {
    let mut table = Table::new();
    table.set_header(vec![header_cell("Stage"), header_cell("Records")]);
    apply_summary_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    table.add_row(vec![Cell::new("Input"), Cell::new(stats.input_count)]);
    table.add_row(vec![
        Cell::new("Rejected"),
        count_cell(stats.rejected_count, Color::Red),
    ]);
    table.add_row(vec![
        Cell::new("Reconstructed"),
        count_cell(stats.reconstructed_count, Color::Cyan),
    ]);
    table.add_row(vec![
        Cell::new("Duplicates"),
        count_cell(stats.duplicate_count, Color::Yellow),
    ]);
    table.add_row(vec![
        Cell::new("Output")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        Cell::new(stats.output_count).add_attribute(Attribute::Bold),
    ]);
    table
}

fn preview_table(records: &[OrderRecord], limit: usize) -> Option<Table> {
    if limit == 0 || records.is_empty() {
        return None;
    }
    let mut table = Table::new();
    table.set_header(
        OrderField::ALL
            .iter()
            .map(|field| header_cell(field.as_str()))
            .collect::<Vec<_>>(),
    );
    apply_table_style(&mut table);
    for field in OrderField::NUMERIC {
        if let Some(index) = OrderField::ALL.iter().position(|candidate| *candidate == field) {
            align_column(&mut table, index, CellAlignment::Right);
        }
    }
    for record in records.iter().take(limit) {
        table.add_row(
            OrderField::ALL
                .iter()
                .map(|field| preview_cell(record, *field))
                .collect::<Vec<_>>(),
        );
    }
    Some(table)
}

fn preview_cell(record: &OrderRecord, field: OrderField) -> Cell {
    let text = match field {
        OrderField::Price => format!("{:.2}", record.price()),
        OrderField::Total => format!("{:.2}", record.total()),
        _ => record.value(field).to_string(),
    };
    Cell::new(text)
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
        .set_width(60);
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
        Cell::new(count).fg(Color::DarkGrey)
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label).add_attribute(Attribute::Bold)
}
