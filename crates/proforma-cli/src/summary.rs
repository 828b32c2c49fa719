use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use proforma_cli::types::AnalysisResult;
use proforma_model::{BasisTotals, ProfitBasis, Scenario, Summary};
use proforma_report::HypotheticalResult;

pub fn print_summary(result: &AnalysisResult) {
    let summary = &result.summary;
    println!("Sheet: {}", result.source.display());
    println!(
        "Scenario: {} ({} of {} rows analyzed)",
        scenario_label(summary.scenario),
        summary.record_count,
        summary.input_count
    );
    if let Some(path) = &result.outputs.extended_csv {
        println!("Extended table: {}", path.display());
    }
    if let Some(path) = &result.outputs.summary_json {
        println!("Summary: {}", path.display());
    }
    if summary.is_empty() {
        println!("No drugs left to analyze.");
        return;
    }
    print_totals_table(summary);
    print_costs_table(summary);
    print_top_drugs(summary);
    print_coercions(result);
}

pub fn print_hypothetical(result: &HypotheticalResult) {
    let mut table = Table::new();
    table.set_header(vec![header_cell("Metric"), header_cell("Value")]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    table.add_row(vec![Cell::new("Revenue"), money_cell(result.revenue)]);
    table.add_row(vec![Cell::new("Profit"), money_cell(result.profit)]);
    table.add_row(vec![Cell::new("Margin"), margin_cell(result.margin_pct)]);
    println!("{table}");
}

fn print_totals_table(summary: &Summary) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Metric"),
        header_cell(ProfitBasis::Asp.label()),
        header_cell(ProfitBasis::Awp.label()),
    ]);
    apply_summary_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    align_column(&mut table, 2, CellAlignment::Right);

    table.add_row(basis_row("Dispense value", summary, |t| {
        money_cell(t.total_dispense_value)
    }));
    if summary.asp.revenue.is_some() || summary.awp.revenue.is_some() {
        table.add_row(basis_row("Revenue", summary, |t| optional_money_cell(t.revenue)));
    }
    table.add_row(basis_row("Scenario profit", summary, |t| {
        money_cell(t.scenario_profit)
    }));
    table.add_row(basis_row("Revenue share", summary, |t| {
        money_cell(t.revenue_share_amount)
    }));
    table.add_row(basis_row("Net profit", summary, |t| {
        money_cell(t.net_profit).add_attribute(Attribute::Bold)
    }));
    table.add_row(basis_row("Margin", summary, |t| margin_cell(t.overall_margin_pct)));
    println!("{table}");
}

fn basis_row(label: &str, summary: &Summary, value: impl Fn(&BasisTotals) -> Cell) -> Vec<Cell> {
    vec![Cell::new(label), value(&summary.asp), value(&summary.awp)]
}

fn print_costs_table(summary: &Summary) {
    let costs = &summary.costs;
    let mut table = Table::new();
    table.set_header(vec![header_cell("Cost"), header_cell("Total")]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    table.add_row(vec![Cell::new("Prescriptions"), Cell::new(format!("{}", summary.total_rx))]);
    table.add_row(vec![Cell::new("Courier"), money_cell(costs.courier)]);
    table.add_row(vec![Cell::new("Miscellaneous"), money_cell(costs.misc)]);
    table.add_row(vec![Cell::new("Variable"), money_cell(costs.variable)]);
    if summary.scenario == Scenario::SelfStaffed {
        table.add_row(vec![Cell::new("Staffing"), money_cell(costs.staffing)]);
    }
    if let Some(cogs) = costs.cogs {
        table.add_row(vec![Cell::new("Cost of goods"), money_cell(cogs)]);
    }
    println!("{table}");
}

fn print_top_drugs(summary: &Summary) {
    if summary.top_drugs.is_empty() {
        return;
    }
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("#"),
        header_cell("Drug"),
        header_cell(&format!("{} profit", summary.ranking_basis.label())),
        header_cell("Rx"),
        header_cell("Rows"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Right);
    align_column(&mut table, 2, CellAlignment::Right);
    align_column(&mut table, 3, CellAlignment::Right);
    align_column(&mut table, 4, CellAlignment::Right);
    for drug in &summary.top_drugs {
        table.add_row(vec![
            dim_cell(drug.rank),
            Cell::new(&drug.name).fg(Color::Blue),
            money_cell(drug.total_profit),
            Cell::new(format!("{}", drug.rx_count)),
            dim_cell(drug.record_count),
        ]);
    }
    println!();
    println!("Top drugs:");
    println!("{table}");
}

fn print_coercions(result: &AnalysisResult) {
    let mut notes = Vec::new();
    for (field, count) in &result.coercions.counts {
        notes.push(format!("{count} {field} cell(s) coerced to defaults"));
    }
    if result.summary.filtered_out > 0 {
        notes.push(format!(
            "{} row(s) removed by the profitable-only filter",
            result.summary.filtered_out
        ));
    }
    if result.summary.missing_dose_excluded > 0 {
        notes.push(format!(
            "{} row(s) excluded for missing dose",
            result.summary.missing_dose_excluded
        ));
    }
    if notes.is_empty() {
        return;
    }
    eprintln!("Notes:");
    for note in notes {
        eprintln!("- {note}");
    }
}

fn scenario_label(scenario: Scenario) -> &'static str {
    match scenario {
        Scenario::Managed => "managed",
        Scenario::SelfStaffed => "self-staffed",
    }
}

fn money_cell(value: f64) -> Cell {
    let cell = Cell::new(format_money(value));
    if value < 0.0 {
        cell.fg(Color::Red)
    } else {
        cell
    }
}

fn optional_money_cell(value: Option<f64>) -> Cell {
    match value {
        Some(value) => money_cell(value),
        None => dim_cell("-"),
    }
}

fn margin_cell(value: Option<f64>) -> Cell {
    match value {
        Some(value) => Cell::new(format!("{value:.1}%")),
        None => dim_cell("n/a"),
    }
}

/// `$1,234.56`, with a leading minus for losses.
fn format_money(value: f64) -> String {
    let cents = format!("{:.2}", value.abs());
    let (whole, fraction) = cents.split_once('.').unwrap_or((cents.as_str(), "00"));
    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (index, digit) in whole.chars().enumerate() {
        if index > 0 && (whole.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    let sign = if value < 0.0 && cents != "0.00" { "-" } else { "" };
    format!("{sign}${grouped}.{fraction}")
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
        .set_width(120);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
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
