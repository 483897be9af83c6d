//! Text and JSON rendering of estimates and comparisons

use crate::breakdown::GenericCostBreakdown;
use crate::comparison::{CheaperOption, ComparisonResult};
use crate::pricing::SimplifiedPricing;
use crate::utils::{format_cost, format_percentage};
use comfy_table::{Cell, Color, Table};
use console::style;

/// Width of the share bar in breakdown tables
const BAR_WIDTH: usize = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

fn bar(cost: f64, max_cost: f64) -> String {
    if cost <= 0.0 || max_cost <= 0.0 {
        return String::new();
    }
    let filled = ((cost / max_cost) * BAR_WIDTH as f64).round() as usize;
    "█".repeat(filled.clamp(1, BAR_WIDTH))
}

/// One breakdown as a table: label, cost, share bar, total row
pub fn breakdown_table(breakdown: &GenericCostBreakdown) -> Table {
    let mut table = Table::new();
    table.set_header(vec!["Item", "Monthly Cost", ""]);

    let max_cost = breakdown.max_item_cost();
    for item in &breakdown.items {
        let label = match &item.description {
            Some(description) => format!("{}\n{}", item.label, description),
            None => item.label.clone(),
        };
        table.add_row(vec![
            Cell::new(label),
            Cell::new(format_cost(item.cost)),
            Cell::new(bar(item.cost, max_cost)).fg(Color::Cyan),
        ]);
    }
    table.add_row(vec![
        Cell::new("Total"),
        Cell::new(format_cost(breakdown.total)).fg(Color::Green),
        Cell::new(""),
    ]);
    table
}

/// Both breakdowns side by side, item by item
pub fn comparison_table(result: &ComparisonResult, first_label: &str, second_label: &str) -> Table {
    let mut table = Table::new();
    table.set_header(vec!["Item", first_label, second_label]);

    let rows = result.first.items.iter().zip(result.second.items.iter());
    for (first, second) in rows {
        table.add_row(vec![
            Cell::new(&first.label),
            Cell::new(format_cost(first.cost)),
            Cell::new(format_cost(second.cost)),
        ]);
    }

    let highlight = |option: CheaperOption, total: f64| {
        let cell = Cell::new(format_cost(total));
        if result.cheaper_option == Some(option) {
            cell.fg(Color::Green)
        } else {
            cell
        }
    };
    table.add_row(vec![
        Cell::new("Total"),
        highlight(CheaperOption::First, result.first.total),
        highlight(CheaperOption::Second, result.second.total),
    ]);
    table
}

/// The one-line verdict under a comparison
pub fn verdict(result: &ComparisonResult, first_label: &str, second_label: &str) -> String {
    match result.cheaper_option {
        Some(option) => {
            let winner = match option {
                CheaperOption::First => first_label,
                CheaperOption::Second => second_label,
            };
            format!(
                "{} is More Cost-Effective. Save {}/month ({} savings)",
                winner,
                format_cost(result.savings),
                format_percentage(result.savings_percentage)
            )
        }
        None => "Both configurations cost the same".to_string(),
    }
}

pub fn print_estimate(title: &str, breakdown: &GenericCostBreakdown) {
    println!("{}", style(title).bold());
    println!("{}", breakdown_table(breakdown));
}

pub fn print_comparison(title: &str, result: &ComparisonResult, first_label: &str, second_label: &str) {
    println!("{}", style(title).bold());
    println!("{}", "=".repeat(title.len()));
    println!();
    println!("{}", comparison_table(result, first_label, second_label));
    println!();
    let line = verdict(result, first_label, second_label);
    if result.cheaper_option.is_some() {
        println!("{}", style(line).green());
    } else {
        println!("{}", style(line).dim());
    }
}

/// Snapshot entries as a table
pub fn pricing_table(items: &[&SimplifiedPricing]) -> Table {
    let mut table = Table::new();
    table.set_header(vec!["Usage Type", "Operation", "Region", "Price", "Unit"]);
    for item in items {
        table.add_row(vec![
            Cell::new(item.usage_type().unwrap_or("-")),
            Cell::new(item.operation().unwrap_or("-")),
            Cell::new(&item.region),
            Cell::new(&item.price_per_unit),
            Cell::new(&item.unit),
        ]);
    }
    table
}
