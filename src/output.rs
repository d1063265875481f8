//! Table and JSON output for the command line front end.

use serde::Serialize;
use tabled::{Table, Tabled};

use crate::core::board::{Counts, ItemView};
use crate::core::model::Priority;

/// Output format selection
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable table
    #[default]
    Table,
    /// JSON output
    Json,
}

#[derive(Tabled)]
struct ItemRow {
    #[tabled(rename = "ID")]
    id: i64,
    #[tabled(rename = "Application")]
    application: String,
    #[tabled(rename = "From")]
    sender: String,
    #[tabled(rename = "Description")]
    description: String,
    #[tabled(rename = "Status")]
    status: &'static str,
    #[tabled(rename = "Alerts")]
    alerts: String,
}

impl From<&ItemView> for ItemRow {
    fn from(view: &ItemView) -> Self {
        let application = if view.pulse {
            format!("(!) {}", view.app_name)
        } else {
            view.app_name.clone()
        };
        Self {
            id: view.id,
            application,
            sender: view.sender.clone(),
            description: view.description.clone(),
            status: view.badge(),
            alerts: format!("{} / {}", view.alerts_fired, view.ceiling),
        }
    }
}

#[derive(Tabled)]
struct TierRow {
    #[tabled(rename = "Tier")]
    tier: String,
    #[tabled(rename = "Active")]
    active: usize,
}

/// Print one priority list
pub fn print_items(priority: Priority, items: &[ItemView], format: OutputFormat) {
    match format {
        OutputFormat::Table => {
            if items.is_empty() {
                println!("No active {} intimations.", priority);
            } else {
                let rows: Vec<ItemRow> = items.iter().map(ItemRow::from).collect();
                println!("{}", Table::new(rows));
            }
        }
        OutputFormat::Json => print_json(&items),
    }
}

/// Print the per-tier counters
pub fn print_dashboard(counts: &Counts, format: OutputFormat) {
    match format {
        OutputFormat::Table => {
            let rows: Vec<TierRow> = Priority::all()
                .iter()
                .map(|p| TierRow {
                    tier: format!("{} ({})", p.display_name(), p),
                    active: counts.get(*p),
                })
                .collect();
            println!("{}", Table::new(rows));
        }
        OutputFormat::Json => print_json(counts),
    }
}

/// Print a single item in the selected format
pub fn print_item<T: Serialize + std::fmt::Debug>(item: &T, format: OutputFormat) {
    match format {
        OutputFormat::Table => println!("{:#?}", item),
        OutputFormat::Json => print_json(item),
    }
}

fn print_json<T: Serialize + ?Sized>(value: &T) {
    let json = serde_json::to_string_pretty(value).unwrap_or_else(|_| "null".to_string());
    println!("{}", json);
}

/// Print a success message
pub fn print_success(msg: &str) {
    println!("✓ {}", msg);
}

/// Print a warning message
pub fn print_warning(msg: &str) {
    println!("⚠ {}", msg);
}

/// Print a key-value pair
pub fn print_kv(key: &str, value: &str) {
    println!("  {:<24} {}", format!("{}:", key), value);
}
