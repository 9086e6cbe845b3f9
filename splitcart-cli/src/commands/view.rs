//! Read-only views of the current list: totals, per-person split,
//! filtered item projections and the shareable text summary.

use clap::{Args, ValueEnum};
use splitcart_core::{views, ListStore, SortMode};

use crate::config::Config;

use super::OutputFormat;

#[derive(Clone, Copy, ValueEnum, Default)]
pub enum SortOrder {
    /// Insertion order
    #[default]
    None,
    /// Case-insensitive by name
    Name,
    /// Ascending by price
    Price,
}

impl From<SortOrder> for SortMode {
    fn from(order: SortOrder) -> Self {
        match order {
            SortOrder::None => SortMode::None,
            SortOrder::Name => SortMode::Name,
            SortOrder::Price => SortMode::Price,
        }
    }
}

#[derive(Args)]
pub struct TotalCommand {}

impl TotalCommand {
    pub fn run(&self, store: &ListStore) -> Result<(), Box<dyn std::error::Error>> {
        let list = store.current_list();
        println!("{}", views::format_price(views::total(&list.items)));
        Ok(())
    }
}

#[derive(Args)]
pub struct SplitCommand {
    /// Number of people to split between (defaults to the configured
    /// headcount)
    #[arg(long, short)]
    pub people: Option<i64>,
}

impl SplitCommand {
    pub fn run(&self, store: &ListStore, config: &Config) -> Result<(), Box<dyn std::error::Error>> {
        let list = store.current_list();
        let total = views::total(&list.items);
        let people = self.people.unwrap_or(config.people.value as i64);

        match views::per_person(total, people) {
            Some(share) => println!(
                "{} split {} ways: {} per person",
                views::format_price(total),
                people,
                share
            ),
            None => return Err(format!("'{}' is not a valid number of people", people).into()),
        }
        Ok(())
    }
}

#[derive(Args)]
pub struct SummaryCommand {}

impl SummaryCommand {
    pub fn run(&self, store: &ListStore) -> Result<(), Box<dyn std::error::Error>> {
        print!("{}", views::summary_text(store.current_list()));
        Ok(())
    }
}

#[derive(Args)]
pub struct ItemsCommand {
    /// Only show items whose name or category contains this text
    #[arg(long, short)]
    pub query: Option<String>,

    /// Sort order for display
    #[arg(long, short, value_enum, default_value = "none")]
    pub sort: SortOrder,

    /// Output format
    #[arg(long, short, value_enum, default_value = "text")]
    pub format: OutputFormat,
}

impl ItemsCommand {
    pub fn run(&self, store: &ListStore) -> Result<(), Box<dyn std::error::Error>> {
        let list = store.current_list();
        let query = self.query.as_deref().unwrap_or("");
        let projected = views::filter_and_sort(&list.items, query, self.sort.into());

        match self.format {
            OutputFormat::Json => {
                println!("{}", serde_json::to_string_pretty(&projected)?);
            }
            OutputFormat::Text => {
                if projected.is_empty() {
                    println!("(no items)");
                }
                for (position, item) in projected.iter().enumerate() {
                    println!("{:>3}. {}", position + 1, item);
                }
            }
        }
        Ok(())
    }
}
