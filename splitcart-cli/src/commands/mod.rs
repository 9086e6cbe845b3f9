mod config_cmd;
mod item;
mod list;
mod share;
mod view;

pub use config_cmd::ConfigCommand;
pub use item::ItemCommand;
pub use list::ListCommand;
pub use share::{ExportCommand, ImportCommand};
pub use view::{ItemsCommand, SplitCommand, SummaryCommand, TotalCommand};

use clap::ValueEnum;
use splitcart_core::ListStore;

#[derive(Clone, ValueEnum, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Resolve a list reference given on the command line: exact id first,
/// then case-insensitive name match.
pub fn resolve_list_id(store: &ListStore, reference: &str) -> Option<String> {
    if let Some(list) = store.find_list(reference) {
        return Some(list.id.clone());
    }
    store
        .lists()
        .iter()
        .find(|l| l.name.eq_ignore_ascii_case(reference.trim()))
        .map(|l| l.id.clone())
}
