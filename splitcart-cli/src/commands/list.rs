//! List management commands.

use clap::{Args, Subcommand};
use splitcart_core::{views, ConfirmPrompt, ListStore};

use crate::prompt::TerminalPrompt;

use super::{resolve_list_id, OutputFormat};

#[derive(Args)]
pub struct ListCommand {
    #[command(subcommand)]
    pub command: ListSubcommand,
}

#[derive(Subcommand)]
pub enum ListSubcommand {
    /// Create a new list and make it current
    New {
        /// List name
        name: String,
    },

    /// Show all lists and which one is current
    Show {
        /// Output format
        #[arg(long, short, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Switch the current list
    Switch {
        /// List name or id
        list: String,
    },

    /// Rename a list
    Rename {
        /// New name
        name: String,

        /// List name or id (defaults to the current list)
        #[arg(long, short)]
        list: Option<String>,
    },

    /// Delete a list (deleting the last one starts a fresh default list)
    Delete {
        /// List name or id
        list: String,

        /// Skip the confirmation prompt
        #[arg(long, short)]
        yes: bool,
    },

    /// Remove all items from a list without deleting it
    Clear {
        /// List name or id (defaults to the current list)
        #[arg(long, short)]
        list: Option<String>,

        /// Skip the confirmation prompt
        #[arg(long, short)]
        yes: bool,
    },
}

impl ListCommand {
    pub fn run(&self, store: &mut ListStore) -> Result<(), Box<dyn std::error::Error>> {
        match &self.command {
            ListSubcommand::New { name } => {
                let list = store.create_list(name);
                println!("Created list \"{}\" (now current)", list.name);
            }

            ListSubcommand::Show { format } => match format {
                OutputFormat::Json => {
                    let output = serde_json::json!({
                        "current": store.current_list_id(),
                        "lists": store.lists().iter().map(|l| serde_json::json!({
                            "id": l.id,
                            "name": l.name,
                            "items": l.items.len(),
                            "total": views::format_price(views::total(&l.items)),
                        })).collect::<Vec<_>>(),
                    });
                    println!("{}", serde_json::to_string_pretty(&output)?);
                }
                OutputFormat::Text => {
                    for list in store.lists() {
                        let marker = if list.id == store.current_list_id() {
                            "*"
                        } else {
                            " "
                        };
                        println!(
                            "{} {}  ({} items, total {})  [{}]",
                            marker,
                            list.name,
                            list.items.len(),
                            views::format_price(views::total(&list.items)),
                            list.id
                        );
                    }
                }
            },

            ListSubcommand::Switch { list } => match resolve_list_id(store, list) {
                Some(id) => {
                    store.set_current(&id);
                    println!("Current list: {}", store.current_list().name);
                }
                None => return Err(format!("No list matching '{}'", list).into()),
            },

            ListSubcommand::Rename { name, list } => {
                let id = self.target_id(store, list.as_deref())?;
                store.rename_list(&id, name)?;
                let renamed = store.find_list(&id).map(|l| l.name.clone());
                println!("Renamed to \"{}\"", renamed.unwrap_or_default());
            }

            ListSubcommand::Delete { list, yes } => {
                let id = self.target_id(store, Some(list))?;
                let name = store
                    .find_list(&id)
                    .map(|l| l.name.clone())
                    .unwrap_or_default();

                let mut prompt = TerminalPrompt::new(*yes);
                if !prompt.confirm(&format!("Delete list \"{}\"?", name)) {
                    println!("Canceled.");
                    return Ok(());
                }

                store.delete_list(&id)?;
                println!("Deleted \"{}\"", name);
            }

            ListSubcommand::Clear { list, yes } => {
                let id = self.target_id(store, list.as_deref())?;
                let name = store
                    .find_list(&id)
                    .map(|l| l.name.clone())
                    .unwrap_or_default();

                let mut prompt = TerminalPrompt::new(*yes);
                if !prompt.confirm(&format!("Remove all items from \"{}\"?", name)) {
                    println!("Canceled.");
                    return Ok(());
                }

                store.clear_items(&id)?;
                println!("Cleared \"{}\"", name);
            }
        }

        Ok(())
    }

    /// Resolve an optional list reference, defaulting to the current list.
    fn target_id(
        &self,
        store: &ListStore,
        reference: Option<&str>,
    ) -> Result<String, Box<dyn std::error::Error>> {
        match reference {
            None => Ok(store.current_list().id.clone()),
            Some(r) => {
                resolve_list_id(store, r).ok_or_else(|| format!("No list matching '{}'", r).into())
            }
        }
    }
}
