//! Item management commands. Items are always edited on the current
//! list; edits replace the whole record.

use clap::{Args, Subcommand};
use splitcart_core::{Item, ListStore};

use crate::prompt::TerminalPrompt;

#[derive(Args)]
pub struct ItemCommand {
    #[command(subcommand)]
    pub command: ItemSubcommand,
}

#[derive(Subcommand)]
pub enum ItemSubcommand {
    /// Add an item to the current list
    Add {
        /// Item name
        name: String,

        /// Price (non-negative)
        price: f64,

        /// Category tag
        #[arg(long, short)]
        category: Option<String>,
    },

    /// Edit an item by its position (1-based, as shown by `items`)
    ///
    /// With no field flags the new values are prompted for
    /// interactively; canceling leaves the item untouched.
    Edit {
        /// Item position, 1-based
        position: usize,

        /// New name
        #[arg(long, short)]
        name: Option<String>,

        /// New price
        #[arg(long, short)]
        price: Option<f64>,

        /// New category tag
        #[arg(long, short)]
        category: Option<String>,
    },

    /// Remove an item by its position (1-based)
    Remove {
        /// Item position, 1-based
        position: usize,
    },
}

impl ItemCommand {
    pub fn run(&self, store: &mut ListStore) -> Result<(), Box<dyn std::error::Error>> {
        let list_id = store.current_list().id.clone();

        match &self.command {
            ItemSubcommand::Add {
                name,
                price,
                category,
            } => {
                let item = Item::new(name.clone(), *price, category.clone().unwrap_or_default())?;
                let display = item.to_string();
                store.add_item(&list_id, item)?;
                println!("Added {}", display);
            }

            ItemSubcommand::Edit {
                position,
                name,
                price,
                category,
            } => {
                let index = position.checked_sub(1).ok_or("Positions start at 1")?;
                let current = store
                    .current_list()
                    .items
                    .get(index)
                    .cloned()
                    .ok_or_else(|| format!("No item at position {}", position))?;

                let replacement = if name.is_none() && price.is_none() && category.is_none() {
                    match self.prompt_replacement(&current)? {
                        Some(item) => item,
                        None => {
                            println!("Canceled; item unchanged.");
                            return Ok(());
                        }
                    }
                } else {
                    Item::new(
                        name.clone().unwrap_or_else(|| current.name.clone()),
                        price.unwrap_or(current.price),
                        category.clone().unwrap_or_else(|| current.category.clone()),
                    )?
                };

                let display = replacement.to_string();
                store.update_item(&list_id, index, replacement)?;
                println!("Updated to {}", display);
            }

            ItemSubcommand::Remove { position } => {
                let index = position.checked_sub(1).ok_or("Positions start at 1")?;
                let removed = store
                    .current_list()
                    .items
                    .get(index)
                    .map(|i| i.name.clone())
                    .ok_or_else(|| format!("No item at position {}", position))?;

                store.remove_item(&list_id, index)?;
                println!("Removed \"{}\"", removed);
            }
        }

        Ok(())
    }

    /// Ask for every field of the replacement record. `None` when the
    /// user cancels; no partial update is ever applied.
    fn prompt_replacement(
        &self,
        current: &Item,
    ) -> Result<Option<Item>, Box<dyn std::error::Error>> {
        let prompt = TerminalPrompt::new(false);

        let name = match prompt.edit_field("Name", &current.name) {
            Some(n) => n,
            None => return Ok(None),
        };
        let price_text = match prompt.edit_field("Price", &format!("{}", current.price)) {
            Some(p) => p,
            None => return Ok(None),
        };
        let price: f64 = price_text
            .parse()
            .map_err(|_| format!("'{}' is not a valid price", price_text))?;
        let category = match prompt.edit_field("Category", &current.category) {
            Some(c) => c,
            None => return Ok(None),
        };

        Ok(Some(Item::new(name, price, category)?))
    }
}
