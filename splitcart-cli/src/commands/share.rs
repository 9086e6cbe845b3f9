//! Share token export and import.

use clap::{Args, ValueEnum};
use splitcart_core::{
    codec, FixedResolver, ImportOutcome, ListStore, MergeDecision, MergeResolver, SharePayload,
};

use crate::prompt::TerminalPrompt;

/// Non-interactive conflict policy for `import --resolve`.
#[derive(Clone, Copy, ValueEnum)]
pub enum ResolvePolicy {
    /// Overwrite existing items with the imported values
    Merge,
    /// Keep both the existing and the imported entry
    KeepBoth,
}

#[derive(Args)]
pub struct ExportCommand {}

impl ExportCommand {
    pub fn run(&self, store: &ListStore) -> Result<(), Box<dyn std::error::Error>> {
        let list = store.current_list();
        if list.items.is_empty() {
            return Err(format!("\"{}\" has no items to share", list.name).into());
        }
        let token = codec::encode(&SharePayload::from(list));
        println!("{}", token);
        Ok(())
    }
}

#[derive(Args)]
pub struct ImportCommand {
    /// Share code produced by `export`
    pub token: String,

    /// Resolve every conflict the same way instead of prompting
    #[arg(long, value_enum)]
    pub resolve: Option<ResolvePolicy>,
}

impl ImportCommand {
    pub fn run(&self, store: &mut ListStore) -> Result<(), Box<dyn std::error::Error>> {
        let payload = codec::decode(&self.token)?;
        println!(
            "Importing \"{}\" ({} items) into \"{}\"",
            payload.name,
            payload.items.len(),
            store.current_list().name
        );

        let outcome = match self.resolve {
            Some(ResolvePolicy::Merge) => {
                store.import_payload(&payload, &mut FixedResolver(MergeDecision::Merge))
            }
            Some(ResolvePolicy::KeepBoth) => {
                store.import_payload(&payload, &mut FixedResolver(MergeDecision::KeepBoth))
            }
            None => {
                let mut prompt = TerminalPrompt::new(false);
                store.import_payload(&payload, &mut prompt as &mut dyn MergeResolver)
            }
        };

        match outcome {
            ImportOutcome::Completed {
                added,
                merged,
                kept_both,
            } => {
                println!(
                    "Import complete: {} added, {} merged, {} kept as duplicates",
                    added, merged, kept_both
                );
            }
            ImportOutcome::Aborted => {
                println!("Import canceled; the list was not changed.");
            }
        }

        Ok(())
    }
}
