//! Terminal implementations of the core's collaborator contracts.

use std::io::{self, BufRead, Write};

use splitcart_core::{ConfirmPrompt, Item, MergeDecision, MergeResolver, Notice, NoticeKind};

/// Print a notice from the core to the terminal.
pub fn print_notice(notice: &Notice) {
    match notice.kind {
        NoticeKind::Info => println!("{}", notice.text),
        NoticeKind::Error => eprintln!("Warning: {}", notice.text),
    }
}

/// Interactive stdin/stdout prompt.
pub struct TerminalPrompt {
    /// Answer yes to every confirmation without asking.
    pub assume_yes: bool,
}

impl TerminalPrompt {
    pub fn new(assume_yes: bool) -> Self {
        Self { assume_yes }
    }

    /// Read one trimmed line, `None` on EOF.
    fn read_line(&self) -> Option<String> {
        let mut line = String::new();
        let stdin = io::stdin();
        match stdin.lock().read_line(&mut line) {
            Ok(0) | Err(_) => None,
            Ok(_) => Some(line.trim().to_string()),
        }
    }

    /// Prompt for a field value, showing the current one.
    ///
    /// Empty input keeps the current value; "q" or EOF cancels the
    /// whole edit.
    pub fn edit_field(&self, label: &str, current: &str) -> Option<String> {
        print!("{} [{}] (enter keeps, q cancels): ", label, current);
        let _ = io::stdout().flush();
        let line = self.read_line()?;
        if line.eq_ignore_ascii_case("q") {
            return None;
        }
        if line.is_empty() {
            Some(current.to_string())
        } else {
            Some(line)
        }
    }
}

impl ConfirmPrompt for TerminalPrompt {
    fn confirm(&mut self, message: &str) -> bool {
        if self.assume_yes {
            return true;
        }
        print!("{} [y/N]: ", message);
        let _ = io::stdout().flush();
        match self.read_line() {
            Some(answer) => matches!(answer.to_lowercase().as_str(), "y" | "yes"),
            None => false,
        }
    }
}

impl MergeResolver for TerminalPrompt {
    fn resolve(&mut self, existing: &Item, incoming: &Item) -> Option<MergeDecision> {
        println!("Conflict: \"{}\" is already on the list", existing.name);
        println!("  existing: {}", existing);
        println!("  imported: {}", incoming);

        loop {
            print!("[m]erge imported values / [k]eep both / [c]ancel import: ");
            let _ = io::stdout().flush();
            match self.read_line()?.to_lowercase().as_str() {
                "m" | "merge" => return Some(MergeDecision::Merge),
                "k" | "keep" => return Some(MergeDecision::KeepBoth),
                "c" | "cancel" => return None,
                _ => println!("Please answer m, k or c."),
            }
        }
    }
}
