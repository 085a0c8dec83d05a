//! Terminal output: colored status lines and tables, scoped to the one
//! format `pub` actually needs — human-readable, since there's no JSON/YAML
//! consumer for this CLI.
#![allow(clippy::print_stdout)]

use colored::Colorize;
use tabled::{Table, Tabled};

/// Writes colored status lines and tables to stdout/stderr.
#[derive(Debug, Clone, Copy, Default)]
pub struct OutputManager {
    use_color: bool,
}

impl OutputManager {
    /// Builds an output manager; colors are suppressed when `use_color` is
    /// false (e.g. `NO_COLOR` set, or output isn't a TTY).
    #[must_use]
    pub fn new(use_color: bool) -> Self {
        Self { use_color }
    }

    /// A section heading.
    pub fn section(&self, title: &str) {
        if self.use_color {
            println!("\n{}", title.bold().cyan());
        } else {
            println!("\n{title}");
        }
    }

    /// A successful-operation line, prefixed with a green checkmark.
    pub fn success(&self, message: &str) {
        if self.use_color {
            println!("{} {message}", "✓".green().bold());
        } else {
            println!("[ok] {message}");
        }
    }

    /// A neutral informational line.
    pub fn info(&self, message: &str) {
        println!("{message}");
    }

    /// A warning line, printed to stdout (advisory, not a failure).
    pub fn warn(&self, message: &str) {
        if self.use_color {
            println!("{} {message}", "!".yellow().bold());
        } else {
            println!("[warn] {message}");
        }
    }

    /// A failure line, printed to stderr.
    pub fn error(&self, message: &str) {
        if self.use_color {
            eprintln!("{} {message}", "✗".red().bold());
        } else {
            eprintln!("[error] {message}");
        }
    }

    /// Renders `rows` as a table, or a one-line "nothing to show" message
    /// when empty.
    pub fn table<T: Tabled>(&self, rows: Vec<T>, empty_message: &str) {
        if rows.is_empty() {
            self.info(empty_message);
            return;
        }
        println!("{}", Table::new(rows));
    }
}
