//! Terminal output helpers.

use cinema_core::notify::{NoticeLevel, Notifier};
use colored::Colorize;
use serde::Serialize;

/// Prints notices to stderr so stdout carries only rendered results.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn notify(&self, level: NoticeLevel, message: &str) {
        match level {
            NoticeLevel::Info => eprintln!("{}", message.bright_blue()),
            NoticeLevel::Success => eprintln!("{} {}", "✓".green(), message),
            NoticeLevel::Error => eprintln!("{} {}", "✗".red(), message.red()),
        }
        tracing::debug!("[Notice] {:?}: {}", level, message);
    }
}

/// Chooses between rendered lines and raw JSON.
#[derive(Debug, Clone, Copy)]
pub struct Output {
    pub json: bool,
}

impl Output {
    pub fn emit<T: Serialize + ?Sized>(&self, value: &T, lines: Vec<String>) -> anyhow::Result<()> {
        if self.json {
            println!("{}", serde_json::to_string_pretty(value)?);
        } else {
            for line in lines {
                println!("{}", line);
            }
        }
        Ok(())
    }

    /// A one-line status, printed only in text mode.
    pub fn status(&self, message: impl std::fmt::Display) {
        if !self.json {
            println!("{}", message);
        }
    }
}
