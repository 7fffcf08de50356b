use colored::Colorize;
use prettytable::{format, Table};

use crate::cli::HistoryCommand;
use crate::error::Result;
use crate::session::SessionManager;

use super::enter;

const PREVIEW_CHARS: usize = 60;

/// First line of `text`, shortened to `max` characters
fn preview(text: &str, max: usize) -> String {
    let line = text.lines().find(|l| !l.trim().is_empty()).unwrap_or("").trim();
    if line.chars().count() > max {
        let cut: String = line.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", cut)
    } else {
        line.to_string()
    }
}

/// Handle history commands
pub async fn handle_history(manager: &SessionManager, command: HistoryCommand) -> Result<()> {
    match command {
        HistoryCommand::List { kind, full } => {
            enter(manager, kind).await;
            let entries = manager.history().await;

            if entries.is_empty() {
                println!("{}", format!("No {} history found.", kind).yellow());
                return Ok(());
            }

            if full {
                for (i, entry) in entries.iter().enumerate() {
                    println!(
                        "\n{} {}",
                        format!("#{}", i + 1).cyan().bold(),
                        entry.timestamp.dimmed()
                    );
                    if !entry.input.is_empty() {
                        println!("{} {}", "Input:".bold(), entry.input);
                    }
                    println!("{}\n", entry.content);
                }
                return Ok(());
            }

            let mut table = Table::new();
            table.set_format(*format::consts::FORMAT_BORDERS_ONLY);
            table.add_row(prettytable::row![
                "#".bold(),
                "When".bold(),
                "Input".bold(),
                "Output".bold()
            ]);

            for (i, entry) in entries.iter().enumerate() {
                table.add_row(prettytable::row![
                    (i + 1).to_string().cyan(),
                    entry.timestamp,
                    preview(&entry.input, 30),
                    preview(&entry.content, PREVIEW_CHARS)
                ]);
            }

            println!("\n{} History:", kind.label());
            table.printstd();
            println!();
            println!(
                "Use {} to see full entries.",
                format!("teachassist history list --kind {} --full", kind).cyan()
            );
            println!();
        }
        HistoryCommand::Clear { kind } => {
            enter(manager, kind).await;
            manager.clear_history().await;
            println!("{}", format!("Cleared {} history", kind).green());
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preview_short_text_unchanged() {
        assert_eq!(preview("Sophie reads well", 60), "Sophie reads well");
    }

    #[test]
    fn test_preview_uses_first_non_blank_line() {
        assert_eq!(preview("\n  \n## Report\nbody", 60), "## Report");
    }

    #[test]
    fn test_preview_truncates_on_char_boundary() {
        let text = "é".repeat(20);
        let short = preview(&text, 10);
        assert_eq!(short, format!("{}...", "é".repeat(7)));
    }
}
