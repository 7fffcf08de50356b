//! Drafting commands: generate, refine, show, clear and presets

use colored::Colorize;
use prettytable::{format, Table};
use std::path::{Path, PathBuf};

use crate::error::{Result, TeachAssistError};
use crate::kind::AssistantKind;
use crate::prompts::RefinementPreset;
use crate::session::SessionManager;

use super::{enter, print_heading, report_outcome};

/// Notes from `--input`, or from the file given by `--file`
pub fn read_notes(input: Option<String>, file: Option<&Path>) -> Result<String> {
    match (input, file) {
        (Some(text), _) => Ok(text),
        (None, Some(path)) => {
            tracing::debug!("Reading notes from {}", path.display());
            Ok(std::fs::read_to_string(path).map_err(TeachAssistError::from)?)
        }
        (None, None) => Err(TeachAssistError::InputRequired.into()),
    }
}

/// Generate a first draft and print it
pub async fn run_generate(
    manager: &SessionManager,
    kind: AssistantKind,
    input: Option<String>,
    file: Option<PathBuf>,
) -> Result<()> {
    let notes = read_notes(input, file.as_deref())?;
    enter(manager, kind).await;
    manager.set_input(notes.as_str()).await;

    println!("{}", "Generating...".dimmed());
    let outcome = manager.generate(&notes).await?;
    if let Some(draft) = report_outcome(outcome, |g| g) {
        print_heading(kind);
        println!("{}\n", draft.content);
    }
    Ok(())
}

/// Refine the current draft with presets and/or a custom instruction
pub async fn run_refine(
    manager: &SessionManager,
    kind: AssistantKind,
    presets: Vec<RefinementPreset>,
    custom: Option<String>,
) -> Result<()> {
    enter(manager, kind).await;

    println!("{}", "Refining...".dimmed());
    let outcome = manager.refine_with(&presets, custom.as_deref()).await?;
    if let Some(draft) = report_outcome(outcome, |g| g) {
        print_heading(kind);
        println!("{}\n", draft.content);
    }
    Ok(())
}

/// Print the current draft
pub async fn run_show(manager: &SessionManager, kind: AssistantKind) -> Result<()> {
    enter(manager, kind).await;
    let view = manager.snapshot().await;

    match &view.session.generated_output {
        Some(output) => {
            print_heading(kind);
            println!("{}\n", output);
            let rounds = view.session.transcript.len() / 2;
            if rounds > 1 {
                println!(
                    "{}",
                    format!("({} refinements applied)", rounds - 1).dimmed()
                );
            }
        }
        None => println!("{}", format!("No {} draft yet.", kind).yellow()),
    }
    Ok(())
}

/// Discard the current draft
pub async fn run_clear(manager: &SessionManager, kind: AssistantKind) -> Result<()> {
    enter(manager, kind).await;
    manager.clear().await;
    println!("{}", format!("Cleared the {} draft.", kind).green());
    Ok(())
}

/// List the presets offered for `kind`
pub fn run_presets(kind: AssistantKind) -> Result<()> {
    let presets = RefinementPreset::for_kind(kind);
    if presets.is_empty() {
        println!("{}", format!("{} has no refinement presets.", kind.label()).yellow());
        return Ok(());
    }

    let mut table = Table::new();
    table.set_format(*format::consts::FORMAT_BORDERS_ONLY);
    table.add_row(prettytable::row!["Preset".bold(), "Button".bold(), "Instruction".bold()]);
    for preset in presets {
        table.add_row(prettytable::row![
            preset.id().cyan(),
            preset.label(),
            preset.instruction()
        ]);
    }

    println!("\nRefinement presets for {}:", kind.label());
    table.printstd();
    println!();
    println!(
        "Use {} to apply one or more.",
        format!("teachassist refine --kind {} --preset <ID>", kind).cyan()
    );
    Ok(())
}
