/*!
Command handlers for the CLI

Each handler activates the requested assistant kind on the shared
[`SessionManager`] and then runs one operation against it:

- `draft`   - generate, refine, show, clear and list presets
- `history` - list or clear generation history
- `assess`  - handwriting assessment from an image file
*/

pub mod assess;
pub mod draft;
pub mod history;

use colored::Colorize;

use crate::kind::AssistantKind;
use crate::session::{Generated, Outcome, SessionManager};

/// Print the draft of an applied outcome, or explain why nothing changed
///
/// Returns the applied value so callers can print more.
pub(crate) fn report_outcome<T>(
    outcome: Outcome<T>,
    generated: impl Fn(&T) -> &Generated,
) -> Option<T> {
    match outcome {
        Outcome::Applied(value) => {
            let draft = generated(&value);
            if draft.storage_warning {
                eprintln!(
                    "{}",
                    "Warning: the draft could not be saved and may be lost on restart.".yellow()
                );
            }
            Some(value)
        }
        Outcome::Discarded(kind) => {
            eprintln!(
                "{}",
                format!("The {} session changed before the response arrived; nothing was applied.", kind)
                    .yellow()
            );
            None
        }
    }
}

/// Header printed above a draft
pub(crate) fn print_heading(kind: AssistantKind) {
    println!("\n{}\n", kind.label().bold().cyan());
}

/// Switch the manager to `kind`
pub(crate) async fn enter(manager: &SessionManager, kind: AssistantKind) {
    if manager.activate(kind).await {
        tracing::debug!("Activated {}", kind);
    }
}
