//! Builds the single refinement instruction sent after a draft

use crate::error::{Result, TeachAssistError};
use crate::prompts::RefinementPreset;

/// Leading text of every refinement instruction
pub const REFINEMENT_PREFIX: &str = "Please refine the above with the following changes: ";

/// Join instruction fragments into one sentence
///
/// One fragment is used as-is; two or more are joined with `", "` and a
/// final `", and "`. Blank fragments are skipped.
///
/// # Errors
///
/// Returns `TeachAssistError::NoRefinementsSelected` if no non-blank fragment
/// remains
///
/// # Examples
///
/// ```
/// use teachassist::session::composer::compose_fragments;
///
/// assert_eq!(
///     compose_fragments(&["A", "B", "C"]).unwrap(),
///     "Please refine the above with the following changes: A, B, and C."
/// );
/// ```
pub fn compose_fragments<S: AsRef<str>>(fragments: &[S]) -> Result<String> {
    let fragments: Vec<&str> = fragments
        .iter()
        .map(|f| f.as_ref().trim())
        .filter(|f| !f.is_empty())
        .collect();

    let joined = match fragments.as_slice() {
        [] => return Err(TeachAssistError::NoRefinementsSelected.into()),
        [only] => only.to_string(),
        [init @ .., last] => format!("{}, and {}", init.join(", "), last),
    };

    Ok(format!("{}{}.", REFINEMENT_PREFIX, joined))
}

/// Compose presets and optional free text; free text always goes last
///
/// A preset listed twice is used once, at its first position.
pub fn compose_refinement(presets: &[RefinementPreset], custom: Option<&str>) -> Result<String> {
    let mut seen: Vec<RefinementPreset> = Vec::with_capacity(presets.len());
    for preset in presets {
        if !seen.contains(preset) {
            seen.push(*preset);
        }
    }

    let mut fragments: Vec<&str> = seen.iter().map(|p| p.instruction()).collect();
    if let Some(custom) = custom {
        fragments.push(custom);
    }
    compose_fragments(&fragments)
}

/// Toggle-button selection state for one refinement round
///
/// Presets keep the order in which they were first switched on.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RefinementSelection {
    presets: Vec<RefinementPreset>,
    custom: String,
}

impl RefinementSelection {
    /// Nothing selected
    pub fn new() -> Self {
        Self::default()
    }

    /// Switch `preset` on, or off if it was already on
    pub fn toggle(&mut self, preset: RefinementPreset) {
        if let Some(pos) = self.presets.iter().position(|p| *p == preset) {
            self.presets.remove(pos);
        } else {
            self.presets.push(preset);
        }
    }

    /// Switch `preset` on; already-selected presets keep their position
    pub fn select(&mut self, preset: RefinementPreset) {
        if !self.presets.contains(&preset) {
            self.presets.push(preset);
        }
    }

    /// Replace the free-text instruction
    pub fn set_custom(&mut self, text: impl Into<String>) {
        self.custom = text.into();
    }

    /// Selected presets in selection order
    pub fn presets(&self) -> &[RefinementPreset] {
        &self.presets
    }

    /// Whether nothing would be sent
    pub fn is_empty(&self) -> bool {
        self.presets.is_empty() && self.custom.trim().is_empty()
    }

    /// Build the instruction sentence
    pub fn compose(&self) -> Result<String> {
        compose_refinement(&self.presets, Some(&self.custom))
    }

    /// Reset after a successful refinement
    pub fn clear(&mut self) {
        self.presets.clear();
        self.custom.clear();
    }
}
