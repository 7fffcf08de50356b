//! System prompts and refinement presets for each assistant kind
//!
//! The prompt text is the only place where section-scoped versus
//! whole-document refinement is described; the crate itself never inspects
//! generated documents.

pub mod assessment;
pub mod drafting;
pub mod refinements;

pub use refinements::RefinementPreset;

use crate::kind::AssistantKind;

/// Builds the system prompt for `kind`
///
/// # Examples
///
/// ```
/// use teachassist::kind::AssistantKind;
/// use teachassist::prompts::system_prompt;
///
/// let prompt = system_prompt(AssistantKind::Report);
/// assert!(prompt.contains("Academic Performance"));
/// ```
pub fn system_prompt(kind: AssistantKind) -> String {
    match kind {
        AssistantKind::Report => drafting::report_prompt(),
        AssistantKind::LearningPlan => drafting::learning_plan_prompt(),
        AssistantKind::LessonPlan => drafting::lesson_plan_prompt(),
        AssistantKind::WritingAssessment => assessment::assessment_prompt(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_system_prompt_not_empty() {
        for kind in AssistantKind::ALL {
            let prompt = system_prompt(kind);
            assert!(prompt.len() > 50, "Prompt too short for {}", kind);
        }
    }

    #[test]
    fn test_system_prompts_are_distinct() {
        let prompts: HashSet<String> = AssistantKind::ALL.into_iter().map(system_prompt).collect();
        assert_eq!(prompts.len(), AssistantKind::ALL.len());
    }
}
