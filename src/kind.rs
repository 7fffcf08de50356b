//! Assistant kinds and their storage namespaces

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::TeachAssistError;

/// The fixed set of assistant tabs
///
/// Each kind owns a "current session" slot and a "history" slot in the
/// key-value store, and has its own system prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AssistantKind {
    /// School report commentary
    Report,
    /// Individualised learning plan
    LearningPlan,
    /// Classroom lesson plan
    LessonPlan,
    /// Handwriting assessment from an uploaded image
    WritingAssessment,
}

impl AssistantKind {
    /// All kinds, in tab order
    pub const ALL: [AssistantKind; 4] = [
        AssistantKind::Report,
        AssistantKind::LearningPlan,
        AssistantKind::LessonPlan,
        AssistantKind::WritingAssessment,
    ];

    /// Kebab-case identifier, as accepted on the command line
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Report => "report",
            Self::LearningPlan => "learning-plan",
            Self::LessonPlan => "lesson-plan",
            Self::WritingAssessment => "writing-assessment",
        }
    }

    /// Human-readable tab label
    pub fn label(&self) -> &'static str {
        match self {
            Self::Report => "Report Assistant",
            Self::LearningPlan => "Learning Plan Assistant",
            Self::LessonPlan => "Lesson Plan Assistant",
            Self::WritingAssessment => "Writing Assessment",
        }
    }

    /// Whether drafts of this kind are produced from typed notes
    pub fn is_text(&self) -> bool {
        !matches!(self, Self::WritingAssessment)
    }

    fn storage_slug(&self) -> &'static str {
        match self {
            Self::Report => "report",
            Self::LearningPlan => "learningplan",
            Self::LessonPlan => "lessonplan",
            Self::WritingAssessment => "writingassessment",
        }
    }

    /// Key of the "current session" slot
    ///
    /// # Examples
    ///
    /// ```
    /// use teachassist::kind::AssistantKind;
    ///
    /// assert_eq!(AssistantKind::LearningPlan.current_key(), "teachassist_learningplan_current");
    /// ```
    pub fn current_key(&self) -> String {
        format!("teachassist_{}_current", self.storage_slug())
    }

    /// Key of the "history" slot
    pub fn history_key(&self) -> String {
        format!("teachassist_{}_history", self.storage_slug())
    }
}

impl fmt::Display for AssistantKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AssistantKind {
    type Err = TeachAssistError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        AssistantKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s.trim().to_lowercase())
            .ok_or_else(|| {
                TeachAssistError::Config(format!(
                    "Unknown assistant kind: {}. Must be one of: report, learning-plan, lesson-plan, writing-assessment",
                    s
                ))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_storage_keys_are_distinct_per_kind() {
        let keys: HashSet<String> = AssistantKind::ALL
            .iter()
            .flat_map(|k| [k.current_key(), k.history_key()])
            .collect();
        assert_eq!(keys.len(), 8);
    }

    #[test]
    fn test_storage_keys_match_browser_layout() {
        assert_eq!(AssistantKind::Report.current_key(), "teachassist_report_current");
        assert_eq!(
            AssistantKind::LessonPlan.history_key(),
            "teachassist_lessonplan_history"
        );
    }

    #[test]
    fn test_from_str_accepts_kebab_case() {
        assert_eq!(
            "learning-plan".parse::<AssistantKind>().unwrap(),
            AssistantKind::LearningPlan
        );
        assert_eq!(
            " Report ".parse::<AssistantKind>().unwrap(),
            AssistantKind::Report
        );
        assert!("essay".parse::<AssistantKind>().is_err());
    }

    #[test]
    fn test_serde_uses_kebab_case() {
        let json = serde_json::to_string(&AssistantKind::WritingAssessment).unwrap();
        assert_eq!(json, "\"writing-assessment\"");
    }

    #[test]
    fn test_only_assessment_is_not_text() {
        assert!(AssistantKind::Report.is_text());
        assert!(!AssistantKind::WritingAssessment.is_text());
    }
}
