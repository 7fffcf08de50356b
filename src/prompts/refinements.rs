//! Refinement presets offered as toggle buttons per assistant kind

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::TeachAssistError;
use crate::kind::AssistantKind;

/// A fixed refinement instruction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RefinementPreset {
    MorePositive,
    LessPositive,
    MoreSpecific,
    FocusStrengths,
    FocusGrowth,
    Shorten,
    AddDetail,
    AddActivities,
    IncludeResources,
    MakeConcise,
    MakePractical,
    AddDifferentiation,
    IncludeAssessment,
    ExpandActivities,
    AddScaffolding,
}

impl RefinementPreset {
    /// Every preset
    pub const ALL: [RefinementPreset; 15] = [
        RefinementPreset::MorePositive,
        RefinementPreset::LessPositive,
        RefinementPreset::MoreSpecific,
        RefinementPreset::FocusStrengths,
        RefinementPreset::FocusGrowth,
        RefinementPreset::Shorten,
        RefinementPreset::AddDetail,
        RefinementPreset::AddActivities,
        RefinementPreset::IncludeResources,
        RefinementPreset::MakeConcise,
        RefinementPreset::MakePractical,
        RefinementPreset::AddDifferentiation,
        RefinementPreset::IncludeAssessment,
        RefinementPreset::ExpandActivities,
        RefinementPreset::AddScaffolding,
    ];

    /// Kebab-case identifier
    pub fn id(&self) -> &'static str {
        match self {
            Self::MorePositive => "more-positive",
            Self::LessPositive => "less-positive",
            Self::MoreSpecific => "more-specific",
            Self::FocusStrengths => "focus-strengths",
            Self::FocusGrowth => "focus-growth",
            Self::Shorten => "shorten",
            Self::AddDetail => "add-detail",
            Self::AddActivities => "add-activities",
            Self::IncludeResources => "include-resources",
            Self::MakeConcise => "make-concise",
            Self::MakePractical => "make-practical",
            Self::AddDifferentiation => "add-differentiation",
            Self::IncludeAssessment => "include-assessment",
            Self::ExpandActivities => "expand-activities",
            Self::AddScaffolding => "add-scaffolding",
        }
    }

    /// Button label
    pub fn label(&self) -> &'static str {
        match self {
            Self::MorePositive => "Make More Positive",
            Self::LessPositive => "Make Less Positive",
            Self::MoreSpecific => "Make More Specific",
            Self::FocusStrengths => "Focus on Strengths",
            Self::FocusGrowth => "Focus on Growth Areas",
            Self::Shorten => "Shorten",
            Self::AddDetail => "Add More Detail",
            Self::AddActivities => "Add More Activities",
            Self::IncludeResources => "Include More Resources",
            Self::MakeConcise => "Make More Concise",
            Self::MakePractical => "Make More Practical",
            Self::AddDifferentiation => "Add Differentiation Strategies",
            Self::IncludeAssessment => "Include More Assessment",
            Self::ExpandActivities => "Expand Activities",
            Self::AddScaffolding => "Add More Scaffolding",
        }
    }

    /// Instruction clause spliced into the refinement sentence
    pub fn instruction(&self) -> &'static str {
        match self {
            Self::MorePositive => "make the tone more positive and encouraging",
            Self::LessPositive => "make the tone more direct and honest about concerns",
            Self::MoreSpecific => "add more specific details and examples",
            Self::FocusStrengths => "emphasise strengths and achievements",
            Self::FocusGrowth => "focus more on areas for development",
            Self::Shorten => "make this more concise",
            Self::AddDetail => "expand with more detail",
            Self::AddActivities => "include more specific learning activities for each area",
            Self::IncludeResources => "add more specific resources and materials",
            Self::MakeConcise => "make this more concise",
            Self::MakePractical => "make this more practical and actionable",
            Self::AddDifferentiation => {
                "include more differentiation strategies for different ability levels"
            }
            Self::IncludeAssessment => "add more assessment methods and success criteria",
            Self::ExpandActivities => "provide more detailed activities and teaching strategies",
            Self::AddScaffolding => "include more scaffolding and instructional supports",
        }
    }

    /// Presets offered for `kind`, in button order
    pub fn for_kind(kind: AssistantKind) -> &'static [RefinementPreset] {
        use RefinementPreset::*;
        match kind {
            AssistantKind::Report => &[
                MorePositive,
                LessPositive,
                MoreSpecific,
                FocusStrengths,
                FocusGrowth,
                Shorten,
                AddDetail,
            ],
            AssistantKind::LearningPlan => &[
                AddDetail,
                MakeConcise,
                AddActivities,
                IncludeResources,
                MoreSpecific,
                MakePractical,
            ],
            AssistantKind::LessonPlan => &[
                AddDetail,
                MakeConcise,
                AddDifferentiation,
                IncludeAssessment,
                ExpandActivities,
                AddScaffolding,
            ],
            AssistantKind::WritingAssessment => &[],
        }
    }

    /// Whether this preset is offered for `kind`
    pub fn applies_to(&self, kind: AssistantKind) -> bool {
        Self::for_kind(kind).contains(self)
    }
}

impl fmt::Display for RefinementPreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for RefinementPreset {
    type Err = TeachAssistError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        RefinementPreset::ALL
            .into_iter()
            .find(|preset| preset.id() == wanted)
            .ok_or_else(|| TeachAssistError::Config(format!("Unknown refinement preset: {}", s)))
    }
}
