//! Handwriting assessment inputs and results

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

use crate::error::{Result, TeachAssistError};
use crate::providers::ImageInput;

/// Largest accepted image (3 MiB)
pub const MAX_IMAGE_BYTES: usize = 3_145_728;

/// Primary school year level of the student who wrote the sample
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum YearLevel {
    Foundation,
    Year1,
    Year2,
    Year3,
    Year4,
    Year5,
    Year6,
}

impl YearLevel {
    /// Display name, e.g. `Year 3`
    pub fn label(&self) -> &'static str {
        match self {
            Self::Foundation => "Foundation",
            Self::Year1 => "Year 1",
            Self::Year2 => "Year 2",
            Self::Year3 => "Year 3",
            Self::Year4 => "Year 4",
            Self::Year5 => "Year 5",
            Self::Year6 => "Year 6",
        }
    }

    /// Text of the user turn sent with the image
    pub fn request_text(&self) -> String {
        format!(
            "Assess this handwriting sample from a {} student.",
            self.label()
        )
    }
}

impl fmt::Display for YearLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for YearLevel {
    type Err = TeachAssistError;

    /// Accepts `Foundation`, `F`, `Year3`, `year-3`, `Year 3`, or `3`
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .to_lowercase()
            .chars()
            .filter(|c| !matches!(c, ' ' | '-' | '_'))
            .collect();

        let level = match normalized.as_str() {
            "foundation" | "f" | "prep" | "0" => Self::Foundation,
            other => {
                let digits = other.strip_prefix("year").unwrap_or(other);
                match digits {
                    "1" => Self::Year1,
                    "2" => Self::Year2,
                    "3" => Self::Year3,
                    "4" => Self::Year4,
                    "5" => Self::Year5,
                    "6" => Self::Year6,
                    _ => {
                        return Err(TeachAssistError::Config(format!(
                            "Unknown year level: {}. Use Foundation or Year1 to Year6",
                            s
                        )))
                    }
                }
            }
        };
        Ok(level)
    }
}

/// Media type for an image path, from its extension
pub fn media_type_for_path(path: &Path) -> Option<&'static str> {
    let ext = path.extension()?.to_str()?.to_lowercase();
    match ext.as_str() {
        "png" => Some("image/png"),
        "jpg" | "jpeg" => Some("image/jpeg"),
        "gif" => Some("image/gif"),
        "webp" => Some("image/webp"),
        "bmp" => Some("image/bmp"),
        _ => None,
    }
}

/// Media type of image data, from its leading magic bytes
///
/// Independent of any file extension, so a renamed document is not mistaken
/// for an image.
pub fn sniff_image_media_type(bytes: &[u8]) -> Option<&'static str> {
    if bytes.starts_with(b"\x89PNG") {
        Some("image/png")
    } else if bytes.starts_with(b"\xff\xd8\xff") {
        Some("image/jpeg")
    } else if bytes.starts_with(b"GIF87a") || bytes.starts_with(b"GIF89a") {
        Some("image/gif")
    } else if bytes.starts_with(b"RIFF") && bytes.len() >= 12 && &bytes[8..12] == b"WEBP" {
        Some("image/webp")
    } else if bytes.starts_with(b"BM") {
        Some("image/bmp")
    } else {
        None
    }
}

/// Reject missing, oversized, or non-image uploads
pub fn validate_image(image: &ImageInput) -> Result<()> {
    if image.data.is_empty() {
        return Err(TeachAssistError::InvalidImage("no image data provided".to_string()).into());
    }

    if image.data.len() > MAX_IMAGE_BYTES {
        return Err(TeachAssistError::InvalidImage(format!(
            "file size must be less than 3MB (got {} bytes)",
            image.data.len()
        ))
        .into());
    }

    if !image.media_type.starts_with("image/") {
        return Err(TeachAssistError::InvalidImage(format!(
            "unsupported media type: {}",
            image.media_type
        ))
        .into());
    }

    Ok(())
}

/// Score for one handwriting criterion
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CriterionScore {
    /// What was assessed, e.g. `Letter formation`
    pub criterion: String,
    /// How well the year-level expectation is met, 0 to 100
    pub percentage: f64,
    /// What in the sample supports the score
    #[serde(default)]
    pub evidence: String,
}

/// Traffic-light band of a criterion score
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreBand {
    /// 75% and above
    Secure,
    /// 50% to 74%
    Developing,
    /// Below 50%
    NeedsSupport,
}

impl CriterionScore {
    /// Band used when colouring the score
    pub fn band(&self) -> ScoreBand {
        if self.percentage >= 75.0 {
            ScoreBand::Secure
        } else if self.percentage >= 50.0 {
            ScoreBand::Developing
        } else {
            ScoreBand::NeedsSupport
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum AssessmentPayload {
    Wrapped { assessments: Vec<CriterionScore> },
    Bare(Vec<CriterionScore>),
}

/// Parsed assessment response
#[derive(Debug, Clone, PartialEq)]
pub enum AssessmentResult {
    /// The model returned the requested JSON structure
    Criteria(Vec<CriterionScore>),
    /// Anything else, shown verbatim
    RawText(String),
}

impl AssessmentResult {
    /// Single parse attempt with raw-text fallback
    ///
    /// A surrounding ```` ```json ```` fence is tolerated. Percentages are
    /// clamped to 0..=100. An empty criteria list falls back to raw text.
    ///
    /// # Examples
    ///
    /// ```
    /// use teachassist::assessment::AssessmentResult;
    ///
    /// let parsed = AssessmentResult::parse(
    ///     r#"{"assessments":[{"criterion":"Spacing","percentage":80,"evidence":"Even gaps"}]}"#,
    /// );
    /// assert!(matches!(parsed, AssessmentResult::Criteria(ref c) if c.len() == 1));
    ///
    /// let fallback = AssessmentResult::parse("The writing is neat.");
    /// assert_eq!(fallback, AssessmentResult::RawText("The writing is neat.".to_string()));
    /// ```
    pub fn parse(raw: &str) -> Self {
        let body = strip_code_fence(raw);

        match serde_json::from_str::<AssessmentPayload>(body) {
            Ok(payload) => {
                let mut criteria = match payload {
                    AssessmentPayload::Wrapped { assessments } => assessments,
                    AssessmentPayload::Bare(list) => list,
                };
                if criteria.is_empty() {
                    return Self::RawText(raw.to_string());
                }
                for score in &mut criteria {
                    score.percentage = score.percentage.clamp(0.0, 100.0);
                }
                Self::Criteria(criteria)
            }
            Err(e) => {
                tracing::debug!("Assessment response is not structured JSON: {}", e);
                Self::RawText(raw.to_string())
            }
        }
    }
}

fn strip_code_fence(raw: &str) -> &str {
    let trimmed = raw.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let rest = rest.strip_prefix("json").unwrap_or(rest);
    rest.strip_suffix("```").unwrap_or(rest).trim()
}
