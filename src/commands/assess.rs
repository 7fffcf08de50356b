//! Handwriting assessment command

use colored::Colorize;
use std::path::Path;

use crate::assessment::{
    media_type_for_path, sniff_image_media_type, AssessmentResult, ScoreBand, YearLevel,
};
use crate::error::{Result, TeachAssistError};
use crate::kind::AssistantKind;
use crate::providers::ImageInput;
use crate::session::SessionManager;

use super::{enter, print_heading, report_outcome};

/// Load an image file
///
/// The extension must name an image type and the contents must start with
/// matching image magic bytes; the media type sent is the sniffed one.
pub fn load_image(path: &Path) -> Result<ImageInput> {
    if media_type_for_path(path).is_none() {
        return Err(TeachAssistError::InvalidImage(format!(
            "{} is not a supported image file",
            path.display()
        ))
        .into());
    }

    let data = std::fs::read(path).map_err(TeachAssistError::from)?;
    let media_type = sniff_image_media_type(&data).ok_or_else(|| {
        TeachAssistError::InvalidImage(format!("{} does not contain image data", path.display()))
    })?;
    Ok(ImageInput::new(media_type, data))
}

/// Assess the handwriting in `image` for a student at `year_level`
pub async fn run_assess(
    manager: &SessionManager,
    year_level: YearLevel,
    image: &Path,
) -> Result<()> {
    let image = load_image(image)?;
    enter(manager, AssistantKind::WritingAssessment).await;

    println!("{}", "Analysing handwriting...".dimmed());
    let outcome = manager.assess(year_level, &image).await?;
    let Some(assessed) = report_outcome(outcome, |a| &a.generated) else {
        return Ok(());
    };

    print_heading(AssistantKind::WritingAssessment);
    match &assessed.result {
        AssessmentResult::Criteria(criteria) => {
            for score in criteria {
                let pct = format!("{:>3.0}%", score.percentage);
                let pct = match score.band() {
                    ScoreBand::Secure => pct.green(),
                    ScoreBand::Developing => pct.yellow(),
                    ScoreBand::NeedsSupport => pct.red(),
                };
                println!("{} {}", pct.bold(), score.criterion.bold());
                if !score.evidence.is_empty() {
                    println!("     {}", score.evidence);
                }
            }
            println!();
        }
        AssessmentResult::RawText(text) => println!("{}\n", text),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{assert_error_contains, create_test_file, temp_dir};

    #[test]
    fn test_load_image_infers_media_type() {
        let dir = temp_dir();
        let path = create_test_file(&dir, "sample.jpg", [0xFF, 0xD8, 0xFF]);

        let image = load_image(&path).unwrap();
        assert_eq!(image.media_type, "image/jpeg");
        assert_eq!(image.data, vec![0xFF, 0xD8, 0xFF]);
    }

    #[test]
    fn test_load_image_rejects_unknown_extension() {
        let dir = temp_dir();
        let path = create_test_file(&dir, "sample.pdf", b"%PDF");

        let err = load_image(&path).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<TeachAssistError>(),
            Some(TeachAssistError::InvalidImage(_))
        ));
    }

    #[test]
    fn test_load_image_rejects_renamed_document() {
        let dir = temp_dir();
        let path = create_test_file(&dir, "sample.png", b"%PDF-1.7 not really a picture");

        assert_error_contains(load_image(&path), "does not contain image data");
    }

    #[test]
    fn test_load_image_uses_sniffed_media_type() {
        let dir = temp_dir();
        let path = create_test_file(&dir, "scan.jpg", b"\x89PNG\r\n\x1a\n");

        let image = load_image(&path).unwrap();
        assert_eq!(image.media_type, "image/png");
    }

    #[test]
    fn test_load_image_missing_file_is_io_error() {
        let err = load_image(Path::new("/definitely/not/here.png")).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<TeachAssistError>(),
            Some(TeachAssistError::Io(_))
        ));
    }
}
