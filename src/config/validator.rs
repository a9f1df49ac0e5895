//! Configuration validation.
//!
//! All problems are collected so they can be fixed in one go.

use crate::config::schema::Settings;
use crate::error::{GearplanError, Result};
use crate::materia::Confidence;

/// One validation problem.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Rule identifier.
    pub rule: String,
    /// Human-readable message.
    pub message: String,
}

impl ValidationError {
    fn new(rule: &str, message: String) -> Self {
        Self {
            rule: rule.to_string(),
            message,
        }
    }
}

/// Collect every problem with the settings.
pub fn validate_settings(settings: &Settings) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    let p = settings.meld_confidence;
    if !p.is_finite() || !(Confidence::MIN..=Confidence::MAX).contains(&p) {
        errors.push(ValidationError::new(
            "meld-confidence-range",
            format!(
                "meld_confidence must be between {} and {}, got {}",
                Confidence::MIN,
                Confidence::MAX,
                p
            ),
        ));
    }

    let files = &settings.files;
    for (name, path) in [
        ("gearsets", &files.gearsets),
        ("inventory", &files.inventory),
        ("catalog", &files.catalog),
    ] {
        if path.as_os_str().is_empty() {
            errors.push(ValidationError::new(
                "empty-file-path",
                format!("files.{} must not be empty", name),
            ));
        }
    }

    if files.gearsets == files.catalog || files.gearsets == files.inventory {
        errors.push(ValidationError::new(
            "shared-file-path",
            format!(
                "files.gearsets ({}) must differ from the catalog and inventory files",
                files.gearsets.display()
            ),
        ));
    }

    errors
}

/// Validate settings, joining all problems into one error.
pub fn validate(settings: &Settings) -> Result<()> {
    let errors = validate_settings(settings);
    if errors.is_empty() {
        return Ok(());
    }
    let messages: Vec<_> = errors.iter().map(|e| e.message.clone()).collect();
    Err(GearplanError::ConfigValidationError {
        message: messages.join("; "),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn defaults_are_valid() {
        assert!(validate(&Settings::default()).is_ok());
    }

    #[test]
    fn confidence_out_of_range_is_reported() {
        let settings = Settings {
            meld_confidence: 1.0,
            ..Settings::default()
        };
        let errors = validate_settings(&settings);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].rule, "meld-confidence-range");
    }

    #[test]
    fn collects_every_problem() {
        let mut settings = Settings {
            meld_confidence: f64::NAN,
            ..Settings::default()
        };
        settings.files.catalog = PathBuf::new();
        settings.files.inventory = settings.files.gearsets.clone();

        let errors = validate_settings(&settings);
        let rules: Vec<_> = errors.iter().map(|e| e.rule.as_str()).collect();
        assert_eq!(
            rules,
            vec!["meld-confidence-range", "empty-file-path", "shared-file-path"]
        );
        let err = validate(&settings).unwrap_err();
        assert!(err.to_string().contains("meld_confidence"));
    }
}
